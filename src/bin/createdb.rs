//! 一次性建库工具
//!
//! 连接数据库并为指定名字破坏性重建 schema，然后退出。
//! 名字从第一个参数读取，缺省为 test。

use std::{env, time::Duration};

use tracing::Level;

use product_rest::infrastructure::{
    database::{Database, DbConfig, RetryPolicy},
    logger::Logger,
};

#[tokio::main]
async fn main() -> Result<(), sqlx::Error> {
    Logger::init(Level::INFO);

    let name = env::args().nth(1).unwrap_or_else(|| "test".to_string());
    let cfg = DbConfig::from_env().with_name(name);
    let policy = RetryPolicy::bounded(5, Duration::from_secs(1));

    let db = Database::bootstrap(&cfg, &policy).await?;
    println!("{}", db.name());

    Ok(())
}
