//! 数据库基础设施
//!
//! 目标引擎是 CockroachDB（PostgreSQL 协议，端口 26257）。启动时
//! 破坏性重建目标数据库和 products 表，只在进程启动阶段执行一次。

use sqlx::{
    postgres::{PgPool, PgPoolOptions},
    Executor,
};
use std::{env, time::Duration};
use tracing::warn;

/// products 表结构：四列全部为文本，id 为主键
const PRODUCTS_SCHEMA: &str =
    "CREATE TABLE products (id TEXT PRIMARY KEY, name TEXT, price TEXT, quantity TEXT)";

/// 连接配置。只有主机名可以通过 DB_HOST 环境变量覆盖，其余参数固定。
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub name: String,
}

impl DbConfig {
    pub fn from_env() -> Self {
        let host = env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string());
        Self {
            user: "root".to_string(),
            password: String::new(),
            host,
            port: 26257,
            name: "restdb".to_string(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn url(&self) -> String {
        format!(
            "postgresql://{}:{}@{}:{}/{}",
            self.user, self.password, self.host, self.port, self.name
        )
    }

    /// 管理连接挂在 defaultdb 上，不依赖目标数据库是否存在
    pub fn admin_url(&self) -> String {
        format!(
            "postgresql://{}:{}@{}:{}/defaultdb",
            self.user, self.password, self.host, self.port
        )
    }
}

/// 启动时的连接重试策略，在装配阶段决定
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: Option<u32>,
    pub delay: Duration,
}

impl RetryPolicy {
    /// 无上限重试。数据库始终不可达时这个循环不会退出。
    pub fn unbounded(delay: Duration) -> Self {
        Self {
            max_attempts: None,
            delay,
        }
    }

    pub fn bounded(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: Some(max_attempts),
            delay,
        }
    }
}

/// 按重试策略循环探测数据库，固定间隔，直到连接成功或尝试次数用尽
pub async fn connect_with_retry(url: &str, policy: &RetryPolicy) -> Result<PgPool, sqlx::Error> {
    let mut attempts: u32 = 0;
    loop {
        match PgPoolOptions::new()
            .max_connections(20)
            .acquire_timeout(Duration::from_secs(8))
            .connect(url)
            .await
        {
            Ok(pool) => return Ok(pool),
            Err(err) => {
                attempts += 1;
                if policy.max_attempts.is_some_and(|max| attempts >= max) {
                    return Err(err);
                }
                warn!("Failed to connect to database. Retrying...");
                tokio::time::sleep(policy.delay).await;
            }
        }
    }
}

/// 数据库句柄：连接池加数据库名。由服务器装配阶段构造一次，
/// 注入到各处理器，处理器不负责关闭连接。
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
    name: String,
}

impl Database {
    pub fn new(pool: PgPool, name: impl Into<String>) -> Self {
        Self {
            pool,
            name: name.into(),
        }
    }

    /// 连接（带重试）并破坏性重建目标数据库和 products 表。
    /// DDL 失败属于致命错误，由调用方向上传播并终止进程。
    pub async fn bootstrap(cfg: &DbConfig, policy: &RetryPolicy) -> Result<Self, sqlx::Error> {
        let admin_pool = connect_with_retry(&cfg.admin_url(), policy).await?;
        let admin = Database::new(admin_pool, cfg.name.clone());

        let drop_db = format!("DROP DATABASE IF EXISTS {}", cfg.name);
        let create_db = format!("CREATE DATABASE {}", cfg.name);
        admin.exec_sql(&[drop_db.as_str(), create_db.as_str()]).await?;
        admin.close().await;

        // 重新挂到目标数据库，相当于原来的 USE
        let pool = PgPoolOptions::new()
            .max_connections(20)
            .acquire_timeout(Duration::from_secs(8))
            .connect(&cfg.url())
            .await?;
        let db = Database::new(pool, cfg.name.clone());
        db.exec_sql(&[PRODUCTS_SCHEMA]).await?;

        Ok(db)
    }

    /// 顺序执行一组 DDL 语句，任何一条失败立即返回
    pub async fn exec_sql(&self, statements: &[&str]) -> Result<(), sqlx::Error> {
        for stmt in statements {
            self.pool.execute(*stmt).await?;
        }
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> DbConfig {
        DbConfig {
            user: "root".to_string(),
            password: String::new(),
            host: "db.internal".to_string(),
            port: 26257,
            name: "restdb".to_string(),
        }
    }

    #[test]
    fn url_includes_every_connection_parameter() {
        assert_eq!(
            config().url(),
            "postgresql://root:@db.internal:26257/restdb"
        );
    }

    #[test]
    fn admin_url_targets_defaultdb() {
        assert_eq!(
            config().admin_url(),
            "postgresql://root:@db.internal:26257/defaultdb"
        );
    }

    #[test]
    fn with_name_overrides_target_database() {
        let cfg = config().with_name("test");
        assert_eq!(cfg.name, "test");
        assert_eq!(cfg.url(), "postgresql://root:@db.internal:26257/test");
    }

    #[tokio::test]
    async fn bounded_retry_gives_up_after_max_attempts() {
        let policy = RetryPolicy::bounded(2, Duration::from_millis(10));
        let result =
            connect_with_retry("postgresql://root:@127.0.0.1:9/defaultdb", &policy).await;
        assert!(result.is_err());
    }
}
