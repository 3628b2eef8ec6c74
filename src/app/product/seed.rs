//! 固定数据装载
//!
//! 读取 JSON 固定数据文件，对运行中的服务器逐条发创建请求。
//! 服务器起动后的后台任务和客户端的 db 子命令都走这里。

use std::fmt;

use tracing::warn;

use super::model::Product;

/// 固定数据装载错误
#[derive(Debug)]
pub enum SeedError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for SeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedError::Io(err) => write!(f, "Failed to read fixture file: {}", err),
            SeedError::Json(err) => write!(f, "Failed to parse fixture JSON: {}", err),
        }
    }
}

impl std::error::Error for SeedError {}

impl From<std::io::Error> for SeedError {
    fn from(err: std::io::Error) -> Self {
        SeedError::Io(err)
    }
}

impl From<serde_json::Error> for SeedError {
    fn from(err: serde_json::Error) -> Self {
        SeedError::Json(err)
    }
}

/// 解析固定数据文件，返回产品数组
pub fn load_products(path: &str) -> Result<Vec<Product>, SeedError> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// 把固定数据文件里的每个产品 POST 到服务器。单条失败只记日志
/// 不中断，文件读不到或解析不了才返回错误。
pub async fn add_all_products(base_url: &str, path: &str) -> Result<(), SeedError> {
    let products = load_products(path)?;
    let client = reqwest::Client::new();
    let url = format!("{}/products", base_url);

    for product in &products {
        match client.post(&url).json(product).send().await {
            Ok(resp) if resp.status() == reqwest::StatusCode::CREATED => {}
            Ok(resp) => warn!(
                "Fixture product {} rejected with status {}",
                product.id,
                resp.status()
            ),
            Err(err) => warn!("Failed to POST fixture product {}: {}", product.id, err),
        }
    }

    Ok(())
}
