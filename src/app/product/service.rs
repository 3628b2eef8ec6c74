//! 产品业务服务

use super::model::Product;
use crate::infrastructure::database::Database;

/// 产品表的参数化语句都集中在这里。句柄为共享连接池的克隆，
/// 可以随状态克隆进每个处理器。
#[derive(Clone)]
pub struct ProductService {
    db: Database,
}

impl ProductService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
            .fetch_one(self.db.pool())
            .await?;
        Ok(total.0)
    }

    /// 返回一个分页窗口。没有 ORDER BY，行序按数据库默认顺序，
    /// 跨页顺序不保证稳定。
    pub async fn page(&self, limit: i64, offset: i64) -> Result<Vec<Product>, sqlx::Error> {
        sqlx::query_as::<_, Product>(
            "SELECT id, name, price, quantity FROM products LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.db.pool())
        .await
    }

    /// 查不到行时返回 RowNotFound，调用方与其它查询错误一视同仁
    pub async fn find(&self, id: &str) -> Result<Product, sqlx::Error> {
        sqlx::query_as::<_, Product>(
            "SELECT id, name, price, quantity FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_one(self.db.pool())
        .await
    }

    pub async fn insert(&self, product: &Product) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO products (id, name, price, quantity) VALUES ($1, $2, $3, $4)")
            .bind(&product.id)
            .bind(&product.name)
            .bind(&product.price)
            .bind(&product.quantity)
            .execute(self.db.pool())
            .await?;
        Ok(())
    }

    /// 读取现有行、按空字段保留的规则合并、写回，整个过程在一个
    /// 事务里，避免并发客户端之间的丢失更新。
    pub async fn update(&self, id: &str, incoming: Product) -> Result<Product, sqlx::Error> {
        let mut tx = self.db.pool().begin().await?;

        let stored: Product = sqlx::query_as(
            "SELECT id, name, price, quantity FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        let merged = incoming.merge(stored);

        sqlx::query("UPDATE products SET name = $1, price = $2, quantity = $3 WHERE id = $4")
            .bind(&merged.name)
            .bind(&merged.price)
            .bind(&merged.quantity)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(merged)
    }

    pub async fn delete(&self, id: &str) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(self.db.pool())
            .await?;
        Ok(())
    }
}
