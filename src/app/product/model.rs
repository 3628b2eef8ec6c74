//! 产品数据模型

use serde::{Deserialize, Serialize};

/// 产品记录。四个字段全部按文本存储和传输，不做数字类型校验。
///
/// 每个字段带 serde 默认值：请求体缺少的字段按空字符串处理，
/// 与部分更新的"空字符串 = 保持原值"语义配合。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(default)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: String,
    pub quantity: String,
}

impl Product {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: impl Into<String>,
        quantity: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price: price.into(),
            quantity: quantity.into(),
        }
    }

    /// 创建请求的校验：任何字段为空串都拒绝
    pub fn has_empty_field(&self) -> bool {
        self.id.is_empty()
            || self.name.is_empty()
            || self.price.is_empty()
            || self.quantity.is_empty()
    }

    /// 部分更新的合并规则：传入字段为空串时保留库中的值，非空则覆盖
    pub fn merge(self, stored: Product) -> Product {
        Product {
            id: if self.id.is_empty() { stored.id } else { self.id },
            name: if self.name.is_empty() {
                stored.name
            } else {
                self.name
            },
            price: if self.price.is_empty() {
                stored.price
            } else {
                self.price
            },
            quantity: if self.quantity.is_empty() {
                stored.quantity
            } else {
                self.quantity
            },
        }
    }
}
