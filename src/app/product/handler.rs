//! 产品处理器
//!
//! 五个处理器都是无状态的请求进、响应出，通过共享状态访问同一个
//! 连接池。失败时把底层错误消息原样放进 {"error": ...} 响应体。
//!
//! 保留的历史行为（见 DESIGN.md）：
//! - 分页越界返回 404，而按 id 查不到行返回 500；
//! - 插入失败一律按 409 处理。

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;

use super::{model::Product, service::ProductService};
use crate::core::error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub service: ProductService,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    page: Option<String>,
    limit: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct IdQuery {
    #[serde(default)]
    id: String,
}

/// 解析失败或非正数一律退回默认值 page=1、limit=10
fn page_and_limit(query: &ListQuery) -> (i64, i64) {
    let page = query
        .page
        .as_deref()
        .and_then(|s| s.parse::<i64>().ok())
        .filter(|page| *page >= 1)
        .unwrap_or(1);
    let limit = query
        .limit
        .as_deref()
        .and_then(|s| s.parse::<i64>().ok())
        .filter(|limit| *limit >= 1)
        .unwrap_or(10);
    (page, limit)
}

/// 分页列表。偏移量超过总行数时按 404 处理，空页是错误而不是空数组。
pub async fn get_products(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let (page, limit) = page_and_limit(&query);
    let offset = (page - 1).saturating_mul(limit);

    let total = state
        .service
        .count()
        .await
        .map_err(|err| ApiError::Internal(err.to_string()))?;

    if offset >= total {
        return Err(ApiError::NotFound("Page out of range".to_string()));
    }

    let products = state
        .service
        .page(limit, offset)
        .await
        .map_err(|err| ApiError::Internal(err.to_string()))?;

    Ok(Json(products))
}

/// 按 id 查询单个产品。id 缺失时照常用空串去查，查不到按 500 处理。
pub async fn get_product(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Json<Product>, ApiError> {
    let product = state
        .service
        .find(&query.id)
        .await
        .map_err(|err| ApiError::Internal(err.to_string()))?;

    Ok(Json(product))
}

/// 创建产品
pub async fn add_product(
    State(state): State<AppState>,
    payload: Result<Json<Product>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let Json(product) = payload.map_err(|err| ApiError::BadRequest(err.to_string()))?;

    if product.has_empty_field() {
        return Err(ApiError::BadRequest("Empty field".to_string()));
    }

    state
        .service
        .insert(&product)
        .await
        .map_err(|err| ApiError::Conflict(err.to_string()))?;

    Ok((StatusCode::CREATED, Json(product)))
}

/// 部分更新。行不存在时与单个查询保持一致，按 500 处理。
pub async fn update_product(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
    payload: Result<Json<Product>, JsonRejection>,
) -> Result<Json<Product>, ApiError> {
    if query.id.is_empty() {
        return Err(ApiError::BadRequest(
            "Product ID is not provided!".to_string(),
        ));
    }

    let Json(incoming) = payload.map_err(|err| ApiError::BadRequest(err.to_string()))?;

    let merged = state
        .service
        .update(&query.id, incoming)
        .await
        .map_err(|err| ApiError::Internal(err.to_string()))?;

    Ok(Json(merged))
}

/// 删除产品。先确认行存在，不存在时按 500 处理。
pub async fn delete_product(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<StatusCode, ApiError> {
    if query.id.is_empty() {
        return Err(ApiError::BadRequest(
            "Product ID is not provided!".to_string(),
        ));
    }

    state
        .service
        .find(&query.id)
        .await
        .map_err(|err| ApiError::Internal(err.to_string()))?;

    state
        .service
        .delete(&query.id)
        .await
        .map_err(|err| ApiError::Internal(err.to_string()))?;

    Ok(StatusCode::NO_CONTENT)
}
