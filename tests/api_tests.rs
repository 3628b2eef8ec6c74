//! 端到端 API 测试
//!
//! 需要完整的运行环境：数据库可达、服务器已启动并且刚装载完
//! data.json（30 条产品）。因此全部标记 ignore，手工运行：
//!
//! ```text
//! cargo run --bin server &
//! cargo test --test api_tests -- --ignored --test-threads=1
//! ```
//!
//! 状态码沿用历史行为：分页越界是 404，而按 id 查不到行是 500。
//! 是否统一成 404 作为未决问题记录在 DESIGN.md。

use reqwest::StatusCode;
use serde_json::json;

use product_rest::app::product::model::Product;

const BASE_URL: &str = "http://localhost:8888";

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

async fn get_by_id(client: &reqwest::Client, id: &str) -> reqwest::Response {
    client
        .get(format!("{}/product?id={}", BASE_URL, id))
        .send()
        .await
        .unwrap()
}

#[tokio::test]
#[ignore]
async fn list_returns_exactly_the_requested_window() {
    let client = client();
    // (page, limit) 组合与种子数据的 30 行总数配合
    for (page, limit) in [(1_i64, 5_i64), (2, 10), (1, 30)] {
        let resp = client
            .get(format!(
                "{}/products?page={}&limit={}",
                BASE_URL, page, limit
            ))
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let products: Vec<Product> = resp.json().await.unwrap();
        assert_eq!(products.len(), limit as usize);
    }
}

#[tokio::test]
#[ignore]
async fn list_beyond_last_row_is_not_found() {
    // offset = (3-1)*15 = 30 >= 30 行
    let resp = client()
        .get(format!("{}/products?page=3&limit=15", BASE_URL))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn list_defaults_apply_for_unparseable_parameters() {
    let resp = client()
        .get(format!("{}/products?page=abc&limit=-5", BASE_URL))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let products: Vec<Product> = resp.json().await.unwrap();
    assert_eq!(products.len(), 10);
}

#[tokio::test]
#[ignore]
async fn get_returns_seeded_product() {
    let resp = get_by_id(&client(), "1").await;

    assert_eq!(resp.status(), StatusCode::OK);
    let product: Product = resp.json().await.unwrap();
    assert_eq!(product, Product::new("1", "Apple iPhone 15", "999.99", "150"));
}

#[tokio::test]
#[ignore]
async fn get_unknown_id_is_internal_error() {
    let resp = get_by_id(&client(), "ena").await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
#[ignore]
async fn create_rejects_empty_field() {
    let resp = client()
        .post(format!("{}/products", BASE_URL))
        .json(&Product::new("", "NAME", "PRICE", "QUANTITY"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore]
async fn create_rejects_empty_body() {
    let resp = client()
        .post(format!("{}/products", BASE_URL))
        .json(&json!({}))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore]
async fn update_without_id_is_bad_request() {
    let resp = client()
        .put(format!("{}/product?id=", BASE_URL))
        .json(&Product::new("", "updated", "updated", "updated"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore]
async fn update_unknown_id_is_internal_error() {
    let resp = client()
        .put(format!("{}/product?id=DoesNotExist", BASE_URL))
        .json(&Product::new("DoesNotExist", "updated", "updated", "updated"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

/// 空字段保留库中的值，非空字段覆盖。每个用例只动一条种子行，
/// 重复运行结果不变。
#[tokio::test]
#[ignore]
async fn update_merges_empty_fields_from_stored_row() {
    let client = client();
    let cases = [
        (
            Product::new("2", "updated", "", ""),
            Product::new("2", "updated", "849.99", "200"),
        ),
        (
            Product::new("3", "", "updated", ""),
            Product::new("3", "Sony PlayStation 5", "updated", "75"),
        ),
        (
            Product::new("4", "", "", "updated"),
            Product::new("4", "Dell XPS 13 Laptop", "1199.99", "updated"),
        ),
        (
            Product::new("5", "updated", "updated", "updated"),
            Product::new("5", "updated", "updated", "updated"),
        ),
    ];

    for (body, expected) in cases {
        let resp = client
            .put(format!("{}/product?id={}", BASE_URL, body.id))
            .json(&body)
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let merged: Product = resp.json().await.unwrap();
        assert_eq!(merged, expected);
    }
}

#[tokio::test]
#[ignore]
async fn delete_without_id_is_bad_request() {
    let resp = client()
        .delete(format!("{}/product?id=", BASE_URL))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore]
async fn delete_unknown_id_is_internal_error() {
    let resp = client()
        .delete(format!("{}/product?id=DoesNotExist", BASE_URL))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

/// 完整生命周期：创建、重复创建冲突、查询、部分更新、删除、
/// 删除后查询失败。全程只用 id 31，不影响种子数据。
#[tokio::test]
#[ignore]
async fn full_product_lifecycle() {
    let client = client();
    let product = Product::new("31", "NAME", "PRICE", "QUANTITY");

    // 创建，响应按原样回显
    let resp = client
        .post(format!("{}/products", BASE_URL))
        .json(&product)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Product = resp.json().await.unwrap();
    assert_eq!(created, product);

    // 同样的 id 再创建一次，冲突
    let resp = client
        .post(format!("{}/products", BASE_URL))
        .json(&product)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // 查询，字段逐字节一致
    let resp = get_by_id(&client, "31").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Product = resp.json().await.unwrap();
    assert_eq!(fetched, product);

    // 部分更新：空字段保留，price 覆盖
    let resp = client
        .put(format!("{}/product?id=31", BASE_URL))
        .json(&json!({ "name": "", "price": "P2", "quantity": "" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let merged: Product = resp.json().await.unwrap();
    assert_eq!(merged, Product::new("31", "NAME", "P2", "QUANTITY"));

    // 删除，空响应体
    let resp = client
        .delete(format!("{}/product?id=31", BASE_URL))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(resp.bytes().await.unwrap().is_empty());

    // 删除后查询按 500 处理
    let resp = get_by_id(&client, "31").await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
