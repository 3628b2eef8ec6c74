//! 产品目录 REST 服务入口
//!
//! 启动顺序：带重试的数据库连接、破坏性重建 schema、注册路由、
//! 延迟装载固定数据、开始监听。

use std::time::Duration;

use axum::{
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn, Level};

use product_rest::app::product::{handler, seed, service::ProductService};
use product_rest::infrastructure::{
    database::{Database, DbConfig, RetryPolicy},
    logger::Logger,
};

const BASE_URL: &str = "http://localhost:8888";
const FIXTURE_PATH: &str = "data.json";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    Logger::init(Level::INFO);

    let cfg = DbConfig::from_env();
    // 无上限重试与原有行为一致：数据库一直不可达时会永远等下去
    let policy = RetryPolicy::unbounded(Duration::from_secs(1));
    let db = Database::bootstrap(&cfg, &policy).await?;
    info!("Database {} ready", db.name());

    let state = handler::AppState {
        service: ProductService::new(db),
    };

    let app = Router::new()
        .route(
            "/products",
            get(handler::get_products).post(handler::add_product),
        )
        .route(
            "/product",
            get(handler::get_product)
                .put(handler::update_product)
                .delete(handler::delete_product),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // 服务器起动后向数据库填充固定数据，尽力而为，失败不影响服务
    tokio::spawn(async {
        tokio::time::sleep(Duration::from_secs(3)).await;
        if let Err(err) = seed::add_all_products(BASE_URL, FIXTURE_PATH).await {
            warn!("Failed to seed products from fixture: {}", err);
        }
    });

    let listener = TcpListener::bind("0.0.0.0:8888").await?;
    info!("Server is running on {}", BASE_URL);
    axum::serve(listener, app).await?;

    Ok(())
}
