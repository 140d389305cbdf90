use axum::{extract::Request, ServiceExt};
use product_api::{application, infrastructure::logger::Logger, AppState, Config, ProductStore};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    Logger::init(&config.log_level);

    let store = ProductStore::seeded();
    info!("✅ 已初始化 {} 个示例产品", store.len());

    let app = application(AppState::new(store, &config.api_key));

    let listener = TcpListener::bind(config.bind_address()).await?;

    info!("🚀 Server is running on http://{}", listener.local_addr()?);
    info!("📖 API 端点:");
    info!("   GET    /                    - 欢迎信息");
    info!("   GET    /api/products        - 产品列表 (category, search, inStock, page, limit)");
    info!("   GET    /api/products/stats  - 产品统计");
    info!("   GET    /api/products/:id    - 获取特定产品");
    info!("   POST   /api/products        - 创建产品 (需要 x-api-key)");
    info!("   PUT    /api/products/:id    - 更新产品 (需要 x-api-key)");
    info!("   DELETE /api/products/:id    - 删除产品 (需要 x-api-key)");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await?;

    Ok(())
}
