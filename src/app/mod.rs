//! 应用层：路由装配

pub mod product;

use std::any::Any;

use axum::{
    http::Uri,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use tower::Layer;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{self, CorsLayer},
    normalize_path::{NormalizePath, NormalizePathLayer},
    trace::TraceLayer,
};

use crate::core::{
    error::ApiError,
    middleware::{request_logging_middleware, require_api_key, ApiKey},
};
use crate::infrastructure::store::ProductStore;
use product::{handler, service::ProductService};

pub const WELCOME_MESSAGE: &str =
    "Welcome to the Product API! Go to /api/products to see all products.";

#[derive(Clone)]
pub struct AppState {
    pub product_service: ProductService,
    pub api_key: ApiKey,
}

impl AppState {
    pub fn new(store: ProductStore, api_key: &str) -> Self {
        Self {
            product_service: ProductService::new(store),
            api_key: ApiKey::new(api_key),
        }
    }
}

/// 对外服务：路由之前先去掉路径末尾的 `/`
pub type Application = NormalizePath<Router>;

pub fn application(state: AppState) -> Application {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}

/// 构建完整路由
///
/// `/api/products/stats` 是静态路径，匹配优先于 `/api/products/:id`；
/// 其上的 PUT/DELETE 与 `:id` 路由一样需要认证。
/// 变更接口挂载 API Key 中间件，认证失败时不会解析请求体。
pub fn router(state: AppState) -> Router {
    let auth = middleware::from_fn_with_state(state.api_key.clone(), require_api_key);

    Router::new()
        .route("/", get(welcome).fallback(route_not_found))
        .route(
            "/api/products",
            get(handler::list_products)
                .merge(post(handler::create_product).route_layer(auth.clone()))
                .fallback(route_not_found),
        )
        .route(
            "/api/products/stats",
            get(handler::product_stats)
                .merge(
                    put(handler::update_stats_segment)
                        .delete(handler::delete_stats_segment)
                        .route_layer(auth.clone()),
                )
                .fallback(route_not_found),
        )
        .route(
            "/api/products/:id",
            get(handler::get_product)
                .merge(
                    put(handler::update_product)
                        .delete(handler::delete_product)
                        .route_layer(auth),
                )
                .fallback(route_not_found),
        )
        .fallback(route_not_found)
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(cors::Any)
                .allow_methods(cors::Any)
                .allow_headers(cors::Any),
        )
        .layer(CatchPanicLayer::custom(panic_response))
        .with_state(state)
}

async fn welcome() -> &'static str {
    WELCOME_MESSAGE
}

async fn route_not_found(uri: Uri) -> ApiError {
    ApiError::RouteNotFound(uri.to_string())
}

/// 处理器 panic 时返回通用 500，panic 信息只写入日志
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = err.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = err.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    ApiError::Internal(format!("handler panicked: {detail}")).into_response()
}
