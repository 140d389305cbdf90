//! 核心中间件模块

use std::{sync::Arc, time::Instant};

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use subtle::ConstantTimeEq;
use tracing::{info, warn};

use super::error::ApiError;

pub const API_KEY_HEADER: &str = "x-api-key";

/// 变更接口的共享密钥
#[derive(Clone)]
pub struct ApiKey(Arc<str>);

impl ApiKey {
    pub fn new(key: impl Into<Arc<str>>) -> Self {
        Self(key.into())
    }

    /// 逐字节比较
    pub fn matches(&self, candidate: &[u8]) -> bool {
        candidate.ct_eq(self.0.as_bytes()).into()
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(..)")
    }
}

/// 请求日志中间件
pub async fn request_logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();

    let response = next.run(req).await;

    info!(
        "{} {} - {} - {}ms",
        method,
        uri,
        response.status().as_u16(),
        start.elapsed().as_millis()
    );

    response
}

/// API Key 认证中间件，失败时请求不会到达校验层与存储层
pub async fn require_api_key(
    State(api_key): State<ApiKey>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let authorized = req
        .headers()
        .get(API_KEY_HEADER)
        .is_some_and(|value| api_key.matches(value.as_bytes()));

    if !authorized {
        warn!("{} {} rejected: missing or invalid API key", req.method(), req.uri());
        return Err(ApiError::Unauthorized);
    }

    Ok(next.run(req).await)
}
