//! 核心响应处理模块

use serde::Serialize;

/// 变更接口的响应结构
#[derive(Debug, Serialize)]
pub struct MutationResponse<T> {
    pub message: String,
    pub product: T,
}

impl<T> MutationResponse<T> {
    pub fn new(message: &str, product: T) -> Self {
        Self {
            message: message.to_string(),
            product,
        }
    }
}
