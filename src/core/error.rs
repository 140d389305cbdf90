//! 核心错误处理模块
//!
//! `ApiError` 是状态码与错误响应体之间唯一的映射表。

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use crate::infrastructure::store::StoreError;

pub const UNAUTHORIZED_MESSAGE: &str = "Valid API key required in x-api-key header";
pub const INTERNAL_MESSAGE: &str = "Something went wrong on the server";

/// 核心错误类型
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    /// 请求体校验失败，携带全部错误
    #[error("validation failed: {}", .0.join("; "))]
    InvalidProduct(Vec<String>),

    #[error("Valid API key required in x-api-key header")]
    Unauthorized,

    #[error("{message}")]
    MalformedBody { status: StatusCode, message: String },

    #[error("The route {0} does not exist")]
    RouteNotFound(String),

    /// 详细信息只写入日志，不返回给客户端
    #[error("internal error: {0}")]
    Internal(String),
}

/// 错误响应结构
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ErrorResponse {
    Message { error: String, message: String },
    Details { error: String, details: Vec<String> },
}

impl ErrorResponse {
    fn message(error: &str, message: impl Into<String>) -> Self {
        Self::Message {
            error: error.to_string(),
            message: message.into(),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) | ApiError::RouteNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) | ApiError::InvalidProduct(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::MalformedBody { status, .. } => *status,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn product_not_found(id: &str) -> Self {
        ApiError::NotFound(format!("Product with ID {id} not found"))
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match self {
            ApiError::NotFound(message) => {
                warn!(%message, "NotFoundError");
                ErrorResponse::message("NotFoundError", message)
            }
            ApiError::Validation(message) => ErrorResponse::message("ValidationError", message),
            ApiError::InvalidProduct(details) => ErrorResponse::Details {
                error: "Validation failed".to_string(),
                details,
            },
            ApiError::Unauthorized => ErrorResponse::message("Unauthorized", UNAUTHORIZED_MESSAGE),
            ApiError::MalformedBody { message, .. } => {
                ErrorResponse::message("Bad Request", message)
            }
            err @ ApiError::RouteNotFound(_) => {
                ErrorResponse::message("Route not found", err.to_string())
            }
            ApiError::Internal(detail) => {
                error!(%detail, "unhandled server error");
                ErrorResponse::message("Internal Server Error", INTERNAL_MESSAGE)
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_table() {
        assert_eq!(ApiError::product_not_found("9").status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::Validation("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::InvalidProduct(vec![]).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::RouteNotFound("/nope".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Internal("boom".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn error_bodies_have_uniform_shape() {
        let body = serde_json::to_value(ErrorResponse::message("NotFoundError", "gone")).unwrap();
        assert_eq!(body, serde_json::json!({"error": "NotFoundError", "message": "gone"}));

        let body = serde_json::to_value(ErrorResponse::Details {
            error: "Validation failed".into(),
            details: vec!["a".into()],
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"error": "Validation failed", "details": ["a"]})
        );
    }

    #[test]
    fn store_errors_become_internal() {
        let err: ApiError = StoreError::DuplicateId("1".into()).into();
        assert!(matches!(err, ApiError::Internal(_)));
    }
}
