//! 自定义提取器

use axum::{
    async_trait,
    body::{Body, Bytes},
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde_json::Value;

use super::error::ApiError;

/// 任意 JSON 请求体
///
/// 空请求体或非 JSON 的 content-type 视为 `null`，交由校验层报告缺失字段；
/// 语法错误的 JSON 返回 `MalformedBody`。
#[derive(Debug)]
pub struct JsonPayload(pub Value);

fn malformed(status: axum::http::StatusCode, message: String) -> ApiError {
    ApiError::MalformedBody { status, message }
}

#[async_trait]
impl<S> FromRequest<S> for JsonPayload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (parts, body) = req.into_parts();

        let bytes = Bytes::from_request(Request::from_parts(parts.clone(), body), state)
            .await
            .map_err(|rejection| malformed(rejection.status(), rejection.body_text()))?;
        if bytes.is_empty() {
            return Ok(Self(Value::Null));
        }

        match Json::<Value>::from_request(Request::from_parts(parts, Body::from(bytes)), state).await
        {
            Ok(Json(payload)) => Ok(Self(payload)),
            Err(JsonRejection::MissingJsonContentType(_)) => Ok(Self(Value::Null)),
            Err(rejection) => Err(malformed(rejection.status(), rejection.body_text())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn request(content_type: Option<&str>, body: &'static str) -> Request {
        let mut builder = Request::builder().method("POST").uri("/");
        if let Some(content_type) = content_type {
            builder = builder.header("content-type", content_type);
        }
        builder.body(Body::from(body)).unwrap()
    }

    #[tokio::test]
    async fn empty_json_body_is_null() {
        let JsonPayload(payload) = JsonPayload::from_request(request(Some("application/json"), ""), &())
            .await
            .unwrap();
        assert!(payload.is_null());
    }

    #[tokio::test]
    async fn missing_content_type_is_null() {
        let JsonPayload(payload) = JsonPayload::from_request(request(None, r#"{"name":"x"}"#), &())
            .await
            .unwrap();
        assert!(payload.is_null());
    }

    #[tokio::test]
    async fn json_body_is_parsed() {
        let JsonPayload(payload) =
            JsonPayload::from_request(request(Some("application/json"), r#"{"price":3}"#), &())
                .await
                .unwrap();
        assert_eq!(payload["price"], 3);
    }

    #[tokio::test]
    async fn syntax_error_is_malformed() {
        let err = JsonPayload::from_request(request(Some("application/json"), "{\"name\":"), &())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::MalformedBody { status, .. } if status == StatusCode::BAD_REQUEST
        ));
    }
}
