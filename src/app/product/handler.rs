//! 产品处理器

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Json,
};

use super::model::{Product, ProductInput, ProductPage, ProductQuery, ProductStats};
use crate::app::AppState;
use crate::core::{error::ApiError, extract::JsonPayload, response::MutationResponse};

/// 静态路径 `/api/products/stats` 上 PUT/DELETE 使用的产品 ID
pub const STATS_SEGMENT: &str = "stats";

type ProductResponse = Json<MutationResponse<Product>>;

fn product_id(path: Result<Path<String>, PathRejection>) -> Result<String, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|rejection| ApiError::Validation(rejection.body_text()))
}

fn product_input(JsonPayload(payload): JsonPayload) -> Result<ProductInput, ApiError> {
    ProductInput::from_payload(&payload).map_err(ApiError::InvalidProduct)
}

fn update_by_id(
    state: &AppState,
    id: &str,
    body: JsonPayload,
) -> Result<ProductResponse, ApiError> {
    let input = product_input(body)?;
    let product = state.product_service.update(id, input)?;
    Ok(Json(MutationResponse::new("Product updated successfully", product)))
}

fn delete_by_id(state: &AppState, id: &str) -> Result<ProductResponse, ApiError> {
    let product = state.product_service.delete(id)?;
    Ok(Json(MutationResponse::new("Product deleted successfully", product)))
}

pub async fn list_products(
    State(state): State<AppState>,
    query: Result<Query<ProductQuery>, QueryRejection>,
) -> Result<Json<ProductPage>, ApiError> {
    let Query(query) = query.map_err(|rejection| ApiError::Validation(rejection.body_text()))?;
    Ok(Json(state.product_service.list(&query)))
}

pub async fn get_product(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Product>, ApiError> {
    let id = product_id(path)?;
    Ok(Json(state.product_service.get(&id)?))
}

pub async fn create_product(
    State(state): State<AppState>,
    body: JsonPayload,
) -> Result<(StatusCode, ProductResponse), ApiError> {
    let input = product_input(body)?;
    let product = state.product_service.create(input)?;
    Ok((
        StatusCode::CREATED,
        Json(MutationResponse::new("Product created successfully", product)),
    ))
}

pub async fn update_product(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: JsonPayload,
) -> Result<ProductResponse, ApiError> {
    let id = product_id(path)?;
    update_by_id(&state, &id, body)
}

pub async fn delete_product(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<ProductResponse, ApiError> {
    let id = product_id(path)?;
    delete_by_id(&state, &id)
}

/// `/api/products/stats` 只有 GET 是统计接口，PUT 按普通产品 ID 处理
pub async fn update_stats_segment(
    State(state): State<AppState>,
    body: JsonPayload,
) -> Result<ProductResponse, ApiError> {
    update_by_id(&state, STATS_SEGMENT, body)
}

pub async fn delete_stats_segment(
    State(state): State<AppState>,
) -> Result<ProductResponse, ApiError> {
    delete_by_id(&state, STATS_SEGMENT)
}

pub async fn product_stats(State(state): State<AppState>) -> Json<ProductStats> {
    Json(state.product_service.stats())
}
