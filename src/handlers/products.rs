// src/handlers/products.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{i18n::Locale, json::Payload},
    models::product::{CreateProductPayload, Product, UpdateProductPayload},
};

// GET /api/products
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Products",
    responses((status = 200, description = "Todos os produtos, inclusive os ocultos", body = [Product]))
)]
pub async fn list_products(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = app_state
        .catalog_service
        .list_products()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(products))
}

// GET /api/products/{id}
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = String, Path, description = "ID do produto")),
    responses(
        (status = 200, description = "Produto", body = Product),
        (status = 404, description = "Produto não encontrado")
    )
)]
pub async fn get_product(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let product = app_state
        .catalog_service
        .get_product(&id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(product))
}

// POST /api/products
#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Products",
    request_body = CreateProductPayload,
    responses(
        (status = 201, description = "Produto criado", body = Product),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_product(
    State(app_state): State<AppState>,
    locale: Locale,
    Payload(payload): Payload<CreateProductPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let product = app_state
        .catalog_service
        .create_product(payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(product)))
}

// PUT /api/products/{id}
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = String, Path, description = "ID do produto")),
    request_body = UpdateProductPayload,
    responses(
        (status = 200, description = "Produto atualizado", body = Product),
        (status = 404, description = "Produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_product(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
    Payload(payload): Payload<UpdateProductPayload>,
) -> Result<Json<Product>, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let product = app_state
        .catalog_service
        .update_product(&id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(product))
}

// DELETE /api/products/{id}
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = String, Path, description = "ID do produto")),
    responses(
        (status = 200, description = "Produto removido"),
        (status = 404, description = "Produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_product(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    app_state
        .catalog_service
        .delete_product(&id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(json!({ "success": true })))
}
