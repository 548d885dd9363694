// src/handlers/categories.rs

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
    models::category::{Category, CreateCategoryPayload},
};

// GET /api/categories
#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "Categories",
    responses((status = 200, description = "Todas as categorias", body = [Category]))
)]
pub async fn list_categories(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<Json<Vec<Category>>, ApiError> {
    let categories = app_state
        .catalog_service
        .list_categories()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(categories))
}

// GET /api/categories/active
#[utoipa::path(
    get,
    path = "/api/categories/active",
    tag = "Categories",
    responses((status = 200, description = "Categorias visíveis na vitrine", body = [Category]))
)]
pub async fn list_active_categories(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<Json<Vec<Category>>, ApiError> {
    let categories = app_state
        .catalog_service
        .list_active_categories()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(categories))
}

// POST /api/categories
#[utoipa::path(
    post,
    path = "/api/categories",
    tag = "Categories",
    request_body = CreateCategoryPayload,
    responses(
        (status = 201, description = "Categoria criada", body = Category),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_category(
    State(app_state): State<AppState>,
    locale: Locale,
    Payload(payload): Payload<CreateCategoryPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let category = app_state
        .catalog_service
        .create_category(payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(category)))
}

// PUT /api/categories/{id}/toggle
#[utoipa::path(
    put,
    path = "/api/categories/{id}/toggle",
    tag = "Categories",
    params(("id" = String, Path, description = "ID da categoria")),
    responses(
        (status = 200, description = "Categoria com `active` invertido", body = Category),
        (status = 404, description = "Categoria não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn toggle_category(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> Result<Json<Category>, ApiError> {
    let category = app_state
        .catalog_service
        .toggle_category(&id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(category))
}

// DELETE /api/categories/{id}
#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    tag = "Categories",
    params(("id" = String, Path, description = "ID da categoria")),
    responses(
        (status = 200, description = "Categoria removida"),
        (status = 400, description = "Categoria ainda ativa"),
        (status = 404, description = "Categoria não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_category(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    app_state
        .catalog_service
        .delete_category(&id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(json!({ "success": true })))
}
