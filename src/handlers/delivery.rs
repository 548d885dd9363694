// src/handlers/delivery.rs

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
    models::delivery::{
        CreateDeliveryLocationPayload, DeliveryLocation, UpdateDeliveryLocationPayload,
    },
};

// GET /api/delivery-locations
#[utoipa::path(
    get,
    path = "/api/delivery-locations",
    tag = "Delivery",
    responses((status = 200, description = "Locais de entrega por região", body = [DeliveryLocation]))
)]
pub async fn list_locations(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<Json<Vec<DeliveryLocation>>, ApiError> {
    let locations = app_state
        .delivery_service
        .list()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(locations))
}

// GET /api/delivery-locations/{id}
#[utoipa::path(
    get,
    path = "/api/delivery-locations/{id}",
    tag = "Delivery",
    params(("id" = String, Path, description = "ID do local")),
    responses(
        (status = 200, description = "Local de entrega", body = DeliveryLocation),
        (status = 404, description = "Local não encontrado")
    )
)]
pub async fn get_location(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> Result<Json<DeliveryLocation>, ApiError> {
    let location = app_state
        .delivery_service
        .get(&id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(location))
}

// POST /api/delivery-locations
#[utoipa::path(
    post,
    path = "/api/delivery-locations",
    tag = "Delivery",
    request_body = CreateDeliveryLocationPayload,
    responses(
        (status = 201, description = "Local criado", body = DeliveryLocation),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_location(
    State(app_state): State<AppState>,
    locale: Locale,
    Payload(payload): Payload<CreateDeliveryLocationPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let location = app_state
        .delivery_service
        .create(payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(location)))
}

// PUT /api/delivery-locations/{id}
#[utoipa::path(
    put,
    path = "/api/delivery-locations/{id}",
    tag = "Delivery",
    params(("id" = String, Path, description = "ID do local")),
    request_body = UpdateDeliveryLocationPayload,
    responses(
        (status = 200, description = "Local atualizado", body = DeliveryLocation),
        (status = 404, description = "Local não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_location(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
    Payload(payload): Payload<UpdateDeliveryLocationPayload>,
) -> Result<Json<DeliveryLocation>, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let location = app_state
        .delivery_service
        .update(&id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(location))
}

// DELETE /api/delivery-locations/{id}
#[utoipa::path(
    delete,
    path = "/api/delivery-locations/{id}",
    tag = "Delivery",
    params(("id" = String, Path, description = "ID do local")),
    responses(
        (status = 200, description = "Local removido"),
        (status = 404, description = "Local não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_location(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    app_state
        .delivery_service
        .delete(&id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(json!({ "success": true })))
}
