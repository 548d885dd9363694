// src/handlers/orders.rs

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{i18n::Locale, json::Payload},
    models::order::{CreateOrderPayload, Order, UpdateOrderPayload},
};

// POST /api/orders (público: é o fim do checkout)
#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "Orders",
    request_body = CreateOrderPayload,
    responses(
        (status = 201, description = "Pedido criado com totais recalculados", body = Order),
        (status = 400, description = "Carrinho vazio, local desconhecido ou dados inválidos")
    )
)]
pub async fn create_order(
    State(app_state): State<AppState>,
    locale: Locale,
    Payload(payload): Payload<CreateOrderPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let order = app_state
        .order_service
        .create_order(payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(order)))
}

// GET /api/orders
#[utoipa::path(
    get,
    path = "/api/orders",
    tag = "Orders",
    responses(
        (status = 200, description = "Pedidos, mais recentes primeiro", body = [Order]),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_orders(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<Json<Vec<Order>>, ApiError> {
    let orders = app_state
        .order_service
        .list_orders()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(orders))
}

// GET /api/orders/{id}
#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    tag = "Orders",
    params(("id" = String, Path, description = "ID do pedido")),
    responses(
        (status = 200, description = "Pedido", body = Order),
        (status = 404, description = "Pedido não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_order(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> Result<Json<Order>, ApiError> {
    let order = app_state
        .order_service
        .get_order(&id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(order))
}

// PUT /api/orders/{id}
#[utoipa::path(
    put,
    path = "/api/orders/{id}",
    tag = "Orders",
    params(("id" = String, Path, description = "ID do pedido")),
    request_body = UpdateOrderPayload,
    responses(
        (status = 200, description = "Pedido atualizado", body = Order),
        (status = 404, description = "Pedido não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_order(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
    Payload(payload): Payload<UpdateOrderPayload>,
) -> Result<Json<Order>, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let order = app_state
        .order_service
        .update_order(&id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(order))
}

// GET /api/orders/{id}/receipt
#[utoipa::path(
    get,
    path = "/api/orders/{id}/receipt",
    tag = "Orders",
    params(("id" = String, Path, description = "ID do pedido")),
    responses(
        (status = 200, description = "Recibo em PDF", content_type = "application/pdf"),
        (status = 404, description = "Pedido não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn order_receipt(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let order = app_state
        .order_service
        .get_order(&id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let pdf_bytes = app_state
        .document_service
        .order_receipt_pdf(&order)
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    // Headers para o navegador baixar ou mostrar o PDF
    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"recibo_{}.pdf\"", order.id),
        ),
    ];

    Ok((headers, pdf_bytes).into_response())
}
