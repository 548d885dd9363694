// src/handlers/payments.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{i18n::Locale, json::Payload},
    models::payment::{CardPaymentPayload, MpesaPaymentPayload, Payment},
};

// POST /api/payment/mpesa
#[utoipa::path(
    post,
    path = "/api/payment/mpesa",
    tag = "Payments",
    request_body = MpesaPaymentPayload,
    responses(
        (status = 201, description = "STK push simulado; pagamento pendente", body = Payment),
        (status = 400, description = "Telefone inválido"),
        (status = 404, description = "Pedido não encontrado")
    )
)]
pub async fn mpesa_payment(
    State(app_state): State<AppState>,
    locale: Locale,
    Payload(payload): Payload<MpesaPaymentPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let payment = app_state
        .payment_service
        .start_mpesa(payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(payment)))
}

// POST /api/payment/card
#[utoipa::path(
    post,
    path = "/api/payment/card",
    tag = "Payments",
    request_body = CardPaymentPayload,
    responses(
        (status = 201, description = "Cobrança simulada concluída", body = Payment),
        (status = 400, description = "Cartão inválido"),
        (status = 404, description = "Pedido não encontrado")
    )
)]
pub async fn card_payment(
    State(app_state): State<AppState>,
    locale: Locale,
    Payload(payload): Payload<CardPaymentPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let payment = app_state
        .payment_service
        .charge_card(payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(payment)))
}

// GET /api/payment/{id}
#[utoipa::path(
    get,
    path = "/api/payment/{id}",
    tag = "Payments",
    params(("id" = String, Path, description = "ID do pagamento")),
    responses(
        (status = 200, description = "Pagamento", body = Payment),
        (status = 404, description = "Pagamento não encontrado")
    )
)]
pub async fn get_payment(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> Result<Json<Payment>, ApiError> {
    let payment = app_state
        .payment_service
        .get_payment(&id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(payment))
}
