// src/models/payment.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Mpesa,
    Card,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
}

// Registro de pagamento simulado: nenhum gateway real é chamado
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    pub order_id: String,
    pub method: PaymentMethod,
    pub amount: Decimal,
    pub status: PaymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_last4: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MpesaPaymentPayload {
    #[validate(length(min = 1, message = "Order id is required"))]
    pub order_id: String,
    #[schema(example = "0712345678")]
    pub phone_number: String,
    /// Omitido = total do pedido.
    pub amount: Option<Decimal>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CardPaymentPayload {
    #[validate(length(min = 1, message = "Order id is required"))]
    pub order_id: String,
    #[schema(example = "4242 4242 4242 4242")]
    pub card_number: String,
    #[schema(example = "12/28")]
    pub expiry: String,
    #[validate(length(min = 3, max = 4, message = "Invalid CVV"))]
    pub cvv: String,
    #[validate(length(min = 1, message = "Cardholder name is required"))]
    pub cardholder_name: String,
    pub amount: Option<Decimal>,
}
