// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::{common::i18n::I18nStore, middleware::i18n::Locale};

// Entidades que podem aparecer num 404
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Product,
    Category,
    DeliveryLocation,
    Order,
    Payment,
    StoredObject,
}

impl Entity {
    fn message_key(self) -> &'static str {
        match self {
            Entity::Product => "error.not_found.product",
            Entity::Category => "error.not_found.category",
            Entity::DeliveryLocation => "error.not_found.delivery_location",
            Entity::Order => "error.not_found.order",
            Entity::Payment => "error.not_found.payment",
            Entity::StoredObject => "error.not_found.object",
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Payload malformado: {0}")]
    MalformedPayload(String),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("{0:?} não encontrado")]
    NotFound(Entity),

    #[error("Categoria ativa não pode ser removida")]
    CategoryActive,

    #[error("Carrinho vazio")]
    EmptyCart,

    #[error("Local de entrega desconhecido")]
    UnknownDeliveryLocation,

    #[error("Telefone inválido para M-Pesa")]
    InvalidPhoneNumber,

    #[error("Cartão inválido")]
    InvalidCard,

    #[error("Tipo de arquivo não suportado")]
    UnsupportedMediaType,

    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro de serialização: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Erro de armazenamento: {0}")]
    StorageError(#[from] std::io::Error),

    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::MalformedPayload(_)
            | AppError::EmailAlreadyExists
            | AppError::CategoryActive
            | AppError::EmptyCart
            | AppError::UnknownDeliveryLocation
            | AppError::InvalidPhoneNumber
            | AppError::InvalidCard
            | AppError::UnsupportedMediaType => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Chave da mensagem no `I18nStore`.
    pub fn message_key(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "error.validation",
            AppError::MalformedPayload(_) => "error.malformed_payload",
            AppError::EmailAlreadyExists => "error.email_exists",
            AppError::InvalidCredentials => "error.invalid_credentials",
            AppError::InvalidToken => "error.invalid_token",
            AppError::NotFound(entity) => entity.message_key(),
            AppError::CategoryActive => "error.category_active",
            AppError::EmptyCart => "error.empty_cart",
            AppError::UnknownDeliveryLocation => "error.unknown_delivery_location",
            AppError::InvalidPhoneNumber => "error.invalid_phone",
            AppError::InvalidCard => "error.invalid_card",
            AppError::UnsupportedMediaType => "error.unsupported_media_type",
            _ => "error.internal",
        }
    }

    fn details(&self) -> Option<Value> {
        match self {
            AppError::ValidationError(errors) => {
                let mut details = serde_json::Map::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<Value> = field_errors
                        .iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string())
                        })
                        .map(Value::String)
                        .collect();
                    details.insert(field.to_string(), Value::Array(messages));
                }
                Some(Value::Object(details))
            }
            AppError::MalformedPayload(reason) => Some(json!({ "reason": reason })),
            _ => None,
        }
    }

    /// Converte para a resposta HTTP traduzida no idioma do cliente.
    pub fn to_api_error(&self, locale: &Locale, i18n: &I18nStore) -> ApiError {
        let status = self.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Erro Interno do Servidor: {}", self);
        }

        ApiError {
            status,
            error: i18n.translate(&locale.0, self.message_key()),
            details: self.details(),
        }
    }
}

// Usado onde não há `Locale` à mão (ex: rejeições de extratores): mensagem em inglês.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_api_error(&Locale::default(), I18nStore::global())
            .into_response()
    }
}

// O erro que efetivamente vai para o cliente: `{ "error": ..., "details"?: ... }`
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status;
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classes_cover_the_four_http_codes() {
        assert_eq!(AppError::CategoryActive.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::InvalidToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::NotFound(Entity::Product).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::InternalServerError(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn api_error_is_localised() {
        let i18n = I18nStore::global();
        let err = AppError::NotFound(Entity::Order);

        let en = err.to_api_error(&Locale("en".into()), i18n);
        let pt = err.to_api_error(&Locale("pt".into()), i18n);

        assert_eq!(en.error, "Order not found");
        assert_eq!(pt.error, "Pedido não encontrado");
        assert!(en.details.is_none());
    }

    #[test]
    fn validation_details_list_every_field() {
        let mut errors = validator::ValidationErrors::new();
        let mut err = validator::ValidationError::new("length");
        err.message = Some("Name is required".into());
        errors.add("name", err);

        let api = AppError::ValidationError(errors)
            .to_api_error(&Locale::default(), I18nStore::global());

        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        assert_eq!(api.details.unwrap()["name"][0], "Name is required");
    }
}
