// src/middleware/json.rs

use axum::{
    extract::{FromRequest, Request},
    http::header,
    Json,
};
use serde::de::DeserializeOwned;

use crate::{
    common::{
        error::{ApiError, AppError},
        i18n::I18nStore,
    },
    middleware::i18n::Locale,
};

// `Json<T>` cuja rejeição segue o formato `{ "error", "details" }` com status 400,
// em vez do texto puro (e do 422) do axum.
pub struct Payload<T>(pub T);

impl<S, T> FromRequest<S> for Payload<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let locale = req
            .headers()
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok())
            .map(Locale::from_accept_language)
            .unwrap_or_default();

        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Payload(value)),
            Err(rejection) => Err(AppError::MalformedPayload(rejection.body_text())
                .to_api_error(&locale, I18nStore::global())),
        }
    }
}
