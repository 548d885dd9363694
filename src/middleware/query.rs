// src/middleware/query.rs

use axum::{
    extract::{FromRequestParts, Query},
    http::{header, request::Parts},
};
use serde::de::DeserializeOwned;

use crate::{
    common::{
        error::{ApiError, AppError},
        i18n::I18nStore,
    },
    middleware::i18n::Locale,
};

// Mesmo tratamento de `Payload<T>`, para a query string.
pub struct QueryParams<T>(pub T);

impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(QueryParams(value)),
            Err(rejection) => {
                let locale = parts
                    .headers
                    .get(header::ACCEPT_LANGUAGE)
                    .and_then(|value| value.to_str().ok())
                    .map(Locale::from_accept_language)
                    .unwrap_or_default();

                Err(AppError::MalformedPayload(rejection.body_text())
                    .to_api_error(&locale, I18nStore::global()))
            }
        }
    }
}
