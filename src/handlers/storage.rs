// src/handlers/storage.rs

use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{i18n::Locale, query::QueryParams},
    services::storage_service::UploadedObject,
};

// Só para a documentação do corpo multipart
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UploadImageForm {
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SignedUrlQuery {
    /// Token emitido junto com a URL assinada.
    pub token: String,
}

// POST /api/upload-image
#[utoipa::path(
    post,
    path = "/api/upload-image",
    tag = "Storage",
    request_body(content = UploadImageForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Imagem gravada; URL assinada válida por um ano", body = UploadedObject),
        (status = 400, description = "Arquivo ausente ou não é imagem")
    ),
    security(("api_jwt" = []))
)]
pub async fn upload_image(
    State(app_state): State<AppState>,
    locale: Locale,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let to_api = |e: AppError| e.to_api_error(&locale, &app_state.i18n_store);

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| to_api(AppError::MalformedPayload(e.body_text())))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().map(str::to_owned);
        let content_type = field.content_type().map(str::to_owned);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| to_api(AppError::MalformedPayload(e.body_text())))?;

        let uploaded = app_state
            .storage_service
            .upload_image(file_name.as_deref(), content_type.as_deref(), &bytes)
            .await
            .map_err(to_api)?;

        return Ok((StatusCode::CREATED, Json(uploaded)));
    }

    Err(to_api(AppError::MalformedPayload("missing 'file' field".into())))
}

// GET /api/storage/{bucket}/{object}?token=...
#[utoipa::path(
    get,
    path = "/api/storage/{bucket}/{object}",
    tag = "Storage",
    params(
        ("bucket" = String, Path, description = "Bucket"),
        ("object" = String, Path, description = "Nome do objeto"),
        SignedUrlQuery
    ),
    responses(
        (status = 200, description = "Conteúdo do arquivo"),
        (status = 401, description = "Assinatura inválida ou expirada"),
        (status = 404, description = "Arquivo não encontrado")
    )
)]
pub async fn get_object(
    State(app_state): State<AppState>,
    locale: Locale,
    Path((bucket, object)): Path<(String, String)>,
    QueryParams(query): QueryParams<SignedUrlQuery>,
) -> Result<Response, ApiError> {
    let (bytes, content_type) = app_state
        .storage_service
        .read_signed(&bucket, &object, &query.token)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let headers = [
        (header::CONTENT_TYPE, content_type),
        (header::CACHE_CONTROL, "private, max-age=86400"),
    ];
    Ok((headers, bytes).into_response())
}
