// src/handlers/auth.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale, json::Payload},
    models::auth::{AdminUser, AuthResponse, LoginPayload, SignupPayload, SignupResponse},
};

// POST /api/admin/signup
#[utoipa::path(
    post,
    path = "/api/admin/signup",
    tag = "Auth",
    request_body = SignupPayload,
    responses(
        (status = 201, description = "Administrador criado", body = SignupResponse),
        (status = 400, description = "Dados inválidos ou e-mail já cadastrado")
    )
)]
pub async fn signup(
    State(app_state): State<AppState>,
    locale: Locale,
    Payload(payload): Payload<SignupPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let user = app_state
        .auth_service
        .signup_admin(&payload.email, &payload.password, &payload.name)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(SignupResponse { user })))
}

// POST /api/admin/login
#[utoipa::path(
    post,
    path = "/api/admin/login",
    tag = "Auth",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Token emitido", body = AuthResponse),
        (status = 401, description = "Credenciais inválidas")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    locale: Locale,
    Payload(payload): Payload<LoginPayload>,
) -> Result<Json<AuthResponse>, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let token = app_state
        .auth_service
        .login_admin(&payload.email, &payload.password)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(AuthResponse { token }))
}

// GET /api/admin/me
#[utoipa::path(
    get,
    path = "/api/admin/me",
    tag = "Auth",
    responses(
        (status = 200, description = "Administrador autenticado", body = AdminUser),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_me(AuthenticatedUser(user): AuthenticatedUser) -> Json<AdminUser> {
    Json(user)
}
