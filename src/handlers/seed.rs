// src/handlers/seed.rs

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::i18n::Locale,
    models::{category::Category, product::Product},
    services::seed_service::SeedReport,
};

// POST /api/init-sample-data
#[utoipa::path(
    post,
    path = "/api/init-sample-data",
    tag = "Seed",
    responses((status = 200, description = "Catálogo e locais de exemplo gravados", body = SeedReport)),
    security(("api_jwt" = []))
)]
pub async fn init_sample_data(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<Json<SeedReport>, ApiError> {
    let report = app_state
        .seed_service
        .init_sample_data()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(report))
}

// POST /api/init-categories
#[utoipa::path(
    post,
    path = "/api/init-categories",
    tag = "Seed",
    responses((status = 200, description = "Categorias padrão gravadas", body = [Category])),
    security(("api_jwt" = []))
)]
pub async fn init_categories(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<Json<Vec<Category>>, ApiError> {
    let categories = app_state
        .seed_service
        .init_categories()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(categories))
}

// POST /api/categories/{id}/add-products
#[utoipa::path(
    post,
    path = "/api/categories/{id}/add-products",
    tag = "Seed",
    params(("id" = String, Path, description = "Nome da categoria")),
    responses(
        (status = 200, description = "Produtos gerados", body = [Product]),
        (status = 404, description = "Categoria não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn add_products_to_category(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(name): Path<String>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let category = app_state
        .catalog_service
        .find_category_by_name(&name)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let products = app_state
        .seed_service
        .add_products_to_category(&category)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(products))
}
