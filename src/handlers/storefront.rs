// src/handlers/storefront.rs

use axum::{extract::State, Json};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{i18n::Locale, query::QueryParams},
    models::product::Product,
    storefront::catalog::ProductQuery,
};

// GET /api/storefront/products
#[utoipa::path(
    get,
    path = "/api/storefront/products",
    tag = "Storefront",
    params(ProductQuery),
    responses((status = 200, description = "Produtos visíveis, filtrados e ordenados", body = [Product]))
)]
pub async fn list_storefront_products(
    State(app_state): State<AppState>,
    locale: Locale,
    QueryParams(query): QueryParams<ProductQuery>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = app_state
        .catalog_service
        .storefront_products(&query)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(products))
}
