// src/storefront/catalog.rs

use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::models::{category::Category, product::Product};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    #[default]
    Featured,
    #[serde(alias = "price-low")]
    PriceAsc,
    #[serde(alias = "price-high")]
    PriceDesc,
    #[serde(alias = "name")]
    NameAsc,
    NameDesc,
    Newest,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "featured" => Ok(SortOrder::Featured),
            "price-asc" | "price-low" => Ok(SortOrder::PriceAsc),
            "price-desc" | "price-high" => Ok(SortOrder::PriceDesc),
            "name-asc" | "name" => Ok(SortOrder::NameAsc),
            "name-desc" => Ok(SortOrder::NameDesc),
            "newest" => Ok(SortOrder::Newest),
            other => Err(format!("unknown sort order '{other}'")),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SortOrder::Featured => "featured",
            SortOrder::PriceAsc => "price-asc",
            SortOrder::PriceDesc => "price-desc",
            SortOrder::NameAsc => "name-asc",
            SortOrder::NameDesc => "name-desc",
            SortOrder::Newest => "newest",
        };
        f.write_str(s)
    }
}

// Filtros da vitrine (query string de GET /storefront/products)
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ProductQuery {
    /// Busca sem diferenciar maiúsculas em nome, descrição e categoria.
    pub search: Option<String>,
    /// Subcategoria ou categoria de topo.
    pub category: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    #[serde(default)]
    #[param(value_type = Option<String>, example = "price-asc")]
    pub sort: SortOrder,
}

/// Um produto aparece na vitrine sse alguma categoria ativa o expõe.
pub fn is_visible(product: &Product, categories: &[Category]) -> bool {
    categories
        .iter()
        .filter(|c| c.active)
        .any(|c| c.exposes(&product.category))
}

pub fn visible_products(products: Vec<Product>, categories: &[Category]) -> Vec<Product> {
    products
        .into_iter()
        .filter(|p| is_visible(p, categories))
        .collect()
}

fn matches_search(product: &Product, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    [&product.name, &product.description, &product.category]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

fn matches_category(product: &Product, wanted: &str, categories: &[Category]) -> bool {
    if product.category == wanted {
        return true;
    }
    // "Men" seleciona todas as subcategorias de Men
    categories
        .iter()
        .filter(|c| c.name == wanted)
        .any(|c| c.exposes(&product.category))
}

/// Aplica visibilidade, filtros e ordenação, nessa ordem.
pub fn apply_query(
    products: Vec<Product>,
    categories: &[Category],
    query: &ProductQuery,
) -> Vec<Product> {
    let search = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let category = query
        .category
        .as_deref()
        .filter(|c| !c.is_empty() && *c != "all");

    let mut result: Vec<Product> = visible_products(products, categories)
        .into_iter()
        .filter(|p| search.is_none_or(|needle| matches_search(p, needle)))
        .filter(|p| category.is_none_or(|wanted| matches_category(p, wanted, categories)))
        .filter(|p| query.min_price.is_none_or(|min| p.price >= min))
        .filter(|p| query.max_price.is_none_or(|max| p.price <= max))
        .collect();

    sort_products(&mut result, query.sort);
    result
}

pub fn sort_products(products: &mut [Product], order: SortOrder) {
    match order {
        // partição estável: destaques primeiro, ordem relativa mantida
        SortOrder::Featured => products.sort_by_key(|p| !p.featured),
        SortOrder::PriceAsc => products.sort_by(|a, b| a.price.cmp(&b.price)),
        SortOrder::PriceDesc => products.sort_by(|a, b| b.price.cmp(&a.price)),
        SortOrder::NameAsc => products.sort_by_key(|p| p.name.to_lowercase()),
        SortOrder::NameDesc => products.sort_by(|a, b| b.name.to_lowercase().cmp(&a.name.to_lowercase())),
        SortOrder::Newest => products.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
    }
}
