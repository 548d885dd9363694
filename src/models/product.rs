// src/models/product.rs

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::validate_not_negative;

// Tamanho de um produto: numérico (calçados) ou texto ("M", "XL")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum SizeLabel {
    Numeric(f64),
    Text(String),
}

impl fmt::Display for SizeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizeLabel::Numeric(n) => write!(f, "{n}"),
            SizeLabel::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for SizeLabel {
    fn from(value: &str) -> Self {
        SizeLabel::Text(value.to_string())
    }
}

impl From<f64> for SizeLabel {
    fn from(value: f64) -> Self {
        SizeLabel::Numeric(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[schema(example = "3f1c2a9e-6a55-4c3e-9a57-0c3b1b7b9e21")]
    pub id: String,
    #[schema(example = "Classic Denim Jacket")]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[schema(example = 3500)]
    pub price: Decimal,
    /// Subcategoria (ou nome de categoria sem subcategorias).
    #[schema(example = "Jackets")]
    pub category: String,
    #[serde(default)]
    pub sizes: Vec<SizeLabel>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductPayload {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(custom(function = "validate_not_negative"))]
    pub price: Decimal,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,
    #[serde(default)]
    pub sizes: Vec<SizeLabel>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub featured: bool,
}

impl CreateProductPayload {
    pub fn into_product(self, id: String, now: DateTime<Utc>) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
            sizes: self.sizes,
            colors: self.colors,
            image_url: self.image_url,
            stock: self.stock,
            featured: self.featured,
            created_at: now,
            updated_at: now,
        }
    }
}

// PUT /products/{id}: só os campos enviados sobrescrevem o registro
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_not_negative"))]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Vec<SizeLabel>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_accept_numbers_and_labels() {
        let sizes: Vec<SizeLabel> = serde_json::from_str(r#"[40, 42.5, "M", "XL"]"#).unwrap();
        assert_eq!(
            sizes,
            vec![
                SizeLabel::Numeric(40.0),
                SizeLabel::Numeric(42.5),
                SizeLabel::Text("M".into()),
                SizeLabel::Text("XL".into()),
            ]
        );
        assert_eq!(sizes[0].to_string(), "40");
    }

    #[test]
    fn update_payload_only_serialises_sent_fields() {
        let patch = UpdateProductPayload {
            price: Some(Decimal::from(1200)),
            featured: Some(true),
            ..Default::default()
        };
        let value = serde_json::to_value(&patch).unwrap();
        let mut keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, vec!["featured".to_string(), "price".to_string()]);
    }
}
