// src/models/delivery.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::validate_not_negative;

// Zona de entrega com custo fixo (0 = grátis)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryLocation {
    pub id: String,
    #[schema(example = "Westlands")]
    pub name: String,
    #[schema(example = "Nairobi")]
    pub region: String,
    #[schema(example = 250)]
    pub cost: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DeliveryLocation {
    pub fn is_free(&self) -> bool {
        self.cost.is_zero()
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDeliveryLocationPayload {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Region is required"))]
    pub region: String,
    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub cost: Decimal,
}

impl CreateDeliveryLocationPayload {
    pub fn into_location(self, id: String, now: DateTime<Utc>) -> DeliveryLocation {
        DeliveryLocation {
            id,
            name: self.name,
            region: self.region,
            cost: self.cost,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDeliveryLocationPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Region is required"))]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_not_negative"))]
    pub cost: Option<Decimal>,
}
