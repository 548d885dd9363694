// src/models/order.rs

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{
    delivery::DeliveryLocation, payment::PaymentMethod, product::SizeLabel,
    validate_not_negative,
};

/// Imposto fixo: 8% do subtotal.
pub const TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    pub subtotal: Decimal,
    pub delivery_cost: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl OrderTotals {
    pub fn compute(subtotal: Decimal, delivery_cost: Decimal) -> Self {
        let tax = (subtotal * TAX_RATE)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        Self {
            subtotal,
            delivery_cost,
            tax,
            total: subtotal + delivery_cost + tax,
        }
    }

    pub fn from_lines<'a>(
        lines: impl IntoIterator<Item = &'a OrderLine>,
        delivery_cost: Decimal,
    ) -> Self {
        let subtotal = lines.into_iter().map(OrderLine::line_total).sum();
        Self::compute(subtotal, delivery_cost)
    }
}

// Fotografia do produto no momento da compra
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    #[validate(length(min = 1, message = "Product id is required"))]
    pub product_id: String,
    pub name: String,
    #[validate(custom(function = "validate_not_negative"))]
    pub price: Decimal,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<SizeLabel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl OrderLine {
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub delivery_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_notes: Option<String>,
    /// Cópia do local escolhido; não acompanha edições posteriores.
    pub delivery_location: DeliveryLocation,
    pub cart: Vec<OrderLine>,
    pub payment_method: PaymentMethod,
    pub subtotal: Decimal,
    pub delivery_cost: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    #[serde(default)]
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    pub fn totals(&self) -> OrderTotals {
        OrderTotals {
            subtotal: self.subtotal,
            delivery_cost: self.delivery_cost,
            tax: self.tax,
            total: self.total,
        }
    }
}

// POST /orders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderPayload {
    #[validate(length(min = 1, message = "Name is required"))]
    pub customer_name: String,
    #[validate(email(message = "A valid e-mail is required"))]
    pub customer_email: String,
    #[validate(length(min = 9, message = "A valid phone number is required"))]
    pub customer_phone: String,
    #[validate(length(min = 1, message = "Delivery address is required"))]
    pub delivery_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_notes: Option<String>,
    #[validate(length(min = 1, message = "Delivery location is required"))]
    pub delivery_location_id: String,
    #[validate(nested)]
    pub cart: Vec<OrderLine>,
    pub payment_method: PaymentMethod,
}

// PUT /orders/{id}
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Name is required"))]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "A valid e-mail is required"))]
    pub customer_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(price: i64, quantity: u32) -> OrderLine {
        OrderLine {
            product_id: "p1".into(),
            name: "Tee".into(),
            price: Decimal::from(price),
            quantity,
            size: None,
            color: None,
        }
    }

    #[test]
    fn totals_for_free_delivery() {
        let totals = OrderTotals::from_lines(&[line(1000, 2)], Decimal::ZERO);
        assert_eq!(totals.subtotal, Decimal::from(2000));
        assert_eq!(totals.tax, Decimal::from(160));
        assert_eq!(totals.total, Decimal::from(2160));
    }

    #[test]
    fn total_adds_delivery_and_tax() {
        let totals = OrderTotals::from_lines(&[line(1250, 1), line(99, 3)], Decimal::from(300));
        assert_eq!(totals.subtotal, Decimal::from(1547));
        assert_eq!(totals.tax, Decimal::new(12376, 2));
        assert_eq!(totals.total, totals.subtotal + totals.delivery_cost + totals.tax);
        assert_eq!(totals.total, Decimal::new(197076, 2));
    }

    #[test]
    fn status_uses_lowercase_wire_names() {
        let status: OrderStatus = serde_json::from_str("\"shipped\"").unwrap();
        assert_eq!(status, OrderStatus::Shipped);
        assert_eq!(serde_json::to_string(&OrderStatus::Cancelled).unwrap(), "\"cancelled\"");
        assert!(serde_json::from_str::<OrderStatus>("\"lost\"").is_err());
    }
}
