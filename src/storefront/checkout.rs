// src/storefront/checkout.rs

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    models::{
        delivery::DeliveryLocation,
        order::{CreateOrderPayload, Order, OrderTotals},
        payment::PaymentMethod,
    },
    storefront::cart::Cart,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutStep {
    Delivery,
    Payment,
    Processing,
    Success,
}

impl fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CheckoutStep::Delivery => "delivery",
            CheckoutStep::Payment => "payment",
            CheckoutStep::Processing => "processing",
            CheckoutStep::Success => "success",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("o carrinho está vazio")]
    EmptyCart,

    #[error("campo obrigatório: {0}")]
    MissingField(&'static str),

    #[error("'{action}' não é permitido na etapa '{step}'")]
    InvalidTransition { step: CheckoutStep, action: &'static str },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryDetails {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub notes: Option<String>,
}

impl DeliveryDetails {
    fn check(&self) -> Result<(), CheckoutError> {
        let required = [
            ("fullName", &self.full_name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("address", &self.address),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(CheckoutError::MissingField(field));
            }
        }
        if !self.email.contains('@') {
            return Err(CheckoutError::MissingField("email"));
        }
        Ok(())
    }
}

/// Assistente de checkout: Delivery -> Payment -> Processing -> Success.
#[derive(Debug, Clone)]
pub struct CheckoutWizard {
    step: CheckoutStep,
    cart: Cart,
    delivery: Option<DeliveryDetails>,
    location: Option<DeliveryLocation>,
    payment_method: Option<PaymentMethod>,
    order_id: Option<String>,
}

impl CheckoutWizard {
    /// Um carrinho vazio não entra no checkout.
    pub fn start(cart: Cart) -> Result<Self, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        Ok(Self {
            step: CheckoutStep::Delivery,
            cart,
            delivery: None,
            location: None,
            payment_method: None,
            order_id: None,
        })
    }

    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    pub fn order_id(&self) -> Option<&str> {
        self.order_id.as_deref()
    }

    fn expect_step(&self, expected: CheckoutStep, action: &'static str) -> Result<(), CheckoutError> {
        if self.step != expected {
            return Err(CheckoutError::InvalidTransition { step: self.step, action });
        }
        Ok(())
    }

    /// Frete da zona escolhida (zero enquanto nenhuma foi escolhida).
    pub fn totals(&self) -> OrderTotals {
        let delivery_cost = self.location.as_ref().map_or(Decimal::ZERO, |l| l.cost);
        OrderTotals::compute(self.cart.subtotal(), delivery_cost)
    }

    pub fn submit_delivery(
        &mut self,
        details: DeliveryDetails,
        location: DeliveryLocation,
    ) -> Result<(), CheckoutError> {
        self.expect_step(CheckoutStep::Delivery, "submit_delivery")?;
        details.check()?;
        self.delivery = Some(details);
        self.location = Some(location);
        self.step = CheckoutStep::Payment;
        Ok(())
    }

    pub fn back(&mut self) -> Result<(), CheckoutError> {
        self.expect_step(CheckoutStep::Payment, "back")?;
        self.step = CheckoutStep::Delivery;
        Ok(())
    }

    /// Escolhe o meio de pagamento e devolve o payload do pedido a enviar.
    pub fn choose_payment(&mut self, method: PaymentMethod) -> Result<CreateOrderPayload, CheckoutError> {
        self.expect_step(CheckoutStep::Payment, "choose_payment")?;
        let (Some(delivery), Some(location)) = (&self.delivery, &self.location) else {
            return Err(CheckoutError::MissingField("delivery"));
        };

        let payload = CreateOrderPayload {
            customer_name: delivery.full_name.clone(),
            customer_email: delivery.email.clone(),
            customer_phone: delivery.phone.clone(),
            delivery_address: delivery.address.clone(),
            delivery_notes: delivery.notes.clone(),
            delivery_location_id: location.id.clone(),
            cart: self.cart.to_order_lines(),
            payment_method: method,
        };

        self.payment_method = Some(method);
        self.step = CheckoutStep::Processing;
        Ok(payload)
    }

    /// Pagamento recusado: volta para a escolha do meio de pagamento.
    pub fn payment_failed(&mut self) -> Result<(), CheckoutError> {
        self.expect_step(CheckoutStep::Processing, "payment_failed")?;
        self.payment_method = None;
        self.step = CheckoutStep::Payment;
        Ok(())
    }

    /// Pedido gravado e pagamento registrado. O carrinho é esvaziado.
    pub fn complete(&mut self, order: &Order) -> Result<Cart, CheckoutError> {
        self.expect_step(CheckoutStep::Processing, "complete")?;
        self.order_id = Some(order.id.clone());
        self.step = CheckoutStep::Success;
        Ok(std::mem::take(&mut self.cart))
    }
}
