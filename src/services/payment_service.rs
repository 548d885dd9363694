// src/services/payment_service.rs

use chrono::{Datelike, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::{AppError, Entity},
    db::{OrderRepository, PaymentRepository},
    models::{
        order::Order,
        payment::{CardPaymentPayload, MpesaPaymentPayload, Payment, PaymentMethod, PaymentStatus},
    },
};

// Pagamentos simulados: nenhum gateway (Daraja, adquirente de cartão) é chamado.
#[derive(Clone)]
pub struct PaymentService {
    payment_repo: PaymentRepository,
    order_repo: OrderRepository,
}

impl PaymentService {
    pub fn new(payment_repo: PaymentRepository, order_repo: OrderRepository) -> Self {
        Self { payment_repo, order_repo }
    }

    async fn find_order(&self, order_id: &str) -> Result<Order, AppError> {
        self.order_repo
            .find_by_id(order_id)
            .await?
            .ok_or(AppError::NotFound(Entity::Order))
    }

    fn resolve_amount(order: &Order, amount: Option<Decimal>) -> Result<Decimal, AppError> {
        let amount = amount.unwrap_or(order.total);
        if amount <= Decimal::ZERO {
            return Err(AppError::MalformedPayload("amount must be positive".into()));
        }
        Ok(amount)
    }

    /// STK push simulado: o pagamento fica `pending` e nunca é conciliado.
    pub async fn start_mpesa(&self, payload: MpesaPaymentPayload) -> Result<Payment, AppError> {
        let phone = normalize_msisdn(&payload.phone_number).ok_or(AppError::InvalidPhoneNumber)?;
        let order = self.find_order(&payload.order_id).await?;
        let amount = Self::resolve_amount(&order, payload.amount)?;

        let payment = Payment {
            id: Uuid::new_v4().to_string(),
            order_id: order.id,
            method: PaymentMethod::Mpesa,
            amount,
            status: PaymentStatus::Pending,
            message: format!("STK push sent to {phone}. Enter your M-Pesa PIN to complete payment."),
            phone_number: Some(phone),
            card_last4: None,
            created_at: Utc::now(),
        };

        self.payment_repo.save(&payment).await?;
        tracing::info!("📱 [simulado] STK push do pedido {} ({})", payment.order_id, payment.amount);
        Ok(payment)
    }

    /// Cartão simulado: valida o número (Luhn) e guarda só os 4 últimos dígitos.
    pub async fn charge_card(&self, payload: CardPaymentPayload) -> Result<Payment, AppError> {
        let digits = card_digits(&payload.card_number).ok_or(AppError::InvalidCard)?;
        let cvv_ok = payload.cvv.chars().all(|c| c.is_ascii_digit());
        if !luhn_valid(&digits) || !expiry_valid(&payload.expiry) || !cvv_ok {
            return Err(AppError::InvalidCard);
        }

        let order = self.find_order(&payload.order_id).await?;
        let amount = Self::resolve_amount(&order, payload.amount)?;
        let last4 = digits[digits.len() - 4..].to_string();

        let payment = Payment {
            id: Uuid::new_v4().to_string(),
            order_id: order.id,
            method: PaymentMethod::Card,
            amount,
            status: PaymentStatus::Completed,
            message: format!("Card ending in {last4} charged (simulated)."),
            phone_number: None,
            card_last4: Some(last4),
            created_at: Utc::now(),
        };

        self.payment_repo.save(&payment).await?;
        tracing::info!("💳 [simulado] Cartão cobrado no pedido {} ({})", payment.order_id, payment.amount);
        Ok(payment)
    }

    pub async fn get_payment(&self, id: &str) -> Result<Payment, AppError> {
        self.payment_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound(Entity::Payment))
    }
}

/// Normaliza um número queniano para `2547XXXXXXXX` / `2541XXXXXXXX`.
pub fn normalize_msisdn(raw: &str) -> Option<String> {
    let digits: String = raw
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();
    let digits = digits.strip_prefix('+').unwrap_or(&digits);
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let local = if let Some(rest) = digits.strip_prefix("254") {
        rest
    } else if let Some(rest) = digits.strip_prefix('0') {
        rest
    } else {
        digits
    };

    let valid = local.len() == 9 && (local.starts_with('7') || local.starts_with('1'));
    valid.then(|| format!("254{local}"))
}

fn card_digits(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(|c| !c.is_whitespace() && *c != '-').collect();
    let ok = (12..=19).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit());
    ok.then_some(digits)
}

pub fn luhn_valid(digits: &str) -> bool {
    let mut sum = 0;
    for (i, c) in digits.chars().rev().enumerate() {
        let Some(mut d) = c.to_digit(10) else {
            return false;
        };
        if i % 2 == 1 {
            d *= 2;
            if d > 9 {
                d -= 9;
            }
        }
        sum += d;
    }
    !digits.is_empty() && sum % 10 == 0
}

// "MM/YY" ou "MM/YYYY", não vencido
fn expiry_valid(raw: &str) -> bool {
    let Some((month, year)) = raw.trim().split_once('/') else {
        return false;
    };
    let (Ok(month), Ok(year)) = (month.trim().parse::<u32>(), year.trim().parse::<i32>()) else {
        return false;
    };
    if !(1..=12).contains(&month) {
        return false;
    }
    let year = if year < 100 { 2000 + year } else { year };

    let today = Utc::now().date_naive();
    (year, month) >= (today.year(), today.month())
}
