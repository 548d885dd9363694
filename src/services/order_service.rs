// src/services/order_service.rs

use chrono::Utc;
use uuid::Uuid;

use crate::{
    common::error::{AppError, Entity},
    db::{DeliveryRepository, OrderRepository},
    models::order::{CreateOrderPayload, Order, OrderStatus, OrderTotals, UpdateOrderPayload},
};

#[derive(Clone)]
pub struct OrderService {
    order_repo: OrderRepository,
    delivery_repo: DeliveryRepository,
}

impl OrderService {
    pub fn new(order_repo: OrderRepository, delivery_repo: DeliveryRepository) -> Self {
        Self { order_repo, delivery_repo }
    }

    /// Totais são recalculados aqui a partir das linhas; os do cliente são ignorados.
    pub async fn create_order(&self, payload: CreateOrderPayload) -> Result<Order, AppError> {
        if payload.cart.is_empty() {
            return Err(AppError::EmptyCart);
        }

        let location = self
            .delivery_repo
            .find_by_id(&payload.delivery_location_id)
            .await?
            .ok_or(AppError::UnknownDeliveryLocation)?;

        let totals = OrderTotals::from_lines(&payload.cart, location.cost);
        let now = Utc::now();

        let order = Order {
            id: Uuid::new_v4().to_string(),
            customer_name: payload.customer_name.trim().to_string(),
            customer_email: payload.customer_email.trim().to_string(),
            customer_phone: payload.customer_phone.trim().to_string(),
            delivery_address: payload.delivery_address,
            delivery_notes: payload.delivery_notes.filter(|n| !n.trim().is_empty()),
            delivery_location: location,
            cart: payload.cart,
            payment_method: payload.payment_method,
            subtotal: totals.subtotal,
            delivery_cost: totals.delivery_cost,
            tax: totals.tax,
            total: totals.total,
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
        };

        self.order_repo.save(&order).await?;
        tracing::info!("🧾 Pedido {} criado: total {}", order.id, order.total);
        Ok(order)
    }

    /// Mais recentes primeiro.
    pub async fn list_orders(&self) -> Result<Vec<Order>, AppError> {
        let mut orders = self.order_repo.list().await?;
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    pub async fn get_order(&self, id: &str) -> Result<Order, AppError> {
        self.order_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound(Entity::Order))
    }

    pub async fn update_order(&self, id: &str, patch: &UpdateOrderPayload) -> Result<Order, AppError> {
        let order = self
            .order_repo
            .merge(id, patch)
            .await?
            .ok_or(AppError::NotFound(Entity::Order))?;

        if let Some(status) = patch.status {
            tracing::info!("🧾 Pedido {} -> {:?}", order.id, status);
        }
        Ok(order)
    }
}
