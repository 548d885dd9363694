// src/services/delivery_service.rs

use chrono::Utc;
use uuid::Uuid;

use crate::{
    common::error::{AppError, Entity},
    db::DeliveryRepository,
    models::delivery::{
        CreateDeliveryLocationPayload, DeliveryLocation, UpdateDeliveryLocationPayload,
    },
};

#[derive(Clone)]
pub struct DeliveryService {
    repo: DeliveryRepository,
}

impl DeliveryService {
    pub fn new(repo: DeliveryRepository) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Result<Vec<DeliveryLocation>, AppError> {
        let mut locations = self.repo.list().await?;
        locations.sort_by(|a, b| a.region.cmp(&b.region).then_with(|| a.name.cmp(&b.name)));
        Ok(locations)
    }

    pub async fn get(&self, id: &str) -> Result<DeliveryLocation, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound(Entity::DeliveryLocation))
    }

    pub async fn create(&self, payload: CreateDeliveryLocationPayload) -> Result<DeliveryLocation, AppError> {
        let location = payload.into_location(Uuid::new_v4().to_string(), Utc::now());
        self.repo.save(&location).await?;
        tracing::info!("🚚 Local de entrega criado: {} / {}", location.region, location.name);
        Ok(location)
    }

    pub async fn update(
        &self,
        id: &str,
        patch: &UpdateDeliveryLocationPayload,
    ) -> Result<DeliveryLocation, AppError> {
        self.repo
            .merge(id, patch)
            .await?
            .ok_or(AppError::NotFound(Entity::DeliveryLocation))
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        if !self.repo.delete(id).await? {
            return Err(AppError::NotFound(Entity::DeliveryLocation));
        }
        tracing::info!("🗑️ Local de entrega removido: {}", id);
        Ok(())
    }
}
