// src/db/repository.rs

use std::{marker::PhantomData, sync::Arc};

use chrono::Utc;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::{
    common::error::AppError,
    db::KvStore,
    models::{
        category::Category, delivery::DeliveryLocation, order::Order, payment::Payment,
        product::Product,
    },
};

/// Um tipo persistido no store sob `PREFIX<id>`.
pub trait Record: Serialize + DeserializeOwned + Send + Sync {
    const PREFIX: &'static str;

    fn id(&self) -> &str;
}

impl Record for Product {
    const PREFIX: &'static str = "product:";
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Category {
    const PREFIX: &'static str = "category:";
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for DeliveryLocation {
    const PREFIX: &'static str = "delivery:";
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Order {
    const PREFIX: &'static str = "order:";
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Payment {
    const PREFIX: &'static str = "payment:";
    fn id(&self) -> &str {
        &self.id
    }
}

// Repositório tipado sobre o KvStore
pub struct KvRepository<T> {
    store: Arc<dyn KvStore>,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for KvRepository<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _record: PhantomData,
        }
    }
}

impl<T: Record> KvRepository<T> {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self {
            store,
            _record: PhantomData,
        }
    }

    fn key(id: &str) -> String {
        format!("{}{}", T::PREFIX, id)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<T>, AppError> {
        match self.store.get(&Self::key(id)).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Todos os registros do prefixo. Registros que não decodificam mais são pulados.
    pub async fn list(&self) -> Result<Vec<T>, AppError> {
        let values = self.store.get_by_prefix(T::PREFIX).await?;
        let records = values
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<T>(value) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!("Registro ignorado em '{}': {}", T::PREFIX, e);
                    None
                }
            })
            .collect();
        Ok(records)
    }

    pub async fn save(&self, record: &T) -> Result<(), AppError> {
        let value = serde_json::to_value(record)?;
        self.store.set(&Self::key(record.id()), value).await
    }

    /// Mescla os campos de `patch` sobre o registro guardado.
    /// O `id` é preservado e `updatedAt` (se o tipo o tiver) é renovado.
    pub async fn merge<P: Serialize>(&self, id: &str, patch: &P) -> Result<Option<T>, AppError> {
        let key = Self::key(id);
        let Some(mut current) = self.store.get(&key).await? else {
            return Ok(None);
        };

        let patch = serde_json::to_value(patch)?;
        merge_fields(&mut current, patch);

        if let Value::Object(fields) = &mut current {
            fields.insert("id".into(), Value::String(id.to_string()));
            if fields.contains_key("updatedAt") {
                fields.insert("updatedAt".into(), serde_json::to_value(Utc::now())?);
            }
        }

        // Decodifica antes de gravar: um patch inválido não chega ao store.
        let merged: T = serde_json::from_value(current)?;
        self.save(&merged).await?;
        Ok(Some(merged))
    }

    pub async fn delete(&self, id: &str) -> Result<bool, AppError> {
        self.store.del(&Self::key(id)).await
    }
}

// Merge raso: cada chave de `patch` sobrescreve a de `base`.
pub fn merge_fields(base: &mut Value, patch: Value) {
    match (base, patch) {
        (Value::Object(base), Value::Object(patch)) => {
            for (key, value) in patch {
                base.insert(key, value);
            }
        }
        (base, patch @ Value::Object(_)) => *base = patch,
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db::MemoryKvStore, models::product::UpdateProductPayload};
    use rust_decimal::Decimal;

    fn product(id: &str) -> Product {
        let now = Utc::now();
        Product {
            id: id.into(),
            name: "Linen Shirt".into(),
            description: "Breathable".into(),
            price: Decimal::from(2500),
            category: "Shirts".into(),
            sizes: vec!["M".into()],
            colors: vec!["White".into()],
            image_url: String::new(),
            stock: 4,
            featured: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn merge_overwrites_sent_fields_and_keeps_the_id() {
        let repo = KvRepository::<Product>::new(Arc::new(MemoryKvStore::new()));
        let original = product("p-1");
        repo.save(&original).await.unwrap();

        let patch = UpdateProductPayload {
            price: Some(Decimal::from(1999)),
            ..Default::default()
        };
        let merged = repo.merge("p-1", &patch).await.unwrap().unwrap();

        assert_eq!(merged.id, "p-1");
        assert_eq!(merged.price, Decimal::from(1999));
        assert_eq!(merged.name, original.name);
        assert_eq!(merged.created_at, original.created_at);
        assert!(merged.updated_at >= original.updated_at);
        assert_eq!(repo.find_by_id("p-1").await.unwrap(), Some(merged));
    }

    #[tokio::test]
    async fn merge_on_missing_record_returns_none() {
        let repo = KvRepository::<Product>::new(Arc::new(MemoryKvStore::new()));
        let patch = UpdateProductPayload::default();
        assert!(repo.merge("ghost", &patch).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_skips_records_that_no_longer_decode() {
        let store = Arc::new(MemoryKvStore::new());
        let repo = KvRepository::<Product>::new(store.clone());
        repo.save(&product("ok")).await.unwrap();
        store
            .set("product:broken", serde_json::json!({"id": "broken"}))
            .await
            .unwrap();

        let listed = repo.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, "ok");
    }
}
