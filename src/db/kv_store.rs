// src/db/kv_store.rs

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::{types::Json, PgPool};
use tokio::sync::RwLock;

use crate::common::error::AppError;

/// Store chave/valor com busca por prefixo. Último a escrever vence.
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>, AppError>;

    async fn set(&self, key: &str, value: Value) -> Result<(), AppError>;

    /// Retorna `false` quando a chave não existia.
    async fn del(&self, key: &str) -> Result<bool, AppError>;

    /// Valores cujas chaves começam com `prefix`, em ordem de chave.
    async fn get_by_prefix(&self, prefix: &str) -> Result<Vec<Value>, AppError>;
}

// ---
// Postgres: tabela `kv_store (key TEXT PRIMARY KEY, value JSONB)`
// ---
#[derive(Clone)]
pub struct PgKvStore {
    pool: PgPool,
}

impl PgKvStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl KvStore for PgKvStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, AppError> {
        let value = sqlx::query_scalar::<_, Json<Value>>("SELECT value FROM kv_store WHERE key = $1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(value.map(|Json(v)| v))
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value)
            VALUES ($1, $2)
            ON CONFLICT (key)
            DO UPDATE SET value = EXCLUDED.value
            "#,
        )
        .bind(key)
        .bind(Json(value))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM kv_store WHERE key = $1")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn get_by_prefix(&self, prefix: &str) -> Result<Vec<Value>, AppError> {
        // starts_with evita escapar '%' e '_' de um LIKE
        let values = sqlx::query_scalar::<_, Json<Value>>(
            "SELECT value FROM kv_store WHERE starts_with(key, $1) ORDER BY key",
        )
        .bind(prefix)
        .fetch_all(&self.pool)
        .await?;
        Ok(values.into_iter().map(|Json(v)| v).collect())
    }
}

// ---
// Em memória: desenvolvimento local e testes
// ---
#[derive(Default)]
pub struct MemoryKvStore {
    entries: RwLock<BTreeMap<String, Value>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvStore for MemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, AppError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), AppError> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<bool, AppError> {
        Ok(self.entries.write().await.remove(key).is_some())
    }

    async fn get_by_prefix(&self, prefix: &str) -> Result<Vec<Value>, AppError> {
        let entries = self.entries.read().await;
        Ok(entries
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(_, value)| value.clone())
            .collect())
    }
}
