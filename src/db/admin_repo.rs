// src/db/admin_repo.rs

use std::sync::Arc;

use crate::{common::error::AppError, db::KvStore, models::auth::StoredAdmin};

const ADMIN_PREFIX: &str = "admin:";

// Contas do console, indexadas pelo e-mail normalizado
#[derive(Clone)]
pub struct AdminRepository {
    store: Arc<dyn KvStore>,
}

impl AdminRepository {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    fn key(email: &str) -> String {
        format!("{}{}", ADMIN_PREFIX, normalize_email(email))
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<StoredAdmin>, AppError> {
        match self.store.get(&Self::key(email)).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    pub async fn create_admin(&self, admin: &StoredAdmin) -> Result<(), AppError> {
        // Sem transações no store: a checagem e a escrita podem correr entre requisições.
        if self.find_by_email(&admin.email).await?.is_some() {
            return Err(AppError::EmailAlreadyExists);
        }
        self.store
            .set(&Self::key(&admin.email), serde_json::to_value(admin)?)
            .await
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
