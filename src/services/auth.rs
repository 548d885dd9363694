// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{admin_repo::normalize_email, AdminRepository},
    models::auth::{AdminUser, Claims, StoredAdmin},
};

const TOKEN_TTL_DAYS: i64 = 7;

// Provedor de identidade dos administradores
#[derive(Clone)]
pub struct AuthService {
    admin_repo: AdminRepository,
    jwt_secret: String,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(admin_repo: AdminRepository, jwt_secret: String, bcrypt_cost: u32) -> Self {
        Self { admin_repo, jwt_secret, bcrypt_cost }
    }

    pub async fn signup_admin(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<AdminUser, AppError> {
        let email = normalize_email(email);
        if self.admin_repo.find_by_email(&email).await?.is_some() {
            return Err(AppError::EmailAlreadyExists);
        }

        // Hashing em thread separada para não travar o runtime
        let password_clone = password.to_owned();
        let cost = self.bcrypt_cost;
        let password_hash = tokio::task::spawn_blocking(move || hash(&password_clone, cost))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        let admin = StoredAdmin {
            id: Uuid::new_v4(),
            email,
            name: name.trim().to_string(),
            password_hash,
            created_at: Utc::now(),
        };
        self.admin_repo.create_admin(&admin).await?;

        tracing::info!("👤 Administrador criado: {}", admin.email);
        Ok(admin.into())
    }

    pub async fn login_admin(&self, email: &str, password: &str) -> Result<String, AppError> {
        let admin = self
            .admin_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = admin.password_hash.clone();

        let is_password_valid =
            tokio::task::spawn_blocking(move || verify(&password_clone, &password_hash_clone))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        self.create_token(&admin)
    }

    pub async fn validate_token(&self, token: &str) -> Result<AdminUser, AppError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &Validation::default(),
        )
        .map_err(|_| AppError::InvalidToken)?;

        // Conta removida ou recriada invalida tokens antigos
        let admin = self
            .admin_repo
            .find_by_email(&token_data.claims.email)
            .await?
            .filter(|admin| admin.id == token_data.claims.sub)
            .ok_or(AppError::InvalidToken)?;

        Ok(admin.into())
    }

    fn create_token(&self, admin: &StoredAdmin) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(TOKEN_TTL_DAYS);

        let claims = Claims {
            sub: admin.id,
            email: admin.email.clone(),
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}
