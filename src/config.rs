// src/config.rs

use std::{env, path::PathBuf, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use crate::{
    common::i18n::I18nStore,
    db::{
        AdminRepository, CategoryRepository, DeliveryRepository, KvStore, MemoryKvStore,
        OrderRepository, PaymentRepository, PgKvStore, ProductRepository,
    },
    services::{
        AuthService, CatalogService, DeliveryService, DocumentService, OrderService,
        PaymentService, SeedService, StorageService,
    },
};

const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KvBackend {
    Postgres,
    Memory,
}

// Configuração lida uma única vez do ambiente (.env incluso)
#[derive(Debug, Clone)]
pub struct Config {
    pub jwt_secret: String,
    pub kv_backend: KvBackend,
    pub database_url: Option<String>,
    pub bind_addr: String,
    pub public_url: String,
    pub storage_dir: PathBuf,
    pub storage_bucket: String,
    pub max_upload_bytes: usize,
    pub fonts_dir: PathBuf,
    pub store_name: String,
    pub currency: String,
    pub bcrypt_cost: u32,
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET deve ser definido")?;

        let kv_backend = match var_or("KV_BACKEND", "postgres").to_lowercase().as_str() {
            "postgres" => KvBackend::Postgres,
            "memory" => KvBackend::Memory,
            other => anyhow::bail!("KV_BACKEND inválido: {other} (use 'postgres' ou 'memory')"),
        };

        let database_url = env::var("DATABASE_URL").ok();
        if kv_backend == KvBackend::Postgres && database_url.is_none() {
            anyhow::bail!("DATABASE_URL deve ser definida quando KV_BACKEND=postgres");
        }

        let max_upload_bytes = match env::var("MAX_UPLOAD_BYTES") {
            Ok(raw) => raw.parse().context("MAX_UPLOAD_BYTES deve ser um número")?,
            Err(_) => DEFAULT_MAX_UPLOAD_BYTES,
        };

        let bcrypt_cost = match env::var("BCRYPT_COST") {
            Ok(raw) => raw.parse().context("BCRYPT_COST deve ser um número")?,
            Err(_) => bcrypt::DEFAULT_COST,
        };

        Ok(Self {
            jwt_secret,
            kv_backend,
            database_url,
            bind_addr: var_or("BIND_ADDR", "0.0.0.0:3000"),
            public_url: var_or("PUBLIC_URL", "http://localhost:3000")
                .trim_end_matches('/')
                .to_string(),
            storage_dir: PathBuf::from(var_or("STORAGE_DIR", "./storage")),
            storage_bucket: var_or("STORAGE_BUCKET", "product-images"),
            max_upload_bytes,
            fonts_dir: PathBuf::from(var_or("FONTS_DIR", "./fonts")),
            store_name: var_or("STORE_NAME", "Storefront"),
            currency: var_or("CURRENCY", "KES"),
            bcrypt_cost,
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub i18n_store: Arc<I18nStore>,

    pub auth_service: AuthService,
    pub catalog_service: CatalogService,
    pub delivery_service: DeliveryService,
    pub order_service: OrderService,
    pub payment_service: PaymentService,
    pub storage_service: StorageService,
    pub document_service: DocumentService,
    pub seed_service: SeedService,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store: Arc<dyn KvStore> = match config.kv_backend {
            KvBackend::Memory => {
                tracing::warn!("⚠️ KV_BACKEND=memory: os dados não sobrevivem a um restart");
                Arc::new(MemoryKvStore::new())
            }
            KvBackend::Postgres => {
                let database_url = config
                    .database_url
                    .as_deref()
                    .context("DATABASE_URL deve ser definida")?;

                let db_pool = PgPoolOptions::new()
                    .max_connections(5)
                    .acquire_timeout(Duration::from_secs(3))
                    .connect(database_url)
                    .await?;
                tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

                sqlx::migrate!().run(&db_pool).await?;
                tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

                Arc::new(PgKvStore::new(db_pool))
            }
        };

        Ok(Self::with_store(config, store))
    }

    // --- Monta o gráfico de dependências sobre um store qualquer ---
    pub fn with_store(config: Config, store: Arc<dyn KvStore>) -> Self {
        let product_repo = ProductRepository::new(store.clone());
        let category_repo = CategoryRepository::new(store.clone());
        let delivery_repo = DeliveryRepository::new(store.clone());
        let order_repo = OrderRepository::new(store.clone());
        let payment_repo = PaymentRepository::new(store.clone());
        let admin_repo = AdminRepository::new(store);

        let auth_service =
            AuthService::new(admin_repo, config.jwt_secret.clone(), config.bcrypt_cost);
        let catalog_service = CatalogService::new(product_repo.clone(), category_repo.clone());
        let delivery_service = DeliveryService::new(delivery_repo.clone());
        let order_service = OrderService::new(order_repo.clone(), delivery_repo.clone());
        let payment_service = PaymentService::new(payment_repo, order_repo);
        let storage_service = StorageService::new(
            config.storage_dir.clone(),
            config.storage_bucket.clone(),
            config.public_url.clone(),
            config.jwt_secret.clone(),
        );
        let document_service = DocumentService::new(
            config.fonts_dir.clone(),
            config.store_name.clone(),
            config.currency.clone(),
        );
        let seed_service = SeedService::new(product_repo, category_repo, delivery_repo);

        Self {
            config: Arc::new(config),
            i18n_store: Arc::new(I18nStore::new()),
            auth_service,
            catalog_service,
            delivery_service,
            order_service,
            payment_service,
            storage_service,
            document_service,
            seed_service,
        }
    }
}

#[cfg(test)]
impl Config {
    pub fn for_tests(storage_dir: PathBuf) -> Self {
        Self {
            jwt_secret: "test-secret".into(),
            kv_backend: KvBackend::Memory,
            database_url: None,
            bind_addr: "127.0.0.1:0".into(),
            public_url: "http://localhost:3000".into(),
            storage_dir,
            storage_bucket: "product-images".into(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            fonts_dir: PathBuf::from("./fonts"),
            store_name: "Test Store".into(),
            currency: "KES".into(),
            bcrypt_cost: 4,
        }
    }
}
