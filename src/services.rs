pub mod auth;
pub mod catalog_service;
pub mod delivery_service;
pub mod document_service;
pub mod order_service;
pub mod payment_service;
pub mod seed_service;
pub mod storage_service;

pub use auth::AuthService;
pub use catalog_service::CatalogService;
pub use delivery_service::DeliveryService;
pub use document_service::DocumentService;
pub use order_service::OrderService;
pub use payment_service::PaymentService;
pub use seed_service::SeedService;
pub use storage_service::StorageService;
