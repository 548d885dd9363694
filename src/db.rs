pub mod kv_store;
pub use kv_store::{KvStore, MemoryKvStore, PgKvStore};
pub mod repository;
pub use repository::KvRepository;
pub mod admin_repo;
pub use admin_repo::AdminRepository;

use crate::models::{
    category::Category, delivery::DeliveryLocation, order::Order, payment::Payment,
    product::Product,
};

pub type ProductRepository = KvRepository<Product>;
pub type CategoryRepository = KvRepository<Category>;
pub type DeliveryRepository = KvRepository<DeliveryLocation>;
pub type OrderRepository = KvRepository<Order>;
pub type PaymentRepository = KvRepository<Payment>;
