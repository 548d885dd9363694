pub mod auth;
pub mod categories;
pub mod delivery;
pub mod orders;
pub mod payments;
pub mod products;
pub mod seed;
pub mod storage;
pub mod storefront;
