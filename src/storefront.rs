//! Lógica da vitrine que roda no cliente: filtros do catálogo,
//! carrinho, lista de desejos e o assistente de checkout.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod wishlist;
