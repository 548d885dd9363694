//! Backend da loja: API da vitrine e do painel administrativo.
//!
//! `models` e `storefront` formam a parte que um cliente reaproveita
//! (filtros do catálogo, carrinho, lista de desejos e o assistente de
//! checkout que monta o `CreateOrderPayload` enviado para `POST /api/orders`).
//! O binário só sobe o servidor a partir de `config` e `routes`.

pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod storefront;
