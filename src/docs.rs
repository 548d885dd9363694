// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;
use crate::services;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::signup,
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Products ---
        handlers::products::list_products,
        handlers::products::get_product,
        handlers::products::create_product,
        handlers::products::update_product,
        handlers::products::delete_product,

        // --- Categories ---
        handlers::categories::list_categories,
        handlers::categories::list_active_categories,
        handlers::categories::create_category,
        handlers::categories::toggle_category,
        handlers::categories::delete_category,

        // --- Storefront ---
        handlers::storefront::list_storefront_products,

        // --- Delivery ---
        handlers::delivery::list_locations,
        handlers::delivery::get_location,
        handlers::delivery::create_location,
        handlers::delivery::update_location,
        handlers::delivery::delete_location,

        // --- Orders ---
        handlers::orders::create_order,
        handlers::orders::list_orders,
        handlers::orders::get_order,
        handlers::orders::update_order,
        handlers::orders::order_receipt,

        // --- Payments ---
        handlers::payments::mpesa_payment,
        handlers::payments::card_payment,
        handlers::payments::get_payment,

        // --- Storage ---
        handlers::storage::upload_image,
        handlers::storage::get_object,

        // --- Seed ---
        handlers::seed::init_sample_data,
        handlers::seed::init_categories,
        handlers::seed::add_products_to_category,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::AdminUser,
            models::auth::SignupPayload,
            models::auth::LoginPayload,
            models::auth::AuthResponse,
            models::auth::SignupResponse,

            // --- Catalog ---
            models::product::SizeLabel,
            models::product::Product,
            models::product::CreateProductPayload,
            models::product::UpdateProductPayload,
            models::category::Category,
            models::category::CreateCategoryPayload,

            // --- Delivery ---
            models::delivery::DeliveryLocation,
            models::delivery::CreateDeliveryLocationPayload,
            models::delivery::UpdateDeliveryLocationPayload,

            // --- Orders ---
            models::order::OrderStatus,
            models::order::OrderLine,
            models::order::Order,
            models::order::CreateOrderPayload,
            models::order::UpdateOrderPayload,

            // --- Payments ---
            models::payment::PaymentMethod,
            models::payment::PaymentStatus,
            models::payment::Payment,
            models::payment::MpesaPaymentPayload,
            models::payment::CardPaymentPayload,

            // --- Storage / Seed ---
            handlers::storage::UploadImageForm,
            services::storage_service::UploadedObject,
            services::seed_service::SeedReport,
        )
    ),
    tags(
        (name = "Auth", description = "Contas do console de administração"),
        (name = "Products", description = "Catálogo de produtos"),
        (name = "Categories", description = "Categorias e visibilidade na vitrine"),
        (name = "Storefront", description = "Consulta pública da vitrine"),
        (name = "Delivery", description = "Zonas de entrega com custo fixo"),
        (name = "Orders", description = "Pedidos do checkout"),
        (name = "Payments", description = "Pagamentos simulados (M-Pesa e cartão)"),
        (name = "Storage", description = "Upload de imagens e URLs assinadas"),
        (name = "Seed", description = "Dados de exemplo")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
