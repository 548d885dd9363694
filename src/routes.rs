// src/routes.rs

use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers, middleware::auth::auth_guard};

pub fn build_router(app_state: AppState) -> Router {
    // Leitura da vitrine e criação de pedidos/pagamentos: sem token
    let public_routes = Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/admin/signup", post(handlers::auth::signup))
        .route("/admin/login", post(handlers::auth::login))
        .route("/products", get(handlers::products::list_products))
        .route("/products/{id}", get(handlers::products::get_product))
        .route("/categories", get(handlers::categories::list_categories))
        .route("/categories/active", get(handlers::categories::list_active_categories))
        .route("/storefront/products", get(handlers::storefront::list_storefront_products))
        .route("/delivery-locations", get(handlers::delivery::list_locations))
        .route("/delivery-locations/{id}", get(handlers::delivery::get_location))
        .route("/orders", post(handlers::orders::create_order))
        .route("/payment/mpesa", post(handlers::payments::mpesa_payment))
        .route("/payment/card", post(handlers::payments::card_payment))
        .route("/payment/{id}", get(handlers::payments::get_payment))
        .route("/storage/{bucket}/{*object}", get(handlers::storage::get_object));

    // Console de administração
    let protected_routes = Router::new()
        .route("/admin/me", get(handlers::auth::get_me))
        .route("/products", post(handlers::products::create_product))
        .route(
            "/products/{id}",
            put(handlers::products::update_product).delete(handlers::products::delete_product),
        )
        .route("/categories", post(handlers::categories::create_category))
        .route("/categories/{id}", delete(handlers::categories::delete_category))
        .route("/categories/{id}/toggle", put(handlers::categories::toggle_category))
        .route("/categories/{id}/add-products", post(handlers::seed::add_products_to_category))
        .route("/delivery-locations", post(handlers::delivery::create_location))
        .route(
            "/delivery-locations/{id}",
            put(handlers::delivery::update_location).delete(handlers::delivery::delete_location),
        )
        .route("/orders", get(handlers::orders::list_orders))
        .route(
            "/orders/{id}",
            get(handlers::orders::get_order).put(handlers::orders::update_order),
        )
        .route("/orders/{id}/receipt", get(handlers::orders::order_receipt))
        .route(
            "/upload-image",
            post(handlers::storage::upload_image)
                .layer(DefaultBodyLimit::max(app_state.config.max_upload_bytes)),
        )
        .route("/init-sample-data", post(handlers::seed::init_sample_data))
        .route("/init-categories", post(handlers::seed::init_categories))
        .route_layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    Router::new()
        .nest("/api", public_routes.merge(protected_routes))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, db::MemoryKvStore};
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;
    use uuid::Uuid;

    fn app() -> Router {
        let storage_dir = std::env::temp_dir().join(format!("storefront-routes-{}", Uuid::new_v4()));
        let state = AppState::with_store(Config::for_tests(storage_dir), Arc::new(MemoryKvStore::new()));
        build_router(state)
    }

    async fn send(app: &Router, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        app.clone().oneshot(request).await.unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn admin_token(app: &Router) -> String {
        let signup = json!({ "email": "admin@shop.co.ke", "password": "secret123", "name": "Admin" });
        let res = send(app, Method::POST, "/api/admin/signup", None, Some(signup)).await;
        assert_eq!(res.status(), StatusCode::CREATED);

        let login = json!({ "email": "admin@shop.co.ke", "password": "secret123" });
        let res = send(app, Method::POST, "/api/admin/login", None, Some(login)).await;
        assert_eq!(res.status(), StatusCode::OK);
        json_body(res).await["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn health_is_public() {
        let app = app();
        let res = send(&app, Method::GET, "/api/health", None, None).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn admin_routes_require_a_bearer_token() {
        let app = app();
        let product = json!({ "name": "Shirt", "price": 100, "category": "Shirts" });

        let res = send(&app, Method::POST, "/api/products", None, Some(product.clone())).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(res).await["error"], "Unauthorized");

        let res = send(&app, Method::POST, "/api/products", Some("not-a-jwt"), Some(product)).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let res = send(&app, Method::GET, "/api/orders", None, None).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn duplicate_signup_is_rejected() {
        let app = app();
        admin_token(&app).await;

        let signup = json!({ "email": "ADMIN@shop.co.ke", "password": "another1", "name": "Other" });
        let res = send(&app, Method::POST, "/api/admin/signup", None, Some(signup)).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn product_crud_round_trip() {
        let app = app();
        let token = admin_token(&app).await;

        let product = json!({ "name": "Oxford Shirt", "price": 2800, "category": "Shirts", "stock": 5 });
        let res = send(&app, Method::POST, "/api/products", Some(&token), Some(product)).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let created = json_body(res).await;
        let id = created["id"].as_str().unwrap().to_string();

        let patch = json!({ "price": 2500 });
        let res = send(&app, Method::PUT, &format!("/api/products/{id}"), Some(&token), Some(patch)).await;
        assert_eq!(res.status(), StatusCode::OK);
        let updated = json_body(res).await;
        assert_eq!(updated["id"], created["id"]);
        assert_eq!(updated["name"], "Oxford Shirt");
        assert_eq!(updated["price"].as_f64(), Some(2500.0));

        let res = send(&app, Method::DELETE, &format!("/api/products/{id}"), Some(&token), None).await;
        assert_eq!(res.status(), StatusCode::OK);

        let res = send(&app, Method::GET, &format!("/api/products/{id}"), None, None).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn not_found_message_follows_accept_language() {
        let app = app();
        let request = Request::builder()
            .uri("/api/products/missing")
            .header(header::ACCEPT_LANGUAGE, "pt-BR,pt;q=0.9")
            .body(Body::empty())
            .unwrap();

        let res = app.oneshot(request).await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(res).await["error"], "Produto não encontrado");
    }

    #[tokio::test]
    async fn malformed_json_is_a_bad_request() {
        let app = app();
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/orders")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{ not json"))
            .unwrap();

        let res = app.oneshot(request).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert!(json_body(res).await["error"].is_string());
    }

    #[tokio::test]
    async fn active_category_cannot_be_deleted() {
        let app = app();
        let token = admin_token(&app).await;

        let category = json!({ "name": "Shoes", "subcategories": ["Sneakers"] });
        let res = send(&app, Method::POST, "/api/categories", Some(&token), Some(category)).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let id = json_body(res).await["id"].as_str().unwrap().to_string();

        let res = send(&app, Method::DELETE, &format!("/api/categories/{id}"), Some(&token), None).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let res = send(&app, Method::PUT, &format!("/api/categories/{id}/toggle"), Some(&token), None).await;
        assert_eq!(json_body(res).await["active"], false);

        let res = send(&app, Method::DELETE, &format!("/api/categories/{id}"), Some(&token), None).await;
        assert_eq!(res.status(), StatusCode::OK);

        let res = send(&app, Method::DELETE, &format!("/api/categories/{id}"), Some(&token), None).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn toggling_a_category_hides_its_products() {
        let app = app();
        let token = admin_token(&app).await;

        let category = json!({ "name": "Shoes", "subcategories": ["Sneakers"] });
        let res = send(&app, Method::POST, "/api/categories", Some(&token), Some(category)).await;
        let id = json_body(res).await["id"].as_str().unwrap().to_string();

        let product = json!({ "name": "Canvas Sneakers", "price": 3900, "category": "Sneakers" });
        send(&app, Method::POST, "/api/products", Some(&token), Some(product)).await;

        let res = send(&app, Method::GET, "/api/storefront/products", None, None).await;
        assert_eq!(json_body(res).await.as_array().unwrap().len(), 1);

        send(&app, Method::PUT, &format!("/api/categories/{id}/toggle"), Some(&token), None).await;

        let res = send(&app, Method::GET, "/api/storefront/products", None, None).await;
        assert!(json_body(res).await.as_array().unwrap().is_empty());

        let res = send(&app, Method::GET, "/api/categories/active", None, None).await;
        assert!(json_body(res).await.as_array().unwrap().is_empty());

        // O produto continua no catálogo do console
        let res = send(&app, Method::GET, "/api/products", None, None).await;
        assert_eq!(json_body(res).await.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn order_totals_are_computed_on_the_server() {
        let app = app();
        let token = admin_token(&app).await;

        let location = json!({ "name": "CBD", "region": "Nairobi", "cost": 0 });
        let res = send(&app, Method::POST, "/api/delivery-locations", Some(&token), Some(location)).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let location_id = json_body(res).await["id"].as_str().unwrap().to_string();

        let order = json!({
            "customerName": "Wanjiku",
            "customerEmail": "wanjiku@example.com",
            "customerPhone": "0712345678",
            "deliveryAddress": "Kimathi Street",
            "deliveryLocationId": location_id,
            "cart": [{ "productId": "p1", "name": "Shirt", "price": 1000, "quantity": 2, "size": "M" }],
            "paymentMethod": "mpesa",
            "total": 1
        });
        let res = send(&app, Method::POST, "/api/orders", None, Some(order)).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let created = json_body(res).await;
        assert_eq!(created["subtotal"].as_f64(), Some(2000.0));
        assert_eq!(created["deliveryCost"].as_f64(), Some(0.0));
        assert_eq!(created["tax"].as_f64(), Some(160.0));
        assert_eq!(created["total"].as_f64(), Some(2160.0));
        assert_eq!(created["status"], "pending");

        let payment = json!({ "orderId": created["id"], "phoneNumber": "0712345678" });
        let res = send(&app, Method::POST, "/api/payment/mpesa", None, Some(payment)).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let payment = json_body(res).await;
        assert_eq!(payment["status"], "pending");
        assert_eq!(payment["amount"].as_f64(), Some(2160.0));
        assert_eq!(payment["phoneNumber"], "254712345678");

        let res = send(&app, Method::GET, "/api/orders", Some(&token), None).await;
        assert_eq!(json_body(res).await.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn order_with_unknown_location_is_rejected() {
        let app = app();
        let order = json!({
            "customerName": "Wanjiku",
            "customerEmail": "wanjiku@example.com",
            "customerPhone": "0712345678",
            "deliveryAddress": "Kimathi Street",
            "deliveryLocationId": "nowhere",
            "cart": [{ "productId": "p1", "name": "Shirt", "price": 1000, "quantity": 1 }],
            "paymentMethod": "card"
        });
        let res = send(&app, Method::POST, "/api/orders", None, Some(order)).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn seeding_is_idempotent_and_add_products_needs_a_known_category() {
        let app = app();
        let token = admin_token(&app).await;

        for _ in 0..2 {
            let res = send(&app, Method::POST, "/api/init-sample-data", Some(&token), None).await;
            assert_eq!(res.status(), StatusCode::OK);
        }
        let res = send(&app, Method::POST, "/api/init-categories", Some(&token), None).await;
        assert_eq!(res.status(), StatusCode::OK);

        let res = send(&app, Method::GET, "/api/products", None, None).await;
        let seeded = json_body(res).await.as_array().unwrap().len();

        let res = send(&app, Method::POST, "/api/categories/men/add-products", Some(&token), None).await;
        assert_eq!(res.status(), StatusCode::OK);
        let added = json_body(res).await.as_array().unwrap().len();
        assert!(added > 0);

        let res = send(&app, Method::GET, "/api/products", None, None).await;
        assert_eq!(json_body(res).await.as_array().unwrap().len(), seeded + added);

        let res = send(&app, Method::POST, "/api/categories/Unknown/add-products", Some(&token), None).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn openapi_paths_match_the_router() {
        let app = app();
        let res = send(&app, Method::GET, "/api-docs/openapi.json", None, None).await;
        assert_eq!(res.status(), StatusCode::OK);
        let doc = json_body(res).await;
        let paths = doc["paths"].as_object().unwrap();

        assert!(paths.contains_key("/api/categories/{id}/add-products"));
        assert!(paths.contains_key("/api/delivery-locations/{id}"));
        assert!(paths.contains_key("/api/storefront/products"));
    }

    #[tokio::test]
    async fn bad_query_string_gets_a_json_error() {
        let app = app();

        for uri in ["/api/storefront/products?sort=bogus", "/api/storefront/products?minPrice=abc"] {
            let res = send(&app, Method::GET, uri, None, None).await;
            assert_eq!(res.status(), StatusCode::BAD_REQUEST);
            let body = json_body(res).await;
            assert!(body["error"].is_string());
            assert!(body["details"]["reason"].is_string());
        }

        let res = send(&app, Method::GET, "/api/storage/product-images/x.png", None, None).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert!(json_body(res).await["error"].is_string());

        let res = send(
            &app,
            Method::GET,
            "/api/storefront/products?minPrice=100&maxPrice=200&sort=price-asc",
            None,
            None,
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn storefront_filters_and_sorts_by_query() {
        let app = app();
        let token = admin_token(&app).await;

        let category = json!({ "name": "Men", "subcategories": ["Shirts"] });
        send(&app, Method::POST, "/api/categories", Some(&token), Some(category)).await;
        for (name, price) in [("Linen Shirt", 1500), ("Oxford Shirt", 2800), ("Silk Shirt", 6500)] {
            let product = json!({ "name": name, "price": price, "category": "Shirts" });
            send(&app, Method::POST, "/api/products", Some(&token), Some(product)).await;
        }

        let uri = "/api/storefront/products?minPrice=1000&maxPrice=3000&sort=price-desc";
        let res = send(&app, Method::GET, uri, None, None).await;
        assert_eq!(res.status(), StatusCode::OK);
        let names: Vec<String> = json_body(res)
            .await
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, ["Oxford Shirt", "Linen Shirt"]);
    }

    #[tokio::test]
    async fn delivery_location_round_trip() {
        let app = app();
        let token = admin_token(&app).await;

        let location = json!({ "name": "Westlands", "region": "Nairobi", "cost": -5 });
        let res = send(&app, Method::POST, "/api/delivery-locations", Some(&token), Some(location)).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let location = json!({ "name": "Westlands", "region": "Nairobi", "cost": 250 });
        let res = send(&app, Method::POST, "/api/delivery-locations", Some(&token), Some(location)).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let created = json_body(res).await;
        let id = created["id"].as_str().unwrap().to_string();
        let uri = format!("/api/delivery-locations/{id}");

        let res = send(&app, Method::PUT, &uri, None, Some(json!({ "cost": 300 }))).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let res = send(&app, Method::PUT, &uri, Some(&token), Some(json!({ "cost": 300 }))).await;
        assert_eq!(res.status(), StatusCode::OK);
        let updated = json_body(res).await;
        assert_eq!(updated["id"], created["id"]);
        assert_eq!(updated["name"], "Westlands");
        assert_eq!(updated["cost"].as_f64(), Some(300.0));

        let res = send(&app, Method::GET, "/api/delivery-locations", None, None).await;
        assert_eq!(json_body(res).await.as_array().unwrap().len(), 1);

        let res = send(&app, Method::DELETE, &uri, Some(&token), None).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(json_body(res).await["success"], true);

        let res = send(&app, Method::DELETE, &uri, Some(&token), None).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let res = send(&app, Method::PUT, &uri, Some(&token), Some(json!({ "cost": 1 }))).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn checkout_wizard_drives_the_order_endpoint() {
        use crate::{
            models::{delivery::DeliveryLocation, order::Order, payment::PaymentMethod, product::Product},
            storefront::{
                cart::Cart,
                checkout::{CheckoutStep, CheckoutWizard, DeliveryDetails},
            },
        };

        let app = app();
        let token = admin_token(&app).await;

        let product = json!({ "name": "Chelsea Boots", "price": 5000, "category": "Boots", "stock": 3 });
        let res = send(&app, Method::POST, "/api/products", Some(&token), Some(product)).await;
        let product: Product = serde_json::from_value(json_body(res).await).unwrap();

        let location = json!({ "name": "Kilimani", "region": "Nairobi", "cost": 250 });
        let res = send(&app, Method::POST, "/api/delivery-locations", Some(&token), Some(location)).await;
        let location: DeliveryLocation = serde_json::from_value(json_body(res).await).unwrap();

        let mut cart = Cart::new();
        cart.add(&product, None, None, 1).unwrap();
        let mut wizard = CheckoutWizard::start(cart).unwrap();
        let details = DeliveryDetails {
            full_name: "Otieno Ouma".into(),
            email: "otieno@example.com".into(),
            phone: "0722000111".into(),
            address: "Argwings Kodhek Road".into(),
            notes: None,
        };
        wizard.submit_delivery(details, location).unwrap();
        let expected = wizard.totals();

        let payload = wizard.choose_payment(PaymentMethod::Card).unwrap();
        let res = send(&app, Method::POST, "/api/orders", None, Some(serde_json::to_value(&payload).unwrap())).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let order: Order = serde_json::from_value(json_body(res).await).unwrap();
        assert_eq!(order.totals(), expected);

        let emptied = wizard.complete(&order).unwrap();
        assert_eq!(wizard.step(), CheckoutStep::Success);
        assert_eq!(wizard.order_id(), Some(order.id.as_str()));
        assert_eq!(emptied.item_count(), 1);
    }
}
