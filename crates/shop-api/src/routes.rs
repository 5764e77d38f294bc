//! # Routes
//!
//! Axum router configuration for the checkout API.

use crate::handlers;
use crate::reconcile;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - API:
///   - POST /api/v1/checkout - Create a checkout session
///   - GET  /api/v1/orders/{order_id}/status - Poll payment status
///   - GET  /api/v1/products - List products
///   - GET  /api/v1/products/{product_id} - Get product by ID
///
/// - Webhooks:
///   - POST /webhook/stripe - Stripe webhook handler (raw body)
///
/// - Static pages:
///   - GET /checkout/success - Post-payment redirect target
///   - GET /checkout/cancel - Cancel redirect target
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - the storefront frontend calls the API cross-origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Static success/cancel pages
    let checkout_routes = Router::new()
        .route("/success", get(handlers::checkout_success))
        .route("/cancel", get(handlers::checkout_cancel));

    let api_routes = Router::new()
        .route("/checkout", post(handlers::create_checkout))
        .route("/orders/{order_id}/status", get(handlers::order_status))
        .route("/products", get(handlers::list_products))
        .route("/products/{product_id}", get(handlers::get_product));

    // Webhook routes (no CORS, must accept raw body)
    let webhook_routes = Router::new().route("/stripe", post(reconcile::stripe_webhook));

    Router::new()
        // Health check at root
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        // Checkout success/cancel pages
        .nest("/checkout", checkout_routes)
        // API v1
        .nest("/api/v1", api_routes)
        // Webhooks
        .nest("/webhook", webhook_routes)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        // State
        .with_state(state)
}
