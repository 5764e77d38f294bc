//! # shop-api
//!
//! HTTP API layer for shopflow-rs.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - REST endpoints for checkout, order status, and products
//! - The webhook reconciler that flips orders to paid
//! - The HTTP mailer that delivers receipts
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/api/v1/checkout` | Create checkout session |
//! | GET | `/api/v1/orders/{id}/status` | Poll payment status |
//! | GET | `/api/v1/products` | List products |
//! | GET | `/api/v1/products/{id}` | Get product |
//! | POST | `/webhook/stripe` | Stripe webhook |

pub mod handlers;
pub mod mailer;
pub mod reconcile;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
