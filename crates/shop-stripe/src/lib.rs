//! # shop-stripe
//!
//! Stripe payment provider for shopflow-rs.
//!
//! Implements `shop_core::PaymentProvider` against the Stripe REST API:
//!
//! - **Checkout Sessions** - hosted payment pages built from price
//!   references, with `{userId, orderId}` metadata for reconciliation
//! - **Webhook verification** - HMAC-SHA256 over the raw body with
//!   timestamp tolerance and constant-time comparison
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use shop_stripe::StripeClient;
//! use shop_core::PaymentProvider;
//!
//! // Create client from environment
//! let stripe = StripeClient::from_env()?;
//!
//! // Open a hosted checkout session
//! let session = stripe.create_checkout(&request).await?;
//! // Redirect the customer to session.url
//!
//! // In your webhook endpoint (raw body required):
//! let event = stripe.verify_webhook(&body, signature).await?;
//! ```

pub mod checkout;
pub mod config;
pub mod webhook;

// Re-exports
pub use checkout::StripeClient;
pub use config::StripeConfig;
pub use webhook::{parse_event, verify_signature, SIGNATURE_TOLERANCE_SECS};
