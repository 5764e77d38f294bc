//! # Payment Provider Trait
//!
//! Seam over the hosted-checkout provider. The engine builds a line-item
//! list from price references, asks the provider for a session, and later
//! receives the session's completion event back over a signed webhook.

use crate::error::CheckoutResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;

/// One line of a checkout session, referencing a provider price
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionLineItem {
    /// Provider price-list reference
    pub price: String,

    /// Quantity
    pub quantity: u32,

    /// Explicit quantity-adjustment setting. `None` leaves the
    /// provider's default; `Some(false)` pins the line (used for the
    /// service fee).
    pub adjustable_quantity: Option<bool>,
}

impl SessionLineItem {
    /// A regular product line, quantity 1
    pub fn product(price: impl Into<String>) -> Self {
        Self {
            price: price.into(),
            quantity: 1,
            adjustable_quantity: None,
        }
    }

    /// The fixed service-fee line; customers cannot change its quantity
    pub fn service_fee(price: impl Into<String>) -> Self {
        Self {
            price: price.into(),
            quantity: 1,
            adjustable_quantity: Some(false),
        }
    }
}

/// Metadata attached to a session and round-tripped back in its
/// completion event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionMetadata {
    pub user_id: String,
    pub order_id: String,
}

/// Everything the provider needs to open a hosted checkout session
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub line_items: Vec<SessionLineItem>,
    pub success_url: String,
    pub cancel_url: String,
    pub metadata: SessionMetadata,
}

/// A session the provider created
#[derive(Debug, Clone)]
pub struct CreatedSession {
    /// Provider's session ID
    pub session_id: String,

    /// URL to redirect the customer to for payment
    pub url: String,
}

/// Webhook event types this engine reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookEventType {
    /// Checkout session completed - the only type that mutates state
    CheckoutCompleted,
    /// Any other verified event (acknowledged, no action)
    Unknown(String),
}

impl WebhookEventType {
    pub fn as_str(&self) -> &str {
        match self {
            WebhookEventType::CheckoutCompleted => "checkout.session.completed",
            WebhookEventType::Unknown(other) => other,
        }
    }
}

/// The checkout-session object carried by a webhook event
#[derive(Debug, Clone, Default)]
pub struct EventSession {
    /// Provider's session ID, when the event object has one
    pub id: Option<String>,

    /// Metadata round-tripped from session creation
    pub metadata: HashMap<String, String>,
}

/// A verified, parsed webhook event
#[derive(Debug, Clone)]
pub struct WebhookEvent {
    /// Event ID from the provider
    pub event_id: String,

    /// Event type
    pub event_type: WebhookEventType,

    /// The event's session object
    pub session: EventSession,

    /// Provider-reported timestamp
    pub timestamp: DateTime<Utc>,
}

/// Hosted-checkout provider seam.
///
/// `verify_webhook` must be handed the raw, unparsed request body; any
/// re-serialization invalidates the signature.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create a hosted checkout session and return its redirect URL
    async fn create_checkout(&self, request: &CheckoutRequest) -> CheckoutResult<CreatedSession>;

    /// Verify a webhook signature and parse the event
    async fn verify_webhook(&self, payload: &[u8], signature: &str)
        -> CheckoutResult<WebhookEvent>;

    /// Provider name (for logging)
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared provider handle (dynamic dispatch)
pub type BoxedProvider = Arc<dyn PaymentProvider>;
