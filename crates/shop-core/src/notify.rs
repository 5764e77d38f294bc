//! # Notification Trait
//!
//! Seam over the transactional-mail sender. A failed send after a paid
//! transition is reported but never rolls the transition back.

use crate::error::CheckoutResult;
use async_trait::async_trait;
use std::sync::Arc;

/// A rendered email ready for delivery
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Transactional-mail seam
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> CheckoutResult<()>;
}

/// Type alias for a shared notifier handle (dynamic dispatch)
pub type BoxedNotifier = Arc<dyn Notifier>;
