//! # Checkout Error Types
//!
//! Typed error handling for the shopflow checkout engine.
//! All checkout operations return `Result<T, CheckoutError>`.

use thiserror::Error;

/// Core error type for all checkout operations
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid request data (empty cart, missing webhook metadata)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Webhook signature verification failed
    #[error("Invalid webhook signature: {0}")]
    InvalidSignature(String),

    /// Webhook payload parsing error
    #[error("Webhook parse error: {0}")]
    WebhookParse(String),

    /// A referenced record does not exist
    #[error("No such {resource}: {id}")]
    NotFound { resource: &'static str, id: String },

    /// Payment provider API error
    #[error("Provider error [{provider}]: {message}")]
    Provider { provider: String, message: String },

    /// Network/HTTP error communicating with an external service
    #[error("Network error: {0}")]
    Network(String),

    /// Receipt notification failed to send
    #[error("Notification failed: {0}")]
    Notification(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CheckoutError {
    /// Returns the HTTP status code appropriate for this error.
    ///
    /// Signature and validation failures map to 400, missing records to
    /// 404, and a failed receipt send to 500 while the paid state stands.
    pub fn status_code(&self) -> u16 {
        match self {
            CheckoutError::Configuration(_) => 500,
            CheckoutError::InvalidRequest(_) => 400,
            CheckoutError::InvalidSignature(_) => 400,
            CheckoutError::WebhookParse(_) => 400,
            CheckoutError::NotFound { .. } => 404,
            CheckoutError::Provider { .. } => 502,
            CheckoutError::Network(_) => 503,
            CheckoutError::Notification(_) => 500,
            CheckoutError::Serialization(_) => 500,
        }
    }

    /// Shorthand for a `NotFound` error
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        CheckoutError::NotFound {
            resource,
            id: id.into(),
        }
    }
}

/// Result type alias for checkout operations
pub type CheckoutResult<T> = Result<T, CheckoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            CheckoutError::InvalidRequest("empty cart".into()).status_code(),
            400
        );
        assert_eq!(
            CheckoutError::InvalidSignature("mismatch".into()).status_code(),
            400
        );
        assert_eq!(
            CheckoutError::not_found("order", "ord_1").status_code(),
            404
        );
        assert_eq!(
            CheckoutError::Notification("mail API down".into()).status_code(),
            500
        );
        assert_eq!(
            CheckoutError::Provider {
                provider: "stripe".into(),
                message: "boom".into()
            }
            .status_code(),
            502
        );
    }

    #[test]
    fn test_not_found_display() {
        let err = CheckoutError::not_found("user", "usr_42");
        assert_eq!(err.to_string(), "No such user: usr_42");
    }
}
