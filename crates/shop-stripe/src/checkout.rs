//! # Stripe Checkout Sessions
//!
//! Implementation of the Stripe Checkout Sessions API.
//! Line items reference pre-created Stripe prices; the session carries
//! `{userId, orderId}` metadata that the completion webhook rounds back.

use crate::config::StripeConfig;
use crate::webhook;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use shop_core::{
    CheckoutError, CheckoutRequest, CheckoutResult, CreatedSession, PaymentProvider, WebhookEvent,
};
use tracing::{debug, error, info, instrument};

/// Stripe hosted-checkout client
pub struct StripeClient {
    config: StripeConfig,
    client: Client,
}

impl StripeClient {
    /// Create a new Stripe client
    pub fn new(config: StripeConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Create from environment variables
    pub fn from_env() -> CheckoutResult<Self> {
        let config = StripeConfig::from_env()?;
        Ok(Self::new(config))
    }

    /// Build form data for the Checkout Sessions API
    fn build_form(request: &CheckoutRequest) -> Vec<(String, String)> {
        let mut form_params: Vec<(String, String)> = vec![
            ("mode".to_string(), "payment".to_string()),
            ("payment_method_types[0]".to_string(), "card".to_string()),
            ("success_url".to_string(), request.success_url.clone()),
            ("cancel_url".to_string(), request.cancel_url.clone()),
        ];

        for (i, item) in request.line_items.iter().enumerate() {
            form_params.push((format!("line_items[{}][price]", i), item.price.clone()));
            form_params.push((
                format!("line_items[{}][quantity]", i),
                item.quantity.to_string(),
            ));
            if let Some(adjustable) = item.adjustable_quantity {
                form_params.push((
                    format!("line_items[{}][adjustable_quantity][enabled]", i),
                    adjustable.to_string(),
                ));
            }
        }

        form_params.push((
            "metadata[userId]".to_string(),
            request.metadata.user_id.clone(),
        ));
        form_params.push((
            "metadata[orderId]".to_string(),
            request.metadata.order_id.clone(),
        ));

        form_params
    }
}

#[async_trait]
impl PaymentProvider for StripeClient {
    #[instrument(skip(self, request), fields(order_id = %request.metadata.order_id))]
    async fn create_checkout(&self, request: &CheckoutRequest) -> CheckoutResult<CreatedSession> {
        let form_params = Self::build_form(request);

        debug!(
            "Creating Stripe checkout session: {} line items",
            request.line_items.len()
        );

        let url = format!("{}/v1/checkout/sessions", self.config.api_base_url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version)
            .header("Idempotency-Key", &request.metadata.order_id)
            .form(&form_params)
            .send()
            .await
            .map_err(|e| CheckoutError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CheckoutError::Network(e.to_string()))?;

        if !status.is_success() {
            error!("Stripe API error: status={}, body={}", status, body);

            if let Ok(error_response) = serde_json::from_str::<StripeErrorResponse>(&body) {
                return Err(CheckoutError::Provider {
                    provider: "stripe".to_string(),
                    message: error_response.error.message,
                });
            }

            return Err(CheckoutError::Provider {
                provider: "stripe".to_string(),
                message: format!("HTTP {}: {}", status, body),
            });
        }

        let session: StripeSessionResponse = serde_json::from_str(&body).map_err(|e| {
            CheckoutError::Serialization(format!("Failed to parse Stripe response: {}", e))
        })?;

        info!(
            "Created Stripe checkout session: id={}, url={}",
            session.id, session.url
        );

        Ok(CreatedSession {
            session_id: session.id,
            url: session.url,
        })
    }

    #[instrument(skip(self, payload, signature))]
    async fn verify_webhook(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> CheckoutResult<WebhookEvent> {
        webhook::verify_signature(&self.config.webhook_secret, payload, signature)?;

        let event = webhook::parse_event(payload)?;

        debug!(
            "Verified Stripe webhook: type={}, id={}",
            event.event_type.as_str(),
            event.event_id
        );

        Ok(event)
    }

    fn provider_name(&self) -> &'static str {
        "stripe"
    }
}

// =============================================================================
// Stripe API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct StripeSessionResponse {
    id: String,
    url: String,
}

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeError,
}

#[derive(Debug, Deserialize)]
struct StripeError {
    message: String,
}
