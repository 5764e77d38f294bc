//! # Receipt Mailer
//!
//! HTTP transactional-mail client (Resend-style JSON API) implementing
//! the `Notifier` seam, plus the receipt document renderer.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde_json::json;
use shop_core::{CheckoutError, CheckoutResult, EmailMessage, Notifier, Product};
use tracing::{error, info, instrument};

/// Mail API configuration
#[derive(Debug, Clone)]
pub struct MailConfig {
    /// API base URL (for testing/mocking)
    pub api_url: String,
    /// Bearer token for the mail API
    pub api_key: String,
}

impl MailConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `MAIL_API_KEY`
    pub fn from_env() -> CheckoutResult<Self> {
        dotenvy::dotenv().ok();

        let api_key = std::env::var("MAIL_API_KEY")
            .map_err(|_| CheckoutError::Configuration("MAIL_API_KEY not set".to_string()))?;

        Ok(Self {
            api_url: std::env::var("MAIL_API_URL")
                .unwrap_or_else(|_| "https://api.resend.com".to_string()),
            api_key,
        })
    }

    /// Create config with explicit values (for testing)
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            api_key: api_key.into(),
        }
    }
}

/// Transactional-mail client posting rendered documents to an HTTP API
pub struct HttpMailer {
    config: MailConfig,
    client: Client,
}

impl HttpMailer {
    /// Create a new mailer
    pub fn new(config: MailConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Create from environment variables
    pub fn from_env() -> CheckoutResult<Self> {
        let config = MailConfig::from_env()?;
        Ok(Self::new(config))
    }
}

#[async_trait]
impl Notifier for HttpMailer {
    #[instrument(skip(self, message), fields(to = %message.to))]
    async fn send(&self, message: &EmailMessage) -> CheckoutResult<()> {
        let url = format!("{}/emails", self.config.api_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&json!({
                "from": message.from,
                "to": [message.to],
                "subject": message.subject,
                "html": message.html,
            }))
            .send()
            .await
            .map_err(|e| CheckoutError::Notification(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Mail API error: status={}, body={}", status, body);
            return Err(CheckoutError::Notification(format!(
                "Mail API returned HTTP {}",
                status
            )));
        }

        info!("Receipt email sent");
        Ok(())
    }
}

/// Render the receipt document sent after a completed payment.
///
/// Carries the order date, the buyer's email, the order id and the
/// purchased product list.
pub fn render_receipt(
    date: DateTime<Utc>,
    email: &str,
    order_id: &str,
    products: &[Product],
) -> String {
    let items: String = products
        .iter()
        .map(|product| format!("        <li>{}</li>\n", product.name))
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html>
<body style="font-family: system-ui; color: #1a1a2e;">
    <h1>Thanks for your order!</h1>
    <p>This receipt was sent to <strong>{email}</strong>.</p>
    <p>Order <code>{order_id}</code> &middot; {date}</p>
    <ul>
{items}    </ul>
    <p style="color: #666;">Keep this email for your records.</p>
</body>
</html>
"#,
        email = email,
        order_id = order_id,
        date = date.format("%B %d, %Y"),
        items = items,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn receipt_message() -> EmailMessage {
        EmailMessage {
            from: "ShopFlow <receipts@shopflow.dev>".to_string(),
            to: "buyer@example.com".to_string(),
            subject: "Thanks for your order! This is your receipt.".to_string(),
            html: "<p>receipt</p>".to_string(),
        }
    }

    #[tokio::test]
    async fn test_send_posts_to_mail_api() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/emails"))
            .and(body_string_contains("buyer@example.com"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "em_1" })),
            )
            .mount(&server)
            .await;

        let mailer = HttpMailer::new(MailConfig::new(server.uri(), "re_test_key"));
        assert!(mailer.send(&receipt_message()).await.is_ok());
    }

    #[tokio::test]
    async fn test_send_surfaces_api_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/emails"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let mailer = HttpMailer::new(MailConfig::new(server.uri(), "re_test_key"));
        let err = mailer.send(&receipt_message()).await.unwrap_err();
        assert!(matches!(err, CheckoutError::Notification(_)));
    }

    #[test]
    fn test_render_receipt_contains_order_details() {
        let products = vec![
            Product::priced("p1", "Icons Pack", "price_1"),
            Product::priced("p2", "UI Kit", "price_2"),
        ];
        let html = render_receipt(Utc::now(), "buyer@example.com", "ord_1", &products);

        assert!(html.contains("buyer@example.com"));
        assert!(html.contains("ord_1"));
        assert!(html.contains("Icons Pack"));
        assert!(html.contains("UI Kit"));
    }
}
