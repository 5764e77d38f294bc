//! # Application State
//!
//! Shared state for the Axum application: the domain store, the payment
//! provider, the receipt notifier, and server configuration.

use crate::mailer::HttpMailer;
use shop_core::{
    BoxedNotifier, BoxedProvider, BoxedStore, CheckoutError, CheckoutResult, MemoryStore,
    ProductCatalog,
};
use shop_stripe::StripeClient;
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Base URL the provider redirects back to after checkout
    pub base_url: String,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Price reference for the fixed service-fee line item
    pub service_fee_price_id: String,
    /// From-address for receipt emails
    pub mail_from: String,
}

impl AppConfig {
    /// Load from environment variables.
    ///
    /// Required env vars:
    /// - `SERVICE_FEE_PRICE_ID`
    pub fn from_env() -> CheckoutResult<Self> {
        dotenvy::dotenv().ok();

        let service_fee_price_id = std::env::var("SERVICE_FEE_PRICE_ID").map_err(|_| {
            CheckoutError::Configuration("SERVICE_FEE_PRICE_ID not set".to_string())
        })?;

        if !service_fee_price_id.starts_with("price_") {
            return Err(CheckoutError::Configuration(
                "SERVICE_FEE_PRICE_ID must start with price_".to_string(),
            ));
        }

        Ok(Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            base_url: std::env::var("BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            environment: std::env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
            service_fee_price_id,
            mail_from: std::env::var("MAIL_FROM")
                .unwrap_or_else(|_| "ShopFlow <receipts@shopflow.dev>".to_string()),
        })
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> CheckoutResult<std::net::SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| {
                CheckoutError::Configuration(format!(
                    "Invalid bind address {}:{}",
                    self.host, self.port
                ))
            })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Domain record store
    pub store: BoxedStore,
    /// Hosted-checkout provider
    pub provider: BoxedProvider,
    /// Receipt notifier
    pub notifier: BoxedNotifier,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create state with the default Stripe provider and HTTP mailer
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env()?;

        let store = Arc::new(load_store()?);

        let provider = StripeClient::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Stripe: {}", e))?;

        let notifier = HttpMailer::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize mailer: {}", e))?;

        Ok(Self::with_parts(
            store,
            Arc::new(provider),
            Arc::new(notifier),
            config,
        ))
    }

    /// Create state from explicit collaborators (used by tests)
    pub fn with_parts(
        store: BoxedStore,
        provider: BoxedProvider,
        notifier: BoxedNotifier,
        config: AppConfig,
    ) -> Self {
        Self {
            store,
            provider,
            notifier,
            config,
        }
    }
}

/// Build the in-memory store, seeded from `config/products.toml`
fn load_store() -> anyhow::Result<MemoryStore> {
    let store = MemoryStore::new();

    let config_paths = [
        "config/products.toml",
        "../config/products.toml",
        "../../config/products.toml",
    ];

    for path in config_paths {
        if let Ok(content) = std::fs::read_to_string(path) {
            let catalog = ProductCatalog::from_toml(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path, e))?;
            tracing::info!("Loaded {} products from {}", catalog.products.len(), path);
            for product in catalog.products {
                store.insert_product(product);
            }
            return Ok(store);
        }
    }

    tracing::warn!("No product catalog found, starting with an empty store");
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn test_config() -> AppConfig {
        AppConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            base_url: "http://localhost:8080".to_string(),
            environment: "test".to_string(),
            service_fee_price_id: "price_fee".to_string(),
            mail_from: "ShopFlow <receipts@shopflow.dev>".to_string(),
        }
    }

    #[test]
    fn test_socket_addr() {
        let config = AppConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            ..test_config()
        };

        let addr = config.socket_addr().unwrap();
        assert_eq!(addr.to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn test_is_production() {
        let config = AppConfig {
            environment: "production".to_string(),
            ..test_config()
        };
        assert!(config.is_production());
        assert!(!test_config().is_production());
    }
}
