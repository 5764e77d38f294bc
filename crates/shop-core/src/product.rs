//! # Product Types
//!
//! Product records for the storefront catalog. Prices live in the payment
//! provider's price list; a product only carries a reference to its price.
//! Seed data is loaded from `config/products.toml`.

use serde::{Deserialize, Serialize};

/// A product in the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier (e.g., "prod_icons_pack")
    pub id: String,

    /// Display name
    pub name: String,

    /// Provider price-list reference (e.g., "price_1Ow...").
    /// A product without one cannot be checked out and is silently
    /// dropped from carts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_id: Option<String>,
}

impl Product {
    /// Create a product with a price reference
    pub fn priced(
        id: impl Into<String>,
        name: impl Into<String>,
        price_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price_id: Some(price_id.into()),
        }
    }

    /// Create a product that is not yet purchasable
    pub fn unpriced(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price_id: None,
        }
    }

    /// Whether this product can appear in a checkout session
    pub fn is_priced(&self) -> bool {
        self.price_id.is_some()
    }
}

/// Product catalog (loaded from config)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductCatalog {
    pub products: Vec<Product>,
}

impl ProductCatalog {
    /// Load catalog from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }
}
