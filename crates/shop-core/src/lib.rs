//! # shop-core
//!
//! Core types and traits for the shopflow checkout engine.
//!
//! This crate provides:
//! - `DomainStore` trait (and `MemoryStore`) for users, products and orders
//! - `PaymentProvider` trait for hosted-checkout providers
//! - `Notifier` trait for receipt delivery
//! - `Order`, `Product`, `User` domain records
//! - Record-visibility policy predicates
//! - `CheckoutError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use shop_core::{MemoryStore, NewOrder, OrderQuery, Predicate, ProductQuery};
//!
//! // Resolve the cart, dropping products without a price reference
//! let products = store.find_products(&ProductQuery {
//!     id: Some(Predicate::InSet(product_ids)),
//! }).await?;
//!
//! // The order exists before the provider is ever called
//! let order = store.create_order(NewOrder { user_id, product_ids: priced }).await?;
//!
//! // Ask the provider for a hosted session and redirect the customer
//! let session = provider.create_checkout(&request).await?;
//! ```

pub mod error;
pub mod notify;
pub mod order;
pub mod policy;
pub mod product;
pub mod provider;
pub mod store;
pub mod user;

// Re-exports for convenience
pub use error::{CheckoutError, CheckoutResult};
pub use notify::{BoxedNotifier, EmailMessage, Notifier};
pub use order::Order;
pub use policy::{admin_or_self, Access};
pub use product::{Product, ProductCatalog};
pub use provider::{
    BoxedProvider, CheckoutRequest, CreatedSession, EventSession, PaymentProvider,
    SessionLineItem, SessionMetadata, WebhookEvent, WebhookEventType,
};
pub use store::{
    BoxedStore, DomainStore, MemoryStore, NewOrder, OrderPatch, OrderQuery, Predicate,
    ProductQuery, UserQuery,
};
pub use user::{Role, User};
