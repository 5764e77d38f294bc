//! # Domain Store
//!
//! Query/mutation seam over the external record store that holds users,
//! products and orders. Filters are field-level predicates (equals,
//! in-set) so implementations can push them down to whatever backend
//! they wrap. `MemoryStore` backs tests and local development.

use crate::error::{CheckoutError, CheckoutResult};
use crate::order::Order;
use crate::product::Product;
use crate::user::User;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// Field-level filter predicate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Field equals the given value
    Equals(String),
    /// Field is one of the given values
    InSet(Vec<String>),
}

impl Predicate {
    /// Evaluate the predicate against a field value
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Predicate::Equals(expected) => value == expected,
            Predicate::InSet(set) => set.iter().any(|candidate| candidate == value),
        }
    }
}

/// Filter for user lookups
#[derive(Debug, Clone, Default)]
pub struct UserQuery {
    pub id: Option<Predicate>,
}

/// Filter for product lookups
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    pub id: Option<Predicate>,
}

/// Filter for order lookups
#[derive(Debug, Clone, Default)]
pub struct OrderQuery {
    pub id: Option<Predicate>,
    pub user_id: Option<Predicate>,
}

impl OrderQuery {
    /// Filter on the order id alone
    pub fn by_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(Predicate::Equals(id.into())),
            user_id: None,
        }
    }
}

/// Data for a new order record. Orders always start unpaid.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: String,
    pub product_ids: Vec<String>,
}

/// Partial update applied to matching orders
#[derive(Debug, Clone, Default)]
pub struct OrderPatch {
    pub is_paid: Option<bool>,
}

/// Store seam over users, products and orders.
///
/// The store is treated as an external, possibly concurrently accessed
/// system with read-after-write consistency. No locking happens above
/// this trait; duplicate webhook deliveries may race through
/// lookup-then-update and both succeed (the transition is idempotent).
#[async_trait]
pub trait DomainStore: Send + Sync {
    async fn find_users(&self, query: &UserQuery) -> CheckoutResult<Vec<User>>;

    async fn find_products(&self, query: &ProductQuery) -> CheckoutResult<Vec<Product>>;

    async fn find_orders(&self, query: &OrderQuery) -> CheckoutResult<Vec<Order>>;

    /// Create an order record, unpaid, with a store-assigned id
    async fn create_order(&self, order: NewOrder) -> CheckoutResult<Order>;

    /// Apply a patch to every order matching the query; returns the
    /// updated records
    async fn update_orders(
        &self,
        query: &OrderQuery,
        patch: OrderPatch,
    ) -> CheckoutResult<Vec<Order>>;
}

/// Type alias for a shared store handle (dynamic dispatch)
pub type BoxedStore = Arc<dyn DomainStore>;

/// In-memory `DomainStore` for tests and local development
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
    products: RwLock<Vec<Product>>,
    orders: RwLock<Vec<Order>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user record
    pub fn insert_user(&self, user: User) {
        self.users.write().expect("users lock poisoned").push(user);
    }

    /// Seed a product record
    pub fn insert_product(&self, product: Product) {
        self.products
            .write()
            .expect("products lock poisoned")
            .push(product);
    }

    fn order_matches(order: &Order, query: &OrderQuery) -> bool {
        query
            .id
            .as_ref()
            .map_or(true, |predicate| predicate.matches(&order.id))
            && query
                .user_id
                .as_ref()
                .map_or(true, |predicate| predicate.matches(&order.user_id))
    }
}

#[async_trait]
impl DomainStore for MemoryStore {
    async fn find_users(&self, query: &UserQuery) -> CheckoutResult<Vec<User>> {
        let users = self.users.read().map_err(lock_error)?;
        Ok(users
            .iter()
            .filter(|user| {
                query
                    .id
                    .as_ref()
                    .map_or(true, |predicate| predicate.matches(&user.id))
            })
            .cloned()
            .collect())
    }

    async fn find_products(&self, query: &ProductQuery) -> CheckoutResult<Vec<Product>> {
        let products = self.products.read().map_err(lock_error)?;
        Ok(products
            .iter()
            .filter(|product| {
                query
                    .id
                    .as_ref()
                    .map_or(true, |predicate| predicate.matches(&product.id))
            })
            .cloned()
            .collect())
    }

    async fn find_orders(&self, query: &OrderQuery) -> CheckoutResult<Vec<Order>> {
        let orders = self.orders.read().map_err(lock_error)?;
        Ok(orders
            .iter()
            .filter(|order| Self::order_matches(order, query))
            .cloned()
            .collect())
    }

    async fn create_order(&self, order: NewOrder) -> CheckoutResult<Order> {
        let record = Order {
            id: Uuid::new_v4().to_string(),
            user_id: order.user_id,
            product_ids: order.product_ids,
            is_paid: false,
            created_at: Utc::now(),
        };

        let mut orders = self.orders.write().map_err(lock_error)?;
        orders.push(record.clone());
        Ok(record)
    }

    async fn update_orders(
        &self,
        query: &OrderQuery,
        patch: OrderPatch,
    ) -> CheckoutResult<Vec<Order>> {
        let mut orders = self.orders.write().map_err(lock_error)?;
        let mut updated = Vec::new();

        for order in orders.iter_mut() {
            if Self::order_matches(order, query) {
                if let Some(is_paid) = patch.is_paid {
                    order.is_paid = is_paid;
                }
                updated.push(order.clone());
            }
        }

        Ok(updated)
    }
}

fn lock_error<E>(_: E) -> CheckoutError {
    CheckoutError::Serialization("store lock poisoned".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicate_equals() {
        let predicate = Predicate::Equals("ord_1".into());
        assert!(predicate.matches("ord_1"));
        assert!(!predicate.matches("ord_2"));
    }

    #[test]
    fn test_predicate_in_set() {
        let predicate = Predicate::InSet(vec!["p1".into(), "p2".into()]);
        assert!(predicate.matches("p1"));
        assert!(predicate.matches("p2"));
        assert!(!predicate.matches("p3"));
    }

    #[tokio::test]
    async fn test_create_order_starts_unpaid() {
        let store = MemoryStore::new();
        let order = store
            .create_order(NewOrder {
                user_id: "usr_1".into(),
                product_ids: vec!["p1".into()],
            })
            .await
            .unwrap();

        assert!(!order.is_paid);
        assert_eq!(order.user_id, "usr_1");

        let found = store.find_orders(&OrderQuery::by_id(order.id.as_str())).await.unwrap();
        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn test_update_orders_sets_paid_flag() {
        let store = MemoryStore::new();
        let order = store
            .create_order(NewOrder {
                user_id: "usr_1".into(),
                product_ids: vec![],
            })
            .await
            .unwrap();

        let updated = store
            .update_orders(
                &OrderQuery::by_id(order.id.as_str()),
                OrderPatch { is_paid: Some(true) },
            )
            .await
            .unwrap();

        assert_eq!(updated.len(), 1);
        assert!(updated[0].is_paid);

        // Replaying the same patch is a no-op at the data level
        let replayed = store
            .update_orders(
                &OrderQuery::by_id(order.id.as_str()),
                OrderPatch { is_paid: Some(true) },
            )
            .await
            .unwrap();
        assert!(replayed[0].is_paid);
    }

    #[tokio::test]
    async fn test_find_orders_filters_by_owner() {
        let store = MemoryStore::new();
        let mine = store
            .create_order(NewOrder {
                user_id: "usr_1".into(),
                product_ids: vec![],
            })
            .await
            .unwrap();
        store
            .create_order(NewOrder {
                user_id: "usr_2".into(),
                product_ids: vec![],
            })
            .await
            .unwrap();

        let query = OrderQuery {
            id: Some(Predicate::Equals(mine.id.clone())),
            user_id: Some(Predicate::Equals("usr_2".into())),
        };
        let found = store.find_orders(&query).await.unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_find_products_in_set() {
        let store = MemoryStore::new();
        store.insert_product(Product::priced("p1", "One", "price_1"));
        store.insert_product(Product::unpriced("p2", "Two"));
        store.insert_product(Product::priced("p3", "Three", "price_3"));

        let query = ProductQuery {
            id: Some(Predicate::InSet(vec!["p1".into(), "p2".into()])),
        };
        let found = store.find_products(&query).await.unwrap();
        assert_eq!(found.len(), 2);
    }
}
