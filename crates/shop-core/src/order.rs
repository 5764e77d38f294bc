//! # Order Types
//!
//! Order records as the domain store holds them. An order is created
//! unpaid when a checkout session is requested and flips to paid exactly
//! once, when a verified completion event is reconciled. Orders are never
//! deleted by this engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Unique order ID (store-assigned)
    pub id: String,

    /// Owning user
    pub user_id: String,

    /// Products purchased, in cart order. Only priced products make it
    /// into an order.
    pub product_ids: Vec<String>,

    /// Payment flag. Transitions false -> true only.
    pub is_paid: bool,

    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_serialization_round_trip() {
        let order = Order {
            id: "ord_1".into(),
            user_id: "usr_1".into(),
            product_ids: vec!["prod_1".into(), "prod_2".into()],
            is_paid: false,
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&order).unwrap();
        let back: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, "ord_1");
        assert_eq!(back.product_ids.len(), 2);
        assert!(!back.is_paid);
    }
}
