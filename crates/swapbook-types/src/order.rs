//! Open trade orders and the order book aggregate record.
//!
//! An [`OpenOrder`] asks for one [`Description`] and offers any one of a
//! non-empty list in exchange. All live orders are persisted together as a
//! single [`OrderBookRecord`].

use serde::{Deserialize, Serialize};

use crate::codec::null_as_default;
use crate::{Description, OrderId, Result, SwapbookError};

/// A standing request to trade `wanted` for one of `offered`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenOrder {
    /// User who created the order.
    #[serde(alias = "user")]
    pub creator: String,
    /// Millisecond-derived id, unique among live orders.
    #[serde(alias = "timestamp")]
    pub id: OrderId,
    /// Description of the desired item.
    #[serde(alias = "want")]
    pub wanted: Description,
    /// Items the creator is willing to trade away.
    #[serde(alias = "willing", default, deserialize_with = "null_as_default")]
    pub offered: Vec<Description>,
}

impl OpenOrder {
    /// Build an order, rejecting an empty offer list.
    pub fn new(
        creator: impl Into<String>,
        id: OrderId,
        wanted: Description,
        offered: Vec<Description>,
    ) -> Result<Self> {
        if offered.is_empty() {
            return Err(SwapbookError::InvalidOrder {
                reason: "at least one offered description is required".to_string(),
            });
        }
        Ok(Self {
            creator: creator.into(),
            id,
            wanted,
            offered,
        })
    }

    /// Returns `true` if `kind`/`quantity` is one of the declared offers.
    #[must_use]
    pub fn offers(&self, kind: &str, quantity: i64) -> bool {
        self.offered.iter().any(|d| d.matches(kind, quantity))
    }
}

/// Persisted aggregate of every open order, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBookRecord {
    #[serde(alias = "open_trades", default, deserialize_with = "null_as_default")]
    pub open_orders: Vec<OpenOrder>,
}

impl OrderBookRecord {
    #[must_use]
    pub fn len(&self) -> usize {
        self.open_orders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.open_orders.is_empty()
    }

    /// First order with the given id.
    #[must_use]
    pub fn find(&self, id: OrderId) -> Option<&OpenOrder> {
        self.open_orders.iter().find(|o| o.id == id)
    }

    /// Remove the first order with the given id, keeping the rest in order.
    pub fn remove(&mut self, id: OrderId) -> Option<OpenOrder> {
        let pos = self.open_orders.iter().position(|o| o.id == id)?;
        Some(self.open_orders.remove(pos))
    }

    /// Highest id currently in the book.
    #[must_use]
    pub fn max_id(&self) -> Option<OrderId> {
        self.open_orders.iter().map(|o| o.id).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(id: i64) -> OpenOrder {
        OpenOrder::new(
            "bob",
            OrderId(id),
            Description::new("blue", 10),
            vec![Description::new("red", 5)],
        )
        .unwrap()
    }

    #[test]
    fn empty_offers_rejected() {
        let err = OpenOrder::new("bob", OrderId(1), Description::new("blue", 1), vec![]);
        assert!(matches!(err, Err(SwapbookError::InvalidOrder { .. })));
    }

    #[test]
    fn wire_format() {
        let book = OrderBookRecord {
            open_orders: vec![order(5)],
        };
        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"open_orders": [{
                "creator": "bob",
                "id": 5,
                "wanted": {"kind": "blue", "quantity": 10},
                "offered": [{"kind": "red", "quantity": 5}]
            }]})
        );
    }

    #[test]
    fn legacy_wire_format_decodes() {
        let raw = r#"{"open_trades":[{"user":"bob","timestamp":9,
            "want":{"color":"blue","amount":10},"willing":[{"color":"red","amount":5}]}]}"#;
        let book: OrderBookRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(book.open_orders, vec![order(9)]);
    }

    #[test]
    fn remove_preserves_order_of_rest() {
        let mut book = OrderBookRecord {
            open_orders: vec![order(1), order(2), order(3)],
        };
        assert_eq!(book.remove(OrderId(2)).map(|o| o.id), Some(OrderId(2)));
        let ids: Vec<i64> = book.open_orders.iter().map(|o| o.id.0).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(book.remove(OrderId(2)).is_none());
    }

    #[test]
    fn null_open_orders_decode_empty() {
        let book: OrderBookRecord = serde_json::from_str(r#"{"open_orders":null}"#).unwrap();
        assert!(book.is_empty());
    }

    #[test]
    fn offers_is_case_insensitive() {
        let o = order(1);
        assert!(o.offers("RED", 5));
        assert!(!o.offers("red", 6));
        assert_eq!(OrderBookRecord::default().max_id(), None);
    }
}
