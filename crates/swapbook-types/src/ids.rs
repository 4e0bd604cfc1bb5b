//! Identifiers used throughout swapbook.
//!
//! Order ids are plain integers on the wire (milliseconds since the UNIX
//! epoch at creation time). Invocation ids use UUIDv7 and only appear in
//! logs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// OrderId
// ---------------------------------------------------------------------------

/// Identifier of an open trade order, derived from the creation clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub i64);

impl OrderId {
    #[must_use]
    pub fn from_millis(ms: i64) -> Self {
        Self(ms)
    }

    #[must_use]
    pub fn as_millis(&self) -> i64 {
        self.0
    }

    /// The smallest id strictly greater than this one.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for OrderId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>().map(Self)
    }
}

// ---------------------------------------------------------------------------
// TxId
// ---------------------------------------------------------------------------

/// Identifier of one host invocation. Uses UUIDv7 for time-ordered sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct TxId(pub Uuid);

impl TxId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for TxId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tx:{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_id_serializes_as_integer() {
        let id = OrderId::from_millis(1_461_000_000_123);
        assert_eq!(serde_json::to_string(&id).unwrap(), "1461000000123");
        let back: OrderId = serde_json::from_str("1461000000123").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn order_id_parse() {
        assert_eq!("42".parse::<OrderId>().unwrap(), OrderId(42));
        assert!("abc".parse::<OrderId>().is_err());
    }

    #[test]
    fn order_id_next_saturates() {
        assert_eq!(OrderId(7).next(), OrderId(8));
        assert_eq!(OrderId(i64::MAX).next(), OrderId(i64::MAX));
    }

    #[test]
    fn tx_id_uniqueness() {
        let a = TxId::new();
        let b = TxId::new();
        assert_ne!(a, b);
        assert!(format!("{a}").starts_with("tx:"));
    }
}
