//! Item and description records.
//!
//! An [`Item`] is stored under its own name. A missing or partially
//! populated record decodes to the empty item, which is how "absent"
//! resolves at the call sites that tolerate it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Case-insensitive comparison used for kinds and owner identifiers.
#[must_use]
pub fn eq_fold(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

/// A `(kind, quantity)` pair: what an order wants, or one entry it offers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Description {
    #[serde(alias = "color")]
    pub kind: String,
    #[serde(alias = "amount", alias = "size")]
    pub quantity: i64,
}

impl Description {
    #[must_use]
    pub fn new(kind: impl Into<String>, quantity: i64) -> Self {
        Self {
            kind: kind.into(),
            quantity,
        }
    }

    /// Kind compared case-insensitively, quantity exactly.
    #[must_use]
    pub fn matches(&self, kind: &str, quantity: i64) -> bool {
        self.quantity == quantity && eq_fold(&self.kind, kind)
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x{}", self.kind, self.quantity)
    }
}

/// A uniquely named, owned item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Item {
    pub name: String,
    #[serde(alias = "color")]
    pub kind: String,
    #[serde(alias = "size")]
    pub quantity: i64,
    #[serde(alias = "user")]
    pub owner: String,
}

impl Item {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        kind: impl Into<String>,
        quantity: i64,
        owner: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            quantity,
            owner: owner.into(),
        }
    }

    /// The `(kind, quantity)` shape of this item.
    #[must_use]
    pub fn description(&self) -> Description {
        Description::new(self.kind.clone(), self.quantity)
    }

    /// Returns `true` if `owner` owns this item and it has the given shape.
    #[must_use]
    pub fn is_owned_match(&self, owner: &str, kind: &str, quantity: i64) -> bool {
        eq_fold(&self.owner, owner) && self.description().matches(kind, quantity)
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Item {
    pub fn dummy(name: &str, owner: &str) -> Self {
        Self::new(name, "blue", 10, owner)
    }
}
