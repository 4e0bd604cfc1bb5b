//! Configuration types for the swapbook engine.

use serde::{Deserialize, Serialize};

use crate::{Result, SwapbookError, constants};

/// Reserved state keys for the two aggregate records.
///
/// Item names share the key space with these, so an item may never be
/// created under either key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerKeys {
    /// Key of the ItemIndex (JSON array of live item names).
    pub item_index: String,
    /// Key of the OrderBook aggregate.
    pub open_orders: String,
}

impl LedgerKeys {
    /// Returns `true` if `key` is one of the reserved aggregate keys.
    #[must_use]
    pub fn is_reserved(&self, key: &str) -> bool {
        key == self.item_index || key == self.open_orders
    }
}

impl Default for LedgerKeys {
    fn default() -> Self {
        Self {
            item_index: constants::ITEM_INDEX_KEY.to_string(),
            open_orders: constants::OPEN_ORDERS_KEY.to_string(),
        }
    }
}

/// Which of the order creator's items may be handed over by a swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferProvenance {
    /// Any item of the requested shape owned by the creator qualifies,
    /// whether or not the order declared it as an offer.
    #[default]
    Unchecked,
    /// The requested shape must be one of the order's declared offers.
    Declared,
}

/// Engine-wide configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Reserved aggregate keys.
    #[serde(default)]
    pub keys: LedgerKeys,
    /// Offer provenance policy applied by `execute_swap`.
    #[serde(default)]
    pub offer_provenance: OfferProvenance,
}

impl EngineConfig {
    /// Check that the reserved keys are usable.
    pub fn validate(&self) -> Result<()> {
        if self.keys.item_index.is_empty() || self.keys.open_orders.is_empty() {
            return Err(SwapbookError::Configuration(
                "reserved keys must be non-empty".to_string(),
            ));
        }
        if self.keys.item_index == self.keys.open_orders {
            return Err(SwapbookError::Configuration(format!(
                "item index and order book share key {}",
                self.keys.item_index
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_keys() {
        let keys = LedgerKeys::default();
        assert_eq!(keys.item_index, "_betindex");
        assert_eq!(keys.open_orders, "_opentrades");
        assert!(keys.is_reserved("_betindex"));
        assert!(!keys.is_reserved("bet1"));
    }

    #[test]
    fn default_config_is_valid_and_unchecked() {
        let cfg = EngineConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.offer_provenance, OfferProvenance::Unchecked);
    }

    #[test]
    fn shared_keys_rejected() {
        let mut cfg = EngineConfig::default();
        cfg.keys.open_orders = cfg.keys.item_index.clone();
        assert!(matches!(
            cfg.validate(),
            Err(SwapbookError::Configuration(_))
        ));
    }

    #[test]
    fn config_from_partial_json() {
        let cfg: EngineConfig =
            serde_json::from_str(r#"{"offer_provenance":"declared"}"#).unwrap();
        assert_eq!(cfg.offer_provenance, OfferProvenance::Declared);
        assert_eq!(cfg.keys, LedgerKeys::default());
    }
}
