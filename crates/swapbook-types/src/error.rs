//! Error types for the swapbook engine.
//!
//! All errors use the `SB_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Argument / dispatch errors
//! - 2xx: Item errors
//! - 3xx: Order errors
//! - 4xx: Matching errors
//! - 6xx: Ledger / state store errors
//! - 9xx: General / internal errors

use thiserror::Error;

use crate::{Description, OrderId};

/// Central error enum for all swapbook operations.
#[derive(Debug, Error)]
pub enum SwapbookError {
    // =================================================================
    // Argument / Dispatch Errors (1xx)
    // =================================================================
    /// Wrong number of positional arguments for a function.
    #[error("SB_ERR_100: Incorrect number of arguments for {function}: expecting {expected}, got {actual}")]
    ArgumentCount {
        function: String,
        expected: String,
        actual: usize,
    },

    /// An argument could not be parsed (e.g. non-numeric quantity).
    #[error("SB_ERR_101: Argument {position} of {function} is invalid: {reason}")]
    ArgumentFormat {
        function: String,
        position: usize,
        reason: String,
    },

    /// The requested function name is not routed by the dispatcher.
    #[error("SB_ERR_102: Received unknown function: {0}")]
    UnknownFunction(String),

    /// A key collides with one of the reserved aggregate keys.
    #[error("SB_ERR_103: Key is reserved: {0}")]
    ReservedKey(String),

    // =================================================================
    // Item Errors (2xx)
    // =================================================================
    /// An item with this name already exists.
    #[error("SB_ERR_200: Item already exists: {0}")]
    AlreadyExists(String),

    /// No item matched the lookup.
    #[error("SB_ERR_201: No item owned by {owner} matches {wanted}")]
    ItemNotFound { owner: String, wanted: Description },

    // =================================================================
    // Order Errors (3xx)
    // =================================================================
    /// The order failed validation.
    #[error("SB_ERR_300: Invalid order: {reason}")]
    InvalidOrder { reason: String },

    /// An order with this ID is already open.
    #[error("SB_ERR_301: Order already exists: {0}")]
    DuplicateOrder(OrderId),

    // =================================================================
    // Matching Errors (4xx)
    // =================================================================
    /// The closer's item does not satisfy the order's wanted description.
    #[error("SB_ERR_400: Item {item} ({offered}) does not meet order requirement {wanted}")]
    RequirementMismatch {
        item: String,
        offered: Description,
        wanted: Description,
    },

    /// The requested counter item is not among the order's declared offers.
    #[error("SB_ERR_401: Order {order} does not offer {requested}")]
    OfferNotDeclared {
        order: OrderId,
        requested: Description,
    },

    // =================================================================
    // Ledger / Store Errors (6xx)
    // =================================================================
    /// The host state store failed a get/put/delete.
    #[error("SB_ERR_600: State store failure on {key}: {reason}")]
    Store { key: String, reason: String },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("SB_ERR_900: Internal error: {0}")]
    Internal(String),

    /// Serialization / deserialization error.
    #[error("SB_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// Configuration error (duplicate or empty reserved keys, etc.).
    #[error("SB_ERR_902: Configuration error: {0}")]
    Configuration(String),
}

impl SwapbookError {
    /// Shorthand for an [`SwapbookError::ArgumentFormat`] error.
    pub fn argument_format(function: &str, position: usize, reason: impl Into<String>) -> Self {
        Self::ArgumentFormat {
            function: function.to_string(),
            position,
            reason: reason.into(),
        }
    }

    /// Shorthand for a [`SwapbookError::Store`] error.
    pub fn store(key: &str, reason: impl std::fmt::Display) -> Self {
        Self::Store {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, SwapbookError>;

impl From<serde_json::Error> for SwapbookError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_contains_prefix() {
        let err = SwapbookError::AlreadyExists("bet1".into());
        let msg = format!("{err}");
        assert!(msg.starts_with("SB_ERR_200"), "Got: {msg}");
        assert!(msg.contains("bet1"));
    }

    #[test]
    fn requirement_mismatch_display() {
        let err = SwapbookError::RequirementMismatch {
            item: "bet1".into(),
            offered: Description::new("red", 5),
            wanted: Description::new("blue", 10),
        };
        let msg = format!("{err}");
        assert!(msg.contains("SB_ERR_400"));
        assert!(msg.contains("red x5"));
        assert!(msg.contains("blue x10"));
    }

    #[test]
    fn json_error_maps_to_serialization() {
        let err: SwapbookError = serde_json::from_str::<Vec<String>>("{not json")
            .unwrap_err()
            .into();
        assert!(matches!(err, SwapbookError::Serialization(_)));
    }

    #[test]
    fn all_errors_have_sb_err_prefix() {
        let errors: Vec<Box<dyn std::error::Error>> = vec![
            Box::new(SwapbookError::UnknownFunction("nope".into())),
            Box::new(SwapbookError::argument_format("open_order", 3, "not a number")),
            Box::new(SwapbookError::store("_betindex", "disk gone")),
            Box::new(SwapbookError::OfferNotDeclared {
                order: OrderId(1),
                requested: Description::new("red", 5),
            }),
            Box::new(SwapbookError::Internal("test".into())),
        ];
        for err in errors {
            let msg = format!("{err}");
            assert!(
                msg.starts_with("SB_ERR_"),
                "Error missing SB_ERR_ prefix: {msg}"
            );
        }
    }
}
