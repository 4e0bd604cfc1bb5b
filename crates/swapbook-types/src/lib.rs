//! # swapbook-types
//!
//! Shared records, errors, and configuration for the **swapbook** engine.
//!
//! This crate is the leaf dependency of the workspace; every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`OrderId`], [`TxId`]
//! - **Item model**: [`Item`], [`Description`], [`ItemIndex`]
//! - **Order model**: [`OpenOrder`], [`OrderBookRecord`]
//! - **Configuration**: [`EngineConfig`], [`LedgerKeys`], [`OfferProvenance`]
//! - **Errors**: [`SwapbookError`] with `SB_ERR_` prefix codes
//! - **Wire codec**: [`codec`] helpers for the JSON record format
//! - **Constants**: reserved keys and dispatch arities

pub mod codec;
pub mod config;
pub mod constants;
pub mod error;
pub mod ids;
pub mod index;
pub mod item;
pub mod order;

// Re-export all primary types at crate root for ergonomic imports:
//   use swapbook_types::{Item, OpenOrder, SwapbookError, ...};

pub use config::*;
pub use error::*;
pub use ids::*;
pub use index::*;
pub use item::*;
pub use order::*;

// Constants are accessed via `swapbook_types::constants::FOO`
// (not re-exported to avoid name collisions).
