//! # swapbook-ledger
//!
//! **Host ledger plumbing**: the key-value state store contract and the
//! per-invocation transaction that gives every invocation all-or-nothing
//! effects.
//!
//! ## Architecture
//!
//! The host runtime invokes the engine once per submitted transaction:
//! 1. A [`Transaction`] is opened over the [`StateStore`]
//! 2. The engine reads and writes through the transaction
//! 3. On success the buffered [`WriteSet`] is committed in issue order
//! 4. On failure the buffered writes are discarded
//!
//! [`MemoryStore`] is the in-process store used by tests and tooling.

pub mod store;
pub mod transaction;

pub use store::{MemoryStore, StateStore};
pub use transaction::{Transaction, WriteOp, WriteSet};
