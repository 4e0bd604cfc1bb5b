//! # swapbook-engine
//!
//! **Item bookkeeping and swap matching for swapbook.**
//!
//! The engine runs inside one host invocation at a time and keeps all of
//! its state in the host's key-value store:
//!
//! - **Item repository**: item records plus the item index the store cannot provide
//! - **Order book**: every open order in one aggregate record
//! - **Matcher**: item lookup by owner and shape, and swap execution
//! - **Reconciler**: prunes offers and orders that inventory no longer backs

pub mod clock;
pub mod engine;
pub mod matcher;
pub mod orderbook;
pub mod reconcile;
mod record;
pub mod repository;

pub use clock::{Clock, SystemClock, next_order_id};
#[cfg(any(test, feature = "test-helpers"))]
pub use clock::ManualClock;
pub use engine::Engine;
pub use matcher::{Matcher, SwapOutcome, SwapRequest};
pub use orderbook::OrderBook;
pub use reconcile::{ReconcileReport, reconcile};
pub use repository::ItemRepository;
