//! # swapbook-ingress
//!
//! **Invocation ingress**: positional argument validation, function
//! dispatch, and the per-invocation commit boundary.
//!
//! ## Invocation Flow
//!
//! ```text
//! Host.invoke(function, args)
//!     → Transaction.begin()
//!     → Dispatcher: Args validation → Engine operation → reconcile
//!     → Transaction.commit()  (or rollback on any error)
//! ```
//!
//! Read-only functions (`read`, `list_items`) can also be served through
//! [`Host::query`] without opening a transaction.

pub mod args;
pub mod dispatcher;
pub mod host;

pub use args::Args;
pub use dispatcher::{Dispatcher, Function};
pub use host::{Host, Invocation};
