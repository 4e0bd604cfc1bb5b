//! System-wide constants for the swapbook engine.

/// Reserved key holding the JSON array of every live item name.
pub const ITEM_INDEX_KEY: &str = "_betindex";

/// Reserved key holding the aggregate of all open trade orders.
pub const OPEN_ORDERS_KEY: &str = "_opentrades";

/// Positional arguments taken by `create_item`.
pub const CREATE_ITEM_ARGS: usize = 4;

/// Minimum positional arguments for `open_order`: creator, wanted pair, one offered pair.
pub const MIN_OPEN_ORDER_ARGS: usize = 5;

/// Positional arguments of `execute_swap`.
pub const EXECUTE_SWAP_ARGS: usize = 5;

/// Legacy `execute_swap` layout that also carries the opener's user id.
pub const LEGACY_EXECUTE_SWAP_ARGS: usize = 6;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "Swapbook";
