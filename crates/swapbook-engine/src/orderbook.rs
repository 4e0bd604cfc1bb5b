//! The open order book.
//!
//! All open orders are persisted together as one [`OrderBookRecord`] under
//! a reserved key. Orders keep insertion order; removal keeps the relative
//! order of the rest.

use swapbook_ledger::StateStore;
use swapbook_types::codec::encode;
use swapbook_types::{Description, OpenOrder, OrderBookRecord, OrderId, Result, SwapbookError};

use crate::clock::{Clock, next_order_id};
use crate::record::load_record;

/// Append / lookup / remove over the persisted order book.
#[derive(Debug, Clone)]
pub struct OrderBook {
    key: String,
}

impl OrderBook {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    // =================================================================
    // Mutation
    // =================================================================

    /// Open a new order with a fresh id and append it to the book.
    ///
    /// # Errors
    /// - `InvalidOrder` if `offered` is empty
    pub fn open<S: StateStore, C: Clock>(
        &self,
        store: &mut S,
        clock: &C,
        creator: &str,
        wanted: Description,
        offered: Vec<Description>,
    ) -> Result<OpenOrder> {
        let mut book = self.load(store)?;
        let id = next_order_id(clock, &book);
        if book.find(id).is_some() {
            return Err(SwapbookError::DuplicateOrder(id));
        }

        let order = OpenOrder::new(creator, id, wanted, offered)?;
        book.open_orders.push(order.clone());
        self.save(store, &book)?;

        tracing::info!(
            order = %order.id,
            creator = %order.creator,
            wanted = %order.wanted,
            offers = order.offered.len(),
            "Order opened"
        );
        Ok(order)
    }

    /// Remove the first order with `id`. Absent ids are a silent no-op and
    /// cause no write.
    pub fn remove<S: StateStore>(&self, store: &mut S, id: OrderId) -> Result<Option<OpenOrder>> {
        let mut book = self.load(store)?;
        let Some(order) = book.remove(id) else {
            tracing::debug!(order = %id, "Order to remove not found");
            return Ok(None);
        };
        self.save(store, &book)?;

        tracing::info!(order = %id, remaining = book.len(), "Order removed");
        Ok(Some(order))
    }

    /// Reset the book to empty.
    pub fn clear<S: StateStore>(&self, store: &mut S) -> Result<()> {
        self.save(store, &OrderBookRecord::default())
    }

    // =================================================================
    // Queries
    // =================================================================

    /// Linear scan for the order with `id`.
    pub fn find_by_id<S: StateStore>(&self, store: &S, id: OrderId) -> Result<Option<OpenOrder>> {
        Ok(self.load(store)?.find(id).cloned())
    }

    /// The persisted book; empty if never written or undecodable.
    pub fn load<S: StateStore>(&self, store: &S) -> Result<OrderBookRecord> {
        load_record(store, &self.key)
    }

    pub fn save<S: StateStore>(&self, store: &mut S, book: &OrderBookRecord) -> Result<()> {
        store.put(&self.key, encode(book)?)
    }
}
