//! The engine facade: one configured set of components over a store.

use swapbook_ledger::StateStore;
use swapbook_types::{
    Description, EngineConfig, Item, ItemIndex, OpenOrder, OrderBookRecord, OrderId, Result,
};

use crate::clock::{Clock, SystemClock};
use crate::matcher::{Matcher, SwapOutcome, SwapRequest};
use crate::orderbook::OrderBook;
use crate::reconcile::{ReconcileReport, reconcile};
use crate::repository::ItemRepository;

/// Item repository, order book, matcher and reconciler sharing one
/// configuration and clock.
///
/// The engine holds no state of its own; every call reads and writes the
/// store passed to it.
#[derive(Debug, Clone)]
pub struct Engine<C: Clock = SystemClock> {
    config: EngineConfig,
    matcher: Matcher,
    clock: C,
}

impl Engine<SystemClock> {
    /// Engine on the system clock.
    pub fn new(config: EngineConfig) -> Result<Self> {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> Engine<C> {
    /// Engine on a caller-supplied clock.
    ///
    /// # Errors
    /// - `Configuration` if the reserved keys are empty or shared
    pub fn with_clock(config: EngineConfig, clock: C) -> Result<Self> {
        config.validate()?;
        let matcher = Matcher::new(
            ItemRepository::new(config.keys.clone()),
            OrderBook::new(config.keys.open_orders.clone()),
            config.offer_provenance,
        );
        Ok(Self {
            config,
            matcher,
            clock,
        })
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // =================================================================
    // Items
    // =================================================================

    pub fn create_item<S: StateStore>(&self, store: &mut S, item: Item) -> Result<()> {
        self.matcher.items().create(store, item)
    }

    pub fn read<S: StateStore>(&self, store: &S, key: &str) -> Result<Option<Vec<u8>>> {
        self.matcher.items().read(store, key)
    }

    pub fn load_item<S: StateStore>(&self, store: &S, name: &str) -> Result<Item> {
        self.matcher.items().load(store, name)
    }

    pub fn list_items<S: StateStore>(&self, store: &S) -> Result<Vec<Item>> {
        self.matcher.items().list(store)
    }

    pub fn item_index<S: StateStore>(&self, store: &S) -> Result<ItemIndex> {
        self.matcher.items().load_index(store)
    }

    pub fn set_owner<S: StateStore>(&self, store: &mut S, name: &str, owner: &str) -> Result<Item> {
        self.matcher.items().set_owner(store, name, owner)
    }

    pub fn delete_item<S: StateStore>(&self, store: &mut S, name: &str) -> Result<bool> {
        self.matcher.items().delete(store, name)
    }

    // =================================================================
    // Orders
    // =================================================================

    pub fn open_order<S: StateStore>(
        &self,
        store: &mut S,
        creator: &str,
        wanted: Description,
        offered: Vec<Description>,
    ) -> Result<OpenOrder> {
        self.matcher
            .book()
            .open(store, &self.clock, creator, wanted, offered)
    }

    pub fn remove_order<S: StateStore>(
        &self,
        store: &mut S,
        id: OrderId,
    ) -> Result<Option<OpenOrder>> {
        self.matcher.book().remove(store, id)
    }

    pub fn find_order<S: StateStore>(&self, store: &S, id: OrderId) -> Result<Option<OpenOrder>> {
        self.matcher.book().find_by_id(store, id)
    }

    pub fn order_book<S: StateStore>(&self, store: &S) -> Result<OrderBookRecord> {
        self.matcher.book().load(store)
    }

    // =================================================================
    // Matching
    // =================================================================

    pub fn find_item<S: StateStore>(
        &self,
        store: &S,
        owner: &str,
        kind: &str,
        quantity: i64,
    ) -> Result<Item> {
        self.matcher.find_item(store, owner, kind, quantity)
    }

    pub fn execute_swap<S: StateStore>(
        &self,
        store: &mut S,
        req: &SwapRequest,
    ) -> Result<SwapOutcome> {
        self.matcher.execute_swap(store, req)
    }

    pub fn reconcile<S: StateStore>(&self, store: &mut S) -> Result<ReconcileReport> {
        reconcile(&self.matcher, store)
    }

    // =================================================================
    // Maintenance
    // =================================================================

    /// Reset the item index and the order book to empty. Item records are
    /// left in place.
    pub fn reset<S: StateStore>(&self, store: &mut S) -> Result<()> {
        self.matcher.items().clear_index(store)?;
        self.matcher.book().clear(store)?;
        tracing::info!("Ledger aggregates reset");
        Ok(())
    }
}
