//! Item lookup and swap execution.
//!
//! [`Matcher::find_item`] is a plain scan over the item index. It does not
//! reserve what it finds: the host commits each invocation atomically, so
//! nothing can observe or claim the item between the lookup and the
//! ownership transfer that follows it within the same invocation.

use swapbook_ledger::StateStore;
use swapbook_types::{Description, Item, OfferProvenance, OrderId, Result, SwapbookError};

use crate::orderbook::OrderBook;
use crate::repository::ItemRepository;

/// Arguments of a swap against an open order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapRequest {
    /// Order being closed.
    pub order_id: OrderId,
    /// User closing the order; receives the creator's item.
    pub closer: String,
    /// Closer's item handed to the order's creator.
    pub closer_item: String,
    /// Shape of the creator's item the closer asks for.
    pub counter: Description,
}

/// What a swap did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwapOutcome {
    /// Ownership of both items changed and the order was removed.
    Executed {
        order_id: OrderId,
        closer_item: String,
        counter_item: String,
    },
    /// No open order has this id; nothing changed.
    OrderNotFound,
    /// The creator owns no item of the requested shape; nothing changed.
    NoCounterItem,
}

impl SwapOutcome {
    #[must_use]
    pub fn is_executed(&self) -> bool {
        matches!(self, Self::Executed { .. })
    }
}

/// Matches descriptions against inventory and performs swaps.
#[derive(Debug, Clone)]
pub struct Matcher {
    items: ItemRepository,
    book: OrderBook,
    provenance: OfferProvenance,
}

impl Matcher {
    #[must_use]
    pub fn new(items: ItemRepository, book: OrderBook, provenance: OfferProvenance) -> Self {
        Self {
            items,
            book,
            provenance,
        }
    }

    #[must_use]
    pub fn items(&self) -> &ItemRepository {
        &self.items
    }

    #[must_use]
    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    /// First item in index order owned by `owner` with the given shape.
    ///
    /// Owner and kind compare case-insensitively, quantity exactly.
    ///
    /// # Errors
    /// - `ItemNotFound` if nothing matches
    pub fn find_item<S: StateStore>(
        &self,
        store: &S,
        owner: &str,
        kind: &str,
        quantity: i64,
    ) -> Result<Item> {
        let index = self.items.load_index(store)?;
        for name in index.iter() {
            let item = self.items.load(store, name)?;
            if item.is_owned_match(owner, kind, quantity) {
                tracing::debug!(item = %item.name, owner = %owner, "Found matching item");
                return Ok(item);
            }
        }
        Err(SwapbookError::ItemNotFound {
            owner: owner.to_string(),
            wanted: Description::new(kind, quantity),
        })
    }

    /// Close an open order: the closer's item goes to the creator and a
    /// creator item of the requested shape goes to the closer.
    ///
    /// A missing order or a missing counter item completes without error
    /// and without writes; the outcome says which.
    ///
    /// # Errors
    /// - `RequirementMismatch` if the closer's item is not what the order wants
    /// - `OfferNotDeclared` under [`OfferProvenance::Declared`] when the
    ///   requested shape is not one of the order's offers
    pub fn execute_swap<S: StateStore>(
        &self,
        store: &mut S,
        req: &SwapRequest,
    ) -> Result<SwapOutcome> {
        let Some(order) = self.book.find_by_id(store, req.order_id)? else {
            tracing::warn!(order = %req.order_id, "Swap requested for unknown order");
            return Ok(SwapOutcome::OrderNotFound);
        };

        let closer_item = self.items.load(store, &req.closer_item)?;
        if !closer_item
            .description()
            .matches(&order.wanted.kind, order.wanted.quantity)
        {
            return Err(SwapbookError::RequirementMismatch {
                item: req.closer_item.clone(),
                offered: closer_item.description(),
                wanted: order.wanted,
            });
        }

        if self.provenance == OfferProvenance::Declared
            && !order.offers(&req.counter.kind, req.counter.quantity)
        {
            return Err(SwapbookError::OfferNotDeclared {
                order: order.id,
                requested: req.counter.clone(),
            });
        }

        let counter = match self.find_item(
            store,
            &order.creator,
            &req.counter.kind,
            req.counter.quantity,
        ) {
            Ok(item) => item,
            Err(SwapbookError::ItemNotFound { .. }) => {
                tracing::warn!(
                    order = %order.id,
                    creator = %order.creator,
                    requested = %req.counter,
                    "No counter item for swap; order left open"
                );
                return Ok(SwapOutcome::NoCounterItem);
            }
            Err(e) => return Err(e),
        };

        self.items.set_owner(store, &req.closer_item, &order.creator)?;
        self.items.set_owner(store, &counter.name, &req.closer)?;
        self.book.remove(store, order.id)?;

        tracing::info!(
            order = %order.id,
            creator = %order.creator,
            closer = %req.closer,
            closer_item = %req.closer_item,
            counter_item = %counter.name,
            "Swap executed"
        );
        Ok(SwapOutcome::Executed {
            order_id: order.id,
            closer_item: req.closer_item.clone(),
            counter_item: counter.name,
        })
    }
}

#[cfg(test)]
mod tests {
    use swapbook_ledger::MemoryStore;
    use swapbook_types::LedgerKeys;

    use super::*;
    use crate::clock::ManualClock;

    fn matcher(provenance: OfferProvenance) -> Matcher {
        let keys = LedgerKeys::default();
        Matcher::new(
            ItemRepository::new(keys.clone()),
            OrderBook::new(keys.open_orders),
            provenance,
        )
    }

    /// Alice holds blue/10 as `A`, Bob holds red/5 as `B` and wants blue/10 for red/5.
    fn setup(m: &Matcher) -> (MemoryStore, OrderId) {
        let mut store = MemoryStore::new();
        m.items()
            .create(&mut store, Item::new("A", "blue", 10, "alice"))
            .unwrap();
        m.items()
            .create(&mut store, Item::new("B", "red", 5, "bob"))
            .unwrap();
        let order = m
            .book()
            .open(
                &mut store,
                &ManualClock::at(1_000),
                "bob",
                Description::new("blue", 10),
                vec![Description::new("red", 5)],
            )
            .unwrap();
        (store, order.id)
    }

    fn request(order_id: OrderId, item: &str, kind: &str, qty: i64) -> SwapRequest {
        SwapRequest {
            order_id,
            closer: "alice".into(),
            closer_item: item.into(),
            counter: Description::new(kind, qty),
        }
    }

    #[test]
    fn find_item_first_in_index_order() {
        let m = matcher(OfferProvenance::Unchecked);
        let mut store = MemoryStore::new();
        m.items()
            .create(&mut store, Item::new("x", "blue", 10, "bob"))
            .unwrap();
        m.items()
            .create(&mut store, Item::new("y", "blue", 10, "bob"))
            .unwrap();
        assert_eq!(m.find_item(&store, "bob", "blue", 10).unwrap().name, "x");
    }

    #[test]
    fn find_item_case_insensitive_exact_quantity() {
        let m = matcher(OfferProvenance::Unchecked);
        let mut store = MemoryStore::new();
        m.items()
            .create(&mut store, Item::new("x", "Blue", 10, "Bob"))
            .unwrap();
        assert!(m.find_item(&store, "BOB", "bLUE", 10).is_ok());
        let err = m.find_item(&store, "bob", "blue", 9).unwrap_err();
        assert!(matches!(err, SwapbookError::ItemNotFound { .. }));
    }

    #[test]
    fn find_item_does_not_reserve() {
        let m = matcher(OfferProvenance::Unchecked);
        let (store, _) = setup(&m);
        let first = m.find_item(&store, "bob", "red", 5).unwrap();
        let second = m.find_item(&store, "bob", "red", 5).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn swap_transfers_both_items_and_removes_order() {
        let m = matcher(OfferProvenance::Unchecked);
        let (mut store, id) = setup(&m);

        let outcome = m
            .execute_swap(&mut store, &request(id, "A", "red", 5))
            .unwrap();
        assert_eq!(
            outcome,
            SwapOutcome::Executed {
                order_id: id,
                closer_item: "A".into(),
                counter_item: "B".into(),
            }
        );
        assert_eq!(m.items().load(&store, "A").unwrap().owner, "bob");
        assert_eq!(m.items().load(&store, "B").unwrap().owner, "alice");
        assert!(m.book().load(&store).unwrap().is_empty());
    }

    #[test]
    fn swap_unknown_order_is_noop() {
        let m = matcher(OfferProvenance::Unchecked);
        let (mut store, _) = setup(&m);
        let before = store.snapshot();

        let outcome = m
            .execute_swap(&mut store, &request(OrderId(1), "A", "red", 5))
            .unwrap();
        assert_eq!(outcome, SwapOutcome::OrderNotFound);
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn swap_requirement_mismatch() {
        let m = matcher(OfferProvenance::Unchecked);
        let (mut store, id) = setup(&m);
        m.items()
            .create(&mut store, Item::new("C", "blue", 11, "alice"))
            .unwrap();
        let before = store.snapshot();

        let err = m
            .execute_swap(&mut store, &request(id, "C", "red", 5))
            .unwrap_err();
        assert!(matches!(err, SwapbookError::RequirementMismatch { .. }));
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn swap_requirement_kind_is_case_insensitive() {
        let m = matcher(OfferProvenance::Unchecked);
        let (mut store, id) = setup(&m);
        m.items()
            .create(&mut store, Item::new("C", "BLUE", 10, "alice"))
            .unwrap();
        let outcome = m
            .execute_swap(&mut store, &request(id, "C", "RED", 5))
            .unwrap();
        assert!(outcome.is_executed());
    }

    #[test]
    fn swap_without_counter_item_is_noop() {
        let m = matcher(OfferProvenance::Unchecked);
        let (mut store, id) = setup(&m);
        let before = store.snapshot();

        let outcome = m
            .execute_swap(&mut store, &request(id, "A", "green", 1))
            .unwrap();
        assert_eq!(outcome, SwapOutcome::NoCounterItem);
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn unchecked_provenance_accepts_undeclared_item() {
        let m = matcher(OfferProvenance::Unchecked);
        let (mut store, id) = setup(&m);
        m.items()
            .create(&mut store, Item::new("G", "green", 1, "bob"))
            .unwrap();

        let outcome = m
            .execute_swap(&mut store, &request(id, "A", "green", 1))
            .unwrap();
        assert!(outcome.is_executed());
        assert_eq!(m.items().load(&store, "G").unwrap().owner, "alice");
        assert_eq!(m.items().load(&store, "B").unwrap().owner, "bob");
    }

    #[test]
    fn declared_provenance_rejects_undeclared_item() {
        let m = matcher(OfferProvenance::Declared);
        let (mut store, id) = setup(&m);
        m.items()
            .create(&mut store, Item::new("G", "green", 1, "bob"))
            .unwrap();
        let before = store.snapshot();

        let err = m
            .execute_swap(&mut store, &request(id, "A", "green", 1))
            .unwrap_err();
        assert!(matches!(err, SwapbookError::OfferNotDeclared { .. }));
        assert_eq!(store.snapshot(), before);

        let outcome = m
            .execute_swap(&mut store, &request(id, "A", "red", 5))
            .unwrap();
        assert!(outcome.is_executed());
    }
}
