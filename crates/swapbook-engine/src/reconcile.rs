//! Order book reconciliation.
//!
//! Inventory changes (deletes, ownership transfers, swaps) can leave open
//! orders offering items their creators no longer hold. [`reconcile`]
//! re-checks every offer of every order, drops the offers that no longer
//! resolve, and drops orders left with nothing to offer.
//!
//! Survivors are collected into fresh vectors rather than removed in place,
//! so no offer or order is skipped or visited twice.

use swapbook_ledger::StateStore;
use swapbook_types::{OpenOrder, Result, SwapbookError};

use crate::matcher::Matcher;

/// What a reconciliation pass removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Offers dropped from orders (including those of removed orders).
    pub offers_pruned: usize,
    /// Orders dropped because no offer survived.
    pub orders_removed: usize,
    /// Whether the order book was rewritten.
    pub persisted: bool,
}

impl ReconcileReport {
    #[must_use]
    pub fn changed(&self) -> bool {
        self.offers_pruned > 0 || self.orders_removed > 0
    }
}

/// Prune unfulfillable offers and empty orders. Writes the order book only
/// if something was removed.
pub fn reconcile<S: StateStore>(matcher: &Matcher, store: &mut S) -> Result<ReconcileReport> {
    let mut book = matcher.book().load(store)?;
    let mut report = ReconcileReport::default();

    let mut survivors: Vec<OpenOrder> = Vec::with_capacity(book.len());
    for mut order in std::mem::take(&mut book.open_orders) {
        let offered = std::mem::take(&mut order.offered);
        let mut kept = Vec::with_capacity(offered.len());

        for offer in offered {
            match matcher.find_item(store, &order.creator, &offer.kind, offer.quantity) {
                Ok(_) => kept.push(offer),
                Err(SwapbookError::ItemNotFound { .. }) => {
                    tracing::debug!(
                        order = %order.id,
                        creator = %order.creator,
                        offer = %offer,
                        "Pruning offer no longer held by creator"
                    );
                    report.offers_pruned += 1;
                }
                Err(e) => return Err(e),
            }
        }

        if kept.is_empty() {
            tracing::warn!(
                order = %order.id,
                creator = %order.creator,
                "Removing order with no valid offers"
            );
            report.orders_removed += 1;
            continue;
        }
        order.offered = kept;
        survivors.push(order);
    }

    if report.changed() {
        book.open_orders = survivors;
        matcher.book().save(store, &book)?;
        report.persisted = true;
        tracing::info!(
            offers_pruned = report.offers_pruned,
            orders_removed = report.orders_removed,
            remaining = book.len(),
            "Order book reconciled"
        );
    } else {
        tracing::debug!(orders = survivors.len(), "All open orders are fine");
    }
    Ok(report)
}
