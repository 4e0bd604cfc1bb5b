//! Order id generation.
//!
//! Ids are derived from a millisecond clock, as the ledger's existing
//! records expect. A bare clock reading collides when two orders are opened
//! within the same millisecond, so the generator never hands out an id at
//! or below the highest id already in the book.

use swapbook_types::{OrderBookRecord, OrderId};

/// Source of wall-clock milliseconds.
pub trait Clock {
    fn now_millis(&self) -> i64;
}

/// UTC system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_millis(&self) -> i64 {
        (**self).now_millis()
    }
}

/// Next free order id: the clock reading, bumped past every live id.
#[must_use]
pub fn next_order_id<C: Clock>(clock: &C, book: &OrderBookRecord) -> OrderId {
    let now = OrderId::from_millis(clock.now_millis());
    match book.max_id() {
        Some(max) if max >= now => max.next(),
        _ => now,
    }
}

/// Clock that only moves when told to.
#[cfg(any(test, feature = "test-helpers"))]
#[derive(Debug, Default)]
pub struct ManualClock(std::cell::Cell<i64>);

#[cfg(any(test, feature = "test-helpers"))]
impl ManualClock {
    pub fn at(ms: i64) -> Self {
        Self(std::cell::Cell::new(ms))
    }

    pub fn advance(&self, ms: i64) {
        self.0.set(self.0.get() + ms);
    }
}

#[cfg(any(test, feature = "test-helpers"))]
impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.0.get()
    }
}
