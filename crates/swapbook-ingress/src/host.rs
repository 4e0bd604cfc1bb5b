//! Host invocation boundary.
//!
//! A [`Host`] owns the state store and runs every mutating call inside a
//! [`Transaction`]: the call's writes reach the store only if the whole
//! call succeeds, reconciliation included.

use swapbook_engine::{Clock, Engine, SystemClock};
use swapbook_ledger::{StateStore, Transaction, WriteSet};
use swapbook_types::{EngineConfig, Result, TxId};

use crate::dispatcher::Dispatcher;

/// Result of one committed invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub tx_id: TxId,
    /// Bytes returned to the caller, if the function returns any.
    pub payload: Option<Vec<u8>>,
    /// Writes applied to the store, in issue order.
    pub write_set: WriteSet,
}

/// A state store together with the dispatcher that serves it.
#[derive(Debug)]
pub struct Host<S: StateStore, C: Clock = SystemClock> {
    store: S,
    dispatcher: Dispatcher<C>,
}

impl<S: StateStore> Host<S, SystemClock> {
    pub fn new(store: S, config: EngineConfig) -> Result<Self> {
        Ok(Self::with_dispatcher(store, Dispatcher::new(config)?))
    }
}

impl<S: StateStore, C: Clock> Host<S, C> {
    #[must_use]
    pub fn with_dispatcher(store: S, dispatcher: Dispatcher<C>) -> Self {
        Self { store, dispatcher }
    }

    #[must_use]
    pub fn with_engine(store: S, engine: Engine<C>) -> Self {
        Self::with_dispatcher(store, Dispatcher::with_engine(engine))
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn dispatcher(&self) -> &Dispatcher<C> {
        &self.dispatcher
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Run one invocation atomically.
    ///
    /// On error nothing is written and the error is returned unchanged.
    pub fn invoke(&mut self, function: &str, args: &[&str]) -> Result<Invocation> {
        let tx_id = TxId::new();
        let span = tracing::info_span!("invoke", tx = %tx_id, function = %function);
        let _enter = span.enter();

        let mut tx = Transaction::begin(&mut self.store);
        match self.dispatcher.invoke(&mut tx, function, args) {
            Ok(payload) => {
                let write_set = tx.commit()?;
                tracing::info!(
                    writes = write_set.len(),
                    digest = %write_set.digest_hex(),
                    "Invocation committed"
                );
                Ok(Invocation {
                    tx_id,
                    payload,
                    write_set,
                })
            }
            Err(e) => {
                tx.rollback();
                tracing::warn!(error = %e, "Invocation rejected");
                Err(e)
            }
        }
    }

    /// Run a read-only function directly against the store.
    pub fn query(&self, function: &str, args: &[&str]) -> Result<Option<Vec<u8>>> {
        self.dispatcher.query(&self.store, function, args)
    }
}
