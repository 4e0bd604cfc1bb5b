//! The key-value state store contract consumed by the engine.
//!
//! The host ledger exposes only `get`, `put` and `delete`. There is no
//! listing primitive, which is why the engine maintains its own item index.

use std::collections::{BTreeMap, HashSet};

use swapbook_types::{Result, SwapbookError};

use crate::transaction::{WriteOp, WriteSet};

/// Synchronous key-value state store.
pub trait StateStore {
    /// Read the value at `key`, or `None` if absent.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Write `value` at `key`, replacing any previous value.
    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<()>;

    /// Remove `key`. Removing an absent key is not an error.
    fn delete(&mut self, key: &str) -> Result<()>;

    /// Apply `writes` in order, all or nothing. On error the store is left
    /// as it was.
    fn apply(&mut self, writes: &WriteSet) -> Result<()>;
}

impl<S: StateStore + ?Sized> StateStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<()> {
        (**self).put(key, value)
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        (**self).delete(key)
    }

    fn apply(&mut self, writes: &WriteSet) -> Result<()> {
        (**self).apply(writes)
    }
}

/// In-memory state store.
///
/// Keys are kept sorted so snapshots compare deterministically. Individual
/// keys can be made to fail to exercise host I/O error paths.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, Vec<u8>>,
    failing: HashSet<String>,
    writes: u64,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every operation on `key` fail with [`SwapbookError::Store`].
    pub fn fail_on(&mut self, key: &str) {
        self.failing.insert(key.to_string());
    }

    /// Clear all injected failures.
    pub fn heal(&mut self) {
        self.failing.clear();
    }

    /// Number of successful `put`/`delete` calls so far.
    #[must_use]
    pub fn write_count(&self) -> u64 {
        self.writes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Sorted copy of the full contents.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<String, Vec<u8>> {
        self.entries.clone()
    }

    fn check(&self, key: &str) -> Result<()> {
        if self.failing.contains(key) {
            return Err(SwapbookError::store(key, "injected failure"));
        }
        Ok(())
    }
}

impl StateStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.check(key)?;
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<()> {
        self.check(key)?;
        self.entries.insert(key.to_string(), value);
        self.writes += 1;
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        self.check(key)?;
        self.entries.remove(key);
        self.writes += 1;
        Ok(())
    }

    fn apply(&mut self, writes: &WriteSet) -> Result<()> {
        let mut staged = self.entries.clone();
        for op in writes.ops() {
            self.check(op.key())?;
            match op {
                WriteOp::Put { key, value } => {
                    staged.insert(key.clone(), value.clone());
                }
                WriteOp::Delete { key } => {
                    staged.remove(key);
                }
            }
        }
        self.entries = staged;
        self.writes += writes.len() as u64;
        Ok(())
    }
}
