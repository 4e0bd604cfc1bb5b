//! Per-invocation transactions over a [`StateStore`].
//!
//! A [`Transaction`] buffers every write made during one invocation. Reads
//! see the buffered writes first. On commit the buffered operations are
//! handed to [`StateStore::apply`] in the order they were issued, so the
//! base store takes all of them or none. Dropping or rolling back discards
//! them, so a failed invocation leaves no trace.
//!
//! The ordered write log doubles as the invocation's [`WriteSet`], whose
//! digest lets two replicas check they produced the same effects.

use std::collections::BTreeMap;

use sha2::{Digest, Sha256};
use swapbook_types::Result;

use crate::store::StateStore;

/// One buffered write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOp {
    Put { key: String, value: Vec<u8> },
    Delete { key: String },
}

impl WriteOp {
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Put { key, .. } | Self::Delete { key } => key,
        }
    }
}

/// The ordered writes of one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteSet {
    ops: Vec<WriteOp>,
}

impl WriteSet {
    /// Append one operation.
    pub fn push(&mut self, op: WriteOp) {
        self.ops.push(op);
    }

    #[must_use]
    pub fn ops(&self) -> &[WriteOp] {
        &self.ops
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Deterministic SHA-256 over the ordered operations.
    #[must_use]
    pub fn digest(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(b"swapbook:write_set:v1:");
        hasher.update((self.ops.len() as u64).to_le_bytes());

        for op in &self.ops {
            match op {
                WriteOp::Put { key, value } => {
                    hasher.update([0u8]);
                    hasher.update((key.len() as u64).to_le_bytes());
                    hasher.update(key.as_bytes());
                    hasher.update((value.len() as u64).to_le_bytes());
                    hasher.update(value);
                }
                WriteOp::Delete { key } => {
                    hasher.update([1u8]);
                    hasher.update((key.len() as u64).to_le_bytes());
                    hasher.update(key.as_bytes());
                }
            }
        }

        let result = hasher.finalize();
        let mut out = [0u8; 32];
        out.copy_from_slice(&result);
        out
    }

    /// Hex form of [`WriteSet::digest`], as logged.
    #[must_use]
    pub fn digest_hex(&self) -> String {
        hex::encode(self.digest())
    }
}

/// Buffered view of a base store for the duration of one invocation.
pub struct Transaction<'a, S: StateStore> {
    base: &'a mut S,
    /// Latest buffered state per key (`None` = deleted).
    pending: BTreeMap<String, Option<Vec<u8>>>,
    log: WriteSet,
}

impl<'a, S: StateStore> Transaction<'a, S> {
    /// Open a transaction over `base`.
    pub fn begin(base: &'a mut S) -> Self {
        Self {
            base,
            pending: BTreeMap::new(),
            log: WriteSet::default(),
        }
    }

    /// Writes buffered so far.
    #[must_use]
    pub fn write_set(&self) -> &WriteSet {
        &self.log
    }

    /// Apply the buffered writes to the base store and return them.
    ///
    /// If the base store rejects any write, none of them are applied.
    pub fn commit(self) -> Result<WriteSet> {
        self.base.apply(&self.log)?;
        tracing::debug!(
            writes = self.log.len(),
            digest = %self.log.digest_hex(),
            "Transaction committed"
        );
        Ok(self.log)
    }

    /// Discard the buffered writes.
    pub fn rollback(self) {
        tracing::debug!(discarded = self.log.len(), "Transaction rolled back");
    }
}

impl<S: StateStore> StateStore for Transaction<'_, S> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match self.pending.get(key) {
            Some(buffered) => Ok(buffered.clone()),
            None => self.base.get(key),
        }
    }

    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<()> {
        self.pending.insert(key.to_string(), Some(value.clone()));
        self.log.ops.push(WriteOp::Put {
            key: key.to_string(),
            value,
        });
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        self.pending.insert(key.to_string(), None);
        self.log.ops.push(WriteOp::Delete {
            key: key.to_string(),
        });
        Ok(())
    }

    fn apply(&mut self, writes: &WriteSet) -> Result<()> {
        for op in writes.ops() {
            match op {
                WriteOp::Put { key, value } => self.put(key, value.clone())?,
                WriteOp::Delete { key } => self.delete(key)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use swapbook_types::SwapbookError;

    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn reads_see_buffered_writes() {
        let mut store = MemoryStore::new();
        store.put("a", b"old".to_vec()).unwrap();

        let mut tx = Transaction::begin(&mut store);
        tx.put("a", b"new".to_vec()).unwrap();
        tx.delete("b").unwrap();
        assert_eq!(tx.get("a").unwrap(), Some(b"new".to_vec()));
        assert_eq!(tx.get("b").unwrap(), None);
        tx.commit().unwrap();

        assert_eq!(store.get("a").unwrap(), Some(b"new".to_vec()));
    }

    #[test]
    fn rollback_leaves_base_untouched() {
        let mut store = MemoryStore::new();
        store.put("a", b"1".to_vec()).unwrap();
        let before = store.snapshot();

        let mut tx = Transaction::begin(&mut store);
        tx.put("a", b"2".to_vec()).unwrap();
        tx.delete("a").unwrap();
        tx.rollback();

        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn failed_commit_leaves_base_untouched() {
        let mut store = MemoryStore::new();
        store.fail_on("bad");

        let mut tx = Transaction::begin(&mut store);
        tx.put("good", b"1".to_vec()).unwrap();
        tx.put("bad", b"2".to_vec()).unwrap();
        let err = tx.commit().unwrap_err();

        assert!(matches!(err, SwapbookError::Store { ref key, .. } if key == "bad"));
        assert!(store.is_empty());
        assert_eq!(store.write_count(), 0);
        store.heal();
        assert_eq!(store.get("good").unwrap(), None);
    }

    #[test]
    fn nested_apply_stays_buffered() {
        let mut store = MemoryStore::new();
        let mut writes = WriteSet::default();
        writes.push(WriteOp::Put {
            key: "a".into(),
            value: b"1".to_vec(),
        });

        let mut tx = Transaction::begin(&mut store);
        tx.apply(&writes).unwrap();
        assert_eq!(tx.get("a").unwrap(), Some(b"1".to_vec()));
        tx.rollback();
        assert!(store.is_empty());
    }

    #[test]
    fn buffered_delete_hides_base_value() {
        let mut store = MemoryStore::new();
        store.put("a", b"1".to_vec()).unwrap();
        let mut tx = Transaction::begin(&mut store);
        tx.delete("a").unwrap();
        assert_eq!(tx.get("a").unwrap(), None);
    }

    #[test]
    fn commit_applies_in_issue_order() {
        let mut store = MemoryStore::new();
        let mut tx = Transaction::begin(&mut store);
        tx.put("k", b"1".to_vec()).unwrap();
        tx.delete("k").unwrap();
        tx.put("k", b"3".to_vec()).unwrap();
        let ws = tx.commit().unwrap();
        assert_eq!(ws.len(), 3);
        assert_eq!(store.get("k").unwrap(), Some(b"3".to_vec()));
    }

    #[test]
    fn digest_is_deterministic_and_order_sensitive() {
        let build = |first: &str, second: &str| {
            let mut store = MemoryStore::new();
            let mut tx = Transaction::begin(&mut store);
            tx.put(first, b"x".to_vec()).unwrap();
            tx.put(second, b"y".to_vec()).unwrap();
            tx.write_set().clone()
        };
        assert_eq!(build("a", "b").digest(), build("a", "b").digest());
        assert_ne!(build("a", "b").digest(), build("b", "a").digest());
        assert_eq!(build("a", "b").digest_hex().len(), 64);
    }

    #[test]
    fn empty_write_set_digest_is_stable() {
        assert_eq!(WriteSet::default().digest(), WriteSet::default().digest());
        assert!(WriteSet::default().is_empty());
    }
}
