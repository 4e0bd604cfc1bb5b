//! Record loading shared by the repository and the order book.
//!
//! The ledger holds whatever bytes were last written under a key, including
//! values put there by the raw `write` function. A value that is not the
//! expected record reads like an absent one: the default record, with a
//! warning.

use serde::de::DeserializeOwned;
use swapbook_ledger::StateStore;
use swapbook_types::Result;
use swapbook_types::codec::decode_or_default;

/// Decode the record stored at `key`, or `T::default()` if it is absent or
/// undecodable. Only store failures are errors.
pub(crate) fn load_record<S, T>(store: &S, key: &str) -> Result<T>
where
    S: StateStore,
    T: DeserializeOwned + Default,
{
    let bytes = store.get(key)?;
    Ok(decode_stored(key, bytes.as_deref()))
}

/// Decode bytes already read from `key`, falling back to `T::default()`.
pub(crate) fn decode_stored<T>(key: &str, bytes: Option<&[u8]>) -> T
where
    T: DeserializeOwned + Default,
{
    decode_or_default(bytes).unwrap_or_else(|e| {
        tracing::warn!(key = %key, error = %e, "Undecodable record read as default");
        T::default()
    })
}

#[cfg(test)]
mod tests {
    use swapbook_ledger::MemoryStore;
    use swapbook_types::{Item, ItemIndex, OrderBookRecord};

    use super::*;

    #[test]
    fn junk_reads_as_default() {
        let mut store = MemoryStore::new();
        store.put("x", b"hello".to_vec()).unwrap();

        let item: Item = load_record(&store, "x").unwrap();
        assert_eq!(item, Item::default());
        let index: ItemIndex = load_record(&store, "x").unwrap();
        assert!(index.is_empty());
        let book: OrderBookRecord = load_record(&store, "x").unwrap();
        assert!(book.is_empty());
    }

    #[test]
    fn wrong_shape_reads_as_default() {
        let item: Item = decode_stored("x", Some(br#""just text""#));
        assert_eq!(item, Item::default());
    }

    #[test]
    fn store_failure_still_propagates() {
        let mut store = MemoryStore::new();
        store.fail_on("x");
        assert!(load_record::<_, Item>(&store, "x").is_err());
    }
}
