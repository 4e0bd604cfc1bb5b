//! Item repository: item records plus the item index.
//!
//! Every item lives under its own name. Because the store cannot list its
//! keys, the repository keeps the [`ItemIndex`] in step with the records:
//! `create` appends the name, `delete` removes it.
//!
//! Absent or undecodable records read as the empty [`Item`]. `create`
//! relies on that to treat such a key as free, and `set_owner` writes
//! through it without checking that the item exists.

use swapbook_ledger::StateStore;
use swapbook_types::codec::encode;
use swapbook_types::{Item, ItemIndex, LedgerKeys, Result, SwapbookError};

use crate::record::{decode_stored, load_record};

/// CRUD over item records and the item index.
#[derive(Debug, Clone)]
pub struct ItemRepository {
    keys: LedgerKeys,
}

impl ItemRepository {
    #[must_use]
    pub fn new(keys: LedgerKeys) -> Self {
        Self { keys }
    }

    // =================================================================
    // Writes
    // =================================================================

    /// Store a new item and index its name.
    ///
    /// # Errors
    /// - `ReservedKey` if the name is an aggregate key
    /// - `AlreadyExists` if the stored record already carries this name
    pub fn create<S: StateStore>(&self, store: &mut S, item: Item) -> Result<()> {
        self.ensure_item_key(&item.name)?;

        let existing = self.load(store, &item.name)?;
        if existing.name == item.name {
            return Err(SwapbookError::AlreadyExists(item.name));
        }

        store.put(&item.name, encode(&item)?)?;

        let mut index = self.load_index(store)?;
        index.insert(&item.name);
        self.save_index(store, &index)?;

        tracing::info!(
            item = %item.name,
            kind = %item.kind,
            quantity = item.quantity,
            owner = %item.owner,
            indexed = index.len(),
            "Item created"
        );
        Ok(())
    }

    /// Overwrite the owner of `name` and return the written record.
    ///
    /// A missing record is written back as an otherwise empty item.
    pub fn set_owner<S: StateStore>(&self, store: &mut S, name: &str, owner: &str) -> Result<Item> {
        self.ensure_item_key(name)?;

        let mut item = self.load(store, name)?;
        if item.name.is_empty() {
            tracing::warn!(item = %name, "Setting owner on an absent item record");
        }
        item.owner = owner.to_string();
        store.put(name, encode(&item)?)?;

        tracing::info!(item = %name, owner = %owner, "Owner set");
        Ok(item)
    }

    /// Delete the record and drop `name` from the index.
    ///
    /// Returns `true` if the name was indexed. The index is rewritten either way.
    pub fn delete<S: StateStore>(&self, store: &mut S, name: &str) -> Result<bool> {
        self.ensure_item_key(name)?;

        store.delete(name)?;

        let mut index = self.load_index(store)?;
        let was_indexed = index.remove(name);
        self.save_index(store, &index)?;

        tracing::info!(item = %name, was_indexed, "Item deleted");
        Ok(was_indexed)
    }

    // =================================================================
    // Reads
    // =================================================================

    /// Raw stored bytes at `key`, unparsed.
    pub fn read<S: StateStore>(&self, store: &S, key: &str) -> Result<Option<Vec<u8>>> {
        store.get(key)
    }

    /// Decoded item at `name`; the empty item if absent or not an item.
    pub fn load<S: StateStore>(&self, store: &S, name: &str) -> Result<Item> {
        load_record(store, name)
    }

    /// The persisted item index.
    pub fn load_index<S: StateStore>(&self, store: &S) -> Result<ItemIndex> {
        load_record(store, &self.keys.item_index)
    }

    /// Every indexed item in index order, skipping names with no record.
    pub fn list<S: StateStore>(&self, store: &S) -> Result<Vec<Item>> {
        let index = self.load_index(store)?;
        let mut items = Vec::with_capacity(index.len());
        for name in index.iter() {
            if let Some(bytes) = store.get(name)? {
                items.push(decode_stored(name, Some(bytes.as_slice())));
            }
        }
        Ok(items)
    }

    /// Reset the item index to empty.
    pub fn clear_index<S: StateStore>(&self, store: &mut S) -> Result<()> {
        self.save_index(store, &ItemIndex::new())
    }

    fn save_index<S: StateStore>(&self, store: &mut S, index: &ItemIndex) -> Result<()> {
        store.put(&self.keys.item_index, encode(index)?)
    }

    fn ensure_item_key(&self, name: &str) -> Result<()> {
        if self.keys.is_reserved(name) {
            return Err(SwapbookError::ReservedKey(name.to_string()));
        }
        Ok(())
    }
}
