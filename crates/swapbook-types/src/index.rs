//! The item index: the persisted list of every live item name.
//!
//! The state store cannot enumerate its keys, so the names of all items are
//! kept in insertion order under a reserved key and updated on every create
//! and delete.

use serde::{Deserialize, Serialize};

/// Ordered, duplicate-free list of live item names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemIndex(Vec<String>);

impl ItemIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `name` unless it is already indexed. Returns `true` if added.
    pub fn insert(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.0.push(name.to_string());
        true
    }

    /// Remove the first exact match of `name`. Returns `true` if removed.
    pub fn remove(&mut self, name: &str) -> bool {
        match self.0.iter().position(|n| n == name) {
            Some(pos) => {
                self.0.remove(pos);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl From<Vec<String>> for ItemIndex {
    fn from(names: Vec<String>) -> Self {
        let mut index = Self::new();
        for name in &names {
            index.insert(name);
        }
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_is_duplicate_free() {
        let mut index = ItemIndex::new();
        assert!(index.insert("a"));
        assert!(index.insert("b"));
        assert!(!index.insert("a"));
        assert_eq!(index.as_slice(), ["a", "b"]);
    }

    #[test]
    fn remove_first_exact_match_only() {
        let mut index = ItemIndex::from(vec!["a".into(), "B".into(), "c".into()]);
        assert!(!index.remove("b"));
        assert!(index.remove("B"));
        assert_eq!(index.iter().collect::<Vec<_>>(), vec!["a", "c"]);
    }

    #[test]
    fn from_vec_drops_duplicates() {
        let index = ItemIndex::from(vec!["x".into(), "x".into()]);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn wire_format_is_plain_array() {
        let index = ItemIndex::from(vec!["a".into()]);
        assert_eq!(serde_json::to_string(&index).unwrap(), r#"["a"]"#);
    }
}
