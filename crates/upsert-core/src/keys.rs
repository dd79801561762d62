//! Conflict key columns.

use std::collections::BTreeSet;

/// Deduplicated set of column names identifying a row for conflict
/// detection.
///
/// Iteration is in ascending order so conflict targets render the same way
/// regardless of how the caller listed the keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeySet {
    items: BTreeSet<String>,
}

impl KeySet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column name.
    pub fn insert(&mut self, item: impl Into<String>) {
        self.items.insert(item.into());
    }

    /// Remove a column name.
    pub fn remove(&mut self, item: &str) {
        self.items.remove(item);
    }

    pub fn contains(&self, item: &str) -> bool {
        self.items.contains(item)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    /// Items present in both sets.
    pub fn intersection(&self, other: &KeySet) -> KeySet {
        self.items.intersection(&other.items).cloned().collect()
    }

    /// Items in `self` that are not in `other`.
    pub fn difference(&self, other: &KeySet) -> KeySet {
        self.items.difference(&other.items).cloned().collect()
    }

    /// Items in either set.
    pub fn union(&self, other: &KeySet) -> KeySet {
        self.items.union(&other.items).cloned().collect()
    }

    /// Sorted copy of the items.
    pub fn to_vec(&self) -> Vec<String> {
        self.items.iter().cloned().collect()
    }

    /// Items joined with `sep`, in sorted order.
    pub fn join(&self, sep: &str) -> String {
        self.to_vec().join(sep)
    }
}

impl<S: Into<String>> FromIterator<S> for KeySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().map(Into::into).collect(),
        }
    }
}
