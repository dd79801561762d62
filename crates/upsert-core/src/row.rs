//! Row representation handed to the upsert path.

use crate::value::Value;
use std::collections::BTreeMap;

/// A record to upsert: column name -> value.
///
/// Columns are always visited in ascending lexical order, which keeps the
/// generated statement text and its argument order deterministic. A row with
/// no columns is valid; writers skip it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: BTreeMap<String, Value>,
}

impl Row {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column. Adding an existing column replaces its value.
    pub fn add(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.columns.insert(column.into(), value.into());
    }

    /// Builder-style [`Row::add`].
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.add(column, value);
        self
    }

    /// Column names in sorted order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Value of `column`, `None` if the row does not carry it.
    pub fn value(&self, column: &str) -> Option<&Value> {
        self.columns.get(column)
    }

    /// `(column, value)` pairs in sorted column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// True when the row carries no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (k, v) in iter {
            row.add(k, v);
        }
        row
    }
}
