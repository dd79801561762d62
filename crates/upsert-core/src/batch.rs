//! Batches and the writer trait implemented by every backend.

use crate::conflict::ConflictAction;
use crate::error::UpsertError;
use crate::keys::KeySet;
use crate::row::Row;
use std::num::NonZeroUsize;

/// One bounded slice of an upsert call, plus the call-scoped target.
#[derive(Debug, Clone, Copy)]
pub struct Batch<'a> {
    /// Target table (or column family).
    pub model: &'a str,
    /// Conflict key columns.
    pub keys: &'a KeySet,
    pub action: ConflictAction,
    pub rows: &'a [Row],
}

impl<'a> Batch<'a> {
    pub fn new(model: &'a str, keys: &'a KeySet, action: ConflictAction, rows: &'a [Row]) -> Self {
        Self {
            model,
            keys,
            action,
            rows,
        }
    }

    /// Rows that carry at least one column.
    pub fn non_empty_rows(&self) -> impl Iterator<Item = &'a Row> {
        self.rows.iter().filter(|row| !row.is_empty())
    }

    /// True when no row in the batch would produce a write.
    pub fn is_inert(&self) -> bool {
        self.rows.iter().all(Row::is_empty)
    }
}

/// Split `rows` into consecutive slices of at most `batch_size` items.
///
/// Yields `ceil(n / batch_size)` slices, every one full except possibly the
/// last, covering the input once and in order.
pub fn partition<T>(rows: &[T], batch_size: NonZeroUsize) -> std::slice::Chunks<'_, T> {
    rows.chunks(batch_size.get())
}

/// Backend capability used by the orchestrator.
///
/// Implementations apply one batch with their own transactional discipline
/// and report how many rows were written.
#[async_trait::async_trait]
pub trait BatchWriter: Send + Sync {
    /// Display name of the backend, used in logs and errors.
    fn backend(&self) -> &'static str;

    /// Apply `batch` and return the number of rows written.
    ///
    /// Empty batches and batches made only of empty rows succeed without
    /// touching the backend.
    async fn write_batch(&self, batch: Batch<'_>) -> Result<u64, UpsertError>;

    /// Release the underlying pool or session. Calling it again does nothing.
    async fn close(&self);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn nz(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_partition_1501_by_1000() {
        let rows: Vec<usize> = (0..1501).collect();
        let sizes: Vec<usize> = partition(&rows, nz(1000)).map(<[usize]>::len).collect();
        assert_eq!(sizes, vec![1000, 501]);
    }

    #[test]
    fn test_partition_empty() {
        let rows: Vec<usize> = Vec::new();
        assert_eq!(partition(&rows, nz(10)).count(), 0);
    }

    #[test]
    fn test_inert_batch() {
        let keys = KeySet::new();
        let rows = vec![Row::new(), Row::new()];
        let batch = Batch::new("students", &keys, ConflictAction::Update, &rows);
        assert!(batch.is_inert());
        assert_eq!(batch.non_empty_rows().count(), 0);

        let rows = vec![Row::new(), Row::new().with("name", "a")];
        let batch = Batch::new("students", &keys, ConflictAction::Update, &rows);
        assert!(!batch.is_inert());
        assert_eq!(batch.non_empty_rows().count(), 1);
    }

    proptest! {
        #[test]
        fn prop_partition_covers_rows_in_order(n in 0usize..5000, b in 1usize..1200) {
            let rows: Vec<usize> = (0..n).collect();
            let batches: Vec<&[usize]> = partition(&rows, nz(b)).collect();

            prop_assert_eq!(batches.len(), n.div_ceil(b));
            for (i, batch) in batches.iter().enumerate() {
                if i + 1 < batches.len() {
                    prop_assert_eq!(batch.len(), b);
                } else {
                    prop_assert!(!batch.is_empty() && batch.len() <= b);
                }
            }

            let flattened: Vec<usize> = batches.concat();
            prop_assert_eq!(flattened, rows);
        }
    }
}
