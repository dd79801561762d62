//! The upsert entry point.

use crate::backend::Backend;
use crate::config::UpsertOpts;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, info};
use upsert_core::{partition, Batch, BatchWriter, ConflictAction, KeySet, Row, UpsertError};

/// Outcome of one [`Upserter::upsert`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpsertMetrics {
    /// Rows handed in, empty rows included.
    pub rows: usize,
    /// Rows the backend executed a statement for.
    pub rows_written: u64,
    pub batches: usize,
    pub duration: Duration,
}

impl UpsertMetrics {
    pub fn rows_per_second(&self) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs > 0.0 {
            self.rows as f64 / secs
        } else {
            0.0
        }
    }
}

/// Upserts rows in batches through one backend handle.
///
/// The handle is shared by concurrent calls. [`close`](Self::close) detaches
/// it: later calls fail with [`UpsertError::ConnectionClosed`], calls already
/// holding the handle run to completion.
pub struct Upserter<W = Backend> {
    writer: Mutex<Option<Arc<W>>>,
    batch_size: NonZeroUsize,
}

impl Upserter<Backend> {
    /// Validate `opts`, then connect to the selected backend.
    pub async fn connect(opts: UpsertOpts) -> Result<Self, UpsertError> {
        opts.validate()?;
        let backend = Backend::connect(opts.backend, &opts.connect_args()).await?;
        info!(
            "Upserter ready for {} (batch size {})",
            opts.backend, opts.batch_size
        );
        Ok(Self::with_writer(backend, opts.batch_size))
    }
}

impl<W: BatchWriter> Upserter<W> {
    /// Drive an already connected writer.
    pub fn with_writer(writer: W, batch_size: NonZeroUsize) -> Self {
        Self {
            writer: Mutex::new(Some(Arc::new(writer))),
            batch_size,
        }
    }

    pub fn batch_size(&self) -> NonZeroUsize {
        self.batch_size
    }

    pub async fn is_closed(&self) -> bool {
        self.writer.lock().await.is_none()
    }

    async fn writer(&self) -> Result<Arc<W>, UpsertError> {
        self.writer
            .lock()
            .await
            .clone()
            .ok_or(UpsertError::ConnectionClosed)
    }

    /// Upsert `rows` into `model`.
    ///
    /// `keys` are the conflict columns (duplicates are dropped). Rows are
    /// written in consecutive batches of at most the configured batch size;
    /// the first failing batch stops the call and its error is returned
    /// as is. Batches written before it are not undone.
    pub async fn upsert<K, S>(
        &self,
        model: &str,
        keys: K,
        action: ConflictAction,
        rows: &[Row],
    ) -> Result<UpsertMetrics, UpsertError>
    where
        K: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let writer = self.writer().await?;

        if model.is_empty() {
            return Err(UpsertError::EmptyModel);
        }

        if rows.is_empty() {
            return Ok(UpsertMetrics::default());
        }

        let start = Instant::now();
        let keys: KeySet = keys.into_iter().collect();
        let total_batches = rows.len().div_ceil(self.batch_size.get());

        let mut metrics = UpsertMetrics {
            rows: rows.len(),
            ..UpsertMetrics::default()
        };

        for (i, chunk) in partition(rows, self.batch_size).enumerate() {
            let written = writer
                .write_batch(Batch::new(model, &keys, action, chunk))
                .await?;

            debug!(
                "{} batch {}/{} for '{}': {} of {} rows written",
                writer.backend(),
                i + 1,
                total_batches,
                model,
                written,
                chunk.len()
            );

            metrics.rows_written += written;
            metrics.batches += 1;
        }

        metrics.duration = start.elapsed();
        info!(
            "Upserted {} rows to model '{}' in {:?}",
            metrics.rows, model, metrics.duration
        );

        Ok(metrics)
    }

    /// Detach and release the backend handle. Calling it again does nothing.
    pub async fn close(&self) {
        let writer = self.writer.lock().await.take();
        if let Some(writer) = writer {
            writer.close().await;
        }
    }
}
