//! Core types for the bulk-upsert workspace.
//!
//! This crate holds what every backend shares:
//!
//! - [`Row`] / [`Value`] - the record handed to the upsert path
//! - [`KeySet`] - conflict key columns
//! - [`ConflictAction`] - update or ignore on conflict
//! - [`Statement`] - synthesized statement text plus positional arguments
//! - [`Batch`] / [`BatchWriter`] - the unit of work and the backend trait
//! - [`UpsertError`] - the shared error type
//!
//! ```text
//! upsert-core (this crate)
//!    │
//!    ├─── bulk-upsert-postgresql  (ON CONFLICT, $n placeholders)
//!    ├─── bulk-upsert-mysql       (ON DUPLICATE KEY UPDATE / INSERT IGNORE)
//!    ├─── bulk-upsert-cassandra   (INSERT [IF NOT EXISTS])
//!    │
//!    └─── bulk-upsert             (options, backend selection, orchestration)
//! ```

pub mod batch;
pub mod conflict;
pub mod conn;
pub mod error;
pub mod keys;
pub mod row;
pub mod statement;
pub mod value;

pub use batch::{partition, Batch, BatchWriter};
pub use conflict::ConflictAction;
pub use conn::ConnectArgs;
pub use error::{BoxError, ErrorKind, UpsertError};
pub use keys::KeySet;
pub use row::Row;
pub use statement::{squash_whitespace, Statement};
pub use value::Value;
