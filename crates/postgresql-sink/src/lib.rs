//! PostgreSQL backend for bulk-upsert.
//!
//! Rows are written with `INSERT ... ON CONFLICT (<keys>) DO UPDATE SET ...`
//! (or `DO NOTHING`), one statement per row, one serializable read-write
//! transaction per batch.

pub mod sink;
pub mod statement;
pub mod value;

pub use sink::PostgreSQLSink;
pub use statement::upsert_statement;
pub use value::PgParam;
