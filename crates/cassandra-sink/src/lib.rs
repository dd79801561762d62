//! Cassandra backend for bulk-upsert.
//!
//! Rows are written with `INSERT` (which already replaces an existing row)
//! or `INSERT ... IF NOT EXISTS`, one statement per row with no enclosing
//! transaction.

pub mod config;
pub mod sink;
pub mod statement;
pub mod value;

pub use config::{CassandraConfig, Compression, Consistency, Credentials, RoutingPolicy};
pub use sink::CassandraSink;
pub use statement::upsert_statement;
pub use value::to_cql_value;
