//! MySQL backend for bulk-upsert.
//!
//! `ConflictAction::Update` is written as `INSERT ... ON DUPLICATE KEY
//! UPDATE`, `ConflictAction::Nothing` as `INSERT IGNORE`. Each batch runs in
//! one serializable read-write transaction.

pub mod sink;
pub mod statement;
pub mod value;

pub use sink::MySQLSink;
pub use statement::upsert_statement;
pub use value::to_mysql_value;
