//! CQL `INSERT [IF NOT EXISTS]` synthesis.

use upsert_core::{ConflictAction, Row, Statement};

/// Build the insert statement for one row.
///
/// A CQL `INSERT` already overwrites an existing row with the same primary
/// key, so [`ConflictAction::Update`] needs no extra clause.
/// [`ConflictAction::Nothing`] becomes a lightweight transaction
/// (`IF NOT EXISTS`).
pub fn upsert_statement<'r>(model: &str, action: ConflictAction, row: &'r Row) -> Statement<'r> {
    let mut cols = Vec::with_capacity(row.len());
    let mut values = Vec::with_capacity(row.len());
    let mut args = Vec::with_capacity(row.len());

    for (column, value) in row.iter() {
        cols.push(column);
        values.push("?");
        args.push(value);
    }

    let mut text = format!(
        "INSERT INTO {model} ({}) VALUES({})",
        cols.join(","),
        values.join(",")
    );
    if action == ConflictAction::Nothing {
        text.push_str(" IF NOT EXISTS");
    }

    Statement::new(text, args)
}
