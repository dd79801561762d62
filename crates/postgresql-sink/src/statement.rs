//! `INSERT ... ON CONFLICT` synthesis.

use upsert_core::{ConflictAction, KeySet, Row, Statement};

/// Build the upsert statement for one row.
///
/// Columns are listed in sorted order with `$n` placeholders. With
/// [`ConflictAction::Update`] every non-key column is assigned from its own
/// placeholder; key columns never appear in the `SET` list.
pub fn upsert_statement<'r>(
    model: &str,
    keys: &KeySet,
    action: ConflictAction,
    row: &'r Row,
) -> Statement<'r> {
    let mut cols = Vec::with_capacity(row.len());
    let mut values = Vec::with_capacity(row.len());
    let mut update_clause = Vec::new();
    let mut args = Vec::with_capacity(row.len());

    for (index, (column, value)) in row.iter().enumerate() {
        let placeholder = format!("${}", index + 1);
        if !keys.contains(column) {
            update_clause.push(format!("{column}={placeholder}"));
        }
        cols.push(column);
        values.push(placeholder);
        args.push(value);
    }

    let action = match action {
        ConflictAction::Update => format!("DO UPDATE SET {}", update_clause.join(",")),
        ConflictAction::Nothing => "DO NOTHING".to_string(),
    };

    let text = format!(
        "INSERT INTO {model}({}) VALUES({}) ON CONFLICT ({}) {action}",
        cols.join(","),
        values.join(","),
        keys.join(","),
    );

    Statement::new(text.trim_end(), args)
}
