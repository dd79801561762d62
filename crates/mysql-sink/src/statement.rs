//! `ON DUPLICATE KEY UPDATE` / `INSERT IGNORE` synthesis.

use upsert_core::{squash_whitespace, ConflictAction, Row, Statement};

/// Build the upsert statement for one row.
///
/// MySQL resolves conflicts against whatever unique index the row hits, so
/// no key list appears in the text. With [`ConflictAction::Update`] every
/// column is reassigned and its value is bound a second time.
pub fn upsert_statement<'r>(model: &str, action: ConflictAction, row: &'r Row) -> Statement<'r> {
    let mut cols = Vec::with_capacity(row.len());
    let mut values = Vec::with_capacity(row.len());
    let mut update_clause = Vec::with_capacity(row.len());
    let mut args = Vec::with_capacity(row.len() * 2);
    let mut update_args = Vec::with_capacity(row.len());

    for (column, value) in row.iter() {
        cols.push(column);
        values.push("?");
        args.push(value);

        update_clause.push(format!("{column}=?"));
        update_args.push(value);
    }

    let (ignore_action, update_action) = match action {
        ConflictAction::Update => {
            args.extend(update_args);
            (
                "",
                format!("ON DUPLICATE KEY UPDATE {}", update_clause.join(",")),
            )
        }
        ConflictAction::Nothing => ("IGNORE", String::new()),
    };

    let text = format!(
        "INSERT {ignore_action} INTO {model}({}) VALUES({}) {update_action}",
        cols.join(","),
        values.join(","),
    );

    Statement::new(squash_whitespace(&text), args)
}
