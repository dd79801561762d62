//! Synthesized statements.

use crate::value::Value;

/// Statement text plus its positional arguments.
///
/// Arguments borrow from the row the statement was built for, in placeholder
/// order. A value may appear more than once when a dialect repeats the
/// column list (MySQL `ON DUPLICATE KEY UPDATE`).
#[derive(Debug, Clone, PartialEq)]
pub struct Statement<'r> {
    pub text: String,
    pub args: Vec<&'r Value>,
}

impl<'r> Statement<'r> {
    pub fn new(text: impl Into<String>, args: Vec<&'r Value>) -> Self {
        Self {
            text: text.into(),
            args,
        }
    }
}

impl std::fmt::Display for Statement<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Collapse runs of whitespace and trim both ends.
///
/// Templates with optional clauses leave doubled or trailing spaces behind
/// when a clause is empty.
pub fn squash_whitespace(sql: &str) -> String {
    sql.split_whitespace().collect::<Vec<_>>().join(" ")
}
