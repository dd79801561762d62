//! What to do when an inserted row collides with an existing key.

use serde::{Deserialize, Serialize};

/// Conflict resolution policy, applied to every row of one upsert call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictAction {
    /// Overwrite the existing row.
    #[default]
    Update,
    /// Keep the existing row and drop the new one.
    Nothing,
}

impl std::fmt::Display for ConflictAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Update => write!(f, "update"),
            Self::Nothing => write!(f, "nothing"),
        }
    }
}

impl std::str::FromStr for ConflictAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "update" => Ok(Self::Update),
            "nothing" | "ignore" => Ok(Self::Nothing),
            _ => Err(format!(
                "Invalid conflict action: '{s}'. Expected 'update' or 'nothing'"
            )),
        }
    }
}
