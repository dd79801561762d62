//! Duration parsing utilities.

use serde::{Deserialize, Deserializer};
use std::time::Duration;
use upsert_core::UpsertError;

/// Parse a duration string like "1h", "30m", "300s", "250ms" or "300".
/// Supports:
/// - Plain numbers (interpreted as seconds): "300"
/// - Milliseconds suffix: "250ms"
/// - Seconds suffix: "300s"
/// - Minutes suffix: "30m"
/// - Hours suffix: "1h"
///
/// "0" (in any unit) is accepted and means "no limit" to the pool settings
/// that use it.
pub fn parse_duration(s: &str) -> Result<Duration, UpsertError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(UpsertError::invalid_option("duration", "empty duration string"));
    }

    let parse = |num_str: &str, unit: &str| -> Result<u64, UpsertError> {
        num_str.trim().parse().map_err(|_| {
            UpsertError::invalid_option("duration", format!("invalid {unit} value: {num_str}"))
        })
    };

    // "ms" must be checked before "m" and "s"
    if let Some(num_str) = s.strip_suffix("ms") {
        return Ok(Duration::from_millis(parse(num_str, "milliseconds")?));
    }
    if let Some(num_str) = s.strip_suffix('h') {
        let hours = parse(num_str, "hours")?;
        return Ok(Duration::from_secs(hours.saturating_mul(3600)));
    }
    if let Some(num_str) = s.strip_suffix('m') {
        let minutes = parse(num_str, "minutes")?;
        return Ok(Duration::from_secs(minutes.saturating_mul(60)));
    }
    if let Some(num_str) = s.strip_suffix('s') {
        return Ok(Duration::from_secs(parse(num_str, "seconds")?));
    }

    // No suffix - treat as seconds
    Ok(Duration::from_secs(parse(s, "duration")?))
}

/// Serde adapter accepting either whole seconds (`3`) or a duration string
/// (`"3s"`, `"500ms"`).
pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Secs(u64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Secs(secs) => Ok(Duration::from_secs(secs)),
        Raw::Text(text) => parse_duration(&text).map_err(serde::de::Error::custom),
    }
}
