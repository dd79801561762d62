//! Conversion of untyped [`Value`]s to `mysql_async` parameters.

use chrono::{Datelike, Timelike};
use mysql_async::Value as MySQLValue;
use upsert_core::Value;

/// Convert a row value to its MySQL wire representation.
///
/// Booleans become `TINYINT(1)` integers, UUIDs their `CHAR(36)` text and
/// nested values (arrays, maps, JSON) JSON text suitable for `JSON` columns.
pub fn to_mysql_value(value: &Value) -> MySQLValue {
    match value {
        Value::Null => MySQLValue::NULL,
        Value::Bool(b) => MySQLValue::Int(i64::from(*b)),
        Value::Int32(i) => MySQLValue::Int(i64::from(*i)),
        Value::Int64(i) => MySQLValue::Int(*i),
        Value::Float64(f) => MySQLValue::Double(*f),
        Value::String(s) => MySQLValue::Bytes(s.clone().into_bytes()),
        Value::Bytes(b) => MySQLValue::Bytes(b.clone()),
        Value::Uuid(u) => MySQLValue::Bytes(u.to_string().into_bytes()),
        // DATETIME holds years 0..=9999; a leap second keeps second 59.
        Value::DateTime(dt) => MySQLValue::Date(
            dt.year().clamp(0, 9999) as u16,
            dt.month() as u8,
            dt.day() as u8,
            dt.hour() as u8,
            dt.minute() as u8,
            dt.second() as u8,
            dt.timestamp_subsec_micros().min(999_999),
        ),
        Value::Json(_) | Value::Array(_) | Value::Map(_) => {
            MySQLValue::Bytes(value.to_json().to_string().into_bytes())
        }
    }
}
