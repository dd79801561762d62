//! Conversion of untyped [`Value`]s to CQL values.

use scylla::frame::response::result::CqlValue;
use scylla::frame::value::CqlTimestamp;
use upsert_core::Value;

/// Convert a row value to a bound CQL value; `None` binds `null`.
///
/// The conversion follows the value, not the column: `Int64` binds a
/// `bigint`, `Int32` an `int`. Arrays become lists and maps become
/// `map<text, _>`; nulls inside either are dropped because CQL collections
/// cannot hold them. Free-form JSON is bound as `text`.
pub fn to_cql_value(value: &Value) -> Option<CqlValue> {
    let cql = match value {
        Value::Null => return None,
        Value::Bool(b) => CqlValue::Boolean(*b),
        Value::Int32(i) => CqlValue::Int(*i),
        Value::Int64(i) => CqlValue::BigInt(*i),
        Value::Float64(f) => CqlValue::Double(*f),
        Value::String(s) => CqlValue::Text(s.clone()),
        Value::Bytes(b) => CqlValue::Blob(b.clone()),
        Value::Uuid(u) => CqlValue::Uuid(*u),
        Value::DateTime(dt) => CqlValue::Timestamp(CqlTimestamp(dt.timestamp_millis())),
        Value::Json(json) => CqlValue::Text(json.to_string()),
        Value::Array(items) => CqlValue::List(items.iter().filter_map(to_cql_value).collect()),
        Value::Map(entries) => CqlValue::Map(
            entries
                .iter()
                .filter_map(|(key, value)| {
                    to_cql_value(value).map(|value| (CqlValue::Text(key.clone()), value))
                })
                .collect(),
        ),
    };
    Some(cql)
}
