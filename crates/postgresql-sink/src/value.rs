//! Encoding of untyped [`Value`]s as PostgreSQL parameters.
//!
//! Rows are untyped, so the encoder looks at the parameter type the server
//! reported for each placeholder and adapts: an `Int64` bound to an `INT4`
//! column is narrowed, a string bound to `JSONB` is parsed, arrays go to
//! array columns or to JSON. Anything that cannot be represented is an
//! error rather than silently wrong bytes.

use bytes::BytesMut;
use chrono::{DateTime, Utc};
use postgres_types::{to_sql_checked, IsNull, Kind, ToSql, Type};
use rust_decimal::Decimal;
use std::str::FromStr;
use upsert_core::{BoxError, Value};
use uuid::Uuid;

/// A borrowed [`Value`] bound as a statement parameter.
#[derive(Debug)]
pub struct PgParam<'a>(pub &'a Value);

impl ToSql for PgParam<'_> {
    fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
        match self.0 {
            Value::Null => Ok(IsNull::Yes),
            Value::Bool(b) => bool_to_sql(*b, ty, out),
            Value::Int32(i) => int_to_sql(i64::from(*i), ty, out),
            Value::Int64(i) => int_to_sql(*i, ty, out),
            Value::Float64(f) => float_to_sql(*f, ty, out),
            Value::String(s) => text_to_sql(s, ty, out),
            Value::Bytes(b) => encode(b.as_slice(), ty, out, "bytes"),
            Value::Uuid(u) => uuid_to_sql(u, ty, out),
            Value::DateTime(dt) => datetime_to_sql(dt, ty, out),
            Value::Json(_) | Value::Map(_) => json_to_sql(&self.0.to_json(), ty, out),
            Value::Array(items) => match ty.kind() {
                Kind::Array(_) => {
                    let params: Vec<PgParam<'_>> = items.iter().map(PgParam).collect();
                    params.to_sql(ty, out)
                }
                _ => json_to_sql(&self.0.to_json(), ty, out),
            },
        }
    }

    fn accepts(_ty: &Type) -> bool {
        true
    }

    to_sql_checked!();
}

fn mismatch(what: &str, ty: &Type) -> BoxError {
    format!("cannot encode {what} value as PostgreSQL type {ty}").into()
}

/// Delegate to `T`'s own encoder if it accepts `ty`.
fn encode<T: ToSql>(
    value: T,
    ty: &Type,
    out: &mut BytesMut,
    what: &str,
) -> Result<IsNull, BoxError> {
    if T::accepts(ty) {
        value.to_sql(ty, out)
    } else {
        Err(mismatch(what, ty))
    }
}

fn is_text(ty: &Type) -> bool {
    <&str as ToSql>::accepts(ty)
}

fn bool_to_sql(b: bool, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
    match *ty {
        Type::BOOL => b.to_sql(ty, out),
        Type::JSON | Type::JSONB => serde_json::Value::Bool(b).to_sql(ty, out),
        _ if is_text(ty) => encode(if b { "true" } else { "false" }, ty, out, "bool"),
        _ => Err(mismatch("bool", ty)),
    }
}

fn int_to_sql(v: i64, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
    match *ty {
        Type::INT2 => i16::try_from(v)?.to_sql(ty, out),
        Type::INT4 => i32::try_from(v)?.to_sql(ty, out),
        Type::INT8 => v.to_sql(ty, out),
        Type::FLOAT4 => (v as f32).to_sql(ty, out),
        Type::FLOAT8 => (v as f64).to_sql(ty, out),
        Type::NUMERIC => Decimal::from(v).to_sql(ty, out),
        Type::JSON | Type::JSONB => serde_json::Value::from(v).to_sql(ty, out),
        _ if is_text(ty) => encode(v.to_string().as_str(), ty, out, "integer"),
        _ => Err(mismatch("integer", ty)),
    }
}

fn float_to_sql(v: f64, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
    match *ty {
        Type::FLOAT4 => (v as f32).to_sql(ty, out),
        Type::FLOAT8 => v.to_sql(ty, out),
        Type::NUMERIC => Decimal::try_from(v)?.to_sql(ty, out),
        Type::JSON | Type::JSONB => Value::Float64(v).to_json().to_sql(ty, out),
        _ if is_text(ty) => encode(v.to_string().as_str(), ty, out, "float"),
        _ => Err(mismatch("float", ty)),
    }
}

fn text_to_sql(s: &str, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
    match *ty {
        Type::JSON | Type::JSONB => serde_json::from_str::<serde_json::Value>(s)?.to_sql(ty, out),
        Type::UUID => Uuid::parse_str(s)?.to_sql(ty, out),
        Type::NUMERIC => Decimal::from_str(s)?.to_sql(ty, out),
        Type::TIMESTAMPTZ => DateTime::parse_from_rfc3339(s)?
            .with_timezone(&Utc)
            .to_sql(ty, out),
        _ => encode(s, ty, out, "string"),
    }
}

fn uuid_to_sql(u: &Uuid, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
    match *ty {
        Type::UUID => u.to_sql(ty, out),
        _ if is_text(ty) => encode(u.to_string().as_str(), ty, out, "uuid"),
        _ => Err(mismatch("uuid", ty)),
    }
}

fn datetime_to_sql(dt: &DateTime<Utc>, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
    match *ty {
        Type::TIMESTAMPTZ => dt.to_sql(ty, out),
        Type::TIMESTAMP => dt.naive_utc().to_sql(ty, out),
        Type::DATE => dt.date_naive().to_sql(ty, out),
        Type::TIME => dt.time().to_sql(ty, out),
        Type::JSON | Type::JSONB => serde_json::Value::String(dt.to_rfc3339()).to_sql(ty, out),
        _ if is_text(ty) => encode(dt.to_rfc3339().as_str(), ty, out, "datetime"),
        _ => Err(mismatch("datetime", ty)),
    }
}

fn json_to_sql(json: &serde_json::Value, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
    match *ty {
        Type::JSON | Type::JSONB => json.to_sql(ty, out),
        _ if is_text(ty) => encode(json.to_string().as_str(), ty, out, "json"),
        _ => Err(mismatch("json", ty)),
    }
}
