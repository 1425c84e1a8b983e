//! SQL type conversions for DuckDB
//!
//! Binds `SqlValue` parameters and converts result values to JSON.

use chrono::{DateTime, NaiveDate};
use duckdb::ToSql;
use duckdb::types::{TimeUnit, ToSqlOutput, Value};
use serde_json::Value as JsonValue;

use crate::data::sql::SqlValue;

/// Days between 0001-01-01 (CE) and 1970-01-01
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

impl ToSql for SqlValue {
    fn to_sql(&self) -> duckdb::Result<ToSqlOutput<'_>> {
        let value = match self {
            SqlValue::Text(s) => Value::Text(s.clone()),
            SqlValue::Number(n) => Value::Double(*n),
            SqlValue::Date(d) => Value::Text(d.format("%Y-%m-%d").to_string()),
        };
        Ok(ToSqlOutput::Owned(value))
    }
}

fn json_float(v: f64) -> JsonValue {
    serde_json::Number::from_f64(v)
        .map(JsonValue::Number)
        .unwrap_or(JsonValue::Null)
}

fn micros(unit: TimeUnit, v: i64) -> i64 {
    match unit {
        TimeUnit::Second => v.saturating_mul(1_000_000),
        TimeUnit::Millisecond => v.saturating_mul(1_000),
        TimeUnit::Microsecond => v,
        TimeUnit::Nanosecond => v / 1_000,
    }
}

/// Convert a DuckDB value to JSON. Dates render as `YYYY-MM-DD`,
/// timestamps as `YYYY-MM-DD HH:MM:SS`.
pub fn value_to_json(value: Value) -> JsonValue {
    match value {
        Value::Null => JsonValue::Null,
        Value::Boolean(b) => JsonValue::Bool(b),
        Value::TinyInt(v) => v.into(),
        Value::SmallInt(v) => v.into(),
        Value::Int(v) => v.into(),
        Value::BigInt(v) => v.into(),
        Value::HugeInt(v) => i64::try_from(v)
            .map(JsonValue::from)
            .unwrap_or_else(|_| JsonValue::String(v.to_string())),
        Value::UTinyInt(v) => v.into(),
        Value::USmallInt(v) => v.into(),
        Value::UInt(v) => v.into(),
        Value::UBigInt(v) => v.into(),
        Value::Float(v) => json_float(f64::from(v)),
        Value::Double(v) => json_float(v),
        Value::Text(s) => JsonValue::String(s),
        Value::Date32(days) => days
            .checked_add(UNIX_EPOCH_DAYS_FROM_CE)
            .and_then(NaiveDate::from_num_days_from_ce_opt)
            .map(|d| JsonValue::String(d.format("%Y-%m-%d").to_string()))
            .unwrap_or(JsonValue::Null),
        Value::Timestamp(unit, v) => DateTime::from_timestamp_micros(micros(unit, v))
            .map(|dt| JsonValue::String(dt.format("%Y-%m-%d %H:%M:%S").to_string()))
            .unwrap_or(JsonValue::Null),
        other => {
            tracing::debug!(value = ?other, "Unsupported DuckDB value, rendering as text");
            JsonValue::String(format!("{:?}", other))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_converts_scalars() {
        assert_eq!(value_to_json(Value::Int(30)), json!(30));
        assert_eq!(value_to_json(Value::HugeInt(60)), json!(60));
        assert_eq!(value_to_json(Value::Double(1.5)), json!(1.5));
        assert_eq!(value_to_json(Value::Text("Bob".into())), json!("Bob"));
        assert_eq!(value_to_json(Value::Null), JsonValue::Null);
    }

    #[test]
    fn test_converts_dates_and_timestamps() {
        assert_eq!(value_to_json(Value::Date32(0)), json!("1970-01-01"));
        assert_eq!(
            value_to_json(Value::Timestamp(TimeUnit::Second, 86_400)),
            json!("1970-01-02 00:00:00")
        );
    }
}
