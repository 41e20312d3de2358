// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta};
use duckdb::types::{TimeUnit, Value as DuckValue};
use tabula_core::{Column, Row};
use tabula_type::{Error, Result, Type, Value};

/// Coerces `value` to the column type, then maps it onto the column's native DuckDB type.
pub(crate) fn to_sql(ty: Type, value: &Value) -> Result<DuckValue> {
	Ok(match ty.coerce(value)? {
		Value::Undefined => DuckValue::Null,
		Value::Boolean(v) => DuckValue::Boolean(v),
		Value::Int1(v) => DuckValue::Int(v as i32),
		Value::Int2(v) => DuckValue::Int(v as i32),
		Value::Int4(v) => DuckValue::Int(v),
		Value::Int8(v) => DuckValue::BigInt(v),
		Value::Float4(v) => DuckValue::Double(v as f64),
		Value::Float8(v) => DuckValue::Double(v),
		Value::DateTime(v) => DuckValue::Timestamp(TimeUnit::Microsecond, v.and_utc().timestamp_micros()),
		Value::Utf8(v) => DuckValue::Text(v),
		Value::Blob(v) => DuckValue::Blob(v),
	})
}

fn micros(unit: TimeUnit, value: i64) -> i64 {
	match unit {
		TimeUnit::Second => value.saturating_mul(1_000_000),
		TimeUnit::Millisecond => value.saturating_mul(1_000),
		TimeUnit::Microsecond => value,
		TimeUnit::Nanosecond => value / 1_000,
	}
}

fn timestamp(micros: i64) -> Option<NaiveDateTime> {
	DateTime::from_timestamp_micros(micros).map(|dt| dt.naive_utc())
}

fn date(days: i32) -> Option<NaiveDateTime> {
	NaiveDate::from_ymd_opt(1970, 1, 1)?.checked_add_signed(TimeDelta::days(days as i64))?.and_hms_opt(0, 0, 0)
}

/// Reads a driver value back as the column type. Unrepresentable cells become undefined.
pub(crate) fn from_sql(ty: Type, value: DuckValue) -> Value {
	let raw = match value {
		DuckValue::Null => Value::Undefined,
		DuckValue::Boolean(v) => Value::Boolean(v),
		DuckValue::TinyInt(v) => Value::Int8(v as i64),
		DuckValue::SmallInt(v) => Value::Int8(v as i64),
		DuckValue::Int(v) => Value::Int8(v as i64),
		DuckValue::BigInt(v) => Value::Int8(v),
		DuckValue::HugeInt(v) => i64::try_from(v).map(Value::Int8).unwrap_or(Value::Float8(v as f64)),
		DuckValue::UTinyInt(v) => Value::Int8(v as i64),
		DuckValue::USmallInt(v) => Value::Int8(v as i64),
		DuckValue::UInt(v) => Value::Int8(v as i64),
		DuckValue::UBigInt(v) => i64::try_from(v).map(Value::Int8).unwrap_or(Value::Float8(v as f64)),
		DuckValue::Float(v) => Value::Float8(v as f64),
		DuckValue::Double(v) => Value::Float8(v),
		DuckValue::Timestamp(unit, v) => timestamp(micros(unit, v)).map_or(Value::Undefined, Value::DateTime),
		DuckValue::Date32(v) => date(v).map_or(Value::Undefined, Value::DateTime),
		DuckValue::Text(v) => Value::Utf8(v),
		DuckValue::Blob(v) => Value::Blob(v),
		_ => Value::Undefined,
	};
	ty.coerce(&raw).unwrap_or(Value::Undefined)
}

/// Parameters for `columns`, read from `row` at each column's index.
pub(crate) fn bind<'a>(columns: impl IntoIterator<Item = &'a Column>, row: &Row) -> Result<Vec<DuckValue>> {
	columns
		.into_iter()
		.map(|column| {
			let value = row.get_by(column).ok_or(Error::RowWidth {
				expected: column.column_index + 1,
				actual: row.width(),
			})?;
			to_sql(column.value_type, value)
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use tabula_type::value::datetime;

	use super::*;

	#[test]
	fn test_native_boolean() {
		assert_eq!(to_sql(Type::Boolean, &Value::Int4(1)).unwrap(), DuckValue::Boolean(true));
		assert_eq!(from_sql(Type::Boolean, DuckValue::Boolean(false)), Value::Boolean(false));
	}

	#[test]
	fn test_timestamp_roundtrip() {
		let dt = datetime::parse("2025-01-02 03:04:05.250").unwrap();
		let stored = to_sql(Type::DateTime, &Value::DateTime(dt)).unwrap();
		assert_eq!(stored, DuckValue::Timestamp(TimeUnit::Microsecond, 1_735_787_045_250_000));
		assert_eq!(from_sql(Type::DateTime, stored), Value::DateTime(dt));
	}

	#[test]
	fn test_timestamp_units() {
		let seconds = from_sql(Type::DateTime, DuckValue::Timestamp(TimeUnit::Second, 86_400));
		assert_eq!(seconds, Value::DateTime(datetime::parse("1970-01-02 00:00:00").unwrap()));
		let day = from_sql(Type::DateTime, DuckValue::Date32(1));
		assert_eq!(day, seconds);
	}

	#[test]
	fn test_small_ints_widen_to_column_type() {
		assert_eq!(to_sql(Type::Int2, &Value::Int2(7)).unwrap(), DuckValue::Int(7));
		assert_eq!(from_sql(Type::Int2, DuckValue::Int(7)), Value::Int2(7));
		assert_eq!(from_sql(Type::Int1, DuckValue::Int(1000)), Value::Undefined);
	}

	#[test]
	fn test_text_from_numbers() {
		assert_eq!(from_sql(Type::Utf8, DuckValue::BigInt(42)), Value::from("42"));
	}
}
