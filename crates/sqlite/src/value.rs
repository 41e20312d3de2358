// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use rusqlite::types::Value as SqlValue;
use tabula_core::{Column, Row};
use tabula_type::{Error, Result, Type, Value, value::datetime};

/// Coerces `value` to the column type, then maps it to a driver value.
pub(crate) fn to_sql(ty: Type, value: &Value) -> Result<SqlValue> {
	Ok(match ty.coerce(value)? {
		Value::Undefined => SqlValue::Null,
		Value::Boolean(v) => SqlValue::Integer(v as i64),
		Value::Int1(v) => SqlValue::Integer(v as i64),
		Value::Int2(v) => SqlValue::Integer(v as i64),
		Value::Int4(v) => SqlValue::Integer(v as i64),
		Value::Int8(v) => SqlValue::Integer(v),
		Value::Float4(v) => SqlValue::Real(v as f64),
		Value::Float8(v) => SqlValue::Real(v),
		Value::DateTime(v) => SqlValue::Text(datetime::format(&v)),
		Value::Utf8(v) => SqlValue::Text(v),
		Value::Blob(v) => SqlValue::Blob(v),
	})
}

/// Reads a driver value back as the column type. Unparsable cells become undefined.
pub(crate) fn from_sql(ty: Type, value: SqlValue) -> Value {
	let raw = match value {
		SqlValue::Null => Value::Undefined,
		SqlValue::Integer(v) => Value::Int8(v),
		SqlValue::Real(v) => Value::Float8(v),
		SqlValue::Text(v) => Value::Utf8(v),
		SqlValue::Blob(v) => Value::Blob(v),
	};
	ty.coerce(&raw).unwrap_or(Value::Undefined)
}

/// Parameters for `columns`, read from `row` at each column's index.
pub(crate) fn bind<'a>(columns: impl IntoIterator<Item = &'a Column>, row: &Row) -> Result<Vec<SqlValue>> {
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
