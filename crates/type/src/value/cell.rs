// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Single dispatch table between semantic [`Type`]s and the three physical
//! storage classes. Both the write path ([`Type::encode`]) and the read path
//! ([`Type::decode`]) go through [`Type::coerce`], so the two directions
//! cannot drift apart.

use serde::{Deserialize, Serialize};

use super::{Type, Value, datetime};
use crate::{Error, Result, util::hex};

/// Physical representation of a column in storage without native types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StorageClass {
	/// Fixed-width 64-bit integer
	Integer,
	/// 64-bit floating point
	Float,
	/// Text, re-parsed on read
	Text,
}

/// One physical cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Cell {
	Null,
	Integer(i64),
	Float(f64),
	Text(String),
}

impl Cell {
	fn into_value(self) -> Value {
		match self {
			Cell::Null => Value::Undefined,
			Cell::Integer(v) => Value::Int8(v),
			Cell::Float(v) => Value::Float8(v),
			Cell::Text(v) => Value::Utf8(v),
		}
	}
}

impl Type {
	pub fn storage_class(&self) -> StorageClass {
		match self {
			Type::Boolean | Type::Int1 | Type::Int2 | Type::Int4 | Type::Int8 => StorageClass::Integer,
			Type::Float4 | Type::Float8 => StorageClass::Float,
			Type::DateTime | Type::Utf8 | Type::Blob => StorageClass::Text,
		}
	}

	/// Converts `value` into this type. Undefined stays undefined.
	pub fn coerce(&self, value: &Value) -> Result<Value> {
		if value.is_undefined() || value.get_type() == Some(*self) {
			return Ok(value.clone());
		}

		let fail = || Error::coercion(value, *self);

		let coerced = match self {
			Type::Boolean => Value::Boolean(match value {
				Value::Utf8(text) => match text.trim().to_ascii_lowercase().as_str() {
					"true" | "1" => true,
					"false" | "0" => false,
					_ => return Err(fail()),
				},
				other => other.as_i64().ok_or_else(fail)? != 0,
			}),
			Type::Int1 => Value::Int1(integer(value).and_then(|v| i8::try_from(v).ok()).ok_or_else(fail)?),
			Type::Int2 => Value::Int2(integer(value).and_then(|v| i16::try_from(v).ok()).ok_or_else(fail)?),
			Type::Int4 => Value::Int4(integer(value).and_then(|v| i32::try_from(v).ok()).ok_or_else(fail)?),
			Type::Int8 => Value::Int8(integer(value).ok_or_else(fail)?),
			Type::Float4 => Value::Float4(float(value).ok_or_else(fail)? as f32),
			Type::Float8 => Value::Float8(float(value).ok_or_else(fail)?),
			Type::DateTime => Value::DateTime(value.as_datetime().ok_or_else(fail)?),
			Type::Utf8 => Value::Utf8(value.to_string()),
			Type::Blob => Value::Blob(match value {
				Value::Utf8(text) => hex::decode(text).unwrap_or_else(|| text.as_bytes().to_vec()),
				_ => return Err(fail()),
			}),
		};

		Ok(coerced)
	}

	/// Write path: strict, a value that cannot be represented is an error.
	pub fn encode(&self, value: &Value) -> Result<Cell> {
		let cell = match self.coerce(value)? {
			Value::Undefined => Cell::Null,
			Value::Boolean(v) => Cell::Integer(v as i64),
			Value::Int1(v) => Cell::Integer(v as i64),
			Value::Int2(v) => Cell::Integer(v as i64),
			Value::Int4(v) => Cell::Integer(v as i64),
			Value::Int8(v) => Cell::Integer(v),
			Value::Float4(v) => Cell::Float(v as f64),
			Value::Float8(v) => Cell::Float(v),
			Value::DateTime(v) => Cell::Text(datetime::format(&v)),
			Value::Utf8(v) => Cell::Text(v),
			Value::Blob(v) => Cell::Text(hex::encode(&v)),
		};
		Ok(cell)
	}

	/// Read path: lenient, an unparsable cell reads back as undefined.
	pub fn decode(&self, cell: Cell) -> Value {
		self.coerce(&cell.into_value()).unwrap_or(Value::Undefined)
	}
}

fn integer(value: &Value) -> Option<i64> {
	match value {
		Value::Float4(_) | Value::Float8(_) => {
			let v = value.as_f64()?;
			(v.fract() == 0.0 && v >= i64::MIN as f64 && v <= i64::MAX as f64).then_some(v as i64)
		}
		Value::Utf8(text) => text.trim().parse().ok().or_else(|| integer(&Value::Float8(text.trim().parse().ok()?))),
		other => other.as_i64(),
	}
}

fn float(value: &Value) -> Option<f64> {
	match value {
		Value::DateTime(_) | Value::Blob(_) | Value::Undefined => None,
		other => other.as_f64(),
	}
}
