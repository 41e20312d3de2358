// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

mod cell;
mod compare;
pub mod datetime;
mod r#type;

pub use cell::{Cell, StorageClass};
pub use r#type::{GetType, Type};

use crate::util::hex;

/// A single cell value held by a row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
pub enum Value {
	/// Null or missing
	#[default]
	Undefined,
	Boolean(bool),
	Int1(i8),
	Int2(i16),
	Int4(i32),
	Int8(i64),
	Float4(f32),
	Float8(f64),
	DateTime(NaiveDateTime),
	Utf8(String),
	Blob(Vec<u8>),
}

impl Value {
	pub fn undefined() -> Self {
		Value::Undefined
	}

	pub fn utf8(value: impl Into<String>) -> Self {
		Value::Utf8(value.into())
	}

	pub fn is_undefined(&self) -> bool {
		matches!(self, Value::Undefined)
	}

	/// Type tag of the held value, `None` for [`Value::Undefined`].
	pub fn get_type(&self) -> Option<Type> {
		Some(match self {
			Value::Undefined => return None,
			Value::Boolean(_) => Type::Boolean,
			Value::Int1(_) => Type::Int1,
			Value::Int2(_) => Type::Int2,
			Value::Int4(_) => Type::Int4,
			Value::Int8(_) => Type::Int8,
			Value::Float4(_) => Type::Float4,
			Value::Float8(_) => Type::Float8,
			Value::DateTime(_) => Type::DateTime,
			Value::Utf8(_) => Type::Utf8,
			Value::Blob(_) => Type::Blob,
		})
	}

	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Value::Boolean(v) => Some(*v),
			_ => None,
		}
	}

	/// Integer view for integer-like values. Text is parsed.
	pub fn as_i64(&self) -> Option<i64> {
		match self {
			Value::Boolean(v) => Some(*v as i64),
			Value::Int1(v) => Some(*v as i64),
			Value::Int2(v) => Some(*v as i64),
			Value::Int4(v) => Some(*v as i64),
			Value::Int8(v) => Some(*v),
			Value::Utf8(v) => v.trim().parse().ok(),
			_ => None,
		}
	}

	/// Floating view for any numeric value. Text is parsed.
	pub fn as_f64(&self) -> Option<f64> {
		match self {
			Value::Float4(v) => Some(*v as f64),
			Value::Float8(v) => Some(*v),
			Value::Utf8(v) => v.trim().parse().ok(),
			other => other.as_i64().map(|v| v as f64),
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::Utf8(v) => Some(v.as_str()),
			_ => None,
		}
	}

	pub fn as_datetime(&self) -> Option<NaiveDateTime> {
		match self {
			Value::DateTime(v) => Some(*v),
			Value::Utf8(v) => datetime::parse(v),
			_ => None,
		}
	}

	/// True for literals shaped like `[-+]?digits(.digits)?`.
	pub fn is_numeric_literal(&self) -> bool {
		match self {
			Value::Int1(_)
			| Value::Int2(_)
			| Value::Int4(_)
			| Value::Int8(_)
			| Value::Float4(_)
			| Value::Float8(_) => true,
			Value::Utf8(text) => is_numeric_text(text),
			_ => false,
		}
	}
}

fn is_numeric_text(text: &str) -> bool {
	let unsigned = text.strip_prefix(['-', '+']).unwrap_or(text);
	let (whole, fraction) = match unsigned.split_once('.') {
		Some((whole, fraction)) => (whole, Some(fraction)),
		None => (unsigned, None),
	};
	let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
	digits(whole) && fraction.is_none_or(digits)
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Value::Undefined => f.write_str("undefined"),
			Value::Boolean(v) => write!(f, "{v}"),
			Value::Int1(v) => write!(f, "{v}"),
			Value::Int2(v) => write!(f, "{v}"),
			Value::Int4(v) => write!(f, "{v}"),
			Value::Int8(v) => write!(f, "{v}"),
			Value::Float4(v) => write!(f, "{v}"),
			Value::Float8(v) => write!(f, "{v}"),
			Value::DateTime(v) => f.write_str(&datetime::format(v)),
			Value::Utf8(v) => f.write_str(v),
			Value::Blob(v) => f.write_str(&hex::encode(v)),
		}
	}
}

macro_rules! impl_from {
	($($ty:ty => $variant:ident),* $(,)?) => {
		$(
			impl From<$ty> for Value {
				fn from(value: $ty) -> Self {
					Value::$variant(value)
				}
			}
		)*
	};
}

impl_from! {
	bool => Boolean,
	i8 => Int1,
	i16 => Int2,
	i32 => Int4,
	i64 => Int8,
	f32 => Float4,
	f64 => Float8,
	NaiveDateTime => DateTime,
	String => Utf8,
	Vec<u8> => Blob,
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Value::Utf8(value.to_string())
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(value: Option<T>) -> Self {
		value.map(Into::into).unwrap_or(Value::Undefined)
	}
}
