// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{fmt, str::FromStr};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::Error;

/// Semantic type tag carried by every column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
	Boolean,
	/// 1-byte signed integer
	Int1,
	/// 2-byte signed integer
	Int2,
	/// 4-byte signed integer
	Int4,
	/// 8-byte signed integer
	Int8,
	/// 4-byte floating point
	Float4,
	/// 8-byte floating point
	Float8,
	/// Date and time without a zone
	DateTime,
	Utf8,
	Blob,
}

impl Type {
	pub fn is_integer(&self) -> bool {
		matches!(self, Type::Int1 | Type::Int2 | Type::Int4 | Type::Int8)
	}

	pub fn is_float(&self) -> bool {
		matches!(self, Type::Float4 | Type::Float8)
	}

	pub fn is_number(&self) -> bool {
		self.is_integer() || self.is_float()
	}
}

impl fmt::Display for Type {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Type::Boolean => "Boolean",
			Type::Int1 => "Int1",
			Type::Int2 => "Int2",
			Type::Int4 => "Int4",
			Type::Int8 => "Int8",
			Type::Float4 => "Float4",
			Type::Float8 => "Float8",
			Type::DateTime => "DateTime",
			Type::Utf8 => "Utf8",
			Type::Blob => "Blob",
		};
		f.write_str(name)
	}
}

impl FromStr for Type {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"boolean" | "bool" => Ok(Type::Boolean),
			"int1" | "byte" => Ok(Type::Int1),
			"int2" | "short" => Ok(Type::Int2),
			"int4" | "int" | "integer" => Ok(Type::Int4),
			"int8" | "long" => Ok(Type::Int8),
			"float4" | "float" => Ok(Type::Float4),
			"float8" | "double" | "decimal" => Ok(Type::Float8),
			"datetime" | "timestamp" => Ok(Type::DateTime),
			"utf8" | "string" | "text" => Ok(Type::Utf8),
			"blob" | "object" => Ok(Type::Blob),
			_ => Err(Error::Serde(format!("unknown type '{s}'"))),
		}
	}
}

/// Maps a native Rust type to its [`Type`] tag.
pub trait GetType {
	fn get_type() -> Type;
}

macro_rules! impl_get_type {
	($($ty:ty => $variant:ident),* $(,)?) => {
		$(
			impl GetType for $ty {
				fn get_type() -> Type {
					Type::$variant
				}
			}
		)*
	};
}

impl_get_type! {
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
