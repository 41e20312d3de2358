// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::cmp::Ordering;

use super::{Value, datetime};

impl Value {
	/// Ordering across compatible values. Integers compare exactly, mixed
	/// numerics as `f64`, and text is parsed when the other side is numeric
	/// or a datetime. Returns `None` when either side is undefined or the
	/// two values have no common representation.
	pub fn compare(&self, other: &Value) -> Option<Ordering> {
		match (self, other) {
			(Value::Undefined, _) | (_, Value::Undefined) => None,
			(Value::Boolean(l), Value::Boolean(r)) => Some(l.cmp(r)),
			(Value::Utf8(l), Value::Utf8(r)) => Some(l.cmp(r)),
			(Value::Blob(l), Value::Blob(r)) => Some(l.cmp(r)),
			(Value::DateTime(l), Value::DateTime(r)) => Some(l.cmp(r)),
			(Value::DateTime(l), Value::Utf8(r)) => datetime::parse(r).map(|r| l.cmp(&r)),
			(Value::Utf8(l), Value::DateTime(r)) => datetime::parse(l).map(|l| l.cmp(r)),
			(Value::DateTime(_), _) | (_, Value::DateTime(_)) => None,
			(Value::Blob(_), _) | (_, Value::Blob(_)) => None,
			_ => {
				if !matches!(self, Value::Float4(_) | Value::Float8(_))
					&& !matches!(other, Value::Float4(_) | Value::Float8(_))
				{
					if let (Some(l), Some(r)) = (self.as_i64(), other.as_i64()) {
						return Some(l.cmp(&r));
					}
				}
				let l = self.as_f64()?;
				let r = other.as_f64()?;
				l.partial_cmp(&r)
			}
		}
	}

	/// Equality under [`Value::compare`]; undefined never equals anything.
	pub fn matches(&self, other: &Value) -> bool {
		self.compare(other) == Some(Ordering::Equal)
	}
}
