// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tabula_type::{Value, util::hex, value::datetime};

pub fn quote_ident(name: &str) -> String {
	format!("\"{}\"", name.replace('"', "\"\""))
}

pub fn quote_text(text: &str) -> String {
	format!("'{}'", text.replace('\'', "''"))
}

pub fn format_float(v: f64) -> String {
	if v.is_finite() {
		format!("{v}")
	} else {
		quote_text(&v.to_string())
	}
}

/// Renders a literal. Numbers are emitted bare, everything else quoted.
pub(crate) fn literal(value: &Value) -> String {
	match value {
		Value::Undefined => "NULL".to_string(),
		Value::Boolean(v) => (if *v { "TRUE" } else { "FALSE" }).to_string(),
		Value::Int1(v) => v.to_string(),
		Value::Int2(v) => v.to_string(),
		Value::Int4(v) => v.to_string(),
		Value::Int8(v) => v.to_string(),
		Value::Float4(v) => format_float(*v as f64),
		Value::Float8(v) => format_float(*v),
		Value::DateTime(v) => quote_text(&datetime::format(v)),
		Value::Utf8(v) => quote_text(v),
		Value::Blob(v) => format!("X'{}'", &hex::encode(v)[2..]),
	}
}

/// Like [`literal`], except numeric-shaped text is also emitted bare.
pub(crate) fn bare_literal(value: &Value) -> String {
	match value {
		Value::Utf8(text) if value.is_numeric_literal() => text.clone(),
		other => literal(other),
	}
}
