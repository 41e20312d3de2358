// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tabula_core::{Column, Condition, Operator, OrderDirection};
use tabula_type::Value;
use tracing::trace;

use crate::{
	literal::{bare_literal, literal},
	quote_ident,
};

/// Compiles one condition. Returns `None` for a no-op condition, such as an
/// undefined scalar or a `Between` without exactly two bounds.
pub fn emit_condition(condition: &Condition) -> Option<String> {
	let field = quote_ident(condition.field());
	let value = &condition.value;
	let scalar = || value.scalar().filter(|v| !v.is_undefined());

	let fragment = match condition.operator {
		Operator::IsNull => format!("{field} IS NULL"),
		Operator::IsNotNull => format!("{field} IS NOT NULL"),
		Operator::Equal => format!("{field} = {}", literal(scalar()?)),
		Operator::NotEqual => format!("{field} <> {}", literal(scalar()?)),
		Operator::Like => {
			let pattern = like_pattern(&scalar()?.to_string());
			format!("LOWER(CAST({field} AS VARCHAR)) LIKE '%{pattern}%' ESCAPE '\\'")
		}
		Operator::In => {
			let list = value.list().filter(|l| !l.is_empty())?;
			let items: Vec<String> = if list[0].is_numeric_literal() {
				list.iter().filter(|v| v.is_numeric_literal()).map(bare_literal).collect()
			} else {
				list.iter().map(|v| literal(&Value::Utf8(v.to_string()))).collect()
			};
			format!("{field} IN ({})", items.join(", "))
		}
		Operator::Between | Operator::NotBetween => {
			let (low, high) = value.bounds()?;
			let not = if condition.operator == Operator::NotBetween { "NOT " } else { "" };
			format!("{field} {not}BETWEEN {} AND {}", bare_literal(low), bare_literal(high))
		}
		Operator::LessThan => format!("{field} < {}", bare_literal(scalar()?)),
		Operator::LessOrEqual => format!("{field} <= {}", bare_literal(scalar()?)),
		Operator::GreaterThan => format!("{field} > {}", bare_literal(scalar()?)),
		Operator::GreaterOrEqual => format!("{field} >= {}", bare_literal(scalar()?)),
	};

	Some(fragment)
}

/// Case-folded substring pattern with `%`, `_` and `\` matched literally.
fn like_pattern(text: &str) -> String {
	let mut pattern = String::with_capacity(text.len());
	for c in text.trim_matches('%').to_ascii_lowercase().chars() {
		match c {
			'%' | '_' | '\\' => {
				pattern.push('\\');
				pattern.push(c);
			}
			'\'' => pattern.push_str("''"),
			c => pattern.push(c),
		}
	}
	pattern
}

/// `WHERE` clause combining conditions left to right, each joined to the
/// next by its own join operator. `None` when nothing remains.
pub fn emit_where(conditions: &[Condition]) -> Option<String> {
	let mut clause = String::new();
	let mut pending_join: Option<&str> = None;

	for condition in conditions {
		let Some(fragment) = emit_condition(condition) else {
			trace!(field = condition.field(), operator = ?condition.operator, "skipping no-op condition");
			continue;
		};
		if let Some(join) = pending_join {
			clause.push(' ');
			clause.push_str(join);
			clause.push(' ');
		}
		clause.push_str(&fragment);
		pending_join = Some(condition.join.keyword());
	}

	(!clause.is_empty()).then(|| format!("WHERE {clause}"))
}

pub fn emit_order_by(columns: &[Column]) -> Option<String> {
	if columns.is_empty() {
		return None;
	}
	let keys: Vec<String> = columns
		.iter()
		.map(|c| format!("{} {}", quote_ident(&c.field), c.order.unwrap_or(OrderDirection::Asc).keyword()))
		.collect();
	Some(format!("ORDER BY {}", keys.join(", ")))
}
