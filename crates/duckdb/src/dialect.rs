// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tabula_core::{Column, Table};
use tabula_sql::{Dialect, quote_ident, quote_text};
use tabula_type::Type;

/// DuckDB has no `AUTOINCREMENT`; such columns draw from a per-column sequence.
pub struct DuckDbDialect;

pub(crate) fn sequence_name(table: &str, column: &Column) -> String {
	format!("seq_{table}_{}", column.field)
}

impl Dialect for DuckDbDialect {
	fn name(&self) -> &'static str {
		"duckdb"
	}

	fn type_name(&self, ty: Type) -> &'static str {
		match ty {
			Type::Boolean => "BOOLEAN",
			Type::Int1 | Type::Int2 | Type::Int4 => "INTEGER",
			Type::Int8 => "BIGINT",
			Type::Float4 | Type::Float8 => "DOUBLE",
			Type::DateTime => "TIMESTAMP",
			Type::Utf8 => "VARCHAR",
			Type::Blob => "BLOB",
		}
	}

	fn column_definition(&self, table: &str, column: &Column, inline_key: bool) -> String {
		let mut definition = format!("{} {}", quote_ident(&column.field), self.type_name(column.value_type));
		if column.auto_increment {
			definition.push_str(&format!(" DEFAULT nextval({})", quote_text(&sequence_name(table, column))));
		}
		if inline_key {
			definition.push_str(" PRIMARY KEY");
		}
		definition
	}

	fn prepare_create(&self, table: &Table) -> Vec<String> {
		table.columns
			.iter()
			.filter(|c| c.auto_increment)
			.map(|c| {
				format!("CREATE SEQUENCE IF NOT EXISTS {}", quote_ident(&sequence_name(&table.original_table, c)))
			})
			.collect()
	}
}
