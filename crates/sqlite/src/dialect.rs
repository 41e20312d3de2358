// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tabula_core::Column;
use tabula_sql::{Dialect, quote_ident};
use tabula_type::Type;

pub struct SqliteDialect;

impl Dialect for SqliteDialect {
	fn name(&self) -> &'static str {
		"sqlite"
	}

	fn type_name(&self, ty: Type) -> &'static str {
		match ty {
			Type::Boolean | Type::Int1 | Type::Int2 | Type::Int4 | Type::Int8 => "INTEGER",
			Type::Float4 | Type::Float8 => "REAL",
			Type::DateTime | Type::Utf8 => "TEXT",
			Type::Blob => "BLOB",
		}
	}

	fn column_definition(&self, _table: &str, column: &Column, inline_key: bool) -> String {
		let field = quote_ident(&column.field);
		match (inline_key, column.auto_increment) {
			(true, true) => format!("{field} INTEGER PRIMARY KEY AUTOINCREMENT"),
			(true, false) => format!("{field} {} PRIMARY KEY", self.type_name(column.value_type)),
			_ => format!("{field} {}", self.type_name(column.value_type)),
		}
	}
}

#[cfg(test)]
mod tests {
	use tabula_core::{Columns, Table, TableMode};
	use tabula_sql::emit_create_table;

	use super::*;

	#[test]
	fn test_auto_increment_key() {
		let table = Table::new("wafer", TableMode::Sqlite).with_columns(
			Columns::new([
				Column::new("RowKey", Type::Int8).primary_key().auto_increment(),
				Column::new("Para_1", Type::Float8),
				Column::new("Ok", Type::Boolean),
			])
			.unwrap(),
		);
		assert_eq!(
			emit_create_table(&SqliteDialect, &table),
			vec![
				"CREATE TABLE IF NOT EXISTS \"wafer\" (\"RowKey\" INTEGER PRIMARY KEY AUTOINCREMENT, \"Para_1\" REAL, \"Ok\" INTEGER)"
					.to_string()
			]
		);
	}
}
