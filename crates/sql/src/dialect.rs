// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tabula_core::{Column, Table};
use tabula_type::Type;

use crate::quote_ident;

/// The parts of DDL that differ between SQL engines.
pub trait Dialect {
	fn name(&self) -> &'static str;

	fn type_name(&self, ty: Type) -> &'static str;

	/// Column clause for `CREATE TABLE` and `ADD COLUMN`. `inline_key` is set
	/// when this column is the table's only primary-key column.
	fn column_definition(&self, table: &str, column: &Column, inline_key: bool) -> String {
		let _ = table;
		let mut definition = format!("{} {}", quote_ident(&column.field), self.type_name(column.value_type));
		if inline_key {
			definition.push_str(" PRIMARY KEY");
		}
		definition
	}

	/// Statements to run before `CREATE TABLE`.
	fn prepare_create(&self, table: &Table) -> Vec<String> {
		let _ = table;
		Vec::new()
	}
}
