// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tabula_core::{Column, MergeSetting, QuerySetting, Table};
use tabula_type::{Error, Result};

use crate::{Dialect, emit_order_by, emit_where, quote_ident};

/// Statements creating `table.original_table`, preparation statements first.
pub fn emit_create_table(dialect: &dyn Dialect, table: &Table) -> Vec<String> {
	let name = &table.original_table;
	let keys = table.columns.primary_keys();
	let inline_key = keys.len() == 1;

	let mut parts: Vec<String> = table
		.columns
		.iter()
		.map(|c| dialect.column_definition(name, c, inline_key && c.primary_key))
		.collect();

	if keys.len() > 1 {
		let fields: Vec<String> = keys.iter().map(|c| quote_ident(&c.field)).collect();
		parts.push(format!("PRIMARY KEY ({})", fields.join(", ")));
	}

	let mut statements = dialect.prepare_create(table);
	statements.push(format!("CREATE TABLE IF NOT EXISTS {} ({})", quote_ident(name), parts.join(", ")));
	statements
}

pub fn emit_add_column(dialect: &dyn Dialect, table: &str, column: &Column) -> String {
	format!("ALTER TABLE {} ADD COLUMN {}", quote_ident(table), dialect.column_definition(table, column, false))
}

pub fn emit_rename(from: &str, to: &str) -> String {
	format!("ALTER TABLE {} RENAME TO {}", quote_ident(from), quote_ident(to))
}

pub fn emit_drop_table(table: &str) -> String {
	format!("DROP TABLE IF EXISTS {}", quote_ident(table))
}

/// Columns a write binds values for. Auto-increment columns are left to the engine.
pub fn writable_columns(table: &Table) -> Vec<&Column> {
	table.columns.iter().filter(|c| !c.auto_increment).collect()
}

fn placeholders(count: usize) -> String {
	vec!["?"; count].join(", ")
}

fn field_list(columns: &[&Column]) -> String {
	columns.iter().map(|c| quote_ident(&c.field)).collect::<Vec<_>>().join(", ")
}

pub fn emit_insert(table: &str, columns: &[&Column]) -> String {
	format!("INSERT INTO {} ({}) VALUES ({})", quote_ident(table), field_list(columns), placeholders(columns.len()))
}

/// Parameters bind update columns first, then primary-key columns.
pub fn emit_update(table: &str, update_columns: &[Column], primary_columns: &[Column]) -> String {
	let set: Vec<String> = update_columns.iter().map(|c| format!("{} = ?", quote_ident(&c.field))).collect();
	let key: Vec<String> = primary_columns.iter().map(|c| format!("{} = ?", quote_ident(&c.field))).collect();
	format!("UPDATE {} SET {} WHERE {}", quote_ident(table), set.join(", "), key.join(" AND "))
}

/// Refuses to emit an unfiltered delete.
pub fn emit_delete(table: &str, conditions: &[tabula_core::Condition]) -> Result<String> {
	let filter = emit_where(conditions).ok_or_else(|| Error::missing("conditions"))?;
	Ok(format!("DELETE FROM {} {filter}", quote_ident(table)))
}

pub fn emit_select(setting: &QuerySetting) -> String {
	let mut sql =
		format!("SELECT {} FROM {}", field_list(&setting.projection()), quote_ident(setting.table_name()));
	if let Some(filter) = emit_where(&setting.conditions) {
		sql.push(' ');
		sql.push_str(&filter);
	}
	if let Some(order) = emit_order_by(&setting.order_by) {
		sql.push(' ');
		sql.push_str(&order);
	}
	sql
}

pub fn emit_count(table: &str) -> String {
	format!("SELECT COUNT(*) FROM {}", quote_ident(table))
}

/// Row union: `left_columns[i]` receives `right_columns[i]`. Pairs with an
/// auto-increment side are dropped so the engine numbers the new rows.
pub fn emit_merge_rows(setting: &MergeSetting) -> String {
	let (left, right): (Vec<&Column>, Vec<&Column>) = setting
		.left_columns
		.iter()
		.zip(&setting.right_columns)
		.filter(|(l, r)| !l.auto_increment && !r.auto_increment)
		.unzip();
	format!(
		"INSERT INTO {} ({}) SELECT {} FROM {}",
		quote_ident(&setting.left_table),
		field_list(&left),
		field_list(&right),
		quote_ident(&setting.right_table)
	)
}

/// Materializes the join of `source` (the renamed left table) and the
/// right table under the left table's name. Match pairs are combined with AND.
pub fn emit_merge_columns(setting: &MergeSetting, source: &str) -> String {
	let mut projection: Vec<String> =
		setting.left_columns.iter().map(|c| format!("L.{}", quote_ident(&c.field))).collect();
	for (column, output) in setting.right_columns.iter().zip(setting.right_output_fields()) {
		projection.push(format!("R.{} AS {}", quote_ident(&column.field), quote_ident(&output)));
	}

	let on: Vec<String> = setting
		.match_columns
		.iter()
		.map(|(l, r)| format!("L.{} = R.{}", quote_ident(&l.field), quote_ident(&r.field)))
		.collect();

	format!(
		"CREATE TABLE {} AS SELECT {} FROM {} AS L {} {} AS R ON {}",
		quote_ident(&setting.left_table),
		projection.join(", "),
		quote_ident(source),
		setting.join.keyword(),
		quote_ident(&setting.right_table),
		on.join(" AND ")
	)
}

/// The rename, create and drop statements of a column merge, in order.
pub struct MergeColumnsPlan {
	pub backup: String,
	pub statements: Vec<String>,
}

pub fn plan_merge_columns(setting: &MergeSetting) -> MergeColumnsPlan {
	let backup = setting.backup_table();
	let statements = vec![
		emit_rename(&setting.left_table, &backup),
		emit_merge_columns(setting, &backup),
		emit_drop_table(&backup),
	];
	MergeColumnsPlan {
		backup,
		statements,
	}
}
