// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Array-file backend.
//!
//! Storage offers nothing but whole-array reads and writes, so every
//! relational operation is carried out here: conditions by full column scans
//! combined through index-set intersection, projection by positional gather,
//! merges by reading both sides and rewriting the result.
//!
//! Deleted rows are remembered per table in this context only. They are never
//! written to the file, so a new context over the same file sees them again.

#![cfg_attr(not(debug_assertions), deny(warnings))]

mod config;
mod filter;
mod merge;
mod query;
mod write;

use std::collections::HashMap;

pub use config::ArrayFileConfig;
use tabula_core::{
	BackendContext, Column, ContextState, IndexSet, Lifecycle, MergeSetting, QuerySetting, Row, Table, TableMode,
	UpdateSetting,
};
use tabula_store_array::{ArrayData, ArrayFile, ArrayStore};
use tabula_type::{Error, Result};
use tracing::{debug, instrument};

pub(crate) const BACKEND: &str = "array";

pub struct ArrayContext {
	config: ArrayFileConfig,
	lifecycle: Lifecycle<ArrayFile>,
	deleted: HashMap<String, IndexSet>,
}

fn open<'a>(lifecycle: &'a mut Lifecycle<ArrayFile>, config: &ArrayFileConfig) -> Result<&'a mut ArrayFile> {
	lifecycle.ensure_open(|| config.open())
}

fn require_group(store: &ArrayFile, group: &str) -> Result<()> {
	if group.is_empty() {
		return Err(Error::missing("table"));
	}
	if !store.has_group(group) {
		return Err(Error::TableNotFound(group.to_string()));
	}
	Ok(())
}

impl ArrayContext {
	pub fn new(config: ArrayFileConfig) -> Self {
		Self {
			config,
			lifecycle: Lifecycle::new(),
			deleted: HashMap::new(),
		}
	}

	pub fn in_memory() -> Self {
		Self::new(ArrayFileConfig::in_memory())
	}

	pub fn config(&self) -> &ArrayFileConfig {
		&self.config
	}

	/// Storage positions deleted through this context.
	pub fn deleted_rows(&self, table: &str) -> Option<&IndexSet> {
		self.deleted.get(table)
	}

	fn store(&mut self) -> Result<&mut ArrayFile> {
		open(&mut self.lifecycle, &self.config)
	}
}

impl BackendContext for ArrayContext {
	fn mode(&self) -> TableMode {
		TableMode::ArrayFile
	}

	fn state(&self) -> ContextState {
		self.lifecycle.state()
	}

	/// Creates the group with one empty array per column. An existing group is left as is.
	#[instrument(name = "array::create_table", level = "debug", skip(self, table), fields(table = %table.original_table))]
	fn create_table(&mut self, table: &Table) -> Result<()> {
		table.validate()?;
		let store = self.store()?;
		if store.create_group(&table.original_table)? {
			for column in table.columns.iter() {
				store.write_array(
					&table.original_table,
					&column.field,
					ArrayData::new(column.value_type.storage_class()),
				)?;
			}
		}
		store.flush()
	}

	#[instrument(name = "array::add_columns", level = "debug", skip(self, setting), fields(table = %setting.table))]
	fn add_columns(&mut self, setting: &UpdateSetting) -> Result<()> {
		setting.validate_add_columns()?;
		if setting.rows.is_empty() {
			return Err(Error::missing("rows"));
		}
		let store = self.store()?;
		require_group(store, &setting.table)?;
		write::add_columns(store, setting)?;
		store.flush()
	}

	#[instrument(name = "array::write", level = "debug", skip(self, table, rows), fields(table = %table.original_table, rows = rows.len()))]
	fn write_rows(&mut self, table: &Table, rows: &[Row]) -> Result<usize> {
		table.validate()?;
		if rows.is_empty() {
			return Err(Error::missing("rows"));
		}
		let store = self.store()?;
		require_group(store, &table.original_table)?;
		let columns: Vec<&Column> = table.columns.iter().collect();
		let written = write::write_rows(store, &table.original_table, &columns, rows)?;
		store.flush()?;
		Ok(written)
	}

	fn update(&mut self, setting: &UpdateSetting) -> Result<usize> {
		setting.validate_update()?;
		Err(Error::unsupported(BACKEND, "update"))
	}

	/// Marks rows deleted, by storage position or, without positions, by
	/// conditions. Returns how many rows were newly marked.
	#[instrument(name = "array::delete", level = "debug", skip(self, setting), fields(table = %setting.table))]
	fn delete(&mut self, setting: &UpdateSetting) -> Result<usize> {
		let Self {
			config,
			lifecycle,
			deleted,
		} = self;

		let positions = if setting.row_indexes.is_empty() && !setting.conditions.is_empty() {
			setting.validate_delete_by_conditions()?;
			let store = open(lifecycle, config)?;
			require_group(store, &setting.table)?;
			let len = store.group_len(&setting.table)?;
			filter::filter(store, &setting.table, len, &setting.conditions)?.into_vec()
		} else {
			setting.validate_delete_by_index()?;
			let store = open(lifecycle, config)?;
			require_group(store, &setting.table)?;
			let len = store.group_len(&setting.table)?;
			if let Some(&index) = setting.row_indexes.iter().find(|&&i| i >= len) {
				return Err(Error::RowIndex {
					index,
					len,
				});
			}
			setting.row_indexes.clone()
		};

		let marked = deleted.entry(setting.table.clone()).or_default();
		let count = positions.into_iter().filter(|&position| marked.insert(position)).count();
		debug!(deleted = count, pending = marked.len(), "rows marked deleted");
		Ok(count)
	}

	#[instrument(name = "array::merge_rows", level = "debug", skip(self, setting), fields(left = %setting.left_table, right = %setting.right_table))]
	fn merge_rows(&mut self, setting: &MergeSetting) -> Result<usize> {
		setting.validate_rows()?;
		let Self {
			config,
			lifecycle,
			deleted,
		} = self;
		let store = open(lifecycle, config)?;
		require_group(store, &setting.left_table)?;
		require_group(store, &setting.right_table)?;

		let merged = merge::merge_rows(store, setting, deleted.get(&setting.right_table))?;
		store.flush()?;
		Ok(merged)
	}

	#[instrument(name = "array::append", level = "debug", skip(self, setting), fields(table = %setting.table))]
	fn append(&mut self, setting: &UpdateSetting) -> Result<usize> {
		setting.validate_append()?;
		if setting.update_columns.is_empty() {
			return Err(Error::missing("update_columns"));
		}
		let store = self.store()?;
		require_group(store, &setting.table)?;

		write::ensure_columns(store, &setting.table, &setting.new_columns)?;
		let columns: Vec<&Column> = setting.update_columns.iter().collect();
		let written = write::write_rows(store, &setting.table, &columns, &setting.rows)?;
		store.flush()?;
		Ok(written)
	}

	#[instrument(name = "array::merge_columns", level = "debug", skip(self, setting), fields(left = %setting.left_table, right = %setting.right_table))]
	fn merge_columns(&mut self, setting: &MergeSetting) -> Result<String> {
		setting.validate_columns()?;
		let Self {
			config,
			lifecycle,
			deleted,
		} = self;
		let store = open(lifecycle, config)?;
		require_group(store, &setting.left_table)?;
		require_group(store, &setting.right_table)?;

		let name = merge::merge_columns(
			store,
			setting,
			deleted.get(&setting.left_table),
			deleted.get(&setting.right_table),
		)?;
		store.flush()?;

		// the rebuilt group holds live rows only
		deleted.remove(&setting.left_table);
		Ok(name)
	}

	#[instrument(name = "array::query", level = "trace", skip(self, setting), fields(table = %setting.table_name()))]
	fn query(&mut self, setting: &QuerySetting) -> Result<Table> {
		setting.validate()?;
		let Self {
			config,
			lifecycle,
			deleted,
		} = self;
		let store = open(lifecycle, config)?;
		require_group(store, setting.table_name())?;
		query::query(store, setting, deleted.get(setting.table_name()))
	}

	#[instrument(name = "array::query_row_count", level = "trace", skip(self))]
	fn query_row_count(&mut self, table: &str) -> Result<usize> {
		let pending = self.deleted.get(table).map_or(0, |d| d.len());
		let store = self.store()?;
		require_group(store, table)?;
		Ok(store.group_len(table)?.saturating_sub(pending))
	}

	#[instrument(name = "array::drop_table", level = "debug", skip(self))]
	fn drop_table(&mut self, table: &str) -> Result<()> {
		if table.is_empty() {
			return Err(Error::missing("table"));
		}
		let store = self.store()?;
		store.drop_group(table)?;
		store.flush()?;
		self.deleted.remove(table);
		Ok(())
	}

	#[instrument(name = "array::rename", level = "debug", skip(self))]
	fn rename(&mut self, from: &str, to: &str) -> Result<()> {
		if from.is_empty() {
			return Err(Error::missing("table"));
		}
		if to.is_empty() {
			return Err(Error::missing("rename"));
		}
		let store = self.store()?;
		store.rename_group(from, to)?;
		store.flush()?;
		if let Some(pending) = self.deleted.remove(from) {
			self.deleted.insert(to.to_string(), pending);
		}
		Ok(())
	}

	fn execute(&mut self, _statement: &str) -> Result<usize> {
		Err(Error::unsupported(BACKEND, "execute"))
	}

	#[instrument(name = "array::close", level = "debug", skip(self))]
	fn close(&mut self) -> Result<()> {
		if let Some(mut store) = self.lifecycle.close() {
			store.flush()?;
		}
		self.deleted.clear();
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use tabula_core::{Columns, Condition, JoinKind, OrderDirection, QuerySetting, TableMode};
	use tabula_testing::{temp_dir, wafer_rows, wafer_table};
	use tabula_type::{Type, Value};

	use super::*;

	fn seeded(rows: usize) -> (ArrayContext, Table) {
		let mut ctx = ArrayContext::in_memory();
		let table = wafer_table("wafer", TableMode::ArrayFile);
		ctx.create_table(&table).unwrap();
		ctx.write_rows(&table, &wafer_rows(&table, rows)).unwrap();
		(ctx, table)
	}

	fn column(table: &Table, field: &str) -> Column {
		table.columns.require(field).unwrap().clone()
	}

	fn count(ctx: &mut ArrayContext, setting: QuerySetting) -> usize {
		ctx.query(&setting).unwrap().row_count()
	}

	#[test]
	fn test_opens_lazily() {
		let mut ctx = ArrayContext::in_memory();
		assert_eq!(ctx.state(), ContextState::Closed);
		ctx.create_table(&wafer_table("wafer", TableMode::ArrayFile)).unwrap();
		assert_eq!(ctx.state(), ContextState::Open);
	}

	#[test]
	fn test_write_then_query_roundtrip() {
		let (mut ctx, table) = seeded(6);
		let result = ctx.query(&QuerySetting::new(table.schema())).unwrap();

		assert_eq!(result.row_count(), 6);
		assert_eq!(result.mode, TableMode::ArrayFile);
		let expected = wafer_rows(&table, 6);
		for (row, expected) in result.rows.iter().zip(&expected) {
			assert_eq!(row.values(), expected.values());
		}
	}

	#[test]
	fn test_conditions_select_subsets() {
		let (mut ctx, table) = seeded(6);
		let wafer = column(&table, "WaferId");
		let die_x = column(&table, "DieX");
		let para_2 = column(&table, "Para_2");

		assert_eq!(count(&mut ctx, QuerySetting::new(table.schema()).with_condition(Condition::equal(wafer.clone(), "B"))), 1);
		assert_eq!(
			count(&mut ctx, QuerySetting::new(table.schema()).with_condition(Condition::in_list(wafer.clone(), ["A", "C"]))),
			2
		);
		assert_eq!(
			count(&mut ctx, QuerySetting::new(table.schema()).with_condition(Condition::between(die_x.clone(), 1, 3))),
			3
		);
		assert_eq!(count(&mut ctx, QuerySetting::new(table.schema()).with_condition(Condition::is_null(para_2))), 1);
		assert_eq!(
			count(&mut ctx, QuerySetting::new(table.schema()).with_condition(Condition::like(wafer.clone(), "%D%"))),
			1
		);
		assert_eq!(
			count(
				&mut ctx,
				QuerySetting::new(table.schema())
					.with_condition(Condition::greater_or_equal(die_x.clone(), 2))
					.with_condition(Condition::not_equal(wafer, "E"))
			),
			3
		);
	}

	#[test]
	fn test_or_behaves_as_and() {
		let (mut ctx, table) = seeded(6);
		let wafer = column(&table, "WaferId");
		let setting = QuerySetting::new(table.schema())
			.with_condition(Condition::equal(wafer.clone(), "A").or())
			.with_condition(Condition::equal(wafer, "B"));
		assert!(setting.has_or());
		assert_eq!(count(&mut ctx, setting), 0);
	}

	#[test]
	fn test_numeric_text_condition_against_integer_column() {
		let (mut ctx, table) = seeded(6);
		let setting = QuerySetting::new(table.schema())
			.with_condition(Condition::less_than(column(&table, "DieY"), Value::from("4")));
		assert_eq!(count(&mut ctx, setting), 2);
	}

	#[test]
	fn test_projection_reindexes_and_orders() {
		let (mut ctx, table) = seeded(4);
		let setting = QuerySetting::new(table.schema())
			.with_columns([column(&table, "Para_1"), column(&table, "WaferId")])
			.with_order_by(column(&table, "DieX").with_order(OrderDirection::Desc));
		let result = ctx.query(&setting).unwrap();

		assert_eq!(result.columns.fields(), vec!["Para_1", "WaferId"]);
		assert_eq!(result.columns[1].column_index, 1);
		assert_eq!(result.rows[0].values(), &[Value::Float8(1.5), Value::from("D")]);
		assert_eq!(result.rows[0].row_index, Some(3));
	}

	#[test]
	fn test_delete_excludes_rows_in_session() {
		let (mut ctx, table) = seeded(8);
		let deleted = ctx.delete(&UpdateSetting::new("wafer").with_row_indexes([5, 5, 6])).unwrap();
		assert_eq!(deleted, 2);

		let result = ctx.query(&QuerySetting::new(table.schema())).unwrap();
		assert_eq!(result.row_count(), 6);
		assert!(result.rows.iter().all(|r| r.row_index != Some(5)));
		assert_eq!(ctx.query_row_count("wafer").unwrap(), 6);
	}

	#[test]
	fn test_delete_by_conditions() {
		let (mut ctx, table) = seeded(6);
		let setting = UpdateSetting::new("wafer").with_conditions([Condition::less_than(column(&table, "DieX"), 2)]);
		assert_eq!(ctx.delete(&setting).unwrap(), 2);
		assert_eq!(ctx.query_row_count("wafer").unwrap(), 4);
	}

	#[test]
	fn test_delete_validates() {
		let (mut ctx, _) = seeded(3);
		let err = ctx.delete(&UpdateSetting::new("wafer")).unwrap_err();
		assert!(err.is_missing_argument());

		let err = ctx.delete(&UpdateSetting::new("wafer").with_row_indexes([3])).unwrap_err();
		assert_eq!(err.code(), "ROW_002");
	}

	#[test]
	fn test_deletes_are_not_persisted() {
		temp_dir(|dir| {
			let config = ArrayFileConfig::file(dir.join("wafer.arr"));
			let table = wafer_table("wafer", TableMode::ArrayFile);

			let mut ctx = ArrayContext::new(config.clone());
			ctx.create_table(&table).unwrap();
			ctx.write_rows(&table, &wafer_rows(&table, 8)).unwrap();
			ctx.delete(&UpdateSetting::new("wafer").with_row_indexes([5])).unwrap();
			assert_eq!(ctx.query(&QuerySetting::new(table.schema())).unwrap().row_count(), 7);
			ctx.close().unwrap();

			let mut reopened = ArrayContext::new(config);
			let result = reopened.query(&QuerySetting::new(table.schema())).unwrap();
			assert_eq!(result.row_count(), 8);
			assert!(result.rows.iter().any(|r| r.row_index == Some(5)));
			Ok(())
		})
		.unwrap();
	}

	#[test]
	fn test_update_and_execute_are_unsupported() {
		let (mut ctx, table) = seeded(2);
		let setting = UpdateSetting::new("wafer")
			.with_update_columns([column(&table, "Product")])
			.with_primary_columns([column(&table, "RowKey")])
			.with_rows(wafer_rows(&table, 1));
		assert!(ctx.update(&setting).unwrap_err().is_unsupported());
		assert!(ctx.execute("DELETE FROM wafer").unwrap_err().is_unsupported());
	}

	#[test]
	fn test_missing_arguments_fail_before_io() {
		let mut ctx = ArrayContext::in_memory();
		let table = Table::new("", TableMode::ArrayFile);

		assert!(ctx.create_table(&table).unwrap_err().is_missing_argument());
		assert!(ctx.update(&UpdateSetting::new("wafer")).unwrap_err().is_missing_argument());
		assert!(ctx.append(&UpdateSetting::new("wafer")).unwrap_err().is_missing_argument());
		assert!(ctx.merge_rows(&MergeSetting::new("a", "")).unwrap_err().is_missing_argument());
		assert_eq!(ctx.state(), ContextState::Closed);
	}

	#[test]
	fn test_add_columns_requires_rows() {
		let (mut ctx, _) = seeded(3);
		let setting = UpdateSetting::new("wafer").with_new_columns([Column::new("Bin", Type::Int4)]);
		let err = ctx.add_columns(&setting).unwrap_err();
		assert!(matches!(err, Error::MissingArgument { field: "rows" }));
	}

	#[test]
	fn test_add_columns_from_query_rows() {
		let (mut ctx, table) = seeded(4);
		let selected = ctx
			.query(
				&QuerySetting::new(table.schema())
					.with_columns([column(&table, "DieX")])
					.with_condition(Condition::greater_than(column(&table, "DieX"), 1)),
			)
			.unwrap();

		// reuse the selected rows, carrying their storage positions
		let bin = Column::new("Bin", Type::Int4);
		let rows: Vec<Row> =
			selected.rows.iter().map(|r| Row::from_values([Value::Int4(7)]).with_row_index(r.row_index.unwrap())).collect();
		ctx.add_columns(&UpdateSetting::new("wafer").with_new_columns([bin.clone()]).with_rows(rows)).unwrap();

		let result = ctx.query(&QuerySetting::new(table.schema()).with_columns([bin])).unwrap();
		let bins: Vec<&Value> = result.rows.iter().map(|r| &r[0]).collect();
		assert_eq!(bins, vec![&Value::Undefined, &Value::Undefined, &Value::Int4(7), &Value::Int4(7)]);
	}

	#[test]
	fn test_append_adds_columns_first() {
		let (mut ctx, table) = seeded(2);
		let mut lot = Column::new("Lot", Type::Utf8);
		lot.column_index = 1;
		let layout = [column(&table, "RowKey"), lot.clone()];

		let appended = ctx
			.append(
				&UpdateSetting::new("wafer")
					.with_update_columns(layout)
					.with_new_columns([lot.clone()])
					.with_rows([Row::from_values([Value::Int8(10), Value::from("L1")])]),
			)
			.unwrap();
		assert_eq!(appended, 1);
		assert_eq!(ctx.query_row_count("wafer").unwrap(), 3);

		let result = ctx.query(&QuerySetting::new(table.schema()).with_columns([lot])).unwrap();
		let lots: Vec<&Value> = result.rows.iter().map(|r| &r[0]).collect();
		assert_eq!(lots, vec![&Value::Undefined, &Value::Undefined, &Value::from("L1")]);
	}

	#[test]
	fn test_merge_rows_counts_union() {
		let (mut ctx, table) = seeded(4);
		let other = wafer_table("other", TableMode::ArrayFile);
		ctx.create_table(&other).unwrap();
		ctx.write_rows(&other, &wafer_rows(&other, 3)).unwrap();

		let setting = MergeSetting::new("wafer", "other")
			.with_left_columns(table.columns.iter().cloned())
			.with_right_columns(other.columns.iter().cloned());
		assert_eq!(ctx.merge_rows(&setting).unwrap(), 3);
		assert_eq!(ctx.query_row_count("wafer").unwrap(), 7);
	}

	#[test]
	fn test_merge_columns_left_join() {
		let (mut ctx, table) = seeded(3);
		let bins = Table::new("bins", TableMode::ArrayFile).with_columns(
			Columns::new([Column::new("X", Type::Int4), Column::new("Bin", Type::Int4)]).unwrap(),
		);
		ctx.create_table(&bins).unwrap();
		ctx.write_rows(
			&bins,
			&[Row::from_values([Value::Int4(0), Value::Int4(7)]), Row::from_values([Value::Int4(1), Value::Int4(8)])],
		)
		.unwrap();
		ctx.delete(&UpdateSetting::new("wafer").with_row_indexes([2])).unwrap();

		let setting = MergeSetting::new("wafer", "bins")
			.with_left_columns([column(&table, "RowKey"), column(&table, "DieX")])
			.with_right_columns([column(&bins, "Bin")])
			.with_match(column(&table, "DieX"), column(&bins, "X"))
			.with_join(JoinKind::Left);
		assert_eq!(ctx.merge_columns(&setting).unwrap(), "wafer");
		assert!(ctx.deleted_rows("wafer").is_none());

		let merged = Table::new("wafer", TableMode::ArrayFile).with_columns(
			Columns::new([column(&table, "RowKey"), column(&bins, "Bin")]).unwrap(),
		);
		let result = ctx.query(&QuerySetting::new(merged)).unwrap();
		assert_eq!(result.row_count(), 2);
		let bins: Vec<&Value> = result.rows.iter().map(|r| &r[1]).collect();
		assert_eq!(bins, vec![&Value::Int4(7), &Value::Int4(8)]);
	}

	#[test]
	fn test_rename_moves_pending_deletes() {
		let (mut ctx, table) = seeded(4);
		ctx.delete(&UpdateSetting::new("wafer").with_row_indexes([0])).unwrap();
		ctx.rename("wafer", "wafer_2").unwrap();

		assert_eq!(ctx.query_row_count("wafer_2").unwrap(), 3);
		assert_eq!(ctx.query_row_count("wafer").unwrap_err().code(), "CATALOG_001");

		let renamed = table.schema().with_original_table("wafer_2");
		assert_eq!(ctx.query(&QuerySetting::new(renamed)).unwrap().row_count(), 3);

		ctx.drop_table("wafer_2").unwrap();
		assert!(ctx.deleted_rows("wafer_2").is_none());
		assert_eq!(ctx.query_row_count("wafer_2").unwrap_err().code(), "CATALOG_001");
	}

	#[test]
	fn test_closed_context_rejects_calls() {
		let (mut ctx, table) = seeded(1);
		ctx.close().unwrap();
		assert_eq!(ctx.state(), ContextState::Closed);
		assert!(matches!(ctx.query(&QuerySetting::new(table.schema())), Err(Error::ContextClosed)));
	}
}
