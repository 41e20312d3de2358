// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Behaviour every backend shares, run against all three.

use tabula::{
	ArrayFileConfig, Column, Columns, Condition, Config, Error, MergeSetting, QuerySetting, Row, SharedContext, Table,
	TableMode, Type, UpdateSetting, Value, open,
};
use tabula_testing::{temp_dir, wafer_rows, wafer_table_unkeyed};

const MODES: [TableMode; 3] = [TableMode::Sqlite, TableMode::DuckDb, TableMode::ArrayFile];

fn seeded(mode: TableMode, name: &str, rows: usize) -> (SharedContext, Table) {
	let context = open(Config::in_memory(mode));
	let table = seed(&context, mode, name, rows);
	(context, table)
}

fn seed(context: &SharedContext, mode: TableMode, name: &str, rows: usize) -> Table {
	let table = wafer_table_unkeyed(name, mode).rebind(context);
	table.create().unwrap();
	table.write_rows(&wafer_rows(&table, rows)).unwrap();
	table
}

fn column(table: &Table, field: &str) -> Column {
	table.columns.require(field).unwrap().clone()
}

fn selected(table: &Table, condition: Condition) -> usize {
	table.query(&QuerySetting::new(table.schema()).with_condition(condition)).unwrap().row_count()
}

#[test]
fn test_written_rows_round_trip() {
	for mode in MODES {
		let (_context, table) = seeded(mode, "wafer", 8);
		let result = table.query_all().unwrap();

		assert_eq!(result.row_count(), 8, "{mode}");
		assert_eq!(result.mode, mode);
		for (row, expected) in result.rows.iter().zip(&wafer_rows(&table, 8)) {
			assert_eq!(row.values(), expected.values(), "{mode}");
		}
	}
}

#[test]
fn test_added_columns_read_back_as_their_type() {
	for mode in MODES {
		let (_context, mut table) = seeded(mode, "wafer", 4);
		let key = column(&table, "RowKey");
		let bin = table.add_column(Column::new("Bin", Type::Int2)).unwrap().clone();
		let passed = table.add_column(Column::new("Passed", Type::Boolean)).unwrap().clone();

		let rows: Vec<Row> = (0..4)
			.map(|i| {
				let mut row = table.new_row();
				row.set_by(&key, i as i64).unwrap();
				row.set_by(&bin, Value::Utf8(format!("{}", i * 3))).unwrap();
				row.set_by(&passed, if i == 2 { Value::Undefined } else { Value::Int4(i % 2) }).unwrap();
				row
			})
			.collect();
		table.add_columns(
			&UpdateSetting::new("wafer").with_new_columns([bin.clone(), passed.clone()]).with_primary_columns([key.clone()]).with_rows(rows),
		)
		.unwrap();

		let result = table
			.query(&QuerySetting::new(table.schema()).with_columns([bin, passed]).with_order_by(key))
			.unwrap();
		let values: Vec<&[Value]> = result.rows.iter().map(|r| r.values()).collect();
		assert_eq!(
			values,
			vec![
				&[Value::Int2(0), Value::Boolean(false)][..],
				&[Value::Int2(3), Value::Boolean(true)][..],
				&[Value::Int2(6), Value::Undefined][..],
				&[Value::Int2(9), Value::Boolean(true)][..],
			],
			"{mode}"
		);
	}
}

#[test]
fn test_conditions_select_expected_subsets() {
	for mode in MODES {
		let (_context, table) = seeded(mode, "wafer", 8);
		let wafer = column(&table, "WaferId");

		assert_eq!(selected(&table, Condition::equal(wafer.clone(), "B")), 1, "{mode}");
		assert_eq!(selected(&table, Condition::in_list(wafer, ["A", "C"])), 2, "{mode}");
		assert_eq!(selected(&table, Condition::between(column(&table, "DieX"), 1i32, 3i32)), 3, "{mode}");
		assert_eq!(selected(&table, Condition::is_null(column(&table, "Para_2"))), 2, "{mode}");
		assert_eq!(selected(&table, Condition::is_not_null(column(&table, "Para_2"))), 6, "{mode}");
	}
}

#[test]
fn test_merge_rows_adds_both_sides() {
	for mode in MODES {
		let (context, left) = seeded(mode, "wafer", 5);
		let right = seed(&context, mode, "retest", 3);

		let setting = MergeSetting::new("wafer", "retest")
			.with_left_columns(left.columns.iter().cloned())
			.with_right_columns(right.columns.iter().cloned());
		assert_eq!(left.merge_rows(&setting).unwrap(), 3, "{mode}");
		assert_eq!(left.query_row_count().unwrap(), 8, "{mode}");
	}
}

/// Table keyed by an engine-numbered `Id`, one row per wafer id.
fn seed_numbered(context: &SharedContext, mode: TableMode, name: &str, wafers: &[&str]) -> Table {
	let columns =
		Columns::new([Column::new("Id", Type::Int8).primary_key().auto_increment(), Column::new("WaferId", Type::Utf8)])
			.unwrap();
	let table = Table::new(name, mode).with_columns(columns).rebind(context);
	table.create().unwrap();

	let rows: Vec<Row> = wafers
		.iter()
		.map(|wafer| {
			let mut row = table.new_row();
			row.set(1, *wafer).unwrap();
			row
		})
		.collect();
	table.write_rows(&rows).unwrap();
	table
}

#[test]
fn test_merge_rows_renumbers_auto_increment_keys() {
	for mode in MODES {
		let context = open(Config::in_memory(mode));
		let left = seed_numbered(&context, mode, "wafer", &["A", "B"]);
		let right = seed_numbered(&context, mode, "retest", &["C", "D"]);

		let setting = MergeSetting::new("wafer", "retest")
			.with_left_columns(left.columns.iter().cloned())
			.with_right_columns(right.columns.iter().cloned());
		assert_eq!(left.merge_rows(&setting).unwrap(), 2, "{mode}");

		let id = column(&left, "Id");
		let result = left.query(&QuerySetting::new(left.schema()).with_order_by(id)).unwrap();
		let wafers: Vec<String> = result.rows.iter().map(|r| r[1].to_string()).collect();
		assert_eq!(wafers, ["A", "B", "C", "D"], "{mode}");

		let mut ids: Vec<i64> = result.rows.iter().filter_map(|r| r[0].as_i64()).collect();
		ids.dedup();
		assert_eq!(ids.len(), 4, "{mode}");
	}
}

#[test]
fn test_undefined_scalar_selects_every_row() {
	for mode in MODES {
		let (_context, table) = seeded(mode, "wafer", 3);
		let wafer = column(&table, "WaferId");
		assert_eq!(selected(&table, Condition::equal(wafer.clone(), Value::Undefined)), 3, "{mode}");
		assert_eq!(selected(&table, Condition::like(wafer, Value::Undefined)), 3, "{mode}");
	}
}

#[test]
fn test_like_ignores_case_and_matches_wildcards_literally() {
	for mode in MODES {
		let (_context, table) = seeded(mode, "wafer", 3);
		let wafer = column(&table, "WaferId");
		assert_eq!(selected(&table, Condition::like(wafer.clone(), "b")), 1, "{mode}");
		assert_eq!(selected(&table, Condition::like(wafer.clone(), "%B%")), 1, "{mode}");
		assert_eq!(selected(&table, Condition::like(wafer.clone(), "_")), 0, "{mode}");
		assert_eq!(selected(&table, Condition::like(column(&table, "Product"), "p1")), 3, "{mode}");
	}
}

#[test]
fn test_or_conditions_diverge_between_backends() {
	for mode in MODES {
		let (_context, table) = seeded(mode, "wafer", 4);
		let wafer = column(&table, "WaferId");
		let either = QuerySetting::new(table.schema())
			.with_condition(Condition::equal(wafer.clone(), "A").or())
			.with_condition(Condition::equal(wafer, "B"));
		let count = table.query(&either).unwrap().row_count();

		// the array engine intersects every condition
		let expected = if mode == TableMode::ArrayFile { 0 } else { 2 };
		assert_eq!(count, expected, "{mode}");
	}
}

#[test]
fn test_array_deletes_last_for_the_session_only() {
	temp_dir(|dir| {
		let config = Config::from(ArrayFileConfig::file(dir.join("wafer.arr")));
		{
			let context = open(config.clone());
			let table = seed(&context, TableMode::ArrayFile, "wafer", 8);
			assert_eq!(table.delete(&UpdateSetting::new("wafer").with_row_indexes([5])).unwrap(), 1);

			let keys: Vec<Value> = table.query_all().unwrap().rows.iter().map(|r| r[0].clone()).collect();
			assert_eq!(keys.len(), 7);
			assert!(!keys.contains(&Value::Int8(5)));
			context.lock().close().unwrap();
		}

		let context = open(config);
		let table = wafer_table_unkeyed("wafer", TableMode::ArrayFile).rebind(&context);
		let result = table.query_all().unwrap();
		assert_eq!(result.row_count(), 8);
		assert_eq!(result.rows[5][0], Value::Int8(5));
		Ok(())
	})
	.unwrap();
}

#[test]
fn test_array_declines_update() {
	let (_context, table) = seeded(TableMode::ArrayFile, "wafer", 2);
	let key = column(&table, "RowKey");
	let mut row = table.new_row();
	row.set_by(&key, 0i64).unwrap();
	let setting = UpdateSetting::new("wafer")
		.with_update_columns([column(&table, "Product")])
		.with_primary_columns([key])
		.with_rows([row]);

	let err = table.update(&setting).unwrap_err();
	assert!(err.is_unsupported());
	assert!(table.execute("VACUUM").unwrap_err().is_unsupported());
}

#[test]
fn test_dropped_context_unbinds_tables() {
	for mode in MODES {
		let (context, table) = seeded(mode, "wafer", 1);
		drop(context);
		assert!(!table.is_bound());
		assert!(matches!(table.query_all(), Err(Error::ContextUnbound)));
	}
}

#[test]
fn test_missing_arguments_are_reported_before_io() {
	for mode in MODES {
		let context = open(Config::in_memory(mode));
		let table = Table::new("", mode).rebind(&context);
		assert!(table.create().unwrap_err().is_missing_argument(), "{mode}");
		assert!(table.merge_columns(&MergeSetting::new("a", "b")).unwrap_err().is_missing_argument(), "{mode}");
		assert_eq!(context.lock().state(), tabula::ContextState::Closed, "{mode}");
	}
}
