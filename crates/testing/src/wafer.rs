// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Wafer-map fixture: one row per die.
//!
//! Row `i` has `RowKey = i`, `WaferId` = the `i`-th capital letter,
//! `DieX = OrigX = i`, `DieY = OrigY = 2i`, `Product = "P1"`,
//! `Para_1 = i / 2` and `Para_2 = 1.25 i`, undefined for every fourth row.

use tabula_core::{Column, Columns, Row, Table, TableMode};
use tabula_type::{Type, Value};

pub fn wafer_columns() -> Columns {
	let columns = [
		Column::new("RowKey", Type::Int8).primary_key(),
		Column::new("WaferId", Type::Utf8),
		Column::new("DieX", Type::Int4),
		Column::new("DieY", Type::Int4),
		Column::new("OrigX", Type::Int4),
		Column::new("OrigY", Type::Int4),
		Column::new("Product", Type::Utf8),
		Column::new("Para_1", Type::Float8),
		Column::new("Para_2", Type::Float8),
	];
	Columns::new(columns).expect("wafer columns are unique")
}

pub fn wafer_table(name: &str, mode: TableMode) -> Table {
	Table::new(name, mode).with_columns(wafer_columns())
}

/// Wafer table without a primary key, for engines that restrict altering keyed tables.
pub fn wafer_table_unkeyed(name: &str, mode: TableMode) -> Table {
	let wafer = wafer_columns();
	let columns = wafer.iter().cloned().map(|mut column| {
		column.primary_key = false;
		column
	});
	Table::new(name, mode).with_columns(Columns::new(columns).expect("wafer columns are unique"))
}

fn wafer_id(i: usize) -> String {
	if i < 26 { ((b'A' + i as u8) as char).to_string() } else { format!("W{i}") }
}

/// `count` rows laid out per `table.columns`. Columns beyond the fixture
/// stay undefined.
pub fn wafer_rows(table: &Table, count: usize) -> Vec<Row> {
	(0..count)
		.map(|i| {
			let mut row = table.new_row();
			for column in table.columns.iter() {
				let value = match column.field.as_str() {
					"RowKey" => Value::Int8(i as i64),
					"WaferId" => Value::Utf8(wafer_id(i)),
					"DieX" | "OrigX" => Value::Int4(i as i32),
					"DieY" | "OrigY" => Value::Int4(i as i32 * 2),
					"Product" => Value::from("P1"),
					"Para_1" => Value::Float8(i as f64 / 2.0),
					"Para_2" if i % 4 == 3 => Value::Undefined,
					"Para_2" => Value::Float8(i as f64 * 1.25),
					_ => Value::Undefined,
				};
				row.values_mut()[column.column_index] = value;
			}
			row
		})
		.collect()
}
