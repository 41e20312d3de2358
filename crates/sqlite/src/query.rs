// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use rusqlite::{Connection, types::Value as SqlValue};
use tabula_core::{Columns, QuerySetting, Row, Table, TableMode};
use tabula_sql::{emit_count, emit_select};
use tabula_type::{Error, Result};

use crate::{sqlite_error, value::from_sql};

pub(crate) fn query(conn: &Connection, setting: &QuerySetting) -> Result<Table> {
	setting.validate()?;
	let projection = setting.projection();

	let mut result = Table::new(setting.table.name.clone(), TableMode::Sqlite)
		.with_original_table(setting.table_name())
		.with_columns(Columns::reindexed(projection.iter().copied())?);

	let mut stmt = conn.prepare(&emit_select(setting)).map_err(sqlite_error)?;
	let mut rows = stmt.query([]).map_err(sqlite_error)?;
	while let Some(row) = rows.next().map_err(sqlite_error)? {
		let mut values = Vec::with_capacity(projection.len());
		for (i, column) in projection.iter().enumerate() {
			let raw: SqlValue = row.get(i).map_err(sqlite_error)?;
			values.push(from_sql(column.value_type, raw));
		}
		result.push_row(Row::from_values(values))?;
	}

	Ok(result)
}

pub(crate) fn count(conn: &Connection, table: &str) -> Result<usize> {
	if table.is_empty() {
		return Err(Error::missing("table"));
	}
	let count: i64 = conn.query_row(&emit_count(table), [], |row| row.get(0)).map_err(sqlite_error)?;
	Ok(count as usize)
}
