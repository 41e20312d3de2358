// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use duckdb::{Connection, types::Value as DuckValue};
use tabula_core::{Columns, QuerySetting, Row, Table, TableMode};
use tabula_sql::{emit_count, emit_select};
use tabula_type::{Error, Result};

use crate::{duckdb_error, value::from_sql};

pub(crate) fn query(conn: &Connection, setting: &QuerySetting) -> Result<Table> {
	setting.validate()?;
	let projection = setting.projection();

	let mut result = Table::new(setting.table.name.clone(), TableMode::DuckDb)
		.with_original_table(setting.table_name())
		.with_columns(Columns::reindexed(projection.iter().copied())?);

	let mut stmt = conn.prepare(&emit_select(setting)).map_err(duckdb_error)?;
	let mut rows = stmt.query([]).map_err(duckdb_error)?;
	while let Some(row) = rows.next().map_err(duckdb_error)? {
		let values = projection
			.iter()
			.enumerate()
			.map(|(i, column)| {
				let raw: DuckValue = row.get(i).map_err(duckdb_error)?;
				Ok(from_sql(column.value_type, raw))
			})
			.collect::<Result<Vec<_>>>()?;
		result.push_row(Row::from_values(values))?;
	}

	Ok(result)
}

pub(crate) fn count(conn: &Connection, table: &str) -> Result<usize> {
	if table.is_empty() {
		return Err(Error::missing("table"));
	}
	let count: i64 = conn.query_row(&emit_count(table), [], |row| row.get(0)).map_err(duckdb_error)?;
	Ok(count as usize)
}
