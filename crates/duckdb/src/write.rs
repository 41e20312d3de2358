// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use duckdb::{Connection, appender_params_from_iter, params_from_iter};
use tabula_core::{Column, Row, Table, UpdateSetting};
use tabula_sql::{emit_delete, emit_insert, emit_update, writable_columns};
use tabula_type::{Error, Result};
use tracing::trace;

use crate::{
	connection::in_transaction,
	duckdb_error,
	schema::{alter, table_fields},
	value::bind,
};

pub(crate) fn write_rows(conn: &mut Connection, table: &Table, rows: &[Row]) -> Result<usize> {
	table.validate()?;
	if rows.is_empty() {
		return Err(Error::missing("rows"));
	}
	let columns = writable_columns(table);
	in_transaction(conn, |tx| insert_rows(tx, &table.original_table, &columns, rows))
}

/// Bulk-loads through the appender when `columns` cover the stored table in
/// order; otherwise falls back to one parameterized insert per row.
pub(crate) fn insert_rows(conn: &Connection, table: &str, columns: &[&Column], rows: &[Row]) -> Result<usize> {
	let stored = table_fields(conn, table)?;
	let covers = stored.len() == columns.len() && stored.iter().zip(columns).all(|(s, c)| *s == c.field);

	if covers {
		trace!(table, rows = rows.len(), "appending rows");
		let mut appender = conn.appender(table).map_err(duckdb_error)?;
		for row in rows {
			let params = bind(columns.iter().copied(), row)?;
			appender.append_row(appender_params_from_iter(params)).map_err(duckdb_error)?;
		}
		appender.flush().map_err(duckdb_error)?;
	} else {
		trace!(table, rows = rows.len(), "inserting rows");
		let mut stmt = conn.prepare(&emit_insert(table, columns)).map_err(duckdb_error)?;
		for row in rows {
			let params = bind(columns.iter().copied(), row)?;
			stmt.execute(params_from_iter(params)).map_err(duckdb_error)?;
		}
	}
	Ok(rows.len())
}

pub(crate) fn update(conn: &mut Connection, setting: &UpdateSetting) -> Result<usize> {
	setting.validate_update()?;
	in_transaction(conn, |tx| {
		alter(tx, &setting.table, setting)?;
		update_rows(tx, &setting.table, &setting.update_columns, &setting.primary_columns, &setting.rows)
	})
}

/// One positional update per row; parameters are the update values followed by the key values.
pub(crate) fn update_rows(
	conn: &Connection,
	table: &str,
	update_columns: &[Column],
	primary_columns: &[Column],
	rows: &[Row],
) -> Result<usize> {
	let mut stmt = conn.prepare(&emit_update(table, update_columns, primary_columns)).map_err(duckdb_error)?;
	let mut affected = 0;
	for row in rows {
		let params = bind(update_columns.iter().chain(primary_columns), row)?;
		affected += stmt.execute(params_from_iter(params)).map_err(duckdb_error)?;
	}
	Ok(affected)
}

pub(crate) fn delete(conn: &mut Connection, setting: &UpdateSetting) -> Result<usize> {
	setting.validate_delete_by_conditions()?;
	let sql = emit_delete(&setting.table, &setting.conditions)?;
	in_transaction(conn, |tx| tx.execute(&sql, []).map_err(duckdb_error))
}

/// Adds new columns first, then inserts the rows laid out per `update_columns`.
pub(crate) fn append(conn: &mut Connection, setting: &UpdateSetting) -> Result<usize> {
	setting.validate_append()?;
	if setting.update_columns.is_empty() {
		return Err(Error::missing("update_columns"));
	}
	let columns: Vec<&Column> = setting.update_columns.iter().filter(|c| !c.auto_increment).collect();
	in_transaction(conn, |tx| {
		alter(tx, &setting.table, setting)?;
		insert_rows(tx, &setting.table, &columns, &setting.rows)
	})
}
