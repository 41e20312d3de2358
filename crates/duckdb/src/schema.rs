// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use duckdb::{Connection, params};
use tabula_core::{Table, UpdateSetting};
use tabula_sql::{emit_add_column, emit_create_table, emit_drop_table, emit_rename};
use tabula_type::{Error, Result};

use crate::{DuckDbDialect, connection::in_transaction, duckdb_error, write::update_rows};

pub(crate) fn create_table(conn: &mut Connection, table: &Table) -> Result<()> {
	table.validate()?;
	let statements = emit_create_table(&DuckDbDialect, table);
	in_transaction(conn, |tx| {
		for sql in &statements {
			tx.execute(sql, []).map_err(duckdb_error)?;
		}
		Ok(())
	})
}

/// Adds the new columns, then fills them from the setting's rows when
/// primary-key columns identify where each row goes.
pub(crate) fn add_columns(conn: &mut Connection, setting: &UpdateSetting) -> Result<()> {
	setting.validate_add_columns()?;
	in_transaction(conn, |tx| {
		alter(tx, &setting.table, setting)?;
		if !setting.rows.is_empty() && !setting.primary_columns.is_empty() {
			update_rows(tx, &setting.table, &setting.new_columns, &setting.primary_columns, &setting.rows)?;
		}
		Ok(())
	})
}

pub(crate) fn alter(conn: &Connection, table: &str, setting: &UpdateSetting) -> Result<()> {
	for column in &setting.new_columns {
		if column.auto_increment {
			return Err(Error::unsupported(crate::BACKEND, "add auto-increment column"));
		}
		conn.execute(&emit_add_column(&DuckDbDialect, table, column), []).map_err(duckdb_error)?;
	}
	Ok(())
}

/// Stored column names in declaration order.
pub(crate) fn table_fields(conn: &Connection, table: &str) -> Result<Vec<String>> {
	let mut stmt = conn
		.prepare(
			"SELECT column_name FROM information_schema.columns WHERE table_name = ? ORDER BY ordinal_position",
		)
		.map_err(duckdb_error)?;
	let fields = stmt
		.query_map(params![table], |row| row.get::<_, String>(0))
		.map_err(duckdb_error)?
		.collect::<std::result::Result<Vec<_>, _>>()
		.map_err(duckdb_error)?;
	if fields.is_empty() {
		return Err(Error::TableNotFound(table.to_string()));
	}
	Ok(fields)
}

pub(crate) fn drop_table(conn: &Connection, table: &str) -> Result<()> {
	if table.is_empty() {
		return Err(Error::missing("table"));
	}
	conn.execute(&emit_drop_table(table), []).map_err(duckdb_error)?;
	Ok(())
}

pub(crate) fn rename(conn: &Connection, from: &str, to: &str) -> Result<()> {
	if from.is_empty() {
		return Err(Error::missing("table"));
	}
	if to.is_empty() {
		return Err(Error::missing("rename"));
	}
	conn.execute(&emit_rename(from, to), []).map_err(duckdb_error)?;
	Ok(())
}
