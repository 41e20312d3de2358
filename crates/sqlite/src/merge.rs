// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use rusqlite::Connection;
use tabula_core::{MergeSetting, UpdateSetting};
use tabula_sql::{emit_merge_rows, plan_merge_columns};
use tabula_type::Result;
use tracing::debug;

use crate::{connection::in_transaction, schema::alter, sqlite_error};

pub(crate) fn merge_rows(conn: &mut Connection, setting: &MergeSetting) -> Result<usize> {
	setting.validate_rows()?;
	let sql = emit_merge_rows(setting);
	in_transaction(conn, |tx| {
		add_new_columns(tx, setting)?;
		tx.execute(&sql, []).map_err(sqlite_error)
	})
}

pub(crate) fn merge_columns(conn: &mut Connection, setting: &MergeSetting) -> Result<String> {
	setting.validate_columns()?;
	let plan = plan_merge_columns(setting);
	debug!(left = %setting.left_table, backup = %plan.backup, "materializing column merge");
	in_transaction(conn, |tx| {
		for sql in &plan.statements {
			tx.execute(sql, []).map_err(sqlite_error)?;
		}
		Ok(setting.left_table.clone())
	})
}

fn add_new_columns(conn: &Connection, setting: &MergeSetting) -> Result<()> {
	if setting.new_columns.is_empty() {
		return Ok(());
	}
	let update = UpdateSetting::new(setting.left_table.clone()).with_new_columns(setting.new_columns.iter().cloned());
	alter(conn, &setting.left_table, &update)
}
