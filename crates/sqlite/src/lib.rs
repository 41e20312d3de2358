// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Row-store backend. Every operation is handed to SQLite as a single SQL
//! statement (or a short sequence inside one transaction); writes bind
//! parameters row by row.

#![cfg_attr(not(debug_assertions), deny(warnings))]

mod config;
mod connection;
mod dialect;
mod merge;
mod query;
mod schema;
mod value;
mod write;

pub use config::{DbPath, JournalMode, OpenFlags, SqliteConfig, SynchronousMode};
pub use dialect::SqliteDialect;
use rusqlite::Connection;
use tabula_core::{
	BackendContext, ContextState, Lifecycle, MergeSetting, QuerySetting, Row, Table, TableMode, UpdateSetting,
};
use tabula_type::{Error, Result};
use tracing::instrument;

pub(crate) const BACKEND: &str = "sqlite";

pub(crate) fn sqlite_error(err: rusqlite::Error) -> Error {
	Error::engine(BACKEND, err)
}

pub struct SqliteContext {
	config: SqliteConfig,
	lifecycle: Lifecycle<Connection>,
}

impl SqliteContext {
	pub fn new(config: SqliteConfig) -> Self {
		Self {
			config,
			lifecycle: Lifecycle::new(),
		}
	}

	pub fn in_memory() -> Self {
		Self::new(SqliteConfig::in_memory())
	}

	pub fn config(&self) -> &SqliteConfig {
		&self.config
	}

	fn conn(&mut self) -> Result<&mut Connection> {
		let config = &self.config;
		self.lifecycle.ensure_open(|| connection::open(config))
	}
}

impl BackendContext for SqliteContext {
	fn mode(&self) -> TableMode {
		TableMode::Sqlite
	}

	fn state(&self) -> ContextState {
		self.lifecycle.state()
	}

	#[instrument(name = "sqlite::create_table", level = "debug", skip(self, table), fields(table = %table.original_table))]
	fn create_table(&mut self, table: &Table) -> Result<()> {
		table.validate()?;
		schema::create_table(self.conn()?, table)
	}

	#[instrument(name = "sqlite::add_columns", level = "debug", skip(self, setting), fields(table = %setting.table))]
	fn add_columns(&mut self, setting: &UpdateSetting) -> Result<()> {
		setting.validate_add_columns()?;
		schema::add_columns(self.conn()?, setting)
	}

	#[instrument(name = "sqlite::write", level = "debug", skip(self, table, rows), fields(table = %table.original_table, rows = rows.len()))]
	fn write_rows(&mut self, table: &Table, rows: &[Row]) -> Result<usize> {
		table.validate()?;
		write::write_rows(self.conn()?, table, rows)
	}

	#[instrument(name = "sqlite::update", level = "debug", skip(self, setting), fields(table = %setting.table))]
	fn update(&mut self, setting: &UpdateSetting) -> Result<usize> {
		setting.validate_update()?;
		write::update(self.conn()?, setting)
	}

	#[instrument(name = "sqlite::delete", level = "debug", skip(self, setting), fields(table = %setting.table))]
	fn delete(&mut self, setting: &UpdateSetting) -> Result<usize> {
		setting.validate_delete_by_conditions()?;
		write::delete(self.conn()?, setting)
	}

	#[instrument(name = "sqlite::merge_rows", level = "debug", skip(self, setting), fields(left = %setting.left_table, right = %setting.right_table))]
	fn merge_rows(&mut self, setting: &MergeSetting) -> Result<usize> {
		setting.validate_rows()?;
		merge::merge_rows(self.conn()?, setting)
	}

	#[instrument(name = "sqlite::append", level = "debug", skip(self, setting), fields(table = %setting.table))]
	fn append(&mut self, setting: &UpdateSetting) -> Result<usize> {
		setting.validate_append()?;
		write::append(self.conn()?, setting)
	}

	#[instrument(name = "sqlite::merge_columns", level = "debug", skip(self, setting), fields(left = %setting.left_table, right = %setting.right_table))]
	fn merge_columns(&mut self, setting: &MergeSetting) -> Result<String> {
		setting.validate_columns()?;
		merge::merge_columns(self.conn()?, setting)
	}

	#[instrument(name = "sqlite::query", level = "trace", skip(self, setting), fields(table = %setting.table_name()))]
	fn query(&mut self, setting: &QuerySetting) -> Result<Table> {
		setting.validate()?;
		query::query(self.conn()?, setting)
	}

	#[instrument(name = "sqlite::query_row_count", level = "trace", skip(self))]
	fn query_row_count(&mut self, table: &str) -> Result<usize> {
		query::count(self.conn()?, table)
	}

	#[instrument(name = "sqlite::drop_table", level = "debug", skip(self))]
	fn drop_table(&mut self, table: &str) -> Result<()> {
		schema::drop_table(self.conn()?, table)
	}

	#[instrument(name = "sqlite::rename", level = "debug", skip(self))]
	fn rename(&mut self, from: &str, to: &str) -> Result<()> {
		schema::rename(self.conn()?, from, to)
	}

	#[instrument(name = "sqlite::execute", level = "debug", skip(self, statement))]
	fn execute(&mut self, statement: &str) -> Result<usize> {
		if statement.trim().is_empty() {
			return Err(Error::missing("statement"));
		}
		self.conn()?.execute(statement, []).map_err(sqlite_error)
	}

	#[instrument(name = "sqlite::close", level = "debug", skip(self))]
	fn close(&mut self) -> Result<()> {
		if let Some(conn) = self.lifecycle.close() {
			conn.close().map_err(|(_, err)| sqlite_error(err))?;
		}
		Ok(())
	}
}
