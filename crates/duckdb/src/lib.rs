// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Column-store backend. Statements come from the shared SQL builders with
//! DuckDB's type names; bulk writes go through the appender when the batch
//! covers every stored column.

#![cfg_attr(not(debug_assertions), deny(warnings))]

mod config;
mod connection;
mod dialect;
mod merge;
mod query;
mod schema;
mod value;
mod write;

pub use config::{DbPath, DuckDbConfig};
pub use dialect::DuckDbDialect;
use duckdb::Connection;
use tabula_core::{
	BackendContext, ContextState, Lifecycle, MergeSetting, QuerySetting, Row, Table, TableMode, UpdateSetting,
};
use tabula_type::{Error, Result};
use tracing::instrument;

pub(crate) const BACKEND: &str = "duckdb";

pub(crate) fn duckdb_error(err: duckdb::Error) -> Error {
	Error::engine(BACKEND, err)
}

pub struct DuckDbContext {
	config: DuckDbConfig,
	lifecycle: Lifecycle<Connection>,
}

impl DuckDbContext {
	pub fn new(config: DuckDbConfig) -> Self {
		Self {
			config,
			lifecycle: Lifecycle::new(),
		}
	}

	pub fn in_memory() -> Self {
		Self::new(DuckDbConfig::in_memory())
	}

	pub fn config(&self) -> &DuckDbConfig {
		&self.config
	}

	fn conn(&mut self) -> Result<&mut Connection> {
		let config = &self.config;
		self.lifecycle.ensure_open(|| connection::open(config))
	}
}

impl BackendContext for DuckDbContext {
	fn mode(&self) -> TableMode {
		TableMode::DuckDb
	}

	fn state(&self) -> ContextState {
		self.lifecycle.state()
	}

	#[instrument(name = "duckdb::create_table", level = "debug", skip(self, table), fields(table = %table.original_table))]
	fn create_table(&mut self, table: &Table) -> Result<()> {
		table.validate()?;
		schema::create_table(self.conn()?, table)
	}

	#[instrument(name = "duckdb::add_columns", level = "debug", skip(self, setting), fields(table = %setting.table))]
	fn add_columns(&mut self, setting: &UpdateSetting) -> Result<()> {
		setting.validate_add_columns()?;
		schema::add_columns(self.conn()?, setting)
	}

	#[instrument(name = "duckdb::write", level = "debug", skip(self, table, rows), fields(table = %table.original_table, rows = rows.len()))]
	fn write_rows(&mut self, table: &Table, rows: &[Row]) -> Result<usize> {
		table.validate()?;
		write::write_rows(self.conn()?, table, rows)
	}

	#[instrument(name = "duckdb::update", level = "debug", skip(self, setting), fields(table = %setting.table))]
	fn update(&mut self, setting: &UpdateSetting) -> Result<usize> {
		setting.validate_update()?;
		write::update(self.conn()?, setting)
	}

	#[instrument(name = "duckdb::delete", level = "debug", skip(self, setting), fields(table = %setting.table))]
	fn delete(&mut self, setting: &UpdateSetting) -> Result<usize> {
		setting.validate_delete_by_conditions()?;
		write::delete(self.conn()?, setting)
	}

	#[instrument(name = "duckdb::merge_rows", level = "debug", skip(self, setting), fields(left = %setting.left_table, right = %setting.right_table))]
	fn merge_rows(&mut self, setting: &MergeSetting) -> Result<usize> {
		setting.validate_rows()?;
		merge::merge_rows(self.conn()?, setting)
	}

	#[instrument(name = "duckdb::append", level = "debug", skip(self, setting), fields(table = %setting.table))]
	fn append(&mut self, setting: &UpdateSetting) -> Result<usize> {
		setting.validate_append()?;
		write::append(self.conn()?, setting)
	}

	#[instrument(name = "duckdb::merge_columns", level = "debug", skip(self, setting), fields(left = %setting.left_table, right = %setting.right_table))]
	fn merge_columns(&mut self, setting: &MergeSetting) -> Result<String> {
		setting.validate_columns()?;
		merge::merge_columns(self.conn()?, setting)
	}

	#[instrument(name = "duckdb::query", level = "trace", skip(self, setting), fields(table = %setting.table_name()))]
	fn query(&mut self, setting: &QuerySetting) -> Result<Table> {
		setting.validate()?;
		query::query(self.conn()?, setting)
	}

	#[instrument(name = "duckdb::query_row_count", level = "trace", skip(self))]
	fn query_row_count(&mut self, table: &str) -> Result<usize> {
		query::count(self.conn()?, table)
	}

	#[instrument(name = "duckdb::drop_table", level = "debug", skip(self))]
	fn drop_table(&mut self, table: &str) -> Result<()> {
		schema::drop_table(self.conn()?, table)
	}

	#[instrument(name = "duckdb::rename", level = "debug", skip(self))]
	fn rename(&mut self, from: &str, to: &str) -> Result<()> {
		schema::rename(self.conn()?, from, to)
	}

	#[instrument(name = "duckdb::execute", level = "debug", skip(self, statement))]
	fn execute(&mut self, statement: &str) -> Result<usize> {
		if statement.trim().is_empty() {
			return Err(Error::missing("statement"));
		}
		self.conn()?.execute(statement, []).map_err(duckdb_error)
	}

	#[instrument(name = "duckdb::close", level = "debug", skip(self))]
	fn close(&mut self) -> Result<()> {
		if let Some(conn) = self.lifecycle.close() {
			conn.close().map_err(|(_, err)| duckdb_error(err))?;
		}
		Ok(())
	}
}
