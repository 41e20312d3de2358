// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{fmt, sync::Weak};

use serde::{Deserialize, Serialize};
use tabula_type::{Error, Result};
use uuid::Uuid;

use crate::{
	context::{SharedContext, WeakContext},
	setting::{MergeSetting, QuerySetting, UpdateSetting},
};

mod column;
mod columns;
mod display;
mod row;

pub use column::{Column, OrderDirection};
pub use columns::Columns;
pub use row::{Row, Rows};

/// Storage kind that owns a table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableMode {
	Sqlite,
	DuckDb,
	ArrayFile,
}

impl TableMode {
	pub fn name(&self) -> &'static str {
		match self {
			TableMode::Sqlite => "sqlite",
			TableMode::DuckDb => "duckdb",
			TableMode::ArrayFile => "array",
		}
	}
}

impl fmt::Display for TableMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// In-memory table. The backend reference is non-owning: dropping the
/// context leaves the table readable but unbound.
#[derive(Clone)]
pub struct Table {
	pub id: Uuid,
	/// Logical name
	pub name: String,
	/// Storage name
	pub original_table: String,
	pub mode: TableMode,
	pub columns: Columns,
	pub rows: Rows,
	context: Option<WeakContext>,
}

impl Table {
	pub fn new(name: impl Into<String>, mode: TableMode) -> Self {
		let name = name.into();
		Self {
			id: Uuid::new_v4(),
			original_table: name.clone(),
			name,
			mode,
			columns: Columns::default(),
			rows: Rows::default(),
			context: None,
		}
	}

	pub fn with_original_table(mut self, original_table: impl Into<String>) -> Self {
		self.original_table = original_table.into();
		self
	}

	pub fn with_columns(mut self, columns: Columns) -> Self {
		self.columns = columns;
		self
	}

	pub fn row_count(&self) -> usize {
		self.rows.len()
	}

	pub fn column_count(&self) -> usize {
		self.columns.len()
	}

	pub fn add_column(&mut self, column: Column) -> Result<&Column> {
		self.columns.push(column)
	}

	/// Empty row sized to the current layout.
	pub fn new_row(&self) -> Row {
		Row::new(self.column_count())
	}

	pub fn push_row(&mut self, row: Row) -> Result<()> {
		if row.width() != self.column_count() {
			return Err(Error::RowWidth {
				expected: self.column_count(),
				actual: row.width(),
			});
		}
		self.rows.push(row);
		Ok(())
	}

	/// Pads every existing row to the current column count. Rows are not
	/// widened implicitly when columns are appended.
	pub fn widen_rows(&mut self) {
		let width = self.column_count();
		for row in self.rows.iter_mut() {
			row.widen(width);
		}
	}

	/// Row-less copy that keeps the binding.
	pub fn schema(&self) -> Table {
		Table {
			id: self.id,
			name: self.name.clone(),
			original_table: self.original_table.clone(),
			mode: self.mode,
			columns: self.columns.clone(),
			rows: Rows::default(),
			context: self.context.clone(),
		}
	}

	/// Fails fast when the storage name or column list is missing.
	pub fn validate(&self) -> Result<()> {
		if self.original_table.is_empty() {
			return Err(Error::missing("table.name"));
		}
		if self.columns.is_empty() {
			return Err(Error::missing("table.columns"));
		}
		Ok(())
	}

	pub fn bind(&mut self, context: &SharedContext) {
		self.context = Some(std::sync::Arc::downgrade(context));
	}

	pub fn rebind(mut self, context: &SharedContext) -> Self {
		self.bind(context);
		self
	}

	pub fn unbind(&mut self) {
		self.context = None;
	}

	pub fn is_bound(&self) -> bool {
		self.context.as_ref().is_some_and(|weak| weak.strong_count() > 0)
	}

	pub fn context(&self) -> Result<SharedContext> {
		self.context.as_ref().and_then(Weak::upgrade).ok_or(Error::ContextUnbound)
	}
}

impl Table {
	pub fn create(&self) -> Result<()> {
		self.context()?.lock().create_table(self)
	}

	pub fn write(&self) -> Result<usize> {
		self.context()?.lock().write(self)
	}

	pub fn write_rows(&self, rows: &[Row]) -> Result<usize> {
		self.context()?.lock().write_rows(self, rows)
	}

	pub fn add_columns(&self, setting: &UpdateSetting) -> Result<()> {
		self.context()?.lock().add_columns(setting)
	}

	pub fn update(&self, setting: &UpdateSetting) -> Result<usize> {
		self.context()?.lock().update(setting)
	}

	pub fn delete(&self, setting: &UpdateSetting) -> Result<usize> {
		self.context()?.lock().delete(setting)
	}

	pub fn merge_rows(&self, setting: &MergeSetting) -> Result<usize> {
		self.context()?.lock().merge_rows(setting)
	}

	pub fn merge_columns(&self, setting: &MergeSetting) -> Result<String> {
		self.context()?.lock().merge_columns(setting)
	}

	/// Runs the query on the bound context; the result is bound to the same context.
	pub fn query(&self, setting: &QuerySetting) -> Result<Table> {
		let context = self.context()?;
		let result = context.lock().query(setting)?;
		Ok(result.rebind(&context))
	}

	/// Queries every column of this table with no conditions.
	pub fn query_all(&self) -> Result<Table> {
		self.query(&QuerySetting::new(self.schema()))
	}

	pub fn query_row_count(&self) -> Result<usize> {
		self.context()?.lock().query_row_count(&self.original_table)
	}

	pub fn execute(&self, statement: &str) -> Result<usize> {
		self.context()?.lock().execute(statement)
	}

	pub fn drop_table(&self) -> Result<()> {
		self.context()?.lock().drop_table(&self.original_table)
	}

	/// Renames the storage table and points this table at the new name.
	pub fn rename(&mut self, to: impl Into<String>) -> Result<()> {
		let to = to.into();
		self.context()?.lock().rename(&self.original_table, &to)?;
		self.original_table = to;
		Ok(())
	}
}

impl fmt::Debug for Table {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Table")
			.field("id", &self.id)
			.field("name", &self.name)
			.field("original_table", &self.original_table)
			.field("mode", &self.mode)
			.field("columns", &self.columns)
			.field("rows", &self.rows)
			.field("bound", &self.is_bound())
			.finish()
	}
}
