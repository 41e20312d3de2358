// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tabula_type::Result;

use crate::{MergeSetting, QuerySetting, Row, Table, TableMode, UpdateSetting};

mod lifecycle;

pub use lifecycle::{ContextState, Lifecycle};

/// Context shared between the caller and the tables bound to it.
pub type SharedContext = Arc<Mutex<dyn BackendContext>>;
pub type WeakContext = Weak<Mutex<dyn BackendContext>>;

pub fn shared<C: BackendContext + 'static>(context: C) -> SharedContext {
	Arc::new(Mutex::new(context))
}

/// Operations every storage backend provides. Implementations validate
/// their arguments before touching storage and open their engine handle
/// lazily on first use. A backend may decline an operation with
/// [`tabula_type::Error::Unsupported`].
///
/// One context serves one caller at a time; sharing goes through
/// [`SharedContext`].
pub trait BackendContext: Send {
	fn mode(&self) -> TableMode;

	fn state(&self) -> ContextState;

	fn create_table(&mut self, table: &Table) -> Result<()>;

	/// Extends an existing table's schema with `setting.new_columns`.
	fn add_columns(&mut self, setting: &UpdateSetting) -> Result<()>;

	/// Appends the table's own rows.
	fn write(&mut self, table: &Table) -> Result<usize> {
		self.write_rows(table, &table.rows)
	}

	/// Appends `rows`, laid out per `table.columns`.
	fn write_rows(&mut self, table: &Table, rows: &[Row]) -> Result<usize>;

	/// Updates rows identified by the primary-key columns; returns affected rows.
	fn update(&mut self, setting: &UpdateSetting) -> Result<usize>;

	fn delete(&mut self, setting: &UpdateSetting) -> Result<usize>;

	/// Appends right rows onto the left table.
	fn merge_rows(&mut self, setting: &MergeSetting) -> Result<usize>;

	/// Adds `setting.new_columns`, if any, then appends `setting.rows`.
	fn append(&mut self, setting: &UpdateSetting) -> Result<usize>;

	/// Joins left and right into a table under the left name; returns that name.
	fn merge_columns(&mut self, setting: &MergeSetting) -> Result<String>;

	fn query(&mut self, setting: &QuerySetting) -> Result<Table>;

	fn query_row_count(&mut self, table: &str) -> Result<usize>;

	fn drop_table(&mut self, table: &str) -> Result<()>;

	fn rename(&mut self, from: &str, to: &str) -> Result<()>;

	/// Raw statement passthrough.
	fn execute(&mut self, statement: &str) -> Result<usize>;

	/// Releases the engine handle. Later operations fail with `ContextClosed`.
	fn close(&mut self) -> Result<()>;
}
