// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use chrono::Local;
use serde::{Deserialize, Serialize};
use tabula_type::{Error, Result};

use crate::{Column, Condition, JoinOperator, Row, Table};

/// Parameters of a query: target table, projection, filter and ordering.
#[derive(Clone, Debug)]
pub struct QuerySetting {
	/// Target table. Only its storage name and columns are consulted.
	pub table: Table,
	/// Projection. Empty selects every column of `table`.
	pub columns: Vec<Column>,
	pub conditions: Vec<Condition>,
	/// Sort keys. Each column's `order` picks the direction, default ascending.
	pub order_by: Vec<Column>,
}

impl QuerySetting {
	pub fn new(table: Table) -> Self {
		Self {
			table,
			columns: Vec::new(),
			conditions: Vec::new(),
			order_by: Vec::new(),
		}
	}

	pub fn with_columns(mut self, columns: impl IntoIterator<Item = Column>) -> Self {
		self.columns = columns.into_iter().collect();
		self
	}

	pub fn with_condition(mut self, condition: Condition) -> Self {
		self.conditions.push(condition);
		self
	}

	pub fn with_conditions(mut self, conditions: impl IntoIterator<Item = Condition>) -> Self {
		self.conditions.extend(conditions);
		self
	}

	pub fn with_order_by(mut self, column: Column) -> Self {
		self.order_by.push(column);
		self
	}

	pub fn table_name(&self) -> &str {
		&self.table.original_table
	}

	/// Projected columns in request order.
	pub fn projection(&self) -> Vec<&Column> {
		if self.columns.is_empty() {
			self.table.columns.iter().collect()
		} else {
			self.columns.iter().collect()
		}
	}

	/// True when some condition is joined to its successor with `Or`.
	pub fn has_or(&self) -> bool {
		self.conditions.iter().rev().skip(1).any(|c| c.join == JoinOperator::Or)
	}

	pub fn validate(&self) -> Result<()> {
		if self.table_name().is_empty() {
			return Err(Error::missing("table.name"));
		}
		if self.projection().is_empty() {
			return Err(Error::missing("columns"));
		}
		Ok(())
	}
}

/// Parameters of update, delete, add-columns and row append operations.
#[derive(Clone, Debug, Default)]
pub struct UpdateSetting {
	/// Target storage table name.
	pub table: String,
	pub update_columns: Vec<Column>,
	/// Columns identifying a row for update.
	pub primary_columns: Vec<Column>,
	/// Rows carrying values at each column's `column_index`.
	pub rows: Vec<Row>,
	/// Columns to add before anything else runs.
	pub new_columns: Vec<Column>,
	/// Storage row positions, used by positional delete.
	pub row_indexes: Vec<usize>,
	/// Filter for delete on SQL backends.
	pub conditions: Vec<Condition>,
}

impl UpdateSetting {
	pub fn new(table: impl Into<String>) -> Self {
		Self {
			table: table.into(),
			..Default::default()
		}
	}

	pub fn with_update_columns(mut self, columns: impl IntoIterator<Item = Column>) -> Self {
		self.update_columns = columns.into_iter().collect();
		self
	}

	pub fn with_primary_columns(mut self, columns: impl IntoIterator<Item = Column>) -> Self {
		self.primary_columns = columns.into_iter().collect();
		self
	}

	pub fn with_rows(mut self, rows: impl IntoIterator<Item = Row>) -> Self {
		self.rows = rows.into_iter().collect();
		self
	}

	pub fn with_new_columns(mut self, columns: impl IntoIterator<Item = Column>) -> Self {
		self.new_columns = columns.into_iter().collect();
		self
	}

	pub fn with_row_indexes(mut self, indexes: impl IntoIterator<Item = usize>) -> Self {
		self.row_indexes = indexes.into_iter().collect();
		self
	}

	pub fn with_conditions(mut self, conditions: impl IntoIterator<Item = Condition>) -> Self {
		self.conditions = conditions.into_iter().collect();
		self
	}

	fn require_table(&self) -> Result<()> {
		if self.table.is_empty() {
			return Err(Error::missing("table"));
		}
		Ok(())
	}

	pub fn validate_update(&self) -> Result<()> {
		self.require_table()?;
		if self.update_columns.is_empty() {
			return Err(Error::missing("update_columns"));
		}
		if self.primary_columns.is_empty() {
			return Err(Error::missing("primary_columns"));
		}
		if self.rows.is_empty() {
			return Err(Error::missing("rows"));
		}
		Ok(())
	}

	pub fn validate_add_columns(&self) -> Result<()> {
		self.require_table()?;
		if self.new_columns.is_empty() {
			return Err(Error::missing("new_columns"));
		}
		Ok(())
	}

	pub fn validate_append(&self) -> Result<()> {
		self.require_table()?;
		if self.rows.is_empty() {
			return Err(Error::missing("rows"));
		}
		Ok(())
	}

	pub fn validate_delete_by_conditions(&self) -> Result<()> {
		self.require_table()?;
		if self.conditions.is_empty() {
			return Err(Error::missing("conditions"));
		}
		Ok(())
	}

	pub fn validate_delete_by_index(&self) -> Result<()> {
		self.require_table()?;
		if self.row_indexes.is_empty() {
			return Err(Error::missing("row_indexes"));
		}
		Ok(())
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JoinKind {
	#[default]
	Inner,
	Left,
	Right,
}

impl JoinKind {
	pub fn keyword(&self) -> &'static str {
		match self {
			JoinKind::Inner => "INNER JOIN",
			JoinKind::Left => "LEFT JOIN",
			JoinKind::Right => "RIGHT JOIN",
		}
	}
}

/// Parameters of row-union and column-union merges.
#[derive(Clone, Debug, Default)]
pub struct MergeSetting {
	pub left_table: String,
	pub right_table: String,
	pub left_columns: Vec<Column>,
	pub right_columns: Vec<Column>,
	/// (left, right) join key pairs, combined with AND.
	pub match_columns: Vec<(Column, Column)>,
	pub new_columns: Vec<Column>,
	pub join: JoinKind,
}

impl MergeSetting {
	pub fn new(left_table: impl Into<String>, right_table: impl Into<String>) -> Self {
		Self {
			left_table: left_table.into(),
			right_table: right_table.into(),
			..Default::default()
		}
	}

	pub fn with_left_columns(mut self, columns: impl IntoIterator<Item = Column>) -> Self {
		self.left_columns = columns.into_iter().collect();
		self
	}

	pub fn with_right_columns(mut self, columns: impl IntoIterator<Item = Column>) -> Self {
		self.right_columns = columns.into_iter().collect();
		self
	}

	pub fn with_match(mut self, left: Column, right: Column) -> Self {
		self.match_columns.push((left, right));
		self
	}

	pub fn with_join(mut self, join: JoinKind) -> Self {
		self.join = join;
		self
	}

	fn require_tables_and_columns(&self) -> Result<()> {
		if self.left_table.is_empty() {
			return Err(Error::missing("left_table"));
		}
		if self.right_table.is_empty() {
			return Err(Error::missing("right_table"));
		}
		if self.left_columns.is_empty() {
			return Err(Error::missing("left_columns"));
		}
		if self.right_columns.is_empty() {
			return Err(Error::missing("right_columns"));
		}
		Ok(())
	}

	/// Row union pairs `left_columns[i]` with `right_columns[i]`.
	pub fn validate_rows(&self) -> Result<()> {
		self.require_tables_and_columns()?;
		if self.left_columns.len() != self.right_columns.len() {
			return Err(Error::RowWidth {
				expected: self.left_columns.len(),
				actual: self.right_columns.len(),
			});
		}
		Ok(())
	}

	pub fn validate_columns(&self) -> Result<()> {
		self.require_tables_and_columns()?;
		if self.match_columns.is_empty() {
			return Err(Error::missing("match_columns"));
		}
		Ok(())
	}

	/// Name the left table is moved to while the joined table takes its place.
	pub fn backup_table(&self) -> String {
		format!("{}_{}", self.left_table, Local::now().format("%m%d%H%M%S"))
	}

	/// Output name for each right column: its field, suffixed with `_right`
	/// when it collides with a left field.
	pub fn right_output_fields(&self) -> Vec<String> {
		self.right_columns
			.iter()
			.map(|r| {
				if self.left_columns.iter().any(|l| l.field == r.field) {
					format!("{}_right", r.field)
				} else {
					r.field.clone()
				}
			})
			.collect()
	}
}
