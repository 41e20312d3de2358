// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::ops::{Deref, Index};

use serde::{Deserialize, Serialize};
use tabula_type::{Error, Result};

use super::Column;

/// Ordered column layout. Indices are dense and zero-based.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Columns {
	columns: Vec<Column>,
}

impl Deref for Columns {
	type Target = [Column];

	fn deref(&self) -> &Self::Target {
		&self.columns
	}
}

impl Index<usize> for Columns {
	type Output = Column;

	fn index(&self, index: usize) -> &Self::Output {
		&self.columns[index]
	}
}

impl<'a> IntoIterator for &'a Columns {
	type Item = &'a Column;
	type IntoIter = std::slice::Iter<'a, Column>;

	fn into_iter(self) -> Self::IntoIter {
		self.columns.iter()
	}
}

impl Columns {
	pub fn new(columns: impl IntoIterator<Item = Column>) -> Result<Self> {
		let mut result = Self::default();
		for column in columns {
			result.push(column)?;
		}
		Ok(result)
	}

	/// Appends `column`, assigning it the next column index.
	pub fn push(&mut self, mut column: Column) -> Result<&Column> {
		if self.contains(&column.field) {
			return Err(Error::DuplicateColumn(column.field));
		}
		column.column_index = self.columns.len();
		self.columns.push(column);
		Ok(&self.columns[self.columns.len() - 1])
	}

	pub fn contains(&self, field: &str) -> bool {
		self.by_field(field).is_some()
	}

	pub fn by_field(&self, field: &str) -> Option<&Column> {
		self.columns.iter().find(|c| c.field == field)
	}

	pub fn require(&self, field: &str) -> Result<&Column> {
		self.by_field(field).ok_or_else(|| Error::ColumnNotFound(field.to_string()))
	}

	pub fn fields(&self) -> Vec<&str> {
		self.columns.iter().map(|c| c.field.as_str()).collect()
	}

	pub fn primary_keys(&self) -> Vec<&Column> {
		self.columns.iter().filter(|c| c.primary_key).collect()
	}

	/// Columns in display order.
	pub fn visible(&self) -> Vec<&Column> {
		let mut visible: Vec<&Column> = self.columns.iter().collect();
		visible.sort_by_key(|c| c.visible_position());
		visible
	}

	/// Copies `columns` into a fresh layout, renumbering them from zero.
	pub fn reindexed<'a>(columns: impl IntoIterator<Item = &'a Column>) -> Result<Self> {
		Self::new(columns.into_iter().cloned())
	}
}
