// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::ops::{Deref, Index};

use serde::{Deserialize, Serialize};
use tabula_type::{Error, Result, Value};

use super::Column;

/// Fixed-width row. Width is set at creation and only changes through
/// [`Row::widen`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
	values: Vec<Value>,
	/// Storage position this row was read from, if any.
	pub row_index: Option<usize>,
}

impl Row {
	pub fn new(width: usize) -> Self {
		Self {
			values: vec![Value::Undefined; width],
			row_index: None,
		}
	}

	pub fn from_values(values: impl IntoIterator<Item = Value>) -> Self {
		Self {
			values: values.into_iter().collect(),
			row_index: None,
		}
	}

	pub fn with_row_index(mut self, row_index: usize) -> Self {
		self.row_index = Some(row_index);
		self
	}

	pub fn width(&self) -> usize {
		self.values.len()
	}

	pub fn values(&self) -> &[Value] {
		&self.values
	}

	/// Mutable view of the values. The width cannot change through it.
	pub fn values_mut(&mut self) -> &mut [Value] {
		&mut self.values
	}

	pub fn get(&self, index: usize) -> Option<&Value> {
		self.values.get(index)
	}

	/// Positional lookup through the column's `column_index`.
	pub fn get_by(&self, column: &Column) -> Option<&Value> {
		self.get(column.column_index)
	}

	pub fn set(&mut self, index: usize, value: impl Into<Value>) -> Result<()> {
		let width = self.values.len();
		let slot = self.values.get_mut(index).ok_or(Error::RowWidth {
			expected: width,
			actual: index + 1,
		})?;
		*slot = value.into();
		Ok(())
	}

	pub fn set_by(&mut self, column: &Column, value: impl Into<Value>) -> Result<()> {
		self.set(column.column_index, value)
	}

	/// Pads the row with undefined values up to `width`.
	pub fn widen(&mut self, width: usize) {
		if width > self.values.len() {
			self.values.resize(width, Value::Undefined);
		}
	}
}

impl Index<usize> for Row {
	type Output = Value;

	fn index(&self, index: usize) -> &Self::Output {
		&self.values[index]
	}
}

/// Ordered row collection.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rows {
	rows: Vec<Row>,
}

impl Rows {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn push(&mut self, row: Row) {
		self.rows.push(row);
	}

	pub fn get_mut(&mut self, index: usize) -> Option<&mut Row> {
		self.rows.get_mut(index)
	}

	pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Row> {
		self.rows.iter_mut()
	}

	pub fn clear(&mut self) {
		self.rows.clear();
	}

	pub fn into_vec(self) -> Vec<Row> {
		self.rows
	}
}

impl Deref for Rows {
	type Target = [Row];

	fn deref(&self) -> &Self::Target {
		&self.rows
	}
}

impl From<Vec<Row>> for Rows {
	fn from(rows: Vec<Row>) -> Self {
		Self {
			rows,
		}
	}
}

impl FromIterator<Row> for Rows {
	fn from_iter<T: IntoIterator<Item = Row>>(iter: T) -> Self {
		Self {
			rows: iter.into_iter().collect(),
		}
	}
}

impl IntoIterator for Rows {
	type Item = Row;
	type IntoIter = std::vec::IntoIter<Row>;

	fn into_iter(self) -> Self::IntoIter {
		self.rows.into_iter()
	}
}

impl<'a> IntoIterator for &'a Rows {
	type Item = &'a Row;
	type IntoIter = std::slice::Iter<'a, Row>;

	fn into_iter(self) -> Self::IntoIter {
		self.rows.iter()
	}
}

#[cfg(test)]
mod tests {
	use tabula_type::Type;

	use super::*;

	#[test]
	fn test_new_row_is_undefined() {
		let row = Row::new(3);
		assert_eq!(row.width(), 3);
		assert!(row.values().iter().all(Value::is_undefined));
	}

	#[test]
	fn test_set_out_of_range() {
		let mut row = Row::new(2);
		let err = row.set(2, 1i32).unwrap_err();
		assert!(matches!(err, Error::RowWidth { expected: 2, actual: 3 }));
	}

	#[test]
	fn test_set_by_column() {
		let mut column = Column::new("b", Type::Utf8);
		column.column_index = 1;

		let mut row = Row::new(2);
		row.set_by(&column, "x").unwrap();
		assert_eq!(row.get_by(&column), Some(&Value::from("x")));
		assert_eq!(row[0], Value::Undefined);
	}

	#[test]
	fn test_widen_does_not_shrink() {
		let mut row = Row::from_values([Value::Int4(1), Value::Int4(2)]);
		row.widen(1);
		assert_eq!(row.width(), 2);
		row.widen(4);
		assert_eq!(row.width(), 4);
		assert_eq!(row[3], Value::Undefined);
	}
}
