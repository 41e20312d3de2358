// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};
use tabula_type::{Cell, Error, Result, StorageClass};

use crate::BACKEND;

/// One homogeneous array. Every slot is nullable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ArrayData {
	Integer(Vec<Option<i64>>),
	Float(Vec<Option<f64>>),
	Text(Vec<Option<String>>),
}

impl ArrayData {
	pub fn new(class: StorageClass) -> Self {
		Self::with_capacity(class, 0)
	}

	pub fn with_capacity(class: StorageClass, capacity: usize) -> Self {
		match class {
			StorageClass::Integer => Self::Integer(Vec::with_capacity(capacity)),
			StorageClass::Float => Self::Float(Vec::with_capacity(capacity)),
			StorageClass::Text => Self::Text(Vec::with_capacity(capacity)),
		}
	}

	/// An array of `len` nulls.
	pub fn nulls(class: StorageClass, len: usize) -> Self {
		match class {
			StorageClass::Integer => Self::Integer(vec![None; len]),
			StorageClass::Float => Self::Float(vec![None; len]),
			StorageClass::Text => Self::Text(vec![None; len]),
		}
	}

	pub fn from_cells(class: StorageClass, cells: impl IntoIterator<Item = Cell>) -> Result<Self> {
		let cells = cells.into_iter();
		let mut result = Self::with_capacity(class, cells.size_hint().0);
		for cell in cells {
			result.push(cell)?;
		}
		Ok(result)
	}

	pub fn storage_class(&self) -> StorageClass {
		match self {
			Self::Integer(_) => StorageClass::Integer,
			Self::Float(_) => StorageClass::Float,
			Self::Text(_) => StorageClass::Text,
		}
	}

	pub fn len(&self) -> usize {
		match self {
			Self::Integer(v) => v.len(),
			Self::Float(v) => v.len(),
			Self::Text(v) => v.len(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Appends one cell. A null fits every class; anything else must match.
	pub fn push(&mut self, cell: Cell) -> Result<()> {
		match (self, cell) {
			(Self::Integer(v), Cell::Null) => v.push(None),
			(Self::Float(v), Cell::Null) => v.push(None),
			(Self::Text(v), Cell::Null) => v.push(None),
			(Self::Integer(v), Cell::Integer(c)) => v.push(Some(c)),
			(Self::Float(v), Cell::Float(c)) => v.push(Some(c)),
			(Self::Float(v), Cell::Integer(c)) => v.push(Some(c as f64)),
			(Self::Text(v), Cell::Text(c)) => v.push(Some(c)),
			(array, cell) => {
				return Err(Error::engine(
					BACKEND,
					format!("cannot store {cell:?} in a {:?} array", array.storage_class()),
				));
			}
		}
		Ok(())
	}

	pub fn push_nulls(&mut self, count: usize) {
		match self {
			Self::Integer(v) => v.resize(v.len() + count, None),
			Self::Float(v) => v.resize(v.len() + count, None),
			Self::Text(v) => v.resize(v.len() + count, None),
		}
	}

	pub fn extend(&mut self, other: ArrayData) -> Result<()> {
		match (self, other) {
			(Self::Integer(a), Self::Integer(b)) => a.extend(b),
			(Self::Float(a), Self::Float(b)) => a.extend(b),
			(Self::Text(a), Self::Text(b)) => a.extend(b),
			(array, other) => {
				for cell in other.into_cells() {
					array.push(cell)?;
				}
			}
		}
		Ok(())
	}

	/// Cell at `index`; out of range reads as null.
	pub fn get(&self, index: usize) -> Cell {
		let cell = match self {
			Self::Integer(v) => v.get(index).copied().flatten().map(Cell::Integer),
			Self::Float(v) => v.get(index).copied().flatten().map(Cell::Float),
			Self::Text(v) => v.get(index).cloned().flatten().map(Cell::Text),
		};
		cell.unwrap_or(Cell::Null)
	}

	pub fn into_cells(self) -> Vec<Cell> {
		match self {
			Self::Integer(v) => v.into_iter().map(|c| c.map_or(Cell::Null, Cell::Integer)).collect(),
			Self::Float(v) => v.into_iter().map(|c| c.map_or(Cell::Null, Cell::Float)).collect(),
			Self::Text(v) => v.into_iter().map(|c| c.map_or(Cell::Null, Cell::Text)).collect(),
		}
	}

	/// Overwrites the cell at `index`, growing the array with nulls if needed.
	pub fn set(&mut self, index: usize, cell: Cell) -> Result<()> {
		if index >= self.len() {
			self.push_nulls(index + 1 - self.len());
		}
		match (self, cell) {
			(Self::Integer(v), Cell::Null) => v[index] = None,
			(Self::Float(v), Cell::Null) => v[index] = None,
			(Self::Text(v), Cell::Null) => v[index] = None,
			(Self::Integer(v), Cell::Integer(c)) => v[index] = Some(c),
			(Self::Float(v), Cell::Float(c)) => v[index] = Some(c),
			(Self::Float(v), Cell::Integer(c)) => v[index] = Some(c as f64),
			(Self::Text(v), Cell::Text(c)) => v[index] = Some(c),
			(array, cell) => {
				return Err(Error::engine(
					BACKEND,
					format!("cannot store {cell:?} in a {:?} array", array.storage_class()),
				));
			}
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_from_cells() {
		let data = ArrayData::from_cells(StorageClass::Integer, [Cell::Integer(1), Cell::Null, Cell::Integer(3)])
			.unwrap();
		assert_eq!(data, ArrayData::Integer(vec![Some(1), None, Some(3)]));
		assert_eq!(data.len(), 3);
	}

	#[test]
	fn test_push_rejects_other_class() {
		let mut data = ArrayData::new(StorageClass::Integer);
		let err = data.push(Cell::Text("x".into())).unwrap_err();
		assert_eq!(err.code(), "ENGINE_001");
		assert!(data.is_empty());
	}

	#[test]
	fn test_float_accepts_integer() {
		let mut data = ArrayData::new(StorageClass::Float);
		data.push(Cell::Integer(2)).unwrap();
		assert_eq!(data.get(0), Cell::Float(2.0));
	}

	#[test]
	fn test_get_out_of_range_is_null() {
		let data = ArrayData::Text(vec![Some("a".into())]);
		assert_eq!(data.get(0), Cell::Text("a".into()));
		assert_eq!(data.get(5), Cell::Null);
	}

	#[test]
	fn test_extend_and_pad() {
		let mut data = ArrayData::Integer(vec![Some(10), Some(11), None, Some(13)]);
		data.extend(ArrayData::Integer(vec![Some(14)])).unwrap();
		data.push_nulls(2);
		assert_eq!(data.len(), 7);
		assert_eq!(data.get(6), Cell::Null);
	}

	#[test]
	fn test_set_grows() {
		let mut data = ArrayData::new(StorageClass::Text);
		data.set(2, Cell::Text("c".into())).unwrap();
		assert_eq!(data, ArrayData::Text(vec![None, None, Some("c".into())]));
	}
}
