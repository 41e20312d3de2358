// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Write paths. A batch is first encoded into fresh arrays of batch length;
//! every stored array is then rewritten whole as its old content followed by
//! the batch. Arrays the batch does not name are padded with nulls so the
//! group stays rectangular.

use tabula_core::{Column, Row, UpdateSetting};
use tabula_store_array::{ArrayData, ArrayFile, ArrayStore};
use tabula_type::{Error, Result, Value};

/// Encodes one array per column from `rows`, laid out by each column's `column_index`.
/// Undefined auto-increment values are numbered from `next`.
pub(crate) fn encode_batch<'a>(
	columns: &[&'a Column],
	rows: &[Row],
	next: usize,
) -> Result<Vec<(&'a str, ArrayData)>> {
	let mut batch = Vec::with_capacity(columns.len());
	for column in columns {
		let mut data = ArrayData::with_capacity(column.value_type.storage_class(), rows.len());
		for (i, row) in rows.iter().enumerate() {
			let value = row.get(column.column_index).ok_or(Error::RowWidth {
				expected: column.column_index + 1,
				actual: row.width(),
			})?;
			let cell = if column.auto_increment && value.is_undefined() {
				column.value_type.encode(&Value::Int8((next + i) as i64))?
			} else {
				column.value_type.encode(value)?
			};
			data.push(cell)?;
		}
		batch.push((column.field.as_str(), data));
	}
	Ok(batch)
}

/// Appends `count` rows given as per-array batches to a group of `len` rows.
pub(crate) fn append_batch(
	store: &mut ArrayFile,
	group: &str,
	len: usize,
	count: usize,
	batch: Vec<(&str, ArrayData)>,
) -> Result<()> {
	for (field, data) in batch {
		let mut array = if store.has_array(group, field) {
			store.read_array(group, field)?
		} else {
			ArrayData::new(data.storage_class())
		};
		array.push_nulls(len.saturating_sub(array.len()));
		array.extend(data)?;
		store.write_array(group, field, array)?;
	}
	pad(store, group, len + count)
}

/// Grows every array of the group to `len` with nulls.
pub(crate) fn pad(store: &mut ArrayFile, group: &str, len: usize) -> Result<()> {
	for name in store.array_names(group)? {
		let mut array = store.read_array(group, &name)?;
		if array.len() < len {
			array.push_nulls(len - array.len());
			store.write_array(group, &name, array)?;
		}
	}
	Ok(())
}

pub(crate) fn write_rows(store: &mut ArrayFile, group: &str, columns: &[&Column], rows: &[Row]) -> Result<usize> {
	let len = store.group_len(group)?;
	let batch = encode_batch(columns, rows, len)?;
	append_batch(store, group, len, rows.len(), batch)?;
	Ok(rows.len())
}

/// Null-filled arrays for the columns the group does not have yet.
pub(crate) fn ensure_columns(store: &mut ArrayFile, group: &str, columns: &[Column]) -> Result<()> {
	let len = store.group_len(group)?;
	for column in columns {
		if !store.has_array(group, &column.field) {
			store.write_array(group, &column.field, ArrayData::nulls(column.value_type.storage_class(), len))?;
		}
	}
	Ok(())
}

/// New arrays filled from `setting.rows`. Row `i` lands at its `row_index`,
/// or at position `i` when it carries none; positions no row names stay null.
pub(crate) fn add_columns(store: &mut ArrayFile, setting: &UpdateSetting) -> Result<()> {
	let group = setting.table.as_str();
	let len = store.group_len(group)?;

	if let Some(column) = setting.new_columns.iter().find(|c| store.has_array(group, &c.field)) {
		return Err(Error::DuplicateColumn(column.field.clone()));
	}

	let positions: Vec<usize> =
		setting.rows.iter().enumerate().map(|(i, row)| row.row_index.unwrap_or(i)).collect();
	if let Some(&index) = positions.iter().find(|&&p| p >= len) {
		return Err(Error::RowIndex {
			index,
			len,
		});
	}

	let mut arrays = Vec::with_capacity(setting.new_columns.len());
	for column in &setting.new_columns {
		let mut array = ArrayData::nulls(column.value_type.storage_class(), len);
		for (row, &position) in setting.rows.iter().zip(&positions) {
			let value = row.get(column.column_index).cloned().unwrap_or_default();
			array.set(position, column.value_type.encode(&value)?)?;
		}
		arrays.push((column.field.as_str(), array));
	}

	for (field, array) in arrays {
		store.write_array(group, field, array)?;
	}
	Ok(())
}
