// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Row and column merges, done by reading both groups fully and rewriting.

use std::collections::HashMap;

use tabula_core::{Column, IndexSet, JoinKind, MergeSetting};
use tabula_store_array::{ArrayData, ArrayFile, ArrayStore};
use tabula_type::{Cell, Result, Type, Value};
use tracing::debug;

use crate::{
	filter::live,
	write::{append_batch, ensure_columns},
};

/// Appends the live right rows onto the left group, pairing
/// `left_columns[i]` with `right_columns[i]` and re-encoding by the left type.
/// An auto-increment left column is numbered from the left group's length;
/// a left column paired with an auto-increment right column is left null.
pub(crate) fn merge_rows(
	store: &mut ArrayFile,
	setting: &MergeSetting,
	deleted_right: Option<&IndexSet>,
) -> Result<usize> {
	let left = setting.left_table.as_str();
	let right = setting.right_table.as_str();

	let right_len = store.group_len(right)?;
	ensure_columns(store, left, &setting.new_columns)?;
	let left_len = store.group_len(left)?;
	let rows = live(right_len, deleted_right).into_vec();

	let mut batch = Vec::with_capacity(setting.left_columns.len());
	for (l, r) in setting.left_columns.iter().zip(&setting.right_columns) {
		let class = l.value_type.storage_class();
		let data = if l.auto_increment {
			let mut data = ArrayData::with_capacity(class, rows.len());
			for i in 0..rows.len() {
				data.push(l.value_type.encode(&Value::Int8((left_len + i) as i64))?)?;
			}
			data
		} else if r.auto_increment {
			ArrayData::nulls(class, rows.len())
		} else {
			let source = store.read_array(right, &r.field)?;
			let mut data = ArrayData::with_capacity(class, rows.len());
			for &position in &rows {
				let value = r.value_type.decode(source.get(position));
				data.push(l.value_type.encode(&value)?)?;
			}
			data
		};
		batch.push((l.field.as_str(), data));
	}

	append_batch(store, left, left_len, rows.len(), batch)?;
	Ok(rows.len())
}

type JoinKey = Option<Vec<String>>;

/// Hash join of the live rows of both groups. The joined arrays replace the
/// left group: left columns first, then right columns under their output names.
pub(crate) fn merge_columns(
	store: &mut ArrayFile,
	setting: &MergeSetting,
	deleted_left: Option<&IndexSet>,
	deleted_right: Option<&IndexSet>,
) -> Result<String> {
	let left = setting.left_table.as_str();
	let right = setting.right_table.as_str();

	let left_rows = live(store.group_len(left)?, deleted_left).into_vec();
	let right_rows = live(store.group_len(right)?, deleted_right).into_vec();

	// right keys are read as the left column's type
	let left_keys = keys(store, left, &left_rows, setting.match_columns.iter().map(|(l, _)| (l, l.value_type)))?;
	let right_keys =
		keys(store, right, &right_rows, setting.match_columns.iter().map(|(l, r)| (r, l.value_type)))?;
	let pairs = join(&left_keys, &right_keys, setting.join);

	let mut arrays = Vec::with_capacity(setting.left_columns.len() + setting.right_columns.len());
	for column in &setting.left_columns {
		let source = store.read_array(left, &column.field)?;
		let positions = pairs.iter().map(|(l, _)| l.map(|i| left_rows[i]));
		arrays.push((column.field.clone(), gather(&source, positions)?));
	}
	for (column, output) in setting.right_columns.iter().zip(setting.right_output_fields()) {
		let source = store.read_array(right, &column.field)?;
		let positions = pairs.iter().map(|(_, r)| r.map(|i| right_rows[i]));
		arrays.push((output, gather(&source, positions)?));
	}

	let backup = setting.backup_table();
	debug!(left, backup = %backup, rows = pairs.len(), "materializing column merge");

	store.rename_group(left, &backup)?;
	store.create_group(left)?;
	for (field, data) in arrays {
		store.write_array(left, &field, data)?;
	}
	store.drop_group(&backup)?;

	Ok(setting.left_table.clone())
}

fn gather(source: &ArrayData, positions: impl Iterator<Item = Option<usize>>) -> Result<ArrayData> {
	ArrayData::from_cells(source.storage_class(), positions.map(|p| p.map_or(Cell::Null, |p| source.get(p))))
}

/// One composite key per live row, each part read as `key_type`. A row with
/// any undefined or inconvertible key part has no key and matches nothing.
fn keys<'a>(
	store: &ArrayFile,
	group: &str,
	rows: &[usize],
	columns: impl Iterator<Item = (&'a Column, Type)>,
) -> Result<Vec<JoinKey>> {
	let mut keys: Vec<JoinKey> = vec![Some(Vec::new()); rows.len()];
	for (column, key_type) in columns {
		let source = store.read_array(group, &column.field)?;
		for (key, &position) in keys.iter_mut().zip(rows) {
			let value = column.value_type.decode(source.get(position));
			let part = key_type.coerce(&value).ok().and_then(|v| key_part(&v));
			*key = match (key.take(), part) {
				(Some(mut key), Some(part)) => {
					key.push(part);
					Some(key)
				}
				_ => None,
			};
		}
	}
	Ok(keys)
}

/// Numbers compare by value across integer and float columns.
fn key_part(value: &Value) -> Option<String> {
	if value.is_undefined() {
		return None;
	}
	match value.get_type() {
		Some(ty) if ty.is_number() => value.as_f64().map(|v| format!("#{v}")),
		_ => Some(value.to_string()),
	}
}

/// Index pairs into `left` and `right`, in left order (right order for a right join).
fn join(left: &[JoinKey], right: &[JoinKey], kind: JoinKind) -> Vec<(Option<usize>, Option<usize>)> {
	if kind == JoinKind::Right {
		return join(right, left, JoinKind::Left).into_iter().map(|(r, l)| (l, r)).collect();
	}

	let mut index: HashMap<&[String], Vec<usize>> = HashMap::new();
	for (i, key) in right.iter().enumerate() {
		if let Some(key) = key {
			index.entry(key.as_slice()).or_default().push(i);
		}
	}

	let mut pairs = Vec::with_capacity(left.len());
	for (i, key) in left.iter().enumerate() {
		match key.as_ref().and_then(|k| index.get(k.as_slice())) {
			Some(matches) => pairs.extend(matches.iter().map(|&j| (Some(i), Some(j)))),
			None if kind == JoinKind::Left => pairs.push((Some(i), None)),
			None => {}
		}
	}
	pairs
}

#[cfg(test)]
mod tests {
	use super::*;

	fn key(parts: &[&str]) -> JoinKey {
		Some(parts.iter().map(|p| p.to_string()).collect())
	}

	#[test]
	fn test_inner_join() {
		let left = [key(&["1"]), key(&["2"]), None];
		let right = [key(&["2"]), key(&["1"]), key(&["2"])];
		assert_eq!(
			join(&left, &right, JoinKind::Inner),
			vec![(Some(0), Some(1)), (Some(1), Some(0)), (Some(1), Some(2))]
		);
	}

	#[test]
	fn test_left_join_keeps_unmatched() {
		let left = [key(&["1"]), key(&["3"]), None];
		let right = [key(&["1"])];
		assert_eq!(join(&left, &right, JoinKind::Left), vec![(Some(0), Some(0)), (Some(1), None), (Some(2), None)]);
	}

	#[test]
	fn test_right_join_follows_right_order() {
		let left = [key(&["1"])];
		let right = [key(&["2"]), key(&["1"])];
		assert_eq!(join(&left, &right, JoinKind::Right), vec![(None, Some(0)), (Some(0), Some(1))]);
	}

	#[test]
	fn test_key_part_normalizes_numbers() {
		assert_eq!(key_part(&Value::Int4(3)), key_part(&Value::Float8(3.0)));
		assert_eq!(key_part(&Value::from("3")), Some("3".to_string()));
		assert_eq!(key_part(&Value::Undefined), None);
	}

	fn setup() -> ArrayFile {
		let mut store = ArrayFile::memory();
		store.create_group("wafer").unwrap();
		store.write_array("wafer", "DieX", ArrayData::Integer(vec![Some(0), Some(1), Some(2)])).unwrap();
		store.write_array("wafer", "DieY", ArrayData::Integer(vec![Some(0), Some(2), Some(4)])).unwrap();
		store.create_group("bins").unwrap();
		store.write_array("bins", "X", ArrayData::Integer(vec![Some(1), Some(0), Some(9)])).unwrap();
		store.write_array("bins", "Y", ArrayData::Integer(vec![Some(2), Some(0), Some(9)])).unwrap();
		store.write_array("bins", "DieX", ArrayData::Text(vec![Some("b".into()), Some("a".into()), Some("z".into())]))
			.unwrap();
		store
	}

	fn int(field: &str) -> Column {
		Column::new(field, Type::Int4)
	}

	#[test]
	fn test_merge_columns_replaces_left_group() {
		let mut store = setup();
		let setting = MergeSetting::new("wafer", "bins")
			.with_left_columns([int("DieX"), int("DieY")])
			.with_right_columns([Column::new("DieX", Type::Utf8)])
			.with_match(int("DieX"), int("X"))
			.with_match(int("DieY"), int("Y"))
			.with_join(JoinKind::Left);

		let name = merge_columns(&mut store, &setting, None, None).unwrap();
		assert_eq!(name, "wafer");
		assert_eq!(store.array_names("wafer").unwrap(), vec!["DieX".to_string(), "DieX_right".into(), "DieY".into()]);
		assert_eq!(
			store.read_array("wafer", "DieX_right").unwrap(),
			ArrayData::Text(vec![Some("a".into()), Some("b".into()), None])
		);
		assert!(store.has_group("bins"));
	}

	#[test]
	fn test_merge_columns_skips_deleted_rows() {
		let mut store = setup();
		let setting = MergeSetting::new("wafer", "bins")
			.with_left_columns([int("DieX")])
			.with_right_columns([int("Y")])
			.with_match(int("DieX"), int("X"));
		let deleted: IndexSet = [0].into_iter().collect();

		merge_columns(&mut store, &setting, Some(&deleted), None).unwrap();
		assert_eq!(store.read_array("wafer", "DieX").unwrap(), ArrayData::Integer(vec![Some(1)]));
		assert_eq!(store.read_array("wafer", "Y").unwrap(), ArrayData::Integer(vec![Some(2)]));
	}

	#[test]
	fn test_merge_columns_converts_right_keys_to_left_type() {
		let mut store = setup();
		let text = |cells: &[&str]| ArrayData::Text(cells.iter().map(|c| Some(c.to_string())).collect());
		store.create_group("labels").unwrap();
		store.write_array("labels", "X", text(&["2", "x", "1"])).unwrap();
		store.write_array("labels", "Label", text(&["two", "bad", "one"])).unwrap();
		let setting = MergeSetting::new("wafer", "labels")
			.with_left_columns([int("DieX")])
			.with_right_columns([Column::new("Label", Type::Utf8)])
			.with_match(int("DieX"), Column::new("X", Type::Utf8));

		merge_columns(&mut store, &setting, None, None).unwrap();
		assert_eq!(store.read_array("wafer", "DieX").unwrap(), ArrayData::Integer(vec![Some(1), Some(2)]));
		assert_eq!(
			store.read_array("wafer", "Label").unwrap(),
			ArrayData::Text(vec![Some("one".into()), Some("two".into())])
		);
	}

	#[test]
	fn test_merge_rows_numbers_auto_increment() {
		let mut store = setup();
		let id = int("DieX").auto_increment();
		let setting = MergeSetting::new("wafer", "bins")
			.with_left_columns([id, int("DieY")])
			.with_right_columns([int("X"), int("Y")]);

		assert_eq!(merge_rows(&mut store, &setting, None).unwrap(), 3);
		assert_eq!(store.read_array("wafer", "DieX").unwrap(), ArrayData::Integer((0..6).map(Some).collect()));
		assert_eq!(
			store.read_array("wafer", "DieY").unwrap(),
			ArrayData::Integer(vec![Some(0), Some(2), Some(4), Some(2), Some(0), Some(9)])
		);
	}

	#[test]
	fn test_merge_rows_recodes_and_pads() {
		let mut store = setup();
		store.write_array("wafer", "Note", ArrayData::Text(vec![None, None, None])).unwrap();
		let setting = MergeSetting::new("wafer", "bins")
			.with_left_columns([int("DieX"), int("DieY")])
			.with_right_columns([int("X"), int("Y")]);
		let deleted: IndexSet = [2].into_iter().collect();

		let count = merge_rows(&mut store, &setting, Some(&deleted)).unwrap();
		assert_eq!(count, 2);
		assert_eq!(
			store.read_array("wafer", "DieX").unwrap(),
			ArrayData::Integer(vec![Some(0), Some(1), Some(2), Some(1), Some(0)])
		);
		assert_eq!(store.read_array("wafer", "Note").unwrap().len(), 5);
	}
}
