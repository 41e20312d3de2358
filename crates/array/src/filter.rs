// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Condition evaluation by full column scan.
//!
//! Each condition loads its column, decodes it with the condition column's
//! semantic type and yields the matching positions. The per-condition sets
//! are intersected: join operators are not consulted, so `Or` behaves as `And`.

use tabula_core::{Condition, IndexSet, JoinOperator};
use tabula_store_array::{ArrayData, ArrayFile, ArrayStore};
use tabula_type::{Result, Type, Value};
use tracing::trace;

pub(crate) fn decode(data: ArrayData, value_type: Type) -> Vec<Value> {
	data.into_cells().into_iter().map(|cell| value_type.decode(cell)).collect()
}

/// Positions in `0..len` matching every condition. Deletions are not applied.
pub(crate) fn filter(store: &ArrayFile, group: &str, len: usize, conditions: &[Condition]) -> Result<IndexSet> {
	if conditions.iter().rev().skip(1).any(|c| c.join == JoinOperator::Or) {
		trace!(table = group, "or joins are evaluated as and");
	}

	let mut selected = IndexSet::all(len);
	for condition in conditions {
		let Some(predicate) = condition.compile() else {
			trace!(column = condition.field(), operator = ?condition.operator, "condition has no operand, skipped");
			continue;
		};

		let values = decode(store.read_array(group, condition.field())?, condition.column.value_type);
		let matched = predicate.select(&values);
		trace!(
			column = condition.field(),
			operator = ?condition.operator,
			matched = matched.len(),
			scanned = values.len(),
			"condition evaluated"
		);

		selected = selected.intersect(&matched);
		if selected.is_empty() {
			break;
		}
	}
	Ok(selected)
}

/// Positions of the group that have not been deleted.
pub(crate) fn live(len: usize, deleted: Option<&IndexSet>) -> IndexSet {
	let all = IndexSet::all(len);
	match deleted {
		Some(deleted) => all.except(deleted),
		None => all,
	}
}

#[cfg(test)]
mod tests {
	use tabula_core::{Column, Condition};
	use tabula_type::Type;

	use super::*;

	fn store() -> ArrayFile {
		let mut store = ArrayFile::memory();
		store.create_group("wafer").unwrap();
		store.write_array("wafer", "DieX", ArrayData::Integer((0..6).map(Some).collect())).unwrap();
		store.write_array(
			"wafer",
			"WaferId",
			ArrayData::Text(["A", "B", "A", "C", "B", "A"].iter().map(|s| Some(s.to_string())).collect()),
		)
		.unwrap();
		store
	}

	fn die_x() -> Column {
		Column::new("DieX", Type::Int4)
	}

	fn wafer_id() -> Column {
		Column::new("WaferId", Type::Utf8)
	}

	#[test]
	fn test_no_conditions_selects_everything() {
		let selected = filter(&store(), "wafer", 6, &[]).unwrap();
		assert_eq!(selected, IndexSet::all(6));
	}

	#[test]
	fn test_conditions_intersect() {
		let conditions = [Condition::equal(wafer_id(), "A"), Condition::greater_than(die_x(), 1)];
		let selected = filter(&store(), "wafer", 6, &conditions).unwrap();
		assert_eq!(selected.into_vec(), vec![2, 5]);
	}

	#[test]
	fn test_or_is_evaluated_as_and() {
		let conditions = [Condition::equal(wafer_id(), "A").or(), Condition::equal(wafer_id(), "B")];
		let selected = filter(&store(), "wafer", 6, &conditions).unwrap();
		assert!(selected.is_empty());
	}

	#[test]
	fn test_noop_condition_is_skipped() {
		let conditions = [Condition::in_list(wafer_id(), Vec::<Value>::new()), Condition::less_than(die_x(), 2)];
		let selected = filter(&store(), "wafer", 6, &conditions).unwrap();
		assert_eq!(selected.into_vec(), vec![0, 1]);
	}

	#[test]
	fn test_unknown_column() {
		let conditions = [Condition::equal(Column::new("Nope", Type::Int4), 1)];
		let err = filter(&store(), "wafer", 6, &conditions).unwrap_err();
		assert_eq!(err.code(), "QUERY_001");
	}

	#[test]
	fn test_live_excludes_deleted() {
		let deleted: IndexSet = [1, 3].into_iter().collect();
		assert_eq!(live(5, Some(&deleted)).into_vec(), vec![0, 2, 4]);
		assert_eq!(live(2, None).into_vec(), vec![0, 1]);
	}
}
