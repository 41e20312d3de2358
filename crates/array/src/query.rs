// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::cmp::Ordering;

use tabula_core::{Column, Columns, IndexSet, OrderDirection, QuerySetting, Row, Table, TableMode};
use tabula_store_array::{ArrayFile, ArrayStore};
use tabula_type::{Result, Value};
use tracing::debug;

use crate::filter::{decode, filter};

pub(crate) fn query(store: &ArrayFile, setting: &QuerySetting, deleted: Option<&IndexSet>) -> Result<Table> {
	setting.validate()?;
	let group = setting.table_name();
	let len = store.group_len(group)?;

	let mut selected = filter(store, group, len, &setting.conditions)?;
	if let Some(deleted) = deleted {
		selected = selected.except(deleted);
	}
	debug!(table = group, scanned = len, selected = selected.len(), "rows selected");

	let positions = order(store, group, selected.into_vec(), &setting.order_by)?;
	let projection = setting.projection();

	let mut rows: Vec<Row> =
		positions.iter().map(|&position| Row::new(projection.len()).with_row_index(position)).collect();
	for (i, column) in projection.iter().enumerate() {
		let data = store.read_array(group, &column.field)?;
		for (row, &position) in rows.iter_mut().zip(&positions) {
			row.set(i, column.value_type.decode(data.get(position)))?;
		}
	}

	let mut result = Table::new(setting.table.name.clone(), TableMode::ArrayFile)
		.with_original_table(group)
		.with_columns(Columns::reindexed(projection.iter().copied())?);
	for row in rows {
		result.push_row(row)?;
	}
	Ok(result)
}

/// Stable sort of `positions` by the order-by columns. Undefined sorts lowest.
fn order(store: &ArrayFile, group: &str, mut positions: Vec<usize>, order_by: &[Column]) -> Result<Vec<usize>> {
	if order_by.is_empty() || positions.len() < 2 {
		return Ok(positions);
	}

	let keys = order_by
		.iter()
		.map(|column| {
			let values = decode(store.read_array(group, &column.field)?, column.value_type);
			Ok((values, column.order.unwrap_or(OrderDirection::Asc)))
		})
		.collect::<Result<Vec<_>>>()?;

	positions.sort_by(|&a, &b| {
		for (values, direction) in &keys {
			let ordering = compare(values.get(a), values.get(b));
			let ordering = match direction {
				OrderDirection::Asc => ordering,
				OrderDirection::Desc => ordering.reverse(),
			};
			if ordering != Ordering::Equal {
				return ordering;
			}
		}
		Ordering::Equal
	});
	Ok(positions)
}

fn compare(a: Option<&Value>, b: Option<&Value>) -> Ordering {
	let a = a.filter(|v| !v.is_undefined());
	let b = b.filter(|v| !v.is_undefined());
	match (a, b) {
		(None, None) => Ordering::Equal,
		(None, Some(_)) => Ordering::Less,
		(Some(_), None) => Ordering::Greater,
		(Some(a), Some(b)) => a.compare(b).unwrap_or(Ordering::Equal),
	}
}
