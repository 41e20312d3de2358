// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};
use tabula_type::Type;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderDirection {
	Asc,
	Desc,
}

impl OrderDirection {
	pub fn keyword(&self) -> &'static str {
		match self {
			OrderDirection::Asc => "ASC",
			OrderDirection::Desc => "DESC",
		}
	}
}

/// Column definition. `column_index` is assigned by [`super::Columns`] and
/// always matches declaration order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Column {
	pub id: Uuid,
	/// Display name
	pub name: String,
	/// Storage name
	pub field: String,
	pub column_index: usize,
	/// Display position, defaults to `column_index`
	pub visible_index: Option<usize>,
	pub value_type: Type,
	pub primary_key: bool,
	pub auto_increment: bool,
	/// Computed-field marker. Carried through, never evaluated.
	pub expression: Option<String>,
	pub order: Option<OrderDirection>,
}

impl Column {
	pub fn new(field: impl Into<String>, value_type: Type) -> Self {
		let field = field.into();
		Self {
			id: Uuid::new_v4(),
			name: field.clone(),
			field,
			column_index: 0,
			visible_index: None,
			value_type,
			primary_key: false,
			auto_increment: false,
			expression: None,
			order: None,
		}
	}

	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = name.into();
		self
	}

	pub fn with_visible_index(mut self, index: usize) -> Self {
		self.visible_index = Some(index);
		self
	}

	pub fn with_expression(mut self, expression: impl Into<String>) -> Self {
		self.expression = Some(expression.into());
		self
	}

	pub fn with_order(mut self, order: OrderDirection) -> Self {
		self.order = Some(order);
		self
	}

	pub fn primary_key(mut self) -> Self {
		self.primary_key = true;
		self
	}

	pub fn auto_increment(mut self) -> Self {
		self.auto_increment = true;
		self
	}

	pub fn visible_position(&self) -> usize {
		self.visible_index.unwrap_or(self.column_index)
	}
}
