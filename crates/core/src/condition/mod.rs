// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};
use tabula_type::Value;

use crate::Column;

mod predicate;

pub use predicate::Predicate;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
	Equal,
	NotEqual,
	Like,
	In,
	LessThan,
	LessOrEqual,
	GreaterThan,
	GreaterOrEqual,
	Between,
	NotBetween,
	IsNull,
	IsNotNull,
}

impl Operator {
	/// Whether the operator needs no value.
	pub fn is_unary(&self) -> bool {
		matches!(self, Operator::IsNull | Operator::IsNotNull)
	}
}

/// How a condition combines with the next one in the list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JoinOperator {
	#[default]
	And,
	Or,
}

impl JoinOperator {
	pub fn keyword(&self) -> &'static str {
		match self {
			JoinOperator::And => "AND",
			JoinOperator::Or => "OR",
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum ConditionValue {
	#[default]
	None,
	Scalar(Value),
	List(Vec<Value>),
}

impl ConditionValue {
	pub fn scalar(&self) -> Option<&Value> {
		match self {
			ConditionValue::Scalar(value) => Some(value),
			_ => None,
		}
	}

	/// List view. A scalar reads as a one-element list.
	pub fn list(&self) -> Option<&[Value]> {
		match self {
			ConditionValue::List(values) => Some(values),
			ConditionValue::Scalar(value) => Some(std::slice::from_ref(value)),
			ConditionValue::None => None,
		}
	}

	/// Two-element list, the shape required by `Between`/`NotBetween`.
	pub fn bounds(&self) -> Option<(&Value, &Value)> {
		match self {
			ConditionValue::List(values) if values.len() == 2 => Some((&values[0], &values[1])),
			_ => None,
		}
	}
}

/// One predicate term of a flat condition list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Condition {
	pub column: Column,
	pub operator: Operator,
	pub value: ConditionValue,
	pub join: JoinOperator,
}

impl Condition {
	pub fn new(column: Column, operator: Operator, value: ConditionValue) -> Self {
		Self {
			column,
			operator,
			value,
			join: JoinOperator::And,
		}
	}

	fn scalar(column: Column, operator: Operator, value: impl Into<Value>) -> Self {
		Self::new(column, operator, ConditionValue::Scalar(value.into()))
	}

	pub fn equal(column: Column, value: impl Into<Value>) -> Self {
		Self::scalar(column, Operator::Equal, value)
	}

	pub fn not_equal(column: Column, value: impl Into<Value>) -> Self {
		Self::scalar(column, Operator::NotEqual, value)
	}

	pub fn like(column: Column, value: impl Into<Value>) -> Self {
		Self::scalar(column, Operator::Like, value)
	}

	pub fn less_than(column: Column, value: impl Into<Value>) -> Self {
		Self::scalar(column, Operator::LessThan, value)
	}

	pub fn less_or_equal(column: Column, value: impl Into<Value>) -> Self {
		Self::scalar(column, Operator::LessOrEqual, value)
	}

	pub fn greater_than(column: Column, value: impl Into<Value>) -> Self {
		Self::scalar(column, Operator::GreaterThan, value)
	}

	pub fn greater_or_equal(column: Column, value: impl Into<Value>) -> Self {
		Self::scalar(column, Operator::GreaterOrEqual, value)
	}

	pub fn in_list<V: Into<Value>>(column: Column, values: impl IntoIterator<Item = V>) -> Self {
		Self::new(column, Operator::In, ConditionValue::List(values.into_iter().map(Into::into).collect()))
	}

	pub fn between(column: Column, low: impl Into<Value>, high: impl Into<Value>) -> Self {
		Self::new(column, Operator::Between, ConditionValue::List(vec![low.into(), high.into()]))
	}

	pub fn not_between(column: Column, low: impl Into<Value>, high: impl Into<Value>) -> Self {
		Self::new(column, Operator::NotBetween, ConditionValue::List(vec![low.into(), high.into()]))
	}

	pub fn is_null(column: Column) -> Self {
		Self::new(column, Operator::IsNull, ConditionValue::None)
	}

	pub fn is_not_null(column: Column) -> Self {
		Self::new(column, Operator::IsNotNull, ConditionValue::None)
	}

	/// Combine with the next condition using OR.
	pub fn or(mut self) -> Self {
		self.join = JoinOperator::Or;
		self
	}

	pub fn and(mut self) -> Self {
		self.join = JoinOperator::And;
		self
	}

	pub fn field(&self) -> &str {
		&self.column.field
	}

	pub fn compile(&self) -> Option<Predicate> {
		Predicate::compile(self)
	}
}
