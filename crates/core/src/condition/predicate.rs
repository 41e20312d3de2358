// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::cmp::Ordering;

use tabula_type::Value;

use super::{Condition, Operator};
use crate::IndexSet;

/// Membership list for `In`. The shape follows the first element.
#[derive(Clone, Debug, PartialEq)]
pub enum InList {
	Numeric(Vec<f64>),
	Text(Vec<String>),
}

/// A condition compiled into an executable in-memory test.
#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
	Compare {
		operator: Operator,
		literal: Value,
	},
	/// Substring test, ASCII case-insensitive. Holds the lowercased pattern.
	Like(String),
	In(InList),
	Between {
		low: Value,
		high: Value,
		negated: bool,
	},
	IsNull,
	IsNotNull,
}

impl Predicate {
	/// Returns `None` when the condition is a no-op: a missing value, an
	/// empty list or a `Between` that does not carry exactly two bounds.
	pub fn compile(condition: &Condition) -> Option<Predicate> {
		let value = &condition.value;
		let predicate = match condition.operator {
			Operator::IsNull => Predicate::IsNull,
			Operator::IsNotNull => Predicate::IsNotNull,
			Operator::Like => {
				let literal = value.scalar().filter(|v| !v.is_undefined())?;
				Predicate::Like(literal.to_string().trim_matches('%').to_ascii_lowercase())
			}
			Operator::In => {
				let list = value.list().filter(|l| !l.is_empty())?;
				if list[0].is_numeric_literal() {
					Predicate::In(InList::Numeric(list.iter().filter_map(Value::as_f64).collect()))
				} else {
					Predicate::In(InList::Text(list.iter().map(ToString::to_string).collect()))
				}
			}
			Operator::Between | Operator::NotBetween => {
				let (low, high) = value.bounds()?;
				Predicate::Between {
					low: low.clone(),
					high: high.clone(),
					negated: condition.operator == Operator::NotBetween,
				}
			}
			operator => Predicate::Compare {
				operator,
				literal: value.scalar().filter(|v| !v.is_undefined())?.clone(),
			},
		};
		Some(predicate)
	}

	/// Undefined candidates only ever satisfy `IsNull`.
	pub fn evaluate(&self, candidate: &Value) -> bool {
		match self {
			Predicate::IsNull => candidate.is_undefined(),
			Predicate::IsNotNull => !candidate.is_undefined(),
			_ if candidate.is_undefined() => false,
			Predicate::Compare {
				operator,
				literal,
			} => {
				let ordering = candidate.compare(literal);
				match operator {
					Operator::Equal => ordering == Some(Ordering::Equal),
					Operator::NotEqual => ordering != Some(Ordering::Equal),
					Operator::LessThan => ordering == Some(Ordering::Less),
					Operator::LessOrEqual => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
					Operator::GreaterThan => ordering == Some(Ordering::Greater),
					Operator::GreaterOrEqual => {
						matches!(ordering, Some(Ordering::Greater | Ordering::Equal))
					}
					_ => false,
				}
			}
			Predicate::Like(pattern) => candidate.to_string().to_ascii_lowercase().contains(pattern.as_str()),
			Predicate::In(InList::Numeric(list)) => {
				candidate.as_f64().is_some_and(|v| list.iter().any(|item| *item == v))
			}
			Predicate::In(InList::Text(list)) => {
				let text = candidate.to_string();
				list.iter().any(|item| *item == text)
			}
			Predicate::Between {
				low,
				high,
				negated,
			} => {
				let (Some(lower), Some(upper)) = (candidate.compare(low), candidate.compare(high)) else {
					return false;
				};
				let inside = lower != Ordering::Less && upper != Ordering::Greater;
				inside != *negated
			}
		}
	}

	/// Full scan over one column, returning the matching positions.
	pub fn select(&self, values: &[Value]) -> IndexSet {
		values.iter().enumerate().filter(|(_, v)| self.evaluate(v)).map(|(i, _)| i).collect()
	}
}

#[cfg(test)]
mod tests {
	use tabula_type::Type;

	use super::*;
	use crate::{Column, ConditionValue};

	fn wafer_ids() -> Vec<Value> {
		vec![Value::from("A"), Value::from("B"), Value::from("C"), Value::Undefined]
	}

	fn die_x() -> Vec<Value> {
		(0..6).map(Value::Int4).collect()
	}

	fn wafer() -> Column {
		Column::new("WaferId", Type::Utf8)
	}

	fn x() -> Column {
		Column::new("DieX", Type::Int4)
	}

	#[test]
	fn test_equal_selects_one() {
		let predicate = Condition::equal(wafer(), "B").compile().unwrap();
		assert_eq!(predicate.select(&wafer_ids()).into_vec(), vec![1]);
	}

	#[test]
	fn test_not_equal_skips_nulls() {
		let predicate = Condition::not_equal(wafer(), "B").compile().unwrap();
		assert_eq!(predicate.select(&wafer_ids()).into_vec(), vec![0, 2]);
	}

	#[test]
	fn test_in_text() {
		let predicate = Condition::in_list(wafer(), ["A", "C"]).compile().unwrap();
		assert_eq!(predicate.select(&wafer_ids()).into_vec(), vec![0, 2]);
	}

	#[test]
	fn test_in_numeric_follows_first_element() {
		let predicate = Condition::in_list(x(), [Value::from("1"), Value::Int4(4), Value::from("x")]).compile().unwrap();
		assert!(matches!(predicate, Predicate::In(InList::Numeric(_))));
		assert_eq!(predicate.select(&die_x()).into_vec(), vec![1, 4]);
	}

	#[test]
	fn test_in_text_when_first_element_is_text() {
		let predicate = Condition::in_list(x(), [Value::from("x"), Value::Int4(2)]).compile().unwrap();
		assert!(matches!(predicate, Predicate::In(InList::Text(_))));
		assert_eq!(predicate.select(&die_x()).into_vec(), vec![2]);
	}

	#[test]
	fn test_between_inclusive() {
		let predicate = Condition::between(x(), 1i32, 3i32).compile().unwrap();
		assert_eq!(predicate.select(&die_x()).into_vec(), vec![1, 2, 3]);
	}

	#[test]
	fn test_not_between() {
		let predicate = Condition::not_between(x(), 1i32, 3i32).compile().unwrap();
		assert_eq!(predicate.select(&die_x()).into_vec(), vec![0, 4, 5]);
	}

	#[test]
	fn test_between_wrong_arity_is_noop() {
		let condition = Condition::new(x(), Operator::Between, ConditionValue::List(vec![Value::Int4(1)]));
		assert!(condition.compile().is_none());
	}

	#[test]
	fn test_is_null() {
		let predicate = Condition::is_null(wafer()).compile().unwrap();
		assert_eq!(predicate.select(&wafer_ids()).into_vec(), vec![3]);
		let predicate = Condition::is_not_null(wafer()).compile().unwrap();
		assert_eq!(predicate.select(&wafer_ids()).into_vec(), vec![0, 1, 2]);
	}

	#[test]
	fn test_like_is_substring() {
		let values = vec![Value::from("wafer-01"), Value::from("die-02"), Value::from("wafer-03")];
		let predicate = Condition::like(wafer(), "afer").compile().unwrap();
		assert_eq!(predicate.select(&values).into_vec(), vec![0, 2]);
		let predicate = Condition::like(wafer(), "%02%").compile().unwrap();
		assert_eq!(predicate.select(&values).into_vec(), vec![1]);
	}

	#[test]
	fn test_like_ignores_ascii_case_and_wildcards() {
		let values = vec![Value::from("Wafer_01"), Value::from("WAFER-02"), Value::from("die")];
		let predicate = Condition::like(wafer(), "wAfEr").compile().unwrap();
		assert_eq!(predicate.select(&values).into_vec(), vec![0, 1]);
		let predicate = Condition::like(wafer(), "r_0").compile().unwrap();
		assert_eq!(predicate.select(&values).into_vec(), vec![0]);
	}

	#[test]
	fn test_comparisons() {
		let values = die_x();
		let lt = Condition::less_than(x(), 2i32).compile().unwrap();
		assert_eq!(lt.select(&values).into_vec(), vec![0, 1]);
		let ge = Condition::greater_or_equal(x(), 4i32).compile().unwrap();
		assert_eq!(ge.select(&values).into_vec(), vec![4, 5]);
		let le = Condition::less_or_equal(x(), Value::from("1")).compile().unwrap();
		assert_eq!(le.select(&values).into_vec(), vec![0, 1]);
		let gt = Condition::greater_than(x(), 4.5f64).compile().unwrap();
		assert_eq!(gt.select(&values).into_vec(), vec![5]);
	}

	#[test]
	fn test_missing_value_is_noop() {
		let condition = Condition::new(x(), Operator::Equal, ConditionValue::None);
		assert!(condition.compile().is_none());
		let condition = Condition::new(x(), Operator::In, ConditionValue::List(vec![]));
		assert!(condition.compile().is_none());
		assert!(Condition::equal(wafer(), Value::Undefined).compile().is_none());
		assert!(Condition::like(wafer(), Value::Undefined).compile().is_none());
	}
}
