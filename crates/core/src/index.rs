// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Sorted, duplicate-free set of row positions. Combining condition results
//! goes through these operations only.

use std::{cmp::Ordering, ops::Deref};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IndexSet(Vec<usize>);

impl IndexSet {
	pub fn new() -> Self {
		Self::default()
	}

	/// Every position in `0..len`.
	pub fn all(len: usize) -> Self {
		Self((0..len).collect())
	}

	pub fn contains(&self, index: usize) -> bool {
		self.0.binary_search(&index).is_ok()
	}

	pub fn insert(&mut self, index: usize) -> bool {
		match self.0.binary_search(&index) {
			Ok(_) => false,
			Err(pos) => {
				self.0.insert(pos, index);
				true
			}
		}
	}

	pub fn intersect(&self, other: &IndexSet) -> IndexSet {
		let (mut i, mut j) = (0, 0);
		let mut result = Vec::with_capacity(self.0.len().min(other.0.len()));
		while i < self.0.len() && j < other.0.len() {
			match self.0[i].cmp(&other.0[j]) {
				Ordering::Less => i += 1,
				Ordering::Greater => j += 1,
				Ordering::Equal => {
					result.push(self.0[i]);
					i += 1;
					j += 1;
				}
			}
		}
		IndexSet(result)
	}

	/// Positions in `self` that are not in `other`.
	pub fn except(&self, other: &IndexSet) -> IndexSet {
		let (mut i, mut j) = (0, 0);
		let mut result = Vec::with_capacity(self.0.len());
		while i < self.0.len() {
			if j >= other.0.len() {
				result.extend_from_slice(&self.0[i..]);
				break;
			}
			match self.0[i].cmp(&other.0[j]) {
				Ordering::Less => {
					result.push(self.0[i]);
					i += 1;
				}
				Ordering::Greater => j += 1,
				Ordering::Equal => {
					i += 1;
					j += 1;
				}
			}
		}
		IndexSet(result)
	}

	pub fn union(&self, other: &IndexSet) -> IndexSet {
		let (mut i, mut j) = (0, 0);
		let mut result = Vec::with_capacity(self.0.len() + other.0.len());
		while i < self.0.len() && j < other.0.len() {
			match self.0[i].cmp(&other.0[j]) {
				Ordering::Less => {
					result.push(self.0[i]);
					i += 1;
				}
				Ordering::Greater => {
					result.push(other.0[j]);
					j += 1;
				}
				Ordering::Equal => {
					result.push(self.0[i]);
					i += 1;
					j += 1;
				}
			}
		}
		result.extend_from_slice(&self.0[i..]);
		result.extend_from_slice(&other.0[j..]);
		IndexSet(result)
	}

	pub fn into_vec(self) -> Vec<usize> {
		self.0
	}
}

impl Deref for IndexSet {
	type Target = [usize];

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl FromIterator<usize> for IndexSet {
	fn from_iter<T: IntoIterator<Item = usize>>(iter: T) -> Self {
		let mut indices: Vec<usize> = iter.into_iter().collect();
		indices.sort_unstable();
		indices.dedup();
		IndexSet(indices)
	}
}

impl Extend<usize> for IndexSet {
	fn extend<T: IntoIterator<Item = usize>>(&mut self, iter: T) {
		self.0.extend(iter);
		self.0.sort_unstable();
		self.0.dedup();
	}
}
