// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tabula_type::{Error, Result};

use crate::{ArrayData, ArrayStore};

pub(crate) type Group = BTreeMap<String, ArrayData>;

/// Groups held in process memory. Gone when dropped.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryArrayStore {
	groups: BTreeMap<String, Group>,
}

impl MemoryArrayStore {
	pub fn new() -> Self {
		Self::default()
	}

	fn group(&self, group: &str) -> Result<&Group> {
		self.groups.get(group).ok_or_else(|| Error::TableNotFound(group.to_string()))
	}

	fn group_mut(&mut self, group: &str) -> Result<&mut Group> {
		self.groups.get_mut(group).ok_or_else(|| Error::TableNotFound(group.to_string()))
	}
}

impl ArrayStore for MemoryArrayStore {
	fn create_group(&mut self, group: &str) -> Result<bool> {
		if self.groups.contains_key(group) {
			return Ok(false);
		}
		self.groups.insert(group.to_string(), Group::new());
		Ok(true)
	}

	fn has_group(&self, group: &str) -> bool {
		self.groups.contains_key(group)
	}

	fn drop_group(&mut self, group: &str) -> Result<bool> {
		Ok(self.groups.remove(group).is_some())
	}

	fn rename_group(&mut self, from: &str, to: &str) -> Result<()> {
		if self.groups.contains_key(to) {
			return Err(Error::TableExists(to.to_string()));
		}
		let arrays = self.groups.remove(from).ok_or_else(|| Error::TableNotFound(from.to_string()))?;
		self.groups.insert(to.to_string(), arrays);
		Ok(())
	}

	fn array_names(&self, group: &str) -> Result<Vec<String>> {
		Ok(self.group(group)?.keys().cloned().collect())
	}

	fn group_len(&self, group: &str) -> Result<usize> {
		Ok(self.group(group)?.values().map(ArrayData::len).max().unwrap_or(0))
	}

	fn has_array(&self, group: &str, name: &str) -> bool {
		self.groups.get(group).is_some_and(|g| g.contains_key(name))
	}

	fn read_array(&self, group: &str, name: &str) -> Result<ArrayData> {
		self.group(group)?.get(name).cloned().ok_or_else(|| Error::ColumnNotFound(name.to_string()))
	}

	fn write_array(&mut self, group: &str, name: &str, data: ArrayData) -> Result<()> {
		self.group_mut(group)?.insert(name.to_string(), data);
		Ok(())
	}

	fn flush(&mut self) -> Result<()> {
		Ok(())
	}
}
