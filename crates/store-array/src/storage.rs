// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::path::Path;

use tabula_type::Result;

use crate::{ArrayData, ArrayStore, file::FileArrayStore, memory::MemoryArrayStore};

/// Array store dispatching to either the in-memory or the file implementation.
#[repr(u8)]
pub enum ArrayFile {
	/// In-memory storage (non-persistent)
	Memory(MemoryArrayStore) = 0,
	/// Single-file persistent storage
	File(FileArrayStore) = 1,
}

impl ArrayFile {
	pub fn memory() -> Self {
		Self::Memory(MemoryArrayStore::new())
	}

	pub fn open(path: &Path) -> Result<Self> {
		Ok(Self::File(FileArrayStore::open(path)?))
	}

	pub fn is_persistent(&self) -> bool {
		matches!(self, Self::File(_))
	}
}

impl ArrayStore for ArrayFile {
	#[inline]
	fn create_group(&mut self, group: &str) -> Result<bool> {
		match self {
			Self::Memory(s) => s.create_group(group),
			Self::File(s) => s.create_group(group),
		}
	}

	#[inline]
	fn has_group(&self, group: &str) -> bool {
		match self {
			Self::Memory(s) => s.has_group(group),
			Self::File(s) => s.has_group(group),
		}
	}

	#[inline]
	fn drop_group(&mut self, group: &str) -> Result<bool> {
		match self {
			Self::Memory(s) => s.drop_group(group),
			Self::File(s) => s.drop_group(group),
		}
	}

	#[inline]
	fn rename_group(&mut self, from: &str, to: &str) -> Result<()> {
		match self {
			Self::Memory(s) => s.rename_group(from, to),
			Self::File(s) => s.rename_group(from, to),
		}
	}

	#[inline]
	fn array_names(&self, group: &str) -> Result<Vec<String>> {
		match self {
			Self::Memory(s) => s.array_names(group),
			Self::File(s) => s.array_names(group),
		}
	}

	#[inline]
	fn group_len(&self, group: &str) -> Result<usize> {
		match self {
			Self::Memory(s) => s.group_len(group),
			Self::File(s) => s.group_len(group),
		}
	}

	#[inline]
	fn has_array(&self, group: &str, name: &str) -> bool {
		match self {
			Self::Memory(s) => s.has_array(group, name),
			Self::File(s) => s.has_array(group, name),
		}
	}

	#[inline]
	fn read_array(&self, group: &str, name: &str) -> Result<ArrayData> {
		match self {
			Self::Memory(s) => s.read_array(group, name),
			Self::File(s) => s.read_array(group, name),
		}
	}

	#[inline]
	fn write_array(&mut self, group: &str, name: &str, data: ArrayData) -> Result<()> {
		match self {
			Self::Memory(s) => s.write_array(group, name, data),
			Self::File(s) => s.write_array(group, name, data),
		}
	}

	#[inline]
	fn flush(&mut self) -> Result<()> {
		match self {
			Self::Memory(s) => s.flush(),
			Self::File(s) => s.flush(),
		}
	}
}
