// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Array-file storage.
//!
//! A store holds named groups; each group holds named, typed arrays that the
//! callers keep at equal length. There is no row-level append or update: an
//! array is always read and written whole.

#![cfg_attr(not(debug_assertions), deny(warnings))]

mod data;
mod file;
mod memory;
mod storage;

pub use data::ArrayData;
pub use file::FileArrayStore;
pub use memory::MemoryArrayStore;
pub use storage::ArrayFile;
use tabula_type::Result;

pub(crate) const BACKEND: &str = "array";

pub trait ArrayStore: Send {
	/// Returns false when the group already existed.
	fn create_group(&mut self, group: &str) -> Result<bool>;

	fn has_group(&self, group: &str) -> bool;

	/// Returns false when there was nothing to drop.
	fn drop_group(&mut self, group: &str) -> Result<bool>;

	fn rename_group(&mut self, from: &str, to: &str) -> Result<()>;

	fn array_names(&self, group: &str) -> Result<Vec<String>>;

	/// Length of the longest array in the group.
	fn group_len(&self, group: &str) -> Result<usize>;

	fn has_array(&self, group: &str, name: &str) -> bool;

	fn read_array(&self, group: &str, name: &str) -> Result<ArrayData>;

	/// Replaces the named array.
	fn write_array(&mut self, group: &str, name: &str, data: ArrayData) -> Result<()>;

	/// Makes every change so far durable.
	fn flush(&mut self) -> Result<()>;
}
