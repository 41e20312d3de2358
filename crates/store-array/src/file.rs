// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Single-file array store.
//!
//! The whole file is one postcard image of every group. It is loaded on open,
//! mutated in memory and written back on [`ArrayStore::flush`] through a
//! sibling temporary file that is renamed over the original.

use std::{
	fs,
	path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tabula_type::{Error, Result};
use tracing::{debug, instrument};

use crate::{ArrayData, ArrayStore, memory::MemoryArrayStore};

const FORMAT_VERSION: u8 = 1;

#[derive(Serialize, Deserialize)]
struct Image {
	version: u8,
	store: MemoryArrayStore,
}

pub struct FileArrayStore {
	path: PathBuf,
	store: MemoryArrayStore,
	dirty: bool,
}

impl FileArrayStore {
	/// Opens the file at `path`, creating an empty store if it does not exist.
	#[instrument(name = "store::array::open", level = "debug", fields(path = %path.display()))]
	pub fn open(path: &Path) -> Result<Self> {
		let store = if path.exists() {
			let bytes = fs::read(path)?;
			let image: Image = postcard::from_bytes(&bytes).map_err(Error::serde)?;
			if image.version != FORMAT_VERSION {
				return Err(Error::serde(format!("unsupported array file version {}", image.version)));
			}
			debug!(bytes = bytes.len(), "loaded array file");
			image.store
		} else {
			if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
				fs::create_dir_all(parent)?;
			}
			MemoryArrayStore::new()
		};

		Ok(Self {
			path: path.to_path_buf(),
			store,
			dirty: false,
		})
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	fn mark<T>(&mut self, result: Result<T>) -> Result<T> {
		if result.is_ok() {
			self.dirty = true;
		}
		result
	}
}

impl ArrayStore for FileArrayStore {
	fn create_group(&mut self, group: &str) -> Result<bool> {
		let result = self.store.create_group(group);
		self.mark(result)
	}

	fn has_group(&self, group: &str) -> bool {
		self.store.has_group(group)
	}

	fn drop_group(&mut self, group: &str) -> Result<bool> {
		let result = self.store.drop_group(group);
		self.mark(result)
	}

	fn rename_group(&mut self, from: &str, to: &str) -> Result<()> {
		let result = self.store.rename_group(from, to);
		self.mark(result)
	}

	fn array_names(&self, group: &str) -> Result<Vec<String>> {
		self.store.array_names(group)
	}

	fn group_len(&self, group: &str) -> Result<usize> {
		self.store.group_len(group)
	}

	fn has_array(&self, group: &str, name: &str) -> bool {
		self.store.has_array(group, name)
	}

	fn read_array(&self, group: &str, name: &str) -> Result<ArrayData> {
		self.store.read_array(group, name)
	}

	fn write_array(&mut self, group: &str, name: &str, data: ArrayData) -> Result<()> {
		let result = self.store.write_array(group, name, data);
		self.mark(result)
	}

	#[instrument(name = "store::array::flush", level = "trace", skip(self), fields(path = %self.path.display()))]
	fn flush(&mut self) -> Result<()> {
		if !self.dirty {
			return Ok(());
		}

		let image = Image {
			version: FORMAT_VERSION,
			store: self.store.clone(),
		};
		let bytes = postcard::to_stdvec(&image).map_err(Error::serde)?;

		let mut tmp = self.path.clone().into_os_string();
		tmp.push(".tmp");
		let tmp = PathBuf::from(tmp);
		fs::write(&tmp, &bytes)?;
		fs::rename(&tmp, &self.path)?;

		self.dirty = false;
		debug!(bytes = bytes.len(), "flushed array file");
		Ok(())
	}
}
