// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tabula_store_array::ArrayFile;
use tabula_type::Result;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrayFileConfig {
	/// File holding every group. `None` keeps the arrays in memory.
	pub path: Option<PathBuf>,
}

impl ArrayFileConfig {
	pub fn in_memory() -> Self {
		Self::default()
	}

	pub fn file(path: impl Into<PathBuf>) -> Self {
		Self {
			path: Some(path.into()),
		}
	}

	pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
		self.path = Some(path.into());
		self
	}

	pub(crate) fn open(&self) -> Result<ArrayFile> {
		match &self.path {
			Some(path) => ArrayFile::open(path),
			None => Ok(ArrayFile::memory()),
		}
	}
}
