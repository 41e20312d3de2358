// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DbPath {
	File(PathBuf),
	Memory,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DuckDbConfig {
	pub path: DbPath,
	/// Worker threads for query execution. `None` lets DuckDB decide.
	pub threads: Option<usize>,
}

impl Default for DuckDbConfig {
	fn default() -> Self {
		Self {
			path: DbPath::Memory,
			threads: None,
		}
	}
}

impl DuckDbConfig {
	pub fn in_memory() -> Self {
		Self::default()
	}

	pub fn file(path: impl Into<PathBuf>) -> Self {
		Self::default().with_path(DbPath::File(path.into()))
	}

	pub fn with_path(mut self, path: DbPath) -> Self {
		self.path = path;
		self
	}

	pub fn with_threads(mut self, threads: usize) -> Self {
		self.threads = Some(threads);
		self
	}
}
