// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};
use tabula_array::ArrayFileConfig;
use tabula_core::TableMode;
use tabula_duckdb::DuckDbConfig;
use tabula_sqlite::SqliteConfig;
use tabula_type::{Error, Result};

/// Backend selection, tagged by `backend`:
///
/// ```json
/// { "backend": "array_file", "path": "/data/wafer.arr" }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum Config {
	Sqlite(SqliteConfig),
	#[serde(rename = "duckdb")]
	DuckDb(DuckDbConfig),
	ArrayFile(ArrayFileConfig),
}

impl Default for Config {
	fn default() -> Self {
		Config::Sqlite(SqliteConfig::default())
	}
}

impl Config {
	pub fn from_json(json: &str) -> Result<Self> {
		serde_json::from_str(json).map_err(Error::serde)
	}

	pub fn mode(&self) -> TableMode {
		match self {
			Config::Sqlite(_) => TableMode::Sqlite,
			Config::DuckDb(_) => TableMode::DuckDb,
			Config::ArrayFile(_) => TableMode::ArrayFile,
		}
	}

	/// In-memory configuration for `mode`.
	pub fn in_memory(mode: TableMode) -> Self {
		match mode {
			TableMode::Sqlite => Config::Sqlite(SqliteConfig::in_memory()),
			TableMode::DuckDb => Config::DuckDb(DuckDbConfig::in_memory()),
			TableMode::ArrayFile => Config::ArrayFile(ArrayFileConfig::in_memory()),
		}
	}
}

impl From<SqliteConfig> for Config {
	fn from(config: SqliteConfig) -> Self {
		Config::Sqlite(config)
	}
}

impl From<DuckDbConfig> for Config {
	fn from(config: DuckDbConfig) -> Self {
		Config::DuckDb(config)
	}
}

impl From<ArrayFileConfig> for Config {
	fn from(config: ArrayFileConfig) -> Self {
		Config::ArrayFile(config)
	}
}
