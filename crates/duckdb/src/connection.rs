// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use duckdb::{Config, Connection};
use tabula_type::{Error, Result};
use tracing::{debug, warn};

use crate::{DbPath, DuckDbConfig, duckdb_error};

pub(crate) fn open(config: &DuckDbConfig) -> Result<Connection> {
	let mut flags = Config::default();
	if let Some(threads) = config.threads {
		flags = flags.threads(threads as i64).map_err(duckdb_error)?;
	}

	let conn = match &config.path {
		DbPath::File(path) => {
			if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
				std::fs::create_dir_all(parent).map_err(Error::from)?;
			}
			Connection::open_with_flags(path, flags).map_err(|e| {
				warn!(path = %path.display(), error = %e, "failed to open duckdb database");
				duckdb_error(e)
			})?
		}
		DbPath::Memory => Connection::open_in_memory_with_flags(flags).map_err(duckdb_error)?,
	};

	debug!(path = ?config.path, "duckdb connection opened");
	Ok(conn)
}

/// Runs `f` inside a transaction. Any error rolls the whole transaction back.
pub(crate) fn in_transaction<T>(conn: &mut Connection, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
	let tx = conn.transaction().map_err(duckdb_error)?;
	match f(&tx) {
		Ok(value) => {
			tx.commit().map_err(duckdb_error)?;
			Ok(value)
		}
		Err(err) => {
			warn!(error = %err, "rolling back duckdb transaction");
			if let Err(rollback) = tx.rollback() {
				warn!(error = %rollback, "duckdb rollback failed");
			}
			Err(err)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_failed_transaction_rolls_back() {
		let mut conn = open(&DuckDbConfig::in_memory().with_threads(1)).unwrap();
		conn.execute("CREATE TABLE t (a INTEGER)", []).unwrap();

		let result: Result<()> = in_transaction(&mut conn, |tx| {
			tx.execute("INSERT INTO t VALUES (1)", []).map_err(duckdb_error)?;
			Err(Error::missing("rows"))
		});
		assert!(result.is_err());

		let count: i64 = conn.query_row("SELECT COUNT(*) FROM t", [], |r| r.get(0)).unwrap();
		assert_eq!(count, 0);
	}
}
