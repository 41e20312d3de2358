// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use rusqlite::Connection;
use tabula_type::{Error, Result};
use tracing::{debug, warn};

use crate::{DbPath, SqliteConfig, sqlite_error};

pub(crate) fn open(config: &SqliteConfig) -> Result<Connection> {
	let conn = connect(&config.path, convert_flags(&config.flags))?;
	conn.pragma_update(None, "journal_mode", config.journal_mode.as_str()).map_err(sqlite_error)?;
	conn.pragma_update(None, "synchronous", config.synchronous_mode.as_str()).map_err(sqlite_error)?;
	conn.busy_timeout(config.busy_timeout).map_err(sqlite_error)?;
	debug!(path = ?config.path, "sqlite connection opened");
	Ok(conn)
}

fn connect(path: &DbPath, flags: rusqlite::OpenFlags) -> Result<Connection> {
	match path {
		DbPath::File(path) => {
			let path_str = path.to_string_lossy();
			if path_str.contains(':') {
				let uri_flags = flags | rusqlite::OpenFlags::SQLITE_OPEN_URI;
				return Connection::open_with_flags(path_str.to_string(), uri_flags).map_err(sqlite_error);
			}

			if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
				std::fs::create_dir_all(parent).map_err(Error::from)?;
			}
			Connection::open_with_flags(path, flags).map_err(|e| {
				warn!(path = %path.display(), error = %e, "failed to open sqlite database");
				sqlite_error(e)
			})
		}
		DbPath::Memory => Connection::open_in_memory_with_flags(flags).map_err(sqlite_error),
	}
}

pub(crate) fn convert_flags(flags: &crate::OpenFlags) -> rusqlite::OpenFlags {
	let mut rusqlite_flags = rusqlite::OpenFlags::empty();

	if flags.read_write {
		rusqlite_flags |= rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE;
	}
	if flags.create {
		rusqlite_flags |= rusqlite::OpenFlags::SQLITE_OPEN_CREATE;
	}
	if flags.full_mutex {
		rusqlite_flags |= rusqlite::OpenFlags::SQLITE_OPEN_FULL_MUTEX;
	}
	if flags.no_mutex {
		rusqlite_flags |= rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX;
	}
	if flags.shared_cache {
		rusqlite_flags |= rusqlite::OpenFlags::SQLITE_OPEN_SHARED_CACHE;
	}
	if flags.private_cache {
		rusqlite_flags |= rusqlite::OpenFlags::SQLITE_OPEN_PRIVATE_CACHE;
	}
	if flags.uri {
		rusqlite_flags |= rusqlite::OpenFlags::SQLITE_OPEN_URI;
	}

	rusqlite_flags
}

/// Runs `f` inside a transaction. Any error rolls the whole transaction back.
pub(crate) fn in_transaction<T>(conn: &mut Connection, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
	let tx = conn.transaction().map_err(sqlite_error)?;
	match f(&tx) {
		Ok(value) => {
			tx.commit().map_err(sqlite_error)?;
			Ok(value)
		}
		Err(err) => {
			warn!(error = %err, "rolling back sqlite transaction");
			if let Err(rollback) = tx.rollback() {
				warn!(error = %rollback, "sqlite rollback failed");
			}
			Err(err)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::OpenFlags;

	#[test]
	fn test_convert_default_flags() {
		let flags = convert_flags(&OpenFlags::default());
		assert!(flags.contains(rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE));
		assert!(flags.contains(rusqlite::OpenFlags::SQLITE_OPEN_CREATE));
		assert!(flags.contains(rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX));
		assert!(!flags.contains(rusqlite::OpenFlags::SQLITE_OPEN_URI));
	}

	#[test]
	fn test_failed_transaction_rolls_back() {
		let mut conn = open(&SqliteConfig::in_memory()).unwrap();
		conn.execute("CREATE TABLE t (a INTEGER)", []).unwrap();

		let result: Result<()> = in_transaction(&mut conn, |tx| {
			tx.execute("INSERT INTO t VALUES (1)", []).map_err(sqlite_error)?;
			Err(Error::missing("rows"))
		});
		assert!(result.is_err());

		let count: i64 = conn.query_row("SELECT COUNT(*) FROM t", [], |r| r.get(0)).unwrap();
		assert_eq!(count, 0);
	}
}
