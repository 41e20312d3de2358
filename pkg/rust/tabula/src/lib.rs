// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! # Tabula
//!
//! Tables, conditions and merges over interchangeable storage backends.
//! A [`Config`] picks the backend; [`open`] turns it into a shared context
//! that tables bind to.
//!
//! - [`sqlite`]: row store over SQLite.
//! - [`duckdb`]: column store over DuckDB.
//! - [`array`]: flat typed arrays, filtered and merged in process.

#![cfg_attr(not(debug_assertions), deny(warnings))]

mod builder;
mod config;

pub use builder::TabulaBuilder;
pub use config::Config;
pub use tabula_array as array;
pub use tabula_array::{ArrayContext, ArrayFileConfig};
pub use tabula_core::*;
pub use tabula_duckdb as duckdb;
pub use tabula_duckdb::{DuckDbConfig, DuckDbContext};
pub use tabula_sqlite as sqlite;
pub use tabula_sqlite::{SqliteConfig, SqliteContext};
pub use tabula_sub_tracing::{TracingBuilder, TracingConfigurator};

/// Builds the context for `config`. The engine handle opens on first use.
pub fn open(config: Config) -> SharedContext {
	TabulaBuilder::new(config).build()
}
