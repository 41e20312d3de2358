// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tabula_array::ArrayContext;
use tabula_core::{SharedContext, shared};
use tabula_duckdb::DuckDbContext;
use tabula_sqlite::SqliteContext;
use tabula_sub_tracing::{TracingBuilder, TracingConfigurator};
use tracing::debug;

use crate::Config;

pub struct TabulaBuilder {
	config: Config,
	tracing_configurator: Option<TracingConfigurator>,
}

impl TabulaBuilder {
	pub fn new(config: impl Into<Config>) -> Self {
		Self {
			config: config.into(),
			tracing_configurator: None,
		}
	}

	/// Installs a global tracing subscriber on [`build`](Self::build).
	pub fn with_tracing<F>(mut self, configurator: F) -> Self
	where
		F: FnOnce(TracingBuilder) -> TracingBuilder + Send + 'static,
	{
		self.tracing_configurator = Some(Box::new(configurator));
		self
	}

	pub fn config(&self) -> &Config {
		&self.config
	}

	pub fn build(self) -> SharedContext {
		if let Some(configurator) = self.tracing_configurator {
			configurator(TracingBuilder::new()).init();
		}

		let mode = self.config.mode();
		let context = match self.config {
			Config::Sqlite(config) => shared(SqliteContext::new(config)),
			Config::DuckDb(config) => shared(DuckDbContext::new(config)),
			Config::ArrayFile(config) => shared(ArrayContext::new(config)),
		};
		debug!(%mode, "context built");
		context
	}
}
