// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt};

/// Configuration function applied to a fresh [`TracingBuilder`].
pub type TracingConfigurator = Box<dyn FnOnce(TracingBuilder) -> TracingBuilder + Send>;

/// Installs the global `fmt` subscriber. `RUST_LOG` overrides the filter.
#[derive(Clone, Debug)]
pub struct TracingBuilder {
	filter: String,
	json: bool,
	with_target: bool,
	with_thread_ids: bool,
}

impl Default for TracingBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl TracingBuilder {
	pub fn new() -> Self {
		Self {
			filter: "info".to_string(),
			json: false,
			with_target: true,
			with_thread_ids: false,
		}
	}

	/// Filter directives, e.g. `"info,tabula_array=trace"`.
	pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
		self.filter = filter.into();
		self
	}

	pub fn with_json(mut self, json: bool) -> Self {
		self.json = json;
		self
	}

	pub fn with_target(mut self, with_target: bool) -> Self {
		self.with_target = with_target;
		self
	}

	pub fn with_thread_ids(mut self, with_thread_ids: bool) -> Self {
		self.with_thread_ids = with_thread_ids;
		self
	}

	pub fn filter(&self) -> &str {
		&self.filter
	}

	fn env_filter(&self) -> EnvFilter {
		EnvFilter::try_from_default_env()
			.or_else(|_| EnvFilter::try_new(&self.filter))
			.unwrap_or_else(|_| EnvFilter::new("info"))
	}

	/// Installs the subscriber. Returns `false` when one was already installed.
	pub fn init(self) -> bool {
		let builder = fmt()
			.with_env_filter(self.env_filter())
			.with_target(self.with_target)
			.with_thread_ids(self.with_thread_ids);

		let installed = if self.json {
			builder.json().try_init().is_ok()
		} else {
			builder.try_init().is_ok()
		};

		if installed {
			debug!(filter = %self.filter, json = self.json, "tracing initialized");
		}
		installed
	}
}
