// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{fmt::Display, result};

use crate::Type;

pub type Result<T> = result::Result<T, Error>;

/// Boxed driver error carried by [`Error::Engine`].
pub type BoxedError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// A mandatory argument was absent. Raised before any I/O happens.
	#[error("missing required argument: {field}")]
	MissingArgument {
		field: &'static str,
	},

	/// The backend deliberately declines the operation.
	#[error("operation '{operation}' is not supported by the {backend} backend")]
	Unsupported {
		backend: &'static str,
		operation: &'static str,
	},

	/// The underlying driver or file library failed during execution.
	#[error("{backend} engine failure: {source}")]
	Engine {
		backend: &'static str,
		#[source]
		source: BoxedError,
	},

	#[error("column '{0}' not found")]
	ColumnNotFound(String),

	#[error("column '{0}' already exists")]
	DuplicateColumn(String),

	#[error("table '{0}' not found")]
	TableNotFound(String),

	#[error("table '{0}' already exists")]
	TableExists(String),

	#[error("cannot coerce '{value}' to {target}")]
	Coercion {
		value: String,
		target: Type,
	},

	#[error("row has {actual} values but the layout has {expected} columns")]
	RowWidth {
		expected: usize,
		actual: usize,
	},

	#[error("row index {index} is out of range for {len} rows")]
	RowIndex {
		index: usize,
		len: usize,
	},

	#[error("backend context is closed")]
	ContextClosed,

	#[error("table is not bound to a backend context")]
	ContextUnbound,

	#[error("io error: {0}")]
	Io(#[from] std::io::Error),

	#[error("serialization error: {0}")]
	Serde(String),
}

impl Error {
	pub fn missing(field: &'static str) -> Self {
		Error::MissingArgument {
			field,
		}
	}

	pub fn unsupported(backend: &'static str, operation: &'static str) -> Self {
		Error::Unsupported {
			backend,
			operation,
		}
	}

	pub fn engine(backend: &'static str, source: impl Into<BoxedError>) -> Self {
		Error::Engine {
			backend,
			source: source.into(),
		}
	}

	pub fn coercion(value: impl Display, target: Type) -> Self {
		Error::Coercion {
			value: value.to_string(),
			target,
		}
	}

	pub fn serde(err: impl Display) -> Self {
		Error::Serde(err.to_string())
	}

	/// Stable diagnostic code, one per variant.
	pub fn code(&self) -> &'static str {
		match self {
			Error::MissingArgument {
				..
			} => "ARG_001",
			Error::Unsupported {
				..
			} => "UNSUPPORTED_001",
			Error::Engine {
				..
			} => "ENGINE_001",
			Error::ColumnNotFound(_) => "QUERY_001",
			Error::DuplicateColumn(_) => "CATALOG_002",
			Error::TableNotFound(_) => "CATALOG_001",
			Error::TableExists(_) => "CATALOG_003",
			Error::Coercion {
				..
			} => "COERCE_001",
			Error::RowWidth {
				..
			} => "ROW_001",
			Error::RowIndex {
				..
			} => "ROW_002",
			Error::ContextClosed => "CONTEXT_001",
			Error::ContextUnbound => "CONTEXT_002",
			Error::Io(_) => "IO_001",
			Error::Serde(_) => "SERDE_001",
		}
	}

	pub fn is_missing_argument(&self) -> bool {
		matches!(self, Error::MissingArgument { .. })
	}

	pub fn is_unsupported(&self) -> bool {
		matches!(self, Error::Unsupported { .. })
	}
}
