// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};
use tabula_type::{Error, Result};
use tracing::{debug, instrument};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContextState {
	Closed,
	Configuring,
	Open,
}

/// Owns a backend's engine handle and walks it through
/// `Closed -> Configuring -> Open`. Once closed explicitly it stays closed.
#[derive(Debug)]
pub struct Lifecycle<H> {
	state: ContextState,
	handle: Option<H>,
	disposed: bool,
}

impl<H> Default for Lifecycle<H> {
	fn default() -> Self {
		Self::new()
	}
}

impl<H> Lifecycle<H> {
	pub fn new() -> Self {
		Self {
			state: ContextState::Closed,
			handle: None,
			disposed: false,
		}
	}

	pub fn state(&self) -> ContextState {
		self.state
	}

	/// Opens the handle with `open` unless it is already open.
	#[instrument(name = "context::ensure_open", level = "trace", skip_all)]
	pub fn ensure_open(&mut self, open: impl FnOnce() -> Result<H>) -> Result<&mut H> {
		if self.disposed {
			return Err(Error::ContextClosed);
		}

		if self.state == ContextState::Open && self.handle.is_some() {
			return self.handle.as_mut().ok_or(Error::ContextClosed);
		}

		self.state = ContextState::Configuring;
		match open() {
			Ok(handle) => {
				debug!("backend handle opened");
				self.state = ContextState::Open;
				Ok(self.handle.insert(handle))
			}
			Err(err) => {
				self.state = ContextState::Closed;
				Err(err)
			}
		}
	}

	/// Already-open handle, without opening.
	pub fn handle(&mut self) -> Result<&mut H> {
		match self.state {
			ContextState::Open => self.handle.as_mut().ok_or(Error::ContextClosed),
			_ => Err(Error::ContextClosed),
		}
	}

	/// Transitions to `Closed` and hands back the handle for release.
	pub fn close(&mut self) -> Option<H> {
		self.state = ContextState::Closed;
		self.disposed = true;
		self.handle.take()
	}
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;

	use super::*;

	#[test]
	fn test_starts_closed() {
		let lifecycle = Lifecycle::<u8>::new();
		assert_eq!(lifecycle.state(), ContextState::Closed);
	}

	#[test]
	fn test_ensure_open_is_idempotent() {
		let opened = Cell::new(0);
		let mut lifecycle = Lifecycle::new();

		for _ in 0..3 {
			lifecycle
				.ensure_open(|| {
					opened.set(opened.get() + 1);
					Ok(42u8)
				})
				.unwrap();
		}

		assert_eq!(opened.get(), 1);
		assert_eq!(lifecycle.state(), ContextState::Open);
	}

	#[test]
	fn test_failed_open_returns_to_closed() {
		let mut lifecycle = Lifecycle::<u8>::new();
		let err = lifecycle.ensure_open(|| Err(Error::engine("test", std::io::Error::other("boom")))).unwrap_err();
		assert_eq!(err.code(), "ENGINE_001");
		assert_eq!(lifecycle.state(), ContextState::Closed);

		assert_eq!(*lifecycle.ensure_open(|| Ok(7)).unwrap(), 7);
	}

	#[test]
	fn test_close_releases_and_blocks_reopen() {
		let mut lifecycle = Lifecycle::new();
		lifecycle.ensure_open(|| Ok(1u8)).unwrap();

		assert_eq!(lifecycle.close(), Some(1));
		assert_eq!(lifecycle.state(), ContextState::Closed);
		assert!(matches!(lifecycle.ensure_open(|| Ok(2)), Err(Error::ContextClosed)));
		assert!(matches!(lifecycle.handle(), Err(Error::ContextClosed)));
	}
}
