// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod error;
pub mod util;
pub mod value;

pub use error::{Error, Result};
pub use value::{Cell, StorageClass, Type, Value};
