// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

mod condition;
mod dialect;
mod emit;
mod literal;

pub use condition::{emit_condition, emit_order_by, emit_where};
pub use dialect::Dialect;
pub use emit::*;
pub use literal::{format_float, quote_ident, quote_text};
