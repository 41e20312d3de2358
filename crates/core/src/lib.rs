// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod condition;
pub mod context;
pub mod index;
pub mod setting;
pub mod table;

pub use condition::{Condition, ConditionValue, JoinOperator, Operator, Predicate};
pub use context::{BackendContext, ContextState, Lifecycle, SharedContext, WeakContext, shared};
pub use index::IndexSet;
pub use setting::{JoinKind, MergeSetting, QuerySetting, UpdateSetting};
pub use table::{Column, Columns, OrderDirection, Row, Rows, Table, TableMode};
pub use tabula_type::{Error, Result, Type, Value};
