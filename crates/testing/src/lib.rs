// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

pub mod tempdir;
pub mod wafer;

pub use tempdir::temp_dir;
pub use wafer::{wafer_columns, wafer_rows, wafer_table, wafer_table_unkeyed};
