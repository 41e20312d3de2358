// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Canonical text form used whenever a datetime is stored as text.
pub fn format(value: &NaiveDateTime) -> String {
	value.format("%Y-%m-%d %H:%M:%S%.f").to_string()
}

pub fn parse(text: &str) -> Option<NaiveDateTime> {
	let text = text.trim();
	for format in FORMATS {
		if let Ok(parsed) = NaiveDateTime::parse_from_str(text, format) {
			return Some(parsed);
		}
	}

	if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
		return Some(parsed.naive_utc());
	}

	NaiveDate::parse_from_str(text, "%Y-%m-%d").ok().and_then(|date| date.and_hms_opt(0, 0, 0))
}
