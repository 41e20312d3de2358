// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{self, Display, Formatter};

use unicode_width::UnicodeWidthStr;

use super::{Row, Table};
use crate::Column;

fn display_width(s: &str) -> usize {
	if s.contains('\n') {
		s.lines().map(|line| line.width()).max().unwrap_or(0)
	} else {
		s.width()
	}
}

fn escape_control_chars(s: &str) -> String {
	s.replace('\n', "\\n").replace('\t', "\\t")
}

fn cell(row: &Row, column: &Column) -> String {
	row.get_by(column).map(|v| escape_control_chars(&v.to_string())).unwrap_or_default()
}

fn centered(s: &str, width: usize) -> String {
	let pad = width - display_width(s);
	let l = pad / 2;
	let r = pad - l;
	format!(" {:left$}{}{:right$} ", "", s, "", left = l, right = r)
}

impl Display for Table {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		let columns = self.columns.visible();

		let mut col_widths: Vec<usize> = columns.iter().map(|c| display_width(&c.name)).collect();
		for row in &self.rows {
			for (i, column) in columns.iter().enumerate() {
				col_widths[i] = col_widths[i].max(display_width(&cell(row, column)));
			}
		}

		for w in &mut col_widths {
			*w += 2;
		}

		let sep = format!("+{}+", col_widths.iter().map(|w| "-".repeat(*w + 2)).collect::<Vec<_>>().join("+"));
		writeln!(f, "{}", sep)?;

		let header =
			columns.iter().zip(&col_widths).map(|(c, w)| centered(&c.name, *w)).collect::<Vec<_>>();
		writeln!(f, "|{}|", header.join("|"))?;
		writeln!(f, "{}", sep)?;

		for row in &self.rows {
			let line = columns
				.iter()
				.zip(&col_widths)
				.map(|(c, w)| centered(&cell(row, c), *w))
				.collect::<Vec<_>>();
			writeln!(f, "|{}|", line.join("|"))?;
		}

		writeln!(f, "{}", sep)
	}
}
