// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{Display, Formatter},
	ops::Deref,
};

use serde::{Deserialize, Serialize};

#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StatementColumn(pub u32);

impl Deref for StatementColumn {
	type Target = u32;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StatementLine(pub u32);

impl Deref for StatementLine {
	type Target = u32;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

/// Location metadata attached to a tree node.
///
/// Passes carry a node's fragment through unchanged; diagnostics read it to
/// point at the offending part of the query text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Fragment {
	/// No fragment information available
	#[default]
	None,

	/// Fragment from a query statement with position information
	Statement {
		text: String,
		line: StatementLine,
		column: StatementColumn,
	},

	/// Fragment synthesized by a pass rather than written by the user
	Internal {
		text: String,
	},
}

impl Fragment {
	/// `line` is 1-based, `column` is the 0-based character offset of the
	/// fragment within that line.
	pub fn statement(text: impl Into<String>, line: u32, column: u32) -> Self {
		Fragment::Statement {
			text: text.into(),
			line: StatementLine(line),
			column: StatementColumn(column),
		}
	}

	pub fn internal(text: impl Into<String>) -> Self {
		Fragment::Internal {
			text: text.into(),
		}
	}

	pub fn text(&self) -> &str {
		match self {
			Fragment::None => "",
			Fragment::Statement {
				text,
				..
			}
			| Fragment::Internal {
				text,
			} => text,
		}
	}

	pub fn line(&self) -> StatementLine {
		match self {
			Fragment::Statement {
				line,
				..
			} => *line,
			_ => StatementLine(1),
		}
	}

	pub fn column(&self) -> StatementColumn {
		match self {
			Fragment::Statement {
				column,
				..
			} => *column,
			_ => StatementColumn(0),
		}
	}

	/// Whether the fragment points into user supplied query text
	pub fn is_statement(&self) -> bool {
		matches!(self, Fragment::Statement { .. })
	}

	/// Keep the position of `self` but replace the text, used when a pass
	/// synthesizes a node (e.g. an alias) from an existing one.
	pub fn with_text(&self, text: impl Into<String>) -> Self {
		match self {
			Fragment::Statement {
				line,
				column,
				..
			} => Fragment::Statement {
				text: text.into(),
				line: *line,
				column: *column,
			},
			_ => Fragment::internal(text),
		}
	}
}

impl Display for Fragment {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Fragment::Statement {
				line,
				column,
				..
			} => write!(f, "{}:{}", line.0, column.0),
			Fragment::Internal {
				..
			} => f.write_str("internal"),
			Fragment::None => f.write_str("unknown"),
		}
	}
}
