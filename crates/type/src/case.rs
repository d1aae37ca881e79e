// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// How a name compares against other names.
///
/// Quoted identifiers are case sensitive, bare identifiers are not.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaseSensitivity {
	Sensitive,
	#[default]
	Insensitive,
}

impl CaseSensitivity {
	pub fn is_sensitive(&self) -> bool {
		matches!(self, CaseSensitivity::Sensitive)
	}

	/// Compare `left` and `right` under this mode
	pub fn matches(&self, left: &str, right: &str) -> bool {
		match self {
			CaseSensitivity::Sensitive => left == right,
			CaseSensitivity::Insensitive => eq_ignore_case(left, right),
		}
	}
}

impl Display for CaseSensitivity {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			CaseSensitivity::Sensitive => f.write_str("case_sensitive"),
			CaseSensitivity::Insensitive => f.write_str("case_insensitive"),
		}
	}
}

/// Unicode aware case-insensitive equality
pub fn eq_ignore_case(left: &str, right: &str) -> bool {
	if left.is_ascii() && right.is_ascii() {
		return left.eq_ignore_ascii_case(right);
	}
	left.to_lowercase() == right.to_lowercase()
}
