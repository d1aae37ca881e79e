// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use quarry_type::{CaseSensitivity, Fragment};
use serde::{Deserialize, Serialize};

/// Where name lookup starts for an identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Qualifier {
	#[default]
	Unqualified,
	/// `@name`, always searches local variables before the catalog
	LocalsFirst,
}

/// A name reference as written in the query, e.g. `c`, `"Customer"` or `@x`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identifier {
	pub name: String,
	pub case: CaseSensitivity,
	pub qualifier: Qualifier,
	pub fragment: Fragment,
}

impl Identifier {
	pub fn new(name: impl Into<String>, case: CaseSensitivity) -> Self {
		Self {
			name: name.into(),
			case,
			qualifier: Qualifier::Unqualified,
			fragment: Fragment::None,
		}
	}

	pub fn with_qualifier(mut self, qualifier: Qualifier) -> Self {
		self.qualifier = qualifier;
		self
	}

	pub fn with_fragment(mut self, fragment: Fragment) -> Self {
		self.fragment = fragment;
		self
	}
}

/// A name introduced by `AS`, `AT` or `BY` on a from source, or by a
/// select list item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alias {
	pub name: String,
	pub case: CaseSensitivity,
	pub fragment: Fragment,
}

impl Alias {
	pub fn new(name: impl Into<String>, case: CaseSensitivity) -> Self {
		Self {
			name: name.into(),
			case,
			fragment: Fragment::None,
		}
	}

	pub fn with_fragment(mut self, fragment: Fragment) -> Self {
		self.fragment = fragment;
		self
	}

	/// An identifier referring back to this alias
	pub fn to_identifier(&self) -> Identifier {
		Identifier {
			name: self.name.clone(),
			case: self.case,
			qualifier: Qualifier::Unqualified,
			fragment: self.fragment.clone(),
		}
	}
}
