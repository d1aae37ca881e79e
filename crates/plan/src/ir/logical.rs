// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use quarry_ast::Qualifier;
use quarry_type::{CaseSensitivity, Fragment};
use serde::Serialize;

use crate::ir::Phase;

/// Relational algebra before name resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Logical;

impl Phase for Logical {
	const NAME: &'static str = "logical";
	type Var = Identifier;
	type Decl = VarDecl;
	type Op = ();
}

/// Identity of a variable declaration within one logical tree.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct DeclId(pub u32);

impl Display for DeclId {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// Mints [`DeclId`]s, starting at zero.
#[derive(Debug, Default)]
pub struct DeclIdGen(u32);

impl DeclIdGen {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn next(&mut self) -> DeclId {
		let id = DeclId(self.0);
		self.0 += 1;
		id
	}
}

#[derive(Debug, Clone, PartialEq, Serialize)]
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
}

impl Display for Identifier {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		if self.qualifier == Qualifier::LocalsFirst {
			f.write_str("@")?;
		}
		match self.case {
			CaseSensitivity::Sensitive => write!(f, "\"{}\"", self.name),
			CaseSensitivity::Insensitive => f.write_str(&self.name),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VarDecl {
	pub id: DeclId,
	pub name: String,
	pub case: CaseSensitivity,
	pub fragment: Fragment,
}

impl Display for VarDecl {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}{}", self.name, self.id)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_decl_ids_are_sequential() {
		let mut ids = DeclIdGen::new();
		assert_eq!(ids.next(), DeclId(0));
		assert_eq!(ids.next(), DeclId(1));
	}

	#[test]
	fn test_identifier_display() {
		let mut id = Identifier::new("Customer", CaseSensitivity::Sensitive);
		assert_eq!(id.to_string(), "\"Customer\"");

		id.case = CaseSensitivity::Insensitive;
		id.qualifier = Qualifier::LocalsFirst;
		assert_eq!(id.to_string(), "@Customer");
	}
}
