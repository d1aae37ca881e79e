// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::rc::Rc;

use quarry_type::{CaseSensitivity, case::eq_ignore_case};
use smallvec::SmallVec;

use crate::ir::{LocalBinding, SlotDecl};

/// Declarations introduced by one relational operator.
///
/// A scan declares at most three names, joins concatenate their inputs.
pub type Decls = SmallVec<[SlotDecl; 3]>;

/// Variables visible at one point of the tree, linked to the scope that
/// encloses it.
#[derive(Debug, Default)]
pub struct Scope {
	decls: Decls,
	parent: Option<Rc<Scope>>,
}

impl Scope {
	pub fn root() -> Rc<Self> {
		Rc::new(Self::default())
	}

	pub fn nested(decls: Decls, parent: &Rc<Scope>) -> Rc<Self> {
		Rc::new(Self {
			decls,
			parent: Some(parent.clone()),
		})
	}

	pub fn decls(&self) -> &[SlotDecl] {
		&self.decls
	}

	/// Innermost scope first; within a scope the first matching declaration
	/// wins, even if a later one matches as well.
	pub fn lookup(&self, name: &str, case: CaseSensitivity) -> Option<&SlotDecl> {
		let mut scope = Some(self);
		while let Some(current) = scope {
			if let Some(decl) = current.decls.iter().find(|decl| case.matches(&decl.name, name)) {
				return Some(decl);
			}
			scope = current.parent.as_deref();
		}
		None
	}

	/// Every visible declaration, innermost scope first
	pub fn visible(&self) -> Vec<LocalBinding> {
		let mut result = Vec::new();
		let mut scope = Some(self);
		while let Some(current) = scope {
			result.extend(current.decls.iter().map(SlotDecl::to_local_binding));
			scope = current.parent.as_deref();
		}
		result
	}
}

/// Declarations of `decls` whose name, compared case-insensitively, is
/// already taken by an earlier entry of `decls`.
pub fn duplicates(decls: &[SlotDecl]) -> Vec<&SlotDecl> {
	decls.iter()
		.enumerate()
		.filter(|(idx, decl)| decls[..*idx].iter().any(|earlier| eq_ignore_case(&earlier.name, &decl.name)))
		.map(|(_, decl)| decl)
		.collect()
}
