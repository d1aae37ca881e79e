// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! The plan trees.
//!
//! Logical, resolved and physical algebra share one node set. A [`Phase`]
//! decides what a name reference, a variable declaration and an operator
//! annotation look like, so the trees keep the same shape from one phase to
//! the next and every pass is a rewrite from one phase into another.

use std::fmt::{Debug, Display};

use serde::Serialize;

mod bexpr;
pub mod builder;
mod expr;
mod logical;
mod physical;
mod resolved;
mod statement;

pub use bexpr::{Bexpr, OpKind};
pub use expr::{Expr, PathStep, StructField};
pub use logical::{DeclId, DeclIdGen, Identifier, Logical, VarDecl};
pub use physical::{Impl, Physical};
pub use resolved::{Binding, LocalBinding, Resolved, SlotDecl, SlotIndex};
pub use statement::Statement;

pub trait Phase: Debug + Clone + PartialEq + 'static {
	const NAME: &'static str;

	/// A name reference
	type Var: Debug + Clone + PartialEq + Serialize + Display;

	/// A variable declaration introduced by a relational operator
	type Decl: Debug + Clone + PartialEq + Serialize + Display;

	/// The annotation carried by every relational operator
	type Op: Debug + Clone + PartialEq + Serialize;

	/// Text shown next to an operator when explaining a plan
	fn describe_op(_op: &Self::Op) -> Option<String> {
		None
	}
}
