// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use quarry_ast::JoinKind;
use quarry_type::Fragment;
use serde::Serialize;

use crate::ir::{Expr, Phase};

/// A relational operator producing a bag of variable bindings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(bound = "")]
pub enum Bexpr<P: Phase> {
	/// Binds every element of `expr` to `as_decl`, its position to
	/// `at_decl` and its row id to `by_decl`
	Scan {
		op: P::Op,
		expr: Box<Expr<P>>,
		as_decl: P::Decl,
		at_decl: Option<P::Decl>,
		by_decl: Option<P::Decl>,
		fragment: Fragment,
	},
	Filter {
		op: P::Op,
		predicate: Box<Expr<P>>,
		source: Box<Bexpr<P>>,
		fragment: Fragment,
	},
	Join {
		op: P::Op,
		kind: JoinKind,
		left: Box<Bexpr<P>>,
		right: Box<Bexpr<P>>,
		predicate: Option<Box<Expr<P>>>,
		fragment: Fragment,
	},
}

/// Which relational operator an annotation belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
	Scan,
	Filter,
	Join,
}

impl Display for OpKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			OpKind::Scan => f.write_str("scan"),
			OpKind::Filter => f.write_str("filter"),
			OpKind::Join => f.write_str("join"),
		}
	}
}

impl<P: Phase> Bexpr<P> {
	pub fn kind(&self) -> OpKind {
		match self {
			Bexpr::Scan {
				..
			} => OpKind::Scan,
			Bexpr::Filter {
				..
			} => OpKind::Filter,
			Bexpr::Join {
				..
			} => OpKind::Join,
		}
	}

	pub fn op(&self) -> &P::Op {
		match self {
			Bexpr::Scan {
				op,
				..
			}
			| Bexpr::Filter {
				op,
				..
			}
			| Bexpr::Join {
				op,
				..
			} => op,
		}
	}

	pub fn fragment(&self) -> &Fragment {
		match self {
			Bexpr::Scan {
				fragment,
				..
			}
			| Bexpr::Filter {
				fragment,
				..
			}
			| Bexpr::Join {
				fragment,
				..
			} => fragment,
		}
	}
}

impl<P: Phase> Display for Bexpr<P> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.kind())?;
		if let Some(op) = P::describe_op(self.op()) {
			write!(f, "[{}]", op)?;
		}
		match self {
			Bexpr::Scan {
				expr,
				as_decl,
				at_decl,
				by_decl,
				..
			} => {
				write!(f, "({}, as {}", expr, as_decl)?;
				if let Some(at) = at_decl {
					write!(f, ", at {}", at)?;
				}
				if let Some(by) = by_decl {
					write!(f, ", by {}", by)?;
				}
				f.write_str(")")
			}
			Bexpr::Filter {
				predicate,
				source,
				..
			} => write!(f, "({}, {})", predicate, source),
			Bexpr::Join {
				kind,
				left,
				right,
				predicate,
				..
			} => {
				write!(f, "({}, {}, {}", kind, left, right)?;
				if let Some(predicate) = predicate {
					write!(f, ", {}", predicate)?;
				}
				f.write_str(")")
			}
		}
	}
}
