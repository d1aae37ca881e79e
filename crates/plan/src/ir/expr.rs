// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use quarry_ast::{BinaryOp, CollectionKind, UnaryOp};
use quarry_type::{CaseSensitivity, Fragment, Value};
use serde::Serialize;

use crate::ir::{Bexpr, Phase};

/// A scalar expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(bound = "")]
pub enum Expr<P: Phase> {
	Lit {
		value: Value,
		fragment: Fragment,
	},
	Missing {
		fragment: Fragment,
	},
	Var(P::Var),
	Path {
		root: Box<Expr<P>>,
		steps: Vec<PathStep<P>>,
		fragment: Fragment,
	},
	Call {
		name: String,
		args: Vec<Expr<P>>,
		fragment: Fragment,
	},
	Binary {
		op: BinaryOp,
		left: Box<Expr<P>>,
		right: Box<Expr<P>>,
		fragment: Fragment,
	},
	Unary {
		op: UnaryOp,
		operand: Box<Expr<P>>,
		fragment: Fragment,
	},
	Collection {
		kind: CollectionKind,
		values: Vec<Expr<P>>,
		fragment: Fragment,
	},
	Struct {
		fields: Vec<StructField<P>>,
		fragment: Fragment,
	},
	/// Evaluates `exp` once per row of `query` and collects the results
	MapValues {
		exp: Box<Expr<P>>,
		query: Box<Bexpr<P>>,
		fragment: Fragment,
	},
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(bound = "")]
pub enum PathStep<P: Phase> {
	Key {
		name: String,
		case: CaseSensitivity,
	},
	Index(Expr<P>),
	Wildcard,
	Unpivot,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(bound = "")]
pub struct StructField<P: Phase> {
	pub key: Expr<P>,
	pub value: Expr<P>,
}

impl<P: Phase> Expr<P> {
	pub fn lit(value: impl Into<Value>) -> Self {
		Expr::Lit {
			value: value.into(),
			fragment: Fragment::None,
		}
	}

	pub fn fragment(&self) -> Option<&Fragment> {
		match self {
			Expr::Var(_) => None,
			Expr::Lit {
				fragment,
				..
			}
			| Expr::Missing {
				fragment,
			}
			| Expr::Path {
				fragment,
				..
			}
			| Expr::Call {
				fragment,
				..
			}
			| Expr::Binary {
				fragment,
				..
			}
			| Expr::Unary {
				fragment,
				..
			}
			| Expr::Collection {
				fragment,
				..
			}
			| Expr::Struct {
				fragment,
				..
			}
			| Expr::MapValues {
				fragment,
				..
			} => Some(fragment),
		}
	}
}

fn write_list<T: Display>(f: &mut Formatter<'_>, items: &[T]) -> std::fmt::Result {
	for (idx, item) in items.iter().enumerate() {
		if idx > 0 {
			f.write_str(", ")?;
		}
		write!(f, "{}", item)?;
	}
	Ok(())
}

impl<P: Phase> Display for Expr<P> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Expr::Lit {
				value,
				..
			} => write!(f, "{}", value),
			Expr::Missing {
				..
			} => f.write_str("missing"),
			Expr::Var(var) => write!(f, "{}", var),
			Expr::Path {
				root,
				steps,
				..
			} => {
				write!(f, "{}", root)?;
				for step in steps {
					write!(f, "{}", step)?;
				}
				Ok(())
			}
			Expr::Call {
				name,
				args,
				..
			} => {
				write!(f, "{}(", name)?;
				write_list(f, args)?;
				f.write_str(")")
			}
			Expr::Binary {
				op,
				left,
				right,
				..
			} => write!(f, "{}({}, {})", op, left, right),
			Expr::Unary {
				op,
				operand,
				..
			} => write!(f, "{}({})", op, operand),
			Expr::Collection {
				kind,
				values,
				..
			} => {
				match kind {
					CollectionKind::List => f.write_str("[")?,
					CollectionKind::Bag => f.write_str("<<")?,
				}
				write_list(f, values)?;
				match kind {
					CollectionKind::List => f.write_str("]"),
					CollectionKind::Bag => f.write_str(">>"),
				}
			}
			Expr::Struct {
				fields,
				..
			} => {
				f.write_str("{")?;
				write_list(f, fields)?;
				f.write_str("}")
			}
			Expr::MapValues {
				exp,
				query,
				..
			} => write!(f, "map_values({}, {})", exp, query),
		}
	}
}

impl<P: Phase> Display for PathStep<P> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			PathStep::Key {
				name,
				case: CaseSensitivity::Sensitive,
			} => write!(f, ".\"{}\"", name),
			PathStep::Key {
				name,
				case: CaseSensitivity::Insensitive,
			} => write!(f, ".{}", name),
			PathStep::Index(index) => write!(f, "[{}]", index),
			PathStep::Wildcard => f.write_str("[*]"),
			PathStep::Unpivot => f.write_str(".*"),
		}
	}
}

impl<P: Phase> Display for StructField<P> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}: {}", self.key, self.value)
	}
}
