// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::ir::{Bexpr, Expr, PathStep, Phase, Statement};

/// Read-only traversal. Children are visited depth first, in the order the
/// operands are written: a scan's expression before its `AS`, `AT` and `BY`
/// declarations, a filter's predicate before its source, the left side of a
/// join before the right side and the predicate.
pub trait Visitor<P: Phase> {
	fn visit_statement(&mut self, statement: &Statement<P>) {
		walk_statement(self, statement)
	}

	fn visit_expr(&mut self, expr: &Expr<P>) {
		walk_expr(self, expr)
	}

	fn visit_bexpr(&mut self, bexpr: &Bexpr<P>) {
		walk_bexpr(self, bexpr)
	}

	fn visit_var(&mut self, _var: &P::Var) {}

	fn visit_decl(&mut self, _decl: &P::Decl) {}
}

pub fn walk_statement<P: Phase, V: Visitor<P> + ?Sized>(v: &mut V, statement: &Statement<P>) {
	match statement {
		Statement::Query {
			expr,
		} => v.visit_expr(expr),
	}
}

pub fn walk_expr<P: Phase, V: Visitor<P> + ?Sized>(v: &mut V, expr: &Expr<P>) {
	match expr {
		Expr::Lit {
			..
		}
		| Expr::Missing {
			..
		} => {}
		Expr::Var(var) => v.visit_var(var),
		Expr::Path {
			root,
			steps,
			..
		} => {
			v.visit_expr(root);
			for step in steps {
				if let PathStep::Index(index) = step {
					v.visit_expr(index);
				}
			}
		}
		Expr::Call {
			args: values,
			..
		}
		| Expr::Collection {
			values,
			..
		} => {
			for value in values {
				v.visit_expr(value);
			}
		}
		Expr::Binary {
			left,
			right,
			..
		} => {
			v.visit_expr(left);
			v.visit_expr(right);
		}
		Expr::Unary {
			operand,
			..
		} => v.visit_expr(operand),
		Expr::Struct {
			fields,
			..
		} => {
			for field in fields {
				v.visit_expr(&field.key);
				v.visit_expr(&field.value);
			}
		}
		Expr::MapValues {
			exp,
			query,
			..
		} => {
			v.visit_expr(exp);
			v.visit_bexpr(query);
		}
	}
}

pub fn walk_bexpr<P: Phase, V: Visitor<P> + ?Sized>(v: &mut V, bexpr: &Bexpr<P>) {
	match bexpr {
		Bexpr::Scan {
			expr,
			as_decl,
			at_decl,
			by_decl,
			..
		} => {
			v.visit_expr(expr);
			v.visit_decl(as_decl);
			if let Some(at) = at_decl {
				v.visit_decl(at);
			}
			if let Some(by) = by_decl {
				v.visit_decl(by);
			}
		}
		Bexpr::Filter {
			predicate,
			source,
			..
		} => {
			v.visit_expr(predicate);
			v.visit_bexpr(source);
		}
		Bexpr::Join {
			left,
			right,
			predicate,
			..
		} => {
			v.visit_bexpr(left);
			v.visit_bexpr(right);
			if let Some(predicate) = predicate {
				v.visit_expr(predicate);
			}
		}
	}
}
