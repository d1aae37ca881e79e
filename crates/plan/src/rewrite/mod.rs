// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Tree rewriting from one phase into another.
//!
//! A [`Rewriter`] only has to say how the phase specific leaves change
//! (name references, declarations and operator annotations); the `fold_*`
//! functions take care of rebuilding everything around them. Overriding
//! `rewrite_expr` or `rewrite_bexpr` lets a pass take over the traversal
//! for the nodes it cares about and delegate the rest back to `fold_*`.

mod visit;

pub use visit::{Visitor, walk_bexpr, walk_expr, walk_statement};

use crate::{
	Interrupt, Result,
	ir::{Bexpr, Expr, OpKind, PathStep, Phase, Statement, StructField},
};

pub trait Rewriter<S: Phase, T: Phase> {
	/// Per position state, handed down by reference and replaced rather
	/// than mutated when a node needs to change it for its children
	type Context;

	fn interrupt(&self) -> Option<&Interrupt> {
		None
	}

	fn checkpoint(&self) -> Result<()> {
		match self.interrupt() {
			Some(interrupt) => interrupt.check(),
			None => Ok(()),
		}
	}

	fn rewrite_statement(&mut self, statement: Statement<S>, ctx: &Self::Context) -> Result<Statement<T>> {
		fold_statement(self, statement, ctx)
	}

	fn rewrite_expr(&mut self, expr: Expr<S>, ctx: &Self::Context) -> Result<Expr<T>> {
		fold_expr(self, expr, ctx)
	}

	fn rewrite_bexpr(&mut self, bexpr: Bexpr<S>, ctx: &Self::Context) -> Result<Bexpr<T>> {
		fold_bexpr(self, bexpr, ctx)
	}

	fn rewrite_var(&mut self, var: S::Var, ctx: &Self::Context) -> Result<T::Var>;

	fn rewrite_decl(&mut self, decl: S::Decl, ctx: &Self::Context) -> Result<T::Decl>;

	fn rewrite_op(&mut self, kind: OpKind, op: S::Op, ctx: &Self::Context) -> Result<T::Op>;
}

pub fn fold_statement<S, T, R>(r: &mut R, statement: Statement<S>, ctx: &R::Context) -> Result<Statement<T>>
where
	S: Phase,
	T: Phase,
	R: Rewriter<S, T> + ?Sized,
{
	r.checkpoint()?;
	match statement {
		Statement::Query {
			expr,
		} => Ok(Statement::Query {
			expr: r.rewrite_expr(expr, ctx)?,
		}),
	}
}

pub fn fold_expr<S, T, R>(r: &mut R, expr: Expr<S>, ctx: &R::Context) -> Result<Expr<T>>
where
	S: Phase,
	T: Phase,
	R: Rewriter<S, T> + ?Sized,
{
	r.checkpoint()?;
	Ok(match expr {
		Expr::Lit {
			value,
			fragment,
		} => Expr::Lit {
			value,
			fragment,
		},
		Expr::Missing {
			fragment,
		} => Expr::Missing {
			fragment,
		},
		Expr::Var(var) => Expr::Var(r.rewrite_var(var, ctx)?),
		Expr::Path {
			root,
			steps,
			fragment,
		} => Expr::Path {
			root: Box::new(r.rewrite_expr(*root, ctx)?),
			steps: fold_path_steps(r, steps, ctx)?,
			fragment,
		},
		Expr::Call {
			name,
			args,
			fragment,
		} => Expr::Call {
			name,
			args: fold_exprs(r, args, ctx)?,
			fragment,
		},
		Expr::Binary {
			op,
			left,
			right,
			fragment,
		} => Expr::Binary {
			op,
			left: Box::new(r.rewrite_expr(*left, ctx)?),
			right: Box::new(r.rewrite_expr(*right, ctx)?),
			fragment,
		},
		Expr::Unary {
			op,
			operand,
			fragment,
		} => Expr::Unary {
			op,
			operand: Box::new(r.rewrite_expr(*operand, ctx)?),
			fragment,
		},
		Expr::Collection {
			kind,
			values,
			fragment,
		} => Expr::Collection {
			kind,
			values: fold_exprs(r, values, ctx)?,
			fragment,
		},
		Expr::Struct {
			fields,
			fragment,
		} => Expr::Struct {
			fields: fields
				.into_iter()
				.map(|field| {
					Ok(StructField {
						key: r.rewrite_expr(field.key, ctx)?,
						value: r.rewrite_expr(field.value, ctx)?,
					})
				})
				.collect::<Result<_>>()?,
			fragment,
		},
		Expr::MapValues {
			exp,
			query,
			fragment,
		} => Expr::MapValues {
			exp: Box::new(r.rewrite_expr(*exp, ctx)?),
			query: Box::new(r.rewrite_bexpr(*query, ctx)?),
			fragment,
		},
	})
}

pub fn fold_exprs<S, T, R>(r: &mut R, exprs: Vec<Expr<S>>, ctx: &R::Context) -> Result<Vec<Expr<T>>>
where
	S: Phase,
	T: Phase,
	R: Rewriter<S, T> + ?Sized,
{
	exprs.into_iter().map(|expr| r.rewrite_expr(expr, ctx)).collect()
}

pub fn fold_path_steps<S, T, R>(r: &mut R, steps: Vec<PathStep<S>>, ctx: &R::Context) -> Result<Vec<PathStep<T>>>
where
	S: Phase,
	T: Phase,
	R: Rewriter<S, T> + ?Sized,
{
	steps.into_iter()
		.map(|step| {
			Ok(match step {
				PathStep::Key {
					name,
					case,
				} => PathStep::Key {
					name,
					case,
				},
				PathStep::Index(index) => PathStep::Index(r.rewrite_expr(index, ctx)?),
				PathStep::Wildcard => PathStep::Wildcard,
				PathStep::Unpivot => PathStep::Unpivot,
			})
		})
		.collect()
}

pub fn fold_bexpr<S, T, R>(r: &mut R, bexpr: Bexpr<S>, ctx: &R::Context) -> Result<Bexpr<T>>
where
	S: Phase,
	T: Phase,
	R: Rewriter<S, T> + ?Sized,
{
	r.checkpoint()?;
	Ok(match bexpr {
		Bexpr::Scan {
			op,
			expr,
			as_decl,
			at_decl,
			by_decl,
			fragment,
		} => Bexpr::Scan {
			op: r.rewrite_op(OpKind::Scan, op, ctx)?,
			expr: Box::new(r.rewrite_expr(*expr, ctx)?),
			as_decl: r.rewrite_decl(as_decl, ctx)?,
			at_decl: at_decl.map(|decl| r.rewrite_decl(decl, ctx)).transpose()?,
			by_decl: by_decl.map(|decl| r.rewrite_decl(decl, ctx)).transpose()?,
			fragment,
		},
		Bexpr::Filter {
			op,
			predicate,
			source,
			fragment,
		} => Bexpr::Filter {
			op: r.rewrite_op(OpKind::Filter, op, ctx)?,
			predicate: Box::new(r.rewrite_expr(*predicate, ctx)?),
			source: Box::new(r.rewrite_bexpr(*source, ctx)?),
			fragment,
		},
		Bexpr::Join {
			op,
			kind,
			left,
			right,
			predicate,
			fragment,
		} => Bexpr::Join {
			op: r.rewrite_op(OpKind::Join, op, ctx)?,
			kind,
			left: Box::new(r.rewrite_bexpr(*left, ctx)?),
			right: Box::new(r.rewrite_bexpr(*right, ctx)?),
			predicate: predicate.map(|p| r.rewrite_expr(*p, ctx).map(Box::new)).transpose()?,
			fragment,
		},
	})
}
