// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Constructs logical trees directly, without going through the syntax
//! tree. Declarations get fresh ids from the builder's own generator.

use quarry_ast::{BinaryOp, JoinKind, Qualifier};
use quarry_type::{CaseSensitivity, Fragment, Value};

use crate::ir::{Bexpr, DeclIdGen, Expr, Identifier, Logical, PathStep, Statement, StructField, VarDecl};

#[derive(Debug, Default)]
pub struct LogicalBuilder {
	ids: DeclIdGen,
}

impl LogicalBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Case-insensitive, unqualified reference
	pub fn var(&self, name: &str) -> Expr<Logical> {
		Expr::Var(Identifier::new(name, CaseSensitivity::Insensitive))
	}

	pub fn quoted_var(&self, name: &str) -> Expr<Logical> {
		Expr::Var(Identifier::new(name, CaseSensitivity::Sensitive))
	}

	/// `@name`
	pub fn local_var(&self, name: &str) -> Expr<Logical> {
		let mut id = Identifier::new(name, CaseSensitivity::Insensitive);
		id.qualifier = Qualifier::LocalsFirst;
		Expr::Var(id)
	}

	pub fn decl(&mut self, name: &str) -> VarDecl {
		self.decl_with_case(name, CaseSensitivity::Insensitive)
	}

	pub fn decl_with_case(&mut self, name: &str, case: CaseSensitivity) -> VarDecl {
		VarDecl {
			id: self.ids.next(),
			name: name.to_string(),
			case,
			fragment: Fragment::None,
		}
	}

	pub fn lit(&self, value: impl Into<Value>) -> Expr<Logical> {
		Expr::lit(value)
	}

	pub fn path(&self, root: Expr<Logical>, keys: &[&str]) -> Expr<Logical> {
		Expr::Path {
			root: Box::new(root),
			steps: keys
				.iter()
				.map(|key| PathStep::Key {
					name: key.to_string(),
					case: CaseSensitivity::Insensitive,
				})
				.collect(),
			fragment: Fragment::None,
		}
	}

	pub fn binary(&self, op: BinaryOp, left: Expr<Logical>, right: Expr<Logical>) -> Expr<Logical> {
		Expr::Binary {
			op,
			left: Box::new(left),
			right: Box::new(right),
			fragment: Fragment::None,
		}
	}

	pub fn eq(&self, left: Expr<Logical>, right: Expr<Logical>) -> Expr<Logical> {
		self.binary(BinaryOp::Eq, left, right)
	}

	pub fn structure(&self, fields: Vec<(&str, Expr<Logical>)>) -> Expr<Logical> {
		Expr::Struct {
			fields: fields
				.into_iter()
				.map(|(key, value)| StructField {
					key: Expr::lit(key),
					value,
				})
				.collect(),
			fragment: Fragment::None,
		}
	}

	/// `scan(expr) as <name>`
	pub fn scan(&mut self, expr: Expr<Logical>, as_name: &str) -> Bexpr<Logical> {
		let as_decl = self.decl(as_name);
		self.scan_with(expr, as_decl, None, None)
	}

	pub fn scan_with(
		&mut self,
		expr: Expr<Logical>,
		as_decl: VarDecl,
		at_decl: Option<VarDecl>,
		by_decl: Option<VarDecl>,
	) -> Bexpr<Logical> {
		Bexpr::Scan {
			op: (),
			expr: Box::new(expr),
			as_decl,
			at_decl,
			by_decl,
			fragment: Fragment::None,
		}
	}

	pub fn filter(&self, predicate: Expr<Logical>, source: Bexpr<Logical>) -> Bexpr<Logical> {
		Bexpr::Filter {
			op: (),
			predicate: Box::new(predicate),
			source: Box::new(source),
			fragment: Fragment::None,
		}
	}

	pub fn join(
		&self,
		kind: JoinKind,
		left: Bexpr<Logical>,
		right: Bexpr<Logical>,
		predicate: Option<Expr<Logical>>,
	) -> Bexpr<Logical> {
		Bexpr::Join {
			op: (),
			kind,
			left: Box::new(left),
			right: Box::new(right),
			predicate: predicate.map(Box::new),
			fragment: Fragment::None,
		}
	}

	pub fn map_values(&self, exp: Expr<Logical>, query: Bexpr<Logical>) -> Expr<Logical> {
		Expr::MapValues {
			exp: Box::new(exp),
			query: Box::new(query),
			fragment: Fragment::None,
		}
	}

	pub fn query(&self, expr: Expr<Logical>) -> Statement<Logical> {
		Statement::query(expr)
	}
}
