// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Helpers for constructing syntax trees without a parser.
//!
//! ```
//! use quarry_ast::build::*;
//!
//! // SELECT c.name FROM Customer AS c
//! let select = select().item(path(id("c"), &["name"]), None).from(scan(id("Customer")).as_("c")).build();
//! ```

use quarry_type::{CaseSensitivity, Fragment, Value};

use crate::{
	ast::{
		Binary, BinaryOp, Call, Collection, CollectionKind, Expr, FromSource, GroupBy, Join, JoinKind,
		LetBinding, Literal, Path, PathStep, ProjectItem, Projection, Query, ScanSource, Select,
		SetQuantifier, SortDirection, SortSpec, Statement, Struct, StructField, Unary, UnaryOp,
	},
	identifier::{Alias, Identifier, Qualifier},
};

/// Case-insensitive identifier, e.g. `customer`
pub fn id(name: &str) -> Expr {
	Expr::Id(Identifier::new(name, CaseSensitivity::Insensitive))
}

/// Case-sensitive identifier, e.g. `"Customer"`
pub fn quoted(name: &str) -> Expr {
	Expr::Id(Identifier::new(name, CaseSensitivity::Sensitive))
}

/// Locals-first identifier, e.g. `@x`
pub fn local(name: &str) -> Expr {
	Expr::Id(Identifier::new(name, CaseSensitivity::Insensitive).with_qualifier(Qualifier::LocalsFirst))
}

pub fn lit(value: impl Into<Value>) -> Expr {
	Expr::Lit(Literal {
		value: value.into(),
		fragment: Fragment::None,
	})
}

pub fn missing() -> Expr {
	Expr::Missing(Fragment::None)
}

/// `root.k1.k2...` with case-insensitive keys
pub fn path(root: Expr, keys: &[&str]) -> Expr {
	path_steps(
		root,
		keys.iter()
			.map(|key| PathStep::Key {
				name: key.to_string(),
				case: CaseSensitivity::Insensitive,
			})
			.collect(),
	)
}

pub fn path_steps(root: Expr, steps: Vec<PathStep>) -> Expr {
	Expr::Path(Path {
		root: Box::new(root),
		steps,
		fragment: Fragment::None,
	})
}

pub fn call(name: &str, args: Vec<Expr>) -> Expr {
	Expr::Call(Call {
		name: name.to_string(),
		args,
		fragment: Fragment::None,
	})
}

pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
	Expr::Binary(Binary {
		op,
		left: Box::new(left),
		right: Box::new(right),
		fragment: Fragment::None,
	})
}

pub fn eq(left: Expr, right: Expr) -> Expr {
	binary(BinaryOp::Eq, left, right)
}

pub fn and(left: Expr, right: Expr) -> Expr {
	binary(BinaryOp::And, left, right)
}

pub fn not(operand: Expr) -> Expr {
	Expr::Unary(Unary {
		op: UnaryOp::Not,
		operand: Box::new(operand),
		fragment: Fragment::None,
	})
}

pub fn list(values: Vec<Expr>) -> Expr {
	Expr::Collection(Collection {
		kind: CollectionKind::List,
		values,
		fragment: Fragment::None,
	})
}

pub fn bag(values: Vec<Expr>) -> Expr {
	Expr::Collection(Collection {
		kind: CollectionKind::Bag,
		values,
		fragment: Fragment::None,
	})
}

/// `{'k1': v1, ...}`
pub fn structure(fields: Vec<(&str, Expr)>) -> Expr {
	Expr::Struct(Struct {
		fields: fields
			.into_iter()
			.map(|(key, value)| StructField {
				key: lit(key),
				value,
			})
			.collect(),
		fragment: Fragment::None,
	})
}

pub fn alias(name: &str) -> Alias {
	Alias::new(name, CaseSensitivity::Insensitive)
}

pub fn query(select: Select) -> Statement {
	Statement::Query(Query {
		expr: Expr::Select(Box::new(select)),
	})
}

pub fn subquery(select: Select) -> Expr {
	Expr::Select(Box::new(select))
}

pub fn scan(expr: Expr) -> ScanBuilder {
	ScanBuilder {
		source: ScanSource {
			expr,
			as_alias: None,
			at_alias: None,
			by_alias: None,
			fragment: Fragment::None,
		},
	}
}

pub fn join(kind: JoinKind, left: FromSource, right: FromSource, predicate: Option<Expr>) -> FromSource {
	FromSource::Join(Join {
		kind,
		left: Box::new(left),
		right: Box::new(right),
		predicate,
		fragment: Fragment::None,
	})
}

pub struct ScanBuilder {
	source: ScanSource,
}

impl ScanBuilder {
	pub fn as_(mut self, name: &str) -> Self {
		self.source.as_alias = Some(alias(name));
		self
	}

	pub fn at(mut self, name: &str) -> Self {
		self.source.at_alias = Some(alias(name));
		self
	}

	pub fn by(mut self, name: &str) -> Self {
		self.source.by_alias = Some(alias(name));
		self
	}

	pub fn fragment(mut self, fragment: Fragment) -> Self {
		self.source.fragment = fragment;
		self
	}

	pub fn source(self) -> ScanSource {
		self.source
	}

	pub fn unpivot(self) -> FromSource {
		FromSource::Unpivot(self.source)
	}
}

impl From<ScanBuilder> for FromSource {
	fn from(builder: ScanBuilder) -> Self {
		FromSource::Scan(builder.source)
	}
}

pub fn select() -> SelectBuilder {
	SelectBuilder {
		select: Select {
			quantifier: SetQuantifier::All,
			projection: Projection::List(vec![]),
			from: None,
			let_clause: vec![],
			where_clause: None,
			group_by: None,
			having: None,
			order_by: vec![],
			limit: None,
			offset: None,
			fragment: Fragment::None,
		},
	}
}

pub struct SelectBuilder {
	select: Select,
}

impl SelectBuilder {
	pub fn star(mut self) -> Self {
		self.select.projection = Projection::Star(Fragment::None);
		self
	}

	pub fn value(mut self, expr: Expr) -> Self {
		self.select.projection = Projection::Value(expr);
		self
	}

	/// Appends `expr.*` to the select list
	pub fn all(self, expr: Expr) -> Self {
		self.push_item(ProjectItem::All {
			expr,
			fragment: Fragment::None,
		})
	}

	/// Appends `expr [AS alias]` to the select list
	pub fn item(self, expr: Expr, name: Option<&str>) -> Self {
		self.push_item(ProjectItem::Expr {
			expr,
			alias: name.map(alias),
		})
	}

	fn push_item(mut self, item: ProjectItem) -> Self {
		match &mut self.select.projection {
			Projection::List(items) => items.push(item),
			projection => *projection = Projection::List(vec![item]),
		}
		self
	}

	pub fn distinct(mut self) -> Self {
		self.select.quantifier = SetQuantifier::Distinct;
		self
	}

	pub fn from(mut self, source: impl Into<FromSource>) -> Self {
		self.select.from = Some(source.into());
		self
	}

	pub fn let_(mut self, expr: Expr, name: &str) -> Self {
		self.select.let_clause.push(LetBinding {
			expr,
			name: alias(name),
		});
		self
	}

	pub fn where_(mut self, predicate: Expr) -> Self {
		self.select.where_clause = Some(predicate);
		self
	}

	pub fn group_by(mut self, group_by: GroupBy) -> Self {
		self.select.group_by = Some(group_by);
		self
	}

	pub fn having(mut self, predicate: Expr) -> Self {
		self.select.having = Some(predicate);
		self
	}

	pub fn order_by(mut self, expr: Expr, direction: SortDirection) -> Self {
		self.select.order_by.push(SortSpec {
			expr,
			direction,
		});
		self
	}

	pub fn limit(mut self, expr: Expr) -> Self {
		self.select.limit = Some(expr);
		self
	}

	pub fn offset(mut self, expr: Expr) -> Self {
		self.select.offset = Some(expr);
		self
	}

	pub fn fragment(mut self, fragment: Fragment) -> Self {
		self.select.fragment = fragment;
		self
	}

	pub fn build(self) -> Select {
		self.select
	}

	pub fn query(self) -> Statement {
		query(self.select)
	}
}
