// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Syntactic rewrites that bring a parsed statement into the shape the
//! planner lowers: every from source carries an `AS` alias, every select
//! list item carries an alias and `SELECT *` is spelled out as `SELECT x.*`.

mod from_alias;
mod select_alias;
mod select_star;

pub use from_alias::alias_from_sources;
use quarry_type::CaseSensitivity;
pub use select_alias::alias_select_list;
pub use select_star::desugar_select_star;
use tracing::instrument;

use crate::ast::{
	Binary, Call, Collection, Delete, Expr, FromSource, GroupBy, Insert, Join, LetBinding, Path, PathStep,
	ProjectItem, Projection, Query, ScanSource, Select, SortSpec, Statement, Struct, StructField, Unary,
};

/// Runs all normalization passes over `statement`, innermost select first.
#[instrument(name = "ast::normalize", level = "trace", skip_all)]
pub fn normalize(statement: Statement) -> Statement {
	map_statement(statement, &mut |select| desugar_select_star(alias_select_list(alias_from_sources(select))))
}

/// Applies `f` to every select in `statement`, children before parents.
pub fn map_statement(statement: Statement, f: &mut dyn FnMut(Select) -> Select) -> Statement {
	match statement {
		Statement::Query(Query {
			expr,
		}) => Statement::Query(Query {
			expr: map_expr(expr, f),
		}),
		Statement::Insert(Insert {
			target,
			value,
			fragment,
		}) => Statement::Insert(Insert {
			target,
			value: map_expr(value, f),
			fragment,
		}),
		Statement::Delete(Delete {
			from,
			where_clause,
			fragment,
		}) => Statement::Delete(Delete {
			from: map_from(from, f),
			where_clause: where_clause.map(|e| map_expr(e, f)),
			fragment,
		}),
		statement @ (Statement::Ddl(_) | Statement::Exec(_)) => statement,
	}
}

fn map_expr(expr: Expr, f: &mut dyn FnMut(Select) -> Select) -> Expr {
	match expr {
		Expr::Lit(_) | Expr::Missing(_) | Expr::Id(_) => expr,
		Expr::Path(Path {
			root,
			steps,
			fragment,
		}) => Expr::Path(Path {
			root: Box::new(map_expr(*root, f)),
			steps: steps
				.into_iter()
				.map(|step| match step {
					PathStep::Index(index) => PathStep::Index(map_expr(index, f)),
					step => step,
				})
				.collect(),
			fragment,
		}),
		Expr::Call(Call {
			name,
			args,
			fragment,
		}) => Expr::Call(Call {
			name,
			args: map_exprs(args, f),
			fragment,
		}),
		Expr::Binary(Binary {
			op,
			left,
			right,
			fragment,
		}) => Expr::Binary(Binary {
			op,
			left: Box::new(map_expr(*left, f)),
			right: Box::new(map_expr(*right, f)),
			fragment,
		}),
		Expr::Unary(Unary {
			op,
			operand,
			fragment,
		}) => Expr::Unary(Unary {
			op,
			operand: Box::new(map_expr(*operand, f)),
			fragment,
		}),
		Expr::Collection(Collection {
			kind,
			values,
			fragment,
		}) => Expr::Collection(Collection {
			kind,
			values: map_exprs(values, f),
			fragment,
		}),
		Expr::Struct(Struct {
			fields,
			fragment,
		}) => Expr::Struct(Struct {
			fields: fields
				.into_iter()
				.map(|field| StructField {
					key: map_expr(field.key, f),
					value: map_expr(field.value, f),
				})
				.collect(),
			fragment,
		}),
		Expr::Select(select) => Expr::Select(Box::new(map_select(*select, f))),
	}
}

fn map_exprs(exprs: Vec<Expr>, f: &mut dyn FnMut(Select) -> Select) -> Vec<Expr> {
	exprs.into_iter().map(|e| map_expr(e, f)).collect()
}

fn map_select(select: Select, f: &mut dyn FnMut(Select) -> Select) -> Select {
	let Select {
		quantifier,
		projection,
		from,
		let_clause,
		where_clause,
		group_by,
		having,
		order_by,
		limit,
		offset,
		fragment,
	} = select;

	let projection = match projection {
		Projection::Star(fragment) => Projection::Star(fragment),
		Projection::Value(expr) => Projection::Value(map_expr(expr, f)),
		Projection::List(items) => Projection::List(
			items.into_iter()
				.map(|item| match item {
					ProjectItem::All {
						expr,
						fragment,
					} => ProjectItem::All {
						expr: map_expr(expr, f),
						fragment,
					},
					ProjectItem::Expr {
						expr,
						alias,
					} => ProjectItem::Expr {
						expr: map_expr(expr, f),
						alias,
					},
				})
				.collect(),
		),
	};

	let select = Select {
		quantifier,
		projection,
		from: from.map(|source| map_from(source, f)),
		let_clause: let_clause
			.into_iter()
			.map(|binding| LetBinding {
				expr: map_expr(binding.expr, f),
				name: binding.name,
			})
			.collect(),
		where_clause: where_clause.map(|e| map_expr(e, f)),
		group_by: group_by.map(|group_by| GroupBy {
			keys: group_by
				.keys
				.into_iter()
				.map(|mut key| {
					key.expr = map_expr(key.expr, f);
					key
				})
				.collect(),
			group_as: group_by.group_as,
			fragment: group_by.fragment,
		}),
		having: having.map(|e| map_expr(e, f)),
		order_by: order_by
			.into_iter()
			.map(|spec| SortSpec {
				expr: map_expr(spec.expr, f),
				direction: spec.direction,
			})
			.collect(),
		limit: limit.map(|e| map_expr(e, f)),
		offset: offset.map(|e| map_expr(e, f)),
		fragment,
	};

	f(select)
}

fn map_from(source: FromSource, f: &mut dyn FnMut(Select) -> Select) -> FromSource {
	match source {
		FromSource::Scan(scan) => FromSource::Scan(map_scan(scan, f)),
		FromSource::Unpivot(scan) => FromSource::Unpivot(map_scan(scan, f)),
		FromSource::Join(Join {
			kind,
			left,
			right,
			predicate,
			fragment,
		}) => FromSource::Join(Join {
			kind,
			left: Box::new(map_from(*left, f)),
			right: Box::new(map_from(*right, f)),
			predicate: predicate.map(|e| map_expr(e, f)),
			fragment,
		}),
	}
}

fn map_scan(mut scan: ScanSource, f: &mut dyn FnMut(Select) -> Select) -> ScanSource {
	scan.expr = map_expr(scan.expr, f);
	scan
}

/// The name an expression would be known by if it were not aliased: the
/// identifier itself, or the last literal key of a path.
pub(crate) fn implicit_name(expr: &Expr) -> Option<(String, CaseSensitivity)> {
	match expr {
		Expr::Id(id) => Some((id.name.clone(), id.case)),
		Expr::Path(path) => match path.steps.last()? {
			PathStep::Key {
				name,
				case,
			} => Some((name.clone(), *case)),
			PathStep::Index(Expr::Lit(lit)) => {
				lit.value.as_text().map(|text| (text.to_string(), CaseSensitivity::Sensitive))
			}
			_ => None,
		},
		_ => None,
	}
}
