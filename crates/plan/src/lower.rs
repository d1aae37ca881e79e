// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Syntax tree to logical algebra.
//!
//! Handles `SELECT .. FROM .. WHERE ..` over a single source. Everything
//! else fails with [`PlanError::Unimplemented`]. The input is expected to be
//! normalized (see `quarry_ast::normalize`); a from source without `AS` or
//! an un-desugared `SELECT *` is an internal error.

use quarry_ast as ast;
use quarry_type::Fragment;
use tracing::instrument;

use crate::{
	PlanError, Result,
	ir::{Bexpr, DeclIdGen, Expr, Identifier, Logical, PathStep, Statement, StructField, VarDecl},
};

#[instrument(name = "plan::lower", level = "trace", skip_all)]
pub fn lower(statement: &ast::Statement) -> Result<Statement<Logical>> {
	Lowerer::default().lower_statement(statement)
}

#[derive(Default)]
struct Lowerer {
	ids: DeclIdGen,
}

impl Lowerer {
	fn lower_statement(&mut self, statement: &ast::Statement) -> Result<Statement<Logical>> {
		match statement {
			ast::Statement::Query(query) => Ok(Statement::query(self.lower_expr(&query.expr)?)),
			ast::Statement::Insert(insert) => Err(PlanError::unimplemented("INSERT", insert.fragment.clone())),
			ast::Statement::Delete(delete) => Err(PlanError::unimplemented("DELETE", delete.fragment.clone())),
			ast::Statement::Ddl(ddl) => Err(PlanError::unimplemented("DDL", ddl.fragment.clone())),
			ast::Statement::Exec(exec) => Err(PlanError::unimplemented("EXEC", exec.fragment.clone())),
		}
	}

	fn lower_expr(&mut self, expr: &ast::Expr) -> Result<Expr<Logical>> {
		Ok(match expr {
			ast::Expr::Lit(lit) => Expr::Lit {
				value: lit.value.clone(),
				fragment: lit.fragment.clone(),
			},
			ast::Expr::Missing(fragment) => Expr::Missing {
				fragment: fragment.clone(),
			},
			ast::Expr::Id(id) => Expr::Var(lower_identifier(id)),
			ast::Expr::Path(path) => Expr::Path {
				root: Box::new(self.lower_expr(&path.root)?),
				steps: path.steps.iter().map(|step| self.lower_path_step(step)).collect::<Result<_>>()?,
				fragment: path.fragment.clone(),
			},
			ast::Expr::Call(call) => Expr::Call {
				name: call.name.clone(),
				args: self.lower_exprs(&call.args)?,
				fragment: call.fragment.clone(),
			},
			ast::Expr::Binary(binary) => Expr::Binary {
				op: binary.op,
				left: Box::new(self.lower_expr(&binary.left)?),
				right: Box::new(self.lower_expr(&binary.right)?),
				fragment: binary.fragment.clone(),
			},
			ast::Expr::Unary(unary) => Expr::Unary {
				op: unary.op,
				operand: Box::new(self.lower_expr(&unary.operand)?),
				fragment: unary.fragment.clone(),
			},
			ast::Expr::Collection(collection) => Expr::Collection {
				kind: collection.kind,
				values: self.lower_exprs(&collection.values)?,
				fragment: collection.fragment.clone(),
			},
			ast::Expr::Struct(s) => Expr::Struct {
				fields: s
					.fields
					.iter()
					.map(|field| {
						Ok(StructField {
							key: self.lower_expr(&field.key)?,
							value: self.lower_expr(&field.value)?,
						})
					})
					.collect::<Result<_>>()?,
				fragment: s.fragment.clone(),
			},
			ast::Expr::Select(select) => self.lower_select(select)?,
		})
	}

	fn lower_exprs(&mut self, exprs: &[ast::Expr]) -> Result<Vec<Expr<Logical>>> {
		exprs.iter().map(|expr| self.lower_expr(expr)).collect()
	}

	fn lower_path_step(&mut self, step: &ast::PathStep) -> Result<PathStep<Logical>> {
		Ok(match step {
			ast::PathStep::Key {
				name,
				case,
			} => PathStep::Key {
				name: name.clone(),
				case: *case,
			},
			ast::PathStep::Index(index) => PathStep::Index(self.lower_expr(index)?),
			ast::PathStep::Wildcard => PathStep::Wildcard,
			ast::PathStep::Unpivot => PathStep::Unpivot,
		})
	}

	/// `SELECT <p> FROM <s> WHERE <w>` becomes `map_values(p, filter(w, s))`
	fn lower_select(&mut self, select: &ast::Select) -> Result<Expr<Logical>> {
		check_supported(select)?;

		let Some(from) = &select.from else {
			return Err(PlanError::unimplemented("SELECT without FROM", select.fragment.clone()));
		};

		let mut query = self.lower_from(from)?;
		if let Some(predicate) = &select.where_clause {
			query = Bexpr::Filter {
				op: (),
				predicate: Box::new(self.lower_expr(predicate)?),
				source: Box::new(query),
				fragment: predicate.fragment().clone(),
			};
		}

		let exp = self.lower_projection(&select.projection)?;

		Ok(Expr::MapValues {
			exp: Box::new(exp),
			query: Box::new(query),
			fragment: select.fragment.clone(),
		})
	}

	fn lower_from(&mut self, from: &ast::FromSource) -> Result<Bexpr<Logical>> {
		match from {
			ast::FromSource::Scan(scan) => {
				let expr = self.lower_expr(&scan.expr)?;
				let Some(as_alias) = &scan.as_alias else {
					return Err(PlanError::internal(
						"from source without an AS alias, the statement was not normalized",
					));
				};
				Ok(Bexpr::Scan {
					op: (),
					expr: Box::new(expr),
					as_decl: self.declare(as_alias),
					at_decl: scan.at_alias.as_ref().map(|alias| self.declare(alias)),
					by_decl: scan.by_alias.as_ref().map(|alias| self.declare(alias)),
					fragment: scan.fragment.clone(),
				})
			}
			ast::FromSource::Unpivot(scan) => Err(PlanError::unimplemented("UNPIVOT", scan.fragment.clone())),
			ast::FromSource::Join(join) => Err(PlanError::unimplemented("JOIN", join.fragment.clone())),
		}
	}

	fn lower_projection(&mut self, projection: &ast::Projection) -> Result<Expr<Logical>> {
		match projection {
			ast::Projection::Star(_) => {
				Err(PlanError::internal("SELECT * must be desugared into SELECT <alias>.* before lowering"))
			}
			ast::Projection::Value(expr) => self.lower_expr(expr),
			ast::Projection::List(items) => match items.as_slice() {
				[] => Err(PlanError::internal("empty select list")),
				// a single item projects its value, the alias only names the column
				[ast::ProjectItem::All {
					expr,
					..
				}]
				| [ast::ProjectItem::Expr {
					expr,
					..
				}] => self.lower_expr(expr),
				[_, second, ..] => Err(PlanError::unimplemented(
					"multiple projection items",
					project_item_fragment(second),
				)),
			},
		}
	}

	fn declare(&mut self, alias: &ast::Alias) -> VarDecl {
		VarDecl {
			id: self.ids.next(),
			name: alias.name.clone(),
			case: alias.case,
			fragment: alias.fragment.clone(),
		}
	}
}

fn lower_identifier(id: &ast::Identifier) -> Identifier {
	Identifier {
		name: id.name.clone(),
		case: id.case,
		qualifier: id.qualifier,
		fragment: id.fragment.clone(),
	}
}

fn project_item_fragment(item: &ast::ProjectItem) -> Fragment {
	match item {
		ast::ProjectItem::All {
			fragment,
			..
		} => fragment.clone(),
		ast::ProjectItem::Expr {
			expr,
			..
		} => expr.fragment().clone(),
	}
}

/// Rejects the clauses that have no logical counterpart yet.
fn check_supported(select: &ast::Select) -> Result<()> {
	if select.quantifier == ast::SetQuantifier::Distinct {
		return Err(PlanError::unimplemented("SELECT DISTINCT", select.fragment.clone()));
	}
	if let Some(binding) = select.let_clause.first() {
		return Err(PlanError::unimplemented("LET", binding.name.fragment.clone()));
	}
	if let Some(group_by) = &select.group_by {
		return Err(PlanError::unimplemented("GROUP BY", group_by.fragment.clone()));
	}
	if let Some(having) = &select.having {
		return Err(PlanError::unimplemented("HAVING", having.fragment().clone()));
	}
	if let Some(spec) = select.order_by.first() {
		return Err(PlanError::unimplemented("ORDER BY", spec.expr.fragment().clone()));
	}
	if let Some(offset) = &select.offset {
		return Err(PlanError::unimplemented("OFFSET", offset.fragment().clone()));
	}
	if let Some(limit) = &select.limit {
		return Err(PlanError::unimplemented("LIMIT", limit.fragment().clone()));
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use quarry_ast::{DdlOp, SortDirection, build::*};
	use quarry_type::CaseSensitivity;

	use super::*;

	fn unimplemented_feature(result: Result<Statement<Logical>>) -> String {
		match result {
			Err(PlanError::Unimplemented {
				feature,
				..
			}) => feature,
			other => panic!("expected an unimplemented error, got {:?}", other),
		}
	}

	#[test]
	fn test_select_from_where() {
		let statement = select()
			.item(path(id("c"), &["name"]), Some("name"))
			.from(scan(id("Customer")).as_("c"))
			.where_(eq(path(id("c"), &["id"]), lit(1i64)))
			.query();

		let logical = lower(&statement).unwrap();
		assert_eq!(
			logical.to_string(),
			"query(map_values(c.name, filter(eq(c.id, 1), scan(Customer, as c#0))))"
		);
	}

	#[test]
	fn test_select_value() {
		let statement = select().value(id("x")).from(scan(id("t")).as_("x").at("i").by("r")).query();
		let logical = lower(&statement).unwrap();
		assert_eq!(logical.to_string(), "query(map_values(x, scan(t, as x#0, at i#1, by r#2)))");
	}

	#[test]
	fn test_select_alias_star() {
		let statement = select().all(id("c")).from(scan(id("Customer")).as_("c")).query();
		let logical = lower(&statement).unwrap();
		assert_eq!(logical.to_string(), "query(map_values(c, scan(Customer, as c#0)))");
	}

	#[test]
	fn test_keeps_case_and_qualifier() {
		let statement = select().value(local("x")).from(scan(quoted("T")).as_("x")).query();
		let Statement::Query {
			expr: Expr::MapValues {
				exp,
				query,
				..
			},
		} = lower(&statement).unwrap()
		else {
			panic!("expected map_values");
		};
		assert_eq!(exp.to_string(), "@x");
		let Bexpr::Scan {
			expr,
			..
		} = *query
		else {
			panic!("expected scan");
		};
		let Expr::Var(id) = *expr else {
			panic!("expected identifier");
		};
		assert_eq!(id.case, CaseSensitivity::Sensitive);
	}

	#[test]
	fn test_nested_select() {
		let inner = select().value(id("o")).from(scan(id("orders")).as_("o")).build();
		let statement = select().value(subquery(inner)).from(scan(id("Customer")).as_("c")).query();
		let logical = lower(&statement).unwrap();
		assert_eq!(
			logical.to_string(),
			"query(map_values(map_values(o, scan(orders, as o#1)), scan(Customer, as c#0)))"
		);
	}

	#[test]
	fn test_select_star_is_internal_error() {
		let statement = select().star().from(scan(id("Customer")).as_("c")).query();
		assert!(matches!(lower(&statement), Err(PlanError::Internal { .. })));
	}

	#[test]
	fn test_missing_from_alias_is_internal_error() {
		let statement = select().all(id("c")).from(scan(id("Customer"))).query();
		assert!(matches!(lower(&statement), Err(PlanError::Internal { .. })));
	}

	#[test]
	fn test_single_item_without_alias() {
		let statement = select().item(call("upper", vec![id("a")]), None).from(scan(id("t")).as_("a")).query();
		let logical = lower(&statement).unwrap();
		assert_eq!(logical.to_string(), "query(map_values(upper(a), scan(t, as a#0)))");
	}

	#[test]
	fn test_unsupported_clauses() {
		let base = || select().all(id("c")).from(scan(id("Customer")).as_("c"));

		assert_eq!(unimplemented_feature(lower(&base().distinct().query())), "SELECT DISTINCT");
		assert_eq!(unimplemented_feature(lower(&base().let_(lit(1i64), "one").query())), "LET");
		assert_eq!(
			unimplemented_feature(lower(&base()
				.group_by(quarry_ast::GroupBy {
					keys: vec![],
					group_as: None,
					fragment: Fragment::None,
				})
				.query())),
			"GROUP BY"
		);
		assert_eq!(unimplemented_feature(lower(&base().having(lit(true)).query())), "HAVING");
		assert_eq!(unimplemented_feature(lower(&base().order_by(id("c"), SortDirection::Desc).query())), "ORDER BY");
		assert_eq!(unimplemented_feature(lower(&base().offset(lit(10i64)).query())), "OFFSET");
		assert_eq!(unimplemented_feature(lower(&base().limit(lit(10i64)).query())), "LIMIT");
	}

	#[test]
	fn test_multiple_items_unsupported() {
		let statement = select().all(id("a")).all(id("b")).from(scan(id("t")).as_("a")).query();
		assert_eq!(unimplemented_feature(lower(&statement)), "multiple projection items");
	}

	#[test]
	fn test_unsupported_sources() {
		let unpivot = select().all(id("v")).from(scan(id("t")).as_("v").unpivot()).query();
		assert_eq!(unimplemented_feature(lower(&unpivot)), "UNPIVOT");

		let source = join(
			quarry_ast::JoinKind::Inner,
			scan(id("a")).as_("a").into(),
			scan(id("b")).as_("b").into(),
			None,
		);
		let joined = select().all(id("a")).from(source).query();
		assert_eq!(unimplemented_feature(lower(&joined)), "JOIN");

		let no_from = select().value(lit(1i64)).query();
		assert_eq!(unimplemented_feature(lower(&no_from)), "SELECT without FROM");
	}

	#[test]
	fn test_unsupported_statements() {
		let ddl = quarry_ast::Statement::Ddl(quarry_ast::Ddl {
			op: DdlOp::CreateTable,
			name: quarry_ast::Identifier::new("t", CaseSensitivity::Insensitive),
			fragment: Fragment::None,
		});
		assert_eq!(unimplemented_feature(lower(&ddl)), "DDL");

		let exec = quarry_ast::Statement::Exec(quarry_ast::Exec {
			procedure: "refresh".to_string(),
			args: vec![],
			fragment: Fragment::None,
		});
		assert_eq!(unimplemented_feature(lower(&exec)), "EXEC");
	}

	#[test]
	fn test_unsupported_in_nested_select() {
		let inner = select().all(id("o")).from(scan(id("orders")).as_("o")).limit(lit(1i64)).build();
		let statement = select().value(subquery(inner)).from(scan(id("Customer")).as_("c")).query();
		assert_eq!(unimplemented_feature(lower(&statement)), "LIMIT");
	}
}
