// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Logical to resolved algebra.
//!
//! Every name reference is bound to a local slot, to a catalog object, or
//! (when it cannot be bound) to an error or dynamic placeholder. Problems
//! are recorded and the rewrite continues, so the returned tree always has
//! the same shape as the input.
//!
//! Scoping:
//! - `scan` resolves its expression in the enclosing scope and declares its
//!   `AS`, `AT` and `BY` variables for the operators above it
//! - `filter` resolves its predicate in the scope its source produces,
//!   before the source itself
//! - `join` resolves the right side with the left side's variables in scope
//!   and the predicate with both
//! - `map_values` resolves its expression in the scope the query produces,
//!   then the query; nothing declared inside leaks out
//! - a join re-checks the union of both sides for duplicate names
//!
//! Operands are resolved in the order they are written, so problems come out
//! in depth first, left to right order.
//!
//! The expression of a scan prefers catalog objects over local variables
//! unless written as `@name`. Everywhere else locals come first.

mod scope;

use std::rc::Rc;

use quarry_ast::Qualifier;
use quarry_catalog::GlobalResolver;
use quarry_type::{CaseSensitivity, Fragment};
pub use scope::{Decls, Scope};
use tracing::{debug, instrument, trace};

use crate::{
	Interrupt, PlanError, Problem, Problems, Result,
	allocate::VariableSlots,
	ir::{Bexpr, Binding, Expr, Identifier, Logical, OpKind, Phase, Resolved, SlotDecl, Statement, VarDecl},
	rewrite::{Rewriter, fold_expr, fold_path_steps},
};

/// Position dependent resolution state.
#[derive(Debug, Clone)]
pub struct ResolveContext {
	scope: Rc<Scope>,
	/// Set only while resolving the expression a scan reads from
	globals_first: bool,
}

impl ResolveContext {
	fn new(scope: Rc<Scope>) -> Self {
		Self {
			scope,
			globals_first: false,
		}
	}

	fn with_globals_first(&self, globals_first: bool) -> Self {
		Self {
			scope: self.scope.clone(),
			globals_first,
		}
	}
}

pub struct Resolver<'a> {
	globals: &'a dyn GlobalResolver,
	slots: &'a VariableSlots,
	problems: &'a mut Problems,
	allow_undefined_variables: bool,
	interrupt: Option<&'a Interrupt>,
}

impl<'a> Resolver<'a> {
	pub fn new(globals: &'a dyn GlobalResolver, slots: &'a VariableSlots, problems: &'a mut Problems) -> Self {
		Self {
			globals,
			slots,
			problems,
			allow_undefined_variables: false,
			interrupt: None,
		}
	}

	/// Emit [`Binding::Dynamic`] instead of reporting undefined variables
	pub fn allow_undefined_variables(mut self, allow: bool) -> Self {
		self.allow_undefined_variables = allow;
		self
	}

	pub fn with_interrupt(mut self, interrupt: &'a Interrupt) -> Self {
		self.interrupt = Some(interrupt);
		self
	}

	#[instrument(name = "plan::resolve", level = "trace", skip_all)]
	pub fn resolve(mut self, statement: Statement<Logical>) -> Result<Statement<Resolved>> {
		let ctx = ResolveContext::new(Scope::root());
		self.rewrite_statement(statement, &ctx)
	}

	fn lookup(&mut self, id: Identifier, ctx: &ResolveContext) -> Binding {
		let Identifier {
			name,
			case,
			qualifier,
			fragment,
		} = id;

		let found = if ctx.globals_first && qualifier == Qualifier::Unqualified {
			self.lookup_global(&name, case, &fragment).or_else(|| lookup_local(&ctx.scope, &name, case, &fragment))
		} else {
			lookup_local(&ctx.scope, &name, case, &fragment).or_else(|| self.lookup_global(&name, case, &fragment))
		};

		if let Some(binding) = found {
			trace!(%binding, "resolved variable");
			return binding;
		}

		if self.allow_undefined_variables {
			let candidates = ctx.scope.visible();
			trace!(name = %name, candidates = candidates.len(), "deferring variable to evaluation time");
			return Binding::Dynamic {
				name,
				case,
				candidates,
				fragment,
			};
		}

		debug!(name = %name, %case, at = %fragment, "undefined variable");
		self.problems.record(Problem::undefined_variable(name.clone(), case, fragment.clone()));
		Binding::Error {
			name,
			fragment,
		}
	}

	fn lookup_global(&self, name: &str, case: CaseSensitivity, fragment: &Fragment) -> Option<Binding> {
		self.globals.resolve(name, case).map(|id| Binding::Global {
			name: name.to_string(),
			id,
			fragment: fragment.clone(),
		})
	}

	fn slot_decl(&self, decl: VarDecl) -> Result<SlotDecl> {
		let Some(slot) = self.slots.get(decl.id) else {
			return Err(PlanError::internal(format!(
				"variable '{}' ({}) has no slot, slots must be allocated before resolution",
				decl.name, decl.id
			)));
		};
		Ok(SlotDecl {
			name: decl.name,
			case: decl.case,
			slot,
			fragment: decl.fragment,
		})
	}

	/// Variables `bexpr` will declare, read off the logical tree so that an
	/// operand can be resolved before the operator it reads from
	fn declared(&self, bexpr: &Bexpr<Logical>) -> Result<Decls> {
		match bexpr {
			Bexpr::Scan {
				as_decl,
				at_decl,
				by_decl,
				..
			} => {
				let mut decls = Decls::new();
				for decl in std::iter::once(as_decl).chain(at_decl).chain(by_decl) {
					decls.push(self.slot_decl(decl.clone())?);
				}
				Ok(decls)
			}
			Bexpr::Filter {
				source,
				..
			} => self.declared(source),
			Bexpr::Join {
				left,
				right,
				..
			} => {
				let mut decls = self.declared(left)?;
				decls.extend(self.declared(right)?);
				Ok(decls)
			}
		}
	}

	fn report_redefined<'d>(&mut self, decls: impl IntoIterator<Item = &'d SlotDecl>) {
		for decl in decls {
			debug!(name = %decl.name, at = %decl.fragment, "variable previously defined");
			self.problems.record(Problem::variable_previously_defined(decl.name.clone(), decl.fragment.clone()));
		}
	}
}

fn lookup_local(scope: &Scope, name: &str, case: CaseSensitivity, fragment: &Fragment) -> Option<Binding> {
	scope.lookup(name, case).map(|decl| Binding::Local {
		name: name.to_string(),
		slot: decl.slot,
		fragment: fragment.clone(),
	})
}

/// Variables a relational operator makes visible to the operators above it
pub fn output_decls<P: Phase<Decl = SlotDecl>>(bexpr: &Bexpr<P>) -> Decls {
	match bexpr {
		Bexpr::Scan {
			as_decl,
			at_decl,
			by_decl,
			..
		} => {
			let mut decls = Decls::new();
			decls.push(as_decl.clone());
			decls.extend(at_decl.iter().cloned());
			decls.extend(by_decl.iter().cloned());
			decls
		}
		Bexpr::Filter {
			source,
			..
		} => output_decls(source),
		Bexpr::Join {
			left,
			right,
			..
		} => {
			let mut decls = output_decls(left);
			decls.extend(output_decls(right));
			decls
		}
	}
}

impl Rewriter<Logical, Resolved> for Resolver<'_> {
	type Context = ResolveContext;

	fn interrupt(&self) -> Option<&Interrupt> {
		self.interrupt
	}

	fn rewrite_expr(&mut self, expr: Expr<Logical>, ctx: &ResolveContext) -> Result<Expr<Resolved>> {
		match expr {
			Expr::Var(_) => fold_expr(self, expr, ctx),
			// only the root of a scan's path is looked up globals first
			Expr::Path {
				root,
				steps,
				fragment,
			} if ctx.globals_first => {
				self.checkpoint()?;
				let root = self.rewrite_expr(*root, ctx)?;
				let steps = fold_path_steps(self, steps, &ctx.with_globals_first(false))?;
				Ok(Expr::Path {
					root: Box::new(root),
					steps,
					fragment,
				})
			}
			Expr::MapValues {
				exp,
				query,
				fragment,
			} => {
				self.checkpoint()?;
				let inner = ResolveContext::new(Scope::nested(self.declared(&query)?, &ctx.scope));
				let exp = self.rewrite_expr(*exp, &inner)?;
				let query = self.rewrite_bexpr(*query, &ctx.with_globals_first(false))?;
				Ok(Expr::MapValues {
					exp: Box::new(exp),
					query: Box::new(query),
					fragment,
				})
			}
			expr if ctx.globals_first => fold_expr(self, expr, &ctx.with_globals_first(false)),
			expr => fold_expr(self, expr, ctx),
		}
	}

	fn rewrite_bexpr(&mut self, bexpr: Bexpr<Logical>, ctx: &ResolveContext) -> Result<Bexpr<Resolved>> {
		self.checkpoint()?;
		match bexpr {
			Bexpr::Scan {
				op,
				expr,
				as_decl,
				at_decl,
				by_decl,
				fragment,
			} => {
				let op = self.rewrite_op(OpKind::Scan, op, ctx)?;
				let expr = self.rewrite_expr(*expr, &ctx.with_globals_first(true))?;
				let scan = Bexpr::Scan {
					op,
					expr: Box::new(expr),
					as_decl: self.rewrite_decl(as_decl, ctx)?,
					at_decl: at_decl.map(|decl| self.rewrite_decl(decl, ctx)).transpose()?,
					by_decl: by_decl.map(|decl| self.rewrite_decl(decl, ctx)).transpose()?,
					fragment,
				};
				let decls = output_decls(&scan);
				self.report_redefined(scope::duplicates(&decls));
				Ok(scan)
			}
			Bexpr::Filter {
				op,
				predicate,
				source,
				fragment,
			} => {
				let op = self.rewrite_op(OpKind::Filter, op, ctx)?;
				let inner = ResolveContext::new(Scope::nested(self.declared(&source)?, &ctx.scope));
				let predicate = self.rewrite_expr(*predicate, &inner)?;
				let source = self.rewrite_bexpr(*source, ctx)?;
				Ok(Bexpr::Filter {
					op,
					predicate: Box::new(predicate),
					source: Box::new(source),
					fragment,
				})
			}
			Bexpr::Join {
				op,
				kind,
				left,
				right,
				predicate,
				fragment,
			} => {
				let op = self.rewrite_op(OpKind::Join, op, ctx)?;
				let left = self.rewrite_bexpr(*left, ctx)?;
				let left_decls = output_decls(&left);

				let right_ctx = ResolveContext::new(Scope::nested(left_decls.clone(), &ctx.scope));
				let right = self.rewrite_bexpr(*right, &right_ctx)?;
				let right_decls = output_decls(&right);

				let mut decls = left_decls;
				decls.extend(right_decls);
				self.report_redefined(scope::duplicates(&decls));
				let predicate = match predicate {
					Some(predicate) => {
						let inner = ResolveContext::new(Scope::nested(decls, &ctx.scope));
						Some(Box::new(self.rewrite_expr(*predicate, &inner)?))
					}
					None => None,
				};

				Ok(Bexpr::Join {
					op,
					kind,
					left: Box::new(left),
					right: Box::new(right),
					predicate,
					fragment,
				})
			}
		}
	}

	fn rewrite_var(&mut self, var: Identifier, ctx: &ResolveContext) -> Result<Binding> {
		Ok(self.lookup(var, ctx))
	}

	fn rewrite_decl(&mut self, decl: VarDecl, _ctx: &ResolveContext) -> Result<SlotDecl> {
		self.slot_decl(decl)
	}

	fn rewrite_op(&mut self, _kind: OpKind, op: (), _ctx: &ResolveContext) -> Result<()> {
		Ok(op)
	}
}

#[cfg(test)]
mod tests {
	use quarry_ast::JoinKind;
	use quarry_catalog::{GlobalId, MaterializedCatalog};

	use super::*;
	use crate::{
		ProblemKind,
		allocate::allocate_slots,
		ir::{SlotIndex, builder::LogicalBuilder},
	};

	fn catalog() -> MaterializedCatalog {
		let catalog = MaterializedCatalog::new();
		catalog.create_table("Customer", "tbl_customer").unwrap();
		catalog.create_table("orders", "tbl_orders").unwrap();
		catalog
	}

	fn resolve_with(
		statement: Statement<Logical>,
		catalog: &MaterializedCatalog,
		allow_undefined: bool,
	) -> (Statement<Resolved>, Problems) {
		let slots = allocate_slots(&statement);
		let mut problems = Problems::new();
		let resolved = Resolver::new(catalog, &slots, &mut problems)
			.allow_undefined_variables(allow_undefined)
			.resolve(statement)
			.unwrap();
		(resolved, problems)
	}

	fn resolve(statement: Statement<Logical>) -> (Statement<Resolved>, Problems) {
		resolve_with(statement, &catalog(), false)
	}

	fn local(name: &str, slot: u32) -> String {
		Binding::Local {
			name: name.to_string(),
			slot: SlotIndex(slot),
			fragment: Fragment::None,
		}
		.to_string()
	}

	#[test]
	fn test_scan_head_resolves_globally() {
		let mut b = LogicalBuilder::new();
		let scan = b.scan(b.var("customer"), "c");
		let (resolved, problems) = resolve(b.query(b.map_values(b.path(b.var("c"), &["name"]), scan)));

		assert!(problems.is_empty());
		assert_eq!(
			resolved.to_string(),
			format!("query(map_values({}.name, scan(global(customer:tbl_customer), as c:0)))", local("c", 0))
		);
	}

	#[test]
	fn test_globals_first_in_scan_head() {
		// the outer scan declares a local `orders` that competes with the table
		let mut b = LogicalBuilder::new();
		let inner = b.scan(b.var("orders"), "o");
		let outer = b.scan(b.var("Customer"), "orders");
		let exp = b.map_values(b.var("o"), inner);
		let (resolved, problems) = resolve(b.query(b.map_values(exp, outer)));

		assert!(problems.is_empty());
		assert_eq!(
			resolved.to_string(),
			"query(map_values(map_values(local(o:0), scan(global(orders:tbl_orders), as o:0)), \
			 scan(global(Customer:tbl_customer), as orders:1)))"
		);
	}

	#[test]
	fn test_locals_first_outside_scan_head() {
		let mut b = LogicalBuilder::new();
		let scan = b.scan(b.var("Customer"), "orders");
		let (resolved, _) = resolve(b.query(b.map_values(b.var("orders"), scan)));

		let Statement::Query {
			expr: Expr::MapValues {
				exp,
				..
			},
		} = resolved
		else {
			panic!("expected map_values");
		};
		assert_eq!(exp.to_string(), local("orders", 0));
	}

	#[test]
	fn test_qualified_scan_head_prefers_locals() {
		let mut b = LogicalBuilder::new();
		let inner = b.scan(b.local_var("orders"), "o");
		let outer = b.scan(b.var("Customer"), "orders");
		let exp = b.map_values(b.var("o"), inner);
		let (resolved, _) = resolve(b.query(b.map_values(exp, outer)));

		assert!(resolved.to_string().contains(&format!("scan({}, as o:0)", local("orders", 1))));
	}

	#[test]
	fn test_globals_first_only_for_direct_head() {
		// `f(orders)` is not a bare identifier, so the local wins
		let mut b = LogicalBuilder::new();
		let inner = b.scan(
			Expr::Call {
				name: "f".to_string(),
				args: vec![b.var("orders")],
				fragment: Fragment::None,
			},
			"o",
		);
		let outer = b.scan(b.var("Customer"), "orders");
		let exp = b.map_values(b.var("o"), inner);
		let (resolved, _) = resolve(b.query(b.map_values(exp, outer)));

		assert!(resolved.to_string().contains(&format!("scan(f({}), as o:0)", local("orders", 1))));
	}

	#[test]
	fn test_path_root_in_scan_head() {
		let mut b = LogicalBuilder::new();
		let inner = b.scan(b.path(b.var("orders"), &["items"]), "i");
		let outer = b.scan(b.var("Customer"), "orders");
		let exp = b.map_values(b.var("i"), inner);
		let (resolved, _) = resolve(b.query(b.map_values(exp, outer)));

		assert!(resolved.to_string().contains("scan(global(orders:tbl_orders).items, as i:0)"));
	}

	#[test]
	fn test_inner_scope_shadows_outer() {
		let mut b = LogicalBuilder::new();
		let inner = b.scan(b.var("orders"), "a");
		let outer = b.scan(b.var("Customer"), "a");
		let exp = b.map_values(b.var("a"), inner);
		let (resolved, problems) = resolve(b.query(b.map_values(exp, outer)));

		assert!(problems.is_empty());
		assert!(resolved.to_string().starts_with(&format!("query(map_values(map_values({},", local("a", 0))));
	}

	#[test]
	fn test_filter_sees_source() {
		let mut b = LogicalBuilder::new();
		let scan = b.scan(b.var("Customer"), "c");
		let filter = b.filter(b.eq(b.path(b.var("c"), &["id"]), b.lit(1i64)), scan);
		let (resolved, problems) = resolve(b.query(b.map_values(b.var("c"), filter)));

		assert!(problems.is_empty());
		assert!(resolved.to_string().contains(&format!("filter(eq({}.id, 1)", local("c", 0))));
	}

	#[test]
	fn test_duplicate_declaration_reported_once() {
		let mut b = LogicalBuilder::new();
		let as_decl = b.decl("x");
		let at_decl = b.decl("X");
		let scan = b.scan_with(b.var("orders"), as_decl, Some(at_decl), None);
		let (resolved, problems) = resolve(b.query(b.map_values(b.var("x"), scan)));

		assert_eq!(problems.len(), 1);
		assert_eq!(
			problems.iter().next().map(|p| &p.kind),
			Some(&ProblemKind::VariablePreviouslyDefined {
				name: "X".to_string()
			})
		);
		// both declarations stay, the first one wins
		assert_eq!(
			resolved.to_string(),
			format!("query(map_values({}, scan(global(orders:tbl_orders), as x:0, at X:1)))", local("x", 0))
		);
	}

	#[test]
	fn test_join_scoping() {
		let mut b = LogicalBuilder::new();
		let left = b.scan(b.var("Customer"), "c");
		// the right side may refer to the left side
		let right = b.scan(b.path(b.var("c"), &["orders"]), "o");
		let predicate = b.eq(b.path(b.var("c"), &["id"]), b.path(b.var("o"), &["customer_id"]));
		let join = b.join(JoinKind::Inner, left, right, Some(predicate));
		let exp = b.structure(vec![("c", b.var("c")), ("o", b.var("o"))]);
		let (resolved, problems) = resolve(b.query(b.map_values(exp, join)));

		assert!(problems.is_empty());
		let rendered = resolved.to_string();
		assert!(rendered.contains(&format!("scan({}.orders, as o:1)", local("c", 0))));
		assert!(rendered.contains(&format!("eq({}.id, {}.customer_id)", local("c", 0), local("o", 1))));
	}

	#[test]
	fn test_join_left_does_not_see_right() {
		let mut b = LogicalBuilder::new();
		let left = b.scan(b.path(b.var("o"), &["customer"]), "c");
		let right = b.scan(b.var("orders"), "o");
		let join = b.join(JoinKind::Left, left, right, None);
		let (_, problems) = resolve(b.query(b.map_values(b.var("c"), join)));

		assert_eq!(problems.len(), 1);
		assert!(matches!(
			&problems.iter().next().unwrap().kind,
			ProblemKind::UndefinedVariable { name, .. } if name == "o"
		));
	}

	#[test]
	fn test_join_collision_reported_once() {
		let mut b = LogicalBuilder::new();
		let left = b.scan(b.var("Customer"), "x");
		let right = b.scan(b.var("orders"), "X");
		let join = b.join(JoinKind::Inner, left, right, None);
		let (_, problems) = resolve(b.query(b.map_values(b.var("x"), join)));

		assert_eq!(problems.len(), 1);
		assert_eq!(
			problems.iter().next().map(|p| &p.kind),
			Some(&ProblemKind::VariablePreviouslyDefined {
				name: "X".to_string()
			})
		);
	}

	#[test]
	fn test_join_rechecks_union() {
		let mut b = LogicalBuilder::new();
		let x = b.decl("x");
		let shadow = b.decl("X");
		let left = b.scan_with(b.lit(1i64), x, Some(shadow), None);
		let right = b.scan(b.lit(2i64), "y");
		let join = b.join(JoinKind::Inner, left, right, None);
		let (_, problems) = resolve(b.query(b.map_values(b.var("y"), join)));

		// once for the scan, once for the union of both sides
		let names: Vec<_> = problems
			.iter()
			.map(|p| match &p.kind {
				ProblemKind::VariablePreviouslyDefined {
					name,
				} => name.as_str(),
				other => panic!("unexpected problem {:?}", other),
			})
			.collect();
		assert_eq!(names, vec!["X", "X"]);
	}

	#[test]
	fn test_subquery_bindings_do_not_leak() {
		let mut b = LogicalBuilder::new();
		let inner = b.scan(b.var("orders"), "o");
		let outer = b.scan(b.var("Customer"), "c");
		let filter = b.filter(b.var("o"), outer);
		let exp = b.map_values(b.var("o"), inner);
		let (resolved, problems) = resolve(b.query(b.map_values(exp, filter)));

		assert_eq!(problems.len(), 1);
		assert!(resolved.to_string().contains("filter(error(o)"));
	}

	#[test]
	fn test_undefined_variable() {
		let mut b = LogicalBuilder::new();
		let scan = b.scan(b.var("Customer"), "c");
		let (resolved, problems) = resolve(b.query(b.map_values(b.quoted_var("Undefined"), scan)));

		assert_eq!(problems.len(), 1);
		let problem = problems.iter().next().unwrap();
		assert!(problem.is_error());
		assert_eq!(
			problem.kind,
			ProblemKind::UndefinedVariable {
				name: "Undefined".to_string(),
				case: CaseSensitivity::Sensitive,
			}
		);
		assert!(resolved.to_string().starts_with("query(map_values(error(Undefined)"));
	}

	#[test]
	fn test_dynamic_when_undefined_allowed() {
		let mut b = LogicalBuilder::new();
		let inner = b.scan(b.var("orders"), "o");
		let outer = b.scan(b.var("Customer"), "c");
		let exp = b.map_values(b.var("mystery"), inner);
		let (resolved, problems) = resolve_with(b.query(b.map_values(exp, outer)), &catalog(), true);

		assert!(problems.is_empty());
		assert!(resolved.to_string().contains("dynamic(mystery, [o:0, c:1])"));
	}

	#[test]
	fn test_problems_in_traversal_order() {
		let mut b = LogicalBuilder::new();
		let scan = b.scan(b.var("third"), "c");
		let filter = b.filter(b.var("second"), scan);
		let (_, problems) = resolve(b.query(b.map_values(b.var("first"), filter)));

		let names: Vec<_> = problems
			.iter()
			.filter_map(|p| match &p.kind {
				ProblemKind::UndefinedVariable {
					name,
					..
				} => Some(name.as_str()),
				_ => None,
			})
			.collect();
		assert_eq!(names, vec!["first", "second", "third"]);
	}

	#[test]
	fn test_missing_slot_is_internal_error() {
		let mut b = LogicalBuilder::new();
		let scan = b.scan(b.var("Customer"), "c");
		let statement = b.query(b.map_values(b.var("c"), scan));

		let slots = VariableSlots::default();
		let mut problems = Problems::new();
		let catalog = catalog();
		let result = Resolver::new(&catalog, &slots, &mut problems).resolve(statement);
		assert!(matches!(result, Err(PlanError::Internal { .. })));
	}

	#[test]
	fn test_interrupted() {
		let mut b = LogicalBuilder::new();
		let scan = b.scan(b.var("Customer"), "c");
		let statement = b.query(b.map_values(b.var("c"), scan));
		let slots = allocate_slots(&statement);

		let interrupt = Interrupt::new();
		interrupt.interrupt();
		let mut problems = Problems::new();
		let catalog = catalog();
		let result = Resolver::new(&catalog, &slots, &mut problems).with_interrupt(&interrupt).resolve(statement);
		assert_eq!(result, Err(PlanError::Interrupted));
	}

	#[test]
	fn test_global_binding_carries_catalog_id() {
		let mut b = LogicalBuilder::new();
		let scan = b.scan(b.quoted_var("Customer"), "c");
		let (resolved, _) = resolve(b.query(b.map_values(b.var("c"), scan)));

		let Statement::Query {
			expr: Expr::MapValues {
				query,
				..
			},
		} = resolved
		else {
			panic!("expected map_values");
		};
		let Bexpr::Scan {
			expr,
			..
		} = *query
		else {
			panic!("expected scan");
		};
		assert!(matches!(*expr, Expr::Var(Binding::Global { ref id, .. }) if *id == GlobalId::new("tbl_customer")));
	}
}
