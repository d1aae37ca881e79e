// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![allow(dead_code)]

use quarry_ast::{Statement, build::*};
use quarry_catalog::MaterializedCatalog;
use quarry_plan::{
	Planner, PlannerConfig,
	ir::{Binding, Identifier, Logical, Resolved, SlotDecl, VarDecl},
	rewrite::Visitor,
};

pub fn catalog() -> MaterializedCatalog {
	let catalog = MaterializedCatalog::new();
	catalog.create_table("Customer", "tbl_customer").unwrap();
	catalog.create_table("orders", "tbl_orders").unwrap();
	catalog.create_view("recent_orders", "view_recent_orders").unwrap();
	catalog
}

pub fn planner() -> Planner {
	Planner::builder(catalog()).build()
}

pub fn planner_with(config: PlannerConfig) -> Planner {
	Planner::builder(catalog()).config(config).build()
}

/// `SELECT c.name FROM Customer AS c WHERE c.id = 1`
pub fn customer_query() -> Statement {
	select().item(path(id("c"), &["name"]), None)
		.from(scan(id("Customer")).as_("c"))
		.where_(eq(path(id("c"), &["id"]), lit(1i64)))
		.query()
}

/// ```text
/// SELECT VALUE {
///     'customer': c,
///     'orders': (SELECT VALUE o FROM c.orders AS o AT i WHERE o.total > 100)
/// }
/// FROM Customer AS c AT pos BY rid
/// ```
pub fn correlated_query() -> Statement {
	let orders = select()
		.value(id("o"))
		.from(scan(path(id("c"), &["orders"])).as_("o").at("i"))
		.where_(binary(quarry_ast::BinaryOp::Gt, path(id("o"), &["total"]), lit(100i64)))
		.build();

	select().value(structure(vec![("customer", id("c")), ("orders", subquery(orders))]))
		.from(scan(id("Customer")).as_("c").at("pos").by("rid"))
		.query()
}

/// Counts name references and declarations of a logical tree
#[derive(Debug, Default)]
pub struct LogicalCounts {
	pub vars: usize,
	pub decls: usize,
}

impl Visitor<Logical> for LogicalCounts {
	fn visit_var(&mut self, _var: &Identifier) {
		self.vars += 1;
	}

	fn visit_decl(&mut self, _decl: &VarDecl) {
		self.decls += 1;
	}
}

/// Counts bindings of a resolved tree by kind
#[derive(Debug, Default)]
pub struct ResolvedCounts {
	pub local: usize,
	pub global: usize,
	pub error: usize,
	pub dynamic: usize,
	pub slots: Vec<u32>,
}

impl ResolvedCounts {
	pub fn total(&self) -> usize {
		self.local + self.global + self.error + self.dynamic
	}
}

impl Visitor<Resolved> for ResolvedCounts {
	fn visit_var(&mut self, var: &Binding) {
		match var {
			Binding::Local {
				..
			} => self.local += 1,
			Binding::Global {
				..
			} => self.global += 1,
			Binding::Error {
				..
			} => self.error += 1,
			Binding::Dynamic {
				..
			} => self.dynamic += 1,
		}
	}

	fn visit_decl(&mut self, decl: &SlotDecl) {
		self.slots.push(decl.slot.0);
	}
}
