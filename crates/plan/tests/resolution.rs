// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

mod common;

use std::collections::BTreeSet;

use common::{LogicalCounts, ResolvedCounts, catalog, correlated_query, customer_query, planner};
use quarry_ast::{JoinKind, Statement, build::*};
use quarry_catalog::EmptyCatalog;
use quarry_plan::{
	ProblemKind, Problems, Resolver, allocate_slots,
	ir::{Logical, builder::LogicalBuilder},
	rewrite::Visitor,
};

fn queries() -> Vec<Statement> {
	let nested = select()
		.value(id("a"))
		.from(scan(list(vec![lit(1i64), lit(2i64)])).as_("a").at("n"))
		.build();

	vec![
		customer_query(),
		correlated_query(),
		select().value(subquery(nested)).from(scan(id("orders")).as_("a").by("r")).query(),
		select().value(id("unknown")).from(scan(id("Customer")).as_("c")).query(),
	]
}

fn lower(statement: &Statement) -> quarry_plan::ir::Statement<Logical> {
	planner().lower(statement).unwrap()
}

#[test]
fn test_slots_are_unique_and_dense() {
	for statement in queries() {
		let logical = lower(&statement);
		let slots = allocate_slots(&logical);

		let mut counts = LogicalCounts::default();
		counts.visit_statement(&logical);

		let assigned: BTreeSet<u32> = slots.iter().map(|(_, slot)| slot.0).collect();
		let expected: BTreeSet<u32> = (0..counts.decls as u32).collect();
		assert_eq!(slots.len(), counts.decls);
		assert_eq!(assigned, expected);
	}
}

#[test]
fn test_every_reference_is_bound() {
	for statement in queries() {
		let logical = lower(&statement);
		let slots = allocate_slots(&logical);

		let mut logical_counts = LogicalCounts::default();
		logical_counts.visit_statement(&logical);

		let catalog = catalog();
		let mut problems = Problems::new();
		let resolved = Resolver::new(&catalog, &slots, &mut problems).resolve(logical).unwrap();

		let mut resolved_counts = ResolvedCounts::default();
		resolved_counts.visit_statement(&resolved);

		assert_eq!(resolved_counts.total(), logical_counts.vars);
		assert_eq!(resolved_counts.error, problems.len());
		assert_eq!(resolved_counts.dynamic, 0);
	}
}

#[test]
fn test_resolved_slots_match_allocation() {
	let logical = lower(&correlated_query());
	let slots = allocate_slots(&logical);

	let catalog = catalog();
	let mut problems = Problems::new();
	let resolved = Resolver::new(&catalog, &slots, &mut problems).resolve(logical).unwrap();

	let mut counts = ResolvedCounts::default();
	counts.visit_statement(&resolved);

	let mut declared = counts.slots.clone();
	declared.sort_unstable();
	assert_eq!(declared, vec![0, 1, 2, 3, 4]);
	assert_eq!(counts.local, 4);
	assert_eq!(counts.global, 1);
}

#[test]
fn test_inner_declaration_shadows_outer() {
	// SELECT VALUE (SELECT VALUE a FROM [1] AS a) FROM [[1]] AS a
	let inner = select().value(id("a")).from(scan(list(vec![lit(1i64)])).as_("a")).build();
	let statement = select().value(subquery(inner)).from(scan(list(vec![list(vec![lit(1i64)])])).as_("a")).query();

	let result = planner().plan(&statement).unwrap();
	assert_eq!(
		result.plan().unwrap().to_string(),
		"query(map_values(map_values(local(a:0), scan[default]([1], as a:0)), scan[default]([[1]], as a:1)))"
	);
}

#[test]
fn test_scan_head_prefers_catalog() {
	// SELECT VALUE (SELECT VALUE x FROM orders AS x WHERE orders = 1) FROM Customer AS orders
	let inner = select().value(id("x")).from(scan(id("orders")).as_("x")).where_(eq(id("orders"), lit(1i64))).build();
	let statement = select().value(subquery(inner)).from(scan(id("Customer")).as_("orders")).query();

	let result = planner().plan(&statement).unwrap();
	let plan = result.plan().unwrap().to_string();

	assert!(plan.contains("scan[default](global(orders:tbl_orders), as x:0)"), "{}", plan);
	assert!(plan.contains("eq(local(orders:1), 1)"), "{}", plan);
}

#[test]
fn test_locals_first_qualifier_in_scan_head() {
	// SELECT VALUE (SELECT VALUE x FROM @orders AS x) FROM Customer AS orders
	let inner = select().value(id("x")).from(scan(local("orders")).as_("x")).build();
	let statement = select().value(subquery(inner)).from(scan(id("Customer")).as_("orders")).query();

	let result = planner().plan(&statement).unwrap();
	let plan = result.plan().unwrap().to_string();

	assert!(plan.contains("scan[default](local(orders:1), as x:0)"), "{}", plan);
}

#[test]
fn test_join_sides_share_scope() {
	let mut b = LogicalBuilder::new();
	let left = b.scan(b.var("Customer"), "c");
	let right = b.scan(b.path(b.var("c"), &["orders"]), "o");
	let predicate = b.eq(b.path(b.var("o"), &["cid"]), b.path(b.var("c"), &["id"]));
	let join = b.join(JoinKind::Inner, left, right, Some(predicate));
	let statement = b.query(b.map_values(b.var("o"), join));

	let slots = allocate_slots(&statement);
	let catalog = catalog();
	let mut problems = Problems::new();
	let resolved = Resolver::new(&catalog, &slots, &mut problems).resolve(statement).unwrap();

	assert!(problems.is_empty());
	assert_eq!(
		resolved.to_string(),
		"query(map_values(local(o:1), join(inner, scan(global(Customer:tbl_customer), as c:0), scan(local(c:0).orders, as o:1), eq(local(o:1).cid, local(c:0).id))))"
	);
}

#[test]
fn test_join_reports_collision_once() {
	let mut b = LogicalBuilder::new();
	let left = b.scan(b.var("Customer"), "x");
	let right = b.scan(b.var("orders"), "X");
	let join = b.join(JoinKind::Left, left, right, None);
	let statement = b.query(b.map_values(b.var("x"), join));

	let slots = allocate_slots(&statement);
	let catalog = catalog();
	let mut problems = Problems::new();
	Resolver::new(&catalog, &slots, &mut problems).resolve(statement).unwrap();

	assert_eq!(problems.len(), 1);
	let problem = problems.iter().next().unwrap();
	assert_eq!(
		problem.kind,
		ProblemKind::VariablePreviouslyDefined {
			name: "X".to_string(),
		}
	);
}

#[test]
fn test_join_rechecks_duplicates_within_a_side() {
	let mut b = LogicalBuilder::new();
	let x = b.decl("x");
	let shadow = b.decl("X");
	let left = b.scan_with(b.var("Customer"), x, Some(shadow), None);
	let right = b.scan(b.var("orders"), "o");
	let join = b.join(JoinKind::Inner, left, right, None);
	let statement = b.query(b.map_values(b.var("o"), join));

	let slots = allocate_slots(&statement);
	let catalog = catalog();
	let mut problems = Problems::new();
	let resolved = Resolver::new(&catalog, &slots, &mut problems).resolve(statement).unwrap();

	assert_eq!(problems.len(), 2);
	for problem in problems.iter() {
		assert_eq!(
			problem.kind,
			ProblemKind::VariablePreviouslyDefined {
				name: "X".to_string(),
			}
		);
	}
	// both declarations stay in the tree
	assert!(resolved.to_string().contains("as x:0, at X:1"), "{}", resolved);
}

#[test]
fn test_problems_follow_written_order() {
	// SELECT VALUE proj FROM src AS c WHERE pred
	let statement = select().value(id("proj")).from(scan(id("src")).as_("c")).where_(id("pred")).query();

	let logical = lower(&statement);
	let slots = allocate_slots(&logical);
	let mut problems = Problems::new();
	Resolver::new(&EmptyCatalog, &slots, &mut problems).resolve(logical).unwrap();

	let names: Vec<_> = problems
		.iter()
		.map(|p| match &p.kind {
			ProblemKind::UndefinedVariable {
				name,
				..
			} => name.clone(),
			other => panic!("unexpected problem {:?}", other),
		})
		.collect();
	assert_eq!(names, vec!["proj", "pred", "src"]);
}

#[test]
fn test_dynamic_candidates_innermost_first() {
	let inner = select().value(id("mystery")).from(scan(path(id("c"), &["orders"])).as_("o")).build();
	let statement = select().value(subquery(inner)).from(scan(id("Customer")).as_("c")).query();

	let logical = lower(&statement);
	let slots = allocate_slots(&logical);
	let mut problems = Problems::new();
	let resolved = Resolver::new(&EmptyCatalog, &slots, &mut problems)
		.allow_undefined_variables(true)
		.resolve(logical)
		.unwrap();

	assert!(problems.is_empty());
	let rendered = resolved.to_string();
	assert!(rendered.contains("dynamic(mystery, [o:0, c:1])"), "{}", rendered);
	// without a catalog the scan head is left for evaluation time too
	assert!(rendered.contains("dynamic(Customer, [])"), "{}", rendered);
}
