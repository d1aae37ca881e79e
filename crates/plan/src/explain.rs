// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::ir::{Bexpr, Expr, Logical, Phase, Physical, Resolved, Statement};

pub fn explain_logical(statement: &Statement<Logical>) -> String {
	explain(statement)
}

pub fn explain_resolved(statement: &Statement<Resolved>) -> String {
	explain(statement)
}

pub fn explain_physical(statement: &Statement<Physical>) -> String {
	explain(statement)
}

/// Renders `statement` as a tree, one relational operator per node. Scalar
/// expressions are printed inline.
pub fn explain<P: Phase>(statement: &Statement<P>) -> String {
	let mut output = String::new();
	match statement {
		Statement::Query {
			expr,
		} => {
			output.push_str(&format!("Query ({})\n", P::NAME));
			render_expr(expr, "", true, "", &mut output);
		}
	}
	output
}

fn child_prefix(prefix: &str, is_last: bool) -> String {
	format!(
		"{}{}",
		prefix,
		if is_last {
			"    "
		} else {
			"│   "
		}
	)
}

fn branch(is_last: bool) -> &'static str {
	if is_last {
		"└──"
	} else {
		"├──"
	}
}

fn render_expr<P: Phase>(expr: &Expr<P>, prefix: &str, is_last: bool, label: &str, output: &mut String) {
	match expr {
		Expr::MapValues {
			exp,
			query,
			..
		} => {
			output.push_str(&format!("{}{} {}MapValues\n", prefix, branch(is_last), label));
			let child_prefix = child_prefix(prefix, is_last);
			render_expr(exp, &child_prefix, false, "Exp: ", output);
			render_bexpr(query, &child_prefix, true, output);
		}
		expr => {
			output.push_str(&format!("{}{} {}{}\n", prefix, branch(is_last), label, expr));
		}
	}
}

fn render_bexpr<P: Phase>(bexpr: &Bexpr<P>, prefix: &str, is_last: bool, output: &mut String) {
	let op = P::describe_op(bexpr.op()).map(|op| format!(" [{}]", op)).unwrap_or_default();
	let child_prefix = child_prefix(prefix, is_last);

	match bexpr {
		Bexpr::Scan {
			expr,
			as_decl,
			at_decl,
			by_decl,
			..
		} => {
			output.push_str(&format!("{}{} Scan{}\n", prefix, branch(is_last), op));

			let mut decls = vec![format!("As: {}", as_decl)];
			if let Some(at) = at_decl {
				decls.push(format!("At: {}", at));
			}
			if let Some(by) = by_decl {
				decls.push(format!("By: {}", by));
			}

			render_expr(expr, &child_prefix, false, "Expr: ", output);
			let last = decls.len() - 1;
			for (idx, decl) in decls.iter().enumerate() {
				output.push_str(&format!("{}{} {}\n", child_prefix, branch(idx == last), decl));
			}
		}
		Bexpr::Filter {
			predicate,
			source,
			..
		} => {
			output.push_str(&format!("{}{} Filter{}\n", prefix, branch(is_last), op));
			render_expr(predicate, &child_prefix, false, "Predicate: ", output);
			render_bexpr(source, &child_prefix, true, output);
		}
		Bexpr::Join {
			kind,
			left,
			right,
			predicate,
			..
		} => {
			output.push_str(&format!("{}{} Join {}{}\n", prefix, branch(is_last), kind, op));
			render_bexpr(left, &child_prefix, false, output);
			render_bexpr(right, &child_prefix, predicate.is_none(), output);
			if let Some(predicate) = predicate {
				render_expr(predicate, &child_prefix, true, "Predicate: ", output);
			}
		}
	}
}
