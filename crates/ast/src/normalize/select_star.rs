// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::ast::{Expr, FromSource, ProjectItem, Projection, Select};

/// Rewrites `SELECT *` into `SELECT a.*, b.*, ...`, one item per aliased
/// from source. Sources must already carry their `AS` alias; a star over a
/// source without one is left as it is.
pub fn desugar_select_star(mut select: Select) -> Select {
	let Projection::Star(fragment) = &select.projection else {
		return select;
	};
	let Some(from) = &select.from else {
		return select;
	};

	let mut items = Vec::new();
	if !collect_items(from, fragment, &mut items) {
		return select;
	}

	select.projection = Projection::List(items);
	select
}

fn collect_items(source: &FromSource, fragment: &quarry_type::Fragment, items: &mut Vec<ProjectItem>) -> bool {
	match source {
		FromSource::Scan(scan) | FromSource::Unpivot(scan) => {
			let Some(alias) = &scan.as_alias else {
				return false;
			};
			items.push(ProjectItem::All {
				expr: Expr::Id(alias.to_identifier()),
				fragment: fragment.clone(),
			});
			true
		}
		FromSource::Join(join) => {
			collect_items(&join.left, fragment, items) && collect_items(&join.right, fragment, items)
		}
	}
}
