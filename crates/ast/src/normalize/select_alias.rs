// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::{
	ast::{ProjectItem, Projection, Select},
	identifier::Alias,
	normalize::implicit_name,
};

/// Gives every `expr` item of a select list without `AS` an alias: its
/// implicit name, otherwise `_N` for the 1-based position in the list.
pub fn alias_select_list(mut select: Select) -> Select {
	if let Projection::List(items) = select.projection {
		select.projection = Projection::List(
			items.into_iter()
				.enumerate()
				.map(|(idx, item)| match item {
					ProjectItem::Expr {
						expr,
						alias: None,
					} => {
						let alias = match implicit_name(&expr) {
							Some((name, case)) => Alias::new(name, case),
							None => Alias::new(format!("_{}", idx + 1), Default::default()),
						};
						let fragment = expr.fragment().clone();
						ProjectItem::Expr {
							expr,
							alias: Some(alias.with_fragment(fragment)),
						}
					}
					item => item,
				})
				.collect(),
		);
	}
	select
}
