// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::{
	ast::{FromSource, ScanSource, Select},
	identifier::Alias,
	normalize::implicit_name,
};

/// Gives every scan and unpivot source without `AS` an alias.
///
/// The alias is the source's implicit name when it has one, otherwise `_N`
/// where `N` is the 1-based position of the source in the from clause.
pub fn alias_from_sources(mut select: Select) -> Select {
	if let Some(source) = select.from.take() {
		let mut position = 0;
		select.from = Some(alias_source(source, &mut position));
	}
	select
}

fn alias_source(source: FromSource, position: &mut usize) -> FromSource {
	match source {
		FromSource::Scan(scan) => FromSource::Scan(alias_scan(scan, position)),
		FromSource::Unpivot(scan) => FromSource::Unpivot(alias_scan(scan, position)),
		FromSource::Join(mut join) => {
			join.left = Box::new(alias_source(*join.left, position));
			join.right = Box::new(alias_source(*join.right, position));
			FromSource::Join(join)
		}
	}
}

fn alias_scan(mut scan: ScanSource, position: &mut usize) -> ScanSource {
	*position += 1;
	if scan.as_alias.is_none() {
		let alias = match implicit_name(&scan.expr) {
			Some((name, case)) => Alias::new(name, case),
			None => Alias::new(format!("_{}", position), Default::default()),
		};
		scan.as_alias = Some(alias.with_fragment(scan.expr.fragment().clone()));
	}
	scan
}

#[cfg(test)]
mod tests {
	use quarry_type::CaseSensitivity;

	use super::*;
	use crate::{ast::JoinKind, build::*};

	fn as_names(source: &FromSource) -> Vec<(String, CaseSensitivity)> {
		match source {
			FromSource::Scan(scan) | FromSource::Unpivot(scan) => scan
				.as_alias
				.iter()
				.map(|alias| (alias.name.clone(), alias.case))
				.collect(),
			FromSource::Join(join) => {
				let mut names = as_names(&join.left);
				names.extend(as_names(&join.right));
				names
			}
		}
	}

	#[test]
	fn test_identifier_source() {
		let select = alias_from_sources(select().all(id("x")).from(scan(quoted("Customer"))).build());
		assert_eq!(
			as_names(select.from.as_ref().unwrap()),
			vec![("Customer".to_string(), CaseSensitivity::Sensitive)]
		);
	}

	#[test]
	fn test_path_source_uses_last_key() {
		let select = alias_from_sources(select().all(id("x")).from(scan(path(id("db"), &["orders"]))).build());
		assert_eq!(
			as_names(select.from.as_ref().unwrap()),
			vec![("orders".to_string(), CaseSensitivity::Insensitive)]
		);
	}

	#[test]
	fn test_positional_alias() {
		let source = join(
			JoinKind::Inner,
			scan(id("a")).as_("a").into(),
			scan(list(vec![lit(1i64)])).into(),
			None,
		);
		let select = alias_from_sources(select().all(id("a")).from(source).build());
		assert_eq!(
			as_names(select.from.as_ref().unwrap()),
			vec![
				("a".to_string(), CaseSensitivity::Insensitive),
				("_2".to_string(), CaseSensitivity::Insensitive)
			]
		);
	}

	#[test]
	fn test_existing_alias_kept() {
		let select = alias_from_sources(select().all(id("c")).from(scan(id("Customer")).as_("c")).build());
		assert_eq!(as_names(select.from.as_ref().unwrap()), vec![("c".to_string(), CaseSensitivity::Insensitive)]);
	}
}
