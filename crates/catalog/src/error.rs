// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use quarry_type::{Diagnostic, Fragment, IntoDiagnostic};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
	#[error("object '{name}' is already registered")]
	AlreadyExists {
		name: String,
	},

	#[error("object '{name}' does not exist")]
	NotFound {
		name: String,
	},
}

impl IntoDiagnostic for CatalogError {
	fn into_diagnostic(self) -> Diagnostic {
		let message = self.to_string();
		match self {
			CatalogError::AlreadyExists {
				name,
			} => Diagnostic {
				code: "CATALOG_001".to_string(),
				message,
				fragment: Fragment::internal(name),
				label: Some("an object with this name already exists".to_string()),
				help: Some("remove the existing object first or choose a different name".to_string()),
				notes: vec![],
			},
			CatalogError::NotFound {
				name,
			} => Diagnostic {
				code: "CATALOG_002".to_string(),
				message,
				fragment: Fragment::internal(name),
				label: Some("unknown catalog object".to_string()),
				help: None,
				notes: vec![],
			},
		}
	}
}
