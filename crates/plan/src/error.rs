// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use quarry_type::{Diagnostic, Fragment, IntoDiagnostic};

/// Failures that stop a lowering pass outright.
///
/// Name resolution problems are not errors; they are recorded as
/// [`crate::Problem`]s while the pass keeps going.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanError {
	#[error("{feature} is not supported")]
	Unimplemented {
		feature: String,
		fragment: Fragment,
	},

	#[error("internal planner error: {message}")]
	Internal {
		message: String,
	},

	#[error("planning was interrupted")]
	Interrupted,
}

impl PlanError {
	pub fn unimplemented(feature: impl Into<String>, fragment: Fragment) -> Self {
		PlanError::Unimplemented {
			feature: feature.into(),
			fragment,
		}
	}

	pub fn internal(message: impl Into<String>) -> Self {
		PlanError::Internal {
			message: message.into(),
		}
	}
}

impl IntoDiagnostic for PlanError {
	fn into_diagnostic(self) -> Diagnostic {
		let message = self.to_string();
		match self {
			PlanError::Unimplemented {
				feature,
				fragment,
			} => Diagnostic {
				code: "PLAN_001".to_string(),
				message,
				fragment,
				label: Some(format!("{} cannot be planned yet", feature)),
				help: Some("rewrite the query without this construct".to_string()),
				notes: vec![],
			},
			PlanError::Internal {
				..
			} => Diagnostic {
				code: "PLAN_002".to_string(),
				message,
				fragment: Fragment::None,
				label: None,
				help: None,
				notes: vec!["this is a bug in the planner or in the pass that produced its input".to_string()],
			},
			PlanError::Interrupted => Diagnostic {
				code: "PLAN_003".to_string(),
				message,
				fragment: Fragment::None,
				label: None,
				help: None,
				notes: vec![],
			},
		}
	}
}
