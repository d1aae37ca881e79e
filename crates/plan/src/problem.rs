// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use quarry_type::{CaseSensitivity, Diagnostic, Fragment, IntoDiagnostic};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Severity {
	Error,
	Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ProblemKind {
	UndefinedVariable {
		name: String,
		case: CaseSensitivity,
	},
	VariablePreviouslyDefined {
		name: String,
	},
	UnimplementedFeature {
		feature: String,
	},
}

impl Display for ProblemKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			ProblemKind::UndefinedVariable {
				name,
				case,
			} => match case {
				CaseSensitivity::Sensitive => write!(f, "variable \"{}\" is undefined", name),
				CaseSensitivity::Insensitive => write!(f, "variable '{}' is undefined", name),
			},
			ProblemKind::VariablePreviouslyDefined {
				name,
			} => write!(f, "variable '{}' was previously defined", name),
			ProblemKind::UnimplementedFeature {
				feature,
			} => write!(f, "{} is not supported", feature),
		}
	}
}

/// A diagnostic recorded by a pass without aborting it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Problem {
	pub fragment: Fragment,
	pub kind: ProblemKind,
	pub severity: Severity,
}

impl Problem {
	pub fn undefined_variable(name: impl Into<String>, case: CaseSensitivity, fragment: Fragment) -> Self {
		Self {
			fragment,
			kind: ProblemKind::UndefinedVariable {
				name: name.into(),
				case,
			},
			severity: Severity::Error,
		}
	}

	pub fn variable_previously_defined(name: impl Into<String>, fragment: Fragment) -> Self {
		Self {
			fragment,
			kind: ProblemKind::VariablePreviouslyDefined {
				name: name.into(),
			},
			severity: Severity::Error,
		}
	}

	pub fn unimplemented_feature(feature: impl Into<String>, fragment: Fragment) -> Self {
		Self {
			fragment,
			kind: ProblemKind::UnimplementedFeature {
				feature: feature.into(),
			},
			severity: Severity::Error,
		}
	}

	pub fn is_error(&self) -> bool {
		self.severity == Severity::Error
	}
}

impl Display for Problem {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}: {}", self.fragment, self.kind)
	}
}

impl IntoDiagnostic for Problem {
	fn into_diagnostic(self) -> Diagnostic {
		let message = self.kind.to_string();
		let (code, label, help) = match &self.kind {
			ProblemKind::UndefinedVariable {
				..
			} => (
				"PLAN_101",
				"not found in any enclosing scope or in the catalog",
				Some("check the spelling; quoted names are matched case sensitively"),
			),
			ProblemKind::VariablePreviouslyDefined {
				..
			} => ("PLAN_102", "this name is already bound in the same scope", Some("choose a different alias")),
			ProblemKind::UnimplementedFeature {
				..
			} => ("PLAN_103", "not supported by the planner", None),
		};

		Diagnostic {
			code: code.to_string(),
			message,
			fragment: self.fragment,
			label: Some(label.to_string()),
			help: help.map(str::to_string),
			notes: vec![],
		}
	}
}

/// Collects problems for a single planner invocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Problems(Vec<Problem>);

impl Problems {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn record(&mut self, problem: Problem) {
		self.0.push(problem);
	}

	pub fn has_errors(&self) -> bool {
		self.0.iter().any(Problem::is_error)
	}

	pub fn errors(&self) -> impl Iterator<Item = &Problem> {
		self.0.iter().filter(|p| p.is_error())
	}

	pub fn iter(&self) -> std::slice::Iter<'_, Problem> {
		self.0.iter()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn into_vec(self) -> Vec<Problem> {
		self.0
	}
}

impl<'a> IntoIterator for &'a Problems {
	type Item = &'a Problem;
	type IntoIter = std::slice::Iter<'a, Problem>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}
