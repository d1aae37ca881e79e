// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::Deserialize;

/// Configuration for a [`crate::Planner`]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
	/// Plan names that resolve nowhere as dynamic lookups instead of
	/// failing with an undefined variable problem
	pub allow_undefined_variables: bool,
	/// Normalize the syntax tree before lowering it
	pub normalize: bool,
}

impl Default for PlannerConfig {
	fn default() -> Self {
		Self {
			allow_undefined_variables: false,
			normalize: true,
		}
	}
}

impl PlannerConfig {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_allow_undefined_variables(mut self, allow: bool) -> Self {
		self.allow_undefined_variables = allow;
		self
	}

	pub fn with_normalize(mut self, normalize: bool) -> Self {
		self.normalize = normalize;
		self
	}
}
