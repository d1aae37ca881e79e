// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::{
	Problems, Result,
	ir::{Physical, Statement},
};

/// A rewrite over a physical plan, typically one that picks a specialised
/// implementation for some operators.
///
/// Passes run in registration order after the default physical lowering. A
/// pass may record problems; the planner refuses the plan if any of them is
/// an error.
pub trait PhysicalPass: Send + Sync {
	fn name(&self) -> &str;

	fn apply(&self, statement: Statement<Physical>, problems: &mut Problems) -> Result<Statement<Physical>>;
}
