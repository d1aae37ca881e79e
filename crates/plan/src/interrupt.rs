// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::{
	Arc,
	atomic::{AtomicBool, Ordering},
};

use crate::{PlanError, Result};

/// Cooperative cancellation flag for long running passes.
///
/// Clones share the flag, so a caller can keep one handle and hand another
/// to the planner. Rewriters poll it at every recursive descent.
#[derive(Debug, Clone, Default)]
pub struct Interrupt(Arc<AtomicBool>);

impl Interrupt {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn interrupt(&self) {
		self.0.store(true, Ordering::Release);
	}

	pub fn reset(&self) {
		self.0.store(false, Ordering::Release);
	}

	pub fn is_interrupted(&self) -> bool {
		self.0.load(Ordering::Acquire)
	}

	pub fn check(&self) -> Result<()> {
		if self.is_interrupted() {
			return Err(PlanError::Interrupted);
		}
		Ok(())
	}
}
