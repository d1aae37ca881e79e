// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

mod config;

use std::sync::Arc;

pub use config::PlannerConfig;
use quarry_ast as ast;
use quarry_catalog::GlobalResolver;
use tracing::{debug, instrument};

use crate::{
	Interrupt, PlanError, Problem, Problems, Result,
	allocate::{VariableSlots, allocate_slots},
	ir::{Logical, Physical, Resolved, Statement},
	lower,
	physical::{self, PhysicalPass},
	resolve::Resolver,
};

/// Outcome of planning one statement.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanResult {
	Success {
		plan: Statement<Physical>,
		/// Problems below error severity
		warnings: Vec<Problem>,
	},
	Failure {
		problems: Vec<Problem>,
	},
}

impl PlanResult {
	pub fn is_success(&self) -> bool {
		matches!(self, PlanResult::Success { .. })
	}

	pub fn plan(&self) -> Option<&Statement<Physical>> {
		match self {
			PlanResult::Success {
				plan,
				..
			} => Some(plan),
			PlanResult::Failure {
				..
			} => None,
		}
	}

	pub fn problems(&self) -> &[Problem] {
		match self {
			PlanResult::Success {
				warnings,
				..
			} => warnings,
			PlanResult::Failure {
				problems,
			} => problems,
		}
	}
}

/// Runs the whole pipeline: syntax tree to logical, slot allocation,
/// resolution and physical lowering.
///
/// A planner holds no per statement state and can be shared between threads.
pub struct Planner {
	globals: Arc<dyn GlobalResolver>,
	config: PlannerConfig,
	passes: Vec<Box<dyn PhysicalPass>>,
	interrupt: Interrupt,
}

pub struct PlannerBuilder {
	globals: Arc<dyn GlobalResolver>,
	config: PlannerConfig,
	passes: Vec<Box<dyn PhysicalPass>>,
	interrupt: Option<Interrupt>,
}

impl PlannerBuilder {
	pub fn config(mut self, config: PlannerConfig) -> Self {
		self.config = config;
		self
	}

	/// Append a pass that runs after the default physical lowering
	pub fn pass(mut self, pass: impl PhysicalPass + 'static) -> Self {
		self.passes.push(Box::new(pass));
		self
	}

	/// Share an interrupt handle with the caller
	pub fn interrupt(mut self, interrupt: Interrupt) -> Self {
		self.interrupt = Some(interrupt);
		self
	}

	pub fn build(self) -> Planner {
		Planner {
			globals: self.globals,
			config: self.config,
			passes: self.passes,
			interrupt: self.interrupt.unwrap_or_default(),
		}
	}
}

impl Planner {
	pub fn builder(globals: impl GlobalResolver + 'static) -> PlannerBuilder {
		PlannerBuilder {
			globals: Arc::new(globals),
			config: PlannerConfig::default(),
			passes: Vec::new(),
			interrupt: None,
		}
	}

	pub fn config(&self) -> &PlannerConfig {
		&self.config
	}

	pub fn interrupt(&self) -> &Interrupt {
		&self.interrupt
	}

	/// Plans `statement`. Unsupported constructs and name resolution
	/// problems produce [`PlanResult::Failure`]; an internal error or an
	/// interruption is returned as `Err`.
	#[instrument(name = "plan::plan", level = "debug", skip_all)]
	pub fn plan(&self, statement: &ast::Statement) -> quarry_type::Result<PlanResult> {
		let mut problems = Problems::new();

		let logical = match self.lower(statement) {
			Ok(logical) => logical,
			Err(PlanError::Unimplemented {
				feature,
				fragment,
			}) => {
				debug!(%feature, "statement uses an unsupported feature");
				problems.record(Problem::unimplemented_feature(feature, fragment));
				return Ok(PlanResult::Failure {
					problems: problems.into_vec(),
				});
			}
			Err(err) => return Err(err.into()),
		};

		let slots = self.allocate(&logical);
		let resolved = self.resolve(logical, &slots, &mut problems)?;
		if problems.has_errors() {
			debug!(problems = problems.len(), "name resolution failed");
			return Ok(PlanResult::Failure {
				problems: problems.into_vec(),
			});
		}

		let plan = self.to_physical(resolved, &mut problems)?;
		if problems.has_errors() {
			debug!(problems = problems.len(), "physical planning failed");
			return Ok(PlanResult::Failure {
				problems: problems.into_vec(),
			});
		}

		Ok(PlanResult::Success {
			plan,
			warnings: problems.into_vec(),
		})
	}

	/// Syntax tree to logical algebra, normalizing first if configured
	pub fn lower(&self, statement: &ast::Statement) -> Result<Statement<Logical>> {
		self.interrupt.check()?;
		if self.config.normalize {
			lower::lower(&ast::normalize(statement.clone()))
		} else {
			lower::lower(statement)
		}
	}

	pub fn allocate(&self, statement: &Statement<Logical>) -> VariableSlots {
		allocate_slots(statement)
	}

	pub fn resolve(
		&self,
		statement: Statement<Logical>,
		slots: &VariableSlots,
		problems: &mut Problems,
	) -> Result<Statement<Resolved>> {
		Resolver::new(self.globals.as_ref(), slots, problems)
			.allow_undefined_variables(self.config.allow_undefined_variables)
			.with_interrupt(&self.interrupt)
			.resolve(statement)
	}

	/// Default physical lowering followed by the registered passes
	pub fn to_physical(&self, statement: Statement<Resolved>, problems: &mut Problems) -> Result<Statement<Physical>> {
		let mut plan = physical::to_physical(statement, Some(&self.interrupt))?;
		for pass in &self.passes {
			self.interrupt.check()?;
			debug!(pass = pass.name(), "running physical pass");
			plan = pass.apply(plan, problems)?;
		}
		Ok(plan)
	}
}
