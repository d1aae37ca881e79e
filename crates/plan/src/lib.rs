// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Query planning for quarry.
//!
//! A statement travels through four trees:
//!
//! ```text
//! ast::Statement --lower--> Statement<Logical> --allocate_slots--> VariableSlots
//!                                 |                                     |
//!                                 +---------------resolve---------------+
//!                                                    |
//!                            Statement<Resolved> --to_physical--> Statement<Physical>
//! ```
//!
//! Each step is a pure function of its inputs. Name resolution problems are
//! collected in a [`Problems`] sink rather than returned as errors, so one
//! run reports every problem of a statement. [`Planner`] runs the whole
//! pipeline and refuses to hand out a physical plan when an error was
//! recorded.

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod allocate;
mod error;
pub mod explain;
mod interrupt;
pub mod ir;
pub mod lower;
pub mod physical;
mod planner;
mod problem;
pub mod resolve;
pub mod rewrite;

pub use allocate::{VariableSlots, allocate_slots};
pub use error::PlanError;
pub use explain::{explain_logical, explain_physical, explain_resolved};
pub use interrupt::Interrupt;
pub use lower::lower;
pub use physical::{PhysicalPass, to_physical};
pub use planner::{PlanResult, Planner, PlannerBuilder, PlannerConfig};
pub use problem::{Problem, ProblemKind, Problems, Severity};
pub use resolve::Resolver;

pub type Result<T> = std::result::Result<T, PlanError>;
