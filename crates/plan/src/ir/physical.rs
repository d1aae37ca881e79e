// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use quarry_type::Value;
use serde::Serialize;

use crate::ir::{Binding, Phase, SlotDecl};

/// Resolved algebra where every operator names its implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Physical;

impl Phase for Physical {
	const NAME: &'static str = "physical";
	type Var = Binding;
	type Decl = SlotDecl;
	type Op = Impl;

	fn describe_op(op: &Impl) -> Option<String> {
		Some(op.to_string())
	}
}

pub const DEFAULT_IMPL: &str = "default";

/// Selects the execution strategy of a physical operator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Impl {
	pub name: String,
	/// Arguments fixed at planning time, e.g. the index a scan reads from
	pub static_args: Vec<Value>,
}

impl Impl {
	pub fn new(name: impl Into<String>, static_args: Vec<Value>) -> Self {
		Self {
			name: name.into(),
			static_args,
		}
	}

	pub fn is_default(&self) -> bool {
		self.name == DEFAULT_IMPL && self.static_args.is_empty()
	}
}

impl Default for Impl {
	fn default() -> Self {
		Self::new(DEFAULT_IMPL, vec![])
	}
}

impl Display for Impl {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.name)?;
		if !self.static_args.is_empty() {
			f.write_str("(")?;
			for (idx, arg) in self.static_args.iter().enumerate() {
				if idx > 0 {
					f.write_str(", ")?;
				}
				write!(f, "{}", arg)?;
			}
			f.write_str(")")?;
		}
		Ok(())
	}
}
