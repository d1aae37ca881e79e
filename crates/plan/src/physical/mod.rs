// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Resolved to physical algebra: the same tree with the default
//! implementation attached to every relational operator. Later
//! [`PhysicalPass`]es replace implementations where they know better.

mod pass;

pub use pass::PhysicalPass;
use tracing::instrument;

use crate::{
	Interrupt, Result,
	ir::{Binding, Impl, OpKind, Physical, Resolved, SlotDecl, Statement},
	rewrite::Rewriter,
};

#[instrument(name = "plan::physical", level = "trace", skip_all)]
pub fn to_physical(statement: Statement<Resolved>, interrupt: Option<&Interrupt>) -> Result<Statement<Physical>> {
	PhysicalLowering {
		interrupt,
	}
	.rewrite_statement(statement, &())
}

struct PhysicalLowering<'a> {
	interrupt: Option<&'a Interrupt>,
}

impl Rewriter<Resolved, Physical> for PhysicalLowering<'_> {
	type Context = ();

	fn interrupt(&self) -> Option<&Interrupt> {
		self.interrupt
	}

	fn rewrite_var(&mut self, var: Binding, _ctx: &()) -> Result<Binding> {
		Ok(var)
	}

	fn rewrite_decl(&mut self, decl: SlotDecl, _ctx: &()) -> Result<SlotDecl> {
		Ok(decl)
	}

	fn rewrite_op(&mut self, _kind: OpKind, _op: (), _ctx: &()) -> Result<Impl> {
		Ok(Impl::default())
	}
}
