// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use indexmap::IndexMap;
use tracing::{instrument, trace};

use crate::{
	ir::{DeclId, Logical, SlotIndex, Statement, VarDecl},
	rewrite::Visitor,
};

/// Slot assigned to each variable declaration of a logical tree, in
/// allocation order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariableSlots(IndexMap<DeclId, SlotIndex>);

impl VariableSlots {
	pub fn get(&self, id: DeclId) -> Option<SlotIndex> {
		self.0.get(&id).copied()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (DeclId, SlotIndex)> + '_ {
		self.0.iter().map(|(id, slot)| (*id, *slot))
	}
}

/// Numbers every declaration in `statement` from zero, depth first.
///
/// The numbering depends only on the shape of the tree, so allocating the
/// same tree twice yields the same slots.
#[instrument(name = "plan::allocate", level = "trace", skip_all)]
pub fn allocate_slots(statement: &Statement<Logical>) -> VariableSlots {
	let mut allocator = SlotAllocator::default();
	allocator.visit_statement(statement);
	trace!(slots = allocator.slots.len(), "allocated variable slots");
	allocator.slots
}

#[derive(Default)]
struct SlotAllocator {
	slots: VariableSlots,
}

impl Visitor<Logical> for SlotAllocator {
	fn visit_decl(&mut self, decl: &VarDecl) {
		// declarations past u32::MAX stay unallocated and fail resolution
		let Some(next) = next_slot(self.slots.0.len()) else {
			return;
		};
		self.slots.0.entry(decl.id).or_insert(next);
	}
}

fn next_slot(allocated: usize) -> Option<SlotIndex> {
	u32::try_from(allocated).ok().map(SlotIndex)
}
