// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use quarry_catalog::GlobalId;
use quarry_type::{CaseSensitivity, Fragment};
use serde::Serialize;

use crate::ir::Phase;

/// Logical algebra with every name reference bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved;

impl Phase for Resolved {
	const NAME: &'static str = "resolved";
	type Var = Binding;
	type Decl = SlotDecl;
	type Op = ();
}

/// Storage position of a local variable at evaluation time.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SlotIndex(pub u32);

impl Display for SlotIndex {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalBinding {
	pub name: String,
	pub slot: SlotIndex,
}

impl Display for LocalBinding {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}:{}", self.name, self.slot)
	}
}

/// What a name reference was bound to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Binding {
	Local {
		name: String,
		slot: SlotIndex,
		fragment: Fragment,
	},
	Global {
		name: String,
		id: GlobalId,
		fragment: Fragment,
	},
	/// Placeholder for a name that could not be resolved. A problem has been
	/// recorded for it.
	Error {
		name: String,
		fragment: Fragment,
	},
	/// Resolved at evaluation time against `candidates`, innermost scope first
	Dynamic {
		name: String,
		case: CaseSensitivity,
		candidates: Vec<LocalBinding>,
		fragment: Fragment,
	},
}

impl Binding {
	pub fn name(&self) -> &str {
		match self {
			Binding::Local {
				name,
				..
			}
			| Binding::Global {
				name,
				..
			}
			| Binding::Error {
				name,
				..
			}
			| Binding::Dynamic {
				name,
				..
			} => name,
		}
	}

	pub fn fragment(&self) -> &Fragment {
		match self {
			Binding::Local {
				fragment,
				..
			}
			| Binding::Global {
				fragment,
				..
			}
			| Binding::Error {
				fragment,
				..
			}
			| Binding::Dynamic {
				fragment,
				..
			} => fragment,
		}
	}

	pub fn is_error(&self) -> bool {
		matches!(self, Binding::Error { .. })
	}
}

impl Display for Binding {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Binding::Local {
				name,
				slot,
				..
			} => write!(f, "local({}:{})", name, slot),
			Binding::Global {
				name,
				id,
				..
			} => write!(f, "global({}:{})", name, id),
			Binding::Error {
				name,
				..
			} => write!(f, "error({})", name),
			Binding::Dynamic {
				name,
				candidates,
				..
			} => {
				write!(f, "dynamic({}, [", name)?;
				for (idx, candidate) in candidates.iter().enumerate() {
					if idx > 0 {
						f.write_str(", ")?;
					}
					write!(f, "{}", candidate)?;
				}
				f.write_str("])")
			}
		}
	}
}

/// A variable declaration with its storage slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotDecl {
	pub name: String,
	pub case: CaseSensitivity,
	pub slot: SlotIndex,
	pub fragment: Fragment,
}

impl SlotDecl {
	pub fn to_local_binding(&self) -> LocalBinding {
		LocalBinding {
			name: self.name.clone(),
			slot: self.slot,
		}
	}
}

impl Display for SlotDecl {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}:{}", self.name, self.slot)
	}
}
