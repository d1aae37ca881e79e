// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{Display, Formatter},
	sync::Arc,
};

use quarry_type::CaseSensitivity;
use serde::{Deserialize, Serialize};

/// Opaque identifier of a catalog object, supplied by the catalog
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GlobalId(pub String);

impl GlobalId {
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl Display for GlobalId {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.0)
	}
}

/// Looks up names that are not bound locally in a query.
///
/// Implementations must be side effect free and safe to call from several
/// planner invocations at once.
pub trait GlobalResolver: Send + Sync {
	/// Returns the unique id of the object called `name`, or `None` if the
	/// catalog does not know it.
	fn resolve(&self, name: &str, case: CaseSensitivity) -> Option<GlobalId>;
}

impl<T: GlobalResolver + ?Sized> GlobalResolver for Arc<T> {
	fn resolve(&self, name: &str, case: CaseSensitivity) -> Option<GlobalId> {
		(**self).resolve(name, case)
	}
}

impl<T: GlobalResolver + ?Sized> GlobalResolver for &T {
	fn resolve(&self, name: &str, case: CaseSensitivity) -> Option<GlobalId> {
		(**self).resolve(name, case)
	}
}

/// A catalog without any objects
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyCatalog;

impl GlobalResolver for EmptyCatalog {
	fn resolve(&self, _name: &str, _case: CaseSensitivity) -> Option<GlobalId> {
		None
	}
}
