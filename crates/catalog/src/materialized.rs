// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{ops::Deref, sync::Arc};

use crossbeam_skiplist::SkipMap;
use quarry_type::{CaseSensitivity, Result, return_error};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{CatalogError, GlobalId, GlobalResolver};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectKind {
	Table,
	View,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectDef {
	pub id: GlobalId,
	pub name: String,
	pub kind: ObjectKind,
}

/// In-memory catalog shared between planner invocations.
///
/// Cloning is cheap; all clones observe the same objects.
#[derive(Debug, Clone, Default)]
pub struct MaterializedCatalog(Arc<MaterializedCatalogInner>);

#[derive(Debug, Default)]
pub struct MaterializedCatalogInner {
	/// Object definitions indexed by their exact name
	pub(crate) objects: SkipMap<String, Arc<ObjectDef>>,
	/// Index from (lowercased name, exact name) for case-insensitive lookups
	pub(crate) objects_by_folded_name: SkipMap<(String, String), GlobalId>,
}

impl Deref for MaterializedCatalog {
	type Target = MaterializedCatalogInner;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl MaterializedCatalog {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn create_table(&self, name: impl Into<String>, id: impl Into<String>) -> Result<ObjectDef> {
		self.create(name.into(), GlobalId::new(id), ObjectKind::Table)
	}

	pub fn create_view(&self, name: impl Into<String>, id: impl Into<String>) -> Result<ObjectDef> {
		self.create(name.into(), GlobalId::new(id), ObjectKind::View)
	}

	fn create(&self, name: String, id: GlobalId, kind: ObjectKind) -> Result<ObjectDef> {
		let def = Arc::new(ObjectDef {
			id: id.clone(),
			name: name.clone(),
			kind,
		});

		// only the caller whose definition ended up in the map registered it
		let entry = self.objects.get_or_insert(name.clone(), def.clone());
		if !Arc::ptr_eq(entry.value(), &def) {
			return_error!(CatalogError::AlreadyExists {
				name
			});
		}

		trace!(name = %name, id = %id, ?kind, "register catalog object");
		self.objects_by_folded_name.insert((name.to_lowercase(), name), id);
		Ok(def.as_ref().clone())
	}

	pub fn drop_object(&self, name: &str) -> Result<ObjectDef> {
		let Some(entry) = self.objects.remove(name) else {
			return_error!(CatalogError::NotFound {
				name: name.to_string()
			});
		};
		self.objects_by_folded_name.remove(&(name.to_lowercase(), name.to_string()));
		Ok(entry.value().as_ref().clone())
	}

	pub fn find_by_name(&self, name: &str, case: CaseSensitivity) -> Option<ObjectDef> {
		match case {
			CaseSensitivity::Sensitive => self.objects.get(name).map(|entry| entry.value().as_ref().clone()),
			CaseSensitivity::Insensitive => {
				let folded = name.to_lowercase();
				// several names may fold to the same key, the lexicographically first one wins
				let entry = self
					.objects_by_folded_name
					.range((folded.clone(), String::new())..)
					.next()
					.filter(|entry| entry.key().0 == folded)?;
				self.objects.get(&entry.key().1).map(|entry| entry.value().as_ref().clone())
			}
		}
	}

	pub fn len(&self) -> usize {
		self.objects.len()
	}

	pub fn is_empty(&self) -> bool {
		self.objects.is_empty()
	}
}

impl GlobalResolver for MaterializedCatalog {
	fn resolve(&self, name: &str, case: CaseSensitivity) -> Option<GlobalId> {
		self.find_by_name(name, case).map(|def| def.id)
	}
}
