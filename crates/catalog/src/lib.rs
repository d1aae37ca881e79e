// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

mod error;
pub mod materialized;
mod resolver;

pub use error::CatalogError;
pub use materialized::{MaterializedCatalog, ObjectDef, ObjectKind};
pub use resolver::{EmptyCatalog, GlobalId, GlobalResolver};
