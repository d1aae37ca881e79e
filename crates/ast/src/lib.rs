// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod ast;
pub mod build;
pub mod identifier;
pub mod normalize;

pub use ast::*;
pub use identifier::{Alias, Identifier, Qualifier};
pub use normalize::normalize;
