// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod case;
pub mod error;
pub mod fragment;
pub mod value;

pub use case::CaseSensitivity;
pub use error::{
	Error, Result,
	diagnostic::{Diagnostic, IntoDiagnostic},
	render::DefaultRenderer,
};
pub use fragment::{Fragment, StatementColumn, StatementLine};
pub use value::Value;
