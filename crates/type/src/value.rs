// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// A literal value as it appears in a query.
///
/// The planner never evaluates values; it only carries them from the
/// surface tree into the plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
	Null,
	Bool(bool),
	Int(i64),
	Float(f64),
	Text(String),
}

impl Value {
	pub fn text(value: impl Into<String>) -> Self {
		Value::Text(value.into())
	}

	pub fn as_text(&self) -> Option<&str> {
		match self {
			Value::Text(text) => Some(text.as_str()),
			_ => None,
		}
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Value::Bool(value)
	}
}

impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Value::Int(value)
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Value::Float(value)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Value::Text(value.to_string())
	}
}

impl Display for Value {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Value::Null => f.write_str("null"),
			Value::Bool(value) => write!(f, "{}", value),
			Value::Int(value) => write!(f, "{}", value),
			Value::Float(value) => write!(f, "{}", value),
			Value::Text(value) => write!(f, "'{}'", value.replace('\'', "''")),
		}
	}
}
