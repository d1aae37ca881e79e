// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::Serialize;

use crate::ir::{Expr, Phase};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(bound = "")]
pub enum Statement<P: Phase> {
	Query {
		expr: Expr<P>,
	},
}

impl<P: Phase> Statement<P> {
	pub fn query(expr: Expr<P>) -> Self {
		Statement::Query {
			expr,
		}
	}
}

impl<P: Phase> Display for Statement<P> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Statement::Query {
				expr,
			} => write!(f, "query({})", expr),
		}
	}
}
