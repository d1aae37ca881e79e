// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use quarry_type::{CaseSensitivity, Fragment, Value};
use serde::{Deserialize, Serialize};

use crate::identifier::{Alias, Identifier};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
	Query(Query),
	Insert(Insert),
	Delete(Delete),
	Ddl(Ddl),
	Exec(Exec),
}

impl Statement {
	pub fn fragment(&self) -> &Fragment {
		match self {
			Statement::Query(query) => query.expr.fragment(),
			Statement::Insert(insert) => &insert.fragment,
			Statement::Delete(delete) => &delete.fragment,
			Statement::Ddl(ddl) => &ddl.fragment,
			Statement::Exec(exec) => &exec.fragment,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
	pub expr: Expr,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insert {
	pub target: Expr,
	pub value: Expr,
	pub fragment: Fragment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delete {
	pub from: FromSource,
	pub where_clause: Option<Expr>,
	pub fragment: Fragment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DdlOp {
	CreateTable,
	DropTable,
	CreateIndex,
	DropIndex,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ddl {
	pub op: DdlOp,
	pub name: Identifier,
	pub fragment: Fragment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exec {
	pub procedure: String,
	pub args: Vec<Expr>,
	pub fragment: Fragment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
	Lit(Literal),
	Missing(Fragment),
	Id(Identifier),
	Path(Path),
	Call(Call),
	Binary(Binary),
	Unary(Unary),
	Collection(Collection),
	Struct(Struct),
	Select(Box<Select>),
}

impl Expr {
	pub fn fragment(&self) -> &Fragment {
		match self {
			Expr::Lit(lit) => &lit.fragment,
			Expr::Missing(fragment) => fragment,
			Expr::Id(id) => &id.fragment,
			Expr::Path(path) => &path.fragment,
			Expr::Call(call) => &call.fragment,
			Expr::Binary(binary) => &binary.fragment,
			Expr::Unary(unary) => &unary.fragment,
			Expr::Collection(collection) => &collection.fragment,
			Expr::Struct(s) => &s.fragment,
			Expr::Select(select) => &select.fragment,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Literal {
	pub value: Value,
	pub fragment: Fragment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
	pub root: Box<Expr>,
	pub steps: Vec<PathStep>,
	pub fragment: Fragment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PathStep {
	/// `a.b` or `a."B"`
	Key {
		name: String,
		case: CaseSensitivity,
	},
	/// `a[expr]`
	Index(Expr),
	/// `a[*]`
	Wildcard,
	/// `a.*`
	Unpivot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Call {
	pub name: String,
	pub args: Vec<Expr>,
	pub fragment: Fragment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
	Add,
	Sub,
	Mul,
	Div,
	Mod,
	Concat,
	Eq,
	Ne,
	Lt,
	Le,
	Gt,
	Ge,
	And,
	Or,
	Like,
	In,
}

impl Display for BinaryOp {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let s = match self {
			BinaryOp::Add => "plus",
			BinaryOp::Sub => "minus",
			BinaryOp::Mul => "times",
			BinaryOp::Div => "divide",
			BinaryOp::Mod => "modulo",
			BinaryOp::Concat => "concat",
			BinaryOp::Eq => "eq",
			BinaryOp::Ne => "ne",
			BinaryOp::Lt => "lt",
			BinaryOp::Le => "lte",
			BinaryOp::Gt => "gt",
			BinaryOp::Ge => "gte",
			BinaryOp::And => "and",
			BinaryOp::Or => "or",
			BinaryOp::Like => "like",
			BinaryOp::In => "in",
		};
		f.write_str(s)
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Binary {
	pub op: BinaryOp,
	pub left: Box<Expr>,
	pub right: Box<Expr>,
	pub fragment: Fragment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
	Not,
	Neg,
	Pos,
}

impl Display for UnaryOp {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			UnaryOp::Not => f.write_str("not"),
			UnaryOp::Neg => f.write_str("neg"),
			UnaryOp::Pos => f.write_str("pos"),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unary {
	pub op: UnaryOp,
	pub operand: Box<Expr>,
	pub fragment: Fragment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectionKind {
	List,
	Bag,
}

impl Display for CollectionKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			CollectionKind::List => f.write_str("list"),
			CollectionKind::Bag => f.write_str("bag"),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
	pub kind: CollectionKind,
	pub values: Vec<Expr>,
	pub fragment: Fragment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Struct {
	pub fields: Vec<StructField>,
	pub fragment: Fragment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructField {
	pub key: Expr,
	pub value: Expr,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SetQuantifier {
	#[default]
	All,
	Distinct,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Select {
	pub quantifier: SetQuantifier,
	pub projection: Projection,
	pub from: Option<FromSource>,
	pub let_clause: Vec<LetBinding>,
	pub where_clause: Option<Expr>,
	pub group_by: Option<GroupBy>,
	pub having: Option<Expr>,
	pub order_by: Vec<SortSpec>,
	pub limit: Option<Expr>,
	pub offset: Option<Expr>,
	pub fragment: Fragment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Projection {
	/// `SELECT *`
	Star(Fragment),
	/// `SELECT VALUE expr`
	Value(Expr),
	/// `SELECT item, ...`
	List(Vec<ProjectItem>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProjectItem {
	/// `expr.*`
	All {
		expr: Expr,
		fragment: Fragment,
	},
	/// `expr [AS alias]`
	Expr {
		expr: Expr,
		alias: Option<Alias>,
	},
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FromSource {
	Scan(ScanSource),
	Unpivot(ScanSource),
	Join(Join),
}

impl FromSource {
	pub fn fragment(&self) -> &Fragment {
		match self {
			FromSource::Scan(scan) | FromSource::Unpivot(scan) => &scan.fragment,
			FromSource::Join(join) => &join.fragment,
		}
	}
}

/// `expr [AS a] [AT b] [BY c]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanSource {
	pub expr: Expr,
	pub as_alias: Option<Alias>,
	pub at_alias: Option<Alias>,
	pub by_alias: Option<Alias>,
	pub fragment: Fragment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JoinKind {
	Inner,
	Left,
	Right,
	Full,
}

impl Display for JoinKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			JoinKind::Inner => f.write_str("inner"),
			JoinKind::Left => f.write_str("left"),
			JoinKind::Right => f.write_str("right"),
			JoinKind::Full => f.write_str("full"),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Join {
	pub kind: JoinKind,
	pub left: Box<FromSource>,
	pub right: Box<FromSource>,
	pub predicate: Option<Expr>,
	pub fragment: Fragment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LetBinding {
	pub expr: Expr,
	pub name: Alias,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupBy {
	pub keys: Vec<GroupKey>,
	pub group_as: Option<Alias>,
	pub fragment: Fragment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupKey {
	pub expr: Expr,
	pub alias: Option<Alias>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
	#[default]
	Asc,
	Desc,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortSpec {
	pub expr: Expr,
	pub direction: SortDirection,
}
