//! MDX generation module.
//!
//! This module provides the parse tree for MDX statements and its serializer:
//!
//! - [`expr`] - Expression AST and constructor functions
//! - [`select`] - SELECT statement, named sets and axis clauses
//! - [`name`] - Compound names and member/level/cube references
//! - [`token`] - Token types for MDX generation

pub mod expr;
pub mod name;
pub mod select;
pub mod token;

pub use expr::{
    call, empty_set, func, ident, infix, lit_float, lit_int, lit_str, method, prefix, property,
    set, symbol, tuple, Expr, Literal, Syntax,
};
pub use name::{CubeRef, LevelRef, MemberRef, Name, Segment};
pub use select::{AxisClause, AxisLocation, SelectStatement, WithSet};
pub use token::{Token, TokenStream};
