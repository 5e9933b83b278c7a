//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a [`TokenSource`] into a
//! [`Program`]. Statements are parsed by recursive descent, dispatching on
//! the leading token; binary expressions use precedence climbing. It handles:
//!
//! - Declarations, function declarations, conditionals and `let ... in`
//! - `print` and call statements, nested blocks
//! - Literals, lists, lambdas, `input(...)` and binary operators
//! - Precise diagnostics carrying the expected token kinds
//!
//! [`TokenSource`]: crate::lexer::stream::TokenSource
//! [`Program`]: crate::ast::ast::Program

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;

#[cfg(test)]
mod tests;
