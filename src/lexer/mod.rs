//! Lexical analysis.
//!
//! The parser only ever sees a [`stream::TokenSource`]. This module provides
//! the one the crate ships with:
//!
//! - Tokenization of source text using anchored regex patterns
//! - Recognition of keywords, identifiers, numbers, strings and operators
//! - Line/column tracking for diagnostics
//! - Skipping of whitespace, line comments and block comments

pub mod lexer;
pub mod stream;
pub mod tokens;
