//! Error types for the front end.
//!
//! A single positioned `Error` covers every lexing and parsing failure. It
//! carries:
//!
//! - the source position of the offending token
//! - the kind and text of the token that was found
//! - the set of token kinds that would have been accepted
//! - a short suggestion for display

pub mod errors;
