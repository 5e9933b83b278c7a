#![allow(clippy::module_inception)]

use std::fmt::Display;

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorTip},
    lexer::lexer::tokenize,
    parser::parser::parse,
};

pub mod ast;
pub mod cli;
pub mod config;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

/// A 1-based line/column location in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::new(1, 1)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Span { start, end }
    }

    /// Smallest span covering both `self` and `other`.
    pub fn to(&self, other: &Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// Tokenizes and parses a whole source file.
pub fn parse_source(source: &str) -> Result<Program, Error> {
    let tokens = tokenize(source)?;
    parse(tokens)
}

/// Returns the text of the 1-based `line` without its line terminator.
pub fn get_line(source: &str, line: u32) -> Option<&str> {
    if line == 0 {
        return None;
    }

    source
        .split('\n')
        .nth(line as usize - 1)
        .map(|text| text.trim_end_matches('\r'))
}


/// Renders a caret-annotated report for `error`.
///
/// ```text
/// Error: UnexpectedToken (found `;`, expected one of ...)
/// -> main.bies:20:9
///    |
/// 20 | let a = ;
///    | --------^
/// ```
pub fn render_error(error: &Error, source: &str, file: &str) -> String {
    let mut report = String::new();
    let position = error.get_position();

    if let ErrorTip::None = error.get_tip() {
        report.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        report.push_str(&format!(
            "Error: {} ({})\n",
            error.get_error_name(),
            error.get_tip()
        ));
    }
    report.push_str(&format!("-> {}:{}\n", file, position));

    let line_string = position.line.to_string();
    let padding = line_string.len() + 2;
    report.push_str(&format!("{:>padding$}\n", "|"));

    let line_text = get_line(source, position.line).unwrap_or("");
    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(line_text);
    report.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let column = (position.column as usize).max(1);
    let arrows = column.saturating_sub(removed_whitespace).max(1);
    report.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));

    report
}

fn remove_starting_whitespace(string: &str) -> (&str, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += 1;
        } else {
            break;
        }
    }

    (&string[start..], start)
}
