use std::fmt::Display;

use thiserror::Error;

use crate::{lexer::tokens::TokenKind, Position};

/// A positioned syntax error.
///
/// Every failure of the lexer or parser is reported through this type. The
/// first error aborts the parse, so a caller only ever sees one.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{internal_error} at {position}")]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    /// The kind of the offending token, when the error was raised on one.
    pub fn found(&self) -> Option<TokenKind> {
        match &self.internal_error {
            ErrorImpl::UnexpectedToken { found, .. }
            | ErrorImpl::MissingOperand { found, .. }
            | ErrorImpl::NestingTooDeep { found, .. } => Some(*found),
            ErrorImpl::NumberParseError { .. } => Some(TokenKind::Number),
            ErrorImpl::UnrecognisedToken { .. } => None,
        }
    }

    /// The token kinds that would have been accepted where the error occurred.
    pub fn expected(&self) -> &[TokenKind] {
        match &self.internal_error {
            ErrorImpl::UnexpectedToken { expected, .. }
            | ErrorImpl::MissingOperand { expected, .. } => expected,
            _ => &[],
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::MissingOperand { .. } => "MissingOperand",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::NestingTooDeep { .. } => "NestingTooDeep",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken {
                found,
                text,
                expected,
            } => ErrorTip::Suggestion(format!(
                "found {}, expected {}",
                describe_found(*found, text),
                describe_expected(expected)
            )),
            ErrorImpl::MissingOperand {
                operator,
                found,
                text,
                ..
            } => ErrorTip::Suggestion(format!(
                "`{}` needs a right operand, found {}",
                operator.lexeme(),
                describe_found(*found, text)
            )),
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it out of range?",
                token
            )),
            ErrorImpl::NestingTooDeep { limit, .. } => ErrorTip::Suggestion(format!(
                "Blocks and expressions may nest at most {} levels deep",
                limit
            )),
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token {found} ({text:?}), expected {}", describe_expected(.expected))]
    UnexpectedToken {
        found: TokenKind,
        text: String,
        expected: Vec<TokenKind>,
    },
    #[error("missing right operand for {operator}, found {found} ({text:?})")]
    MissingOperand {
        operator: TokenKind,
        found: TokenKind,
        text: String,
        expected: Vec<TokenKind>,
    },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("nesting exceeds {limit} levels at {found} ({text:?})")]
    NestingTooDeep {
        limit: usize,
        found: TokenKind,
        text: String,
    },
}

fn describe_found(kind: TokenKind, text: &str) -> String {
    match kind {
        TokenKind::Identifier | TokenKind::Number => format!("{} `{}`", kind, text),
        TokenKind::String => format!("string {:?}", text),
        _ => kind.to_string(),
    }
}

fn describe_expected(expected: &[TokenKind]) -> String {
    match expected {
        [] => String::from("nothing"),
        [only] => only.to_string(),
        many => format!(
            "one of {}",
            many.iter()
                .map(|kind| kind.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}
