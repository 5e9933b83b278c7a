use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("let", TokenKind::Let);
        map.insert("const", TokenKind::Const);
        map.insert("fun", TokenKind::Fun);
        map.insert("if", TokenKind::If);
        map.insert("then", TokenKind::Then);
        map.insert("else", TokenKind::Else);
        map.insert("in", TokenKind::In);
        map.insert("print", TokenKind::Print);
        map.insert("input", TokenKind::Input);
        map.insert("null", TokenKind::Null);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map
    };
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Number,
    String,
    Identifier,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Comma,
    Semicolon,
    Assignment, // =
    FatArrow,   // =>

    Plus,
    Dash,
    Star,
    Slash,

    Equals,    // ==
    NotEquals, // !=
    Greater,
    GreaterEquals,
    Less,
    LessEquals,

    // Reserved
    Let,
    Const,
    Fun,
    If,
    Then,
    Else,
    In,
    Print,
    Input,
    Null,
    True,
    False,
}

impl TokenKind {
    /// The fixed source text of the kind, or a description for kinds that
    /// carry a value.
    pub fn lexeme(&self) -> &'static str {
        match self {
            TokenKind::EOF => "end of input",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::Identifier => "identifier",
            TokenKind::OpenBracket => "[",
            TokenKind::CloseBracket => "]",
            TokenKind::OpenCurly => "{",
            TokenKind::CloseCurly => "}",
            TokenKind::OpenParen => "(",
            TokenKind::CloseParen => ")",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::Assignment => "=",
            TokenKind::FatArrow => "=>",
            TokenKind::Plus => "+",
            TokenKind::Dash => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Equals => "==",
            TokenKind::NotEquals => "!=",
            TokenKind::Greater => ">",
            TokenKind::GreaterEquals => ">=",
            TokenKind::Less => "<",
            TokenKind::LessEquals => "<=",
            TokenKind::Let => "let",
            TokenKind::Const => "const",
            TokenKind::Fun => "fun",
            TokenKind::If => "if",
            TokenKind::Then => "then",
            TokenKind::Else => "else",
            TokenKind::In => "in",
            TokenKind::Print => "print",
            TokenKind::Input => "input",
            TokenKind::Null => "null",
            TokenKind::True => "true",
            TokenKind::False => "false",
        }
    }

    /// Kinds whose text varies from token to token.
    pub fn has_value(&self) -> bool {
        matches!(
            self,
            TokenKind::Number | TokenKind::String | TokenKind::Identifier
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.has_value() || *self == TokenKind::EOF {
            write!(f, "{}", self.lexeme())
        } else {
            write!(f, "`{}`", self.lexeme())
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.kind.has_value() {
            write!(f, "{} ({}) at {}", self.kind, self.value, self.span.start)
        } else {
            write!(f, "{} at {}", self.kind, self.span.start)
        }
    }
}

impl Token {
    pub fn eof(span: Span) -> Self {
        Token {
            kind: TokenKind::EOF,
            value: String::new(),
            span,
        }
    }
}
