use crate::Span;

use super::tokens::{Token, TokenKind};

/// A forward-only supply of tokens for the parser.
///
/// Once the input is exhausted every method keeps returning the end-of-input
/// token; none of them may panic past the end.
pub trait TokenSource {
    /// The current, unconsumed token.
    fn peek(&self) -> &Token;

    /// The token `n` positions past the current one. `peek_nth(0)` is `peek()`.
    fn peek_nth(&self, n: usize) -> &Token;

    /// Returns the current token and moves past it.
    fn advance(&mut self) -> Token;
}

/// A [`TokenSource`] over an already lexed list of tokens.
#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: Vec<Token>,
    pos: usize,
}

impl TokenStream {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|token| token.kind) != Some(TokenKind::EOF) {
            let end = tokens
                .last()
                .map(|token| token.span.end)
                .unwrap_or_default();
            tokens.push(Token::eof(Span::new(end, end)));
        }

        TokenStream { tokens, pos: 0 }
    }

    fn get(&self, index: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[index.min(last)]
    }
}

impl From<Vec<Token>> for TokenStream {
    fn from(tokens: Vec<Token>) -> Self {
        TokenStream::new(tokens)
    }
}

impl TokenSource for TokenStream {
    fn peek(&self) -> &Token {
        self.get(self.pos)
    }

    fn peek_nth(&self, n: usize) -> &Token {
        self.get(self.pos.saturating_add(n))
    }

    fn advance(&mut self) -> Token {
        let token = self.get(self.pos).clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }
}
