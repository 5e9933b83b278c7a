//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the entry points. The
//! parser is recursive descent over a [`TokenSource`], with precedence
//! climbing for binary expressions. Every decision looks at a fixed, small
//! number of upcoming tokens and nothing is ever backtracked.
//!
//! It maintains lookup tables for:
//! - Statement handlers, keyed by the leading token
//! - NUD (null denotation) handlers for primary expressions
//! - Binding powers of the binary operators
//!
//! The tables double as the expected-token sets reported in diagnostics.

use std::collections::HashMap;

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        stream::{TokenSource, TokenStream},
        tokens::{Token, TokenKind},
    },
    Position,
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, NUDHandler, NUDLookup, StmtHandler,
        StmtLookup,
    },
    stmt::parse_stmt_after,
};

/// Default limit on how deeply blocks and expressions may nest.
pub const DEFAULT_MAX_DEPTH: usize = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Maximum nesting of blocks and expressions before the parse is
    /// rejected instead of growing the call stack further.
    pub max_depth: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        ParserOptions {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// The main parser structure that maintains parsing state.
pub struct Parser<S: TokenSource> {
    /// Where tokens come from
    source: S,
    options: ParserOptions,
    /// Current nesting of blocks and expressions
    depth: usize,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup<S>,
    /// Lookup table for null denotation (primary) expression handlers
    nud_lookup: NUDLookup<S>,
    /// Lookup table for binary operator binding powers
    binding_power_lookup: BPLookup,
}

impl<S: TokenSource> Parser<S> {
    pub fn new(source: S) -> Self {
        Parser::with_options(source, ParserOptions::default())
    }

    pub fn with_options(source: S, options: ParserOptions) -> Self {
        let mut parser = Parser {
            source,
            options,
            depth: 0,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
        };
        create_token_lookups(&mut parser);
        parser
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        self.source.peek()
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.source.peek().kind
    }

    /// Returns the kind of the token `n` positions ahead of the current one.
    pub fn peek_kind(&self, n: usize) -> TokenKind {
        self.source.peek_nth(n).kind
    }

    /// Consumes and returns the current token.
    pub fn advance(&mut self) -> Token {
        self.source.advance()
    }

    /// Consumes the current token if it is of `expected_kind`.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        if self.current_token_kind() != expected_kind {
            return Err(self.unexpected(vec![expected_kind]));
        }

        Ok(self.advance())
    }

    /// Like [`Parser::expect`], for a token that directly follows an
    /// expression, where any binary operator would also have been accepted.
    pub fn expect_after_expr(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        if self.current_token_kind() != expected_kind {
            return Err(self.unexpected(self.after_expr(&[expected_kind])));
        }

        Ok(self.advance())
    }

    /// Builds an error for the current token.
    pub fn unexpected(&self, mut expected: Vec<TokenKind>) -> Error {
        expected.sort();
        expected.dedup();

        let token = self.current_token();
        Error::new(
            ErrorImpl::UnexpectedToken {
                found: token.kind,
                text: token.value.clone(),
                expected,
            },
            token.span.start,
        )
    }

    /// `kinds` plus every binary operator.
    pub fn after_expr(&self, kinds: &[TokenKind]) -> Vec<TokenKind> {
        let mut expected = kinds.to_vec();
        expected.extend(self.binding_power_lookup.keys().copied());
        expected.sort();
        expected.dedup();
        expected
    }

    /// Whether there is anything left before the end of input.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    pub fn starts_statement(&self, kind: TokenKind) -> bool {
        self.stmt_lookup.contains_key(&kind)
    }

    pub fn starts_expression(&self, kind: TokenKind) -> bool {
        self.nud_lookup.contains_key(&kind)
    }

    /// Token kinds that can begin a statement, sorted.
    pub fn statement_starts(&self) -> Vec<TokenKind> {
        let mut kinds: Vec<TokenKind> = self.stmt_lookup.keys().copied().collect();
        kinds.sort();
        kinds
    }

    /// Token kinds that can begin an expression, sorted.
    pub fn expression_starts(&self) -> Vec<TokenKind> {
        let mut kinds: Vec<TokenKind> = self.nud_lookup.keys().copied().collect();
        kinds.sort();
        kinds
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup<S> {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup<S> {
        &self.nud_lookup
    }

    /// Returns a reference to the binding power lookup table.
    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Registers a binary operator.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower) {
        self.binding_power_lookup.insert(kind, binding_power);
    }

    /// Registers a handler for a token that can begin an expression.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler<S>) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a handler for a token that can begin a statement.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler<S>) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Runs `f` one nesting level deeper, failing instead once the
    /// configured depth is reached.
    pub fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Parser<S>) -> Result<T, Error>,
    ) -> Result<T, Error> {
        self.descend()?;
        let result = f(self);
        self.ascend(1);
        result
    }

    /// Enters one more nesting level, or fails with `NestingTooDeep` at the
    /// current token if the limit is already reached.
    pub fn descend(&mut self) -> Result<(), Error> {
        if self.depth >= self.options.max_depth {
            let token = self.current_token();
            return Err(Error::new(
                ErrorImpl::NestingTooDeep {
                    limit: self.options.max_depth,
                    found: token.kind,
                    text: token.value.clone(),
                },
                token.span.start,
            ));
        }

        self.depth += 1;
        Ok(())
    }

    /// Leaves `levels` nesting levels entered with [`Parser::descend`].
    pub fn ascend(&mut self, levels: usize) {
        self.depth = self.depth.saturating_sub(levels);
    }

    /// Returns the start position of the current token.
    pub fn get_position(&self) -> Position {
        self.current_token().span.start
    }

    /// Parses top-level statements until the end of input.
    pub fn parse_program(&mut self) -> Result<Program, Error> {
        let mut statements = vec![];

        while self.has_tokens() {
            let stmt = parse_stmt_after(self, statements.last()).inspect_err(|error| {
                tracing::debug!(%error, "parse failed");
            })?;
            tracing::debug!(
                index = statements.len(),
                line = stmt.span.start.line,
                "parsed top-level statement"
            );
            statements.push(stmt);
        }

        Ok(Program { statements })
    }
}

/// Parses a stream of tokens into a [`Program`].
///
/// This is the main entry point for parsing. The first syntax error aborts
/// the parse; no partial tree is returned.
pub fn parse(tokens: Vec<Token>) -> Result<Program, Error> {
    parse_with_options(tokens, ParserOptions::default())
}

pub fn parse_with_options(tokens: Vec<Token>, options: ParserOptions) -> Result<Program, Error> {
    let mut parser = Parser::with_options(TokenStream::new(tokens), options);
    parser.parse_program()
}
