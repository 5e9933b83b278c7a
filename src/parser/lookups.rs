use std::collections::HashMap;

use crate::{
    ast::{expressions::Expr, statements::Stmt},
    errors::errors::Error,
    lexer::{stream::TokenSource, tokens::TokenKind},
};

use super::{expr::*, parser::Parser, stmt::*};

/// Operator binding strength, loosest first.
///
/// Addition and subtraction bind tighter than multiplication and division:
/// `1 + 2 * 3` groups as `(1 + 2) * 3`.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    Comparison,
    Multiplicative,
    Additive,
    Primary,
}

impl BindingPower {
    /// The level directly above `self`, used for right operands so that
    /// operators of equal strength associate to the left.
    pub fn next(self) -> BindingPower {
        match self {
            BindingPower::Default => BindingPower::Comparison,
            BindingPower::Comparison => BindingPower::Multiplicative,
            BindingPower::Multiplicative => BindingPower::Additive,
            BindingPower::Additive | BindingPower::Primary => BindingPower::Primary,
        }
    }
}

pub type StmtHandler<S> = fn(&mut Parser<S>) -> Result<Stmt, Error>;
pub type NUDHandler<S> = fn(&mut Parser<S>) -> Result<Expr, Error>;

pub fn create_token_lookups<S: TokenSource>(parser: &mut Parser<S>) {
    // Comparison
    parser.led(TokenKind::Equals, BindingPower::Comparison);
    parser.led(TokenKind::NotEquals, BindingPower::Comparison);
    parser.led(TokenKind::Greater, BindingPower::Comparison);
    parser.led(TokenKind::GreaterEquals, BindingPower::Comparison);
    parser.led(TokenKind::Less, BindingPower::Comparison);
    parser.led(TokenKind::LessEquals, BindingPower::Comparison);

    // Multiplicative and additive
    parser.led(TokenKind::Star, BindingPower::Multiplicative);
    parser.led(TokenKind::Slash, BindingPower::Multiplicative);
    parser.led(TokenKind::Plus, BindingPower::Additive);
    parser.led(TokenKind::Dash, BindingPower::Additive);

    // Literals and symbols
    parser.nud(TokenKind::Number, parse_number_expr);
    parser.nud(TokenKind::String, parse_primary_expr);
    parser.nud(TokenKind::True, parse_primary_expr);
    parser.nud(TokenKind::False, parse_primary_expr);
    parser.nud(TokenKind::Null, parse_primary_expr);
    parser.nud(TokenKind::Identifier, parse_primary_expr);
    parser.nud(TokenKind::Input, parse_input_expr);
    parser.nud(TokenKind::OpenBracket, parse_list_expr);
    parser.nud(TokenKind::OpenParen, parse_grouping_or_lambda_expr);

    // Statements
    parser.stmt(TokenKind::Let, parse_let_stmt);
    parser.stmt(TokenKind::Const, parse_var_decl_stmt);
    parser.stmt(TokenKind::Fun, parse_fn_decl_stmt);
    parser.stmt(TokenKind::If, parse_if_stmt);
    parser.stmt(TokenKind::Print, parse_print_stmt);
    parser.stmt(TokenKind::OpenCurly, parse_block_stmt);
    parser.stmt(TokenKind::Identifier, parse_call_stmt);
}

// Lookup tables inside parser struct, so it's easier
pub type StmtLookup<S> = HashMap<TokenKind, StmtHandler<S>>;
pub type NUDLookup<S> = HashMap<TokenKind, NUDHandler<S>>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;
