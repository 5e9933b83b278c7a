use crate::{
    ast::{
        ast::Identifier,
        expressions::{BinaryOperator, Expr, ExprKind},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::{stream::TokenSource, tokens::TokenKind},
};

use super::{
    lookups::BindingPower,
    parser::Parser,
    stmt::{parse_arguments, parse_block, parse_params},
};

/// Precedence climbing: a primary expression followed by every binary
/// operator at least as strong as `bp`.
pub fn parse_expr<S: TokenSource>(parser: &mut Parser<S>, bp: BindingPower) -> Result<Expr, Error> {
    parser.nested(|parser| {
        let left = parse_primary(parser)?;

        let mut folded = 0;
        let result = fold_binary_chain(parser, left, bp, &mut folded);
        parser.ascend(folded);
        result
    })
}

/// Every folded operator puts the chain so far one level deeper in the
/// tree, so it counts against the nesting limit.
fn fold_binary_chain<S: TokenSource>(
    parser: &mut Parser<S>,
    mut left: Expr,
    bp: BindingPower,
    folded: &mut usize,
) -> Result<Expr, Error> {
    loop {
        let operator_bp = match parser.get_bp_lookup().get(&parser.current_token_kind()) {
            Some(operator_bp) if *operator_bp >= bp => *operator_bp,
            _ => return Ok(left),
        };

        parser.descend()?;
        *folded += 1;
        left = parse_binary_expr(parser, left, operator_bp)?;
    }
}

fn parse_primary<S: TokenSource>(parser: &mut Parser<S>) -> Result<Expr, Error> {
    let kind = parser.current_token_kind();
    match parser.get_nud_lookup().get(&kind).copied() {
        Some(handler) => handler(parser),
        None => Err(parser.unexpected(parser.expression_starts())),
    }
}

pub fn parse_binary_expr<S: TokenSource>(
    parser: &mut Parser<S>,
    left: Expr,
    bp: BindingPower,
) -> Result<Expr, Error> {
    let operator_token = parser.advance();
    let operator = match BinaryOperator::from_token_kind(operator_token.kind) {
        Some(operator) => operator,
        None => return Err(parser.unexpected(parser.after_expr(&[]))),
    };

    if !parser.starts_expression(parser.current_token_kind()) {
        let found = parser.current_token();
        return Err(Error::new(
            ErrorImpl::MissingOperand {
                operator: operator_token.kind,
                found: found.kind,
                text: found.value.clone(),
                expected: parser.expression_starts(),
            },
            found.span.start,
        ));
    }

    let right = parse_expr(parser, bp.next())?;

    Ok(Expr::binary(operator, left, right))
}

pub fn parse_number_expr<S: TokenSource>(parser: &mut Parser<S>) -> Result<Expr, Error> {
    let token = parser.current_token();
    let value = match token.value.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => {
            return Err(Error::new(
                ErrorImpl::NumberParseError {
                    token: token.value.clone(),
                },
                token.span.start,
            ))
        }
    };

    let token = parser.advance();
    Ok(Expr::new(ExprKind::Number(value), token.span))
}

/// Single-token literals and variable references.
pub fn parse_primary_expr<S: TokenSource>(parser: &mut Parser<S>) -> Result<Expr, Error> {
    let kind = match parser.current_token_kind() {
        TokenKind::String => ExprKind::String(parser.current_token().value.clone()),
        TokenKind::True => ExprKind::Bool(true),
        TokenKind::False => ExprKind::Bool(false),
        TokenKind::Null => ExprKind::Null,
        TokenKind::Identifier => ExprKind::Variable(Identifier::from_token(parser.current_token())),
        _ => return Err(parser.unexpected(parser.expression_starts())),
    };

    let token = parser.advance();
    Ok(Expr::new(kind, token.span))
}

/// `input("prompt")`
pub fn parse_input_expr<S: TokenSource>(parser: &mut Parser<S>) -> Result<Expr, Error> {
    let start = parser.expect(TokenKind::Input)?.span;
    parser.expect(TokenKind::OpenParen)?;
    let prompt = parser.expect(TokenKind::String)?.value;
    let end = parser.expect(TokenKind::CloseParen)?.span;

    Ok(Expr::new(ExprKind::Input { prompt }, start.to(&end)))
}

pub fn parse_list_expr<S: TokenSource>(parser: &mut Parser<S>) -> Result<Expr, Error> {
    let start = parser.expect(TokenKind::OpenBracket)?.span;
    let (items, end) = parse_arguments(parser, TokenKind::CloseBracket)?;

    Ok(Expr::new(ExprKind::List(items), start.to(&end)))
}

/// `(` opens either a lambda or a parenthesized expression. Decided by
/// looking at most three tokens past it:
///
/// - `( )` is a lambda without parameters
/// - `( name ,` is a lambda
/// - `( name ) =>` is a lambda
/// - anything else is a parenthesized expression
pub fn parse_grouping_or_lambda_expr<S: TokenSource>(
    parser: &mut Parser<S>,
) -> Result<Expr, Error> {
    let is_lambda = match (parser.peek_kind(1), parser.peek_kind(2)) {
        (TokenKind::CloseParen, _) => true,
        (TokenKind::Identifier, TokenKind::Comma) => true,
        (TokenKind::Identifier, TokenKind::CloseParen) => {
            parser.peek_kind(3) == TokenKind::FatArrow
        }
        _ => false,
    };

    if is_lambda {
        parse_lambda_expr(parser)
    } else {
        parse_grouping_expr(parser)
    }
}

pub fn parse_lambda_expr<S: TokenSource>(parser: &mut Parser<S>) -> Result<Expr, Error> {
    let start = parser.get_position();
    let params = parse_params(parser)?;
    parser.expect(TokenKind::FatArrow)?;
    let body = parse_block(parser)?;

    let mut span = body.span;
    span.start = start;

    Ok(Expr::new(ExprKind::Lambda { params, body }, span))
}

pub fn parse_grouping_expr<S: TokenSource>(parser: &mut Parser<S>) -> Result<Expr, Error> {
    let start = parser.expect(TokenKind::OpenParen)?.span;
    let inner = parse_expr(parser, BindingPower::Default)?;
    let end = parser.expect_after_expr(TokenKind::CloseParen)?.span;

    Ok(Expr::new(
        ExprKind::Grouping(Box::new(inner)),
        start.to(&end),
    ))
}
