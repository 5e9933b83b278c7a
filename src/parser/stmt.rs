use crate::{
    ast::{
        ast::{Block, Identifier},
        expressions::Expr,
        statements::{Declaration, Mutability, Stmt, StmtKind},
    },
    errors::errors::Error,
    lexer::{stream::TokenSource, tokens::TokenKind},
    parser::{expr::parse_expr, lookups::BindingPower},
    Span,
};

use super::parser::Parser;

pub fn parse_stmt<S: TokenSource>(parser: &mut Parser<S>) -> Result<Stmt, Error> {
    parse_stmt_after(parser, None)
}

/// Parses the statement following `previous`. When none can start here the
/// error also lists the operators that could have continued `previous`.
pub fn parse_stmt_after<S: TokenSource>(
    parser: &mut Parser<S>,
    previous: Option<&Stmt>,
) -> Result<Stmt, Error> {
    let kind = parser.current_token_kind();
    match parser.get_stmt_lookup().get(&kind).copied() {
        Some(handler) => handler(parser),
        None => Err(parser.unexpected(expected_after_stmt(parser, previous, &[]))),
    }
}

/// `kinds` plus the statement starts, plus every binary operator when
/// `previous` ends in an expression.
pub fn expected_after_stmt<S: TokenSource>(
    parser: &Parser<S>,
    previous: Option<&Stmt>,
    kinds: &[TokenKind],
) -> Vec<TokenKind> {
    let mut expected = parser.statement_starts();
    expected.extend_from_slice(kinds);

    match previous.map(|stmt| &stmt.kind) {
        Some(StmtKind::Declaration(_)) => parser.after_expr(&expected),
        _ => expected,
    }
}

/// `let` opens either a declaration or a `let { ... } in { ... }` form; the
/// token right after the keyword decides which.
pub fn parse_let_stmt<S: TokenSource>(parser: &mut Parser<S>) -> Result<Stmt, Error> {
    if parser.peek_kind(1) == TokenKind::OpenCurly {
        parse_let_in_stmt(parser)
    } else {
        parse_var_decl_stmt(parser)
    }
}

pub fn parse_var_decl_stmt<S: TokenSource>(parser: &mut Parser<S>) -> Result<Stmt, Error> {
    let declaration = parse_declaration(parser)?;
    let span = declaration.span;

    Ok(Stmt::new(StmtKind::Declaration(declaration), span))
}

pub fn parse_declaration<S: TokenSource>(parser: &mut Parser<S>) -> Result<Declaration, Error> {
    let mutability = match parser.current_token_kind() {
        TokenKind::Let => Mutability::Let,
        TokenKind::Const => Mutability::Const,
        _ => return Err(parser.unexpected(vec![TokenKind::Let, TokenKind::Const])),
    };
    let start = parser.advance().span;

    let name = Identifier::from_token(&parser.expect(TokenKind::Identifier)?);
    parser.expect(TokenKind::Assignment)?;
    let value = parse_expr(parser, BindingPower::Default)?;

    Ok(Declaration {
        span: start.to(&value.span),
        mutability,
        name,
        value,
    })
}

pub fn parse_let_in_stmt<S: TokenSource>(parser: &mut Parser<S>) -> Result<Stmt, Error> {
    let start = parser.expect(TokenKind::Let)?.span;
    parser.expect(TokenKind::OpenCurly)?;

    let mut declarations = Vec::new();
    loop {
        match parser.current_token_kind() {
            TokenKind::Let | TokenKind::Const => declarations.push(parse_declaration(parser)?),
            TokenKind::CloseCurly => break,
            _ => {
                let mut expected = vec![TokenKind::Let, TokenKind::Const, TokenKind::CloseCurly];
                if !declarations.is_empty() {
                    expected = parser.after_expr(&expected);
                }
                return Err(parser.unexpected(expected));
            }
        }
    }
    parser.expect(TokenKind::CloseCurly)?;

    parser.expect(TokenKind::In)?;
    let body = parse_block(parser)?;
    let span = start.to(&body.span);

    Ok(Stmt::new(StmtKind::LetIn { declarations, body }, span))
}

pub fn parse_fn_decl_stmt<S: TokenSource>(parser: &mut Parser<S>) -> Result<Stmt, Error> {
    let start = parser.expect(TokenKind::Fun)?.span;

    let name = Identifier::from_token(&parser.expect(TokenKind::Identifier)?);
    let params = parse_params(parser)?;
    parser.expect(TokenKind::FatArrow)?;
    let body = parse_block(parser)?;
    let span = start.to(&body.span);

    Ok(Stmt::new(StmtKind::FunctionDecl { name, params, body }, span))
}

/// `(` comma-separated identifiers `)`, possibly empty.
pub fn parse_params<S: TokenSource>(parser: &mut Parser<S>) -> Result<Vec<Identifier>, Error> {
    parser.expect(TokenKind::OpenParen)?;

    let mut params = Vec::new();
    if parser.current_token_kind() == TokenKind::CloseParen {
        parser.advance();
        return Ok(params);
    }

    loop {
        if parser.current_token_kind() != TokenKind::Identifier {
            let mut expected = vec![TokenKind::Identifier];
            if params.is_empty() {
                expected.push(TokenKind::CloseParen);
            }
            return Err(parser.unexpected(expected));
        }
        params.push(Identifier::from_token(&parser.advance()));

        match parser.current_token_kind() {
            TokenKind::Comma => {
                parser.advance();
            }
            TokenKind::CloseParen => {
                parser.advance();
                return Ok(params);
            }
            _ => return Err(parser.unexpected(vec![TokenKind::Comma, TokenKind::CloseParen])),
        }
    }
}

pub fn parse_if_stmt<S: TokenSource>(parser: &mut Parser<S>) -> Result<Stmt, Error> {
    let start = parser.expect(TokenKind::If)?.span;

    parser.expect(TokenKind::OpenParen)?;
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect_after_expr(TokenKind::CloseParen)?;

    parser.expect(TokenKind::Then)?;
    let then_branch = parse_block(parser)?;

    // There is no else-less form.
    parser.expect(TokenKind::Else)?;
    let else_branch = parse_block(parser)?;
    let span = start.to(&else_branch.span);

    Ok(Stmt::new(
        StmtKind::Conditional {
            condition,
            then_branch,
            else_branch,
        },
        span,
    ))
}

/// `print(a b c)`: one or more expressions with nothing between them. An
/// argument ends wherever the next token cannot start an expression.
pub fn parse_print_stmt<S: TokenSource>(parser: &mut Parser<S>) -> Result<Stmt, Error> {
    let start = parser.expect(TokenKind::Print)?.span;
    parser.expect(TokenKind::OpenParen)?;

    let mut arguments = vec![parse_expr(parser, BindingPower::Default)?];
    while parser.starts_expression(parser.current_token_kind()) {
        arguments.push(parse_expr(parser, BindingPower::Default)?);
    }

    if parser.current_token_kind() != TokenKind::CloseParen {
        let mut expected = parser.expression_starts();
        expected.push(TokenKind::CloseParen);
        return Err(parser.unexpected(parser.after_expr(&expected)));
    }
    let end = parser.advance().span;

    Ok(Stmt::new(StmtKind::Print { arguments }, start.to(&end)))
}

pub fn parse_call_stmt<S: TokenSource>(parser: &mut Parser<S>) -> Result<Stmt, Error> {
    let callee_token = parser.expect(TokenKind::Identifier)?;
    let callee = Identifier::from_token(&callee_token);

    parser.expect(TokenKind::OpenParen)?;
    let (arguments, end) = parse_arguments(parser, TokenKind::CloseParen)?;

    Ok(Stmt::new(
        StmtKind::Call { callee, arguments },
        callee_token.span.to(&end),
    ))
}

/// Comma-separated, possibly empty expressions up to and including `close`.
/// Returns the expressions and the span of the closing token.
pub fn parse_arguments<S: TokenSource>(
    parser: &mut Parser<S>,
    close: TokenKind,
) -> Result<(Vec<Expr>, Span), Error> {
    let mut arguments = Vec::new();
    if parser.current_token_kind() == close {
        return Ok((arguments, parser.advance().span));
    }

    loop {
        arguments.push(parse_expr(parser, BindingPower::Default)?);

        match parser.current_token_kind() {
            TokenKind::Comma => {
                parser.advance();
            }
            kind if kind == close => return Ok((arguments, parser.advance().span)),
            _ => return Err(parser.unexpected(parser.after_expr(&[TokenKind::Comma, close]))),
        }
    }
}

pub fn parse_block_stmt<S: TokenSource>(parser: &mut Parser<S>) -> Result<Stmt, Error> {
    let block = parse_block(parser)?;
    let span = block.span;

    Ok(Stmt::new(StmtKind::Block(block), span))
}

/// `{` statements `}`. Statements are read for as long as the current token
/// can begin one.
pub fn parse_block<S: TokenSource>(parser: &mut Parser<S>) -> Result<Block, Error> {
    parser.nested(|parser| {
        let start = parser.expect(TokenKind::OpenCurly)?.span;

        let mut statements = Vec::new();
        while parser.starts_statement(parser.current_token_kind()) {
            statements.push(parse_stmt(parser)?);
        }

        if parser.current_token_kind() != TokenKind::CloseCurly {
            let expected =
                expected_after_stmt(parser, statements.last(), &[TokenKind::CloseCurly]);
            return Err(parser.unexpected(expected));
        }
        let end = parser.advance().span;

        Ok(Block {
            statements,
            span: start.to(&end),
        })
    })
}
