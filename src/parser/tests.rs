//! Unit tests for the parser module.
//!
//! This module contains tests for parsing the language constructs:
//! - Declarations and `let ... in`
//! - Function declarations, lambdas and call statements
//! - Conditionals and blocks
//! - `print` with juxtaposed arguments
//! - Operator precedence and associativity
//! - Diagnostics and nesting limits

use crate::{
    ast::{
        ast::{Block, Identifier, Program},
        expressions::{BinaryOperator, Expr, ExprKind},
        statements::{Declaration, Mutability, StmtKind},
    },
    errors::errors::Error,
    lexer::{lexer::tokenize, stream::TokenStream, tokens::TokenKind},
    Position, Span,
};

use super::parser::{parse, parse_with_options, Parser, ParserOptions};

fn parse_ok(source: &str) -> Program {
    let tokens = tokenize(source).unwrap();
    match parse(tokens) {
        Ok(program) => program,
        Err(error) => panic!("{:?} failed to parse: {}", source, error),
    }
}

fn parse_err(source: &str) -> Error {
    let tokens = tokenize(source).unwrap();
    parse(tokens).expect_err("expected a syntax error")
}

/// The value of the single `let v = ...` declaration in `source`.
fn value_of(source: &str) -> Expr {
    let program = parse_ok(source);
    assert_eq!(program.len(), 1);
    match &program.statements[0].kind {
        StmtKind::Declaration(declaration) => declaration.value.clone(),
        other => panic!("expected a declaration, found {:?}", other),
    }
}

fn num(value: f64) -> Expr {
    ExprKind::Number(value).into()
}

fn var(name: &str) -> Expr {
    ExprKind::Variable(Identifier::from(name)).into()
}

fn bin(operator: BinaryOperator, left: Expr, right: Expr) -> Expr {
    Expr::binary(operator, left, right)
}

fn grouped(inner: Expr) -> Expr {
    ExprKind::Grouping(Box::new(inner)).into()
}

fn block(statements: Vec<StmtKind>) -> Block {
    Block {
        statements: statements.into_iter().map(Into::into).collect(),
        span: Span::default(),
    }
}

#[test]
fn test_parse_variable_declaration() {
    let program = parse_ok("let x = 42");

    assert_eq!(
        program.statements[0].kind,
        StmtKind::Declaration(Declaration {
            mutability: Mutability::Let,
            name: Identifier::from("x"),
            value: num(42.0),
            span: Span::default(),
        })
    );
}

#[test]
fn test_parse_const_declaration() {
    let program = parse_ok("const PI = 3.14");

    match &program.statements[0].kind {
        StmtKind::Declaration(declaration) => {
            assert_eq!(declaration.mutability, Mutability::Const);
            assert_eq!(declaration.name.as_str(), "PI");
            assert_eq!(declaration.value, num(3.14));
        }
        other => panic!("expected a declaration, found {:?}", other),
    }
}

#[test]
fn test_parse_literals() {
    assert_eq!(value_of("let v = \"hi\""), ExprKind::String("hi".to_string()).into());
    assert_eq!(value_of("let v = true"), ExprKind::Bool(true).into());
    assert_eq!(value_of("let v = false"), ExprKind::Bool(false).into());
    assert_eq!(value_of("let v = null"), ExprKind::Null.into());
    assert_eq!(value_of("let v = 6.02e23"), num(6.02e23));
    assert_eq!(value_of("let v = other"), var("other"));
}

#[test]
fn test_parse_input_expression() {
    assert_eq!(
        value_of("let name = input(\"Who are you?\")"),
        ExprKind::Input {
            prompt: "Who are you?".to_string()
        }
        .into()
    );
}

#[test]
fn test_input_requires_string_prompt() {
    let error = parse_err("let n = input(42)");

    assert_eq!(error.found(), Some(TokenKind::Number));
    assert_eq!(error.expected(), &[TokenKind::String]);
}

#[test]
fn test_parse_list_literal() {
    assert_eq!(value_of("let l = []"), ExprKind::List(vec![]).into());
    assert_eq!(
        value_of("let l = [1, x, [2]]"),
        ExprKind::List(vec![num(1.0), var("x"), ExprKind::List(vec![num(2.0)]).into()]).into()
    );
}

#[test]
fn test_additive_binds_tighter_than_multiplicative() {
    assert_eq!(
        value_of("let r = 1 + 2 * 3"),
        bin(
            BinaryOperator::Multiply,
            bin(BinaryOperator::Add, num(1.0), num(2.0)),
            num(3.0)
        )
    );

    assert_eq!(
        value_of("let r = 1 * 2 + 3"),
        bin(
            BinaryOperator::Multiply,
            num(1.0),
            bin(BinaryOperator::Add, num(2.0), num(3.0))
        )
    );
}

#[test]
fn test_comparison_is_loosest() {
    assert_eq!(
        value_of("let r = 1 + 2 == 3 * 1"),
        bin(
            BinaryOperator::Equal,
            bin(BinaryOperator::Add, num(1.0), num(2.0)),
            bin(BinaryOperator::Multiply, num(3.0), num(1.0))
        )
    );
}

#[test]
fn test_operators_associate_left() {
    assert_eq!(
        value_of("let r = 10 - 4 - 3"),
        bin(
            BinaryOperator::Subtract,
            bin(BinaryOperator::Subtract, num(10.0), num(4.0)),
            num(3.0)
        )
    );

    assert_eq!(
        value_of("let r = 8 / 4 * 2"),
        bin(
            BinaryOperator::Multiply,
            bin(BinaryOperator::Divide, num(8.0), num(4.0)),
            num(2.0)
        )
    );

    assert_eq!(
        value_of("let r = a < b != c"),
        bin(
            BinaryOperator::NotEqual,
            bin(BinaryOperator::Less, var("a"), var("b")),
            var("c")
        )
    );
}

#[test]
fn test_parentheses_override_precedence() {
    assert_eq!(
        value_of("let r = (1 * 2) + 3"),
        bin(
            BinaryOperator::Add,
            grouped(bin(BinaryOperator::Multiply, num(1.0), num(2.0))),
            num(3.0)
        )
    );
}

#[test]
fn test_all_comparison_operators() {
    let cases = [
        ("==", BinaryOperator::Equal),
        ("!=", BinaryOperator::NotEqual),
        (">", BinaryOperator::Greater),
        (">=", BinaryOperator::GreaterEqual),
        ("<", BinaryOperator::Less),
        ("<=", BinaryOperator::LessEqual),
    ];

    for (symbol, operator) in cases {
        let source = format!("let r = a {} b", symbol);
        assert_eq!(value_of(&source), bin(operator, var("a"), var("b")));
    }
}

#[test]
fn test_missing_right_operand() {
    let error = parse_err("let x = 1 +");

    assert_eq!(error.get_error_name(), "MissingOperand");
    assert_eq!(error.found(), Some(TokenKind::EOF));
    assert!(error.expected().contains(&TokenKind::Number));
}

#[test]
fn test_parse_print_without_commas() {
    let program = parse_ok("print(1 2 3)");

    assert_eq!(
        program.statements[0].kind,
        StmtKind::Print {
            arguments: vec![num(1.0), num(2.0), num(3.0)]
        }
    );
}

#[test]
fn test_print_argument_ends_where_expression_ends() {
    let program = parse_ok("print(\"sum\" a + b [1] (c))");

    assert_eq!(
        program.statements[0].kind,
        StmtKind::Print {
            arguments: vec![
                ExprKind::String("sum".to_string()).into(),
                bin(BinaryOperator::Add, var("a"), var("b")),
                ExprKind::List(vec![num(1.0)]).into(),
                grouped(var("c")),
            ]
        }
    );
}

#[test]
fn test_print_rejects_commas() {
    let error = parse_err("print(1, 2)");

    assert_eq!(error.get_error_name(), "UnexpectedToken");
    assert_eq!(error.found(), Some(TokenKind::Comma));
    assert_eq!(*error.get_position(), Position::new(1, 8));
    assert!(error.expected().contains(&TokenKind::CloseParen));
    assert!(!error.expected().contains(&TokenKind::Comma));
}

#[test]
fn test_print_needs_an_argument() {
    let error = parse_err("print()");

    assert_eq!(error.found(), Some(TokenKind::CloseParen));
    assert!(error.expected().contains(&TokenKind::Number));
}

#[test]
fn test_parse_empty_block() {
    let program = parse_ok("{}");

    assert_eq!(program.statements[0].kind, StmtKind::Block(block(vec![])));
}

#[test]
fn test_parse_nested_blocks() {
    let program = parse_ok("{ let x = 10 { print(x) } {} }");

    match &program.statements[0].kind {
        StmtKind::Block(outer) => {
            assert_eq!(outer.statements.len(), 3);
            assert!(matches!(outer.statements[1].kind, StmtKind::Block(_)));
        }
        other => panic!("expected a block, found {:?}", other),
    }
}

#[test]
fn test_block_missing_close() {
    let error = parse_err("{ print(1)");

    assert_eq!(error.found(), Some(TokenKind::EOF));
    assert!(error.expected().contains(&TokenKind::CloseCurly));
    assert!(error.expected().contains(&TokenKind::Print));
}

#[test]
fn test_parse_function_declaration() {
    let program = parse_ok("fun add(a, b) => { print(a + b) }");

    assert_eq!(
        program.statements[0].kind,
        StmtKind::FunctionDecl {
            name: Identifier::from("add"),
            params: vec![Identifier::from("a"), Identifier::from("b")],
            body: block(vec![StmtKind::Print {
                arguments: vec![bin(BinaryOperator::Add, var("a"), var("b"))]
            }]),
        }
    );
}

#[test]
fn test_parse_function_without_params() {
    let program = parse_ok("fun f () => {}");

    assert_eq!(
        program.statements[0].kind,
        StmtKind::FunctionDecl {
            name: Identifier::from("f"),
            params: vec![],
            body: block(vec![]),
        }
    );
}

#[test]
fn test_function_params_must_be_identifiers() {
    let error = parse_err("fun f(a, 1) => {}");

    assert_eq!(error.found(), Some(TokenKind::Number));
    assert_eq!(error.expected(), &[TokenKind::Identifier]);

    let error = parse_err("fun f(a b) => {}");
    assert_eq!(error.expected(), &[TokenKind::CloseParen, TokenKind::Comma]);
}

#[test]
fn test_function_requires_arrow() {
    let error = parse_err("fun f() {}");

    assert_eq!(error.found(), Some(TokenKind::OpenCurly));
    assert_eq!(error.expected(), &[TokenKind::FatArrow]);
}

#[test]
fn test_parse_conditional() {
    let program = parse_ok("if (x > 1) then { print(x) } else { }");

    assert_eq!(
        program.statements[0].kind,
        StmtKind::Conditional {
            condition: bin(BinaryOperator::Greater, var("x"), num(1.0)),
            then_branch: block(vec![StmtKind::Print {
                arguments: vec![var("x")]
            }]),
            else_branch: block(vec![]),
        }
    );
}

#[test]
fn test_conditional_requires_else() {
    let error = parse_err("if (true) then { } ");

    assert_eq!(error.get_error_name(), "UnexpectedToken");
    assert_eq!(error.found(), Some(TokenKind::EOF));
    assert_eq!(error.expected(), &[TokenKind::Else]);
}

#[test]
fn test_conditional_requires_then() {
    let error = parse_err("if (true) { } else { }");

    assert_eq!(error.found(), Some(TokenKind::OpenCurly));
    assert_eq!(error.expected(), &[TokenKind::Then]);
}

#[test]
fn test_parse_let_in() {
    let program = parse_ok("let { let a = 1 const b = 2 } in { print(a b) }");

    assert_eq!(
        program.statements[0].kind,
        StmtKind::LetIn {
            declarations: vec![
                Declaration {
                    mutability: Mutability::Let,
                    name: Identifier::from("a"),
                    value: num(1.0),
                    span: Span::default(),
                },
                Declaration {
                    mutability: Mutability::Const,
                    name: Identifier::from("b"),
                    value: num(2.0),
                    span: Span::default(),
                },
            ],
            body: block(vec![StmtKind::Print {
                arguments: vec![var("a"), var("b")]
            }]),
        }
    );
}

#[test]
fn test_parse_empty_let_in() {
    let program = parse_ok("let {} in {}");

    assert_eq!(
        program.statements[0].kind,
        StmtKind::LetIn {
            declarations: vec![],
            body: block(vec![]),
        }
    );
}

#[test]
fn test_let_in_header_only_takes_declarations() {
    let error = parse_err("let { print(1) } in {}");

    assert_eq!(error.found(), Some(TokenKind::Print));
    assert_eq!(
        error.expected(),
        &[TokenKind::CloseCurly, TokenKind::Let, TokenKind::Const]
    );
}

#[test]
fn test_let_in_requires_in() {
    let error = parse_err("let { let a = 1 } { }");

    assert_eq!(error.found(), Some(TokenKind::OpenCurly));
    assert_eq!(error.expected(), &[TokenKind::In]);
}

#[test]
fn test_parse_call_statement() {
    let program = parse_ok("greet(\"bob\", 1 + 2) reset()");

    assert_eq!(program.len(), 2);
    assert_eq!(
        program.statements[0].kind,
        StmtKind::Call {
            callee: Identifier::from("greet"),
            arguments: vec![
                ExprKind::String("bob".to_string()).into(),
                bin(BinaryOperator::Add, num(1.0), num(2.0)),
            ],
        }
    );
    assert_eq!(
        program.statements[1].kind,
        StmtKind::Call {
            callee: Identifier::from("reset"),
            arguments: vec![],
        }
    );
}

#[test]
fn test_bare_identifier_is_not_a_statement() {
    let error = parse_err("x = 1");

    assert_eq!(error.found(), Some(TokenKind::Assignment));
    assert_eq!(error.expected(), &[TokenKind::OpenParen]);
}

#[test]
fn test_calls_are_not_expressions() {
    let error = parse_err("let y = f(1)");

    assert_eq!(error.found(), Some(TokenKind::OpenParen));
    assert_eq!(*error.get_position(), Position::new(1, 10));
}

#[test]
fn test_parse_lambdas() {
    assert_eq!(
        value_of("let f = (a, b) => { print(a) }"),
        ExprKind::Lambda {
            params: vec![Identifier::from("a"), Identifier::from("b")],
            body: block(vec![StmtKind::Print {
                arguments: vec![var("a")]
            }]),
        }
        .into()
    );

    assert_eq!(
        value_of("let f = (x) => {}"),
        ExprKind::Lambda {
            params: vec![Identifier::from("x")],
            body: block(vec![]),
        }
        .into()
    );

    assert_eq!(
        value_of("let f = () => {}"),
        ExprKind::Lambda {
            params: vec![],
            body: block(vec![]),
        }
        .into()
    );
}

#[test]
fn test_single_name_in_parentheses_is_grouping() {
    assert_eq!(value_of("let y = (x)"), grouped(var("x")));
    assert_eq!(
        value_of("let y = (x) + 1"),
        bin(BinaryOperator::Add, grouped(var("x")), num(1.0))
    );
}

#[test]
fn test_unclosed_grouping() {
    let error = parse_err("let y = (1 + 2");

    assert_eq!(error.found(), Some(TokenKind::EOF));
    assert!(error.expected().contains(&TokenKind::CloseParen));
    assert!(error.expected().contains(&TokenKind::Star));
}

#[test]
fn test_error_position_for_missing_expression() {
    let error = parse_err("let x = ;");

    assert_eq!(*error.get_position(), Position::new(1, 9));
    assert_eq!(error.found(), Some(TokenKind::Semicolon));
    for kind in [
        TokenKind::Number,
        TokenKind::String,
        TokenKind::True,
        TokenKind::False,
        TokenKind::Null,
        TokenKind::Input,
        TokenKind::Identifier,
        TokenKind::OpenBracket,
        TokenKind::OpenParen,
    ] {
        assert!(error.expected().contains(&kind), "missing {:?}", kind);
    }
}

#[test]
fn test_unknown_statement_start() {
    let error = parse_err("print(1)\nthen");

    assert_eq!(*error.get_position(), Position::new(2, 1));
    assert_eq!(error.found(), Some(TokenKind::Then));
    assert_eq!(
        error.expected(),
        &[
            TokenKind::Identifier,
            TokenKind::OpenCurly,
            TokenKind::Let,
            TokenKind::Const,
            TokenKind::Fun,
            TokenKind::If,
            TokenKind::Print,
        ]
    );
}

#[test]
fn test_number_out_of_range() {
    let error = parse_err("let big = 1e999");

    assert_eq!(error.get_error_name(), "NumberParseError");
    assert_eq!(*error.get_position(), Position::new(1, 11));
}

#[test]
fn test_parse_multiple_statements() {
    let program = parse_ok("let x = 10 let y = 20 const z = x + y print(z) f(z) {}");

    assert_eq!(program.len(), 6);
}

#[test]
fn test_parse_empty_program() {
    assert!(parse_ok("").is_empty());
    assert!(parse_ok("  // only a comment\n").is_empty());
}

#[test]
fn test_statement_spans() {
    let program = parse_ok("let x = 1 + 2\nprint(x)");

    assert_eq!(program.statements[0].span.start, Position::new(1, 1));
    assert_eq!(program.statements[0].span.end, Position::new(1, 14));
    assert_eq!(program.statements[1].span.start, Position::new(2, 1));
    assert_eq!(program.statements[1].span.end, Position::new(2, 9));
}

#[test]
fn test_nesting_limit() {
    let tokens = tokenize("print(((((1)))))").unwrap();
    let error = parse_with_options(tokens, ParserOptions { max_depth: 4 }).unwrap_err();

    assert_eq!(error.get_error_name(), "NestingTooDeep");
    assert_eq!(error.found(), Some(TokenKind::OpenParen));

    let tokens = tokenize("print(((((1)))))").unwrap();
    assert!(parse_with_options(tokens, ParserOptions { max_depth: 8 }).is_ok());
}

#[test]
fn test_deep_nesting_fails_instead_of_overflowing() {
    let source = format!("print({}1{})", "(".repeat(5000), ")".repeat(5000));
    let error = parse_err(&source);

    assert_eq!(error.get_error_name(), "NestingTooDeep");

    let source = format!("{}{}", "{".repeat(5000), "}".repeat(5000));
    let error = parse_err(&source);

    assert_eq!(error.get_error_name(), "NestingTooDeep");
}

#[test]
fn test_long_operator_chain_fails_instead_of_overflowing() {
    let source = format!("let x = 1{}", " + 1".repeat(20_000));
    let error = parse_err(&source);

    assert_eq!(error.get_error_name(), "NestingTooDeep");
}

#[test]
fn test_operator_chain_counts_against_nesting_limit() {
    let chain = |operators: usize| format!("let x = 1{}", " - 1".repeat(operators));
    let options = ParserOptions { max_depth: 10 };

    let tokens = tokenize(&chain(8)).unwrap();
    assert!(parse_with_options(tokens, options).is_ok());

    let tokens = tokenize(&chain(9)).unwrap();
    let error = parse_with_options(tokens, options).unwrap_err();
    assert_eq!(error.get_error_name(), "NestingTooDeep");

    let program = parse_ok(&chain(100));
    assert_eq!(parse_ok(&program.to_string()), program);
}

#[test]
fn test_statement_after_declaration_lists_operators() {
    let error = parse_err("let x = 1 ;");

    assert_eq!(error.found(), Some(TokenKind::Semicolon));
    assert!(error.expected().contains(&TokenKind::Plus));
    assert!(error.expected().contains(&TokenKind::LessEquals));
    assert!(error.expected().contains(&TokenKind::Let));
    assert!(!error.expected().contains(&TokenKind::CloseCurly));
}

#[test]
fn test_block_after_declaration_lists_operators() {
    let error = parse_err("{ let x = 1 ; }");

    assert_eq!(error.found(), Some(TokenKind::Semicolon));
    assert!(error.expected().contains(&TokenKind::Star));
    assert!(error.expected().contains(&TokenKind::CloseCurly));
    assert!(error.expected().contains(&TokenKind::Print));

    let error = parse_err("{ print(1) ; }");
    assert!(error.expected().contains(&TokenKind::CloseCurly));
    assert!(!error.expected().contains(&TokenKind::Star));
}

#[test]
fn test_statement_after_print_lists_only_statement_starts() {
    let error = parse_err("print(1) ;");

    assert_eq!(
        error.expected(),
        &[
            TokenKind::Identifier,
            TokenKind::OpenCurly,
            TokenKind::Let,
            TokenKind::Const,
            TokenKind::Fun,
            TokenKind::If,
            TokenKind::Print,
        ]
    );
}

#[test]
fn test_parser_over_token_stream() {
    let stream = TokenStream::from(tokenize("print(1) print(2)").unwrap());
    let mut parser = Parser::new(stream);
    let program = parser.parse_program().unwrap();

    assert_eq!(program.len(), 2);
    assert!(!parser.has_tokens());
}
