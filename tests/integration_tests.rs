//! Integration tests for the parsing pipeline.
//!
//! These tests go from source text through tokenization and parsing, and
//! check the pretty-printer and diagnostic rendering on the result.

use biesc::{
    ast::{
        expressions::{BinaryOperator, ExprKind},
        statements::StmtKind,
    },
    lexer::{lexer::tokenize, tokens::TokenKind},
    parse_source,
    parser::parser::{parse, parse_with_options, ParserOptions},
    render_error, Position,
};

const PROGRAMS: &[&str] = &[
    "",
    "let x = 42",
    "print(1 2 3)",
    "{}",
    "let empty = []",
    "fun f () => {}",
    "if (true) then { } else { }",
    r#"
    // Greets everyone on the list.
    const names = ["ada", "grace", "barbara"]
    fun greet(list, greeting) => {
        print(greeting list)
    }
    greet(names, "hello")
    "#,
    r#"
    let answer = input("Pick a number: ")
    if (answer >= 10) then {
        print("big" answer)
    } else {
        if (answer == null) then { print("nothing") } else { print("small") }
    }
    "#,
    r#"
    /* nested scopes */
    let {
        let a = 1
        const b = a + 2 * 3
        let c = (a + b) / 2
    } in {
        let twice = (f, v) => { f(v) f(v) }
        twice(print_it, c)
        { { print(a b c) } }
    }
    "#,
    r#"
    let make = () => {
        let inner = (x) => { print(x) }
    }
    let compare = 1 - 2 - 3 != (4 < 5)
    let escaped = "tab\there \"quoted\" \x41"
    let science = [6.02e23, 1E-3, 0.5]
    "#,
];

#[test]
fn test_sample_programs_parse() {
    let counts = [0, 1, 1, 1, 1, 1, 1, 3, 2, 1, 4];

    for (source, count) in PROGRAMS.iter().zip(counts) {
        let program = parse_source(source)
            .unwrap_or_else(|error| panic!("{:?} failed: {}", source, error));
        assert_eq!(program.len(), count, "statement count for {:?}", source);
    }
}

#[test]
fn test_printed_programs_reparse_to_equal_trees() {
    for source in PROGRAMS {
        let program = parse_source(source).unwrap();
        let printed = program.to_string();
        let reparsed = parse_source(&printed)
            .unwrap_or_else(|error| panic!("printed {:?} failed: {}", printed, error));

        assert_eq!(program, reparsed, "round trip of {:?}", source);
        assert_eq!(printed, reparsed.to_string());
    }
}

#[test]
fn test_precedence_follows_binding_table() {
    let program = parse_source("print(1 + 2 * 3)").unwrap();

    let StmtKind::Print { arguments } = &program.statements[0].kind else {
        panic!("expected print");
    };
    let ExprKind::Binary {
        operator, left, ..
    } = &arguments[0].kind
    else {
        panic!("expected a binary expression");
    };

    assert_eq!(*operator, BinaryOperator::Multiply);
    assert!(matches!(
        left.kind,
        ExprKind::Binary {
            operator: BinaryOperator::Add,
            ..
        }
    ));
    assert_eq!(arguments[0].to_string(), "1 + 2 * 3");
}

#[test]
fn test_comparison_binds_loosest() {
    let program = parse_source("print(1 + 2 == 3 * 1)").unwrap();

    let StmtKind::Print { arguments } = &program.statements[0].kind else {
        panic!("expected print");
    };
    let ExprKind::Binary {
        operator,
        left,
        right,
    } = &arguments[0].kind
    else {
        panic!("expected a binary expression");
    };

    assert_eq!(*operator, BinaryOperator::Equal);
    assert!(matches!(
        left.kind,
        ExprKind::Binary {
            operator: BinaryOperator::Add,
            ..
        }
    ));
    assert!(matches!(
        right.kind,
        ExprKind::Binary {
            operator: BinaryOperator::Multiply,
            ..
        }
    ));
}

#[test]
fn test_print_without_commas() {
    let program = parse_source("print(1 2 3)").unwrap();
    let StmtKind::Print { arguments } = &program.statements[0].kind else {
        panic!("expected print");
    };
    assert_eq!(arguments.len(), 3);

    assert!(parse_source("print(1, 2)").is_err());
}

#[test]
fn test_empty_containers() {
    let program = parse_source("{} let l = [] fun f () => {}").unwrap();

    assert!(matches!(&program.statements[0].kind, StmtKind::Block(block) if block.is_empty()));
    match &program.statements[1].kind {
        StmtKind::Declaration(declaration) => {
            assert!(matches!(&declaration.value.kind, ExprKind::List(items) if items.is_empty()))
        }
        other => panic!("expected a declaration, found {:?}", other),
    }
    match &program.statements[2].kind {
        StmtKind::FunctionDecl { params, body, .. } => {
            assert!(params.is_empty());
            assert!(body.is_empty());
        }
        other => panic!("expected a function, found {:?}", other),
    }
}

#[test]
fn test_conditional_without_else_fails() {
    let error = parse_source("if (true) then { } ").unwrap_err();

    assert_eq!(error.expected(), &[TokenKind::Else]);
    assert!(error.get_tip().to_string().contains("`else`"));
}

#[test]
fn test_error_reports_semicolon_position() {
    let error = parse_source("let x = ;").unwrap_err();

    assert_eq!(*error.get_position(), Position::new(1, 9));
    assert_eq!(error.found(), Some(TokenKind::Semicolon));
    assert!(error.expected().contains(&TokenKind::OpenParen));
    assert!(error.expected().contains(&TokenKind::Number));
    assert!(error.expected().contains(&TokenKind::Identifier));
}

#[test]
fn test_lexer_errors_surface_through_parse_source() {
    let error = parse_source("let x = 1 # 2").unwrap_err();

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(*error.get_position(), Position::new(1, 11));
}

#[test]
fn test_render_error_report() {
    let source = "fun f(a) => {\n    print(a,)\n}\n";
    let error = parse_source(source).unwrap_err();
    let report = render_error(&error, source, "demo.bies");

    assert_eq!(
        report,
        format!(
            "Error: UnexpectedToken ({})\n-> demo.bies:2:12\n  |\n2 | print(a,)\n  | -------^\n",
            error.get_tip()
        )
    );
}

#[test]
fn test_nesting_limit_is_configurable() {
    let source = format!("print({}1{})", "(".repeat(20), ")".repeat(20));

    let tokens = tokenize(&source).unwrap();
    assert!(parse(tokens).is_ok());

    let tokens = tokenize(&source).unwrap();
    let error = parse_with_options(tokens, ParserOptions { max_depth: 10 }).unwrap_err();
    assert_eq!(error.get_error_name(), "NestingTooDeep");
}
