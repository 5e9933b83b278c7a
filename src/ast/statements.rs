use std::fmt::Display;

use crate::Span;

use super::{
    ast::{Block, Identifier},
    expressions::Expr,
};

/// Whether a declared name may be rebound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutability {
    Let,
    Const,
}

impl Display for Mutability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mutability::Let => write!(f, "let"),
            Mutability::Const => write!(f, "const"),
        }
    }
}

/// `let name = value` or `const name = value`.
#[derive(Debug, Clone)]
pub struct Declaration {
    pub mutability: Mutability,
    pub name: Identifier,
    pub value: Expr,
    pub span: Span,
}

impl PartialEq for Declaration {
    fn eq(&self, other: &Self) -> bool {
        self.mutability == other.mutability && self.name == other.name && self.value == other.value
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    Declaration(Declaration),
    FunctionDecl {
        name: Identifier,
        params: Vec<Identifier>,
        body: Block,
    },
    /// Both branches are mandatory in the surface syntax.
    Conditional {
        condition: Expr,
        then_branch: Block,
        else_branch: Block,
    },
    LetIn {
        declarations: Vec<Declaration>,
        body: Block,
    },
    /// Never empty.
    Print { arguments: Vec<Expr> },
    /// A bare invocation. Calls exist only as statements.
    Call {
        callee: Identifier,
        arguments: Vec<Expr>,
    },
    Block(Block),
}

/// A statement and the source it was parsed from.
///
/// Equality is structural: spans are not compared.
#[derive(Debug, Clone)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

impl PartialEq for Stmt {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl From<StmtKind> for Stmt {
    fn from(kind: StmtKind) -> Self {
        Stmt {
            kind,
            span: Span::default(),
        }
    }
}
