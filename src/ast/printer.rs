//! Source pretty-printer.
//!
//! Renders an AST back to canonical source text that the parser accepts and
//! that parses to an equal tree. Parenthesized expressions are kept as
//! `Grouping` nodes by the parser, so the printer never has to insert
//! parentheses of its own.

use std::fmt::{Display, Write};

use super::{
    ast::{Block, Identifier, Program},
    expressions::{Expr, ExprKind},
    statements::{Declaration, Stmt, StmtKind},
};

const INDENT: &str = "  ";

struct Printer {
    out: String,
    indent: usize,
}

impl Printer {
    fn new() -> Self {
        Printer {
            out: String::new(),
            indent: 0,
        }
    }

    fn line_start(&mut self) {
        for _ in 0..self.indent {
            self.out.push_str(INDENT);
        }
    }

    fn statements(&mut self, statements: &[Stmt]) {
        for stmt in statements {
            self.line_start();
            self.stmt(stmt);
            self.out.push('\n');
        }
    }

    fn stmt(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::Declaration(declaration) => self.declaration(declaration),
            StmtKind::FunctionDecl { name, params, body } => {
                self.out.push_str("fun ");
                self.out.push_str(name.as_str());
                self.out.push(' ');
                self.params(params);
                self.out.push_str(" => ");
                self.block(body);
            }
            StmtKind::Conditional {
                condition,
                then_branch,
                else_branch,
            } => {
                self.out.push_str("if (");
                self.expr(condition);
                self.out.push_str(") then ");
                self.block(then_branch);
                self.out.push_str(" else ");
                self.block(else_branch);
            }
            StmtKind::LetIn { declarations, body } => {
                self.out.push_str("let {");
                if !declarations.is_empty() {
                    self.out.push('\n');
                    self.indent += 1;
                    for declaration in declarations {
                        self.line_start();
                        self.declaration(declaration);
                        self.out.push('\n');
                    }
                    self.indent -= 1;
                    self.line_start();
                }
                self.out.push_str("} in ");
                self.block(body);
            }
            StmtKind::Print { arguments } => {
                self.out.push_str("print(");
                self.separated(arguments, " ");
                self.out.push(')');
            }
            StmtKind::Call { callee, arguments } => {
                self.out.push_str(callee.as_str());
                self.out.push('(');
                self.separated(arguments, ", ");
                self.out.push(')');
            }
            StmtKind::Block(block) => self.block(block),
        }
    }

    fn declaration(&mut self, declaration: &Declaration) {
        let _ = write!(self.out, "{} {} = ", declaration.mutability, declaration.name.as_str());
        self.expr(&declaration.value);
    }

    fn params(&mut self, params: &[Identifier]) {
        self.out.push('(');
        let names: Vec<&str> = params.iter().map(Identifier::as_str).collect();
        self.out.push_str(&names.join(", "));
        self.out.push(')');
    }

    fn block(&mut self, block: &Block) {
        if block.is_empty() {
            self.out.push_str("{}");
            return;
        }

        self.out.push_str("{\n");
        self.indent += 1;
        self.statements(&block.statements);
        self.indent -= 1;
        self.line_start();
        self.out.push('}');
    }

    fn separated(&mut self, exprs: &[Expr], separator: &str) {
        for (i, expr) in exprs.iter().enumerate() {
            if i > 0 {
                self.out.push_str(separator);
            }
            self.expr(expr);
        }
    }

    fn expr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Number(value) => {
                let _ = write!(self.out, "{}", value);
            }
            ExprKind::String(value) => self.string(value),
            ExprKind::Bool(value) => {
                let _ = write!(self.out, "{}", value);
            }
            ExprKind::Null => self.out.push_str("null"),
            ExprKind::Input { prompt } => {
                self.out.push_str("input(");
                self.string(prompt);
                self.out.push(')');
            }
            ExprKind::Variable(name) => self.out.push_str(name.as_str()),
            ExprKind::List(items) => {
                self.out.push('[');
                self.separated(items, ", ");
                self.out.push(']');
            }
            ExprKind::Lambda { params, body } => {
                self.params(params);
                self.out.push_str(" => ");
                self.block(body);
            }
            ExprKind::Binary {
                operator,
                left,
                right,
            } => {
                self.expr(left);
                let _ = write!(self.out, " {} ", operator);
                self.expr(right);
            }
            ExprKind::Grouping(inner) => {
                self.out.push('(');
                self.expr(inner);
                self.out.push(')');
            }
        }
    }

    fn string(&mut self, value: &str) {
        self.out.push('"');
        for ch in value.chars() {
            match ch {
                '"' => self.out.push_str("\\\""),
                '\\' => self.out.push_str("\\\\"),
                '\n' => self.out.push_str("\\n"),
                '\t' => self.out.push_str("\\t"),
                '\r' => self.out.push_str("\\r"),
                '\0' => self.out.push_str("\\0"),
                ch if (ch as u32) < 0x20 || ch as u32 == 0x7f => {
                    let _ = write!(self.out, "\\x{:02x}", ch as u32);
                }
                ch => self.out.push(ch),
            }
        }
        self.out.push('"');
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut printer = Printer::new();
        printer.statements(&self.statements);
        f.write_str(&printer.out)
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut printer = Printer::new();
        printer.stmt(self);
        f.write_str(&printer.out)
    }
}

impl Display for Block {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut printer = Printer::new();
        printer.block(self);
        f.write_str(&printer.out)
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut printer = Printer::new();
        printer.expr(self);
        f.write_str(&printer.out)
    }
}
