/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Program, Block and Identifier
/// - expressions: the expression tagged union
/// - statements: the statement tagged union
/// - printer: renders a tree back to source text
pub mod ast;
pub mod expressions;
pub mod printer;
pub mod statements;
