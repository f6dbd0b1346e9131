//! Patch IR - shared data structures for the patch script toolchain.
//!
//! This crate holds everything that more than one phase needs to agree on:
//! - Source files and `(file, row, column)` positions for diagnostics
//! - Byte spans for slicing the original text
//! - Tokens produced by the lexer
//! - The syntax tree produced by the parser and walked by the evaluator
//! - Metadata directives declared with `@name;` headers
//!
//! Everything here is immutable once built and `Send + Sync`, so a parsed
//! program can be shared between threads that each run their own evaluation.

pub mod ast;
mod metadata;
mod source;
mod span;
mod token;

pub use ast::{
    BinaryOp, Expr, ExprKind, FunctionDef, FunctionParams, Literal, LogicalOp, Mutability,
    ObjectEntry, Param, ParamTarget, Program, Reference, ReferenceKind, Stmt, StmtKind, TypeTest,
    UnaryOp, UpdateOp,
};
pub use metadata::{Directive, Metadata};
pub use source::{SourceFile, SourcePos, SourceSpan, TAB_WIDTH};
pub use span::Span;
pub use token::{Keyword, Operator, Token, TokenKind};
