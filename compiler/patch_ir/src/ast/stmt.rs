//! Statement nodes and the program root.

use std::sync::Arc;

use super::{Expr, FunctionDef, Mutability, Reference};
use crate::SourceSpan;

#[derive(Clone, PartialEq, Debug)]
pub enum StmtKind {
    /// `{ ... }`, runs in a child scope.
    Block(Vec<Stmt>),
    /// Lone `;`.
    Empty,
    Expr(Expr),
    /// `var name = init;` or `val name = init;`
    Variable {
        name: String,
        name_span: SourceSpan,
        mutability: Mutability,
        init: Expr,
    },
    Delete(Reference),
    Return(Option<Expr>),
    /// `function name(params) { ... }`, an immutable binding of a function literal.
    Function {
        name: String,
        name_span: SourceSpan,
        def: Arc<FunctionDef>,
    },
    If {
        condition: Expr,
        then: Box<Stmt>,
        otherwise: Option<Box<Stmt>>,
    },
    While {
        condition: Expr,
        body: Box<Stmt>,
    },
    /// `for (init; condition; update) body`. Omitted clauses are `Empty`
    /// statements and a `true` literal.
    For {
        init: Box<Stmt>,
        condition: Expr,
        update: Box<Stmt>,
        body: Box<Stmt>,
    },
    Foreach {
        name: String,
        name_span: SourceSpan,
        iterable: Expr,
        body: Box<Stmt>,
    },
    Break,
    Continue,
    /// `import "library" [as alias];` The alias defaults to the library name.
    Import {
        library: String,
        alias: String,
        alias_span: SourceSpan,
    },
    /// `apply (root) body`
    Apply {
        root: Expr,
        body: Box<Stmt>,
    },
    /// Stands in for a block that failed to parse. Never executed.
    Error { message: String },
}

#[derive(Clone, PartialEq, Debug)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: SourceSpan,
}

impl Stmt {
    #[inline]
    pub fn new(kind: StmtKind, span: SourceSpan) -> Self {
        Stmt { kind, span }
    }
}

/// Top-level statements of one source file.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl Program {
    #[inline]
    pub fn new(statements: Vec<Stmt>) -> Self {
        Program { statements }
    }
}
