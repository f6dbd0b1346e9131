//! Expression nodes.

use std::sync::Arc;

use super::{BinaryOp, FunctionDef, LogicalOp, TypeTest, UnaryOp, UpdateOp};
use crate::SourceSpan;

/// Constant written directly in the source.
#[derive(Clone, PartialEq, Debug)]
pub enum Literal {
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
}

/// `key: value` inside an object initializer.
#[derive(Clone, PartialEq, Debug)]
pub struct ObjectEntry {
    pub key: String,
    pub value: Expr,
}

/// Expressions that name a storage location and so can be read, assigned
/// and deleted.
#[derive(Clone, PartialEq, Debug)]
pub enum ReferenceKind {
    /// `name`
    Variable(String),
    /// `$name`, shorthand for a property of the current root.
    ImplicitRoot(String),
    /// `object.name`
    Property {
        object: Box<Expr>,
        name: String,
        name_span: SourceSpan,
    },
    /// `object[index]`
    Index { object: Box<Expr>, index: Box<Expr> },
}

/// A reference together with its span; the target of assignment, update
/// and `delete`.
#[derive(Clone, PartialEq, Debug)]
pub struct Reference {
    pub kind: ReferenceKind,
    pub span: SourceSpan,
}

#[derive(Clone, PartialEq, Debug)]
pub enum ExprKind {
    Literal(Literal),
    Reference(ReferenceKind),
    /// Bare `$`.
    Root,
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    Array(Vec<Expr>),
    /// Entries in source order; a repeated key overwrites the earlier value.
    Object(Vec<ObjectEntry>),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Update {
        op: UpdateOp,
        target: Box<Reference>,
        postfix: bool,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Logical {
        op: LogicalOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Ternary {
        condition: Box<Expr>,
        then: Box<Expr>,
        otherwise: Box<Expr>,
    },
    /// `target = value`, or `target op= value` when `op` is set.
    Assign {
        op: Option<BinaryOp>,
        target: Box<Reference>,
        value: Box<Expr>,
    },
    Is {
        operand: Box<Expr>,
        ty: TypeTest,
        ty_span: SourceSpan,
    },
    Function(Arc<FunctionDef>),
}

#[derive(Clone, PartialEq, Debug)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: SourceSpan,
}

impl Expr {
    #[inline]
    pub fn new(kind: ExprKind, span: SourceSpan) -> Self {
        Expr { kind, span }
    }

    /// Reinterpret as an assignable reference, handing the expression back
    /// unchanged when it is not one.
    pub fn into_reference(self) -> Result<Reference, Expr> {
        match self.kind {
            ExprKind::Reference(kind) => Ok(Reference {
                kind,
                span: self.span,
            }),
            kind => Err(Expr { kind, span: self.span }),
        }
    }

    /// Human-readable name of the node kind for diagnostics.
    pub fn describe(&self) -> &'static str {
        match &self.kind {
            ExprKind::Literal(Literal::Null) => "null literal",
            ExprKind::Literal(Literal::Boolean(_)) => "boolean literal",
            ExprKind::Literal(Literal::Number(_)) => "number literal",
            ExprKind::Literal(Literal::String(_)) => "string literal",
            ExprKind::Reference(kind) => kind.describe(),
            ExprKind::Root => "root",
            ExprKind::Call { .. } => "function call",
            ExprKind::Array(_) => "array initializer",
            ExprKind::Object(_) => "object initializer",
            ExprKind::Unary { .. } => "unary expression",
            ExprKind::Update { .. } => "update expression",
            ExprKind::Binary { .. } => "binary expression",
            ExprKind::Logical { .. } => "logical expression",
            ExprKind::Ternary { .. } => "ternary expression",
            ExprKind::Assign { .. } => "assignment",
            ExprKind::Is { .. } => "type test",
            ExprKind::Function(_) => "function literal",
        }
    }
}

impl ReferenceKind {
    pub fn describe(&self) -> &'static str {
        match self {
            ReferenceKind::Variable(_) => "variable",
            ReferenceKind::ImplicitRoot(_) => "root property",
            ReferenceKind::Property { .. } => "property access",
            ReferenceKind::Index { .. } => "index access",
        }
    }
}

impl From<Reference> for Expr {
    fn from(reference: Reference) -> Self {
        Expr::new(ExprKind::Reference(reference.kind), reference.span)
    }
}
