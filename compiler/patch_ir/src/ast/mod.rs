//! Syntax tree of a patch script.
//!
//! Plain owned trees: every node owns its children and carries the span it
//! was parsed from. Function bodies sit behind an `Arc` because a closure
//! value created at run time keeps its definition alive independently of the
//! `Program` it came from.
//!
//! # Module Structure
//!
//! - `expr`: expressions and the assignable `Reference` family
//! - `operators`: unary, update, binary and logical operators, `is` type tests
//! - `function`: function literals and their parameter lists
//! - `stmt`: statements and the top-level `Program`

mod expr;
mod function;
mod operators;
mod stmt;

pub use expr::{Expr, ExprKind, Literal, ObjectEntry, Reference, ReferenceKind};
pub use function::{FunctionDef, FunctionParams, Param, ParamTarget};
pub use operators::{BinaryOp, LogicalOp, TypeTest, UnaryOp, UpdateOp};
pub use stmt::{Program, Stmt, StmtKind};

/// Whether a binding can be reassigned.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Mutability {
    /// Declared with `var`.
    Mutable,
    /// Declared with `val`, a function declaration, an import or a loop variable.
    Immutable,
}

impl Mutability {
    #[inline]
    pub fn is_mutable(self) -> bool {
        matches!(self, Mutability::Mutable)
    }
}
