//! Function literals and parameter lists.

use super::{Expr, Stmt};
use crate::SourceSpan;

/// Where an incoming argument goes.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum ParamTarget {
    /// Bound as an immutable variable in the callee scope.
    Variable(String),
    /// `$`: becomes the evaluation root of the callee. Must be an object.
    Root,
}

#[derive(Clone, PartialEq, Debug)]
pub struct Param {
    pub target: ParamTarget,
    /// Evaluated in the callee scope when the caller passes too few arguments.
    pub default: Option<Expr>,
    pub span: SourceSpan,
}

/// Ordered parameter list.
///
/// Well-formed lists have at most one root target, no duplicate names,
/// required parameters before optional ones, and a varargs parameter only in
/// the last position. The parser reports violations and still builds the
/// list so analysis can continue.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct FunctionParams {
    pub params: Vec<Param>,
    /// The last parameter collects all remaining arguments into an array.
    pub varargs: bool,
}

impl FunctionParams {
    /// Number of parameters without a default.
    pub fn required_count(&self) -> usize {
        self.params.iter().filter(|p| p.default.is_none()).count()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

/// Body and signature shared by `function name(...) {}` and `(...) -> ...`.
#[derive(Clone, PartialEq, Debug)]
pub struct FunctionDef {
    pub params: FunctionParams,
    pub body: Stmt,
    pub span: SourceSpan,
}
