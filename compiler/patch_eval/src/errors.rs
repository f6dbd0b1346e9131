//! Evaluation errors and their constructors.
//!
//! Every runtime failure is an [`EvalError`]: a structured [`EvalErrorKind`],
//! the rendered message, the span it is reported at and, for failures that
//! crossed a function call, the error that caused it. Constructors live here
//! so that message wording is kept in one place.

use std::fmt;

use patch_diagnostic::PositionedError;
use patch_ir::SourceSpan;

use crate::Value;

/// Result of evaluating an expression or running a native function.
pub type EvalResult<T = Value> = Result<T, EvalError>;

/// Expected argument count in an arity error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
    AtMost(usize),
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exactly(n) => write!(f, "{n}"),
            Arity::AtLeast(n) => write!(f, "at least {n}"),
            Arity::AtMost(n) => write!(f, "at most {n}"),
        }
    }
}

/// What kind of evaluation failure occurred.
///
/// The `Display` output of a kind is the error message.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum EvalErrorKind {
    // Variables
    #[error("Cannot find variable with name {name}")]
    UndefinedVariable { name: String },
    #[error("Cannot create variable with duplicate name: {name}")]
    DuplicateVariable { name: String },
    #[error("Attempt to assign to immutable variable {name}")]
    ImmutableBinding { name: String },
    #[error("Cannot delete variable from outer scope: {name}")]
    OuterScopeDelete { name: String },

    // Access
    #[error("Object {object} has no key {key}")]
    MissingKey { object: String, key: String },
    #[error("Array index out of bounds (index: {index}, size: {size})")]
    IndexOutOfBounds { index: i64, size: usize },
    /// Property or index access on a receiver that does not support it.
    #[error("{message}")]
    InvalidAccess { message: String },

    // Operators
    #[error("{message}")]
    InvalidOperand { message: String },

    // Calls
    #[error("Tried to call {value}, not a function")]
    NotCallable { value: String },
    #[error("Incorrect function argument count: expected {expected} but found {got}")]
    ArityMismatch { expected: Arity, got: usize },
    #[error("No overload of {name} with {got} arguments")]
    NoOverload { name: String, got: usize },
    #[error("Expected argument {index} to be {expected}, was {value}")]
    ArgumentType {
        index: usize,
        expected: &'static str,
        value: String,
    },
    #[error("Only objects can be used in root arguments, tried to use {value}")]
    RootArgument { value: String },
    #[error("Maximum call depth of {limit} exceeded")]
    CallDepthExceeded { limit: usize },
    #[error("Function called after its evaluation ended")]
    EvaluationEnded,
    /// Wraps an error raised inside a user function.
    #[error("Error while executing function")]
    FunctionFailed,
    /// Wraps an error raised inside a native function.
    #[error("Error while calling builtin function {name}")]
    BuiltinFailed { name: String },

    // Statements
    #[error("Only objects can be used in apply statements, tried to use {value}")]
    ApplyTarget { value: String },
    #[error("Can only iterate arrays, tried to iterate {value}")]
    NotIterable { value: String },

    // Libraries
    #[error("Cannot load builtin library {name}. You don't need to import it.")]
    BuiltinImport { name: String },
    #[error("Recursive library import detected for {name}")]
    RecursiveImport { name: String },
    #[error("No libraries available")]
    NoLibraries,

    // Raised by scripts through the debug library
    #[error("{message}")]
    AssertionFailed { message: String },

    #[error("{message}")]
    Custom { message: String },
}

/// A runtime error with its location and cause chain.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub message: String,
    pub span: Option<SourceSpan>,
    #[source]
    pub cause: Option<Box<EvalError>>,
}

impl EvalError {
    /// An uncategorized error.
    pub fn new(message: impl Into<String>) -> Self {
        Self::from_kind(EvalErrorKind::Custom {
            message: message.into(),
        })
    }

    pub fn from_kind(kind: EvalErrorKind) -> Self {
        EvalError {
            message: kind.to_string(),
            kind,
            span: None,
            cause: None,
        }
    }

    #[must_use]
    pub fn with_span(mut self, span: SourceSpan) -> Self {
        self.span = Some(span);
        self
    }

    /// Attach `span` unless the error already has one.
    #[must_use]
    pub fn or_span(mut self, span: &SourceSpan) -> Self {
        if self.span.is_none() {
            self.span = Some(span.clone());
        }
        self
    }

    #[must_use]
    pub fn with_cause(mut self, cause: EvalError) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// The innermost error of the cause chain.
    pub fn root_cause(&self) -> &EvalError {
        let mut error = self;
        while let Some(cause) = &error.cause {
            error = cause;
        }
        error
    }
}

impl PositionedError for EvalError {
    fn base_message(&self) -> &'static str {
        "Error while applying patch"
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn span(&self) -> Option<&SourceSpan> {
        self.span.as_ref()
    }

    fn cause(&self) -> Option<&dyn PositionedError> {
        self.cause
            .as_deref()
            .map(|cause| cause as &dyn PositionedError)
    }
}

// Variables

#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable {
        name: name.to_string(),
    })
}

#[cold]
pub fn duplicate_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::DuplicateVariable {
        name: name.to_string(),
    })
}

#[cold]
pub fn immutable_binding(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ImmutableBinding {
        name: name.to_string(),
    })
}

#[cold]
pub fn outer_scope_delete(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::OuterScopeDelete {
        name: name.to_string(),
    })
}

// Access

#[cold]
pub fn missing_key(object: &Value, key: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MissingKey {
        object: object.to_string(),
        key: key.to_string(),
    })
}

#[cold]
pub fn index_out_of_bounds(index: i64, size: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexOutOfBounds { index, size })
}

#[cold]
pub fn invalid_access(message: String) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidAccess { message })
}

// Operators

#[cold]
pub fn invalid_operand(message: String) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidOperand { message })
}

// Calls

#[cold]
pub fn not_callable(value: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable {
        value: value.to_string(),
    })
}

#[cold]
pub fn arity_mismatch(expected: Arity, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch { expected, got })
}

#[cold]
pub fn no_overload(name: &str, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoOverload {
        name: name.to_string(),
        got,
    })
}

#[cold]
pub fn argument_type(index: usize, expected: &'static str, value: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArgumentType {
        index,
        expected,
        value: value.to_string(),
    })
}

#[cold]
pub fn root_argument(value: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::RootArgument {
        value: value.to_string(),
    })
}

#[cold]
pub fn call_depth_exceeded(limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::CallDepthExceeded { limit })
}

#[cold]
pub fn evaluation_ended() -> EvalError {
    EvalError::from_kind(EvalErrorKind::EvaluationEnded)
}

/// `cause` escaped a user function called at `span`.
#[cold]
pub fn function_failed(span: &SourceSpan, cause: EvalError) -> EvalError {
    EvalError::from_kind(EvalErrorKind::FunctionFailed)
        .with_span(span.clone())
        .with_cause(cause)
}

/// `cause` escaped native function `name` called at `span`.
#[cold]
pub fn builtin_failed(name: &str, span: &SourceSpan, cause: EvalError) -> EvalError {
    EvalError::from_kind(EvalErrorKind::BuiltinFailed {
        name: name.to_string(),
    })
    .with_span(span.clone())
    .with_cause(cause)
}

// Statements

#[cold]
pub fn apply_target(value: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ApplyTarget {
        value: value.to_string(),
    })
}

#[cold]
pub fn not_iterable(value: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotIterable {
        value: value.to_string(),
    })
}

// Libraries

#[cold]
pub fn builtin_import(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::BuiltinImport {
        name: name.to_string(),
    })
}

#[cold]
pub fn recursive_import(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::RecursiveImport {
        name: name.to_string(),
    })
}

#[cold]
pub fn no_libraries() -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoLibraries)
}

#[cold]
pub fn assertion_failed(message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::AssertionFailed {
        message: message.into(),
    })
}
