//! Patch Eval - tree-walking evaluator for patch scripts.
//!
//! A parsed [`patch_ir::Program`] runs against an [`EvaluationContext`]
//! built with [`EvaluationContextBuilder`]. The context carries the root
//! object the script patches, the variable scopes, the host's
//! [`LibraryLocator`] and the [`DebugSink`] that receives `debug.log`
//! output.
//!
//! # Architecture
//!
//! - `value`: runtime values; arrays and objects are shared, mutable handles
//! - `environment`: scopes stored in an arena and addressed by index
//! - `context`: evaluation contexts, closures' captured state, import guard
//! - `exec`: statement and expression evaluation, references, calls
//! - `operators`: unary, binary and update operators
//! - `library`: binding native functions through registration tables
//! - `stdlib`: the builtin libraries and receiver method tables
//! - `json`: reading JSON documents into values
//!
//! Break, continue and return travel as a `Flow` value returned by each
//! statement; only evaluation errors use `Err`.

mod config;
mod context;
mod debug_sink;
mod environment;
pub mod errors;
mod exec;
pub mod json;
mod library;
mod locator;
mod operators;
mod stdlib;
mod value;

pub use config::{LangConfig, DEFAULT_MAX_CALL_DEPTH};
pub use context::{EvaluationContext, EvaluationContextBuilder, ScopedContext};
pub use debug_sink::{
    buffer_sink, custom_sink, silent_sink, stdout_sink, BufferDebugSink, DebugSink,
    SharedDebugSink, StdoutDebugSink,
};
pub use errors::{Arity, EvalError, EvalErrorKind, EvalResult};
pub use exec::Execute;
pub use library::{args, LibraryBuilder, NativeCall, NativeEntry, NativeFn, NativeFunction, ParamKind};
pub use locator::{LibraryLocator, LibraryRequest, NoLibraries};
pub use operators::{binary as evaluate_binary, unary as evaluate_unary, update as evaluate_update};
pub use stdlib::{LibrarySupplier, Stdlib};
pub use value::{
    format_number, new_object, ArrayRef, DefinedFunction, ObjectMap, ObjectRef, PatchFunction,
    Value,
};

#[cfg(test)]
mod tests;
