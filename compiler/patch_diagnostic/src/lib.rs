//! Error reporting shared by the lexer, parser and evaluator.
//!
//! Every phase reports failures as a type implementing [`PositionedError`]:
//! a fixed headline for the phase, a detail message, an optional source span
//! and an optional cause. Tooling renders any of them the same way:
//!
//! ```text
//! | Error while applying patch
//! |   Cannot find variable with name x
//! | Location: main 3:5
//! | var y = x;
//! |         ^ here
//! ```
//!
//! followed by the cause chain, either in full or one line per cause
//! (see [`TraceStyle`]).

pub mod emitter;
mod render;
#[cfg(test)]
mod test_support;

pub use emitter::{ColorMode, TerminalEmitter};
pub use render::{format_location, render, Location};

use patch_ir::SourceSpan;

/// An error that knows where in the source it happened.
pub trait PositionedError: std::error::Error {
    /// Headline naming the phase that failed, e.g. "Error while parsing patch".
    fn base_message(&self) -> &'static str;

    /// What went wrong, without location information.
    fn message(&self) -> &str;

    /// Where it went wrong. `None` only for failures with no source position.
    fn span(&self) -> Option<&SourceSpan>;

    /// The error this one wraps, if any.
    fn cause(&self) -> Option<&dyn PositionedError> {
        None
    }
}

/// How much of the cause chain to print.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TraceStyle {
    /// Every cause with its location and source snippet.
    #[default]
    Full,
    /// One `Caused by: message at location` line per cause.
    Short,
}
