//! Running programs.
//!
//! - `stmt`: statement execution and loop control
//! - `expr`: expression evaluation
//! - `place`: assignable references resolved to a storage location
//! - `call`: calling user-defined, native and bound functions

mod call;
mod expr;
mod place;
mod stmt;

use patch_ir::Program;

pub(crate) use place::array_slot;

use crate::{EvalResult, EvaluationContext, Value};

/// How a statement finished.
///
/// Loops consume `Break` and `Continue`; function calls and the program
/// consume `Return`. The parser rejects `break` and `continue` outside a
/// loop, so neither reaches a function or program boundary.
#[derive(Debug)]
pub(crate) enum Flow {
    Normal,
    Break,
    Continue,
    Return(Value),
}

/// Something that runs against an evaluation context.
pub trait Execute {
    fn execute(&self, context: &EvaluationContext) -> EvalResult<()>;
}

impl Execute for Program {
    /// Run every top-level statement in the context's scope. A top-level
    /// `return` ends the program early.
    #[tracing::instrument(level = "debug", skip_all, fields(statements = self.statements.len()))]
    fn execute(&self, context: &EvaluationContext) -> EvalResult<()> {
        for stmt in &self.statements {
            match context.exec_stmt(stmt)? {
                Flow::Normal => {}
                Flow::Return(_) => break,
                Flow::Break | Flow::Continue => {
                    unreachable!("loop control outside of a loop survived parsing")
                }
            }
        }
        Ok(())
    }
}
