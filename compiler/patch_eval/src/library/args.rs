//! Typed access to native function arguments.
//!
//! Overload dispatch has already checked every argument against its
//! declared [`ParamKind`](super::ParamKind); these accessors turn the
//! checked `Value` back into its payload and report a type error if a
//! native function asks for the wrong kind.

use std::rc::Rc;

use crate::errors::{argument_type, EvalError, EvalResult};
use crate::{ArrayRef, ObjectRef, PatchFunction, Value};

#[cold]
fn mismatch(index: usize, expected: &'static str, found: Option<&Value>) -> EvalError {
    argument_type(index, expected, found.unwrap_or(&Value::Null))
}

pub fn number(args: &[Value], index: usize) -> EvalResult<f64> {
    match args.get(index) {
        Some(Value::Number(n)) => Ok(*n),
        other => Err(mismatch(index, "number", other)),
    }
}

pub fn boolean(args: &[Value], index: usize) -> EvalResult<bool> {
    match args.get(index) {
        Some(Value::Boolean(b)) => Ok(*b),
        other => Err(mismatch(index, "boolean", other)),
    }
}

pub fn string(args: &[Value], index: usize) -> EvalResult<&str> {
    match args.get(index) {
        Some(Value::String(s)) => Ok(s),
        other => Err(mismatch(index, "string", other)),
    }
}

pub fn array(args: &[Value], index: usize) -> EvalResult<&ArrayRef> {
    match args.get(index) {
        Some(Value::Array(items)) => Ok(items),
        other => Err(mismatch(index, "array", other)),
    }
}

pub fn object(args: &[Value], index: usize) -> EvalResult<&ObjectRef> {
    match args.get(index) {
        Some(Value::Object(map)) => Ok(map),
        other => Err(mismatch(index, "object", other)),
    }
}

pub fn function(args: &[Value], index: usize) -> EvalResult<&Rc<PatchFunction>> {
    match args.get(index) {
        Some(Value::Function(function)) => Ok(function),
        other => Err(mismatch(index, "function", other)),
    }
}
