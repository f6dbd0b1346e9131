//! `functions`: working with function values, also available as function
//! methods.

use crate::errors::EvalResult;
use crate::library::{args, LibraryBuilder, NativeCall, NativeEntry, ParamKind};
use crate::{ObjectMap, Value};

const TABLE: &[NativeEntry] = &[
    NativeEntry::new("bind", &[ParamKind::Function, ParamKind::Any], bind),
    NativeEntry::new("call", &[ParamKind::Function, ParamKind::Array], call),
];

pub(super) fn library() -> ObjectMap {
    LibraryBuilder::new().functions(TABLE).build()
}

/// A function calling the first argument with the second prepended.
fn bind(_: &NativeCall<'_>, args: &[Value]) -> EvalResult {
    let function = args::function(args, 0)?;
    let receiver = args.get(1).cloned().unwrap_or(Value::Null);
    Ok(Value::function(function.bind(receiver)))
}

/// Calls a function with the elements of an array as arguments.
fn call(native: &NativeCall<'_>, args: &[Value]) -> EvalResult {
    let function = args::function(args, 0)?;
    let arguments = args::array(args, 1)?.borrow().clone();
    native.call(function, arguments)
}
