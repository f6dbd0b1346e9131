//! `debug`: logging and assertions.

use crate::errors::{assertion_failed, EvalResult};
use crate::library::{args, LibraryBuilder, NativeCall, NativeEntry, ParamKind};
use crate::{ObjectMap, Value};

const TABLE: &[NativeEntry] = &[
    NativeEntry::new("log", &[ParamKind::Any], log),
    NativeEntry::unwrapped("assert", &[ParamKind::Any], assert),
    NativeEntry::unwrapped("assert", &[ParamKind::Any, ParamKind::String], assert_message),
    NativeEntry::unwrapped("throw", &[ParamKind::Any], throw),
];

pub(super) fn library() -> ObjectMap {
    LibraryBuilder::new().functions(TABLE).build()
}

fn log(call: &NativeCall<'_>, args: &[Value]) -> EvalResult {
    for value in args {
        call.context().log(value);
    }
    Ok(Value::Null)
}

fn assert(call: &NativeCall<'_>, args: &[Value]) -> EvalResult {
    check(call, args, "Assertion failed")
}

fn assert_message(call: &NativeCall<'_>, args: &[Value]) -> EvalResult {
    check(call, args, args::string(args, 1)?)
}

fn check(call: &NativeCall<'_>, args: &[Value], message: &str) -> EvalResult {
    if args.first().is_some_and(Value::is_truthy) {
        Ok(Value::Null)
    } else {
        Err(assertion_failed(message).with_span(call.span().clone()))
    }
}

fn throw(call: &NativeCall<'_>, args: &[Value]) -> EvalResult {
    let message = args.first().map(ToString::to_string).unwrap_or_default();
    Err(call.error(message))
}
