//! `json`: reading and writing JSON text. Importable, not built in.

use crate::errors::EvalResult;
use crate::json::parse_json;
use crate::library::{args, LibraryBuilder, NativeCall, NativeEntry, ParamKind};
use crate::{ObjectMap, Value};

const TABLE: &[NativeEntry] = &[
    NativeEntry::new("parse", &[ParamKind::String], parse),
    NativeEntry::new("stringify", &[ParamKind::Any], stringify),
    NativeEntry::new("stringify", &[ParamKind::Any, ParamKind::Boolean], stringify_pretty),
];

pub(super) fn library() -> ObjectMap {
    LibraryBuilder::new().functions(TABLE).build()
}

fn parse(call: &NativeCall<'_>, args: &[Value]) -> EvalResult {
    parse_json(args::string(args, 0)?, "<json>").map_err(|error| call.error(error.to_string()))
}

fn stringify(_: &NativeCall<'_>, args: &[Value]) -> EvalResult {
    let value = args.first().cloned().unwrap_or(Value::Null);
    Ok(Value::from(value.to_json()))
}

fn stringify_pretty(_: &NativeCall<'_>, args: &[Value]) -> EvalResult {
    let value = args.first().cloned().unwrap_or(Value::Null);
    let text = if args::boolean(args, 1)? {
        value.to_json_pretty()
    } else {
        value.to_json()
    };
    Ok(Value::from(text))
}
