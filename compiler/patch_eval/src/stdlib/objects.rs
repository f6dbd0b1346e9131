//! `objects`: object functions.

use crate::errors::{missing_key, EvalResult};
use crate::library::{args, LibraryBuilder, NativeCall, NativeEntry, ParamKind};
use crate::{ObjectMap, Value};

const O: ParamKind = ParamKind::Object;
const S: ParamKind = ParamKind::String;

const TABLE: &[NativeEntry] = &[
    NativeEntry::new("keys", &[O], keys),
    NativeEntry::new("values", &[O], values),
    NativeEntry::new("entries", &[O], entries),
    NativeEntry::new("has", &[O, S], has),
    NativeEntry::new("remove", &[O, S], remove),
    NativeEntry::new("merge", &[O, O], merge),
    NativeEntry::new("size", &[O], size),
];

pub(super) fn library() -> ObjectMap {
    LibraryBuilder::new().functions(TABLE).build()
}

fn keys(_: &NativeCall<'_>, args: &[Value]) -> EvalResult {
    let map = args::object(args, 0)?.borrow();
    Ok(Value::array(map.keys().map(Value::from).collect()))
}

fn values(_: &NativeCall<'_>, args: &[Value]) -> EvalResult {
    let map = args::object(args, 0)?.borrow();
    Ok(Value::array(map.values().cloned().collect()))
}

/// `[key, value]` pairs in insertion order.
fn entries(_: &NativeCall<'_>, args: &[Value]) -> EvalResult {
    let map = args::object(args, 0)?.borrow();
    let pairs = map
        .iter()
        .map(|(key, value)| Value::array(vec![Value::from(key), value.clone()]))
        .collect();
    Ok(Value::array(pairs))
}

fn has(_: &NativeCall<'_>, args: &[Value]) -> EvalResult {
    let key = args::string(args, 1)?;
    Ok(Value::Boolean(args::object(args, 0)?.borrow().contains_key(key)))
}

/// Removes `key` and returns its value.
fn remove(_: &NativeCall<'_>, args: &[Value]) -> EvalResult {
    let object = args::object(args, 0)?;
    let key = args::string(args, 1)?;
    let removed = object.borrow_mut().remove(key);
    removed.ok_or_else(|| missing_key(&args[0], key))
}

/// A new object with the entries of both; the second wins on conflicts.
fn merge(_: &NativeCall<'_>, args: &[Value]) -> EvalResult {
    let mut merged = args::object(args, 0)?.borrow().clone();
    let other = args::object(args, 1)?.borrow();
    merged.extend(other.iter().map(|(key, value)| (key, value.clone())));
    Ok(Value::object(merged))
}

fn size(_: &NativeCall<'_>, args: &[Value]) -> EvalResult {
    Ok(Value::from(args::object(args, 0)?.borrow().len()))
}
