//! `arrays`: array functions, also available as array methods.
//!
//! Callbacks run against a snapshot of the elements taken before the first
//! call, so a callback may modify the array it is iterating.

use std::rc::Rc;

use super::checked_range;
use crate::errors::EvalResult;
use crate::exec::array_slot;
use crate::library::{args, LibraryBuilder, NativeCall, NativeEntry, ParamKind};
use crate::{ObjectMap, PatchFunction, Value};

const A: ParamKind = ParamKind::Array;
const N: ParamKind = ParamKind::Number;
const F: ParamKind = ParamKind::Function;
const ANY: ParamKind = ParamKind::Any;

const TABLE: &[NativeEntry] = &[
    NativeEntry::new("push", &[A, ANY], push),
    NativeEntry::new("pop", &[A], pop),
    NativeEntry::new("insert", &[A, N, ANY], insert),
    NativeEntry::new("removeAt", &[A, N], remove_at),
    NativeEntry::new("indexOf", &[A, ANY], index_of),
    NativeEntry::new("slice", &[A, N], slice_from),
    NativeEntry::new("slice", &[A, N, N], slice),
    NativeEntry::new("reverse", &[A], reverse),
    NativeEntry::new("join", &[A, ParamKind::String], join),
    NativeEntry::new("map", &[A, F], map),
    NativeEntry::new("filter", &[A, F], filter),
    NativeEntry::new("forEach", &[A, F], for_each),
    NativeEntry::new("reduce", &[A, F, ANY], reduce),
    NativeEntry::new("any", &[A, F], any),
    NativeEntry::new("all", &[A, F], all),
    NativeEntry::new("find", &[A, F], find),
    NativeEntry::new("isEmpty", &[A], is_empty),
];

pub(super) fn library() -> ObjectMap {
    LibraryBuilder::new().functions(TABLE).build()
}

fn snapshot(args: &[Value]) -> EvalResult<Vec<Value>> {
    let items = args::array(args, 0)?.borrow().clone();
    Ok(items)
}

fn callback(args: &[Value]) -> EvalResult<&Rc<PatchFunction>> {
    args::function(args, 1)
}

/// Appends in place.
fn push(_: &NativeCall<'_>, args: &[Value]) -> EvalResult {
    let value = args.get(1).cloned().unwrap_or(Value::Null);
    args::array(args, 0)?.borrow_mut().push(value);
    Ok(Value::Null)
}

fn pop(call: &NativeCall<'_>, args: &[Value]) -> EvalResult {
    let popped = args::array(args, 0)?.borrow_mut().pop();
    popped.ok_or_else(|| call.error("Tried to pop from an empty array"))
}

/// Inserts before `index`; an index equal to the length appends.
fn insert(_: &NativeCall<'_>, args: &[Value]) -> EvalResult {
    let items = args::array(args, 0)?;
    let index = args::number(args, 1)?;
    let value = args.get(2).cloned().unwrap_or(Value::Null);
    let mut items = items.borrow_mut();
    let len = items.len();
    let slot = match checked_range(index, None, len) {
        Some((slot, _)) => slot,
        None => array_slot(index, len)?,
    };
    items.insert(slot, value);
    Ok(Value::Null)
}

/// Removes and returns the element at `index`; negative indices count
/// from the end.
fn remove_at(_: &NativeCall<'_>, args: &[Value]) -> EvalResult {
    let items = args::array(args, 0)?;
    let mut items = items.borrow_mut();
    let slot = array_slot(args::number(args, 1)?, items.len())?;
    Ok(items.remove(slot))
}

fn index_of(_: &NativeCall<'_>, args: &[Value]) -> EvalResult {
    let needle = args.get(1).cloned().unwrap_or(Value::Null);
    let items = args::array(args, 0)?.borrow();
    Ok(items
        .iter()
        .position(|item| *item == needle)
        .map_or(Value::Number(-1.0), Value::from))
}

fn slice_from(call: &NativeCall<'_>, args: &[Value]) -> EvalResult {
    sliced(call, args, None)
}

fn slice(call: &NativeCall<'_>, args: &[Value]) -> EvalResult {
    sliced(call, args, Some(args::number(args, 2)?))
}

fn sliced(call: &NativeCall<'_>, args: &[Value], end: Option<f64>) -> EvalResult {
    let items = args::array(args, 0)?.borrow();
    match checked_range(args::number(args, 1)?, end, items.len()) {
        Some((begin, end)) => Ok(Value::array(items[begin..end].to_vec())),
        None => Err(call.error(format!(
            "Invalid slice range for array of length {}",
            items.len()
        ))),
    }
}

/// A new array in reverse order.
fn reverse(_: &NativeCall<'_>, args: &[Value]) -> EvalResult {
    let mut items = snapshot(args)?;
    items.reverse();
    Ok(Value::array(items))
}

fn join(_: &NativeCall<'_>, args: &[Value]) -> EvalResult {
    let separator = args::string(args, 1)?;
    let items = args::array(args, 0)?.borrow();
    let joined = items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(separator);
    Ok(Value::from(joined))
}

fn map(call: &NativeCall<'_>, args: &[Value]) -> EvalResult {
    let function = callback(args)?;
    let mapped = snapshot(args)?
        .into_iter()
        .map(|item| call.call(function, vec![item]))
        .collect::<EvalResult<Vec<_>>>()?;
    Ok(Value::array(mapped))
}

fn filter(call: &NativeCall<'_>, args: &[Value]) -> EvalResult {
    let function = callback(args)?;
    let mut kept = Vec::new();
    for item in snapshot(args)? {
        if call.call(function, vec![item.clone()])?.is_truthy() {
            kept.push(item);
        }
    }
    Ok(Value::array(kept))
}

fn for_each(call: &NativeCall<'_>, args: &[Value]) -> EvalResult {
    let function = callback(args)?;
    for item in snapshot(args)? {
        call.call(function, vec![item])?;
    }
    Ok(Value::Null)
}

/// `reduce(array, (accumulator, item) -> ..., initial)`.
fn reduce(call: &NativeCall<'_>, args: &[Value]) -> EvalResult {
    let function = callback(args)?;
    let mut accumulator = args.get(2).cloned().unwrap_or(Value::Null);
    for item in snapshot(args)? {
        accumulator = call.call(function, vec![accumulator, item])?;
    }
    Ok(accumulator)
}

fn any(call: &NativeCall<'_>, args: &[Value]) -> EvalResult {
    let function = callback(args)?;
    for item in snapshot(args)? {
        if call.call(function, vec![item])?.is_truthy() {
            return Ok(Value::Boolean(true));
        }
    }
    Ok(Value::Boolean(false))
}

fn all(call: &NativeCall<'_>, args: &[Value]) -> EvalResult {
    let function = callback(args)?;
    for item in snapshot(args)? {
        if !call.call(function, vec![item])?.is_truthy() {
            return Ok(Value::Boolean(false));
        }
    }
    Ok(Value::Boolean(true))
}

/// The first matching element, or `null`.
fn find(call: &NativeCall<'_>, args: &[Value]) -> EvalResult {
    let function = callback(args)?;
    for item in snapshot(args)? {
        if call.call(function, vec![item.clone()])?.is_truthy() {
            return Ok(item);
        }
    }
    Ok(Value::Null)
}

fn is_empty(_: &NativeCall<'_>, args: &[Value]) -> EvalResult {
    Ok(Value::Boolean(args::array(args, 0)?.borrow().is_empty()))
}
