//! `strings`: text functions, also available as string methods.
//!
//! Lengths and indices count characters, not bytes.

use super::checked_range;
use crate::errors::{index_out_of_bounds, EvalResult};
use crate::library::{args, LibraryBuilder, NativeCall, NativeEntry, ParamKind};
use crate::operators::to_i32;
use crate::{ObjectMap, Value};

const S: ParamKind = ParamKind::String;
const N: ParamKind = ParamKind::Number;

const TABLE: &[NativeEntry] = &[
    NativeEntry::new("length", &[S], length),
    NativeEntry::new("toUpperCase", &[S], to_upper_case),
    NativeEntry::new("toLowerCase", &[S], to_lower_case),
    NativeEntry::new("trim", &[S], trim),
    NativeEntry::new("contains", &[S, S], contains),
    NativeEntry::new("startsWith", &[S, S], starts_with),
    NativeEntry::new("endsWith", &[S, S], ends_with),
    NativeEntry::new("indexOf", &[S, S], index_of),
    NativeEntry::new("split", &[S, S], split),
    NativeEntry::new("replace", &[S, S, S], replace),
    NativeEntry::new("substring", &[S, N], substring_from),
    NativeEntry::new("substring", &[S, N, N], substring),
    NativeEntry::new("charAt", &[S, N], char_at),
    NativeEntry::new("repeat", &[S, N], repeat),
    NativeEntry::new("isEmpty", &[S], is_empty),
];

pub(super) fn library() -> ObjectMap {
    LibraryBuilder::new().functions(TABLE).build()
}

fn length(_: &NativeCall<'_>, args: &[Value]) -> EvalResult {
    Ok(Value::from(args::string(args, 0)?.chars().count()))
}

fn to_upper_case(_: &NativeCall<'_>, args: &[Value]) -> EvalResult {
    Ok(Value::from(args::string(args, 0)?.to_uppercase()))
}

fn to_lower_case(_: &NativeCall<'_>, args: &[Value]) -> EvalResult {
    Ok(Value::from(args::string(args, 0)?.to_lowercase()))
}

fn trim(_: &NativeCall<'_>, args: &[Value]) -> EvalResult {
    Ok(Value::from(args::string(args, 0)?.trim()))
}

fn contains(_: &NativeCall<'_>, args: &[Value]) -> EvalResult {
    let text = args::string(args, 0)?;
    Ok(Value::Boolean(text.contains(args::string(args, 1)?)))
}

fn starts_with(_: &NativeCall<'_>, args: &[Value]) -> EvalResult {
    let text = args::string(args, 0)?;
    Ok(Value::Boolean(text.starts_with(args::string(args, 1)?)))
}

fn ends_with(_: &NativeCall<'_>, args: &[Value]) -> EvalResult {
    let text = args::string(args, 0)?;
    Ok(Value::Boolean(text.ends_with(args::string(args, 1)?)))
}

/// Character index of the first occurrence, or `-1`.
fn index_of(_: &NativeCall<'_>, args: &[Value]) -> EvalResult {
    let text = args::string(args, 0)?;
    Ok(text
        .find(args::string(args, 1)?)
        .map_or(Value::Number(-1.0), |byte| Value::from(text[..byte].chars().count())))
}

/// Splits on every occurrence of a literal separator. An empty separator
/// splits into characters.
fn split(_: &NativeCall<'_>, args: &[Value]) -> EvalResult {
    let text = args::string(args, 0)?;
    let separator = args::string(args, 1)?;
    let parts: Vec<Value> = if separator.is_empty() {
        text.chars().map(|c| Value::from(c.to_string())).collect()
    } else {
        text.split(separator).map(Value::from).collect()
    };
    Ok(Value::array(parts))
}

fn replace(_: &NativeCall<'_>, args: &[Value]) -> EvalResult {
    let text = args::string(args, 0)?;
    let from = args::string(args, 1)?;
    let to = args::string(args, 2)?;
    Ok(Value::from(text.replace(from, to)))
}

fn substring_from(call: &NativeCall<'_>, args: &[Value]) -> EvalResult {
    slice(call, args::string(args, 0)?, args::number(args, 1)?, None)
}

fn substring(call: &NativeCall<'_>, args: &[Value]) -> EvalResult {
    let text = args::string(args, 0)?;
    slice(call, text, args::number(args, 1)?, Some(args::number(args, 2)?))
}

fn slice(call: &NativeCall<'_>, text: &str, begin: f64, end: Option<f64>) -> EvalResult {
    let length = text.chars().count();
    match checked_range(begin, end, length) {
        Some((begin, end)) => Ok(Value::from(
            text.chars().skip(begin).take(end - begin).collect::<String>(),
        )),
        None => Err(call.error(format!(
            "Invalid substring range for string of length {length}"
        ))),
    }
}

fn char_at(_: &NativeCall<'_>, args: &[Value]) -> EvalResult {
    let text = args::string(args, 0)?;
    let index = to_i32(args::number(args, 1)?);
    usize::try_from(index)
        .ok()
        .and_then(|i| text.chars().nth(i))
        .map(|c| Value::from(c.to_string()))
        .ok_or_else(|| index_out_of_bounds(i64::from(index), text.chars().count()))
}

/// Negative counts give the empty string.
fn repeat(_: &NativeCall<'_>, args: &[Value]) -> EvalResult {
    let text = args::string(args, 0)?;
    let count = usize::try_from(to_i32(args::number(args, 1)?)).unwrap_or(0);
    Ok(Value::from(text.repeat(count)))
}

fn is_empty(_: &NativeCall<'_>, args: &[Value]) -> EvalResult {
    Ok(Value::Boolean(args::string(args, 0)?.is_empty()))
}
