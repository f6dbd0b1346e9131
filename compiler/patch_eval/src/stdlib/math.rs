//! `math`: numeric functions and constants.

use crate::errors::EvalResult;
use crate::library::{args, LibraryBuilder, NativeCall, NativeEntry, ParamKind};
use crate::{ObjectMap, Value};

const N: ParamKind = ParamKind::Number;

const TABLE: &[NativeEntry] = &[
    NativeEntry::new("abs", &[N], abs),
    NativeEntry::new("floor", &[N], floor),
    NativeEntry::new("ceil", &[N], ceil),
    NativeEntry::new("round", &[N], round),
    NativeEntry::new("sqrt", &[N], sqrt),
    NativeEntry::new("sign", &[N], sign),
    NativeEntry::new("min", &[N, N], min),
    NativeEntry::new("max", &[N, N], max),
    NativeEntry::new("clamp", &[N, N, N], clamp),
];

pub(super) fn library() -> ObjectMap {
    LibraryBuilder::new()
        .functions(TABLE)
        .constant("PI", Value::Number(std::f64::consts::PI))
        .constant("E", Value::Number(std::f64::consts::E))
        .constant("NaN", Value::Number(f64::NAN))
        .constant("Infinity", Value::Number(f64::INFINITY))
        .build()
}

fn unary(args: &[Value], op: fn(f64) -> f64) -> EvalResult {
    Ok(Value::Number(op(args::number(args, 0)?)))
}

fn abs(_: &NativeCall<'_>, args: &[Value]) -> EvalResult {
    unary(args, f64::abs)
}

fn floor(_: &NativeCall<'_>, args: &[Value]) -> EvalResult {
    unary(args, f64::floor)
}

fn ceil(_: &NativeCall<'_>, args: &[Value]) -> EvalResult {
    unary(args, f64::ceil)
}

/// Halves round up, so `round(-2.5)` is `-2`.
fn round(_: &NativeCall<'_>, args: &[Value]) -> EvalResult {
    unary(args, |n| (n + 0.5).floor())
}

fn sqrt(_: &NativeCall<'_>, args: &[Value]) -> EvalResult {
    unary(args, f64::sqrt)
}

/// `-1`, `0` or `1`; zero and `NaN` map to themselves.
fn sign(_: &NativeCall<'_>, args: &[Value]) -> EvalResult {
    unary(args, |n| if n == 0.0 || n.is_nan() { n } else { n.signum() })
}

fn min(_: &NativeCall<'_>, args: &[Value]) -> EvalResult {
    Ok(Value::Number(args::number(args, 0)?.min(args::number(args, 1)?)))
}

fn max(_: &NativeCall<'_>, args: &[Value]) -> EvalResult {
    Ok(Value::Number(args::number(args, 0)?.max(args::number(args, 1)?)))
}

fn clamp(call: &NativeCall<'_>, args: &[Value]) -> EvalResult {
    let value = args::number(args, 0)?;
    let low = args::number(args, 1)?;
    let high = args::number(args, 2)?;
    if low > high {
        return Err(call.error(format!(
            "Invalid clamp range: {} is greater than {}",
            Value::Number(low),
            Value::Number(high)
        )));
    }
    Ok(Value::Number(value.max(low).min(high)))
}
