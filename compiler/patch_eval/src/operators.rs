//! Unary, binary and update operators on values.
//!
//! Bitwise operators work on numbers truncated to 32-bit integers and on
//! booleans as non-short-circuit logic. Equality never fails; every other
//! operator rejects operand types it has no meaning for.

use patch_ir::{BinaryOp, UnaryOp, UpdateOp};

use crate::errors::{invalid_operand, EvalError, EvalResult};
use crate::{ObjectMap, Value};

/// Truncate towards zero into the 32-bit range; `NaN` becomes zero.
#[allow(
    clippy::cast_possible_truncation,
    reason = "saturating truncation is the defined integer conversion"
)]
#[inline]
pub(crate) fn to_i32(n: f64) -> i32 {
    n as i32
}

/// Repeat count for `*`; negative counts repeat nothing.
fn repeat_count(n: f64) -> usize {
    usize::try_from(to_i32(n)).unwrap_or(0)
}

pub fn binary(op: BinaryOp, left: &Value, right: &Value) -> EvalResult {
    match op {
        BinaryOp::Add => add(left, right),
        BinaryOp::Sub => match (left, right) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a - b)),
            _ => Err(invalid_operand(format!("Can't subtract {right} from {left}"))),
        },
        BinaryOp::Mul => multiply(left, right),
        BinaryOp::Div => numeric(left, right, |a, b| a / b, || {
            format!("Can't divide {left} by {right}")
        }),
        BinaryOp::Mod => numeric(left, right, |a, b| a % b, || {
            format!("Can't take {left} modulo {right}")
        }),
        BinaryOp::Pow => numeric(left, right, f64::powf, || {
            format!("Can't take {left} to the {right}")
        }),
        BinaryOp::BitAnd => bitwise(left, right, "and", |a, b| a & b, |a, b| a && b),
        BinaryOp::BitOr => bitwise(left, right, "or", |a, b| a | b, |a, b| a || b),
        BinaryOp::BitXor => bitwise(left, right, "xor", |a, b| a ^ b, |a, b| a ^ b),
        BinaryOp::Eq => Ok(Value::Boolean(left == right)),
        BinaryOp::NotEq => Ok(Value::Boolean(left != right)),
        BinaryOp::Lt => compare(left, right, |a, b| a < b),
        BinaryOp::LtEq => compare(left, right, |a, b| a <= b),
        BinaryOp::Gt => compare(left, right, |a, b| a > b),
        BinaryOp::GtEq => compare(left, right, |a, b| a >= b),
        BinaryOp::In => contains(left, right),
    }
}

fn add(left: &Value, right: &Value) -> EvalResult {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
        (Value::String(a), Value::String(b)) => {
            let mut joined = String::with_capacity(a.len() + b.len());
            joined.push_str(a);
            joined.push_str(b);
            Ok(Value::string(joined))
        }
        (Value::Array(a), Value::Array(b)) => {
            let mut items = a.borrow().clone();
            items.extend(b.borrow().iter().cloned());
            Ok(Value::array(items))
        }
        (Value::Object(a), Value::Object(b)) => {
            let mut merged: ObjectMap = a.borrow().clone();
            merged.extend(b.borrow().iter().map(|(k, v)| (k, v.clone())));
            Ok(Value::object(merged))
        }
        _ => Err(invalid_operand(format!(
            "Can't add {left} and {right} together"
        ))),
    }
}

fn multiply(left: &Value, right: &Value) -> EvalResult {
    let Value::Number(count) = right else {
        return Err(invalid_operand(format!("Can't multiply by {right}")));
    };
    match left {
        Value::Number(n) => Ok(Value::Number(n * count)),
        Value::String(s) => Ok(Value::string(s.repeat(repeat_count(*count)))),
        Value::Array(items) => {
            let items = items.borrow();
            let times = repeat_count(*count);
            let mut repeated = Vec::with_capacity(items.len().saturating_mul(times));
            for _ in 0..times {
                repeated.extend(items.iter().cloned());
            }
            Ok(Value::array(repeated))
        }
        _ => Err(invalid_operand(format!(
            "Can't multiply {left} with {right}"
        ))),
    }
}

fn numeric(
    left: &Value,
    right: &Value,
    apply: impl FnOnce(f64, f64) -> f64,
    message: impl FnOnce() -> String,
) -> EvalResult {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(apply(*a, *b))),
        _ => Err(invalid_operand(message())),
    }
}

fn bitwise(
    left: &Value,
    right: &Value,
    name: &str,
    on_ints: impl FnOnce(i32, i32) -> i32,
    on_bools: impl FnOnce(bool, bool) -> bool,
) -> EvalResult {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => {
            Ok(Value::Number(f64::from(on_ints(to_i32(*a), to_i32(*b)))))
        }
        (Value::Boolean(a), Value::Boolean(b)) => Ok(Value::Boolean(on_bools(*a, *b))),
        _ => Err(invalid_operand(format!(
            "Can't apply {name} to {left} and {right}"
        ))),
    }
}

fn compare(left: &Value, right: &Value, test: impl FnOnce(f64, f64) -> bool) -> EvalResult {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Boolean(test(*a, *b))),
        _ => Err(invalid_operand(format!("Can't compare {left} and {right}"))),
    }
}

fn contains(left: &Value, right: &Value) -> EvalResult {
    match (left, right) {
        (_, Value::Array(items)) => Ok(Value::Boolean(items.borrow().contains(left))),
        (Value::String(key), Value::Object(map)) => {
            Ok(Value::Boolean(map.borrow().contains_key(key)))
        }
        _ => Err(invalid_operand(format!(
            "Can't check if {left} is in {right}"
        ))),
    }
}

pub fn unary(op: UnaryOp, value: &Value) -> EvalResult {
    match (op, value) {
        (UnaryOp::Neg, Value::Number(n)) => Ok(Value::Number(-n)),
        (UnaryOp::Not, Value::Boolean(b)) => Ok(Value::Boolean(!b)),
        (UnaryOp::BitNot, Value::Number(n)) => Ok(Value::Number(f64::from(!to_i32(*n)))),
        (UnaryOp::Neg, _) => Err(invalid_operand(format!(
            "Can't negate {value}. Only numbers are supported."
        ))),
        (UnaryOp::Not, _) => Err(not_boolean(value)),
        (UnaryOp::BitNot, _) => Err(invalid_operand(format!(
            "Can't apply bitwise not to {value}. Only numbers are supported."
        ))),
    }
}

/// New value for `++`, `--` or `!!`.
pub fn update(op: UpdateOp, value: &Value) -> EvalResult {
    match (op, value) {
        (UpdateOp::Increment, Value::Number(n)) => Ok(Value::Number(n + 1.0)),
        (UpdateOp::Decrement, Value::Number(n)) => Ok(Value::Number(n - 1.0)),
        (UpdateOp::Toggle, Value::Boolean(b)) => Ok(Value::Boolean(!b)),
        (UpdateOp::Increment, _) => Err(invalid_operand(format!(
            "Can't increment {value}. Only numbers are supported."
        ))),
        (UpdateOp::Decrement, _) => Err(invalid_operand(format!(
            "Can't decrement {value}. Only numbers are supported."
        ))),
        (UpdateOp::Toggle, _) => Err(not_boolean(value)),
    }
}

fn not_boolean(value: &Value) -> EvalError {
    invalid_operand(format!(
        "Can't apply boolean not to {value}. Only booleans are supported."
    ))
}

#[cfg(test)]
mod tests;
