//! Storage locations named by references.
//!
//! A reference is resolved once into a [`Place`], evaluating its receiver
//! and index, and the place is then read, written or deleted. Compound
//! assignment and `++` go through one place, so `a[f()] += 1` calls `f`
//! once.

use patch_ir::{ReferenceKind, SourceSpan};

use crate::errors::{index_out_of_bounds, invalid_access, missing_key, EvalError, EvalResult};
use crate::operators::to_i32;
use crate::{EvaluationContext, ObjectRef, Value};

pub(crate) enum Place<'a> {
    Variable(&'a str),
    Property { receiver: Value, name: &'a str },
    Index { receiver: Value, index: Value },
}

impl EvaluationContext {
    pub(crate) fn resolve<'a>(&self, reference: &'a ReferenceKind) -> EvalResult<Place<'a>> {
        Ok(match reference {
            ReferenceKind::Variable(name) => Place::Variable(name),
            ReferenceKind::ImplicitRoot(name) => Place::Property {
                receiver: Value::Object(self.root().clone()),
                name,
            },
            ReferenceKind::Property { object, name, .. } => Place::Property {
                receiver: self.evaluate(object)?,
                name,
            },
            ReferenceKind::Index { object, index } => Place::Index {
                receiver: self.evaluate(object)?,
                index: self.evaluate(index)?,
            },
        })
    }
}

impl Place<'_> {
    pub(crate) fn get(&self, context: &EvaluationContext, span: &SourceSpan) -> EvalResult {
        match self {
            Place::Variable(name) => context.get_variable(name),
            Place::Property { receiver, name } => get_property(context, receiver, name),
            Place::Index { receiver, index } => get_index(receiver, index),
        }
        .map_err(|error| error.or_span(span))
    }

    pub(crate) fn set(
        &self,
        context: &EvaluationContext,
        value: Value,
        span: &SourceSpan,
    ) -> EvalResult<()> {
        match self {
            Place::Variable(name) => context.set_variable(name, value),
            Place::Property {
                receiver: Value::Object(map),
                name,
            } => {
                map.borrow_mut().insert(*name, value);
                Ok(())
            }
            Place::Property { receiver, name } => Err(invalid_access(format!(
                "Tried to write property {name} of {receiver}. Only objects have properties."
            ))),
            Place::Index { receiver, index } => set_index(receiver, index, value),
        }
        .map_err(|error| error.or_span(span))
    }

    pub(crate) fn delete(&self, context: &EvaluationContext, span: &SourceSpan) -> EvalResult<()> {
        match self {
            Place::Variable(name) => context.delete_variable(name),
            Place::Property {
                receiver: receiver @ Value::Object(map),
                name,
            } => remove_key(receiver, map, name),
            Place::Property { receiver, name } => Err(invalid_access(format!(
                "Tried to delete property {name} of {receiver}. Only objects have properties."
            ))),
            Place::Index { receiver, index } => delete_index(receiver, index),
        }
        .map_err(|error| error.or_span(span))
    }
}

fn get_property(context: &EvaluationContext, receiver: &Value, name: &str) -> EvalResult {
    match receiver {
        Value::Object(map) => map
            .borrow()
            .get(name)
            .cloned()
            .ok_or_else(|| missing_key(receiver, name)),
        Value::Array(items) if name == "length" => Ok(Value::from(items.borrow().len())),
        Value::Array(_) | Value::String(_) | Value::Function(_) => context
            .methods()
            .method(receiver, name)
            .ok_or_else(|| {
                invalid_access(format!("Tried to read invalid property {name} of {receiver}."))
            }),
        _ => Err(invalid_access(format!(
            "Tried to read property {name} of {receiver}. Only objects and arrays have properties."
        ))),
    }
}

fn remove_key(receiver: &Value, map: &ObjectRef, key: &str) -> EvalResult<()> {
    if map.borrow_mut().remove(key).is_some() {
        Ok(())
    } else {
        Err(missing_key(receiver, key))
    }
}

/// Position of `index` in an array of `len` elements. Negative indices
/// count from the end; fractions are truncated first.
pub(crate) fn array_slot(index: f64, len: usize) -> EvalResult<usize> {
    let index = i64::from(to_i32(index));
    let size = i64::try_from(len).unwrap_or(i64::MAX);
    let slot = if index < 0 { size + index } else { index };
    usize::try_from(slot)
        .ok()
        .filter(|&slot| slot < len)
        .ok_or_else(|| index_out_of_bounds(index, len))
}

fn get_index(receiver: &Value, index: &Value) -> EvalResult {
    match (receiver, index) {
        (Value::Object(map), Value::String(key)) => map
            .borrow()
            .get(key)
            .cloned()
            .ok_or_else(|| missing_key(receiver, key)),
        (Value::Array(items), Value::Number(n)) => {
            let items = items.borrow();
            let slot = array_slot(*n, items.len())?;
            Ok(items[slot].clone())
        }
        _ => Err(bad_index(receiver, index)),
    }
}

fn set_index(receiver: &Value, index: &Value, value: Value) -> EvalResult<()> {
    match (receiver, index) {
        (Value::Object(map), Value::String(key)) => {
            map.borrow_mut().insert(&**key, value);
            Ok(())
        }
        (Value::Array(items), Value::Number(n)) => {
            let mut items = items.borrow_mut();
            let slot = array_slot(*n, items.len())?;
            items[slot] = value;
            Ok(())
        }
        _ => Err(bad_index(receiver, index)),
    }
}

fn delete_index(receiver: &Value, index: &Value) -> EvalResult<()> {
    match (receiver, index) {
        (Value::Object(map), Value::String(key)) => remove_key(receiver, map, key),
        (Value::Array(items), Value::Number(n)) => {
            let mut items = items.borrow_mut();
            let slot = array_slot(*n, items.len())?;
            items.remove(slot);
            Ok(())
        }
        _ => Err(bad_index(receiver, index)),
    }
}

#[cold]
fn bad_index(receiver: &Value, index: &Value) -> EvalError {
    match receiver {
        Value::Object(_) => invalid_access(format!(
            "Tried to index object by {index}. Objects can only be indexed by string"
        )),
        Value::Array(_) => invalid_access(format!(
            "Tried to index array by {index}. Arrays can only be indexed by number."
        )),
        _ => invalid_access(format!(
            "Tried to index {receiver} with {index}. Only arrays and objects are indexable."
        )),
    }
}
