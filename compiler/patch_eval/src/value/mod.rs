//! Runtime values.
//!
//! Primitives are immutable and copied freely. Arrays, objects and
//! functions are reference types: cloning a [`Value`] clones the handle,
//! so every holder sees mutations made through any other.

mod display;
mod function;
mod object;

use std::cell::RefCell;
use std::rc::Rc;

use patch_ir::TypeTest;

pub use display::format_number;
pub use function::{DefinedFunction, PatchFunction};
pub use object::ObjectMap;

/// Shared, mutable array storage.
pub type ArrayRef = Rc<RefCell<Vec<Value>>>;
/// Shared, mutable object storage.
pub type ObjectRef = Rc<RefCell<ObjectMap>>;

#[derive(Clone)]
pub enum Value {
    Null,
    Boolean(bool),
    Number(f64),
    String(Rc<str>),
    Array(ArrayRef),
    Object(ObjectRef),
    Function(Rc<PatchFunction>),
}

impl Value {
    #[inline]
    pub fn string(text: impl Into<Rc<str>>) -> Value {
        Value::String(text.into())
    }

    /// A new array holding `items`.
    pub fn array(items: Vec<Value>) -> Value {
        Value::Array(Rc::new(RefCell::new(items)))
    }

    /// A new object holding `map`.
    pub fn object(map: ObjectMap) -> Value {
        Value::Object(new_object(map))
    }

    pub fn function(function: PatchFunction) -> Value {
        Value::Function(Rc::new(function))
    }

    /// Name used in error messages and `is` tests.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Function(_) => "function",
        }
    }

    pub fn matches(&self, ty: TypeTest) -> bool {
        matches!(
            (self, ty),
            (Value::Null, TypeTest::Null)
                | (Value::Boolean(_), TypeTest::Boolean)
                | (Value::Number(_), TypeTest::Number)
                | (Value::String(_), TypeTest::String)
                | (Value::Array(_), TypeTest::Array)
                | (Value::Object(_), TypeTest::Object)
                | (Value::Function(_), TypeTest::Function)
        )
    }

    /// Empty strings, arrays and objects, zero, `false` and `null` are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Boolean(b) => *b,
            Value::Number(n) => *n != 0.0,
            Value::String(s) => !s.is_empty(),
            Value::Array(items) => !items.borrow().is_empty(),
            Value::Object(map) => !map.borrow().is_empty(),
            Value::Function(_) => true,
        }
    }

    #[inline]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    pub fn as_array(&self) -> Option<&ArrayRef> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    #[inline]
    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    #[inline]
    pub fn as_function(&self) -> Option<&Rc<PatchFunction>> {
        match self {
            Value::Function(function) => Some(function),
            _ => None,
        }
    }
}

/// A new object handle.
pub fn new_object(map: ObjectMap) -> ObjectRef {
    Rc::new(RefCell::new(map))
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<usize> for Value {
    #[allow(
        clippy::cast_precision_loss,
        reason = "lengths and indices stay far below 2^53"
    )]
    fn from(value: usize) -> Self {
        Value::Number(value as f64)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.into())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value.into())
    }
}

/// Structural equality: arrays and objects compare by contents, functions
/// by identity. Numbers follow IEEE comparison, so `NaN` is unequal to
/// itself.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        Equality::default().equal(self, other)
    }
}

/// Pairs of containers currently being compared. A pair met again while
/// it is still being compared is treated as equal, so cyclic structures
/// terminate.
#[derive(Default)]
struct Equality {
    active: Vec<(usize, usize)>,
}

impl Equality {
    #[allow(clippy::float_cmp, reason = "values compare with IEEE equality")]
    fn equal(&mut self, a: &Value, b: &Value) -> bool {
        match (a, b) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(x), Value::Boolean(y)) => x == y,
            (Value::Number(x), Value::Number(y)) => x == y,
            (Value::String(x), Value::String(y)) => x == y,
            (Value::Function(x), Value::Function(y)) => Rc::ptr_eq(x, y),
            (Value::Array(x), Value::Array(y)) => {
                if Rc::ptr_eq(x, y) {
                    return true;
                }
                self.guarded(pair(x, y), |eq| {
                    let (x, y) = (x.borrow(), y.borrow());
                    x.len() == y.len() && x.iter().zip(y.iter()).all(|(a, b)| eq.equal(a, b))
                })
            }
            (Value::Object(x), Value::Object(y)) => {
                if Rc::ptr_eq(x, y) {
                    return true;
                }
                self.guarded(pair(x, y), |eq| {
                    let (x, y) = (x.borrow(), y.borrow());
                    x.len() == y.len()
                        && x.iter()
                            .all(|(key, a)| y.get(key).is_some_and(|b| eq.equal(a, b)))
                })
            }
            _ => false,
        }
    }

    fn guarded(&mut self, key: (usize, usize), compare: impl FnOnce(&mut Self) -> bool) -> bool {
        if self.active.contains(&key) {
            return true;
        }
        self.active.push(key);
        let result = compare(self);
        self.active.pop();
        result
    }
}

fn pair<T>(x: &Rc<T>, y: &Rc<T>) -> (usize, usize) {
    (Rc::as_ptr(x) as usize, Rc::as_ptr(y) as usize)
}

#[cfg(test)]
mod tests;
