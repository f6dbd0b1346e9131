//! Standard libraries.
//!
//! Builtin libraries are bound as immutable variables in every base scope
//! and cannot be imported. Importable libraries are only created by an
//! `import` naming them. The `strings`, `arrays` and `functions` tables
//! double as the methods of their receiver type: `s.trim()` calls
//! `strings.trim(s)`.

mod arrays;
mod debug;
mod functions;
mod json;
mod math;
mod objects;
mod strings;

use patch_ir::Mutability;

use crate::environment::{ScopeArena, ScopeId};
use crate::operators::to_i32;
use crate::{ObjectMap, Value};

/// Creates a fresh library object.
pub type LibrarySupplier = fn() -> ObjectMap;

/// Which libraries an evaluation provides, by name.
#[derive(Clone)]
pub struct Stdlib {
    builtin: Vec<(&'static str, LibrarySupplier)>,
    importable: Vec<(&'static str, LibrarySupplier)>,
}

impl Stdlib {
    /// `debug`, `math`, `strings`, `arrays`, `objects` and `functions`
    /// built in; `json` importable.
    pub fn builtin() -> Self {
        Stdlib::empty()
            .with_builtin("debug", debug::library)
            .with_builtin("math", math::library)
            .with_builtin("strings", strings::library)
            .with_builtin("arrays", arrays::library)
            .with_builtin("objects", objects::library)
            .with_builtin("functions", functions::library)
            .with_importable("json", json::library)
    }

    pub fn empty() -> Self {
        Stdlib {
            builtin: Vec::new(),
            importable: Vec::new(),
        }
    }

    /// Add or replace a builtin library.
    #[must_use]
    pub fn with_builtin(mut self, name: &'static str, supplier: LibrarySupplier) -> Self {
        self = self.without(name);
        self.builtin.push((name, supplier));
        self
    }

    /// Add or replace a library created on `import`.
    #[must_use]
    pub fn with_importable(mut self, name: &'static str, supplier: LibrarySupplier) -> Self {
        self = self.without(name);
        self.importable.push((name, supplier));
        self
    }

    #[must_use]
    pub fn without(mut self, name: &str) -> Self {
        self.builtin.retain(|(existing, _)| *existing != name);
        self.importable.retain(|(existing, _)| *existing != name);
        self
    }

    pub fn is_builtin(&self, name: &str) -> bool {
        self.builtin.iter().any(|(existing, _)| *existing == name)
    }

    pub fn is_importable(&self, name: &str) -> bool {
        self.importable.iter().any(|(existing, _)| *existing == name)
    }

    pub(crate) fn importable(&self, name: &str) -> Option<ObjectMap> {
        self.importable
            .iter()
            .find(|(existing, _)| *existing == name)
            .map(|(_, supplier)| supplier())
    }

    pub(crate) fn bind_builtins(&self, scopes: &mut ScopeArena, scope: ScopeId) {
        for (name, supplier) in &self.builtin {
            scopes.define_shadowing(scope, name, Value::object(supplier()), Mutability::Immutable);
        }
    }
}

impl Default for Stdlib {
    fn default() -> Self {
        Self::builtin()
    }
}

/// `begin..end` as indices into a sequence of `length` items, if it lies
/// within it. A missing end means the end of the sequence.
fn checked_range(begin: f64, end: Option<f64>, length: usize) -> Option<(usize, usize)> {
    let begin = usize::try_from(to_i32(begin)).ok()?;
    let end = match end {
        Some(end) => usize::try_from(to_i32(end)).ok()?,
        None => length,
    };
    (begin <= end && end <= length).then_some((begin, end))
}

/// Methods of strings, arrays and functions, shared by one evaluation.
pub(crate) struct MethodTables {
    strings: ObjectMap,
    arrays: ObjectMap,
    functions: ObjectMap,
}

impl MethodTables {
    pub(crate) fn new() -> Self {
        MethodTables {
            strings: strings::library(),
            arrays: arrays::library(),
            functions: functions::library(),
        }
    }

    /// `receiver.name` as a function with `receiver` bound as its first
    /// argument.
    pub(crate) fn method(&self, receiver: &Value, name: &str) -> Option<Value> {
        let table = match receiver {
            Value::String(_) => &self.strings,
            Value::Array(_) => &self.arrays,
            Value::Function(_) => &self.functions,
            _ => return None,
        };
        match table.get(name)? {
            Value::Function(function) => Some(Value::function(function.bind(receiver.clone()))),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests;
