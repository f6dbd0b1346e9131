//! Binding host functions as script values.
//!
//! A library is a registration table of [`NativeEntry`] rows. Rows sharing
//! a name are overloads of one function, selected by argument count; each
//! argument is checked against the row's declared [`ParamKind`] before the
//! native function runs.

pub mod args;

use std::rc::Rc;

use patch_ir::SourceSpan;

use crate::errors::{argument_type, builtin_failed, no_overload, EvalError, EvalResult};
use crate::{EvaluationContext, ObjectMap, PatchFunction, Value};

/// Declared type of a native parameter.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ParamKind {
    Any,
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
    Function,
}

impl ParamKind {
    /// Name used in type mismatch errors.
    pub const fn name(self) -> &'static str {
        match self {
            ParamKind::Any => "value",
            ParamKind::Null => "null",
            ParamKind::Boolean => "boolean",
            ParamKind::Number => "number",
            ParamKind::String => "string",
            ParamKind::Array => "array",
            ParamKind::Object => "object",
            ParamKind::Function => "function",
        }
    }

    pub fn accepts(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (ParamKind::Any, _)
                | (ParamKind::Null, Value::Null)
                | (ParamKind::Boolean, Value::Boolean(_))
                | (ParamKind::Number, Value::Number(_))
                | (ParamKind::String, Value::String(_))
                | (ParamKind::Array, Value::Array(_))
                | (ParamKind::Object, Value::Object(_))
                | (ParamKind::Function, Value::Function(_))
        )
    }
}

/// Signature of every native function. Arguments have already been
/// checked against the declared kinds.
pub type NativeFn = fn(&NativeCall<'_>, &[Value]) -> EvalResult;

/// One overload in a registration table.
#[derive(Clone, Copy)]
pub struct NativeEntry {
    pub name: &'static str,
    pub params: &'static [ParamKind],
    pub call: NativeFn,
    /// Errors are reported as "Error while calling builtin function"
    /// with the original as cause. Off for functions whose own message is
    /// the point, like assertions.
    pub wrap_errors: bool,
}

impl NativeEntry {
    pub const fn new(name: &'static str, params: &'static [ParamKind], call: NativeFn) -> Self {
        NativeEntry {
            name,
            params,
            call,
            wrap_errors: true,
        }
    }

    pub const fn unwrapped(
        name: &'static str,
        params: &'static [ParamKind],
        call: NativeFn,
    ) -> Self {
        NativeEntry {
            name,
            params,
            call,
            wrap_errors: false,
        }
    }
}

struct Overload {
    params: &'static [ParamKind],
    call: NativeFn,
    wrap_errors: bool,
}

/// All overloads of one native function name.
pub struct NativeFunction {
    name: String,
    overloads: Vec<Overload>,
}

impl NativeFunction {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn invoke(&self, call: &NativeCall<'_>, args: &[Value]) -> EvalResult {
        let span = call.span;
        let overload = self
            .overloads
            .iter()
            .find(|overload| overload.params.len() == args.len())
            .ok_or_else(|| no_overload(&self.name, args.len()).with_span(span.clone()))?;

        for (index, (kind, arg)) in overload.params.iter().zip(args).enumerate() {
            if !kind.accepts(arg) {
                return Err(argument_type(index, kind.name(), arg).with_span(span.clone()));
            }
        }

        tracing::trace!(name = %self.name, args = args.len(), "native call");
        (overload.call)(call, args).map_err(|error| {
            let error = error.or_span(span);
            if overload.wrap_errors {
                builtin_failed(&self.name, span, error)
            } else {
                error
            }
        })
    }
}

/// The calling context handed to native functions.
pub struct NativeCall<'a> {
    context: &'a EvaluationContext,
    span: &'a SourceSpan,
}

impl<'a> NativeCall<'a> {
    pub(crate) fn new(context: &'a EvaluationContext, span: &'a SourceSpan) -> Self {
        NativeCall { context, span }
    }

    /// The caller's context.
    #[inline]
    pub fn context(&self) -> &'a EvaluationContext {
        self.context
    }

    /// The call expression.
    #[inline]
    pub fn span(&self) -> &'a SourceSpan {
        self.span
    }

    /// Call a script value back, reporting errors at this call.
    pub fn call(&self, function: &Rc<PatchFunction>, args: Vec<Value>) -> EvalResult {
        self.context.call_function(function, args, self.span)
    }

    /// An error located at this call.
    pub fn error(&self, message: impl Into<String>) -> EvalError {
        EvalError::new(message).with_span(self.span.clone())
    }
}

/// Collects registration tables and constants into a library object.
#[derive(Default)]
pub struct LibraryBuilder {
    functions: Vec<NativeFunction>,
    constants: Vec<(&'static str, Value)>,
}

impl LibraryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every row of `table`.
    ///
    /// # Panics
    /// If two rows share both name and argument count.
    #[must_use]
    pub fn functions(mut self, table: &[NativeEntry]) -> Self {
        for entry in table {
            self = self.function(*entry);
        }
        self
    }

    #[must_use]
    pub fn function(mut self, entry: NativeEntry) -> Self {
        let overload = Overload {
            params: entry.params,
            call: entry.call,
            wrap_errors: entry.wrap_errors,
        };
        if let Some(function) = self.functions.iter_mut().find(|f| f.name == entry.name) {
            assert!(
                function
                    .overloads
                    .iter()
                    .all(|o| o.params.len() != entry.params.len()),
                "Library function {} has multiple overloads with the same number of arguments",
                entry.name
            );
            function.overloads.push(overload);
        } else {
            self.functions.push(NativeFunction {
                name: entry.name.to_string(),
                overloads: vec![overload],
            });
        }
        self
    }

    #[must_use]
    pub fn constant(mut self, name: &'static str, value: Value) -> Self {
        self.constants.push((name, value));
        self
    }

    pub fn build(self) -> ObjectMap {
        let mut library = ObjectMap::new();
        for function in self.functions {
            let name = function.name.clone();
            library.insert(name, Value::function(PatchFunction::Native(function)));
        }
        for (name, value) in self.constants {
            library.insert(name, value);
        }
        tracing::debug!(members = library.len(), "library built");
        library
    }
}
