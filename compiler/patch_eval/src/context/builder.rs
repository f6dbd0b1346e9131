//! `EvaluationContextBuilder`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use patch_ir::Mutability;
use rustc_hash::FxHashSet;

use super::{EvaluationContext, Shared};
use crate::debug_sink::{stdout_sink, SharedDebugSink};
use crate::environment::ScopeArena;
use crate::locator::{LibraryLocator, NoLibraries};
use crate::stdlib::{MethodTables, Stdlib};
use crate::value::new_object;
use crate::{LangConfig, ObjectMap, ObjectRef, Value};

/// Configures and creates the top-level context of an evaluation.
///
/// Defaults: an empty root object, no extra variables, a locator that
/// rejects every import, a stdout debug sink, the builtin libraries and
/// [`LangConfig::default`].
pub struct EvaluationContextBuilder {
    root: Option<ObjectRef>,
    variables: Vec<(String, Value)>,
    locator: Option<Box<dyn LibraryLocator>>,
    debug_sink: Option<SharedDebugSink>,
    stdlib: Stdlib,
    config: LangConfig,
}

impl EvaluationContextBuilder {
    pub fn new() -> Self {
        EvaluationContextBuilder {
            root: None,
            variables: Vec::new(),
            locator: None,
            debug_sink: None,
            stdlib: Stdlib::builtin(),
            config: LangConfig::default(),
        }
    }

    #[must_use]
    pub fn root(mut self, root: ObjectRef) -> Self {
        self.root = Some(root);
        self
    }

    /// Bind an immutable variable visible to the whole script.
    #[must_use]
    pub fn variable(mut self, name: impl Into<String>, value: Value) -> Self {
        self.variables.push((name.into(), value));
        self
    }

    #[must_use]
    pub fn library_locator(mut self, locator: impl LibraryLocator + 'static) -> Self {
        self.locator = Some(Box::new(locator));
        self
    }

    #[must_use]
    pub fn debug_sink(mut self, sink: SharedDebugSink) -> Self {
        self.debug_sink = Some(sink);
        self
    }

    #[must_use]
    pub fn stdlib(mut self, stdlib: Stdlib) -> Self {
        self.stdlib = stdlib;
        self
    }

    #[must_use]
    pub fn config(mut self, config: LangConfig) -> Self {
        self.config = config;
        self
    }

    /// Builtin libraries and variables go in a base scope; the returned
    /// context's scope is a child of it.
    pub fn build(self) -> EvaluationContext {
        let mut scopes = ScopeArena::new();
        let base = scopes.push(None);
        self.stdlib.bind_builtins(&mut scopes, base);
        for (name, value) in self.variables {
            scopes.define_shadowing(base, &name, value, Mutability::Immutable);
        }
        let scope = scopes.push(Some(base));

        let shared = Shared {
            scopes: RefCell::new(scopes),
            locator: self.locator.unwrap_or_else(|| Box::new(NoLibraries)),
            debug_sink: self.debug_sink.unwrap_or_else(stdout_sink),
            config: self.config,
            stdlib: self.stdlib,
            methods: MethodTables::new(),
            importing: RefCell::new(FxHashSet::default()),
            call_depth: Cell::new(0),
        };

        EvaluationContext {
            root: self.root.unwrap_or_else(|| new_object(ObjectMap::new())),
            scope,
            shared: Rc::new(shared),
        }
    }
}

impl Default for EvaluationContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
