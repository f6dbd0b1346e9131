//! Evaluation contexts.
//!
//! An [`EvaluationContext`] is a view onto one evaluation: the current root
//! object, the current scope, and the state every view of the evaluation
//! shares (scope arena, library locator, debug sink, config, import guard).
//! Views are cheap to clone and do not hold their scope; entering a block
//! or call creates a [`ScopedContext`] that holds its scope until dropped.

mod builder;

use std::cell::{Cell, RefCell};
use std::ops::Deref;
use std::rc::{Rc, Weak};

use patch_ir::{Mutability, SourceSpan};
use rustc_hash::FxHashSet;

pub use builder::EvaluationContextBuilder;

use crate::debug_sink::SharedDebugSink;
use crate::environment::{ScopeArena, ScopeId};
use crate::errors::{
    builtin_import, call_depth_exceeded, evaluation_ended, recursive_import, EvalResult,
};
use crate::locator::{LibraryLocator, LibraryRequest};
use crate::stdlib::{MethodTables, Stdlib};
use crate::value::new_object;
use crate::{LangConfig, ObjectMap, ObjectRef, Value};

/// State shared by every view of one evaluation.
pub(crate) struct Shared {
    scopes: RefCell<ScopeArena>,
    locator: Box<dyn LibraryLocator>,
    debug_sink: SharedDebugSink,
    config: LangConfig,
    stdlib: Stdlib,
    pub(crate) methods: MethodTables,
    /// Libraries whose locator call is in progress.
    importing: RefCell<FxHashSet<String>>,
    call_depth: Cell<usize>,
}

#[derive(Clone)]
pub struct EvaluationContext {
    root: ObjectRef,
    scope: ScopeId,
    shared: Rc<Shared>,
}

/// What a closure keeps of the context it was created in.
///
/// The shared state is held weakly: values stored in scopes may be
/// closures, and a strong handle would keep the arena alive forever. The
/// captured scope is held until the closure is dropped.
pub(crate) struct Captured {
    root: ObjectRef,
    scope: ScopeId,
    shared: Weak<Shared>,
}

impl EvaluationContext {
    pub fn builder() -> EvaluationContextBuilder {
        EvaluationContextBuilder::new()
    }

    /// The object `$` refers to.
    #[inline]
    pub fn root(&self) -> &ObjectRef {
        &self.root
    }

    #[inline]
    pub fn config(&self) -> &LangConfig {
        &self.shared.config
    }

    #[inline]
    pub fn debug_sink(&self) -> &SharedDebugSink {
        &self.shared.debug_sink
    }

    /// Send `value` to the debug sink.
    pub fn log(&self, value: &Value) {
        self.shared.debug_sink.log(value);
    }

    /// Same variables, different root.
    pub fn with_root(&self, root: ObjectRef) -> EvaluationContext {
        EvaluationContext {
            root,
            scope: self.scope,
            shared: Rc::clone(&self.shared),
        }
    }

    /// A child scope of the current one, freed when the result is dropped.
    pub fn new_scope(&self) -> ScopedContext {
        let scope = self.shared.scopes.borrow_mut().push(Some(self.scope));
        ScopedContext::new(EvaluationContext {
            root: self.root.clone(),
            scope,
            shared: Rc::clone(&self.shared),
        })
    }

    /// A fresh context for running library source on behalf of a
    /// [`LibraryLocator`]: builtin libraries in scope, `root` as the root,
    /// and the same locator, sink, config and import guard as `self`.
    pub fn library_context(&self, root: ObjectRef) -> ScopedContext {
        let (scope, unbound) = {
            let mut scopes = self.shared.scopes.borrow_mut();
            let base = scopes.push(None);
            self.shared.stdlib.bind_builtins(&mut scopes, base);
            let scope = scopes.push(Some(base));
            // From here on the base is held by its child only.
            (scope, scopes.release(base))
        };
        drop(unbound);
        ScopedContext::new(EvaluationContext {
            root,
            scope,
            shared: Rc::clone(&self.shared),
        })
    }

    // Variables

    pub fn has_variable(&self, name: &str) -> bool {
        self.shared.scopes.borrow().has(self.scope, name)
    }

    pub fn get_variable(&self, name: &str) -> EvalResult {
        self.shared.scopes.borrow().lookup(self.scope, name)
    }

    pub fn set_variable(&self, name: &str, value: Value) -> EvalResult<()> {
        let old = self
            .shared
            .scopes
            .borrow_mut()
            .assign(self.scope, name, value)?;
        drop(old);
        Ok(())
    }

    /// Declare `name` in the current scope; fails if it is already visible.
    pub fn define_variable(&self, name: &str, value: Value, mutability: Mutability) -> EvalResult<()> {
        self.shared
            .scopes
            .borrow_mut()
            .define(self.scope, name, value, mutability)
    }

    pub(crate) fn define_parameter(&self, name: &str, value: Value) {
        let old = self.shared.scopes.borrow_mut().define_shadowing(
            self.scope,
            name,
            value,
            Mutability::Immutable,
        );
        drop(old);
    }

    pub fn delete_variable(&self, name: &str) -> EvalResult<()> {
        let old = self.shared.scopes.borrow_mut().delete(self.scope, name)?;
        drop(old);
        Ok(())
    }

    /// Number of scopes currently allocated by this evaluation, including
    /// exited scopes that closures still hold.
    pub fn allocated_scopes(&self) -> usize {
        self.shared.scopes.borrow().len()
    }

    // Libraries

    /// Resolve `import name`: importable stdlib tables first, then the
    /// host locator. Builtin libraries cannot be imported.
    #[tracing::instrument(level = "debug", skip(self, span))]
    pub fn find_library(&self, name: &str, span: &SourceSpan) -> EvalResult<ObjectRef> {
        let stdlib = &self.shared.stdlib;
        if let Some(library) = stdlib.importable(name) {
            return Ok(new_object(library));
        }
        if stdlib.is_builtin(name) {
            return Err(builtin_import(name).with_span(span.clone()));
        }
        if !self.shared.importing.borrow_mut().insert(name.to_string()) {
            return Err(recursive_import(name).with_span(span.clone()));
        }

        let library = new_object(ObjectMap::new());
        let result = self.shared.locator.load_library(&LibraryRequest {
            name,
            library: &library,
            span,
            context: self,
        });
        self.shared.importing.borrow_mut().remove(name);
        result.map_err(|error| error.or_span(span))?;
        tracing::debug!(name, members = library.borrow().len(), "library loaded");
        Ok(library)
    }

    // Closures and calls

    /// Capture the current root and scope for a function created here.
    pub(crate) fn capture(&self) -> Captured {
        self.shared.scopes.borrow_mut().retain(self.scope);
        Captured {
            root: self.root.clone(),
            scope: self.scope,
            shared: Rc::downgrade(&self.shared),
        }
    }

    /// Count one more nested call; the count drops with the guard.
    pub(crate) fn enter_call(&self, span: &SourceSpan) -> EvalResult<CallDepthGuard> {
        let depth = self.shared.call_depth.get();
        if let Some(limit) = self.shared.config.max_call_depth() {
            if depth >= limit {
                return Err(call_depth_exceeded(limit).with_span(span.clone()));
            }
        }
        self.shared.call_depth.set(depth + 1);
        Ok(CallDepthGuard {
            shared: Rc::clone(&self.shared),
        })
    }

    #[inline]
    pub(crate) fn methods(&self) -> &MethodTables {
        &self.shared.methods
    }
}

impl Captured {
    #[inline]
    pub(crate) fn root(&self) -> &ObjectRef {
        &self.root
    }

    /// The captured scope, if it belongs to `arena`.
    pub(crate) fn scope_in(&self, arena: &ScopeArena) -> Option<ScopeId> {
        let shared = self.shared.upgrade()?;
        std::ptr::eq(shared.scopes.as_ptr().cast_const(), arena).then_some(self.scope)
    }

    /// A new scope under the captured one, for one call.
    pub(crate) fn enter(&self) -> EvalResult<ScopedContext> {
        let shared = self.shared.upgrade().ok_or_else(evaluation_ended)?;
        let scope = shared.scopes.borrow_mut().push(Some(self.scope));
        Ok(ScopedContext::new(EvaluationContext {
            root: self.root.clone(),
            scope,
            shared,
        }))
    }
}

impl Drop for Captured {
    fn drop(&mut self) {
        let Some(shared) = self.shared.upgrade() else {
            return;
        };
        let unbound = match shared.scopes.try_borrow_mut() {
            Ok(mut scopes) => scopes.release(self.scope),
            Err(_) => {
                tracing::trace!(scope = ?self.scope, "closure dropped while scopes are borrowed");
                return;
            }
        };
        drop(unbound);
    }
}

/// A context holding its innermost scope.
pub struct ScopedContext {
    context: EvaluationContext,
}

impl ScopedContext {
    fn new(context: EvaluationContext) -> Self {
        ScopedContext { context }
    }

    pub(crate) fn set_root(&mut self, root: ObjectRef) {
        self.context.root = root;
    }
}

impl Deref for ScopedContext {
    type Target = EvaluationContext;

    #[inline]
    fn deref(&self) -> &EvaluationContext {
        &self.context
    }
}

impl Drop for ScopedContext {
    fn drop(&mut self) {
        let unbound = self
            .context
            .shared
            .scopes
            .try_borrow_mut()
            .map(|mut scopes| scopes.release(self.context.scope));
        drop(unbound);
    }
}

pub(crate) struct CallDepthGuard {
    shared: Rc<Shared>,
}

impl Drop for CallDepthGuard {
    fn drop(&mut self) {
        let depth = self.shared.call_depth.get();
        self.shared.call_depth.set(depth.saturating_sub(1));
    }
}
