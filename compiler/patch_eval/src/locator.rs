//! Resolution of non-builtin libraries.

use patch_ir::SourceSpan;

use crate::errors::{no_libraries, EvalResult};
use crate::{EvaluationContext, ObjectRef};

/// One `import` that needs a host-provided library.
pub struct LibraryRequest<'a> {
    pub name: &'a str,
    /// Empty object the library's members are written into.
    pub library: &'a ObjectRef,
    /// The `import` statement.
    pub span: &'a SourceSpan,
    /// The importing context. Use [`EvaluationContext::library_context`]
    /// to run library source with `library` as its root.
    pub context: &'a EvaluationContext,
}

/// Host callback resolving library names.
pub trait LibraryLocator {
    fn load_library(&self, request: &LibraryRequest<'_>) -> EvalResult<()>;
}

/// The default locator: every lookup fails.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoLibraries;

impl LibraryLocator for NoLibraries {
    fn load_library(&self, request: &LibraryRequest<'_>) -> EvalResult<()> {
        Err(no_libraries().with_span(request.span.clone()))
    }
}

impl<F> LibraryLocator for F
where
    F: Fn(&LibraryRequest<'_>) -> EvalResult<()>,
{
    fn load_library(&self, request: &LibraryRequest<'_>) -> EvalResult<()> {
        self(request)
    }
}
