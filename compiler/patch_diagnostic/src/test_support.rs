use patch_ir::{SourceFile, SourcePos, SourceSpan};

use crate::PositionedError;

#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub(crate) struct TestError {
    pub message: String,
    pub span: Option<SourceSpan>,
    pub cause: Option<Box<TestError>>,
}

impl TestError {
    pub fn new(message: &str, span: Option<SourceSpan>) -> Self {
        TestError {
            message: message.to_string(),
            span,
            cause: None,
        }
    }

    pub fn caused_by(mut self, cause: TestError) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }
}

impl PositionedError for TestError {
    fn base_message(&self) -> &'static str {
        "Error while applying patch"
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn span(&self) -> Option<&SourceSpan> {
        self.span.as_ref()
    }

    fn cause(&self) -> Option<&dyn PositionedError> {
        self.cause.as_deref().map(|c| c as &dyn PositionedError)
    }
}

/// Span on `row` from column `from` to column `to` of `file`.
pub(crate) fn span(file: &std::sync::Arc<SourceFile>, row: u32, from: u32, to: u32) -> SourceSpan {
    SourceSpan::new(
        SourcePos::new(file.clone(), row, from),
        SourcePos::new(file.clone(), row, to),
    )
}
