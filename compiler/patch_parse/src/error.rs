//! Parse error type and its constructors.

use patch_diagnostic::PositionedError;
use patch_ir::{SourceSpan, Token};

/// A recoverable syntax error.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ParseError {
    pub message: String,
    /// Absent only when input ran out before any token was seen.
    pub span: Option<SourceSpan>,
    eof: bool,
}

impl ParseError {
    pub fn new(message: impl Into<String>, span: SourceSpan) -> Self {
        ParseError {
            message: message.into(),
            span: Some(span),
            eof: false,
        }
    }

    /// Input ended while more tokens were required. Parsing of the current
    /// unit cannot continue past this error.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.eof
    }
}

impl PositionedError for ParseError {
    fn base_message(&self) -> &'static str {
        "Error while parsing patch"
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn span(&self) -> Option<&SourceSpan> {
        self.span.as_ref()
    }
}

/// Input ended; `span` is the end of the last token, if there was one.
#[cold]
pub fn unexpected_eof(span: Option<SourceSpan>) -> ParseError {
    ParseError {
        message: "Unexpected end of file".to_string(),
        span,
        eof: true,
    }
}

/// `Expected <what>, but found <token>`.
#[cold]
pub fn expected(what: &str, found: &Token) -> ParseError {
    ParseError::new(
        format!("Expected {what}, but found {}", found.kind.explain()),
        found.span.clone(),
    )
}
