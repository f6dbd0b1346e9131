//! Lexer error types.

use patch_diagnostic::PositionedError;
use patch_ir::{SourcePos, SourceSpan};

/// What went wrong while scanning.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LexErrorKind {
    #[error("Unexpected character: {ch} (0x{code:x})")]
    UnexpectedCharacter { ch: char, code: u32 },
    #[error("Unknown escape sequence: \\{0}")]
    UnknownEscape(char),
    /// The offending digit counts as zero.
    #[error("Invalid character in unicode escape: {0}")]
    InvalidUnicodeEscape(char),
    /// Recorded, after which the string continues on the next line.
    #[error("Multiline strings aren't supported. Did you forget a quote?")]
    MultilineString,
    /// Input ended inside a string literal. Scanning stops here.
    #[error("Unexpected end of file")]
    UnexpectedEof,
}

impl LexErrorKind {
    pub(crate) fn unexpected_character(ch: char) -> Self {
        LexErrorKind::UnexpectedCharacter {
            ch,
            code: u32::from(ch),
        }
    }
}

/// A lexer error at a single source position.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct LexError {
    pub kind: LexErrorKind,
    message: String,
    span: SourceSpan,
}

impl LexError {
    pub fn new(kind: LexErrorKind, pos: &SourcePos) -> Self {
        LexError {
            message: kind.to_string(),
            kind,
            span: pos.to_span(),
        }
    }

    #[inline]
    pub fn pos(&self) -> &SourcePos {
        self.span.from()
    }
}

impl PositionedError for LexError {
    fn base_message(&self) -> &'static str {
        "Error while parsing tokens"
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn span(&self) -> Option<&SourceSpan> {
        Some(&self.span)
    }
}
