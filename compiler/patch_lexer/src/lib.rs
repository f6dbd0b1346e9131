//! Lexer for patch scripts using logos.
//!
//! Two layers: logos recognizes the raw shape of each lexeme ([`RawToken`]),
//! and the cooker turns raw lexemes into [`Token`]s with row/column spans,
//! resolves string escapes, applies the keyword table and groups comments
//! into blocks. Errors are collected rather than returned early; only input
//! ending inside a string literal stops the scan.

mod comments;
mod cooker;
mod lex_error;

use std::sync::Arc;

use logos::Logos;
use patch_ir::{Operator, SourceFile, Token};

pub use comments::{Comment, CommentHandler};
pub use lex_error::{LexError, LexErrorKind};

/// Raw token from logos (before cooking).
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
pub(crate) enum RawToken {
    #[regex(r"#[^\n]*")]
    Comment,

    /// Opening quote; the cooker reads the literal body itself.
    #[token("\"", |_| '"')]
    #[token("'", |_| '\'')]
    Quote(char),

    #[regex(r"[0-9]+\.?[0-9]*", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),

    #[regex(r"[A-Za-z_][A-Za-z0-9_$]*")]
    Word,

    #[token("=", |_| Operator::Assign)]
    #[token("!=", |_| Operator::NotEquals)]
    #[token("==", |_| Operator::Equals)]
    #[token("<", |_| Operator::Less)]
    #[token(">", |_| Operator::Greater)]
    #[token("<=", |_| Operator::LessEqual)]
    #[token(">=", |_| Operator::GreaterEqual)]
    #[token("*=", |_| Operator::StarAssign)]
    #[token("+=", |_| Operator::PlusAssign)]
    #[token("-=", |_| Operator::MinusAssign)]
    #[token("/=", |_| Operator::SlashAssign)]
    #[token("%=", |_| Operator::PercentAssign)]
    #[token("&=", |_| Operator::AndAssign)]
    #[token("|=", |_| Operator::OrAssign)]
    #[token("^=", |_| Operator::XorAssign)]
    #[token("&", |_| Operator::And)]
    #[token("|", |_| Operator::Or)]
    #[token("^", |_| Operator::Xor)]
    #[token("&&", |_| Operator::DoubleAnd)]
    #[token("||", |_| Operator::DoubleOr)]
    #[token("--", |_| Operator::DoubleMinus)]
    #[token("++", |_| Operator::DoublePlus)]
    #[token("**", |_| Operator::DoubleStar)]
    #[token("!!", |_| Operator::DoubleBang)]
    #[token("{", |_| Operator::LBrace)]
    #[token("}", |_| Operator::RBrace)]
    #[token("(", |_| Operator::LParen)]
    #[token(")", |_| Operator::RParen)]
    #[token("[", |_| Operator::LBracket)]
    #[token("]", |_| Operator::RBracket)]
    #[token(".", |_| Operator::Dot)]
    #[token(",", |_| Operator::Comma)]
    #[token(":", |_| Operator::Colon)]
    #[token(";", |_| Operator::Semicolon)]
    #[token("!", |_| Operator::Bang)]
    #[token("?", |_| Operator::Question)]
    #[token("$", |_| Operator::Dollar)]
    #[token("@", |_| Operator::At)]
    #[token("->", |_| Operator::Arrow)]
    #[token("-", |_| Operator::Minus)]
    #[token("+", |_| Operator::Plus)]
    #[token("*", |_| Operator::Star)]
    #[token("/", |_| Operator::Slash)]
    #[token("%", |_| Operator::Percent)]
    #[token("~", |_| Operator::Tilde)]
    Operator(Operator),
}

/// Tokens and errors of one source file.
#[derive(Debug)]
pub struct LexOutput {
    pub file: Arc<SourceFile>,
    pub tokens: Vec<Token>,
    pub errors: Vec<LexError>,
}

impl LexOutput {
    #[inline]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Lex `source`, discarding comments.
pub fn lex(source: &str, file_name: &str) -> LexOutput {
    lex_with_comments(source, file_name, &mut |_: &[Comment]| {})
}

/// Lex `source`, handing every comment block to `handler`.
pub fn lex_with_comments<H: CommentHandler + ?Sized>(
    source: &str,
    file_name: &str,
    handler: &mut H,
) -> LexOutput {
    lex_file(&SourceFile::new(file_name, source), handler)
}

/// Lex an already loaded source file.
#[tracing::instrument(level = "debug", skip_all, fields(file = file.name()))]
pub fn lex_file<H: CommentHandler + ?Sized>(file: &Arc<SourceFile>, handler: &mut H) -> LexOutput {
    let (tokens, errors) = cooker::Cooker::new(file, handler).run();
    tracing::debug!(tokens = tokens.len(), errors = errors.len(), "lexed");
    LexOutput {
        file: Arc::clone(file),
        tokens,
        errors,
    }
}
