//! Recursive descent parser for patch scripts.
//!
//! Statements are parsed by keyword dispatch; expressions by precedence
//! climbing with a single speculative branch for arrow functions. Errors
//! are collected rather than returned early: a failing statement inside a
//! block turns the block into an error placeholder, a failing top-level
//! statement is skipped up to the next statement boundary. Only running out
//! of input stops the parse.

mod cursor;
mod error;
mod grammar;
mod recovery;
mod snapshot;

pub use cursor::Cursor;
pub use error::ParseError;

use patch_ir::{Expr, Metadata, Program, SourceSpan, Token};

/// Result of parsing one source file.
#[derive(Debug)]
pub struct ParseOutput {
    pub program: Program,
    pub metadata: Metadata,
    pub errors: Vec<ParseError>,
}

impl ParseOutput {
    #[inline]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Parser state.
pub(crate) struct Parser<'a> {
    cursor: Cursor<'a>,
    errors: Vec<ParseError>,
    /// Number of enclosing loops in the current function body.
    loop_depth: u32,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(tokens: &'a [Token]) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            errors: Vec::new(),
            loop_depth: 0,
        }
    }

    /// Span from the start of `start` to the end of the last consumed token.
    fn span_from(&self, start: &SourceSpan) -> SourceSpan {
        match self.cursor.previous() {
            Some(last) => start.to_end_of(&last.span),
            None => start.clone(),
        }
    }
}

/// Parse a whole script.
#[tracing::instrument(level = "debug", skip_all, fields(tokens = tokens.len()))]
pub fn parse(tokens: &[Token]) -> ParseOutput {
    let mut parser = Parser::new(tokens);
    let (metadata, program) = parser.parse_file();
    tracing::debug!(
        statements = program.statements.len(),
        errors = parser.errors.len(),
        "parsed"
    );
    ParseOutput {
        program,
        metadata,
        errors: parser.errors,
    }
}

/// Parse a single expression. Tokens after the expression are ignored.
pub fn parse_expression(tokens: &[Token]) -> Result<Expr, Vec<ParseError>> {
    let mut parser = Parser::new(tokens);
    match parser.parse_expr() {
        Ok(expr) if parser.errors.is_empty() => Ok(expr),
        Ok(_) => Err(parser.errors),
        Err(error) => {
            parser.errors.push(error);
            Err(parser.errors)
        }
    }
}

#[cfg(test)]
mod tests;
