//! Token cursor for navigating the token stream.
//!
//! Provides lookahead and consumption with end-of-input reporting. Shared by
//! the script parser and the JSON reader.

use patch_ir::{Keyword, Operator, SourceSpan, Token, TokenKind};

use crate::error::{expected, unexpected_eof};
use crate::ParseError;

/// Cursor over a lexed token slice. There is no end-of-file token; running
/// past the last token yields an "Unexpected end of file" error instead.
#[derive(Clone)]
pub struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Cursor { tokens, pos: 0 }
    }

    /// Current position in the token stream.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Set the cursor position directly.
    ///
    /// Used by snapshot restoration to roll back after a speculative parse.
    pub(crate) fn set_position(&mut self, pos: usize) {
        debug_assert!(
            pos <= self.tokens.len(),
            "cursor position {} out of bounds (max {})",
            pos,
            self.tokens.len()
        );
        self.pos = pos;
    }

    #[inline]
    pub fn has_next(&self) -> bool {
        self.pos < self.tokens.len()
    }

    #[inline]
    pub fn current(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    #[inline]
    pub fn current_kind(&self) -> Option<&'a TokenKind> {
        self.current().map(|t| &t.kind)
    }

    #[inline]
    pub fn previous(&self) -> Option<&'a Token> {
        self.pos.checked_sub(1).and_then(|i| self.tokens.get(i))
    }

    /// Tokens consumed since position `start`.
    pub(crate) fn consumed_since(&self, start: usize) -> &'a [Token] {
        self.tokens.get(start..self.pos).unwrap_or_default()
    }

    #[inline]
    pub fn check_operator(&self, op: Operator) -> bool {
        self.current_kind().is_some_and(|k| k.is_operator(op))
    }

    #[inline]
    pub fn check_keyword(&self, keyword: Keyword) -> bool {
        self.current_kind().is_some_and(|k| k.is_keyword(keyword))
    }

    /// Zero-width span at the end of the last consumed token.
    pub fn end_span(&self) -> Option<SourceSpan> {
        self.previous().map(|t| t.span.to().to_span())
    }

    /// The current token, or an end-of-file error.
    pub fn peek(&self) -> Result<&'a Token, ParseError> {
        self.current().ok_or_else(|| unexpected_eof(self.end_span()))
    }

    /// Consume and return the current token.
    pub fn advance(&mut self) -> Result<&'a Token, ParseError> {
        let token = self.peek()?;
        tracing::trace!(pos = self.pos, kind = ?token.kind, "advance");
        self.pos += 1;
        Ok(token)
    }

    /// Consume `op` or fail without consuming anything.
    pub fn expect_operator(&mut self, op: Operator) -> Result<&'a Token, ParseError> {
        let token = self.peek()?;
        if token.kind.is_operator(op) {
            self.advance()
        } else {
            Err(expected(&format!("'{}'", op.as_str()), token))
        }
    }

    /// Consume `keyword` or fail without consuming anything.
    pub fn expect_keyword(&mut self, keyword: Keyword) -> Result<&'a Token, ParseError> {
        let token = self.peek()?;
        if token.kind.is_keyword(keyword) {
            self.advance()
        } else {
            Err(expected(&format!("'{}'", keyword.as_str()), token))
        }
    }

    pub fn expect_word(&mut self) -> Result<(String, &'a Token), ParseError> {
        let token = self.peek()?;
        match &token.kind {
            TokenKind::Word(word) => {
                self.advance()?;
                Ok((word.clone(), token))
            }
            _ => Err(expected("identifier", token)),
        }
    }

    pub fn expect_string(&mut self) -> Result<(String, &'a Token), ParseError> {
        let token = self.peek()?;
        match &token.kind {
            TokenKind::String(value) => {
                self.advance()?;
                Ok((value.clone(), token))
            }
            _ => Err(expected("string", token)),
        }
    }

    pub fn expect_number(&mut self) -> Result<f64, ParseError> {
        let token = self.peek()?;
        match token.kind {
            TokenKind::Number(value) => {
                self.advance()?;
                Ok(value)
            }
            _ => Err(expected("number", token)),
        }
    }
}

#[cfg(test)]
mod tests;
