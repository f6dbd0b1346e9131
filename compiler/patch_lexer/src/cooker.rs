//! Cooking layer: raw logos tokens to positioned [`Token`]s.

use std::sync::Arc;

use logos::Logos;
use patch_ir::{Keyword, SourceFile, SourcePos, SourceSpan, Span, Token, TokenKind, TAB_WIDTH};

use crate::comments::{continues_block, Comment, CommentHandler};
use crate::{LexError, LexErrorKind, RawToken};

/// Converts byte offsets to row/column positions.
///
/// Offsets must be requested in non-decreasing order; the tracker only
/// walks forward.
struct Positions<'src> {
    file: Arc<SourceFile>,
    source: &'src str,
    offset: usize,
    row: u32,
    column: u32,
}

impl<'src> Positions<'src> {
    fn new(file: &'src Arc<SourceFile>) -> Self {
        Positions {
            file: Arc::clone(file),
            source: file.text(),
            offset: 0,
            row: 1,
            column: 1,
        }
    }

    fn at(&mut self, offset: usize) -> SourcePos {
        if let Some(skipped) = self.source.get(self.offset..offset) {
            for c in skipped.chars() {
                match c {
                    '\n' => {
                        self.row += 1;
                        self.column = 1;
                    }
                    '\t' => self.column += TAB_WIDTH,
                    _ => self.column += 1,
                }
            }
            self.offset = offset;
        }
        SourcePos::new(Arc::clone(&self.file), self.row, self.column)
    }
}

/// Resolve a single-character escape (`\n`, `\"`, ...).
#[inline]
fn resolve_escape(c: char) -> Option<char> {
    match c {
        'n' => Some('\n'),
        'r' => Some('\r'),
        't' => Some('\t'),
        'b' => Some('\u{8}'),
        '"' => Some('"'),
        '\'' => Some('\''),
        '\\' => Some('\\'),
        '0' => Some('\0'),
        _ => None,
    }
}

/// Input ended inside a literal.
struct Eof;

pub(crate) struct Cooker<'src, 'h, H: CommentHandler + ?Sized> {
    source: &'src str,
    positions: Positions<'src>,
    tokens: Vec<Token>,
    errors: Vec<LexError>,
    block: Vec<Comment>,
    block_end: usize,
    handler: &'h mut H,
}

impl<'src, 'h, H: CommentHandler + ?Sized> Cooker<'src, 'h, H> {
    pub(crate) fn new(file: &'src Arc<SourceFile>, handler: &'h mut H) -> Self {
        Cooker {
            source: file.text(),
            positions: Positions::new(file),
            tokens: Vec::new(),
            errors: Vec::new(),
            block: Vec::new(),
            block_end: 0,
            handler,
        }
    }

    pub(crate) fn run(mut self) -> (Vec<Token>, Vec<LexError>) {
        let mut raw = RawToken::lexer(self.source);

        while let Some(token_result) = raw.next() {
            let range = raw.span();

            match token_result {
                Ok(RawToken::Comment) => self.comment(range.start, range.end),
                Ok(RawToken::Quote(quote)) => {
                    self.flush_comments();
                    match self.string(range.start, raw.remainder(), quote) {
                        Ok(consumed) => raw.bump(consumed),
                        Err(Eof) => break,
                    }
                }
                Ok(RawToken::Number(n)) => self.push(TokenKind::Number(n), range.start, range.end),
                Ok(RawToken::Word) => {
                    let slice = raw.slice();
                    let kind = match Keyword::lookup(slice) {
                        Some(keyword) => TokenKind::Keyword(keyword),
                        None => TokenKind::Word(slice.to_string()),
                    };
                    self.push(kind, range.start, range.end);
                }
                Ok(RawToken::Operator(op)) => self.push(TokenKind::Operator(op), range.start, range.end),
                Err(()) => {
                    self.flush_comments();
                    // One error per character; never leave the scanner mid-character.
                    let mut offset = range.start;
                    while offset < range.end {
                        let Some(ch) = self.source.get(offset..).and_then(|s| s.chars().next())
                        else {
                            break;
                        };
                        self.error(LexErrorKind::unexpected_character(ch), offset);
                        offset += ch.len_utf8();
                    }
                    if offset > range.end {
                        raw.bump(offset - range.end);
                    }
                }
            }
        }

        self.flush_comments();
        (self.tokens, self.errors)
    }

    fn push(&mut self, kind: TokenKind, start: usize, end: usize) {
        self.flush_comments();
        let from = self.positions.at(start);
        self.finish(kind, from, start, end);
    }

    /// Push a token whose start position was already taken.
    fn finish(&mut self, kind: TokenKind, from: SourcePos, start: usize, end: usize) {
        let to = self.positions.at(end).offset(-1);
        self.tokens.push(Token::new(
            kind,
            SourceSpan::new(from, to),
            Span::from_range(start..end),
        ));
    }

    fn error(&mut self, kind: LexErrorKind, offset: usize) {
        let pos = self.positions.at(offset);
        tracing::warn!(?pos, error = %kind, "lex error");
        self.errors.push(LexError::new(kind, &pos));
    }

    /// Read a string body following the opening quote at `start`.
    /// Returns the number of bytes consumed after the quote.
    fn string(&mut self, start: usize, remainder: &str, quote: char) -> Result<usize, Eof> {
        let from = self.positions.at(start);
        let body = start + quote.len_utf8();
        let mut value = String::new();
        let mut chars = remainder.char_indices();

        loop {
            let (i, c) = self.next_char(&mut chars)?;
            match c {
                '\\' => {
                    let (j, escaped) = self.next_char(&mut chars)?;
                    if let Some(resolved) = resolve_escape(escaped) {
                        value.push(resolved);
                    } else if escaped == 'x' || escaped == 'u' {
                        let digits = if escaped == 'x' { 2 } else { 4 };
                        let code = self.hex_escape(&mut chars, body, digits)?;
                        value.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
                    } else {
                        self.error(LexErrorKind::UnknownEscape(escaped), body + j);
                    }
                }
                '\n' | '\r' => self.error(LexErrorKind::MultilineString, body + i + 1),
                c if c == quote => {
                    let consumed = i + c.len_utf8();
                    let kind = if quote == '"' {
                        TokenKind::String(value)
                    } else {
                        TokenKind::Word(value)
                    };
                    self.finish(kind, from, start, body + consumed);
                    return Ok(consumed);
                }
                c => value.push(c),
            }
        }
    }

    fn hex_escape(
        &mut self,
        chars: &mut std::str::CharIndices<'_>,
        body: usize,
        digits: u32,
    ) -> Result<u32, Eof> {
        let mut code = 0;
        for _ in 0..digits {
            let (k, digit) = self.next_char(chars)?;
            code *= 16;
            match digit.to_digit(16) {
                Some(value) => code += value,
                None => self.error(LexErrorKind::InvalidUnicodeEscape(digit), body + k),
            }
        }
        Ok(code)
    }

    fn next_char(&mut self, chars: &mut std::str::CharIndices<'_>) -> Result<(usize, char), Eof> {
        match chars.next() {
            Some(next) => Ok(next),
            None => {
                self.error(LexErrorKind::UnexpectedEof, self.source.len());
                Err(Eof)
            }
        }
    }

    fn comment(&mut self, start: usize, end: usize) {
        let joined = !self.block.is_empty()
            && self
                .source
                .get(self.block_end..start)
                .is_some_and(continues_block);
        if !joined {
            self.flush_comments();
        }

        let text_start = start + 1;
        let start_pos = self.positions.at(text_start);
        self.block.push(Comment {
            text: self.source[text_start..end].to_string(),
            start: start_pos,
        });
        self.block_end = end;
    }

    fn flush_comments(&mut self) {
        if !self.block.is_empty() {
            self.handler.accept_block(&self.block);
            self.block.clear();
        }
    }
}
