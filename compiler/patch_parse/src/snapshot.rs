//! Parser snapshots for speculative parsing.
//!
//! The grammar has a single backtracking point: a `(` at the start of an
//! expression is first read as the head of an arrow function. A snapshot
//! taken before the attempt lets the parser rewind both the cursor and any
//! errors the attempt recorded, then reparse the parenthesis as a grouped
//! expression.

use crate::Parser;

/// Cursor position and error count at the moment of capture.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ParserSnapshot {
    pub(crate) cursor_pos: usize,
    pub(crate) error_count: usize,
}

impl Parser<'_> {
    #[inline]
    pub(crate) fn snapshot(&self) -> ParserSnapshot {
        ParserSnapshot {
            cursor_pos: self.cursor.position(),
            error_count: self.errors.len(),
        }
    }

    /// Rewind to `snapshot`, dropping errors recorded since.
    #[inline]
    pub(crate) fn restore(&mut self, snapshot: ParserSnapshot) {
        self.cursor.set_position(snapshot.cursor_pos);
        self.errors.truncate(snapshot.error_count);
    }
}

#[cfg(test)]
mod tests;
