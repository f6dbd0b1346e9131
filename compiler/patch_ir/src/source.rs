//! Source files and row/column positions.
//!
//! Positions are 1-based. Columns count characters, except that a tab
//! advances the column by [`TAB_WIDTH`]; diagnostics expand tabs the same way
//! when they print the offending line, so carets stay aligned.

use std::fmt;
use std::sync::Arc;

/// Number of columns a tab character occupies.
pub const TAB_WIDTH: u32 = 4;

/// A named piece of source text.
pub struct SourceFile {
    name: String,
    text: String,
    /// Byte offset at which each row starts.
    row_starts: Vec<usize>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Arc<SourceFile> {
        let text = text.into();
        let mut row_starts = vec![0];
        row_starts.extend(
            text.bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Arc::new(SourceFile {
            name: name.into(),
            text,
            row_starts,
        })
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of rows, counting a trailing empty row after a final newline.
    #[inline]
    pub fn row_count(&self) -> usize {
        self.row_starts.len()
    }

    /// Text of a 1-based row without its line terminator.
    pub fn row_text(&self, row: u32) -> Option<&str> {
        let index = usize::try_from(row).ok()?.checked_sub(1)?;
        let start = *self.row_starts.get(index)?;
        let end = self
            .row_starts
            .get(index + 1)
            .copied()
            .unwrap_or(self.text.len());
        let line = &self.text[start..end];
        Some(line.trim_end_matches(['\n', '\r']))
    }
}

impl fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceFile")
            .field("name", &self.name)
            .field("len", &self.text.len())
            .finish()
    }
}

/// A single point in a source file.
#[derive(Clone)]
pub struct SourcePos {
    file: Arc<SourceFile>,
    row: u32,
    column: u32,
}

impl SourcePos {
    #[inline]
    pub fn new(file: Arc<SourceFile>, row: u32, column: u32) -> Self {
        SourcePos { file, row, column }
    }

    #[inline]
    pub fn file(&self) -> &Arc<SourceFile> {
        &self.file
    }

    #[inline]
    pub fn row(&self) -> u32 {
        self.row
    }

    #[inline]
    pub fn column(&self) -> u32 {
        self.column
    }

    /// Same row, column shifted by `offset`.
    #[must_use]
    pub fn offset(&self, offset: i32) -> SourcePos {
        SourcePos {
            file: Arc::clone(&self.file),
            row: self.row,
            column: self.column.saturating_add_signed(offset),
        }
    }

    /// Zero-width span at this position.
    #[inline]
    pub fn to_span(&self) -> SourceSpan {
        SourceSpan::new(self.clone(), self.clone())
    }

    #[inline]
    fn key(&self) -> (u32, u32) {
        (self.row, self.column)
    }
}

impl PartialEq for SourcePos {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.file, &other.file) && self.key() == other.key()
    }
}

impl Eq for SourcePos {}

impl fmt::Debug for SourcePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file.name, self.row, self.column)
    }
}

/// Inclusive range between two positions of the same file.
#[derive(Clone, PartialEq, Eq)]
pub struct SourceSpan {
    from: SourcePos,
    to: SourcePos,
}

impl SourceSpan {
    #[inline]
    pub fn new(from: SourcePos, to: SourcePos) -> Self {
        SourceSpan { from, to }
    }

    #[inline]
    pub fn from(&self) -> &SourcePos {
        &self.from
    }

    #[inline]
    pub fn to(&self) -> &SourcePos {
        &self.to
    }

    #[inline]
    pub fn file(&self) -> &Arc<SourceFile> {
        &self.from.file
    }

    /// Span starting where `self` starts and ending where `end` ends.
    #[must_use]
    pub fn to_end_of(&self, end: &SourceSpan) -> SourceSpan {
        SourceSpan::new(self.from.clone(), end.to.clone())
    }

    /// Lexicographic row/column containment, both ends inclusive.
    pub fn contains(&self, pos: &SourcePos) -> bool {
        self.from.key() <= pos.key() && pos.key() <= self.to.key()
    }

    /// Whether both ends lie on the same row.
    #[inline]
    pub fn is_single_row(&self) -> bool {
        self.from.row == self.to.row
    }
}

impl fmt::Debug for SourceSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}-{}:{}",
            self.from.file.name, self.from.row, self.from.column, self.to.row, self.to.column
        )
    }
}
