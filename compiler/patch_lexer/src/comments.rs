//! Comment blocks.
//!
//! `#` starts a comment that runs to the end of the line. Comments on
//! consecutive lines form one block; a blank line, or any token in between,
//! starts a new one. Blocks go to a [`CommentHandler`] verbatim, which is how
//! documentation tooling picks them up without touching the token stream.

use patch_ir::SourcePos;

/// One comment line: the text after `#` up to the end of the line.
#[derive(Clone, Debug, PartialEq)]
pub struct Comment {
    pub text: String,
    /// Position of the first character after `#`.
    pub start: SourcePos,
}

/// Receives each comment block as soon as it is complete.
pub trait CommentHandler {
    fn accept_block(&mut self, comments: &[Comment]);
}

impl<F: FnMut(&[Comment])> CommentHandler for F {
    fn accept_block(&mut self, comments: &[Comment]) {
        self(comments);
    }
}

/// Whether the text between the end of one comment and the `#` of the next
/// keeps them in the same block: exactly one line break, otherwise only
/// spaces and tabs.
pub(crate) fn continues_block(gap: &str) -> bool {
    gap.strip_prefix('\n')
        .is_some_and(|rest| rest.bytes().all(|b| b == b' ' || b == b'\t'))
}
