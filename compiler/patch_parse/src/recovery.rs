//! Error recovery for the parser.
//!
//! After a failed top-level statement the parser skips ahead to a token that
//! can plausibly start or end a statement. Membership is a bitset lookup:
//! keywords occupy the low bits, operators the bits after them.

use patch_ir::{Keyword, Operator, TokenKind};

use crate::cursor::Cursor;

/// A set of keyword and operator kinds. Literal tokens are never members.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct TokenSet(u128);

const OPERATOR_BASE: u32 = Keyword::ALL.len() as u32;

impl TokenSet {
    #[inline]
    pub(crate) const fn new() -> Self {
        Self(0)
    }

    #[inline]
    #[must_use]
    pub(crate) const fn with_keyword(self, keyword: Keyword) -> Self {
        Self(self.0 | (1u128 << keyword as u32))
    }

    #[inline]
    #[must_use]
    pub(crate) const fn with_operator(self, op: Operator) -> Self {
        Self(self.0 | (1u128 << (OPERATOR_BASE + op as u32)))
    }

    #[inline]
    pub(crate) const fn contains(&self, kind: &TokenKind) -> bool {
        let bit = match kind {
            TokenKind::Keyword(keyword) => *keyword as u32,
            TokenKind::Operator(op) => OPERATOR_BASE + *op as u32,
            TokenKind::Number(_) | TokenKind::String(_) | TokenKind::Word(_) => return false,
        };
        (self.0 & (1u128 << bit)) != 0
    }
}

/// Statement terminator and every keyword that begins a statement.
pub(crate) const STMT_RECOVERY: TokenSet = TokenSet::new()
    .with_operator(Operator::Semicolon)
    .with_keyword(Keyword::Var)
    .with_keyword(Keyword::Val)
    .with_keyword(Keyword::Function)
    .with_keyword(Keyword::If)
    .with_keyword(Keyword::While)
    .with_keyword(Keyword::For)
    .with_keyword(Keyword::Foreach)
    .with_keyword(Keyword::Import)
    .with_keyword(Keyword::Return)
    .with_keyword(Keyword::Apply)
    .with_keyword(Keyword::Delete)
    .with_keyword(Keyword::Break)
    .with_keyword(Keyword::Continue);

/// Advance the cursor until reaching a token in the recovery set or the end.
///
/// Returns `true` if a recovery token was found, `false` if input ran out.
pub(crate) fn synchronize(cursor: &mut Cursor<'_>, recovery: TokenSet) -> bool {
    while let Some(kind) = cursor.current_kind() {
        if recovery.contains(kind) {
            return true;
        }
        cursor.set_position(cursor.position() + 1);
    }
    false
}
