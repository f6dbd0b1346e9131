//! Tokens produced by the lexer.
//!
//! The keyword and operator sets are closed: scripts written for one build
//! of the language must tokenize identically on every other build.

use std::fmt;

use crate::{SourceSpan, Span};

/// Reserved words. A quoted word (`'if'`) is never a keyword.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Keyword {
    True,
    False,
    Null,
    Apply,
    This,
    If,
    Else,
    In,
    Is,
    Var,
    Val,
    Delete,
    Function,
    Return,
    Import,
    While,
    For,
    Foreach,
    Break,
    Continue,
    As,
}

impl Keyword {
    pub const ALL: [Keyword; 21] = [
        Keyword::True,
        Keyword::False,
        Keyword::Null,
        Keyword::Apply,
        Keyword::This,
        Keyword::If,
        Keyword::Else,
        Keyword::In,
        Keyword::Is,
        Keyword::Var,
        Keyword::Val,
        Keyword::Delete,
        Keyword::Function,
        Keyword::Return,
        Keyword::Import,
        Keyword::While,
        Keyword::For,
        Keyword::Foreach,
        Keyword::Break,
        Keyword::Continue,
        Keyword::As,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Keyword::True => "true",
            Keyword::False => "false",
            Keyword::Null => "null",
            Keyword::Apply => "apply",
            Keyword::This => "this",
            Keyword::If => "if",
            Keyword::Else => "else",
            Keyword::In => "in",
            Keyword::Is => "is",
            Keyword::Var => "var",
            Keyword::Val => "val",
            Keyword::Delete => "delete",
            Keyword::Function => "function",
            Keyword::Return => "return",
            Keyword::Import => "import",
            Keyword::While => "while",
            Keyword::For => "for",
            Keyword::Foreach => "foreach",
            Keyword::Break => "break",
            Keyword::Continue => "continue",
            Keyword::As => "as",
        }
    }

    /// Keyword spelled exactly `word`, if any.
    pub fn lookup(word: &str) -> Option<Keyword> {
        Some(match word {
            "true" => Keyword::True,
            "false" => Keyword::False,
            "null" => Keyword::Null,
            "apply" => Keyword::Apply,
            "this" => Keyword::This,
            "if" => Keyword::If,
            "else" => Keyword::Else,
            "in" => Keyword::In,
            "is" => Keyword::Is,
            "var" => Keyword::Var,
            "val" => Keyword::Val,
            "delete" => Keyword::Delete,
            "function" => Keyword::Function,
            "return" => Keyword::Return,
            "import" => Keyword::Import,
            "while" => Keyword::While,
            "for" => Keyword::For,
            "foreach" => Keyword::Foreach,
            "break" => Keyword::Break,
            "continue" => Keyword::Continue,
            "as" => Keyword::As,
            _ => return None,
        })
    }
}

/// Punctuation and operator lexemes.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Operator {
    Assign,
    NotEquals,
    Equals,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    StarAssign,
    PlusAssign,
    MinusAssign,
    SlashAssign,
    PercentAssign,
    AndAssign,
    OrAssign,
    XorAssign,
    And,
    Or,
    Xor,
    DoubleAnd,
    DoubleOr,
    DoubleMinus,
    DoublePlus,
    DoubleStar,
    DoubleBang,
    LBrace,
    RBrace,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Dot,
    Comma,
    Colon,
    Semicolon,
    Bang,
    Question,
    Dollar,
    At,
    Arrow,
    Minus,
    Plus,
    Star,
    Slash,
    Percent,
    Tilde,
}

impl Operator {
    pub const ALL: [Operator; 45] = [
        Operator::Assign,
        Operator::NotEquals,
        Operator::Equals,
        Operator::Less,
        Operator::Greater,
        Operator::LessEqual,
        Operator::GreaterEqual,
        Operator::StarAssign,
        Operator::PlusAssign,
        Operator::MinusAssign,
        Operator::SlashAssign,
        Operator::PercentAssign,
        Operator::AndAssign,
        Operator::OrAssign,
        Operator::XorAssign,
        Operator::And,
        Operator::Or,
        Operator::Xor,
        Operator::DoubleAnd,
        Operator::DoubleOr,
        Operator::DoubleMinus,
        Operator::DoublePlus,
        Operator::DoubleStar,
        Operator::DoubleBang,
        Operator::LBrace,
        Operator::RBrace,
        Operator::LParen,
        Operator::RParen,
        Operator::LBracket,
        Operator::RBracket,
        Operator::Dot,
        Operator::Comma,
        Operator::Colon,
        Operator::Semicolon,
        Operator::Bang,
        Operator::Question,
        Operator::Dollar,
        Operator::At,
        Operator::Arrow,
        Operator::Minus,
        Operator::Plus,
        Operator::Star,
        Operator::Slash,
        Operator::Percent,
        Operator::Tilde,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Operator::Assign => "=",
            Operator::NotEquals => "!=",
            Operator::Equals => "==",
            Operator::Less => "<",
            Operator::Greater => ">",
            Operator::LessEqual => "<=",
            Operator::GreaterEqual => ">=",
            Operator::StarAssign => "*=",
            Operator::PlusAssign => "+=",
            Operator::MinusAssign => "-=",
            Operator::SlashAssign => "/=",
            Operator::PercentAssign => "%=",
            Operator::AndAssign => "&=",
            Operator::OrAssign => "|=",
            Operator::XorAssign => "^=",
            Operator::And => "&",
            Operator::Or => "|",
            Operator::Xor => "^",
            Operator::DoubleAnd => "&&",
            Operator::DoubleOr => "||",
            Operator::DoubleMinus => "--",
            Operator::DoublePlus => "++",
            Operator::DoubleStar => "**",
            Operator::DoubleBang => "!!",
            Operator::LBrace => "{",
            Operator::RBrace => "}",
            Operator::LParen => "(",
            Operator::RParen => ")",
            Operator::LBracket => "[",
            Operator::RBracket => "]",
            Operator::Dot => ".",
            Operator::Comma => ",",
            Operator::Colon => ":",
            Operator::Semicolon => ";",
            Operator::Bang => "!",
            Operator::Question => "?",
            Operator::Dollar => "$",
            Operator::At => "@",
            Operator::Arrow => "->",
            Operator::Minus => "-",
            Operator::Plus => "+",
            Operator::Star => "*",
            Operator::Slash => "/",
            Operator::Percent => "%",
            Operator::Tilde => "~",
        }
    }
}

/// What a token is, without its position.
#[derive(Clone, PartialEq, Debug)]
pub enum TokenKind {
    Number(f64),
    String(String),
    /// Identifier, either bare or written in single quotes.
    Word(String),
    Keyword(Keyword),
    Operator(Operator),
}

impl TokenKind {
    /// Short description used in "Expected X, but found Y" messages.
    pub fn explain(&self) -> String {
        match self {
            TokenKind::Number(_) => "number".to_string(),
            TokenKind::String(_) => "string".to_string(),
            TokenKind::Word(_) => "identifier".to_string(),
            TokenKind::Keyword(keyword) => format!("'{}'", keyword.as_str()),
            TokenKind::Operator(op) => format!("'{}'", op.as_str()),
        }
    }

    #[inline]
    pub fn is_operator(&self, op: Operator) -> bool {
        matches!(self, TokenKind::Operator(found) if *found == op)
    }

    #[inline]
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        matches!(self, TokenKind::Keyword(found) if *found == keyword)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number(n) => write!(f, "{n}"),
            TokenKind::String(s) => write!(f, "\"{}\"", s.escape_debug()),
            TokenKind::Word(w) => f.write_str(w),
            TokenKind::Keyword(keyword) => f.write_str(keyword.as_str()),
            TokenKind::Operator(op) => f.write_str(op.as_str()),
        }
    }
}

/// A token with its row/column span and its byte range in the source.
#[derive(Clone, PartialEq, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub span: SourceSpan,
    pub range: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: SourceSpan, range: Span) -> Self {
        Token { kind, span, range }
    }
}

#[cfg(test)]
mod tests;
