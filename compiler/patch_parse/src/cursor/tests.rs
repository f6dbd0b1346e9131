#![allow(clippy::unwrap_used)]

use patch_ir::{Keyword, Operator, TokenKind};
use patch_lexer::lex;
use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_advance_and_previous() {
    let output = lex("a ;", "cursor");
    let mut cursor = Cursor::new(&output.tokens);

    assert!(cursor.previous().is_none());
    assert_eq!(cursor.advance().unwrap().kind, TokenKind::Word("a".into()));
    assert!(cursor.check_operator(Operator::Semicolon));
    cursor.advance().unwrap();
    assert!(!cursor.has_next());
    assert_eq!(cursor.position(), 2);
    assert_eq!(
        cursor.previous().map(|t| t.kind.clone()),
        Some(TokenKind::Operator(Operator::Semicolon))
    );
}

#[test]
fn test_eof_points_at_last_token_end() {
    let output = lex("abc", "cursor");
    let mut cursor = Cursor::new(&output.tokens);
    cursor.advance().unwrap();

    let error = cursor.advance().unwrap_err();
    assert!(error.is_eof());
    assert_eq!(error.message, "Unexpected end of file");
    let span = error.span.unwrap();
    assert_eq!(span.from().column(), 3);
}

#[test]
fn test_eof_on_empty_input_has_no_span() {
    let mut cursor = Cursor::new(&[]);
    let error = cursor.advance().unwrap_err();
    assert!(error.is_eof());
    assert!(error.span.is_none());
}

#[test]
fn test_expect_mismatch_does_not_consume() {
    let output = lex("if x", "cursor");
    let mut cursor = Cursor::new(&output.tokens);

    let error = cursor.expect_word().unwrap_err();
    assert_eq!(error.message, "Expected identifier, but found 'if'");
    assert_eq!(cursor.position(), 0);

    cursor.expect_keyword(Keyword::If).unwrap();
    let (word, _) = cursor.expect_word().unwrap();
    assert_eq!(word, "x");
}

#[test]
fn test_expect_operator_message() {
    let output = lex("1", "cursor");
    let mut cursor = Cursor::new(&output.tokens);
    let error = cursor.expect_operator(Operator::LParen).unwrap_err();
    assert_eq!(error.message, "Expected '(', but found number");
    assert_eq!(cursor.expect_number().unwrap(), 1.0);
}
