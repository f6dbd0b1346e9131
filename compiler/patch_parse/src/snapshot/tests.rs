#![allow(clippy::unwrap_used)]

use patch_lexer::lex;

use crate::{ParseError, Parser};

#[test]
fn test_snapshot_is_small() {
    assert!(std::mem::size_of::<super::ParserSnapshot>() <= 16);
}

#[test]
fn test_restore_rewinds_cursor_and_errors() {
    let output = lex("a b c", "snapshot");
    let mut parser = Parser::new(&output.tokens);
    parser.cursor.advance().unwrap();

    let snapshot = parser.snapshot();
    parser.cursor.advance().unwrap();
    parser.cursor.advance().unwrap();
    let span = parser.cursor.end_span().unwrap();
    parser.errors.push(ParseError::new("speculative", span));

    parser.restore(snapshot);
    assert_eq!(parser.cursor.position(), 1);
    assert!(parser.errors.is_empty());
}
