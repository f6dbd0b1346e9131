//! Property-based tests for lexer position bookkeeping.
//!
//! Random token sequences are lexed; every token's byte range and
//! row/column span must point back at the text it came from.

use patch_ir::{Keyword, Operator, TokenKind, TAB_WIDTH};
use patch_lexer::lex;
use proptest::prelude::*;

/// Strategy for words that are not keywords.
fn arb_word() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_$]{0,8}".prop_filter("keyword", |w| Keyword::lookup(w).is_none())
}

fn arb_number() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u32..100_000).prop_map(|n| n.to_string()),
        (0u32..1000, 0u32..1000).prop_map(|(a, b)| format!("{a}.{b}")),
    ]
}

fn arb_string() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,12}".prop_map(|s| format!("\"{s}\""))
}

fn arb_operator() -> impl Strategy<Value = String> {
    proptest::sample::select(Operator::ALL.to_vec()).prop_map(|op| op.as_str().to_string())
}

fn arb_keyword() -> impl Strategy<Value = String> {
    proptest::sample::select(Keyword::ALL.to_vec()).prop_map(|k| k.as_str().to_string())
}

fn arb_token() -> impl Strategy<Value = String> {
    prop_oneof![arb_word(), arb_number(), arb_string(), arb_operator(), arb_keyword()]
}

fn arb_separator() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just(" "), Just("  "), Just("\t"), Just("\n"), Just(" \n\t")]
}

/// Row and column of byte `offset`, counting tabs as `TAB_WIDTH` columns.
fn row_column(source: &str, offset: usize) -> (u32, u32) {
    let mut row = 1;
    let mut column = 1;
    for c in source[..offset].chars() {
        match c {
            '\n' => {
                row += 1;
                column = 1;
            }
            '\t' => column += TAB_WIDTH,
            _ => column += 1,
        }
    }
    (row, column)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn relexing_token_text_reproduces_token(
        parts in prop::collection::vec((arb_token(), arb_separator()), 1..20)
    ) {
        let source: String = parts.iter().map(|(t, s)| format!("{t}{s}")).collect();
        let output = lex(&source, "prop");
        prop_assert!(output.errors.is_empty(), "errors: {:?}", output.errors);
        prop_assert_eq!(output.tokens.len(), parts.len());

        for (token, (text, _)) in output.tokens.iter().zip(&parts) {
            let slice = &source[token.range.to_range()];
            prop_assert_eq!(slice, text.as_str());

            let relexed = lex(slice, "relex");
            prop_assert_eq!(relexed.tokens.len(), 1);
            prop_assert_eq!(&relexed.tokens[0].kind, &token.kind);
        }
    }

    #[test]
    fn spans_match_byte_ranges(
        parts in prop::collection::vec((arb_token(), arb_separator()), 1..20)
    ) {
        let source: String = parts.iter().map(|(t, s)| format!("{t}{s}")).collect();
        let output = lex(&source, "prop");

        for token in &output.tokens {
            let range = token.range.to_range();
            let (row, column) = row_column(&source, range.start);
            prop_assert_eq!((token.span.from().row(), token.span.from().column()), (row, column));

            let (end_row, end_column) = row_column(&source, range.end);
            prop_assert_eq!((token.span.to().row(), token.span.to().column() + 1), (end_row, end_column));
        }
    }

    #[test]
    fn numbers_keep_their_value(n in 0u32..1_000_000) {
        let output = lex(&n.to_string(), "prop");
        prop_assert_eq!(&output.tokens[0].kind, &TokenKind::Number(f64::from(n)));
    }
}
