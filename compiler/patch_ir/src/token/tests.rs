use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_keyword_table_round_trips() {
    for keyword in Keyword::ALL {
        assert_eq!(Keyword::lookup(keyword.as_str()), Some(keyword));
    }
    assert_eq!(Keyword::lookup("True"), None);
    assert_eq!(Keyword::lookup("foreachx"), None);
}

#[test]
fn test_operator_lexemes_are_unique() {
    let mut seen = std::collections::HashSet::new();
    for op in Operator::ALL {
        assert!(seen.insert(op.as_str()), "duplicate lexeme {}", op.as_str());
    }
    assert_eq!(seen.len(), 45);
}

#[test]
fn test_explain() {
    assert_eq!(TokenKind::Number(1.0).explain(), "number");
    assert_eq!(TokenKind::String("a".into()).explain(), "string");
    assert_eq!(TokenKind::Word("a".into()).explain(), "identifier");
    assert_eq!(TokenKind::Keyword(Keyword::Foreach).explain(), "'foreach'");
    assert_eq!(TokenKind::Operator(Operator::Arrow).explain(), "'->'");
}

#[test]
fn test_kind_predicates() {
    let semi = TokenKind::Operator(Operator::Semicolon);
    assert!(semi.is_operator(Operator::Semicolon));
    assert!(!semi.is_operator(Operator::Comma));
    assert!(!semi.is_keyword(Keyword::If));
    assert!(TokenKind::Keyword(Keyword::If).is_keyword(Keyword::If));
}
