use patch_ir::StmtKind;
use pretty_assertions::assert_eq;

use super::{messages, parse_source};

#[test]
fn test_two_independent_errors_are_both_reported() {
    let output = parse_source("var x = ; var y = 1; z = = 2; var w = 3;");
    assert_eq!(
        messages(&output.errors),
        [
            "Unexpected token at start of expression: ;",
            "Unexpected token at start of expression: =",
        ]
    );
    assert_eq!(output.program.statements.len(), 2);
}

#[test]
fn test_block_error_becomes_placeholder() {
    let output = parse_source("{ var x = 1; x = ; var y = {a: 1}; } var z = 2;");
    assert_eq!(output.errors.len(), 1);
    let kinds: Vec<_> = output.program.statements.iter().map(|s| &s.kind).collect();
    assert!(matches!(kinds[0], StmtKind::Error { message } if message.starts_with("Unexpected token")));
    assert!(matches!(kinds[1], StmtKind::Variable { name, .. } if name == "z"));
}

#[test]
fn test_block_skip_respects_nesting() {
    // The error happens inside the object literal's braces; skipping must
    // not stop at the literal's closing brace.
    let output = parse_source("{ var y = {a: 1 b: 2}; } var z = 2;");
    assert_eq!(
        messages(&output.errors),
        ["Expected '}', but found identifier"]
    );
    assert_eq!(output.program.statements.len(), 2);
}

#[test]
fn test_nested_block_error_is_contained() {
    let output = parse_source("{ if (a) { b = ; } c(); }");
    assert_eq!(output.errors.len(), 1);
    let StmtKind::Block(outer) = &output.program.statements[0].kind else {
        panic!("outer block should survive");
    };
    assert_eq!(outer.len(), 2);
}

#[test]
fn test_end_of_input_stops_parsing() {
    let output = parse_source("var x = 1; var y = ");
    assert_eq!(messages(&output.errors), ["Unexpected end of file"]);
    assert!(output.errors[0].is_eof());
    assert_eq!(output.program.statements.len(), 1);

    let output = parse_source("function f() { var x = 1;");
    assert_eq!(messages(&output.errors), ["Unexpected end of file"]);
    assert!(output.program.statements.is_empty());
}

#[test]
fn test_stray_closing_brace() {
    let output = parse_source("} var x = 1;");
    assert_eq!(
        messages(&output.errors),
        ["Unexpected token at start of expression: }"]
    );
    assert_eq!(output.program.statements.len(), 1);
}

#[test]
fn test_errors_in_arrow_body_are_reported() {
    let output = parse_source("var f = (a) -> a +; var g = 1;");
    assert_eq!(
        messages(&output.errors),
        ["Unexpected token at start of expression: ;"]
    );
    assert_eq!(output.program.statements.len(), 1);
}

#[test]
fn test_empty_input() {
    let output = parse_source("");
    assert!(!output.has_errors());
    assert!(output.program.statements.is_empty());
    assert!(output.metadata.is_empty());
}
