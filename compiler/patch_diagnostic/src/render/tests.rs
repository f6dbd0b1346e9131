use patch_ir::{SourceFile, SourcePos, SourceSpan};
use pretty_assertions::assert_eq;

use super::*;
use crate::test_support::{span, TestError};

#[test]
fn test_location_forms() {
    let file = SourceFile::new("main", "var y = x;\nfoo(\n  1);\n");

    assert_eq!(format_location(None).text, "unknown");

    let point = format_location(Some(&span(&file, 1, 9, 9)));
    assert_eq!(point.text, "main 1:9");
    assert!(point.well_behaved);

    let range = format_location(Some(&span(&file, 1, 1, 3)));
    assert_eq!(range.text, "main 1:1-3");

    let multi = SourceSpan::new(
        SourcePos::new(file.clone(), 2, 1),
        SourcePos::new(file.clone(), 3, 4),
    );
    let multi = format_location(Some(&multi));
    assert_eq!(multi.text, "main 2:1 - 3:4");
    assert!(!multi.well_behaved);
}

#[test]
fn test_location_rejects_reversed_span() {
    let file = SourceFile::new("main", "abc");
    let location = format_location(Some(&span(&file, 1, 3, 1)));
    assert!(location.text.starts_with("error: unexpected position order"));
    assert!(!location.well_behaved);
}

#[test]
fn test_location_rejects_mixed_files() {
    let a = SourceFile::new("a", "x");
    let b = SourceFile::new("b", "x");
    let mixed = SourceSpan::new(SourcePos::new(a, 1, 1), SourcePos::new(b, 1, 1));
    assert!(format_location(Some(&mixed))
        .text
        .starts_with("error: inconsistent file"));
}

#[test]
fn test_render_with_snippet() {
    let file = SourceFile::new("main", "var y = x;\n");
    let error = TestError::new("Cannot find variable with name x", Some(span(&file, 1, 9, 9)));

    assert_eq!(
        render(&error, TraceStyle::Full),
        "\n| Error while applying patch\
         \n|   Cannot find variable with name x\
         \n| Location: main 1:9\
         \n| var y = x;\
         \n|         ^ here"
    );
}

#[test]
fn test_render_expands_tabs() {
    let file = SourceFile::new("main", "\tfoo;\n");
    let error = TestError::new("bad", Some(span(&file, 1, 5, 7)));

    let text = render(&error, TraceStyle::Full);
    assert!(text.ends_with("\n|     foo;\n|     ^^^ here"), "{text}");
}

#[test]
fn test_render_without_span() {
    let error = TestError::new("internal", None);
    assert_eq!(
        render(&error, TraceStyle::Full),
        "\n| Error while applying patch\n|   internal\n| Location: unknown"
    );
}

#[test]
fn test_render_full_cause_chain() {
    let file = SourceFile::new("main", "f();\n");
    let error = TestError::new("Error while executing function", Some(span(&file, 1, 1, 3)))
        .caused_by(TestError::new("boom", None));

    assert_eq!(
        render(&error, TraceStyle::Full),
        "\n| Error while applying patch\
         \n|   Error while executing function\
         \n| Location: main 1:1-3\
         \n| f();\
         \n| ^^^ here\
         \n| \
         \n| Caused by:\
         \n|   boom\
         \n| Location: unknown"
    );
}

#[test]
fn test_render_short_cause_chain() {
    let file = SourceFile::new("main", "f();\n");
    let error = TestError::new("outer", None)
        .caused_by(TestError::new("middle", Some(span(&file, 1, 1, 3))).caused_by(TestError::new("inner", None)));

    assert_eq!(
        render(&error, TraceStyle::Short),
        "\n| Error while applying patch\
         \n|   outer\
         \n| Location: unknown\
         \n|\
         \n| Caused by: middle at main 1:1-3\
         \n| Caused by: inner at unknown"
    );
}
