#![allow(clippy::unwrap_used, clippy::expect_used)]

use patch_ir::TypeTest;
use pretty_assertions::assert_eq;

use super::{format_number, ObjectMap, Value};

fn numbers(values: &[f64]) -> Value {
    Value::array(values.iter().copied().map(Value::from).collect())
}

fn object(entries: &[(&str, Value)]) -> Value {
    Value::object(
        entries
            .iter()
            .map(|(key, value)| (*key, value.clone()))
            .collect(),
    )
}

#[test]
fn test_format_number() {
    assert_eq!(format_number(1.0), "1.0");
    assert_eq!(format_number(-2.5), "-2.5");
    assert_eq!(format_number(0.0), "0.0");
    assert_eq!(format_number(0.001), "0.001");
    assert_eq!(format_number(1e10), "1.0E10");
    assert_eq!(format_number(1.5e-5), "1.5E-5");
    assert_eq!(format_number(f64::NAN), "NaN");
    assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
}

#[test]
fn test_truthiness() {
    let falsy = [
        Value::Null,
        Value::Boolean(false),
        Value::from(0.0),
        Value::from(""),
        Value::array(Vec::new()),
        Value::object(ObjectMap::new()),
    ];
    for value in &falsy {
        assert!(!value.is_truthy(), "{value:?}");
    }
    let truthy = [
        Value::Boolean(true),
        Value::from(-1.0),
        Value::from(" "),
        numbers(&[0.0]),
        object(&[("a", Value::Null)]),
    ];
    for value in &truthy {
        assert!(value.is_truthy(), "{value:?}");
    }
}

#[test]
fn test_type_tests() {
    assert!(Value::Null.matches(TypeTest::Null));
    assert!(Value::from("x").matches(TypeTest::String));
    assert!(!Value::from("x").matches(TypeTest::Number));
    assert!(numbers(&[]).matches(TypeTest::Array));
    assert!(!numbers(&[]).matches(TypeTest::Object));
    assert_eq!(object(&[]).type_name(), "object");
}

#[test]
fn test_structural_equality() {
    assert_eq!(numbers(&[1.0, 2.0]), numbers(&[1.0, 2.0]));
    assert_ne!(numbers(&[1.0, 2.0]), numbers(&[2.0, 1.0]));
    // Key order does not matter for objects.
    assert_eq!(
        object(&[("a", Value::from(1.0)), ("b", Value::Null)]),
        object(&[("b", Value::Null), ("a", Value::from(1.0))])
    );
    assert_ne!(object(&[("a", Value::from(1.0))]), object(&[]));
    assert_ne!(Value::from(1.0), Value::from("1"));
    assert_ne!(Value::from(f64::NAN), Value::from(f64::NAN));
}

#[test]
fn test_cyclic_equality_terminates() {
    let a = numbers(&[1.0]);
    let b = numbers(&[1.0]);
    a.as_array().unwrap().borrow_mut().push(a.clone());
    b.as_array().unwrap().borrow_mut().push(b.clone());
    assert_eq!(a, b);
}

#[test]
fn test_references_share_mutations() {
    let a = numbers(&[1.0]);
    let alias = a.clone();
    alias.as_array().unwrap().borrow_mut().push(Value::from(2.0));
    assert_eq!(a, numbers(&[1.0, 2.0]));
}

#[test]
fn test_display() {
    let value = object(&[
        ("name", Value::from("x")),
        ("items", numbers(&[1.0, 2.5])),
        ("none", Value::Null),
    ]);
    assert_eq!(value.to_string(), "{name=x, items=[1.0, 2.5], none=null}");
}

#[test]
fn test_display_cycle() {
    let a = numbers(&[1.0]);
    a.as_array().unwrap().borrow_mut().push(a.clone());
    assert_eq!(a.to_string(), "[1.0, [...]]");
}

#[test]
fn test_json() {
    let value = object(&[
        ("text", Value::from("a\"b\n")),
        ("n", numbers(&[1.0, 0.5, f64::NAN])),
        ("empty", object(&[])),
    ]);
    assert_eq!(
        value.to_json(),
        r#"{"text":"a\"b\n","n":[1,0.5,null],"empty":{}}"#
    );
}

#[test]
fn test_json_pretty() {
    let value = object(&[("a", numbers(&[1.0, 2.0])), ("b", Value::Boolean(true))]);
    assert_eq!(
        value.to_json_pretty(),
        "{\n  \"a\": [\n    1,\n    2\n  ],\n  \"b\": true\n}"
    );
}

#[test]
fn test_object_map_keeps_insertion_order() {
    let mut map = ObjectMap::new();
    map.insert("b", Value::from(1.0));
    map.insert("a", Value::from(2.0));
    map.insert("b", Value::from(3.0));
    assert_eq!(map.keys().collect::<Vec<_>>(), ["b", "a"]);
    assert_eq!(map.remove("b"), Some(Value::from(3.0)));
    map.insert("b", Value::Null);
    assert_eq!(map.keys().collect::<Vec<_>>(), ["a", "b"]);
    assert_eq!(map.get("a"), Some(&Value::from(2.0)));
}
