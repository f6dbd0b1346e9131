#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;

use super::{checked_range, MethodTables, Stdlib};
use crate::tests::{logged, run_err};
use crate::{ObjectMap, Value};

#[test]
fn test_checked_range() {
    assert_eq!(checked_range(0.0, None, 3), Some((0, 3)));
    assert_eq!(checked_range(1.0, Some(2.0), 3), Some((1, 2)));
    assert_eq!(checked_range(3.0, None, 3), Some((3, 3)));
    assert_eq!(checked_range(2.0, Some(1.0), 3), None);
    assert_eq!(checked_range(-1.0, None, 3), None);
    assert_eq!(checked_range(0.0, Some(4.0), 3), None);
}

#[test]
fn test_stdlib_tables() {
    let stdlib = Stdlib::builtin();
    assert!(stdlib.is_builtin("math"));
    assert!(!stdlib.is_builtin("json"));
    assert!(stdlib.is_importable("json"));
    assert!(stdlib.importable("math").is_none());

    let stdlib = stdlib.with_builtin("json", ObjectMap::new);
    assert!(stdlib.is_builtin("json"));
    assert!(!stdlib.is_importable("json"));
    assert!(!Stdlib::empty().is_builtin("debug"));
}

#[test]
fn test_method_tables() {
    let methods = MethodTables::new();
    let trim = methods.method(&Value::from(" x "), "trim");
    assert!(matches!(trim, Some(Value::Function(_))));
    assert!(methods.method(&Value::from(1.0), "trim").is_none());
    assert!(methods.method(&Value::array(Vec::new()), "trim").is_none());
}

mod math {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn rounding_and_sign() {
        assert_eq!(
            logged(
                r"
                debug.log(math.round(2.5));
                debug.log(math.round(-2.5));
                debug.log(math.floor(-1.5));
                debug.log(math.ceil(1.2));
                debug.log(math.sign(-3));
                debug.log(math.sign(0));
                debug.log(math.abs(-2));
                debug.log(math.sqrt(16));
                "
            ),
            ["3.0", "-2.0", "-2.0", "2.0", "-1.0", "0.0", "2.0", "4.0"]
        );
    }

    #[test]
    fn min_max_clamp() {
        assert_eq!(
            logged(
                r"
                debug.log(math.min(1, 2));
                debug.log(math.max(1, 2));
                debug.log(math.clamp(5, 0, 3));
                debug.log(math.clamp(-5, 0, 3));
                "
            ),
            ["1.0", "2.0", "3.0", "0.0"]
        );
        let error = run_err("math.clamp(1, 3, 0);");
        assert_eq!(
            error.root_cause().message,
            "Invalid clamp range: 3.0 is greater than 0.0"
        );
    }

    #[test]
    fn constants() {
        assert_eq!(
            logged("debug.log(math.PI > 3.14); debug.log(math.NaN == math.NaN); debug.log(-math.Infinity);"),
            ["true", "false", "-Infinity"]
        );
    }
}

mod strings {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn queries() {
        assert_eq!(
            logged(
                r#"
                debug.log("héllo".length());
                debug.log("abc".contains("b"));
                debug.log("abc".startsWith("ab"));
                debug.log("abc".endsWith("ab"));
                debug.log("héllo".indexOf("l"));
                debug.log("abc".indexOf("z"));
                debug.log("".isEmpty());
                "#
            ),
            ["5.0", "true", "true", "false", "2.0", "-1.0", "true"]
        );
    }

    #[test]
    fn transforms() {
        assert_eq!(
            logged(
                r#"
                debug.log("MiXed".toLowerCase());
                debug.log("a.b.c".split("."));
                debug.log("abc".split(""));
                debug.log("a-b-c".replace("-", "+"));
                debug.log("héllo".substring(1, 3));
                debug.log("héllo".substring(3));
                debug.log("héllo".charAt(1));
                debug.log("ab".repeat(2));
                "#
            ),
            ["mixed", "[a, b, c]", "[a, b, c]", "a+b+c", "él", "lo", "é", "abab"]
        );
    }

    #[test]
    fn range_errors() {
        let error = run_err("\"abc\".substring(2, 1);");
        assert_eq!(error.message, "Error while calling builtin function substring");
        assert_eq!(
            error.root_cause().message,
            "Invalid substring range for string of length 3"
        );
        let error = run_err("strings.charAt(\"abc\", -1);");
        assert_eq!(
            error.root_cause().message,
            "Array index out of bounds (index: -1, size: 3)"
        );
    }
}

mod arrays {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn mutation() {
        assert_eq!(
            logged(
                r"
                var a = [1, 2];
                debug.log(a.push(3));
                debug.log(a.pop());
                a.insert(0, 0);
                a.insert(3, 9);
                debug.log(a);
                debug.log(a.removeAt(-1));
                debug.log(a);
                "
            ),
            ["null", "3.0", "[0.0, 1.0, 2.0, 9.0]", "9.0", "[0.0, 1.0, 2.0]"]
        );
    }

    #[test]
    fn queries() {
        assert_eq!(
            logged(
                r#"
                var a = [1, [2], "x"];
                debug.log(a.indexOf([2]));
                debug.log(a.indexOf(5));
                debug.log(a.slice(1));
                debug.log(a.slice(0, 1));
                debug.log(a.join("-"));
                debug.log([].isEmpty());
                debug.log(a.reverse());
                debug.log(a);
                "#
            ),
            [
                "1.0",
                "-1.0",
                "[[2.0], x]",
                "[1.0]",
                "1.0-[2.0]-x",
                "true",
                "[x, [2.0], 1.0]",
                "[1.0, [2.0], x]"
            ]
        );
    }

    #[test]
    fn callbacks() {
        assert_eq!(
            logged(
                r"
                var a = [1, 2, 3, 4];
                debug.log(a.map((x) -> x * x));
                debug.log(a.filter((x) -> x % 2 == 0));
                debug.log(a.any((x) -> x > 3));
                debug.log(a.all((x) -> x > 3));
                debug.log(a.find((x) -> x > 2));
                debug.log(a.find((x) -> x > 9));
                var seen = [];
                a.forEach((x) -> seen.push(x));
                debug.log(seen);
                "
            ),
            [
                "[1.0, 4.0, 9.0, 16.0]",
                "[2.0, 4.0]",
                "true",
                "false",
                "3.0",
                "null",
                "[1.0, 2.0, 3.0, 4.0]"
            ]
        );
    }

    #[test]
    fn callbacks_see_a_snapshot() {
        assert_eq!(
            logged("var a = [1, 2]; a.forEach((x) -> a.push(x)); debug.log(a);"),
            ["[1.0, 2.0, 1.0, 2.0]"]
        );
    }

    #[test]
    fn errors() {
        let error = run_err("[].pop();");
        assert_eq!(error.root_cause().message, "Tried to pop from an empty array");
        let error = run_err("[1].insert(3, 0);");
        assert_eq!(
            error.root_cause().message,
            "Array index out of bounds (index: 3, size: 1)"
        );
        let error = run_err("[1].map((x) -> debug.throw(\"in callback\"));");
        assert_eq!(error.message, "Error while calling builtin function map");
        assert_eq!(error.root_cause().message, "in callback");
    }
}

mod objects {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn functions() {
        assert_eq!(
            logged(
                r#"
                var o = {a: 1, b: 2};
                debug.log(objects.values(o));
                debug.log(objects.entries(o));
                debug.log(objects.has(o, "a"));
                debug.log(objects.size(o));
                debug.log(objects.remove(o, "a"));
                debug.log(o);
                debug.log(objects.merge(o, {b: 3, c: 4}));
                debug.log(o);
                "#
            ),
            [
                "[1.0, 2.0]",
                "[[a, 1.0], [b, 2.0]]",
                "true",
                "2.0",
                "1.0",
                "{b=2.0}",
                "{b=3.0, c=4.0}",
                "{b=2.0}"
            ]
        );
    }

    #[test]
    fn remove_missing_key() {
        let error = run_err("objects.remove({}, \"x\");");
        assert_eq!(error.root_cause().message, "Object {} has no key x");
    }
}

mod json {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_and_stringify() {
        assert_eq!(
            logged(
                r#"
                import "json";
                val value = json.parse("[1, {\"k\": null}]");
                debug.log(value);
                debug.log(json.stringify({a: [1, 2]}, false));
                debug.log(json.stringify("x\"y"));
                "#
            ),
            ["[1.0, {k=null}]", r#"{"a":[1,2]}"#, r#""x\"y""#]
        );
    }

    #[test]
    fn parse_error() {
        let error = run_err("import \"json\"; json.parse(\"[1,\");");
        assert_eq!(error.message, "Error while calling builtin function parse");
        assert_eq!(error.root_cause().message, "Unexpected end of file");
    }
}

mod functions {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn bind_and_call() {
        assert_eq!(
            logged(
                r"
                val sub = (a, b) -> a - b;
                debug.log(functions.bind(sub, 10)(3));
                debug.log(functions.call(sub, [1, 2]));
                debug.log(sub.bind(1).bind(2)());
                "
            ),
            ["7.0", "-1.0", "-1.0"]
        );
    }
}
