#![allow(clippy::unwrap_used, clippy::expect_used)]

use patch_ir::{BinaryOp, UnaryOp, UpdateOp};

use super::{binary, to_i32, unary, update};
use crate::Value;

fn n(value: f64) -> Value {
    Value::from(value)
}

fn s(value: &str) -> Value {
    Value::from(value)
}

fn array(items: Vec<Value>) -> Value {
    Value::array(items)
}

fn error(op: BinaryOp, left: &Value, right: &Value) -> String {
    binary(op, left, right).unwrap_err().message
}

mod arithmetic {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn numbers() {
        assert_eq!(binary(BinaryOp::Add, &n(1.0), &n(2.0)).unwrap(), n(3.0));
        assert_eq!(binary(BinaryOp::Sub, &n(1.0), &n(2.0)).unwrap(), n(-1.0));
        assert_eq!(binary(BinaryOp::Mul, &n(3.0), &n(2.0)).unwrap(), n(6.0));
        assert_eq!(binary(BinaryOp::Div, &n(1.0), &n(4.0)).unwrap(), n(0.25));
        assert_eq!(binary(BinaryOp::Mod, &n(7.0), &n(3.0)).unwrap(), n(1.0));
        assert_eq!(binary(BinaryOp::Pow, &n(2.0), &n(10.0)).unwrap(), n(1024.0));
    }

    #[test]
    fn division_by_zero_is_infinite() {
        assert_eq!(
            binary(BinaryOp::Div, &n(1.0), &n(0.0)).unwrap(),
            n(f64::INFINITY)
        );
    }

    #[test]
    fn concatenation() {
        assert_eq!(binary(BinaryOp::Add, &s("ab"), &s("cd")).unwrap(), s("abcd"));
        let joined = binary(
            BinaryOp::Add,
            &array(vec![n(1.0)]),
            &array(vec![n(2.0)]),
        )
        .unwrap();
        assert_eq!(joined, array(vec![n(1.0), n(2.0)]));
    }

    #[test]
    fn object_merge_prefers_right() {
        let left = Value::object([("a", n(1.0)), ("b", n(2.0))].into_iter().collect());
        let right = Value::object([("b", n(3.0))].into_iter().collect());
        let merged = binary(BinaryOp::Add, &left, &right).unwrap();
        assert_eq!(merged.to_json(), r#"{"a":1,"b":3}"#);
        // Operands are untouched.
        assert_eq!(left.to_json(), r#"{"a":1,"b":2}"#);
    }

    #[test]
    fn repetition() {
        assert_eq!(binary(BinaryOp::Mul, &s("ab"), &n(3.0)).unwrap(), s("ababab"));
        assert_eq!(binary(BinaryOp::Mul, &s("ab"), &n(-2.0)).unwrap(), s(""));
        assert_eq!(
            binary(BinaryOp::Mul, &array(vec![n(1.0)]), &n(2.0)).unwrap(),
            array(vec![n(1.0), n(1.0)])
        );
    }

    #[test]
    fn type_errors() {
        assert_eq!(
            error(BinaryOp::Add, &n(1.0), &s("a")),
            "Can't add 1.0 and a together"
        );
        assert_eq!(
            error(BinaryOp::Sub, &s("a"), &n(1.0)),
            "Can't subtract 1.0 from a"
        );
        assert_eq!(error(BinaryOp::Mul, &n(1.0), &s("a")), "Can't multiply by a");
        assert_eq!(
            error(BinaryOp::Mul, &Value::Null, &n(2.0)),
            "Can't multiply null with 2.0"
        );
        assert_eq!(
            error(BinaryOp::Div, &Value::Null, &n(2.0)),
            "Can't divide null by 2.0"
        );
    }
}

mod comparison {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn numbers_only() {
        assert_eq!(
            binary(BinaryOp::Lt, &n(1.0), &n(2.0)).unwrap(),
            Value::Boolean(true)
        );
        assert_eq!(
            binary(BinaryOp::GtEq, &n(1.0), &n(2.0)).unwrap(),
            Value::Boolean(false)
        );
        assert_eq!(
            error(BinaryOp::Lt, &s("a"), &s("b")),
            "Can't compare a and b"
        );
    }

    #[test]
    fn equality_never_fails() {
        assert_eq!(
            binary(BinaryOp::Eq, &n(1.0), &s("1")).unwrap(),
            Value::Boolean(false)
        );
        assert_eq!(
            binary(BinaryOp::NotEq, &Value::Null, &Value::Null).unwrap(),
            Value::Boolean(false)
        );
    }

    #[test]
    fn membership() {
        let items = array(vec![array(vec![n(1.0)]), s("x")]);
        assert_eq!(
            binary(BinaryOp::In, &array(vec![n(1.0)]), &items).unwrap(),
            Value::Boolean(true)
        );
        let object = Value::object([("key", Value::Null)].into_iter().collect());
        assert_eq!(
            binary(BinaryOp::In, &s("key"), &object).unwrap(),
            Value::Boolean(true)
        );
        assert_eq!(
            error(BinaryOp::In, &n(1.0), &object),
            "Can't check if 1.0 is in {key=null}"
        );
    }
}

mod bitwise {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn integers() {
        assert_eq!(binary(BinaryOp::BitAnd, &n(6.0), &n(3.0)).unwrap(), n(2.0));
        assert_eq!(binary(BinaryOp::BitOr, &n(6.5), &n(1.0)).unwrap(), n(7.0));
        assert_eq!(binary(BinaryOp::BitXor, &n(6.0), &n(3.0)).unwrap(), n(5.0));
        assert_eq!(unary(UnaryOp::BitNot, &n(0.0)).unwrap(), n(-1.0));
    }

    #[test]
    fn booleans_do_not_short_circuit() {
        assert_eq!(
            binary(BinaryOp::BitXor, &Value::Boolean(true), &Value::Boolean(true)).unwrap(),
            Value::Boolean(false)
        );
        assert_eq!(
            error(BinaryOp::BitAnd, &Value::Boolean(true), &n(1.0)),
            "Can't apply and to true and 1.0"
        );
    }

    #[test]
    fn truncation() {
        assert_eq!(to_i32(3.9), 3);
        assert_eq!(to_i32(-3.9), -3);
        assert_eq!(to_i32(f64::NAN), 0);
        assert_eq!(to_i32(1e12), i32::MAX);
    }
}

mod prefix_and_update {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn unary_operators() {
        assert_eq!(unary(UnaryOp::Neg, &n(2.0)).unwrap(), n(-2.0));
        assert_eq!(
            unary(UnaryOp::Not, &Value::Boolean(false)).unwrap(),
            Value::Boolean(true)
        );
        assert_eq!(
            unary(UnaryOp::Not, &n(0.0)).unwrap_err().message,
            "Can't apply boolean not to 0.0. Only booleans are supported."
        );
        assert_eq!(
            unary(UnaryOp::Neg, &s("a")).unwrap_err().message,
            "Can't negate a. Only numbers are supported."
        );
    }

    #[test]
    fn update_operators() {
        assert_eq!(update(UpdateOp::Increment, &n(1.0)).unwrap(), n(2.0));
        assert_eq!(update(UpdateOp::Decrement, &n(1.0)).unwrap(), n(0.0));
        assert_eq!(
            update(UpdateOp::Toggle, &Value::Boolean(true)).unwrap(),
            Value::Boolean(false)
        );
        assert_eq!(
            update(UpdateOp::Decrement, &Value::Null).unwrap_err().message,
            "Can't decrement null. Only numbers are supported."
        );
    }
}
