use pretty_assertions::assert_eq;

use super::{logged, run_err, run_ok};

#[test]
fn test_arithmetic_and_precedence() {
    run_ok(
        r"
        debug.assert(1 + 2 * 3 == 7);
        debug.assert(1 - 2 - 3 == -4);
        debug.assert(2 ** 3 ** 2 == 512);
        debug.assert((1 + 2) * 3 == 9);
        debug.assert(7 % 4 == 3);
        debug.assert(1 < 2 && 2 <= 2 && 3 > 2 && 3 >= 3);
        debug.assert((6 & 3 | 8) == 10);
        debug.assert(~5 == -6);
        ",
    );
}

#[test]
fn test_ternary_is_right_associative() {
    assert_eq!(
        logged(r#"debug.log(false ? 1 : true ? 2 : 3); debug.log(true ? "a" : "b");"#),
        ["2.0", "a"]
    );
}

#[test]
fn test_logical_operators_short_circuit() {
    assert_eq!(
        logged(
            r#"
            debug.log(false && debug.throw("evaluated"));
            debug.log(1 || debug.throw("evaluated"));
            debug.log(null || "fallback");
            debug.log(1 && 2);
            "#
        ),
        ["false", "1.0", "fallback", "2.0"]
    );
}

#[test]
fn test_values_print() {
    assert_eq!(
        logged(
            r#"
            debug.log(1);
            debug.log(0.5);
            debug.log("text");
            debug.log([1, "a", null]);
            debug.log({a: 1, b: [true]});
            debug.log((x) -> x);
            "#
        ),
        [
            "1.0",
            "0.5",
            "text",
            "[1.0, a, null]",
            "{a=1.0, b=[true]}",
            "<function>"
        ]
    );
}

#[test]
fn test_type_tests() {
    run_ok(
        r#"
        debug.assert(1 is number);
        debug.assert("a" is string);
        debug.assert(null is null);
        debug.assert([] is array);
        debug.assert({} is object);
        debug.assert(((x) -> x) is function);
        debug.assert(!(1 is string));
        "#,
    );
}

#[test]
fn test_equality_is_structural() {
    run_ok(
        r#"
        debug.assert([1, [2]] == [1, [2]]);
        debug.assert({a: 1, b: 2} == {b: 2, a: 1});
        debug.assert([1] != [1, 1]);
        debug.assert(1 != "1");
        val f = (x) -> x;
        debug.assert(f == f);
        debug.assert(((x) -> x) != ((x) -> x));
        debug.assert([1] in [[1], 2]);
        debug.assert("a" in {a: null});
        "#,
    );
}

#[test]
fn test_mutations_are_shared_between_references() {
    assert_eq!(
        logged(
            r"
            var a = [1];
            var b = a;
            b[0] = 5;
            debug.log(a);
            var o = {inner: {}};
            var inner = o.inner;
            inner.x = 1;
            debug.log(o);
            "
        ),
        ["[5.0]", "{inner={x=1.0}}"]
    );
}

#[test]
fn test_negative_indices() {
    assert_eq!(
        logged(
            r"
            var a = [1, 2, 3];
            debug.log(a[-1]);
            a[-3] = 0;
            delete a[-2];
            debug.log(a);
            "
        ),
        ["3.0", "[0.0, 3.0]"]
    );
}

#[test]
fn test_repetition() {
    assert_eq!(
        logged(r#"debug.log("ab" * 2); debug.log([0] * 3); debug.log("x" * -1);"#),
        ["abab", "[0.0, 0.0, 0.0]", ""]
    );
}

#[test]
fn test_compound_assignment_and_updates() {
    assert_eq!(
        logged(
            r"
            var x = 1;
            x += 2; debug.log(x);
            x *= 3; debug.log(x);
            debug.log(x++); debug.log(x);
            debug.log(--x);
            var flag = false;
            flag!!; debug.log(flag);
            debug.log(x = 4);
            debug.log(x += 2);
            "
        ),
        ["3.0", "9.0", "9.0", "10.0", "9.0", "true", "4.0", "6.0"]
    );
}

#[test]
fn test_compound_assignment_evaluates_receiver_once() {
    assert_eq!(
        logged(
            r"
            var calls = 0;
            var a = [10, 20];
            function pick() { calls++; return a; }
            pick()[1] += 1;
            pick()[0]++;
            debug.log(a);
            debug.log(calls);
            "
        ),
        ["[11.0, 21.0]", "2.0"]
    );
}

#[test]
fn test_root_access_and_delete() {
    let run = run_ok(
        r#"
        $.name = "patched";
        $.list = [1, 2];
        $.list[0] = 5;
        $["other"] = true;
        $.gone = 1;
        delete $.gone;
        "#,
    );
    assert_eq!(
        run.root_json(),
        r#"{"name":"patched","list":[5,2],"other":true}"#
    );
}

#[test]
fn test_apply_rebinds_root() {
    let run = run_ok(
        r"
        $.child = {a: 1};
        apply ($.child) {
            $.b = 2;
            delete $.a;
        }
        $.top = true;
        ",
    );
    assert_eq!(run.root_json(), r#"{"child":{"b":2},"top":true}"#);
}

#[test]
fn test_blocks_scope_variables() {
    let error = run_err("{ var inner = 1; } debug.log(inner);");
    assert_eq!(error.message, "Cannot find variable with name inner");
    assert_eq!(
        logged("var x = 1; { x = 2; var y = x; debug.log(y); } debug.log(x);"),
        ["2.0", "2.0"]
    );
}

#[test]
fn test_redeclaration_is_an_error() {
    let error = run_err("var x = 1; { var x = 2; }");
    assert_eq!(error.message, "Cannot create variable with duplicate name: x");
}

#[test]
fn test_val_cannot_be_reassigned() {
    let error = run_err("val x = 1; x = 2;");
    assert_eq!(error.message, "Attempt to assign to immutable variable x");
    let error = run_err("val x = 1; x++;");
    assert_eq!(error.message, "Attempt to assign to immutable variable x");
}

#[test]
fn test_while_and_for_loops() {
    assert_eq!(
        logged(
            r"
            var i = 0;
            while (true) {
                i++;
                if (i == 2) continue;
                if (i > 3) break;
                debug.log(i);
            }
            for (var j = 0; j < 5; j++) {
                if (j % 2 == 0) continue;
                debug.log(j);
            }
            "
        ),
        ["1.0", "3.0", "1.0", "3.0"]
    );
}

#[test]
fn test_for_variable_is_scoped_to_loop() {
    let error = run_err("for (var j = 0; j < 1; j++) {} debug.log(j);");
    assert_eq!(error.message, "Cannot find variable with name j");
}

#[test]
fn test_foreach_iterates_snapshot() {
    assert_eq!(
        logged(
            r"
            var items = [1, 2, 3];
            foreach (item in items) {
                items.push(item * 10);
                if (item == 2) break;
                debug.log(item);
            }
            debug.log(items);
            "
        ),
        ["1.0", "[1.0, 2.0, 3.0, 10.0, 20.0]"]
    );
}

#[test]
fn test_foreach_variable_is_immutable() {
    let error = run_err("foreach (item in [1]) { item = 2; }");
    assert_eq!(error.message, "Attempt to assign to immutable variable item");
}

#[test]
fn test_top_level_return_ends_program() {
    assert_eq!(logged("debug.log(1); return; debug.log(2);"), ["1.0"]);
}

#[test]
fn test_scopes_are_released() {
    let run = run_ok("for (var i = 0; i < 100; i++) { { var x = i; } }");
    // The base scope and the program scope remain.
    assert_eq!(run.context.allocated_scopes(), 2);
}

#[test]
fn test_scopes_held_by_their_own_closures_are_reclaimed() {
    let run = run_ok(
        r"
        var i = 0;
        while (i < 3000) { var f = () -> i; f(); i++; }
        function outer(n) {
            var big = [1] * 1000;
            function inner() { return n; }
            return inner();
        }
        for (var j = 0; j < 3000; j++) { outer(j); }
        ",
    );
    // Exited scopes are collected in batches, so a few may remain.
    let allocated = run.context.allocated_scopes();
    assert!(allocated < 70, "{allocated} scopes still allocated");
}
