#[macro_use]
mod common;

#[test]
fn a_class_declaration_cannot_appear_in_a_for_clause() {
    assert_fails!("for (;;) class Foo {}", "[line 1] Error at 'class': Expect expression.", 65);
}

#[test]
fn a_fun_declaration_cannot_appear_in_a_for_clause() {
    assert_fails!("for (;;) fun f() {}", "[line 1] Error at 'fun': Expect expression.", 65);
}

#[test]
fn each_iteration_closes_over_its_own_loop_variable() {
    assert_prints!(
        "var fns = []; \
         fun capture() { var result; for (var i = 1; i < 4; i = i + 1) { fun show() { print i; } show(); } } \
         capture();",
        "1", "2", "3"
    );
}

#[test]
fn returning_from_inside_a_for_loop_stops_iteration() {
    assert_prints!(
        "fun f() { for (var i = 0; i < 10; i = i + 1) { if (i == 3) return i; } } print f();",
        "3"
    );
}

#[test]
fn returning_a_closure_created_inside_a_for_loop_works() {
    assert_prints!(
        "fun f() { for (var i = 0; i < 1; i = i + 1) { fun g() { return i; } return g; } } print f()();",
        "0"
    );
}

#[test]
fn missing_clauses_default_sensibly() {
    assert_prints!(
        "var i = 0; for (;i < 3;) { print i; i = i + 1; }",
        "0", "1", "2"
    );
}
