#[macro_use]
mod common;

#[test]
fn a_class_declaration_cannot_appear_as_a_while_body() {
    assert_fails!("while (false) class Foo {}", "[line 1] Error at 'class': Expect expression.", 65);
}

#[test]
fn a_closure_created_inside_a_while_body_sees_each_iteration_value() {
    assert_prints!(
        "var i = 0; while (i < 3) { i = i + 1; fun show() { print i; } show(); }",
        "1", "2", "3"
    );
}

#[test]
fn a_fun_declaration_cannot_appear_as_a_while_body() {
    assert_fails!("while (false) fun f() {}", "[line 1] Error at 'fun': Expect expression.", 65);
}

#[test]
fn returning_a_closure_from_inside_a_while_loop_works() {
    assert_prints!("fun f() { var i = 0; while (i < 1) { fun g() { return i; } return g; } } print f()();", "0");
}

#[test]
fn returning_from_inside_a_while_body_stops_the_loop() {
    assert_prints!("fun f() { var i = 0; while (true) { if (i == 2) return i; i = i + 1; } } print f();", "2");
}

#[test]
fn a_standard_counting_loop_runs_the_expected_number_of_times() {
    assert_prints!("var i = 0; while (i < 3) { print i; i = i + 1; }", "0", "1", "2");
}
