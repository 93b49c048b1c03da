#[macro_use]
mod common;

#[test]
fn return_after_an_if_still_runs() {
    assert_prints!("fun f() { if (true) {} return \"ok\"; } print f();", "ok");
}

#[test]
fn return_from_inside_an_if_branch_stops_the_function() {
    assert_prints!("fun f() { if (true) return \"ok\"; return \"bad\"; } print f();", "ok");
}

#[test]
fn return_from_inside_a_while_loop_stops_the_function() {
    assert_prints!("fun f() { while (true) { return \"ok\"; } } print f();", "ok");
}

#[test]
fn returning_at_top_level_is_a_resolve_error() {
    assert_fails!("return 1;", "[line 1] Error at 'return': Cannot return from a top-level scope.", 65);
}

#[test]
fn return_with_no_value_yields_nil() {
    assert_prints!("fun f() { return; } print f();", "nil");
}

#[test]
fn return_inside_a_method_works_like_inside_a_function() {
    assert_prints!("class Foo { bar() { return \"ok\"; } } print Foo().bar();", "ok");
}
