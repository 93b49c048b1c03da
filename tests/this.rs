#[macro_use]
mod common;

#[test]
fn this_inside_a_closure_captured_in_a_method_resolves_to_the_receiver() {
    assert_prints!(
        "class Foo { getClosure() { fun closure() { return this.name; } return closure; } } \
         var foo = Foo(); foo.name = \"Foo\"; print foo.getClosure()();",
        "Foo"
    );
}

#[test]
fn a_nested_class_method_returns_its_own_receiver_not_the_outer_one() {
    assert_prints!(
        "class Outer { method() { print this; fun helper() { class Inner { method() { print this; } } return Inner(); } return helper(); } } \
         var outer = Outer(); var innerInstance = outer.method(); innerInstance.method();",
        "Outer instance", "Outer instance", "Inner instance"
    );
}

#[test]
fn this_used_at_top_level_is_a_resolve_error() {
    assert_fails!("print this;", "[line 1] Error at 'this': Cannot use 'this' outside of a class.", 65);
}

#[test]
fn this_inside_a_method_refers_to_the_receiving_instance() {
    assert_prints!(
        "class Foo { baz() { this.name = \"baz\"; print this.name; } } Foo().baz();",
        "baz"
    );
}

#[test]
fn this_inside_a_plain_top_level_function_is_a_resolve_error() {
    assert_fails!("fun notAMethod() { print this; }", "[line 1] Error at 'this': Cannot use 'this' outside of a class.", 65);
}
