#[macro_use]
mod common;

#[test]
fn a_field_holding_a_function_can_be_called() {
    assert_prints!(
        "class Box {} var box = Box(); fun f(a, b) { print a + b; } box.fn = f; box.fn(1, 2);",
        "3"
    );
}

#[test]
fn calling_a_non_function_field_is_a_runtime_error() {
    assert_fails!(
        "class Box {} var box = Box(); box.value = 1; box.value();",
        "[line 1] Error at ')': Only functions and classes are callable.",
        70
    );
}

#[test]
fn getting_a_property_on_a_non_instance_is_a_runtime_error() {
    assert_fails!("true.foo;", "[line 1] Error at 'foo': Only class instances have properties.", 70);
}

#[test]
fn getting_a_property_on_a_class_value_is_a_runtime_error() {
    assert_fails!("class Foo {} Foo.bar;", "[line 1] Error at 'bar': Only class instances have properties.", 70);
}

#[test]
fn getting_a_property_on_nil_is_a_runtime_error() {
    assert_fails!("nil.foo;", "[line 1] Error at 'foo': Only class instances have properties.", 70);
}

#[test]
fn getting_a_property_on_a_number_is_a_runtime_error() {
    assert_fails!("(1).foo;", "[line 1] Error at 'foo': Only class instances have properties.", 70);
}

#[test]
fn getting_a_property_on_a_string_is_a_runtime_error() {
    assert_fails!("\"str\".foo;", "[line 1] Error at 'foo': Only class instances have properties.", 70);
}

#[test]
fn fields_are_created_on_first_assignment() {
    assert_prints!(
        "class Box {} var box = Box(); box.value = \"apple\"; print box.value;",
        "apple"
    );
}

#[test]
fn reading_a_field_prefers_it_over_an_inherited_method_of_the_same_name() {
    assert_prints!(
        "class Box { get() { return \"method\"; } } \
         var box = Box(); print box.get(); box.get = \"field\"; print box.get;",
        "method", "field"
    );
}

#[test]
fn a_method_reference_stays_bound_to_the_instance_it_was_read_from() {
    assert_prints!(
        "class Box { greet() { return this.greeting; } } \
         var a = Box(); a.greeting = \"a\"; var b = Box(); b.greeting = \"b\"; \
         var m = a.greet; print m();",
        "a"
    );
}

#[test]
fn setting_a_field_on_a_non_instance_is_a_runtime_error() {
    assert_fails!("true.foo = 1;", "[line 1] Error at 'foo': Only class instances have fields.", 70);
}

#[test]
fn setting_a_field_on_a_class_value_is_a_runtime_error() {
    assert_fails!("class Foo {} Foo.bar = 1;", "[line 1] Error at 'bar': Only class instances have fields.", 70);
}

#[test]
fn reading_an_undefined_property_is_a_runtime_error() {
    assert_fails!(
        "class Foo {} var foo = Foo(); foo.bar;",
        "[line 1] Error at 'bar': Undefined property 'bar'.",
        70
    );
}
