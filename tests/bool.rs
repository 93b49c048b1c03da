#[macro_use]
mod common;

#[test]
fn equality() {
    assert_prints!(
        "print true == true; print true == false; print false == true; print false == false;",
        "true", "false", "false", "true"
    );
}

#[test]
fn equality_across_types_is_always_false_no_coercion() {
    assert_prints!("print true == 1; print false == nil; print true == \"true\";", "false", "false", "false");
}

#[test]
fn not() {
    assert_prints!("print !true; print !false; print !!true;", "false", "true", "true");
}
