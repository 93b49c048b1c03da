#[macro_use]
mod common;

#[test]
fn and_returns_the_first_falsy_operand_or_the_last_one() {
    assert_prints!(
        "print false and 1; print true and 1; print 1 and 2 and false; print 1 and 2 and 3;",
        "false", "1", "false", "3"
    );
}

#[test]
fn and_short_circuits_on_the_first_falsy_value() {
    assert_prints!(
        "fun bomb() { print \"bomb\"; return true; } print false and bomb();",
        "false"
    );
}

#[test]
fn or_returns_the_first_truthy_operand_or_the_last_one() {
    assert_prints!(
        "print 1 or true; print false or 1; print false or false or true; print false or false or false;",
        "1", "1", "true", "false"
    );
}

#[test]
fn or_short_circuits_on_the_first_truthy_value() {
    assert_prints!(
        "fun bomb() { print \"bomb\"; return false; } print true or bomb();",
        "true"
    );
}
