#[macro_use]
mod common;

#[test]
fn a_trailing_dot_with_no_following_digit_is_not_part_of_the_number() {
    assert_fails!("123.;", "[line 1] Error at ';': Expect property name after '.'.", 65);
}

#[test]
fn a_leading_dot_is_not_a_valid_number_and_is_parsed_as_its_own_token() {
    assert_fails!(".123;", "[line 1] Error at '.': Expect expression.", 65);
}

#[test]
fn literals_print_without_superfluous_decimals() {
    assert_prints!(
        "print 123; print 987654; print 0; print -0; print 123.456; print -0.001;",
        "123", "987654", "0", "0", "123.456", "-0.001"
    );
}

#[test]
fn division_by_zero_is_always_a_runtime_error_even_for_zero_dividend() {
    assert_fails!("print 0 / 0;", "[line 1] Error at '/': Division by zero.", 70);
}
