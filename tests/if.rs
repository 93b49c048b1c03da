#[macro_use]
mod common;

#[test]
fn a_class_declaration_cannot_appear_as_the_then_branch() {
    assert_fails!("if (true) class Foo {}", "[line 1] Error at 'class': Expect expression.", 65);
}

#[test]
fn a_class_declaration_cannot_appear_as_the_else_branch() {
    assert_fails!("if (false) 1; else class Foo {}", "[line 1] Error at 'class': Expect expression.", 65);
}

#[test]
fn dangling_else_binds_to_the_nearest_if() {
    assert_prints!("if (true) if (false) print \"bad\"; else print \"good\";", "good");
}

#[test]
fn if_without_else_runs_the_then_branch_only_when_true() {
    assert_prints!("if (true) print \"good\"; if (false) print \"bad\"; { if (true) print \"block\"; }", "good", "block");
}

#[test]
fn if_else_picks_the_right_branch() {
    assert_prints!("if (true) print \"good\"; else print \"bad\"; if (false) print \"bad\"; else print \"good\";", "good", "good");
}

#[test]
fn truthiness_of_condition_values() {
    assert_prints!(
        "if (false) print \"bad\"; else print \"false\"; \
         if (nil) print \"bad\"; else print \"nil\"; \
         if (true) print \"true\"; \
         if (0) print \"0\"; \
         if (\"\") print \"empty\";",
        "false", "nil", "true", "0", "empty"
    );
}
