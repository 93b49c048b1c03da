#[macro_use]
mod common;

#[test]
fn assigning_through_a_closure_mutates_the_shared_binding() {
    assert_prints!(
        "fun makeCounter() { var count = 0; fun increment() { count = count + 1; return count; } return increment; } \
         var counter = makeCounter(); print counter(); print counter(); print counter();",
        "1", "2", "3"
    );
}

#[test]
fn each_call_gets_its_own_environment() {
    assert_prints!(
        "fun makeCounter() { var count = 0; fun increment() { count = count + 1; return count; } return increment; } \
         var a = makeCounter(); var b = makeCounter(); print a(); print a(); print b();",
        "1", "2", "1"
    );
}

#[test]
fn closure_captures_the_declaring_environment_not_the_call_site() {
    assert_prints!(
        "var x = \"global\"; fun outer() { var x = \"outer\"; fun inner() { print x; } return inner; } outer()();",
        "outer"
    );
}

#[test]
fn nested_closures_each_capture_their_own_level() {
    assert_prints!(
        "fun outer() { var a = \"a\"; fun middle() { var b = \"b\"; fun inner() { var c = \"c\"; print a; print b; print c; } return inner; } return middle(); } outer()();",
        "a", "b", "c"
    );
}

#[test]
fn closure_survives_after_its_declaring_scope_has_exited() {
    assert_prints!(
        "var hold; { var local = \"local\"; fun read() { return local; } hold = read; } print hold();",
        "local"
    );
}
