use assert_cmd::Command;

#[test]
fn running_a_well_formed_script_exits_zero_and_prints_to_stdout() {
    Command::cargo_bin("ember")
        .unwrap()
        .arg("tests/fixtures/ok.ember")
        .assert()
        .success()
        .stdout("hello from a file\n");
}

#[test]
fn a_scan_error_exits_65_and_reports_on_stderr() {
    Command::cargo_bin("ember")
        .unwrap()
        .arg("tests/fixtures/scan_error.ember")
        .assert()
        .code(65)
        .stderr(predicates::str::contains("Unexpected character: '|'."));
}

#[test]
fn a_parse_error_exits_65() {
    Command::cargo_bin("ember")
        .unwrap()
        .arg("tests/fixtures/parse_error.ember")
        .assert()
        .code(65)
        .stderr(predicates::str::contains("Expect expression."));
}

#[test]
fn a_resolve_error_exits_65() {
    Command::cargo_bin("ember")
        .unwrap()
        .arg("tests/fixtures/resolve_error.ember")
        .assert()
        .code(65)
        .stderr(predicates::str::contains("Cannot return from a top-level scope."));
}

#[test]
fn a_runtime_error_exits_70() {
    Command::cargo_bin("ember")
        .unwrap()
        .arg("tests/fixtures/runtime_error.ember")
        .assert()
        .code(70)
        .stderr(predicates::str::contains("Operands must be numbers or strings."));
}

#[test]
fn a_missing_script_file_exits_74() {
    Command::cargo_bin("ember")
        .unwrap()
        .arg("tests/fixtures/does_not_exist.ember")
        .assert()
        .code(74);
}

#[test]
fn more_than_one_argument_exits_64_with_a_usage_message() {
    Command::cargo_bin("ember")
        .unwrap()
        .arg("one.ember")
        .arg("two.ember")
        .assert()
        .code(64)
        .stderr(predicates::str::contains("Usage: ember [script]"));
}
