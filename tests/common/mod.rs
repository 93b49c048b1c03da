use ember_lang::{Ember, Outcome, OutputBuffer};

/// Returns the formatted text of the one diagnostic that stopped `outcome`,
/// or panics if `outcome` was `Ok`. Scan/parse collect a batch of errors, so
/// this is the *first* one — exactly what a caller fixing "the next error"
/// would see.
pub fn first_diagnostic(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Ok => panic!("expected an error outcome, program ran successfully"),
        Outcome::ScanErrors(errors) => errors[0].to_string(),
        Outcome::ParseErrors(errors) => errors[0].to_string(),
        Outcome::ResolveError(error) => error.to_string(),
        Outcome::RuntimeError(error) => error.to_string(),
    }
}

/// Runs `source` to completion and returns everything it printed. Panics
/// with the diagnostic if the program did not finish successfully.
pub fn run_ok(source: &str) -> String {
    let buffer = OutputBuffer::new();
    let mut ember = Ember::with_sink(false, Box::new(buffer.clone()));
    let outcome = ember.run(source);
    if !outcome.is_ok() {
        panic!("expected '{source}' to run successfully, got: {}", first_diagnostic(&outcome));
    }
    buffer.contents()
}

/// Runs `source` and returns the outcome, asserting it did *not* succeed.
pub fn run_err(source: &str) -> Outcome {
    let buffer = OutputBuffer::new();
    let mut ember = Ember::with_sink(false, Box::new(buffer));
    let outcome = ember.run(source);
    assert!(!outcome.is_ok(), "expected '{source}' to fail, but it ran successfully");
    outcome
}

/// Asserts `source` runs successfully and prints exactly `expected_lines`,
/// one `print`/echo per line, in order.
#[macro_export]
macro_rules! assert_prints {
    ($source:expr, $( $line:expr ),* $(,)?) => {{
        let expected: Vec<&str> = vec![$( $line ),*];
        let expected = if expected.is_empty() { String::new() } else { format!("{}\n", expected.join("\n")) };
        let actual = $crate::common::run_ok($source);
        assert_eq!(actual, expected, "unexpected output for:\n{}", $source);
    }};
}

/// Asserts `source` fails with exactly the given diagnostic and exit code.
#[macro_export]
macro_rules! assert_fails {
    ($source:expr, $message:expr, $exit_code:expr) => {{
        let outcome = $crate::common::run_err($source);
        assert_eq!($crate::common::first_diagnostic(&outcome), $message);
        assert_eq!(outcome.exit_code(), $exit_code);
    }};
}
