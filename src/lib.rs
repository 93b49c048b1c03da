#![allow(clippy::needless_return)]

//! Ember is a small dynamically-typed, class-based scripting language. This
//! crate is a tree-walking interpreter for it: source text is scanned into a
//! token stream, parsed into an AST by a recursive-descent parser with
//! panic-mode error recovery, resolved by a lexical-scoping pass that binds
//! every variable reference to a scope-hop distance, and evaluated against a
//! chain of environments.
//!
//! ## Scanning
//! The [`scanner`] module turns source text into a list of [`Token`](token::Token)s.
//! It recovers from a bad character or an unterminated string by continuing
//! to scan, collecting every [`ScanError`](error::ScanError) it finds rather
//! than stopping at the first.
//!
//! ## Parsing
//! The [`parser`] module is a recursive-descent parser producing the
//! [`Expr`](expr::Expr)/[`Stmt`](stmt::Stmt) AST. Like the scanner, it
//! recovers from a syntax error (panic-mode synchronization to the next
//! statement boundary) and collects every [`ParseError`](error::ParseError).
//!
//! ## Resolving
//! The [`resolver`] module walks the AST once to compute, for every
//! variable-bearing expression, the number of enclosing scopes it must cross
//! to reach its binding. This side-table is what lets the evaluator look up
//! a name with a direct hop count instead of a dynamic scope search — the
//! mechanism that makes closures and shadowing behave correctly. Unlike the
//! scanner and parser, it stops at the first [`ResolveError`](error::ResolveError):
//! a resolver error can leave its scope stack in a state later resolution
//! shouldn't trust.
//!
//! ## Interpreting
//! The [`interpreter`] module evaluates the AST against the resolver's
//! side-table, producing `print` output and [`RuntimeError`](error::RuntimeError)s.

use std::io::{self, Write};
use std::{fs, process};

pub mod ast_printer;
pub mod class;
pub mod environment;
pub mod error;
pub mod expr;
pub mod function;
pub mod interpreter;
pub mod literal;
pub mod object;
pub mod parser;
pub mod resolver;
pub mod scanner;
pub mod stmt;
pub mod token;

use error::{ParseError, ResolveError, RuntimeError, ScanError};
use interpreter::Interpreter;
use parser::Parser;
use resolver::Resolver;
use scanner::Scanner;

/// What a single run of [`Ember::run`] produced: success, or the family of
/// error that stopped it (spec §6.5's exit-code families, one variant each).
#[derive(Debug)]
pub enum Outcome {
    Ok,
    ScanErrors(Vec<ScanError>),
    ParseErrors(Vec<ParseError>),
    ResolveError(ResolveError),
    RuntimeError(RuntimeError),
}

impl Outcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Ok)
    }

    /// The process exit code this outcome maps to, per spec §6.5.
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Ok => 0,
            Outcome::ScanErrors(_) | Outcome::ParseErrors(_) | Outcome::ResolveError(_) => 65,
            Outcome::RuntimeError(_) => 70,
        }
    }
}

/// An in-memory [`Write`] sink whose contents can be read back after the
/// writer has been handed off — `Box<dyn Write>` alone can't be downcast, so
/// this keeps a second handle to the same backing buffer. Used to capture
/// interpreter output in tests without spawning a process.
#[derive(Clone, Default)]
pub struct OutputBuffer(std::rc::Rc<std::cell::RefCell<Vec<u8>>>);

impl OutputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for OutputBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// The driver: owns one [`Interpreter`] across an entire script or REPL
/// session, and a sink every `print` and interactive echo is flushed to.
/// Reusing the same interpreter across REPL lines is what makes globals
/// survive a runtime error on one line (spec §7).
pub struct Ember {
    interpreter: Interpreter,
    sink: Box<dyn Write>,
}

impl Ember {
    /// `interactive` gates whether a bare expression statement also echoes
    /// its value, per spec §4.4 and §9 ("Interactive echoing").
    pub fn new(interactive: bool) -> Self {
        Self::with_sink(interactive, Box::new(io::stdout()))
    }

    pub fn with_sink(interactive: bool, sink: Box<dyn Write>) -> Self {
        Ember { interpreter: Interpreter::new(interactive), sink }
    }

    /// Reads `path` and runs it as a script, returning the process exit code
    /// spec §6.5 assigns to the outcome (`74` if the file can't be read).
    pub fn run_file(&mut self, path: &str) -> i32 {
        match fs::read_to_string(path) {
            Ok(source) => self.run(&source).exit_code(),
            Err(err) => {
                eprintln!("Could not read file '{path}': {err}");
                74
            }
        }
    }

    /// A REPL: each line runs against the same interpreter, so globals
    /// defined on one line are visible on the next, but an error on one line
    /// does not poison later lines.
    pub fn run_prompt(&mut self) {
        let history_path = home::home_dir().map(|mut home| {
            home.push(".ember_history");
            home
        });

        let mut editor = rustyline::DefaultEditor::new().expect("terminal supports line editing");
        if let Some(path) = &history_path {
            let _ = editor.load_history(path);
        }

        loop {
            match editor.readline("> ") {
                Ok(line) => {
                    let _ = editor.add_history_entry(line.as_str());
                    self.run(&line);
                }
                Err(rustyline::error::ReadlineError::Interrupted | rustyline::error::ReadlineError::Eof) => break,
                Err(err) => {
                    eprintln!("Error reading input: {err}");
                    break;
                }
            }
        }

        if let Some(path) = &history_path {
            let _ = editor.save_history(path);
        }
    }

    /// Runs the scanner → parser → resolver → interpreter pipeline over
    /// `source`, printing every diagnostic it collects along the way and
    /// flushing any `print`/echo output produced before a runtime error.
    pub fn run(&mut self, source: &str) -> Outcome {
        let (tokens, scan_errors) = Scanner::new(source).scan_tokens();
        if !scan_errors.is_empty() {
            for error in &scan_errors {
                eprintln!("{error}");
            }
            return Outcome::ScanErrors(scan_errors);
        }

        let (statements, parse_errors) = Parser::new(tokens).parse();
        if !parse_errors.is_empty() {
            for error in &parse_errors {
                eprintln!("{error}");
            }
            return Outcome::ParseErrors(parse_errors);
        }

        self.interpreter.clear_locals();
        let mut resolver = Resolver::new(&mut self.interpreter);
        if let Err(error) = resolver.resolve(&statements) {
            eprintln!("{error}");
            return Outcome::ResolveError(error);
        }

        let outcome = match self.interpreter.interpret(&statements) {
            Ok(()) => Outcome::Ok,
            Err(error) => {
                eprintln!("{error}");
                Outcome::RuntimeError(error)
            }
        };

        let output = self.interpreter.take_output();
        self.sink.write_all(&output).expect("sink accepts interpreter output");

        outcome
    }
}
