use std::fmt;

use crate::token::{Token, Type};

/// Renders the shared `[line N] Error <where>: <message>` shape.
/// `at` is `None` for scanner errors (produces the literal `"Error : "`,
/// space before the colon), `Some(None)` for "at end", `Some(Some(lexeme))`
/// for "at '<lexeme>'".
fn format_diagnostic(line: usize, at: Option<Option<&str>>, message: &str) -> String {
    match at {
        None => format!("[line {line}] Error : {message}"),
        Some(None) => format!("[line {line}] Error at end: {message}"),
        Some(Some(lexeme)) => format!("[line {line}] Error at '{lexeme}': {message}"),
    }
}

fn format_at_token(token: &Token, message: &str) -> String {
    if token.r#type == Type::EOF {
        format_diagnostic(token.line, Some(None), message)
    } else {
        format_diagnostic(token.line, Some(Some(&token.lexeme)), message)
    }
}

/// A lexical error: an unexpected character or an unterminated construct.
/// The scanner reports one of these per offending input and keeps scanning.
#[derive(Debug, Clone)]
pub struct ScanError {
    pub line: usize,
    pub message: String,
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_diagnostic(self.line, None, &self.message))
    }
}

/// A syntax error raised during recursive-descent parsing.
#[derive(Debug, Clone)]
pub struct ParseError {
    pub token: Token,
    pub message: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_at_token(&self.token, &self.message))
    }
}

/// A static-scoping violation caught by the resolver before any evaluation runs.
#[derive(Debug, Clone)]
pub struct ResolveError {
    pub token: Token,
    pub message: String,
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_at_token(&self.token, &self.message))
    }
}

/// A type or binding error surfaced while evaluating the AST.
#[derive(Debug, Clone)]
pub struct RuntimeError {
    pub token: Token,
    pub message: String,
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_at_token(&self.token, &self.message))
    }
}
