use std::str::Chars;

use peekmore::{PeekMore, PeekMoreIterator};

use crate::error::ScanError;
use crate::literal::Literal;
use crate::token::{Token, Type};

/// Converts source text into a token stream terminated by a synthetic `EOF`.
/// Scans over a [`PeekMoreIterator`] for one- and two-character lookahead
/// instead of hand-rolled index bookkeeping into the source string.
pub struct Scanner<'a> {
    source: PeekMoreIterator<Chars<'a>>,
    tokens: Vec<Token>,
    errors: Vec<ScanError>,
    line: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Scanner<'a> {
        Scanner {
            source: source.chars().peekmore(),
            tokens: Vec::new(),
            errors: Vec::new(),
            line: 1,
        }
    }

    /// Scans the whole source, collecting every diagnostic rather than
    /// stopping at the first: the scanner recovers at the next character (or
    /// at EOF for an unterminated string) and keeps going.
    pub fn scan_tokens(mut self) -> (Vec<Token>, Vec<ScanError>) {
        while self.peek().is_some() {
            self.scan_token();
        }

        self.tokens.push(Token::new(Type::EOF, String::new(), None, self.line));

        (self.tokens, self.errors)
    }

    fn advance(&mut self) -> char {
        let c = self.source.next().expect("advance called past end of source");
        if c == '\n' {
            self.line += 1;
        }
        c
    }

    fn peek(&mut self) -> Option<char> {
        self.source.peek().copied()
    }

    fn peek_next(&mut self) -> Option<char> {
        self.source.peek_next().copied()
    }

    /// Consumes the next character if it equals `expected`.
    fn advance_if(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn add_token(&mut self, r#type: Type, lexeme: String, literal: Option<Literal>) {
        self.tokens.push(Token::new(r#type, lexeme, literal, self.line));
    }

    fn error(&mut self, message: impl Into<String>) {
        self.errors.push(ScanError { line: self.line, message: message.into() });
    }

    fn string(&mut self) {
        let line = self.line;
        self.advance(); // opening quote

        let mut value = String::new();
        loop {
            match self.peek() {
                Some('"') => break,
                Some(c) => {
                    value.push(c);
                    self.advance();
                }
                None => {
                    self.errors.push(ScanError { line, message: "Unterminated string literal.".to_string() });
                    return;
                }
            }
        }

        self.advance(); // closing quote
        self.add_token(Type::String, value.clone(), Some(Literal::String(value)));
    }

    /// Trailing `.` with no following digit is not part of the number —
    /// it is left for the next token (e.g. `1.` scans as `1` then `.`).
    fn number(&mut self) {
        let mut lexeme = String::new();

        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            lexeme.push(self.advance());
        }

        if self.peek() == Some('.') && matches!(self.peek_next(), Some(c) if c.is_ascii_digit()) {
            lexeme.push(self.advance()); // the dot
            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                lexeme.push(self.advance());
            }
        }

        let value: f64 = lexeme.parse().expect("lexeme only ever contains digits and at most one dot");
        self.add_token(Type::Number, lexeme, Some(Literal::Number(value)));
    }

    fn identifier(&mut self) {
        let mut lexeme = String::new();

        while matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_') {
            lexeme.push(self.advance());
        }

        let r#type = keyword(&lexeme).unwrap_or(Type::Identifier);
        self.add_token(r#type, lexeme, None);
    }

    fn scan_token(&mut self) {
        let c = self.peek().expect("scan_token called at end of source");

        match c {
            '(' => { self.advance(); self.add_token(Type::LeftParen, "(".to_string(), None); }
            ')' => { self.advance(); self.add_token(Type::RightParen, ")".to_string(), None); }
            '{' => { self.advance(); self.add_token(Type::LeftBrace, "{".to_string(), None); }
            '}' => { self.advance(); self.add_token(Type::RightBrace, "}".to_string(), None); }
            ',' => { self.advance(); self.add_token(Type::Comma, ",".to_string(), None); }
            '.' => { self.advance(); self.add_token(Type::Dot, ".".to_string(), None); }
            '-' => { self.advance(); self.add_token(Type::Minus, "-".to_string(), None); }
            '+' => { self.advance(); self.add_token(Type::Plus, "+".to_string(), None); }
            ';' => { self.advance(); self.add_token(Type::Semicolon, ";".to_string(), None); }
            '*' => { self.advance(); self.add_token(Type::Star, "*".to_string(), None); }

            '!' => {
                self.advance();
                if self.advance_if('=') {
                    self.add_token(Type::BangEqual, "!=".to_string(), None);
                } else {
                    self.add_token(Type::Bang, "!".to_string(), None);
                }
            }
            '=' => {
                self.advance();
                if self.advance_if('=') {
                    self.add_token(Type::EqualEqual, "==".to_string(), None);
                } else {
                    self.add_token(Type::Equal, "=".to_string(), None);
                }
            }
            '<' => {
                self.advance();
                if self.advance_if('=') {
                    self.add_token(Type::LessEqual, "<=".to_string(), None);
                } else {
                    self.add_token(Type::Less, "<".to_string(), None);
                }
            }
            '>' => {
                self.advance();
                if self.advance_if('=') {
                    self.add_token(Type::GreaterEqual, ">=".to_string(), None);
                } else {
                    self.add_token(Type::Greater, ">".to_string(), None);
                }
            }
            '/' => {
                self.advance();
                if self.advance_if('/') {
                    while !matches!(self.peek(), Some('\n') | None) {
                        self.advance();
                    }
                } else {
                    self.add_token(Type::Slash, "/".to_string(), None);
                }
            }

            ' ' | '\r' | '\t' | '\n' => {
                self.advance();
            }

            '"' => self.string(),

            c if c.is_ascii_digit() => self.number(),
            c if c.is_alphabetic() || c == '_' => self.identifier(),

            c => {
                self.advance();
                self.error(format!("Unexpected character: '{c}'."));
            }
        }
    }
}

fn keyword(lexeme: &str) -> Option<Type> {
    Some(match lexeme {
        "and" => Type::And,
        "class" => Type::Class,
        "else" => Type::Else,
        "false" => Type::False,
        "fun" => Type::Fun,
        "for" => Type::For,
        "if" => Type::If,
        "nil" => Type::Nil,
        "or" => Type::Or,
        "print" => Type::Print,
        "return" => Type::Return,
        "super" => Type::Super,
        "this" => Type::This,
        "true" => Type::True,
        "var" => Type::Var,
        "while" => Type::While,
        _ => return None,
    })
}
