use cursor::{Cursor, Line};
use errors::Diagnostics;
use log::{debug, trace};

pub mod token;
pub use token::{format_number, Literal, Token, TokenType};
use TokenType::*;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ScanErrorKind {
    #[error("Unexpected character: {0}")]
    UnexpectedCharacter(char),
    #[error("Unterminated string.")]
    UnterminatedString,
    #[error("Invalid number format: {0}")]
    InvalidNumberFormat(String),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("[line {line}] Error: {kind}")]
pub struct ScanError {
    pub kind: ScanErrorKind,
    pub line: Line,
}

impl ScanError {
    pub fn new(kind: ScanErrorKind, line: Line) -> Self {
        Self { kind, line }
    }
}

pub type ScanErrors = Diagnostics<ScanError>;

pub struct Scanner<'a> {
    cursor: Cursor<'a>,
    tokens: Vec<Token<'a>>,
    errors: ScanErrors,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { cursor: Cursor::new(source), tokens: Vec::new(), errors: Diagnostics::new() }
    }

    /// Scans the whole source in one pass.
    ///
    /// Errors don't stop the scan, so the returned tokens always end with EOF even if
    /// diagnostics were recorded along the way.
    pub fn scan_tokens(mut self) -> (Vec<Token<'a>>, ScanErrors) {
        while !self.cursor.is_at_end() {
            self.cursor.begin_lexeme();
            self.scan_token();
        }

        self.tokens.push(Token::eof(self.cursor.line()));

        debug!("Scanned {} tokens with {} errors", self.tokens.len(), self.errors.len());
        (self.tokens, self.errors)
    }

    fn add_token(&mut self, ty: TokenType) {
        let token = Token::new(ty, self.cursor.lexeme(), self.cursor.line());
        trace!("{}", token);
        self.tokens.push(token);
    }

    fn add_literal(&mut self, ty: TokenType, literal: Literal<'a>) {
        let token = Token::with_literal(ty, self.cursor.lexeme(), literal, self.cursor.line());
        trace!("{}", token);
        self.tokens.push(token);
    }

    fn error(&mut self, kind: ScanErrorKind) {
        self.errors.push(ScanError::new(kind, self.cursor.line()));
    }

    fn add_either(&mut self, expected: char, matched: TokenType, otherwise: TokenType) {
        if self.cursor.advance_if(expected) {
            self.add_token(matched)
        } else {
            self.add_token(otherwise)
        }
    }

    fn scan_token(&mut self) {
        let Some(c) = self.cursor.advance() else {
            return;
        };

        match c {
            '(' => self.add_token(LeftParen),
            ')' => self.add_token(RightParen),
            '{' => self.add_token(LeftBrace),
            '}' => self.add_token(RightBrace),
            ',' => self.add_token(Comma),
            '.' => self.add_token(Dot),
            '-' => self.add_token(Minus),
            '+' => self.add_token(Plus),
            ';' => self.add_token(Semicolon),
            '*' => self.add_token(Star),

            '!' => self.add_either('=', BangEqual, Bang),
            '=' => self.add_either('=', EqualEqual, Equal),
            '<' => self.add_either('=', LessEqual, Less),
            '>' => self.add_either('=', GreaterEqual, Greater),

            '/' => {
                if self.cursor.advance_if('/') {
                    // Comment, the newline itself is left for the main loop
                    self.cursor.advance_while(|c| c != '\n');
                } else {
                    self.add_token(Slash)
                }
            }

            '"' => self.string(),
            d if d.is_ascii_digit() => self.number(),
            c if is_identifier_start(c) => self.identifier(),

            // The cursor counts lines itself
            ' ' | '\r' | '\t' | '\n' => (),

            c => self.error(ScanErrorKind::UnexpectedCharacter(c)),
        }
    }

    fn string(&mut self) {
        self.cursor.advance_while(|c| c != '"');

        if !self.cursor.advance_if('"') {
            self.error(ScanErrorKind::UnterminatedString);
            return;
        }

        let lexeme = self.cursor.lexeme();
        self.add_literal(Str, Literal::Str(&lexeme[1..lexeme.len() - 1]));
    }

    fn number(&mut self) {
        self.cursor.advance_while(|c| c.is_ascii_digit());

        // A trailing '.' without digits after it is not part of the number
        if self.cursor.peek() == Some('.')
            && self.cursor.peek_next().is_some_and(|c| c.is_ascii_digit())
        {
            self.cursor.advance();
            self.cursor.advance_while(|c| c.is_ascii_digit());
        }

        // Digit runs beyond the f64 range parse to inf, which wouldn't print back
        match self.cursor.lexeme().parse::<f64>() {
            Ok(n) if n.is_finite() => self.add_literal(Number, Literal::Number(n)),
            _ => self.error(ScanErrorKind::InvalidNumberFormat(self.cursor.lexeme().to_string())),
        }
    }

    fn identifier(&mut self) {
        self.cursor.advance_while(is_identifier_char);
        let ty = TokenType::keyword(self.cursor.lexeme()).unwrap_or(Identifier);
        self.add_token(ty);
    }
}

fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_identifier_char(c: char) -> bool {
    is_identifier_start(c) || c.is_ascii_digit()
}
