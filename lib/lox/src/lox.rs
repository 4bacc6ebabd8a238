use std::{
    fmt::Display,
    io::{self, Write},
};

use errors::Diagnostics;
use interpreter::Interpreter;
use log::debug;
use parser::Parser;
use scanner::Scanner;

pub use interpreter::Value;

/// How far down the pipeline a run goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Print every token.
    Tokenize,
    /// Print the structural form of every expression.
    Parse,
    /// Print the value of every expression.
    Evaluate,
}

#[derive(thiserror::Error, Debug)]
pub enum RunError {
    #[error("{0} lexical error(s)")]
    ScanFailed(usize),
    #[error("{0} parse error(s)")]
    ParseFailed(usize),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl RunError {
    /// Process exit status for this failure. Errors in the source use 65 (`EX_DATAERR`).
    pub fn exit_code(&self) -> u8 {
        match self {
            RunError::ScanFailed(_) | RunError::ParseFailed(_) => 65,
            RunError::Io(_) => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, RunError>;

#[derive(Debug, Default)]
pub struct Lox {
    interpreter: Interpreter,
}

impl Lox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `source` through the pipeline up to `mode`.
    ///
    /// Results go to `out` and diagnostics to `err`, one line each. Any diagnostic makes
    /// the run fail, lexical ones take precedence over parse errors.
    pub fn run_source(
        &self,
        mode: Mode,
        source: &str,
        out: &mut impl Write,
        err: &mut impl Write,
    ) -> Result<()> {
        let (tokens, scan_errors) = Scanner::new(source).scan_tokens();
        report(&scan_errors, err)?;

        if mode == Mode::Tokenize {
            for token in &tokens {
                writeln!(out, "{}", token)?;
            }
            return status(&scan_errors, &Diagnostics::<()>::new());
        }

        let (exprs, parse_errors) = Parser::new(tokens).parse();
        report(&parse_errors, err)?;

        match mode {
            Mode::Parse => {
                for expr in &exprs {
                    writeln!(out, "{}", expr)?;
                }
            }
            Mode::Evaluate if scan_errors.is_empty() && parse_errors.is_empty() => {
                for value in self.interpreter.interpret(&exprs) {
                    writeln!(out, "{}", value)?;
                }
            }
            _ => debug!("Not evaluating, source has errors"),
        }

        status(&scan_errors, &parse_errors)
    }

    /// Like [`Lox::run_source`], for source that may not be valid UTF-8.
    ///
    /// Invalid sequences become U+FFFD and are then reported by the scanner as
    /// unexpected characters.
    pub fn run_bytes(
        &self,
        mode: Mode,
        source: &[u8],
        out: &mut impl Write,
        err: &mut impl Write,
    ) -> Result<()> {
        self.run_source(mode, &String::from_utf8_lossy(source), out, err)
    }

    /// Evaluates a single expression, as typed into the prompt.
    ///
    /// A blank line is not an error and prints nothing.
    pub fn evaluate_line(&self, line: &str, out: &mut impl Write, err: &mut impl Write) -> Result<()> {
        let (tokens, scan_errors) = Scanner::new(line).scan_tokens();
        report(&scan_errors, err)?;
        status(&scan_errors, &Diagnostics::<()>::new())?;

        if tokens.len() == 1 {
            return Ok(());
        }

        match Parser::new(tokens).parse_expression() {
            Ok(expr) => {
                writeln!(out, "{}", self.interpreter.evaluate(&expr))?;
                Ok(())
            }
            Err(e) => {
                writeln!(err, "{}", e)?;
                Err(RunError::ParseFailed(1))
            }
        }
    }
}

fn report<E: Display>(diagnostics: &Diagnostics<E>, err: &mut impl Write) -> io::Result<()> {
    for diagnostic in diagnostics {
        writeln!(err, "{}", diagnostic)?;
    }
    Ok(())
}

fn status<S, P>(scan_errors: &Diagnostics<S>, parse_errors: &Diagnostics<P>) -> Result<()> {
    if !scan_errors.is_empty() {
        Err(RunError::ScanFailed(scan_errors.len()))
    } else if !parse_errors.is_empty() {
        Err(RunError::ParseFailed(parse_errors.len()))
    } else {
        Ok(())
    }
}
