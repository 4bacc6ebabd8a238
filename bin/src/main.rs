use std::{
    io::{stderr, stdin, stdout, Write},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::Context;
use clap::Parser;

use lox::{Lox, Mode, RunError};

#[derive(clap::Parser)]
#[command(about = "Scan, parse and evaluate Lox expressions")]
struct Args {
    /// Without a command, expressions are read from an interactive prompt.
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Print one line per token
    Tokenize { file: PathBuf },
    /// Print the syntax tree of each expression
    Parse { file: PathBuf },
    /// Print the value of each expression
    Evaluate { file: PathBuf },
}

impl Command {
    fn into_parts(self) -> (Mode, PathBuf) {
        match self {
            Command::Tokenize { file } => (Mode::Tokenize, file),
            Command::Parse { file } => (Mode::Parse, file),
            Command::Evaluate { file } => (Mode::Evaluate, file),
        }
    }
}

fn run_file(mode: Mode, path: PathBuf, lox: &Lox) -> anyhow::Result<ExitCode> {
    let source =
        std::fs::read(&path).with_context(|| format!("Error reading file: {}", path.display()))?;

    match lox.run_bytes(mode, &source, &mut stdout().lock(), &mut stderr().lock()) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(RunError::Io(e)) => Err(e.into()),
        Err(e) => {
            log::debug!("{}", e);
            Ok(ExitCode::from(e.exit_code()))
        }
    }
}

fn run_prompt(lox: &Lox) -> anyhow::Result<ExitCode> {
    loop {
        print!("> ");
        stdout().flush()?;
        let mut line = String::new();
        if stdin().read_line(&mut line)? == 0 {
            return Ok(ExitCode::SUCCESS);
        }
        match lox.evaluate_line(&line, &mut stdout(), &mut stderr()) {
            Ok(()) | Err(RunError::ScanFailed(_) | RunError::ParseFailed(_)) => (),
            Err(RunError::Io(e)) => return Err(e.into()),
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    env_logger::init();
    let args = Args::parse();

    let lox = Lox::new();

    match args.command.map(Command::into_parts) {
        Some((mode, file)) => run_file(mode, file, &lox),
        None => run_prompt(&lox),
    }
}
