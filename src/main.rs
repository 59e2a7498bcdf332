use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use sortle::interpreter::Interpreter;
use sortle::lexer::Token;
use sortle::parser::{ParseState, parse};

#[derive(Parser)]
#[command(name = "sortle")]
#[command(about = "Interpreter for the Sortle esoteric programming language")]
struct Cli {
    /// Path to the Sortle program to run
    program: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(name) => {
            println!("{name}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<String> {
    let source = fs::read_to_string(&cli.program)
        .with_context(|| format!("cannot read {}", cli.program.display()))?;

    let tokens = Token::lex(&source)?;
    let mut state = ParseState::new(tokens);

    let (expressions, errors) = parse(&mut state);
    if !errors.is_empty() {
        for error in &errors {
            eprintln!("{error}");
        }
        anyhow::bail!("could not parse {}", cli.program.display());
    }

    let mut interpreter = Interpreter::new(expressions)?;
    Ok(interpreter.run()?)
}
