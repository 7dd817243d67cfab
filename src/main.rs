use std::{fs, io, process};

use clap::Parser;
use pascaline::{interpreter::lexer::tokenize, run_program};

/// pascaline interprets a small Pascal-like procedural language.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Print the token stream before running the program.
    #[arg(short, long)]
    tokens: bool,

    /// Path to the source file to run.
    path: String,
}

fn main() {
    let args = Args::parse();

    let source = fs::read_to_string(&args.path).unwrap_or_else(|_| {
        eprintln!("Failed to read the source file '{}'. Perhaps this file does not exist?",
                  &args.path);
        process::exit(1);
    });

    if args.tokens {
        match tokenize(&source) {
            Ok(tokens) => {
                for (token, pos) in &tokens {
                    println!("  {token:?} (line {}, column {})", pos.line, pos.column);
                }
            },
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            },
        }
    }

    let stdin = io::stdin();
    if let Err(e) = run_program(&source, stdin.lock(), io::stdout()) {
        eprintln!("{e}");
        process::exit(1);
    }
}
