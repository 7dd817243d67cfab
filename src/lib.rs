//! # pascaline
//!
//! pascaline is a tree-walking interpreter for a small Pascal-like
//! procedural language, written in Rust. It scans source text into tokens,
//! parses them by recursive descent into an abstract syntax tree, and
//! executes the tree against lexically-scoped environments, with integers,
//! reals, booleans, strings, and fixed-size arrays as its value types.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

use std::io::{BufRead, Write};

use crate::interpreter::{evaluator::core::Interpreter, lexer::tokenize, parser::core::parse};

/// Defines the structure of parsed code.
///
/// This module declares the node types that represent the syntactic
/// structure of a program as a tree: the program root, declarations,
/// statements, and expressions. The AST is built once by the parser and
/// traversed read-only by the evaluator.
///
/// # Responsibilities
/// - Defines declaration, statement, and expression types for all language
///   constructs.
/// - Defines the operator enums and scalar type names with their textual
///   forms.
pub mod ast;
/// Provides unified error types for scanning, parsing, and evaluation.
///
/// This module defines all errors that the pipeline can hand back to a
/// host, in three distinguishable kinds: lexical and syntax errors carry a
/// source position; runtime errors carry a message.
///
/// # Responsibilities
/// - Defines error enums for every failure mode of each phase.
/// - Implements rendering for host-side diagnostics.
/// - Wraps the three kinds in one [`error::Error`] for the pipeline entry
///   points.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together the lexer, parser, evaluator, and runtime
/// value types to provide a complete source-to-execution pipeline.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, values.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General utilities shared across phases.
///
/// # Responsibilities
/// - Numeric conversions between `i64` and `f64` used by promotion and the
///   integer division family.
pub mod util;

/// Runs a source program against host-supplied input and output streams.
///
/// The pipeline is: scan the source into tokens, parse them into a program,
/// then execute the program. Output is written to `output` incrementally,
/// one line per `writeln`; each `readln` target consumes one line from
/// `input`, and end of input ends the read early.
///
/// # Errors
/// Returns the first failure of any phase. Lexical and syntax errors abort
/// before execution starts and carry a source position; runtime errors
/// abort execution at the failing statement.
///
/// # Examples
/// ```
/// use pascaline::run_program;
///
/// let source = "program hello;\nbegin\n    writeln('Hello World');\nend.";
/// let mut output = Vec::new();
///
/// run_program(source, std::io::empty(), &mut output).unwrap();
/// assert_eq!(String::from_utf8(output).unwrap(), "Hello World\n");
/// ```
pub fn run_program(source: &str,
                   input: impl BufRead,
                   output: impl Write)
                   -> Result<(), error::Error> {
    let tokens = tokenize(source)?;
    let program = parse(&tokens)?;

    let mut interpreter = Interpreter::new(input, output);
    interpreter.run(&program)?;
    Ok(())
}

/// Runs a source program over a fixed input text and returns the captured
/// output.
///
/// Convenience wrapper over [`run_program`] for hosts (and tests) that want
/// the output batched rather than streamed.
///
/// # Errors
/// Same as [`run_program`].
///
/// # Examples
/// ```
/// use pascaline::run_with_input;
///
/// let source = "program echo;\nvar x: integer;\nbegin\n    readln(x);\n    writeln(x * 2);\nend.";
/// let output = run_with_input(source, "21\n").unwrap();
/// assert_eq!(output, "42\n");
/// ```
pub fn run_with_input(source: &str, input: &str) -> Result<String, error::Error> {
    let mut output = Vec::new();
    run_program(source, input.as_bytes(), &mut output)?;
    Ok(String::from_utf8_lossy(&output).into_owned())
}
