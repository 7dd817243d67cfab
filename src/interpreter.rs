/// The evaluator module executes AST nodes against the environment chain.
///
/// The evaluator walks the AST depth-first, executes statements in program
/// order, evaluates expressions with runtime type coercion, and manages the
/// scope stack and call frames. It is the core execution engine of the
/// interpreter.
///
/// # Responsibilities
/// - Installs top-level declarations and executes the program body.
/// - Handles assignment, control flow, calls, and the two I/O intrinsics.
/// - Reports runtime errors such as undefined names or division by zero.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer (scanner) reads the raw source text and produces a stream of
/// tokens, each corresponding to meaningful language elements such as
/// numbers, strings, identifiers, keywords, operators, and delimiters. This
/// is the first stage of interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with source positions.
/// - Handles numeric and string literals, comments, and newline tokens.
/// - Reports lexical errors for bytes that match no token.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer by recursive
/// descent and constructs one [`crate::ast::Program`] per compilation unit.
///
/// # Responsibilities
/// - Parses the program header, declaration sections, and the main body.
/// - Applies the statement grammar with contextual semicolons and resolves
///   dangling `else` greedily.
/// - Reports syntax errors with the offending token's position.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares the tagged union of values used during execution:
/// integers, reals, booleans, strings, fixed-size arrays, and the
/// `Undefined` sentinel, along with truthiness and per-type defaults.
pub mod value;
