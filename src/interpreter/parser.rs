/// Precedence ladder for binary expressions.
///
/// One function per precedence level, from `or` at the bottom to the
/// multiplicative operators at the top, all left-associative.
pub mod binary;

/// Entry points and shared parser plumbing.
///
/// Declares the parse result type and the whole-stream and expression entry
/// points used by the rest of the crate.
pub mod core;

/// Program header and declaration sections.
///
/// Parses `program name;`, `var` sections (plain and array declarations),
/// and procedure/function declarations with their parameter lists and local
/// sections.
pub mod program;

/// Statement grammar.
///
/// Parses blocks and every statement form, including the contextual
/// semicolon rule for direct `then`/`else` children and the one-token-skip
/// recovery for unrecognized statement starts.
pub mod statement;

/// Unary and primary expressions.
///
/// Handles prefix `+`/`-`/`not`, literals, identifiers (variables, array
/// accesses, calls), and parenthesized subexpressions.
pub mod unary;

/// Small shared helpers.
///
/// Token expectation, newline skipping, identifier and type-name parsing,
/// and comma-separated expression lists.
pub mod utils;
