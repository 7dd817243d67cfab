/// Binary operator evaluation.
///
/// Implements evaluation for all binary operations: arithmetic with numeric
/// promotion, the division family with its zero checks, comparisons, string
/// concatenation, and the non-short-circuiting logical operators.
pub mod binary;

/// Core evaluation state and expression dispatch.
///
/// Contains the `Interpreter` itself, the control-flow signal threaded
/// through statement execution, declaration processing, and the expression
/// evaluator.
pub mod core;

/// Procedure and function call machinery.
///
/// Resolves callees, checks arity, evaluates arguments by value, runs bodies
/// in fresh frames rooted at the global scope, and consumes the `return`
/// signal at the call boundary.
pub mod function;

/// The two I/O intrinsics.
///
/// Implements `writeln` line assembly and `readln` input coercion against
/// the host-supplied streams.
pub mod io;

/// Scope stack and call-frame management.
///
/// Name definition, lookup, and assignment over a stack of scopes with
/// frame barriers that root every call frame at the global scope.
pub mod scope;

/// Statement execution.
///
/// Implements assignment, control flow, loops, and the propagation of the
/// `return` signal through blocks.
pub mod statement;

/// Unary operator evaluation.
///
/// Handles numeric identity and negation plus logical `not`.
pub mod unary;
