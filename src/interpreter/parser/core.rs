use std::iter::Peekable;

use crate::{
    ast::{Expr, Program},
    error::ParseError,
    interpreter::{
        lexer::{Pos, Token},
        parser::{binary::parse_or, program::parse_program},
    },
};

/// Result type used by the parser.
///
/// All parsing functions return either a parsed node of type `T` or a
/// [`ParseError`] describing the failure.
pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a whole token sequence into a [`Program`].
///
/// This is the entry point for the parsing phase; the token sequence is the
/// output of [`crate::interpreter::lexer::tokenize`].
///
/// # Parameters
/// - `tokens`: The token sequence, ending in an end-of-input token.
///
/// # Returns
/// The parsed program root.
///
/// # Errors
/// Returns a [`ParseError`] with the offending token's position when the
/// sequence does not form a well-formed program.
pub fn parse(tokens: &[(Token, Pos)]) -> ParseResult<Program> {
    let mut iter = tokens.iter().peekable();
    parse_program(&mut iter)
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the
/// lowest-precedence level, logical `or`, and recursively descends through
/// the precedence hierarchy.
///
/// Grammar: `expression := or_expression`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, Pos)` pairs.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Pos)>
{
    parse_or(tokens)
}
