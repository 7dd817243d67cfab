use std::iter::Peekable;

use crate::{
    ast::{Expr, TypeName},
    error::ParseError,
    interpreter::{
        lexer::{Pos, Token},
        parser::core::{ParseResult, parse_expression},
    },
};

/// Skips any run of newline tokens at the current position.
///
/// Newlines are tokens rather than whitespace, so every place in the grammar
/// that allows a line break must discard them explicitly.
pub(in crate::interpreter::parser) fn skip_newlines<'a, I>(tokens: &mut Peekable<I>)
    where I: Iterator<Item = &'a (Token, Pos)>
{
    while let Some((Token::NewLine, _)) = tokens.peek() {
        tokens.next();
    }
}

/// Consumes the next token, requiring it to equal `expected`.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the required token.
/// - `expected`: The token the grammar requires here.
/// - `description`: How to name the requirement in an error, e.g. `"';'"`.
///
/// # Returns
/// The position of the consumed token.
///
/// # Errors
/// Returns `ParseError::ExpectedToken` when something else is found, or
/// `ParseError::UnexpectedEndOfInput` when the stream is exhausted.
pub(in crate::interpreter::parser) fn expect<'a, I>(tokens: &mut Peekable<I>,
                                                    expected: &Token,
                                                    description: &str)
                                                    -> ParseResult<Pos>
    where I: Iterator<Item = &'a (Token, Pos)>
{
    match tokens.next() {
        Some((token, pos)) if token == expected => Ok(*pos),
        Some((token, pos)) => {
            Err(ParseError::ExpectedToken { expected: description.to_string(),
                                            found:    format!("{token:?}"),
                                            line:     pos.line,
                                            column:   pos.column, })
        },
        None => Err(end_of_input()),
    }
}

/// Parses a plain identifier and returns its name.
///
/// # Errors
/// Returns a `ParseError` if the next token is not an identifier or the
/// input ends unexpectedly.
pub(in crate::interpreter::parser) fn parse_identifier<'a, I>(tokens: &mut Peekable<I>)
                                                              -> ParseResult<String>
    where I: Iterator<Item = &'a (Token, Pos)>
{
    match tokens.next() {
        Some((Token::Identifier(name), _)) => Ok(name.clone()),
        Some((token, pos)) => {
            Err(ParseError::ExpectedToken { expected: "an identifier".to_string(),
                                            found:    format!("{token:?}"),
                                            line:     pos.line,
                                            column:   pos.column, })
        },
        None => Err(end_of_input()),
    }
}

/// Parses one of the four scalar type names.
///
/// Grammar: `type := "integer" | "real" | "boolean" | "string"`
///
/// # Errors
/// Returns `ParseError::ExpectedType` for anything else.
pub(in crate::interpreter::parser) fn parse_type<'a, I>(tokens: &mut Peekable<I>)
                                                        -> ParseResult<TypeName>
    where I: Iterator<Item = &'a (Token, Pos)>
{
    match tokens.next() {
        Some((Token::IntegerType, _)) => Ok(TypeName::Integer),
        Some((Token::RealType, _)) => Ok(TypeName::Real),
        Some((Token::BooleanType, _)) => Ok(TypeName::Boolean),
        Some((Token::StringType, _)) => Ok(TypeName::Str),
        Some((token, pos)) => {
            Err(ParseError::ExpectedType { found:  format!("{token:?}"),
                                           line:   pos.line,
                                           column: pos.column, })
        },
        None => Err(end_of_input()),
    }
}

/// Parses a comma-separated list of expressions terminated by a closing
/// token.
///
/// Shared by call-argument lists and `writeln` argument lists. An
/// immediately encountered closing token produces an empty list. The closing
/// token is consumed.
///
/// Grammar (simplified): `list := (expression ("," expression)*)?`
///
/// # Errors
/// Returns a `ParseError` if an element fails to parse, an unexpected token
/// appears between elements, or the stream ends before the closing token.
pub(in crate::interpreter::parser) fn parse_expression_list<'a, I>(tokens: &mut Peekable<I>,
                                                                   closing: &Token)
                                                                   -> ParseResult<Vec<Expr>>
    where I: Iterator<Item = &'a (Token, Pos)>
{
    let mut items = Vec::new();
    if let Some((token, _)) = tokens.peek()
       && *token == *closing
    {
        tokens.next();
        return Ok(items);
    }

    loop {
        items.push(parse_expression(tokens)?);
        match tokens.peek() {
            Some((Token::Comma, _)) => {
                tokens.next();
            },
            Some((token, _)) if *token == *closing => {
                tokens.next();
                break;
            },
            Some((token, pos)) => {
                return Err(ParseError::ExpectedToken { expected: format!("',' or {closing:?}"),
                                                       found:    format!("{token:?}"),
                                                       line:     pos.line,
                                                       column:   pos.column, });
            },
            None => return Err(end_of_input()),
        }
    }
    Ok(items)
}

/// The fallback error for an exhausted token stream.
///
/// The stream always carries an explicit end-of-input token, so this is only
/// reachable if a caller advances past it.
pub(in crate::interpreter::parser) const fn end_of_input() -> ParseError {
    ParseError::UnexpectedEndOfInput { line: 0, column: 0 }
}
