use std::iter::Peekable;

use crate::{
    ast::{Expr, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::{Pos, Token},
        parser::{
            core::{ParseResult, parse_expression},
            utils::{end_of_input, expect, parse_expression_list},
        },
    },
};

/// Parses a unary expression.
///
/// Supports the prefix operators `+`, `-`, and `not`, which are
/// right-recursive: `not -x` parses as `not (-x)`. If no prefix operator is
/// present, the function delegates to [`parse_primary`].
///
/// Grammar:
/// ```text
///     unary := ("+" | "-" | "not") unary
///            | primary
/// ```
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Pos)>
{
    let op = match tokens.peek() {
        Some((Token::Plus, _)) => Some(UnaryOperator::Plus),
        Some((Token::Minus, _)) => Some(UnaryOperator::Negate),
        Some((Token::Not, _)) => Some(UnaryOperator::Not),
        _ => None,
    };

    if let Some(op) = op {
        tokens.next();
        let operand = parse_unary(tokens)?;
        return Ok(Expr::UnaryOp { op,
                                  operand: Box::new(operand), });
    }

    parse_primary(tokens)
}

/// Parses a primary (atomic) expression.
///
/// Primary expressions form the base of the expression grammar:
/// - integer, real, string, and boolean literals
/// - identifiers, which become variable references, array accesses
///   (`name[index]`), or function calls (`name(args)`)
/// - parenthesized subexpressions
///
/// `readln` targets reuse this rule, which is why array accesses are handled
/// here rather than as a postfix of arbitrary expressions.
///
/// Grammar (simplified):
/// ```text
///     primary := literal
///              | identifier
///              | identifier "[" expression "]"
///              | identifier "(" arguments ")"
///              | "(" expression ")"
/// ```
///
/// # Errors
/// Returns `ParseError::ExpectedExpression` when the next token cannot start
/// an expression.
pub(crate) fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Pos)>
{
    match tokens.peek() {
        Some((Token::Integer(n), _)) => {
            let n = *n;
            tokens.next();
            Ok(Expr::Literal(n.into()))
        },
        Some((Token::Real(r), _)) => {
            let r = *r;
            tokens.next();
            Ok(Expr::Literal(r.into()))
        },
        Some((Token::Str(s), _)) => {
            let s = s.clone();
            tokens.next();
            Ok(Expr::Literal(s.as_str().into()))
        },
        Some((Token::True, _)) => {
            tokens.next();
            Ok(Expr::Literal(true.into()))
        },
        Some((Token::False, _)) => {
            tokens.next();
            Ok(Expr::Literal(false.into()))
        },
        Some((Token::Identifier(_), _)) => parse_identifier_expression(tokens),
        Some((Token::LParen, _)) => {
            tokens.next();
            let expr = parse_expression(tokens)?;
            expect(tokens, &Token::RParen, "')'")?;
            Ok(expr)
        },
        Some((token, pos)) => {
            Err(ParseError::ExpectedExpression { found:  format!("{token:?}"),
                                                 line:   pos.line,
                                                 column: pos.column, })
        },
        None => Err(end_of_input()),
    }
}

/// Parses an identifier-led primary: a variable reference, an array access,
/// or a function call, depending on the following token.
fn parse_identifier_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Pos)>
{
    let name = match tokens.next() {
        Some((Token::Identifier(name), _)) => name.clone(),
        _ => unreachable!("caller peeked an identifier"),
    };

    match tokens.peek() {
        Some((Token::LParen, _)) => {
            tokens.next();
            let arguments = parse_expression_list(tokens, &Token::RParen)?;
            Ok(Expr::FunctionCall { name, arguments })
        },
        Some((Token::LBracket, _)) => {
            tokens.next();
            let index = parse_expression(tokens)?;
            expect(tokens, &Token::RBracket, "']'")?;
            Ok(Expr::ArrayAccess { array: Box::new(Expr::Variable { name }),
                                   index: Box::new(index), })
        },
        _ => Ok(Expr::Variable { name }),
    }
}
