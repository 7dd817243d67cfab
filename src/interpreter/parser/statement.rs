use std::iter::Peekable;

use crate::{
    ast::{Expr, Statement},
    interpreter::{
        lexer::{Pos, Token},
        parser::{
            core::{ParseResult, parse_expression},
            unary::parse_primary,
            utils::{expect, parse_expression_list, parse_identifier, skip_newlines},
        },
    },
};

/// Parses a block: a sequence of statements terminated by `end`.
///
/// Newline tokens between statements are skipped. An unparseable statement
/// start is skipped by advancing one token, a best-effort recovery rather
/// than an abort, which also makes stray semicolons after a nested
/// `begin..end` harmless. The terminating `end` is consumed.
///
/// # Returns
/// A [`Statement::Block`] holding the parsed statements in order.
pub fn parse_block<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Pos)>
{
    let mut statements = Vec::new();

    loop {
        match tokens.peek() {
            Some((Token::End | Token::Eof, _)) | None => break,
            Some((Token::NewLine, _)) => {
                tokens.next();
            },
            Some(_) => {
                if let Some(statement) = parse_statement(tokens, true)? {
                    statements.push(statement);
                } else {
                    // Recovery: skip a token that cannot start a statement.
                    tokens.next();
                }
            },
        }
    }

    expect(tokens, &Token::End, "'end'")?;
    Ok(Statement::Block(statements))
}

/// Parses a single statement, dispatching on its leading token.
///
/// `require_semicolon` implements the contextual terminator rule: a
/// statement that is the direct `then`/`else` child of an `if` and is not
/// itself a `begin..end` block is parsed without a trailing semicolon, so
/// `if c then s1 else s2;` works. Every other statement position passes
/// `true`.
///
/// # Returns
/// - `Ok(Some(statement))` when a statement was recognized and parsed,
/// - `Ok(None)` when the current token cannot start a statement (the caller
///   decides whether to recover or treat the position as empty).
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>,
                              require_semicolon: bool)
                              -> ParseResult<Option<Statement>>
    where I: Iterator<Item = &'a (Token, Pos)>
{
    skip_newlines(tokens);

    match tokens.peek() {
        Some((Token::Identifier(_), _)) => {
            parse_assignment_or_call(tokens, require_semicolon).map(Some)
        },
        Some((Token::If, _)) => parse_if_statement(tokens).map(Some),
        Some((Token::While, _)) => parse_while_statement(tokens).map(Some),
        Some((Token::For, _)) => parse_for_statement(tokens).map(Some),
        Some((Token::Readln, _)) => parse_readln_statement(tokens, require_semicolon).map(Some),
        Some((Token::Writeln, _)) => parse_writeln_statement(tokens, require_semicolon).map(Some),
        Some((Token::Return, _)) => parse_return_statement(tokens, require_semicolon).map(Some),
        Some((Token::Begin, _)) => {
            tokens.next();
            skip_newlines(tokens);
            parse_block(tokens).map(Some)
        },
        // `else` belongs to the innermost `if`; anything else is not a
        // statement start.
        _ => Ok(None),
    }
}

/// Parses a statement that begins with an identifier: an assignment, an
/// array-cell assignment, or a procedure call with or without arguments.
fn parse_assignment_or_call<'a, I>(tokens: &mut Peekable<I>,
                                   require_semicolon: bool)
                                   -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Pos)>
{
    let name = parse_identifier(tokens)?;

    let statement = match tokens.peek() {
        Some((Token::Assign, _)) => {
            tokens.next();
            let value = parse_expression(tokens)?;
            Statement::Assignment { target: Expr::Variable { name },
                                    value }
        },
        Some((Token::LBracket, _)) => {
            tokens.next();
            let index = parse_expression(tokens)?;
            expect(tokens, &Token::RBracket, "']'")?;
            expect(tokens, &Token::Assign, "':='")?;
            let value = parse_expression(tokens)?;
            Statement::Assignment { target: Expr::ArrayAccess { array:
                                                                    Box::new(Expr::Variable { name }),
                                                                index: Box::new(index), },
                                    value }
        },
        Some((Token::LParen, _)) => {
            tokens.next();
            let arguments = parse_expression_list(tokens, &Token::RParen)?;
            Statement::ProcedureCall { name, arguments }
        },
        _ => {
            Statement::ProcedureCall { name,
                                       arguments: Vec::new(), }
        },
    };

    if require_semicolon {
        expect(tokens, &Token::Semicolon, "';'")?;
    }
    Ok(statement)
}

/// Parses an `if` statement.
///
/// The nearest unmatched `else` attaches to the nearest unmatched `then`
/// (greedy dangling-else resolution). Direct `then`/`else` children that are
/// not `begin..end` blocks are parsed without a required trailing semicolon.
fn parse_if_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Pos)>
{
    tokens.next();
    let condition = parse_expression(tokens)?;
    expect(tokens, &Token::Then, "'then'")?;
    skip_newlines(tokens);

    let then_branch = parse_branch(tokens)?;
    skip_newlines(tokens);

    let else_branch = if let Some((Token::Else, _)) = tokens.peek() {
        tokens.next();
        skip_newlines(tokens);
        Some(Box::new(parse_branch(tokens)?))
    } else {
        None
    };

    Ok(Statement::If { condition,
                       then_branch: Box::new(then_branch),
                       else_branch })
}

/// Parses one `then`/`else` child: with the usual semicolon rule for a
/// `begin..end` block, without a required semicolon otherwise.
fn parse_branch<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Pos)>
{
    let is_block = matches!(tokens.peek(), Some((Token::Begin, _)));
    let branch = parse_statement(tokens, is_block)?;
    Ok(branch.unwrap_or(Statement::Block(Vec::new())))
}

/// Parses `while condition do body`.
fn parse_while_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Pos)>
{
    tokens.next();
    let condition = parse_expression(tokens)?;
    expect(tokens, &Token::Do, "'do'")?;
    skip_newlines(tokens);

    let body = parse_statement(tokens, true)?.unwrap_or(Statement::Block(Vec::new()));
    Ok(Statement::While { condition,
                          body: Box::new(body), })
}

/// Parses `for variable := start to end do body`.
fn parse_for_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Pos)>
{
    tokens.next();
    let variable = parse_identifier(tokens)?;
    expect(tokens, &Token::Assign, "':='")?;
    let start = parse_expression(tokens)?;
    expect(tokens, &Token::To, "'to'")?;
    let end = parse_expression(tokens)?;
    expect(tokens, &Token::Do, "'do'")?;
    skip_newlines(tokens);

    let body = parse_statement(tokens, true)?.unwrap_or(Statement::Block(Vec::new()));
    Ok(Statement::For { variable,
                        start,
                        end,
                        body: Box::new(body) })
}

/// Parses `readln(target, ...)`.
///
/// Targets are primary expressions: plain variables or array cells. A bare
/// `readln` with no parenthesized list has no targets and reads nothing.
fn parse_readln_statement<'a, I>(tokens: &mut Peekable<I>,
                                 require_semicolon: bool)
                                 -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Pos)>
{
    tokens.next();
    let mut targets = Vec::new();

    if let Some((Token::LParen, _)) = tokens.peek() {
        tokens.next();
        targets.push(parse_primary(tokens)?);
        while let Some((Token::Comma, _)) = tokens.peek() {
            tokens.next();
            targets.push(parse_primary(tokens)?);
        }
        expect(tokens, &Token::RParen, "')'")?;
    }

    if require_semicolon {
        expect(tokens, &Token::Semicolon, "';'")?;
    }
    Ok(Statement::Readln { targets })
}

/// Parses `writeln(expr, ...)`; with no arguments it emits a blank line.
fn parse_writeln_statement<'a, I>(tokens: &mut Peekable<I>,
                                  require_semicolon: bool)
                                  -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Pos)>
{
    tokens.next();
    let mut expressions = Vec::new();

    if let Some((Token::LParen, _)) = tokens.peek() {
        tokens.next();
        expressions = parse_expression_list(tokens, &Token::RParen)?;
    }

    if require_semicolon {
        expect(tokens, &Token::Semicolon, "';'")?;
    }
    Ok(Statement::Writeln { expressions })
}

/// Parses `return` with an optional value expression.
///
/// The value is present unless the next token ends the statement (`;`, a
/// newline, `end`, or `else`).
fn parse_return_statement<'a, I>(tokens: &mut Peekable<I>,
                                 require_semicolon: bool)
                                 -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Pos)>
{
    tokens.next();

    let value = match tokens.peek() {
        Some((Token::Semicolon | Token::NewLine | Token::End | Token::Else, _)) => None,
        _ => Some(parse_expression(tokens)?),
    };

    if require_semicolon {
        expect(tokens, &Token::Semicolon, "';'")?;
    }
    Ok(Statement::Return { value })
}
