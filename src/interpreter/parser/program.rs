use std::iter::Peekable;

use crate::{
    ast::{
        ArrayDecl, Declaration, FunctionDecl, Parameter, ProcedureDecl, Program, VariableDecl,
    },
    error::ParseError,
    interpreter::{
        lexer::{Pos, Token},
        parser::{
            core::{ParseResult, parse_expression},
            statement::parse_block,
            utils::{expect, parse_identifier, parse_type, skip_newlines},
        },
    },
};

/// Parses a whole program.
///
/// Grammar:
/// ```text
///     program := "program" identifier ";" declaration* "begin" block "."
/// ```
/// Declarations interleave `var` sections, procedure declarations, and
/// function declarations in any order; an unrecognized token between
/// declarations is skipped.
pub fn parse_program<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Program>
    where I: Iterator<Item = &'a (Token, Pos)>
{
    skip_newlines(tokens);
    expect(tokens, &Token::Program, "'program'")?;
    let name = parse_identifier(tokens)?;
    expect(tokens, &Token::Semicolon, "';'")?;
    skip_newlines(tokens);

    let mut declarations = Vec::new();
    loop {
        match tokens.peek() {
            Some((Token::Begin | Token::Eof, _)) | None => break,
            Some((Token::Var, _)) => declarations.extend(parse_var_declarations(tokens)?),
            Some((Token::Procedure, _)) => {
                declarations.push(Declaration::Procedure(parse_procedure_declaration(tokens)?));
            },
            Some((Token::Function, _)) => {
                declarations.push(Declaration::Function(parse_function_declaration(tokens)?));
            },
            Some(_) => {
                tokens.next();
            },
        }
        skip_newlines(tokens);
    }

    expect(tokens, &Token::Begin, "'begin'")?;
    skip_newlines(tokens);
    let body = parse_block(tokens)?;
    expect(tokens, &Token::Dot, "'.'")?;

    Ok(Program { name,
                 declarations,
                 body })
}

/// Parses one `var` section into its individual declarations.
///
/// Each line groups one or more comma-separated names sharing a type:
///
/// ```text
///     var
///         a, b: integer;
///         xs:   array[10] of real;
///         c:    string = 'seed';
/// ```
/// An `array[SIZE] of type` line yields one array declaration per name; a
/// plain type may carry an optional `= expression` initializer shared by the
/// whole group.
pub fn parse_var_declarations<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Vec<Declaration>>
    where I: Iterator<Item = &'a (Token, Pos)>
{
    let mut declarations = Vec::new();
    expect(tokens, &Token::Var, "'var'")?;
    skip_newlines(tokens);

    while let Some((Token::Identifier(_), _)) = tokens.peek() {
        let mut names = vec![parse_identifier(tokens)?];
        while let Some((Token::Comma, _)) = tokens.peek() {
            tokens.next();
            names.push(parse_identifier(tokens)?);
        }

        expect(tokens, &Token::Colon, "':'")?;

        if let Some((Token::Array, _)) = tokens.peek() {
            tokens.next();
            expect(tokens, &Token::LBracket, "'['")?;
            let size = parse_array_size(tokens)?;
            expect(tokens, &Token::RBracket, "']'")?;
            expect(tokens, &Token::Of, "'of'")?;
            let element_type = parse_type(tokens)?;

            for name in names {
                declarations.push(Declaration::Array(ArrayDecl { name,
                                                                 element_type,
                                                                 size }));
            }
        } else {
            let ty = parse_type(tokens)?;
            let initializer = if let Some((Token::Equal, _)) = tokens.peek() {
                tokens.next();
                Some(parse_expression(tokens)?)
            } else {
                None
            };

            for name in names {
                declarations.push(Declaration::Variable(VariableDecl { name,
                                                                       ty,
                                                                       initializer:
                                                                           initializer.clone(), }));
            }
        }

        expect(tokens, &Token::Semicolon, "';'")?;
        skip_newlines(tokens);
    }

    Ok(declarations)
}

/// Parses the integer literal giving an array's fixed size.
fn parse_array_size<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<usize>
    where I: Iterator<Item = &'a (Token, Pos)>
{
    match tokens.next() {
        Some((Token::Integer(n), pos)) => {
            usize::try_from(*n).map_err(|_| {
                                   ParseError::UnexpectedToken { found:  format!("Integer({n})"),
                                                                 line:   pos.line,
                                                                 column: pos.column, }
                               })
        },
        Some((token, pos)) => {
            Err(ParseError::ExpectedToken { expected: "an integer array size".to_string(),
                                            found:    format!("{token:?}"),
                                            line:     pos.line,
                                            column:   pos.column, })
        },
        None => {
            Err(ParseError::UnexpectedEndOfInput { line:   0,
                                                   column: 0, })
        },
    }
}

/// Parses a procedure declaration.
///
/// Grammar:
/// ```text
///     procedure := "procedure" identifier parameters? ";"
///                  var_section* "begin" block
/// ```
/// Local `var` sections are collected onto the declaration and installed in
/// the call frame at invocation time.
pub fn parse_procedure_declaration<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<ProcedureDecl>
    where I: Iterator<Item = &'a (Token, Pos)>
{
    expect(tokens, &Token::Procedure, "'procedure'")?;
    let name = parse_identifier(tokens)?;

    let parameters = if let Some((Token::LParen, _)) = tokens.peek() {
        parse_parameters(tokens)?
    } else {
        Vec::new()
    };

    expect(tokens, &Token::Semicolon, "';'")?;
    skip_newlines(tokens);

    let locals = parse_local_declarations(tokens)?;

    expect(tokens, &Token::Begin, "'begin'")?;
    skip_newlines(tokens);
    let body = parse_block(tokens)?;

    Ok(ProcedureDecl { name,
                       parameters,
                       locals,
                       body })
}

/// Parses a function declaration: a procedure header plus a mandatory
/// return type before the body.
pub fn parse_function_declaration<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<FunctionDecl>
    where I: Iterator<Item = &'a (Token, Pos)>
{
    expect(tokens, &Token::Function, "'function'")?;
    let name = parse_identifier(tokens)?;

    let parameters = if let Some((Token::LParen, _)) = tokens.peek() {
        parse_parameters(tokens)?
    } else {
        Vec::new()
    };

    expect(tokens, &Token::Colon, "':'")?;
    let return_type = parse_type(tokens)?;
    expect(tokens, &Token::Semicolon, "';'")?;
    skip_newlines(tokens);

    let locals = parse_local_declarations(tokens)?;

    expect(tokens, &Token::Begin, "'begin'")?;
    skip_newlines(tokens);
    let body = parse_block(tokens)?;

    Ok(FunctionDecl { name,
                      parameters,
                      locals,
                      return_type,
                      body })
}

/// Parses any number of local `var` sections before a callable's body.
fn parse_local_declarations<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Vec<Declaration>>
    where I: Iterator<Item = &'a (Token, Pos)>
{
    let mut locals = Vec::new();
    while let Some((Token::Var, _)) = tokens.peek() {
        locals.extend(parse_var_declarations(tokens)?);
        skip_newlines(tokens);
    }
    Ok(locals)
}

/// Parses a parenthesized parameter list.
///
/// Groups are comma-separated names sharing a type, with groups separated by
/// semicolons, e.g. `(a, b: integer; s: string)`. Each listed name becomes
/// one positional parameter.
fn parse_parameters<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Vec<Parameter>>
    where I: Iterator<Item = &'a (Token, Pos)>
{
    let mut parameters = Vec::new();
    expect(tokens, &Token::LParen, "'('")?;

    if let Some((Token::RParen, _)) = tokens.peek() {
        tokens.next();
        return Ok(parameters);
    }

    loop {
        let mut names = vec![parse_identifier(tokens)?];
        while let Some((Token::Comma, _)) = tokens.peek() {
            tokens.next();
            names.push(parse_identifier(tokens)?);
        }

        expect(tokens, &Token::Colon, "':'")?;
        let ty = parse_type(tokens)?;

        for name in names {
            parameters.push(Parameter { name, ty });
        }

        if let Some((Token::Semicolon, _)) = tokens.peek() {
            tokens.next();
        } else {
            break;
        }
    }

    expect(tokens, &Token::RParen, "')'")?;
    Ok(parameters)
}
