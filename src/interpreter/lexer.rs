use logos::Logos;

use crate::error::LexError;

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the scanner.
/// This enum defines all recognized tokens in the language; keywords are
/// matched case-insensitively.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
pub enum Token {
    /// Real literal tokens, such as `3.14` or `2.`.
    #[regex(r"[0-9]+\.[0-9]*", parse_real)]
    Real(f64),
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+", parse_integer)]
    Integer(i64),
    /// Single- or double-quoted string literal tokens with escape sequences
    /// already decoded. An unterminated literal absorbs the rest of the
    /// input.
    #[token("\"", |lex| scan_string(lex, '"'))]
    #[token("'", |lex| scan_string(lex, '\''))]
    Str(String),
    /// `program`
    #[token("program", ignore(ascii_case))]
    Program,
    /// `begin`
    #[token("begin", ignore(ascii_case))]
    Begin,
    /// `end`
    #[token("end", ignore(ascii_case))]
    End,
    /// `var`
    #[token("var", ignore(ascii_case))]
    Var,
    /// `if`
    #[token("if", ignore(ascii_case))]
    If,
    /// `then`
    #[token("then", ignore(ascii_case))]
    Then,
    /// `else`
    #[token("else", ignore(ascii_case))]
    Else,
    /// `while`
    #[token("while", ignore(ascii_case))]
    While,
    /// `do`
    #[token("do", ignore(ascii_case))]
    Do,
    /// `for`
    #[token("for", ignore(ascii_case))]
    For,
    /// `to`
    #[token("to", ignore(ascii_case))]
    To,
    /// `procedure`
    #[token("procedure", ignore(ascii_case))]
    Procedure,
    /// `function`
    #[token("function", ignore(ascii_case))]
    Function,
    /// `array`
    #[token("array", ignore(ascii_case))]
    Array,
    /// `of`
    #[token("of", ignore(ascii_case))]
    Of,
    /// `true`
    #[token("true", ignore(ascii_case))]
    True,
    /// `false`
    #[token("false", ignore(ascii_case))]
    False,
    /// `and`
    #[token("and", ignore(ascii_case))]
    And,
    /// `or`
    #[token("or", ignore(ascii_case))]
    Or,
    /// `not`
    #[token("not", ignore(ascii_case))]
    Not,
    /// `div`
    #[token("div", ignore(ascii_case))]
    Div,
    /// `mod`
    #[token("mod", ignore(ascii_case))]
    Mod,
    /// `readln`
    #[token("readln", ignore(ascii_case))]
    Readln,
    /// `writeln`
    #[token("writeln", ignore(ascii_case))]
    Writeln,
    /// `return`
    #[token("return", ignore(ascii_case))]
    Return,
    /// `integer`
    #[token("integer", ignore(ascii_case))]
    IntegerType,
    /// `real`
    #[token("real", ignore(ascii_case))]
    RealType,
    /// `boolean`
    #[token("boolean", ignore(ascii_case))]
    BooleanType,
    /// `string`
    #[token("string", ignore(ascii_case))]
    StringType,
    /// Identifier tokens; variable, procedure, or function names such as `x`
    /// or `total`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `// Comments.`
    #[regex(r"//[^\n\r]*", logos::skip)]
    LineComment,
    /// `{ Comments, possibly spanning lines. }`
    #[token("{", skip_brace_comment)]
    BraceComment,
    /// `:=`
    #[token(":=")]
    Assign,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `=`
    #[token("=")]
    Equal,
    /// `<>`
    #[token("<>")]
    NotEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `,`
    #[token(",")]
    Comma,
    /// `.`
    #[token(".")]
    Dot,
    /// `:`
    #[token(":")]
    Colon,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// A literal line break. Newlines are visible to the parser; they are not
    /// plain whitespace.
    #[token("\n")]
    NewLine,
    /// Spaces, tabs, carriage returns, and feeds.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
    /// Explicit end-of-input marker appended by [`tokenize`]. The NUL pattern
    /// never occurs in source text.
    #[token("\0")]
    Eof,
}

/// A source position carried by every token: 1-based line and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pos {
    /// The 1-based source line.
    pub line:   usize,
    /// The 1-based source column.
    pub column: usize,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number and the byte offset where that line starts,
/// so each token's column can be derived from its span.
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line:       usize,
    /// Byte offset of the first character of the current line.
    pub line_start: usize,
}

impl Default for LexerExtras {
    fn default() -> Self {
        Self { line:       1,
               line_start: 0, }
    }
}

/// Parses a floating-point literal from the current token slice.
fn parse_real(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Parses an integer literal from the current token slice.
fn parse_integer(lex: &logos::Lexer<Token>) -> Option<i64> {
    lex.slice().parse().ok()
}

/// Consumes a quoted string literal starting just after its opening quote.
///
/// Escape sequences `\n`, `\t`, `\r`, and `\\` are decoded; an escaped quote
/// character produces the quote itself; any other escaped character is kept
/// verbatim. The literal ends at the first unescaped matching quote. If the
/// input ends first, everything up to the end is taken as the string value.
fn scan_string(lex: &mut logos::Lexer<Token>, quote: char) -> String {
    let remainder = lex.remainder();
    let mut value = String::new();
    // Unterminated literals absorb the rest of the input.
    let mut consumed = remainder.len();

    let mut chars = remainder.char_indices();
    while let Some((offset, c)) = chars.next() {
        if c == quote {
            consumed = offset + c.len_utf8();
            break;
        }
        if c == '\\' {
            match chars.next() {
                Some((_, 'n')) => value.push('\n'),
                Some((_, 't')) => value.push('\t'),
                Some((_, 'r')) => value.push('\r'),
                Some((_, '\\')) => value.push('\\'),
                Some((_, escaped)) => value.push(escaped),
                None => {},
            }
        } else {
            value.push(c);
        }
    }

    lex.bump(consumed);
    value
}

/// Skips a `{ ... }` comment, keeping line accounting correct when the
/// comment spans lines. An unterminated comment absorbs the rest of the
/// input without producing an error.
fn skip_brace_comment(lex: &mut logos::Lexer<Token>) -> logos::Skip {
    let remainder = lex.remainder();
    let consumed = remainder.find('}').map_or(remainder.len(), |i| i + 1);

    let body = &remainder[..consumed];
    if let Some(last_break) = body.rfind('\n') {
        lex.extras.line += body.matches('\n').count();
        lex.extras.line_start = lex.span().end + last_break + 1;
    }

    lex.bump(consumed);
    logos::Skip
}

/// Scans the whole source text into a token sequence.
///
/// Whitespace and both comment forms are skipped; literal line breaks are
/// emitted as [`Token::NewLine`]; the sequence always ends with one
/// [`Token::Eof`]. Every token is paired with the position of its first
/// character.
///
/// # Parameters
/// - `source`: The raw source text of one compilation unit.
///
/// # Returns
/// The ordered token sequence, or a [`LexError`] carrying the first byte
/// that matches no token along with its position.
///
/// # Example
/// ```
/// use pascaline::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("x := 1;").unwrap();
///
/// assert_eq!(tokens[0].0, Token::Identifier("x".to_string()));
/// assert_eq!(tokens[1].0, Token::Assign);
/// assert_eq!(tokens[2].0, Token::Integer(1));
/// assert_eq!(tokens.last().unwrap().0, Token::Eof);
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, Pos)>, LexError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let pos = Pos { line:   lexer.extras.line,
                        column: span.start - lexer.extras.line_start + 1, };

        match result {
            Ok(token) => {
                // String literals and newline tokens may contain line breaks;
                // account for them after the position is taken.
                let slice = lexer.slice();
                if let Some(last_break) = slice.rfind('\n') {
                    lexer.extras.line += slice.matches('\n').count();
                    lexer.extras.line_start = span.start + last_break + 1;
                }
                tokens.push((token, pos));
            },
            Err(()) => {
                return Err(LexError::UnexpectedCharacter { character: lexer.slice()
                                                                           .chars()
                                                                           .next()
                                                                           .unwrap_or('\u{fffd}'),
                                                           line:      pos.line,
                                                           column:    pos.column, });
            },
        }
    }

    tokens.push((Token::Eof,
                 Pos { line:   lexer.extras.line,
                       column: source.len() - lexer.extras.line_start + 1, }));
    Ok(tokens)
}
