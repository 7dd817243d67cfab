/// Lexical errors.
///
/// Defines the error raised when the scanner meets a character that starts no
/// token. The error carries the offending character and its exact source
/// position.
pub mod lex_error;
/// Parsing errors.
///
/// Defines all error types that can occur while turning the token stream into
/// an AST: unexpected tokens, missing required tokens, missing expressions or
/// type names, and premature end of input. Every variant carries the source
/// position of the offending token.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation: undefined
/// names, arity mismatches, array indexing violations, division by zero,
/// unsupported operand combinations, and host I/O failures.
pub mod runtime_error;

pub use lex_error::LexError;
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// Any failure the pipeline can hand back to the host.
///
/// The three kinds stay distinguishable so the host can render lexical and
/// syntax diagnostics (which carry positions) differently from execution
/// errors (which carry only a message).
#[derive(Debug)]
pub enum Error {
    /// The scanner rejected the source text.
    Lex(LexError),
    /// The parser rejected the token stream.
    Syntax(ParseError),
    /// Evaluation aborted.
    Runtime(RuntimeError),
}

impl From<LexError> for Error {
    fn from(e: LexError) -> Self {
        Self::Lex(e)
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Self::Syntax(e)
    }
}

impl From<RuntimeError> for Error {
    fn from(e: RuntimeError) -> Self {
        Self::Runtime(e)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lex(e) => write!(f, "{e}"),
            Self::Syntax(e) => write!(f, "{e}"),
            Self::Runtime(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Lex(e) => Some(e),
            Self::Syntax(e) => Some(e),
            Self::Runtime(e) => Some(e),
        }
    }
}
