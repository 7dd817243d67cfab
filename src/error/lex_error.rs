#[derive(Debug, PartialEq, Eq)]
/// Represents a failure of the scanner.
pub enum LexError {
    /// Met a character that cannot begin any token.
    UnexpectedCharacter {
        /// The rejected character.
        character: char,
        /// The source line where the error occurred.
        line:      usize,
        /// The source column where the error occurred.
        column:    usize,
    },
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedCharacter { character,
                                        line,
                                        column, } => {
                write!(f,
                       "Lexical error on line {line}, column {column}: unexpected character '{character}'.")
            },
        }
    }
}

impl std::error::Error for LexError {}
