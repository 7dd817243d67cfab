#[derive(Debug, PartialEq, Eq)]
/// Represents all errors that can occur while parsing the token stream.
pub enum ParseError {
    /// Found a token that does not fit the grammar at this point.
    UnexpectedToken {
        /// A rendering of the token encountered.
        found:  String,
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// A specific token was required but something else was found.
    ExpectedToken {
        /// What the grammar required, e.g. `';'` or `'then'`.
        expected: String,
        /// A rendering of the token actually found.
        found:    String,
        /// The source line where the error occurred.
        line:     usize,
        /// The source column where the error occurred.
        column:   usize,
    },
    /// An expression was required but the next token cannot start one.
    ExpectedExpression {
        /// A rendering of the token actually found.
        found:  String,
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// A type name (`integer`, `real`, `boolean`, `string`) was required.
    ExpectedType {
        /// A rendering of the token actually found.
        found:  String,
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// Reached the end of input in the middle of a construct.
    UnexpectedEndOfInput {
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedToken { found, line, column } => {
                write!(f,
                       "Syntax error on line {line}, column {column}: unexpected {found}.")
            },

            Self::ExpectedToken { expected,
                                  found,
                                  line,
                                  column, } => {
                write!(f,
                       "Syntax error on line {line}, column {column}: expected {expected}, found {found}.")
            },

            Self::ExpectedExpression { found, line, column } => {
                write!(f,
                       "Syntax error on line {line}, column {column}: expected an expression, found {found}.")
            },

            Self::ExpectedType { found, line, column } => {
                write!(f,
                       "Syntax error on line {line}, column {column}: expected a type name, found {found}.")
            },

            Self::UnexpectedEndOfInput { line, column } => {
                write!(f,
                       "Syntax error on line {line}, column {column}: unexpected end of input.")
            },
        }
    }
}

impl std::error::Error for ParseError {}
