#[derive(Debug, PartialEq, Eq)]
/// Represents all errors that can abort evaluation.
///
/// Runtime errors unwind all the way to the host; the interpreted language
/// has no construct that can catch one.
pub enum RuntimeError {
    /// Tried to read or assign a variable that is not defined anywhere on
    /// the current environment chain.
    UndefinedVariable {
        /// The name of the variable.
        name: String,
    },
    /// Called a procedure that was never declared.
    UndefinedProcedure {
        /// The name of the procedure.
        name: String,
    },
    /// Called a function that was never declared.
    UndefinedFunction {
        /// The name of the function.
        name: String,
    },
    /// The wrong number of arguments was supplied to a call.
    ArityMismatch {
        /// The name of the callee.
        name:     String,
        /// The number of declared parameters.
        expected: usize,
        /// The number of arguments actually supplied.
        found:    usize,
    },
    /// Tried to index a value that is not an array.
    NotAnArray {
        /// The name of the offending variable.
        name: String,
    },
    /// An array index did not evaluate to an integer.
    IndexNotInteger,
    /// An array index fell outside `0..size`; never silently clamped.
    IndexOutOfBounds {
        /// The index that was requested.
        index: i64,
        /// The declared array size.
        size:  usize,
    },
    /// The right operand of `/`, `div`, or `mod` was zero.
    DivisionByZero,
    /// Integer arithmetic overflowed the 64-bit range.
    Overflow,
    /// A `for` loop bound did not evaluate to an integer.
    ForBoundNotInteger,
    /// A binary operator was applied to operands it does not support.
    UnsupportedBinary {
        /// A rendering of the operator, e.g. `+` or `div`.
        operator: String,
    },
    /// A unary operator was applied to an operand it does not support.
    UnsupportedUnary {
        /// A rendering of the operator, e.g. `-` or `not`.
        operator: String,
    },
    /// Reading from or writing to the host streams failed.
    Io {
        /// The host error description.
        message: String,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UndefinedVariable { name } => {
                write!(f, "Runtime error: undefined variable '{name}'.")
            },
            Self::UndefinedProcedure { name } => {
                write!(f, "Runtime error: undefined procedure '{name}'.")
            },
            Self::UndefinedFunction { name } => {
                write!(f, "Runtime error: undefined function '{name}'.")
            },
            Self::ArityMismatch { name,
                                  expected,
                                  found, } => write!(f,
                                                     "Runtime error: '{name}' takes {expected} argument(s) but {found} were given."),
            Self::NotAnArray { name } => {
                write!(f, "Runtime error: '{name}' is not an array.")
            },
            Self::IndexNotInteger => {
                write!(f, "Runtime error: array index must be an integer.")
            },
            Self::IndexOutOfBounds { index, size } => write!(f,
                                                             "Runtime error: array index {index} out of bounds for size {size}."),
            Self::DivisionByZero => write!(f, "Runtime error: division by zero."),
            Self::Overflow => write!(f,
                                     "Runtime error: integer overflow while computing the result."),
            Self::ForBoundNotInteger => {
                write!(f, "Runtime error: for-loop bounds must be integers.")
            },
            Self::UnsupportedBinary { operator } => write!(f,
                                                           "Runtime error: unsupported operands for operator '{operator}'."),
            Self::UnsupportedUnary { operator } => write!(f,
                                                          "Runtime error: unsupported operand for operator '{operator}'."),
            Self::Io { message } => {
                write!(f, "Runtime error: input/output failed: {message}.")
            },
        }
    }
}

impl std::error::Error for RuntimeError {}
