use crate::ast::{LiteralValue, TypeName};

/// Represents a runtime value in the interpreter.
///
/// This enum models every type that can appear in expressions, assignments,
/// `readln` targets, and function returns. Arrays are homogeneous only by
/// convention of their declared element type; the cells themselves hold any
/// `Value`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A 64-bit signed integer value.
    Integer(i64),
    /// A double-precision floating-point value.
    Real(f64),
    /// A boolean value, printed as `True` or `False`.
    Bool(bool),
    /// A string value.
    Str(String),
    /// A fixed-length array of values, zero-indexed.
    Array(Vec<Self>),
    /// The sentinel produced by a bare `return` inside a function. It is the
    /// only value that is false under truthiness without being an explicit
    /// zero, empty string, or `false`.
    Undefined,
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<&LiteralValue> for Value {
    fn from(lit: &LiteralValue) -> Self {
        match lit {
            LiteralValue::Integer(i) => Self::Integer(*i),
            LiteralValue::Real(r) => Self::Real(*r),
            LiteralValue::Boolean(b) => Self::Bool(*b),
            LiteralValue::Str(s) => Self::Str(s.clone()),
        }
    }
}

impl Value {
    /// Converts the value to a boolean using the truthiness rule.
    ///
    /// Booleans are taken as-is; numbers are true when nonzero; strings are
    /// true when non-empty; `Undefined` is false; anything else is true.
    ///
    /// # Example
    /// ```
    /// use pascaline::interpreter::value::Value;
    ///
    /// assert!(Value::Integer(3).is_truthy());
    /// assert!(!Value::Integer(0).is_truthy());
    /// assert!(!Value::Str(String::new()).is_truthy());
    /// assert!(!Value::Undefined.is_truthy());
    /// ```
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Integer(n) => *n != 0,
            Self::Real(r) => *r != 0.0,
            Self::Str(s) => !s.is_empty(),
            Self::Array(_) => true,
            Self::Undefined => false,
        }
    }

    /// Returns `true` if the value is [`Integer`].
    ///
    /// [`Integer`]: Value::Integer
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Self::Integer(..))
    }

    /// Builds the default value for a declared type.
    ///
    /// Integer variables start at `0`, reals at `0.0`, booleans at `false`,
    /// and strings empty. The same defaults fill fresh arrays and stand in
    /// for the result of a function body that never reaches `return`.
    #[must_use]
    pub fn default_for(ty: TypeName) -> Self {
        match ty {
            TypeName::Integer => Self::Integer(0),
            TypeName::Real => Self::Real(0.0),
            TypeName::Boolean => Self::Bool(false),
            TypeName::Str => Self::Str(String::new()),
        }
    }
}

impl std::fmt::Display for Value {
    /// Renders the value the way `writeln` prints it: integers plainly,
    /// reals with a decimal point kept (`2.0`, not `2`), booleans as `True`
    /// or `False`, strings verbatim, arrays bracketed.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Real(r) => write!(f, "{r:?}"),
            Self::Bool(true) => write!(f, "True"),
            Self::Bool(false) => write!(f, "False"),
            Self::Str(s) => write!(f, "{s}"),
            Self::Array(cells) => {
                write!(f, "[")?;
                for (index, value) in cells.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{value}")?;
                }
                write!(f, "]")
            },
            Self::Undefined => write!(f, "undefined"),
        }
    }
}
