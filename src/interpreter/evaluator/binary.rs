use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::Value},
    util::num::{f64_to_i64_trunc, i64_to_f64},
};

/// Evaluates a binary operation between two already-evaluated values.
///
/// The operation is routed to a handler per operator family: arithmetic
/// with numeric promotion (and string concatenation for `+`), real
/// division, the truncating integer division pair, comparisons, and the
/// logical operators. Both operands were evaluated by the caller, so
/// `and`/`or` never short-circuit.
///
/// # Parameters
/// - `op`: The operator.
/// - `left`: Left operand.
/// - `right`: Right operand.
///
/// # Returns
/// The computed value.
///
/// # Example
/// ```
/// use pascaline::{
///     ast::BinaryOperator,
///     interpreter::{evaluator::binary::eval_binary, value::Value},
/// };
///
/// let sum = eval_binary(BinaryOperator::Add,
///                       &Value::Integer(3),
///                       &Value::Integer(4)).unwrap();
/// assert_eq!(sum, Value::Integer(7));
///
/// let quotient = eval_binary(BinaryOperator::Div,
///                            &Value::Integer(1),
///                            &Value::Integer(2)).unwrap();
/// assert_eq!(quotient, Value::Real(0.5));
/// ```
pub fn eval_binary(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
    use BinaryOperator::{
        Add, And, Div, Equal, Greater, GreaterEqual, IntDiv, Less, LessEqual, Mod, Mul, NotEqual,
        Or, Sub,
    };

    match op {
        Add | Sub | Mul => eval_arithmetic(op, left, right),
        Div => eval_real_division(left, right),
        IntDiv | Mod => eval_integer_division(op, left, right),
        Equal | NotEqual | Less | Greater | LessEqual | GreaterEqual => {
            eval_comparison(op, left, right)
        },
        And | Or => eval_logic(op, left, right),
    }
}

/// Evaluates `+`, `-`, and `*`.
///
/// Two integers stay integer (checked against overflow); a real on either
/// side promotes the operation to real; `+` on two strings concatenates.
/// Every other combination is unsupported.
fn eval_arithmetic(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
    use Value::{Integer, Real, Str};

    match (left, right) {
        (Integer(a), Integer(b)) => {
            let result = match op {
                BinaryOperator::Add => a.checked_add(*b),
                BinaryOperator::Sub => a.checked_sub(*b),
                BinaryOperator::Mul => a.checked_mul(*b),
                _ => unreachable!("routed by eval_binary"),
            };
            result.map(Integer).ok_or(RuntimeError::Overflow)
        },

        (Integer(_) | Real(_), Integer(_) | Real(_)) => {
            let a = promote(left);
            let b = promote(right);
            Ok(Real(match op {
                        BinaryOperator::Add => a + b,
                        BinaryOperator::Sub => a - b,
                        BinaryOperator::Mul => a * b,
                        _ => unreachable!("routed by eval_binary"),
                    }))
        },

        (Str(a), Str(b)) if op == BinaryOperator::Add => Ok(Str(format!("{a}{b}"))),

        _ => Err(unsupported(op)),
    }
}

/// Evaluates `/`, which always yields a real.
///
/// A zero right operand is a division-by-zero error, never an infinity.
fn eval_real_division(left: &Value, right: &Value) -> EvalResult<Value> {
    use Value::{Integer, Real};

    let (a, b) = match (left, right) {
        (Integer(_) | Real(_), Integer(_) | Real(_)) => (promote(left), promote(right)),
        _ => return Err(unsupported(BinaryOperator::Div)),
    };

    if b == 0.0 {
        return Err(RuntimeError::DivisionByZero);
    }
    Ok(Real(a / b))
}

/// Evaluates `div` and `mod`.
///
/// Both operands are truncated to integers first; the quotient rounds
/// toward negative infinity and the remainder takes the divisor's sign.
fn eval_integer_division(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
    if matches!(right, Value::Integer(0)) || matches!(right, Value::Real(r) if *r == 0.0) {
        return Err(RuntimeError::DivisionByZero);
    }

    let a = truncate_operand(left, op)?;
    let b = truncate_operand(right, op)?;
    if b == 0 {
        return Err(RuntimeError::DivisionByZero);
    }

    let result = match op {
        BinaryOperator::IntDiv => floor_div(a, b)?,
        BinaryOperator::Mod => floor_mod(a, b)?,
        _ => unreachable!("routed by eval_binary"),
    };
    Ok(Value::Integer(result))
}

/// Truncates one `div`/`mod` operand toward zero into an integer.
fn truncate_operand(value: &Value, op: BinaryOperator) -> EvalResult<i64> {
    match value {
        Value::Integer(n) => Ok(*n),
        Value::Real(r) => f64_to_i64_trunc(*r),
        _ => Err(unsupported(op)),
    }
}

/// Floor division on integers: the quotient is rounded toward negative
/// infinity, so `floor_div(-7, 2)` is `-4`.
///
/// # Errors
/// Returns `RuntimeError::Overflow` for `i64::MIN / -1`.
///
/// # Example
/// ```
/// use pascaline::interpreter::evaluator::binary::floor_div;
///
/// assert_eq!(floor_div(7, 2).unwrap(), 3);
/// assert_eq!(floor_div(-7, 2).unwrap(), -4);
/// assert_eq!(floor_div(7, -2).unwrap(), -4);
/// ```
pub fn floor_div(a: i64, b: i64) -> EvalResult<i64> {
    let quotient = a.checked_div(b).ok_or(RuntimeError::Overflow)?;
    if a % b != 0 && (a < 0) != (b < 0) {
        Ok(quotient - 1)
    } else {
        Ok(quotient)
    }
}

/// Remainder paired with [`floor_div`]: the result takes the divisor's
/// sign, so `floor_mod(-7, 2)` is `1`.
///
/// # Errors
/// Returns `RuntimeError::Overflow` for `i64::MIN mod -1`.
///
/// # Example
/// ```
/// use pascaline::interpreter::evaluator::binary::floor_mod;
///
/// assert_eq!(floor_mod(7, 2).unwrap(), 1);
/// assert_eq!(floor_mod(-7, 2).unwrap(), 1);
/// assert_eq!(floor_mod(7, -2).unwrap(), -1);
/// ```
pub fn floor_mod(a: i64, b: i64) -> EvalResult<i64> {
    let remainder = a.checked_rem(b).ok_or(RuntimeError::Overflow)?;
    if remainder != 0 && (remainder < 0) != (b < 0) {
        Ok(remainder + b)
    } else {
        Ok(remainder)
    }
}

/// Evaluates the six comparison operators.
///
/// Numeric operands compare after promotion; strings compare
/// lexicographically; booleans order `false` before `true`. Values of
/// unrelated kinds are never equal, and ordering them is unsupported.
fn eval_comparison(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
    use std::cmp::Ordering;
    use Value::{Bool, Integer, Real, Str};

    let ordering = match (left, right) {
        (Integer(a), Integer(b)) => Some(a.cmp(b)),
        (Integer(a), Real(b)) => i64_to_f64(*a).partial_cmp(b),
        (Real(a), Integer(b)) => a.partial_cmp(&i64_to_f64(*b)),
        (Real(a), Real(b)) => a.partial_cmp(b),
        (Str(a), Str(b)) => Some(a.cmp(b)),
        (Bool(a), Bool(b)) => Some(a.cmp(b)),
        _ => None,
    };

    match ordering {
        Some(ordering) => {
            Ok(Bool(match op {
                        BinaryOperator::Equal => ordering == Ordering::Equal,
                        BinaryOperator::NotEqual => ordering != Ordering::Equal,
                        BinaryOperator::Less => ordering == Ordering::Less,
                        BinaryOperator::Greater => ordering == Ordering::Greater,
                        BinaryOperator::LessEqual => ordering != Ordering::Greater,
                        BinaryOperator::GreaterEqual => ordering != Ordering::Less,
                        _ => unreachable!("routed by eval_binary"),
                    }))
        },
        None => match op {
            BinaryOperator::Equal => Ok(Bool(false)),
            BinaryOperator::NotEqual => Ok(Bool(true)),
            _ => Err(unsupported(op)),
        },
    }
}

/// Evaluates `and` and `or` over the truthiness of both operands.
#[allow(clippy::unnecessary_wraps)]
fn eval_logic(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
    let a = left.is_truthy();
    let b = right.is_truthy();
    Ok(Value::Bool(match op {
                       BinaryOperator::And => a && b,
                       BinaryOperator::Or => a || b,
                       _ => unreachable!("routed by eval_binary"),
                   }))
}

/// Promotes a numeric value to `f64` for mixed arithmetic.
fn promote(value: &Value) -> f64 {
    match value {
        Value::Integer(n) => i64_to_f64(*n),
        Value::Real(r) => *r,
        _ => unreachable!("callers match numeric operands first"),
    }
}

/// Builds the unsupported-operand error naming the operator.
fn unsupported(op: BinaryOperator) -> RuntimeError {
    RuntimeError::UnsupportedBinary { operator: op.to_string(), }
}
