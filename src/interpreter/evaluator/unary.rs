use crate::{
    ast::UnaryOperator,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::Value},
};

/// Evaluates a unary operator applied to an already-evaluated value.
///
/// `+` and `-` require a numeric operand; `not` converts any operand
/// through truthiness and negates the result.
///
/// # Example
/// ```
/// use pascaline::{
///     ast::UnaryOperator,
///     interpreter::{evaluator::unary::eval_unary, value::Value},
/// };
///
/// let negated = eval_unary(UnaryOperator::Negate, &Value::Integer(5)).unwrap();
/// assert_eq!(negated, Value::Integer(-5));
///
/// let inverted = eval_unary(UnaryOperator::Not, &Value::Integer(0)).unwrap();
/// assert_eq!(inverted, Value::Bool(true));
/// ```
pub fn eval_unary(op: UnaryOperator, operand: &Value) -> EvalResult<Value> {
    match op {
        UnaryOperator::Plus => match operand {
            Value::Integer(_) | Value::Real(_) => Ok(operand.clone()),
            _ => Err(unsupported(op)),
        },
        UnaryOperator::Negate => match operand {
            Value::Integer(n) => {
                n.checked_neg().map(Value::Integer).ok_or(RuntimeError::Overflow)
            },
            Value::Real(r) => Ok(Value::Real(-r)),
            _ => Err(unsupported(op)),
        },
        UnaryOperator::Not => Ok(Value::Bool(!operand.is_truthy())),
    }
}

/// Builds the unsupported-operand error naming the operator.
fn unsupported(op: UnaryOperator) -> RuntimeError {
    RuntimeError::UnsupportedUnary { operator: op.to_string(), }
}
