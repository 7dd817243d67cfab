use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Promotes an `i64` to `f64` for mixed integer/real arithmetic.
///
/// Values beyond 2^53 lose precision; numeric promotion in this language is
/// total, so the loss is accepted rather than reported.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub const fn i64_to_f64(value: i64) -> f64 {
    value as f64
}

/// Truncates an `f64` toward zero into an `i64`, checking that the result
/// is representable.
///
/// Used by `div` and `mod`, which truncate both operands to integers before
/// operating.
///
/// ## Errors
/// Returns `RuntimeError::Overflow` when the value is not finite or its
/// integral part falls outside the `i64` range.
///
/// ## Example
/// ```
/// use pascaline::util::num::f64_to_i64_trunc;
///
/// assert_eq!(f64_to_i64_trunc(7.9).unwrap(), 7);
/// assert_eq!(f64_to_i64_trunc(-7.9).unwrap(), -7);
/// assert!(f64_to_i64_trunc(1e300).is_err());
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
pub fn f64_to_i64_trunc(value: f64) -> EvalResult<i64> {
    let truncated = value.trunc();
    if !truncated.is_finite() || truncated < i64::MIN as f64 || truncated >= -(i64::MIN as f64) {
        return Err(RuntimeError::Overflow);
    }
    Ok(truncated as i64)
}
