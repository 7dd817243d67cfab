/// Numeric conversion helpers.
///
/// This module provides the conversions the evaluator needs between `i64`
/// and `f64`: lossy-but-total promotion for mixed arithmetic and a checked
/// truncation used by the integer division family.
pub mod num;
