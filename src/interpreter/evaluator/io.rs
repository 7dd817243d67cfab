use std::io::{BufRead, Write};

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::Value,
    },
};

impl<R: BufRead, W: Write> Interpreter<R, W> {
    /// Executes `writeln`: evaluates each expression, concatenates their
    /// string forms with no separator, and emits one output line. With no
    /// expressions one blank line is emitted.
    pub(crate) fn execute_writeln(&mut self, expressions: &[Expr]) -> EvalResult<()> {
        let mut line = String::new();
        for expression in expressions {
            let value = self.eval_expression(expression)?;
            line.push_str(&value.to_string());
        }
        writeln!(self.output, "{line}").map_err(io_error)
    }

    /// Executes `readln`: obtains one line of external input per target and
    /// stores the coerced value with the same checks as an assignment.
    ///
    /// End of input terminates the remaining targets early without failing;
    /// targets already read keep their values.
    pub(crate) fn execute_readln(&mut self, targets: &[Expr]) -> EvalResult<()> {
        for target in targets {
            // Only variables and array cells are storable; any other
            // expression in target position reads nothing.
            if !matches!(target, Expr::Variable { .. } | Expr::ArrayAccess { .. }) {
                continue;
            }
            let Some(line) = self.read_input_line()? else {
                break;
            };
            self.store(target, coerce_input(&line))?;
        }
        Ok(())
    }

    /// Reads one line from the host input, or `None` at end of input.
    ///
    /// Pending output is flushed first so an interactive host shows its
    /// prompt text before the read blocks.
    fn read_input_line(&mut self) -> EvalResult<Option<String>> {
        self.output.flush().map_err(io_error)?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line).map_err(io_error)?;
        if read == 0 {
            return Ok(None);
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(Some(line))
    }
}

/// Coerces one supplied input line into a runtime value.
///
/// A line containing a `.` is tried as a real, any other line as an
/// integer; when the numeric parse fails the raw text is kept as a string.
fn coerce_input(line: &str) -> Value {
    if line.contains('.') {
        line.parse::<f64>()
            .map_or_else(|_| Value::Str(line.to_string()), Value::Real)
    } else {
        line.parse::<i64>()
            .map_or_else(|_| Value::Str(line.to_string()), Value::Integer)
    }
}

/// Wraps a host stream failure into a runtime error.
fn io_error(error: std::io::Error) -> RuntimeError {
    RuntimeError::Io { message: error.to_string(), }
}
