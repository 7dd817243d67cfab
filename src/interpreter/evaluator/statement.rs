use std::io::{BufRead, Write};

use crate::{
    ast::{Expr, Statement},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Flow, Interpreter, array_variable_name},
        value::Value,
    },
};

impl<R: BufRead, W: Write> Interpreter<R, W> {
    /// Executes a single statement and reports how control should continue.
    ///
    /// Statements run in program order. A [`Flow::Return`] outcome stops the
    /// enclosing block or loop immediately and is propagated upward until a
    /// call boundary consumes it.
    pub(crate) fn execute_statement(&mut self, statement: &Statement) -> EvalResult<Flow> {
        match statement {
            Statement::Block(statements) => {
                for statement in statements {
                    match self.execute_statement(statement)? {
                        Flow::Normal => {},
                        flow => return Ok(flow),
                    }
                }
                Ok(Flow::Normal)
            },

            Statement::Assignment { target, value } => {
                let value = self.eval_expression(value)?;
                self.store(target, value)?;
                Ok(Flow::Normal)
            },

            Statement::If { condition,
                            then_branch,
                            else_branch, } => {
                if self.eval_expression(condition)?.is_truthy() {
                    self.execute_statement(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.execute_statement(else_branch)
                } else {
                    Ok(Flow::Normal)
                }
            },

            Statement::While { condition, body } => {
                while self.eval_expression(condition)?.is_truthy() {
                    match self.execute_statement(body)? {
                        Flow::Normal => {},
                        flow => return Ok(flow),
                    }
                }
                Ok(Flow::Normal)
            },

            Statement::For { variable,
                             start,
                             end,
                             body, } => self.execute_for(variable, start, end, body),

            Statement::ProcedureCall { name, arguments } => {
                self.call_procedure(name, arguments)?;
                Ok(Flow::Normal)
            },

            Statement::Readln { targets } => {
                self.execute_readln(targets)?;
                Ok(Flow::Normal)
            },

            Statement::Writeln { expressions } => {
                self.execute_writeln(expressions)?;
                Ok(Flow::Normal)
            },

            Statement::Return { value } => {
                let value = match value {
                    Some(expr) => Some(self.eval_expression(expr)?),
                    None => None,
                };
                Ok(Flow::Return(value))
            },
        }
    }

    /// Executes a `for` loop over an inclusive integer range.
    ///
    /// Both bounds are evaluated once, before the loop, and must be integer
    /// values. One child scope is created for the whole loop and holds only
    /// the loop variable, which is rebound on every iteration; the scope is
    /// discarded when the loop completes, so the variable does not outlive
    /// it. A start greater than the end means zero iterations.
    fn execute_for(&mut self,
                   variable: &str,
                   start: &Expr,
                   end: &Expr,
                   body: &Statement)
                   -> EvalResult<Flow> {
        let start_value = self.eval_expression(start)?;
        let end_value = self.eval_expression(end)?;

        let (Value::Integer(start_value), Value::Integer(end_value)) = (start_value, end_value)
        else {
            return Err(RuntimeError::ForBoundNotInteger);
        };

        self.push_scope();
        let mut outcome = Ok(Flow::Normal);

        for i in start_value..=end_value {
            self.define(variable, Value::Integer(i));
            match self.execute_statement(body) {
                Ok(Flow::Normal) => {},
                other => {
                    outcome = other;
                    break;
                },
            }
        }

        self.pop_scope();
        outcome
    }

    /// Stores a value into an assignment or `readln` target.
    ///
    /// The target must resolve to an existing variable or to an in-bounds
    /// cell of an existing array; nothing is created implicitly.
    pub(crate) fn store(&mut self, target: &Expr, value: Value) -> EvalResult<()> {
        match target {
            Expr::Variable { name } => self.assign(name, value),
            Expr::ArrayAccess { array, index } => {
                let index_value = self.eval_expression(index)?;
                let name = array_variable_name(array).to_string();
                self.store_array_cell(&name, &index_value, value)
            },
            _ => unreachable!("assignment targets are variables or array cells"),
        }
    }

    /// Stores into one array cell with the full check sequence: the name
    /// must be an array, the index an integer, and the index in bounds.
    fn store_array_cell(&mut self, name: &str, index: &Value, value: Value) -> EvalResult<()> {
        let slot = self.lookup_mut(name)
                       .ok_or_else(|| RuntimeError::UndefinedVariable { name: name.to_string() })?;

        let Value::Array(cells) = slot else {
            return Err(RuntimeError::NotAnArray { name: name.to_string() });
        };

        let &Value::Integer(raw) = index else {
            return Err(RuntimeError::IndexNotInteger);
        };

        let size = cells.len();
        let index = usize::try_from(raw).ok()
                                        .filter(|&i| i < size)
                                        .ok_or(RuntimeError::IndexOutOfBounds { index: raw,
                                                                                size })?;
        cells[index] = value;
        Ok(())
    }
}
