use std::io::{BufRead, Write};

use crate::{
    ast::{Declaration, Expr, Parameter, Statement},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Flow, Interpreter},
        value::Value,
    },
};

impl<R: BufRead, W: Write> Interpreter<R, W> {
    /// Calls a procedure as a statement.
    ///
    /// A `return` signal escaping the body is consumed here and its value,
    /// if any, is discarded.
    ///
    /// # Errors
    /// `UndefinedProcedure` when the name is not registered, or
    /// `ArityMismatch` when the argument count differs from the parameter
    /// count; plus anything the body raises.
    pub(crate) fn call_procedure(&mut self, name: &str, arguments: &[Expr]) -> EvalResult<()> {
        let Some(declaration) = self.procedures.get(name).cloned() else {
            return Err(RuntimeError::UndefinedProcedure { name: name.to_string() });
        };

        let values = self.evaluate_arguments(name, &declaration.parameters, arguments)?;
        self.invoke(&declaration.parameters,
                    &declaration.locals,
                    &declaration.body,
                    values)?;
        Ok(())
    }

    /// Calls a function as an expression.
    ///
    /// The call boundary is the only place that consumes the `return`
    /// signal: a carried value becomes the call's result, a bare `return`
    /// yields the `Undefined` sentinel, and a body that completes without
    /// returning yields the declared return type's default.
    pub(crate) fn call_function(&mut self, name: &str, arguments: &[Expr]) -> EvalResult<Value> {
        let Some(declaration) = self.functions.get(name).cloned() else {
            return Err(RuntimeError::UndefinedFunction { name: name.to_string() });
        };

        let values = self.evaluate_arguments(name, &declaration.parameters, arguments)?;
        let flow = self.invoke(&declaration.parameters,
                               &declaration.locals,
                               &declaration.body,
                               values)?;

        Ok(match flow {
            Flow::Return(Some(value)) => value,
            Flow::Return(None) => Value::Undefined,
            Flow::Normal => Value::default_for(declaration.return_type),
        })
    }

    /// Checks arity and evaluates the argument expressions left to right in
    /// the caller's environment. Arguments pass by value.
    fn evaluate_arguments(&mut self,
                          name: &str,
                          parameters: &[Parameter],
                          arguments: &[Expr])
                          -> EvalResult<Vec<Value>> {
        if arguments.len() != parameters.len() {
            return Err(RuntimeError::ArityMismatch { name:     name.to_string(),
                                                     expected: parameters.len(),
                                                     found:    arguments.len(), });
        }

        let mut values = Vec::with_capacity(arguments.len());
        for argument in arguments {
            values.push(self.eval_expression(argument)?);
        }
        Ok(values)
    }

    /// Runs a callable body in a fresh frame.
    ///
    /// The frame is parented to the global environment, not to the caller's
    /// local environment, so callees never see caller locals. The frame and
    /// everything created inside it are discarded when the call completes.
    fn invoke(&mut self,
              parameters: &[Parameter],
              locals: &[Declaration],
              body: &Statement,
              values: Vec<Value>)
              -> EvalResult<Flow> {
        self.push_frame();
        let outcome = self.run_frame(parameters, locals, body, values);
        self.pop_frame();
        outcome
    }

    /// Populates the new frame and executes the body: parameters are bound
    /// by position, then local declarations are installed, then the body
    /// runs.
    fn run_frame(&mut self,
                 parameters: &[Parameter],
                 locals: &[Declaration],
                 body: &Statement,
                 values: Vec<Value>)
                 -> EvalResult<Flow> {
        for (parameter, value) in parameters.iter().zip(values) {
            self.define(&parameter.name, value);
        }
        for declaration in locals {
            self.execute_declaration(declaration)?;
        }
        self.execute_statement(body)
    }
}
