use std::{
    collections::HashMap,
    io::{BufRead, Write},
    rc::Rc,
};

use crate::{
    ast::{Declaration, Expr, FunctionDecl, ProcedureDecl, Program},
    error::RuntimeError,
    interpreter::{
        evaluator::{binary::eval_binary, unary::eval_unary},
        value::Value,
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// [`RuntimeError`] describing the failure. Runtime errors unwind to the
/// host; the interpreted language cannot catch them.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// The control-flow outcome of executing one statement.
///
/// `return` is not an error: it is an ordinary outcome that block and loop
/// execution propagate upward until the owning call boundary consumes it.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// Execution continues with the next statement.
    Normal,
    /// A `return` statement fired, carrying its optional value.
    Return(Option<Value>),
}

/// Executes a parsed [`Program`] against host-supplied I/O streams.
///
/// The interpreter owns the environment chain (a scope stack with call-frame
/// barriers), the procedure and function registries, and the two host
/// streams: `input` supplies one line per `readln` target and `output`
/// receives one line per `writeln`.
///
/// ## Usage
///
/// An `Interpreter` runs one program and is then discarded; globals persist
/// for the whole run and every call or `for` loop gets its own scope.
pub struct Interpreter<R, W> {
    /// The scope stack. Index 0 is the global scope; the last entry is the
    /// innermost scope.
    pub(crate) scopes:     Vec<HashMap<String, Value>>,
    /// Scope indices where call frames begin. Lookups never cross the top
    /// barrier except to reach the global scope.
    pub(crate) frames:     Vec<usize>,
    /// Registered procedures, keyed by name.
    pub(crate) procedures: HashMap<String, Rc<ProcedureDecl>>,
    /// Registered functions, keyed by name.
    pub(crate) functions:  HashMap<String, Rc<FunctionDecl>>,
    /// Host input stream read one line at a time by `readln`.
    pub(crate) input:      R,
    /// Host output stream receiving `writeln` lines.
    pub(crate) output:     W,
}

impl<R: BufRead, W: Write> Interpreter<R, W> {
    /// Creates an interpreter with a fresh global environment and no
    /// registered procedures or functions.
    pub fn new(input: R, output: W) -> Self {
        Self { scopes: vec![HashMap::new()],
               frames: Vec::new(),
               procedures: HashMap::new(),
               functions: HashMap::new(),
               input,
               output }
    }

    /// Runs a whole program: installs every top-level declaration, then
    /// executes the main body.
    ///
    /// A `return` signal escaping the main body is discarded, not an error.
    ///
    /// # Errors
    /// Returns the first [`RuntimeError`] raised; execution stops there.
    pub fn run(&mut self, program: &Program) -> EvalResult<()> {
        for declaration in &program.declarations {
            self.execute_declaration(declaration)?;
        }
        self.execute_statement(&program.body)?;
        Ok(())
    }

    /// Installs one declaration into the innermost scope.
    ///
    /// Variables take their initializer's value or their type's default;
    /// arrays are allocated at their fixed size filled with the element
    /// type's default; procedures and functions are registered by name
    /// without being executed.
    pub(crate) fn execute_declaration(&mut self, declaration: &Declaration) -> EvalResult<()> {
        match declaration {
            Declaration::Variable(decl) => {
                let value = match &decl.initializer {
                    Some(initializer) => self.eval_expression(initializer)?,
                    None => Value::default_for(decl.ty),
                };
                self.define(&decl.name, value);
            },
            Declaration::Array(decl) => {
                let fill = Value::default_for(decl.element_type);
                self.define(&decl.name, Value::Array(vec![fill; decl.size]));
            },
            Declaration::Procedure(decl) => {
                self.procedures.insert(decl.name.clone(), Rc::new(decl.clone()));
            },
            Declaration::Function(decl) => {
                self.functions.insert(decl.name.clone(), Rc::new(decl.clone()));
            },
        }
        Ok(())
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. The
    /// evaluator dispatches on the expression variant: literals, variable
    /// references, array accesses, unary and binary operations, and
    /// function calls. Operand and argument lists evaluate left to right.
    pub(crate) fn eval_expression(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Literal(literal) => Ok(Value::from(literal)),
            Expr::Variable { name } => {
                self.get(name)
                    .cloned()
                    .ok_or_else(|| RuntimeError::UndefinedVariable { name: name.clone() })
            },
            Expr::ArrayAccess { array, index } => self.eval_array_access(array, index),
            Expr::BinaryOp { left, op, right } => {
                let lhs = self.eval_expression(left)?;
                let rhs = self.eval_expression(right)?;
                eval_binary(*op, &lhs, &rhs)
            },
            Expr::UnaryOp { op, operand } => {
                let value = self.eval_expression(operand)?;
                eval_unary(*op, &value)
            },
            Expr::FunctionCall { name, arguments } => self.call_function(name, arguments),
        }
    }

    /// Evaluates an array read, `name[index]`.
    ///
    /// The index must be an integer value inside `0..size`; violations fail
    /// at runtime and are never clamped.
    fn eval_array_access(&mut self, array: &Expr, index: &Expr) -> EvalResult<Value> {
        let index_value = self.eval_expression(index)?;
        let name = array_variable_name(array);

        let cells = match self.get(name) {
            Some(Value::Array(cells)) => cells,
            Some(_) => return Err(RuntimeError::NotAnArray { name: name.to_string() }),
            None => return Err(RuntimeError::UndefinedVariable { name: name.to_string() }),
        };

        let Value::Integer(raw) = index_value else {
            return Err(RuntimeError::IndexNotInteger);
        };

        let size = cells.len();
        let index = usize::try_from(raw).ok()
                                        .filter(|&i| i < size)
                                        .ok_or(RuntimeError::IndexOutOfBounds { index: raw,
                                                                                size })?;
        Ok(cells[index].clone())
    }
}

/// Extracts the variable name an array expression refers to.
///
/// The parser only builds `ArrayAccess` nodes over plain variables.
pub(crate) fn array_variable_name(array: &Expr) -> &str {
    match array {
        Expr::Variable { name } => name,
        _ => unreachable!("array accesses are built over plain variables"),
    }
}
