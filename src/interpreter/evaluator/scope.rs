use std::collections::HashMap;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::Value,
    },
};

impl<R, W> Interpreter<R, W> {
    /// The index of the first scope of the current call frame.
    ///
    /// With no active call this is the global scope, index 0.
    fn frame_base(&self) -> usize {
        self.frames.last().copied().unwrap_or(0)
    }

    /// Retrieves a variable by walking the current environment chain.
    ///
    /// Lookup starts at the innermost scope and proceeds outward to the base
    /// of the current call frame, then jumps to the global scope. Scopes of
    /// the caller are never visible. Returns `None` if the variable is not
    /// defined anywhere on that chain.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        let base = self.frame_base();
        for scope in self.scopes[base..].iter().rev() {
            if let Some(value) = scope.get(name) {
                return Some(value);
            }
        }
        if base > 0 {
            return self.scopes[0].get(name);
        }
        None
    }

    /// Mutably retrieves a variable along the same chain as [`Self::get`].
    pub(crate) fn lookup_mut(&mut self, name: &str) -> Option<&mut Value> {
        let base = self.frame_base();
        let indices = (base..self.scopes.len()).rev().chain((base > 0).then_some(0));
        for index in indices {
            if self.scopes[index].contains_key(name) {
                return self.scopes[index].get_mut(name);
            }
        }
        None
    }

    /// Defines a variable in the innermost scope, shadowing any outer
    /// binding of the same name.
    pub fn define(&mut self, name: &str, value: Value) {
        self.scopes
            .last_mut()
            .expect("at least the global scope")
            .insert(name.to_string(), value);
    }

    /// Assigns to an existing variable on the environment chain.
    ///
    /// Unlike [`Self::define`], assignment never creates a binding: the
    /// target must already exist somewhere on the chain.
    ///
    /// # Errors
    /// Returns `RuntimeError::UndefinedVariable` when the name resolves
    /// nowhere.
    pub(crate) fn assign(&mut self, name: &str, value: Value) -> EvalResult<()> {
        match self.lookup_mut(name) {
            Some(slot) => {
                *slot = value;
                Ok(())
            },
            None => Err(RuntimeError::UndefinedVariable { name: name.to_string(), }),
        }
    }

    /// Pushes a plain child scope, used by `for` loops.
    ///
    /// The new scope is parented to the environment active where the loop
    /// appears; names outside it stay visible.
    pub(crate) fn push_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    /// Removes the innermost scope.
    pub(crate) fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    /// Pushes a call frame: a fresh scope behind a barrier, so lookups from
    /// inside the frame see only the frame's own scopes and the globals.
    pub(crate) fn push_frame(&mut self) {
        self.frames.push(self.scopes.len());
        self.scopes.push(HashMap::new());
    }

    /// Discards the current call frame and every scope created inside it
    /// (stack discipline: last created, first destroyed).
    pub(crate) fn pop_frame(&mut self) {
        if let Some(base) = self.frames.pop() {
            self.scopes.truncate(base);
        }
    }
}
