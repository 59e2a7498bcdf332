//! The rewrite engine.
//!
//! Holds the program state, a list of expressions kept strictly sorted by
//! name, and the instruction pointer selecting the next expression to
//! evaluate. One [`Interpreter::step`] evaluates that expression, reinserts
//! it under its new name (deleting it when the name is empty, clobbering an
//! existing entry on collision), and advances the pointer. The program
//! terminates when exactly one expression remains; its name is the output.

mod error;
mod eval;
mod value;

pub use error::RuntimeError;
pub use eval::evaluate;
pub use value::Value;

use crate::ast::Expression;

/// Interpreter state: the sorted expression list and instruction pointer.
pub struct Interpreter {
    expressions: Vec<Expression>,
    ip: usize,
}

impl Interpreter {
    /// Build the initial program state from parser output.
    ///
    /// Entries are sorted by name before execution begins. An empty program
    /// is rejected here, before any stepping.
    pub fn new(mut expressions: Vec<Expression>) -> Result<Self, RuntimeError> {
        if expressions.is_empty() {
            return Err(RuntimeError::EmptyProgram);
        }

        expressions.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(Self {
            expressions,
            ip: 0,
        })
    }

    /// The current program state, sorted by name.
    pub fn expressions(&self) -> &[Expression] {
        &self.expressions
    }

    /// Index of the next expression to evaluate.
    pub fn ip(&self) -> usize {
        self.ip
    }

    /// Has the program terminated? (Exactly one expression left.)
    pub fn is_halted(&self) -> bool {
        self.expressions.len() == 1
    }

    /// The final name, once halted.
    pub fn result(&self) -> Option<&str> {
        if self.is_halted() {
            Some(&self.expressions[0].name)
        } else {
            None
        }
    }

    /// Perform exactly one rewrite.
    ///
    /// The halt check belongs to the outer loop, not here: an external
    /// driver (a debugger front-end stepping in its own scheduler) stops
    /// calling once a single expression remains. Stepping a one-entry state
    /// anyway performs the honest rewrite, which may leave the state empty;
    /// further steps then fail with [`RuntimeError::EmptyProgram`].
    pub fn step(&mut self) -> Result<(), RuntimeError> {
        if self.expressions.is_empty() {
            return Err(RuntimeError::EmptyProgram);
        }

        let expression = &self.expressions[self.ip];
        let result = eval::evaluate(&expression.terms, &self.expressions, self.ip)?;
        let new_name = result.to_text();

        let evaluated = self.expressions.remove(self.ip);

        if new_name.is_empty() {
            // Deleted. The pointer now addresses what used to be the next
            // entry; wrap at the end.
            if self.ip == self.expressions.len() {
                self.ip = 0;
            }
            return Ok(());
        }

        let renamed = Expression {
            name: new_name,
            terms: evaluated.terms,
            position: evaluated.position,
        };

        let index = match self
            .expressions
            .binary_search_by(|e| e.name.as_str().cmp(&renamed.name))
        {
            Ok(index) => {
                // Clobber: replace the same-named entry
                self.expressions[index] = renamed;
                index
            }
            Err(index) => {
                self.expressions.insert(index, renamed);
                index
            }
        };

        self.ip = index + 1;
        if self.ip == self.expressions.len() {
            self.ip = 0;
        }
        Ok(())
    }

    /// Run to termination, returning the final expression's name.
    ///
    /// The halt check fires before each step, so a program that starts with
    /// a single expression terminates immediately without evaluating it,
    /// even one whose body would delete it.
    pub fn run(&mut self) -> Result<String, RuntimeError> {
        while self.expressions.len() > 1 {
            self.step()?;
        }

        Ok(self.expressions[0].name.clone())
    }
}
