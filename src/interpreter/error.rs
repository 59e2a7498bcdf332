//! Runtime error definitions.
//!
//! Every failure here aborts the current step and propagates to the caller;
//! nothing is recovered or retried inside the engine.

use std::fmt;

use crate::ast::Operator;
use crate::regex::CompileError;

/// Runtime failure while stepping a program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// `?` was given a pattern that does not compile.
    RegexCompile {
        pattern: String,
        source: CompileError,
    },

    /// An operator found fewer than two operands on the stack.
    StackUnderflow { operator: Operator },

    /// A body finished with anything other than exactly one value.
    StackResidue { depth: usize },

    /// `/` or `%` with a zero divisor.
    DivideByZero { operator: Operator },

    /// `?` with a non-empty right operand, the form that would match
    /// substrings of the evaluating expression's own name.
    UnsupportedOperation,

    /// Attempt to run a program with no expressions.
    EmptyProgram,
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::RegexCompile { pattern, source } => {
                write!(f, "{}\nwhen evaluating regex: {}", source, pattern)
            }
            RuntimeError::StackUnderflow { operator } => {
                write!(f, "stack underflow when applying '{}'", operator)
            }
            RuntimeError::StackResidue { depth } => {
                write!(f, "expression left {} values on the stack", depth)
            }
            RuntimeError::DivideByZero { operator } => {
                write!(f, "division by zero when applying '{}'", operator)
            }
            RuntimeError::UnsupportedOperation => {
                write!(f, "substring regex form not implemented")
            }
            RuntimeError::EmptyProgram => {
                write!(f, "program must have at least one expression")
            }
        }
    }
}

impl std::error::Error for RuntimeError {}
