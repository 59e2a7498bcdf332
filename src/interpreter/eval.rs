//! Stack machine executing one expression body.

use crate::ast::{Expression, Operator, Term};
use crate::regex::{self, Pattern};

use super::error::RuntimeError;
use super::value::Value;

/// Execute one expression body against a fresh stack.
///
/// `expressions` is the current program state (read-only) and `ip` the index
/// of the evaluating expression; both are consulted only by `?`. The result
/// is the single value the body leaves behind.
pub fn evaluate(
    terms: &[Term],
    expressions: &[Expression],
    ip: usize,
) -> Result<Value, RuntimeError> {
    let mut stack: Vec<Value> = Vec::new();

    for term in terms {
        match term {
            Term::Integer(value) => stack.push(Value::Integer(*value)),
            Term::String(value) => stack.push(Value::String(value.clone())),
            Term::Operator(operator) => {
                // First pop is the right-hand operand
                let (Some(op1), Some(op2)) = (stack.pop(), stack.pop()) else {
                    return Err(RuntimeError::StackUnderflow {
                        operator: *operator,
                    });
                };
                stack.push(apply(*operator, op2, op1, expressions, ip)?);
            }
        }
    }

    if stack.len() == 1 {
        Ok(stack.pop().unwrap())
    } else {
        Err(RuntimeError::StackResidue { depth: stack.len() })
    }
}

fn apply(
    operator: Operator,
    op2: Value,
    op1: Value,
    expressions: &[Expression],
    ip: usize,
) -> Result<Value, RuntimeError> {
    match operator {
        Operator::Add => Ok(Value::Integer(op2.to_int() + op1.to_int())),
        Operator::Multiply => Ok(Value::Integer(op2.to_int() * op1.to_int())),
        Operator::Divide => {
            let divisor = op1.to_int();
            if divisor == 0 {
                return Err(RuntimeError::DivideByZero { operator });
            }
            Ok(Value::Integer(floor_div(op2.to_int(), divisor)))
        }
        Operator::Modulo => {
            let divisor = op1.to_int();
            if divisor == 0 {
                return Err(RuntimeError::DivideByZero { operator });
            }
            Ok(Value::Integer(op2.to_int() % divisor))
        }
        Operator::Max => {
            let left = op2.to_text();
            let right = op1.to_text();
            Ok(Value::String(if left >= right { left } else { right }))
        }
        Operator::Concatenate => {
            let mut text = op2.to_text();
            text.push_str(&op1.to_text());
            Ok(Value::String(text))
        }
        Operator::Match => {
            if !op1.to_text().is_empty() {
                return Err(RuntimeError::UnsupportedOperation);
            }

            let text = op2.to_text();
            let pattern = match Pattern::compile(&text) {
                Ok(pattern) => pattern,
                Err(source) => {
                    return Err(RuntimeError::RegexCompile {
                        pattern: text,
                        source,
                    });
                }
            };

            // Reverse-sort-order search starting just before the evaluating
            // expression, which itself is excluded
            let candidates = expressions[..ip]
                .iter()
                .rev()
                .chain(expressions[ip + 1..].iter().rev())
                .map(|e| e.name.as_str());

            Ok(Value::String(regex::search(&pattern, candidates)))
        }
    }
}

/// Division rounding toward negative infinity.
fn floor_div(dividend: i64, divisor: i64) -> i64 {
    let quotient = dividend / divisor;
    if dividend % divisor != 0 && (dividend < 0) != (divisor < 0) {
        quotient - 1
    } else {
        quotient
    }
}
