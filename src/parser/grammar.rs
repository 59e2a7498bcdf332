//! Grammar for Sortle source text.
//!
//! A program is a sequence of definitions, one expression each:
//!
//! ```text
//! program    := definition*
//! definition := name ":=" term*
//! term       := integer | string | operator
//! ```
//!
//! Bodies never contain bare names, so a name token always starts the next
//! definition and no line terminators are needed.

use crate::ast::{Expression, Operator, Term};
use crate::lexer::Token;

use super::combinators::{BoxedParser, expect_assign, integer, many, name, string_literal};
use super::{ParseError, ParseState, Parser};

/// Strip the surrounding quotes from a string literal and process escapes.
///
/// A backslash makes the following character literal, whatever it is.
fn unescape(raw: &str) -> String {
    let inner = &raw[1..raw.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Parse a single operator term.
fn operator() -> BoxedParser<Operator> {
    BoxedParser::new(|state: &mut ParseState| {
        let op = match state.peek() {
            Some(Token::Plus(_)) => Some(Operator::Add),
            Some(Token::Star(_)) => Some(Operator::Multiply),
            Some(Token::Slash(_)) => Some(Operator::Divide),
            Some(Token::Percent(_)) => Some(Operator::Modulo),
            Some(Token::Caret(_)) | Some(Token::Dollar(_)) => Some(Operator::Max),
            Some(Token::Tilde(_)) => Some(Operator::Concatenate),
            Some(Token::Question(_)) => Some(Operator::Match),
            _ => None,
        };

        match op {
            Some(op) => {
                state.advance();
                Ok(op)
            }
            None => {
                let err = match state.peek() {
                    Some(tok) => ParseError::new("unexpected token")
                        .expected("operator")
                        .found(tok.describe())
                        .at(tok.pos()),
                    None => ParseError::new("unexpected end of input").expected("operator"),
                };
                state.record_error(err.clone());
                Err(err)
            }
        }
    })
}

/// term := integer | string | operator
fn term() -> BoxedParser<Term> {
    BoxedParser::new(|state: &mut ParseState| match state.peek() {
        Some(Token::Integer(_)) => {
            let int = integer().parse(state)?;
            match int.value.parse() {
                Ok(value) => Ok(Term::Integer(value)),
                Err(_) => {
                    let err = ParseError::new("integer literal out of range").at(int.position);
                    state.record_error(err.clone());
                    Err(err)
                }
            }
        }
        Some(Token::StringLiteral(_)) => {
            let s = string_literal().parse(state)?;
            Ok(Term::String(unescape(&s.value)))
        }
        _ => operator().parse(state).map(Term::Operator),
    })
}

/// definition := name ":=" term*
pub fn definition() -> BoxedParser<Expression> {
    BoxedParser::new(move |state: &mut ParseState| {
        let name = name().label("expression name").parse(state)?;
        expect_assign().parse(state)?;
        let terms = many(term()).parse(state)?;

        Ok(Expression {
            name: name.value,
            terms,
            position: name.position,
        })
    })
}

/// Skip tokens until we reach what looks like a new definition or end of input.
fn skip_to_next_definition(state: &mut ParseState) {
    // Skip current token first to make progress
    state.advance();

    while let Some(tok) = state.peek() {
        if matches!(tok, Token::Name(_)) {
            break;
        }
        state.advance();
    }
}

/// program := definition*
///
/// With error recovery: if a definition fails to parse, skip to the next one.
/// Duplicate names violate the engine's input contract and are collected as
/// errors here.
pub fn program() -> BoxedParser<Vec<Expression>> {
    BoxedParser::new(move |state: &mut ParseState| {
        let mut expressions: Vec<Expression> = Vec::new();

        while state.has_next() {
            let pos = state.position();
            match definition().parse(state) {
                Ok(expr) => {
                    if expressions.iter().any(|e| e.name == expr.name) {
                        let err =
                            ParseError::new(format!("duplicate expression name '{}'", expr.name))
                                .at(expr.position.clone());
                        state.collect_error(err);
                    } else {
                        expressions.push(expr);
                    }
                }
                Err(_) => {
                    // Commit the error and try to recover
                    state.commit_furthest_error();
                    state.restore(pos);
                    skip_to_next_definition(state);
                }
            }
        }

        Ok(expressions)
    })
}

/// Parse a complete program from the token stream.
///
/// Returns the parsed expressions along with all collected errors; callers
/// must treat a non-empty error list as failure.
pub fn parse(state: &mut ParseState) -> (Vec<Expression>, Vec<ParseError>) {
    let expressions = match program().parse(state) {
        Ok(exprs) => exprs,
        Err(err) => {
            if let Some(furthest) = state.get_furthest_error() {
                let furthest = furthest.clone();
                state.collect_error(furthest);
            } else {
                state.collect_error(err);
            }
            Vec::new()
        }
    };

    let errors = state.take_errors();
    (expressions, errors)
}
