use std::rc::Rc;

use crate::lexer::Token;

use super::{ParseError, ParseResult, ParseState, Parser};

// === Boxed parser for type erasure ===

pub struct BoxedParser<T> {
    parser: Rc<dyn Fn(&mut ParseState) -> ParseResult<T>>,
}

impl<T> Clone for BoxedParser<T> {
    fn clone(&self) -> Self {
        BoxedParser {
            parser: Rc::clone(&self.parser),
        }
    }
}

impl<T: 'static> BoxedParser<T> {
    pub fn new<P: Parser<T> + 'static>(parser: P) -> Self {
        BoxedParser {
            parser: Rc::new(move |state| parser.parse(state)),
        }
    }

    /// Replace the "expected" description of errors from this parser.
    pub fn label(self, what: &'static str) -> BoxedParser<T> {
        BoxedParser::new(move |state: &mut ParseState| {
            self.parse(state).map_err(|mut err| {
                err.expected = vec![what.to_string()];
                err
            })
        })
    }
}

impl<T> Parser<T> for BoxedParser<T> {
    fn parse(&self, state: &mut ParseState) -> ParseResult<T> {
        (self.parser)(state)
    }
}

// === Primitive parsers ===

pub fn token<F: Fn(&Token) -> bool + 'static>(
    what: &'static str,
    predicate: F,
) -> BoxedParser<Token> {
    BoxedParser::new(move |state: &mut ParseState| match state.peek() {
        Some(tok) if predicate(tok) => Ok(state.advance().unwrap()),
        Some(tok) => {
            let err = ParseError::new("unexpected token")
                .expected(what)
                .found(tok.describe())
                .at(tok.pos());
            state.record_error(err.clone());
            Err(err)
        }
        None => {
            let err = ParseError::new("unexpected end of input").expected(what);
            state.record_error(err.clone());
            Err(err)
        }
    })
}

pub fn expect_assign() -> BoxedParser<Token> {
    token("':='", |t| matches!(t, Token::Assign(_)))
}

/// Parse an expression name token
pub fn name() -> BoxedParser<crate::lexer::Name> {
    BoxedParser::new(|state: &mut ParseState| match state.peek() {
        Some(Token::Name(_)) => {
            if let Token::Name(n) = state.advance().unwrap() {
                Ok(n)
            } else {
                unreachable!()
            }
        }
        Some(tok) => {
            let err = ParseError::new("unexpected token")
                .expected("name")
                .found(tok.describe())
                .at(tok.pos());
            state.record_error(err.clone());
            Err(err)
        }
        None => {
            let err = ParseError::new("unexpected end of input").expected("name");
            state.record_error(err.clone());
            Err(err)
        }
    })
}

/// Parse an integer literal token
pub fn integer() -> BoxedParser<crate::lexer::Integer> {
    BoxedParser::new(|state: &mut ParseState| match state.peek() {
        Some(Token::Integer(_)) => {
            if let Token::Integer(int) = state.advance().unwrap() {
                Ok(int)
            } else {
                unreachable!()
            }
        }
        Some(tok) => {
            let err = ParseError::new("unexpected token")
                .expected("integer")
                .found(tok.describe())
                .at(tok.pos());
            state.record_error(err.clone());
            Err(err)
        }
        None => {
            let err = ParseError::new("unexpected end of input").expected("integer");
            state.record_error(err.clone());
            Err(err)
        }
    })
}

/// Parse a string literal token
pub fn string_literal() -> BoxedParser<crate::lexer::StringLiteral> {
    BoxedParser::new(|state: &mut ParseState| match state.peek() {
        Some(Token::StringLiteral(_)) => {
            if let Token::StringLiteral(s) = state.advance().unwrap() {
                Ok(s)
            } else {
                unreachable!()
            }
        }
        Some(tok) => {
            let err = ParseError::new("unexpected token")
                .expected("string")
                .found(tok.describe())
                .at(tok.pos());
            state.record_error(err.clone());
            Err(err)
        }
        None => {
            let err = ParseError::new("unexpected end of input").expected("string");
            state.record_error(err.clone());
            Err(err)
        }
    })
}

/// Parse zero or more occurrences
pub fn many<T: 'static>(parser: BoxedParser<T>) -> BoxedParser<Vec<T>> {
    BoxedParser::new(move |state: &mut ParseState| {
        let mut results = Vec::new();
        loop {
            let pos = state.position();
            match parser.parse(state) {
                Ok(item) => results.push(item),
                Err(_) => {
                    state.restore(pos);
                    break;
                }
            }
        }
        Ok(results)
    })
}
