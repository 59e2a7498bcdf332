//! Parser infrastructure: state, errors, and the `Parser` trait.
//!
//! The grammar lives in [`grammar`]; the combinator library in
//! [`combinators`]. `ParseState` tracks the position in the token stream,
//! supports backtracking via `position`/`restore`, and records the error at
//! the furthest position reached so alternatives report the most useful
//! failure.

mod combinators;
mod grammar;

pub use combinators::*;
pub use grammar::*;

use lachs::Span;

use crate::lexer::Token;

/// Structured parse error with expected/found context.
///
/// When a span is attached, `Display` renders the offending source line with
/// a carat underline and row/column information.
#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub span: Option<Box<Span>>,
    pub expected: Vec<String>,
    pub found: Option<String>,
}

impl ParseError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            span: None,
            expected: vec![],
            found: None,
        }
    }

    /// Add an expected token/construct to this error.
    pub fn expected(mut self, what: impl Into<String>) -> Self {
        self.expected.push(what.into());
        self
    }

    /// Set what was actually found.
    pub fn found(mut self, what: impl Into<String>) -> Self {
        self.found = Some(what.into());
        self
    }

    /// Set source location for this error.
    pub fn at(mut self, span: Span) -> Self {
        self.span = Some(Box::new(span));
        self
    }

    /// Merge expected tokens from another error.
    ///
    /// Used when alternative parsers fail at the same position, so the
    /// report shows every possibility ("expected A or B").
    pub fn merge_expected(mut self, other: &ParseError) -> Self {
        for exp in &other.expected {
            if !self.expected.contains(exp) {
                self.expected.push(exp.clone());
            }
        }
        self
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = if !self.expected.is_empty() {
            let expected_str = if self.expected.len() == 1 {
                self.expected[0].clone()
            } else {
                let (last, rest) = self.expected.split_last().unwrap();
                format!("{} or {}", rest.join(", "), last)
            };
            match &self.found {
                Some(found) => format!("expected {}, found {}", expected_str, found),
                None => format!("expected {}", expected_str),
            }
        } else {
            self.message.clone()
        };

        if let Some(span) = &self.span {
            write!(f, "{}", span.to_string(&msg))
        } else {
            write!(f, "Parse error: {}", msg)
        }
    }
}

impl std::error::Error for ParseError {}

/// Result type for parse operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Parser state: token stream, position, and error tracking.
pub struct ParseState {
    tokens: Vec<Token>,
    index: usize,

    /// Error at the furthest position reached during parsing.
    ///
    /// In backtracking parsers the useful error is the one at the furthest
    /// point the parser could read before failing completely.
    furthest_error: Option<(usize, ParseError)>,

    /// All errors committed during parsing (for error recovery).
    collected_errors: Vec<ParseError>,
}

impl ParseState {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            index: 0,
            furthest_error: None,
            collected_errors: Vec::new(),
        }
    }

    /// Consume and return the next token.
    pub fn advance(&mut self) -> Option<Token> {
        if self.has_next() {
            let token = self.tokens[self.index].clone();
            self.index += 1;
            Some(token)
        } else {
            None
        }
    }

    /// Peek at the next token without consuming it.
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    pub fn has_next(&self) -> bool {
        self.index < self.tokens.len()
    }

    pub fn position(&self) -> usize {
        self.index
    }

    /// Restore the parser to a previous position (backtracking).
    pub fn restore(&mut self, position: usize) {
        self.index = position;
    }

    /// Record an error, keeping track of the furthest position reached.
    ///
    /// Errors at the same position are merged so alternatives report all
    /// their expectations at once.
    pub fn record_error(&mut self, error: ParseError) {
        match &self.furthest_error {
            Some((pos, _)) if *pos > self.index => {}
            Some((pos, existing)) if *pos == self.index => {
                let merged = existing.clone().merge_expected(&error);
                self.furthest_error = Some((self.index, merged));
            }
            _ => {
                self.furthest_error = Some((self.index, error));
            }
        }
    }

    pub fn get_furthest_error(&self) -> Option<&ParseError> {
        self.furthest_error.as_ref().map(|(_, e)| e)
    }

    /// Collect an error for later reporting (used during error recovery).
    pub fn collect_error(&mut self, error: ParseError) {
        self.collected_errors.push(error);
    }

    /// Take the furthest error and add it to the collected errors.
    pub fn commit_furthest_error(&mut self) {
        if let Some((_, err)) = self.furthest_error.take() {
            self.collected_errors.push(err);
        }
    }

    /// Take all collected errors, leaving the list empty.
    pub fn take_errors(&mut self) -> Vec<ParseError> {
        std::mem::take(&mut self.collected_errors)
    }
}

/// Generic parser trait; implemented for all closures of the right shape.
pub trait Parser<T>: Sized {
    fn parse(&self, state: &mut ParseState) -> ParseResult<T>;
}

impl<T, F: Fn(&mut ParseState) -> ParseResult<T>> Parser<T> for F {
    fn parse(&self, state: &mut ParseState) -> ParseResult<T> {
        self(state)
    }
}
