//! Sortle's pattern language.
//!
//! This is not a standard regex dialect. A pattern is a flat sequence of
//! elements: literal runs (where `.` matches any single character), `[...]`
//! groups, and at most one `(...)` capture group. A trailing `!` makes the
//! preceding element one-or-more and `@` makes it zero-or-one, both lazy; on
//! an ungrouped literal run the modifier binds to the last character only.
//! Groups do not nest.
//!
//! Matching is anchored at both ends: a pattern accepts a string only by
//! consuming it entirely.

mod compile;
mod matcher;

pub use compile::CompileError;

/// One compiled match element.
///
/// `optional` and `can_repeat` are mutually exclusive; an element with
/// neither matches its characters exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    chars: Vec<char>,
    capturing: bool,
    optional: bool,
    can_repeat: bool,
}

/// A compiled pattern, ready to match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    elements: Vec<Element>,
}

/// Try the pattern against each candidate in order, returning the first
/// match value (the capture, or the whole candidate when the pattern has no
/// capture group). No match anywhere yields the empty string.
pub fn search<'a, I>(pattern: &Pattern, candidates: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    for candidate in candidates {
        if let Some(found) = pattern.find(candidate) {
            return found;
        }
    }

    String::new()
}
