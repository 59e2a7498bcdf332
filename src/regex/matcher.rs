//! Anchored matcher with lazy backtracking.
//!
//! Quantified elements try the fewest repetitions first and grow only when
//! the rest of the pattern cannot match; growth stops as soon as the element
//! itself no longer matches at the next repetition. Because patterns are
//! anchored at both ends, a match must consume the entire target.

use super::{Element, Pattern};

/// Scalar range of the capturing element on the successful path, if any.
type Capture = Option<(usize, usize)>;

impl Pattern {
    /// Match against the whole target string.
    ///
    /// Returns the capture group's content, or the full target when the
    /// pattern has no capture group; `None` when the pattern does not match.
    pub fn find(&self, target: &str) -> Option<String> {
        let chars: Vec<char> = target.chars().collect();

        match_rest(&self.elements, &chars, 0).map(|capture| match capture {
            Some((start, end)) => chars[start..end].iter().collect(),
            None => target.to_string(),
        })
    }
}

fn match_rest(elements: &[Element], target: &[char], pos: usize) -> Option<Capture> {
    let Some((element, rest)) = elements.split_first() else {
        // All elements consumed: anchored, so the target must be too
        return (pos == target.len()).then_some(None);
    };

    if element.optional {
        // Lazy: zero repetitions first
        if let Some(capture) = match_rest(rest, target, pos) {
            return Some(promote(element, pos, pos, capture));
        }
        if matches_at(element, target, pos) {
            let end = pos + element.chars.len();
            if let Some(capture) = match_rest(rest, target, end) {
                return Some(promote(element, pos, end, capture));
            }
        }
        None
    } else if element.can_repeat {
        if element.chars.is_empty() {
            // Zero-width repetitions cannot make progress
            return match_rest(rest, target, pos).map(|c| promote(element, pos, pos, c));
        }

        // Lazy one-or-more: start at a single repetition and grow
        let mut end = pos;
        loop {
            if !matches_at(element, target, end) {
                return None;
            }
            end += element.chars.len();
            if let Some(capture) = match_rest(rest, target, end) {
                return Some(promote(element, pos, end, capture));
            }
        }
    } else {
        if !matches_at(element, target, pos) {
            return None;
        }
        let end = pos + element.chars.len();
        match_rest(rest, target, end).map(|capture| promote(element, pos, end, capture))
    }
}

/// Does one repetition of the element match at `pos`?
fn matches_at(element: &Element, target: &[char], pos: usize) -> bool {
    pos + element.chars.len() <= target.len()
        && element
            .chars
            .iter()
            .zip(&target[pos..])
            .all(|(p, c)| *p == '.' || p == c)
}

fn promote(element: &Element, start: usize, end: usize, tail: Capture) -> Capture {
    if element.capturing {
        Some((start, end))
    } else {
        tail
    }
}
