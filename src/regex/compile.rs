//! Pattern compiler.

use std::fmt;

use super::{Element, Pattern};

/// Invalid pattern text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// A `[` or `(` group was never closed; carries the opening delimiter.
    UnclosedGroup(char),
    /// A group was opened inside another group.
    NestedGroup,
    /// More than one `(...)` capture group in the pattern.
    MultipleCaptures,
    /// A `]` or `)` with no matching opener.
    UnmatchedClose(char),
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::UnclosedGroup(delim) => write!(f, "unclosed '{}' group", delim),
            CompileError::NestedGroup => write!(f, "cannot nest groups"),
            CompileError::MultipleCaptures => write!(f, "cannot use multiple () groups"),
            CompileError::UnmatchedClose(delim) => write!(f, "unmatched '{}'", delim),
        }
    }
}

impl std::error::Error for CompileError {}

/// An open group while compiling: its closing delimiter and whether it
/// captures.
struct OpenGroup {
    closer: char,
    capturing: bool,
    chars: Vec<char>,
}

struct Compiler {
    elements: Vec<Element>,
    /// Pending run of literal characters not yet emitted.
    literal: Vec<char>,
    group: Option<OpenGroup>,
    seen_capture: bool,
    /// Whether the most recently emitted element may still take a modifier.
    /// Only a just-closed group qualifies; literal runs are handled by
    /// splitting, and an element that already has a modifier takes no more.
    modifiable: bool,
}

impl Compiler {
    fn new() -> Self {
        Self {
            elements: Vec::new(),
            literal: Vec::new(),
            group: None,
            seen_capture: false,
            modifiable: false,
        }
    }

    fn flush_literal(&mut self) {
        if !self.literal.is_empty() {
            self.elements.push(Element {
                chars: std::mem::take(&mut self.literal),
                capturing: false,
                optional: false,
                can_repeat: false,
            });
        }
        self.modifiable = false;
    }

    fn open_group(&mut self, delim: char) -> Result<(), CompileError> {
        if self.group.is_some() {
            return Err(CompileError::NestedGroup);
        }

        let capturing = delim == '(';
        if capturing {
            if self.seen_capture {
                return Err(CompileError::MultipleCaptures);
            }
            self.seen_capture = true;
        }

        self.flush_literal();
        self.group = Some(OpenGroup {
            closer: if capturing { ')' } else { ']' },
            capturing,
            chars: Vec::new(),
        });
        Ok(())
    }

    fn close_group(&mut self) {
        let group = self.group.take().expect("close_group requires an open group");
        self.elements.push(Element {
            chars: group.chars,
            capturing: group.capturing,
            optional: false,
            can_repeat: false,
        });
        self.modifiable = true;
    }

    /// Apply `!` or `@` to the preceding element.
    ///
    /// A modifier after a literal run binds to the run's last character
    /// only: the head is emitted as a fixed element first. A modifier with
    /// nothing before it (or after an element that already has one) is
    /// silently dropped.
    fn apply_modifier(&mut self, modifier: char) {
        let optional = modifier == '@';

        if let Some(last) = self.literal.pop() {
            self.flush_literal();
            self.elements.push(Element {
                chars: vec![last],
                capturing: false,
                optional,
                can_repeat: !optional,
            });
        } else if self.modifiable {
            let element = self
                .elements
                .last_mut()
                .expect("modifiable implies an emitted element");
            element.optional = optional;
            element.can_repeat = !optional;
            self.modifiable = false;
        }
    }

    /// Handle one character while inside a group.
    fn group_char(&mut self, c: char) -> Result<(), CompileError> {
        let group = self
            .group
            .as_mut()
            .expect("group_char requires an open group");

        if c == group.closer {
            self.close_group();
        } else if c == '[' || c == '(' {
            return Err(CompileError::NestedGroup);
        } else {
            // The other closer kind is an ordinary character here
            group.chars.push(c);
        }
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<Element>, CompileError> {
        if let Some(group) = &self.group {
            let opener = if group.capturing { '(' } else { '[' };
            return Err(CompileError::UnclosedGroup(opener));
        }
        self.flush_literal();
        Ok(self.elements)
    }
}

impl Pattern {
    /// Compile pattern text into a sequence of match elements.
    pub fn compile(pattern: &str) -> Result<Self, CompileError> {
        let mut compiler = Compiler::new();

        for c in pattern.chars() {
            if compiler.group.is_some() {
                compiler.group_char(c)?;
                continue;
            }

            match c {
                '[' | '(' => compiler.open_group(c)?,
                ']' | ')' => return Err(CompileError::UnmatchedClose(c)),
                '!' | '@' => compiler.apply_modifier(c),
                _ => compiler.literal.push(c),
            }
        }

        let elements = compiler.finish()?;
        Ok(Pattern { elements })
    }
}
