use std::fmt;

use serde::Serialize;

/// A zero-based `line:character` position in a text document.
///
/// `character` counts Unicode scalar values from the start of the line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub line: usize,
    pub character: usize,
}

impl Position {
    pub const fn new(line: usize, character: usize) -> Self {
        Self { line, character }
    }

    pub fn is_before(self, other: Position) -> bool {
        self < other
    }

    pub fn is_before_or_equal(self, other: Position) -> bool {
        self <= other
    }

    pub fn is_after(self, other: Position) -> bool {
        self > other
    }

    pub fn is_after_or_equal(self, other: Position) -> bool {
        self >= other
    }

    pub fn is_equal(self, other: Position) -> bool {
        self == other
    }

    /// Returns a position moved by the given deltas.
    #[must_use]
    pub fn translate(self, line_delta: usize, character_delta: usize) -> Self {
        Self::new(self.line + line_delta, self.character + character_delta)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.character)
    }
}

/// A half-open range `[start, end)` between two positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        debug_assert!(start <= end, "range start {start} is after end {end}");
        Self { start, end }
    }

    /// A range on a single line covering `[start_character, end_character)`.
    pub fn on_line(line: usize, start_character: usize, end_character: usize) -> Self {
        Self::new(
            Position::new(line, start_character),
            Position::new(line, end_character),
        )
    }

    /// Returns true if `pos` lies in `[start, end)`.
    pub fn contains(&self, pos: Position) -> bool {
        self.start <= pos && pos < self.end
    }

    /// Returns true if `other` lies entirely within this range.
    pub fn encloses(&self, other: &Range) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
