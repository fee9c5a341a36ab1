//! Source locations and spans.
//!
//! Locations are 1-based `(row, column)` pairs counted in Unicode scalar values
//!     over the newline-normalized input.
//! A [Span] runs from the first character of a token (inclusive)
//!     to the position just after its last character (exclusive).

/// A position in the source, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    row: usize,
    column: usize,
}

impl Default for Location {
    fn default() -> Self {
        Location { row: 1, column: 1 }
    }
}

impl Location {
    /// Create a location.
    ///
    /// Panics if either coordinate is zero.
    pub fn new(row: usize, column: usize) -> Location {
        assert!(row > 0 && column > 0, "locations are 1-based");
        Location { row, column }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub(crate) fn advance_column(&mut self) {
        self.column += 1;
    }

    pub(crate) fn advance_line(&mut self) {
        self.row += 1;
        self.column = 1;
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.row, self.column)
    }
}

/// Half-open range of source locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub start: Location,
    pub end: Location,
}

impl Span {
    pub fn new(start: Location, end: Location) -> Span {
        Span { start, end }
    }

    /// Whether the span starts and ends on the same row.
    pub fn is_single_line(&self) -> bool {
        self.start.row == self.end.row
    }
}
