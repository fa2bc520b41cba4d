use serde::{Deserialize, Serialize};
use std::fmt;

/// Half-open `[start, end)` byte range into a text buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Range {
    pub start: usize,
    pub end: usize,
}

impl Range {
    /// Creates a range. Panics in debug builds when `start > end`.
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "inverted range {start}..{end}");
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains_range(&self, other: Range) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// True when the two ranges share at least one byte.
    pub fn overlaps(&self, other: Range) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// The common part of both ranges, or `None` when they share no byte.
    pub fn intersect(&self, other: Range) -> Option<Range> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start < end).then_some(Range { start, end })
    }

    /// Moves the range forward by `offset` bytes.
    pub fn shift(&self, offset: usize) -> Range {
        Range {
            start: self.start + offset,
            end: self.end + offset,
        }
    }

    pub fn as_std(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

impl From<std::ops::Range<usize>> for Range {
    fn from(r: std::ops::Range<usize>) -> Self {
        Range::new(r.start, r.end)
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// A byte offset with its zero-based line and byte column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Position {
    /// Human-facing `line:column`, both one-based.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

/// Line start table for translating byte offsets into positions.
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<usize>,
    len: usize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            text.bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self {
            line_starts,
            len: text.len(),
        }
    }

    /// Position of `offset`; offsets past the end clamp to the end.
    pub fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.len);
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        Position {
            offset,
            line,
            column: offset - self.line_starts[line],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersect_returns_common_part() {
        let a = Range::new(2, 10);
        assert_eq!(a.intersect(Range::new(5, 20)), Some(Range::new(5, 10)));
        assert_eq!(a.intersect(Range::new(10, 20)), None);
        assert_eq!(a.intersect(Range::new(0, 2)), None);
    }

    #[test]
    fn overlaps_is_exclusive_at_the_edges() {
        let a = Range::new(2, 5);
        assert!(a.overlaps(Range::new(4, 8)));
        assert!(!a.overlaps(Range::new(5, 8)));
        assert!(!a.overlaps(Range::new(0, 2)));
    }

    #[test]
    fn shift_keeps_length() {
        let r = Range::new(3, 7).shift(10);
        assert_eq!(r, Range::new(13, 17));
        assert_eq!(r.len(), 4);
    }

    #[test]
    fn line_index_maps_offsets() {
        let idx = LineIndex::new("ab\ncd\n\nef");
        assert_eq!(
            idx.position(0),
            Position {
                offset: 0,
                line: 0,
                column: 0
            }
        );
        assert_eq!(idx.position(4).line, 1);
        assert_eq!(idx.position(4).column, 1);
        assert_eq!(idx.position(6).line, 2);
        assert_eq!(idx.position(7).line, 3);
        assert_eq!(idx.position(100).offset, 9);
    }

    #[test]
    fn position_display_is_one_based() {
        let idx = LineIndex::new("x\n  y");
        assert_eq!(idx.position(4).to_string(), "2:3");
    }
}
