//! The located word value.
//!
//! A [`Word`] is produced by [`WordLocator`](super::WordLocator) when a tap
//! resolves to a word-granularity span of the displayed text. It is an
//! immutable snapshot: its bounding rect is only valid for the layout and
//! scroll position at resolution time.

use kurbo::Rect;
use serde::{Deserialize, Serialize};

/// A character range into the source text (`offset`, `length`), counted in
/// Unicode scalar values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TextRange {
    /// Index of the first character
    pub offset: usize,
    /// Number of characters in the range
    pub length: usize,
}

impl TextRange {
    /// Create a new range
    pub fn new(offset: usize, length: usize) -> Self {
        Self { offset, length }
    }

    /// Create a range from a start/end pair (end exclusive)
    pub fn from_bounds(start: usize, end: usize) -> Self {
        Self {
            offset: start,
            length: end.saturating_sub(start),
        }
    }

    /// Exclusive end offset
    pub fn end(&self) -> usize {
        self.offset + self.length
    }

    /// Whether the range spans no characters
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Whether `offset` falls inside the range
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.offset && offset < self.end()
    }

    /// The range as a std range
    pub fn as_range(&self) -> std::ops::Range<usize> {
        self.offset..self.end()
    }
}

/// A word resolved from a tap on the text surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    text: String,
    range: TextRange,
    bounding_rect: Rect,
}

impl Word {
    /// Create a new word value
    pub fn new(text: impl Into<String>, range: TextRange, bounding_rect: Rect) -> Self {
        Self {
            text: text.into(),
            range,
            bounding_rect,
        }
    }

    /// The word's text exactly as displayed (no case folding)
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Character range of the word in the source text
    pub fn range(&self) -> TextRange {
        self.range
    }

    /// Bounding rect in text-surface coordinates at resolution time
    pub fn bounding_rect(&self) -> Rect {
        self.bounding_rect
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_range_bounds() {
        let range = TextRange::from_bounds(6, 11);
        assert_eq!(range, TextRange::new(6, 5));
        assert_eq!(range.end(), 11);
        assert_eq!(range.as_range(), 6..11);
    }

    #[test]
    fn test_text_range_contains() {
        let range = TextRange::new(6, 5);
        assert!(!range.contains(5));
        assert!(range.contains(6));
        assert!(range.contains(10));
        assert!(!range.contains(11));
    }

    #[test]
    fn test_text_range_from_inverted_bounds_is_empty() {
        let range = TextRange::from_bounds(8, 3);
        assert!(range.is_empty());
    }

    #[test]
    fn test_word_accessors() {
        let rect = Rect::new(10.0, 20.0, 60.0, 40.0);
        let word = Word::new("lamet", TextRange::new(12, 5), rect);
        assert_eq!(word.text(), "lamet");
        assert_eq!(word.range(), TextRange::new(12, 5));
        assert_eq!(word.bounding_rect(), rect);
    }
}
