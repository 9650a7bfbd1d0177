//! Tap-to-word resolution.
//!
//! Turns a point on the text surface into a [`Word`]: the smallest
//! word-granularity span (Unicode word boundaries, UAX #29) enclosing the
//! point, with its on-screen rectangle at the current layout.
//!
//! Boundary convention: a point exactly on the edge between a word and the
//! character after it resolves to the word on the start side.

use kurbo::Point;
use thiserror::Error;
use unicode_segmentation::UnicodeSegmentation;

use super::layout::TextLayout;
use super::word::{TextRange, Word};

/// Why a tap did not produce a word.
///
/// These are never shown to the user; a failed resolution is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ResolutionFailure {
    /// The point is not over any rendered line of text
    #[error("point is outside the rendered text")]
    OutsideText,
    /// The point is over text, but not over a word (whitespace, punctuation)
    #[error("no word encloses the point")]
    NoEnclosingWord,
}

/// Resolves taps on a text layout into words.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordLocator;

impl WordLocator {
    /// Create a new locator
    pub fn new() -> Self {
        Self
    }

    /// Locate the word under `point`, or `None` if there isn't one.
    pub fn locate<L: TextLayout + ?Sized>(&self, point: Point, layout: &L) -> Option<Word> {
        match self.resolve(point, layout) {
            Ok(word) => Some(word),
            Err(reason) => {
                tracing::trace!("No word at ({:.1}, {:.1}): {}", point.x, point.y, reason);
                None
            }
        }
    }

    /// Locate the word under `point`, reporting why resolution failed.
    pub fn resolve<L: TextLayout + ?Sized>(
        &self,
        point: Point,
        layout: &L,
    ) -> Result<Word, ResolutionFailure> {
        let hit = layout
            .hit_test(point)
            .ok_or(ResolutionFailure::OutsideText)?;
        let text = layout.text();

        // A point on a leading edge belongs to the word that ends there, if any.
        let backward = if hit.at_leading_edge && hit.offset > 0 {
            word_containing(text, hit.offset - 1)
        } else {
            None
        };

        // Past the end of a line the next character is drawn on another row.
        let forward = || {
            if hit.at_line_end {
                None
            } else {
                word_containing(text, hit.offset)
            }
        };

        let (range, word_text) = backward
            .or_else(forward)
            .ok_or(ResolutionFailure::NoEnclosingWord)?;

        let rect = layout
            .first_rect_for_range(range)
            .ok_or(ResolutionFailure::OutsideText)?;

        Ok(Word::new(word_text, range, rect))
    }
}

/// Find the word segment that contains the character at `char_offset`.
fn word_containing(text: &str, char_offset: usize) -> Option<(TextRange, &str)> {
    let mut chars_before = 0usize;
    for segment in text.split_word_bounds() {
        let len = segment.chars().count();
        let range = TextRange::new(chars_before, len);
        if range.contains(char_offset) {
            return is_word(segment).then_some((range, segment));
        }
        if chars_before > char_offset {
            break;
        }
        chars_before += len;
    }
    None
}

/// A segment counts as a word when it carries at least one letter or digit.
fn is_word(segment: &str) -> bool {
    segment.chars().any(char::is_alphanumeric)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::MonospaceLayout;
    use kurbo::{Rect, Size};

    const TEXT: &str = "Lorem ipsum dolor sit amet, lamet consectetur.";

    fn layout() -> MonospaceLayout {
        MonospaceLayout::with_cell_size(TEXT, 80, Size::new(10.0, 20.0))
    }

    #[test]
    fn test_locate_word_in_middle() {
        let word = WordLocator::new()
            .locate(Point::new(85.0, 10.0), &layout())
            .unwrap();
        assert_eq!(word.text(), "ipsum");
        assert_eq!(word.range(), TextRange::new(6, 5));
        assert_eq!(word.bounding_rect(), Rect::new(60.0, 0.0, 110.0, 20.0));
    }

    #[test]
    fn test_every_glyph_of_a_word_resolves_to_it() {
        let layout = layout();
        let locator = WordLocator::new();
        // "lamet" occupies characters 28..33
        for index in 28..33 {
            let x = index as f64 * 10.0 + 3.0;
            let word = locator.locate(Point::new(x, 10.0), &layout).unwrap();
            assert_eq!(word.text(), "lamet", "glyph {index}");
            assert_eq!(word.range(), TextRange::new(28, 5));
        }
    }

    #[test]
    fn test_boundary_resolves_to_start_side() {
        // x = 50 is the edge between "Lorem" and the following space
        let word = WordLocator::new()
            .locate(Point::new(50.0, 10.0), &layout())
            .unwrap();
        assert_eq!(word.text(), "Lorem");
    }

    #[test]
    fn test_boundary_after_space_resolves_to_following_word() {
        // x = 60 is the edge between the space and "ipsum"; the start side is
        // whitespace, so the word that begins there wins
        let word = WordLocator::new()
            .locate(Point::new(60.0, 10.0), &layout())
            .unwrap();
        assert_eq!(word.text(), "ipsum");
    }

    #[test]
    fn test_whitespace_hit_is_no_enclosing_word() {
        let result = WordLocator::new().resolve(Point::new(55.0, 10.0), &layout());
        assert_eq!(result, Err(ResolutionFailure::NoEnclosingWord));
    }

    #[test]
    fn test_punctuation_hit_is_no_enclosing_word() {
        // the comma after "amet"
        let result = WordLocator::new().resolve(Point::new(265.0, 10.0), &layout());
        assert_eq!(result, Err(ResolutionFailure::NoEnclosingWord));
    }

    #[test]
    fn test_outside_text() {
        let locator = WordLocator::new();
        assert_eq!(
            locator.resolve(Point::new(10.0, 30.0), &layout()),
            Err(ResolutionFailure::OutsideText)
        );
        assert!(locator.locate(Point::new(900.0, 10.0), &layout()).is_none());
    }

    #[test]
    fn test_whitespace_only_text() {
        let layout = MonospaceLayout::new("     ", 80);
        assert_eq!(
            WordLocator::new().resolve(Point::new(2.5, 0.5), &layout),
            Err(ResolutionFailure::NoEnclosingWord)
        );
    }

    #[test]
    fn test_word_on_wrapped_line() {
        let layout = MonospaceLayout::with_cell_size(TEXT, 12, Size::new(10.0, 20.0));
        // second line starts with "dolor"
        let word = WordLocator::new()
            .locate(Point::new(15.0, 25.0), &layout)
            .unwrap();
        assert_eq!(word.text(), "dolor");
        assert_eq!(word.range(), TextRange::new(12, 5));
        assert_eq!(word.bounding_rect(), Rect::new(0.0, 20.0, 50.0, 40.0));
    }

    #[test]
    fn test_right_edge_of_wrapped_line_stays_on_its_row() {
        let layout = MonospaceLayout::with_cell_size("Lorem ipsum dolor", 12, Size::new(10.0, 20.0));
        // row 0 is "Lorem ipsum " and ends in a space; "dolor" is drawn on row 1
        assert_eq!(
            WordLocator::new().resolve(Point::new(120.0, 10.0), &layout),
            Err(ResolutionFailure::NoEnclosingWord)
        );
    }

    #[test]
    fn test_right_edge_of_split_word_resolves_backward() {
        let layout = MonospaceLayout::with_cell_size("abcdefghij", 4, Size::new(10.0, 20.0));
        let word = WordLocator::new()
            .locate(Point::new(40.0, 10.0), &layout)
            .unwrap();
        assert_eq!(word.text(), "abcdefghij");
        assert_eq!(word.bounding_rect(), Rect::new(0.0, 0.0, 40.0, 20.0));
    }

    #[test]
    fn test_apostrophe_word_kept_whole() {
        let layout = MonospaceLayout::new("don't stop", 80);
        let word = WordLocator::new().locate(Point::new(3.5, 0.5), &layout).unwrap();
        assert_eq!(word.text(), "don't");
    }

    #[test]
    fn test_case_preserved() {
        let layout = MonospaceLayout::new("Lamet", 80);
        let word = WordLocator::new().locate(Point::new(0.5, 0.5), &layout).unwrap();
        assert_eq!(word.text(), "Lamet");
    }
}
