//! Text layout abstraction and a monospace cell-grid implementation.
//!
//! The locator only needs two things from whatever surface displays the
//! text: a way to turn a point into a character hit, and a way to turn a
//! character range back into a rectangle. Both are expressed in the
//! surface's content coordinates (scrolling moves the viewport over the
//! content, it does not move the content).

use kurbo::{Point, Rect, Size};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

use super::word::TextRange;

/// Result of hit-testing a point against laid-out text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextHit {
    /// Character index whose glyph box contains the point. When the point
    /// sits exactly on the end of a line this is the line's end offset.
    pub offset: usize,
    /// True when the point lies exactly on the glyph's leading edge (the
    /// boundary shared with the previous character)
    pub at_leading_edge: bool,
    /// True when the point lies on the trailing edge of its line; `offset`
    /// then belongs to the next visual line, if any
    pub at_line_end: bool,
}

/// What the word locator needs from a text surface.
pub trait TextLayout {
    /// The full displayed text
    fn text(&self) -> &str;

    /// Hit-test a point in content coordinates.
    ///
    /// Returns `None` when the point is outside every rendered line.
    fn hit_test(&self, point: Point) -> Option<TextHit>;

    /// Rectangle of the first line fragment covered by `range`.
    fn first_rect_for_range(&self, range: TextRange) -> Option<Rect>;
}

/// One visual line of wrapped text.
#[derive(Debug, Clone)]
struct LineFragment {
    /// First character index
    start: usize,
    /// Exclusive end character index (a trailing newline is not included)
    end: usize,
    /// Column offsets: `columns[i]` is the x (in cells) where char `start + i`
    /// begins, with one extra trailing entry for the line width
    columns: Vec<usize>,
}

impl LineFragment {
    fn width(&self) -> usize {
        self.columns.last().copied().unwrap_or(0)
    }
}

/// Wrapped text laid out on a fixed-size cell grid.
///
/// Each character occupies `UnicodeWidthChar::width` cells (wide CJK glyphs
/// take two). Lines wrap at word boundaries; a single word longer than the
/// wrap width is split between characters.
#[derive(Debug, Clone)]
pub struct MonospaceLayout {
    text: String,
    /// Byte offset of every char, plus `text.len()` at the end
    byte_offsets: Vec<usize>,
    lines: Vec<LineFragment>,
    wrap_columns: usize,
    cell: Size,
    origin: Point,
}

impl MonospaceLayout {
    /// Lay out `text` wrapped at `wrap_columns` cells, with one unit per cell
    pub fn new(text: impl Into<String>, wrap_columns: usize) -> Self {
        Self::with_cell_size(text, wrap_columns, Size::new(1.0, 1.0))
    }

    /// Lay out with an explicit cell size (width, line height)
    pub fn with_cell_size(text: impl Into<String>, wrap_columns: usize, cell: Size) -> Self {
        let text = text.into();
        let mut byte_offsets: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        byte_offsets.push(text.len());

        let mut layout = Self {
            text,
            byte_offsets,
            lines: Vec::new(),
            wrap_columns: wrap_columns.max(1),
            cell,
            origin: Point::ZERO,
        };
        layout.lines = layout.wrap();
        layout
    }

    /// Offset the whole layout inside its surface (text insets)
    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    /// Re-wrap for a new width (e.g. after a terminal resize)
    pub fn relayout(&mut self, wrap_columns: usize) {
        self.wrap_columns = wrap_columns.max(1);
        self.lines = self.wrap();
    }

    /// Number of visual lines
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total number of characters
    pub fn char_count(&self) -> usize {
        self.byte_offsets.len() - 1
    }

    /// Text of a visual line
    pub fn line_text(&self, line: usize) -> Option<&str> {
        self.lines.get(line).map(|l| self.slice(l.start, l.end))
    }

    /// Character range of a visual line
    pub fn line_range(&self, line: usize) -> Option<TextRange> {
        self.lines
            .get(line)
            .map(|l| TextRange::from_bounds(l.start, l.end))
    }

    /// Cell size used for the layout
    pub fn cell_size(&self) -> Size {
        self.cell
    }

    /// Height of all content
    pub fn content_height(&self) -> f64 {
        self.lines.len() as f64 * self.cell.height
    }

    /// Wrap width in cells
    pub fn wrap_columns(&self) -> usize {
        self.wrap_columns
    }

    fn slice(&self, start: usize, end: usize) -> &str {
        &self.text[self.byte_offsets[start]..self.byte_offsets[end]]
    }

    fn wrap(&self) -> Vec<LineFragment> {
        let mut lines = Vec::new();
        let mut char_index = 0usize;

        for paragraph in self.text.split('\n') {
            let mut current = LineFragment {
                start: char_index,
                end: char_index,
                columns: vec![0],
            };

            for segment in paragraph.split_word_bounds() {
                let widths: Vec<usize> = segment
                    .chars()
                    .map(|c| UnicodeWidthChar::width(c).unwrap_or(0))
                    .collect();
                let segment_width: usize = widths.iter().sum();
                let is_blank = segment.chars().all(char::is_whitespace);

                // Whitespace may hang past the wrap edge; words move down.
                if !is_blank
                    && current.width() > 0
                    && current.width() + segment_width > self.wrap_columns
                {
                    let next_start = current.end;
                    lines.push(std::mem::replace(
                        &mut current,
                        LineFragment {
                            start: next_start,
                            end: next_start,
                            columns: vec![0],
                        },
                    ));
                }

                for width in widths {
                    if !is_blank && current.width() > 0 && current.width() + width > self.wrap_columns
                    {
                        let next_start = current.end;
                        lines.push(std::mem::replace(
                            &mut current,
                            LineFragment {
                                start: next_start,
                                end: next_start,
                                columns: vec![0],
                            },
                        ));
                    }
                    let x = current.width() + width;
                    current.columns.push(x);
                    current.end += 1;
                }
            }

            char_index = current.end + 1; // skip the newline
            lines.push(current);
        }

        lines
    }

    fn line_for_offset(&self, offset: usize) -> Option<(usize, &LineFragment)> {
        self.lines
            .iter()
            .enumerate()
            .find(|(_, line)| offset >= line.start && offset < line.end)
    }
}

impl TextLayout for MonospaceLayout {
    fn text(&self) -> &str {
        &self.text
    }

    fn hit_test(&self, point: Point) -> Option<TextHit> {
        let local_y = point.y - self.origin.y;
        let local_x = point.x - self.origin.x;
        if local_y < 0.0 || local_x < 0.0 {
            return None;
        }

        let row = (local_y / self.cell.height).floor() as usize;
        let line = self.lines.get(row)?;
        if line.start == line.end {
            return None;
        }

        let column = local_x / self.cell.width;
        let width = line.width() as f64;
        if column > width {
            return None;
        }
        if column == width {
            return Some(TextHit {
                offset: line.end,
                at_leading_edge: true,
                at_line_end: true,
            });
        }

        // columns is non-decreasing; find the glyph whose [x0, x1) holds the point
        let index = line
            .columns
            .windows(2)
            .position(|pair| column >= pair[0] as f64 && column < pair[1] as f64)?;
        Some(TextHit {
            offset: line.start + index,
            at_leading_edge: column == line.columns[index] as f64,
            at_line_end: false,
        })
    }

    fn first_rect_for_range(&self, range: TextRange) -> Option<Rect> {
        if range.is_empty() {
            return None;
        }
        let (row, line) = self.line_for_offset(range.offset)?;
        let first = range.offset - line.start;
        let last = range.end().min(line.end) - line.start;

        let x0 = self.origin.x + line.columns[first] as f64 * self.cell.width;
        let x1 = self.origin.x + line.columns[last] as f64 * self.cell.width;
        let y0 = self.origin.y + row as f64 * self.cell.height;
        Some(Rect::new(x0, y0, x1, y0 + self.cell.height))
    }
}
