//! Mapping between terminal cells and content coordinates.
//!
//! The session layer works in continuous content units. The terminal demo
//! gives every cell a fixed size in those units so that the interaction
//! thresholds (flick velocity, scroll distance, panel inset) keep their
//! meaning on a character grid.

use kurbo::{Point, Rect, Size};
use ratatui::layout::Rect as CellRect;

/// Content units per terminal cell (width, height)
pub const CELL_SIZE: Size = Size::new(8.0, 16.0);

/// Converts between a screen area (cells) and the scrolled content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    /// Screen area the content is drawn into
    pub area: CellRect,
    /// Content units per cell
    pub cell: Size,
    /// Vertical scroll offset in content units
    pub scroll_offset: f64,
}

impl CellMetrics {
    pub fn new(area: CellRect, scroll_offset: f64) -> Self {
        Self {
            area,
            cell: CELL_SIZE,
            scroll_offset,
        }
    }

    /// Size of the visible area in content units.
    pub fn viewport(&self) -> Size {
        Size::new(
            f64::from(self.area.width) * self.cell.width,
            f64::from(self.area.height) * self.cell.height,
        )
    }

    /// Whether the screen cell lies inside the area.
    pub fn contains_cell(&self, column: u16, row: u16) -> bool {
        column >= self.area.x
            && column < self.area.right()
            && row >= self.area.y
            && row < self.area.bottom()
    }

    /// First content line (in cells) visible at the top of the area.
    pub fn first_visible_row(&self) -> usize {
        (self.scroll_offset / self.cell.height).floor().max(0.0) as usize
    }

    /// Content point at the centre of a screen cell, or `None` for cells
    /// outside the area (the frame border, the footer).
    pub fn to_content(&self, column: u16, row: u16) -> Option<Point> {
        self.contains_cell(column, row)
            .then(|| self.to_content_unclipped(column, row))
    }

    /// Like [`to_content`](Self::to_content), but cells outside the area map
    /// to points outside the visible content. Used to follow a drag that
    /// leaves the area.
    pub fn to_content_unclipped(&self, column: u16, row: u16) -> Point {
        let x = f64::from(column) - f64::from(self.area.x) + 0.5;
        let y = f64::from(row) - f64::from(self.area.y) + 0.5;
        Point::new(
            x * self.cell.width,
            y * self.cell.height + self.scroll_offset,
        )
    }

    /// Screen cells covering a content rectangle, clipped to the area.
    ///
    /// Returns `None` when nothing of the rectangle is visible.
    pub fn to_screen(&self, rect: Rect) -> Option<CellRect> {
        let top = rect.y0 - self.scroll_offset;
        let bottom = rect.y1 - self.scroll_offset;

        let x0 = (rect.x0 / self.cell.width).round().max(0.0);
        let x1 = (rect.x1 / self.cell.width).round().min(f64::from(self.area.width));
        let y0 = (top / self.cell.height).round().max(0.0);
        let y1 = (bottom / self.cell.height).round().min(f64::from(self.area.height));
        if x1 <= x0 || y1 <= y0 {
            return None;
        }

        Some(CellRect::new(
            self.area.x + x0 as u16,
            self.area.y + y0 as u16,
            (x1 - x0) as u16,
            (y1 - y0) as u16,
        ))
    }
}
