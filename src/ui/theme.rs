//! Color theme constants.

use ratatui::style::Color;

/// Border color for the text frame and the panel
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Accent color for titles and the focused word
pub const COLOR_ACCENT: Color = Color::White;

/// Dim text for hints and secondary information
pub const COLOR_DIM: Color = Color::DarkGray;

/// Highlight bubble background
pub const COLOR_BUBBLE_BG: Color = Color::Rgb(60, 60, 80);

/// Highlight bubble background while hovered
pub const COLOR_BUBBLE_HOVER_BG: Color = Color::Rgb(80, 80, 120);

/// Detail panel background
pub const COLOR_PANEL_BG: Color = Color::Rgb(10, 15, 35);

/// Part-of-speech headings
pub const COLOR_PART_OF_SPEECH: Color = Color::Cyan;

/// Loading indicators
pub const COLOR_LOADING: Color = Color::Gray;

/// Failed enrichment
pub const COLOR_ERROR: Color = Color::Red;

/// Close button while hovered
pub const COLOR_CLOSE_HOVER: Color = Color::LightRed;
