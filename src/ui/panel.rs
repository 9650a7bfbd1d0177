//! Detail panel widget: meanings on top, the current image below.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

use super::theme::{
    COLOR_ACCENT, COLOR_BORDER, COLOR_CLOSE_HOVER, COLOR_DIM, COLOR_ERROR, COLOR_LOADING,
    COLOR_PANEL_BG, COLOR_PART_OF_SPEECH,
};
use crate::gesture::HitTarget;
use crate::session::{ContentState, RequestKind, SessionPhase, WordSession};

const CLOSE_LABEL: &str = "[x]";

/// The panel for an expanded session.
pub struct DetailPanel<'a> {
    session: &'a WordSession,
    /// Screen cells of the image section
    image_area: Option<Rect>,
    hovered: Option<HitTarget>,
}

impl<'a> DetailPanel<'a> {
    pub fn new(session: &'a WordSession) -> Self {
        Self {
            session,
            image_area: None,
            hovered: None,
        }
    }

    pub fn image_area(mut self, area: Option<Rect>) -> Self {
        self.image_area = area;
        self
    }

    pub fn hovered(mut self, target: Option<HitTarget>) -> Self {
        self.hovered = target;
        self
    }
}

impl Widget for DetailPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 2 || area.height < 2 {
            return;
        }
        Clear.render(area, buf);
        buf.set_style(area, Style::default().bg(COLOR_PANEL_BG));

        let block = Block::default()
            .title(Span::styled(
                format!(" {} ", self.session.word().text()),
                Style::default()
                    .fg(COLOR_ACCENT)
                    .add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(COLOR_BORDER));
        let inner = block.inner(area);
        block.render(area, buf);

        // content only once the panel has settled into place
        if self.session.phase() != SessionPhase::Detail || inner.is_empty() {
            return;
        }

        let close_style = if self.hovered == Some(HitTarget::CloseButton) {
            Style::default()
                .fg(COLOR_CLOSE_HOVER)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(COLOR_DIM)
        };
        if usize::from(area.width) > CLOSE_LABEL.len() + 2 {
            let x = area.right() - CLOSE_LABEL.len() as u16 - 1;
            buf.set_string(x, area.y, CLOSE_LABEL, close_style);
        }

        let image = self
            .image_area
            .map(|image| image.intersection(inner))
            .filter(|image| !image.is_empty() && image.height < inner.height);
        let body = match image {
            Some(image) => Rect {
                height: image.y.saturating_sub(inner.y),
                ..inner
            },
            None => inner,
        };

        Paragraph::new(meaning_lines(self.session))
            .wrap(Wrap { trim: true })
            .render(body, buf);

        if let Some(image) = image {
            let highlighted = self.hovered == Some(HitTarget::Image);
            Paragraph::new(image_lines(self.session, image.width, highlighted))
                .wrap(Wrap { trim: true })
                .render(image, buf);
        }
    }
}

fn status_line(text: &str, color: Color) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(color).add_modifier(Modifier::ITALIC),
    ))
}

/// Meanings in arrival order, definitions numbered per part of speech.
pub fn meaning_lines(session: &WordSession) -> Vec<Line<'static>> {
    match session.meanings_state() {
        ContentState::Idle | ContentState::Loading if session.meanings().is_empty() => {
            return vec![status_line("Looking up…", COLOR_LOADING)];
        }
        ContentState::Failed => return vec![status_line("No definition found", COLOR_ERROR)],
        ContentState::Loaded if session.meanings().is_empty() => {
            return vec![status_line("No definition found", COLOR_DIM)];
        }
        _ => {}
    }

    let mut lines = Vec::new();
    for meaning in session.meanings() {
        lines.push(Line::from(Span::styled(
            meaning.part_of_speech.clone(),
            Style::default()
                .fg(COLOR_PART_OF_SPEECH)
                .add_modifier(Modifier::BOLD),
        )));
        for (index, definition) in meaning.definitions.iter().enumerate() {
            lines.push(Line::from(format!("{}. {}", index + 1, definition.text)));
            if let Some(example) = &definition.example {
                lines.push(Line::from(Span::styled(
                    format!("   \"{example}\""),
                    Style::default().fg(COLOR_DIM).add_modifier(Modifier::ITALIC),
                )));
            }
        }
        lines.push(Line::default());
    }
    lines
}

/// Image section: separator, status and the current image's details.
pub fn image_lines(session: &WordSession, width: u16, highlighted: bool) -> Vec<Line<'static>> {
    let separator_style = if highlighted {
        Style::default().fg(COLOR_ACCENT)
    } else {
        Style::default().fg(COLOR_BORDER)
    };
    let mut lines = vec![Line::from(Span::styled(
        "─".repeat(usize::from(width)),
        separator_style,
    ))];

    match session.images_state() {
        ContentState::Idle | ContentState::Loading => {
            lines.push(status_line("Searching images…", COLOR_LOADING));
            return lines;
        }
        ContentState::Failed => {
            lines.push(status_line("Images unavailable", COLOR_ERROR));
            return lines;
        }
        ContentState::Loaded => {}
    }

    let Some(image) = session.current_image() else {
        lines.push(status_line("No images", COLOR_DIM));
        return lines;
    };

    lines.push(Line::from(vec![
        Span::styled(
            format!(
                "Image {}/{} ",
                session.current_image_index() + 1,
                session.images().len()
            ),
            Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("{}×{}", image.width, image.height)),
    ]));
    if let Some(url) = image.display_url() {
        lines.push(Line::from(Span::styled(
            url.to_string(),
            Style::default().fg(COLOR_DIM),
        )));
    }
    match session.current_image_data() {
        Some(data) => lines.push(Line::from(format!(
            "{} · {} KB",
            data.content_type,
            data.len().div_ceil(1024)
        ))),
        None if session.is_pending(RequestKind::ImageData) => {
            lines.push(status_line("Loading image…", COLOR_LOADING))
        }
        None => lines.push(status_line("Preview unavailable", COLOR_DIM)),
    }
    if session.images().len() > 1 {
        lines.push(status_line("click for next image", COLOR_DIM));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrichment::{Definition, ImageRef, ImageUrls, Meaning, QualityTier};
    use crate::session::SessionId;
    use crate::text::{TextRange, Word};
    use kurbo::Rect as ContentRect;

    fn session() -> WordSession {
        let rect = ContentRect::new(0.0, 0.0, 40.0, 16.0);
        WordSession::new(
            SessionId::new(1),
            Word::new("lamet", TextRange::new(0, 5), rect),
            rect,
        )
    }

    fn text(lines: &[Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|span| span.content.as_ref()).collect())
            .collect()
    }

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_meaning_lines_loading_and_failed() {
        let mut session = session();
        session.meanings_state = ContentState::Loading;
        assert_eq!(text(&meaning_lines(&session)), vec!["Looking up…"]);

        session.meanings_state = ContentState::Failed;
        assert_eq!(text(&meaning_lines(&session)), vec!["No definition found"]);
    }

    #[test]
    fn test_meaning_lines_numbered_per_part_of_speech() {
        let mut session = session();
        session.meanings_state = ContentState::Loaded;
        session.meanings = vec![Meaning::new(
            "noun",
            vec![
                Definition::new("A thin plate.").with_example("a lamet of gold"),
                Definition::new("A blade."),
            ],
        )];
        assert_eq!(
            text(&meaning_lines(&session)),
            vec![
                "noun",
                "1. A thin plate.",
                "   \"a lamet of gold\"",
                "2. A blade.",
                "",
            ]
        );
    }

    #[test]
    fn test_image_lines_for_current_image() {
        let mut session = session();
        session.images_state = ContentState::Loaded;
        session.images = vec![
            ImageRef::new(
                "a",
                640,
                480,
                ImageUrls::new().with(QualityTier::Small, "https://img.test/a"),
            ),
            ImageRef::new("b", 10, 10, ImageUrls::new()),
        ];
        let lines = text(&image_lines(&session, 4, false));
        assert_eq!(lines[0], "────");
        assert_eq!(lines[1], "Image 1/2 640×480");
        assert_eq!(lines[2], "https://img.test/a");
        assert_eq!(lines[3], "Preview unavailable");
        assert_eq!(lines[4], "click for next image");
    }

    #[test]
    fn test_panel_hides_content_while_expanding() {
        let mut session = session();
        session.phase = SessionPhase::Expanding;
        session.meanings_state = ContentState::Loading;
        let area = Rect::new(0, 0, 20, 6);

        let mut buf = Buffer::empty(area);
        DetailPanel::new(&session).render(area, &mut buf);
        assert!(!row(&buf, 1).contains("Looking"));
        assert!(row(&buf, 0).contains("lamet"));

        session.phase = SessionPhase::Detail;
        let mut buf = Buffer::empty(area);
        DetailPanel::new(&session).render(area, &mut buf);
        assert!(row(&buf, 1).contains("Looking up"));
        assert!(row(&buf, 0).contains(CLOSE_LABEL));
    }
}
