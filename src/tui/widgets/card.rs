//! Bordered test panel.
//!
//! Owns the presentation rules the screens share: a selection marker
//! and accent border when the panel is the focused dashboard card, an
//! "N/A" tag when the test has no backend, and an optional status tag
//! (RUNNING, LIVE, ...) after the title.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

use crate::tui::theme::Theme;

pub(crate) struct Panel<'a> {
    title: &'a str,
    status: Option<(&'a str, Color)>,
    body: Vec<Line<'a>>,
    selected: bool,
    enabled: bool,
}

impl<'a> Panel<'a> {
    pub fn new(title: &'a str) -> Self {
        Self {
            title,
            status: None,
            body: Vec::new(),
            selected: false,
            enabled: true,
        }
    }

    pub fn text(mut self, line: Line<'a>) -> Self {
        self.body.push(line);
        self
    }

    pub fn status(mut self, label: &'a str, color: Color) -> Self {
        self.status = Some((label, color));
        self
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Mark the panel's test as having no backend; the title dims and
    /// an "N/A" tag replaces the status.
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn render(self, area: Rect, f: &mut ratatui::Frame, theme: &Theme) {
        let border = if self.selected {
            theme.accent
        } else {
            theme.border
        };
        let title_fg = if self.enabled { theme.text } else { theme.muted };

        let mut title_spans = Vec::with_capacity(4);
        if self.selected {
            title_spans.push(Span::styled(
                "› ",
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ));
        }
        title_spans.push(Span::styled(
            self.title,
            Style::default().fg(title_fg).add_modifier(Modifier::BOLD),
        ));
        match self.status {
            Some((label, color)) => {
                title_spans.push(Span::styled(" · ", Style::default().fg(theme.muted)));
                title_spans.push(Span::styled(
                    label,
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ));
            }
            None if !self.enabled => {
                title_spans.push(Span::styled(" · N/A", Style::default().fg(theme.muted)));
            }
            None => {}
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border))
            .title(Line::from(title_spans));
        let inner = block.inner(area);
        f.render_widget(block, area);

        if !self.body.is_empty() && inner.height > 0 {
            f.render_widget(
                Paragraph::new(Text::from(self.body)).wrap(Wrap { trim: true }),
                inner,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn rendered(panel: Panel) -> String {
        let backend = TestBackend::new(36, 4);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| panel.render(f.area(), f, &Theme::default()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_panel_selected_marker_in_title() {
        let text = rendered(Panel::new("Keyboard").selected(true));
        assert!(text.contains("› Keyboard"));

        let text = rendered(Panel::new("Keyboard"));
        assert!(!text.contains('›'));
    }

    #[test]
    fn test_panel_disabled_tag() {
        let text = rendered(Panel::new("Webcam").disabled());
        assert!(text.contains("Webcam · N/A"));
    }

    #[test]
    fn test_panel_status_tag() {
        let text = rendered(Panel::new("CPU Benchmark").status("RUNNING", Color::Yellow));
        assert!(text.contains("CPU Benchmark · RUNNING"));
        assert!(!text.contains("N/A"));
    }
}
