//! ASCII art banner for the home screen.

use ratatui::layout::Alignment;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph};

use crate::tui::theme::Theme;

// ASCII-only wordmark so this looks consistent across terminals
// (including Windows). A drop shadow is added at render time.
const WORDMARK_FULL: &[&str] = &[
    " _  ___      __ ___ _  _ ___ ___ _  __",
    "| || \\ \\    / // __| || | __/ __| |/ /",
    "| __ |\\ \\/\\/ /| (__| __ | _| (__| ' < ",
    "|_||_| \\_/\\_/  \\___|_||_|___\\___|_|\\_\\",
];

const WORDMARK_COMPACT: &[&str] = &["HWCHECK"];

const WORDMARK_FULL_MIN_WIDTH: u16 = 42;
const WORDMARK_FULL_HEIGHT: u16 = 4;

pub(crate) fn draw_banner(area: Rect, f: &mut ratatui::Frame, theme: &Theme) {
    let use_full = area.width >= WORDMARK_FULL_MIN_WIDTH && area.height >= WORDMARK_FULL_HEIGHT;
    let raw_lines = if use_full {
        WORDMARK_FULL
    } else {
        WORDMARK_COMPACT
    };

    let shadow_style = Style::default().fg(theme.text_dim);
    let main_style = Style::default()
        .fg(theme.accent)
        .add_modifier(Modifier::BOLD);

    // Ensure shorter wordmark lines never leave artifacts from prior frames.
    f.render_widget(Clear, area);

    if area.width >= 2 && area.height >= 2 {
        let shadow_area = Rect {
            x: area.x.saturating_add(1),
            y: area.y.saturating_add(1),
            width: area.width.saturating_sub(1),
            height: area.height.saturating_sub(1),
        };
        f.render_widget(Clear, shadow_area);
        let shadow_lines = raw_lines
            .iter()
            .take(shadow_area.height as usize)
            .map(|line| Line::from(Span::styled(*line, shadow_style)))
            .collect::<Vec<_>>();
        f.render_widget(
            Paragraph::new(shadow_lines).alignment(Alignment::Center),
            shadow_area,
        );
    }

    let lines = raw_lines
        .iter()
        .take(area.height as usize)
        .map(|line| Line::from(Span::styled(*line, main_style)))
        .collect::<Vec<_>>();
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}
