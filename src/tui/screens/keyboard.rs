//! Keyboard test screen: stats plus a virtual keyboard that lights up
//! verified keys.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::keymap;
use crate::tui::state::App;
use crate::tui::theme::Theme;
use crate::tui::widgets::card::Panel;
use crate::tui::widgets::footer::draw_footer;

pub(crate) fn draw_keyboard(area: Rect, f: &mut ratatui::Frame, app: &App, theme: Theme) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    let kb = &app.keyboard;
    let last = kb.last_pressed.as_deref().unwrap_or("—");

    Panel::new("Status")
        .text(Line::from(vec![
            Span::styled("Last key: ", Style::default().fg(theme.muted)),
            Span::styled(
                last,
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("   Presses: ", Style::default().fg(theme.muted)),
            Span::styled(kb.press_count.to_string(), Style::default().fg(theme.text)),
            Span::styled("   Verified: ", Style::default().fg(theme.muted)),
            Span::styled(
                kb.verified.len().to_string(),
                Style::default().fg(theme.optimal),
            ),
        ]))
        .text(Line::from(vec![
            Span::styled("Layout: ", Style::default().fg(theme.muted)),
            Span::styled(kb.layout.label(), Style::default().fg(theme.text)),
            Span::styled(
                "  (expands automatically when F-row/nav/numpad keys arrive)",
                Style::default().fg(theme.text_dim),
            ),
        ]))
        .render(layout[0], f, &theme);

    draw_virtual_keyboard(layout[1], f, app, &theme);

    draw_footer(
        layout[2],
        f,
        &theme,
        &[("Any key", "Verify"), ("Ctrl+R", "Reset"), ("Esc", "Back")],
    );
}

fn draw_virtual_keyboard(area: Rect, f: &mut ratatui::Frame, app: &App, theme: &Theme) {
    let kb = &app.keyboard;
    let rows = keymap::rows_for(kb.layout);

    let mut lines: Vec<Line> = Vec::with_capacity(rows.len());
    for row in rows {
        let mut spans: Vec<Span> = Vec::with_capacity(row.len() * 2);
        for label in row {
            let verified = kb.verified.contains(*label);
            let is_last = kb.last_pressed.as_deref() == Some(*label);

            let style = if is_last {
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else if verified {
                Style::default().fg(theme.optimal)
            } else {
                Style::default().fg(theme.muted)
            };

            spans.push(Span::styled(format!("[{label}]"), style));
            spans.push(Span::raw(" "));
        }
        lines.push(Line::from(spans));
    }

    f.render_widget(Paragraph::new(lines), area);
}
