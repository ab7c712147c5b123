//! Mouse test screen: button state, scroll accumulator, position, and
//! events-per-second rate.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::state::App;
use crate::tui::theme::Theme;
use crate::tui::widgets::card::Panel;
use crate::tui::widgets::footer::draw_footer;

pub(crate) fn draw_mouse(area: Rect, f: &mut ratatui::Frame, app: &App, theme: Theme) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(6),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    let m = &app.mouse;

    let button_line = |label: &'static str, down: bool| {
        let (marker, style) = if down {
            (
                "● DOWN",
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            ("○ up", Style::default().fg(theme.muted))
        };
        Line::from(vec![
            Span::styled(format!("{label:<8}"), Style::default().fg(theme.text)),
            Span::styled(marker, style),
        ])
    };

    Panel::new("Buttons")
        .text(button_line("Left", m.left))
        .text(button_line("Middle", m.middle))
        .text(button_line("Right", m.right))
        .render(layout[0], f, &theme);

    Panel::new("Motion")
        .text(Line::from(vec![
            Span::styled("Position: ", Style::default().fg(theme.muted)),
            Span::styled(
                format!("col {}, row {}", m.position.0, m.position.1),
                Style::default().fg(theme.text),
            ),
        ]))
        .text(Line::from(vec![
            Span::styled("Scroll:   ", Style::default().fg(theme.muted)),
            Span::styled(
                format!("{:+}", m.scroll),
                Style::default().fg(theme.text),
            ),
            Span::styled("  (down is positive)", Style::default().fg(theme.text_dim)),
        ]))
        .text(Line::from(vec![
            Span::styled("Rate:     ", Style::default().fg(theme.muted)),
            Span::styled(
                format!("{} events/s", m.events_per_sec),
                Style::default().fg(theme.optimal),
            ),
            Span::styled(
                format!("  ({} total)", m.total_events),
                Style::default().fg(theme.text_dim),
            ),
        ]))
        .render(layout[1], f, &theme);

    draw_footer(
        layout[3],
        f,
        &theme,
        &[
            ("Move/Click/Scroll", "Test"),
            ("Ctrl+R", "Reset"),
            ("Esc", "Back"),
        ],
    );
}
