//! Live system metrics screen.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::metrics::memory::UsageTier;
use crate::tui::state::App;
use crate::tui::theme::Theme;
use crate::tui::widgets::card::Panel;
use crate::tui::widgets::footer::draw_footer;
use crate::tui::widgets::gauge::draw_gauge;

pub(crate) fn draw_metrics(area: Rect, f: &mut ratatui::Frame, app: &App, theme: Theme) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Length(5),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    let snap = &app.metrics.snapshot;

    Panel::new("CPU")
        .text(Line::from(vec![
            Span::styled("Name:  ", Style::default().fg(theme.muted)),
            Span::styled(snap.cpu.name.as_str(), Style::default().fg(theme.text)),
        ]))
        .text(Line::from(vec![
            Span::styled("Cores: ", Style::default().fg(theme.muted)),
            Span::styled(
                format!(
                    "{} physical / {} logical",
                    snap.cpu.physical_cores, snap.cpu.logical_cpus
                ),
                Style::default().fg(theme.text),
            ),
        ]))
        .text(Line::from(vec![
            Span::styled("Clock: ", Style::default().fg(theme.muted)),
            Span::styled(
                format!("{} MHz (max {} MHz)", snap.cpu.current_mhz, snap.cpu.max_mhz),
                Style::default().fg(theme.text),
            ),
        ]))
        .render(layout[0], f, &theme);

    let mem = &snap.memory;
    Panel::new("Memory")
        .text(Line::from(vec![
            Span::styled("Total:     ", Style::default().fg(theme.muted)),
            Span::styled(
                format!("{:.1} GB", mem.total_gb),
                Style::default().fg(theme.text),
            ),
        ]))
        .text(Line::from(vec![
            Span::styled("Used:      ", Style::default().fg(theme.muted)),
            Span::styled(
                format!("{:.1} GB", mem.used_gb),
                Style::default().fg(theme.text),
            ),
            Span::styled("   Available: ", Style::default().fg(theme.muted)),
            Span::styled(
                format!("{:.1} GB", mem.available_gb),
                Style::default().fg(theme.text),
            ),
        ]))
        .render(layout[1], f, &theme);

    let tier = UsageTier::from_pct(mem.used_pct);
    draw_gauge(
        layout[2],
        f,
        &theme,
        "RAM usage",
        mem.used_pct / 100.0,
        &format!("{:>5.1}%", mem.used_pct),
        theme.tier_color(tier),
    );

    draw_footer(
        layout[4],
        f,
        &theme,
        &[("R", "Refresh now"), ("Esc", "Back")],
    );
}
