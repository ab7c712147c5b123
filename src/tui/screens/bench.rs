//! CPU benchmark screen: idle, running, and result views.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::state::App;
use crate::tui::theme::Theme;
use crate::tui::widgets::card::Panel;
use crate::tui::widgets::footer::draw_footer;
use crate::tui::widgets::gauge::draw_gauge;

pub(crate) fn draw_bench(area: Rect, f: &mut ratatui::Frame, app: &App, theme: Theme) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    if app.bench_run.is_some() {
        draw_running(layout[0], layout[1], f, app, &theme);
    } else if let Some(error) = &app.bench_error {
        Panel::new("CPU Benchmark")
            .status("FAILED", theme.critical)
            .text(Line::from(Span::styled(
                error.as_str(),
                Style::default().fg(theme.critical),
            )))
            .render(layout[0], f, &theme);
    } else if let Some(result) = &app.bench_result {
        Panel::new("CPU Benchmark")
            .status("DONE", theme.optimal)
            .text(Line::from(vec![
                Span::styled("Score: ", Style::default().fg(theme.muted)),
                Span::styled(
                    result.score.to_string(),
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD),
                ),
            ]))
            .text(Line::from(vec![
                Span::styled("Iterations: ", Style::default().fg(theme.muted)),
                Span::styled(
                    result.iterations.to_string(),
                    Style::default().fg(theme.text),
                ),
                Span::styled("   Primes: ", Style::default().fg(theme.muted)),
                Span::styled(
                    result.primes_found.to_string(),
                    Style::default().fg(theme.text),
                ),
            ]))
            .text(Line::from(vec![
                Span::styled("Duration: ", Style::default().fg(theme.muted)),
                Span::styled(
                    format!("{:.2} s", result.duration_secs),
                    Style::default().fg(theme.text),
                ),
            ]))
            .render(layout[0], f, &theme);
    } else {
        Panel::new("CPU Benchmark")
            .text(Line::from(Span::styled(
                format!(
                    "Counts primes on one core for {} seconds. Score is iterations / 100.",
                    app.config.benchmark.duration_secs
                ),
                Style::default().fg(theme.muted),
            )))
            .text(Line::from(Span::styled(
                "Press Enter to start.",
                Style::default().fg(theme.text),
            )))
            .render(layout[0], f, &theme);
    }

    let hints: &[(&str, &str)] = if app.bench_run.is_some() {
        &[("Esc", "Cancel")]
    } else {
        &[("Enter", "Run"), ("Esc", "Back")]
    };
    draw_footer(layout[3], f, &theme, hints);
}

fn draw_running(
    card_area: Rect,
    gauge_area: Rect,
    f: &mut ratatui::Frame,
    app: &App,
    theme: &Theme,
) {
    let spinner = app.animation.spinner_char();
    let iterations = app
        .bench_progress
        .map(|p| p.iterations)
        .unwrap_or_default();

    Panel::new("CPU Benchmark")
        .status("RUNNING", theme.caution)
        .text(Line::from(vec![
            Span::styled(format!(" {spinner}  "), Style::default().fg(theme.accent)),
            Span::styled(
                "Stressing one core...",
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            ),
        ]))
        .text(Line::from(vec![
            Span::styled("Iterations so far: ", Style::default().fg(theme.muted)),
            Span::styled(iterations.to_string(), Style::default().fg(theme.text)),
        ]))
        .render(card_area, f, theme);

    let ratio = app.bench_progress.map(|p| p.ratio()).unwrap_or(0.0);
    draw_gauge(
        gauge_area,
        f,
        theme,
        "Progress",
        ratio,
        &format!("{:>3.0}%", ratio * 100.0),
        theme.accent,
    );
}
