//! Home dashboard: the card grid of available tests.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Paragraph, Wrap};

use crate::tui::state::{App, TEST_CARDS};
use crate::tui::theme::Theme;
use crate::tui::widgets::banner::draw_banner;
use crate::tui::widgets::card::Panel;
use crate::tui::widgets::footer::draw_footer;

const GRID_COLS: usize = 2;
const CARD_HEIGHT: u16 = 4;

pub(crate) fn draw_home(area: Rect, f: &mut ratatui::Frame, app: &App, theme: Theme) {
    // Shrink the banner/tagline first so the grid stays usable in
    // short terminals.
    let footer_h: u16 = if area.height >= 1 { 1 } else { 0 };
    let mut banner_h: u16 = 5.min(area.height);
    let mut tagline_h: u16 = 2.min(area.height.saturating_sub(banner_h));

    let min_grid_h: u16 = CARD_HEIGHT;
    let target_fixed_max = area.height.saturating_sub(min_grid_h);
    while banner_h.saturating_add(tagline_h).saturating_add(footer_h) > target_fixed_max {
        if tagline_h > 0 {
            tagline_h = tagline_h.saturating_sub(1);
            continue;
        }
        if banner_h > 1 {
            banner_h = banner_h.saturating_sub(1);
            continue;
        }
        break;
    }

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(banner_h),
            Constraint::Length(tagline_h),
            Constraint::Min(0),
            Constraint::Length(footer_h),
        ])
        .split(area);

    draw_banner(layout[0], f, &theme);

    if layout[1].height > 0 {
        let tagline = Paragraph::new(Text::from(vec![Line::from(Span::styled(
            "Check your hardware, one test at a time. Everything stays local.",
            Style::default().fg(theme.text_dim),
        ))]))
        .wrap(Wrap { trim: true });
        f.render_widget(tagline, layout[1]);
    }

    draw_card_grid(layout[2], f, app, &theme);

    if layout[3].height > 0 {
        draw_footer(
            layout[3],
            f,
            &theme,
            &[
                ("↑/↓/←/→", "Navigate"),
                ("Enter", "Open test"),
                ("Q/Esc", "Quit"),
            ],
        );
    }
}

fn draw_card_grid(area: Rect, f: &mut ratatui::Frame, app: &App, theme: &Theme) {
    let rows = TEST_CARDS.len().div_ceil(GRID_COLS);
    let row_constraints: Vec<Constraint> = (0..rows)
        .map(|_| Constraint::Length(CARD_HEIGHT))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(row_constraints)
        .split(area);

    for (row, chunk) in TEST_CARDS.chunks(GRID_COLS).enumerate() {
        if row_areas[row].height == 0 {
            continue;
        }

        let col_areas = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![
                Constraint::Percentage(100 / GRID_COLS as u16);
                GRID_COLS
            ])
            .split(row_areas[row]);

        for (col, card) in chunk.iter().enumerate() {
            let idx = row * GRID_COLS + col;

            let mut panel = Panel::new(card.title)
                .text(Line::from(Span::styled(
                    card.description,
                    Style::default().fg(theme.muted),
                )))
                .selected(idx == app.selected_card);

            if card.target.is_none() {
                panel = panel.disabled();
            }

            panel.render(col_areas[col], f, theme);
        }
    }
}
