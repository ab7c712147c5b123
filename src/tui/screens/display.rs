//! Display test screen: fullscreen solid-color cycle for spotting dead
//! or stuck pixels, plus a grayscale gradient for banding checks.
//!
//! Drawn over the whole terminal area, header included, so every cell
//! gets painted.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::tui::state::{App, DisplayStage};
use crate::tui::theme::Theme;

const GRADIENT_BANDS: u16 = 16;

pub(crate) fn draw_display(area: Rect, f: &mut ratatui::Frame, app: &App, _theme: Theme) {
    let stage = app.display.stage;

    match stage.fill() {
        Some(color) => {
            f.render_widget(Block::default().style(Style::default().bg(color)), area);
        }
        None => draw_gradient(area, f),
    }

    // Single hint line at the bottom; DarkGray stays readable on both
    // the white and black fills.
    if area.height > 0 {
        let hint_area = Rect {
            x: area.x,
            y: area.y + area.height - 1,
            width: area.width,
            height: 1,
        };
        let hint = format!(
            " {}  ({}/{})  Space/→ next · ← prev · Esc back",
            stage.label(),
            stage.index() + 1,
            DisplayStage::ALL.len()
        );
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                hint,
                Style::default().fg(Color::DarkGray),
            ))),
            hint_area,
        );
    }
}

fn draw_gradient(area: Rect, f: &mut ratatui::Frame) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let band_width = (area.width / GRADIENT_BANDS).max(1) as usize;
    let mut spans: Vec<Span> = Vec::with_capacity(GRADIENT_BANDS as usize);
    let mut covered = 0usize;

    for band in 0..GRADIENT_BANDS {
        let level = (band as u16 * 255 / (GRADIENT_BANDS - 1)) as u8;
        let width = if band == GRADIENT_BANDS - 1 {
            (area.width as usize).saturating_sub(covered)
        } else {
            band_width
        };
        covered += width;
        spans.push(Span::styled(
            "█".repeat(width),
            Style::default().fg(Color::Rgb(level, level, level)),
        ));
    }

    let row = Line::from(spans);
    let rows: Vec<Line> = (0..area.height).map(|_| row.clone()).collect();
    f.render_widget(Paragraph::new(rows), area);
}
