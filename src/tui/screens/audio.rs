//! Audio test screen: stereo channel bursts, tone generator, and
//! microphone waveform.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Sparkline;

use crate::audio::{MAX_TONE_HZ, MIN_TONE_HZ};
use crate::tui::state::App;
use crate::tui::theme::Theme;
use crate::tui::widgets::card::Panel;
use crate::tui::widgets::footer::draw_footer;

const WAVEFORM_POINTS: usize = 120;

pub(crate) fn draw_audio(area: Rect, f: &mut ratatui::Frame, app: &App, theme: Theme) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(5),
            Constraint::Min(6),
            Constraint::Length(1),
        ])
        .split(area);

    draw_stereo_card(layout[0], f, app, &theme);
    draw_tone_card(layout[1], f, app, &theme);
    draw_mic_card(layout[2], f, app, &theme);

    draw_footer(
        layout[3],
        f,
        &theme,
        &[
            ("1/2", "Left/Right burst"),
            ("T", "Tone"),
            ("-/+", "Frequency"),
            ("M", "Mic"),
            ("Esc", "Back"),
        ],
    );
}

fn draw_stereo_card(area: Rect, f: &mut ratatui::Frame, app: &App, theme: &Theme) {
    let last = app
        .audio
        .last_burst
        .map(|s| s.label())
        .unwrap_or("none yet");

    Panel::new("Stereo Channels")
        .text(Line::from(Span::styled(
            "Play a short 440 Hz burst into one channel only.",
            Style::default().fg(theme.muted),
        )))
        .text(Line::from(vec![
            Span::styled("Last burst: ", Style::default().fg(theme.muted)),
            Span::styled(
                last,
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
        ]))
        .render(area, f, theme);
}

fn draw_tone_card(area: Rect, f: &mut ratatui::Frame, app: &App, theme: &Theme) {
    let hz = app.audio_engine.tone_hz();
    let playing = app.audio_engine.tone_playing();

    let (status, status_color) = if playing {
        ("PLAYING", theme.optimal)
    } else {
        ("stopped", theme.muted)
    };

    // Log-ish position indicator across the audible range
    let span_ratio =
        (hz.saturating_sub(MIN_TONE_HZ)) as f64 / (MAX_TONE_HZ - MIN_TONE_HZ) as f64;
    let marker_pos = (span_ratio * 30.0) as usize;
    let mut track: Vec<char> = "─".repeat(31).chars().collect();
    track[marker_pos.min(30)] = '●';
    let track: String = track.into_iter().collect();

    Panel::new("Tone Generator")
        .status(status, status_color)
        .text(Line::from(vec![
            Span::styled("Frequency: ", Style::default().fg(theme.muted)),
            Span::styled(
                format!("{hz} Hz"),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  ({MIN_TONE_HZ} Hz – {MAX_TONE_HZ} Hz)"),
                Style::default().fg(theme.text_dim),
            ),
        ]))
        .text(Line::from(Span::styled(
            track,
            Style::default().fg(theme.accent),
        )))
        .render(area, f, theme);
}

fn draw_mic_card(area: Rect, f: &mut ratatui::Frame, app: &App, theme: &Theme) {
    let capturing = app.audio_engine.capturing();
    let (status, status_color) = if capturing {
        ("LIVE", theme.critical)
    } else {
        ("off", theme.muted)
    };

    let level = app.audio_engine.capture_level().unwrap_or(0.0);

    let card = Panel::new("Microphone")
        .status(status, status_color)
        .text(Line::from(vec![
            Span::styled("Level: ", Style::default().fg(theme.muted)),
            Span::styled(
                format!("{:>3.0}%", level * 100.0),
                Style::default().fg(theme.optimal),
            ),
        ]));
    card.render(area, f, theme);

    // Waveform inside the card body, below the level line
    if capturing && area.height > 4 {
        let wave_area = Rect {
            x: area.x + 1,
            y: area.y + 2,
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(3),
        };

        if let Some(samples) = app.audio_engine.capture_waveform(WAVEFORM_POINTS) {
            let bars: Vec<u64> = samples
                .iter()
                .map(|s| (s.abs().min(1.0) * 100.0) as u64)
                .collect();
            let sparkline = Sparkline::default()
                .data(bars.iter().copied())
                .max(100)
                .style(Style::default().fg(theme.accent));
            f.render_widget(sparkline, wave_area);
        }
    }
}
