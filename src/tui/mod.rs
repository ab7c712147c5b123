//! Fullscreen terminal UI (TUI).
//!
//! This is intentionally small and self-contained so we can evolve it
//! without entangling the metrics/benchmark/audio layers.

pub(crate) mod input;
pub(crate) mod keymap;
pub(crate) mod screens;
pub(crate) mod state;
pub(crate) mod theme;
pub(crate) mod widgets;

use std::io;
use std::sync::mpsc::TryRecvError;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, DisableMouseCapture, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::Terminal;

use crate::bench::BenchEvent;
use state::*;
use theme::Theme;

const FRAME_TIME: Duration = Duration::from_millis(16);

// Re-export TuiExit for use by main.
pub(crate) use state::TuiExit;

struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Mouse capture may have been enabled by the mouse screen;
        // disabling it when it wasn't is harmless.
        let _ = execute!(io::stdout(), DisableMouseCapture);
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

pub(crate) fn run_tui() -> Result<TuiExit> {
    let _guard = TerminalGuard::enter()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut app = App::new();

    loop {
        terminal.draw(|f| draw(f.area(), f, &app))?;

        if matches!(app.screen, Screen::Bench) {
            if let Some(run) = app.bench_run.as_ref() {
                match run.rx.try_recv() {
                    Ok(BenchEvent::Progress(progress)) => {
                        app.bench_progress = Some(progress);
                    }
                    Ok(BenchEvent::Done(result)) => {
                        app.bench_run = None;
                        app.bench_progress = None;
                        app.bench_result = Some(result);
                        continue;
                    }
                    Err(TryRecvError::Empty) => {}
                    Err(TryRecvError::Disconnected) => {
                        app.bench_run = None;
                        app.bench_progress = None;
                        app.bench_error =
                            Some("Benchmark worker stopped unexpectedly.".to_string());
                        continue;
                    }
                }
            }
        }

        if matches!(app.screen, Screen::Metrics) {
            app.metrics.maybe_refresh();
        }

        let timeout = FRAME_TIME.saturating_sub(app.last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if input::handle_key(&mut app, key)? {
                        break;
                    }
                }
                Event::Mouse(mouse) => input::handle_mouse(&mut app, mouse),
                _ => {}
            }
        }

        if app.last_tick.elapsed() >= FRAME_TIME {
            app.last_tick = std::time::Instant::now();
            app.animation.advance();
            // The rate window must roll even while no events arrive
            if matches!(app.screen, Screen::Mouse) {
                app.mouse.roll_window(std::time::Instant::now());
            }
        }
    }

    Ok(app.exit.unwrap_or(TuiExit::Quit))
}

fn draw(area: Rect, f: &mut ratatui::Frame, app: &App) {
    let theme = Theme::default();

    // The display test paints every cell, header included
    if app.screen == Screen::Display {
        screens::display::draw_display(area, f, app, theme);
        return;
    }

    // Top header bar + content area
    let outer_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // header
            Constraint::Min(0),    // content
        ])
        .split(area);

    let context = match app.screen {
        Screen::Home | Screen::Display => None,
        Screen::Keyboard => Some("KEYBOARD TEST"),
        Screen::Mouse => Some("MOUSE TEST"),
        Screen::Audio => Some("AUDIO TEST"),
        Screen::Bench => Some("CPU BENCHMARK"),
        Screen::Metrics => Some("SYSTEM METRICS"),
        Screen::ErrorModal => None,
    };
    widgets::header::draw_header(outer_layout[0], f, &theme, context);

    let inner = outer_layout[1];

    match app.screen {
        Screen::Home | Screen::Display => screens::home::draw_home(inner, f, app, theme),
        Screen::Keyboard => screens::keyboard::draw_keyboard(inner, f, app, theme),
        Screen::Mouse => screens::mouse::draw_mouse(inner, f, app, theme),
        Screen::Audio => screens::audio::draw_audio(inner, f, app, theme),
        Screen::Bench => screens::bench::draw_bench(inner, f, app, theme),
        Screen::Metrics => screens::metrics::draw_metrics(inner, f, app, theme),
        Screen::ErrorModal => {
            match app.error_return_screen {
                Screen::Home | Screen::Display | Screen::ErrorModal => {
                    screens::home::draw_home(inner, f, app, theme)
                }
                Screen::Keyboard => screens::keyboard::draw_keyboard(inner, f, app, theme),
                Screen::Mouse => screens::mouse::draw_mouse(inner, f, app, theme),
                Screen::Audio => screens::audio::draw_audio(inner, f, app, theme),
                Screen::Bench => screens::bench::draw_bench(inner, f, app, theme),
                Screen::Metrics => screens::metrics::draw_metrics(inner, f, app, theme),
            }
            screens::error::draw_error_modal(inner, f, app, theme);
        }
    }
}
