//! TUI keyboard and mouse input handling.

use std::io;

use anyhow::Result;
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    MouseEvent,
};
use crossterm::execute;
use tracing::warn;

use crate::audio::StereoSide;
use crate::bench;
use crate::tui::state::*;

const TONE_STEP_HZ: u32 = 50;

pub(crate) fn handle_key(app: &mut App, key: KeyEvent) -> Result<bool> {
    if key.kind == KeyEventKind::Release {
        return Ok(false);
    }

    if matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c'))
        && key.modifiers.contains(KeyModifiers::CONTROL)
    {
        app.exit = Some(TuiExit::Quit);
        return Ok(true);
    }

    match app.screen {
        Screen::Home => handle_home_key(app, key),
        Screen::Display => handle_display_key(app, key),
        Screen::Keyboard => handle_keyboard_key(app, key),
        Screen::Mouse => handle_mouse_screen_key(app, key),
        Screen::Audio => handle_audio_key(app, key),
        Screen::Bench => handle_bench_key(app, key),
        Screen::Metrics => handle_metrics_key(app, key),
        Screen::ErrorModal => handle_error_modal_key(app, key),
    }
}

pub(crate) fn handle_mouse(app: &mut App, event: MouseEvent) {
    if app.screen == Screen::Mouse {
        app.mouse.record(&event);
    }
}

fn handle_home_key(app: &mut App, key: KeyEvent) -> Result<bool> {
    let cols = 2;
    let len = TEST_CARDS.len();

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            app.exit = Some(TuiExit::Quit);
            return Ok(true);
        }
        KeyCode::Left => {
            if app.selected_card > 0 {
                app.selected_card -= 1;
            }
        }
        KeyCode::Right => {
            if app.selected_card + 1 < len {
                app.selected_card += 1;
            }
        }
        KeyCode::Up => {
            if app.selected_card >= cols {
                app.selected_card -= cols;
            } else {
                // Wrap to the bottom of the same column
                let mut idx = app.selected_card;
                while idx + cols < len {
                    idx += cols;
                }
                app.selected_card = idx;
            }
        }
        KeyCode::Down => {
            if app.selected_card + cols < len {
                app.selected_card += cols;
            } else {
                app.selected_card %= cols;
            }
        }
        KeyCode::Enter => activate_selected(app)?,
        _ => {}
    }
    Ok(false)
}

/// Open the selected card's test screen, or raise an info modal for
/// cards with no backend. A single activation never navigates more
/// than once.
pub(crate) fn activate_selected(app: &mut App) -> Result<()> {
    let card = TEST_CARDS[app.selected_card.min(TEST_CARDS.len() - 1)];

    match card.target {
        Some(target) => enter_screen(app, target)?,
        None => {
            app.set_info(
                card.title,
                format!(
                    "The {} test has no terminal backend.\nUse a dedicated tool for this device.",
                    card.title.to_lowercase()
                ),
            );
        }
    }
    Ok(())
}

fn enter_screen(app: &mut App, target: Screen) -> Result<()> {
    match target {
        Screen::Display => {
            app.display.reset();
        }
        Screen::Mouse => {
            set_mouse_capture(true)?;
            app.mouse.reset();
        }
        Screen::Metrics => {
            app.metrics.refresh();
        }
        _ => {}
    }
    app.screen = target;
    Ok(())
}

fn leave_to_home(app: &mut App) -> Result<()> {
    match app.screen {
        Screen::Mouse => set_mouse_capture(false)?,
        Screen::Audio => app.audio_engine.stop_all(),
        Screen::Bench => {
            // Dropping the receiver makes the worker stop at its next
            // progress send
            app.bench_run = None;
            app.bench_progress = None;
        }
        _ => {}
    }
    app.screen = Screen::Home;
    Ok(())
}

fn set_mouse_capture(enabled: bool) -> Result<()> {
    if enabled {
        execute!(io::stdout(), EnableMouseCapture)?;
    } else {
        execute!(io::stdout(), DisableMouseCapture)?;
    }
    Ok(())
}

fn handle_display_key(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => leave_to_home(app)?,
        KeyCode::Right | KeyCode::Char(' ') | KeyCode::Enter => app.display.advance(),
        KeyCode::Left => app.display.back(),
        _ => {}
    }
    Ok(false)
}

fn handle_keyboard_key(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => leave_to_home(app)?,
        KeyCode::Char('r') | KeyCode::Char('R')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.keyboard.reset();
        }
        _ => app.keyboard.record_key(&key),
    }
    Ok(false)
}

fn handle_mouse_screen_key(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => leave_to_home(app)?,
        KeyCode::Char('r') | KeyCode::Char('R')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.mouse.reset();
        }
        _ => {}
    }
    Ok(false)
}

fn handle_audio_key(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => {
            leave_to_home(app)?;
        }
        KeyCode::Char('1') => burst(app, StereoSide::Left),
        KeyCode::Char('2') => burst(app, StereoSide::Right),
        KeyCode::Char('t') | KeyCode::Char('T') => {
            if app.audio_engine.tone_playing() {
                app.audio_engine.stop_output();
            } else {
                let hz = app.audio_engine.tone_hz();
                if let Err(err) = app.audio_engine.play_tone(hz) {
                    warn!("tone playback failed: {err}");
                    app.set_error("Audio output failed", err.to_string());
                }
            }
        }
        KeyCode::Char('-') => {
            let hz = app.audio_engine.tone_hz().saturating_sub(TONE_STEP_HZ);
            app.audio_engine.set_tone_hz(hz);
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            let hz = app.audio_engine.tone_hz().saturating_add(TONE_STEP_HZ);
            app.audio_engine.set_tone_hz(hz);
        }
        KeyCode::Char('m') | KeyCode::Char('M') => {
            if app.audio_engine.capturing() {
                app.audio_engine.stop_capture();
            } else if let Err(err) = app.audio_engine.start_capture() {
                warn!("microphone capture failed: {err}");
                app.set_error("Microphone unavailable", err.to_string());
            }
        }
        _ => {}
    }
    Ok(false)
}

fn burst(app: &mut App, side: StereoSide) {
    match app.audio_engine.play_channel_burst(side) {
        Ok(()) => app.audio.last_burst = Some(side),
        Err(err) => {
            warn!("channel burst failed: {err}");
            app.set_error("Audio output failed", err.to_string());
        }
    }
}

fn handle_bench_key(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => {
            if app.bench_run.is_some() {
                app.bench_run = None;
                app.bench_progress = None;
            } else {
                leave_to_home(app)?;
            }
        }
        KeyCode::Enter => {
            if app.bench_run.is_none() {
                start_bench(app);
            }
        }
        _ => {}
    }
    Ok(false)
}

pub(crate) fn start_bench(app: &mut App) {
    let options = bench::BenchOptions::new(
        app.config.benchmark.duration_secs,
        app.config.benchmark.slice_ms,
    );
    app.bench_progress = None;
    app.bench_result = None;
    app.bench_error = None;
    app.bench_run = Some(BenchRunState {
        rx: bench::spawn(options),
    });
}

fn handle_metrics_key(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => leave_to_home(app)?,
        KeyCode::Char('r') | KeyCode::Char('R') => app.metrics.refresh(),
        _ => {}
    }
    Ok(false)
}

fn handle_error_modal_key(app: &mut App, key: KeyEvent) -> Result<bool> {
    if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
        app.error_modal = None;
        app.screen = app.error_return_screen;
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn card_index(title: &str) -> usize {
        TEST_CARDS.iter().position(|c| c.title == title).unwrap()
    }

    #[test]
    fn test_card_with_target_navigates_once() {
        let mut app = App::new();
        app.selected_card = card_index("Keyboard");

        activate_selected(&mut app).unwrap();
        assert_eq!(app.screen, Screen::Keyboard);
        assert!(app.error_modal.is_none());
    }

    #[test]
    fn test_null_card_never_navigates() {
        for title in ["Webcam", "Gamepad"] {
            let mut app = App::new();
            app.selected_card = card_index(title);

            activate_selected(&mut app).unwrap();
            // Info modal instead of a test screen
            assert_eq!(app.screen, Screen::ErrorModal);
            assert_eq!(app.error_return_screen, Screen::Home);
            let modal = app.error_modal.as_ref().unwrap();
            assert_eq!(modal.kind, ModalKind::Info);

            // Dismissing returns to the dashboard, not a test screen
            handle_error_modal_key(&mut app, key(KeyCode::Enter)).unwrap();
            assert_eq!(app.screen, Screen::Home);
            assert!(app.error_modal.is_none());
        }
    }

    #[test]
    fn test_display_card_opens_and_cycles() {
        let mut app = App::new();
        app.selected_card = card_index("Display");

        activate_selected(&mut app).unwrap();
        assert_eq!(app.screen, Screen::Display);
        assert_eq!(app.display.stage, DisplayStage::White);

        handle_key(&mut app, key(KeyCode::Char(' '))).unwrap();
        assert_eq!(app.display.stage, DisplayStage::Black);
        handle_key(&mut app, key(KeyCode::Right)).unwrap();
        assert_eq!(app.display.stage, DisplayStage::Red);
        handle_key(&mut app, key(KeyCode::Left)).unwrap();
        assert_eq!(app.display.stage, DisplayStage::Black);

        handle_key(&mut app, key(KeyCode::Esc)).unwrap();
        assert_eq!(app.screen, Screen::Home);

        // Re-entering restarts the cycle from the first fill
        activate_selected(&mut app).unwrap();
        assert_eq!(app.display.stage, DisplayStage::White);
    }

    #[test]
    fn test_home_navigation_stays_in_bounds() {
        let mut app = App::new();
        app.selected_card = 0;

        handle_home_key(&mut app, key(KeyCode::Left)).unwrap();
        assert_eq!(app.selected_card, 0);

        app.selected_card = TEST_CARDS.len() - 1;
        handle_home_key(&mut app, key(KeyCode::Right)).unwrap();
        assert_eq!(app.selected_card, TEST_CARDS.len() - 1);
    }

    #[test]
    fn test_home_vertical_wrap() {
        let mut app = App::new();
        app.selected_card = 0;

        // Up from the top wraps to the bottom of the column
        handle_home_key(&mut app, key(KeyCode::Up)).unwrap();
        assert!(app.selected_card >= TEST_CARDS.len() - 2);
        assert_eq!(app.selected_card % 2, 0);

        // Down from the bottom wraps back to the top
        handle_home_key(&mut app, key(KeyCode::Down)).unwrap();
        assert_eq!(app.selected_card, 0);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::new();
        assert!(handle_home_key(&mut app, key(KeyCode::Esc)).unwrap());
        assert_eq!(app.exit, Some(TuiExit::Quit));
    }

    #[test]
    fn test_keyboard_screen_records_keys() {
        let mut app = App::new();
        app.screen = Screen::Keyboard;

        handle_key(&mut app, key(KeyCode::Char('x'))).unwrap();
        assert!(app.keyboard.verified.contains("X"));

        // Esc leaves instead of recording
        handle_key(&mut app, key(KeyCode::Esc)).unwrap();
        assert_eq!(app.screen, Screen::Home);
        assert!(!app.keyboard.verified.contains("Esc"));
    }

    #[test]
    fn test_tone_frequency_adjustment_clamps() {
        let mut app = App::new();
        app.screen = Screen::Audio;
        app.audio_engine.set_tone_hz(40);

        handle_key(&mut app, key(KeyCode::Char('-'))).unwrap();
        assert_eq!(app.audio_engine.tone_hz(), 20);

        app.audio_engine.set_tone_hz(19_990);
        handle_key(&mut app, key(KeyCode::Char('+'))).unwrap();
        assert_eq!(app.audio_engine.tone_hz(), 20_000);
    }

    #[test]
    fn test_bench_start_and_cancel() {
        let mut app = App::new();
        app.screen = Screen::Bench;

        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        assert!(app.bench_run.is_some());

        // First Esc cancels the run, second leaves the screen
        handle_key(&mut app, key(KeyCode::Esc)).unwrap();
        assert!(app.bench_run.is_none());
        assert_eq!(app.screen, Screen::Bench);

        handle_key(&mut app, key(KeyCode::Esc)).unwrap();
        assert_eq!(app.screen, Screen::Home);
    }
}
