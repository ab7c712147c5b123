//! TUI application state types.

use std::collections::HashSet;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::style::Color;

use crate::audio::{AudioEngine, StereoSide};
use crate::bench;
use crate::config::Config;
use crate::metrics::HardwareSnapshot;
use crate::tui::keymap::{self, KeyLayout};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Home,
    Display,
    Keyboard,
    Mouse,
    Audio,
    Bench,
    Metrics,
    ErrorModal,
}

/// One dashboard card on the home screen
#[derive(Debug, Clone, Copy)]
pub(crate) struct TestCard {
    pub title: &'static str,
    pub description: &'static str,
    /// Screen this card opens; None means the test has no backend on
    /// this build and activation shows an info modal instead.
    pub target: Option<Screen>,
}

pub(crate) const TEST_CARDS: &[TestCard] = &[
    TestCard {
        title: "Display",
        description: "Solid fills and a gradient for pixel checks",
        target: Some(Screen::Display),
    },
    TestCard {
        title: "Keyboard",
        description: "Verify every key registers",
        target: Some(Screen::Keyboard),
    },
    TestCard {
        title: "Mouse",
        description: "Buttons, scroll, movement, event rate",
        target: Some(Screen::Mouse),
    },
    TestCard {
        title: "Audio",
        description: "Stereo channels, tone sweep, microphone",
        target: Some(Screen::Audio),
    },
    TestCard {
        title: "CPU Benchmark",
        description: "Short single-core stress score",
        target: Some(Screen::Bench),
    },
    TestCard {
        title: "System Metrics",
        description: "Live CPU and memory readings",
        target: Some(Screen::Metrics),
    },
    TestCard {
        title: "Webcam",
        description: "Not available in the terminal build",
        target: None,
    },
    TestCard {
        title: "Gamepad",
        description: "Not available in the terminal build",
        target: None,
    },
];

/// Display test stages: solid fills for spotting dead or stuck pixels,
/// then a grayscale gradient for banding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DisplayStage {
    White,
    Black,
    Red,
    Green,
    Blue,
    Gradient,
}

impl DisplayStage {
    pub const ALL: [DisplayStage; 6] = [
        DisplayStage::White,
        DisplayStage::Black,
        DisplayStage::Red,
        DisplayStage::Green,
        DisplayStage::Blue,
        DisplayStage::Gradient,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DisplayStage::White => "White",
            DisplayStage::Black => "Black",
            DisplayStage::Red => "Red",
            DisplayStage::Green => "Green",
            DisplayStage::Blue => "Blue",
            DisplayStage::Gradient => "Gradient",
        }
    }

    /// Solid fill color; None for the gradient stage, which paints its
    /// own bands.
    pub fn fill(self) -> Option<Color> {
        match self {
            DisplayStage::White => Some(Color::Rgb(255, 255, 255)),
            DisplayStage::Black => Some(Color::Rgb(0, 0, 0)),
            DisplayStage::Red => Some(Color::Rgb(255, 0, 0)),
            DisplayStage::Green => Some(Color::Rgb(0, 255, 0)),
            DisplayStage::Blue => Some(Color::Rgb(0, 0, 255)),
            DisplayStage::Gradient => None,
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct DisplayTestState {
    pub stage: DisplayStage,
}

impl DisplayTestState {
    pub fn new() -> Self {
        Self {
            stage: DisplayStage::White,
        }
    }

    pub fn advance(&mut self) {
        let next = (self.stage.index() + 1) % DisplayStage::ALL.len();
        self.stage = DisplayStage::ALL[next];
    }

    pub fn back(&mut self) {
        let len = DisplayStage::ALL.len();
        let prev = (self.stage.index() + len - 1) % len;
        self.stage = DisplayStage::ALL[prev];
    }

    pub fn reset(&mut self) {
        self.stage = DisplayStage::White;
    }
}

#[derive(Debug, Clone)]
pub(crate) struct KeyboardTestState {
    pub verified: HashSet<String>,
    pub last_pressed: Option<String>,
    pub press_count: u64,
    pub layout: KeyLayout,
}

impl KeyboardTestState {
    pub fn new(layout: KeyLayout) -> Self {
        Self {
            verified: HashSet::new(),
            last_pressed: None,
            press_count: 0,
            layout,
        }
    }

    pub fn record_key(&mut self, key: &KeyEvent) {
        let label = keymap::key_label(key);
        self.verified.insert(label.clone());
        self.last_pressed = Some(label);
        self.press_count += 1;
        self.layout = keymap::expanded_layout(self.layout, keymap::key_zone(key));
    }

    /// Clear verified keys but keep the (possibly expanded) layout
    pub fn reset(&mut self) {
        self.verified.clear();
        self.last_pressed = None;
        self.press_count = 0;
    }
}

#[derive(Debug, Clone)]
pub(crate) struct MouseTestState {
    pub left: bool,
    pub middle: bool,
    pub right: bool,
    /// Scroll accumulator, down is positive
    pub scroll: i64,
    pub position: (u16, u16),
    pub total_events: u64,
    /// Events counted over the last full one-second window
    pub events_per_sec: u32,
    window_count: u32,
    window_start: Instant,
}

impl MouseTestState {
    pub fn new() -> Self {
        Self {
            left: false,
            middle: false,
            right: false,
            scroll: 0,
            position: (0, 0),
            total_events: 0,
            events_per_sec: 0,
            window_count: 0,
            window_start: Instant::now(),
        }
    }

    pub fn record(&mut self, event: &MouseEvent) {
        self.record_at(event, Instant::now());
    }

    pub fn record_at(&mut self, event: &MouseEvent, now: Instant) {
        match event.kind {
            MouseEventKind::Down(button) => self.set_button(button, true),
            MouseEventKind::Up(button) => self.set_button(button, false),
            MouseEventKind::ScrollDown => self.scroll += 1,
            MouseEventKind::ScrollUp => self.scroll -= 1,
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {}
            _ => {}
        }
        self.position = (event.column, event.row);
        self.total_events += 1;
        self.window_count += 1;
        self.roll_window(now);
    }

    /// Advance the rate window; the published rate only changes once a
    /// full second has elapsed.
    pub fn roll_window(&mut self, now: Instant) {
        if now.duration_since(self.window_start) >= Duration::from_secs(1) {
            self.events_per_sec = self.window_count;
            self.window_count = 0;
            self.window_start = now;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn set_button(&mut self, button: MouseButton, down: bool) {
        match button {
            MouseButton::Left => self.left = down,
            MouseButton::Middle => self.middle = down,
            MouseButton::Right => self.right = down,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct AudioTestState {
    pub last_burst: Option<StereoSide>,
}

#[derive(Debug)]
pub(crate) struct BenchRunState {
    pub rx: mpsc::Receiver<bench::BenchEvent>,
}

pub(crate) struct MetricsState {
    pub snapshot: HardwareSnapshot,
    pub last_refresh: Instant,
    pub interval: Duration,
}

impl MetricsState {
    pub fn new(refresh_secs: u64) -> Self {
        Self {
            snapshot: HardwareSnapshot::capture(),
            last_refresh: Instant::now(),
            interval: Duration::from_secs(refresh_secs.max(1)),
        }
    }

    pub fn refresh(&mut self) {
        self.snapshot.refresh();
        self.last_refresh = Instant::now();
    }

    pub fn maybe_refresh(&mut self) {
        if self.last_refresh.elapsed() >= self.interval {
            self.refresh();
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ErrorModalState {
    pub title: String,
    pub message: String,
    pub kind: ModalKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ModalKind {
    Error,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TuiExit {
    Quit,
}

pub(crate) struct AnimationState {
    pub tick: u64,
}

impl AnimationState {
    pub fn new() -> Self {
        Self { tick: 0 }
    }

    pub fn advance(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    pub fn spinner_char(&self) -> char {
        const FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
        FRAMES[(self.tick as usize / 6) % FRAMES.len()]
    }
}

pub(crate) struct App {
    pub config: Config,
    pub screen: Screen,
    pub selected_card: usize,
    pub display: DisplayTestState,
    pub keyboard: KeyboardTestState,
    pub mouse: MouseTestState,
    pub audio: AudioTestState,
    pub audio_engine: AudioEngine,
    pub bench_run: Option<BenchRunState>,
    pub bench_progress: Option<bench::BenchProgress>,
    pub bench_result: Option<bench::BenchResult>,
    pub bench_error: Option<String>,
    pub metrics: MetricsState,
    pub error_modal: Option<ErrorModalState>,
    pub error_return_screen: Screen,
    pub exit: Option<TuiExit>,
    pub last_tick: Instant,
    pub animation: AnimationState,
}

impl App {
    pub fn new() -> Self {
        let config = Config::load().unwrap_or_default();
        let layout = KeyLayout::from_name(&config.ui.keyboard_layout);
        let refresh_secs = config.metrics.refresh_secs;

        let mut engine = AudioEngine::new();
        engine.set_tone_hz(config.audio.tone_hz);

        Self {
            config,
            screen: Screen::Home,
            selected_card: 0,
            display: DisplayTestState::new(),
            keyboard: KeyboardTestState::new(layout),
            mouse: MouseTestState::new(),
            audio: AudioTestState::default(),
            audio_engine: engine,
            bench_run: None,
            bench_progress: None,
            bench_result: None,
            bench_error: None,
            metrics: MetricsState::new(refresh_secs),
            error_modal: None,
            error_return_screen: Screen::Home,
            exit: None,
            last_tick: Instant::now(),
            animation: AnimationState::new(),
        }
    }

    pub fn set_error(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.error_return_screen = self.screen;
        self.error_modal = Some(ErrorModalState {
            title: title.into(),
            message: message.into(),
            kind: ModalKind::Error,
        });
        self.screen = Screen::ErrorModal;
    }

    pub fn set_info(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.error_return_screen = self.screen;
        self.error_modal = Some(ErrorModalState {
            title: title.into(),
            message: message.into(),
            kind: ModalKind::Info,
        });
        self.screen = Screen::ErrorModal;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventKind, KeyEventState, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_cards_without_target_exist() {
        let null_cards: Vec<_> = TEST_CARDS.iter().filter(|c| c.target.is_none()).collect();
        assert_eq!(null_cards.len(), 2);
        assert!(null_cards.iter().any(|c| c.title == "Webcam"));
        assert!(null_cards.iter().any(|c| c.title == "Gamepad"));
    }

    #[test]
    fn test_display_stage_cycle_wraps() {
        let mut d = DisplayTestState::new();
        assert_eq!(d.stage, DisplayStage::White);

        for _ in 0..DisplayStage::ALL.len() {
            d.advance();
        }
        assert_eq!(d.stage, DisplayStage::White);

        // Stepping back from the first stage wraps to the last
        d.back();
        assert_eq!(d.stage, DisplayStage::Gradient);
        assert!(d.stage.fill().is_none());

        d.back();
        assert_eq!(d.stage, DisplayStage::Blue);
        assert_eq!(d.stage.fill(), Some(Color::Rgb(0, 0, 255)));

        d.advance();
        d.reset();
        assert_eq!(d.stage, DisplayStage::White);
    }

    #[test]
    fn test_keyboard_records_and_expands() {
        let mut kb = KeyboardTestState::new(KeyLayout::Sixty);

        kb.record_key(&key(KeyCode::Char('a')));
        assert_eq!(kb.press_count, 1);
        assert_eq!(kb.last_pressed.as_deref(), Some("A"));
        assert!(kb.verified.contains("A"));
        assert_eq!(kb.layout, KeyLayout::Sixty);

        kb.record_key(&key(KeyCode::F(1)));
        assert_eq!(kb.layout, KeyLayout::Tkl);

        // Repeated key grows the count but not the verified set
        kb.record_key(&key(KeyCode::Char('a')));
        assert_eq!(kb.press_count, 3);
        assert_eq!(kb.verified.len(), 2);
    }

    #[test]
    fn test_keyboard_reset_keeps_layout() {
        let mut kb = KeyboardTestState::new(KeyLayout::Sixty);
        kb.record_key(&key(KeyCode::F(1)));
        assert_eq!(kb.layout, KeyLayout::Tkl);

        kb.reset();
        assert!(kb.verified.is_empty());
        assert!(kb.last_pressed.is_none());
        assert_eq!(kb.press_count, 0);
        assert_eq!(kb.layout, KeyLayout::Tkl);
    }

    #[test]
    fn test_mouse_buttons_and_scroll() {
        let mut m = MouseTestState::new();

        m.record(&mouse(MouseEventKind::Down(MouseButton::Left), 10, 5));
        assert!(m.left);
        assert_eq!(m.position, (10, 5));

        m.record(&mouse(MouseEventKind::Up(MouseButton::Left), 12, 6));
        assert!(!m.left);
        assert_eq!(m.position, (12, 6));

        m.record(&mouse(MouseEventKind::ScrollDown, 12, 6));
        m.record(&mouse(MouseEventKind::ScrollDown, 12, 6));
        m.record(&mouse(MouseEventKind::ScrollUp, 12, 6));
        assert_eq!(m.scroll, 1);
        assert_eq!(m.total_events, 5);
    }

    #[test]
    fn test_mouse_rate_publishes_per_full_second() {
        let mut m = MouseTestState::new();
        let start = m.window_start;

        let ev = mouse(MouseEventKind::Moved, 0, 0);
        for i in 0..10 {
            m.record_at(&ev, start + Duration::from_millis(i * 50));
        }
        // Window not yet complete
        assert_eq!(m.events_per_sec, 0);

        m.record_at(&ev, start + Duration::from_millis(1001));
        assert_eq!(m.events_per_sec, 11);

        // Next window starts counting from zero
        m.record_at(&ev, start + Duration::from_millis(1100));
        assert_eq!(m.events_per_sec, 11);
    }

    #[test]
    fn test_mouse_reset() {
        let mut m = MouseTestState::new();
        m.record(&mouse(MouseEventKind::Down(MouseButton::Right), 3, 3));
        m.record(&mouse(MouseEventKind::ScrollDown, 3, 3));
        m.reset();
        assert!(!m.right);
        assert_eq!(m.scroll, 0);
        assert_eq!(m.total_events, 0);
        assert_eq!(m.events_per_sec, 0);
    }

    #[test]
    fn test_error_modal_remembers_origin() {
        let mut app = App::new();
        app.screen = Screen::Audio;
        app.set_error("Device error", "no output device");

        assert_eq!(app.screen, Screen::ErrorModal);
        assert_eq!(app.error_return_screen, Screen::Audio);
        let modal = app.error_modal.as_ref().unwrap();
        assert_eq!(modal.kind, ModalKind::Error);
    }
}
