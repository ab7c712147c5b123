//! Virtual keyboard layouts, key labeling, and auto-expansion rules.
//!
//! The keyboard test starts in the configured layout and grows when
//! keys outside it arrive: any numpad key forces the full layout, and
//! an F-row or nav-cluster key promotes 60% to TKL. Layouts only ever
//! expand during a session.

use crossterm::event::{KeyCode, KeyEvent, KeyEventState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum KeyLayout {
    Sixty,
    Tkl,
    Full,
}

impl KeyLayout {
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "60" | "sixty" => KeyLayout::Sixty,
            "full" | "100" => KeyLayout::Full,
            _ => KeyLayout::Tkl,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            KeyLayout::Sixty => "60%",
            KeyLayout::Tkl => "TKL",
            KeyLayout::Full => "Full",
        }
    }
}

/// Which physical region a key press belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KeyZone {
    Main,
    FnNav,
    Numpad,
}

pub(crate) fn key_zone(key: &KeyEvent) -> KeyZone {
    // Keypad origin is only reported under the kitty keyboard protocol;
    // without it numpad digits are indistinguishable from the top row.
    if key.state.contains(KeyEventState::KEYPAD) {
        return KeyZone::Numpad;
    }

    match key.code {
        KeyCode::F(_)
        | KeyCode::Insert
        | KeyCode::Delete
        | KeyCode::Home
        | KeyCode::End
        | KeyCode::PageUp
        | KeyCode::PageDown
        | KeyCode::Up
        | KeyCode::Down
        | KeyCode::Left
        | KeyCode::Right => KeyZone::FnNav,
        _ => KeyZone::Main,
    }
}

/// Layout after seeing a key from `zone`. Never shrinks.
pub(crate) fn expanded_layout(current: KeyLayout, zone: KeyZone) -> KeyLayout {
    match zone {
        KeyZone::Numpad => KeyLayout::Full,
        KeyZone::FnNav => current.max(KeyLayout::Tkl),
        KeyZone::Main => current,
    }
}

/// Display label for a key press, matching the virtual keycap labels
pub(crate) fn key_label(key: &KeyEvent) -> String {
    match key.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_uppercase().to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Backspace => "Bksp".to_string(),
        KeyCode::Tab | KeyCode::BackTab => "Tab".to_string(),
        KeyCode::CapsLock => "Caps".to_string(),
        KeyCode::F(n) => format!("F{n}"),
        KeyCode::Insert => "Ins".to_string(),
        KeyCode::Delete => "Del".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::PageUp => "PgUp".to_string(),
        KeyCode::PageDown => "PgDn".to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        other => format!("{other:?}"),
    }
}

const ROW_FN: &[&str] = &[
    "Esc", "F1", "F2", "F3", "F4", "F5", "F6", "F7", "F8", "F9", "F10", "F11", "F12",
];

const ROWS_MAIN: &[&[&str]] = &[
    &[
        "`", "1", "2", "3", "4", "5", "6", "7", "8", "9", "0", "-", "=", "Bksp",
    ],
    &[
        "Tab", "Q", "W", "E", "R", "T", "Y", "U", "I", "O", "P", "[", "]", "\\",
    ],
    &[
        "Caps", "A", "S", "D", "F", "G", "H", "J", "K", "L", ";", "'", "Enter",
    ],
    &[
        "Shift", "Z", "X", "C", "V", "B", "N", "M", ",", ".", "/", "Shift",
    ],
    &["Ctrl", "Super", "Alt", "Space", "Alt", "Fn", "Ctrl"],
];

const ROWS_NAV: &[&[&str]] = &[
    &["Ins", "Home", "PgUp"],
    &["Del", "End", "PgDn"],
    &["↑"],
    &["←", "↓", "→"],
];

const ROWS_NUMPAD: &[&[&str]] = &[
    &["Num", "/", "*", "-"],
    &["7", "8", "9", "+"],
    &["4", "5", "6"],
    &["1", "2", "3"],
    &["0", "."],
];

/// Keycap rows rendered for a layout, top to bottom
pub(crate) fn rows_for(layout: KeyLayout) -> Vec<&'static [&'static str]> {
    let mut rows: Vec<&'static [&'static str]> = Vec::new();
    if layout >= KeyLayout::Tkl {
        rows.push(ROW_FN);
    }
    rows.extend_from_slice(ROWS_MAIN);
    if layout >= KeyLayout::Tkl {
        rows.extend_from_slice(ROWS_NAV);
    }
    if layout == KeyLayout::Full {
        rows.extend_from_slice(ROWS_NUMPAD);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn numpad_key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::KEYPAD,
        }
    }

    #[test]
    fn test_layout_from_name() {
        assert_eq!(KeyLayout::from_name("60"), KeyLayout::Sixty);
        assert_eq!(KeyLayout::from_name("Full"), KeyLayout::Full);
        assert_eq!(KeyLayout::from_name("tkl"), KeyLayout::Tkl);
        assert_eq!(KeyLayout::from_name("garbage"), KeyLayout::Tkl);
    }

    #[test]
    fn test_zone_classification() {
        assert_eq!(key_zone(&key(KeyCode::Char('a'))), KeyZone::Main);
        assert_eq!(key_zone(&key(KeyCode::Enter)), KeyZone::Main);
        assert_eq!(key_zone(&key(KeyCode::F(5))), KeyZone::FnNav);
        assert_eq!(key_zone(&key(KeyCode::Home)), KeyZone::FnNav);
        assert_eq!(key_zone(&key(KeyCode::Up)), KeyZone::FnNav);
        assert_eq!(key_zone(&numpad_key(KeyCode::Char('7'))), KeyZone::Numpad);
    }

    #[test]
    fn test_expansion_only_grows() {
        // Numpad forces full from anywhere
        assert_eq!(
            expanded_layout(KeyLayout::Sixty, KeyZone::Numpad),
            KeyLayout::Full
        );
        assert_eq!(
            expanded_layout(KeyLayout::Tkl, KeyZone::Numpad),
            KeyLayout::Full
        );

        // F/nav promotes 60% to TKL but never demotes full
        assert_eq!(
            expanded_layout(KeyLayout::Sixty, KeyZone::FnNav),
            KeyLayout::Tkl
        );
        assert_eq!(
            expanded_layout(KeyLayout::Full, KeyZone::FnNav),
            KeyLayout::Full
        );

        // Main-block keys never change the layout
        assert_eq!(
            expanded_layout(KeyLayout::Sixty, KeyZone::Main),
            KeyLayout::Sixty
        );
        assert_eq!(
            expanded_layout(KeyLayout::Full, KeyZone::Main),
            KeyLayout::Full
        );
    }

    #[test]
    fn test_key_labels() {
        assert_eq!(key_label(&key(KeyCode::Char('a'))), "A");
        assert_eq!(key_label(&key(KeyCode::Char(' '))), "Space");
        assert_eq!(key_label(&key(KeyCode::F(12))), "F12");
        assert_eq!(key_label(&key(KeyCode::Backspace)), "Bksp");
        assert_eq!(key_label(&key(KeyCode::Left)), "←");
    }

    #[test]
    fn test_rows_grow_with_layout() {
        let sixty = rows_for(KeyLayout::Sixty);
        let tkl = rows_for(KeyLayout::Tkl);
        let full = rows_for(KeyLayout::Full);

        assert!(sixty.len() < tkl.len());
        assert!(tkl.len() < full.len());
        assert!(!sixty.contains(&ROW_FN));
        assert!(tkl.contains(&ROW_FN));
        assert!(full.iter().any(|r| r.contains(&"Num")));
    }
}
