//! TUI color theme.

use ratatui::style::Color;

use crate::metrics::memory::UsageTier;

#[derive(Clone, Copy)]
pub(crate) struct Theme {
    // Primary palette
    pub accent: Color,
    pub optimal: Color,
    pub caution: Color,
    pub strong_caution: Color,
    pub critical: Color,

    // UI chrome
    pub border: Color,
    pub muted: Color,
    pub text: Color,
    pub text_dim: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Rgb(0, 212, 255),
            optimal: Color::Rgb(163, 230, 53),
            caution: Color::Rgb(251, 191, 36),
            strong_caution: Color::Rgb(251, 146, 60),
            critical: Color::Rgb(255, 68, 85),
            border: Color::Gray,
            muted: Color::DarkGray,
            text: Color::White,
            text_dim: Color::Gray,
        }
    }
}

impl Theme {
    pub fn tier_color(&self, tier: UsageTier) -> Color {
        match tier {
            UsageTier::Ok => self.optimal,
            UsageTier::Caution => self.caution,
            UsageTier::StrongCaution => self.strong_caution,
            UsageTier::Critical => self.critical,
        }
    }
}
