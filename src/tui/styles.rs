//! Styles for the form and result panels.

use ratatui::style::{Color, Modifier, Style};

use crate::domain::ObesityRisk;

const ACCENT: Color = Color::Rgb(45, 212, 191);
const ACCENT_DEEP: Color = Color::Rgb(15, 118, 110);
const FOREGROUND: Color = Color::Rgb(248, 250, 252);
const BACKGROUND: Color = Color::Rgb(15, 23, 42);
const SLATE: Color = Color::Rgb(148, 163, 184);
const MUTED: Color = Color::Rgb(100, 116, 139);

const RISK_LOW: Color = Color::Rgb(16, 185, 129);
const RISK_MODERATE: Color = Color::Rgb(251, 191, 36);
const RISK_HIGH: Color = Color::Rgb(249, 115, 22);
const RISK_VERY_HIGH: Color = Color::Rgb(244, 63, 94);

/// Named styles used across the views.
pub struct Theme;

impl Theme {
    #[must_use]
    pub fn title() -> Style {
        Style::default().fg(FOREGROUND).add_modifier(Modifier::BOLD)
    }

    /// Panel titles, the focused field label and key hints.
    #[must_use]
    pub fn focused() -> Style {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn text() -> Style {
        Style::default().fg(FOREGROUND)
    }

    /// Labels and key descriptions.
    #[must_use]
    pub fn text_secondary() -> Style {
        Style::default().fg(SLATE)
    }

    #[must_use]
    pub fn text_muted() -> Style {
        Style::default().fg(MUTED)
    }

    #[must_use]
    pub fn warning() -> Style {
        Style::default().fg(RISK_MODERATE)
    }

    #[must_use]
    pub fn danger() -> Style {
        Style::default().fg(RISK_VERY_HIGH)
    }

    #[must_use]
    pub fn border() -> Style {
        Style::default().fg(SLATE)
    }

    #[must_use]
    pub fn border_focused() -> Style {
        Style::default().fg(ACCENT_DEEP)
    }

    /// Predict button, unfocused.
    #[must_use]
    pub fn button() -> Style {
        Style::default()
            .fg(FOREGROUND)
            .bg(ACCENT_DEEP)
            .add_modifier(Modifier::BOLD)
    }

    /// Predict button, focused.
    #[must_use]
    pub fn button_focused() -> Style {
        Style::default()
            .fg(BACKGROUND)
            .bg(ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for a predicted risk level; unknown codes render muted.
    #[must_use]
    pub fn risk(level: Option<ObesityRisk>) -> Style {
        let color = match level {
            Some(ObesityRisk::Low) => RISK_LOW,
            Some(ObesityRisk::Moderate) => RISK_MODERATE,
            Some(ObesityRisk::High) => RISK_HIGH,
            Some(ObesityRisk::VeryHigh) => RISK_VERY_HIGH,
            None => MUTED,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }
}
