//! Parrot/neon palette and style helpers.
//!
//! - **Accent**: electric cyan (focus, headers)
//! - **Positive**: neon green (gains)
//! - **Negative**: hot pink (losses, errors)
//! - **Warning**: neon orange (alerts, edit cells)
//! - **Neutral**: cool purple (secondary info)
//! - **Muted**: steel blue (hints, unfocused text)

use ratatui::style::{Color, Modifier, Style};

pub const BACKGROUND: Color = Color::Rgb(18, 18, 20);
pub const ACCENT: Color = Color::Rgb(0, 255, 255);
pub const POSITIVE: Color = Color::Rgb(0, 255, 128);
pub const NEGATIVE: Color = Color::Rgb(255, 20, 147);
pub const WARNING: Color = Color::Rgb(255, 140, 0);
pub const NEUTRAL: Color = Color::Rgb(147, 112, 219);
pub const MUTED: Color = Color::Rgb(100, 149, 237);
pub const TEXT_PRIMARY: Color = Color::White;

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn positive() -> Style {
    Style::default().fg(POSITIVE)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn neutral() -> Style {
    Style::default().fg(NEUTRAL)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn text() -> Style {
    Style::default().fg(TEXT_PRIMARY)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        muted()
    }
}

/// Row under the cursor.
pub fn cursor_row() -> Style {
    Style::default().bg(Color::Rgb(40, 40, 48))
}

/// Cell under the column cursor.
pub fn cursor_cell() -> Style {
    accent().add_modifier(Modifier::REVERSED)
}

/// Cell with an open edit session.
pub fn editing_cell() -> Style {
    warning().add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

/// Colour for a signed change: green up, pink down, muted flat.
pub fn change_color(value: f64) -> Color {
    if value > 0.0 {
        POSITIVE
    } else if value < 0.0 {
        NEGATIVE
    } else {
        MUTED
    }
}

pub fn change_style(value: f64) -> Style {
    Style::default().fg(change_color(value))
}

/// Heatmap tile background for a percent change. Saturates at ±3%.
pub fn heat_color(percent_change: f64) -> Color {
    let t = (percent_change.abs() / 3.0).min(1.0);
    let lerp = |from: u8, to: u8| -> u8 { (from as f64 + (to as f64 - from as f64) * t).round() as u8 };
    if percent_change > 0.0 {
        Color::Rgb(lerp(30, 0), lerp(30, 150), lerp(34, 70))
    } else if percent_change < 0.0 {
        Color::Rgb(lerp(30, 170), lerp(30, 10), lerp(34, 90))
    } else {
        Color::Rgb(30, 30, 34)
    }
}
