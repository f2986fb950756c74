//! TUI color semantics and style constants.
//!
//! Pure data, consumed by the rendering layer. The page has a light and
//! a dark palette; highlights and the counter bands use fixed colors that
//! read the same in both.
//!
//! Color semantics:
//! - Green: success (click confirmation, positive counter, form success)
//! - Orange: attention (hover detection)
//! - Blue: info (key press)
//! - Red: error (negative counter, inline validation errors)
//! - Cyan: focus and active tab

use ratatui::style::{Color, Modifier, Style};

use crate::types::{CounterBand, Highlight, ThemeMode};

// ============================================================================
// HIGHLIGHTS
// ============================================================================

const CLICK_BG: Color = Color::Rgb(0xe8, 0xf5, 0xe9);
const HOVER_BG: Color = Color::Rgb(0xff, 0xf3, 0xe0);
const KEY_BG: Color = Color::Rgb(0xe3, 0xf2, 0xfd);

const COUNTER_POSITIVE: Color = Color::Rgb(0x2e, 0xcc, 0x71);
const COUNTER_NEGATIVE: Color = Color::Rgb(0xe7, 0x4c, 0x3c);

/// Background of a highlighted feedback region. Text goes black so it
/// stays readable on the pale backgrounds in either theme.
pub fn highlight_style(highlight: Highlight) -> Style {
    let bg = match highlight {
        Highlight::Success => CLICK_BG,
        Highlight::Attention => HOVER_BG,
        Highlight::Info => KEY_BG,
    };
    Style::new().fg(Color::Black).bg(bg)
}

/// Counter text color. Zero keeps the palette's default.
pub fn counter_style(band: CounterBand) -> Style {
    match band {
        CounterBand::Positive => Style::new().fg(COUNTER_POSITIVE).add_modifier(Modifier::BOLD),
        CounterBand::Negative => Style::new().fg(COUNTER_NEGATIVE).add_modifier(Modifier::BOLD),
        CounterBand::Zero => Style::new().add_modifier(Modifier::BOLD),
    }
}

// ============================================================================
// PALETTES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Page background and default text.
    pub base: Style,
    /// Borders of regions and controls.
    pub border: Style,
}

pub fn palette(mode: ThemeMode) -> Palette {
    match mode {
        ThemeMode::Light => Palette {
            base: Style::new().fg(Color::Black).bg(Color::White),
            border: Style::new().fg(Color::Gray),
        },
        ThemeMode::Dark => Palette {
            base: Style::new().fg(Color::White).bg(Color::Black),
            border: Style::new().fg(Color::DarkGray),
        },
    }
}

// ============================================================================
// UI ELEMENT STYLES
// ============================================================================

/// Title bar / section header.
pub const STYLE_TITLE: Style = Style::new().add_modifier(Modifier::BOLD);

/// Border of the focused control.
pub const STYLE_FOCUSED: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);

/// Active tab header.
pub const STYLE_ACTIVE_TAB: Style = Style::new().fg(Color::Black).bg(Color::Cyan);

/// Inline validation error.
pub const STYLE_ERROR: Style = Style::new().fg(Color::Red);

/// Form success banner.
pub const STYLE_SUCCESS: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Footer / help line.
pub const STYLE_HELP: Style = Style::new().fg(Color::DarkGray);

// ============================================================================
// TESTS
// ============================================================================
