//! Click, hover and keypress feedback regions.
//!
//! Pure transitions: each handler consumes the panel and returns the
//! next one. Deferred highlight clearing is requested by the caller
//! through the timer layer; this module only knows how to clear.

use crossterm::event::{KeyCode, KeyEvent};

use crate::types::Highlight;

pub const CLICK_PLACEHOLDER: &str = "Click anywhere in this box";
pub const CLICK_CONFIRMED: &str = "You clicked! Great job!";
pub const HOVER_PLACEHOLDER: &str = "Hover your mouse over this box";
pub const HOVER_DETECTED: &str = "Mouse detected! Well done!";
pub const NO_KEY: &str = "None";

/// Visible content of a feedback region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub message: &'static str,
    pub highlight: Option<Highlight>,
}

impl Region {
    fn placeholder(message: &'static str) -> Self {
        Region {
            message,
            highlight: None,
        }
    }
}

/// The three event demo regions plus the last-key display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventsPanel {
    pub click: Region,
    pub hover: Region,
    /// Identifier of the last key pressed anywhere on the page.
    pub last_key: String,
    pub key_highlight: Option<Highlight>,
}

impl Default for EventsPanel {
    fn default() -> Self {
        EventsPanel {
            click: Region::placeholder(CLICK_PLACEHOLDER),
            hover: Region::placeholder(HOVER_PLACEHOLDER),
            last_key: NO_KEY.to_string(),
            key_highlight: None,
        }
    }
}

impl EventsPanel {
    /// Click on the click region. Idempotent.
    pub fn click(self) -> Self {
        EventsPanel {
            click: Region {
                message: CLICK_CONFIRMED,
                highlight: Some(Highlight::Success),
            },
            ..self
        }
    }

    /// Pointer entered the hover region.
    pub fn hover_enter(self) -> Self {
        EventsPanel {
            hover: Region {
                message: HOVER_DETECTED,
                highlight: Some(Highlight::Attention),
            },
            ..self
        }
    }

    /// Pointer left the hover region: restore the exact placeholder.
    pub fn hover_leave(self) -> Self {
        EventsPanel {
            hover: Region::placeholder(HOVER_PLACEHOLDER),
            ..self
        }
    }

    pub fn is_hovered(&self) -> bool {
        self.hover.highlight.is_some()
    }

    /// Record a page-wide key press and light up the keypress region.
    pub fn key_down(self, key: impl Into<String>) -> Self {
        EventsPanel {
            last_key: key.into(),
            key_highlight: Some(Highlight::Info),
            ..self
        }
    }

    /// Scheduled clear of the keypress highlight. No-op when already clear.
    pub fn clear_key_highlight(self) -> Self {
        EventsPanel {
            key_highlight: None,
            ..self
        }
    }

    /// Restore every region and the last-key display in one step.
    pub fn reset(self) -> Self {
        EventsPanel::default()
    }
}

/// Browser-style identifier for a key press (`KeyboardEvent.key` naming).
pub fn key_name(key: &KeyEvent) -> String {
    match key.code {
        KeyCode::Char(' ') => " ".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Tab | KeyCode::BackTab => "Tab".to_string(),
        KeyCode::Esc => "Escape".to_string(),
        KeyCode::Left => "ArrowLeft".to_string(),
        KeyCode::Right => "ArrowRight".to_string(),
        KeyCode::Up => "ArrowUp".to_string(),
        KeyCode::Down => "ArrowDown".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::PageUp => "PageUp".to_string(),
        KeyCode::PageDown => "PageDown".to_string(),
        KeyCode::Delete => "Delete".to_string(),
        KeyCode::Insert => "Insert".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        _ => "Unidentified".to_string(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
