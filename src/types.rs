//! Domain types for page-events-demo.
//!
//! Plain data shared by the handlers, the configuration layer and the
//! rendering layer. Behavior lives in the modules that own each concern.

use serde::{Deserialize, Serialize};

// ============================================================================
// ENUMS
// ============================================================================

/// Document-level theme flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

/// Display color band of the counter, derived from its sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterBand {
    /// Value > 0: green.
    Positive,
    /// Value < 0: red.
    Negative,
    /// Value == 0: default text color.
    Zero,
}

/// Background highlight applied to a feedback region.
///
/// Each region has its own fixed highlight; the theme layer maps them
/// to concrete colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    /// Click confirmation (light green).
    Success,
    /// Hover detection (light orange).
    Attention,
    /// Key press (light blue).
    Info,
}

/// One of the four validated form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Password,
    Phone,
}

impl Field {
    /// All fields in form order.
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Password, Field::Phone];

    /// Position of the field in form order.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Label shown next to the input.
    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Password => "Password",
            Field::Phone => "Phone",
        }
    }
}

// ============================================================================
// PAGE DESCRIPTION
// ============================================================================

/// A question/answer pair in the FAQ accordion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

/// A tab header and the id of the pane it reveals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabHeader {
    pub label: String,
    /// Id of the pane to show. May name a pane that does not exist.
    pub target: String,
}

/// A tab content pane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabPane {
    pub id: String,
    pub body: String,
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Output format for headless reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable pretty output.
    #[default]
    Human,
    /// Machine-readable JSON.
    Json,
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_indices_follow_form_order() {
        for (i, field) in Field::ALL.iter().enumerate() {
            assert_eq!(field.index(), i);
        }
    }

    #[test]
    fn theme_mode_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ThemeMode::Dark).unwrap(), "\"dark\"");
        let mode: ThemeMode = serde_json::from_str("\"light\"").unwrap();
        assert_eq!(mode, ThemeMode::Light);
    }

    #[test]
    fn field_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Field::Phone).unwrap(), "\"phone\"");
    }
}
