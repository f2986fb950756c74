//! Theme toggle and counter.
//!
//! Both are derived purely from their own value: the toggle label from
//! the current mode, the counter color band from the sign.

use crate::types::{CounterBand, ThemeMode};

// ============================================================================
// THEME
// ============================================================================

impl ThemeMode {
    /// Flip between light and dark.
    pub fn toggle(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    /// Label of the toggle control: names the mode the next click switches to.
    pub fn toggle_label(self) -> &'static str {
        match self {
            ThemeMode::Light => "🌙 Dark Mode",
            ThemeMode::Dark => "☀️ Light Mode",
        }
    }
}

// ============================================================================
// COUNTER
// ============================================================================

/// Unbounded signed counter starting at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Counter {
    pub value: i64,
}

impl Counter {
    pub fn increment(self) -> Self {
        Counter {
            value: self.value.saturating_add(1),
        }
    }

    pub fn decrement(self) -> Self {
        Counter {
            value: self.value.saturating_sub(1),
        }
    }

    pub fn band(self) -> CounterBand {
        match self.value {
            v if v > 0 => CounterBand::Positive,
            v if v < 0 => CounterBand::Negative,
            _ => CounterBand::Zero,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_label_names_target_mode() {
        assert_eq!(ThemeMode::Light.toggle_label(), "🌙 Dark Mode");
        assert_eq!(ThemeMode::Dark.toggle_label(), "☀️ Light Mode");
    }

    #[test]
    fn toggle_is_an_involution() {
        for mode in [ThemeMode::Light, ThemeMode::Dark] {
            assert_eq!(mode.toggle().toggle(), mode);
            assert_eq!(mode.toggle().toggle().toggle_label(), mode.toggle_label());
        }
    }

    #[test]
    fn counter_starts_at_zero_with_default_band() {
        let counter = Counter::default();
        assert_eq!(counter.value, 0);
        assert_eq!(counter.band(), CounterBand::Zero);
    }

    #[test]
    fn counter_band_follows_sign() {
        assert_eq!(Counter::default().increment().band(), CounterBand::Positive);
        assert_eq!(Counter::default().decrement().band(), CounterBand::Negative);
        assert_eq!(
            Counter::default().increment().decrement().band(),
            CounterBand::Zero
        );
    }

    #[test]
    fn counter_goes_below_zero_without_clamp() {
        let mut counter = Counter::default();
        for _ in 0..3 {
            counter = counter.decrement();
        }
        assert_eq!(counter.value, -3);
    }
}
