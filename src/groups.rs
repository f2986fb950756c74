//! Group-coordinated handlers: FAQ accordion and tab switcher.
//!
//! The accordion is multi-expand: rows never affect each other.
//! The tab switcher deactivates everything before activating one header
//! and its pane, so at most one of each is active.

use crate::types::{FaqEntry, TabHeader, TabPane};

// ============================================================================
// FAQ ACCORDION
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaqItem {
    pub entry: FaqEntry,
    pub expanded: bool,
}

impl FaqItem {
    /// Disclosure glyph, a pure function of the expanded flag.
    pub fn icon(&self) -> &'static str {
        if self.expanded { "-" } else { "+" }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FaqAccordion {
    pub items: Vec<FaqItem>,
}

impl FaqAccordion {
    /// All rows start collapsed.
    pub fn new(entries: &[FaqEntry]) -> Self {
        FaqAccordion {
            items: entries
                .iter()
                .cloned()
                .map(|entry| FaqItem {
                    entry,
                    expanded: false,
                })
                .collect(),
        }
    }

    /// Flip one row. Unknown indices are ignored.
    pub fn toggle(mut self, index: usize) -> Self {
        if let Some(item) = self.items.get_mut(index) {
            item.expanded = !item.expanded;
        }
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// ============================================================================
// TAB SWITCHER
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TabSwitcher {
    pub headers: Vec<TabHeader>,
    pub panes: Vec<TabPane>,
    /// Index of the active header, if any.
    pub active_header: Option<usize>,
    /// Index of the visible pane, if any.
    pub active_pane: Option<usize>,
}

impl TabSwitcher {
    /// Build the switcher and optionally pre-select a header.
    pub fn new(headers: &[TabHeader], panes: &[TabPane], initial: Option<usize>) -> Self {
        let switcher = TabSwitcher {
            headers: headers.to_vec(),
            panes: panes.to_vec(),
            active_header: None,
            active_pane: None,
        };
        match initial {
            Some(index) => switcher.select(index),
            None => switcher,
        }
    }

    /// Activate a header and the pane its target names.
    ///
    /// A header whose target matches no pane becomes active with no pane
    /// visible. Selecting a header index that does not exist is a no-op.
    pub fn select(self, index: usize) -> Self {
        let Some(header) = self.headers.get(index) else {
            return self;
        };

        let active_pane = self.panes.iter().position(|p| p.id == header.target);
        if active_pane.is_none() {
            tracing::debug!(target_id = %header.target, "tab target has no pane");
        }

        TabSwitcher {
            active_header: Some(index),
            active_pane,
            ..self
        }
    }

    pub fn active_pane(&self) -> Option<&TabPane> {
        self.active_pane.and_then(|i| self.panes.get(i))
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active_header == Some(index)
    }
}

// ============================================================================
// TESTS
// ============================================================================
