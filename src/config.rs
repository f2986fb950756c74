//! Page configuration: the content of the page and its timing constants.
//!
//! Loaded from JSON. Every field has a default, so a partial file (or no
//! file at all) yields a complete page. Structural problems in the page
//! description are fatal at startup; a tab whose target names no pane is
//! not one of them.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{FaqEntry, TabHeader, TabPane, ThemeMode};

const APP_DIR: &str = "page-events-demo";
const CONFIG_FILE: &str = "config.json";

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Init(#[from] InitError),
}

/// A page description that cannot be brought up.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InitError {
    #[error("tab header {index} has an empty label")]
    EmptyTabLabel { index: usize },
    #[error("FAQ entry {index} has an empty question")]
    EmptyFaqQuestion { index: usize },
    #[error("duplicate tab pane id \"{id}\"")]
    DuplicatePaneId { id: String },
    #[error("{name} must be greater than zero")]
    ZeroDelay { name: &'static str },
    #[error("initial tab {index} does not exist ({count} tabs)")]
    InitialTabOutOfRange { index: usize, count: usize },
}

// ============================================================================
// CONFIG
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub initial_theme: ThemeMode,
    /// Delay before a key press highlight fades.
    pub highlight_clear_ms: u64,
    /// Delay before a successful submission resets the form.
    pub success_reset_ms: u64,
    /// Header selected when the page opens. Unset selects the first tab.
    pub initial_tab: Option<usize>,
    pub faq: Vec<FaqEntry>,
    pub tabs: Vec<TabHeader>,
    pub panes: Vec<TabPane>,
}

impl Default for PageConfig {
    fn default() -> Self {
        PageConfig {
            initial_theme: ThemeMode::Light,
            highlight_clear_ms: 300,
            success_reset_ms: 3000,
            initial_tab: None,
            faq: vec![
                faq(
                    "What is an event listener?",
                    "A function that runs when a specific event, such as a click or key press, happens on an element.",
                ),
                faq(
                    "Why validate forms on the client?",
                    "Immediate feedback: users see what is wrong while typing instead of after a round trip.",
                ),
                faq(
                    "Can several answers be open at once?",
                    "Yes. Each question toggles independently of the others.",
                ),
            ],
            tabs: vec![
                tab("HTML", "html"),
                tab("CSS", "css"),
                tab("JavaScript", "js"),
            ],
            panes: vec![
                pane("html", "HTML gives the page its structure: headings, paragraphs, forms and buttons."),
                pane("css", "CSS controls presentation: colors, spacing, layout and themes."),
                pane("js", "JavaScript reacts to events and changes what the page shows."),
            ],
        }
    }
}

fn faq(question: &str, answer: &str) -> FaqEntry {
    FaqEntry {
        question: question.to_string(),
        answer: answer.to_string(),
    }
}

fn tab(label: &str, target: &str) -> TabHeader {
    TabHeader {
        label: label.to_string(),
        target: target.to_string(),
    }
}

fn pane(id: &str, body: &str) -> TabPane {
    TabPane {
        id: id.to_string(),
        body: body.to_string(),
    }
}

/// Delays for the two deferred actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    pub highlight_clear: Duration,
    pub success_reset: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        PageConfig::default().timings()
    }
}

impl PageConfig {
    /// Header selected at startup: the configured one, else the first tab
    /// when there is one.
    pub fn initial_tab(&self) -> Option<usize> {
        self.initial_tab
            .or_else(|| (!self.tabs.is_empty()).then_some(0))
    }

    pub fn timings(&self) -> Timings {
        Timings {
            highlight_clear: Duration::from_millis(self.highlight_clear_ms),
            success_reset: Duration::from_millis(self.success_reset_ms),
        }
    }

    /// Startup checks on the page description.
    pub fn check(&self) -> Result<(), InitError> {
        if self.highlight_clear_ms == 0 {
            return Err(InitError::ZeroDelay {
                name: "highlight_clear_ms",
            });
        }
        if self.success_reset_ms == 0 {
            return Err(InitError::ZeroDelay {
                name: "success_reset_ms",
            });
        }

        if let Some(index) = self.faq.iter().position(|f| f.question.trim().is_empty()) {
            return Err(InitError::EmptyFaqQuestion { index });
        }
        if let Some(index) = self.tabs.iter().position(|t| t.label.trim().is_empty()) {
            return Err(InitError::EmptyTabLabel { index });
        }

        let mut seen = HashSet::new();
        for pane in &self.panes {
            if !seen.insert(pane.id.as_str()) {
                return Err(InitError::DuplicatePaneId {
                    id: pane.id.clone(),
                });
            }
        }

        if let Some(index) = self.initial_tab {
            if index >= self.tabs.len() {
                return Err(InitError::InitialTabOutOfRange {
                    index,
                    count: self.tabs.len(),
                });
            }
        }

        Ok(())
    }
}

// ============================================================================
// LOADING
// ============================================================================

/// Where the effective configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults,
}

/// Default config location: `<config_dir>/page-events-demo/config.json`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

/// Default log location: `<data_local_dir>/page-events-demo/page-events-demo.log`.
pub fn default_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR)
        .join(format!("{}.log", APP_DIR))
}

/// Load and check the page configuration.
///
/// An explicit path must exist. Without one, the default location is used
/// when present, otherwise the built-in page.
pub fn load_config(explicit: Option<&Path>) -> Result<(PageConfig, ConfigSource), ConfigError> {
    let path = match explicit {
        Some(p) => Some(p.to_path_buf()),
        None => default_config_path().filter(|p| p.is_file()),
    };

    let (config, source) = match path {
        Some(path) => (read_config(&path)?, ConfigSource::File(path)),
        None => (PageConfig::default(), ConfigSource::Defaults),
    };

    config.check()?;
    Ok((config, source))
}

fn read_config(path: &Path) -> Result<PageConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

// ============================================================================
// TESTS
// ============================================================================
