//! TUI state algebra: pure types, zero effects.
//!
//! These types define the entire page state space. The transition function
//! and the rendering layer both program against them.
//!
//! Design principle: [`Page`] owns every piece of visible state (one owned
//! value per handler). The compiled validator and the delays are read-only
//! context shared by all transitions and live in [`Context`].

use crossterm::event::{KeyEvent, MouseEvent};

use crate::config::{PageConfig, Timings};
use crate::controls::Counter;
use crate::feedback::EventsPanel;
use crate::groups::{FaqAccordion, TabSwitcher};
use crate::timers::TimerKey;
use crate::types::{Field, ThemeMode};
use crate::validation::{FormState, ValidationError, Validator};

// ============================================================================
// APP EVENTS
// ============================================================================

/// Everything the event loop can receive from its channel.
///
/// A terminal reader thread is the only producer. Timers are not events:
/// the loop wakes up for them through `recv_timeout`.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize,
}

// ============================================================================
// TARGETS
// ============================================================================

/// An element of the page that receives events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    ClickBox,
    HoverBox,
    ResetEvents,
    ThemeToggle,
    Decrement,
    Increment,
    FaqQuestion(usize),
    TabHeader(usize),
    Input(Field),
    Submit,
}

impl Target {
    /// Whether keyboard focus can rest on this target.
    pub fn is_focusable(self) -> bool {
        !matches!(self, Target::HoverBox)
    }
}

// ============================================================================
// PAGE STATE
// ============================================================================

/// All visible, mutable page state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub events: EventsPanel,
    pub theme: ThemeMode,
    pub counter: Counter,
    pub faq: FaqAccordion,
    pub tabs: TabSwitcher,
    pub form: FormState,
    /// Control that receives Enter/Space and typed characters.
    pub focus: Option<Target>,
}

impl Page {
    pub fn from_config(config: &PageConfig) -> Self {
        Page {
            events: EventsPanel::default(),
            theme: config.initial_theme,
            counter: Counter::default(),
            faq: FaqAccordion::new(&config.faq),
            tabs: TabSwitcher::new(&config.tabs, &config.panes, config.initial_tab()),
            form: FormState::default(),
            focus: Some(Target::ClickBox),
        }
    }

    /// Focusable controls in visual order.
    pub fn focus_order(&self) -> Vec<Target> {
        let mut order = vec![
            Target::ClickBox,
            Target::ResetEvents,
            Target::ThemeToggle,
            Target::Decrement,
            Target::Increment,
        ];
        order.extend((0..self.faq.len()).map(Target::FaqQuestion));
        order.extend((0..self.tabs.headers.len()).map(Target::TabHeader));
        order.extend(Field::ALL.iter().map(|&f| Target::Input(f)));
        order.push(Target::Submit);
        order
    }
}

/// Placeholder used while a transition owns the real page.
impl Default for Page {
    fn default() -> Self {
        Page::from_config(&PageConfig::default())
    }
}

/// Read-only collaborators of every transition.
#[derive(Debug, Clone)]
pub struct Context {
    pub validator: Validator,
    pub timings: Timings,
}

impl Context {
    pub fn new(timings: Timings) -> Result<Self, ValidationError> {
        Ok(Context {
            validator: Validator::new()?,
            timings,
        })
    }
}

// ============================================================================
// APPLICATION STATE
// ============================================================================

/// Top-level TUI model.
#[derive(Debug)]
pub struct App {
    pub page: Page,
    pub context: Context,
    /// Set to true when the app should exit before the next frame.
    pub should_quit: bool,
}

impl App {
    pub fn new(config: &PageConfig) -> Result<Self, ValidationError> {
        Ok(App {
            page: Page::from_config(config),
            context: Context::new(config.timings())?,
            should_quit: false,
        })
    }
}

// ============================================================================
// ACTIONS
// ============================================================================

/// Semantic user action, decoupled from raw terminal events.
///
/// The effects layer maps key presses and mouse events to Actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Mouse click on a target (or a keyboard shortcut standing in for one).
    Click(Target),
    /// Enter/Space on the focused control.
    Activate,
    HoverEnter,
    HoverLeave,
    /// Page-wide key press, carrying the key identifier.
    KeyDown(String),
    /// Character typed into the focused input.
    TypeChar(char),
    /// Delete the last character of the focused input.
    Backspace,
    /// Submit the form from an input, keeping focus in that input.
    Submit,
    FocusNext,
    FocusPrev,
    /// A scheduled timer reached its deadline.
    TimerFired(TimerKey),
    Quit,
}

// ============================================================================
// TRANSITIONS
// ============================================================================

/// Result of a pure state transition.
///
/// Follows the Elm/TEA pattern: pure code describes WHAT should happen,
/// the effects layer decides HOW.
#[derive(Debug, PartialEq)]
pub enum Transition {
    /// Render this page.
    Page(Page),
    /// Render this page and run the timer effects.
    Effects(Page, Vec<Effect>),
    /// Quit the application.
    Quit,
}

/// Timer effect requested by a pure transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Arm (or re-arm) a timer.
    Schedule {
        key: TimerKey,
        after: std::time::Duration,
    },
    /// Disarm a timer if pending.
    Cancel(TimerKey),
}

// ============================================================================
// TESTS
// ============================================================================
