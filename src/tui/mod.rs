//! TUI module for the interactive page.
//!
//! Organized along FP/Unix boundaries:
//! - `state`: Pure data types (Page, Action, Transition)
//! - `update`: Pure state transitions
//! - `view`: Pure rendering and hit-testing
//! - `theme`: Colors and styles
//! - `run`: Effects (terminal, input, timers)

pub mod run;
pub mod state;
pub mod theme;
pub mod update;
pub mod view;
