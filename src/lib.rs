//! page-events-demo: event feedback, interactive widgets and form validation
//! on a terminal page.

pub mod config;
pub mod controls;
pub mod feedback;
pub mod groups;
pub mod logging;
pub mod report;
pub mod timers;
pub mod tui;
pub mod types;
pub mod validation;
