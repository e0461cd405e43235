//! Companion dispatcher
//!
//! Connects the hotkey registry to the overlay:
//! - toggle_overlay: show or hide the overlay
//! - insert_snippet: cycle through the configured snippets
//! - format_code: request code formatting

mod companion;

pub use companion::{Command, Companion};
