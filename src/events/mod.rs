//! Events emitted by the companion after handling input
//!
//! Events are broadcast so that any number of observers (the binary's
//! logger, tests) can follow overlay and hotkey state.

use serde::{Deserialize, Serialize};

/// Events emitted by the companion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CompanionEvent {
    /// Overlay became visible
    OverlayShown,

    /// Overlay was hidden
    OverlayHidden,

    /// Toggle was requested but the overlay is disabled in settings
    OverlayUnavailable,

    /// A snippet was selected for insertion
    SnippetRequested {
        /// Snippet name from settings
        name: String,
    },

    /// Code formatting was requested
    FormatRequested,

    /// Hotkey dispatch turned on
    HotkeysEnabled,

    /// Hotkey dispatch turned off
    HotkeysDisabled,
}

impl std::fmt::Display for CompanionEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompanionEvent::OverlayShown => write!(f, "OVERLAY_SHOWN"),
            CompanionEvent::OverlayHidden => write!(f, "OVERLAY_HIDDEN"),
            CompanionEvent::OverlayUnavailable => write!(f, "OVERLAY_UNAVAILABLE"),
            CompanionEvent::SnippetRequested { name } => {
                write!(f, "SNIPPET_REQUESTED ({})", name)
            }
            CompanionEvent::FormatRequested => write!(f, "FORMAT_REQUESTED"),
            CompanionEvent::HotkeysEnabled => write!(f, "HOTKEYS_ENABLED"),
            CompanionEvent::HotkeysDisabled => write!(f, "HOTKEYS_DISABLED"),
        }
    }
}
