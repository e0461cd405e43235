//! aicodex: hotkey dispatch and overlay toggle for a companion overlay
//!
//! - `hotkey`: bindings, the registry/dispatcher, combo parsing, input
//! - `overlay`: overlay config and visibility
//! - `config`: JSON settings with defaults
//! - `state`: the companion wiring hotkeys to the overlay
//! - `events`: events broadcast by the companion
//!
//! No OS-level key capture: keys arrive as text lines or via the API.

pub mod config;
pub mod events;
pub mod hotkey;
pub mod lifecycle;
pub mod overlay;
pub mod state;

pub use hotkey::{Hotkey, HotkeyManager};
pub use overlay::{Overlay, OverlayConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
