//! Hotkey module: bindings, registry, combo parsing and input
//!
//! The registry (`HotkeyManager`) is synchronous and single-threaded;
//! the listener feeds it from a dedicated thread through a channel.

mod binding;
mod combo;
mod listener;
mod manager;

pub use binding::{Action, Hotkey};
pub use combo::{modifiers, HotkeyError, KeyCombo};
pub use listener::{parse_line, InputEvent, InputListener, ListenerError};
pub use manager::HotkeyManager;
