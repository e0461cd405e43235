//! Textual hotkey combos
//!
//! Parses settings strings such as `ctrl+shift+o` into a key and a set of
//! canonical modifier names.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Canonical modifier names
pub mod modifiers {
    pub const CTRL: &str = "ctrl";
    pub const SHIFT: &str = "shift";
    pub const ALT: &str = "alt";
    pub const META: &str = "meta";
}

/// Errors produced while parsing a combo string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HotkeyError {
    #[error("hotkey combo is empty")]
    Empty,

    #[error("hotkey combo `{0}` has an empty component")]
    EmptyComponent(String),

    #[error("unknown modifier `{0}`")]
    UnknownModifier(String),

    #[error("modifier `{0}` given more than once")]
    DuplicateModifier(String),
}

/// A parsed key + modifier combination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombo {
    key: String,
    modifiers: BTreeSet<String>,
}

impl KeyCombo {
    /// Parse a `mod+mod+key` string
    ///
    /// Modifier names are case-insensitive and normalized; the key is kept
    /// verbatim.
    pub fn parse(input: &str) -> Result<Self, HotkeyError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(HotkeyError::Empty);
        }

        let parts: Vec<&str> = trimmed.split('+').map(str::trim).collect();
        if parts.iter().any(|p| p.is_empty()) {
            return Err(HotkeyError::EmptyComponent(trimmed.to_string()));
        }

        // split always yields at least one part
        let (key, modifier_parts) = parts.split_last().ok_or(HotkeyError::Empty)?;

        let mut modifiers = BTreeSet::new();
        for part in modifier_parts {
            let canonical = canonical_modifier(part)
                .ok_or_else(|| HotkeyError::UnknownModifier(part.to_string()))?;
            if !modifiers.insert(canonical.to_string()) {
                return Err(HotkeyError::DuplicateModifier(canonical.to_string()));
            }
        }

        Ok(Self {
            key: key.to_string(),
            modifiers,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn modifiers(&self) -> &BTreeSet<String> {
        &self.modifiers
    }

    /// Modifiers in canonical order, as used to build bindings and key events
    pub fn modifier_list(&self) -> Vec<&str> {
        self.modifiers.iter().map(String::as_str).collect()
    }
}

impl FromStr for KeyCombo {
    type Err = HotkeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for modifier in &self.modifiers {
            write!(f, "{}+", modifier)?;
        }
        write!(f, "{}", self.key)
    }
}

/// Map a modifier alias to its canonical name
fn canonical_modifier(name: &str) -> Option<&'static str> {
    match name.to_lowercase().as_str() {
        "ctrl" | "control" => Some(modifiers::CTRL),
        "shift" => Some(modifiers::SHIFT),
        "alt" | "option" => Some(modifiers::ALT),
        "meta" | "cmd" | "command" | "super" | "win" => Some(modifiers::META),
        _ => None,
    }
}
