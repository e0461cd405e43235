//! Hotkey binding descriptor
//!
//! A `Hotkey` pairs a key and a set of modifier names with an optional
//! action. Bindings are immutable once handed to the manager.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use super::combo::KeyCombo;

/// Callable bound to a hotkey
pub type Action = Arc<dyn Fn() + Send + Sync>;

/// A key + modifier combination with an optional action
#[derive(Clone, Default)]
pub struct Hotkey {
    key: String,
    modifiers: BTreeSet<String>,
    description: String,
    action: Option<Action>,
}

impl Hotkey {
    /// Create a hotkey for `key` with no modifiers and no action
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    /// Create a hotkey from a parsed combo
    pub fn from_combo(combo: &KeyCombo) -> Self {
        Self::new(combo.key()).with_modifiers(combo.modifier_list())
    }

    pub fn with_modifier(mut self, modifier: impl Into<String>) -> Self {
        self.modifiers.insert(modifier.into());
        self
    }

    pub fn with_modifiers<I, S>(mut self, modifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modifiers.extend(modifiers.into_iter().map(Into::into));
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Bind an action to this hotkey
    pub fn with_action<F>(mut self, action: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.action = Some(Arc::new(action));
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn modifiers(&self) -> &BTreeSet<String> {
        &self.modifiers
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn has_action(&self) -> bool {
        self.action.is_some()
    }

    /// Check if the given key and modifiers match this hotkey
    ///
    /// The candidate length is compared as given, so a candidate that
    /// repeats a modifier does not match even when its distinct modifiers do.
    pub fn matches<S: AsRef<str>>(&self, key: &str, modifiers: &[S]) -> bool {
        if self.key != key {
            return false;
        }
        if self.modifiers.len() != modifiers.len() {
            return false;
        }
        self.modifiers
            .iter()
            .all(|m| modifiers.iter().any(|c| c.as_ref() == m))
    }

    /// Run the bound action
    ///
    /// Returns false without doing anything when no action is bound.
    pub fn trigger(&self) -> bool {
        match &self.action {
            Some(action) => {
                action();
                true
            }
            None => false,
        }
    }

    /// Modifiers as a slice-friendly vector, used for registry lookups
    pub(crate) fn modifier_list(&self) -> Vec<&str> {
        self.modifiers.iter().map(String::as_str).collect()
    }
}

impl fmt::Debug for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hotkey")
            .field("key", &self.key)
            .field("modifiers", &self.modifiers)
            .field("description", &self.description)
            .field("has_action", &self.action.is_some())
            .finish()
    }
}

impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for modifier in &self.modifiers {
            write!(f, "{}+", modifier)?;
        }
        write!(f, "{}", self.key)
    }
}
