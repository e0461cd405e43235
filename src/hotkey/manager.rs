//! Hotkey registry and dispatch
//!
//! Keeps bindings in registration order and routes a key event to the
//! first matching binding. The manager has no internal locking; callers
//! sharing one across threads must serialize access themselves.

use tracing::debug;

use super::binding::Hotkey;

/// Ordered registry of hotkey bindings with an enable/disable gate
#[derive(Debug)]
pub struct HotkeyManager {
    hotkeys: Vec<Hotkey>,
    enabled: bool,
}

impl HotkeyManager {
    /// Create an empty, enabled manager
    pub fn new() -> Self {
        Self {
            hotkeys: Vec::new(),
            enabled: true,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable hotkey processing
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Disable hotkey processing
    ///
    /// Registration and removal keep working while disabled.
    pub fn disable(&mut self) {
        self.enabled = false;
    }

    /// Register a new hotkey
    ///
    /// Returns false and leaves the registry untouched when an equivalent
    /// binding already exists.
    pub fn register(&mut self, hotkey: Hotkey) -> bool {
        let modifiers = hotkey.modifier_list();
        if let Some(existing) = self
            .hotkeys
            .iter()
            .find(|h| h.matches(hotkey.key(), &modifiers))
        {
            debug!(%hotkey, existing = existing.description(), "hotkey conflict, not registered");
            return false;
        }

        debug!(%hotkey, description = hotkey.description(), "hotkey registered");
        self.hotkeys.push(hotkey);
        true
    }

    /// Remove the first binding matching the key and modifiers
    pub fn unregister<S: AsRef<str>>(&mut self, key: &str, modifiers: &[S]) -> bool {
        match self.hotkeys.iter().position(|h| h.matches(key, modifiers)) {
            Some(pos) => {
                let removed = self.hotkeys.remove(pos);
                debug!(hotkey = %removed, "hotkey unregistered");
                true
            }
            None => false,
        }
    }

    /// Dispatch a key event to the first matching binding
    ///
    /// Returns the binding's `trigger` result, or false when disabled or
    /// when nothing matches.
    pub fn process<S: AsRef<str>>(&self, key: &str, modifiers: &[S]) -> bool {
        if !self.enabled {
            return false;
        }

        match self.hotkeys.iter().find(|h| h.matches(key, modifiers)) {
            Some(hotkey) => {
                debug!(%hotkey, "dispatching hotkey");
                hotkey.trigger()
            }
            None => false,
        }
    }

    /// Snapshot of the registered hotkeys in registration order
    pub fn list_hotkeys(&self) -> Vec<Hotkey> {
        self.hotkeys.clone()
    }

    pub fn len(&self) -> usize {
        self.hotkeys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hotkeys.is_empty()
    }
}

impl Default for HotkeyManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;

    const NONE: &[&str] = &[];

    fn flag_hotkey(key: &str, modifiers: &[&str]) -> (Hotkey, Arc<AtomicBool>) {
        let flag = Arc::new(AtomicBool::new(false));
        let set = Arc::clone(&flag);
        let hotkey = Hotkey::new(key)
            .with_modifiers(modifiers.iter().copied())
            .with_action(move || set.store(true, Ordering::SeqCst));
        (hotkey, flag)
    }

    #[test]
    fn test_initially_enabled_and_empty() {
        let manager = HotkeyManager::new();
        assert!(manager.is_enabled());
        assert!(manager.is_empty());
        assert!(manager.list_hotkeys().is_empty());
    }

    #[test]
    fn test_enable_disable_idempotent() {
        let mut manager = HotkeyManager::new();
        manager.disable();
        manager.disable();
        assert!(!manager.is_enabled());
        manager.enable();
        manager.enable();
        assert!(manager.is_enabled());
    }

    #[test]
    fn test_register_hotkey() {
        let mut manager = HotkeyManager::new();
        assert!(manager.register(Hotkey::new("a").with_modifier("ctrl")));
        assert_eq!(manager.list_hotkeys().len(), 1);
    }

    #[test]
    fn test_register_duplicate_hotkey() {
        let mut manager = HotkeyManager::new();
        assert!(manager.register(Hotkey::new("a").with_modifier("ctrl")));
        assert!(!manager.register(Hotkey::new("a").with_modifier("ctrl")));
        assert_eq!(manager.list_hotkeys().len(), 1);
    }

    #[test]
    fn test_register_duplicate_with_reordered_modifiers() {
        let mut manager = HotkeyManager::new();
        assert!(manager.register(Hotkey::new("o").with_modifiers(["ctrl", "shift"])));
        assert!(!manager.register(Hotkey::new("o").with_modifiers(["shift", "ctrl"])));
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn test_register_conflict_while_disabled() {
        let mut manager = HotkeyManager::new();
        manager.disable();
        assert!(manager.register(Hotkey::new("a")));
        assert!(!manager.register(Hotkey::new("a")));
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn test_register_distinct_modifier_sets() {
        let mut manager = HotkeyManager::new();
        assert!(manager.register(Hotkey::new("a")));
        assert!(manager.register(Hotkey::new("a").with_modifier("ctrl")));
        assert!(manager.register(Hotkey::new("a").with_modifiers(["ctrl", "shift"])));
        assert_eq!(manager.len(), 3);
    }

    #[test]
    fn test_unregister_hotkey() {
        let mut manager = HotkeyManager::new();
        manager.register(Hotkey::new("a").with_modifier("ctrl"));
        assert!(manager.unregister("a", &["ctrl"]));
        assert!(manager.list_hotkeys().is_empty());
    }

    #[test]
    fn test_unregister_missing() {
        let mut manager = HotkeyManager::new();
        manager.register(Hotkey::new("a").with_modifier("ctrl"));
        assert!(!manager.unregister("a", NONE));
        assert!(!manager.unregister("b", &["ctrl"]));
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn test_unregister_preserves_order() {
        let mut manager = HotkeyManager::new();
        manager.register(Hotkey::new("a"));
        manager.register(Hotkey::new("b"));
        manager.register(Hotkey::new("c"));

        assert!(manager.unregister("b", NONE));
        let keys: Vec<String> = manager
            .list_hotkeys()
            .iter()
            .map(|h| h.key().to_string())
            .collect();
        assert_eq!(keys, vec!["a", "c"]);
    }

    #[test]
    fn test_unregister_while_disabled() {
        let mut manager = HotkeyManager::new();
        manager.register(Hotkey::new("a"));
        manager.disable();
        assert!(manager.unregister("a", NONE));
    }

    #[test]
    fn test_unregister_then_register_again() {
        let mut manager = HotkeyManager::new();
        manager.register(Hotkey::new("a").with_modifier("ctrl"));
        assert!(manager.unregister("a", &["ctrl"]));
        assert!(manager.register(Hotkey::new("a").with_modifier("ctrl")));
    }

    #[test]
    fn test_process_triggers_action() {
        let mut manager = HotkeyManager::new();
        let (hotkey, flag) = flag_hotkey("a", &["ctrl"]);
        manager.register(hotkey);

        assert!(manager.process("a", &["ctrl"]));
        assert!(flag.load(Ordering::SeqCst));
    }

    #[test]
    fn test_process_requires_modifiers() {
        let mut manager = HotkeyManager::new();
        let (hotkey, flag) = flag_hotkey("a", &["ctrl"]);
        manager.register(hotkey);

        assert!(!manager.process("a", NONE));
        assert!(!flag.load(Ordering::SeqCst));
    }

    #[test]
    fn test_process_without_action() {
        let mut manager = HotkeyManager::new();
        manager.register(Hotkey::new("a").with_modifier("ctrl"));
        assert!(!manager.process("a", &["ctrl"]));
    }

    #[test]
    fn test_process_when_disabled() {
        let mut manager = HotkeyManager::new();
        let (hotkey, flag) = flag_hotkey("a", &["ctrl"]);
        manager.register(hotkey);
        manager.disable();

        assert!(!manager.process("a", &["ctrl"]));
        assert!(!flag.load(Ordering::SeqCst));

        manager.enable();
        assert!(manager.process("a", &["ctrl"]));
        assert!(flag.load(Ordering::SeqCst));
    }

    #[test]
    fn test_process_triggers_only_one_binding() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut manager = HotkeyManager::new();
        for key in ["a", "b"] {
            let counter = Arc::clone(&count);
            manager.register(Hotkey::new(key).with_action(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }));
        }

        assert!(manager.process("b", NONE));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_list_hotkeys_is_snapshot() {
        let mut manager = HotkeyManager::new();
        manager.register(Hotkey::new("a"));

        let mut snapshot = manager.list_hotkeys();
        snapshot.clear();
        snapshot.push(Hotkey::new("z"));

        let current = manager.list_hotkeys();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].key(), "a");
    }

    #[test]
    fn test_list_hotkeys_in_registration_order() {
        let mut manager = HotkeyManager::new();
        manager.register(Hotkey::new("c").with_description("third"));
        manager.register(Hotkey::new("a").with_description("first"));
        manager.register(Hotkey::new("b").with_description("second"));

        let descriptions: Vec<String> = manager
            .list_hotkeys()
            .iter()
            .map(|h| h.description().to_string())
            .collect();
        assert_eq!(descriptions, vec!["third", "first", "second"]);
    }
}
