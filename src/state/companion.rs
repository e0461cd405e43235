//! Companion dispatcher implementation
//!
//! Hotkey actions only enqueue a `Command`; the companion applies queued
//! commands to the overlay right after each dispatch, so the registry
//! never touches overlay state directly.

use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, warn};

use crate::config::{Settings, Snippet};
use crate::events::CompanionEvent;
use crate::hotkey::{Hotkey, HotkeyManager, InputEvent, KeyCombo};
use crate::overlay::Overlay;

/// Commands enqueued by hotkey actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ToggleOverlay,
    InsertSnippet,
    FormatCode,
}

/// Owns the hotkey registry and overlay, and applies hotkey commands
pub struct Companion {
    manager: HotkeyManager,
    overlay: Overlay,
    snippets: Vec<Snippet>,
    /// Index of the snippet offered next
    next_snippet: usize,
    command_tx: mpsc::UnboundedSender<Command>,
    command_rx: mpsc::UnboundedReceiver<Command>,
    event_tx: broadcast::Sender<CompanionEvent>,
}

impl Companion {
    /// Build a companion and register the configured hotkeys
    ///
    /// Combos that fail to parse or conflict with an earlier one are
    /// logged and skipped.
    pub fn new(settings: &Settings, event_tx: broadcast::Sender<CompanionEvent>) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let mut companion = Self {
            manager: HotkeyManager::new(),
            overlay: Overlay::with_config(settings.overlay.clone()),
            snippets: settings.snippets.clone(),
            next_snippet: 0,
            command_tx,
            command_rx,
            event_tx,
        };

        let hotkeys = &settings.hotkeys;
        companion.bind(&hotkeys.toggle_overlay, "Toggle Overlay", Command::ToggleOverlay);
        companion.bind(&hotkeys.insert_snippet, "Insert Snippet", Command::InsertSnippet);
        companion.bind(&hotkeys.format_code, "Format Code", Command::FormatCode);

        companion
    }

    /// Register `combo` so that pressing it enqueues `command`
    pub fn bind(&mut self, combo: &str, description: &str, command: Command) -> bool {
        let combo = match KeyCombo::parse(combo) {
            Ok(combo) => combo,
            Err(e) => {
                warn!(%e, combo, description, "invalid hotkey, skipping");
                return false;
            }
        };

        let tx = self.command_tx.clone();
        let hotkey = Hotkey::from_combo(&combo)
            .with_description(description)
            .with_action(move || {
                // The receiver lives as long as the companion
                let _ = tx.send(command);
            });

        if self.manager.register(hotkey) {
            info!(%combo, description, "registered hotkey");
            true
        } else {
            warn!(%combo, description, "hotkey already bound, skipping");
            false
        }
    }

    pub fn manager(&self) -> &HotkeyManager {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut HotkeyManager {
        &mut self.manager
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    /// Remove every binding, logging each one; returns how many were removed
    pub fn unregister_all(&mut self) -> usize {
        let mut removed = 0;
        for hotkey in self.manager.list_hotkeys() {
            if self.manager.unregister(hotkey.key(), &hotkey.modifier_list()) {
                info!(%hotkey, description = hotkey.description(), "unregistered hotkey");
                removed += 1;
            }
        }
        removed
    }

    /// Run the companion, processing input events until the channel closes
    pub async fn run(&mut self, mut input_rx: mpsc::Receiver<InputEvent>) {
        info!(hotkeys = self.manager.len(), "companion started");

        while let Some(event) = input_rx.recv().await {
            self.handle_input(event);
        }

        info!("companion stopped");
    }

    /// Handle one input event
    ///
    /// For key events returns whether a bound action ran; control events
    /// always return true.
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::Key { key, modifiers } => {
                let handled = self.manager.process(&key, &modifiers);
                debug!(%key, ?modifiers, handled, "key processed");
                self.apply_pending();
                handled
            }
            InputEvent::Enable => {
                self.manager.enable();
                self.emit(CompanionEvent::HotkeysEnabled);
                true
            }
            InputEvent::Disable => {
                self.manager.disable();
                self.emit(CompanionEvent::HotkeysDisabled);
                true
            }
            InputEvent::List => {
                for hotkey in self.manager.list_hotkeys() {
                    info!(%hotkey, description = hotkey.description(), "bound hotkey");
                }
                true
            }
        }
    }

    /// Apply every command queued by the last dispatch
    fn apply_pending(&mut self) {
        while let Ok(command) = self.command_rx.try_recv() {
            self.apply(command);
        }
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::ToggleOverlay => {
                let event = if !self.overlay.toggle() {
                    CompanionEvent::OverlayUnavailable
                } else if self.overlay.is_visible() {
                    CompanionEvent::OverlayShown
                } else {
                    CompanionEvent::OverlayHidden
                };
                self.emit(event);
            }
            Command::InsertSnippet => {
                if self.snippets.is_empty() {
                    warn!("no snippets configured");
                    return;
                }
                let snippet = &self.snippets[self.next_snippet % self.snippets.len()];
                self.next_snippet = (self.next_snippet + 1) % self.snippets.len();
                let event = CompanionEvent::SnippetRequested {
                    name: snippet.name.clone(),
                };
                self.emit(event);
            }
            Command::FormatCode => self.emit(CompanionEvent::FormatRequested),
        }
    }

    fn emit(&self, event: CompanionEvent) {
        debug!(?event, "emitting event");
        // No subscribers is fine
        let _ = self.event_tx.send(event);
    }
}
