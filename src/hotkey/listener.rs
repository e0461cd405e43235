//! Line-oriented input listener
//!
//! Reads key events from a text source (stdin for the binary) on a
//! dedicated thread and forwards them to the companion over a channel.
//! Each line is either a control command (`:enable`, `:disable`, `:list`)
//! or a combo such as `ctrl+shift+o`.

use std::io::{self, BufRead};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use super::combo::{HotkeyError, KeyCombo};

/// Events sent from the input listener to the companion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A key was pressed with the given modifiers held
    Key { key: String, modifiers: Vec<String> },
    /// Turn hotkey dispatch on
    Enable,
    /// Turn hotkey dispatch off
    Disable,
    /// Log the registered bindings
    List,
}

impl InputEvent {
    /// Build a key event from a parsed combo
    pub fn key(combo: &KeyCombo) -> Self {
        Self::Key {
            key: combo.key().to_string(),
            modifiers: combo.modifier_list().into_iter().map(String::from).collect(),
        }
    }
}

/// Parse one input line
///
/// Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<InputEvent>, HotkeyError> {
    let line = line.trim();
    match line {
        "" => Ok(None),
        ":enable" => Ok(Some(InputEvent::Enable)),
        ":disable" => Ok(Some(InputEvent::Disable)),
        ":list" => Ok(Some(InputEvent::List)),
        combo => KeyCombo::parse(combo).map(|c| Some(InputEvent::key(&c))),
    }
}

/// Errors that can occur in the input listener
#[derive(Debug, thiserror::Error)]
pub enum ListenerError {
    #[error("input listener is already running")]
    AlreadyRunning,

    #[error("failed to spawn listener thread: {0}")]
    ThreadSpawn(String),
}

/// Input listener forwarding parsed lines as `InputEvent`s
pub struct InputListener {
    event_tx: mpsc::Sender<InputEvent>,
    running: Arc<AtomicBool>,
}

impl InputListener {
    /// Create a new input listener
    pub fn new(event_tx: mpsc::Sender<InputEvent>) -> Self {
        Self {
            event_tx,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Start reading from stdin
    pub fn start(&self) -> Result<(), ListenerError> {
        self.start_with(io::BufReader::new(io::stdin()))
    }

    /// Start reading from an arbitrary line source
    ///
    /// The thread exits at end of input, when the receiving side is
    /// dropped, or after the next line once `stop()` is called.
    pub fn start_with<R>(&self, reader: R) -> Result<(), ListenerError>
    where
        R: BufRead + Send + 'static,
    {
        if self.running.swap(true, Ordering::SeqCst) {
            return Err(ListenerError::AlreadyRunning);
        }

        let event_tx = self.event_tx.clone();
        let running = Arc::clone(&self.running);

        thread::Builder::new()
            .name("input-listener".to_string())
            .spawn(move || {
                info!("input listener thread started");

                if let Err(e) = read_loop(reader, &event_tx, &running) {
                    error!(?e, "input listener error");
                }

                running.store(false, Ordering::SeqCst);
                info!("input listener thread stopped");
            })
            .map_err(|e| {
                self.running.store(false, Ordering::SeqCst);
                ListenerError::ThreadSpawn(e.to_string())
            })?;

        Ok(())
    }

    /// Ask the listener thread to stop
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Check if the listener is currently running
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

fn read_loop<R: BufRead>(
    mut reader: R,
    event_tx: &mpsc::Sender<InputEvent>,
    running: &AtomicBool,
) -> io::Result<()> {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        if !running.load(Ordering::SeqCst) {
            break;
        }

        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line,
            Err(e) => {
                warn!(%e, "ignoring input line that is not UTF-8");
                continue;
            }
        };

        let event = match parse_line(line) {
            Ok(Some(event)) => event,
            Ok(None) => continue,
            Err(e) => {
                warn!(%e, line = line.trim(), "ignoring invalid input line");
                continue;
            }
        };

        debug!(?event, "input event");
        // Not inside the runtime, so block until there is room
        if event_tx.blocking_send(event).is_err() {
            warn!("failed to send input event - channel closed?");
            break;
        }
    }
    Ok(())
}
