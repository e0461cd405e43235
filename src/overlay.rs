//! Overlay display state
//!
//! Tracks whether the companion overlay is visible. Showing is gated by
//! the config's `enabled` flag; hiding always succeeds.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Geometry and behaviour of the overlay window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub enabled: bool,
    /// Window opacity, conventionally within `0.0..=1.0`
    pub opacity: f32,
    #[serde(alias = "x_position")]
    pub position_x: i32,
    #[serde(alias = "y_position")]
    pub position_y: i32,
    pub width: u32,
    pub height: u32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            opacity: 0.9,
            position_x: 0,
            position_y: 0,
            width: 800,
            height: 600,
        }
    }
}

/// Overlay visibility state
#[derive(Debug, Clone)]
pub struct Overlay {
    config: OverlayConfig,
    visible: bool,
}

impl Overlay {
    /// Create a hidden overlay with the default configuration
    pub fn new() -> Self {
        Self::with_config(OverlayConfig::default())
    }

    /// Create a hidden overlay with a custom configuration
    pub fn with_config(config: OverlayConfig) -> Self {
        Self {
            config,
            visible: false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show the overlay; returns false when the overlay is disabled
    pub fn show(&mut self) -> bool {
        if !self.config.enabled {
            debug!("overlay disabled, not showing");
            return false;
        }
        self.visible = true;
        true
    }

    pub fn hide(&mut self) -> bool {
        self.visible = false;
        true
    }

    /// Hide when visible, otherwise show
    pub fn toggle(&mut self) -> bool {
        if self.visible {
            self.hide()
        } else {
            self.show()
        }
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }
}

impl Default for Overlay {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OverlayConfig::default();
        assert!(config.enabled);
        assert!((config.opacity - 0.9).abs() < f32::EPSILON);
        assert_eq!((config.position_x, config.position_y), (0, 0));
        assert_eq!(config.width, 800);
        assert_eq!(config.height, 600);
    }

    #[test]
    fn test_overlay_initially_hidden() {
        let overlay = Overlay::new();
        assert!(!overlay.is_visible());
    }

    #[test]
    fn test_show_and_hide() {
        let mut overlay = Overlay::new();
        assert!(overlay.show());
        assert!(overlay.is_visible());
        assert!(overlay.hide());
        assert!(!overlay.is_visible());
    }

    #[test]
    fn test_toggle_overlay() {
        let mut overlay = Overlay::new();
        assert!(overlay.toggle());
        assert!(overlay.is_visible());
        assert!(overlay.toggle());
        assert!(!overlay.is_visible());
    }

    #[test]
    fn test_show_disabled_overlay() {
        let config = OverlayConfig {
            enabled: false,
            ..Default::default()
        };
        let mut overlay = Overlay::with_config(config);
        assert!(!overlay.show());
        assert!(!overlay.is_visible());
        assert!(!overlay.toggle());
        assert!(!overlay.is_visible());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: OverlayConfig = serde_json::from_str(r#"{"width": 400}"#).unwrap();
        assert_eq!(config.width, 400);
        assert_eq!(config.height, 600);
        assert!(config.enabled);
    }

    #[test]
    fn test_window_position_keys() {
        let config: OverlayConfig =
            serde_json::from_str(r#"{"x_position": 100, "y_position": 50}"#).unwrap();
        assert_eq!((config.position_x, config.position_y), (100, 50));
    }
}
