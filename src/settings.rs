//! Game tuning
//!
//! Loaded from a JSON file next to the binary; missing or malformed files fall
//! back to the built-in defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Physics and line tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Player ===
    /// Downward acceleration (pixels/s²)
    pub gravity: f32,
    /// Initial upward jump speed (pixels/s)
    pub jump_speed: f32,
    /// Walking speed (pixels/s)
    pub hor_speed: f32,
    /// Side of the square player body
    pub player_size: f32,

    // === Lines ===
    /// Waypoints per colored line
    pub line_capacity: usize,
    /// Longest live preview segment drawn toward the player
    pub preview_max_length: f32,

    // === Screen ===
    pub screen_width: f32,
    pub screen_height: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_speed: PLAYER_JUMP_SPEED,
            hor_speed: PLAYER_HOR_SPEED,
            player_size: PLAYER_SIZE,

            line_capacity: LINE_CAPACITY,
            preview_max_length: PREVIEW_MAX_LENGTH,

            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
        }
    }
}

impl Settings {
    /// Decode settings; out-of-range values fall back to their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    fn sanitized(mut self) -> Self {
        if self.line_capacity > MAX_LINE_CAPACITY {
            log::warn!(
                "line_capacity {} exceeds {}, using {}",
                self.line_capacity,
                MAX_LINE_CAPACITY,
                LINE_CAPACITY
            );
            self.line_capacity = LINE_CAPACITY;
        }
        self
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, using defaults when unavailable
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(_) => {
                log::info!("No settings at {}, using defaults", path.display());
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring malformed settings {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}
