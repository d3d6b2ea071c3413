//! Strings - route colored lines around walls onto matching goals
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, line collision, levels, game state)
//! - `settings`: Data-driven tuning loaded from JSON

pub mod settings;
pub mod sim;

pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Gravity acceleration (pixels/s², positive is down)
    pub const GRAVITY: f32 = 800.0;
    /// Initial upward speed of a jump (pixels/s)
    pub const PLAYER_JUMP_SPEED: f32 = 400.0;
    /// Horizontal walking speed (pixels/s)
    pub const PLAYER_HOR_SPEED: f32 = 200.0;
    /// Side length of the square player body
    pub const PLAYER_SIZE: f32 = 40.0;

    /// Waypoints a single colored line can hold
    pub const LINE_CAPACITY: usize = 5;
    /// Largest line capacity accepted from a settings file
    pub const MAX_LINE_CAPACITY: usize = 64;
    /// Maximum drawn length of the live preview segment
    pub const PREVIEW_MAX_LENGTH: f32 = 500.0;

    /// Virtual screen dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 450.0;

    /// Parallel-line tolerance for segment intersection (relative to segment lengths)
    pub const INTERSECT_EPSILON: f32 = 1.0e-6;
}

/// Clamp the segment `from -> to` to at most `max_len`, keeping its direction.
///
/// Returns `None` for a zero-length segment.
#[inline]
pub fn clamp_length(from: Vec2, to: Vec2, max_len: f32) -> Option<Vec2> {
    let delta = to - from;
    let distance = delta.length();
    if distance == 0.0 {
        return None;
    }
    if distance > max_len {
        Some(from + delta * (max_len / distance))
    } else {
        Some(to)
    }
}
