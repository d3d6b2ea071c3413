//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed tick per frame
//! - Stable iteration order (level tables are never reordered)
//! - No rendering or platform dependencies

pub mod collision;
pub mod geometry;
pub mod level;
pub mod lines;
pub mod state;
pub mod tick;

pub use collision::{RectEdge, RectHits, any_collision, closest_collision_point, segment_vs_rect};
pub use geometry::{Rect, Segment, segment_intersect};
pub use level::{EnvItem, Goal, Level, LineSpawner, builtin_levels};
pub use lines::{AppendRejection, LineColor, Lines, Polyline, PolylineState};
pub use state::{Camera, GameEvent, GamePhase, GameState, Player, PreviewSegment};
pub use tick::{TickInput, step_player, tick};
