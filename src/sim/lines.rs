//! Colored polylines drawn by the player
//!
//! Each color owns a bounded, append-only list of waypoints. A waypoint is
//! only committed when the segment from the previous waypoint stays clear of
//! every blocking item; blocked or overflowing appends are refused, never
//! clamped.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::any_collision;
use super::geometry::Segment;
use super::level::{EnvItem, Rgba};

/// The three drawable line colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineColor {
    Red,
    Green,
    Blue,
}

impl LineColor {
    pub const ALL: [LineColor; 3] = [LineColor::Red, LineColor::Green, LineColor::Blue];

    pub fn as_str(&self) -> &'static str {
        match self {
            LineColor::Red => "Red",
            LineColor::Green => "Green",
            LineColor::Blue => "Blue",
        }
    }

    pub fn rgba(&self) -> Rgba {
        match self {
            LineColor::Red => [230, 41, 55, 255],
            LineColor::Green => [0, 228, 48, 255],
            LineColor::Blue => [0, 121, 241, 255],
        }
    }
}

impl fmt::Display for LineColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fill state of a polyline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolylineState {
    Empty,
    Building,
    Full,
}

/// Why a waypoint was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendRejection {
    /// Capacity reached; stays full until reset
    Full,
    /// The new segment would cross a blocking item
    Blocked,
}

impl fmt::Display for AppendRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppendRejection::Full => f.write_str("line is full"),
            AppendRejection::Blocked => f.write_str("segment crosses a wall"),
        }
    }
}

impl std::error::Error for AppendRejection {}

/// A bounded list of waypoints for one color
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Polyline {
    pub color: LineColor,
    capacity: usize,
    points: Vec<Vec2>,
}

impl Polyline {
    pub fn new(color: LineColor, capacity: usize) -> Self {
        Self {
            color,
            capacity,
            points: Vec::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.points.len() >= self.capacity
    }

    pub fn state(&self) -> PolylineState {
        if self.is_full() {
            PolylineState::Full
        } else if self.is_empty() {
            PolylineState::Empty
        } else {
            PolylineState::Building
        }
    }

    /// Most recently committed waypoint
    pub fn last(&self) -> Option<Vec2> {
        self.points.last().copied()
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Consecutive committed segments
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.points.windows(2).map(|w| Segment::new(w[0], w[1]))
    }

    /// Commit `point` if there is room and the new segment is clear
    ///
    /// Returns the index of the committed waypoint.
    pub fn try_push(&mut self, point: Vec2, env: &[EnvItem]) -> Result<usize, AppendRejection> {
        if self.is_full() {
            return Err(AppendRejection::Full);
        }
        if let Some(last) = self.last() {
            if any_collision(&Segment::new(last, point), env) {
                return Err(AppendRejection::Blocked);
            }
        }
        self.points.push(point);
        Ok(self.points.len() - 1)
    }

    /// Empty the line and restore its capacity
    pub fn reset(&mut self, capacity: usize) {
        self.points.clear();
        self.capacity = capacity;
    }
}

/// The player's three lines, one per color
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lines {
    pub red: Polyline,
    pub green: Polyline,
    pub blue: Polyline,
}

impl Lines {
    pub fn new(capacity: usize) -> Self {
        Self {
            red: Polyline::new(LineColor::Red, capacity),
            green: Polyline::new(LineColor::Green, capacity),
            blue: Polyline::new(LineColor::Blue, capacity),
        }
    }

    pub fn get(&self, color: LineColor) -> &Polyline {
        match color {
            LineColor::Red => &self.red,
            LineColor::Green => &self.green,
            LineColor::Blue => &self.blue,
        }
    }

    pub fn get_mut(&mut self, color: LineColor) -> &mut Polyline {
        match color {
            LineColor::Red => &mut self.red,
            LineColor::Green => &mut self.green,
            LineColor::Blue => &mut self.blue,
        }
    }

    /// Lines in [`LineColor::ALL`] order
    pub fn iter(&self) -> impl Iterator<Item = &Polyline> {
        LineColor::ALL.into_iter().map(|color| self.get(color))
    }

    /// Clear all three lines at once
    pub fn reset(&mut self, capacity: usize) {
        self.red.reset(capacity);
        self.green.reset(capacity);
        self.blue.reset(capacity);
    }
}
