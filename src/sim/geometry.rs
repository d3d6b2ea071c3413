//! Flat 2D geometry for the line-routing game
//!
//! Everything here is a pure function over plain values:
//! - `Rect`: axis-aligned box (origin at top-left, y grows downward)
//! - `Segment`: directed line from `start` to `end`
//! - `segment_intersect`: parametric segment/segment crossing point

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::INTERSECT_EPSILON;

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Center point, used as the anchor of goals and spawners
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Inclusive point containment
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }

    /// Strict overlap test (touching edges do not overlap)
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Smallest rectangle covering both
    pub fn union(&self, other: &Rect) -> Rect {
        let left = self.left().min(other.left());
        let top = self.top().min(other.top());
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(left, top, right - left, bottom - top)
    }

    /// The four edges, in probe order: left, right, top, bottom
    pub fn edges(&self) -> [Segment; 4] {
        let tl = Vec2::new(self.left(), self.top());
        let tr = Vec2::new(self.right(), self.top());
        let bl = Vec2::new(self.left(), self.bottom());
        let br = Vec2::new(self.right(), self.bottom());
        [
            Segment::new(tl, bl),
            Segment::new(tr, br),
            Segment::new(tl, tr),
            Segment::new(bl, br),
        ]
    }

    /// Sizes must be finite and non-negative
    pub fn is_valid(&self) -> bool {
        [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
            && self.width >= 0.0
            && self.height >= 0.0
    }
}

/// A directed line segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Vec2,
    pub end: Vec2,
}

impl Segment {
    pub const fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }

    /// Crossing point with another segment, if any
    #[inline]
    pub fn intersect(&self, other: &Segment) -> Option<Vec2> {
        segment_intersect(self.start, self.end, other.start, other.end)
    }
}

/// Intersection of segment (p1, p2) with segment (p3, p4)
///
/// Solves `p1 + t·(p2 - p1) = p3 + u·(p4 - p3)` and accepts the crossing only
/// when both `t` and `u` lie in `[0, 1]`. Parallel, collinear and zero-length
/// segments have a (near) zero denominator and report no intersection, so the
/// result is never NaN or infinite.
pub fn segment_intersect(p1: Vec2, p2: Vec2, p3: Vec2, p4: Vec2) -> Option<Vec2> {
    let d1 = p2 - p1;
    let d2 = p4 - p3;
    let denom = d1.perp_dot(d2);

    // Scale the tolerance by both lengths so it measures the sine of the angle
    if denom.abs() <= INTERSECT_EPSILON * d1.length() * d2.length() {
        return None;
    }

    let diff = p3 - p1;
    let t = diff.perp_dot(d2) / denom;
    let u = diff.perp_dot(d1) / denom;

    if !(0.0..=1.0).contains(&t) || !(0.0..=1.0).contains(&u) {
        return None;
    }

    let point = p1 + d1 * t;
    point.is_finite().then_some(point)
}
