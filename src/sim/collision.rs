//! Segment-versus-environment collision
//!
//! The interesting part of Strings: deciding whether a drawn line would pass
//! through a wall, and where it would first touch one.

use glam::Vec2;

use super::geometry::{Rect, Segment};
use super::level::EnvItem;

/// One side of an axis-aligned rectangle, in probe order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RectEdge {
    Left,
    Right,
    Top,
    Bottom,
}

impl RectEdge {
    /// Probe order; earlier edges win distance ties
    pub const ALL: [RectEdge; 4] = [RectEdge::Left, RectEdge::Right, RectEdge::Top, RectEdge::Bottom];
}

/// Result of probing a segment against a single rectangle
///
/// A slot is `Some` only when that edge was actually crossed.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RectHits {
    pub left: Option<Vec2>,
    pub right: Option<Vec2>,
    pub top: Option<Vec2>,
    pub bottom: Option<Vec2>,
}

impl RectHits {
    /// Whether any edge was crossed
    pub fn collided(&self) -> bool {
        self.iter().next().is_some()
    }

    pub fn get(&self, edge: RectEdge) -> Option<Vec2> {
        match edge {
            RectEdge::Left => self.left,
            RectEdge::Right => self.right,
            RectEdge::Top => self.top,
            RectEdge::Bottom => self.bottom,
        }
    }

    fn slot_mut(&mut self, edge: RectEdge) -> &mut Option<Vec2> {
        match edge {
            RectEdge::Left => &mut self.left,
            RectEdge::Right => &mut self.right,
            RectEdge::Top => &mut self.top,
            RectEdge::Bottom => &mut self.bottom,
        }
    }

    /// Crossed edges with their hit points, in probe order
    pub fn iter(&self) -> impl Iterator<Item = (RectEdge, Vec2)> + '_ {
        RectEdge::ALL
            .into_iter()
            .filter_map(|edge| self.get(edge).map(|p| (edge, p)))
    }

    /// Hit nearest to `origin` with its distance; ties keep the earlier edge
    pub fn closest_to(&self, origin: Vec2) -> Option<(RectEdge, Vec2, f32)> {
        let mut best: Option<(RectEdge, Vec2, f32)> = None;
        for (edge, point) in self.iter() {
            let dist = origin.distance(point);
            if best.is_none_or(|(_, _, d)| dist < d) {
                best = Some((edge, point, dist));
            }
        }
        best
    }
}

/// Probe a segment against each of the rectangle's four edges independently
pub fn segment_vs_rect(segment: &Segment, rect: &Rect) -> RectHits {
    let mut hits = RectHits::default();
    for (edge, side) in RectEdge::ALL.into_iter().zip(rect.edges()) {
        *hits.slot_mut(edge) = segment.intersect(&side);
    }
    hits
}

/// True if the segment crosses any blocking item
///
/// Non-blocking items are decoration and never collide.
pub fn any_collision(segment: &Segment, items: &[EnvItem]) -> bool {
    items
        .iter()
        .filter(|item| item.blocking)
        .any(|item| segment_vs_rect(segment, &item.rect).collided())
}

/// The point where the segment first enters a blocking item
///
/// Returns `segment.end` when nothing blocks the way. A hit only replaces the
/// current result when it is strictly closer to `segment.start`, so among
/// equally distant hits the first item (and first edge) wins.
pub fn closest_collision_point(segment: &Segment, items: &[EnvItem]) -> Vec2 {
    let mut result = segment.end;
    let mut best = segment.start.distance(result);

    for item in items.iter().filter(|item| item.blocking) {
        let hits = segment_vs_rect(segment, &item.rect);
        if let Some((_, point, dist)) = hits.closest_to(segment.start) {
            if dist < best {
                result = point;
                best = dist;
            }
        }
    }

    result
}
