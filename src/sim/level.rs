//! Level definitions: walls, goals and line spawners
//!
//! Walls are fixed once a level is built. Goals and spawners carry the only
//! per-attempt flags, cleared by [`Level::reset`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::lines::LineColor;

/// RGBA display color
pub type Rgba = [u8; 4];

pub const LIGHT_GRAY: Rgba = [200, 200, 200, 255];
pub const GRAY: Rgba = [130, 130, 130, 255];

/// A static rectangle in the world
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvItem {
    pub rect: Rect,
    /// Participates in player landing and line collision
    pub blocking: bool,
    pub color: Rgba,
}

impl EnvItem {
    pub const fn new(rect: Rect, blocking: bool, color: Rgba) -> Self {
        Self {
            rect,
            blocking,
            color,
        }
    }
}

/// A target that must be reached by a line of the matching color
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub rect: Rect,
    pub color: LineColor,
    #[serde(default, skip_serializing)]
    pub is_set: bool,
}

impl Goal {
    pub fn new(rect: Rect, color: LineColor) -> Self {
        Self {
            rect,
            color,
            is_set: false,
        }
    }

    /// Waypoint committed when the goal is reached
    pub fn anchor(&self) -> Vec2 {
        self.rect.center()
    }
}

/// Where a colored line starts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineSpawner {
    pub rect: Rect,
    pub color: LineColor,
    /// Spawn waypoint already committed this attempt
    #[serde(default, skip_serializing)]
    pub activated: bool,
}

impl LineSpawner {
    pub fn new(rect: Rect, color: LineColor) -> Self {
        Self {
            rect,
            color,
            activated: false,
        }
    }

    pub fn anchor(&self) -> Vec2 {
        self.rect.center()
    }
}

/// One playable level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub id: u32,
    /// Player feet position on (re)start
    pub spawn: Vec2,
    pub env_items: Vec<EnvItem>,
    pub goals: Vec<Goal>,
    pub spawners: Vec<LineSpawner>,
}

impl Level {
    /// Clear goal and spawner flags for a fresh attempt
    pub fn reset(&mut self) {
        for goal in &mut self.goals {
            goal.is_set = false;
        }
        self.deactivate_spawners();
    }

    pub fn deactivate_spawners(&mut self) {
        for spawner in &mut self.spawners {
            spawner.activated = false;
        }
    }

    /// All goals reached; trivially true for a level without goals
    pub fn is_complete(&self) -> bool {
        self.goals.iter().all(|g| g.is_set)
    }

    /// Bounding box of every environment item
    pub fn bounds(&self) -> Option<Rect> {
        self.env_items
            .iter()
            .map(|item| item.rect)
            .reduce(|acc, rect| acc.union(&rect))
    }

    /// Decode a level from JSON, rejecting malformed rectangles
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let level: Level = serde_json::from_str(json)?;
        if let Some(bad) = level.invalid_rect() {
            return Err(serde::de::Error::custom(format!(
                "level {}: invalid rectangle {:?}",
                level.id, bad
            )));
        }
        Ok(level)
    }

    fn invalid_rect(&self) -> Option<Rect> {
        self.env_items
            .iter()
            .map(|i| i.rect)
            .chain(self.goals.iter().map(|g| g.rect))
            .chain(self.spawners.iter().map(|s| s.rect))
            .find(|r| !r.is_valid())
    }
}

/// Spawn position shared by the built-in levels
pub const DEFAULT_SPAWN: Vec2 = Vec2::new(400.0, 280.0);

fn base_env_items() -> Vec<EnvItem> {
    vec![
        // Sky backdrop
        EnvItem::new(Rect::new(0.0, 0.0, 1000.0, 400.0), false, LIGHT_GRAY),
        // Ground
        EnvItem::new(Rect::new(0.0, 400.0, 1000.0, 200.0), true, GRAY),
        EnvItem::new(Rect::new(300.0, 200.0, 400.0, 10.0), true, GRAY),
        EnvItem::new(Rect::new(250.0, 300.0, 100.0, 10.0), true, GRAY),
        EnvItem::new(Rect::new(650.0, 300.0, 100.0, 10.0), true, GRAY),
    ]
}

/// The built-in level table, in play order
pub fn builtin_levels() -> Vec<Level> {
    let spawner = LineSpawner::new(Rect::new(200.0, 375.0, 10.0, 25.0), LineColor::Red);
    let goal = Goal::new(Rect::new(600.0, 300.0, 50.0, 100.0), LineColor::Red);

    let level1 = Level {
        id: 1,
        spawn: DEFAULT_SPAWN,
        env_items: base_env_items(),
        goals: vec![goal.clone()],
        spawners: vec![spawner.clone()],
    };

    let mut walled = base_env_items();
    walled.push(EnvItem::new(Rect::new(450.0, 200.0, 10.0, 200.0), true, GRAY));
    let level2 = Level {
        id: 2,
        spawn: DEFAULT_SPAWN,
        env_items: walled,
        goals: vec![goal],
        spawners: vec![spawner],
    };

    vec![level1, level2]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_levels() {
        let levels = builtin_levels();
        assert_eq!(levels.len(), 2);
        assert_eq!(levels[0].env_items.len(), 5);
        assert_eq!(levels[1].env_items.len(), 6);
        assert!(levels.iter().all(|l| !l.is_complete()));
    }

    #[test]
    fn test_is_complete_and_reset() {
        let mut level = builtin_levels().remove(0);
        level.goals[0].is_set = true;
        level.spawners[0].activated = true;
        assert!(level.is_complete());

        level.reset();
        assert!(!level.is_complete());
        assert!(!level.spawners[0].activated);
    }

    #[test]
    fn test_level_without_goals_is_complete() {
        let mut level = builtin_levels().remove(0);
        level.goals.clear();
        assert!(level.is_complete());
        level.reset();
        assert!(level.is_complete());
    }

    #[test]
    fn test_bounds() {
        let level = builtin_levels().remove(0);
        assert_eq!(level.bounds(), Some(Rect::new(0.0, 0.0, 1000.0, 600.0)));
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "id": 7,
            "spawn": [100.0, 100.0],
            "env_items": [
                { "rect": { "x": 0.0, "y": 200.0, "width": 500.0, "height": 50.0 },
                  "blocking": true, "color": [130, 130, 130, 255] }
            ],
            "goals": [
                { "rect": { "x": 400.0, "y": 150.0, "width": 20.0, "height": 50.0 }, "color": "Blue" }
            ],
            "spawners": [
                { "rect": { "x": 50.0, "y": 175.0, "width": 10.0, "height": 25.0 }, "color": "Blue" }
            ]
        }"#;
        let level = Level::from_json(json).unwrap();
        assert_eq!(level.id, 7);
        assert_eq!(level.spawn, Vec2::new(100.0, 100.0));
        assert_eq!(level.goals[0].color, LineColor::Blue);
        assert!(!level.goals[0].is_set);
    }

    #[test]
    fn test_from_json_rejects_negative_size() {
        let json = r#"{
            "id": 1, "spawn": [0.0, 0.0],
            "env_items": [
                { "rect": { "x": 0.0, "y": 0.0, "width": -5.0, "height": 5.0 },
                  "blocking": true, "color": [0, 0, 0, 255] }
            ],
            "goals": [], "spawners": []
        }"#;
        assert!(Level::from_json(json).is_err());
    }
}
