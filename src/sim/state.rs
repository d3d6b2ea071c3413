//! Game state and core simulation types
//!
//! One `GameState` owns everything that changes during play: the player, the
//! level table with its per-attempt flags, and the camera.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{any_collision, closest_collision_point};
use super::geometry::{Rect, Segment};
use super::level::{Level, builtin_levels};
use super::lines::{LineColor, Lines};
use crate::Settings;
use crate::clamp_length;

/// Current screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for confirm before play starts
    Title,
    /// Active gameplay
    Playing,
    /// Every level finished
    Ending,
}

/// Things that happened during a tick, drained by the caller
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    WaypointAdded { color: LineColor, index: usize },
    SpawnerActivated { color: LineColor },
    GoalSet { color: LineColor },
    LevelRestarted { level_id: u32 },
    LevelAdvanced { level_id: u32 },
    GameCompleted,
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Bottom-center of the body ("feet")
    pub position: Vec2,
    /// Vertical speed, positive is down
    pub speed: f32,
    pub can_jump: bool,
    pub size: f32,
    /// Color currently being drawn, if any
    pub selected_color: Option<LineColor>,
    pub lines: Lines,
}

impl Player {
    pub fn new(position: Vec2, size: f32, line_capacity: usize) -> Self {
        Self {
            position,
            speed: 0.0,
            can_jump: false,
            size,
            selected_color: None,
            lines: Lines::new(line_capacity),
        }
    }

    /// Body rectangle, standing on `position`
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.position.x - self.size / 2.0,
            self.position.y - self.size,
            self.size,
            self.size,
        )
    }

    /// Reference point where new waypoints are dropped
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.position.x, self.position.y - self.size / 2.0)
    }

    /// Back to the spawn point with empty lines
    pub fn reset(&mut self, spawn: Vec2, line_capacity: usize) {
        self.position = spawn;
        self.speed = 0.0;
        self.can_jump = false;
        self.selected_color = None;
        self.lines.reset(line_capacity);
    }
}

/// 2D camera following the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub target: Vec2,
    pub offset: Vec2,
    pub zoom: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            target: Vec2::ZERO,
            offset: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl Camera {
    pub fn world_to_screen(&self, p: Vec2) -> Vec2 {
        (p - self.target) * self.zoom + self.offset
    }

    /// Center on `focus` but never show space outside `bounds`
    pub fn follow(&mut self, focus: Vec2, bounds: Option<Rect>, screen: Vec2) {
        self.target = focus;
        self.offset = screen / 2.0;

        let Some(bounds) = bounds else {
            return;
        };

        // Both corners are measured with the centered offset
        let max = self.world_to_screen(Vec2::new(bounds.right(), bounds.bottom()));
        let min = self.world_to_screen(Vec2::new(bounds.left(), bounds.top()));

        if max.x < screen.x {
            self.offset.x = screen.x - (max.x - screen.x / 2.0);
        }
        if max.y < screen.y {
            self.offset.y = screen.y - (max.y - screen.y / 2.0);
        }
        if min.x > 0.0 {
            self.offset.x = screen.x / 2.0 - min.x;
        }
        if min.y > 0.0 {
            self.offset.y = screen.y / 2.0 - min.y;
        }
    }
}

/// A segment the renderer should draw for a line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewSegment {
    pub color: LineColor,
    pub segment: Segment,
    /// Follows the player rather than joining two waypoints
    pub live: bool,
}

/// Complete game state
///
/// The level table is never empty and `current_level` always indexes it;
/// decoding a saved state checks this before handing it out.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "GameStateData")]
pub struct GameState {
    pub settings: Settings,
    pub phase: GamePhase,
    /// Level table, in play order
    pub(crate) levels: Vec<Level>,
    /// Index into `levels`
    pub(crate) current_level: usize,
    pub player: Player,
    pub camera: Camera,
    /// Gameplay tick counter
    pub time_ticks: u64,
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

/// Unchecked decoded form of [`GameState`]
#[derive(Deserialize)]
struct GameStateData {
    settings: Settings,
    phase: GamePhase,
    levels: Vec<Level>,
    current_level: usize,
    player: Player,
    camera: Camera,
    time_ticks: u64,
}

impl TryFrom<GameStateData> for GameState {
    type Error = String;

    fn try_from(data: GameStateData) -> Result<Self, Self::Error> {
        if data.current_level >= data.levels.len() {
            return Err(format!(
                "current level {} out of range for {} levels",
                data.current_level,
                data.levels.len()
            ));
        }
        Ok(Self {
            settings: data.settings,
            phase: data.phase,
            levels: data.levels,
            current_level: data.current_level,
            player: data.player,
            camera: data.camera,
            time_ticks: data.time_ticks,
            events: Vec::new(),
        })
    }
}

impl GameState {
    /// New game over the built-in levels
    pub fn new(settings: Settings) -> Self {
        let levels = builtin_levels();
        let spawn = levels[0].spawn;
        Self::build(settings, levels, spawn)
    }

    /// New game over a custom level table; `None` if the table is empty
    pub fn with_levels(settings: Settings, levels: Vec<Level>) -> Option<Self> {
        let spawn = levels.first()?.spawn;
        Some(Self::build(settings, levels, spawn))
    }

    fn build(settings: Settings, levels: Vec<Level>, spawn: Vec2) -> Self {
        let player = Player::new(spawn, settings.player_size, settings.line_capacity);
        let mut state = Self {
            settings,
            phase: GamePhase::Title,
            levels,
            current_level: 0,
            player,
            camera: Camera::default(),
            time_ticks: 0,
            events: Vec::new(),
        };
        state.reset_level_state();
        state
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// Index of the level being played
    pub fn current_level(&self) -> usize {
        self.current_level
    }

    pub fn level(&self) -> &Level {
        &self.levels[self.current_level]
    }

    pub fn level_mut(&mut self) -> &mut Level {
        &mut self.levels[self.current_level]
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Commit `point` to the line of `color`
    ///
    /// Refused unless `color` is selected, the line has room and the new
    /// segment stays clear of every wall.
    pub fn append_waypoint(&mut self, color: LineColor, point: Vec2) -> bool {
        if self.player.selected_color != Some(color) {
            log::debug!("{} waypoint ignored: color not selected", color);
            return false;
        }

        let env = &self.levels[self.current_level].env_items;
        match self.player.lines.get_mut(color).try_push(point, env) {
            Ok(index) => {
                log::debug!("{} waypoint #{} at ({}, {})", color, index, point.x, point.y);
                self.events.push(GameEvent::WaypointAdded { color, index });
                true
            }
            Err(reason) => {
                log::debug!("{} waypoint rejected: {}", color, reason);
                false
            }
        }
    }

    /// Interact with a spawner the player is standing in
    ///
    /// Selects the spawner's color. The first activation in an attempt also
    /// commits the spawner anchor as the line's first waypoint.
    pub fn try_activate_spawner(&mut self) -> bool {
        let player_rect = self.player.rect();
        let Some(index) = self
            .level()
            .spawners
            .iter()
            .position(|s| s.rect.overlaps(&player_rect))
        else {
            return false;
        };

        let spawner = &mut self.levels[self.current_level].spawners[index];
        let (color, anchor, first_use) = (spawner.color, spawner.anchor(), !spawner.activated);
        spawner.activated = true;

        self.player.selected_color = Some(color);
        if first_use {
            log::debug!("{} spawner activated", color);
            self.events.push(GameEvent::SpawnerActivated { color });
            self.append_waypoint(color, anchor);
        }
        true
    }

    /// Drop the selected color and re-arm every spawner
    pub fn deselect(&mut self) {
        self.player.selected_color = None;
        self.level_mut().deactivate_spawners();
    }

    /// Reach a goal the player is standing in
    ///
    /// Requires the selected color to match and the segment from that line's
    /// last waypoint to the player to be clear. Only this final segment is
    /// checked. On success the goal anchor is committed and the color is
    /// deselected.
    pub fn try_set_goal(&mut self) -> bool {
        let Some(color) = self.player.selected_color else {
            return false;
        };
        let Some(last) = self.player.lines.get(color).last() else {
            return false;
        };

        let center = self.player.center();
        let player_rect = self.player.rect();
        let level = self.level();
        if any_collision(&Segment::new(last, center), &level.env_items) {
            return false;
        }

        let Some(index) = level
            .goals
            .iter()
            .position(|g| !g.is_set && g.color == color && g.rect.overlaps(&player_rect))
        else {
            return false;
        };

        let goal = &mut self.levels[self.current_level].goals[index];
        goal.is_set = true;
        let anchor = goal.anchor();

        log::info!("{} goal reached", color);
        self.append_waypoint(color, anchor);
        self.player.selected_color = None;
        self.events.push(GameEvent::GoalSet { color });
        true
    }

    /// Reach a goal if possible, otherwise drop a waypoint at the player
    pub fn place_point(&mut self) -> bool {
        if self.try_set_goal() {
            return true;
        }
        match self.player.selected_color {
            Some(color) => {
                let center = self.player.center();
                self.append_waypoint(color, center)
            }
            None => false,
        }
    }

    pub fn is_level_complete(&self) -> bool {
        self.level().is_complete()
    }

    /// Fresh attempt at the current level
    ///
    /// Clears goals, spawners and all three lines, puts the player on the
    /// spawn point and resets the camera zoom.
    pub fn reset_level_state(&mut self) {
        let capacity = self.settings.line_capacity;
        let level = self.level_mut();
        level.reset();
        let spawn = level.spawn;
        self.player.reset(spawn, capacity);
        self.camera.zoom = 1.0;
    }

    /// Player-requested restart of the current level
    pub fn restart_level(&mut self) {
        self.reset_level_state();
        let level_id = self.level().id;
        log::info!("Level {} restarted", level_id);
        self.events.push(GameEvent::LevelRestarted { level_id });
    }

    /// Advance when every goal is set
    ///
    /// Moves to the next level, or to the ending screen after the last one.
    /// Either way the now-current level is reset, so completion is reported
    /// once.
    pub fn update_progress(&mut self) -> bool {
        if self.phase != GamePhase::Playing || !self.is_level_complete() {
            return false;
        }

        if self.current_level + 1 < self.levels.len() {
            self.current_level += 1;
            self.reset_level_state();
            let level_id = self.level().id;
            log::info!("Advanced to level {}", level_id);
            self.events.push(GameEvent::LevelAdvanced { level_id });
        } else {
            self.current_level = 0;
            self.reset_level_state();
            self.phase = GamePhase::Ending;
            log::info!("All levels complete");
            self.events.push(GameEvent::GameCompleted);
        }
        true
    }

    /// Segments a renderer would draw for every line
    ///
    /// Committed segments plus, for the selected line, a live segment from
    /// its last waypoint toward the player. Every segment is clamped to the
    /// preview length; the live one also stops at the first wall. Segments
    /// leaving a waypoint that sits inside a goal of the same color are
    /// skipped.
    pub fn line_preview(&self) -> Vec<PreviewSegment> {
        let level = self.level();
        let max_len = self.settings.preview_max_length;
        let mut out = Vec::new();

        for line in self.player.lines.iter() {
            let points = line.points();
            for (i, &from) in points.iter().enumerate() {
                let at_goal = level
                    .goals
                    .iter()
                    .any(|g| g.color == line.color && g.rect.contains_point(from));
                if at_goal {
                    continue;
                }

                if let Some(&to) = points.get(i + 1) {
                    if let Some(end) = clamp_length(from, to, max_len) {
                        out.push(PreviewSegment {
                            color: line.color,
                            segment: Segment::new(from, end),
                            live: false,
                        });
                    }
                } else if !line.is_full() && self.player.selected_color == Some(line.color) {
                    let Some(end) = clamp_length(from, self.player.center(), max_len) else {
                        continue;
                    };
                    let end = closest_collision_point(&Segment::new(from, end), &level.env_items);
                    out.push(PreviewSegment {
                        color: line.color,
                        segment: Segment::new(from, end),
                        live: true,
                    });
                }
            }
        }

        out
    }
}
