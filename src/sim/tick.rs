//! Per-frame simulation tick
//!
//! Applies decoded input, steps the player, moves the camera and checks level
//! completion, in that order.

use glam::Vec2;

use super::level::EnvItem;
use super::state::{GamePhase, GameState, Player};
use crate::Settings;

/// Input commands for a single tick (already decoded by the platform layer)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Walk left (held)
    pub left: bool,
    /// Walk right (held)
    pub right: bool,
    /// Jump (held)
    pub jump: bool,
    /// Interact with a spawner (pressed)
    pub select: bool,
    /// Drop the selected color (pressed)
    pub deselect: bool,
    /// Drop a waypoint or reach a goal (pressed)
    pub place_point: bool,
    /// Restart the current level (pressed)
    pub restart: bool,
    /// Leave the title or ending screen (pressed)
    pub confirm: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    match state.phase {
        GamePhase::Title => {
            if input.confirm {
                log::info!("Starting level {}", state.level().id);
                state.phase = GamePhase::Playing;
            }
            return;
        }
        GamePhase::Ending => {
            if input.confirm {
                state.phase = GamePhase::Title;
            }
            return;
        }
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;

    if input.deselect {
        state.deselect();
    }
    if input.select {
        state.try_activate_spawner();
    }
    if input.place_point {
        state.place_point();
    }

    let env = &state.levels[state.current_level].env_items;
    step_player(&mut state.player, env, input, &state.settings, dt);

    if input.restart {
        state.restart_level();
    }

    let screen = Vec2::new(state.settings.screen_width, state.settings.screen_height);
    let bounds = state.level().bounds();
    state.camera.follow(state.player.position, bounds, screen);

    state.update_progress();
}

/// Walk, jump and fall, landing on the top of blocking items
pub fn step_player(
    player: &mut Player,
    env: &[EnvItem],
    input: &TickInput,
    settings: &Settings,
    dt: f32,
) {
    if input.left {
        player.position.x -= settings.hor_speed * dt;
    }
    if input.right {
        player.position.x += settings.hor_speed * dt;
    }
    if input.jump && player.can_jump {
        player.speed = -settings.jump_speed;
        player.can_jump = false;
    }

    let p = player.position;
    let landing = env.iter().find(|item| {
        let r = &item.rect;
        item.blocking
            && r.left() <= p.x
            && r.right() >= p.x
            && r.top() >= p.y
            && r.top() <= p.y + player.speed * dt
    });

    match landing {
        Some(item) => {
            player.speed = 0.0;
            player.position.y = item.rect.top();
            player.can_jump = true;
        }
        None => {
            player.position.y += player.speed * dt;
            player.speed += settings.gravity * dt;
            player.can_jump = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::level::{GRAY, Goal, Level, LineSpawner};
    use crate::sim::state::GameEvent;
    use crate::sim::{LineColor, Rect};

    fn playing() -> GameState {
        let mut state = GameState::new(Settings::default());
        state.phase = GamePhase::Playing;
        state
    }

    /// Tick until the player stands on something
    fn settle(state: &mut GameState) {
        for _ in 0..600 {
            tick(state, &TickInput::default(), SIM_DT);
            if state.player.can_jump {
                return;
            }
        }
        panic!("player never landed");
    }

    #[test]
    fn test_title_to_playing() {
        let mut state = GameState::new(Settings::default());
        assert_eq!(state.phase, GamePhase::Title);

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Title);
        assert_eq!(state.time_ticks, 0);

        let input = TickInput {
            confirm: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_player_falls_and_lands() {
        let mut state = playing();
        let start_y = state.player.position.y;
        settle(&mut state);
        // Spawn at (400, 280) is above the ground at y=400
        assert_eq!(state.player.position.y, 400.0);
        assert!(state.player.position.y > start_y);
        assert_eq!(state.player.speed, 0.0);
    }

    #[test]
    fn test_jump_leaves_ground() {
        let mut state = playing();
        settle(&mut state);
        let input = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert!(state.player.position.y < 400.0);
        assert!(!state.player.can_jump);
    }

    #[test]
    fn test_walk_right() {
        let mut state = playing();
        settle(&mut state);
        let x = state.player.position.x;
        let input = TickInput {
            right: true,
            ..Default::default()
        };
        for _ in 0..60 {
            tick(&mut state, &input, SIM_DT);
        }
        assert!((state.player.position.x - (x + 200.0)).abs() < 0.1);
    }

    #[test]
    fn test_non_blocking_items_do_not_catch_player() {
        let mut player = Player::new(Vec2::new(100.0, 0.0), 40.0, 5);
        player.speed = 600.0;
        let env = [EnvItem::new(Rect::new(0.0, 5.0, 200.0, 10.0), false, GRAY)];
        step_player(&mut player, &env, &TickInput::default(), &Settings::default(), SIM_DT);
        assert!(!player.can_jump);
        assert!((player.position.y - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_restart_resets_lines() {
        let mut state = playing();
        state.player.selected_color = Some(LineColor::Red);
        state.append_waypoint(LineColor::Red, Vec2::new(100.0, 100.0));
        let input = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert!(state.player.lines.red.is_empty());
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::LevelRestarted { level_id: 1 })
        );
    }

    #[test]
    fn test_determinism() {
        let inputs = [
            TickInput {
                right: true,
                ..Default::default()
            },
            TickInput {
                jump: true,
                right: true,
                ..Default::default()
            },
            TickInput {
                left: true,
                place_point: true,
                ..Default::default()
            },
        ];

        let mut a = playing();
        let mut b = playing();
        for i in 0..300 {
            let input = &inputs[i % inputs.len()];
            tick(&mut a, input, SIM_DT);
            tick(&mut b, input, SIM_DT);
        }
        assert_eq!(a.player.position, b.player.position);
        assert_eq!(a.camera, b.camera);
    }

    fn wall_and_goal_level(id: u32) -> Level {
        Level {
            id,
            spawn: Vec2::new(100.0, 400.0),
            env_items: vec![EnvItem::new(Rect::new(300.0, 200.0, 400.0, 10.0), true, GRAY)],
            goals: vec![Goal::new(Rect::new(600.0, 300.0, 50.0, 100.0), LineColor::Red)],
            spawners: vec![LineSpawner::new(Rect::new(90.0, 375.0, 10.0, 25.0), LineColor::Red)],
        }
    }

    /// Teleport to `feet` and press the given keys for one tick
    fn act_at(state: &mut GameState, feet: Vec2, input: TickInput) {
        state.player.position = feet;
        state.player.speed = 0.0;
        tick(state, &input, SIM_DT);
    }

    fn place() -> TickInput {
        TickInput {
            place_point: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_line_cannot_pass_through_wall_but_can_route_around() {
        let mut state = GameState::with_levels(
            Settings::default(),
            vec![wall_and_goal_level(1), wall_and_goal_level(2)],
        )
        .unwrap();
        state.phase = GamePhase::Playing;
        state.player.selected_color = Some(LineColor::Red);

        // Below the wall
        act_at(&mut state, Vec2::new(500.0, 300.0), place());
        assert_eq!(state.player.lines.red.points(), &[Vec2::new(500.0, 280.0)]);

        // Straight up through the wall
        act_at(&mut state, Vec2::new(500.0, 150.0), place());
        assert_eq!(state.player.lines.red.len(), 1);

        // Toward the wall's left end, then onto the goal
        act_at(&mut state, Vec2::new(250.0, 300.0), place());
        assert_eq!(state.player.lines.red.len(), 2);
        act_at(&mut state, Vec2::new(625.0, 400.0), place());

        let events = state.drain_events();
        assert!(events.contains(&GameEvent::GoalSet {
            color: LineColor::Red
        }));
        assert!(events.contains(&GameEvent::WaypointAdded {
            color: LineColor::Red,
            index: 2
        }));
        // Completing the only goal moved us to level 2 with a clean slate
        assert!(events.contains(&GameEvent::LevelAdvanced { level_id: 2 }));
        assert_eq!(state.level().id, 2);
        assert!(state.player.lines.red.is_empty());
    }

    #[test]
    fn test_goal_sets_and_appends_anchor() {
        let mut state = GameState::with_levels(Settings::default(), vec![wall_and_goal_level(1)]).unwrap();
        state.phase = GamePhase::Playing;
        state.player.selected_color = Some(LineColor::Red);
        assert!(state.append_waypoint(LineColor::Red, Vec2::new(250.0, 280.0)));

        state.player.position = Vec2::new(625.0, 400.0);
        assert!(state.try_set_goal());
        assert!(state.level().goals[0].is_set);
        assert_eq!(
            state.player.lines.red.points(),
            &[Vec2::new(250.0, 280.0), Vec2::new(625.0, 350.0)]
        );
        assert!(state.is_level_complete());
    }

    #[test]
    fn test_level_completion_fires_once() {
        let mut state = GameState::with_levels(
            Settings::default(),
            vec![wall_and_goal_level(1), wall_and_goal_level(2)],
        )
        .unwrap();
        state.phase = GamePhase::Playing;
        assert!(!state.is_level_complete());

        state.level_mut().goals[0].is_set = true;
        assert!(state.is_level_complete());

        tick(&mut state, &TickInput::default(), SIM_DT);
        let events = state.drain_events();
        assert_eq!(events, vec![GameEvent::LevelAdvanced { level_id: 2 }]);

        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert!(state.drain_events().is_empty());
        assert_eq!(state.level().id, 2);

        // Finishing the last level ends the game, also exactly once
        state.level_mut().goals[0].is_set = true;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.drain_events(), vec![GameEvent::GameCompleted]);
        assert_eq!(state.phase, GamePhase::Ending);
        assert_eq!(state.current_level(), 0);
        assert!(!state.is_level_complete());

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.drain_events().is_empty());

        let confirm = TickInput {
            confirm: true,
            ..Default::default()
        };
        tick(&mut state, &confirm, SIM_DT);
        assert_eq!(state.phase, GamePhase::Title);
    }

    #[test]
    fn test_full_playthrough_of_builtin_levels() {
        let mut state = playing();
        let select = TickInput {
            select: true,
            ..Default::default()
        };

        // Level 1: floor-level straight shot
        act_at(&mut state, Vec2::new(205.0, 400.0), select.clone());
        act_at(&mut state, Vec2::new(625.0, 400.0), place());
        assert_eq!(state.level().id, 2);

        // Level 2: the central wall forces a detour over the top
        act_at(&mut state, Vec2::new(205.0, 400.0), select.clone());
        act_at(&mut state, Vec2::new(625.0, 400.0), place());
        assert!(!state.level().goals[0].is_set);

        act_at(&mut state, Vec2::new(260.0, 200.0), place());
        act_at(&mut state, Vec2::new(740.0, 200.0), place());
        act_at(&mut state, Vec2::new(760.0, 400.0), place());
        assert_eq!(state.player.lines.red.len(), 4);

        act_at(&mut state, Vec2::new(625.0, 400.0), place());
        assert_eq!(state.phase, GamePhase::Ending);
    }
}
