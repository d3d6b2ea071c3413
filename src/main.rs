//! Strings - headless native runner
//!
//! Rendering and input polling live in the platform shell. Natively we run a
//! scripted playthrough of the built-in levels and log what happens:
//!
//! ```text
//! RUST_LOG=debug strings [settings.json]
//! ```

use glam::Vec2;
use strings::Settings;
use strings::consts::SIM_DT;
use strings::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

/// A scripted action: stand at `feet`, then press the given keys
struct Step {
    feet: Vec2,
    select: bool,
    place_point: bool,
}

const fn select_at(x: f32, y: f32) -> Step {
    Step {
        feet: Vec2::new(x, y),
        select: true,
        place_point: false,
    }
}

const fn place_at(x: f32, y: f32) -> Step {
    Step {
        feet: Vec2::new(x, y),
        select: false,
        place_point: true,
    }
}

/// Level 1: straight along the floor from the spawner to the goal
const LEVEL_1_ROUTE: &[Step] = &[select_at(205.0, 400.0), place_at(625.0, 400.0)];

/// Level 2: over the central wall, then down past the right platform
const LEVEL_2_ROUTE: &[Step] = &[
    select_at(205.0, 400.0),
    place_at(260.0, 200.0),
    place_at(740.0, 200.0),
    place_at(760.0, 400.0),
    place_at(625.0, 400.0),
];

fn run_route(state: &mut GameState, route: &[Step]) {
    for step in route {
        state.player.position = step.feet;
        state.player.speed = 0.0;
        let input = TickInput {
            select: step.select,
            place_point: step.place_point,
            ..Default::default()
        };
        tick(state, &input, SIM_DT);

        for event in state.drain_events() {
            match event {
                GameEvent::WaypointAdded { color, index } => {
                    log::info!("  {} waypoint #{}", color, index)
                }
                GameEvent::SpawnerActivated { color } => log::info!("  picked up {}", color),
                GameEvent::GoalSet { color } => log::info!("  {} goal set", color),
                GameEvent::LevelRestarted { level_id } => {
                    log::info!("  level {} restarted", level_id)
                }
                GameEvent::LevelAdvanced { level_id } => log::info!("Now on level {}", level_id),
                GameEvent::GameCompleted => log::info!("Game complete"),
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Strings (native) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };

    let mut state = GameState::new(settings);
    let confirm = TickInput {
        confirm: true,
        ..Default::default()
    };
    tick(&mut state, &confirm, SIM_DT);

    for route in [LEVEL_1_ROUTE, LEVEL_2_ROUTE] {
        log::info!("Playing level {}", state.level().id);
        run_route(&mut state, route);
    }

    if state.phase == GamePhase::Ending {
        println!("Finished every level in {} ticks", state.time_ticks);
    } else {
        println!(
            "Autoplay stopped on level {} ({:?})",
            state.level().id,
            state.phase
        );
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The web shell drives `strings::sim::tick` directly
}
