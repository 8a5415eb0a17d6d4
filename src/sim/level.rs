//! Level/wave generation and difficulty scaling

use glam::Vec3;
use rand::Rng;

use super::barrier::Barrier;
use super::enemy::Enemy;
use super::state::{GameEvent, GamePhase, GameState};
use crate::centered_offset;
use crate::consts::*;

/// Standard grid layout
pub const GRID_X_SPACING: f32 = 5.0;
pub const GRID_Y_SPACING: f32 = 3.0;
pub const GRID_START_Y: f32 = 17.0;

/// Boss minion line
pub const MINION_SPACING: f32 = 6.0;
pub const MINION_Y: f32 = 10.0;
pub const MINION_AMPLITUDE: f32 = 0.03;
pub const MINION_FREQUENCY: f32 = 1.5;

/// Enemy grid size for a standard level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridDimensions {
    pub rows: u32,
    pub cols: u32,
}

/// Grid grows one row every 3 levels (max 6) and one column every 4 (max 8)
pub fn grid_dimensions(level: u32) -> GridDimensions {
    GridDimensions {
        rows: (4 + level / 3).min(6),
        cols: (5 + level / 4).min(8),
    }
}

/// Per-enemy difficulty knobs for a standard level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Difficulty {
    pub amplitude: f32,
    pub frequency: f32,
    pub shooting_interval_ms: f64,
}

/// Interpolate toward harder values; saturates at level 10
pub fn difficulty(level: u32) -> Difficulty {
    let progression = (level as f32 / 10.0).min(1.0);
    Difficulty {
        amplitude: 0.02 + progression * 0.03,
        frequency: 1.0 + progression * 1.5,
        shooting_interval_ms: 5000.0 - progression as f64 * 3000.0,
    }
}

/// What a level number turns into
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LevelPlan {
    /// Past the last level
    Victory,
    Boss { boss_level: u32, minions: u32 },
    Standard {
        grid: GridDimensions,
        difficulty: Difficulty,
    },
}

pub fn plan_level(level: u32) -> LevelPlan {
    if level > MAX_LEVEL {
        LevelPlan::Victory
    } else if level.is_multiple_of(BOSS_LEVEL_INTERVAL) {
        let boss_level = level / BOSS_LEVEL_INTERVAL;
        let minions = if boss_level >= 2 { boss_level * 2 } else { 0 };
        LevelPlan::Boss {
            boss_level,
            minions,
        }
    } else {
        LevelPlan::Standard {
            grid: grid_dimensions(level),
            difficulty: difficulty(level),
        }
    }
}

/// Evenly spaced barrier columns, centered on x = 0
pub fn barrier_xs(count: usize) -> Vec<f32> {
    (0..count)
        .map(|i| centered_offset(i, count, BARRIER_SPACING))
        .collect()
}

/// Tear down the current wave and build the one for `state.level`.
///
/// Past the last level this triggers victory instead.
pub fn create_level(state: &mut GameState) {
    state.clear_world();

    if state.level == 0 {
        log::error!("create_level called with level 0; clamping to 1");
        state.level = 1;
    }

    match plan_level(state.level) {
        LevelPlan::Victory => {
            log::info!("All {} levels cleared, final score {}", MAX_LEVEL, state.score);
            state.set_phase(GamePhase::Victory);
            state.emit(GameEvent::Victory { score: state.score });
            return;
        }
        LevelPlan::Boss {
            boss_level,
            minions,
        } => {
            log::info!(
                "Level {}: boss level {} with {} minions",
                state.level,
                boss_level,
                minions
            );
            spawn_boss_wave(state, boss_level, minions);
        }
        LevelPlan::Standard { grid, difficulty } => {
            log::info!(
                "Level {}: {} x {} grid, interval {:.0} ms",
                state.level,
                grid.rows,
                grid.cols,
                difficulty.shooting_interval_ms
            );
            spawn_grid(state, grid, difficulty);
        }
    }

    for x in barrier_xs(state.settings.barrier_count) {
        let id = state.next_entity_id();
        state.add_barrier(Barrier::new(id, x));
    }

    state.emit(GameEvent::LevelStarted { level: state.level });
}

fn spawn_grid(state: &mut GameState, grid: GridDimensions, difficulty: Difficulty) {
    for row in 0..grid.rows {
        for col in 0..grid.cols {
            let position = Vec3::new(
                centered_offset(col as usize, grid.cols as usize, GRID_X_SPACING),
                GRID_START_Y - row as f32 * GRID_Y_SPACING,
                0.0,
            );
            let id = state.next_entity_id();
            let mut enemy = Enemy::new(id, row, col, position);
            enemy.amplitude = difficulty.amplitude;
            enemy.frequency = difficulty.frequency;
            enemy.base_interval_ms = difficulty.shooting_interval_ms;
            // Stagger the first volley so the grid does not fire in lockstep
            enemy.shooting_interval_ms =
                difficulty.shooting_interval_ms * state.rng.random_range(0.6..1.4);
            enemy.last_shot_ms = Some(state.clock_ms);
            state.add_enemy(enemy);
        }
    }
}

fn spawn_boss_wave(state: &mut GameState, boss_level: u32, minions: u32) {
    let id = state.next_entity_id();
    let boss = Enemy::boss(id, boss_level, state.clock_ms);
    state.add_enemy(boss);

    for i in 0..minions {
        let position = Vec3::new(
            centered_offset(i as usize, minions as usize, MINION_SPACING),
            MINION_Y,
            0.0,
        );
        let id = state.next_entity_id();
        let mut minion = Enemy::new(id, 1, i, position);
        minion.amplitude = MINION_AMPLITUDE;
        minion.frequency = MINION_FREQUENCY;
        state.add_enemy(minion);
    }
}
