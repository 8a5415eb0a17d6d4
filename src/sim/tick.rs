//! Per-frame simulation tick
//!
//! The simulation follows the frame model: motion is per tick, timers are
//! deadlines against `GameState::clock_ms`, which only advances while play
//! is active.

use rand::Rng;

use super::bullet::BulletOwner;
use super::collision::{self, Flow};
use super::phase;
use super::player::Steer;
use super::state::{GameEvent, GamePhase, GameState};
use super::transition::CutsceneStep;
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub steer_left: bool,
    pub steer_right: bool,
    /// Fire held; the player's cooldown rate-limits it
    pub fire: bool,
    /// Pause toggle (already edge-detected)
    pub pause: bool,
}

/// Rate parameters threaded through one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickParams {
    /// Frame time (ms)
    pub dt_ms: f64,
    /// Distance a linear bullet travels this tick
    pub bullet_speed: f32,
}

impl TickParams {
    pub fn new(dt_ms: f64, bullet_speed: f32) -> Self {
        Self {
            dt_ms,
            bullet_speed,
        }
    }
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput, params: TickParams) {
    // Pause is resolved before anything mutates
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                phase::pause(state);
                return;
            }
            GamePhase::Paused => {
                phase::resume(state);
            }
            _ => {}
        }
    }

    match state.phase {
        GamePhase::Playing => play(state, input, params),
        GamePhase::LevelTransition => run_cutscene(state, params.dt_ms),
        _ => {}
    }
}

fn play(state: &mut GameState, input: &TickInput, params: TickParams) {
    state.clock_ms += params.dt_ms;
    let now = state.clock_ms;

    // Input
    if input.steer_left {
        state.player.steer(Steer::Left);
    }
    if input.steer_right {
        state.player.steer(Steer::Right);
    }
    if input.fire
        && let Some(spawn) = state.player.shoot(now)
    {
        state.spawn_bullet(BulletOwner::Player, spawn);
    }

    // Movement
    let time_s = state.time_secs();
    for enemy in &mut state.enemies {
        enemy.move_step(time_s);
    }
    charge_special_attacks(state);
    random_enemy_fire(state);

    // Collisions
    collision::update_player_bullets(state, params.bullet_speed);
    if collision::update_enemy_bullets(state, params.bullet_speed) == Flow::GameOver {
        return;
    }

    // Win/loss
    if formation_breached(state) {
        phase::game_over(state);
        return;
    }
    if state.enemies.is_empty() {
        phase::begin_level_transition(state);
    }
}

fn charge_special_attacks(state: &mut GameState) {
    let now = state.clock_ms;
    let mut fired = Vec::new();
    for enemy in &mut state.enemies {
        if let Some((attack, bullets)) = enemy.update_special(now) {
            fired.push((enemy.id, attack, bullets));
        }
    }

    for (boss, attack, bullets) in fired {
        log::debug!("Boss {:?} special attack {:?}", boss, attack);
        state.emit(GameEvent::SpecialAttack { boss, attack });
        for spawn in bullets {
            state.spawn_bullet(BulletOwner::Enemy, spawn);
        }
    }
}

/// With probability `enemy_fire_chance`, one random enemy tries to shoot
fn random_enemy_fire(state: &mut GameState) {
    if state.enemies.is_empty() {
        return;
    }
    if state.rng.random::<f64>() >= state.settings.enemy_fire_chance {
        return;
    }
    let index = state.rng.random_range(0..state.enemies.len());
    let now = state.clock_ms;
    if let Some(volley) = state.enemies[index].shoot(now, &mut state.rng) {
        for spawn in volley {
            state.spawn_bullet(BulletOwner::Enemy, spawn);
        }
    }
}

/// Any non-boss enemy past the danger line (or the lower fail-safe line)
fn formation_breached(state: &GameState) -> bool {
    state
        .enemies
        .iter()
        .filter(|e| !e.is_boss())
        .any(|e| {
            if e.position.y < FAILSAFE_Y {
                log::warn!("Enemy {:?} slipped past the fail-safe line", e.id);
                true
            } else if e.position.y < DANGER_ZONE_Y {
                log::info!("Enemy {:?} reached the danger zone", e.id);
                true
            } else {
                false
            }
        })
}

fn run_cutscene(state: &mut GameState, dt_ms: f64) {
    let Some(cutscene) = state.cutscene.as_mut() else {
        log::warn!("Level transition without a cutscene; completing level");
        phase::complete_level(state);
        return;
    };
    match cutscene.advance(dt_ms) {
        CutsceneStep::Running(position) => state.player.position = position,
        CutsceneStep::Finished => phase::complete_level(state),
    }
}
