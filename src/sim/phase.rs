//! Game phase transitions
//!
//! Every transition checks the phase it starts from and returns whether it
//! applied, so a stray action in the wrong phase is a silent no-op.

use glam::Vec3;

use super::entity::EntityId;
use super::level::create_level;
use super::state::{GameEvent, GamePhase, GameState};
use super::transition::{Cutscene, MOTHERSHIP_POSITION};
use crate::centered_offset;
use crate::consts::*;

/// Menu -> ShipSelection: lay out the selectable ships
pub fn start_ship_selection(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Menu {
        return false;
    }
    let count = state.settings.ship_count;
    for style in 0..count {
        let x = centered_offset(style, count, SHIP_OPTION_SPACING);
        state.add_ship_option(style, Vec3::new(x, 0.0, 0.0));
    }
    state.set_phase(GamePhase::ShipSelection);
    true
}

/// Select the ship a pointer pick landed on
pub fn pick_ship(state: &mut GameState, id: EntityId) -> bool {
    if state.phase != GamePhase::ShipSelection {
        return false;
    }
    match state.ship_options.iter().find(|s| s.id == id) {
        Some(option) => {
            log::debug!("Picked ship style {}", option.style);
            state.selected_ship = Some(option.style);
            true
        }
        None => {
            log::warn!("Pick on unknown ship option {:?}", id);
            false
        }
    }
}

/// ShipSelection -> Playing: the chosen ship becomes the player, all other
/// options are discarded and level 1 starts
pub fn confirm_ship(state: &mut GameState) -> bool {
    if state.phase != GamePhase::ShipSelection {
        return false;
    }
    let style = state.selected_ship.unwrap_or(0);
    state.clear_ship_options();
    state.replace_player(style);
    log::info!("Ship style {} confirmed", style);
    start_run(state);
    true
}

fn start_run(state: &mut GameState) {
    state.score = 0;
    state.lives = state.settings.starting_lives;
    state.level = 1;
    state.cutscene = None;
    state.remove_mothership();
    state.set_phase(GamePhase::Playing);
    create_level(state);
}

pub fn pause(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Playing {
        return false;
    }
    state.set_phase(GamePhase::Paused);
    true
}

pub fn resume(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Paused {
        return false;
    }
    state.set_phase(GamePhase::Playing);
    true
}

/// Start over at level 1 with the current ship, from GameOver, Victory or
/// Paused
pub fn restart(state: &mut GameState) -> bool {
    if !matches!(
        state.phase,
        GamePhase::GameOver | GamePhase::Victory | GamePhase::Paused
    ) {
        return false;
    }
    log::info!("Restarting run");
    let style = state.player.style;
    state.replace_player(style);
    start_run(state);
    true
}

/// LevelComplete -> Playing with the next wave (or Victory past the last level)
pub fn next_level(state: &mut GameState) -> bool {
    if state.phase != GamePhase::LevelComplete {
        return false;
    }
    state.set_phase(GamePhase::Playing);
    create_level(state);
    true
}

/// Back to the title menu with a fresh run
pub fn return_to_menu(state: &mut GameState) -> bool {
    if state.phase == GamePhase::Menu {
        return false;
    }
    state.clear_world();
    state.clear_ship_options();
    state.remove_mothership();
    state.cutscene = None;
    state.replace_player(0);
    state.score = 0;
    state.lives = state.settings.starting_lives;
    state.level = 1;
    state.set_phase(GamePhase::Menu);
    true
}

/// Lives ran out or the formation broke through
pub fn game_over(state: &mut GameState) {
    let levels_completed = state.level.saturating_sub(1);
    log::info!(
        "Game over at level {} with score {}",
        state.level,
        state.score
    );
    state.set_phase(GamePhase::GameOver);
    state.emit(GameEvent::GameOver {
        score: state.score,
        levels_completed,
    });
}

/// Wave cleared: suspend play and start the mothership cutscene
pub fn begin_level_transition(state: &mut GameState) {
    log::info!("Level {} cleared", state.level);
    state.clear_bullets();
    state.clear_barriers();
    state.spawn_mothership(MOTHERSHIP_POSITION);
    state.cutscene = Some(Cutscene::new(
        state.settings.transition_circle_ms,
        state.settings.transition_entry_ms,
    ));
    state.set_phase(GamePhase::LevelTransition);
}

/// Cutscene over: advance the level counter and wait for the next-level action
pub fn complete_level(state: &mut GameState) {
    state.cutscene = None;
    state.remove_mothership();
    state.player.reset_position();

    let completed = state.level;
    state.level += 1;
    state.set_phase(GamePhase::LevelComplete);
    state.emit(GameEvent::LevelComplete {
        level: completed,
        score: state.score,
    });
}

/// Debug: flip invincibility during play
pub fn toggle_invincibility(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Playing {
        return false;
    }
    state.player.god_mode = !state.player.god_mode;
    log::info!("Debug invincibility {}", state.player.god_mode);
    true
}

/// Debug: wipe the wave; the next tick sees an empty field and completes it
pub fn clear_enemies(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Playing {
        return false;
    }
    log::info!("Debug: clearing {} enemies", state.enemies.len());
    state.clear_enemies();
    true
}

/// Debug: jump straight into the next level's wave, skipping the cutscene
pub fn skip_level(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Playing {
        return false;
    }
    state.level += 1;
    log::info!("Debug: skipping to level {}", state.level);
    create_level(state);
    true
}
