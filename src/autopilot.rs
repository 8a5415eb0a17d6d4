//! Autopilot: an AI that plays through `InputSnapshot`s
//!
//! Used by the headless demo binary and by long-running tests. It walks the
//! menus, lines up under the nearest enemy, fires continuously and sidesteps
//! enemy bullets that are about to land.

use crate::consts::*;
use crate::platform::InputSnapshot;
use crate::sim::{Entity, GamePhase, GameState};

/// How close (horizontally) an incoming bullet must be to trigger a dodge
const DODGE_WIDTH: f32 = 1.5;
/// How far above the ship incoming bullets are considered
const DODGE_HEIGHT: f32 = 4.0;

#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    frame: u64,
    /// Ship style to pick during selection
    pub preferred_style: usize,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_input(&mut self, state: &GameState) -> InputSnapshot {
        self.frame += 1;
        // Alternate so every other frame is a fresh press
        let tap = self.frame.is_multiple_of(2);

        match state.phase {
            GamePhase::Playing => self.fly(state),
            GamePhase::ShipSelection => InputSnapshot {
                fire: tap,
                pick: state
                    .ship_options
                    .iter()
                    .find(|s| s.style == self.preferred_style)
                    .map(|s| s.id),
                ..Default::default()
            },
            GamePhase::Menu
            | GamePhase::LevelComplete
            | GamePhase::GameOver
            | GamePhase::Victory => InputSnapshot {
                fire: tap,
                ..Default::default()
            },
            GamePhase::Paused | GamePhase::LevelTransition => InputSnapshot::default(),
        }
    }

    fn fly(&self, state: &GameState) -> InputSnapshot {
        let ship = state.player.position();
        let mut input = InputSnapshot {
            fire: true,
            ..Default::default()
        };

        // Dodge first: step away from the closest bullet about to land
        let threat = state
            .enemy_bullets
            .iter()
            .filter(|b| (b.position.x - ship.x).abs() < DODGE_WIDTH)
            .filter(|b| b.position.y > ship.y && b.position.y < ship.y + DODGE_HEIGHT)
            .min_by(|a, b| a.position.y.total_cmp(&b.position.y));
        if let Some(bullet) = threat {
            let room_left = ship.x > -PLAYER_X_LIMIT + DODGE_WIDTH;
            let pinned_right = ship.x >= PLAYER_X_LIMIT - DODGE_WIDTH;
            let go_left = (bullet.position.x >= ship.x && room_left) || pinned_right;
            input.move_left = go_left;
            input.move_right = !go_left;
            return input;
        }

        // Track the nearest enemy, with a slow wobble to avoid perfect loops
        let target = state
            .enemies
            .iter()
            .min_by(|a, b| {
                a.position
                    .distance_squared(ship)
                    .total_cmp(&b.position.distance_squared(ship))
            })
            .map(|e| e.position.x);
        if let Some(x) = target {
            let t = self.frame as f32 * 0.01;
            let wobble = t.sin() * 0.3 + (t * 0.7).sin() * 0.15;
            let dx = x + wobble - ship.x;
            if dx < -PLAYER_SPEED {
                input.move_left = true;
            } else if dx > PLAYER_SPEED {
                input.move_right = true;
            }
        }
        input
    }
}
