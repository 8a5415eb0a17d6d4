//! The player's ship

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::bullet::BulletSpawn;
use super::entity::{Entity, EntityId, EntityKind};
use crate::consts::*;

/// Lateral movement request for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Steer {
    Left,
    Right,
}

/// Counters surfaced by the debug overlay
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DebugStats {
    pub shots_fired: u32,
    pub times_hit: u32,
    pub distance_moved: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: EntityId,
    /// Visual style picked during ship selection
    pub style: usize,
    pub position: Vec3,
    pub hitbox_radius: f32,
    /// Minimum time between shots (ms)
    pub shooting_cooldown_ms: f64,
    /// Length of the post-hit invulnerability window (ms)
    pub invulnerability_ms: f64,
    last_shot_ms: Option<f64>,
    /// Start of the current invulnerability window, if any
    hit_at_ms: Option<f64>,
    /// Debug invincibility, independent of the timed window
    pub god_mode: bool,
    pub stats: DebugStats,
}

impl Player {
    pub fn new(id: EntityId, style: usize, shooting_cooldown_ms: f64, invulnerability_ms: f64) -> Self {
        Self {
            id,
            style,
            position: Vec3::new(0.0, PLAYER_START_Y, 0.0),
            hitbox_radius: PLAYER_HITBOX_RADIUS,
            shooting_cooldown_ms,
            invulnerability_ms,
            last_shot_ms: None,
            hit_at_ms: None,
            god_mode: false,
            stats: DebugStats::default(),
        }
    }

    /// Move laterally, clamped to the play field
    pub fn steer(&mut self, steer: Steer) {
        let old = self.position;
        self.position.x = match steer {
            Steer::Left => (self.position.x - PLAYER_SPEED).max(-PLAYER_X_LIMIT),
            Steer::Right => (self.position.x + PLAYER_SPEED).min(PLAYER_X_LIMIT),
        };
        self.stats.distance_moved += self.position.distance(old);
    }

    /// Fire from the ship's nose, or `None` while the cooldown runs
    pub fn shoot(&mut self, now_ms: f64) -> Option<BulletSpawn> {
        if let Some(last) = self.last_shot_ms
            && now_ms - last < self.shooting_cooldown_ms
        {
            return None;
        }
        self.last_shot_ms = Some(now_ms);
        self.stats.shots_fired += 1;
        Some(BulletSpawn::linear(self.position, 1))
    }

    pub fn is_invulnerable(&self, now_ms: f64) -> bool {
        self.god_mode
            || self
                .hit_at_ms
                .is_some_and(|at| now_ms - at < self.invulnerability_ms)
    }

    /// Register a hit. Returns false (and changes nothing) while invulnerable;
    /// otherwise opens a fresh invulnerability window.
    pub fn hit(&mut self, now_ms: f64) -> bool {
        if self.is_invulnerable(now_ms) {
            return false;
        }
        self.stats.times_hit += 1;
        self.hit_at_ms = Some(now_ms);
        true
    }

    /// Blink phase while the invulnerability window is open
    pub fn is_visible(&self, now_ms: f64) -> bool {
        match self.hit_at_ms {
            Some(at) if now_ms - at < self.invulnerability_ms => {
                ((now_ms - at) / BLINK_INTERVAL_MS) as u64 % 2 == 1
            }
            _ => true,
        }
    }

    /// Back to the launch spot (after cutscenes and restarts)
    pub fn reset_position(&mut self) {
        self.position = Vec3::new(0.0, PLAYER_START_Y, 0.0);
    }
}

impl Entity for Player {
    fn id(&self) -> EntityId {
        self.id
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Player { style: self.style }
    }

    /// Collision position: the model origin shifted by the hitbox offset
    fn position(&self) -> Vec3 {
        self.position + Vec3::new(PLAYER_HITBOX_OFFSET_X, 0.0, 0.0)
    }

    fn hitbox_radius(&self) -> f32 {
        self.hitbox_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        Player::new(EntityId(1), 0, 300.0, 2000.0)
    }

    #[test]
    fn test_steer_clamps_to_bounds() {
        let mut p = player();
        p.position.x = PLAYER_X_LIMIT - 0.05;
        p.steer(Steer::Right);
        assert_eq!(p.position.x, PLAYER_X_LIMIT);
        assert!((p.stats.distance_moved - 0.05).abs() < 1e-4);

        p.position.x = -PLAYER_X_LIMIT;
        p.steer(Steer::Left);
        assert_eq!(p.position.x, -PLAYER_X_LIMIT);
    }

    #[test]
    fn test_shoot_cooldown() {
        let mut p = player();
        assert!(p.shoot(0.0).is_some());
        assert!(p.shoot(299.0).is_none());
        assert!(p.shoot(300.0).is_some());
        assert_eq!(p.stats.shots_fired, 2);
    }

    #[test]
    fn test_hit_opens_invulnerability_window() {
        let mut p = player();
        assert!(p.hit(1000.0));
        assert!(!p.hit(1500.0));
        assert!(!p.hit(2999.0));
        assert_eq!(p.stats.times_hit, 1);
        assert!(p.hit(3000.0));
        assert_eq!(p.stats.times_hit, 2);
    }

    #[test]
    fn test_god_mode_blocks_hits() {
        let mut p = player();
        p.god_mode = true;
        assert!(!p.hit(0.0));
        assert_eq!(p.stats.times_hit, 0);
    }

    #[test]
    fn test_blink_only_during_window() {
        let mut p = player();
        assert!(p.is_visible(0.0));
        p.hit(0.0);
        assert!(!p.is_visible(50.0));
        assert!(p.is_visible(150.0));
        assert!(p.is_visible(2500.0));
    }

    #[test]
    fn test_collision_position_offset() {
        let p = player();
        assert_eq!(
            Entity::position(&p),
            Vec3::new(PLAYER_HITBOX_OFFSET_X, PLAYER_START_Y, 0.0)
        );
    }
}
