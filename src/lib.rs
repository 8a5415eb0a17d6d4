//! Voxel Invaders - wave-based space shooter simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, levels, game phases)
//! - `platform`: Renderer/HUD/input contracts the simulation is driven through
//! - `persistence`: Named scalar storage for records
//! - `highscores`: High score and highest level bookkeeping
//! - `settings`: Data-driven gameplay configuration
//! - `session`: Game object wiring the simulation to its collaborators

pub mod autopilot;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;

pub use highscores::Records;
pub use session::Session;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    use glam::Vec3;

    /// Last playable level; clearing it means victory
    pub const MAX_LEVEL: u32 = 20;
    /// Every Nth level is a boss level
    pub const BOSS_LEVEL_INTERVAL: u32 = 5;

    /// Nominal frame length (ms) for headless drivers and tests
    pub const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Vertical play bounds
    pub const PLAYER_BULLET_CEILING: f32 = 20.0;
    pub const ENEMY_BULLET_FLOOR: f32 = -10.0;

    /// Player ship
    pub const PLAYER_START_Y: f32 = -8.0;
    pub const PLAYER_X_LIMIT: f32 = 20.0;
    pub const PLAYER_SPEED: f32 = 0.15;
    pub const PLAYER_HITBOX_RADIUS: f32 = 1.0;
    /// Collision center sits slightly left of the model origin
    pub const PLAYER_HITBOX_OFFSET_X: f32 = -0.2;
    /// Blink half-period while invulnerable (ms)
    pub const BLINK_INTERVAL_MS: f64 = 100.0;

    /// Standard enemies
    pub const ENEMY_HITBOX_RADIUS: f32 = 1.8;
    pub const ENEMY_POINT_VALUE: u64 = 120;
    pub const ENEMY_BULLET_DROP: f32 = 1.3;
    /// Enemies below this line end the run (just above the barriers)
    pub const DANGER_ZONE_Y: f32 = 0.0;
    /// Lower, redundant loss line
    pub const FAILSAFE_Y: f32 = -5.0;

    /// Bosses
    pub const BOSS_SPAWN_Y: f32 = 15.0;
    pub const BOSS_BULLET_DROP: f32 = 2.0;
    pub const BOSS_SHOT_SPREAD: f32 = 1.0;
    pub const BOSS_CHIP_POINTS: u64 = 10;
    pub const BOSS_SPECIAL_COOLDOWN_MS: f64 = 5000.0;
    /// Ticks the special attack charges after the cooldown elapsed
    pub const BOSS_SPECIAL_CHARGE_TICKS: u32 = 300;
    pub const SPIRAL_BULLET_COUNT: usize = 12;
    pub const SPIRAL_RADIUS: f32 = 3.0;
    pub const SPIRAL_ANGULAR_SPEED: f32 = 0.3;
    pub const BEAM_DURATION_TICKS: i32 = 60;
    pub const BEAM_HALF_WIDTH: f32 = 1.0;
    pub const BEAM_HALF_HEIGHT: f32 = 10.0;
    /// Beams drop from the boss's column to the ground, spanning the player row
    pub const BEAM_CENTER_Y: f32 = PLAYER_START_Y + BEAM_HALF_HEIGHT / 2.0;

    /// Barriers
    pub const BARRIER_HEALTH: i32 = 100;
    pub const BARRIER_HIT_DAMAGE: i32 = 10;
    pub const BARRIER_Y: f32 = -4.0;
    pub const BARRIER_SPACING: f32 = 12.0;
    pub const PILLAR_RADIUS: f32 = 0.7;
    pub const TOP_SPAN_RADIUS: f32 = 1.0;
    pub const BARRIER_CENTER_RADIUS: f32 = 1.0;
    /// Collision zones relative to the barrier's nominal position
    pub const LEFT_PILLAR_OFFSET: Vec3 = Vec3::new(-1.6, 0.6, 0.0);
    pub const RIGHT_PILLAR_OFFSET: Vec3 = Vec3::new(1.3, 0.6, 0.0);
    pub const TOP_SPAN_OFFSET: Vec3 = Vec3::new(0.0, 1.5, 0.0);

    /// Ship selection line-up
    pub const SHIP_OPTION_SPACING: f32 = 8.0;
}

/// Centered line-up offset for item `i` of `count` with the given spacing
#[inline]
pub fn centered_offset(i: usize, count: usize, spacing: f32) -> f32 {
    (i as f32 - (count as f32 - 1.0) / 2.0) * spacing
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_offset_is_symmetric() {
        assert_eq!(centered_offset(0, 3, 12.0), -12.0);
        assert_eq!(centered_offset(1, 3, 12.0), 0.0);
        assert_eq!(centered_offset(2, 3, 12.0), 12.0);
        assert_eq!(centered_offset(0, 1, 6.0), 0.0);
    }
}
