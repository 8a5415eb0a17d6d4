//! Enemies: standard grid units and bosses.
//!
//! A boss is an `Enemy` carrying `BossData`; behavior is selected by whether
//! that payload is present.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use super::bullet::{BulletKind, BulletSpawn};
use super::entity::{Entity, EntityId, EntityKind};
use crate::centered_offset;
use crate::consts::*;

/// Which special attack a boss unleashes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpecialAttack {
    /// Ring of corkscrewing bullets (boss level 4)
    Spiral,
    /// Sustained vertical beam (other boss levels)
    Beam,
}

/// Boss-only state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossData {
    /// 1..=4, one per boss level
    pub level: u32,
    /// Bullets per volley
    pub multi_shot: u32,
    pub special_attack_cooldown_ms: f64,
    /// Ticks charged since the cooldown elapsed
    pub special_attack_timer: u32,
    pub last_special_ms: Option<f64>,
}

impl BossData {
    pub fn special_attack(&self) -> SpecialAttack {
        if self.level >= 4 {
            SpecialAttack::Spiral
        } else {
            SpecialAttack::Beam
        }
    }
}

/// Per-boss-level tuning: (amplitude, frequency, shooting interval ms, multi-shot)
fn boss_profile(level: u32) -> (f32, f32, f64, u32) {
    match level {
        1 => (0.1, 0.4, 2000.0, 1),
        2 => (0.15, 0.7, 1500.0, 2),
        3 => (0.2, 1.0, 1000.0, 3),
        4 => (0.25, 1.2, 800.0, 4),
        _ => (0.1, 0.5, 2000.0, 1),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EntityId,
    /// Grid slot (placement only)
    pub row: u32,
    pub col: u32,
    pub position: Vec3,
    pub hitbox_radius: f32,
    pub health: i32,
    pub point_value: u64,
    /// Oscillation parameters
    pub amplitude: f32,
    pub frequency: f32,
    /// Current wait between shots (ms), re-rolled after every shot
    pub shooting_interval_ms: f64,
    /// Level-derived center for the re-roll
    pub base_interval_ms: f64,
    pub last_shot_ms: Option<f64>,
    pub boss: Option<BossData>,
}

impl Enemy {
    /// A standard one-hit enemy at a grid slot
    pub fn new(id: EntityId, row: u32, col: u32, position: Vec3) -> Self {
        Self {
            id,
            row,
            col,
            position,
            hitbox_radius: ENEMY_HITBOX_RADIUS,
            health: 1,
            point_value: ENEMY_POINT_VALUE,
            amplitude: 0.025,
            frequency: 1.0,
            shooting_interval_ms: 5000.0,
            base_interval_ms: 5000.0,
            last_shot_ms: None,
            boss: None,
        }
    }

    /// A boss for boss level 1..=4, spawned top-center
    pub fn boss(id: EntityId, level: u32, now_ms: f64) -> Self {
        let (amplitude, frequency, interval, multi_shot) = boss_profile(level);
        Self {
            id,
            row: 0,
            col: 0,
            position: Vec3::new(0.0, BOSS_SPAWN_Y, 0.0),
            hitbox_radius: 3.0 + level as f32 * 0.5,
            health: 10 * level as i32,
            point_value: 1000 * level as u64,
            amplitude,
            frequency,
            shooting_interval_ms: interval,
            base_interval_ms: interval,
            last_shot_ms: Some(now_ms),
            boss: Some(BossData {
                level,
                multi_shot,
                special_attack_cooldown_ms: BOSS_SPECIAL_COOLDOWN_MS,
                special_attack_timer: 0,
                last_special_ms: None,
            }),
        }
    }

    pub fn is_boss(&self) -> bool {
        self.boss.is_some()
    }

    /// Damage lives taken by one of this enemy's regular bullets
    pub fn bullet_damage(&self) -> i32 {
        self.boss.as_ref().map_or(1, |b| b.level as i32)
    }

    /// Per-tick motion at simulation time `time_s`.
    ///
    /// Standard enemies add the sine term to their position every tick, so
    /// the formation drifts rather than oscillating about a fixed center.
    /// Bosses sway about x = 0 and, from level 2, float vertically.
    pub fn move_step(&mut self, time_s: f32) {
        let swing = (time_s * self.frequency).sin();
        match &self.boss {
            None => self.position.x += swing * self.amplitude,
            Some(boss) => {
                self.position.x = swing * 10.0 * self.amplitude;
                if boss.level >= 2 {
                    self.position.y =
                        BOSS_SPAWN_Y + (time_s * self.frequency * 0.5).sin() * 2.0;
                }
            }
        }
    }

    /// Fire a volley, or `None` while the shooting interval runs.
    ///
    /// Standard enemies fire one bullet and re-roll their interval; bosses
    /// fire `multi_shot` bullets spread horizontally at a fixed interval.
    pub fn shoot<R: Rng>(&mut self, now_ms: f64, rng: &mut R) -> Option<Vec<BulletSpawn>> {
        if let Some(last) = self.last_shot_ms
            && now_ms - last < self.shooting_interval_ms
        {
            return None;
        }
        self.last_shot_ms = Some(now_ms);

        match &self.boss {
            None => {
                self.shooting_interval_ms = self.base_interval_ms * rng.random_range(0.6..1.4);
                let origin = self.position - Vec3::new(0.0, ENEMY_BULLET_DROP, 0.0);
                Some(vec![BulletSpawn::linear(origin, 1)])
            }
            Some(boss) => {
                let count = boss.multi_shot.max(1) as usize;
                let damage = boss.level as i32;
                let volley = (0..count)
                    .map(|i| {
                        let origin = self.position
                            + Vec3::new(
                                centered_offset(i, count, BOSS_SHOT_SPREAD),
                                -BOSS_BULLET_DROP,
                                0.0,
                            );
                        BulletSpawn::linear(origin, damage)
                    })
                    .collect();
                Some(volley)
            }
        }
    }

    /// Charge the boss special attack; returns the attack's bullets the tick
    /// it fires. Standard enemies never have one.
    pub fn update_special(&mut self, now_ms: f64) -> Option<(SpecialAttack, Vec<BulletSpawn>)> {
        let position = self.position;
        let boss = self.boss.as_mut()?;

        let ready = boss
            .last_special_ms
            .is_none_or(|last| now_ms - last > boss.special_attack_cooldown_ms);
        if !ready {
            return None;
        }

        boss.special_attack_timer += 1;
        if boss.special_attack_timer < BOSS_SPECIAL_CHARGE_TICKS {
            return None;
        }
        boss.special_attack_timer = 0;
        boss.last_special_ms = Some(now_ms);

        let attack = boss.special_attack();
        let bullets = match attack {
            SpecialAttack::Spiral => spiral_ring(position),
            SpecialAttack::Beam => vec![BulletSpawn {
                position: Vec3::new(position.x, BEAM_CENTER_Y, 0.0),
                kind: BulletKind::Beam {
                    duration: BEAM_DURATION_TICKS,
                    damage: boss.level as i32,
                },
                damage: boss.level as i32,
            }],
        };
        Some((attack, bullets))
    }

    /// Apply damage; true once health is exhausted
    pub fn take_damage(&mut self, amount: i32) -> bool {
        self.health -= amount;
        self.health <= 0
    }
}

/// Twelve bullets on a ring below the boss, each starting its own corkscrew
fn spiral_ring(center: Vec3) -> Vec<BulletSpawn> {
    (0..SPIRAL_BULLET_COUNT)
        .map(|i| {
            let angle = i as f32 / SPIRAL_BULLET_COUNT as f32 * TAU;
            BulletSpawn {
                position: center
                    + Vec3::new(
                        angle.cos() * SPIRAL_RADIUS,
                        angle.sin() * SPIRAL_RADIUS - BOSS_BULLET_DROP,
                        0.0,
                    ),
                kind: BulletKind::Spiral {
                    angle,
                    angular_speed: SPIRAL_ANGULAR_SPEED,
                    radius: SPIRAL_RADIUS,
                    origin_x: None,
                },
                damage: 1,
            }
        })
        .collect()
}

impl Entity for Enemy {
    fn id(&self) -> EntityId {
        self.id
    }

    fn kind(&self) -> EntityKind {
        match &self.boss {
            Some(boss) => EntityKind::Boss { level: boss.level },
            None => EntityKind::Enemy,
        }
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn hitbox_radius(&self) -> f32 {
        self.hitbox_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::bullet::{Bullet, BulletOwner};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_boss_scaling() {
        for level in 1..=4 {
            let boss = Enemy::boss(EntityId(1), level, 0.0);
            assert_eq!(boss.health, 10 * level as i32);
            assert_eq!(boss.point_value, 1000 * level as u64);
            assert_eq!(boss.bullet_damage(), level as i32);
            assert!(boss.hitbox_radius > ENEMY_HITBOX_RADIUS);
        }
    }

    #[test]
    fn test_take_damage_threshold() {
        let mut boss = Enemy::boss(EntityId(1), 2, 0.0);
        for _ in 0..19 {
            assert!(!boss.take_damage(1));
        }
        assert!(boss.take_damage(1));
    }

    #[test]
    fn test_standard_enemy_drifts() {
        let mut enemy = Enemy::new(EntityId(1), 0, 0, Vec3::new(0.0, 10.0, 0.0));
        enemy.amplitude = 0.05;
        // sin stays positive over these times, so every step pushes right
        for step in 1..=10 {
            enemy.move_step(step as f32 * 0.1);
        }
        assert!(enemy.position.x > 0.2);
        assert_eq!(enemy.position.y, 10.0);
    }

    #[test]
    fn test_boss_motion_is_absolute() {
        let mut boss = Enemy::boss(EntityId(1), 1, 0.0);
        boss.move_step(1.0);
        let first = boss.position.x;
        boss.move_step(1.0);
        assert_eq!(boss.position.x, first);
        assert_eq!(boss.position.y, BOSS_SPAWN_Y);

        let mut floating = Enemy::boss(EntityId(2), 3, 0.0);
        floating.move_step(2.0);
        assert_ne!(floating.position.y, BOSS_SPAWN_Y);
    }

    #[test]
    fn test_shoot_rate_limited() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut enemy = Enemy::new(EntityId(1), 0, 0, Vec3::new(0.0, 10.0, 0.0));
        enemy.base_interval_ms = 1000.0;
        enemy.shooting_interval_ms = 1000.0;

        let volley = enemy.shoot(0.0, &mut rng).expect("first shot is free");
        assert_eq!(volley.len(), 1);
        assert_eq!(volley[0].position.y, 10.0 - ENEMY_BULLET_DROP);
        assert!(enemy.shoot(100.0, &mut rng).is_none());
        assert!((600.0..1400.0).contains(&enemy.shooting_interval_ms));
        assert!(enemy.shoot(1400.0, &mut rng).is_some());
    }

    #[test]
    fn test_boss_multi_shot_spread() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut boss = Enemy::boss(EntityId(1), 3, 0.0);
        assert!(boss.shoot(500.0, &mut rng).is_none());

        let volley = boss.shoot(1000.0, &mut rng).expect("interval elapsed");
        let xs: Vec<f32> = volley.iter().map(|b| b.position.x).collect();
        assert_eq!(xs, vec![-1.0, 0.0, 1.0]);
        assert!(volley.iter().all(|b| b.damage == 3));
    }

    #[test]
    fn test_special_attack_kinds() {
        let mut beam_boss = Enemy::boss(EntityId(1), 2, 0.0);
        let mut fired = None;
        for tick in 0..BOSS_SPECIAL_CHARGE_TICKS {
            fired = beam_boss.update_special(tick as f64 * 16.0);
        }
        let (attack, bullets) = fired.expect("charged");
        assert_eq!(attack, SpecialAttack::Beam);
        assert_eq!(bullets.len(), 1);

        // The beam reaches the player row straight under the boss, at any height it floats to
        let beam = Bullet::new(EntityId(9), BulletOwner::Enemy, bullets[0]);
        let below = Vec3::new(beam_boss.position.x, PLAYER_START_Y, 0.0);
        assert!(beam.beam_covers(below));
        assert!(!beam.beam_covers(below + Vec3::new(2.0, 0.0, 0.0)));

        // Cooldown now gates the timer
        assert!(beam_boss.update_special(6000.0).is_none());
        assert_eq!(beam_boss.boss.as_ref().map(|b| b.special_attack_timer), Some(0));

        let mut spiral_boss = Enemy::boss(EntityId(2), 4, 0.0);
        let mut fired = None;
        for _ in 0..BOSS_SPECIAL_CHARGE_TICKS {
            fired = spiral_boss.update_special(0.0);
        }
        let (attack, bullets) = fired.expect("charged");
        assert_eq!(attack, SpecialAttack::Spiral);
        assert_eq!(bullets.len(), SPIRAL_BULLET_COUNT);
    }

    #[test]
    fn test_standard_enemy_has_no_special() {
        let mut enemy = Enemy::new(EntityId(1), 0, 0, Vec3::ZERO);
        assert!(enemy.update_special(0.0).is_none());
    }
}
