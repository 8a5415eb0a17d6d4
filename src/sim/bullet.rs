//! Bullets and their motion laws

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId, EntityKind};
use crate::consts::*;

/// Who fired a bullet; decides which collection owns it and what it can hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletOwner {
    Player,
    Enemy,
}

impl BulletOwner {
    /// Vertical travel direction (+1 up for the player, -1 down for enemies)
    pub fn direction(&self) -> f32 {
        match self {
            BulletOwner::Player => 1.0,
            BulletOwner::Enemy => -1.0,
        }
    }
}

/// Motion law of a bullet
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BulletKind {
    /// Straight vertical travel at the global bullet speed
    Linear,
    /// Stationary tall hitbox that lives for `duration` ticks
    Beam { duration: i32, damage: i32 },
    /// Downward corkscrew around a horizontal anchor fixed on first update
    Spiral {
        angle: f32,
        angular_speed: f32,
        radius: f32,
        origin_x: Option<f32>,
    },
}

/// A bullet waiting for an id from the world
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BulletSpawn {
    pub position: Vec3,
    pub kind: BulletKind,
    /// Lives taken on a player hit (ignored for player bullets)
    pub damage: i32,
}

impl BulletSpawn {
    pub fn linear(position: Vec3, damage: i32) -> Self {
        Self {
            position,
            kind: BulletKind::Linear,
            damage,
        }
    }
}

/// A live bullet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: EntityId,
    pub owner: BulletOwner,
    pub position: Vec3,
    pub kind: BulletKind,
    damage: i32,
}

impl Bullet {
    pub fn new(id: EntityId, owner: BulletOwner, spawn: BulletSpawn) -> Self {
        Self {
            id,
            owner,
            position: spawn.position,
            kind: spawn.kind,
            damage: spawn.damage,
        }
    }

    /// Advance one tick. `speed` is the current global speed for linear bullets.
    pub fn advance(&mut self, speed: f32) {
        match &mut self.kind {
            BulletKind::Linear => {
                self.position.y += self.owner.direction() * speed;
                self.position.z = 0.0;
            }
            BulletKind::Beam { duration, .. } => {
                *duration -= 1;
            }
            BulletKind::Spiral {
                angle,
                angular_speed,
                radius,
                origin_x,
            } => {
                let origin = *origin_x.get_or_insert(self.position.x - angle.cos() * *radius);
                *angle += *angular_speed * 0.05;
                self.position.y -= *angular_speed;
                self.position.x = origin + angle.cos() * *radius;
            }
        }
    }

    /// Lives taken from the player when this bullet connects
    pub fn damage(&self) -> i32 {
        match self.kind {
            BulletKind::Beam { damage, .. } => damage,
            _ => self.damage,
        }
    }

    /// Left the vertical play bounds
    pub fn is_off_screen(&self) -> bool {
        match self.owner {
            BulletOwner::Player => self.position.y > PLAYER_BULLET_CEILING,
            BulletOwner::Enemy => self.position.y < ENEMY_BULLET_FLOOR,
        }
    }

    /// Beam ran out of ticks
    pub fn is_expired(&self) -> bool {
        matches!(self.kind, BulletKind::Beam { duration, .. } if duration <= 0)
    }

    /// Whether a beam's rectangular region covers `point`
    pub fn beam_covers(&self, point: Vec3) -> bool {
        matches!(self.kind, BulletKind::Beam { .. })
            && (point.x - self.position.x).abs() < BEAM_HALF_WIDTH
            && point.y < self.position.y + BEAM_HALF_HEIGHT
            && point.y > self.position.y - BEAM_HALF_HEIGHT
    }
}

impl Entity for Bullet {
    fn id(&self) -> EntityId {
        self.id
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Bullet {
            owner: self.owner,
            shape: (&self.kind).into(),
        }
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn hitbox_radius(&self) -> f32 {
        0.0
    }
}
