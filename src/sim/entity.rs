//! Entity identity and the capability set shared by everything in the world

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

use super::bullet::{BulletKind, BulletOwner};

/// Stable identity of a simulated entity.
///
/// Ids are never reused within a session, so a stale id simply stops
/// resolving once its entity is gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// What an entity is, as far as presentation is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    /// The controlled ship, with its chosen visual style
    Player { style: usize },
    /// A selectable ship shown during ship selection
    ShipOption { style: usize },
    Enemy,
    Boss { level: u32 },
    Barrier,
    Bullet { owner: BulletOwner, shape: BulletShape },
    /// Cutscene-only target the player flies into between levels
    Mothership,
}

/// Visual shape tag for bullets (mirrors `BulletKind` without its state)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletShape {
    Bolt,
    Beam,
    Orb,
}

impl From<&BulletKind> for BulletShape {
    fn from(kind: &BulletKind) -> Self {
        match kind {
            BulletKind::Linear => BulletShape::Bolt,
            BulletKind::Beam { .. } => BulletShape::Beam,
            BulletKind::Spiral { .. } => BulletShape::Orb,
        }
    }
}

impl EntityKind {
    /// Resting orientation (Euler XYZ, radians) the renderer should use
    pub fn base_rotation(&self) -> Vec3 {
        match self {
            EntityKind::Player { .. } | EntityKind::ShipOption { .. } => {
                Vec3::new(PI * 1.2, PI * 0.5, PI)
            }
            EntityKind::Enemy => Vec3::new(PI / 2.0, 0.0, 0.0),
            EntityKind::Boss { .. } => Vec3::new(PI * 0.1, 0.0, 0.0),
            EntityKind::Bullet { owner: BulletOwner::Enemy, shape: BulletShape::Bolt } => {
                Vec3::new(PI / 2.0, 0.0, 0.0)
            }
            _ => Vec3::ZERO,
        }
    }
}

/// Capability set every simulated entity exposes
pub trait Entity {
    fn id(&self) -> EntityId;
    fn kind(&self) -> EntityKind;
    fn position(&self) -> Vec3;
    fn hitbox_radius(&self) -> f32;

    /// Sphere-approximate containment test
    fn contains(&self, point: Vec3) -> bool {
        point.distance(self.position()) < self.hitbox_radius()
    }
}
