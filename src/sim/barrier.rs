//! Destructible barriers with pillar and top-span collision zones

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::bullet::{Bullet, BulletOwner};
use super::entity::{Entity, EntityId, EntityKind};
use crate::consts::*;

/// Outcome of testing a bullet against a barrier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BarrierHit {
    pub hit: bool,
    pub destroyed: bool,
}

/// A barrier entity.
///
/// The model sits lower than its nominal row; the collision zones are fixed
/// offsets from the nominal position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Barrier {
    pub id: EntityId,
    pub position: Vec3,
    pub health: i32,
    pub is_destroyed: bool,
    pub left_pillar: Vec3,
    pub right_pillar: Vec3,
    pub top: Vec3,
}

impl Barrier {
    pub fn new(id: EntityId, x: f32) -> Self {
        let position = Vec3::new(x, BARRIER_Y, 0.0);
        Self {
            id,
            position,
            health: BARRIER_HEALTH,
            is_destroyed: false,
            left_pillar: position + LEFT_PILLAR_OFFSET,
            right_pillar: position + RIGHT_PILLAR_OFFSET,
            top: position + TOP_SPAN_OFFSET,
        }
    }

    /// Test a bullet against this barrier, applying damage on a hit.
    ///
    /// Player bullets are checked against the pillars, then the top span once
    /// they are at or above the barrier's lower edge. Everything else gets a
    /// single coarse check against the barrier center.
    pub fn check_bullet_collision(&mut self, bullet: &Bullet) -> BarrierHit {
        if self.is_destroyed {
            return BarrierHit {
                hit: false,
                destroyed: true,
            };
        }

        let p = bullet.position;
        let hit = match bullet.owner {
            BulletOwner::Player => {
                p.distance(self.left_pillar) < PILLAR_RADIUS
                    || p.distance(self.right_pillar) < PILLAR_RADIUS
                    || (p.y >= self.position.y && p.distance(self.top) < TOP_SPAN_RADIUS)
            }
            BulletOwner::Enemy => p.distance(self.position) < BARRIER_CENTER_RADIUS,
        };

        if !hit {
            return BarrierHit::default();
        }

        self.health -= BARRIER_HIT_DAMAGE;
        if self.health <= 0 {
            self.is_destroyed = true;
        }
        BarrierHit {
            hit: true,
            destroyed: self.is_destroyed,
        }
    }
}

impl Entity for Barrier {
    fn id(&self) -> EntityId {
        self.id
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Barrier
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn hitbox_radius(&self) -> f32 {
        BARRIER_CENTER_RADIUS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::bullet::BulletSpawn;

    fn bullet(owner: BulletOwner, pos: Vec3) -> Bullet {
        Bullet::new(EntityId(99), owner, BulletSpawn::linear(pos, 1))
    }

    #[test]
    fn test_player_bullet_hits_pillars_then_top() {
        let mut barrier = Barrier::new(EntityId(1), 0.0);

        let left = bullet(BulletOwner::Player, Vec3::new(-1.6, -3.2, 0.0));
        assert!(barrier.check_bullet_collision(&left).hit);

        let right = bullet(BulletOwner::Player, Vec3::new(1.4, -3.4, 0.0));
        assert!(barrier.check_bullet_collision(&right).hit);

        let top = bullet(BulletOwner::Player, Vec3::new(0.3, -2.4, 0.0));
        assert!(barrier.check_bullet_collision(&top).hit);

        // Between the pillars and under the top span
        let gap = bullet(BulletOwner::Player, Vec3::new(0.0, -3.8, 0.0));
        assert!(!barrier.check_bullet_collision(&gap).hit);

        assert_eq!(barrier.health, BARRIER_HEALTH - 3 * BARRIER_HIT_DAMAGE);
    }

    #[test]
    fn test_zones_follow_barrier_position() {
        for x in [-BARRIER_SPACING, 0.0, BARRIER_SPACING] {
            let mut barrier = Barrier::new(EntityId(1), x);
            let origin = barrier.position;
            assert_eq!(barrier.left_pillar - origin, LEFT_PILLAR_OFFSET);
            assert_eq!(barrier.right_pillar - origin, RIGHT_PILLAR_OFFSET);
            assert_eq!(barrier.top - origin, TOP_SPAN_OFFSET);

            for offset in [LEFT_PILLAR_OFFSET, RIGHT_PILLAR_OFFSET, TOP_SPAN_OFFSET] {
                let shot = bullet(BulletOwner::Player, origin + offset);
                assert!(barrier.check_bullet_collision(&shot).hit);
            }
        }
    }

    #[test]
    fn test_enemy_bullet_uses_center() {
        let mut barrier = Barrier::new(EntityId(1), 12.0);

        let miss = bullet(BulletOwner::Enemy, Vec3::new(12.0, -2.5, 0.0));
        assert!(!barrier.check_bullet_collision(&miss).hit);

        let hit = bullet(BulletOwner::Enemy, Vec3::new(12.5, -4.2, 0.0));
        assert!(barrier.check_bullet_collision(&hit).hit);
    }

    #[test]
    fn test_ten_hits_destroy() {
        let mut barrier = Barrier::new(EntityId(1), 0.0);
        let shot = bullet(BulletOwner::Enemy, Vec3::new(0.0, -4.0, 0.0));

        for _ in 0..9 {
            let result = barrier.check_bullet_collision(&shot);
            assert!(result.hit);
            assert!(!result.destroyed);
        }
        let last = barrier.check_bullet_collision(&shot);
        assert_eq!(
            last,
            BarrierHit {
                hit: true,
                destroyed: true
            }
        );

        // Gone: no further hits
        let after = barrier.check_bullet_collision(&shot);
        assert_eq!(
            after,
            BarrierHit {
                hit: false,
                destroyed: true
            }
        );
        assert_eq!(barrier.health, 0);
    }
}
