//! Property tests for level formulas, damage thresholds and hit windows

use glam::Vec3;
use proptest::prelude::*;

use voxel_invaders::consts::*;
use voxel_invaders::sim::{
    Barrier, Bullet, BulletOwner, BulletSpawn, Enemy, EntityId, GamePhase, GameState, LevelPlan,
    Player, create_level, grid_dimensions, plan_level,
};
use voxel_invaders::Settings;

fn enemy_bullet_at(position: Vec3) -> Bullet {
    Bullet::new(EntityId(99), BulletOwner::Enemy, BulletSpawn::linear(position, 1))
}

proptest! {
    #[test]
    fn level_layout_matches_formulas(level in 1u32..=25) {
        let mut state = GameState::new(Settings::default());
        state.level = level;
        state.phase = GamePhase::Playing;
        create_level(&mut state);

        match plan_level(level) {
            LevelPlan::Victory => {
                prop_assert!(level > MAX_LEVEL);
                prop_assert_eq!(state.phase, GamePhase::Victory);
                prop_assert!(state.enemies.is_empty());
                prop_assert!(state.barriers.is_empty());
            }
            LevelPlan::Boss { boss_level, minions } => {
                prop_assert_eq!(level % 5, 0);
                prop_assert_eq!(boss_level, level / 5);
                let bosses = state.enemies.iter().filter(|e| e.is_boss()).count();
                prop_assert_eq!(bosses, 1);
                prop_assert_eq!(state.enemies.len() as u32, 1 + minions);
                prop_assert_eq!(minions, if boss_level >= 2 { boss_level * 2 } else { 0 });
                prop_assert_eq!(state.barriers.len(), 3);
            }
            LevelPlan::Standard { grid, .. } => {
                let rows = (4 + level / 3).min(6);
                let cols = (5 + level / 4).min(8);
                prop_assert_eq!(grid, grid_dimensions(level));
                prop_assert_eq!((grid.rows, grid.cols), (rows, cols));
                prop_assert_eq!(state.enemies.len() as u32, rows * cols);
                prop_assert!(state.enemies.iter().all(|e| e.position.y > DANGER_ZONE_Y));
                prop_assert_eq!(state.barriers.len(), 3);
            }
        }
    }

    #[test]
    fn boss_stats_scale_with_level(boss_level in 1u32..=4) {
        let boss = Enemy::boss(EntityId(1), boss_level, 0.0);
        prop_assert_eq!(boss.health, 10 * boss_level as i32);
        prop_assert_eq!(boss.point_value, 1000 * boss_level as u64);
    }

    #[test]
    fn take_damage_reports_exhaustion(
        health in 1i32..50,
        hits in prop::collection::vec(1i32..5, 1..30),
    ) {
        let mut enemy = Enemy::new(EntityId(1), 0, 0, Vec3::ZERO);
        enemy.health = health;
        let mut dealt = 0;
        for amount in hits {
            dealt += amount;
            prop_assert_eq!(enemy.take_damage(amount), dealt >= health);
        }
    }

    #[test]
    fn barrier_falls_on_tenth_hit(hits in 1usize..30) {
        let mut barrier = Barrier::new(EntityId(1), 0.0);
        let bullet = enemy_bullet_at(barrier.position);
        let mut accepted = 0;
        for _ in 0..hits {
            let result = barrier.check_bullet_collision(&bullet);
            if result.hit {
                accepted += 1;
            }
            prop_assert_eq!(result.destroyed, accepted >= 10);
        }
        prop_assert_eq!(accepted, hits.min(10));
        prop_assert_eq!(barrier.is_destroyed, hits >= 10);
    }

    #[test]
    fn hits_inside_window_are_ignored(start in 0.0f64..1e6, offset in 0.0f64..1999.0) {
        let mut player = Player::new(EntityId(1), 0, 300.0, 2000.0);
        prop_assert!(player.hit(start));
        prop_assert!(player.is_invulnerable(start + offset));
        prop_assert!(!player.hit(start + offset));
        prop_assert_eq!(player.stats.times_hit, 1);
        prop_assert!(player.hit(start + 2000.5));
    }
}
