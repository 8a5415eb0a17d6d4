//! Per-tick bullet update and hit resolution.
//!
//! Two passes run every active tick: player bullets first, then enemy
//! bullets. Each bullet resolves at most one outcome per tick (target hit,
//! barrier hit, off-screen, or beam expiry) and leaves its collection at most
//! once.

use super::bullet::{Bullet, BulletKind};
use super::entity::Entity;
use super::phase;
use super::state::{DespawnCause, GameEvent, GameState};
use crate::consts::*;

/// Whether the rest of the tick should run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// Lives ran out; the tick stops here
    GameOver,
}

/// Advance every player bullet and resolve hits against enemies, then
/// barriers, then the top bound.
pub fn update_player_bullets(state: &mut GameState, speed: f32) {
    let bullets = std::mem::take(&mut state.player_bullets);
    let mut live = Vec::with_capacity(bullets.len());

    for mut bullet in bullets {
        bullet.advance(speed);
        match resolve_player_bullet(state, &bullet) {
            Some(cause) => state.despawn(bullet.id, cause),
            None => live.push(bullet),
        }
    }

    live.append(&mut state.player_bullets);
    state.player_bullets = live;
}

fn resolve_player_bullet(state: &mut GameState, bullet: &Bullet) -> Option<DespawnCause> {
    // First match in collection order, not closest
    if let Some(index) = state.enemies.iter().position(|e| e.contains(bullet.position)) {
        strike_enemy(state, index);
        return Some(DespawnCause::Impact);
    }
    if strike_barriers(state, bullet) {
        return Some(DespawnCause::Impact);
    }
    bullet.is_off_screen().then_some(DespawnCause::OffScreen)
}

fn strike_enemy(state: &mut GameState, index: usize) {
    let id = state.enemies[index].id;
    let is_boss = state.enemies[index].is_boss();
    if is_boss {
        state.emit(GameEvent::BossHit { id });
    }

    let enemy = &mut state.enemies[index];
    if enemy.take_damage(1) {
        let points = enemy.point_value;
        state.enemies.remove(index);
        state.despawn(id, DespawnCause::Destroyed);
        state.score += points;
        log::debug!("Enemy {:?} destroyed (+{}), score {}", id, points, state.score);
    } else if is_boss {
        state.score += BOSS_CHIP_POINTS;
    }
}

/// Test a bullet against barriers in order; the first accepted hit wins.
/// A barrier whose health runs out leaves the world.
fn strike_barriers(state: &mut GameState, bullet: &Bullet) -> bool {
    for index in 0..state.barriers.len() {
        let result = state.barriers[index].check_bullet_collision(bullet);
        if !result.hit {
            continue;
        }
        if result.destroyed {
            let barrier = state.barriers.remove(index);
            log::debug!("Barrier {:?} destroyed", barrier.id);
            state.despawn(barrier.id, DespawnCause::Destroyed);
        }
        return true;
    }
    false
}

/// Advance every enemy bullet and resolve hits against the player, then
/// barriers, then the bottom bound. Stops early when the player runs out of
/// lives, leaving the unprocessed bullets untouched.
pub fn update_enemy_bullets(state: &mut GameState, speed: f32) -> Flow {
    let mut pending = std::mem::take(&mut state.enemy_bullets).into_iter();
    let mut live = Vec::with_capacity(pending.len());
    let mut flow = Flow::Continue;

    while let Some(mut bullet) = pending.next() {
        bullet.advance(speed);
        let (removal, outcome) = match bullet.kind {
            BulletKind::Beam { .. } => resolve_beam(state, &bullet),
            BulletKind::Linear | BulletKind::Spiral { .. } => resolve_enemy_bullet(state, &bullet),
        };
        match removal {
            Some(cause) => state.despawn(bullet.id, cause),
            None => live.push(bullet),
        }
        if outcome == Flow::GameOver {
            flow = Flow::GameOver;
            live.extend(pending);
            break;
        }
    }

    live.append(&mut state.enemy_bullets);
    state.enemy_bullets = live;
    flow
}

fn resolve_enemy_bullet(state: &mut GameState, bullet: &Bullet) -> (Option<DespawnCause>, Flow) {
    if state.player.contains(bullet.position) {
        let flow = damage_player(state, bullet.damage());
        return (Some(DespawnCause::Impact), flow);
    }
    if strike_barriers(state, bullet) {
        return (Some(DespawnCause::Impact), Flow::Continue);
    }
    (bullet.is_off_screen().then_some(DespawnCause::OffScreen), Flow::Continue)
}

/// Beams hurt on every tick the player stands inside them (subject to the
/// invulnerability window) and vanish once their duration is spent.
fn resolve_beam(state: &mut GameState, bullet: &Bullet) -> (Option<DespawnCause>, Flow) {
    let mut flow = Flow::Continue;
    if bullet.beam_covers(state.player.position())
        && !state.player.is_invulnerable(state.clock_ms)
    {
        flow = damage_player(state, bullet.damage());
    }
    (bullet.is_expired().then_some(DespawnCause::Expired), flow)
}

fn damage_player(state: &mut GameState, damage: i32) -> Flow {
    if !state.player.hit(state.clock_ms) {
        return Flow::Continue;
    }
    state.lives -= damage;
    log::debug!("Player hit for {}, lives {}", damage, state.lives);
    if state.lives <= 0 {
        phase::game_over(state);
        return Flow::GameOver;
    }
    Flow::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::barrier::Barrier;
    use crate::sim::bullet::{BulletOwner, BulletSpawn};
    use crate::sim::enemy::Enemy;
    use crate::sim::state::GamePhase;
    use glam::Vec3;

    fn playing_state() -> GameState {
        let mut state = GameState::new(Settings::default());
        state.phase = GamePhase::Playing;
        state.drain_events();
        state
    }

    fn add_enemy(state: &mut GameState, x: f32, y: f32) -> super::super::entity::EntityId {
        let id = state.next_entity_id();
        state.add_enemy(Enemy::new(id, 0, 0, Vec3::new(x, y, 0.0)));
        id
    }

    #[test]
    fn test_player_bullet_kills_first_enemy_in_order() {
        let mut state = playing_state();
        let first = add_enemy(&mut state, 0.0, 5.0);
        let second = add_enemy(&mut state, 0.5, 5.0);
        state.spawn_bullet(BulletOwner::Player, BulletSpawn::linear(Vec3::new(0.4, 4.5, 0.0), 1));

        update_player_bullets(&mut state, 0.5);

        assert!(state.player_bullets.is_empty());
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].id, second);
        assert!(!state.enemies.iter().any(|e| e.id == first));
        assert_eq!(state.score, ENEMY_POINT_VALUE);
    }

    #[test]
    fn test_boss_chip_damage() {
        let mut state = playing_state();
        let id = state.next_entity_id();
        state.add_enemy(Enemy::boss(id, 1, 0.0));
        state.spawn_bullet(
            BulletOwner::Player,
            BulletSpawn::linear(Vec3::new(0.0, BOSS_SPAWN_Y - 1.0, 0.0), 1),
        );
        state.drain_events();

        update_player_bullets(&mut state, 0.5);

        assert_eq!(state.score, BOSS_CHIP_POINTS);
        assert_eq!(state.enemies[0].health, 9);
        assert!(state.drain_events().contains(&GameEvent::BossHit { id }));
    }

    #[test]
    fn test_player_bullet_off_screen() {
        let mut state = playing_state();
        state.spawn_bullet(
            BulletOwner::Player,
            BulletSpawn::linear(Vec3::new(30.0, PLAYER_BULLET_CEILING - 0.1, 0.0), 1),
        );
        state.drain_events();
        update_player_bullets(&mut state, 0.5);
        assert!(state.player_bullets.is_empty());
        assert!(matches!(
            state.drain_events().as_slice(),
            [GameEvent::Despawned {
                cause: DespawnCause::OffScreen,
                ..
            }]
        ));
    }

    #[test]
    fn test_enemy_bullet_hits_barrier() {
        let mut state = playing_state();
        let id = state.next_entity_id();
        state.add_barrier(Barrier::new(id, 0.0));
        state.spawn_bullet(BulletOwner::Enemy, BulletSpawn::linear(Vec3::new(0.0, -3.6, 0.0), 1));

        let flow = update_enemy_bullets(&mut state, 0.5);

        assert_eq!(flow, Flow::Continue);
        assert!(state.enemy_bullets.is_empty());
        assert_eq!(state.barriers[0].health, BARRIER_HEALTH - BARRIER_HIT_DAMAGE);
    }

    #[test]
    fn test_boss_bullet_takes_boss_level_lives() {
        let mut state = playing_state();
        let target = state.player.position + Vec3::new(PLAYER_HITBOX_OFFSET_X, 0.5, 0.0);
        state.spawn_bullet(BulletOwner::Enemy, BulletSpawn::linear(target, 2));

        update_enemy_bullets(&mut state, 0.5);

        assert_eq!(state.lives, 1);
        assert!(state.enemy_bullets.is_empty());
    }

    #[test]
    fn test_invulnerable_player_keeps_lives() {
        let mut state = playing_state();
        assert!(state.player.hit(state.clock_ms));
        let target = state.player.position + Vec3::new(PLAYER_HITBOX_OFFSET_X, 0.5, 0.0);
        state.spawn_bullet(BulletOwner::Enemy, BulletSpawn::linear(target, 1));

        update_enemy_bullets(&mut state, 0.5);

        assert_eq!(state.lives, 3);
        // The bullet is still consumed
        assert!(state.enemy_bullets.is_empty());
    }

    #[test]
    fn test_last_life_aborts_pass() {
        let mut state = playing_state();
        state.lives = 1;
        let target = state.player.position + Vec3::new(PLAYER_HITBOX_OFFSET_X, 0.5, 0.0);
        state.spawn_bullet(BulletOwner::Enemy, BulletSpawn::linear(target, 1));
        let untouched = Vec3::new(15.0, 5.0, 0.0);
        state.spawn_bullet(BulletOwner::Enemy, BulletSpawn::linear(untouched, 1));

        let flow = update_enemy_bullets(&mut state, 0.5);

        assert_eq!(flow, Flow::GameOver);
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.enemy_bullets.len(), 1);
        assert_eq!(state.enemy_bullets[0].position, untouched);
    }

    #[test]
    fn test_beam_hits_repeatedly_when_not_invulnerable() {
        let mut state = playing_state();
        state.lives = 10;
        state.spawn_bullet(
            BulletOwner::Enemy,
            BulletSpawn {
                position: Vec3::new(0.0, 0.0, 0.0),
                kind: BulletKind::Beam {
                    duration: 3,
                    damage: 2,
                },
                damage: 2,
            },
        );

        update_enemy_bullets(&mut state, 0.5);
        assert_eq!(state.lives, 8);

        // Still inside the window: no damage
        update_enemy_bullets(&mut state, 0.5);
        assert_eq!(state.lives, 8);

        // Window over: the sustained beam bites again, then expires
        state.clock_ms += state.player.invulnerability_ms;
        update_enemy_bullets(&mut state, 0.5);
        assert_eq!(state.lives, 6);
        assert!(state.enemy_bullets.is_empty());
    }
}
