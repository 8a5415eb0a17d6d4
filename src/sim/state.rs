//! Game state and core simulation types
//!
//! Everything the simulation reads or mutates during a tick lives here.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::barrier::Barrier;
use super::bullet::{Bullet, BulletOwner, BulletSpawn};
use super::enemy::{Enemy, SpecialAttack};
use super::entity::{Entity, EntityId, EntityKind};
use super::player::Player;
use super::transition::Cutscene;
use crate::settings::Settings;

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title menu, waiting for start
    Menu,
    /// Picking a ship from the line-up
    ShipSelection,
    /// Active gameplay
    Playing,
    /// Frozen until resumed
    Paused,
    /// Scripted flight into the mothership after a cleared level
    LevelTransition,
    /// Level cleared, waiting for the next-level action
    LevelComplete,
    /// Run ended
    GameOver,
    /// All levels cleared
    Victory,
}

/// Why an entity left the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DespawnCause {
    /// Health ran out
    Destroyed,
    /// Bullet struck something
    Impact,
    /// Bullet left the play bounds
    OffScreen,
    /// Beam ran out of ticks
    Expired,
    /// Level teardown, reset or replacement
    Cleared,
}

/// Things that happened during a tick, for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Spawned {
        id: EntityId,
        kind: EntityKind,
        position: Vec3,
    },
    Despawned {
        id: EntityId,
        cause: DespawnCause,
    },
    /// A boss took a hit it survived
    BossHit { id: EntityId },
    SpecialAttack { boss: EntityId, attack: SpecialAttack },
    PhaseChanged { from: GamePhase, to: GamePhase },
    LevelStarted { level: u32 },
    LevelComplete { level: u32, score: u64 },
    GameOver { score: u64, levels_completed: u32 },
    Victory { score: u64 },
}

/// One ship in the selection line-up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipOption {
    pub id: EntityId,
    pub style: usize,
    pub position: Vec3,
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub settings: Settings,
    /// Seeded RNG (enemy fire gate, interval jitter)
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Current level, starting at 1
    pub level: u32,
    pub score: u64,
    /// May dip below zero on a heavy hit; clamp before display
    pub lives: i32,
    /// Simulation clock (ms), advanced only by active ticks
    pub clock_ms: f64,
    pub player: Player,
    pub ship_options: Vec<ShipOption>,
    pub selected_ship: Option<usize>,
    pub enemies: Vec<Enemy>,
    pub barriers: Vec<Barrier>,
    pub player_bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<Bullet>,
    pub cutscene: Option<Cutscene>,
    pub mothership: Option<EntityId>,
    #[serde(skip)]
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Fresh session state sitting at the menu
    pub fn new(settings: Settings) -> Self {
        let player = Player::new(
            EntityId(1),
            0,
            settings.player_cooldown_ms,
            settings.invulnerability_ms,
        );
        let mut state = Self {
            rng: Pcg32::seed_from_u64(settings.seed),
            phase: GamePhase::Menu,
            level: 1,
            score: 0,
            lives: settings.starting_lives,
            clock_ms: 0.0,
            player,
            ship_options: Vec::new(),
            selected_ship: None,
            enemies: Vec::new(),
            barriers: Vec::new(),
            player_bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            cutscene: None,
            mothership: None,
            events: Vec::new(),
            next_id: 2,
            settings,
        };
        state.emit(GameEvent::Spawned {
            id: state.player.id,
            kind: state.player.kind(),
            position: state.player.position,
        });
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take everything emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn set_phase(&mut self, to: GamePhase) {
        let from = self.phase;
        if from == to {
            return;
        }
        log::info!("Phase {:?} -> {:?}", from, to);
        self.phase = to;
        self.emit(GameEvent::PhaseChanged { from, to });
    }

    /// Simulation time in seconds, as fed to enemy motion
    pub fn time_secs(&self) -> f32 {
        (self.clock_ms * 0.001) as f32
    }

    fn spawned(&mut self, id: EntityId, kind: EntityKind, position: Vec3) {
        self.emit(GameEvent::Spawned { id, kind, position });
    }

    pub fn despawn(&mut self, id: EntityId, cause: DespawnCause) {
        self.emit(GameEvent::Despawned { id, cause });
    }

    pub fn add_enemy(&mut self, enemy: Enemy) {
        self.spawned(enemy.id, enemy.kind(), enemy.position);
        self.enemies.push(enemy);
    }

    pub fn add_barrier(&mut self, barrier: Barrier) {
        self.spawned(barrier.id, barrier.kind(), barrier.position);
        self.barriers.push(barrier);
    }

    /// Put a bullet into the collection its owner dictates
    pub fn spawn_bullet(&mut self, owner: BulletOwner, spawn: BulletSpawn) -> EntityId {
        let id = self.next_entity_id();
        let bullet = Bullet::new(id, owner, spawn);
        self.spawned(id, bullet.kind(), bullet.position);
        match owner {
            BulletOwner::Player => self.player_bullets.push(bullet),
            BulletOwner::Enemy => self.enemy_bullets.push(bullet),
        }
        id
    }

    /// Remove an enemy by id. Stale ids are a no-op.
    pub fn remove_enemy(&mut self, id: EntityId, cause: DespawnCause) -> Option<Enemy> {
        let index = self.enemies.iter().position(|e| e.id == id)?;
        let enemy = self.enemies.remove(index);
        self.despawn(id, cause);
        Some(enemy)
    }

    /// Drop every bullet in both collections
    pub fn clear_bullets(&mut self) {
        let ids: Vec<EntityId> = self
            .player_bullets
            .drain(..)
            .chain(self.enemy_bullets.drain(..))
            .map(|b| b.id)
            .collect();
        for id in ids {
            self.despawn(id, DespawnCause::Cleared);
        }
    }

    /// Drop every barrier
    pub fn clear_barriers(&mut self) {
        let ids: Vec<EntityId> = self.barriers.drain(..).map(|b| b.id).collect();
        for id in ids {
            self.despawn(id, DespawnCause::Cleared);
        }
    }

    /// Drop every enemy
    pub fn clear_enemies(&mut self) {
        let ids: Vec<EntityId> = self.enemies.drain(..).map(|e| e.id).collect();
        for id in ids {
            self.despawn(id, DespawnCause::Cleared);
        }
    }

    /// Level teardown: enemies, barriers and bullets
    pub fn clear_world(&mut self) {
        self.clear_enemies();
        self.clear_barriers();
        self.clear_bullets();
    }

    /// Swap in a new player ship, discarding the old one
    pub fn replace_player(&mut self, style: usize) {
        let old = self.player.id;
        self.despawn(old, DespawnCause::Cleared);
        let id = self.next_entity_id();
        self.player = Player::new(
            id,
            style,
            self.settings.player_cooldown_ms,
            self.settings.invulnerability_ms,
        );
        self.spawned(id, self.player.kind(), self.player.position);
    }

    pub fn add_ship_option(&mut self, style: usize, position: Vec3) {
        let id = self.next_entity_id();
        self.spawned(id, EntityKind::ShipOption { style }, position);
        self.ship_options.push(ShipOption {
            id,
            style,
            position,
        });
    }

    pub fn clear_ship_options(&mut self) {
        let ids: Vec<EntityId> = self.ship_options.drain(..).map(|s| s.id).collect();
        for id in ids {
            self.despawn(id, DespawnCause::Cleared);
        }
        self.selected_ship = None;
    }

    pub fn spawn_mothership(&mut self, position: Vec3) {
        let id = self.next_entity_id();
        self.spawned(id, EntityKind::Mothership, position);
        self.mothership = Some(id);
    }

    pub fn remove_mothership(&mut self) {
        if let Some(id) = self.mothership.take() {
            self.despawn(id, DespawnCause::Cleared);
        }
    }

    /// Lives as shown to the player
    pub fn displayed_lives(&self) -> u32 {
        self.lives.max(0) as u32
    }

    /// Every live entity with its kind and model position, in stable order
    pub fn render_list(&self) -> Vec<(EntityId, EntityKind, Vec3)> {
        let mut list = Vec::with_capacity(
            1 + self.ship_options.len()
                + self.enemies.len()
                + self.barriers.len()
                + self.player_bullets.len()
                + self.enemy_bullets.len(),
        );
        list.push((self.player.id, self.player.kind(), self.player.position));
        list.extend(
            self.ship_options
                .iter()
                .map(|s| (s.id, EntityKind::ShipOption { style: s.style }, s.position)),
        );
        list.extend(self.enemies.iter().map(|e| (e.id, e.kind(), e.position)));
        list.extend(self.barriers.iter().map(|b| (b.id, b.kind(), b.position)));
        list.extend(
            self.player_bullets
                .iter()
                .chain(self.enemy_bullets.iter())
                .map(|b| (b.id, b.kind(), b.position)),
        );
        if let Some(id) = self.mothership {
            list.push((id, EntityKind::Mothership, super::transition::MOTHERSHIP_POSITION));
        }
        list
    }
}
