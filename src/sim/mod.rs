//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only from `TickParams::dt_ms`
//! - Seeded RNG only
//! - Stable iteration order (collection order)
//! - No rendering or platform dependencies; presentation learns about
//!   changes through `GameEvent`s

pub mod barrier;
pub mod bullet;
pub mod collision;
pub mod enemy;
pub mod entity;
pub mod level;
pub mod phase;
pub mod player;
pub mod state;
pub mod tick;
pub mod transition;

pub use barrier::{Barrier, BarrierHit};
pub use bullet::{Bullet, BulletKind, BulletOwner, BulletSpawn};
pub use enemy::{BossData, Enemy, SpecialAttack};
pub use entity::{BulletShape, Entity, EntityId, EntityKind};
pub use level::{GridDimensions, LevelPlan, create_level, difficulty, grid_dimensions, plan_level};
pub use player::{DebugStats, Player, Steer};
pub use state::{DespawnCause, GameEvent, GamePhase, GameState, ShipOption};
pub use tick::{TickInput, TickParams, tick};
pub use transition::{Cutscene, CutscenePhase, CutsceneStep};
