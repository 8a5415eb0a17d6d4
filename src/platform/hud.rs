//! HUD contract

use serde::{Deserialize, Serialize};

/// Everything the HUD shows, re-sent whenever any field changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub score: u64,
    /// Already clamped at zero
    pub lives: u32,
    pub level: u32,
    pub high_score: u64,
    pub highest_level: u32,
}

/// One-off notices for overlays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HudEvent {
    LevelComplete { level: u32, score: u64 },
    GameOver { score: u64, levels_completed: u32 },
    Victory { score: u64 },
}

pub trait Hud {
    fn update(&mut self, snapshot: &HudSnapshot);
    fn event(&mut self, event: &HudEvent);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullHud;

impl Hud for NullHud {
    fn update(&mut self, _snapshot: &HudSnapshot) {}
    fn event(&mut self, _event: &HudEvent) {}
}

/// Keeps every update and event it receives
#[derive(Debug, Default, Clone)]
pub struct RecordingHud {
    pub snapshots: Vec<HudSnapshot>,
    pub events: Vec<HudEvent>,
}

impl RecordingHud {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn latest(&self) -> Option<&HudSnapshot> {
        self.snapshots.last()
    }
}

impl Hud for RecordingHud {
    fn update(&mut self, snapshot: &HudSnapshot) {
        self.snapshots.push(*snapshot);
    }

    fn event(&mut self, event: &HudEvent) {
        self.events.push(*event);
    }
}
