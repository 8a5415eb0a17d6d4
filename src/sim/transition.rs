//! Level-transition cutscene: the ship circles the field, then flies into
//! the mothership. Gameplay is suspended for its whole duration.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Center and radii of the approach circle
pub const CIRCLE_CENTER: Vec3 = Vec3::new(0.0, 2.0, 0.0);
pub const CIRCLE_RADIUS_X: f32 = 10.0;
pub const CIRCLE_RADIUS_Y: f32 = 2.0;
/// Where the ship enters the mothership
pub const ENTRY_POINT: Vec3 = Vec3::new(0.0, 11.0, 0.0);
pub const MOTHERSHIP_POSITION: Vec3 = Vec3::new(0.0, 12.0, 0.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CutscenePhase {
    Circling,
    Entering,
}

/// Outcome of advancing the cutscene
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CutsceneStep {
    /// Still running; ship should be drawn here
    Running(Vec3),
    Finished,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cutscene {
    pub phase: CutscenePhase,
    /// Time spent in the current phase (ms)
    pub elapsed_ms: f64,
    pub circle_ms: f64,
    pub entry_ms: f64,
    /// Ship position when the entry leg began
    entry_start: Vec3,
}

impl Cutscene {
    pub fn new(circle_ms: f64, entry_ms: f64) -> Self {
        Self {
            phase: CutscenePhase::Circling,
            elapsed_ms: 0.0,
            circle_ms,
            entry_ms,
            entry_start: CIRCLE_CENTER + Vec3::new(CIRCLE_RADIUS_X, 0.0, 0.0),
        }
    }

    /// Total scripted length (ms)
    pub fn duration_ms(&self) -> f64 {
        self.circle_ms + self.entry_ms
    }

    pub fn advance(&mut self, dt_ms: f64) -> CutsceneStep {
        self.elapsed_ms += dt_ms;
        match self.phase {
            CutscenePhase::Circling => {
                let k = progress(self.elapsed_ms, self.circle_ms);
                let angle = k * TAU;
                let pos = CIRCLE_CENTER
                    + Vec3::new(
                        CIRCLE_RADIUS_X * angle.cos(),
                        CIRCLE_RADIUS_Y * angle.sin(),
                        0.0,
                    );
                if k >= 1.0 {
                    log::debug!("Cutscene: entering mothership");
                    self.phase = CutscenePhase::Entering;
                    self.elapsed_ms = 0.0;
                    self.entry_start = pos;
                }
                CutsceneStep::Running(pos)
            }
            CutscenePhase::Entering => {
                let k = progress(self.elapsed_ms, self.entry_ms);
                if k >= 1.0 {
                    CutsceneStep::Finished
                } else {
                    CutsceneStep::Running(self.entry_start.lerp(ENTRY_POINT, k))
                }
            }
        }
    }
}

fn progress(elapsed_ms: f64, total_ms: f64) -> f32 {
    if total_ms <= 0.0 {
        1.0
    } else {
        (elapsed_ms / total_ms).min(1.0) as f32
    }
}
