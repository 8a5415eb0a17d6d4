//! Per-frame input snapshot and edge detection
//!
//! Backends report plain pressed state per logical action. Toggles (pause,
//! debug) and menu confirms act on the press edge; steering and fire act on
//! held state.

use crate::sim::EntityId;

/// Debug actions: invincibility, clear enemies, skip level, slow motion
pub const DEBUG_ACTION_COUNT: usize = 4;

/// Pressed state of every logical action for one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSnapshot {
    pub move_left: bool,
    pub move_right: bool,
    pub fire: bool,
    pub pause: bool,
    pub debug_toggle: bool,
    pub debug_actions: [bool; DEBUG_ACTION_COUNT],
    /// Selectable entity the pointer ray hit this frame (resolved by the renderer)
    pub pick: Option<EntityId>,
}

/// Actions that went from released to pressed this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputEdges {
    pub fire: bool,
    pub pause: bool,
    pub debug_toggle: bool,
    pub debug_actions: [bool; DEBUG_ACTION_COUNT],
}

/// Remembers the previous snapshot to derive press edges
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    previous: InputSnapshot,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn edges(&mut self, current: &InputSnapshot) -> InputEdges {
        let prev = &self.previous;
        let mut debug_actions = [false; DEBUG_ACTION_COUNT];
        for (i, edge) in debug_actions.iter_mut().enumerate() {
            *edge = current.debug_actions[i] && !prev.debug_actions[i];
        }
        let edges = InputEdges {
            fire: current.fire && !prev.fire,
            pause: current.pause && !prev.pause,
            debug_toggle: current.debug_toggle && !prev.debug_toggle,
            debug_actions,
        };
        self.previous = current.clone();
        edges
    }
}
