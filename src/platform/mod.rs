//! Platform abstraction layer
//!
//! Contracts the session drives the outside world through:
//! - `Renderer`: scene membership, transforms, frame presentation
//! - `Hud`: score/lives/level display and end-of-level/run notices
//! - `InputSnapshot`: pressed state per logical action, with edge detection

pub mod hud;
pub mod input;
pub mod renderer;

pub use hud::{Hud, HudEvent, HudSnapshot, NullHud, RecordingHud};
pub use input::{DEBUG_ACTION_COUNT, InputEdges, InputSnapshot, InputTracker};
pub use renderer::{NullRenderer, RecordingRenderer, Renderer, SceneNode};
