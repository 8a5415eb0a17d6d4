//! Renderer contract
//!
//! The core pushes scene changes in; it never reads geometry back.

use std::collections::BTreeMap;

use glam::Vec3;

use crate::sim::{EntityId, EntityKind};

/// Presentation backend driven once per frame, after simulation
///
/// Implementations own every mesh/material concern. Pooling of visual
/// resources is fine, but ids must be treated as distinct logical entities.
pub trait Renderer {
    /// A new entity entered the world
    fn add_to_scene(&mut self, id: EntityId, kind: EntityKind, position: Vec3);

    /// An entity left the world; its id will not come back
    fn remove_from_scene(&mut self, id: EntityId);

    /// Position and Euler rotation (radians) for this frame
    fn update_transform(&mut self, id: EntityId, position: Vec3, rotation: Vec3);

    /// Blink support; defaults to ignoring it
    fn set_visible(&mut self, _id: EntityId, _visible: bool) {}

    /// Brief hit flash (bosses); defaults to ignoring it
    fn flash(&mut self, _id: EntityId) {}

    fn render_frame(&mut self);
}

/// Renderer that draws nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn add_to_scene(&mut self, _id: EntityId, _kind: EntityKind, _position: Vec3) {}
    fn remove_from_scene(&mut self, _id: EntityId) {}
    fn update_transform(&mut self, _id: EntityId, _position: Vec3, _rotation: Vec3) {}
    fn render_frame(&mut self) {}
}

/// Last known state of one scene entry
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub kind: EntityKind,
    pub position: Vec3,
    pub rotation: Vec3,
    pub visible: bool,
}

/// Headless renderer that mirrors the scene graph, for tests and diagnostics
#[derive(Debug, Default, Clone)]
pub struct RecordingRenderer {
    pub nodes: BTreeMap<EntityId, SceneNode>,
    pub frames: u64,
    pub flashes: Vec<EntityId>,
    /// Calls that referenced an id not in the scene (or re-added a live one)
    pub stale_calls: u32,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live scene entries of a kind matching `pred`
    pub fn count(&self, pred: impl Fn(&EntityKind) -> bool) -> usize {
        self.nodes.values().filter(|n| pred(&n.kind)).count()
    }
}

impl Renderer for RecordingRenderer {
    fn add_to_scene(&mut self, id: EntityId, kind: EntityKind, position: Vec3) {
        let node = SceneNode {
            kind,
            position,
            rotation: kind.base_rotation(),
            visible: true,
        };
        if self.nodes.insert(id, node).is_some() {
            log::warn!("Entity {:?} added to the scene twice", id);
            self.stale_calls += 1;
        }
    }

    fn remove_from_scene(&mut self, id: EntityId) {
        if self.nodes.remove(&id).is_none() {
            log::warn!("Removing unknown entity {:?}", id);
            self.stale_calls += 1;
        }
    }

    fn update_transform(&mut self, id: EntityId, position: Vec3, rotation: Vec3) {
        match self.nodes.get_mut(&id) {
            Some(node) => {
                node.position = position;
                node.rotation = rotation;
            }
            None => self.stale_calls += 1,
        }
    }

    fn set_visible(&mut self, id: EntityId, visible: bool) {
        match self.nodes.get_mut(&id) {
            Some(node) => node.visible = visible,
            None => self.stale_calls += 1,
        }
    }

    fn flash(&mut self, id: EntityId) {
        self.flashes.push(id);
    }

    fn render_frame(&mut self) {
        self.frames += 1;
    }
}
