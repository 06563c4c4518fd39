//! World - owns the assembly scene and drives snapping
//!
//! `WorldCore` is the native API. It only orchestrates: scene bookkeeping
//! lives in `domain`, physics in `rigid_body_system`, and the snap pipeline
//! in `systems::snap`. `World` (facade.rs) wraps it for JS.
//!
//! Snap attempts fire on release, mirroring a grab interaction:
//! `grab` marks the part held, `release` lets go and tries to snap it.

use std::sync::Arc;

use crate::core::{BodyId, ContentError, ObjectId, PointId, Pose};
use crate::domain::{PrefabRegistry, Scene, SnapCategory, SnapSettings};
use crate::rigid_body_system::RigidBodySystem;
use crate::systems::snap::SnapOutcome;

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
#[path = "commands/commands.rs"]
mod commands;
#[path = "rigid/rigid.rs"]
mod rigid;
#[path = "snap/snap.rs"]
mod snap;
#[path = "render/render_extract.rs"]
mod render_extract;
mod facade;

pub use facade::World;
pub use perf_stats::SnapStats;
pub use render_extract::{GIZMO_STRIDE, POSE_STRIDE};

use perf_timer::{AttemptTimer, AttemptTiming};

/// The assembly world
pub struct WorldCore {
    content: Arc<PrefabRegistry>,
    scene: Scene,
    rigid_bodies: RigidBodySystem,
    settings: SnapSettings,
    stats: SnapStats,
}

impl WorldCore {
    /// Empty world with the built-in prefabs and default settings
    pub fn new() -> Self {
        init::create_world_core(SnapSettings::default())
    }

    pub fn with_settings(settings: SnapSettings) -> Self {
        init::create_world_core(settings)
    }

    /// Replace prefabs and settings with a bundle's and rebuild the scene
    /// from its objects. On error the world is left untouched.
    pub fn load_scene_bundle_json(&mut self, json: &str) -> Result<(), ContentError> {
        init::load_scene_bundle_json(self, json)
    }

    pub fn get_content_manifest_json(&self) -> String {
        self.content.manifest_json()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn rigid_bodies(&self) -> &RigidBodySystem {
        &self.rigid_bodies
    }

    pub fn settings(&self) -> &SnapSettings {
        &self.settings
    }

    pub fn stats(&self) -> SnapStats {
        self.stats.clone()
    }

    // === SETTINGS ===

    /// Returns false (and keeps the old value) for non-positive or non-finite input.
    pub fn set_snap_distance(&mut self, distance: f32) -> bool {
        settings::set_snap_distance(self, distance)
    }

    pub fn set_vertical_lift(&mut self, lift: f32) -> bool {
        settings::set_vertical_lift(self, lift)
    }

    pub fn set_target_layers(&mut self, bits: u32) {
        settings::set_target_layers(self, bits)
    }

    pub fn set_model_correction(&mut self, enabled: bool) {
        settings::set_model_correction(self, enabled)
    }

    pub fn set_break_thresholds(&mut self, force: f32, torque: f32) -> bool {
        settings::set_break_thresholds(self, force, torque)
    }

    // === SCENE COMMANDS ===

    /// Instantiate a prefab as a root object.
    pub fn spawn_prefab(&mut self, key: &str, pose: Pose, with_body: bool) -> Option<ObjectId> {
        commands::spawn_prefab(self, key, None, None, pose, with_body)
    }

    /// Instantiate a prefab under `parent` (pose relative to the parent).
    pub fn spawn_prefab_under(
        &mut self,
        key: &str,
        parent: ObjectId,
        local_pose: Pose,
        with_body: bool,
    ) -> Option<ObjectId> {
        commands::spawn_prefab(self, key, None, Some(parent), local_pose, with_body)
    }

    /// Bare object with no points and no body.
    pub fn spawn_object(&mut self, name: &str, parent: Option<ObjectId>, local_pose: Pose) -> Option<ObjectId> {
        commands::spawn_object(self, name, parent, local_pose)
    }

    pub fn add_receiver(&mut self, object: ObjectId, category: SnapCategory, local: Pose) -> Option<PointId> {
        commands::add_receiver(self, object, category, local)
    }

    pub fn add_target(&mut self, object: ObjectId, category: SnapCategory, local: Pose) -> Option<PointId> {
        commands::add_target(self, object, category, local)
    }

    /// Move an object (and its body, if any) to a world pose.
    pub fn move_object(&mut self, object: ObjectId, pose: Pose) -> bool {
        commands::move_object(self, object, pose)
    }

    pub fn object_pose(&self, object: ObjectId) -> Option<Pose> {
        self.scene.world_pose(object)
    }

    /// Clear the scene and every body
    pub fn clear(&mut self) {
        commands::clear(self)
    }

    // === RIGID BODY API ===

    /// Give an object a body at its current world pose.
    pub fn attach_body(&mut self, object: ObjectId, mass: f32) -> Option<BodyId> {
        rigid::attach_body(self, object, mass)
    }

    /// Remove an object's body together with its couplings.
    pub fn remove_body(&mut self, object: ObjectId) -> bool {
        rigid::remove_body(self, object)
    }

    pub fn rigid_body_count(&self) -> usize {
        self.rigid_bodies.body_count()
    }

    pub fn coupling_count(&self) -> usize {
        self.rigid_bodies.coupling_count()
    }

    // === SNAP ===

    pub fn grab(&mut self, object: ObjectId) -> bool {
        snap::grab(self, object)
    }

    /// Let go of an object and attempt to snap it.
    pub fn release(&mut self, object: ObjectId) -> SnapOutcome {
        snap::release(self, object)
    }

    pub fn try_snap(&mut self, object: ObjectId) -> SnapOutcome {
        snap::try_snap(self, object)
    }

    // === RENDER EXTRACT ===

    /// `[x, y, z, radius]` per active receiver.
    pub fn receiver_gizmos(&self) -> Vec<f32> {
        render_extract::receiver_gizmos(self)
    }

    /// `[id, px, py, pz, qx, qy, qz, qw, mx, my, mz]` per object.
    pub fn object_poses(&self) -> Vec<f32> {
        render_extract::object_poses(self)
    }
}

impl Default for WorldCore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
