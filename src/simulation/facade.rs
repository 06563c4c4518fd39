use wasm_bindgen::prelude::*;

use crate::core::{ObjectId, Pose, Quat, Vec3};
use crate::domain::SnapCategory;

use super::perf_stats::SnapStats;
use super::WorldCore;

/// JS-facing world. Ids are plain `u32`s where `0` means "none" or "failed";
/// snap results are outcome codes (0 idle, 1 no match, 2 snapped, 3 failed).
#[wasm_bindgen]
pub struct World {
    core: WorldCore,
}

/// Build a pose from flat components. A degenerate quaternion falls back to identity.
fn pose_from_parts(x: f32, y: f32, z: f32, qx: f32, qy: f32, qz: f32, qw: f32) -> Pose {
    let q = Quat::from_xyzw(qx, qy, qz, qw);
    let rotation = if q.length_squared() > 1e-12 && q.is_finite() {
        q.normalize()
    } else {
        Quat::IDENTITY
    };
    Pose::new(Vec3::new(x, y, z), rotation)
}

fn object_arg(id: u32) -> Option<ObjectId> {
    (id != 0).then_some(ObjectId(id))
}

#[wasm_bindgen]
impl World {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self { core: WorldCore::new() }
    }

    pub fn load_scene_bundle(&mut self, json: String) -> Result<(), JsValue> {
        self.core
            .load_scene_bundle_json(&json)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(())
    }

    pub fn get_content_manifest_json(&self) -> String {
        self.core.get_content_manifest_json()
    }

    // === SETTINGS ===

    pub fn set_snap_distance(&mut self, distance: f32) -> bool {
        self.core.set_snap_distance(distance)
    }

    #[wasm_bindgen(getter)]
    pub fn snap_distance(&self) -> f32 {
        self.core.settings().snap_distance
    }

    pub fn set_vertical_lift(&mut self, lift: f32) -> bool {
        self.core.set_vertical_lift(lift)
    }

    pub fn set_target_layers(&mut self, bits: u32) {
        self.core.set_target_layers(bits);
    }

    pub fn set_model_correction(&mut self, enabled: bool) {
        self.core.set_model_correction(enabled);
    }

    pub fn set_break_thresholds(&mut self, force: f32, torque: f32) -> bool {
        self.core.set_break_thresholds(force, torque)
    }

    // === SCENE ===

    /// Spawn a prefab as a root object. Returns the object id, 0 on failure.
    #[allow(clippy::too_many_arguments)]
    pub fn spawn_prefab(
        &mut self,
        key: &str,
        x: f32,
        y: f32,
        z: f32,
        qx: f32,
        qy: f32,
        qz: f32,
        qw: f32,
        with_body: bool,
    ) -> u32 {
        let pose = pose_from_parts(x, y, z, qx, qy, qz, qw);
        self.core.spawn_prefab(key, pose, with_body).map_or(0, |id| id.raw())
    }

    /// `parent` 0 spawns a root. Position is relative to the parent.
    pub fn spawn_object(&mut self, name: &str, parent: u32, x: f32, y: f32, z: f32) -> u32 {
        let pose = Pose::from_position(Vec3::new(x, y, z));
        self.core
            .spawn_object(name, object_arg(parent), pose)
            .map_or(0, |id| id.raw())
    }

    /// Category codes: 0 stud, 1 axle, 2 pin. Returns the point id, 0 on failure.
    pub fn add_receiver(&mut self, object: u32, category: u8, x: f32, y: f32, z: f32) -> u32 {
        let (Some(object), Some(category)) = (object_arg(object), SnapCategory::from_code(category)) else {
            return 0;
        };
        self.core
            .add_receiver(object, category, Pose::from_position(Vec3::new(x, y, z)))
            .map_or(0, |id| id.raw())
    }

    pub fn add_target(&mut self, object: u32, category: u8, x: f32, y: f32, z: f32) -> u32 {
        let (Some(object), Some(category)) = (object_arg(object), SnapCategory::from_code(category)) else {
            return 0;
        };
        self.core
            .add_target(object, category, Pose::from_position(Vec3::new(x, y, z)))
            .map_or(0, |id| id.raw())
    }

    #[allow(clippy::too_many_arguments)]
    pub fn move_object(&mut self, object: u32, x: f32, y: f32, z: f32, qx: f32, qy: f32, qz: f32, qw: f32) -> bool {
        let Some(object) = object_arg(object) else {
            return false;
        };
        self.core.move_object(object, pose_from_parts(x, y, z, qx, qy, qz, qw))
    }

    pub fn clear(&mut self) {
        self.core.clear();
    }

    #[wasm_bindgen(getter)]
    pub fn object_count(&self) -> usize {
        self.core.scene().object_count()
    }

    #[wasm_bindgen(getter)]
    pub fn active_point_count(&self) -> usize {
        self.core.scene().active_point_count()
    }

    // === RIGID BODY API ===

    /// Returns the body id, 0 on failure (unknown object or already has a body).
    pub fn attach_body(&mut self, object: u32, mass: f32) -> u32 {
        object_arg(object)
            .and_then(|o| self.core.attach_body(o, mass))
            .map_or(0, |id| id.raw())
    }

    pub fn remove_body(&mut self, object: u32) -> bool {
        object_arg(object).is_some_and(|o| self.core.remove_body(o))
    }

    pub fn rigid_body_count(&self) -> usize {
        self.core.rigid_body_count()
    }

    pub fn coupling_count(&self) -> usize {
        self.core.coupling_count()
    }

    // === SNAP ===

    pub fn grab(&mut self, object: u32) -> bool {
        object_arg(object).is_some_and(|o| self.core.grab(o))
    }

    pub fn release(&mut self, object: u32) -> u8 {
        self.core.release(ObjectId(object)).code()
    }

    pub fn try_snap(&mut self, object: u32) -> u8 {
        self.core.try_snap(ObjectId(object)).code()
    }

    pub fn get_snap_stats(&self) -> SnapStats {
        self.core.stats()
    }

    // === RENDER EXTRACT ===

    /// Flat `[x, y, z, radius]` per active receiver.
    pub fn receiver_gizmos(&self) -> Vec<f32> {
        self.core.receiver_gizmos()
    }

    /// Flat `[id, px, py, pz, qx, qy, qz, qw, mx, my, mz]` per object.
    pub fn object_poses(&self) -> Vec<f32> {
        self.core.object_poses()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
