use crate::core::{ObjectId, PointId, Pose};
use crate::domain::{Layer, PointRole, SnapCategory};
use crate::systems::physics::PhysicsWorld;

use super::WorldCore;

pub(super) fn spawn_prefab(
    world: &mut WorldCore,
    key: &str,
    name: Option<&str>,
    parent: Option<ObjectId>,
    local_pose: Pose,
    with_body: bool,
) -> Option<ObjectId> {
    let content = world.content.clone();
    let Some(prefab) = content.get(key) else {
        log::warn!("spawn: unknown prefab '{key}'");
        return None;
    };

    let id = world
        .scene
        .add_object(name.unwrap_or(prefab.name.as_str()), parent, local_pose)
        .ok()?;
    world.scene.set_model_offset(id, prefab.model_offset).ok()?;

    for spec in &prefab.receivers {
        world
            .scene
            .add_point(id, PointRole::Receiver, spec.category, spec.layer, spec.local, spec.label.as_str())
            .ok()?;
    }
    for spec in &prefab.targets {
        world
            .scene
            .add_point(id, PointRole::Target, spec.category, spec.layer, spec.local, spec.label.as_str())
            .ok()?;
    }

    if with_body {
        let pose = world.scene.world_pose(id)?;
        world.rigid_bodies.add_body(id, pose, prefab.mass)?;
    }
    Some(id)
}

pub(super) fn spawn_object(
    world: &mut WorldCore,
    name: &str,
    parent: Option<ObjectId>,
    local_pose: Pose,
) -> Option<ObjectId> {
    world.scene.add_object(name, parent, local_pose).ok()
}

pub(super) fn add_receiver(
    world: &mut WorldCore,
    object: ObjectId,
    category: SnapCategory,
    local: Pose,
) -> Option<PointId> {
    let label = format!("SnapReceiver_{}", world.scene.object(object)?.receivers.len());
    world
        .scene
        .add_point(object, PointRole::Receiver, category, Layer::DEFAULT, local, label)
        .ok()
}

/// Targets go on the snap-point layer so the default mask finds them.
pub(super) fn add_target(
    world: &mut WorldCore,
    object: ObjectId,
    category: SnapCategory,
    local: Pose,
) -> Option<PointId> {
    let label = format!("SnapPoint_{}", world.scene.object(object)?.targets.len());
    world
        .scene
        .add_point(object, PointRole::Target, category, Layer::SNAP_POINTS, local, label)
        .ok()
}

pub(super) fn move_object(world: &mut WorldCore, object: ObjectId, pose: Pose) -> bool {
    if world.scene.set_world_pose(object, pose).is_err() {
        return false;
    }
    if let Some(body) = world.rigid_bodies.body_of(object) {
        world.rigid_bodies.set_body_pose(body, pose);
    }
    true
}

pub(super) fn clear(world: &mut WorldCore) {
    world.scene.clear();
    world.rigid_bodies.clear();
}
