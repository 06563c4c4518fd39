use crate::core::{BodyId, ObjectId};
use crate::systems::physics::PhysicsWorld;

use super::WorldCore;

pub(super) fn attach_body(world: &mut WorldCore, object: ObjectId, mass: f32) -> Option<BodyId> {
    let pose = world.scene.world_pose(object)?;
    world.rigid_bodies.add_body(object, pose, mass)
}

pub(super) fn remove_body(world: &mut WorldCore, object: ObjectId) -> bool {
    match world.rigid_bodies.body_of(object) {
        Some(body) => world.rigid_bodies.remove_body(body),
        None => false,
    }
}
