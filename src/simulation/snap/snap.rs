use crate::core::ObjectId;
use crate::spatial::SpatialHash;
use crate::systems::physics::PhysicsWorld;
use crate::systems::snap::{self, SnapOutcome};

use super::{AttemptTimer, WorldCore};

/// Mark an object as held. Its body (if any) turns kinematic while held.
pub(super) fn grab(world: &mut WorldCore, object: ObjectId) -> bool {
    if world.scene.set_held(object, true).is_err() {
        return false;
    }
    set_kinematic(world, object, true);
    true
}

/// Let go and snap. Releasing something that was not held still attempts a snap.
pub(super) fn release(world: &mut WorldCore, object: ObjectId) -> SnapOutcome {
    if world.scene.set_held(object, false).is_ok() {
        set_kinematic(world, object, false);
    }
    try_snap(world, object)
}

pub(super) fn try_snap(world: &mut WorldCore, object: ObjectId) -> SnapOutcome {
    let mut timer = AttemptTimer::start();

    // Snapshot of the active points as they are right now.
    let index = SpatialHash::from_scene(&world.scene, world.settings.index_cell_size);
    timer.index_built();
    let outcome = snap::try_snap(
        &mut world.scene,
        &index,
        &mut world.rigid_bodies,
        object,
        &world.settings,
    );

    world.stats.record(&outcome, timer.finish());
    outcome
}

fn set_kinematic(world: &mut WorldCore, object: ObjectId, kinematic: bool) {
    if let Some(body) = world.rigid_bodies.body_of(object) {
        if let Some(b) = world.rigid_bodies.body_mut(body) {
            b.kinematic = kinematic;
        }
    }
}
