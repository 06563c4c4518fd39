//! Coupling & consumption
//!
//! Moves the released part into place, welds it to the stationary part and
//! retires every point that took part in the match. Preconditions are
//! checked before anything is touched, so a failure leaves the world as it
//! was.

use crate::core::{CouplingSide, ObjectId, Pose, SnapError};
use crate::domain::{Scene, SnapSettings};
use crate::systems::physics::PhysicsWorld;
use crate::systems::rigid_body_system::Coupling;

use super::types::{AlignmentTransform, MatchSet};

pub fn apply_snap<P>(
    scene: &mut Scene,
    physics: &mut P,
    movable: ObjectId,
    alignment: &AlignmentTransform,
    matches: &MatchSet,
    settings: &SnapSettings,
) -> Result<Coupling, SnapError>
where
    P: PhysicsWorld + ?Sized,
{
    let model_offset = scene
        .object(movable)
        .map(|o| o.model_offset)
        .ok_or(SnapError::UnknownObject(movable))?;
    let stationary = matches.stationary();
    let movable_body = physics.body_of(movable).ok_or(SnapError::MissingPhysicsBody {
        object: movable,
        side: CouplingSide::Movable,
    })?;
    let stationary_body = physics.body_of(stationary).ok_or(SnapError::MissingPhysicsBody {
        object: stationary,
        side: CouplingSide::Stationary,
    })?;

    // 1. Pose
    let pose = Pose::new(alignment.target_position, alignment.target_rotation);
    scene.set_world_pose(movable, pose)?;
    if let Some(correction) = alignment.model_correction {
        scene.set_model_offset(movable, model_offset + correction)?;
    }
    physics.set_body_pose(movable_body, pose);

    // 2. Weld. No re-parenting: both objects stay where they are in the hierarchy.
    let coupling = physics.create_rigid_coupling(
        movable_body,
        stationary_body,
        settings.break_force,
        settings.break_torque,
    );

    // 3. Both sides of every matched pair are now occupied.
    for c in matches.candidates() {
        scene.retire(c.receiver)?;
        scene.retire(c.target)?;
    }

    Ok(coupling)
}
