//! Snap matcher - which receiver/target pairs are in reach
//!
//! Pure selection: reads the scene and the query snapshot, mutates nothing.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::core::{mean_point, ObjectId, Pose, Vec3};
use crate::domain::{AttachmentPoint, PointRole, Scene, SnapSettings};
use crate::spatial::SpatialQuery;

use super::types::{MatchCandidate, MatchSet};

/// Collect every (receiver, target) pair within `snap_distance` for the
/// active receivers of `movable`.
///
/// Receivers are visited in declaration order and each query's hits in the
/// order the query returns them; the closest pair becomes `best`, first seen
/// winning exact ties. Returns `None` when nothing qualifies, including when
/// the object has no active receivers.
pub fn find_matches<Q>(
    scene: &Scene,
    query: &Q,
    movable: ObjectId,
    settings: &SnapSettings,
) -> Option<MatchSet>
where
    Q: SpatialQuery + ?Sized,
{
    let ctx = MatchContext {
        scene,
        query,
        settings,
        movable_pose: scene.world_pose(movable)?,
        movable_root: scene.root_of(movable)?,
    };

    let receivers: Vec<&AttachmentPoint> = scene.active_receivers(movable).collect();
    if receivers.is_empty() {
        return None;
    }

    // Queries are read-only, so they can fan out; `collect` keeps receiver order.
    #[cfg(feature = "parallel")]
    let per_receiver: Vec<Vec<MatchCandidate>> =
        receivers.par_iter().map(|r| ctx.candidates_for(r)).collect();

    #[cfg(not(feature = "parallel"))]
    let per_receiver: Vec<Vec<MatchCandidate>> =
        receivers.iter().map(|r| ctx.candidates_for(r)).collect();

    let layout_centre = receiver_layout_centre(scene, movable, &ctx.movable_pose);
    MatchSet::collect(per_receiver.into_iter().flatten())
        .map(|set| set.with_receiver_layout_centre(layout_centre))
}

/// Mean movable-frame position of every receiver on `movable`, retired ones included.
fn receiver_layout_centre(scene: &Scene, movable: ObjectId, movable_pose: &Pose) -> Vec3 {
    let Some(object) = scene.object(movable) else {
        return Vec3::ZERO;
    };
    mean_point(
        object
            .receivers
            .iter()
            .filter_map(|id| scene.point_world_pose(*id))
            .map(|p| movable_pose.inverse_transform_point(p.position)),
    )
    .unwrap_or(Vec3::ZERO)
}

struct MatchContext<'a, Q: ?Sized> {
    scene: &'a Scene,
    query: &'a Q,
    settings: &'a SnapSettings,
    movable_pose: Pose,
    movable_root: ObjectId,
}

impl<Q: SpatialQuery + ?Sized> MatchContext<'_, Q> {
    fn candidates_for(&self, receiver: &AttachmentPoint) -> Vec<MatchCandidate> {
        let Some(receiver_pose) = self.scene.point_world_pose(receiver.id) else {
            return Vec::new();
        };
        let receiver_position = receiver_pose.position;
        let receiver_local = self.movable_pose.inverse_transform_point(receiver_position);
        let tolerance = self.settings.snap_distance;

        self.query
            .overlap_sphere(receiver_position, tolerance, self.settings.target_layers)
            .into_iter()
            .filter(|hit| hit.tag.is_target_for(receiver.category))
            .filter_map(|hit| {
                let target = self.scene.point(hit.point)?;
                if !target.is_active() || target.role != PointRole::Target {
                    return None;
                }
                // A part never snaps onto itself.
                let stationary = self.scene.root_of(target.parent)?;
                if stationary == self.movable_root {
                    return None;
                }
                let target_position = self.scene.point_world_pose(target.id)?.position;
                let distance = receiver_position.distance(target_position);
                if distance > tolerance {
                    return None;
                }
                let stationary_pose = self.scene.world_pose(stationary)?;
                Some(MatchCandidate {
                    receiver: receiver.id,
                    target: target.id,
                    stationary,
                    receiver_position,
                    target_position,
                    receiver_local,
                    target_local: stationary_pose.inverse_transform_point(target_position),
                    stationary_rotation: stationary_pose.rotation,
                    distance,
                })
            })
            .collect()
    }
}
