use super::WorldCore;

/// Floats per receiver gizmo: x, y, z, radius
pub const GIZMO_STRIDE: usize = 4;
/// Floats per object pose: id, position (3), rotation (4), model offset (3)
pub const POSE_STRIDE: usize = 11;

/// Wire spheres for every active receiver, sized to the snap tolerance.
pub(super) fn receiver_gizmos(world: &WorldCore) -> Vec<f32> {
    let radius = world.settings.snap_distance;
    let mut out = Vec::new();
    for object in world.scene.objects() {
        for receiver in world.scene.active_receivers(object.id) {
            let Some(pose) = world.scene.point_world_pose(receiver.id) else {
                continue;
            };
            out.extend_from_slice(&[pose.position.x, pose.position.y, pose.position.z, radius]);
        }
    }
    out
}

pub(super) fn object_poses(world: &WorldCore) -> Vec<f32> {
    let mut out = Vec::with_capacity(world.scene.object_count() * POSE_STRIDE);
    for object in world.scene.objects() {
        let Some(pose) = world.scene.world_pose(object.id) else {
            continue;
        };
        let p = pose.position;
        let q = pose.rotation;
        let m = object.model_offset;
        out.extend_from_slice(&[
            object.id.raw() as f32,
            p.x,
            p.y,
            p.z,
            q.x,
            q.y,
            q.z,
            q.w,
            m.x,
            m.y,
            m.z,
        ]);
    }
    out
}
