use super::*;
use crate::core::{CouplingSide, Quat, SnapError, Vec3};
use crate::systems::physics::PhysicsWorld;
use approx::assert_relative_eq;

const BASEPLATE: &str = "base:baseplate_8x8";
const BRICK_1X1: &str = "base:brick_1x1";
const BRICK_2X2: &str = "base:brick_2x2";

fn at(x: f32, y: f32, z: f32) -> Pose {
    Pose::from_position(Vec3::new(x, y, z))
}

/// Baseplate at the origin plus a 1x1 brick whose receiver hangs 0.02 above
/// the stud at (0.04, 0.016, 0.04).
fn world_with_brick_over_stud(brick_body: bool) -> (WorldCore, ObjectId, ObjectId) {
    let mut world = WorldCore::new();
    let base = world.spawn_prefab(BASEPLATE, Pose::IDENTITY, true).unwrap();
    let brick = world
        .spawn_prefab(BRICK_1X1, at(0.04, 0.084, 0.04), brick_body)
        .unwrap();
    (world, base, brick)
}

#[test]
fn release_snaps_brick_onto_baseplate() {
    let (mut world, base, brick) = world_with_brick_over_stud(true);
    assert!(world.grab(brick));

    let outcome = world.release(brick);
    assert!(matches!(outcome, SnapOutcome::Snapped { stationary, candidates: 1, .. } if stationary == base));
    assert_eq!(world.coupling_count(), 1);

    // Receiver lands on the stud, lifted by the default 0.01.
    let pose = world.object_pose(brick).unwrap();
    assert_relative_eq!(pose.position.x, 0.04, epsilon = 1e-5);
    assert_relative_eq!(pose.position.y, 0.016 + 0.01 + 0.048, epsilon = 1e-5);
    assert_relative_eq!(pose.position.z, 0.04, epsilon = 1e-5);

    let body = world.rigid_bodies.body_of(brick).unwrap();
    assert_eq!(world.rigid_bodies.body(body).unwrap().pose.position, pose.position);

    let stats = world.stats();
    assert_eq!(stats.attempts(), 1);
    assert_eq!(stats.couplings(), 1);
    assert_eq!(stats.last_candidates(), 1);
    assert!(stats.last_ms() >= 0.0);
    assert!(stats.last_index_ms() <= stats.last_ms());
}

#[test]
fn snapped_brick_is_idle_on_next_release() {
    let (mut world, _base, brick) = world_with_brick_over_stud(true);
    assert!(world.release(brick).is_snapped());
    let points_after_first = world.scene.active_point_count();

    assert_eq!(world.release(brick), SnapOutcome::Idle);
    assert_eq!(world.coupling_count(), 1);
    assert_eq!(world.scene.active_point_count(), points_after_first);
    assert_eq!(world.stats().idle(), 1);
}

#[test]
fn release_far_from_anything_is_no_match() {
    let mut world = WorldCore::new();
    world.spawn_prefab(BASEPLATE, Pose::IDENTITY, true).unwrap();
    let brick = world.spawn_prefab(BRICK_1X1, at(0.0, 1.0, 0.0), true).unwrap();

    assert_eq!(world.release(brick), SnapOutcome::NoMatch);
    assert_eq!(world.object_pose(brick).unwrap().position, Vec3::new(0.0, 1.0, 0.0));
    assert_eq!(world.stats().no_match(), 1);
    assert_eq!(world.coupling_count(), 0);
}

#[test]
fn missing_body_leaves_everything_in_place() {
    let (mut world, _base, brick) = world_with_brick_over_stud(false);
    let points_before = world.scene.active_point_count();

    let outcome = world.release(brick);
    assert_eq!(
        outcome,
        SnapOutcome::Failed(SnapError::MissingPhysicsBody {
            object: brick,
            side: CouplingSide::Movable
        })
    );
    assert_eq!(world.object_pose(brick).unwrap().position, Vec3::new(0.04, 0.084, 0.04));
    assert_eq!(world.scene.active_point_count(), points_before);
    assert_eq!(world.stats().missing_body_failures(), 1);

    // Once a body exists the same part snaps normally.
    world.attach_body(brick, 0.25).unwrap();
    assert!(world.release(brick).is_snapped());
}

#[test]
fn brick_stacks_on_brick_using_all_four_studs() {
    let mut world = WorldCore::new();
    let lower = world.spawn_prefab(BRICK_2X2, at(0.0, 0.5, 0.0), true).unwrap();
    let upper = world
        .spawn_prefab(BRICK_2X2, at(0.005, 0.5 + 0.096 + 0.015, 0.0), true)
        .unwrap();

    let outcome = world.release(upper);
    assert!(matches!(outcome, SnapOutcome::Snapped { stationary, candidates: 4, .. } if stationary == lower));

    let pose = world.object_pose(upper).unwrap();
    assert_relative_eq!(pose.position.x, 0.0, epsilon = 1e-5);
    assert_relative_eq!(pose.position.y, 0.5 + 0.048 + 0.01 + 0.048, epsilon = 1e-5);
    assert_relative_eq!(pose.position.z, 0.0, epsilon = 1e-5);

    // Upper brick's own studs stay free for the next brick.
    let free_upper_targets = world
        .scene
        .object(upper)
        .unwrap()
        .targets
        .iter()
        .filter(|t| world.scene.point(**t).unwrap().is_active())
        .count();
    assert_eq!(free_upper_targets, 4);
}

#[test]
fn snap_takes_the_stationary_rotation() {
    let mut world = WorldCore::new();
    let yaw = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);
    world
        .spawn_prefab(BASEPLATE, Pose::new(Vec3::ZERO, yaw), true)
        .unwrap();
    let brick = world.spawn_prefab(BRICK_1X1, at(0.04, 0.084, 0.04), true).unwrap();

    assert!(world.release(brick).is_snapped());
    let rotation = world.object_pose(brick).unwrap().rotation;
    assert!(rotation.abs_diff_eq(yaw, 1e-5));
}

fn rendered_model_position(world: &WorldCore, object: ObjectId) -> Vec3 {
    let pose = world.object_pose(object).unwrap();
    let offset = world.scene.object(object).unwrap().model_offset;
    pose.position + pose.rotation * offset
}

#[test]
fn model_lands_on_corner_stud() {
    let mut world = WorldCore::new();
    world.spawn_prefab(BASEPLATE, Pose::IDENTITY, true).unwrap();
    let brick = world.spawn_prefab(BRICK_1X1, at(0.28, 0.084, 0.28), true).unwrap();

    assert!(world.release(brick).is_snapped());
    let model = rendered_model_position(&world, brick);
    assert_relative_eq!(model.x, 0.28, epsilon = 1e-5);
    assert_relative_eq!(model.z, 0.28, epsilon = 1e-5);
    assert_eq!(world.scene.object(brick).unwrap().model_offset, Vec3::ZERO);
}

#[test]
fn overhanging_brick_model_centres_on_engaged_stud() {
    let mut world = WorldCore::new();
    world.spawn_prefab(BASEPLATE, Pose::IDENTITY, true).unwrap();
    // Only the (-x, -z) receiver of the 2x2 reaches the corner stud at (0.28, 0.28).
    let brick = world
        .spawn_prefab(BRICK_2X2, at(0.32, 0.016 + 0.048 + 0.02, 0.32), true)
        .unwrap();

    let outcome = world.release(brick);
    assert!(matches!(outcome, SnapOutcome::Snapped { candidates: 1, .. }));

    let pose = world.object_pose(brick).unwrap();
    assert_relative_eq!(pose.position.x, 0.32, epsilon = 1e-5);
    assert_relative_eq!(pose.position.z, 0.32, epsilon = 1e-5);
    let model = rendered_model_position(&world, brick);
    assert_relative_eq!(model.x, 0.28, epsilon = 1e-5);
    assert_relative_eq!(model.z, 0.28, epsilon = 1e-5);
}

#[test]
fn disabled_model_correction_keeps_authored_offset() {
    let mut world = WorldCore::new();
    world.set_model_correction(false);
    world.spawn_prefab(BASEPLATE, Pose::IDENTITY, true).unwrap();
    let brick = world
        .spawn_prefab(BRICK_2X2, at(0.32, 0.016 + 0.048 + 0.02, 0.32), true)
        .unwrap();

    assert!(world.release(brick).is_snapped());
    assert_eq!(world.scene.object(brick).unwrap().model_offset, Vec3::ZERO);
}

#[test]
fn grab_marks_held_and_kinematic() {
    let (mut world, _base, brick) = world_with_brick_over_stud(true);
    assert!(world.grab(brick));
    let body = world.rigid_bodies.body_of(brick).unwrap();
    assert!(world.scene.object(brick).unwrap().held);
    assert!(world.rigid_bodies.body(body).unwrap().kinematic);

    world.release(brick);
    assert!(!world.scene.object(brick).unwrap().held);
    assert!(!world.rigid_bodies.body(body).unwrap().kinematic);

    assert!(!world.grab(ObjectId(99)));
}

#[test]
fn settings_reject_bad_values() {
    let mut world = WorldCore::new();
    assert!(!world.set_snap_distance(0.0));
    assert!(!world.set_snap_distance(f32::NAN));
    assert!(world.set_snap_distance(0.2));
    assert_eq!(world.settings().snap_distance, 0.2);

    assert!(!world.set_break_thresholds(-1.0, 5.0));
    assert!(world.settings().break_force.is_infinite());
    assert!(world.set_break_thresholds(100.0, 50.0));
    assert_eq!(world.settings().break_torque, 50.0);
}

#[test]
fn couplings_use_configured_break_thresholds() {
    let (mut world, _base, brick) = world_with_brick_over_stud(true);
    world.set_break_thresholds(100.0, 50.0);
    let outcome = world.release(brick);
    let coupling = outcome.coupling().unwrap();
    assert_eq!(coupling.break_force, 100.0);
    assert!(!coupling.is_unbreakable());
}

#[test]
fn wider_tolerance_reaches_further() {
    let mut world = WorldCore::new();
    world.spawn_prefab(BASEPLATE, Pose::IDENTITY, true).unwrap();
    // Receiver 0.08 above the stud.
    let brick = world.spawn_prefab(BRICK_1X1, at(0.04, 0.144, 0.04), true).unwrap();

    assert_eq!(world.try_snap(brick), SnapOutcome::NoMatch);
    world.set_snap_distance(0.1);
    assert!(world.try_snap(brick).is_snapped());
}

#[test]
fn receiver_gizmos_cover_active_receivers() {
    let (mut world, _base, brick) = world_with_brick_over_stud(true);
    world.set_snap_distance(0.07);

    let gizmos = world.receiver_gizmos();
    assert_eq!(gizmos.len(), GIZMO_STRIDE);
    assert_relative_eq!(gizmos[0], 0.04, epsilon = 1e-6);
    assert_relative_eq!(gizmos[1], 0.036, epsilon = 1e-6);
    assert_eq!(gizmos[3], 0.07);

    world.set_snap_distance(0.05);
    world.release(brick);
    assert!(world.receiver_gizmos().is_empty());
}

#[test]
fn object_poses_are_packed_per_object() {
    let (world, base, brick) = world_with_brick_over_stud(true);
    let poses = world.object_poses();
    assert_eq!(poses.len(), 2 * POSE_STRIDE);
    assert_eq!(poses[0], base.raw() as f32);
    assert_eq!(poses[POSE_STRIDE], brick.raw() as f32);
    assert_eq!(poses[POSE_STRIDE + 2], 0.084);
    // Identity rotation: w is last.
    assert_eq!(poses[POSE_STRIDE + 7], 1.0);
}

#[test]
fn removing_a_body_drops_its_couplings() {
    let (mut world, base, brick) = world_with_brick_over_stud(true);
    assert!(world.release(brick).is_snapped());

    assert!(world.remove_body(base));
    assert_eq!(world.coupling_count(), 0);
    assert_eq!(world.rigid_body_count(), 1);
    assert!(!world.remove_body(base));
}

#[test]
fn manual_points_snap_by_category() {
    let mut world = WorldCore::new();
    let hub = world.spawn_object("hub", None, Pose::IDENTITY).unwrap();
    let wheel = world.spawn_object("wheel", None, at(0.0, 0.03, 0.0)).unwrap();
    world.add_target(hub, SnapCategory::Axle, Pose::IDENTITY).unwrap();
    world.add_receiver(wheel, SnapCategory::Pin, Pose::IDENTITY).unwrap();
    world.attach_body(hub, 1.0).unwrap();
    world.attach_body(wheel, 1.0).unwrap();

    assert_eq!(world.release(wheel), SnapOutcome::NoMatch);

    world.add_receiver(wheel, SnapCategory::Axle, Pose::IDENTITY).unwrap();
    assert!(world.release(wheel).is_snapped());
    // The unmatched pin receiver is still free.
    assert!(world.scene.has_active_receivers(wheel));
}

#[test]
fn moving_an_object_moves_its_body() {
    let (mut world, _base, brick) = world_with_brick_over_stud(true);
    assert!(world.move_object(brick, at(1.0, 2.0, 3.0)));
    let body = world.rigid_bodies.body_of(brick).unwrap();
    assert_eq!(world.rigid_bodies.body(body).unwrap().pose.position, Vec3::new(1.0, 2.0, 3.0));
    assert!(!world.move_object(ObjectId(42), Pose::IDENTITY));
}

#[test]
fn scene_bundle_rebuilds_the_world() {
    let mut world = WorldCore::new();
    let old = world.spawn_prefab(BRICK_1X1, Pose::IDENTITY, true).unwrap();
    assert_eq!(world.release(old), SnapOutcome::NoMatch);
    assert_eq!(world.stats().attempts(), 1);

    let json = r#"{
        "formatVersion": 1,
        "settings": { "snapDistance": 0.06 },
        "objects": [
            { "name": "floor", "prefab": "base:baseplate_8x8" },
            { "name": "loose", "prefab": "base:brick_1x1", "position": [0.04, 0.084, 0.04] }
        ]
    }"#;
    world.load_scene_bundle_json(json).unwrap();

    assert_eq!(world.scene.object_count(), 2);
    assert_eq!(world.stats(), SnapStats::default());
    assert_eq!(world.rigid_body_count(), 2);
    assert_eq!(world.settings().snap_distance, 0.06);
    let loose = world
        .scene
        .objects()
        .find(|o| o.name == "loose")
        .map(|o| o.id)
        .unwrap();
    assert!(world.release(loose).is_snapped());
}

#[test]
fn bad_scene_bundle_keeps_current_world() {
    let (mut world, _base, _brick) = world_with_brick_over_stud(true);
    let err = world
        .load_scene_bundle_json(r#"{"formatVersion": 1, "objects": [{"prefab": "missing"}]}"#)
        .unwrap_err();
    assert!(matches!(err, ContentError::UnknownPrefab(_)));
    assert_eq!(world.scene.object_count(), 2);
    assert_eq!(world.rigid_body_count(), 2);
}

#[test]
fn unknown_prefab_spawns_nothing() {
    let mut world = WorldCore::new();
    assert!(world.spawn_prefab("base:nope", Pose::IDENTITY, true).is_none());
    assert_eq!(world.scene.object_count(), 0);
    assert!(world.get_content_manifest_json().contains(BRICK_2X2));
}

#[test]
fn clear_empties_scene_and_bodies() {
    let (mut world, _base, brick) = world_with_brick_over_stud(true);
    world.release(brick);
    world.clear();
    assert_eq!(world.scene.object_count(), 0);
    assert_eq!(world.rigid_body_count(), 0);
    assert_eq!(world.coupling_count(), 0);
}
