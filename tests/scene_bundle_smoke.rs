use brickworks_engine::core::{ContentError, Pose, Vec3};
use brickworks_engine::domain::{PrefabRegistry, SceneBundle, SnapSettings};
use brickworks_engine::WorldCore;

const BUNDLE: &str = r#"{
    "formatVersion": 1,
    "settings": { "snapDistance": 0.05, "verticalLift": 0.0 },
    "prefabs": [{
        "key": "demo:tile",
        "name": "Tile",
        "mass": 0.1,
        "receivers": [{ "offset": [0, -0.01, 0] }]
    }],
    "objects": [
        { "name": "floor", "prefab": "base:baseplate_8x8" },
        { "name": "tile", "prefab": "demo:tile", "position": [-0.04, 0.04, 0.04] }
    ]
}"#;

#[test]
fn bundle_parses_and_layers_over_builtins() {
    let bundle = SceneBundle::from_json(BUNDLE, &SnapSettings::default()).expect("bundle should parse");
    assert_eq!(bundle.settings.vertical_lift, 0.0);
    assert_eq!(bundle.prefabs.len(), PrefabRegistry::from_generated().len() + 1);
    assert_eq!(bundle.objects.len(), 2);
    assert_eq!(bundle.objects[1].pose, Pose::from_position(Vec3::new(-0.04, 0.04, 0.04)));
}

#[test]
fn loaded_bundle_snaps_end_to_end() {
    let mut world = WorldCore::new();
    world.load_scene_bundle_json(BUNDLE).unwrap();
    let tile = world
        .scene()
        .objects()
        .find(|o| o.name == "tile")
        .map(|o| o.id)
        .unwrap();

    let outcome = world.release(tile);
    assert!(outcome.is_snapped(), "{outcome:?}");

    // No lift: receiver rests exactly on the stud top.
    let pose = world.object_pose(tile).unwrap();
    assert!((pose.position - Vec3::new(-0.04, 0.026, 0.04)).length() < 1e-5);

    let manifest: serde_json::Value = serde_json::from_str(&world.get_content_manifest_json()).unwrap();
    assert!(manifest["prefabs"]
        .as_array()
        .unwrap()
        .iter()
        .any(|p| p["key"] == "demo:tile"));
}

#[test]
fn invalid_bundles_are_rejected() {
    let mut world = WorldCore::new();
    assert!(matches!(world.load_scene_bundle_json("not json"), Err(ContentError::Json(_))));
    assert!(matches!(
        world.load_scene_bundle_json(r#"{"formatVersion": 1, "objects": [{"prefab": "base:brick_1x1", "rotation": [0, 0, 0, 0]}]}"#),
        Err(ContentError::Invalid(_))
    ));
    assert_eq!(world.scene().object_count(), 0);
    assert_eq!(world.stats().attempts(), 0);
}
