use std::sync::Arc;

use crate::core::{ContentError, ObjectId};
use crate::domain::{PrefabRegistry, Scene, SceneBundle, SnapSettings};
use crate::rigid_body_system::RigidBodySystem;

use super::commands;
use super::perf_stats::SnapStats;
use super::WorldCore;

pub(super) fn create_world_core(settings: SnapSettings) -> WorldCore {
    WorldCore {
        content: Arc::new(PrefabRegistry::from_generated()),
        scene: Scene::new(),
        rigid_bodies: RigidBodySystem::new(),
        settings,
        stats: SnapStats::default(),
    }
}

pub(super) fn load_scene_bundle_json(world: &mut WorldCore, json: &str) -> Result<(), ContentError> {
    let bundle = SceneBundle::from_json(json, &world.settings)?;

    // Build into a fresh world first so a bad object leaves the current one intact.
    let mut next = create_world_core(bundle.settings);
    next.content = Arc::new(bundle.prefabs);

    let mut ids: Vec<ObjectId> = Vec::with_capacity(bundle.objects.len());
    for (index, spec) in bundle.objects.iter().enumerate() {
        let parent = match spec.parent {
            Some(p) => Some(*ids.get(p).ok_or(ContentError::InvalidParent { index, parent: p })?),
            None => None,
        };
        let id = commands::spawn_prefab(&mut next, &spec.prefab, Some(&spec.name), parent, spec.pose, spec.body)
            .ok_or_else(|| ContentError::Invalid(format!("object {index} ('{}') could not be spawned", spec.name)))?;
        ids.push(id);
    }

    log::info!(
        "scene bundle loaded: {} prefab(s), {} object(s), {} body(ies)",
        next.content.len(),
        next.scene.object_count(),
        next.rigid_bodies.body_count()
    );
    world.content = next.content;
    world.scene = next.scene;
    world.rigid_bodies = next.rigid_bodies;
    world.settings = next.settings;
    world.stats = next.stats;
    Ok(())
}
