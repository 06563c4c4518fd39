use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::{ContentError, Pose, Quat, Vec3};

use super::category::{Layer, LayerMask, SnapCategory};
use super::settings::SnapSettings;

/// Distance between neighbouring studs
pub const STUD_PITCH: f32 = 0.08;
pub const BRICK_HEIGHT: f32 = 0.096;
pub const PLATE_HEIGHT: f32 = 0.032;

const BUNDLE_FORMAT_VERSION: u32 = 1;

/// One attachment point in a prefab layout, relative to the prefab origin.
#[derive(Clone, Debug, PartialEq)]
pub struct PointSpec {
    pub local: Pose,
    pub category: SnapCategory,
    pub layer: Layer,
    pub label: String,
}

/// Fixed attachment layout for a kind of part.
#[derive(Clone, Debug, PartialEq)]
pub struct Prefab {
    pub key: String,
    pub name: String,
    pub mass: f32,
    pub model_offset: Vec3,
    pub receivers: Vec<PointSpec>,
    pub targets: Vec<PointSpec>,
}

#[derive(Clone, Debug)]
pub struct PrefabRegistry {
    prefabs: Vec<Prefab>,
    key_to_index: HashMap<String, usize>,
}

impl PrefabRegistry {
    pub fn empty() -> Self {
        Self {
            prefabs: Vec::new(),
            key_to_index: HashMap::new(),
        }
    }

    /// Built-in parts: a few bricks, a plate and a baseplate.
    pub fn from_generated() -> Self {
        let mut registry = Self::empty();
        registry.insert(studded("base:brick_1x1", "Brick 1x1", 1, 1, BRICK_HEIGHT, true));
        registry.insert(studded("base:brick_2x2", "Brick 2x2", 2, 2, BRICK_HEIGHT, true));
        registry.insert(studded("base:brick_2x4", "Brick 2x4", 2, 4, BRICK_HEIGHT, true));
        registry.insert(studded("base:plate_2x2", "Plate 2x2", 2, 2, PLATE_HEIGHT, true));
        registry.insert(studded("base:baseplate_8x8", "Baseplate 8x8", 8, 8, PLATE_HEIGHT, false));
        registry
    }

    /// Add a prefab, replacing any existing one with the same key.
    pub fn insert(&mut self, prefab: Prefab) {
        match self.key_to_index.get(&prefab.key) {
            Some(&idx) => self.prefabs[idx] = prefab,
            None => {
                self.key_to_index.insert(prefab.key.clone(), self.prefabs.len());
                self.prefabs.push(prefab);
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Prefab> {
        self.key_to_index.get(key).map(|&idx| &self.prefabs[idx])
    }

    pub fn len(&self) -> usize {
        self.prefabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefabs.is_empty()
    }

    pub fn manifest_json(&self) -> String {
        let out = PrefabManifest {
            format_version: BUNDLE_FORMAT_VERSION,
            prefabs: self
                .prefabs
                .iter()
                .map(|p| PrefabManifestEntry {
                    key: &p.key,
                    name: &p.name,
                    receivers: p.receivers.len(),
                    targets: p.targets.len(),
                })
                .collect(),
        };
        serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
    }
}

impl Default for PrefabRegistry {
    fn default() -> Self {
        Self::from_generated()
    }
}

/// Rectangular stud grid: targets on top, optional receivers underneath.
fn studded(key: &str, name: &str, cols: u32, rows: u32, height: f32, receivers: bool) -> Prefab {
    let mut top = Vec::with_capacity((cols * rows) as usize);
    let mut bottom = Vec::new();
    for c in 0..cols {
        for r in 0..rows {
            let x = (c as f32 - (cols - 1) as f32 * 0.5) * STUD_PITCH;
            let z = (r as f32 - (rows - 1) as f32 * 0.5) * STUD_PITCH;
            top.push(PointSpec {
                local: Pose::from_position(Vec3::new(x, height * 0.5, z)),
                category: SnapCategory::Stud,
                layer: Layer::SNAP_POINTS,
                label: format!("SnapPoint_{}_{}", c, r),
            });
            if receivers {
                bottom.push(PointSpec {
                    local: Pose::from_position(Vec3::new(x, -height * 0.5, z)),
                    category: SnapCategory::Stud,
                    layer: Layer::DEFAULT,
                    label: format!("SnapReceiver_{}_{}", c, r),
                });
            }
        }
    }
    Prefab {
        key: key.to_string(),
        name: name.to_string(),
        mass: 0.25 * (cols * rows) as f32 * (height / BRICK_HEIGHT),
        model_offset: Vec3::ZERO,
        receivers: bottom,
        targets: top,
    }
}

/// An object to instantiate from a prefab.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectSpec {
    pub name: String,
    pub prefab: String,
    pub pose: Pose,
    /// Index of an earlier entry in the same bundle
    pub parent: Option<usize>,
    /// Give the object a rigid body
    pub body: bool,
}

/// Parsed scene bundle: settings, prefab layouts and initial objects.
#[derive(Clone, Debug)]
pub struct SceneBundle {
    pub settings: SnapSettings,
    pub prefabs: PrefabRegistry,
    pub objects: Vec<ObjectSpec>,
}

impl SceneBundle {
    /// Parse a bundle. Missing settings fall back to `base`, and bundle
    /// prefabs are layered over the built-in ones.
    pub fn from_json(json: &str, base: &SnapSettings) -> Result<Self, ContentError> {
        let root: BundleRoot = serde_json::from_str(json)?;
        Self::from_bundle(root, base)
    }

    fn from_bundle(root: BundleRoot, base: &SnapSettings) -> Result<Self, ContentError> {
        if root.format_version != BUNDLE_FORMAT_VERSION {
            return Err(ContentError::Invalid(format!(
                "unsupported formatVersion {} (expected {})",
                root.format_version, BUNDLE_FORMAT_VERSION
            )));
        }

        let settings = match root.settings {
            Some(s) => s.apply(base)?,
            None => *base,
        };

        let mut prefabs = PrefabRegistry::from_generated();
        for p in root.prefabs {
            prefabs.insert(p.into_prefab()?);
        }

        let mut objects = Vec::with_capacity(root.objects.len());
        for (index, o) in root.objects.into_iter().enumerate() {
            if prefabs.get(&o.prefab).is_none() {
                return Err(ContentError::UnknownPrefab(o.prefab));
            }
            if let Some(parent) = o.parent {
                if parent >= index {
                    return Err(ContentError::InvalidParent { index, parent });
                }
            }
            let rotation = rotation_from(o.rotation)?;
            objects.push(ObjectSpec {
                name: o.name.unwrap_or_else(|| format!("{}#{}", o.prefab, index)),
                prefab: o.prefab,
                pose: Pose::new(Vec3::from_array(o.position), rotation),
                parent: o.parent,
                body: o.body,
            });
        }

        Ok(Self {
            settings,
            prefabs,
            objects,
        })
    }
}

fn rotation_from(raw: Option<[f32; 4]>) -> Result<Quat, ContentError> {
    let Some(q) = raw else {
        return Ok(Quat::IDENTITY);
    };
    let q = Quat::from_array(q);
    let len = q.length();
    if !len.is_finite() || len < 1e-6 {
        return Err(ContentError::Invalid(format!("degenerate rotation {:?}", q)));
    }
    Ok(q / len)
}

fn layer_from(raw: Option<u8>, fallback: Layer) -> Result<Layer, ContentError> {
    match raw {
        None => Ok(fallback),
        Some(i) => Layer::new(i).ok_or_else(|| ContentError::Invalid(format!("layer {} out of range", i))),
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PrefabManifest<'a> {
    format_version: u32,
    prefabs: Vec<PrefabManifestEntry<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PrefabManifestEntry<'a> {
    key: &'a str,
    name: &'a str,
    receivers: usize,
    targets: usize,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BundleRoot {
    format_version: u32,
    #[serde(default)]
    settings: Option<BundleSettings>,
    #[serde(default)]
    prefabs: Vec<BundlePrefab>,
    #[serde(default)]
    objects: Vec<BundleObject>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BundleSettings {
    #[serde(default)]
    snap_distance: Option<f32>,
    #[serde(default)]
    vertical_lift: Option<f32>,
    #[serde(default)]
    target_layers: Option<Vec<u8>>,
    /// Omitted or null means unbreakable
    #[serde(default)]
    break_force: Option<f32>,
    #[serde(default)]
    break_torque: Option<f32>,
    #[serde(default)]
    model_correction: Option<bool>,
    #[serde(default)]
    index_cell_size: Option<f32>,
}

impl BundleSettings {
    fn apply(self, base: &SnapSettings) -> Result<SnapSettings, ContentError> {
        let mut out = *base;
        if let Some(d) = self.snap_distance {
            if !(d.is_finite() && d > 0.0) {
                return Err(ContentError::Invalid(format!("snapDistance must be > 0, got {}", d)));
            }
            out.snap_distance = d;
        }
        if let Some(lift) = self.vertical_lift {
            if !lift.is_finite() {
                return Err(ContentError::Invalid("verticalLift must be finite".to_string()));
            }
            out.vertical_lift = lift;
        }
        if let Some(layers) = self.target_layers {
            let mut mask = LayerMask::NONE;
            for l in layers {
                mask = mask.with(layer_from(Some(l), Layer::DEFAULT)?);
            }
            out.target_layers = mask;
        }
        out.break_force = self.break_force.unwrap_or(f32::INFINITY);
        out.break_torque = self.break_torque.unwrap_or(f32::INFINITY);
        if let Some(enabled) = self.model_correction {
            out.model_correction = enabled;
        }
        if let Some(cell) = self.index_cell_size {
            if !(cell.is_finite() && cell > 0.0) {
                return Err(ContentError::Invalid(format!("indexCellSize must be > 0, got {}", cell)));
            }
            out.index_cell_size = cell;
        }
        Ok(out)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BundlePrefab {
    key: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default = "default_mass")]
    mass: f32,
    #[serde(default)]
    model_offset: [f32; 3],
    #[serde(default)]
    receivers: Vec<BundlePoint>,
    #[serde(default)]
    targets: Vec<BundlePoint>,
}

impl BundlePrefab {
    fn into_prefab(self) -> Result<Prefab, ContentError> {
        if self.key.is_empty() {
            return Err(ContentError::Invalid("prefab key must not be empty".to_string()));
        }
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(ContentError::Invalid(format!("prefab {}: mass must be > 0", self.key)));
        }
        let receivers = self
            .receivers
            .into_iter()
            .enumerate()
            .map(|(i, p)| p.into_spec(Layer::DEFAULT, || format!("SnapReceiver_{}", i)))
            .collect::<Result<Vec<_>, _>>()?;
        let targets = self
            .targets
            .into_iter()
            .enumerate()
            .map(|(i, p)| p.into_spec(Layer::SNAP_POINTS, || format!("SnapPoint_{}", i)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Prefab {
            name: self.name.unwrap_or_else(|| self.key.clone()),
            key: self.key,
            mass: self.mass,
            model_offset: Vec3::from_array(self.model_offset),
            receivers,
            targets,
        })
    }
}

fn default_mass() -> f32 {
    1.0
}

fn default_true() -> bool {
    true
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BundlePoint {
    offset: [f32; 3],
    #[serde(default)]
    rotation: Option<[f32; 4]>,
    #[serde(default)]
    category: SnapCategory,
    #[serde(default)]
    layer: Option<u8>,
    #[serde(default)]
    label: Option<String>,
}

impl BundlePoint {
    fn into_spec(
        self,
        default_layer: Layer,
        default_label: impl FnOnce() -> String,
    ) -> Result<PointSpec, ContentError> {
        Ok(PointSpec {
            local: Pose::new(Vec3::from_array(self.offset), rotation_from(self.rotation)?),
            category: self.category,
            layer: layer_from(self.layer, default_layer)?,
            label: self.label.unwrap_or_else(default_label),
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BundleObject {
    #[serde(default)]
    name: Option<String>,
    prefab: String,
    #[serde(default)]
    position: [f32; 3],
    #[serde(default)]
    rotation: Option<[f32; 4]>,
    #[serde(default)]
    parent: Option<usize>,
    #[serde(default = "default_true")]
    body: bool,
}
