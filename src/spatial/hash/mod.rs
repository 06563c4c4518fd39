//! SpatialHash - uniform grid over attachment point positions
//!
//! Built from a scene snapshot. Only active points go in, so a retired point
//! can never come back out of a query.

use std::collections::HashMap;

use crate::core::Vec3;
use crate::domain::{Layer, LayerMask, Scene};

use super::query::{SpatialQuery, SurfaceHit};

mod indexing;

const MIN_CELL_SIZE: f32 = 1e-4;

pub(crate) type CellKey = (i32, i32, i32);

#[derive(Clone, Copy, Debug)]
struct Entry {
    hit: SurfaceHit,
    layer: Layer,
}

#[derive(Clone, Debug)]
pub struct SpatialHash {
    cell_size: f32,
    inv_cell: f32,
    cells: HashMap<CellKey, Vec<u32>>,
    entries: Vec<Entry>,
}

impl SpatialHash {
    pub fn new(cell_size: f32) -> Self {
        let cell_size = if cell_size.is_finite() {
            cell_size.max(MIN_CELL_SIZE)
        } else {
            crate::domain::settings::DEFAULT_INDEX_CELL_SIZE
        };
        Self {
            cell_size,
            inv_cell: 1.0 / cell_size,
            cells: HashMap::new(),
            entries: Vec::new(),
        }
    }

    /// Snapshot every active attachment point of `scene`.
    pub fn from_scene(scene: &Scene, cell_size: f32) -> Self {
        let mut index = Self::new(cell_size);
        for point in scene.points().filter(|p| p.is_active()) {
            let Some(pose) = scene.point_world_pose(point.id) else {
                continue;
            };
            index.insert(
                SurfaceHit {
                    point: point.id,
                    owner: point.parent,
                    tag: point.tag(),
                    position: pose.position,
                },
                point.layer,
            );
        }
        index
    }

    pub fn insert(&mut self, hit: SurfaceHit, layer: Layer) {
        let key = self.cell_of(hit.position);
        let idx = self.entries.len() as u32;
        self.entries.push(Entry { hit, layer });
        self.cells.entry(key).or_default().push(idx);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn clear(&mut self) {
        self.cells.clear();
        self.entries.clear();
    }

    #[inline]
    fn accepts(entry: &Entry, center: Vec3, r2: f32, mask: LayerMask) -> bool {
        mask.contains(entry.layer) && entry.hit.position.distance_squared(center) <= r2
    }
}

impl SpatialQuery for SpatialHash {
    fn overlap_sphere(&self, center: Vec3, radius: f32, mask: LayerMask) -> Vec<SurfaceHit> {
        if !(radius >= 0.0) || !center.is_finite() || self.entries.is_empty() {
            return Vec::new();
        }
        let r2 = radius * radius;
        let (min, max) = self.cell_range(center, radius);

        // Huge radius: walking cells costs more than a flat scan.
        if Self::range_volume(min, max) > self.entries.len() as u64 {
            return self
                .entries
                .iter()
                .filter(|e| Self::accepts(e, center, r2, mask))
                .map(|e| e.hit)
                .collect();
        }

        let mut found: Vec<u32> = Vec::new();
        for x in min.0..=max.0 {
            for y in min.1..=max.1 {
                for z in min.2..=max.2 {
                    let Some(bucket) = self.cells.get(&(x, y, z)) else {
                        continue;
                    };
                    found.extend(
                        bucket
                            .iter()
                            .copied()
                            .filter(|&i| Self::accepts(&self.entries[i as usize], center, r2, mask)),
                    );
                }
            }
        }
        // Insertion order, independent of cell walk order.
        found.sort_unstable();
        found
            .into_iter()
            .map(|i| self.entries[i as usize].hit)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ObjectId, PointId, Pose};
    use crate::domain::{PointRole, SnapCategory, SurfaceTag};

    fn hit(id: u32, position: Vec3) -> SurfaceHit {
        SurfaceHit {
            point: PointId(id),
            owner: ObjectId(1),
            tag: SurfaceTag::Target(SnapCategory::Stud),
            position,
        }
    }

    #[test]
    fn radius_is_inclusive_and_exact() {
        let mut index = SpatialHash::new(0.1);
        index.insert(hit(1, Vec3::new(0.03, 0.0, 0.0)), Layer::SNAP_POINTS);
        index.insert(hit(2, Vec3::new(0.10, 0.0, 0.0)), Layer::SNAP_POINTS);

        let found = index.overlap_sphere(Vec3::ZERO, 0.05, LayerMask::ALL);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].point, PointId(1));
    }

    #[test]
    fn layer_mask_filters_hits() {
        let mut index = SpatialHash::new(0.1);
        index.insert(hit(1, Vec3::ZERO), Layer::DEFAULT);
        index.insert(hit(2, Vec3::ZERO), Layer::SNAP_POINTS);

        let found = index.overlap_sphere(Vec3::ZERO, 0.01, LayerMask::from_layer(Layer::SNAP_POINTS));
        assert_eq!(found.iter().map(|h| h.point).collect::<Vec<_>>(), vec![PointId(2)]);
        assert!(index.overlap_sphere(Vec3::ZERO, 0.01, LayerMask::NONE).is_empty());
    }

    #[test]
    fn results_keep_insertion_order_across_cells() {
        let mut index = SpatialHash::new(0.01);
        index.insert(hit(1, Vec3::new(0.015, 0.0, 0.0)), Layer::SNAP_POINTS);
        index.insert(hit(2, Vec3::new(-0.015, 0.0, 0.0)), Layer::SNAP_POINTS);
        index.insert(hit(3, Vec3::new(0.0, 0.0, 0.001)), Layer::SNAP_POINTS);

        let ids: Vec<_> = index
            .overlap_sphere(Vec3::ZERO, 0.02, LayerMask::ALL)
            .into_iter()
            .map(|h| h.point.raw())
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn large_radius_falls_back_to_flat_scan() {
        let mut index = SpatialHash::new(0.001);
        index.insert(hit(1, Vec3::new(5.0, 0.0, 0.0)), Layer::SNAP_POINTS);
        assert_eq!(index.overlap_sphere(Vec3::ZERO, 10.0, LayerMask::ALL).len(), 1);
        assert!(index.overlap_sphere(Vec3::ZERO, f32::NAN, LayerMask::ALL).is_empty());
    }

    #[test]
    fn snapshot_skips_retired_points() {
        let mut scene = Scene::new();
        let brick = scene.add_object("brick", None, Pose::IDENTITY).unwrap();
        let a = scene
            .add_point(brick, PointRole::Target, SnapCategory::Stud, Layer::SNAP_POINTS, Pose::IDENTITY, "a")
            .unwrap();
        let b = scene
            .add_point(brick, PointRole::Target, SnapCategory::Stud, Layer::SNAP_POINTS, Pose::IDENTITY, "b")
            .unwrap();
        scene.retire(a).unwrap();

        let index = SpatialHash::from_scene(&scene, 0.1);
        assert_eq!(index.len(), 1);
        let found = index.overlap_sphere(Vec3::ZERO, 0.01, LayerMask::ALL);
        assert_eq!(found[0].point, b);
        assert_eq!(found[0].owner, brick);
    }
}
