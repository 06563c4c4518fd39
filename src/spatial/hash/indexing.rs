use crate::core::Vec3;

use super::{CellKey, SpatialHash};

impl SpatialHash {
    // === Cell addressing ===
    #[inline]
    pub(super) fn cell_of(&self, p: Vec3) -> CellKey {
        let c = (p * self.inv_cell).floor();
        (c.x as i32, c.y as i32, c.z as i32)
    }

    /// Inclusive min/max cells touched by a sphere's bounding box.
    #[inline]
    pub(super) fn cell_range(&self, center: Vec3, radius: f32) -> (CellKey, CellKey) {
        let r = Vec3::splat(radius);
        (self.cell_of(center - r), self.cell_of(center + r))
    }

    /// Number of cells in an inclusive range, saturating.
    #[inline]
    pub(super) fn range_volume(min: CellKey, max: CellKey) -> u64 {
        let span = |a: i32, b: i32| (b as i64 - a as i64 + 1).max(0) as u64;
        span(min.0, max.0)
            .saturating_mul(span(min.1, max.1))
            .saturating_mul(span(min.2, max.2))
    }
}
