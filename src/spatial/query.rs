//! Spatial query port
//!
//! The snap matcher only needs "what is within `radius` of this point, on
//! these layers". Broad-phase details stay behind this trait.

use crate::core::{ObjectId, PointId, Vec3};
use crate::domain::{LayerMask, SurfaceTag};

/// One surface found by an overlap query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceHit {
    pub point: PointId,
    /// Object the surface belongs to
    pub owner: ObjectId,
    pub tag: SurfaceTag,
    pub position: Vec3,
}

pub trait SpatialQuery: Send + Sync {
    /// All surfaces on `mask` layers within `radius` of `center` (inclusive).
    ///
    /// Results are ordered by insertion, so callers that pick "first minimum"
    /// get the same answer every time for the same snapshot.
    fn overlap_sphere(&self, center: Vec3, radius: f32, mask: LayerMask) -> Vec<SurfaceHit>;
}
