//! Spatial lookup for attachment points

pub mod hash;
pub mod query;

pub use hash::SpatialHash;
pub use query::{SpatialQuery, SurfaceHit};
