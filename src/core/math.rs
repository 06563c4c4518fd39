//! Pose math on top of glam.
//!
//! A `Pose` is a rigid transform (no scale). Bricks are never scaled by the
//! snap code, so keeping scale out of the type keeps composition exact.

pub use glam::{Quat, Vec3};

use serde::{Deserialize, Serialize};

/// Position + orientation
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Pose {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }

    /// Local point -> world point
    #[inline]
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.position + self.rotation * local
    }

    /// World point -> local point
    #[inline]
    pub fn inverse_transform_point(&self, world: Vec3) -> Vec3 {
        self.rotation.inverse() * (world - self.position)
    }

    /// `self * child`: places a pose given in this pose's frame into the outer frame.
    pub fn compose(&self, child: &Pose) -> Pose {
        Pose {
            position: self.transform_point(child.position),
            rotation: (self.rotation * child.rotation).normalize(),
        }
    }

    pub fn inverse(&self) -> Pose {
        let rotation = self.rotation.inverse();
        Pose {
            position: rotation * -self.position,
            rotation,
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Arithmetic mean of a set of points. `None` for an empty set.
pub fn mean_point<I>(points: I) -> Option<Vec3>
where
    I: IntoIterator<Item = Vec3>,
{
    let mut sum = Vec3::ZERO;
    let mut n = 0u32;
    for p in points {
        sum += p;
        n += 1;
    }
    (n > 0).then(|| sum / n as f32)
}
