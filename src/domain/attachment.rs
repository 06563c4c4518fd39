use crate::core::{ObjectId, PointId, Pose};

use super::category::{Layer, SnapCategory, SurfaceTag};

/// Which side of a snap a point plays
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointRole {
    /// Lives on the moving object and searches for partners.
    Receiver,
    /// Lives on any other object and waits to be found.
    Target,
}

/// A labeled pose anchored to a parent object.
///
/// The pose is stored relative to the parent, so the point always follows it.
/// `active` starts `true` and can only go to `false`, once.
#[derive(Clone, Debug)]
pub struct AttachmentPoint {
    pub id: PointId,
    pub parent: ObjectId,
    pub role: PointRole,
    pub category: SnapCategory,
    pub layer: Layer,
    /// Offset and orientation relative to `parent`
    pub local: Pose,
    pub label: String,
    active: bool,
}

impl AttachmentPoint {
    pub fn new(
        id: PointId,
        parent: ObjectId,
        role: PointRole,
        category: SnapCategory,
        layer: Layer,
        local: Pose,
        label: String,
    ) -> Self {
        Self {
            id,
            parent,
            role,
            category,
            layer,
            local,
            label,
            active: true,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Marker a spatial query reports for this point.
    pub fn tag(&self) -> SurfaceTag {
        match self.role {
            PointRole::Receiver => SurfaceTag::Receiver(self.category),
            PointRole::Target => SurfaceTag::Target(self.category),
        }
    }

    /// Deactivate. Returns `false` if the point was already retired.
    pub(crate) fn retire(&mut self) -> bool {
        std::mem::replace(&mut self.active, false)
    }
}
