//! Scene - arena of objects and their attachment points
//!
//! Objects form a forest through `parent`. A parent must exist before its
//! child is added and never changes afterwards, so the hierarchy cannot
//! contain cycles.

use crate::core::{ObjectId, PointId, Pose, SnapError, Vec3};

use super::attachment::{AttachmentPoint, PointRole};
use super::category::{Layer, SnapCategory};
use super::object::SceneObject;

#[derive(Clone, Debug, Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
    points: Vec<AttachmentPoint>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_object(
        &mut self,
        name: impl Into<String>,
        parent: Option<ObjectId>,
        local_pose: Pose,
    ) -> Result<ObjectId, SnapError> {
        if let Some(p) = parent {
            if self.object(p).is_none() {
                return Err(SnapError::UnknownObject(p));
            }
        }
        let id = ObjectId::from_slot(self.objects.len());
        self.objects.push(SceneObject::new(id, name.into(), parent, local_pose));
        Ok(id)
    }

    pub fn add_point(
        &mut self,
        parent: ObjectId,
        role: PointRole,
        category: SnapCategory,
        layer: Layer,
        local: Pose,
        label: impl Into<String>,
    ) -> Result<PointId, SnapError> {
        let id = PointId::from_slot(self.points.len());
        let owner = self.object_mut(parent).ok_or(SnapError::UnknownObject(parent))?;
        match role {
            PointRole::Receiver => owner.receivers.push(id),
            PointRole::Target => owner.targets.push(id),
        }
        self.points.push(AttachmentPoint::new(
            id,
            parent,
            role,
            category,
            layer,
            local,
            label.into(),
        ));
        Ok(id)
    }

    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id.slot()?)
    }

    fn object_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.get_mut(id.slot()?)
    }

    pub fn objects(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter()
    }

    pub fn point(&self, id: PointId) -> Option<&AttachmentPoint> {
        self.points.get(id.slot()?)
    }

    pub fn points(&self) -> impl Iterator<Item = &AttachmentPoint> {
        self.points.iter()
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn active_point_count(&self) -> usize {
        self.points.iter().filter(|p| p.is_active()).count()
    }

    /// World pose of an object, composed down from its root.
    pub fn world_pose(&self, id: ObjectId) -> Option<Pose> {
        let mut chain = Vec::new();
        let mut cursor = Some(id);
        while let Some(cur) = cursor {
            let obj = self.object(cur)?;
            chain.push(obj.local_pose);
            cursor = obj.parent;
        }
        Some(
            chain
                .iter()
                .rev()
                .fold(Pose::IDENTITY, |acc, local| acc.compose(local)),
        )
    }

    /// Topmost ancestor (the object itself when it has no parent).
    pub fn root_of(&self, id: ObjectId) -> Option<ObjectId> {
        let mut cur = self.object(id)?;
        while let Some(p) = cur.parent {
            cur = self.object(p)?;
        }
        Some(cur.id)
    }

    pub fn point_world_pose(&self, id: PointId) -> Option<Pose> {
        let point = self.point(id)?;
        Some(self.world_pose(point.parent)?.compose(&point.local))
    }

    /// Place an object at a world pose, converting through its parent's frame.
    pub fn set_world_pose(&mut self, id: ObjectId, pose: Pose) -> Result<(), SnapError> {
        let parent = self.object(id).ok_or(SnapError::UnknownObject(id))?.parent;
        let local = match parent {
            Some(p) => {
                let parent_world = self.world_pose(p).ok_or(SnapError::UnknownObject(p))?;
                parent_world.inverse().compose(&pose)
            }
            None => pose,
        };
        if let Some(obj) = self.object_mut(id) {
            obj.local_pose = local;
        }
        Ok(())
    }

    pub fn set_model_offset(&mut self, id: ObjectId, offset: Vec3) -> Result<(), SnapError> {
        let obj = self.object_mut(id).ok_or(SnapError::UnknownObject(id))?;
        obj.model_offset = offset;
        Ok(())
    }

    pub fn set_held(&mut self, id: ObjectId, held: bool) -> Result<(), SnapError> {
        let obj = self.object_mut(id).ok_or(SnapError::UnknownObject(id))?;
        obj.held = held;
        Ok(())
    }

    /// Active receivers of an object, in declaration order. Empty for unknown ids.
    pub fn active_receivers(&self, id: ObjectId) -> impl Iterator<Item = &AttachmentPoint> + '_ {
        self.object(id)
            .map(|o| o.receivers.as_slice())
            .unwrap_or(&[])
            .iter()
            .filter_map(|pid| self.point(*pid))
            .filter(|p| p.is_active())
    }

    pub fn has_active_receivers(&self, id: ObjectId) -> bool {
        self.active_receivers(id).next().is_some()
    }

    /// Permanently deactivate a point. `Ok(false)` if it was already retired.
    pub(crate) fn retire(&mut self, id: PointId) -> Result<bool, SnapError> {
        let point = id
            .slot()
            .and_then(|slot| self.points.get_mut(slot))
            .ok_or(SnapError::UnknownPoint(id))?;
        Ok(point.retire())
    }

    pub fn clear(&mut self) {
        self.objects.clear();
        self.points.clear();
    }
}
