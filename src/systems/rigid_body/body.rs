use crate::core::{BodyId, ObjectId, Pose};

/// Rigid Body - moves as a single unit
#[derive(Clone, Debug)]
pub struct RigidBody {
    /// Unique ID for this body
    pub id: BodyId,
    /// Scene object this body simulates
    pub object: ObjectId,
    /// World pose (center of mass)
    pub pose: Pose,
    pub mass: f32,
    /// Kinematic bodies are moved by the host (e.g. while held), not by forces
    pub kinematic: bool,
}

impl RigidBody {
    pub fn new(id: BodyId, object: ObjectId, pose: Pose, mass: f32) -> Self {
        Self {
            id,
            object,
            pose,
            mass: if mass.is_finite() && mass > 0.0 { mass } else { 1.0 },
            kinematic: false,
        }
    }

    pub fn teleport(&mut self, pose: Pose) {
        self.pose = pose;
    }
}
