//! Physics world port
//!
//! The snap core never touches a physics engine directly. It asks for three
//! capabilities: find an object's body, move a body, and weld two bodies.
//! `RigidBodySystem` implements this for the sandbox; tests use fakes.

use crate::core::{BodyId, ObjectId, Pose};

use super::rigid_body_system::Coupling;

pub trait PhysicsWorld {
    /// Rigid body attached to `object`, if it has one.
    fn body_of(&self, object: ObjectId) -> Option<BodyId>;

    /// Teleport a body to `pose`.
    fn set_body_pose(&mut self, body: BodyId, pose: Pose);

    /// Create a fixed joint between two bodies. The joint only separates if a
    /// force/torque above the thresholds is applied; pass `f32::INFINITY` for
    /// a permanent weld.
    fn create_rigid_coupling(
        &mut self,
        a: BodyId,
        b: BodyId,
        break_force: f32,
        break_torque: f32,
    ) -> Coupling;
}
