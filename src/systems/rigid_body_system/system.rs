use crate::core::{BodyId, CouplingId, ObjectId, Pose};
use crate::rigid_body::RigidBody;
use crate::systems::physics::PhysicsWorld;

use super::joint::Coupling;

/// Manages all rigid bodies in the simulation
pub struct RigidBodySystem {
    bodies: Vec<RigidBody>,
    couplings: Vec<Coupling>,
    next_id: u32,
    next_coupling_id: u32,
}

impl RigidBodySystem {
    pub fn new() -> Self {
        Self {
            bodies: Vec::new(),
            couplings: Vec::new(),
            next_id: 1,
            next_coupling_id: 1,
        }
    }

    /// Add a body for `object`.
    ///
    /// Returns `None` if the object already has one.
    pub fn add_body(&mut self, object: ObjectId, pose: Pose, mass: f32) -> Option<BodyId> {
        if self.body_of(object).is_some() {
            return None;
        }
        let id = BodyId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        self.bodies.push(RigidBody::new(id, object, pose, mass));
        Some(id)
    }

    /// Remove a body and every coupling attached to it.
    pub fn remove_body(&mut self, id: BodyId) -> bool {
        let Some(idx) = self.bodies.iter().position(|b| b.id == id) else {
            return false;
        };
        self.bodies.swap_remove(idx);
        self.couplings.retain(|c| !c.joins(id));
        true
    }

    pub fn clear(&mut self) {
        self.bodies.clear();
        self.couplings.clear();
        self.next_id = 1;
        self.next_coupling_id = 1;
    }

    pub fn body(&self, id: BodyId) -> Option<&RigidBody> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut RigidBody> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn couplings(&self) -> &[Coupling] {
        &self.couplings
    }

    pub fn coupling_count(&self) -> usize {
        self.couplings.len()
    }

    /// Bodies directly welded to `body`.
    pub fn coupled_to(&self, body: BodyId) -> Vec<BodyId> {
        self.couplings.iter().filter_map(|c| c.other(body)).collect()
    }
}

impl Default for RigidBodySystem {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsWorld for RigidBodySystem {
    fn body_of(&self, object: ObjectId) -> Option<BodyId> {
        self.bodies.iter().find(|b| b.object == object).map(|b| b.id)
    }

    fn set_body_pose(&mut self, body: BodyId, pose: Pose) {
        if let Some(b) = self.body_mut(body) {
            b.teleport(pose);
        }
    }

    fn create_rigid_coupling(
        &mut self,
        a: BodyId,
        b: BodyId,
        break_force: f32,
        break_torque: f32,
    ) -> Coupling {
        let coupling = Coupling {
            id: CouplingId(self.next_coupling_id),
            body_a: a,
            body_b: b,
            break_force,
            break_torque,
        };
        self.next_coupling_id = self.next_coupling_id.saturating_add(1);
        self.couplings.push(coupling);
        coupling
    }
}
