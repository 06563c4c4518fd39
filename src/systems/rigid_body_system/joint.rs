use crate::core::{BodyId, CouplingId};

/// Fixed joint between two bodies. Never removed by the snap code.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coupling {
    pub id: CouplingId,
    pub body_a: BodyId,
    pub body_b: BodyId,
    pub break_force: f32,
    pub break_torque: f32,
}

impl Coupling {
    /// Infinite thresholds: the joint survives any simulated load.
    pub fn is_unbreakable(&self) -> bool {
        self.break_force == f32::INFINITY && self.break_torque == f32::INFINITY
    }

    pub fn joins(&self, body: BodyId) -> bool {
        self.body_a == body || self.body_b == body
    }

    /// The body on the other end, if `body` is part of this joint.
    pub fn other(&self, body: BodyId) -> Option<BodyId> {
        if self.body_a == body {
            Some(self.body_b)
        } else if self.body_b == body {
            Some(self.body_a)
        } else {
            None
        }
    }
}
