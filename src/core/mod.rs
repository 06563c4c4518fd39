//! Core building blocks shared by every layer: handles, pose math, errors, logging.

pub mod error;
pub mod ids;
pub mod math;

pub mod utils {
    pub mod console_log;
}

pub use error::{ContentError, CouplingSide, SnapError};
pub use ids::{BodyId, CouplingId, ObjectId, PointId};
pub use math::{mean_point, Pose, Quat, Vec3};
