//! Systems: physics bookkeeping and the snap pipeline.

pub mod physics;
pub mod rigid_body;
pub mod rigid_body_system;
pub mod snap;
