//! RigidBody - a solid body that moves as a unit
//!
//! Bodies only carry what the assembly mechanic needs: which object they
//! simulate, where they are, and how heavy they are.

mod body;

pub use body::RigidBody;
