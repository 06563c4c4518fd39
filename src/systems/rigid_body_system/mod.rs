//! RigidBodySystem - bodies and the fixed joints welding them together
//!
//! Bodies are keyed by `BodyId` and remember the scene object they simulate,
//! which is how the snap core finds "the body of this object". Couplings are
//! append-only: assembly never unsnaps.

mod joint;
mod system;

pub use joint::Coupling;
pub use system::RigidBodySystem;
