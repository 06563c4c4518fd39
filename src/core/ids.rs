//! Typed handles for scene objects, attachment points, bodies and couplings.
//!
//! Ids start at 1. `0` is never issued, so the JS side can treat it as
//! "nothing was created".

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! handle {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl $name {
            /// Raw value as seen by the wasm facade.
            #[inline]
            pub fn raw(self) -> u32 {
                self.0
            }

            /// Zero-based slot in the owning arena.
            #[inline]
            pub(crate) fn slot(self) -> Option<usize> {
                (self.0 as usize).checked_sub(1)
            }

            #[inline]
            pub(crate) fn from_slot(slot: usize) -> Self {
                Self(slot as u32 + 1)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }
    };
}

handle!(
    /// A scene object (brick, plate, baseplate, sub-part).
    ObjectId,
    "object"
);
handle!(
    /// An attachment point owned by a scene object.
    PointId,
    "point"
);
handle!(
    /// A rigid body registered with the physics world.
    BodyId,
    "body"
);
handle!(
    /// A rigid coupling between two bodies.
    CouplingId,
    "coupling"
);
