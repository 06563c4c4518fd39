//! Error types for the snap engine

use std::fmt;

use super::ids::{ObjectId, PointId};

/// Which side of a coupling an object plays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CouplingSide {
    /// The released object that carries the receivers.
    Movable,
    /// The object the movable one attaches to (topmost ancestor of the best target).
    Stationary,
}

impl fmt::Display for CouplingSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CouplingSide::Movable => f.write_str("movable"),
            CouplingSide::Stationary => f.write_str("stationary"),
        }
    }
}

/// Snap attempt failures.
///
/// "No match" is not here: it is a normal outcome, see `SnapOutcome::NoMatch`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SnapError {
    /// One of the two objects has no rigid body, so nothing can be coupled.
    /// Recoverable: no state was touched.
    #[error("{side} object {object} has no physics body")]
    MissingPhysicsBody { object: ObjectId, side: CouplingSide },

    #[error("unknown object: {0}")]
    UnknownObject(ObjectId),

    #[error("unknown attachment point: {0}")]
    UnknownPoint(PointId),
}

/// Scene bundle / prefab configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("scene bundle is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown prefab: {0}")]
    UnknownPrefab(String),

    /// `objects[index].parent` does not point at an earlier object.
    #[error("object {index} has invalid parent index {parent}")]
    InvalidParent { index: usize, parent: usize },

    #[error("invalid scene bundle: {0}")]
    Invalid(String),
}
