//! Snap - attach a released part to the nearest compatible surface
//!
//! One attempt runs three stages, each usable on its own:
//! - `find_matches`: which receiver/target pairs are within reach
//! - `compute_alignment`: where the part goes
//! - `apply_snap`: move it, weld it, retire the used points
//!
//! `try_snap` chains them and reports what happened as a `SnapOutcome`.
//! Nothing here is retried; a missed attempt waits for the next release.

mod alignment;
mod coupling;
mod matcher;
pub mod types;

pub use alignment::compute_alignment;
pub use coupling::apply_snap;
pub use matcher::find_matches;
pub use types::{AlignmentTransform, MatchCandidate, MatchSet};

use crate::core::{ObjectId, SnapError};
use crate::domain::{Scene, SnapSettings};
use crate::spatial::SpatialQuery;
use crate::systems::physics::PhysicsWorld;
use crate::systems::rigid_body_system::Coupling;

/// Result of one snap attempt.
#[derive(Clone, Debug, PartialEq)]
pub enum SnapOutcome {
    /// The object has no active receivers left (or does not exist).
    Idle,
    /// Receivers were checked but nothing compatible was in reach.
    NoMatch,
    Snapped {
        coupling: Coupling,
        stationary: ObjectId,
        /// Number of receiver/target pairs that took part
        candidates: usize,
    },
    /// A match was found but could not be applied. The world is unchanged.
    Failed(SnapError),
}

impl SnapOutcome {
    pub const CODE_IDLE: u8 = 0;
    pub const CODE_NO_MATCH: u8 = 1;
    pub const CODE_SNAPPED: u8 = 2;
    pub const CODE_FAILED: u8 = 3;

    /// Stable numeric form for the JS boundary.
    pub fn code(&self) -> u8 {
        match self {
            SnapOutcome::Idle => Self::CODE_IDLE,
            SnapOutcome::NoMatch => Self::CODE_NO_MATCH,
            SnapOutcome::Snapped { .. } => Self::CODE_SNAPPED,
            SnapOutcome::Failed(_) => Self::CODE_FAILED,
        }
    }

    pub fn is_snapped(&self) -> bool {
        matches!(self, SnapOutcome::Snapped { .. })
    }

    pub fn coupling(&self) -> Option<&Coupling> {
        match self {
            SnapOutcome::Snapped { coupling, .. } => Some(coupling),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&SnapError> {
        match self {
            SnapOutcome::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// Run one full snap attempt for `movable`.
///
/// `query` must reflect the scene as it is now. Failures are reported through
/// the outcome (and logged), never panicked on.
pub fn try_snap<Q, P>(
    scene: &mut Scene,
    query: &Q,
    physics: &mut P,
    movable: ObjectId,
    settings: &SnapSettings,
) -> SnapOutcome
where
    Q: SpatialQuery + ?Sized,
    P: PhysicsWorld + ?Sized,
{
    let Some(name) = scene.object(movable).map(|o| o.name.clone()) else {
        log::debug!("snap: {movable} does not exist");
        return SnapOutcome::Idle;
    };
    if !scene.has_active_receivers(movable) {
        log::debug!("snap: '{name}' has no free receivers");
        return SnapOutcome::Idle;
    }
    log::info!("snap triggered for '{name}'");

    let Some(matches) = find_matches(scene, query, movable, settings) else {
        log::debug!("snap: nothing within {} of '{name}'", settings.snap_distance);
        return SnapOutcome::NoMatch;
    };
    let best = *matches.best();
    log::info!(
        "snap match: '{name}' -> {} ({} pair(s), closest {:.4})",
        best.stationary,
        matches.len(),
        best.distance
    );

    let alignment = compute_alignment(&matches, settings);
    match apply_snap(scene, physics, movable, &alignment, &matches, settings) {
        Ok(coupling) => {
            log::info!("snapped '{name}' to {} via {}", best.stationary, coupling.id);
            SnapOutcome::Snapped {
                coupling,
                stationary: best.stationary,
                candidates: matches.len(),
            }
        }
        Err(err) => {
            log::warn!("snap of '{name}' aborted: {err}");
            SnapOutcome::Failed(err)
        }
    }
}
