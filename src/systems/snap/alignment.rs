//! Alignment solver
//!
//! Strategy: averaged anchor with receiver-offset placement.
//!
//! - Anchor: mean world position of all matched targets, so a part landing on
//!   several studs at once is centred over all of them.
//! - Rotation: the stationary object's orientation, never a blend.
//! - Position: anchor, lifted by `vertical_lift` along +Y, then shifted by the
//!   matched receivers' mean offset so the receivers (not the part origin)
//!   land on the anchor.
//! - Model correction: a lateral shift added to the visual model's local
//!   position, equal to how far the matched receivers sit from the centre of
//!   the part's whole receiver layout. A part engaged on all its receivers
//!   gets none. The simulated body is not affected by it.

use crate::core::Vec3;
use crate::domain::SnapSettings;

use super::types::{AlignmentTransform, MatchSet};

pub fn compute_alignment(matches: &MatchSet, settings: &SnapSettings) -> AlignmentTransform {
    debug_assert!(!matches.is_empty(), "alignment needs at least one matched pair");

    let anchor = matches.anchor();
    let target_rotation = matches.best().stationary_rotation;
    let matched_receivers = matches.mean_receiver_local();
    let target_position = anchor + Vec3::Y * settings.vertical_lift + target_rotation * -matched_receivers;

    let model_correction = settings
        .model_correction
        .then(|| lateral(matched_receivers - matches.receiver_layout_centre()));

    AlignmentTransform {
        anchor,
        target_position,
        target_rotation,
        model_correction,
    }
}

fn lateral(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}
