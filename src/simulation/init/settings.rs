use crate::domain::LayerMask;

use super::WorldCore;

pub(super) fn set_snap_distance(world: &mut WorldCore, distance: f32) -> bool {
    if !(distance.is_finite() && distance > 0.0) {
        return false;
    }
    world.settings.snap_distance = distance;
    true
}

pub(super) fn set_vertical_lift(world: &mut WorldCore, lift: f32) -> bool {
    if !lift.is_finite() {
        return false;
    }
    world.settings.vertical_lift = lift;
    true
}

pub(super) fn set_target_layers(world: &mut WorldCore, bits: u32) {
    world.settings.target_layers = LayerMask::from_bits(bits);
}

pub(super) fn set_model_correction(world: &mut WorldCore, enabled: bool) {
    world.settings.model_correction = enabled;
}

/// NaN or non-positive thresholds are rejected; infinity is a permanent weld.
pub(super) fn set_break_thresholds(world: &mut WorldCore, force: f32, torque: f32) -> bool {
    if !(force > 0.0 && torque > 0.0) {
        return false;
    }
    world.settings.break_force = force;
    world.settings.break_torque = torque;
    true
}
