use super::category::LayerMask;

/// Tolerance radius around each receiver (world units).
pub const DEFAULT_SNAP_DISTANCE: f32 = 0.05;
/// Upward nudge applied at coupling time so the bodies start just apart.
pub const DEFAULT_VERTICAL_LIFT: f32 = 0.01;
/// Cell edge of the spatial hash built for each attempt.
pub const DEFAULT_INDEX_CELL_SIZE: f32 = 0.1;

/// Tunables for one world's snap mechanic.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapSettings {
    pub snap_distance: f32,
    pub vertical_lift: f32,
    /// Layers searched for targets
    pub target_layers: LayerMask,
    /// Coupling break thresholds. Infinite means the joint never separates.
    pub break_force: f32,
    pub break_torque: f32,
    /// Apply the cosmetic model offset computed by the alignment step
    pub model_correction: bool,
    pub index_cell_size: f32,
}

impl Default for SnapSettings {
    fn default() -> Self {
        Self {
            snap_distance: DEFAULT_SNAP_DISTANCE,
            vertical_lift: DEFAULT_VERTICAL_LIFT,
            target_layers: LayerMask::default(),
            break_force: f32::INFINITY,
            break_torque: f32::INFINITY,
            model_correction: true,
            index_cell_size: DEFAULT_INDEX_CELL_SIZE,
        }
    }
}
