use wasm_bindgen::prelude::*;

use crate::core::SnapError;
use crate::systems::snap::SnapOutcome;

use super::AttemptTiming;

/// Running counters for snap attempts in one world.
#[wasm_bindgen]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SnapStats {
    pub(super) attempts: u32,
    pub(super) idle: u32,
    pub(super) no_match: u32,
    pub(super) couplings: u32,
    pub(super) missing_body_failures: u32,
    pub(super) other_failures: u32,
    pub(super) last_candidates: u32,
    pub(super) last_ms: f64,
    pub(super) last_index_ms: f64,
}

impl SnapStats {
    pub(super) fn record(&mut self, outcome: &SnapOutcome, timing: AttemptTiming) {
        self.attempts = self.attempts.saturating_add(1);
        self.last_ms = timing.total_ms;
        self.last_index_ms = timing.index_ms;
        self.last_candidates = 0;
        match outcome {
            SnapOutcome::Idle => self.idle += 1,
            SnapOutcome::NoMatch => self.no_match += 1,
            SnapOutcome::Snapped { candidates, .. } => {
                self.couplings += 1;
                self.last_candidates = *candidates as u32;
            }
            SnapOutcome::Failed(SnapError::MissingPhysicsBody { .. }) => self.missing_body_failures += 1,
            SnapOutcome::Failed(_) => self.other_failures += 1,
        }
    }
}

#[wasm_bindgen]
impl SnapStats {
    #[wasm_bindgen(getter)]
    pub fn attempts(&self) -> u32 { self.attempts }
    #[wasm_bindgen(getter)]
    pub fn idle(&self) -> u32 { self.idle }
    #[wasm_bindgen(getter)]
    pub fn no_match(&self) -> u32 { self.no_match }
    #[wasm_bindgen(getter)]
    pub fn couplings(&self) -> u32 { self.couplings }
    #[wasm_bindgen(getter)]
    pub fn missing_body_failures(&self) -> u32 { self.missing_body_failures }
    #[wasm_bindgen(getter)]
    pub fn other_failures(&self) -> u32 { self.other_failures }
    /// Pairs used by the last successful attempt; 0 otherwise
    #[wasm_bindgen(getter)]
    pub fn last_candidates(&self) -> u32 { self.last_candidates }
    #[wasm_bindgen(getter)]
    pub fn last_ms(&self) -> f64 { self.last_ms }
    /// Part of `last_ms` spent building the spatial snapshot
    #[wasm_bindgen(getter)]
    pub fn last_index_ms(&self) -> f64 { self.last_index_ms }
}
