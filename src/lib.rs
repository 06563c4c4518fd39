//! Brickworks Engine - snap-together assembly for interlocking bricks in WASM
//!
//! When a held part is released, its receivers look for compatible targets
//! nearby; if any are in reach the part is aligned onto them and welded to
//! the part underneath.
//!
//! Architecture:
//! - core/        - math, ids, errors, logging
//! - domain/      - scene model, settings, prefab content
//! - spatial/     - "what is near this point" queries
//! - systems/     - rigid bodies and the snap pipeline
//! - simulation/  - world orchestration and the JS facade

pub mod core;
pub mod domain;
pub mod simulation;
pub mod spatial;
pub mod systems;

// Compatibility re-exports (short paths for the common systems)
pub use systems::physics;
pub use systems::rigid_body;
pub use systems::rigid_body_system;
pub use systems::snap;

use wasm_bindgen::prelude::*;

// Re-export wasm-bindgen-rayon for thread pool initialization
#[cfg(feature = "parallel")]
pub use wasm_bindgen_rayon::init_thread_pool;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    crate::core::utils::console_log::init_console_logger(log::LevelFilter::Info);
    log::info!("Brickworks engine {} initialized", env!("CARGO_PKG_VERSION"));
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use simulation::{SnapStats, World, WorldCore};
pub use systems::snap::SnapOutcome;
