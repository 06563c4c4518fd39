//! Snap categories, surface tags and physical layers.
//!
//! Receivers and targets share one `SnapCategory` enum, resolved when the
//! scene is built. Discovery never compares strings at snap time.

use serde::{Deserialize, Serialize};

/// Coupler family. A receiver only pairs with targets of the same family.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapCategory {
    #[default]
    Stud,
    Axle,
    Pin,
}

impl SnapCategory {
    /// Numeric code used across the wasm boundary.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(SnapCategory::Stud),
            1 => Some(SnapCategory::Axle),
            2 => Some(SnapCategory::Pin),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            SnapCategory::Stud => 0,
            SnapCategory::Axle => 1,
            SnapCategory::Pin => 2,
        }
    }
}

/// Marker carried by every surface a spatial query can return.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SurfaceTag {
    Receiver(SnapCategory),
    Target(SnapCategory),
    /// Plain collision geometry, never a snap partner.
    Geometry,
}

impl SurfaceTag {
    /// True when this surface is a snap target a receiver of `category` may pair with.
    #[inline]
    pub fn is_target_for(self, category: SnapCategory) -> bool {
        matches!(self, SurfaceTag::Target(c) if c == category)
    }
}

/// Physical layer index (0..=31).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Layer(u8);

impl Layer {
    pub const DEFAULT: Layer = Layer(0);
    pub const SNAP_POINTS: Layer = Layer(8);

    /// `None` when `index` does not fit in a 32-bit mask.
    pub fn new(index: u8) -> Option<Self> {
        (index < 32).then_some(Layer(index))
    }

    pub fn index(self) -> u8 {
        self.0
    }
}

/// Set of layers a query is restricted to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerMask(u32);

impl LayerMask {
    pub const NONE: LayerMask = LayerMask(0);
    pub const ALL: LayerMask = LayerMask(u32::MAX);

    pub const fn from_bits(bits: u32) -> Self {
        LayerMask(bits)
    }

    pub const fn from_layer(layer: Layer) -> Self {
        LayerMask(1 << layer.0)
    }

    pub const fn with(self, layer: Layer) -> Self {
        LayerMask(self.0 | (1 << layer.0))
    }

    #[inline]
    pub fn contains(self, layer: Layer) -> bool {
        self.0 & (1 << layer.0) != 0
    }

    pub fn bits(self) -> u32 {
        self.0
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        LayerMask::from_layer(Layer::SNAP_POINTS)
    }
}
