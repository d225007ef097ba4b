//! Overlap resolution along a single slide axis
//!
//! Both horizontal axes use the same resolver. The caller picks the
//! coordinate and extent for the active axis off each block and passes
//! them in; nothing here knows about X or Z beyond the [`Axis`] tag.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Horizontal slide axis of an in-flight block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Z,
}

impl Axis {
    /// Axis assigned to the block stacked on a tower of `tower_len` blocks.
    ///
    /// Strict X/Z alternation: odd lengths slide along X, even along Z.
    pub fn for_tower_len(tower_len: usize) -> Self {
        if tower_len.is_multiple_of(2) { Axis::Z } else { Axis::X }
    }

    /// Component of `v` along this axis
    #[inline]
    pub fn get(self, v: Vec3) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Z => v.z,
        }
    }

    /// Copy of `v` with this axis' component replaced
    #[inline]
    pub fn with(self, mut v: Vec3, value: f32) -> Vec3 {
        match self {
            Axis::X => v.x = value,
            Axis::Z => v.z = value,
        }
        v
    }
}

/// A center + extent pair along one axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub center: f32,
    pub extent: f32,
}

impl Span {
    pub fn new(center: f32, extent: f32) -> Self {
        Self { center, extent }
    }
}

/// The part of the moving block that stays on the tower
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    /// Surviving block along the axis
    pub kept: Span,
    /// Clipped-off overhang along the axis (extent may be ~0 on a perfect drop)
    pub overhang: Span,
    /// Moving center minus reference center
    pub offset: f32,
}

impl Clip {
    /// Whether the overhang is big enough to become a falling fragment
    pub fn sheds_fragment(&self, epsilon: f32) -> bool {
        self.offset.abs() > epsilon
    }
}

/// Result of dropping a moving block onto a reference block
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Overlap {
    /// Overlap was zero or negative; the block missed the tower
    Miss { overlap: f32 },
    Hit(Clip),
}

impl Overlap {
    /// Signed overlap length (negative when the blocks are apart)
    pub fn overlap(&self) -> f32 {
        match self {
            Overlap::Miss { overlap } => *overlap,
            Overlap::Hit(clip) => clip.kept.extent,
        }
    }
}

/// Resolve the overlap of `moving` against `reference` along one axis.
///
/// The moving block has the same extent as the reference (it was sized from
/// it), so only the reference extent enters the overlap length. Exactly zero
/// overlap counts as a miss.
pub fn resolve_overlap(reference: Span, moving_center: f32) -> Overlap {
    let offset = moving_center - reference.center;
    let overlap = reference.extent - offset.abs();
    if overlap <= 0.0 {
        return Overlap::Miss { overlap };
    }

    let kept = Span::new(reference.center + offset / 2.0, overlap);
    let overhang_extent = reference.extent - overlap;
    // Overhang hangs off the far side of the kept block, in the direction of travel
    let side = if offset >= 0.0 { 1.0 } else { -1.0 };
    let overhang = Span::new(
        kept.center + side * (kept.extent + overhang_extent) / 2.0,
        overhang_extent,
    );

    Overlap::Hit(Clip {
        kept,
        overhang,
        offset,
    })
}
