//! Committed blocks and the tower they form

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::geometry::{Axis, Span};
use crate::error::StackError;

/// Entity id shared by committed blocks, the in-flight block and fragments
pub type BlockId = u32;

/// An axis-aligned box in the tower
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    /// Box center. `y` is fixed per level.
    pub position: Vec3,
    /// (width, height, depth) = (x, y, z) extents
    pub size: Vec3,
    /// Index in the tower (0 = base)
    pub level: u32,
}

impl Block {
    /// Center + extent along a horizontal axis
    pub fn span(&self, axis: Axis) -> Span {
        Span::new(axis.get(self.position), axis.get(self.size))
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn depth(&self) -> f32 {
        self.size.z
    }
}

/// Ordered stack of committed blocks (insertion order = stacking order)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tower {
    blocks: Vec<Block>,
}

impl Tower {
    pub fn new() -> Self {
        Self { blocks: Vec::new() }
    }

    /// Append a block on top. Levels must stay contiguous.
    pub fn append(&mut self, block: Block) {
        debug_assert_eq!(block.level as usize, self.blocks.len(), "tower levels must be contiguous");
        self.blocks.push(block);
    }

    /// Top block
    pub fn last(&self) -> Result<&Block, StackError> {
        self.blocks.last().ok_or(StackError::EmptyTower)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Remove everything (session reset only)
    pub fn clear(&mut self) {
        self.blocks.clear();
    }
}
