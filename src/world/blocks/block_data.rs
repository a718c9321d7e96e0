//! Block Data - Pure DOP
//!
//! Block property data structures consumed by collision and explosion queries.

use crate::physics::{Axis, VoxelShape};
use crate::world::core::{BlockId, ItemStack};

/// Everything the spatial queries need to know about a block type
#[derive(Debug, Clone)]
pub struct BlockProperties {
    pub id: BlockId,
    pub name: String,
    /// Collision geometry in cell-local space
    pub collision_shape: VoxelShape,
    /// Blocks breathable space regardless of collision geometry
    pub suffocating: bool,
    /// `None` for blocks that do not absorb explosions at all (air)
    pub blast_resistance: Option<f32>,
    /// Reacts to explosions without being destroyed (buttons, levers)
    pub triggerable: bool,
    /// Item left behind when the block is destroyed
    pub drop: Option<ItemStack>,
}

impl Default for BlockProperties {
    fn default() -> Self {
        Self {
            id: BlockId::AIR,
            name: "air".to_string(),
            collision_shape: VoxelShape::Empty,
            suffocating: false,
            blast_resistance: None,
            triggerable: false,
            drop: None,
        }
    }
}

impl BlockProperties {
    /// Collision geometry reaches outside the block's own cell (fences, walls)
    pub fn has_large_collision_shape(&self) -> bool {
        match &self.collision_shape {
            VoxelShape::Empty | VoxelShape::Full => false,
            shape => Axis::ALL.iter().any(|&axis| {
                shape
                    .bounds_on_axis(axis)
                    .map_or(false, |(min, max)| min < 0.0 || max > 1.0)
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_large_collision_shape_detection() {
        let fence = BlockProperties {
            collision_shape: VoxelShape::cuboid(0.375, 0.0, 0.375, 0.625, 1.5, 0.625),
            ..Default::default()
        };
        assert!(fence.has_large_collision_shape());

        let slab = BlockProperties {
            collision_shape: VoxelShape::cuboid(0.0, 0.0, 0.0, 1.0, 0.5, 1.0),
            ..Default::default()
        };
        assert!(!slab.has_large_collision_shape());
        assert!(!BlockProperties::default().has_large_collision_shape());
    }
}
