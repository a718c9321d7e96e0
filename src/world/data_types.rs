//! World Data Types - Pure DOP Structures
//!
//! These are the data structures that world_operations functions operate on.
//! Behaviour lives in world_operations; the only methods here are
//! constructors and the small geometry helpers of `WorldBorder`.

use super::core::{BlockId, BlockRegistry, ChunkPos, VoxelPos};
use crate::constants::{core::CHUNK_SIZE, core::MAX_BUILD_HEIGHT, core::MIN_BUILD_HEIGHT, geometry::WORLD_EXTENT};
use crate::physics::aabb::{aabb_from_bounds, AABB};
use crate::physics::{join, BooleanOp, VoxelShape};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// World data - the main data structure for world state
///
/// In-memory chunk store used as the reference `ChunkSource`.
#[derive(Debug, Clone)]
pub struct WorldData {
    /// Loaded chunks by position
    pub chunks: FxHashMap<ChunkPos, ChunkData>,

    /// Cells per chunk edge
    pub chunk_size: u32,

    /// Block types known to this world
    pub registry: BlockRegistry,

    /// Lowest buildable cell height (inclusive)
    pub min_y: i32,

    /// Highest buildable cell height (exclusive)
    pub max_y: i32,

    /// Horizontal limit of the playable area
    pub border: Option<WorldBorder>,
}

/// Single chunk's data
#[derive(Debug, Clone)]
pub struct ChunkData {
    /// Chunk position in chunk coordinates
    pub position: ChunkPos,

    /// Block IDs (flat array: size^3 blocks, x fastest then y then z)
    pub blocks: Vec<BlockId>,

    /// Cells per edge
    pub size: u32,
}

/// Horizontal world limit as a closed rectangle on x/z
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBorder {
    pub min_x: f64,
    pub max_x: f64,
    pub min_z: f64,
    pub max_z: f64,
}

impl WorldData {
    /// Create new empty world data with the engine's basic blocks
    pub fn new(chunk_size: u32) -> Self {
        Self::with_registry(chunk_size, BlockRegistry::new())
    }

    pub fn with_registry(chunk_size: u32, registry: BlockRegistry) -> Self {
        Self {
            chunks: FxHashMap::default(),
            chunk_size,
            registry,
            min_y: MIN_BUILD_HEIGHT,
            max_y: MAX_BUILD_HEIGHT,
            border: None,
        }
    }
}

impl Default for WorldData {
    fn default() -> Self {
        Self::new(CHUNK_SIZE)
    }
}

impl ChunkData {
    /// Create new chunk with given position and chunk size
    pub fn new(position: ChunkPos, chunk_size: u32) -> Self {
        Self::filled(position, chunk_size, BlockId::AIR)
    }

    /// Create chunk filled with a specific block
    pub fn filled(position: ChunkPos, chunk_size: u32, block: BlockId) -> Self {
        let total_blocks = (chunk_size * chunk_size * chunk_size) as usize;

        Self {
            position,
            blocks: vec![block; total_blocks],
            size: chunk_size,
        }
    }
}

impl WorldBorder {
    pub fn new(min_x: f64, max_x: f64, min_z: f64, max_z: f64) -> Self {
        assert!(min_x <= max_x && min_z <= max_z, "inverted world border");
        Self { min_x, max_x, min_z, max_z }
    }

    /// Square border around the origin
    pub fn centered(half_size: f64) -> Self {
        Self::new(-half_size, half_size, -half_size, half_size)
    }

    pub fn is_within_bounds(&self, pos: VoxelPos) -> bool {
        let (x, z) = (pos.x as f64, pos.z as f64);
        x >= self.min_x && x + 1.0 <= self.max_x && z >= self.min_z && z + 1.0 <= self.max_z
    }

    pub fn contains_aabb(&self, aabb: &AABB) -> bool {
        aabb.min.x >= self.min_x && aabb.max.x <= self.max_x && aabb.min.z >= self.min_z && aabb.max.z <= self.max_z
    }

    /// Distance from a horizontal point to the nearest border edge; negative outside
    pub fn distance_to_edge(&self, x: f64, z: f64) -> f64 {
        let dx = (x - self.min_x).min(self.max_x - x);
        let dz = (z - self.min_z).min(self.max_z - z);
        dx.min(dz)
    }

    /// Box is inside but within reach of an edge, judged from its horizontal extent
    pub fn is_inside_close_to_border(&self, aabb: &AABB) -> bool {
        let reach = (aabb.max.x - aabb.min.x).max(aabb.max.z - aabb.min.z).max(1.0);
        let center_x = (aabb.min.x + aabb.max.x) * 0.5;
        let center_z = (aabb.min.z + aabb.max.z) * 0.5;
        let distance = self.distance_to_edge(center_x, center_z);
        distance > 0.0 && distance < reach * 2.0
    }

    /// Everything outside the border, bounded vertically and horizontally by the world extent
    pub fn collision_shape(&self) -> VoxelShape {
        let world = VoxelShape::from_aabb(&aabb_from_bounds(
            -WORLD_EXTENT,
            -WORLD_EXTENT,
            -WORLD_EXTENT,
            WORLD_EXTENT,
            WORLD_EXTENT,
            WORLD_EXTENT,
        ));
        let inside = VoxelShape::from_aabb(&aabb_from_bounds(
            self.min_x,
            -WORLD_EXTENT,
            self.min_z,
            self.max_x,
            WORLD_EXTENT,
            self.max_z,
        ));
        join(&world, &inside, BooleanOp::OnlyFirst)
    }
}
