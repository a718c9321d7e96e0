//! World Operations - Pure DOP Functions
//!
//! This is the PUBLIC API for manipulating the in-memory chunk store.
//! Functions take `WorldData` and return results; the `ChunkSource`
//! implementations at the bottom route the query engine through them.

use super::core::{BlockId, BlockRegistry, ChunkPos, VoxelPos};
use super::data_types::{ChunkData, WorldBorder, WorldData};
use super::error::WorldError;
use super::interfaces::{BlockView, ChunkSource, ChunkSourceMut};

// ============================================================================
// BLOCK OPERATIONS
// ============================================================================

/// Get block at position (pure function)
///
/// # Returns
/// BlockId at that position, or AIR if the chunk is not loaded
pub fn get_block(world: &WorldData, pos: VoxelPos) -> BlockId {
    let chunk_pos = voxel_to_chunk(pos, world.chunk_size);
    world
        .chunks
        .get(&chunk_pos)
        .map_or(BlockId::AIR, |chunk| chunk_block(chunk, pos))
}

/// Set block at position
///
/// # Returns
/// Ok(WorldModification) if successful
pub fn set_block(world: &mut WorldData, pos: VoxelPos, block_id: BlockId) -> Result<WorldModification, WorldError> {
    if !is_within_world_bounds(world, pos) {
        return Err(WorldError::OutOfWorldBounds(pos));
    }

    let chunk_size = world.chunk_size;
    let chunk_pos = voxel_to_chunk(pos, chunk_size);
    let chunk = world
        .chunks
        .get_mut(&chunk_pos)
        .ok_or(WorldError::ChunkNotLoaded(chunk_pos))?;

    let index = local_index(pos, chunk_size);
    let slot = chunk.blocks.get_mut(index).ok_or(WorldError::InvalidPosition)?;
    let old_block = *slot;
    *slot = block_id;

    Ok(WorldModification {
        position: pos,
        old_block,
        new_block: block_id,
    })
}

/// World modification record
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorldModification {
    pub position: VoxelPos,
    pub old_block: BlockId,
    pub new_block: BlockId,
}

/// Fill an inclusive box of cells, loading chunks on the way
pub fn fill_blocks(world: &mut WorldData, min: VoxelPos, max: VoxelPos, block_id: BlockId) -> Result<usize, WorldError> {
    let chunk_size = world.chunk_size;
    let mut changed = 0;
    for z in min.z..=max.z {
        for y in min.y..=max.y {
            for x in min.x..=max.x {
                let pos = VoxelPos::new(x, y, z);
                load_chunk(world, voxel_to_chunk(pos, chunk_size));
                set_block(world, pos, block_id)?;
                changed += 1;
            }
        }
    }
    Ok(changed)
}

// ============================================================================
// CHUNK OPERATIONS
// ============================================================================

/// Load a chunk, creating an empty one if needed
pub fn load_chunk(world: &mut WorldData, chunk_pos: ChunkPos) {
    let chunk_size = world.chunk_size;
    world
        .chunks
        .entry(chunk_pos)
        .or_insert_with(|| ChunkData::new(chunk_pos, chunk_size));
}

/// Insert a prepared chunk, replacing whatever was loaded there
pub fn insert_chunk(world: &mut WorldData, chunk: ChunkData) -> Result<(), WorldError> {
    if chunk.size != world.chunk_size {
        return Err(WorldError::OperationFailed(format!(
            "chunk size {} does not match world chunk size {}",
            chunk.size, world.chunk_size
        )));
    }
    world.chunks.insert(chunk.position, chunk);
    Ok(())
}

/// Unload a chunk; returns whether it was loaded
pub fn unload_chunk(world: &mut WorldData, chunk_pos: ChunkPos) -> bool {
    world.chunks.remove(&chunk_pos).is_some()
}

/// Get all loaded chunks
pub fn get_loaded_chunks(world: &WorldData) -> Vec<ChunkPos> {
    world.chunks.keys().copied().collect()
}

// ============================================================================
// WORLD QUERIES
// ============================================================================

/// Cell lies inside the build height and the world border
pub fn is_within_world_bounds(world: &WorldData, pos: VoxelPos) -> bool {
    pos.y >= world.min_y
        && pos.y < world.max_y
        && world.border.map_or(true, |border| border.is_within_bounds(pos))
}

pub fn set_world_border(world: &mut WorldData, border: Option<WorldBorder>) {
    world.border = border;
}

// ============================================================================
// UTILITIES
// ============================================================================

/// Convert voxel position to chunk position
pub fn voxel_to_chunk(pos: VoxelPos, chunk_size: u32) -> ChunkPos {
    pos.to_chunk_pos(chunk_size)
}

/// Get local position within chunk (0 to chunk_size-1)
pub fn get_local_position(pos: VoxelPos, chunk_size: u32) -> (u32, u32, u32) {
    let chunk_size_i32 = chunk_size as i32;
    (
        pos.x.rem_euclid(chunk_size_i32) as u32,
        pos.y.rem_euclid(chunk_size_i32) as u32,
        pos.z.rem_euclid(chunk_size_i32) as u32,
    )
}

fn local_index(pos: VoxelPos, chunk_size: u32) -> usize {
    let (x, y, z) = get_local_position(pos, chunk_size);
    (x + y * chunk_size + z * chunk_size * chunk_size) as usize
}

fn chunk_block(chunk: &ChunkData, pos: VoxelPos) -> BlockId {
    chunk
        .blocks
        .get(local_index(pos, chunk.size))
        .copied()
        .unwrap_or(BlockId::AIR)
}

// ============================================================================
// DIAGNOSTICS
// ============================================================================

/// Validate world data integrity
pub fn validate_world_data(world: &WorldData) -> Result<(), WorldError> {
    let expected_blocks_per_chunk = (world.chunk_size * world.chunk_size * world.chunk_size) as usize;

    for chunk in world.chunks.values() {
        if chunk.blocks.len() != expected_blocks_per_chunk {
            return Err(WorldError::OperationFailed(format!(
                "Chunk at {:?} has {} blocks, expected {}",
                chunk.position,
                chunk.blocks.len(),
                expected_blocks_per_chunk
            )));
        }
    }

    Ok(())
}

// ============================================================================
// QUERY ENGINE BINDINGS
// ============================================================================

impl BlockView for ChunkData {
    fn block_at(&self, pos: VoxelPos) -> BlockId {
        chunk_block(self, pos)
    }
}

impl ChunkSource for WorldData {
    type Chunk = ChunkData;

    fn chunk_size(&self) -> u32 {
        self.chunk_size
    }

    fn chunk_for_collision(&self, pos: ChunkPos) -> Option<&ChunkData> {
        self.chunks.get(&pos)
    }

    fn registry(&self) -> &BlockRegistry {
        &self.registry
    }

    fn is_within_world_bounds(&self, pos: VoxelPos) -> bool {
        is_within_world_bounds(self, pos)
    }

    fn world_border(&self) -> Option<&WorldBorder> {
        self.border.as_ref()
    }
}

impl ChunkSourceMut for WorldData {
    fn set_block(&mut self, pos: VoxelPos, block: BlockId) -> Result<BlockId, WorldError> {
        set_block(self, pos, block).map(|modification| modification.old_block)
    }
}
