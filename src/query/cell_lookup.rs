//! Cell lookup with a single-entry chunk cache
//!
//! Neighbouring cells of a query almost always share a chunk, so the last
//! chunk fetched is kept and reused until the chunk key changes.

use crate::physics::VoxelShape;
use crate::world::core::{BlockId, ChunkPos, VoxelPos};
use crate::world::interfaces::{BlockView, ChunkSource, EMPTY_SHAPE};

/// Everything the enumerator needs to know about one loaded cell
#[derive(Debug, Clone, Copy)]
pub struct CellInfo<'w> {
    pub pos: VoxelPos,
    pub id: BlockId,
    /// Cell-local collision shape
    pub shape: &'w VoxelShape,
    pub suffocating: bool,
    pub large_collision_shape: bool,
}

pub struct CellLookup<'w, W: ChunkSource> {
    world: &'w W,
    last: Option<(ChunkPos, Option<&'w W::Chunk>)>,
    hits: u64,
    misses: u64,
}

impl<'w, W: ChunkSource> CellLookup<'w, W> {
    pub fn new(world: &'w W) -> Self {
        Self {
            world,
            last: None,
            hits: 0,
            misses: 0,
        }
    }

    pub fn world(&self) -> &'w W {
        self.world
    }

    /// Chunk containing `pos`, served from the cache when the key matches
    pub fn chunk_at(&mut self, pos: VoxelPos) -> Option<&'w W::Chunk> {
        let key = pos.to_chunk_pos(self.world.chunk_size());
        if let Some((last_key, chunk)) = self.last {
            if last_key == key {
                self.hits += 1;
                return chunk;
            }
        }
        self.misses += 1;
        let chunk = self.world.chunk_for_collision(key);
        self.last = Some((key, chunk));
        chunk
    }

    /// Block data for a cell; `None` when its chunk is not loaded
    pub fn block_at(&mut self, pos: VoxelPos) -> Option<CellInfo<'w>> {
        let id = self.chunk_at(pos)?.block_at(pos);
        let info = match self.world.registry().get_properties(id) {
            Some(props) => CellInfo {
                pos,
                id,
                shape: &props.collision_shape,
                suffocating: props.suffocating,
                large_collision_shape: props.has_large_collision_shape(),
            },
            None => {
                log::debug!("[CellLookup::block_at] unregistered block {} at {:?}", id, pos);
                CellInfo {
                    pos,
                    id,
                    shape: &EMPTY_SHAPE,
                    suffocating: false,
                    large_collision_shape: false,
                }
            }
        };
        Some(info)
    }

    pub fn cache_hits(&self) -> u64 {
        self.hits
    }

    pub fn cache_misses(&self) -> u64 {
        self.misses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::data_types::WorldData;
    use crate::world::world_operations::{fill_blocks, load_chunk};

    #[test]
    fn test_cache_reuses_last_chunk() {
        let mut world = WorldData::new(16);
        load_chunk(&mut world, ChunkPos::new(0, 0, 0));
        let mut lookup = CellLookup::new(&world);

        for x in 0..16 {
            assert!(lookup.block_at(VoxelPos::new(x, 0, 0)).is_some());
        }
        assert_eq!(lookup.cache_misses(), 1);
        assert_eq!(lookup.cache_hits(), 15);

        // Crossing into an unloaded chunk refetches and caches the miss
        assert!(lookup.block_at(VoxelPos::new(16, 0, 0)).is_none());
        assert!(lookup.block_at(VoxelPos::new(17, 0, 0)).is_none());
        assert_eq!(lookup.cache_misses(), 2);
        assert_eq!(lookup.cache_hits(), 16);
    }

    #[test]
    fn test_cached_and_uncached_agree() {
        let mut world = WorldData::new(4);
        fill_blocks(&mut world, VoxelPos::new(-3, 0, -3), VoxelPos::new(3, 1, 3), BlockId::STONE).expect("fill");
        fill_blocks(&mut world, VoxelPos::new(0, 1, 0), VoxelPos::new(0, 1, 0), BlockId::FENCE).expect("fill");

        let mut lookup = CellLookup::new(&world);
        for z in -4..=4 {
            for y in -1..=2 {
                for x in -4..=4 {
                    let pos = VoxelPos::new(x, y, z);
                    let cached = lookup.block_at(pos).map(|c| c.id);
                    let fresh = CellLookup::new(&world).block_at(pos).map(|c| c.id);
                    assert_eq!(cached, fresh, "mismatch at {:?}", pos);
                }
            }
        }
        let fence = lookup.block_at(VoxelPos::new(0, 1, 0)).expect("loaded");
        assert!(fence.large_collision_shape);
    }
}
