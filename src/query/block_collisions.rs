//! Lazy enumeration of block shapes overlapping a box

use super::cell_lookup::CellLookup;
use super::collision_context::CollisionContext;
use super::cursor::{CellClass, GridCursor};
use crate::constants::geometry::EPSILON;
use crate::physics::aabb::{aabb_for_cell, aabb_intersects, aabb_is_degenerate, AABB};
use crate::physics::{join_is_not_empty, BooleanOp, VoxelShape};
use crate::world::core::VoxelPos;
use crate::world::interfaces::ChunkSource;

/// Iterator over `(cell, world-space shape)` for every block colliding with a box
///
/// The walked range is one cell wider than the box on every side so that
/// shapes reaching outside their own cell (fences, walls) are still found.
pub struct BlockCollisions<'w, 'c, W: ChunkSource, C: CollisionContext> {
    lookup: CellLookup<'w, W>,
    context: &'c C,
    query_box: AABB,
    box_shape: VoxelShape,
    cursor: GridCursor,
    only_suffocating: bool,
}

impl<'w, 'c, W: ChunkSource, C: CollisionContext> BlockCollisions<'w, 'c, W, C> {
    pub fn new(world: &'w W, context: &'c C, query_box: AABB, only_suffocating: bool) -> Self {
        let (cursor, box_shape) = if aabb_is_degenerate(&query_box) {
            (GridCursor::empty(), VoxelShape::empty())
        } else {
            (cursor_range(&query_box), VoxelShape::from_aabb(&query_box))
        };
        Self {
            lookup: CellLookup::new(world),
            context,
            query_box,
            box_shape,
            cursor,
            only_suffocating,
        }
    }

    /// Chunk cache statistics as `(hits, misses)`
    pub fn cache_stats(&self) -> (u64, u64) {
        (self.lookup.cache_hits(), self.lookup.cache_misses())
    }
}

/// Cell span of the box grown by epsilon, then by one cell per side
pub fn cursor_range(query_box: &AABB) -> GridCursor {
    // Casts saturate at the i32 limits, the padding must too
    let lo = |v: f64| ((v - EPSILON).floor() as i32).saturating_sub(1);
    let hi = |v: f64| ((v + EPSILON).floor() as i32).saturating_add(1);
    GridCursor::new(
        VoxelPos::new(lo(query_box.min.x), lo(query_box.min.y), lo(query_box.min.z)),
        VoxelPos::new(hi(query_box.max.x), hi(query_box.max.y), hi(query_box.max.z)),
    )
}

impl<W: ChunkSource, C: CollisionContext> Iterator for BlockCollisions<'_, '_, W, C> {
    type Item = (VoxelPos, VoxelShape);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((pos, class)) = self.cursor.next() {
            if class == CellClass::Corner {
                continue;
            }
            let Some(cell) = self.lookup.block_at(pos) else {
                continue;
            };
            if self.only_suffocating && !cell.suffocating {
                continue;
            }
            if !self.context.admits(class, &cell) {
                continue;
            }

            let shape = cell.shape;
            if shape.is_full_block() {
                if aabb_intersects(&aabb_for_cell(pos), &self.query_box) {
                    return Some((pos, shape.translate_to(pos)));
                }
                continue;
            }
            if shape.is_empty() {
                continue;
            }

            let placed = shape.translate_to(pos);
            if join_is_not_empty(&placed, &self.box_shape, BooleanOp::And) {
                return Some((pos, placed));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::aabb::aabb_from_bounds;
    use crate::query::collision_context::EmptyContext;
    use crate::world::blocks::BlockProperties;
    use crate::world::core::{BlockId, ChunkPos};
    use crate::world::data_types::WorldData;
    use crate::world::world_operations::{fill_blocks, load_chunk, set_block};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn scattered_world(seed: u64) -> WorldData {
        let mut world = WorldData::new(8);
        for cx in -1..=1 {
            for cy in -1..=1 {
                for cz in -1..=1 {
                    load_chunk(&mut world, ChunkPos::new(cx, cy, cz));
                }
            }
        }
        let palette = [
            BlockId::STONE,
            BlockId::SLAB,
            BlockId::GLASS,
            BlockId::TALL_GRASS,
            BlockId::WATER,
        ];
        let mut rng = StdRng::seed_from_u64(seed);
        for _ in 0..400 {
            let pos = VoxelPos::new(rng.gen_range(-8..8), rng.gen_range(-8..8), rng.gen_range(-8..8));
            let block = palette[rng.gen_range(0..palette.len())];
            set_block(&mut world, pos, block).expect("loaded");
        }
        world
    }

    /// Every cell in the walked range whose placed shape overlaps the box
    ///
    /// No cell classes and no context: with shapes confined to their own cell
    /// this is the full answer.
    fn brute_force(world: &WorldData, query_box: &AABB) -> Vec<VoxelPos> {
        let range = cursor_range(query_box);
        let (min, max) = (range.min_corner(), range.max_corner());
        let box_shape = VoxelShape::from_aabb(query_box);
        let mut out = Vec::new();
        for z in min.z..=max.z {
            for y in min.y..=max.y {
                for x in min.x..=max.x {
                    let pos = VoxelPos::new(x, y, z);
                    let (shape, _) = world.shape_and_flags(pos);
                    if join_is_not_empty(&shape.translate_to(pos), &box_shape, BooleanOp::And) {
                        out.push(pos);
                    }
                }
            }
        }
        out
    }

    #[test]
    fn test_matches_brute_force() {
        let world = scattered_world(7);
        let boxes = [
            aabb_from_bounds(-2.3, -1.0, -2.3, 2.7, 1.8, 0.4),
            aabb_from_bounds(0.0, 0.0, 0.0, 1.0, 1.0, 1.0),
            aabb_from_bounds(-6.5, -6.5, -6.5, 6.5, 6.5, 6.5),
            aabb_from_bounds(3.2, -4.9, 1.1, 3.8, -3.1, 1.9),
        ];
        let mut total = 0;
        for query_box in boxes {
            let expected = brute_force(&world, &query_box);
            total += expected.len();
            let found: Vec<VoxelPos> = BlockCollisions::new(&world, &EmptyContext, query_box, false)
                .map(|(pos, _)| pos)
                .collect();
            assert_eq!(found, expected, "box {:?}", query_box);
        }
        assert!(total > 0);
    }

    #[test]
    fn test_corner_cells_skipped() {
        let mut world = WorldData::new(16);
        let big = BlockProperties {
            name: "big".to_string(),
            collision_shape: VoxelShape::cuboid(0.0, 0.0, 0.0, 2.0, 2.0, 2.0),
            suffocating: true,
            ..Default::default()
        };
        let big = world.registry.register_block("test:big", big).expect("registers");
        let query_box = aabb_from_bounds(0.1, 0.1, 0.1, 0.9, 0.9, 0.9);

        // The shape reaches into the box from the corner of the walked range
        fill_blocks(&mut world, VoxelPos::new(-1, -1, -1), VoxelPos::new(-1, -1, -1), big).expect("fill");
        assert_eq!(BlockCollisions::new(&world, &EmptyContext, query_box, false).count(), 0);

        // The same block on a face of the range is found
        fill_blocks(&mut world, VoxelPos::new(-1, 0, 0), VoxelPos::new(-1, 0, 0), big).expect("fill");
        let found: Vec<_> = BlockCollisions::new(&world, &EmptyContext, query_box, false)
            .map(|(pos, _)| pos)
            .collect();
        assert_eq!(found, vec![VoxelPos::new(-1, 0, 0)]);
    }

    #[test]
    fn test_fence_reaches_up_from_face_cell() {
        let mut world = WorldData::new(16);
        fill_blocks(&mut world, VoxelPos::new(0, 0, 0), VoxelPos::new(0, 0, 0), BlockId::FENCE).expect("fill");
        // Box floats above the fence cell, inside its 1.5 high post
        let query_box = aabb_from_bounds(0.4, 1.1, 0.4, 0.6, 1.4, 0.6);
        let hits: Vec<_> = BlockCollisions::new(&world, &EmptyContext, query_box, false).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].0, VoxelPos::new(0, 0, 0));

        // A full block in the same face position is ignored
        let mut world = WorldData::new(16);
        fill_blocks(&mut world, VoxelPos::new(0, 0, 0), VoxelPos::new(0, 0, 0), BlockId::STONE).expect("fill");
        assert_eq!(BlockCollisions::new(&world, &EmptyContext, query_box, false).count(), 0);
    }

    #[test]
    fn test_touching_face_does_not_collide() {
        let mut world = WorldData::new(16);
        fill_blocks(&mut world, VoxelPos::new(0, 0, 0), VoxelPos::new(0, 0, 0), BlockId::STONE).expect("fill");
        let resting = aabb_from_bounds(0.2, 1.0, 0.2, 0.8, 2.8, 0.8);
        assert_eq!(BlockCollisions::new(&world, &EmptyContext, resting, false).count(), 0);
        let sunk = aabb_from_bounds(0.2, 0.99, 0.2, 0.8, 2.8, 0.8);
        assert_eq!(BlockCollisions::new(&world, &EmptyContext, sunk, false).count(), 1);
    }

    #[test]
    fn test_only_suffocating_filter() {
        let mut world = WorldData::new(16);
        fill_blocks(&mut world, VoxelPos::new(0, 0, 0), VoxelPos::new(0, 0, 0), BlockId::GLASS).expect("fill");
        fill_blocks(&mut world, VoxelPos::new(1, 0, 0), VoxelPos::new(1, 0, 0), BlockId::STONE).expect("fill");
        let query_box = aabb_from_bounds(0.5, 0.2, 0.2, 1.5, 0.8, 0.8);
        assert_eq!(BlockCollisions::new(&world, &EmptyContext, query_box, false).count(), 2);
        let suffocating: Vec<_> = BlockCollisions::new(&world, &EmptyContext, query_box, true)
            .map(|(pos, _)| pos)
            .collect();
        assert_eq!(suffocating, vec![VoxelPos::new(1, 0, 0)]);
    }

    #[test]
    fn test_degenerate_box_yields_nothing() {
        let mut world = WorldData::new(16);
        fill_blocks(&mut world, VoxelPos::new(0, 0, 0), VoxelPos::new(2, 2, 2), BlockId::STONE).expect("fill");
        let flat = aabb_from_bounds(0.5, 1.5, 0.5, 1.5, 1.5, 1.5);
        assert_eq!(BlockCollisions::new(&world, &EmptyContext, flat, false).count(), 0);
    }

    #[test]
    fn test_range_clamps_at_grid_limits() {
        let far = aabb_from_bounds(
            i32::MAX as f64 - 0.5,
            0.2,
            i32::MIN as f64,
            i32::MAX as f64,
            0.8,
            i32::MIN as f64 + 0.5,
        );
        let range = cursor_range(&far);
        assert_eq!(range.max_corner().x, i32::MAX);
        assert_eq!(range.min_corner().z, i32::MIN);
        assert_eq!(range.volume(), 18);
        assert_eq!(range.count(), 18);
    }

    #[test]
    fn test_neighbouring_cells_share_cached_chunk() {
        let mut world = WorldData::new(16);
        fill_blocks(&mut world, VoxelPos::new(2, 2, 2), VoxelPos::new(6, 6, 6), BlockId::STONE).expect("fill");
        let query_box = aabb_from_bounds(3.0, 3.0, 3.0, 5.0, 5.0, 5.0);
        let mut collisions = BlockCollisions::new(&world, &EmptyContext, query_box, false);
        assert_eq!(collisions.by_ref().count(), 8);
        let (hits, misses) = collisions.cache_stats();
        assert_eq!(misses, 1);
        assert!(hits > 0);
    }
}
