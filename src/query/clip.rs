//! Blocks-only line of sight

use super::cell_lookup::CellLookup;
use super::traversal::traverse_blocks;
use crate::world::core::RaycastHit;
use crate::world::interfaces::ChunkSource;
use cgmath::{MetricSpace, Point3};

/// First block collision surface struck by the segment `from -> to`
///
/// Unloaded chunks are treated as empty space.
pub fn clip_blocks<W: ChunkSource>(world: &W, from: Point3<f64>, to: Point3<f64>) -> Option<RaycastHit> {
    traverse_blocks(
        from,
        to,
        CellLookup::new(world),
        |lookup, pos| {
            let cell = lookup.block_at(pos)?;
            let hit = cell.shape.clip(from, to, pos)?;
            Some(Some(RaycastHit {
                position: pos,
                face: hit.face,
                location: hit.location,
                distance: from.distance(hit.location),
                block: cell.id,
                inside: hit.inside,
            }))
        },
        |_| None,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::core::{BlockFace, BlockId, VoxelPos};
    use crate::world::data_types::WorldData;
    use crate::world::world_operations::fill_blocks;

    fn wall_world() -> WorldData {
        let mut world = WorldData::new(16);
        fill_blocks(&mut world, VoxelPos::new(4, 0, -2), VoxelPos::new(4, 3, 2), BlockId::STONE).expect("fill");
        world
    }

    #[test]
    fn test_hits_wall_face() {
        let world = wall_world();
        let hit = clip_blocks(&world, Point3::new(0.5, 1.5, 0.5), Point3::new(8.5, 1.5, 0.5)).expect("wall in the way");
        assert_eq!(hit.position, VoxelPos::new(4, 1, 0));
        assert_eq!(hit.face, BlockFace::Left);
        assert_eq!(hit.block, BlockId::STONE);
        assert!((hit.location.x - 4.0).abs() < 1e-9);
        assert!((hit.distance - 3.5).abs() < 1e-9);
        assert!(!hit.inside);
    }

    #[test]
    fn test_misses_over_wall_and_stops_short() {
        let world = wall_world();
        assert!(clip_blocks(&world, Point3::new(0.5, 5.5, 0.5), Point3::new(8.5, 5.5, 0.5)).is_none());
        assert!(clip_blocks(&world, Point3::new(0.5, 1.5, 0.5), Point3::new(3.9, 1.5, 0.5)).is_none());
    }

    #[test]
    fn test_slab_only_blocks_lower_half() {
        let mut world = WorldData::new(16);
        fill_blocks(&mut world, VoxelPos::new(2, 0, 0), VoxelPos::new(2, 0, 0), BlockId::SLAB).expect("fill");
        assert!(clip_blocks(&world, Point3::new(0.5, 0.75, 0.5), Point3::new(4.5, 0.75, 0.5)).is_none());
        let hit = clip_blocks(&world, Point3::new(0.5, 0.25, 0.5), Point3::new(4.5, 0.25, 0.5)).expect("slab");
        assert_eq!(hit.position, VoxelPos::new(2, 0, 0));
    }

    #[test]
    fn test_same_segment_same_hit() {
        let world = wall_world();
        let from = Point3::new(0.1, 0.2, 0.3);
        let to = Point3::new(7.9, 3.3, -2.2);
        let first = clip_blocks(&world, from, to).expect("crosses the wall");
        assert_eq!(first.position, VoxelPos::new(4, 1, -1));
        assert_eq!(first.face, BlockFace::Left);
        assert_eq!(clip_blocks(&world, from, to), Some(first));
    }

    #[test]
    fn test_start_inside_block() {
        let world = wall_world();
        let hit = clip_blocks(&world, Point3::new(4.5, 1.5, 0.5), Point3::new(8.5, 1.5, 0.5)).expect("inside");
        assert!(hit.inside);
        assert_eq!(hit.position, VoxelPos::new(4, 1, 0));
    }
}
