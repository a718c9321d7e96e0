//! Collaborator interfaces for spatial queries
//!
//! Collision, traversal and explosion code never touches chunk storage or
//! entity lists directly. They go through these traits, so any world
//! representation can be queried as long as it can answer them.

use crate::physics::{EntityId, VoxelShape, AABB};
use crate::world::blocks::BlockProperties;
use crate::world::core::{BlockId, BlockRegistry, ChunkPos, VoxelPos};
use crate::world::data_types::WorldBorder;
use crate::world::error::WorldError;
use cgmath::{Point3, Vector3};

/// Read access to the blocks of one chunk
pub trait BlockView {
    /// Block at a world-space position inside this chunk
    fn block_at(&self, pos: VoxelPos) -> BlockId;
}

/// Read access to a chunked world
pub trait ChunkSource {
    type Chunk: BlockView;

    fn chunk_size(&self) -> u32;

    /// Chunk if it is loaded; unloaded chunks never collide
    fn chunk_for_collision(&self, pos: ChunkPos) -> Option<&Self::Chunk>;

    fn registry(&self) -> &BlockRegistry;

    fn is_within_world_bounds(&self, pos: VoxelPos) -> bool;

    fn world_border(&self) -> Option<&WorldBorder> {
        None
    }

    /// Block at any position; air when the chunk is not loaded
    fn block_at(&self, pos: VoxelPos) -> BlockId {
        self.chunk_for_collision(pos.to_chunk_pos(self.chunk_size()))
            .map_or(BlockId::AIR, |chunk| chunk.block_at(pos))
    }

    /// Collision shape and suffocation flag of the block at `pos`
    fn shape_and_flags(&self, pos: VoxelPos) -> (&VoxelShape, bool) {
        match self.registry().get_properties(self.block_at(pos)) {
            Some(props) => (&props.collision_shape, props.suffocating),
            None => (&EMPTY_SHAPE, false),
        }
    }
}

pub(crate) static EMPTY_SHAPE: VoxelShape = VoxelShape::Empty;

/// Write access used when explosions are finalized
pub trait ChunkSourceMut: ChunkSource {
    /// Replace a block, returning the previous one
    fn set_block(&mut self, pos: VoxelPos, block: BlockId) -> Result<BlockId, WorldError>;
}

/// Entity collision volume as reported by the entity system
#[derive(Debug, Clone)]
pub struct EntityCollider {
    pub id: EntityId,
    /// World-space shape
    pub shape: VoxelShape,
    /// Other entities may collide with this one (boats, shulkers)
    pub can_collide: bool,
    /// Observers never collide
    pub spectator: bool,
}

pub trait EntityShapeProvider {
    fn entities_intersecting(&self, area: &AABB, exclude: Option<EntityId>) -> Vec<EntityCollider>;
}

/// World without entities
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEntities;

impl EntityShapeProvider for NoEntities {
    fn entities_intersecting(&self, _area: &AABB, _exclude: Option<EntityId>) -> Vec<EntityCollider> {
        Vec::new()
    }
}

impl EntityShapeProvider for [EntityCollider] {
    fn entities_intersecting(&self, area: &AABB, exclude: Option<EntityId>) -> Vec<EntityCollider> {
        self.iter()
            .filter(|e| Some(e.id) != exclude)
            .filter(|e| {
                e.shape
                    .bounds()
                    .map_or(false, |b| crate::physics::aabb::aabb_intersects(&b, area))
            })
            .cloned()
            .collect()
    }
}

impl EntityShapeProvider for Vec<EntityCollider> {
    fn entities_intersecting(&self, area: &AABB, exclude: Option<EntityId>) -> Vec<EntityCollider> {
        self.as_slice().entities_intersecting(area, exclude)
    }
}

/// Decides how blocks absorb and react to explosions
pub trait ExplosionDamageCalculator {
    /// Energy absorbed per step inside this cell; `None` absorbs nothing
    fn resistance_at<W: ChunkSource>(&self, world: &W, pos: VoxelPos) -> Option<f32>;

    /// Whether a ray with `energy` left destroys the cell
    fn should_destroy<W: ChunkSource>(&self, world: &W, pos: VoxelPos, energy: f32) -> bool;
}

/// Resistance straight from the block registry; everything with energy left breaks
#[derive(Debug, Clone, Copy, Default)]
pub struct RegistryDamageCalculator;

impl ExplosionDamageCalculator for RegistryDamageCalculator {
    fn resistance_at<W: ChunkSource>(&self, world: &W, pos: VoxelPos) -> Option<f32> {
        world
            .registry()
            .get_properties(world.block_at(pos))
            .and_then(|props: &BlockProperties| props.blast_resistance)
    }

    fn should_destroy<W: ChunkSource>(&self, world: &W, pos: VoxelPos, _energy: f32) -> bool {
        !world.block_at(pos).is_air()
    }
}

/// What the explosion needs to know about a nearby actor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorSnapshot {
    pub id: EntityId,
    /// Feet position
    pub position: Point3<f64>,
    pub eye_height: f64,
    pub bounding_box: AABB,
}

impl ActorSnapshot {
    pub fn eye_position(&self) -> Point3<f64> {
        Point3::new(self.position.x, self.position.y + self.eye_height, self.position.z)
    }
}

/// Actors an explosion can reach, with their attributes and the effects applied to them
pub trait ExplosionActors {
    fn actors_in(&self, area: &AABB, exclude: Option<EntityId>) -> Vec<ActorSnapshot>;

    /// Fraction of knockback ignored, `0.0..=1.0`
    fn knockback_resistance(&self, _id: EntityId) -> f64 {
        0.0
    }

    fn is_immune_to_explosion(&self, _id: EntityId) -> bool {
        false
    }

    fn push(&mut self, id: EntityId, impulse: Vector3<f64>);

    fn hurt(&mut self, id: EntityId, amount: f32);
}
