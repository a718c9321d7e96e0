// Hearth Spatial - Data-Oriented Programming (DOP) Architecture
//
// Block collision queries, ray traversal and explosions over a chunked voxel grid.
// - Data lives in plain structs (WorldData, ChunkData, Explosion)
// - Behaviour lives in *_operations modules as free functions
// - Queries read the world only through world::interfaces

// Constants module
pub mod constants;

pub mod config;
pub mod error;

// Core modules
pub mod explosion;
pub mod physics;
pub mod query;
pub mod world;

pub use config::{ConfigError, ExplosionTuning, SpatialConfig};
pub use error::{SpatialError, SpatialResult};
pub use physics::{EntityId, VoxelShape, AABB};

// === Core World Types ===
pub use world::core::{BlockFace, BlockId, BlockRegistry, ChunkPos, ItemId, ItemStack, RaycastHit, VoxelPos};
pub use world::{
    ChunkData, ChunkSource, ChunkSourceMut, EntityShapeProvider, ExplosionActors, ExplosionDamageCalculator,
    WorldBorder, WorldData,
};

// === Queries ===
pub use query::{
    clip_blocks, collisions, no_collision, traverse_blocks, BlockCollisions, CollisionContext, CollisionSubject,
    EmptyContext,
};

// === Explosions ===
pub use explosion::{BlockInteraction, Explosion, ExplosionParams, ExplosionReport};
