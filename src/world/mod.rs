//! World Module
//!
//! Block types, grid positions and the in-memory chunk store that the
//! query engine reads through the `interfaces` traits.
//!
//! # Architecture Overview
//!
//! - **Core**: Fundamental data types (BlockId, positions, ray hits, registry)
//! - **Blocks**: Block properties and the built-in block table
//! - **Data types / operations**: Chunk store as data plus pure functions
//! - **Interfaces**: Traits the query and explosion code depend on

pub mod blocks;
pub mod core;
pub mod data_types;
pub mod error;
pub mod interfaces;
pub mod world_operations;

// Re-export core types for convenience
pub use core::{BlockFace, BlockId, BlockRegistry, ChunkPos, ItemId, ItemStack, RaycastHit, VoxelPos};

pub use blocks::BlockProperties;
pub use data_types::{ChunkData, WorldBorder, WorldData};
pub use error::{WorldError, WorldResult};
pub use interfaces::{
    ActorSnapshot, BlockView, ChunkSource, ChunkSourceMut, EntityCollider, EntityShapeProvider, ExplosionActors,
    ExplosionDamageCalculator, NoEntities, RegistryDamageCalculator,
};
pub use world_operations::WorldModification;
