//! Core world data types and fundamental structures
//!
//! This module contains the essential data types that form the foundation
//! of the world system: block and item ids, grid positions, ray hits and the
//! block registry.

mod block;
mod item;
mod position;
mod ray;
mod registry;

pub use block::BlockId;
pub use item::{ItemId, ItemStack};
pub use position::{ChunkPos, VoxelPos};
pub use ray::{BlockFace, RaycastHit};
pub use registry::{BlockRegistration, BlockRegistry, FIRST_GAME_BLOCK_ID};
