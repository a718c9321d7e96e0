//! Spatial queries over the block grid
//!
//! Everything here reads the world through `world::interfaces`:
//! - `cursor` walks integer boxes
//! - `cell_lookup` resolves cells to block data with a chunk cache
//! - `block_collisions` lazily yields colliding block shapes
//! - `collision_operations` answers box queries for physics
//! - `traversal` and `clip` walk segments for line of sight

pub mod block_collisions;
pub mod cell_lookup;
pub mod clip;
pub mod collision_context;
pub mod collision_operations;
pub mod cursor;
pub mod traversal;

pub use block_collisions::BlockCollisions;
pub use cell_lookup::{CellInfo, CellLookup};
pub use clip::clip_blocks;
pub use collision_context::{CollisionContext, CollisionSubject, EmptyContext};
pub use collision_operations::{
    block_collisions, collide_movement, collisions, find_free_position, find_supporting_cell, no_collision,
    touches_suffocating_block,
};
pub use cursor::{CellClass, GridCursor};
pub use traversal::{traverse_blocks, DdaState, RayCells};
