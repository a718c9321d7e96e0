//! Explosion resolution
//!
//! Two phases, both driven by the caller:
//! 1. `resolve` decides which cells break and damages nearby actors
//! 2. `finalize` writes the block changes back and gathers drops

pub mod drops;
pub mod explosion_data;
pub mod explosion_operations;

pub use drops::{add_drop, finalize};
pub use explosion_data::{BlockInteraction, DropEntry, Explosion, ExplosionParams, ExplosionReport};
pub use explosion_operations::{
    calculate_exploded_positions, hurt_actors, resolve, seen_fraction, shell_directions,
};
