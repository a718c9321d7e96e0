//! Block type data and the engine's built-in block table

pub mod basic_blocks;
pub mod block_data;

pub use basic_blocks::{basic_block_table, register_basic_blocks};
pub use block_data::BlockProperties;
