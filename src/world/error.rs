/// World Error Handling
///
/// Error types for world storage and block registration.
use super::core::{ChunkPos, VoxelPos};

/// World-specific result type
pub type WorldResult<T> = Result<T, WorldError>;

// WorldError for DOP operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WorldError {
    #[error("Chunk not loaded: {0:?}")]
    ChunkNotLoaded(ChunkPos),

    #[error("Position outside world bounds: {0:?}")]
    OutOfWorldBounds(VoxelPos),

    #[error("Invalid position")]
    InvalidPosition,

    #[error("Block already registered: {0}")]
    DuplicateBlock(String),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}
