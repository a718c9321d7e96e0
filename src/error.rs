//! Crate-level error handling
//!
//! Queries never fail; "nothing found" is an `Option` or `bool`. Errors only
//! come from mutating the world and from configuration.

use crate::config::ConfigError;
use crate::world::error::WorldError;

/// Main error type for the crate
#[derive(Debug, thiserror::Error)]
pub enum SpatialError {
    #[error("World error: {0}")]
    World(#[from] WorldError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type SpatialResult<T> = Result<T, SpatialError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::core::VoxelPos;

    fn set_outside() -> SpatialResult<()> {
        Err(WorldError::OutOfWorldBounds(VoxelPos::new(0, 999, 0)))?;
        Ok(())
    }

    #[test]
    fn test_world_errors_convert() {
        let err = set_outside().expect_err("out of bounds");
        assert!(matches!(err, SpatialError::World(WorldError::OutOfWorldBounds(_))));
        assert!(err.to_string().starts_with("World error"));
    }
}
