use super::BlockId;
use crate::world::blocks::{basic_blocks, BlockProperties};
use crate::world::error::WorldError;
use rustc_hash::FxHashMap;

/// First id handed out to game-registered blocks; engine blocks live below it
pub const FIRST_GAME_BLOCK_ID: u16 = 100;

/// Block registration data
#[derive(Debug, Clone)]
pub struct BlockRegistration {
    pub id: BlockId,
    pub name: String,
}

/// Registry that stores all block types as data
#[derive(Debug, Clone)]
pub struct BlockRegistry {
    /// Map from BlockId to properties
    blocks: FxHashMap<BlockId, BlockProperties>,
    /// Map from name to BlockId
    name_to_id: FxHashMap<String, BlockId>,
    /// All registered blocks
    registrations: Vec<BlockRegistration>,
    next_game_id: u16,
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockRegistry {
    /// Registry preloaded with the engine's basic blocks
    pub fn new() -> Self {
        let mut registry = Self::empty();
        basic_blocks::register_basic_blocks(&mut registry);
        registry
    }

    /// Registry with nothing but air
    pub fn empty() -> Self {
        let mut blocks = FxHashMap::default();
        blocks.insert(BlockId::AIR, BlockProperties::default());
        Self {
            blocks,
            name_to_id: FxHashMap::default(),
            registrations: Vec::new(),
            next_game_id: FIRST_GAME_BLOCK_ID,
        }
    }

    /// Register a new block type with properties
    ///
    /// Engine blocks (`engine:` prefix or no namespace) keep the id carried in
    /// their properties. Game blocks get the next free id from 100 upwards.
    pub fn register_block(&mut self, name: &str, mut properties: BlockProperties) -> Result<BlockId, WorldError> {
        if self.name_to_id.contains_key(name) {
            return Err(WorldError::DuplicateBlock(name.to_string()));
        }

        let is_engine_block = name.starts_with("engine:") || !name.contains(':');
        let id = if is_engine_block {
            if properties.id.0 >= FIRST_GAME_BLOCK_ID {
                return Err(WorldError::OperationFailed(format!(
                    "engine block '{}' uses game id {}",
                    name, properties.id.0
                )));
            }
            properties.id
        } else {
            if self.next_game_id == u16::MAX {
                return Err(WorldError::OperationFailed("block id space exhausted".to_string()));
            }
            let id = BlockId(self.next_game_id);
            self.next_game_id += 1;
            id
        };

        properties.id = id;
        self.blocks.insert(id, properties);
        self.name_to_id.insert(name.to_string(), id);
        self.registrations.push(BlockRegistration {
            id,
            name: name.to_string(),
        });

        log::debug!("[BlockRegistry::register_block] '{}' -> {}", name, id.0);
        Ok(id)
    }

    /// Get block properties by ID
    pub fn get_properties(&self, id: BlockId) -> Option<&BlockProperties> {
        self.blocks.get(&id)
    }

    /// Get a block ID by name
    pub fn get_id(&self, name: &str) -> Option<BlockId> {
        self.name_to_id.get(name).copied()
    }

    /// Get all registered blocks
    pub fn get_registrations(&self) -> &[BlockRegistration] {
        &self.registrations
    }

    /// Check if a block ID is registered
    pub fn is_registered(&self, id: BlockId) -> bool {
        self.blocks.contains_key(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::VoxelShape;

    #[test]
    fn test_basic_blocks_keep_constant_ids() {
        let registry = BlockRegistry::new();
        assert_eq!(registry.get_id("engine:stone"), Some(BlockId::STONE));
        assert_eq!(registry.get_id("engine:fence"), Some(BlockId::FENCE));
        let stone = registry.get_properties(BlockId::STONE).expect("stone registered");
        assert!(stone.collision_shape.is_full_block());
        assert!(stone.suffocating);
    }

    #[test]
    fn test_game_blocks_start_at_100() {
        let mut registry = BlockRegistry::new();
        let props = BlockProperties {
            name: "crate".to_string(),
            collision_shape: VoxelShape::block(),
            ..Default::default()
        };
        let id = registry.register_block("mygame:crate", props.clone()).expect("registers");
        assert_eq!(id, BlockId(100));
        let second = registry.register_block("mygame:crate2", props).expect("registers");
        assert_eq!(second, BlockId(101));
        assert_eq!(registry.get_properties(id).map(|p| p.id), Some(id));
    }

    #[test]
    fn test_registrations_and_lookup() {
        let registry = BlockRegistry::new();
        let names: Vec<&str> = registry.get_registrations().iter().map(|r| r.name.as_str()).collect();
        assert!(names.contains(&"engine:stone"));
        assert!(registry.is_registered(BlockId::STONE));
        assert!(registry.is_registered(BlockId::AIR));
        assert!(!registry.is_registered(BlockId(999)));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut registry = BlockRegistry::new();
        let err = registry.register_block("engine:stone", BlockProperties::default());
        assert!(matches!(err, Err(WorldError::DuplicateBlock(_))));
    }
}
