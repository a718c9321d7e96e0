use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a block type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct BlockId(pub u16);

static_assertions::assert_eq_size!(BlockId, u16);

impl Default for BlockId {
    fn default() -> Self {
        BlockId::AIR
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Display block name if it's a known block
        match *self {
            BlockId::AIR => write!(f, "Air"),
            BlockId::GRASS => write!(f, "Grass"),
            BlockId::DIRT => write!(f, "Dirt"),
            BlockId::STONE => write!(f, "Stone"),
            BlockId::SAND => write!(f, "Sand"),
            BlockId::WATER => write!(f, "Water"),
            BlockId::GLASS => write!(f, "Glass"),
            BlockId::BEDROCK => write!(f, "Bedrock"),
            BlockId::PLANKS => write!(f, "Planks"),
            BlockId::COBBLESTONE => write!(f, "Cobblestone"),
            BlockId::OBSIDIAN => write!(f, "Obsidian"),
            BlockId::SLAB => write!(f, "Slab"),
            BlockId::FENCE => write!(f, "Fence"),
            BlockId::TNT => write!(f, "TNT"),
            BlockId::FIRE => write!(f, "Fire"),
            BlockId::BUTTON => write!(f, "Button"),
            BlockId::TALL_GRASS => write!(f, "Tall Grass"),
            _ => write!(f, "Block({})", self.0),
        }
    }
}

impl BlockId {
    pub const AIR: BlockId = BlockId(0);
    pub const GRASS: BlockId = BlockId(1);
    pub const DIRT: BlockId = BlockId(2);
    pub const STONE: BlockId = BlockId(3);
    pub const SAND: BlockId = BlockId(5);
    pub const WATER: BlockId = BlockId(6);
    pub const GLASS: BlockId = BlockId(8);
    pub const BEDROCK: BlockId = BlockId(13);
    pub const PLANKS: BlockId = BlockId(14);
    pub const COBBLESTONE: BlockId = BlockId(15);
    pub const TALL_GRASS: BlockId = BlockId(26);
    pub const OBSIDIAN: BlockId = BlockId(37);
    pub const SLAB: BlockId = BlockId(38);
    pub const FENCE: BlockId = BlockId(39);
    pub const TNT: BlockId = BlockId(40);
    pub const FIRE: BlockId = BlockId(41);
    pub const BUTTON: BlockId = BlockId(42);

    /// Create a new BlockId from a raw u16 value
    pub const fn new(id: u16) -> Self {
        BlockId(id)
    }

    pub const fn is_air(self) -> bool {
        self.0 == BlockId::AIR.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_id_display() {
        assert_eq!(BlockId::STONE.to_string(), "Stone");
        assert_eq!(BlockId(999).to_string(), "Block(999)");
    }

    #[test]
    fn test_default_is_air() {
        assert!(BlockId::default().is_air());
        assert!(!BlockId::FENCE.is_air());
    }
}
