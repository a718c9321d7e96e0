//! Basic engine blocks
//!
//! This module defines the fundamental blocks that come with the engine.
//! Games can register additional blocks on top of these.

use crate::physics::VoxelShape;
use crate::world::blocks::block_data::BlockProperties;
use crate::world::core::{BlockId, BlockRegistry, ItemId, ItemStack};

/// Item ids dropped by the basic blocks
pub mod items {
    use crate::world::core::ItemId;

    pub const DIRT: ItemId = ItemId(2);
    pub const COBBLESTONE: ItemId = ItemId(15);
    pub const SAND: ItemId = ItemId(5);
    pub const PLANKS: ItemId = ItemId(14);
    pub const SLAB: ItemId = ItemId(38);
    pub const FENCE: ItemId = ItemId(39);
    pub const TNT: ItemId = ItemId(40);
    pub const BUTTON: ItemId = ItemId(42);
}

fn solid(id: BlockId, name: &str, blast_resistance: f32, drop: Option<ItemId>) -> BlockProperties {
    BlockProperties {
        id,
        name: name.to_string(),
        collision_shape: VoxelShape::block(),
        suffocating: true,
        blast_resistance: Some(blast_resistance),
        triggerable: false,
        drop: drop.map(|item| ItemStack::new(item, 1, 64)),
    }
}

pub fn create_air_properties() -> BlockProperties {
    BlockProperties::default()
}

pub fn create_grass_properties() -> BlockProperties {
    solid(BlockId::GRASS, "grass", 0.6, Some(items::DIRT))
}

pub fn create_dirt_properties() -> BlockProperties {
    solid(BlockId::DIRT, "dirt", 0.5, Some(items::DIRT))
}

pub fn create_stone_properties() -> BlockProperties {
    solid(BlockId::STONE, "stone", 6.0, Some(items::COBBLESTONE))
}

pub fn create_cobblestone_properties() -> BlockProperties {
    solid(BlockId::COBBLESTONE, "cobblestone", 6.0, Some(items::COBBLESTONE))
}

pub fn create_sand_properties() -> BlockProperties {
    solid(BlockId::SAND, "sand", 0.5, Some(items::SAND))
}

pub fn create_planks_properties() -> BlockProperties {
    solid(BlockId::PLANKS, "planks", 3.0, Some(items::PLANKS))
}

/// Glass blocks movement but does not suffocate
pub fn create_glass_properties() -> BlockProperties {
    BlockProperties {
        suffocating: false,
        ..solid(BlockId::GLASS, "glass", 0.3, None)
    }
}

pub fn create_bedrock_properties() -> BlockProperties {
    solid(BlockId::BEDROCK, "bedrock", 3_600_000.0, None)
}

pub fn create_obsidian_properties() -> BlockProperties {
    solid(BlockId::OBSIDIAN, "obsidian", 1200.0, None)
}

pub fn create_tnt_properties() -> BlockProperties {
    solid(BlockId::TNT, "tnt", 0.0, Some(items::TNT))
}

/// Water has no collision shape but still absorbs blasts
pub fn create_water_properties() -> BlockProperties {
    BlockProperties {
        id: BlockId::WATER,
        name: "water".to_string(),
        blast_resistance: Some(100.0),
        ..Default::default()
    }
}

pub fn create_slab_properties() -> BlockProperties {
    BlockProperties {
        id: BlockId::SLAB,
        name: "slab".to_string(),
        collision_shape: VoxelShape::cuboid(0.0, 0.0, 0.0, 1.0, 0.5, 1.0),
        suffocating: false,
        blast_resistance: Some(6.0),
        triggerable: false,
        drop: Some(ItemStack::new(items::SLAB, 1, 64)),
    }
}

/// Fence posts collide 1.5 cells high
pub fn create_fence_properties() -> BlockProperties {
    BlockProperties {
        id: BlockId::FENCE,
        name: "fence".to_string(),
        collision_shape: VoxelShape::cuboid(0.375, 0.0, 0.375, 0.625, 1.5, 0.625),
        suffocating: false,
        blast_resistance: Some(3.0),
        triggerable: false,
        drop: Some(ItemStack::new(items::FENCE, 1, 64)),
    }
}

pub fn create_button_properties() -> BlockProperties {
    BlockProperties {
        id: BlockId::BUTTON,
        name: "button".to_string(),
        collision_shape: VoxelShape::Empty,
        suffocating: false,
        blast_resistance: Some(0.5),
        triggerable: true,
        drop: Some(ItemStack::new(items::BUTTON, 1, 64)),
    }
}

pub fn create_tall_grass_properties() -> BlockProperties {
    BlockProperties {
        id: BlockId::TALL_GRASS,
        name: "tall_grass".to_string(),
        blast_resistance: Some(0.0),
        ..Default::default()
    }
}

pub fn create_fire_properties() -> BlockProperties {
    BlockProperties {
        id: BlockId::FIRE,
        name: "fire".to_string(),
        blast_resistance: Some(0.0),
        ..Default::default()
    }
}

/// Every basic block, air included
pub fn basic_block_table() -> Vec<BlockProperties> {
    vec![
        create_air_properties(),
        create_grass_properties(),
        create_dirt_properties(),
        create_stone_properties(),
        create_cobblestone_properties(),
        create_sand_properties(),
        create_planks_properties(),
        create_glass_properties(),
        create_bedrock_properties(),
        create_obsidian_properties(),
        create_tnt_properties(),
        create_water_properties(),
        create_slab_properties(),
        create_fence_properties(),
        create_button_properties(),
        create_tall_grass_properties(),
        create_fire_properties(),
    ]
}

/// Register all basic engine blocks
///
/// Engine blocks keep the ids from their `BlockId` constants.
pub fn register_basic_blocks(registry: &mut BlockRegistry) {
    for properties in basic_block_table() {
        let name = format!("engine:{}", properties.name);
        if let Err(e) = registry.register_block(&name, properties) {
            log::error!("[register_basic_blocks] Failed to register '{}': {}", name, e);
        }
    }
}
