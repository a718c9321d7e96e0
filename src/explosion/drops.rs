//! Explosion finalize phase
//!
//! Applies a resolved explosion to the world: removes or triggers blocks,
//! collects their drops into merged stacks and optionally lights fires.

use super::explosion_data::{BlockInteraction, DropEntry, Explosion, ExplosionReport};
use crate::world::core::{BlockId, ItemStack, VoxelPos};
use crate::world::interfaces::ChunkSourceMut;
use rand::seq::SliceRandom;
use rand::Rng;

/// Apply the explosion's block changes
///
/// Cells that fail to update are logged and skipped; the rest of the
/// explosion still applies.
pub fn finalize<W, R>(explosion: &Explosion, world: &mut W, rng: &mut R) -> ExplosionReport
where
    W: ChunkSourceMut,
    R: Rng + ?Sized,
{
    // Hash set order is not stable, shuffling needs a fixed start
    let mut cells: Vec<VoxelPos> = explosion.to_blow.iter().copied().collect();
    cells.sort_unstable();

    let mut report = ExplosionReport::default();
    match explosion.params.interaction {
        BlockInteraction::Keep => {}
        BlockInteraction::TriggerBlock => {
            report.triggered = cells
                .iter()
                .copied()
                .filter(|&pos| {
                    let id = world.block_at(pos);
                    world.registry().get_properties(id).map_or(false, |props| props.triggerable)
                })
                .collect();
        }
        BlockInteraction::Destroy | BlockInteraction::DestroyWithDecay => {
            let decay = explosion.params.interaction == BlockInteraction::DestroyWithDecay;
            let keep_chance = 1.0 / explosion.radius();
            cells.shuffle(rng);

            for &pos in &cells {
                let id = world.block_at(pos);
                if id.is_air() {
                    continue;
                }
                let drop = world.registry().get_properties(id).and_then(|props| props.drop);

                if let Err(e) = world.set_block(pos, BlockId::AIR) {
                    log::warn!("[explosion::finalize] Could not clear {:?}: {}", pos, e);
                    continue;
                }
                report.destroyed.push(pos);

                if let Some(stack) = drop {
                    if !decay || rng.gen::<f32>() < keep_chance {
                        add_drop(&mut report.drops, stack, pos, explosion.tuning().drop_stack_cap);
                    }
                }
            }
        }
    }

    if explosion.params.fire {
        report.fires = place_fire(explosion, &cells, world, rng);
    }

    tracing::debug!(
        interaction = ?explosion.params.interaction,
        destroyed = report.destroyed.len(),
        triggered = report.triggered.len(),
        drops = report.drops.len(),
        fires = report.fires.len(),
        "Explosion finalized"
    );
    report
}

fn place_fire<W, R>(explosion: &Explosion, cells: &[VoxelPos], world: &mut W, rng: &mut R) -> Vec<VoxelPos>
where
    W: ChunkSourceMut,
    R: Rng + ?Sized,
{
    let mut fires = Vec::new();
    for &pos in cells {
        if rng.gen_range(0..explosion.tuning().fire_chance) != 0 {
            continue;
        }
        if !world.block_at(pos).is_air() || !world.shape_and_flags(pos.below()).0.is_full_block() {
            continue;
        }
        match world.set_block(pos, BlockId::FIRE) {
            Ok(_) => fires.push(pos),
            Err(e) => log::warn!("[explosion::place_fire] Could not ignite {:?}: {}", pos, e),
        }
    }
    fires
}

/// Merge `stack` into the existing drops, appending what is left
///
/// Stacks grow up to `cap` items. The first drop of an item keeps its
/// position; overflow lands at `pos`.
pub fn add_drop(drops: &mut Vec<DropEntry>, mut stack: ItemStack, pos: VoxelPos, cap: u32) {
    for entry in drops.iter_mut() {
        entry.stack.merge_from(&mut stack, cap);
        if stack.is_empty() {
            return;
        }
    }
    drops.push(DropEntry { stack, position: pos });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExplosionTuning;
    use crate::explosion::explosion_data::ExplosionParams;
    use crate::world::blocks::basic_blocks::items;
    use crate::world::core::ItemId;
    use crate::world::data_types::WorldData;
    use crate::world::world_operations::{fill_blocks, get_block, set_block};
    use cgmath::Point3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn explosion_over(cells: &[VoxelPos], interaction: BlockInteraction) -> Explosion {
        let params = ExplosionParams::new(Point3::new(0.5, 1.5, 0.5), 4.0).with_interaction(interaction);
        let mut explosion = Explosion::new(params);
        explosion.to_blow.extend(cells.iter().copied());
        explosion
    }

    #[test]
    fn test_same_items_merge_into_one_drop() {
        let mut world = WorldData::new(16);
        fill_blocks(&mut world, VoxelPos::new(0, 0, 0), VoxelPos::new(1, 0, 0), BlockId::DIRT).expect("fill");
        let explosion = explosion_over(&[VoxelPos::new(0, 0, 0), VoxelPos::new(1, 0, 0)], BlockInteraction::Destroy);

        let report = finalize(&explosion, &mut world, &mut StdRng::seed_from_u64(2));
        assert_eq!(report.destroyed.len(), 2);
        assert_eq!(report.drops.len(), 1);
        assert_eq!(report.drops[0].stack.item, items::DIRT);
        assert_eq!(report.drops[0].stack.count, 2);
        assert_eq!(get_block(&world, VoxelPos::new(1, 0, 0)), BlockId::AIR);
    }

    #[test]
    fn test_drop_stacks_respect_cap() {
        let mut drops = Vec::new();
        for x in 0..20 {
            add_drop(&mut drops, ItemStack::new(items::DIRT, 1, 64), VoxelPos::new(x, 0, 0), 16);
        }
        add_drop(&mut drops, ItemStack::new(items::SAND, 1, 64), VoxelPos::new(0, 1, 0), 16);

        let counts: Vec<u32> = drops.iter().map(|d| d.stack.count).collect();
        assert_eq!(counts, vec![16, 4, 1]);
        assert_eq!(drops[0].position, VoxelPos::new(0, 0, 0));
        assert_eq!(drops[1].position, VoxelPos::new(16, 0, 0));
    }

    #[test]
    fn test_unstackable_items_never_merge() {
        let mut drops = Vec::new();
        add_drop(&mut drops, ItemStack::new(ItemId(500), 1, 1), VoxelPos::new(0, 0, 0), 16);
        add_drop(&mut drops, ItemStack::new(ItemId(500), 1, 1), VoxelPos::new(1, 0, 0), 16);
        assert_eq!(drops.len(), 2);
    }

    #[test]
    fn test_keep_changes_nothing() {
        let mut world = WorldData::new(16);
        fill_blocks(&mut world, VoxelPos::new(0, 0, 0), VoxelPos::new(2, 0, 0), BlockId::STONE).expect("fill");
        let cells = [VoxelPos::new(0, 0, 0), VoxelPos::new(1, 0, 0)];
        let explosion = explosion_over(&cells, BlockInteraction::Keep);

        let report = finalize(&explosion, &mut world, &mut StdRng::seed_from_u64(0));
        assert_eq!(report, ExplosionReport::default());
        assert_eq!(get_block(&world, cells[0]), BlockId::STONE);
    }

    #[test]
    fn test_trigger_reports_triggerable_blocks_only() {
        let mut world = WorldData::new(16);
        fill_blocks(&mut world, VoxelPos::new(0, 0, 0), VoxelPos::new(2, 0, 0), BlockId::STONE).expect("fill");
        set_block(&mut world, VoxelPos::new(1, 0, 0), BlockId::BUTTON).expect("set");
        let cells = [VoxelPos::new(0, 0, 0), VoxelPos::new(1, 0, 0), VoxelPos::new(2, 0, 0)];
        let explosion = explosion_over(&cells, BlockInteraction::TriggerBlock);

        let report = finalize(&explosion, &mut world, &mut StdRng::seed_from_u64(0));
        assert_eq!(report.triggered, vec![VoxelPos::new(1, 0, 0)]);
        assert!(report.destroyed.is_empty());
        assert_eq!(get_block(&world, VoxelPos::new(1, 0, 0)), BlockId::BUTTON);
    }

    #[test]
    fn test_decay_drops_no_more_than_destroy() {
        let mut world = WorldData::new(16);
        fill_blocks(&mut world, VoxelPos::new(0, 0, 0), VoxelPos::new(7, 0, 7), BlockId::SAND).expect("fill");
        let cells: Vec<VoxelPos> = (0..8).flat_map(|x| (0..8).map(move |z| VoxelPos::new(x, 0, z))).collect();
        let explosion = explosion_over(&cells, BlockInteraction::DestroyWithDecay);

        let report = finalize(&explosion, &mut world, &mut StdRng::seed_from_u64(9));
        assert_eq!(report.destroyed.len(), 64);
        let dropped: u32 = report.drops.iter().map(|d| d.stack.count).sum();
        assert!(dropped < 64);
    }

    #[test]
    fn test_failed_cells_are_skipped() {
        let mut world = WorldData::new(16);
        fill_blocks(&mut world, VoxelPos::new(0, 0, 0), VoxelPos::new(0, 0, 0), BlockId::DIRT).expect("fill");
        world.min_y = 1;
        let explosion = explosion_over(&[VoxelPos::new(0, 0, 0)], BlockInteraction::Destroy);

        let report = finalize(&explosion, &mut world, &mut StdRng::seed_from_u64(0));
        assert!(report.destroyed.is_empty());
        assert!(report.drops.is_empty());
    }

    #[test]
    fn test_fire_lands_on_solid_ground() {
        let mut world = WorldData::new(16);
        fill_blocks(&mut world, VoxelPos::new(0, 0, 0), VoxelPos::new(7, 0, 7), BlockId::STONE).expect("fill");
        let cells: Vec<VoxelPos> = (0..8).flat_map(|x| (0..8).map(move |z| VoxelPos::new(x, 1, z))).collect();
        let params = ExplosionParams::new(Point3::new(4.0, 1.5, 4.0), 3.0).with_fire(true);
        let tuning = ExplosionTuning {
            fire_chance: 1,
            ..Default::default()
        };
        let mut explosion = Explosion::with_tuning(params, tuning);
        explosion.to_blow.extend(cells.iter().copied());

        let report = finalize(&explosion, &mut world, &mut StdRng::seed_from_u64(4));
        assert_eq!(report.fires.len(), 64);
        assert_eq!(get_block(&world, VoxelPos::new(3, 1, 3)), BlockId::FIRE);
    }
}
