//! Explosion Data - Pure DOP Structures
//!
//! One `Explosion` record per detonation. explosion_operations fills it
//! during resolve, drops empties it into the world during finalize.

use crate::config::ExplosionTuning;
use crate::physics::EntityId;
use crate::world::core::{ItemStack, VoxelPos};
use cgmath::{Point3, Vector3};
use rustc_hash::{FxHashMap, FxHashSet};

/// What an explosion does to the blocks it reaches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlockInteraction {
    /// Leave blocks untouched
    Keep,
    /// Remove blocks and drop all of their items
    #[default]
    Destroy,
    /// Remove blocks; each drop survives with probability `1 / radius`
    DestroyWithDecay,
    /// Activate triggerable blocks without removing anything
    TriggerBlock,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExplosionParams {
    pub center: Point3<f64>,
    pub radius: f32,
    /// Actor that caused the explosion; never affected by it
    pub source: Option<EntityId>,
    pub fire: bool,
    pub interaction: BlockInteraction,
}

impl ExplosionParams {
    pub fn new(center: Point3<f64>, radius: f32) -> Self {
        Self {
            center,
            radius,
            source: None,
            fire: false,
            interaction: BlockInteraction::Destroy,
        }
    }

    pub fn with_source(mut self, source: EntityId) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_fire(mut self, fire: bool) -> Self {
        self.fire = fire;
        self
    }

    pub fn with_interaction(mut self, interaction: BlockInteraction) -> Self {
        self.interaction = interaction;
        self
    }
}

/// State of one detonation
#[derive(Debug, Clone)]
pub struct Explosion {
    pub params: ExplosionParams,
    /// Validated on construction
    tuning: ExplosionTuning,
    /// Cells the rays destroyed
    pub to_blow: FxHashSet<VoxelPos>,
    /// Impulse applied to each actor
    pub knockback: FxHashMap<EntityId, Vector3<f64>>,
}

impl Explosion {
    /// # Panics
    /// Panics if the radius is negative or not finite.
    pub fn new(params: ExplosionParams) -> Self {
        Self::with_tuning(params, ExplosionTuning::default())
    }

    /// # Panics
    /// Also panics if `tuning` fails [`ExplosionTuning::validate`].
    pub fn with_tuning(params: ExplosionParams, tuning: ExplosionTuning) -> Self {
        if let Err(e) = tuning.validate() {
            panic!("explosion tuning rejected: {}", e);
        }
        assert!(
            params.radius.is_finite() && params.radius >= 0.0,
            "explosion radius must be finite and non-negative, got {}",
            params.radius
        );
        assert!(
            params.center.x.is_finite() && params.center.y.is_finite() && params.center.z.is_finite(),
            "explosion center must be finite"
        );
        Self {
            params,
            tuning,
            to_blow: FxHashSet::default(),
            knockback: FxHashMap::default(),
        }
    }

    pub fn center(&self) -> Point3<f64> {
        self.params.center
    }

    pub fn radius(&self) -> f32 {
        self.params.radius
    }

    pub fn tuning(&self) -> &ExplosionTuning {
        &self.tuning
    }
}

/// Items left at one position after finalize
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropEntry {
    pub stack: ItemStack,
    pub position: VoxelPos,
}

/// Everything finalize changed in the world
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExplosionReport {
    /// Cells set to air, in the order they were processed
    pub destroyed: Vec<VoxelPos>,
    /// Triggerable blocks that were activated
    pub triggered: Vec<VoxelPos>,
    pub drops: Vec<DropEntry>,
    /// Cells where fire was placed
    pub fires: Vec<VoxelPos>,
}
