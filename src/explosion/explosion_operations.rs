//! Explosion Operations - Pure DOP Functions
//!
//! Resolve phase of a detonation: march a shell of rays outward to find the
//! destroyed cells, then damage and push every actor in reach according to
//! its distance and how much of it the blast can see.

use super::explosion_data::Explosion;
use crate::constants::explosion::{DAMAGE_SCALE, RESISTANCE_BIAS, RESISTANCE_SCALE};
use crate::physics::aabb::{aabb_from_bounds, aabb_size, AABB};
use crate::physics::Axis;
use crate::query::clip_blocks;
use crate::world::core::VoxelPos;
use crate::world::interfaces::{ChunkSource, ExplosionActors, ExplosionDamageCalculator};
use cgmath::{InnerSpace, MetricSpace, Point3, Vector3, Zero};
use rand::Rng;
use rustc_hash::FxHashSet;

/// Run the whole resolve phase: blocks first, then actors
pub fn resolve<W, D, A, R>(explosion: &mut Explosion, world: &W, damage: &D, actors: &mut A, rng: &mut R)
where
    W: ChunkSource,
    D: ExplosionDamageCalculator,
    A: ExplosionActors,
    R: Rng + ?Sized,
{
    let destroyed = calculate_exploded_positions(explosion, world, damage, rng);
    let hit = hurt_actors(explosion, world, actors);
    tracing::debug!(
        x = explosion.center().x,
        y = explosion.center().y,
        z = explosion.center().z,
        radius = explosion.radius(),
        destroyed,
        hit,
        "Explosion resolved"
    );
}

/// Unit directions through the outer shell of a `resolution`³ cube
pub fn shell_directions(resolution: u32) -> Vec<Vector3<f64>> {
    let last = resolution.saturating_sub(1);
    if last == 0 {
        return Vec::new();
    }
    let to_unit = |i: u32| i as f64 / last as f64 * 2.0 - 1.0;
    let on_shell = |i: u32| i == 0 || i == last;

    let mut directions = Vec::new();
    for i in 0..resolution {
        for j in 0..resolution {
            for k in 0..resolution {
                if on_shell(i) || on_shell(j) || on_shell(k) {
                    directions.push(Vector3::new(to_unit(i), to_unit(j), to_unit(k)).normalize());
                }
            }
        }
    }
    directions
}

/// March every shell ray and record the cells it breaks
///
/// Returns how many cells were added to the explosion.
pub fn calculate_exploded_positions<W, D, R>(explosion: &mut Explosion, world: &W, damage: &D, rng: &mut R) -> usize
where
    W: ChunkSource,
    D: ExplosionDamageCalculator,
    R: Rng + ?Sized,
{
    let before = explosion.to_blow.len();
    let radius = explosion.radius();
    if radius <= 0.0 {
        return 0;
    }
    let tuning = *explosion.tuning();
    let center = explosion.center();

    for direction in shell_directions(tuning.shell_resolution) {
        let mut energy = radius * (tuning.jitter_min + rng.gen::<f32>() * tuning.jitter_range);
        let step = direction * tuning.step_length;
        let mut point = center;

        while energy > 0.0 {
            let pos = VoxelPos::containing(point);
            if !world.is_within_world_bounds(pos) {
                break;
            }
            if let Some(resistance) = damage.resistance_at(world, pos) {
                energy -= (resistance + RESISTANCE_BIAS) * RESISTANCE_SCALE;
            }
            if energy > 0.0 && damage.should_destroy(world, pos, energy) {
                explosion.to_blow.insert(pos);
            }
            point += step;
            energy -= tuning.step_decay;
        }
    }

    let added = explosion.to_blow.len() - before;
    log::debug!(
        "[explosion_operations::calculate_exploded_positions] radius {} destroyed {} cells",
        radius,
        added
    );
    added
}

/// Damage and push every actor within twice the radius
///
/// Each actor is affected at most once, even if the provider lists it twice.
/// Returns the number of actors affected.
pub fn hurt_actors<W, A>(explosion: &mut Explosion, world: &W, actors: &mut A) -> usize
where
    W: ChunkSource,
    A: ExplosionActors,
{
    let diameter = explosion.radius() as f64 * 2.0;
    if diameter <= 0.0 {
        return 0;
    }
    let center = explosion.center();
    let source = explosion.params.source;
    let reach = aabb_from_bounds(
        (center.x - diameter - 1.0).floor(),
        (center.y - diameter - 1.0).floor(),
        (center.z - diameter - 1.0).floor(),
        (center.x + diameter + 1.0).floor(),
        (center.y + diameter + 1.0).floor(),
        (center.z + diameter + 1.0).floor(),
    );

    let mut visited = FxHashSet::default();
    for actor in actors.actors_in(&reach, source) {
        if Some(actor.id) == source {
            continue;
        }
        if !visited.insert(actor.id) {
            log::debug!("[explosion_operations::hurt_actors] actor {} listed twice, skipping", actor.id);
            continue;
        }
        if actors.is_immune_to_explosion(actor.id) {
            continue;
        }

        let exposure = actor.position.distance(center) / diameter;
        if exposure > 1.0 {
            continue;
        }

        let seen = seen_fraction(world, center, &actor.bounding_box);
        let impact = (1.0 - exposure) * seen;
        let amount = (impact * impact + impact) / 2.0 * DAMAGE_SCALE * diameter + 1.0;
        actors.hurt(actor.id, amount as f32);

        let offset = actor.eye_position() - center;
        let impulse = if offset.magnitude2() > 0.0 {
            let resistance = actors.knockback_resistance(actor.id).clamp(0.0, 1.0);
            offset.normalize() * (impact * (1.0 - resistance))
        } else {
            Vector3::zero()
        };
        actors.push(actor.id, impulse);
        explosion.knockback.insert(actor.id, impulse);
    }
    visited.len()
}

/// Fraction of sample points on the box with a clear line to `center`
pub fn seen_fraction<W: ChunkSource>(world: &W, center: Point3<f64>, bounding_box: &AABB) -> f64 {
    let spacing = |axis: Axis| 1.0 / (aabb_size(bounding_box, axis) * 2.0 + 1.0);
    let (sx, sy, sz) = (spacing(Axis::X), spacing(Axis::Y), spacing(Axis::Z));
    let samples = |s: f64| (1.0 / s).floor() as u32 + 1;
    // Centre the sample grid horizontally inside the box
    let offset_x = (1.0 - (1.0 / sx).floor() * sx) / 2.0;
    let offset_z = (1.0 - (1.0 / sz).floor() * sz) / 2.0;

    let lerp = |t: f64, lo: f64, hi: f64| lo + t * (hi - lo);
    let (min, max) = (bounding_box.min, bounding_box.max);
    let mut clear = 0u32;
    let mut total = 0u32;
    for i in 0..samples(sx) {
        for j in 0..samples(sy) {
            for k in 0..samples(sz) {
                let sample = Point3::new(
                    lerp(i as f64 * sx, min.x, max.x) + offset_x,
                    lerp(j as f64 * sy, min.y, max.y),
                    lerp(k as f64 * sz, min.z, max.z) + offset_z,
                );
                if clip_blocks(world, sample, center).is_none() {
                    clear += 1;
                }
                total += 1;
            }
        }
    }
    if total == 0 {
        0.0
    } else {
        clear as f64 / total as f64
    }
}
