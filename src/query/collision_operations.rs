//! Collision Operations - Pure DOP Functions
//!
//! Box-against-world queries built on the block-collision enumerator:
//! overlap tests, shape gathering, suffocation checks, support lookup,
//! free-position search and movement clipping.

use super::block_collisions::BlockCollisions;
use super::collision_context::{CollisionContext, CollisionSubject};
use crate::constants::geometry::EPSILON;
use crate::physics::aabb::{aabb_expand_towards, aabb_inflate, aabb_is_degenerate, AABB};
use crate::physics::{collide_with_shapes, join, join_is_not_empty, union_all, BooleanOp, VoxelShape};
use crate::world::core::VoxelPos;
use crate::world::interfaces::{ChunkSource, EntityShapeProvider};
use cgmath::{Point3, Vector3, Zero};

// ============================================================================
// SHAPE SOURCES
// ============================================================================

/// Lazy block shapes overlapping `query_box`
pub fn block_collisions<'w, 'c, W: ChunkSource, C: CollisionContext>(
    world: &'w W,
    context: &'c C,
    query_box: AABB,
) -> BlockCollisions<'w, 'c, W, C> {
    BlockCollisions::new(world, context, query_box, false)
}

/// Shapes of entities the subject can bump into
pub fn entity_collisions<E, C>(entities: &E, context: &C, query_box: &AABB) -> Vec<VoxelShape>
where
    E: EntityShapeProvider + ?Sized,
    C: CollisionContext,
{
    if aabb_is_degenerate(query_box) {
        return Vec::new();
    }
    let area = aabb_inflate(query_box, Vector3::new(EPSILON, EPSILON, EPSILON));
    let exclude = context.subject().map(|subject| subject.id);
    entities
        .entities_intersecting(&area, exclude)
        .into_iter()
        .filter(|entity| entity.can_collide && !entity.spectator)
        .map(|entity| entity.shape)
        .collect()
}

/// Outside of the world border, when a subject is inside and near it
pub fn border_collision<W: ChunkSource, C: CollisionContext>(
    world: &W,
    context: &C,
    query_box: &AABB,
) -> Option<VoxelShape> {
    let subject = context.subject()?;
    let border = world.world_border()?;
    if border.is_inside_close_to_border(&subject.bounding_box) || border.is_inside_close_to_border(query_box) {
        Some(border.collision_shape())
    } else {
        None
    }
}

// ============================================================================
// QUERIES
// ============================================================================

/// Nothing solid overlaps the box
pub fn no_collision<W, E, C>(world: &W, entities: &E, context: &C, query_box: &AABB) -> bool
where
    W: ChunkSource,
    E: EntityShapeProvider + ?Sized,
    C: CollisionContext,
{
    if aabb_is_degenerate(query_box) {
        return true;
    }
    if block_collisions(world, context, *query_box).next().is_some() {
        return false;
    }
    if !entity_collisions(entities, context, query_box).is_empty() {
        return false;
    }
    match border_collision(world, context, query_box) {
        Some(border) => !join_is_not_empty(&border, &VoxelShape::from_aabb(query_box), BooleanOp::And),
        None => true,
    }
}

/// Every shape overlapping the box: entities, then the border, then blocks
pub fn collisions<W, E, C>(world: &W, entities: &E, context: &C, query_box: &AABB) -> Vec<VoxelShape>
where
    W: ChunkSource,
    E: EntityShapeProvider + ?Sized,
    C: CollisionContext,
{
    let mut shapes = entity_collisions(entities, context, query_box);
    if let Some(border) = border_collision(world, context, query_box) {
        shapes.push(border);
    }
    shapes.extend(block_collisions(world, context, *query_box).map(|(_, shape)| shape));
    shapes
}

pub fn touches_suffocating_block<W: ChunkSource, C: CollisionContext>(world: &W, context: &C, query_box: &AABB) -> bool {
    BlockCollisions::new(world, context, *query_box, true).next().is_some()
}

/// Colliding cell whose center is closest to the subject's feet
///
/// Equal distances resolve to the greater cell in `(y, z, x)` order.
pub fn find_supporting_cell<W: ChunkSource>(world: &W, subject: &CollisionSubject, query_box: &AABB) -> Option<VoxelPos> {
    let mut best: Option<(VoxelPos, f64)> = None;
    for (pos, _) in block_collisions(world, subject, *query_box) {
        let distance = pos.dist_to_center_sqr(subject.position);
        let better = match best {
            None => true,
            Some((best_pos, best_distance)) => {
                distance < best_distance || (distance == best_distance && best_pos < pos)
            }
        };
        if better {
            best = Some((pos, distance));
        }
    }
    best.map(|(pos, _)| pos)
}

/// Point of `shape` nearest `reference` that stays `margin / 2` clear of blocks
///
/// `shape` holds the candidate positions. Blocks are gathered around it
/// within `margin`, only those inside the world border count.
pub fn find_free_position<W: ChunkSource, C: CollisionContext>(
    world: &W,
    context: &C,
    shape: &VoxelShape,
    reference: Point3<f64>,
    margin: Vector3<f64>,
) -> Option<Point3<f64>> {
    let bounds = shape.bounds()?;
    let search = aabb_inflate(&bounds, margin);
    let border = world.world_border();
    let half_margin = margin / 2.0;

    let blockers = union_all(
        block_collisions(world, context, search)
            .filter(|(_, block)| {
                block
                    .bounds()
                    .map_or(false, |b| border.map_or(true, |border| border.contains_aabb(&b)))
            })
            .flat_map(|(_, block)| block.to_aabbs())
            .map(|aabb| VoxelShape::from_aabb(&aabb_inflate(&aabb, half_margin))),
    );

    let free = join(shape, &blockers, BooleanOp::OnlyFirst);
    let found = free.nearest_point_to(reference);
    log::debug!("[collision_operations::find_free_position] {:?} -> {:?}", reference, found);
    found
}

/// Largest part of `movement` the box can perform before hitting anything
pub fn collide_movement<W, E, C>(
    world: &W,
    entities: &E,
    context: &C,
    moving: &AABB,
    movement: Vector3<f64>,
) -> Vector3<f64>
where
    W: ChunkSource,
    E: EntityShapeProvider + ?Sized,
    C: CollisionContext,
{
    if movement.is_zero() {
        return movement;
    }
    let swept = aabb_expand_towards(moving, movement);
    let shapes = collisions(world, entities, context, &swept);
    collide_with_shapes(movement, moving, &shapes)
}
