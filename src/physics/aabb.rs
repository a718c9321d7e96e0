/// Data-Oriented Axis-Aligned Bounding Box System
///
/// Pure functions for collision detection - no methods, just data transformations.
use super::Axis;
use crate::constants::geometry::EPSILON;
use crate::world::core::{BlockFace, VoxelPos};
use cgmath::{Point3, Vector3};

/// Axis-Aligned Bounding Box - pure data structure
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

/// Create new AABB from two opposite corners
/// Corners may be given in any order; NaN coordinates are a contract violation
pub fn create_aabb(a: Point3<f64>, b: Point3<f64>) -> AABB {
    assert!(
        !(a.x.is_nan() || a.y.is_nan() || a.z.is_nan() || b.x.is_nan() || b.y.is_nan() || b.z.is_nan()),
        "AABB corners must not be NaN: {:?} {:?}",
        a,
        b
    );
    AABB {
        min: Point3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
        max: Point3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
    }
}

/// Create AABB from raw bounds
pub fn aabb_from_bounds(min_x: f64, min_y: f64, min_z: f64, max_x: f64, max_y: f64, max_z: f64) -> AABB {
    create_aabb(Point3::new(min_x, min_y, min_z), Point3::new(max_x, max_y, max_z))
}

/// Unit box occupied by a cell
pub fn aabb_for_cell(pos: VoxelPos) -> AABB {
    let min = pos.corner();
    AABB {
        min,
        max: Point3::new(min.x + 1.0, min.y + 1.0, min.z + 1.0),
    }
}

pub fn aabb_min(aabb: &AABB, axis: Axis) -> f64 {
    axis.of_point(aabb.min)
}

pub fn aabb_max(aabb: &AABB, axis: Axis) -> f64 {
    axis.of_point(aabb.max)
}

pub fn aabb_size(aabb: &AABB, axis: Axis) -> f64 {
    aabb_max(aabb, axis) - aabb_min(aabb, axis)
}

/// A box thinner than the geometry tolerance on any axis encloses no volume
pub fn aabb_is_degenerate(aabb: &AABB) -> bool {
    Axis::ALL.iter().any(|&axis| aabb_size(aabb, axis) < EPSILON)
}

/// Test if two AABBs overlap with positive volume
/// Touching faces do not count as an intersection
pub fn aabb_intersects(aabb1: &AABB, aabb2: &AABB) -> bool {
    aabb1.min.x < aabb2.max.x
        && aabb1.max.x > aabb2.min.x
        && aabb1.min.y < aabb2.max.y
        && aabb1.max.y > aabb2.min.y
        && aabb1.min.z < aabb2.max.z
        && aabb1.max.z > aabb2.min.z
}

/// Create translated copy of AABB
pub fn aabb_translated(aabb: &AABB, offset: Vector3<f64>) -> AABB {
    AABB {
        min: aabb.min + offset,
        max: aabb.max + offset,
    }
}

/// Grow the box by `amount` on both sides of every axis
pub fn aabb_inflate(aabb: &AABB, amount: Vector3<f64>) -> AABB {
    create_aabb(aabb.min - amount, aabb.max + amount)
}

/// Stretch the box so it also covers itself translated by `delta`
pub fn aabb_expand_towards(aabb: &AABB, delta: Vector3<f64>) -> AABB {
    let mut result = *aabb;
    for axis in Axis::ALL {
        let d = axis.of_vector(delta);
        let i = axis.index();
        if d < 0.0 {
            result.min[i] += d;
        } else if d > 0.0 {
            result.max[i] += d;
        }
    }
    result
}

/// Intersect the segment `from -> to` with the box
///
/// Returns the segment parameter in `[0, 1]` where the segment enters the box
/// and the face it enters through. Segments starting inside the box report no
/// entry.
pub fn aabb_clip(aabb: &AABB, from: Point3<f64>, to: Point3<f64>) -> Option<(f64, BlockFace)> {
    let delta = to - from;
    let mut t_enter = f64::NEG_INFINITY;
    let mut t_exit: f64 = 1.0;
    let mut face = None;

    for axis in Axis::ALL {
        let origin = axis.of_point(from);
        let dir = axis.of_vector(delta);
        let (lo, hi) = (aabb_min(aabb, axis), aabb_max(aabb, axis));

        if dir.abs() < 1e-12 {
            // Parallel to this slab
            if origin < lo || origin > hi {
                return None;
            }
            continue;
        }

        let (near, far, near_face) = if dir > 0.0 {
            ((lo - origin) / dir, (hi - origin) / dir, BlockFace::from_axis(axis, false))
        } else {
            ((hi - origin) / dir, (lo - origin) / dir, BlockFace::from_axis(axis, true))
        };

        if near > t_enter {
            t_enter = near;
            face = Some(near_face);
        }
        t_exit = t_exit.min(far);

        if t_enter > t_exit {
            return None;
        }
    }

    match face {
        Some(face) if t_enter >= 0.0 && t_enter <= 1.0 => Some((t_enter, face)),
        _ => None,
    }
}
