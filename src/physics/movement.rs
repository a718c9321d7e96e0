//! Movement clipping against a set of collision shapes
//!
//! Movement is resolved one axis at a time: vertical first, then the larger
//! of the two horizontal components. Each axis is clipped against the box
//! already displaced by the axes resolved before it.

use super::aabb::{aabb_translated, AABB};
use super::voxel_shape::VoxelShape;
use super::Axis;
use crate::constants::geometry::EPSILON;
use cgmath::Vector3;

/// Order in which the axes of `movement` are resolved
pub fn axis_step_order(movement: Vector3<f64>) -> [Axis; 3] {
    if movement.x.abs() < movement.z.abs() {
        [Axis::Y, Axis::Z, Axis::X]
    } else {
        [Axis::Y, Axis::X, Axis::Z]
    }
}

/// Clip one axis of motion against every shape
pub fn collide_axis(axis: Axis, moving: &AABB, shapes: &[VoxelShape], mut distance: f64) -> f64 {
    for shape in shapes {
        if distance.abs() < EPSILON {
            return 0.0;
        }
        distance = shape.collide(axis, moving, distance);
    }
    distance
}

/// Largest part of `movement` the box can perform without entering any shape
pub fn collide_with_shapes(movement: Vector3<f64>, moving: &AABB, shapes: &[VoxelShape]) -> Vector3<f64> {
    if shapes.is_empty() {
        return movement;
    }
    let mut resolved = Vector3::new(0.0, 0.0, 0.0);
    for axis in axis_step_order(movement) {
        let wanted = axis.of_vector(movement);
        if wanted != 0.0 {
            let allowed = collide_axis(axis, &aabb_translated(moving, resolved), shapes, wanted);
            resolved = axis.with(resolved, allowed);
        }
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::aabb::aabb_from_bounds;
    use crate::world::core::VoxelPos;

    #[test]
    fn test_no_shapes_passes_movement_through() {
        let b = aabb_from_bounds(0.0, 0.0, 0.0, 1.0, 1.0, 1.0);
        let m = Vector3::new(1.0, -2.0, 3.0);
        assert_eq!(collide_with_shapes(m, &b, &[]), m);
    }

    #[test]
    fn test_landing_then_sliding() {
        // Floor of two cells, wall at x = 2
        let shapes = vec![
            VoxelShape::block().translate_to(VoxelPos::new(0, 0, 0)),
            VoxelShape::block().translate_to(VoxelPos::new(1, 0, 0)),
            VoxelShape::block().translate_to(VoxelPos::new(2, 1, 0)),
        ];
        let player = aabb_from_bounds(0.2, 1.5, 0.2, 0.8, 3.3, 0.8);
        let resolved = collide_with_shapes(Vector3::new(2.0, -1.0, 0.0), &player, &shapes);
        assert!((resolved.y - -0.5).abs() < 1e-9);
        assert!((resolved.x - 1.2).abs() < 1e-9);
        assert_eq!(resolved.z, 0.0);
    }

    #[test]
    fn test_axis_order_prefers_larger_horizontal() {
        assert_eq!(axis_step_order(Vector3::new(0.1, 0.0, 1.0)), [Axis::Y, Axis::Z, Axis::X]);
        assert_eq!(axis_step_order(Vector3::new(1.0, 0.0, 0.1)), [Axis::Y, Axis::X, Axis::Z]);
    }
}
