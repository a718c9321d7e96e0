//! Physics Module - collision geometry for voxel worlds
//!
//! Boxes, per-cell shapes with boolean algebra, and movement clipping.

pub mod aabb;
pub mod movement;
pub mod shape_operations;
pub mod voxel_shape;

use cgmath::{Point3, Vector3};

// Simple re-exports
pub use aabb::AABB;
pub use movement::{axis_step_order, collide_with_shapes};
pub use shape_operations::{join, join_is_not_empty, union_all};
pub use voxel_shape::{BooleanOp, GridShape, ShapeHit, VoxelShape};

/// Entity ID type
pub type EntityId = u32;

/// One of the three world axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    pub fn of_point(self, point: Point3<f64>) -> f64 {
        match self {
            Axis::X => point.x,
            Axis::Y => point.y,
            Axis::Z => point.z,
        }
    }

    pub fn of_vector(self, vector: Vector3<f64>) -> f64 {
        match self {
            Axis::X => vector.x,
            Axis::Y => vector.y,
            Axis::Z => vector.z,
        }
    }

    /// Copy of `vector` with this axis' component replaced
    pub fn with(self, vector: Vector3<f64>, value: f64) -> Vector3<f64> {
        match self {
            Axis::X => Vector3::new(value, vector.y, vector.z),
            Axis::Y => Vector3::new(vector.x, value, vector.z),
            Axis::Z => Vector3::new(vector.x, vector.y, value),
        }
    }

    /// The two axes perpendicular to this one
    pub fn others(self) -> [Axis; 2] {
        match self {
            Axis::X => [Axis::Y, Axis::Z],
            Axis::Y => [Axis::X, Axis::Z],
            Axis::Z => [Axis::X, Axis::Y],
        }
    }
}
