//! Integer grid positions
//!
//! `VoxelPos` addresses one unit cell, `ChunkPos` addresses a cubic chunk of
//! `chunk_size` cells per edge. Both support negative coordinates.

use cgmath::Point3;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Position of a single cell in world space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct VoxelPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

/// Position of a chunk in chunk space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ChunkPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl VoxelPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Cell containing a continuous point
    pub fn containing(point: Point3<f64>) -> Self {
        Self {
            x: point.x.floor() as i32,
            y: point.y.floor() as i32,
            z: point.z.floor() as i32,
        }
    }

    /// Neighbouring cell, clamped at the edge of the i32 grid
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            z: self.z.saturating_add(dz),
        }
    }

    pub const fn below(self) -> Self {
        self.offset(0, -1, 0)
    }

    /// Minimum corner of the cell in world space
    pub fn corner(self) -> Point3<f64> {
        Point3::new(self.x as f64, self.y as f64, self.z as f64)
    }

    /// Center of the cell in world space
    pub fn center(self) -> Point3<f64> {
        Point3::new(
            self.x as f64 + 0.5,
            self.y as f64 + 0.5,
            self.z as f64 + 0.5,
        )
    }

    /// Squared distance from the cell center to a point
    pub fn dist_to_center_sqr(self, point: Point3<f64>) -> f64 {
        let c = self.center();
        let (dx, dy, dz) = (c.x - point.x, c.y - point.y, c.z - point.z);
        dx * dx + dy * dy + dz * dz
    }

    pub fn to_chunk_pos(self, chunk_size: u32) -> ChunkPos {
        let size = chunk_size as i32;
        ChunkPos {
            x: self.x.div_euclid(size),
            y: self.y.div_euclid(size),
            z: self.z.div_euclid(size),
        }
    }
}

/// Cells order by height first, then z, then x.
impl Ord for VoxelPos {
    fn cmp(&self, other: &Self) -> Ordering {
        self.y
            .cmp(&other.y)
            .then(self.z.cmp(&other.z))
            .then(self.x.cmp(&other.x))
    }
}

impl PartialOrd for VoxelPos {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl ChunkPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}
