//! Per-cell collision shapes
//!
//! A shape is either empty, the full unit cube, or a general region stored as
//! a rectilinear grid: sorted breakpoints per axis plus one occupancy bit per
//! grid cell. Shapes are authored in cell-local space (`0..1` on each axis,
//! oversized blocks may extend past it) and translated into world space
//! before being compared with query boxes.

use super::aabb::{aabb_clip, aabb_for_cell, aabb_from_bounds, aabb_max, aabb_min, aabb_translated, AABB};
use super::Axis;
use crate::constants::{geometry::EPSILON, raycast::INSIDE_SAMPLE};
use crate::world::core::{BlockFace, VoxelPos};
use bit_vec::BitVec;
use cgmath::{InnerSpace, MetricSpace, Point3, Vector3};
use std::borrow::Cow;

/// How two shapes are combined cell by cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOp {
    And,
    Or,
    OnlyFirst,
    OnlySecond,
    NotSame,
}

impl BooleanOp {
    pub fn apply(self, first: bool, second: bool) -> bool {
        match self {
            BooleanOp::And => first && second,
            BooleanOp::Or => first || second,
            BooleanOp::OnlyFirst => first && !second,
            BooleanOp::OnlySecond => !first && second,
            BooleanOp::NotSame => first != second,
        }
    }
}

/// Collision geometry of one cell, or of any region once combined
#[derive(Debug, Clone, PartialEq)]
pub enum VoxelShape {
    Empty,
    /// The unit cube `[0, 1]³` in cell-local space
    Full,
    General(GridShape),
}

/// Rectilinear occupancy grid
///
/// `xs`, `ys` and `zs` hold strictly increasing breakpoints. Grid cell
/// `(i, j, k)` spans `xs[i]..xs[i + 1]` and so on, and is part of the shape
/// when its bit in `filled` is set.
#[derive(Debug, Clone, PartialEq)]
pub struct GridShape {
    xs: Vec<f64>,
    ys: Vec<f64>,
    zs: Vec<f64>,
    filled: BitVec,
}

/// Where a segment meets a shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeHit {
    pub location: Point3<f64>,
    pub face: BlockFace,
    /// Segment parameter of `location` in `[0, 1]`
    pub fraction: f64,
    pub inside: bool,
}

impl GridShape {
    /// Build a grid from breakpoints and a per-cell predicate
    pub fn from_fn<F>(xs: Vec<f64>, ys: Vec<f64>, zs: Vec<f64>, mut is_filled: F) -> Self
    where
        F: FnMut(usize, usize, usize) -> bool,
    {
        let (nx, ny, nz) = (xs.len().saturating_sub(1), ys.len().saturating_sub(1), zs.len().saturating_sub(1));
        let mut filled = BitVec::from_elem(nx * ny * nz, false);
        for i in 0..nx {
            for j in 0..ny {
                for k in 0..nz {
                    if is_filled(i, j, k) {
                        filled.set((i * ny + j) * nz + k, true);
                    }
                }
            }
        }
        Self { xs, ys, zs, filled }
    }

    /// A single filled box
    pub fn single(aabb: &AABB) -> Self {
        Self::from_fn(
            vec![aabb.min.x, aabb.max.x],
            vec![aabb.min.y, aabb.max.y],
            vec![aabb.min.z, aabb.max.z],
            |_, _, _| true,
        )
    }

    pub fn breakpoints(&self, axis: Axis) -> &[f64] {
        match axis {
            Axis::X => &self.xs,
            Axis::Y => &self.ys,
            Axis::Z => &self.zs,
        }
    }

    fn dims(&self) -> (usize, usize, usize) {
        (
            self.xs.len().saturating_sub(1),
            self.ys.len().saturating_sub(1),
            self.zs.len().saturating_sub(1),
        )
    }

    pub fn is_filled(&self, i: usize, j: usize, k: usize) -> bool {
        let (_, ny, nz) = self.dims();
        self.filled.get((i * ny + j) * nz + k).unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        self.filled.none()
    }

    /// Grid cell index containing `value` on one axis, half-open on the upper side
    fn cell_index(breakpoints: &[f64], value: f64) -> Option<usize> {
        let first = *breakpoints.first()?;
        let last = *breakpoints.last()?;
        if value < first || value >= last {
            return None;
        }
        Some(breakpoints.partition_point(|&b| b <= value) - 1)
    }

    pub fn contains_point(&self, point: Point3<f64>) -> bool {
        match (
            Self::cell_index(&self.xs, point.x),
            Self::cell_index(&self.ys, point.y),
            Self::cell_index(&self.zs, point.z),
        ) {
            (Some(i), Some(j), Some(k)) => self.is_filled(i, j, k),
            _ => false,
        }
    }

    fn translated(&self, offset: Vector3<f64>) -> Self {
        Self {
            xs: self.xs.iter().map(|v| v + offset.x).collect(),
            ys: self.ys.iter().map(|v| v + offset.y).collect(),
            zs: self.zs.iter().map(|v| v + offset.z).collect(),
            filled: self.filled.clone(),
        }
    }

    /// Tight bounds of the filled cells
    pub fn bounds(&self) -> Option<AABB> {
        let (nx, ny, nz) = self.dims();
        let mut lo = [usize::MAX; 3];
        let mut hi = [0usize; 3];
        let mut any = false;
        for i in 0..nx {
            for j in 0..ny {
                for k in 0..nz {
                    if self.is_filled(i, j, k) {
                        any = true;
                        for (axis, idx) in [i, j, k].into_iter().enumerate() {
                            lo[axis] = lo[axis].min(idx);
                            hi[axis] = hi[axis].max(idx + 1);
                        }
                    }
                }
            }
        }
        if !any {
            return None;
        }
        Some(aabb_from_bounds(
            self.xs[lo[0]],
            self.ys[lo[1]],
            self.zs[lo[2]],
            self.xs[hi[0]],
            self.ys[hi[1]],
            self.zs[hi[2]],
        ))
    }

    /// Filled region as boxes, merging runs of filled cells along z
    pub fn to_aabbs(&self) -> Vec<AABB> {
        let (nx, ny, nz) = self.dims();
        let mut boxes = Vec::new();
        for i in 0..nx {
            for j in 0..ny {
                let mut k = 0;
                while k < nz {
                    if !self.is_filled(i, j, k) {
                        k += 1;
                        continue;
                    }
                    let start = k;
                    while k < nz && self.is_filled(i, j, k) {
                        k += 1;
                    }
                    boxes.push(aabb_from_bounds(
                        self.xs[i],
                        self.ys[j],
                        self.zs[start],
                        self.xs[i + 1],
                        self.ys[j + 1],
                        self.zs[k],
                    ));
                }
            }
        }
        boxes
    }
}

impl VoxelShape {
    pub fn empty() -> Self {
        VoxelShape::Empty
    }

    pub fn block() -> Self {
        VoxelShape::Full
    }

    /// Shape covering exactly one box
    ///
    /// The unit cube becomes the `Full` sentinel and boxes without volume become `Empty`.
    pub fn from_aabb(aabb: &AABB) -> Self {
        if Axis::ALL.iter().any(|&axis| aabb_max(aabb, axis) - aabb_min(aabb, axis) < EPSILON) {
            return VoxelShape::Empty;
        }
        if *aabb == aabb_for_cell(VoxelPos::new(0, 0, 0)) {
            return VoxelShape::Full;
        }
        VoxelShape::General(GridShape::single(aabb))
    }

    /// Box in cell-local coordinates
    pub fn cuboid(min_x: f64, min_y: f64, min_z: f64, max_x: f64, max_y: f64, max_z: f64) -> Self {
        Self::from_aabb(&aabb_from_bounds(min_x, min_y, min_z, max_x, max_y, max_z))
    }

    pub fn is_empty(&self) -> bool {
        match self {
            VoxelShape::Empty => true,
            VoxelShape::Full => false,
            VoxelShape::General(grid) => grid.is_empty(),
        }
    }

    pub fn is_full_block(&self) -> bool {
        matches!(self, VoxelShape::Full)
    }

    /// Grid view of the shape; `None` when empty
    pub fn as_grid(&self) -> Option<Cow<'_, GridShape>> {
        match self {
            VoxelShape::Empty => None,
            VoxelShape::Full => Some(Cow::Owned(GridShape::single(&aabb_for_cell(VoxelPos::new(0, 0, 0))))),
            VoxelShape::General(grid) => Some(Cow::Borrowed(grid)),
        }
    }

    pub fn translate(&self, dx: f64, dy: f64, dz: f64) -> VoxelShape {
        let offset = Vector3::new(dx, dy, dz);
        match self.as_grid() {
            None => VoxelShape::Empty,
            Some(grid) => VoxelShape::General(grid.translated(offset)),
        }
    }

    /// Move a cell-local shape to its place in the world
    pub fn translate_to(&self, pos: VoxelPos) -> VoxelShape {
        self.translate(pos.x as f64, pos.y as f64, pos.z as f64)
    }

    pub fn bounds(&self) -> Option<AABB> {
        match self {
            VoxelShape::Empty => None,
            VoxelShape::Full => Some(aabb_for_cell(VoxelPos::new(0, 0, 0))),
            VoxelShape::General(grid) => grid.bounds(),
        }
    }

    pub fn bounds_on_axis(&self, axis: Axis) -> Option<(f64, f64)> {
        self.bounds().map(|b| (aabb_min(&b, axis), aabb_max(&b, axis)))
    }

    pub fn to_aabbs(&self) -> Vec<AABB> {
        self.as_grid().map(|grid| grid.to_aabbs()).unwrap_or_default()
    }

    pub fn contains_point(&self, point: Point3<f64>) -> bool {
        self.as_grid().map(|grid| grid.contains_point(point)).unwrap_or(false)
    }

    /// Point of the shape closest to `point`; the first box wins ties
    pub fn nearest_point_to(&self, point: Point3<f64>) -> Option<Point3<f64>> {
        let mut best: Option<(Point3<f64>, f64)> = None;
        for aabb in self.to_aabbs() {
            let candidate = Point3::new(
                point.x.clamp(aabb.min.x, aabb.max.x),
                point.y.clamp(aabb.min.y, aabb.max.y),
                point.z.clamp(aabb.min.z, aabb.max.z),
            );
            let dist = point.distance2(candidate);
            if best.map_or(true, |(_, d)| dist < d) {
                best = Some((candidate, dist));
            }
        }
        best.map(|(p, _)| p)
    }

    /// Intersect the segment with this cell-local shape placed at `pos`
    pub fn clip(&self, from: Point3<f64>, to: Point3<f64>, pos: VoxelPos) -> Option<ShapeHit> {
        if self.is_empty() {
            return None;
        }
        let delta = to - from;
        if delta.magnitude2() < EPSILON {
            return None;
        }

        let offset = pos.corner() - Point3::new(0.0, 0.0, 0.0);
        let sample = from + delta * INSIDE_SAMPLE;
        if self.contains_point(sample - offset) {
            return Some(ShapeHit {
                location: sample,
                face: BlockFace::nearest(delta).opposite(),
                fraction: INSIDE_SAMPLE,
                inside: true,
            });
        }

        let mut best: Option<(f64, BlockFace)> = None;
        for aabb in self.to_aabbs() {
            let world_box = aabb_translated(&aabb, offset);
            if let Some((t, face)) = aabb_clip(&world_box, from, to) {
                if best.map_or(true, |(bt, _)| t < bt) {
                    best = Some((t, face));
                }
            }
        }
        best.map(|(t, face)| ShapeHit {
            location: from + delta * t,
            face,
            fraction: t,
            inside: false,
        })
    }

    /// Clip a movement of `box` along `axis` against this world-space shape
    ///
    /// Returns the largest distance (same sign as `max_distance`) the box can
    /// travel before touching the shape.
    pub fn collide(&self, axis: Axis, moving: &AABB, max_distance: f64) -> f64 {
        let mut allowed = max_distance;
        let [a, b] = axis.others();
        for aabb in self.to_aabbs() {
            if allowed.abs() < EPSILON {
                return 0.0;
            }
            let overlaps_sideways = aabb_max(&aabb, a) > aabb_min(moving, a) + EPSILON
                && aabb_min(&aabb, a) < aabb_max(moving, a) - EPSILON
                && aabb_max(&aabb, b) > aabb_min(moving, b) + EPSILON
                && aabb_min(&aabb, b) < aabb_max(moving, b) - EPSILON;
            if !overlaps_sideways {
                continue;
            }
            if allowed > 0.0 && aabb_min(&aabb, axis) >= aabb_max(moving, axis) - EPSILON {
                allowed = allowed.min(aabb_min(&aabb, axis) - aabb_max(moving, axis));
            } else if allowed < 0.0 && aabb_max(&aabb, axis) <= aabb_min(moving, axis) + EPSILON {
                allowed = allowed.max(aabb_max(&aabb, axis) - aabb_min(moving, axis));
            }
        }
        allowed
    }
}
