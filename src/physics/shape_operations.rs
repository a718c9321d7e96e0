//! Shape Operations - Pure DOP Functions
//!
//! Boolean algebra over `VoxelShape`s. Two grids are combined by merging
//! their breakpoints on every axis and classifying each merged cell by its
//! midpoint.

use super::aabb::aabb_intersects;
use super::voxel_shape::{BooleanOp, GridShape, VoxelShape};
use super::Axis;

/// Sorted union of two breakpoint lists without duplicates
fn merge_breakpoints(a: &[f64], b: &[f64]) -> Vec<f64> {
    let mut merged = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);
    while i < a.len() || j < b.len() {
        let next = match (a.get(i), b.get(j)) {
            (Some(&x), Some(&y)) if x <= y => {
                i += 1;
                if x == y {
                    j += 1;
                }
                x
            }
            (Some(_), Some(&y)) => {
                j += 1;
                y
            }
            (Some(&x), None) => {
                i += 1;
                x
            }
            (None, Some(&y)) => {
                j += 1;
                y
            }
            (None, None) => break,
        };
        if merged.last().map_or(true, |&last| next > last) {
            merged.push(next);
        }
    }
    merged
}

/// Midpoints of every interval between consecutive breakpoints
fn midpoints(breakpoints: &[f64]) -> Vec<f64> {
    breakpoints.windows(2).map(|w| (w[0] + w[1]) * 0.5).collect()
}

/// Membership of every merged interval in one source grid along one axis
fn axis_lookup(source: &[f64], mids: &[f64]) -> Vec<Option<usize>> {
    mids.iter()
        .map(|&m| {
            let (first, last) = (source.first()?, source.last()?);
            if m < *first || m >= *last {
                None
            } else {
                Some(source.partition_point(|&b| b <= m) - 1)
            }
        })
        .collect()
}

struct MergedGrid<'a> {
    a: &'a GridShape,
    b: &'a GridShape,
    breakpoints: [Vec<f64>; 3],
    lookup_a: [Vec<Option<usize>>; 3],
    lookup_b: [Vec<Option<usize>>; 3],
}

impl<'a> MergedGrid<'a> {
    fn new(a: &'a GridShape, b: &'a GridShape) -> Self {
        let breakpoints = Axis::ALL.map(|axis| merge_breakpoints(a.breakpoints(axis), b.breakpoints(axis)));
        let mids: Vec<Vec<f64>> = breakpoints.iter().map(|bp| midpoints(bp)).collect();
        let lookup_a = Axis::ALL.map(|axis| axis_lookup(a.breakpoints(axis), &mids[axis.index()]));
        let lookup_b = Axis::ALL.map(|axis| axis_lookup(b.breakpoints(axis), &mids[axis.index()]));
        Self {
            a,
            b,
            breakpoints,
            lookup_a,
            lookup_b,
        }
    }

    fn dims(&self) -> (usize, usize, usize) {
        (self.lookup_a[0].len(), self.lookup_a[1].len(), self.lookup_a[2].len())
    }

    fn sample(grid: &GridShape, lookup: &[Vec<Option<usize>>; 3], i: usize, j: usize, k: usize) -> bool {
        match (lookup[0][i], lookup[1][j], lookup[2][k]) {
            (Some(x), Some(y), Some(z)) => grid.is_filled(x, y, z),
            _ => false,
        }
    }

    fn cell(&self, op: BooleanOp, i: usize, j: usize, k: usize) -> bool {
        op.apply(
            Self::sample(self.a, &self.lookup_a, i, j, k),
            Self::sample(self.b, &self.lookup_b, i, j, k),
        )
    }
}

/// Combine two shapes with a boolean operator
pub fn join(first: &VoxelShape, second: &VoxelShape, op: BooleanOp) -> VoxelShape {
    assert!(!op.apply(false, false), "boolean op {:?} would fill unbounded space", op);

    match (first.is_empty(), second.is_empty()) {
        (true, true) => return VoxelShape::Empty,
        (false, true) => {
            return if op.apply(true, false) { first.clone() } else { VoxelShape::Empty };
        }
        (true, false) => {
            return if op.apply(false, true) { second.clone() } else { VoxelShape::Empty };
        }
        (false, false) => {}
    }

    if op == BooleanOp::And && !bounds_overlap(first, second) {
        return VoxelShape::Empty;
    }

    let (Some(ga), Some(gb)) = (first.as_grid(), second.as_grid()) else {
        return VoxelShape::Empty;
    };
    let merged = MergedGrid::new(&ga, &gb);
    let [xs, ys, zs] = merged.breakpoints.clone();
    let grid = GridShape::from_fn(xs, ys, zs, |i, j, k| merged.cell(op, i, j, k));

    if grid.is_empty() {
        VoxelShape::Empty
    } else {
        VoxelShape::General(grid)
    }
}

/// Whether combining the shapes would produce anything, without building the result
pub fn join_is_not_empty(first: &VoxelShape, second: &VoxelShape, op: BooleanOp) -> bool {
    assert!(!op.apply(false, false), "boolean op {:?} would fill unbounded space", op);

    match (first.is_empty(), second.is_empty()) {
        (true, true) => return false,
        (false, true) => return op.apply(true, false),
        (true, false) => return op.apply(false, true),
        (false, false) => {}
    }

    if op == BooleanOp::And && !bounds_overlap(first, second) {
        return false;
    }

    let (Some(ga), Some(gb)) = (first.as_grid(), second.as_grid()) else {
        return false;
    };
    let merged = MergedGrid::new(&ga, &gb);
    let (nx, ny, nz) = merged.dims();
    for i in 0..nx {
        for j in 0..ny {
            for k in 0..nz {
                if merged.cell(op, i, j, k) {
                    return true;
                }
            }
        }
    }
    false
}

fn bounds_overlap(first: &VoxelShape, second: &VoxelShape) -> bool {
    match (first.bounds(), second.bounds()) {
        (Some(a), Some(b)) => aabb_intersects(&a, &b),
        _ => false,
    }
}

/// Union of any number of shapes
pub fn union_all<I>(shapes: I) -> VoxelShape
where
    I: IntoIterator<Item = VoxelShape>,
{
    shapes
        .into_iter()
        .fold(VoxelShape::Empty, |acc, shape| join(&acc, &shape, BooleanOp::Or))
}
