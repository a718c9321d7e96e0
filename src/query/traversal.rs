//! Grid traversal of a line segment (DDA)
//!
//! Visits every cell the segment passes through, in order from `from` to
//! `to`. The start is moved a hair into the segment and the end a hair past
//! `to`, so a segment starting on a cell boundary begins in the cell it
//! enters and the cell containing `to` is always visited.

use crate::constants::raycast::EPSILON;
use crate::world::core::VoxelPos;
use cgmath::Point3;

/// Explicit state of one traversal
#[derive(Debug, Clone, PartialEq)]
pub struct DdaState {
    /// Cell the walk is currently in
    pub cell: VoxelPos,
    step: [i32; 3],
    /// Segment fraction needed to cross one cell per axis
    t_delta: [f64; 3],
    /// Segment fraction at which the next boundary per axis is crossed
    t_max: [f64; 3],
}

impl DdaState {
    /// State positioned in the first cell; `None` for a zero-length segment
    ///
    /// # Panics
    /// Panics if any coordinate is NaN or infinite.
    pub fn new(from: Point3<f64>, to: Point3<f64>) -> Option<Self> {
        assert!(
            [from.x, from.y, from.z, to.x, to.y, to.z].iter().all(|v| v.is_finite()),
            "ray endpoints must be finite: {:?} -> {:?}",
            from,
            to
        );
        if from == to {
            return None;
        }

        let delta = to - from;
        let start = from + delta * EPSILON;
        let end = to + delta * EPSILON;
        let span = [end.x - start.x, end.y - start.y, end.z - start.z];
        let origin = [start.x, start.y, start.z];

        let mut step = [0; 3];
        let mut t_delta = [f64::INFINITY; 3];
        let mut t_max = [f64::INFINITY; 3];
        for axis in 0..3 {
            if span[axis] == 0.0 {
                continue;
            }
            step[axis] = if span[axis] > 0.0 { 1 } else { -1 };
            t_delta[axis] = (1.0 / span[axis]).abs();
            let frac = origin[axis] - origin[axis].floor();
            let to_boundary = if step[axis] > 0 { 1.0 - frac } else { frac };
            t_max[axis] = t_delta[axis] * to_boundary;
        }

        Some(Self {
            cell: VoxelPos::containing(start),
            step,
            t_delta,
            t_max,
        })
    }

    /// Whether another boundary lies inside the segment
    pub fn has_next(&self) -> bool {
        self.t_max.iter().any(|&t| t <= 1.0)
    }

    /// Cross the nearest boundary; ties resolve x, then y, then z
    pub fn advance(&mut self) -> Option<VoxelPos> {
        if !self.has_next() {
            return None;
        }
        let [tx, ty, tz] = self.t_max;
        let axis = if tx <= ty && tx <= tz {
            0
        } else if ty <= tz {
            1
        } else {
            2
        };
        match axis {
            0 => self.cell.x += self.step[0],
            1 => self.cell.y += self.step[1],
            _ => self.cell.z += self.step[2],
        }
        self.t_max[axis] += self.t_delta[axis];
        Some(self.cell)
    }
}

/// Iterator over the cells of a segment
#[derive(Debug, Clone)]
pub struct RayCells {
    state: Option<DdaState>,
    started: bool,
}

impl RayCells {
    pub fn new(from: Point3<f64>, to: Point3<f64>) -> Self {
        Self {
            state: DdaState::new(from, to),
            started: false,
        }
    }
}

impl Iterator for RayCells {
    type Item = VoxelPos;

    fn next(&mut self) -> Option<VoxelPos> {
        let state = self.state.as_mut()?;
        if !self.started {
            self.started = true;
            return Some(state.cell);
        }
        state.advance()
    }
}

/// Run `test` on each cell along the segment until it returns `Some`
///
/// Falls back to `on_miss` when no cell matches or the segment has zero length.
pub fn traverse_blocks<C, T, F, M>(from: Point3<f64>, to: Point3<f64>, mut context: C, mut test: F, on_miss: M) -> T
where
    F: FnMut(&mut C, VoxelPos) -> Option<T>,
    M: FnOnce(&mut C) -> T,
{
    for cell in RayCells::new(from, to) {
        if let Some(result) = test(&mut context, cell) {
            return result;
        }
    }
    on_miss(&mut context)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(from: Point3<f64>, to: Point3<f64>) -> Vec<VoxelPos> {
        RayCells::new(from, to).collect()
    }

    #[test]
    fn test_axis_aligned_visits_each_cell_once() {
        let visited = cells(Point3::new(0.0, 0.0, 0.0), Point3::new(5.0, 0.0, 0.0));
        let expected: Vec<VoxelPos> = (0..=5).map(|x| VoxelPos::new(x, 0, 0)).collect();
        assert_eq!(visited, expected);
    }

    #[test]
    fn test_negative_direction() {
        let visited = cells(Point3::new(2.5, 0.5, 0.5), Point3::new(-1.5, 0.5, 0.5));
        let expected: Vec<VoxelPos> = (-2..=2).rev().map(|x| VoxelPos::new(x, 0, 0)).collect();
        assert_eq!(visited, expected);
    }

    #[test]
    fn test_start_on_boundary_moving_down() {
        // Starting exactly on y = 3 and heading down begins in the cell below
        let visited = cells(Point3::new(0.5, 3.0, 0.5), Point3::new(0.5, 1.5, 0.5));
        assert_eq!(visited, vec![VoxelPos::new(0, 2, 0), VoxelPos::new(0, 1, 0)]);
    }

    #[test]
    fn test_diagonal_tie_prefers_x() {
        // Passes exactly through the corner at (1, 1, 0.5)
        let visited = cells(Point3::new(0.5, 0.5, 0.5), Point3::new(1.5, 1.5, 0.5));
        assert_eq!(
            visited,
            vec![VoxelPos::new(0, 0, 0), VoxelPos::new(1, 0, 0), VoxelPos::new(1, 1, 0)]
        );
    }

    #[test]
    fn test_cells_are_face_connected_and_end_at_target() {
        let from = Point3::new(-3.7, 12.2, 5.1);
        let to = Point3::new(9.3, -4.6, -7.8);
        let visited = cells(from, to);
        for pair in visited.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let manhattan = (a.x - b.x).abs() + (a.y - b.y).abs() + (a.z - b.z).abs();
            assert_eq!(manhattan, 1, "{:?} -> {:?}", a, b);
        }
        assert_eq!(visited.first(), Some(&VoxelPos::containing(from)));
        assert_eq!(visited.last(), Some(&VoxelPos::containing(to)));
    }

    #[test]
    fn test_deterministic() {
        let from = Point3::new(0.1, 0.2, 0.3);
        let to = Point3::new(7.9, 3.3, -2.2);
        assert_eq!(cells(from, to), cells(from, to));
    }

    #[test]
    fn test_zero_length_calls_on_miss_only() {
        let p = Point3::new(1.5, 2.5, 3.5);
        let mut tested = 0;
        let result = traverse_blocks(p, p, (), |_, _| {
            tested += 1;
            Some("hit")
        }, |_| "miss");
        assert_eq!(result, "miss");
        assert_eq!(tested, 0);
    }

    #[test]
    fn test_traverse_stops_at_first_match() {
        let result = traverse_blocks(
            Point3::new(0.5, 0.5, 0.5),
            Point3::new(10.5, 0.5, 0.5),
            0u32,
            |count, cell| {
                *count += 1;
                (cell.x == 3).then_some(*count)
            },
            |count| *count + 100,
        );
        assert_eq!(result, 4);
    }

    #[test]
    #[should_panic]
    fn test_nan_panics() {
        let _ = RayCells::new(Point3::new(f64::NAN, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0));
    }
}
