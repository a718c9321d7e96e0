//! Lazy walk over an inclusive integer box
//!
//! Cells come out x fastest, then y, then z. Each cell is tagged with how
//! many faces of the box it sits on, which lets callers skip the outer shell
//! cheaply.

use crate::world::core::VoxelPos;

/// Position of a cell relative to the boundary of the cursor's range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellClass {
    /// Not on any boundary plane
    Interior,
    /// On exactly one boundary plane
    Face,
    /// On two boundary planes
    Edge,
    /// On three boundary planes
    Corner,
}

impl CellClass {
    fn from_boundary_count(count: u8) -> Self {
        match count {
            0 => CellClass::Interior,
            1 => CellClass::Face,
            2 => CellClass::Edge,
            _ => CellClass::Corner,
        }
    }
}

/// Restartable iterator over every cell in `[min, max]`
#[derive(Debug, Clone)]
pub struct GridCursor {
    min: VoxelPos,
    max: VoxelPos,
    current: VoxelPos,
    done: bool,
}

impl GridCursor {
    /// Cursor over the inclusive range; an inverted range yields nothing
    pub fn new(min: VoxelPos, max: VoxelPos) -> Self {
        let done = min.x > max.x || min.y > max.y || min.z > max.z;
        Self {
            min,
            max,
            current: min,
            done,
        }
    }

    /// Cursor that yields nothing
    pub fn empty() -> Self {
        Self::new(VoxelPos::new(0, 0, 0), VoxelPos::new(-1, -1, -1))
    }

    /// Rewind to the first cell
    pub fn reset(&mut self) {
        *self = Self::new(self.min, self.max);
    }

    /// Lowest corner of the range
    pub fn min_corner(&self) -> VoxelPos {
        self.min
    }

    /// Highest corner of the range
    pub fn max_corner(&self) -> VoxelPos {
        self.max
    }

    /// Number of cells in the full range
    pub fn volume(&self) -> u64 {
        if self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z {
            return 0;
        }
        let span = |lo: i32, hi: i32| (hi as i64 - lo as i64 + 1) as u64;
        span(self.min.x, self.max.x) * span(self.min.y, self.max.y) * span(self.min.z, self.max.z)
    }

    fn classify(&self, pos: VoxelPos) -> CellClass {
        let on = |v: i32, lo: i32, hi: i32| u8::from(v == lo || v == hi);
        CellClass::from_boundary_count(
            on(pos.x, self.min.x, self.max.x) + on(pos.y, self.min.y, self.max.y) + on(pos.z, self.min.z, self.max.z),
        )
    }

    fn step(&mut self) {
        if self.current.x < self.max.x {
            self.current.x += 1;
            return;
        }
        self.current.x = self.min.x;
        if self.current.y < self.max.y {
            self.current.y += 1;
            return;
        }
        self.current.y = self.min.y;
        if self.current.z < self.max.z {
            self.current.z += 1;
            return;
        }
        self.done = true;
    }
}

impl Iterator for GridCursor {
    type Item = (VoxelPos, CellClass);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let pos = self.current;
        let class = self.classify(pos);
        self.step();
        Some((pos, class))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_x_fastest() {
        let cells: Vec<VoxelPos> = GridCursor::new(VoxelPos::new(0, 0, 0), VoxelPos::new(1, 1, 1))
            .map(|(pos, _)| pos)
            .collect();
        assert_eq!(
            cells,
            vec![
                VoxelPos::new(0, 0, 0),
                VoxelPos::new(1, 0, 0),
                VoxelPos::new(0, 1, 0),
                VoxelPos::new(1, 1, 0),
                VoxelPos::new(0, 0, 1),
                VoxelPos::new(1, 0, 1),
                VoxelPos::new(0, 1, 1),
                VoxelPos::new(1, 1, 1),
            ]
        );
    }

    #[test]
    fn test_classification_counts() {
        let cursor = GridCursor::new(VoxelPos::new(-1, -1, -1), VoxelPos::new(2, 2, 2));
        assert_eq!(cursor.volume(), 64);
        let mut counts = [0usize; 4];
        for (_, class) in cursor {
            let slot = match class {
                CellClass::Interior => 0,
                CellClass::Face => 1,
                CellClass::Edge => 2,
                CellClass::Corner => 3,
            };
            counts[slot] += 1;
        }
        // 4x4x4: 8 interior, 24 face, 24 edge, 8 corner
        assert_eq!(counts, [8, 24, 24, 8]);
    }

    #[test]
    fn test_single_cell_is_corner() {
        let mut cursor = GridCursor::new(VoxelPos::new(5, -3, 2), VoxelPos::new(5, -3, 2));
        assert_eq!(cursor.next(), Some((VoxelPos::new(5, -3, 2), CellClass::Corner)));
        assert_eq!(cursor.next(), None);
    }

    #[test]
    fn test_inverted_and_reset() {
        assert_eq!(GridCursor::new(VoxelPos::new(1, 0, 0), VoxelPos::new(0, 0, 0)).count(), 0);
        assert_eq!(GridCursor::empty().count(), 0);

        let mut cursor = GridCursor::new(VoxelPos::new(0, 0, 0), VoxelPos::new(2, 0, 0));
        assert_eq!(cursor.by_ref().take(2).count(), 2);
        cursor.reset();
        assert_eq!(cursor.count(), 3);
    }
}
