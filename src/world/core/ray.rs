use super::{BlockId, VoxelPos};
use crate::physics::Axis;
use cgmath::{Point3, Vector3};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockFace {
    Right,  // +X
    Left,   // -X
    Top,    // +Y
    Bottom, // -Y
    Front,  // +Z
    Back,   // -Z
}

impl BlockFace {
    pub const ALL: [BlockFace; 6] = [
        BlockFace::Right,
        BlockFace::Left,
        BlockFace::Top,
        BlockFace::Bottom,
        BlockFace::Front,
        BlockFace::Back,
    ];

    /// Face whose outward normal points along `axis` in the given direction
    pub fn from_axis(axis: Axis, positive: bool) -> Self {
        match (axis, positive) {
            (Axis::X, true) => BlockFace::Right,
            (Axis::X, false) => BlockFace::Left,
            (Axis::Y, true) => BlockFace::Top,
            (Axis::Y, false) => BlockFace::Bottom,
            (Axis::Z, true) => BlockFace::Front,
            (Axis::Z, false) => BlockFace::Back,
        }
    }

    /// Face most aligned with a direction vector
    pub fn nearest(direction: Vector3<f64>) -> Self {
        let ax = direction.x.abs();
        let ay = direction.y.abs();
        let az = direction.z.abs();
        if ax >= ay && ax >= az {
            BlockFace::from_axis(Axis::X, direction.x >= 0.0)
        } else if ay >= az {
            BlockFace::from_axis(Axis::Y, direction.y >= 0.0)
        } else {
            BlockFace::from_axis(Axis::Z, direction.z >= 0.0)
        }
    }

    pub fn axis(&self) -> Axis {
        match self {
            BlockFace::Right | BlockFace::Left => Axis::X,
            BlockFace::Top | BlockFace::Bottom => Axis::Y,
            BlockFace::Front | BlockFace::Back => Axis::Z,
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            BlockFace::Right => BlockFace::Left,
            BlockFace::Left => BlockFace::Right,
            BlockFace::Top => BlockFace::Bottom,
            BlockFace::Bottom => BlockFace::Top,
            BlockFace::Front => BlockFace::Back,
            BlockFace::Back => BlockFace::Front,
        }
    }

    pub fn normal(&self) -> Vector3<f64> {
        match self {
            BlockFace::Right => Vector3::new(1.0, 0.0, 0.0),
            BlockFace::Left => Vector3::new(-1.0, 0.0, 0.0),
            BlockFace::Top => Vector3::new(0.0, 1.0, 0.0),
            BlockFace::Bottom => Vector3::new(0.0, -1.0, 0.0),
            BlockFace::Front => Vector3::new(0.0, 0.0, 1.0),
            BlockFace::Back => Vector3::new(0.0, 0.0, -1.0),
        }
    }
}

/// First block surface struck by a segment
#[derive(Debug, Clone, PartialEq)]
pub struct RaycastHit {
    pub position: VoxelPos,
    pub face: BlockFace,
    /// World-space point where the segment meets the surface
    pub location: Point3<f64>,
    /// Distance from the segment start to `location`
    pub distance: f64,
    pub block: BlockId,
    /// The segment started inside the shape
    pub inside: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearest_face() {
        assert_eq!(BlockFace::nearest(Vector3::new(0.1, -2.0, 0.5)), BlockFace::Bottom);
        assert_eq!(BlockFace::nearest(Vector3::new(3.0, 1.0, -1.0)), BlockFace::Right);
        assert_eq!(BlockFace::nearest(Vector3::new(0.0, 0.0, -1.0)), BlockFace::Back);
    }

    #[test]
    fn test_opposite_roundtrip() {
        for face in BlockFace::ALL {
            assert_eq!(face.opposite().opposite(), face);
            assert_eq!(face.opposite().axis(), face.axis());
            assert_eq!(face.normal() + face.opposite().normal(), Vector3::new(0.0, 0.0, 0.0));
        }
    }
}
