//! Who is asking a collision query, and which cells they care about

use super::cell_lookup::CellInfo;
use super::cursor::CellClass;
use crate::physics::{EntityId, AABB};
use crate::world::core::BlockId;
use cgmath::Point3;

/// Filter applied to every cell the block-collision enumerator visits
pub trait CollisionContext {
    /// The moving body, if the query is made on behalf of one
    fn subject(&self) -> Option<&CollisionSubject> {
        None
    }

    fn admits(&self, class: CellClass, cell: &CellInfo<'_>) -> bool {
        default_admits(class, cell)
    }
}

/// Interior cells always count. Outer-shell face cells only matter for
/// blocks whose shape pokes out of their cell. Edge and corner cells never do.
pub fn default_admits(class: CellClass, cell: &CellInfo<'_>) -> bool {
    match class {
        CellClass::Interior => true,
        CellClass::Face => cell.large_collision_shape,
        CellClass::Edge | CellClass::Corner => false,
    }
}

/// Query with no subject
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyContext;

impl CollisionContext for EmptyContext {}

/// Entity on whose behalf a query runs
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionSubject {
    pub id: EntityId,
    /// Feet position
    pub position: Point3<f64>,
    pub bounding_box: AABB,
    /// Block type this subject passes through
    pub excluded_block: Option<BlockId>,
}

impl CollisionSubject {
    pub fn new(id: EntityId, position: Point3<f64>, bounding_box: AABB) -> Self {
        Self {
            id,
            position,
            bounding_box,
            excluded_block: None,
        }
    }

    pub fn ignoring_block(mut self, block: BlockId) -> Self {
        self.excluded_block = Some(block);
        self
    }
}

impl CollisionContext for CollisionSubject {
    fn subject(&self) -> Option<&CollisionSubject> {
        Some(self)
    }

    fn admits(&self, class: CellClass, cell: &CellInfo<'_>) -> bool {
        Some(cell.id) != self.excluded_block && default_admits(class, cell)
    }
}
