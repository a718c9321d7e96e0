use serde::{Deserialize, Serialize};

/// Unique identifier for an item type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct ItemId(pub u16);

/// A counted pile of one item type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub item: ItemId,
    pub count: u32,
    /// Largest count a single stack of this item may hold
    pub max_stack: u32,
}

impl ItemStack {
    pub fn new(item: ItemId, count: u32, max_stack: u32) -> Self {
        Self {
            item,
            count,
            max_stack,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_stackable(&self) -> bool {
        self.max_stack > 1
    }

    /// Move as much of `other` into this stack as the smaller of `cap` and the
    /// item's own limit allows. Returns the amount moved.
    pub fn merge_from(&mut self, other: &mut ItemStack, cap: u32) -> u32 {
        if self.item != other.item || !self.is_stackable() || other.is_empty() {
            return 0;
        }
        let limit = self.max_stack.min(cap);
        let moved = limit.saturating_sub(self.count).min(other.count);
        self.count += moved;
        other.count -= moved;
        moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_respects_cap() {
        let mut dest = ItemStack::new(ItemId(1), 10, 64);
        let mut src = ItemStack::new(ItemId(1), 10, 64);
        assert_eq!(dest.merge_from(&mut src, 16), 6);
        assert_eq!(dest.count, 16);
        assert_eq!(src.count, 4);
    }

    #[test]
    fn test_merge_rejects_other_items() {
        let mut dest = ItemStack::new(ItemId(1), 1, 64);
        let mut src = ItemStack::new(ItemId(2), 1, 64);
        assert_eq!(dest.merge_from(&mut src, 16), 0);
        assert_eq!(src.count, 1);
    }

    #[test]
    fn test_unstackable_never_merges() {
        let mut dest = ItemStack::new(ItemId(3), 1, 1);
        let mut src = ItemStack::new(ItemId(3), 1, 1);
        assert_eq!(dest.merge_from(&mut src, 16), 0);
    }
}
