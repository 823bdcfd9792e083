use blockview_common::BlockKind;
use serde::{Deserialize, Serialize};

/// Kinds that have an inventory slot, in display order.
pub const TRACKED_KINDS: [BlockKind; 4] = [
    BlockKind::Grass,
    BlockKind::Dirt,
    BlockKind::Stone,
    BlockKind::Wood,
];

/// Slot index for each kind, indexed by [`BlockKind::index`].
const SLOT_OF_KIND: [Option<usize>; BlockKind::COUNT] = [
    Some(0), // grass
    Some(1), // dirt
    Some(2), // stone
    Some(3), // wood
    None,    // sand
    None,    // water
    None,    // leaves
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySlot {
    pub kind: BlockKind,
    pub count: u32,
}

/// Counts of collected blocks, one slot per tracked kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    slots: [InventorySlot; TRACKED_KINDS.len()],
}

impl Default for Inventory {
    fn default() -> Self {
        Self {
            slots: TRACKED_KINDS.map(|kind| InventorySlot { kind, count: 0 }),
        }
    }
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slot_index(kind: BlockKind) -> Option<usize> {
        SLOT_OF_KIND[kind.index()]
    }

    /// Increment the slot for `kind`. Returns the new count, or `None` when
    /// the kind is not tracked.
    pub fn credit(&mut self, kind: BlockKind) -> Option<u32> {
        let slot = &mut self.slots[Self::slot_index(kind)?];
        slot.count = slot.count.saturating_add(1);
        Some(slot.count)
    }

    pub fn count_of(&self, kind: BlockKind) -> u32 {
        Self::slot_index(kind).map_or(0, |i| self.slots[i].count)
    }

    pub fn slots(&self) -> &[InventorySlot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_table_agrees_with_tracked_kinds() {
        for (i, kind) in TRACKED_KINDS.iter().enumerate() {
            assert_eq!(Inventory::slot_index(*kind), Some(i));
        }
        let tracked = BlockKind::ALL
            .iter()
            .filter(|k| Inventory::slot_index(**k).is_some())
            .count();
        assert_eq!(tracked, TRACKED_KINDS.len());
    }

    #[test]
    fn credit_increments_by_one() {
        let mut inv = Inventory::new();
        assert_eq!(inv.credit(BlockKind::Wood), Some(1));
        assert_eq!(inv.credit(BlockKind::Wood), Some(2));
        assert_eq!(inv.count_of(BlockKind::Wood), 2);
        assert_eq!(inv.count_of(BlockKind::Grass), 0);
    }

    #[test]
    fn untracked_kinds_are_dropped() {
        let mut inv = Inventory::new();
        assert_eq!(inv.credit(BlockKind::Leaves), None);
        assert!(inv.slots().iter().all(|s| s.count == 0));
    }

    #[test]
    fn slots_keep_display_order() {
        let inv = Inventory::new();
        let kinds: Vec<BlockKind> = inv.slots().iter().map(|s| s.kind).collect();
        assert_eq!(kinds, TRACKED_KINDS.to_vec());
    }
}
