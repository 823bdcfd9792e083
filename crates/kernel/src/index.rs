use crate::world::BlockId;
use blockview_common::BlockPos;
use std::collections::HashMap;

/// Hash index from integer coordinate to the blocks occupying it.
///
/// Replaces a linear scan of the block list for point lookups. A coordinate
/// may hold more than one block (overlapping generation rules); ids in a cell
/// are kept in ascending order so the first entry is the earliest inserted.
#[derive(Debug, Clone, Default)]
pub struct BlockIndex {
    cells: HashMap<BlockPos, Vec<BlockId>>,
}

impl BlockIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids must be inserted in ascending order.
    pub fn insert(&mut self, id: BlockId, pos: BlockPos) {
        let cell = self.cells.entry(pos).or_default();
        debug_assert!(cell.last().is_none_or(|last| *last < id));
        cell.push(id);
    }

    /// Remove one id from a cell. Returns whether it was present.
    pub fn remove(&mut self, id: BlockId, pos: BlockPos) -> bool {
        let Some(cell) = self.cells.get_mut(&pos) else {
            return false;
        };
        let Some(i) = cell.iter().position(|c| *c == id) else {
            return false;
        };
        cell.remove(i);
        if cell.is_empty() {
            self.cells.remove(&pos);
        }
        true
    }

    /// Earliest-inserted block at `pos`.
    pub fn first_at(&self, pos: BlockPos) -> Option<BlockId> {
        self.cells.get(&pos).and_then(|cell| cell.first().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec3;

    #[test]
    fn first_at_returns_oldest() {
        let mut index = BlockIndex::new();
        let pos = IVec3::new(1, 2, 3);
        index.insert(BlockId(4), pos);
        index.insert(BlockId(9), pos);
        assert_eq!(index.first_at(pos), Some(BlockId(4)));

        // Removing the oldest exposes the next one in the same cell.
        assert!(index.remove(BlockId(4), pos));
        assert_eq!(index.first_at(pos), Some(BlockId(9)));
    }

    #[test]
    fn remove_drops_empty_cells() {
        let mut index = BlockIndex::new();
        let pos = IVec3::ZERO;
        index.insert(BlockId(0), pos);
        assert!(index.remove(BlockId(0), pos));
        assert!(!index.remove(BlockId(0), pos));
        assert!(index.cells.is_empty());
        assert!(index.first_at(pos).is_none());
    }

    #[test]
    fn unknown_cell_or_id_is_not_removed() {
        let mut index = BlockIndex::new();
        index.insert(BlockId(1), IVec3::X);
        assert!(!index.remove(BlockId(1), IVec3::Y));
        assert!(!index.remove(BlockId(2), IVec3::X));
        assert_eq!(index.first_at(IVec3::X), Some(BlockId(1)));
        assert!(index.first_at(IVec3::new(99, 99, 99)).is_none());
    }
}
