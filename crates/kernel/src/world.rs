use crate::index::BlockIndex;
use crate::inventory::Inventory;
use blockview_common::{Block, BlockKind, BlockPos};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identifier of a stored block. Assigned in insertion order, so a lower id
/// means the block came earlier in generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockId(pub u64);

/// An event record produced by every mutation to the world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorldEvent {
    /// The world was filled with an initial block set.
    Populated { blocks: usize },
    /// A block was removed. Carries the block for inspection.
    BlockRemoved { id: BlockId, block: Block },
    /// An inventory slot was credited; `count` is the new total.
    InventoryCredited { kind: BlockKind, count: u32 },
}

/// The authoritative block world.
///
/// Owns the block collection and the inventory. Uses a BTreeMap so iteration
/// follows insertion order on every platform, and keeps a coordinate index
/// in step with it for point lookups.
#[derive(Debug, Clone, Default)]
pub struct World {
    blocks: BTreeMap<BlockId, Block>,
    index: BlockIndex,
    inventory: Inventory,
    next_id: u64,
    /// Append-only event log of all mutations.
    event_log: Vec<WorldEvent>,
}

impl World {
    /// Create an empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a world holding `blocks`, in the given order.
    pub fn from_blocks(blocks: impl IntoIterator<Item = Block>) -> Self {
        let mut world = Self::new();
        world.populate(blocks);
        world
    }

    /// Append a batch of blocks. Ids continue from the last one assigned.
    pub fn populate(&mut self, blocks: impl IntoIterator<Item = Block>) {
        let before = self.blocks.len();
        for block in blocks {
            let id = BlockId(self.next_id);
            self.next_id += 1;
            self.index.insert(id, block.pos);
            self.blocks.insert(id, block);
        }
        let added = self.blocks.len() - before;
        self.event_log.push(WorldEvent::Populated { blocks: added });
        tracing::debug!(added, total = self.blocks.len(), "world populated");
    }

    /// Number of blocks in the world.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Iterate all blocks in insertion order.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> + '_ {
        self.blocks.values()
    }

    /// Get a block by id.
    pub fn get(&self, id: BlockId) -> Option<&Block> {
        self.blocks.get(&id)
    }

    /// The earliest-inserted block at `pos`.
    pub fn block_at(&self, pos: BlockPos) -> Option<(BlockId, &Block)> {
        let id = self.index.first_at(pos)?;
        self.blocks.get(&id).map(|b| (id, b))
    }

    pub fn is_occupied(&self, pos: BlockPos) -> bool {
        self.index.first_at(pos).is_some()
    }

    /// Remove the earliest-inserted block at `pos`. No-op if the cell is empty.
    pub fn remove_block_at(&mut self, pos: BlockPos) -> Option<Block> {
        let id = self.index.first_at(pos)?;
        self.remove(id)
    }

    /// Remove a block by id, keeping the index in step.
    pub fn remove(&mut self, id: BlockId) -> Option<Block> {
        let block = self.blocks.remove(&id)?;
        self.index.remove(id, block.pos);
        self.event_log.push(WorldEvent::BlockRemoved { id, block });
        Some(block)
    }

    /// Credit one unit of `kind` to the inventory. Untracked kinds are dropped.
    pub fn credit_inventory(&mut self, kind: BlockKind) -> bool {
        match self.inventory.credit(kind) {
            Some(count) => {
                self.event_log
                    .push(WorldEvent::InventoryCredited { kind, count });
                true
            }
            None => false,
        }
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<WorldEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[WorldEvent] {
        &self.event_log
    }

    /// Deterministic digest of blocks and inventory, for comparing runs.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325; // FNV offset basis
        let mix = |h: &mut u64, bytes: &[u8]| {
            for &b in bytes {
                *h ^= b as u64;
                *h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        for (id, block) in &self.blocks {
            mix(&mut h, &id.0.to_le_bytes());
            mix(&mut h, &[block.kind.index() as u8]);
            mix(&mut h, &block.pos.x.to_le_bytes());
            mix(&mut h, &block.pos.y.to_le_bytes());
            mix(&mut h, &block.pos.z.to_le_bytes());
        }
        for slot in self.inventory.slots() {
            mix(&mut h, &slot.count.to_le_bytes());
        }
        h
    }
}
