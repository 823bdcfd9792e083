use glam::IVec3;
use serde::{Deserialize, Serialize};

/// Integer lattice coordinate of a block.
pub type BlockPos = IVec3;

/// Closed set of block materials.
///
/// The discriminant doubles as an index into per-kind lookup tables
/// (palette, inventory slot), so the order here is part of the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Grass,
    Dirt,
    Stone,
    Wood,
    Sand,
    Water,
    Leaves,
}

impl BlockKind {
    pub const COUNT: usize = 7;

    pub const ALL: [BlockKind; Self::COUNT] = [
        BlockKind::Grass,
        BlockKind::Dirt,
        BlockKind::Stone,
        BlockKind::Wood,
        BlockKind::Sand,
        BlockKind::Water,
        BlockKind::Leaves,
    ];

    /// Position of this kind in per-kind lookup tables.
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            BlockKind::Grass => "grass",
            BlockKind::Dirt => "dirt",
            BlockKind::Stone => "stone",
            BlockKind::Wood => "wood",
            BlockKind::Sand => "sand",
            BlockKind::Water => "water",
            BlockKind::Leaves => "leaves",
        }
    }
}

impl std::fmt::Display for BlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.name())
    }
}

/// A single voxel. Blocks are never mutated in place; they are created by
/// terrain generation and destroyed by interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Block {
    pub kind: BlockKind,
    pub pos: BlockPos,
}

impl Block {
    pub fn new(kind: BlockKind, x: i32, y: i32, z: i32) -> Self {
        Self {
            kind,
            pos: IVec3::new(x, y, z),
        }
    }
}

/// Hostile mob variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MobKind {
    Zombie,
    Skeleton,
}

impl std::fmt::Display for MobKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MobKind::Zombie => f.write_str("zombie"),
            MobKind::Skeleton => f.write_str("skeleton"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_kind_indices_match_all_order() {
        for (i, kind) in BlockKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn block_kind_display_is_lowercase() {
        assert_eq!(BlockKind::Leaves.to_string(), "leaves");
        assert_eq!(MobKind::Skeleton.to_string(), "skeleton");
    }

    #[test]
    fn block_new_sets_position() {
        let b = Block::new(BlockKind::Dirt, 1, -2, 3);
        assert_eq!(b.pos, IVec3::new(1, -2, 3));
    }
}
