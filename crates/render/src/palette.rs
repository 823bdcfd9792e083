use crate::draw::Rgba;
use blockview_common::{BlockKind, MobKind};

/// Fill colour per block kind, indexed by [`BlockKind::index`].
const BLOCK_PALETTE: [Rgba; BlockKind::COUNT] = [
    Rgba::hex(0x22C55E), // grass
    Rgba::hex(0xD4A574), // dirt
    Rgba::hex(0x9CA3AF), // stone
    Rgba::hex(0x92400E), // wood
    Rgba::hex(0xFDE68A), // sand
    Rgba::hex(0x3B82F6), // water
    Rgba::hex(0x166534), // leaves
];

pub(crate) const SKY: Rgba = Rgba::hex(0x87CEEB);
pub(crate) const BLOCK_BORDER: Rgba = Rgba::hex(0x000000).with_alpha(0.3);
pub(crate) const HEALTH_BAR: Rgba = Rgba::hex(0xFF0000);
pub(crate) const CROSSHAIR: Rgba = Rgba::hex(0xFFFFFF);

pub fn block_color(kind: BlockKind) -> Rgba {
    BLOCK_PALETTE[kind.index()]
}

pub fn mob_color(kind: MobKind) -> Rgba {
    match kind {
        MobKind::Zombie => Rgba::hex(0x228B22),
        MobKind::Skeleton => Rgba::hex(0xF5F5F5),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_a_distinct_colour() {
        for (i, a) in BlockKind::ALL.iter().enumerate() {
            for b in &BlockKind::ALL[i + 1..] {
                assert_ne!(block_color(*a), block_color(*b), "{a} and {b} share a colour");
            }
        }
    }

    #[test]
    fn grass_is_green() {
        assert_eq!(block_color(BlockKind::Grass), Rgba::hex(0x22C55E));
    }
}
