use crate::biome::{Biome, biome_signal, classify};
use blockview_common::{Block, BlockKind, WorldConfig};
use serde::{Deserialize, Serialize};

/// Noise offsets are drawn from this many distinct values.
const SEED_SPAN: u64 = 10_000;

/// Counts gathered while generating a region.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerrainStats {
    pub columns: usize,
    pub trees: usize,
    /// Indexed by [`BlockKind::index`].
    pub blocks_by_kind: [usize; BlockKind::COUNT],
    /// Indexed by [`Biome::index`].
    pub columns_by_biome: [usize; 4],
}

impl TerrainStats {
    pub fn total_blocks(&self) -> usize {
        self.blocks_by_kind.iter().sum()
    }

    pub fn blocks_of(&self, kind: BlockKind) -> usize {
        self.blocks_by_kind[kind.index()]
    }

    pub fn columns_of(&self, biome: Biome) -> usize {
        self.columns_by_biome[biome.index()]
    }

    fn record(&mut self, blocks: &[Block]) {
        for b in blocks {
            self.blocks_by_kind[b.kind.index()] += 1;
        }
    }
}

impl std::fmt::Display for TerrainStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "columns={} blocks={} trees={}",
            self.columns,
            self.total_blocks(),
            self.trees
        )?;
        for biome in Biome::ALL {
            writeln!(f, "  {:<10} {:>5} columns", biome, self.columns_of(biome))?;
        }
        for kind in BlockKind::ALL {
            writeln!(f, "  {:<10} {:>5} blocks", kind, self.blocks_of(kind))?;
        }
        Ok(())
    }
}

/// Generate the initial block set for a world.
pub fn generate(config: &WorldConfig, seed: u64) -> Vec<Block> {
    generate_with_stats(config, seed).0
}

/// Generate the block set and report what was produced.
///
/// Columns are visited x-major over `[-h, h)²`. Within a column, cells are
/// emitted bottom-up, followed by the column's tree if it has one. Tree
/// leaves may land on a cell that another column also fills; such duplicates
/// are kept.
pub fn generate_with_stats(config: &WorldConfig, seed: u64) -> (Vec<Block>, TerrainStats) {
    let _span = tracing::info_span!("generate_terrain", seed).entered();

    let h = config.region_half_width;
    let offset = (seed % SEED_SPAN) as i64;
    let side = (2 * h.max(0)) as usize;
    let mut blocks = Vec::with_capacity(side * side * 5);
    let mut stats = TerrainStats::default();

    for x in -h..h {
        for z in -h..h {
            let biome = classify(biome_signal(x, z, offset as f64), x, z, config);
            let height = column_height(x, z, biome);

            let start = blocks.len();
            emit_column(&mut blocks, x, z, height, biome);
            if biome == Biome::Forest && has_tree(x, z, offset) {
                emit_tree(&mut blocks, x, z, height);
                stats.trees += 1;
            }
            stats.record(&blocks[start..]);
            stats.columns += 1;
            stats.columns_by_biome[biome.index()] += 1;
        }
    }

    tracing::info!(
        columns = stats.columns,
        blocks = blocks.len(),
        trees = stats.trees,
        "terrain generated"
    );
    (blocks, stats)
}

/// Height of the solid part of a column. Always at least 1.
pub fn column_height(x: i32, z: i32, biome: Biome) -> i32 {
    let (xf, zf) = (x as f64, z as f64);
    let noise = (xf * 0.25).sin() * (zf * 0.25).cos() + (xf * 0.1).sin() * 0.5;
    let raw = (3.0 + noise * 1.5).floor() as i32;
    biome.bias_height(raw).max(1)
}

fn emit_column(out: &mut Vec<Block>, x: i32, z: i32, height: i32, biome: Biome) {
    for y in 0..height {
        let kind = if y == height - 1 {
            biome.surface()
        } else if y < height - 3 {
            BlockKind::Stone
        } else {
            BlockKind::Dirt
        };
        out.push(Block::new(kind, x, y, z));
    }
}

fn has_tree(x: i32, z: i32, offset: i64) -> bool {
    (x as i64 + z as i64 * 7 + offset).rem_euclid(11) == 0
}

fn emit_tree(out: &mut Vec<Block>, x: i32, z: i32, height: i32) {
    for ty in 0..3 {
        out.push(Block::new(BlockKind::Wood, x, height + ty, z));
    }
    let canopy = height + 2;
    out.push(Block::new(BlockKind::Leaves, x, height + 3, z));
    out.push(Block::new(BlockKind::Leaves, x + 1, canopy, z));
    out.push(Block::new(BlockKind::Leaves, x - 1, canopy, z));
    out.push(Block::new(BlockKind::Leaves, x, canopy, z + 1));
    out.push(Block::new(BlockKind::Leaves, x, canopy, z - 1));
}
