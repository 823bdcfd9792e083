use blockview_common::{BlockKind, WorldConfig};
use serde::{Deserialize, Serialize};

/// Classification of a terrain column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Biome {
    Plains,
    Desert,
    Forest,
    Mountains,
}

impl Biome {
    pub const ALL: [Biome; 4] = [Biome::Plains, Biome::Desert, Biome::Forest, Biome::Mountains];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Material of the topmost cell of a column.
    pub const fn surface(self) -> BlockKind {
        match self {
            Biome::Desert => BlockKind::Sand,
            Biome::Mountains => BlockKind::Stone,
            Biome::Plains | Biome::Forest => BlockKind::Grass,
        }
    }

    /// Apply the biome's height bias to a raw column height.
    pub fn bias_height(self, height: i32) -> i32 {
        match self {
            Biome::Mountains => height + 3,
            Biome::Desert => (height - 1).max(2),
            Biome::Plains | Biome::Forest => height,
        }
    }
}

impl std::fmt::Display for Biome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Biome::Plains => "plains",
            Biome::Desert => "desert",
            Biome::Forest => "forest",
            Biome::Mountains => "mountains",
        };
        f.pad(name)
    }
}

/// Low-frequency signal in `[-1, 1]` that selects the biome.
pub fn biome_signal(x: i32, z: i32, offset: f64) -> f64 {
    (x as f64 * 0.15 + offset).sin() * (z as f64 * 0.15 + offset).cos()
}

/// Threshold the biome signal. Desert and forest win over the edge rule, so
/// mountains only appear on the rim where the signal is moderate.
pub fn classify(signal: f64, x: i32, z: i32, config: &WorldConfig) -> Biome {
    if signal > config.desert_threshold as f64 {
        Biome::Desert
    } else if signal < config.forest_threshold as f64 {
        Biome::Forest
    } else if x.abs() > config.mountain_edge || z.abs() > config.mountain_edge {
        Biome::Mountains
    } else {
        Biome::Plains
    }
}
