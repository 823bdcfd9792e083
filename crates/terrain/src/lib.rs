//! Terrain: procedural block generation for a single fixed-size region.
//!
//! # Invariants
//! - Generation is a pure function of configuration and seed.
//! - Every column in the region gets a contiguous stack from `y = 0`.
//! - No external noise source; biome and height come from sums of sines.

mod biome;
mod generator;

pub use biome::{Biome, biome_signal, classify};
pub use generator::{TerrainStats, column_height, generate, generate_with_stats};
