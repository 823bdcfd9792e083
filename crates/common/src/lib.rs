//! Shared types and utilities for the blockview engine.

pub mod camera;
pub mod config;
pub mod rng;
pub mod types;

pub use camera::{CameraPose, clamp_pitch, wrap_yaw};
pub use config::{ConfigError, Viewport, WorldConfig};
pub use rng::SplitMix64;
pub use types::{Block, BlockKind, BlockPos, MobKind};
