//! World Kernel: authoritative block and mob state plus the operations that
//! mutate it.
//!
//! # Invariants
//! - `World` is the single owner of blocks and inventory; `MobRegistry` of mobs.
//! - All block mutations flow through explicit operations and are logged.
//! - Removing a block updates storage and the coordinate index together.

mod index;
pub mod inventory;
pub mod mobs;
pub mod raycast;
pub mod world;

pub use index::BlockIndex;
pub use inventory::{Inventory, InventorySlot};
pub use mobs::{MOB_MAX_HEALTH, Mob, MobRegistry, MobTuning};
pub use raycast::{MAX_RAY_SAMPLES, RayHit, RaycastSettings, cast, try_break_block};
pub use world::{BlockId, World, WorldEvent};
