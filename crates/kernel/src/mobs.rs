use blockview_common::{MobKind, SplitMix64, WorldConfig};
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Health every mob spawns with. Also the full width of its health bar.
pub const MOB_MAX_HEALTH: i32 = 20;

/// Height mobs spawn at.
const SPAWN_HEIGHT: f32 = 5.0;

/// Half-width of the square mobs spawn in, centred on the origin.
const SPAWN_SPREAD: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mob {
    pub id: u32,
    pub position: Vec3,
    pub health: i32,
    pub kind: MobKind,
}

/// Pursuit and damage tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MobTuning {
    /// Planar (x, z) detection radius.
    pub pursuit_radius: f32,
    /// Distance moved per AI tick while pursuing.
    pub pursuit_speed: f32,
    /// Full 3D radius inside which a mob hurts the player.
    pub contact_radius: f32,
    /// Health removed per mob in contact per AI tick.
    pub contact_damage: i32,
}

impl Default for MobTuning {
    fn default() -> Self {
        Self::from_config(&WorldConfig::classic())
    }
}

impl MobTuning {
    pub fn from_config(config: &WorldConfig) -> Self {
        Self {
            pursuit_radius: config.pursuit_radius,
            pursuit_speed: config.pursuit_speed,
            contact_radius: config.contact_radius,
            contact_damage: config.contact_damage,
        }
    }
}

/// Owns every mob and runs their AI.
#[derive(Debug, Clone, Default)]
pub struct MobRegistry {
    mobs: Vec<Mob>,
    tuning: MobTuning,
}

impl MobRegistry {
    pub fn new(tuning: MobTuning) -> Self {
        Self {
            mobs: Vec::new(),
            tuning,
        }
    }

    /// Spawn `config.mob_count` mobs at random positions around the origin.
    pub fn spawn(config: &WorldConfig, rng: &mut SplitMix64) -> Self {
        let mobs = (0..config.mob_count)
            .map(|i| {
                let x = rng.range_f32(-SPAWN_SPREAD, SPAWN_SPREAD);
                let z = rng.range_f32(-SPAWN_SPREAD, SPAWN_SPREAD);
                let kind = if rng.next_f32() > 0.5 {
                    MobKind::Zombie
                } else {
                    MobKind::Skeleton
                };
                Mob {
                    id: i as u32,
                    position: Vec3::new(x, SPAWN_HEIGHT, z),
                    health: MOB_MAX_HEALTH,
                    kind,
                }
            })
            .collect();
        tracing::debug!(count = config.mob_count, "mobs spawned");
        Self {
            mobs,
            tuning: MobTuning::from_config(config),
        }
    }

    pub fn from_mobs(mobs: Vec<Mob>, tuning: MobTuning) -> Self {
        Self { mobs, tuning }
    }

    pub fn mobs(&self) -> &[Mob] {
        &self.mobs
    }

    pub fn len(&self) -> usize {
        self.mobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mobs.is_empty()
    }

    pub fn tuning(&self) -> &MobTuning {
        &self.tuning
    }

    /// Move every mob within planar pursuit range one step toward the camera.
    /// Height is ignored. Returns how many mobs moved.
    pub fn step_pursuit(&mut self, camera: Vec3) -> usize {
        let MobTuning {
            pursuit_radius,
            pursuit_speed,
            ..
        } = self.tuning;
        let mut moved = 0;
        for mob in &mut self.mobs {
            let delta = Vec2::new(camera.x - mob.position.x, camera.z - mob.position.z);
            let distance = delta.length();
            // A mob exactly under the camera has no direction to move in.
            if distance > 0.0 && distance < pursuit_radius {
                let step = delta / distance * pursuit_speed;
                mob.position.x += step.x;
                mob.position.z += step.y;
                moved += 1;
            }
        }
        tracing::trace!(moved, "pursuit step");
        moved
    }

    /// Apply contact damage from every mob within full 3D range of the
    /// camera. Returns the player's new health, never below zero.
    pub fn apply_contact_damage(&self, camera: Vec3, health: i32) -> i32 {
        let attackers = self
            .mobs
            .iter()
            .filter(|m| m.position.distance(camera) < self.tuning.contact_radius)
            .count() as i32;
        if attackers > 0 {
            tracing::trace!(attackers, "contact damage");
        }
        (health - attackers * self.tuning.contact_damage).max(0)
    }
}
