use crate::world::{BlockId, World};
use blockview_common::{Block, BlockPos, CameraPose};
use glam::{IVec3, Vec3};

/// Upper bound on samples per cast, whatever the reach and step.
pub const MAX_RAY_SAMPLES: u32 = 4096;

/// Reach and sampling step of the interaction ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastSettings {
    pub max_distance: f32,
    pub step: f32,
}

impl Default for RaycastSettings {
    fn default() -> Self {
        Self {
            max_distance: 5.0,
            step: 0.2,
        }
    }
}

/// First occupied cell found along the ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub id: BlockId,
    pub block: Block,
    /// Ray parameter of the sample that landed in the cell.
    pub distance: f32,
}

/// March the camera's look ray and report the first occupied cell.
///
/// Samples are taken at `t = 0, step, 2·step, …` while `t < max_distance`.
/// Each sample point is rounded to the lattice; "first" is first along the
/// ray, which is not always the block nearest in straight-line distance.
///
/// A non-finite or non-positive step or reach casts nothing. At most
/// [`MAX_RAY_SAMPLES`] samples are taken.
pub fn cast(camera: &CameraPose, world: &World, settings: RaycastSettings) -> Option<RayHit> {
    let RaycastSettings { max_distance, step } = settings;
    if !(step > 0.0 && step.is_finite()) || !(max_distance > 0.0 && max_distance.is_finite()) {
        return None;
    }
    let samples = (max_distance / step).ceil().min(MAX_RAY_SAMPLES as f32) as u32;
    let dir = camera.look_vector();
    let mut last_cell = None;
    for i in 0..samples {
        let t = i as f32 * step;
        if t >= max_distance {
            break;
        }
        let cell = round_to_cell(camera.position + dir * t);
        // Consecutive samples often land in the same cell.
        if last_cell == Some(cell) {
            continue;
        }
        last_cell = Some(cell);
        if let Some((id, block)) = world.block_at(cell) {
            return Some(RayHit {
                id,
                block: *block,
                distance: t,
            });
        }
    }
    None
}

/// Remove the first block along the camera's look ray and credit it to the
/// inventory. Returns the removed block, or `None` if nothing is in reach.
pub fn try_break_block(
    camera: &CameraPose,
    world: &mut World,
    settings: RaycastSettings,
) -> Option<Block> {
    let hit = cast(camera, world, settings)?;
    let block = world.remove(hit.id)?;
    let credited = world.credit_inventory(block.kind);
    tracing::debug!(
        kind = %block.kind,
        x = block.pos.x,
        y = block.pos.y,
        z = block.pos.z,
        distance = hit.distance,
        credited,
        "block broken"
    );
    Some(block)
}

/// Round half up on each axis, so `-0.5` maps to `0` rather than `-1`.
fn round_to_cell(p: Vec3) -> BlockPos {
    IVec3::new(
        (p.x + 0.5).floor() as i32,
        (p.y + 0.5).floor() as i32,
        (p.z + 0.5).floor() as i32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockview_common::BlockKind;

    fn facing_block(kind: BlockKind) -> (CameraPose, World) {
        let world = World::from_blocks([Block::new(kind, 0, 1, 0)]);
        let camera = CameraPose::new(Vec3::new(0.0, 1.0, -3.0), 0.0, 0.0);
        (camera, world)
    }

    #[test]
    fn breaks_block_ahead_and_credits_inventory() {
        let (camera, mut world) = facing_block(BlockKind::Dirt);
        let removed = try_break_block(&camera, &mut world, RaycastSettings::default());
        assert_eq!(removed, Some(Block::new(BlockKind::Dirt, 0, 1, 0)));
        assert_eq!(world.block_count(), 0);
        assert_eq!(world.inventory().count_of(BlockKind::Dirt), 1);

        let again = try_break_block(&camera, &mut world, RaycastSettings::default());
        assert!(again.is_none());
        assert_eq!(world.inventory().count_of(BlockKind::Dirt), 1);
    }

    #[test]
    fn untracked_kind_is_removed_without_credit() {
        let (camera, mut world) = facing_block(BlockKind::Sand);
        assert!(try_break_block(&camera, &mut world, RaycastSettings::default()).is_some());
        assert_eq!(world.block_count(), 0);
        assert!(world.inventory().slots().iter().all(|s| s.count == 0));
    }

    #[test]
    fn block_beyond_reach_is_ignored() {
        let world = World::from_blocks([Block::new(BlockKind::Stone, 0, 1, 6)]);
        let camera = CameraPose::new(Vec3::new(0.0, 1.0, 0.0), 0.0, 0.0);
        assert!(cast(&camera, &world, RaycastSettings::default()).is_none());
    }

    #[test]
    fn nearest_along_ray_wins() {
        let world = World::from_blocks([
            Block::new(BlockKind::Stone, 0, 1, 3),
            Block::new(BlockKind::Grass, 0, 1, 1),
        ]);
        let camera = CameraPose::new(Vec3::new(0.0, 1.0, -1.0), 0.0, 0.0);
        let hit = cast(&camera, &world, RaycastSettings::default()).unwrap();
        assert_eq!(hit.block.kind, BlockKind::Grass);
    }

    #[test]
    fn looking_down_hits_block_below() {
        let world = World::from_blocks([Block::new(BlockKind::Grass, 0, 0, 0)]);
        let camera = CameraPose::new(Vec3::new(0.0, 2.0, 0.0), 0.0, -std::f32::consts::FRAC_PI_2);
        let hit = cast(&camera, &world, RaycastSettings::default()).unwrap();
        assert_eq!(hit.block.pos, IVec3::ZERO);
    }

    #[test]
    fn rounding_is_half_up() {
        assert_eq!(round_to_cell(Vec3::new(-0.5, 0.5, 1.49)), IVec3::new(0, 1, 1));
        assert_eq!(round_to_cell(Vec3::new(-0.51, -1.5, 2.5)), IVec3::new(-1, -1, 3));
    }

    #[test]
    fn zero_step_is_rejected() {
        let (camera, world) = facing_block(BlockKind::Dirt);
        let settings = RaycastSettings {
            max_distance: 5.0,
            step: 0.0,
        };
        assert!(cast(&camera, &world, settings).is_none());
    }

    #[test]
    fn non_finite_settings_cast_nothing() {
        let (camera, mut world) = facing_block(BlockKind::Dirt);
        let bad = [
            (5.0, f32::NAN),
            (f32::NAN, 0.2),
            (f32::INFINITY, 0.2),
            (5.0, f32::INFINITY),
            (-5.0, 0.2),
        ];
        for (max_distance, step) in bad {
            let settings = RaycastSettings { max_distance, step };
            assert!(cast(&camera, &world, settings).is_none());
            assert!(try_break_block(&camera, &mut world, settings).is_none());
        }
        assert_eq!(world.block_count(), 1);
    }

    #[test]
    fn tiny_step_is_capped() {
        let world = World::from_blocks([Block::new(BlockKind::Stone, 0, 1, 0)]);
        let camera = CameraPose::new(Vec3::new(0.0, 1.0, -3.0), 0.0, 0.0);
        let settings = RaycastSettings {
            max_distance: 5.0,
            step: 1e-9,
        };
        // The capped march never leaves the camera's own cell.
        assert!(cast(&camera, &world, settings).is_none());

        let settings = RaycastSettings {
            max_distance: 5.0,
            step: 0.001,
        };
        let hit = cast(&camera, &world, settings).unwrap();
        assert_eq!(hit.block.pos, IVec3::new(0, 1, 0));
    }
}
