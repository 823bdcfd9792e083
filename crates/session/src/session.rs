use blockview_common::{Block, CameraPose, SplitMix64, WorldConfig};
use blockview_input::{Action, CameraController};
use blockview_kernel::{MobRegistry, MobTuning, RaycastSettings, World, try_break_block};
use blockview_render::RenderView;
use blockview_terrain::TerrainStats;

/// Health the player starts with.
pub const MAX_HEALTH: i32 = 100;

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    /// Waiting at the start menu. The world is empty.
    #[default]
    Menu,
    Playing,
    Ended,
}

/// A raw event from the host.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key { key: String, pressed: bool },
    PointerDelta { dx: f32, dy: f32 },
    CaptureLost,
    PrimaryClick,
    TouchStart { x: f32, y: f32 },
    TouchMove { x: f32, y: f32 },
    TouchEnd,
    /// Joystick knob offset in joystick radii.
    Joystick { dx: f32, dy: f32 },
    AttackButton,
    SelectSlot(usize),
}

impl InputEvent {
    pub fn key_down(key: impl Into<String>) -> Self {
        Self::Key {
            key: key.into(),
            pressed: true,
        }
    }

    pub fn key_up(key: impl Into<String>) -> Self {
        Self::Key {
            key: key.into(),
            pressed: false,
        }
    }
}

/// Everything that changes while playing: world, mobs, camera, health and
/// the selected inventory slot.
#[derive(Debug, Clone)]
pub struct GameSession {
    config: WorldConfig,
    seed: u64,
    phase: Phase,
    world: World,
    mobs: MobRegistry,
    controller: CameraController,
    health: i32,
    selected_slot: usize,
    raycast: RaycastSettings,
    terrain_stats: Option<TerrainStats>,
}

impl GameSession {
    /// Create a session in the menu. With `config.auto_start` the world is
    /// generated immediately.
    pub fn new(config: WorldConfig, seed: u64) -> Self {
        let mut session = Self {
            controller: CameraController::new(CameraPose::at(config.spawn_position)),
            mobs: MobRegistry::new(MobTuning::from_config(&config)),
            config,
            seed,
            phase: Phase::Menu,
            world: World::new(),
            health: MAX_HEALTH,
            selected_slot: 0,
            raycast: RaycastSettings::default(),
            terrain_stats: None,
        };
        if session.config.auto_start {
            session.start();
        }
        session
    }

    /// Generate terrain, spawn mobs and enter [`Phase::Playing`].
    /// Returns `false` if the session was not in the menu.
    pub fn start(&mut self) -> bool {
        if self.phase != Phase::Menu {
            return false;
        }
        let _span = tracing::info_span!("session_start", seed = self.seed).entered();
        let (blocks, stats) = blockview_terrain::generate_with_stats(&self.config, self.seed);
        self.world.populate(blocks);
        let mut rng = SplitMix64::new(self.seed);
        self.mobs = MobRegistry::spawn(&self.config, &mut rng);
        self.terrain_stats = Some(stats);
        self.phase = Phase::Playing;
        tracing::info!(
            blocks = self.world.block_count(),
            mobs = self.mobs.len(),
            "session started"
        );
        true
    }

    /// Enter [`Phase::Ended`]. Later input and ticks are ignored.
    pub fn end(&mut self) {
        if self.phase != Phase::Ended {
            tracing::info!(health = self.health, "session ended");
            self.phase = Phase::Ended;
        }
    }

    pub fn handle_event(&mut self, event: InputEvent) -> Action {
        if self.phase != Phase::Playing {
            return Action::Noop;
        }
        let c = &mut self.controller;
        match event {
            InputEvent::Key { key, pressed } => c.on_key_change(&key, pressed),
            InputEvent::PointerDelta { dx, dy } => c.on_pointer_delta(dx, dy),
            InputEvent::CaptureLost => c.on_capture_lost(),
            InputEvent::PrimaryClick => {
                let action = c.on_primary_click();
                if action == Action::Interact {
                    self.break_block();
                }
                action
            }
            InputEvent::TouchStart { x, y } => {
                c.on_touch_start(x, y);
                Action::Noop
            }
            InputEvent::TouchMove { x, y } => c.on_touch_move(x, y),
            InputEvent::TouchEnd => {
                c.on_touch_end();
                Action::Noop
            }
            InputEvent::Joystick { dx, dy } => c.on_joystick(dx, dy).1,
            InputEvent::AttackButton => {
                self.break_block();
                Action::Interact
            }
            InputEvent::SelectSlot(slot) => {
                if slot >= self.world.inventory().len() {
                    return Action::Noop;
                }
                self.selected_slot = slot;
                Action::SelectSlot(slot)
            }
        }
    }

    /// Move the camera to `pose`, keeping no held keys or capture.
    pub fn place_camera(&mut self, pose: CameraPose) {
        self.controller = CameraController::new(pose);
    }

    /// Break the block under the crosshair, if any is in reach.
    pub fn break_block(&mut self) -> Option<Block> {
        try_break_block(self.controller.pose(), &mut self.world, self.raycast)
    }

    /// One movement cadence tick.
    pub fn movement_tick(&mut self) -> Action {
        if self.phase != Phase::Playing {
            return Action::Noop;
        }
        self.controller.tick()
    }

    /// One AI cadence tick: pursuit, then contact damage against the
    /// positions pursuit just produced. Returns the player's health.
    pub fn ai_tick(&mut self) -> i32 {
        if self.phase != Phase::Playing {
            return self.health;
        }
        let camera = self.controller.pose().position;
        let pursuing = self.mobs.step_pursuit(camera);
        let before = self.health;
        self.health = self.mobs.apply_contact_damage(camera, self.health);
        tracing::trace!(pursuing, health = self.health, "ai tick");
        if self.health < before {
            tracing::debug!(damage = before - self.health, health = self.health, "player hit");
        }
        self.health
    }

    pub fn render_view(&self) -> RenderView {
        RenderView::from_config(*self.controller.pose(), &self.config)
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.phase == Phase::Playing
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn mobs(&self) -> &MobRegistry {
        &self.mobs
    }

    pub fn controller(&self) -> &CameraController {
        &self.controller
    }

    pub fn pose(&self) -> &CameraPose {
        self.controller.pose()
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn selected_slot(&self) -> usize {
        self.selected_slot
    }

    pub fn raycast_settings(&self) -> RaycastSettings {
        self.raycast
    }

    pub fn set_raycast_settings(&mut self, settings: RaycastSettings) {
        self.raycast = settings;
    }

    /// Statistics from terrain generation. `None` until started.
    pub fn terrain_stats(&self) -> Option<&TerrainStats> {
        self.terrain_stats.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockview_common::BlockKind;
    use glam::Vec3;
    use std::f32::consts::FRAC_PI_2;

    fn playing() -> GameSession {
        let mut s = GameSession::new(WorldConfig::classic(), 42);
        assert!(s.start());
        s
    }

    #[test]
    fn classic_waits_in_menu() {
        let s = GameSession::new(WorldConfig::classic(), 1);
        assert_eq!(s.phase(), Phase::Menu);
        assert_eq!(s.world().block_count(), 0);
        assert!(s.mobs().is_empty());
        assert!(s.terrain_stats().is_none());
    }

    #[test]
    fn expanded_auto_starts() {
        let s = GameSession::new(WorldConfig::expanded(), 1);
        assert_eq!(s.phase(), Phase::Playing);
        assert!(s.world().block_count() >= 40 * 40);
        assert_eq!(s.mobs().len(), 5);
        assert_eq!(s.terrain_stats().map(|t| t.columns), Some(1600));
    }

    #[test]
    fn start_only_from_menu() {
        let mut s = playing();
        let blocks = s.world().block_count();
        assert!(!s.start());
        assert_eq!(s.world().block_count(), blocks);
        s.end();
        assert!(!s.start());
    }

    #[test]
    fn events_ignored_outside_playing() {
        let mut s = GameSession::new(WorldConfig::classic(), 3);
        assert_eq!(s.handle_event(InputEvent::key_down("w")), Action::Noop);
        assert_eq!(s.movement_tick(), Action::Noop);
        assert_eq!(s.ai_tick(), MAX_HEALTH);

        s.start();
        s.end();
        assert_eq!(s.handle_event(InputEvent::PrimaryClick), Action::Noop);
        assert_eq!(s.pose().position, WorldConfig::classic().spawn_position);
    }

    #[test]
    fn held_key_moves_each_tick() {
        let mut s = playing();
        s.handle_event(InputEvent::key_down("W"));
        for _ in 0..10 {
            s.movement_tick();
        }
        assert!((s.pose().position.z - 1.5).abs() < 1e-4);
        s.handle_event(InputEvent::key_up("w"));
        assert_eq!(s.movement_tick(), Action::Noop);
    }

    #[test]
    fn click_captures_then_breaks() {
        let mut s = playing();
        assert_eq!(s.handle_event(InputEvent::PrimaryClick), Action::RequestCapture);
        let before = s.world().block_count();
        // Level gaze from y=10 reaches nothing within 5 units of terrain.
        assert_eq!(s.handle_event(InputEvent::PrimaryClick), Action::Interact);
        assert_eq!(s.world().block_count(), before);
    }

    #[test]
    fn break_reads_live_world() {
        let mut s = playing();
        // Stand just above the origin column, looking straight down.
        let surface = (0..32)
            .rev()
            .find(|&y| s.world().is_occupied(glam::IVec3::new(0, y, 0)))
            .expect("origin column has blocks");
        s.place_camera(CameraPose::new(
            Vec3::new(0.0, surface as f32 + 2.0, 0.0),
            0.0,
            -FRAC_PI_2,
        ));

        let before = s.world().block_count();
        let first = s.break_block().expect("surface in reach");
        assert_eq!(first.pos.y, surface);
        assert_eq!(s.world().block_count(), before - 1);

        // The next break sees the removal and digs one deeper.
        let second = s.break_block().expect("next layer in reach");
        assert_eq!(second.pos.y, surface - 1);
    }

    #[test]
    fn attack_button_breaks_and_credits() {
        let mut s = GameSession::new(WorldConfig::classic(), 9);
        s.world = World::from_blocks([Block::new(BlockKind::Wood, 0, 1, 3)]);
        s.phase = Phase::Playing;
        s.place_camera(CameraPose::new(Vec3::new(0.0, 1.0, 0.0), 0.0, 0.0));
        assert_eq!(s.handle_event(InputEvent::AttackButton), Action::Interact);
        assert_eq!(s.world().block_count(), 0);
        assert_eq!(s.world().inventory().count_of(BlockKind::Wood), 1);
    }

    #[test]
    fn unusable_raycast_settings_make_attack_a_miss() {
        let mut s = GameSession::new(WorldConfig::classic(), 9);
        s.world = World::from_blocks([Block::new(BlockKind::Wood, 0, 1, 3)]);
        s.phase = Phase::Playing;
        s.place_camera(CameraPose::new(Vec3::new(0.0, 1.0, 0.0), 0.0, 0.0));
        s.set_raycast_settings(RaycastSettings {
            max_distance: 5.0,
            step: f32::NAN,
        });
        assert_eq!(s.handle_event(InputEvent::AttackButton), Action::Interact);
        assert_eq!(s.world().block_count(), 1);
        assert_eq!(s.world().inventory().count_of(BlockKind::Wood), 0);
    }

    #[test]
    fn ai_tick_damages_from_fresh_positions() {
        let mut s = playing();
        let at = s.pose().position;
        s.mobs = MobRegistry::from_mobs(
            vec![blockview_kernel::Mob {
                id: 0,
                position: at + Vec3::new(0.0, 0.0, 1.0),
                health: 20,
                kind: blockview_common::MobKind::Zombie,
            }],
            MobTuning::default(),
        );
        assert_eq!(s.ai_tick(), MAX_HEALTH - 1);
        assert_eq!(s.ai_tick(), MAX_HEALTH - 2);
    }

    #[test]
    fn select_slot_bounds() {
        let mut s = playing();
        assert_eq!(s.handle_event(InputEvent::SelectSlot(2)), Action::SelectSlot(2));
        assert_eq!(s.selected_slot(), 2);
        assert_eq!(s.handle_event(InputEvent::SelectSlot(9)), Action::Noop);
        assert_eq!(s.selected_slot(), 2);
    }

    #[test]
    fn same_seed_same_session() {
        let a = playing();
        let b = playing();
        assert_eq!(a.world().state_hash(), b.world().state_hash());
        assert_eq!(a.mobs().mobs(), b.mobs().mobs());
    }
}
