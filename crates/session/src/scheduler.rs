use std::time::{Duration, Instant};

use blockview_render::Renderer;

use crate::session::{GameSession, Phase};
use crate::timer::FrameTimer;

/// Movement cadence.
pub const MOVEMENT_INTERVAL: Duration = Duration::from_millis(16);
/// AI and contact-damage cadence.
pub const AI_INTERVAL: Duration = Duration::from_millis(100);
/// Ticks of one cadence run per `advance` before the rest are dropped.
pub const DEFAULT_MAX_CATCH_UP_TICKS: u32 = 8;

/// Target frame period of the realtime loop.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const FRAME_HISTORY: usize = 120;

/// Running totals since the scheduler was created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickCounts {
    pub movement: u64,
    pub ai: u64,
    pub frames: u64,
    pub dropped_movement: u64,
    pub dropped_ai: u64,
}

/// A fixed-period timer on the scheduler clock.
#[derive(Debug, Clone, Copy)]
struct Cadence {
    interval: Duration,
    next_due: Duration,
}

impl Cadence {
    fn new(interval: Duration, start: Duration) -> Self {
        Self {
            interval,
            next_due: start + interval,
        }
    }

    fn is_due(&self, now: Duration) -> bool {
        self.next_due <= now
    }

    fn fire(&mut self) {
        self.next_due += self.interval;
    }

    /// Skip every overdue tick, keeping the cadence on its time grid.
    /// Returns how many ticks were skipped.
    fn skip_overdue(&mut self, now: Duration) -> u64 {
        if !self.is_due(now) {
            return 0;
        }
        let behind = (now - self.next_due).as_nanos();
        let period = self.interval.as_nanos();
        let skipped = behind / period + 1;
        let phase = Duration::from_nanos((behind % period) as u64);
        self.next_due = now - phase + self.interval;
        skipped as u64
    }
}

/// Drives a [`GameSession`] at two fixed cadences and renders once per
/// [`advance`](Self::advance).
///
/// Time is a [`Duration`] since an arbitrary epoch supplied by the caller, so
/// the scheduler runs the same against a wall clock or a simulated one.
#[derive(Debug, Clone)]
pub struct Scheduler {
    movement: Cadence,
    ai: Cadence,
    max_catch_up_ticks: u32,
    clock: Duration,
    running: bool,
    counts: TickCounts,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self::starting_at(Duration::ZERO)
    }

    /// First ticks fall one interval after `start`.
    pub fn starting_at(start: Duration) -> Self {
        Self {
            movement: Cadence::new(MOVEMENT_INTERVAL, start),
            ai: Cadence::new(AI_INTERVAL, start),
            max_catch_up_ticks: DEFAULT_MAX_CATCH_UP_TICKS,
            clock: start,
            running: true,
            counts: TickCounts::default(),
        }
    }

    /// Bound on catch-up ticks per cadence per `advance`. At least one.
    pub fn with_max_catch_up_ticks(mut self, ticks: u32) -> Self {
        self.max_catch_up_ticks = ticks.max(1);
        self
    }

    pub fn max_catch_up_ticks(&self) -> u32 {
        self.max_catch_up_ticks
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Halt all cadences. Later `advance` calls do nothing.
    pub fn stop(&mut self) {
        if self.running {
            tracing::debug!(frames = self.counts.frames, "scheduler stopped");
        }
        self.running = false;
    }

    pub fn counts(&self) -> TickCounts {
        self.counts
    }

    /// Latest time passed to `advance`.
    pub fn clock(&self) -> Duration {
        self.clock
    }

    /// Run every due tick in due-time order, then render one frame.
    ///
    /// Movement wins ties with AI. Each cadence runs at most
    /// `max_catch_up_ticks` ticks; overdue ticks beyond that are dropped.
    /// Returns `None` once stopped or after the session has ended.
    pub fn advance<R: Renderer>(
        &mut self,
        session: &mut GameSession,
        renderer: &R,
        now: Duration,
    ) -> Option<R::Output> {
        if !self.running {
            return None;
        }
        if session.phase() == Phase::Ended {
            self.stop();
            return None;
        }
        let now = now.max(self.clock);
        self.clock = now;

        let limit = self.max_catch_up_ticks;
        let (mut moves, mut ais) = (0u32, 0u32);
        loop {
            let move_due = moves < limit && self.movement.is_due(now);
            let ai_due = ais < limit && self.ai.is_due(now);
            let run_movement = match (move_due, ai_due) {
                (false, false) => break,
                (true, true) => self.movement.next_due <= self.ai.next_due,
                (movement, _) => movement,
            };
            if run_movement {
                session.movement_tick();
                self.movement.fire();
                moves += 1;
            } else {
                session.ai_tick();
                self.ai.fire();
                ais += 1;
            }
        }
        self.counts.movement += u64::from(moves);
        self.counts.ai += u64::from(ais);

        let dropped_movement = self.movement.skip_overdue(now);
        let dropped_ai = self.ai.skip_overdue(now);
        if dropped_movement + dropped_ai > 0 {
            tracing::debug!(dropped_movement, dropped_ai, "dropped overdue ticks");
            self.counts.dropped_movement += dropped_movement;
            self.counts.dropped_ai += dropped_ai;
        }

        self.counts.frames += 1;
        tracing::trace!(moves, ais, frame = self.counts.frames, "advance");
        let view = session.render_view();
        Some(renderer.render(session.world(), session.mobs(), &view))
    }

    /// Drive `advance` from the wall clock for `duration`, at most one frame
    /// every 16 ms. Each frame's output goes to `on_frame`.
    ///
    /// Returns per-frame timings for the run.
    pub fn run_realtime<R: Renderer>(
        &mut self,
        session: &mut GameSession,
        renderer: &R,
        duration: Duration,
        mut on_frame: impl FnMut(R::Output),
    ) -> FrameTimer {
        let _span = tracing::info_span!("run_realtime", ?duration).entered();
        let mut timer = FrameTimer::new(FRAME_HISTORY);
        let base = self.clock;
        let origin = Instant::now();

        while self.running {
            let elapsed = origin.elapsed();
            if elapsed >= duration {
                break;
            }
            let frame_start = Instant::now();
            let Some(output) = self.advance(session, renderer, base + elapsed) else {
                break;
            };
            on_frame(output);
            let frame_time = frame_start.elapsed();
            timer.record(frame_time);
            if let Some(idle) = FRAME_INTERVAL.checked_sub(frame_time) {
                std::thread::sleep(idle);
            }
        }

        tracing::info!(
            frames = timer.total_recorded(),
            avg = ?timer.average(),
            min = ?timer.min(),
            max = ?timer.max(),
            "realtime run finished"
        );
        timer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::InputEvent;
    use blockview_common::{CameraPose, WorldConfig};
    use blockview_kernel::{MobRegistry, World};
    use blockview_render::{ProjectionRenderer, RenderView};

    /// Reports where the camera was when the frame was drawn.
    struct CameraProbe;

    impl Renderer for CameraProbe {
        type Output = CameraPose;

        fn render(&self, _world: &World, _mobs: &MobRegistry, view: &RenderView) -> CameraPose {
            view.camera
        }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn playing(seed: u64) -> GameSession {
        GameSession::new(WorldConfig::expanded(), seed)
    }

    #[test]
    fn cadence_counts_over_one_second() {
        let mut session = playing(1);
        let mut scheduler = Scheduler::new();
        for t in 0..=1000 {
            scheduler.advance(&mut session, &CameraProbe, ms(t));
        }
        let counts = scheduler.counts();
        assert_eq!(counts.movement, 62);
        assert_eq!(counts.ai, 10);
        assert_eq!(counts.frames, 1001);
        assert_eq!(counts.dropped_movement + counts.dropped_ai, 0);
    }

    #[test]
    fn catch_up_is_bounded() {
        let mut session = playing(1);
        let mut scheduler = Scheduler::new();
        scheduler.advance(&mut session, &CameraProbe, ms(1000));
        let counts = scheduler.counts();
        assert_eq!(counts.movement, 8);
        assert_eq!(counts.dropped_movement, 54);
        assert_eq!(counts.ai, 8);
        assert_eq!(counts.dropped_ai, 2);

        // Dropped ticks stay dropped; the cadences resume on their grid.
        scheduler.advance(&mut session, &CameraProbe, ms(1007));
        assert_eq!(scheduler.counts().movement, 8);
        scheduler.advance(&mut session, &CameraProbe, ms(1008));
        assert_eq!(scheduler.counts().movement, 9);
        scheduler.advance(&mut session, &CameraProbe, ms(1100));
        assert_eq!(scheduler.counts().ai, 9);
    }

    #[test]
    fn frame_sees_ticks_from_same_advance() {
        let mut session = playing(2);
        session.handle_event(InputEvent::key_down("w"));
        let mut scheduler = Scheduler::new();
        let start_z = session.pose().position.z;

        let pose = scheduler
            .advance(&mut session, &CameraProbe, ms(160))
            .expect("running");
        assert!((pose.position.z - start_z - 8.0 * 0.15).abs() < 1e-4);
        assert_eq!(pose.position, session.pose().position);
    }

    #[test]
    fn menu_session_ticks_without_effect() {
        let mut session = GameSession::new(WorldConfig::classic(), 5);
        let mut scheduler = Scheduler::new();
        let frame = scheduler
            .advance(&mut session, &ProjectionRenderer::new(), ms(500))
            .expect("running");
        assert_eq!(scheduler.counts().ai, 5);
        assert_eq!(frame.stats.considered, 0);
        assert_eq!(session.pose().position, WorldConfig::classic().spawn_position);
    }

    #[test]
    fn stop_and_end_halt_advance() {
        let mut session = playing(3);
        let mut scheduler = Scheduler::new();
        assert!(scheduler.advance(&mut session, &CameraProbe, ms(16)).is_some());
        scheduler.stop();
        assert!(scheduler.advance(&mut session, &CameraProbe, ms(32)).is_none());
        assert_eq!(scheduler.counts().movement, 1);

        let mut scheduler = Scheduler::new();
        session.end();
        assert!(scheduler.advance(&mut session, &CameraProbe, ms(16)).is_none());
        assert!(!scheduler.is_running());
    }

    #[test]
    fn clock_never_runs_backwards() {
        let mut session = playing(4);
        let mut scheduler = Scheduler::starting_at(ms(100));
        scheduler.advance(&mut session, &CameraProbe, ms(132));
        assert_eq!(scheduler.counts().movement, 2);
        scheduler.advance(&mut session, &CameraProbe, ms(50));
        assert_eq!(scheduler.clock(), ms(132));
        assert_eq!(scheduler.counts().movement, 2);
    }

    #[test]
    fn realtime_run_records_frames() {
        let mut session = playing(6);
        let mut scheduler = Scheduler::new();
        let mut frames = 0;
        let timer = scheduler.run_realtime(&mut session, &CameraProbe, ms(60), |_| frames += 1);
        assert!(frames >= 1);
        assert_eq!(timer.total_recorded(), frames);
        assert!(scheduler.clock() < ms(60));
    }
}
