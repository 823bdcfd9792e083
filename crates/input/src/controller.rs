use crate::action::Action;
use crate::keys::{HeldKeys, MovementKey};
use blockview_common::CameraPose;
use glam::{Vec2, Vec3};

/// Distance moved per movement tick for each held key.
pub const MOVE_SPEED: f32 = 0.15;
/// Radians of rotation per pixel of captured pointer motion.
pub const POINTER_SENSITIVITY: f32 = 0.002;
/// Radians of rotation per pixel of touch drag.
pub const TOUCH_SENSITIVITY: f32 = 0.005;

/// Pointer capture mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PointerCapture {
    #[default]
    Free,
    Captured,
}

/// Integrates input events into the camera pose.
///
/// Owns the pose, the set of held movement keys, the pointer capture state
/// and the anchor of an in-progress touch drag.
#[derive(Debug, Clone, Default)]
pub struct CameraController {
    pose: CameraPose,
    held: HeldKeys,
    capture: PointerCapture,
    touch_anchor: Option<Vec2>,
}

impl CameraController {
    pub fn new(pose: CameraPose) -> Self {
        Self {
            pose,
            ..Self::default()
        }
    }

    pub fn pose(&self) -> &CameraPose {
        &self.pose
    }

    pub fn held_keys(&self) -> HeldKeys {
        self.held
    }

    pub fn capture(&self) -> PointerCapture {
        self.capture
    }

    pub fn is_captured(&self) -> bool {
        self.capture == PointerCapture::Captured
    }

    /// Press or release a key. Only w/a/s/d (any case) are tracked.
    pub fn on_key_change(&mut self, key: &str, pressed: bool) -> Action {
        match MovementKey::from_key(key) {
            Some(key) => {
                self.held.set(key, pressed);
                Action::SetKey { key, pressed }
            }
            None => Action::Noop,
        }
    }

    /// Mouse-look. Ignored unless the pointer is captured.
    pub fn on_pointer_delta(&mut self, dx: f32, dy: f32) -> Action {
        if !self.is_captured() {
            return Action::Noop;
        }
        self.look(dx, dy, POINTER_SENSITIVITY)
    }

    /// Touch-drag look. Ignored while the pointer is captured.
    pub fn on_touch_delta(&mut self, dx: f32, dy: f32) -> Action {
        if self.is_captured() {
            return Action::Noop;
        }
        self.look(dx, dy, TOUCH_SENSITIVITY)
    }

    /// Begin a look-drag at screen point `(x, y)`.
    pub fn on_touch_start(&mut self, x: f32, y: f32) {
        self.touch_anchor = Some(Vec2::new(x, y));
    }

    /// Continue a look-drag. The delta is taken from the previous point.
    pub fn on_touch_move(&mut self, x: f32, y: f32) -> Action {
        let point = Vec2::new(x, y);
        let Some(anchor) = self.touch_anchor.replace(point) else {
            return Action::Noop;
        };
        let delta = point - anchor;
        self.on_touch_delta(delta.x, delta.y)
    }

    pub fn on_touch_end(&mut self) {
        self.touch_anchor = None;
    }

    /// Primary click or tap. Requests capture when free, interacts when
    /// already captured.
    pub fn on_primary_click(&mut self) -> Action {
        match self.capture {
            PointerCapture::Free => {
                self.capture = PointerCapture::Captured;
                tracing::debug!("pointer capture requested");
                Action::RequestCapture
            }
            PointerCapture::Captured => Action::Interact,
        }
    }

    /// The host released the pointer (escape key, focus loss).
    pub fn on_capture_lost(&mut self) -> Action {
        if self.capture == PointerCapture::Free {
            return Action::Noop;
        }
        self.capture = PointerCapture::Free;
        tracing::debug!("pointer capture lost");
        Action::ReleaseCapture
    }

    /// Virtual joystick offset, in joystick radii. Moves the camera at most
    /// [`MOVE_SPEED`] in the pushed direction relative to yaw.
    ///
    /// Returns the knob position clamped to the unit circle.
    pub fn on_joystick(&mut self, dx: f32, dy: f32) -> (Vec2, Action) {
        let offset = Vec2::new(dx, dy);
        let distance = offset.length();
        if distance == 0.0 || !distance.is_finite() {
            return (Vec2::ZERO, Action::Noop);
        }
        let knob = if distance > 1.0 { offset / distance } else { offset };
        let angle = dx.atan2(dy);
        let speed = distance.min(1.0) * MOVE_SPEED;
        let heading = self.pose.yaw() + angle;
        let step = Vec3::new(heading.sin() * speed, 0.0, heading.cos() * speed);
        self.pose.position += step;
        (knob, Action::Move(step))
    }

    /// Displacement the held keys produce this tick.
    ///
    /// Each key contributes [`MOVE_SPEED`] independently; diagonals are not
    /// normalised and travel faster than a single axis.
    pub fn movement_delta(&self) -> Vec3 {
        let (sin, cos) = self.pose.yaw().sin_cos();
        let mut delta = Vec3::ZERO;
        for key in self.held.iter() {
            let (x, z) = match key {
                MovementKey::Forward => (sin, cos),
                MovementKey::Backward => (-sin, -cos),
                MovementKey::Left => (cos, -sin),
                MovementKey::Right => (-cos, sin),
            };
            delta.x += x * MOVE_SPEED;
            delta.z += z * MOVE_SPEED;
        }
        delta
    }

    /// One movement tick. Returns `Noop` when no key is held.
    pub fn tick(&mut self) -> Action {
        if self.held.is_empty() {
            return Action::Noop;
        }
        let delta = self.movement_delta();
        self.pose.position += delta;
        Action::Move(delta)
    }

    fn look(&mut self, dx: f32, dy: f32, sensitivity: f32) -> Action {
        let d_yaw = -dx * sensitivity;
        let d_pitch = -dy * sensitivity;
        if !d_yaw.is_finite() || !d_pitch.is_finite() {
            return Action::Noop;
        }
        self.pose.rotate(d_yaw, d_pitch);
        Action::Look { d_yaw, d_pitch }
    }
}
