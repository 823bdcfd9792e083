use crate::keys::MovementKey;
use glam::Vec3;

/// What a raw input event resolved to.
///
/// Desktop (keyboard + pointer) and touch events all map onto this one set,
/// so the session and its host see the same vocabulary regardless of device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// A movement key changed state.
    SetKey { key: MovementKey, pressed: bool },
    /// The camera was displaced by this amount.
    Move(Vec3),
    /// The camera was rotated by these deltas (radians).
    Look { d_yaw: f32, d_pitch: f32 },
    /// The host should capture (lock) the pointer.
    RequestCapture,
    /// Pointer capture ended.
    ReleaseCapture,
    /// Break the block under the crosshair.
    Interact,
    /// Select an inventory slot.
    SelectSlot(usize),
    /// The event had no effect.
    Noop,
}

impl Action {
    pub fn is_noop(&self) -> bool {
        matches!(self, Action::Noop)
    }
}
