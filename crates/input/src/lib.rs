//! Input: key, pointer and touch events integrated into the camera pose.
//!
//! # Invariants
//! - The controller is the only writer of the camera pose.
//! - Pointer look only applies while captured; touch look only while free.
//! - Unrecognised keys are ignored, never an error.

pub mod action;
pub mod controller;
pub mod keys;

pub use action::Action;
pub use controller::{CameraController, MOVE_SPEED, PointerCapture};
pub use keys::{HeldKeys, MovementKey};
