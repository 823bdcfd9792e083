use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, TAU};

/// First-person camera pose.
///
/// Yaw is kept in `[0, 2π)` and pitch in `[-π/2, π/2]`. Both invariants are
/// enforced here on every write so readers (renderer, raycast) never re-clamp.
/// Deserialized poses go through [`CameraPose::new`] as well.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "PoseFields")]
pub struct CameraPose {
    pub position: Vec3,
    yaw: f32,
    pitch: f32,
}

#[derive(Deserialize)]
struct PoseFields {
    position: Vec3,
    yaw: f32,
    pitch: f32,
}

impl From<PoseFields> for CameraPose {
    fn from(raw: PoseFields) -> Self {
        Self::new(raw.position, raw.yaw, raw.pitch)
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 10.0, 0.0),
            yaw: 0.0,
            pitch: 0.0,
        }
    }
}

impl CameraPose {
    pub fn new(position: Vec3, yaw: f32, pitch: f32) -> Self {
        Self {
            position,
            yaw: wrap_yaw(yaw),
            pitch: clamp_pitch(pitch),
        }
    }

    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Add to yaw and pitch, re-establishing both invariants.
    pub fn rotate(&mut self, d_yaw: f32, d_pitch: f32) {
        self.yaw = wrap_yaw(self.yaw + d_yaw);
        self.pitch = clamp_pitch(self.pitch + d_pitch);
    }

    /// Unit direction the camera is aiming along.
    pub fn look_vector(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(sin_yaw * cos_pitch, sin_pitch, cos_yaw * cos_pitch)
    }
}

/// Wrap an angle into `[0, 2π)`.
pub fn wrap_yaw(yaw: f32) -> f32 {
    let wrapped = yaw.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if wrapped >= TAU { 0.0 } else { wrapped }
}

pub fn clamp_pitch(pitch: f32) -> f32 {
    pitch.clamp(-FRAC_PI_2, FRAC_PI_2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pose_starts_above_origin() {
        let cam = CameraPose::default();
        assert_eq!(cam.position, Vec3::new(0.0, 10.0, 0.0));
        assert_eq!(cam.yaw(), 0.0);
        assert_eq!(cam.pitch(), 0.0);
    }

    #[test]
    fn wrap_yaw_handles_negative_and_large() {
        assert!((wrap_yaw(-0.5) - (TAU - 0.5)).abs() < 1e-5);
        assert!((wrap_yaw(TAU + 1.0) - 1.0).abs() < 1e-5);
        assert_eq!(wrap_yaw(-1e-9), 0.0);
        assert!(wrap_yaw(-1e-9) < TAU);
    }

    #[test]
    fn rotate_keeps_invariants() {
        let mut cam = CameraPose::default();
        for _ in 0..1000 {
            cam.rotate(-0.37, 0.21);
            assert!(cam.yaw() >= 0.0 && cam.yaw() < TAU);
            assert!(cam.pitch().abs() <= FRAC_PI_2);
        }
        assert_eq!(cam.pitch(), FRAC_PI_2);
    }

    #[test]
    fn deserialized_pose_is_normalised() {
        let json = r#"{"position":[1.0,2.0,3.0],"yaw":-0.5,"pitch":3.0}"#;
        let cam: CameraPose = serde_json::from_str(json).unwrap();
        assert_eq!(cam.position, Vec3::new(1.0, 2.0, 3.0));
        assert!((cam.yaw() - (TAU - 0.5)).abs() < 1e-5);
        assert_eq!(cam.pitch(), FRAC_PI_2);

        let back: CameraPose = serde_json::from_str(&serde_json::to_string(&cam).unwrap()).unwrap();
        assert_eq!(back, cam);
    }

    #[test]
    fn look_vector_is_unit_length() {
        let cam = CameraPose::new(Vec3::ZERO, 1.2, -0.4);
        assert!((cam.look_vector().length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn zero_yaw_looks_down_positive_z() {
        let cam = CameraPose::default();
        let v = cam.look_vector();
        assert!(v.x.abs() < 1e-6);
        assert!(v.y.abs() < 1e-6);
        assert!((v.z - 1.0).abs() < 1e-6);
    }
}
