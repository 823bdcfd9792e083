//! World configuration profiles.
//!
//! Two tuned profiles ship built in (`classic` and `expanded`); both drive
//! the same engine. A profile can also be loaded from a YAML or JSON file.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors from loading or validating a [`WorldConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),
    #[error("invalid config field `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Size of the 2D drawing target in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

impl Viewport {
    pub fn center(&self) -> (f32, f32) {
        (self.width as f32 / 2.0, self.height as f32 / 2.0)
    }
}

/// Tuning for one world profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Terrain spans `[-region_half_width, region_half_width)` on x and z.
    pub region_half_width: i32,
    /// Entities further than this from the camera are not drawn.
    pub render_distance: f32,
    pub desert_threshold: f32,
    pub forest_threshold: f32,
    /// Columns with `|x|` or `|z|` beyond this become mountains.
    pub mountain_edge: i32,
    pub mob_count: usize,
    pub pursuit_radius: f32,
    pub pursuit_speed: f32,
    pub contact_radius: f32,
    pub contact_damage: i32,
    pub spawn_position: Vec3,
    pub viewport: Viewport,
    /// Skip the start menu and generate the world immediately.
    pub auto_start: bool,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self::classic()
    }
}

impl WorldConfig {
    /// Smaller region behind a start menu.
    pub fn classic() -> Self {
        Self {
            region_half_width: 16,
            render_distance: 12.0,
            desert_threshold: 0.4,
            forest_threshold: -0.4,
            mountain_edge: 12,
            mob_count: 5,
            pursuit_radius: 10.0,
            pursuit_speed: 0.05,
            contact_radius: 2.0,
            contact_damage: 1,
            spawn_position: Vec3::new(0.0, 10.0, 0.0),
            viewport: Viewport::default(),
            auto_start: false,
        }
    }

    /// Wider region and view, starts without a menu.
    pub fn expanded() -> Self {
        Self {
            region_half_width: 20,
            render_distance: 15.0,
            desert_threshold: 0.45,
            forest_threshold: -0.45,
            mountain_edge: 16,
            auto_start: true,
            ..Self::classic()
        }
    }

    /// Look up a built-in profile by name.
    pub fn profile(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "classic" => Some(Self::classic()),
            "expanded" => Some(Self::expanded()),
            _ => None,
        }
    }

    /// Load a config from a `.yaml`/`.yml` or `.json` file and validate it.
    /// Missing fields fall back to the classic profile.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let config: Self = match ext.as_str() {
            "yaml" | "yml" => serde_yaml::from_str(&text)?,
            "json" => serde_json::from_str(&text)?,
            other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.region_half_width <= 0 {
            return Err(invalid("region_half_width", "must be positive"));
        }
        if !self.render_distance.is_finite() || self.render_distance <= 0.0 {
            return Err(invalid("render_distance", "must be a positive number"));
        }
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Err(invalid("viewport", "width and height must be non-zero"));
        }
        if self.desert_threshold <= self.forest_threshold {
            return Err(invalid(
                "desert_threshold",
                "must be greater than forest_threshold",
            ));
        }
        Ok(())
    }

    pub fn render_distance_sq(&self) -> f32 {
        self.render_distance * self.render_distance
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}
