use crate::projection::ProjectionRenderer;
use blockview_common::{CameraPose, Viewport, WorldConfig};
use blockview_kernel::{MobRegistry, World};

/// Camera and surface configuration for one frame.
#[derive(Debug, Clone, Copy)]
pub struct RenderView {
    pub camera: CameraPose,
    pub viewport: Viewport,
    /// Entities further than this are culled.
    pub render_distance: f32,
}

impl Default for RenderView {
    fn default() -> Self {
        Self::from_config(CameraPose::default(), &WorldConfig::classic())
    }
}

impl RenderView {
    pub fn from_config(camera: CameraPose, config: &WorldConfig) -> Self {
        Self {
            camera,
            viewport: config.viewport,
            render_distance: config.render_distance,
        }
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads world state, mobs and a view, then produces output.
/// It never mutates the world; world truth is kernel-owned.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given state and view.
    fn render(&self, world: &World, mobs: &MobRegistry, view: &RenderView) -> Self::Output;
}

/// Human-readable frame dump.
///
/// Runs the projection and lists what would be drawn, farthest first. Useful
/// for CLI output, logging, and testing the render interface.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    projection: ProjectionRenderer,
    /// Maximum number of entities listed. `None` lists them all.
    pub max_entries: Option<usize>,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_entries(max_entries: usize) -> Self {
        Self {
            max_entries: Some(max_entries),
            ..Self::default()
        }
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, world: &World, mobs: &MobRegistry, view: &RenderView) -> String {
        let frame = self.projection.render(world, mobs, view);
        let cam = &view.camera;
        let mut out = String::new();
        out.push_str(&format!(
            "=== Frame ({}x{}, render_distance={:.1}) ===\n",
            view.viewport.width, view.viewport.height, view.render_distance
        ));
        out.push_str(&format!(
            "Blocks: {}  Mobs: {}\n",
            world.block_count(),
            mobs.len()
        ));
        out.push_str(&format!(
            "Camera: pos=({:.1}, {:.1}, {:.1}) yaw={:.3} pitch={:.3}\n",
            cam.position.x,
            cam.position.y,
            cam.position.z,
            cam.yaw(),
            cam.pitch()
        ));
        let s = frame.stats;
        out.push_str(&format!(
            "Drawn: {} (blocks={}, mobs={})  culled: distance={} behind={}  primitives={}\n",
            s.drawn(),
            s.drawn_blocks,
            s.drawn_mobs,
            s.culled_by_distance,
            s.culled_behind,
            frame.primitives.len()
        ));

        let limit = self.max_entries.unwrap_or(usize::MAX);
        for e in frame.entities.iter().take(limit) {
            let label = match e.tag {
                crate::EntityTag::Block { block } => format!("block {block}"),
                crate::EntityTag::Mob { id, mob, health } => {
                    format!("mob #{id} {mob} hp={health}")
                }
            };
            out.push_str(&format!(
                "  {label:<22} screen=({:.1}, {:.1}) size={:.1} dist={:.2}\n",
                e.screen_x,
                e.screen_y,
                e.size,
                e.distance_sq.sqrt()
            ));
        }
        if frame.entities.len() > limit {
            out.push_str(&format!("  … {} more\n", frame.entities.len() - limit));
        }

        out
    }
}
