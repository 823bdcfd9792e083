use crate::draw::{DrawList, DrawPrimitive, EntityTag, FrameStats, ProjectedEntity, Rect};
use crate::palette::{BLOCK_BORDER, CROSSHAIR, HEALTH_BAR, SKY, block_color, mob_color};
use crate::renderer::{RenderView, Renderer};
use blockview_kernel::{MOB_MAX_HEALTH, MobRegistry, World};
use glam::Vec3;

/// On-screen edge length of a block at unit depth, before perspective.
pub const BLOCK_SIZE: f32 = 40.0;

/// Entities with camera-space depth below this are not drawn.
pub const NEAR_PLANE: f32 = 0.1;

const CROSSHAIR_HALF: f32 = 10.0;
const CROSSHAIR_WIDTH: f32 = 2.0;
const HEALTH_BAR_HEIGHT: f32 = 3.0;

/// Screen-space result of projecting one point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub screen_x: f32,
    pub screen_y: f32,
    pub size: f32,
    pub distance_sq: f32,
}

/// Trig of the camera angles, computed once per frame.
#[derive(Debug, Clone, Copy)]
struct ViewBasis {
    sin_yaw: f32,
    cos_yaw: f32,
    sin_pitch: f32,
    cos_pitch: f32,
    half_w: f32,
    half_h: f32,
    max_distance_sq: f32,
}

impl ViewBasis {
    fn new(view: &RenderView) -> Self {
        let (sin_yaw, cos_yaw) = view.camera.yaw().sin_cos();
        let (sin_pitch, cos_pitch) = view.camera.pitch().sin_cos();
        let (half_w, half_h) = view.viewport.center();
        Self {
            sin_yaw,
            cos_yaw,
            sin_pitch,
            cos_pitch,
            half_w,
            half_h,
            max_distance_sq: view.render_distance * view.render_distance,
        }
    }
}

enum Cull {
    Distance,
    Behind,
}

/// Project a world-space point for the given view.
///
/// Returns `None` if the point is beyond the render distance or not in front
/// of the near plane. The camera's own position always falls in the latter.
pub fn project(point: Vec3, view: &RenderView) -> Option<Projection> {
    project_with(point - view.camera.position, &ViewBasis::new(view)).ok()
}

fn project_with(offset: Vec3, basis: &ViewBasis) -> Result<Projection, Cull> {
    let Vec3 {
        x: dx,
        y: dy,
        z: dz,
    } = offset;
    let distance_sq = dx * dx + dy * dy + dz * dz;
    if distance_sq > basis.max_distance_sq {
        return Err(Cull::Distance);
    }

    // Yaw rotation about the vertical axis.
    let rx = dx * basis.cos_yaw - dz * basis.sin_yaw;
    let rz = dx * basis.sin_yaw + dz * basis.cos_yaw;
    if rz < NEAR_PLANE {
        return Err(Cull::Behind);
    }

    // Pitch only tilts the vertical coordinate; depth stays `rz`.
    let ry = dy * basis.cos_pitch - rz * basis.sin_pitch;

    let scale = basis.half_h / rz;
    Ok(Projection {
        screen_x: basis.half_w + rx * scale,
        screen_y: basis.half_h - ry * scale,
        size: BLOCK_SIZE * scale,
        distance_sq,
    })
}

/// Painter's-algorithm renderer.
///
/// Projects every block and mob, sorts far to near, and emits flat rectangles.
/// The sky is cleared first and the crosshair drawn last.
#[derive(Debug, Clone, Default)]
pub struct ProjectionRenderer;

impl ProjectionRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Project and depth-sort every entity in view.
    fn collect(&self, world: &World, mobs: &MobRegistry, view: &RenderView) -> (Vec<ProjectedEntity>, FrameStats) {
        let basis = ViewBasis::new(view);
        let camera = view.camera.position;
        let mut stats = FrameStats::default();
        let mut entities = Vec::new();

        let blocks = world
            .blocks()
            .map(|b| (b.pos.as_vec3(), EntityTag::Block { block: b.kind }));
        let mobs = mobs.mobs().iter().map(|m| {
            (
                m.position,
                EntityTag::Mob {
                    id: m.id,
                    mob: m.kind,
                    health: m.health,
                },
            )
        });

        for (pos, tag) in blocks.chain(mobs) {
            stats.considered += 1;
            match project_with(pos - camera, &basis) {
                Ok(p) => {
                    match tag {
                        EntityTag::Block { .. } => stats.drawn_blocks += 1,
                        EntityTag::Mob { .. } => stats.drawn_mobs += 1,
                    }
                    entities.push(ProjectedEntity {
                        tag,
                        screen_x: p.screen_x,
                        screen_y: p.screen_y,
                        size: p.size,
                        distance_sq: p.distance_sq,
                    });
                }
                Err(Cull::Distance) => stats.culled_by_distance += 1,
                Err(Cull::Behind) => stats.culled_behind += 1,
            }
        }

        // Stable, so equidistant entities keep collection order.
        entities.sort_by(|a, b| b.distance_sq.total_cmp(&a.distance_sq));
        (entities, stats)
    }
}

impl Renderer for ProjectionRenderer {
    type Output = DrawList;

    fn render(&self, world: &World, mobs: &MobRegistry, view: &RenderView) -> DrawList {
        let _span = tracing::trace_span!("render_frame").entered();
        let (entities, stats) = self.collect(world, mobs, view);

        let (w, h) = (view.viewport.width as f32, view.viewport.height as f32);
        let mut primitives = Vec::with_capacity(entities.len() * 2 + 3);
        primitives.push(DrawPrimitive::FillRect {
            rect: Rect::new(0.0, 0.0, w, h),
            color: SKY,
        });
        for e in &entities {
            draw_entity(&mut primitives, e);
        }
        draw_crosshair(&mut primitives, w / 2.0, h / 2.0);

        tracing::trace!(
            drawn = stats.drawn(),
            culled_distance = stats.culled_by_distance,
            culled_behind = stats.culled_behind,
            "frame rendered"
        );
        DrawList {
            entities,
            primitives,
            stats,
        }
    }
}

fn draw_entity(out: &mut Vec<DrawPrimitive>, e: &ProjectedEntity) {
    let (x, y, size) = (e.screen_x, e.screen_y, e.size);
    match e.tag {
        EntityTag::Block { block } => {
            let rect = Rect::new(x - size / 2.0, y - size / 2.0, size, size);
            out.push(DrawPrimitive::FillRect {
                rect,
                color: block_color(block),
            });
            out.push(DrawPrimitive::StrokeRect {
                rect,
                color: BLOCK_BORDER,
                line_width: 1.0,
            });
        }
        EntityTag::Mob { mob, health, .. } => {
            let left = x - size / 2.0;
            let body_w = size * 0.6;
            out.push(DrawPrimitive::FillRect {
                rect: Rect::new(left, y - size, body_w, size * 1.5),
                color: mob_color(mob),
            });
            let fraction = health.max(0) as f32 / MOB_MAX_HEALTH as f32;
            out.push(DrawPrimitive::FillRect {
                rect: Rect::new(left, y - size * 1.8, body_w * fraction, HEALTH_BAR_HEIGHT),
                color: HEALTH_BAR,
            });
        }
    }
}

fn draw_crosshair(out: &mut Vec<DrawPrimitive>, cx: f32, cy: f32) {
    out.push(DrawPrimitive::Line {
        from: [cx - CROSSHAIR_HALF, cy],
        to: [cx + CROSSHAIR_HALF, cy],
        color: CROSSHAIR,
        line_width: CROSSHAIR_WIDTH,
    });
    out.push(DrawPrimitive::Line {
        from: [cx, cy - CROSSHAIR_HALF],
        to: [cx, cy + CROSSHAIR_HALF],
        color: CROSSHAIR,
        line_width: CROSSHAIR_WIDTH,
    });
}
