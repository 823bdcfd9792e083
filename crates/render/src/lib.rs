//! Rendering Adapter: projects world state onto a 2D drawing surface.
//!
//! # Invariants
//! - Renderer cannot mutate world truth directly.
//! - Render state derives from world state and view, read fresh every frame.
//! - Output is an ordered list of 2D primitives; there is no depth buffer.

mod draw;
mod palette;
mod projection;
mod renderer;

pub use draw::{DrawList, DrawPrimitive, EntityTag, FrameStats, ProjectedEntity, Rect, Rgba};
pub use palette::{block_color, mob_color};
pub use projection::{BLOCK_SIZE, NEAR_PLANE, Projection, ProjectionRenderer, project};
pub use renderer::{DebugTextRenderer, RenderView, Renderer};
