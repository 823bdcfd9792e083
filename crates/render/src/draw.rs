use blockview_common::{BlockKind, MobKind};
use serde::{Deserialize, Serialize};

/// Straight (non-premultiplied) colour with 8-bit channels and float alpha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    /// Opaque colour from `0xRRGGBB`.
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
            a: 1.0,
        }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

impl std::fmt::Display for Rgba {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.a >= 1.0 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "rgba({},{},{},{})", self.r, self.g, self.b, self.a)
        }
    }
}

/// Axis-aligned screen rectangle; `(x, y)` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }
}

/// One 2D drawing command.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawPrimitive {
    FillRect {
        rect: Rect,
        color: Rgba,
    },
    StrokeRect {
        rect: Rect,
        color: Rgba,
        line_width: f32,
    },
    Line {
        from: [f32; 2],
        to: [f32; 2],
        color: Rgba,
        line_width: f32,
    },
}

/// What a projected entity was.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntityTag {
    Block { block: BlockKind },
    Mob { id: u32, mob: MobKind, health: i32 },
}

/// An entity that survived culling, in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectedEntity {
    pub tag: EntityTag,
    pub screen_x: f32,
    pub screen_y: f32,
    pub size: f32,
    /// Squared distance to the camera; the painter's sort key.
    pub distance_sq: f32,
}

/// Per-frame counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameStats {
    pub considered: usize,
    pub culled_by_distance: usize,
    pub culled_behind: usize,
    pub drawn_blocks: usize,
    pub drawn_mobs: usize,
}

impl FrameStats {
    pub fn drawn(&self) -> usize {
        self.drawn_blocks + self.drawn_mobs
    }
}

/// Output of one projection frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawList {
    /// Entities in draw order, farthest first.
    pub entities: Vec<ProjectedEntity>,
    /// Primitives in draw order.
    pub primitives: Vec<DrawPrimitive>,
    pub stats: FrameStats,
}

impl DrawList {
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_unpacks_channels() {
        let c = Rgba::hex(0x22C55E);
        assert_eq!((c.r, c.g, c.b), (0x22, 0xC5, 0x5E));
        assert_eq!(c.a, 1.0);
        assert_eq!(c.to_string(), "#22C55E");
    }

    #[test]
    fn translucent_display() {
        let c = Rgba::hex(0x000000).with_alpha(0.3);
        assert_eq!(c.to_string(), "rgba(0,0,0,0.3)");
    }

    #[test]
    fn primitives_serialize_with_op_tag() {
        let p = DrawPrimitive::FillRect {
            rect: Rect::new(0.0, 0.0, 1.0, 1.0),
            color: Rgba::hex(0xFF0000),
        };
        let json = serde_json::to_string(&p).unwrap();
        assert!(json.contains(r#""op":"fill_rect""#));
    }
}
