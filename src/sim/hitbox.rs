//! Axis-aligned hitboxes
//!
//! Presets are written in source-frame units (the 32x32 sprite frame) and are
//! scaled into world space when a body is placed, the same way the art is.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{SPRITE_FRAME, SPRITE_SCALE};

/// Body rectangle relative to the top-left corner of a sprite frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hitbox {
    pub width: f32,
    pub height: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl Hitbox {
    pub const fn new(width: f32, height: f32, offset_x: f32, offset_y: f32) -> Self {
        Self {
            width,
            height,
            offset_x,
            offset_y,
        }
    }

    /// World-space bounds for a sprite whose frame top-left sits at `frame_origin`
    pub fn bounds_at(&self, frame_origin: Vec2) -> Aabb {
        let min = frame_origin + Vec2::new(self.offset_x, self.offset_y) * SPRITE_SCALE;
        let size = Vec2::new(self.width, self.height) * SPRITE_SCALE;
        Aabb {
            min,
            max: min + size,
        }
    }
}

/// Where a sprite's position sits within its frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Anchor {
    /// Position is the bottom-centre of the frame (things standing on the ground)
    BottomCenter,
    /// Position is the centre of the frame (things in the air)
    Center,
}

impl Anchor {
    /// Top-left corner of the scaled frame for a sprite at `pos`
    pub fn frame_origin(self, pos: Vec2) -> Vec2 {
        let size = SPRITE_FRAME * SPRITE_SCALE;
        match self {
            Anchor::BottomCenter => Vec2::new(pos.x - size / 2.0, pos.y - size),
            Anchor::Center => pos - Vec2::splat(size / 2.0),
        }
    }
}

/// World-space axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Strict overlap; boxes that only share an edge do not touch
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_scale_with_sprite() {
        let hitbox = Hitbox::new(20.0, 28.0, 6.0, 4.0);
        let origin = Anchor::BottomCenter.frame_origin(Vec2::new(120.0, 384.0));
        let bounds = hitbox.bounds_at(origin);

        assert_eq!(bounds.width(), 40.0);
        assert_eq!(bounds.height(), 56.0);
        // Standing body rests exactly on the anchor line
        assert_eq!(bounds.max.y, 384.0);
        assert_eq!(bounds.min.x, 120.0 - 32.0 + 12.0);
    }

    #[test]
    fn test_center_anchor() {
        let origin = Anchor::Center.frame_origin(Vec2::new(100.0, 100.0));
        assert_eq!(origin, Vec2::new(68.0, 68.0));
    }

    #[test]
    fn test_edge_contact_is_not_overlap() {
        let a = Aabb {
            min: Vec2::new(0.0, 0.0),
            max: Vec2::new(10.0, 10.0),
        };
        let b = Aabb {
            min: Vec2::new(10.0, 0.0),
            max: Vec2::new(20.0, 10.0),
        };
        let c = Aabb {
            min: Vec2::new(9.0, 9.0),
            max: Vec2::new(20.0, 20.0),
        };
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&a));
    }
}
