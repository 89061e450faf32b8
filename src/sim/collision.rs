//! Axis-aligned hitboxes
//!
//! Sprites are drawn larger than they collide. Every collidable is tested
//! with a box shrunk per side, so grazing a corner is forgiven. Obstacles and
//! pickups keep their full bottom edge.

use glam::Vec2;

/// Distances to shrink a box by, one per side
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Insets {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Insets {
    /// Same inset left/right (`x`) and top/bottom (`y`)
    pub const fn symmetric(x: f32, y: f32) -> Self {
        Self {
            left: x,
            top: y,
            right: x,
            bottom: y,
        }
    }
}

pub const RUNNER_HITBOX_INSETS: Insets = Insets::symmetric(12.0, 8.0);
pub const OBSTACLE_HITBOX_INSETS: Insets = Insets {
    left: 8.0,
    top: 8.0,
    right: 8.0,
    bottom: 4.0,
};
pub const COLLECTIBLE_HITBOX_INSETS: Insets = Insets {
    left: 4.0,
    top: 4.0,
    right: 4.0,
    bottom: 0.0,
};

/// Screen-space rectangle, `pos` is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Shrink each side by its inset. Never produces a negative size.
    pub fn inset_sides(&self, insets: Insets) -> Self {
        let shrink = Vec2::new(insets.left + insets.right, insets.top + insets.bottom);
        Self {
            pos: self.pos + Vec2::new(insets.left, insets.top),
            size: (self.size - shrink).max(Vec2::ZERO),
        }
    }

    /// Strict overlap: rectangles sharing only an edge do not overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

/// Runner sprite box → collision box
pub fn runner_hitbox(sprite: Rect) -> Rect {
    sprite.inset_sides(RUNNER_HITBOX_INSETS)
}

/// Obstacle sprite box → collision box
pub fn obstacle_hitbox(sprite: Rect) -> Rect {
    sprite.inset_sides(OBSTACLE_HITBOX_INSETS)
}

pub fn collectible_hitbox(sprite: Rect) -> Rect {
    sprite.inset_sides(COLLECTIBLE_HITBOX_INSETS)
}
