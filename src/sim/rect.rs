//! Axis-aligned rectangle geometry
//!
//! Everything that moves or blocks movement is a `Rect`: position is the
//! top-left corner, y grows downward. Width and height are fixed for the
//! lifetime of an entity; movement only ever changes the position.

use glam::Vec2;

/// An axis-aligned rectangle in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    /// Fixed extent (width, height)
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Square rect centered on `center`
    pub fn centered(center: Vec2, side: f32) -> Self {
        Self {
            pos: center - Vec2::splat(side / 2.0),
            size: Vec2::splat(side),
        }
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

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Move so the right edge sits at `x`
    #[inline]
    pub fn set_right(&mut self, x: f32) {
        self.pos.x = x - self.size.x;
    }

    /// Move so the left edge sits at `x`
    #[inline]
    pub fn set_left(&mut self, x: f32) {
        self.pos.x = x;
    }

    /// Move so the bottom edge sits at `y`
    #[inline]
    pub fn set_bottom(&mut self, y: f32) {
        self.pos.y = y - self.size.y;
    }

    /// Move so the top edge sits at `y`
    #[inline]
    pub fn set_top(&mut self, y: f32) {
        self.pos.y = y;
    }

    /// Strict overlap test: touching edges do not count as overlap,
    /// so a grounded entity resting flush on a block is not colliding.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Whether the rect lies fully inside the field `[0, w) x [0, h)`
    pub fn in_bounds(&self, width: f32, height: f32) -> bool {
        self.left() >= 0.0 && self.right() <= width && self.top() >= 0.0 && self.bottom() <= height
    }
}
