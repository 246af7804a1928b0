//! Axis-separated collision resolution against static blocks
//!
//! Movement is resolved one axis at a time: advance x, snap out of every
//! overlapping block, then advance y and do the same. Resolving both axes in
//! one step catches on corners; resolving them separately does not.
//!
//! Blocks are visited in stable insertion order. Every overlap is processed
//! (not just the first), and when adjustments conflict the last processed
//! overlap wins. Blocks are created once at layout time and never removed,
//! so this order is reproducible.

use super::rect::Rect;

/// Which sides were snapped during a horizontal pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HorizontalHit {
    /// Hit a block while moving left (snapped to the block's right edge)
    pub left: bool,
    /// Hit a block while moving right (snapped to the block's left edge)
    pub right: bool,
}

impl HorizontalHit {
    #[inline]
    pub fn any(&self) -> bool {
        self.left || self.right
    }
}

/// Which sides were snapped during a vertical pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerticalHit {
    /// Landed on top of a block while moving down (grounded semantics)
    pub landed: bool,
    /// Bumped a block's underside while moving up
    pub ceiling: bool,
}

impl VerticalHit {
    #[inline]
    pub fn any(&self) -> bool {
        self.landed || self.ceiling
    }
}

/// Advance `rect` horizontally by `dx` and snap out of every overlapping
/// block. The leading edge (right edge when moving right, left edge when
/// moving left) is placed flush against the block's opposing edge. A zero
/// `dx` moves nothing and reports no hits.
pub fn step_horizontal<'a, I>(rect: &mut Rect, dx: f32, blocks: I) -> HorizontalHit
where
    I: IntoIterator<Item = &'a Rect>,
{
    rect.pos.x += dx;

    let mut hit = HorizontalHit::default();
    for block in blocks {
        if !rect.overlaps(block) {
            continue;
        }
        if dx > 0.0 {
            rect.set_right(block.left());
            hit.right = true;
        } else if dx < 0.0 {
            rect.set_left(block.right());
            hit.left = true;
        }
    }
    hit
}

/// Advance `rect` vertically by `dy` and snap out of every overlapping
/// block. Landing (downward motion resolved against a block top) is what
/// grants grounded / ready-to-jump state to the caller.
pub fn step_vertical<'a, I>(rect: &mut Rect, dy: f32, blocks: I) -> VerticalHit
where
    I: IntoIterator<Item = &'a Rect>,
{
    rect.pos.y += dy;

    let mut hit = VerticalHit::default();
    for block in blocks {
        if !rect.overlaps(block) {
            continue;
        }
        if dy > 0.0 {
            rect.set_bottom(block.top());
            hit.landed = true;
        } else if dy < 0.0 {
            rect.set_top(block.bottom());
            hit.ceiling = true;
        }
    }
    hit
}
