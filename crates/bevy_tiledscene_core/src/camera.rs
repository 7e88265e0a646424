//! Scrolling camera that follows a focus point and stops at the map edges.
//!
//! The camera does not clamp its offset. It keeps the raw offset (focus center minus half
//! the viewport) and remaps each drawn position per axis:
//!
//! | raw offset on an axis       | screen coordinate         |
//! |-----------------------------|---------------------------|
//! | `<= 0`                      | `base`                    |
//! | `>= map - viewport`         | `base - (map - viewport)` |
//! | otherwise                   | `base - offset`           |
//!
//! The near edge takes precedence: on an axis where the map is shorter than the viewport
//! both conditions can hold, and the map then stays pinned at the origin.
//!
//! Every drawn thing goes through [`ScrollCamera::screen_position`], so background, tiles,
//! animations, upper tiles and points of interest always agree.

use bevy::prelude::*;

/// Raw scroll offset for `focus_center`: the offset that would put the focus at the
/// middle of the viewport. Pure; the result is never clamped.
pub fn compute_offset(focus_center: Vec2, viewport_half_size: Vec2) -> Vec2 {
    focus_center - viewport_half_size
}

/// Map one axis of a world coordinate to the screen.
///
/// `offset` is the raw offset and only selects the branch.
pub fn clamp_axis(base: f32, offset: f32, map_len: f32, viewport_len: f32) -> f32 {
    let far_edge = map_len - viewport_len;
    if offset <= 0.0 {
        base
    } else if offset >= far_edge {
        base - far_edge
    } else {
        base - offset
    }
}

/// Camera state for one level: the raw offset of the current frame plus the sizes it
/// clamps against.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollCamera {
    offset: Vec2,
    map_size: Vec2,
    viewport: Vec2,
}

impl ScrollCamera {
    pub fn new(map_size: Vec2, viewport: Vec2) -> Self {
        Self {
            offset: Vec2::ZERO,
            map_size,
            viewport,
        }
    }

    /// Half the viewport, rounded down to whole pixels.
    pub fn viewport_half_size(&self) -> Vec2 {
        (self.viewport / 2.0).floor()
    }

    /// Recompute the offset for this frame from the focus entity's center.
    pub fn focus(&mut self, focus_center: Vec2) {
        self.offset = compute_offset(focus_center, self.viewport_half_size());
    }

    /// The raw (unclamped) offset of the current frame.
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn map_size(&self) -> Vec2 {
        self.map_size
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Screen position of the world position `base`, clamped per axis.
    pub fn screen_position(&self, base: Vec2) -> Vec2 {
        Vec2::new(
            clamp_axis(base.x, self.offset.x, self.map_size.x, self.viewport.x),
            clamp_axis(base.y, self.offset.y, self.map_size.y, self.viewport.y),
        )
    }
}
