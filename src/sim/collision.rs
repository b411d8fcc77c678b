//! Vertical landing tests against the ground line and one-way platforms
//!
//! There is no horizontal blocking anywhere in the world: bodies pass
//! through platforms sideways and from below, and only ever land on top.
//! Each test is a single pass with no iterative resolution.

use serde::{Deserialize, Serialize};

use super::body::Body;
use crate::consts::{PLATFORM_LAND_SLOP, PLATFORM_PREV_TOLERANCE};

/// Axis-aligned rectangle (top-left anchored)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        debug_assert!(w > 0.0 && h > 0.0, "rect dimensions must be positive");
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    /// Strict overlap of horizontal extents (touching edges do not count)
    #[inline]
    pub fn overlaps_x(&self, body: &Body) -> bool {
        body.right() > self.x && body.pos.x < self.right()
    }
}

/// Snap a body onto the ground line if its bottom reached it
pub fn land_on_ground(body: &mut Body, ground_y: f32) -> bool {
    if body.bottom() >= ground_y {
        body.pos.y = ground_y - body.size.y;
        body.vel.y = 0.0;
        body.on_ground = true;
        return true;
    }
    false
}

/// Whether a body should land on a platform top this frame
///
/// Requires a non-rising body, horizontal overlap, a current bottom inside
/// the platform's landing band, and a previous-frame bottom at or above
/// the top. The last test is what rejects approaches from below or the side.
pub fn lands_on_platform(body: &Body, platform: &Rect) -> bool {
    let bottom = body.bottom();
    let prev_bottom = bottom - body.vel.y;
    body.vel.y >= 0.0
        && platform.overlaps_x(body)
        && bottom >= platform.y
        && bottom <= platform.y + platform.h + PLATFORM_LAND_SLOP
        && prev_bottom <= platform.y + PLATFORM_PREV_TOLERANCE
}

/// Snap a body onto a platform top
pub fn settle_on_platform(body: &mut Body, platform: &Rect) {
    body.pos.y = platform.y - body.size.y;
    body.vel.y = 0.0;
    body.on_ground = true;
}
