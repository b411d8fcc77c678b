//! Shared physical body for everything that collides with the world
//!
//! Player, Heart and Dog each own exactly one `Body`. The world collision
//! resolver only ever sees this struct, never the entity wrapping it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::GRAVITY;

/// Axis-aligned moving box (top-left anchored, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub on_ground: bool,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        debug_assert!(size.x > 0.0 && size.y > 0.0, "body size must be positive");
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
            on_ground: false,
        }
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    /// Gravity, then explicit Euler integration
    pub fn fall_and_integrate(&mut self) {
        self.vel.y += GRAVITY;
        self.pos += self.vel;
    }

    #[inline]
    pub fn clamp_x(&mut self, min: f32, max: f32) {
        self.pos.x = self.pos.x.clamp(min, max);
    }
}
