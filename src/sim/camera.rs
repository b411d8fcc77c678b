//! Smoothed follow camera

use serde::{Deserialize, Serialize};

use crate::consts::*;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub x: f32,
    pub y: f32,
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ease toward the player. `target_y` is only given while the player is
    /// flying above the ground band; without it the camera settles back to
    /// y = 0 and stays inside the level horizontally.
    pub fn follow(&mut self, target_x: f32, target_y: Option<f32>) {
        let desired_x = target_x - CANVAS_W * CAMERA_LEAD;
        self.x += (desired_x - self.x) * CAMERA_LERP;
        if target_y.is_none() {
            self.x = self.x.clamp(0.0, WORLD_W - CANVAS_W);
        }

        match target_y {
            Some(ty) if ty < 0.0 => {
                let desired_y = ty - CANVAS_H * CAMERA_VERTICAL_ANCHOR;
                self.y += (desired_y - self.y) * CAMERA_LERP;
                self.y = self.y.min(0.0);
            }
            _ => {
                self.y += (0.0 - self.y) * CAMERA_LERP;
                if self.y.abs() < 0.5 {
                    self.y = 0.0;
                }
            }
        }
    }
}
