//! The dog: chases the player and ends the run with a bite

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::particles::ParticleSystem;
use super::world::World;
use crate::colors;
use crate::consts::*;

const ANIM_FRAME_TICKS: u32 = 6;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dog {
    pub body: Body,
    alive: bool,
    bark_timer: u32,
    /// Frames left on the bark bubble
    bark_visible: u32,
    pub anim_frame: u32,
    anim_timer: u32,
}

impl Dog {
    pub fn new(pos: Vec2) -> Self {
        Self {
            body: Body::new(pos, Vec2::new(DOG_W, DOG_H))
                .with_velocity(Vec2::new(DOG_SPEED, 0.0)),
            alive: true,
            bark_timer: 0,
            bark_visible: 0,
            anim_frame: 0,
            anim_timer: 0,
        }
    }

    pub fn spawn() -> Self {
        Self::new(Vec2::new(PLAYER_START_X + DOG_START_OFFSET, DOG_START_Y))
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Take the dog out of the chase for good
    pub fn retire(&mut self) {
        if self.alive {
            log::debug!("Dog retired at x={:.0}", self.body.pos.x);
        }
        self.alive = false;
    }

    pub fn is_barking(&self) -> bool {
        self.bark_visible > 0
    }

    pub fn center(&self) -> Vec2 {
        self.body.center()
    }

    /// Ease off near the goal. `factor` is applied to the current speed.
    pub fn slow_down(&mut self, factor: f32) {
        self.body.vel.x *= factor;
    }

    pub fn update(&mut self, player_pos: Vec2, world: &World, particles: &mut ParticleSystem) {
        if !self.alive {
            return;
        }

        self.bark_visible = self.bark_visible.saturating_sub(1);

        let body = &mut self.body;
        let ahead = player_pos.x - body.pos.x;
        let target_vx = if ahead > 0.0 {
            DOG_SPEED
        } else {
            DOG_SPEED * 0.5
        };
        body.vel.x += (target_vx - body.vel.x) * DOG_EASE;

        if ahead > 0.0 && ahead < DOG_SPRINT_RADIUS {
            body.vel.x = (body.vel.x + DOG_SPRINT_ACCEL).min(DOG_SPRINT_MAX);
            self.bark_timer += 1;
            if self.bark_timer > DOG_BARK_INTERVAL {
                self.bark_timer = 0;
                self.bark_visible = DOG_BARK_DURATION;
            }
        }

        body.fall_and_integrate();
        body.clamp_x(0.0, WORLD_W - body.size.x);

        body.on_ground = false;
        world.resolve_collisions(body);

        if body.on_ground && self.anim_frame % 2 == 0 {
            let paw = Vec2::new(body.pos.x + 4.0, body.bottom());
            let vel = Vec2::new(particles.jitter(1.5), -particles.random() * 0.8);
            let size = particles.random() * 2.0 + 1.0;
            particles.spawn(paw, vel, colors::DOG_DUST, size, 12);
        }

        self.anim_timer += 1;
        if self.anim_timer > ANIM_FRAME_TICKS {
            self.anim_timer = 0;
            self.anim_frame = (self.anim_frame + 1) % 4;
        }
    }

    /// Center-to-center proximity test on each axis independently
    pub fn is_biting(&self, player_center: Vec2) -> bool {
        if !self.alive {
            return false;
        }
        let delta = (self.center() - player_center).abs();
        delta.x < DOG_BITE_RADIUS_X && delta.y < DOG_BITE_RADIUS_Y
    }
}
