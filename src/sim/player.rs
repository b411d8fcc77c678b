//! The player: a ground runner that later becomes a zero-g astronaut

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::input::Input;
use super::particles::ParticleSystem;
use super::world::World;
use crate::colors;
use crate::consts::*;

/// Animation frame advances every this many ticks
const ANIM_FRAME_TICKS: u32 = 8;
const STEP_PARTICLE_TICKS: u32 = 8;
const STEP_SPEED_THRESHOLD: f32 = 1.0;
const THRUST_PARTICLE_TICKS: u32 = 3;
const JUMP_DUST_COUNT: u32 = 8;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    /// +1 facing right, -1 facing left
    pub facing: f32,
    is_astronaut: bool,
    /// Cosmetic walk cycle (0-3)
    pub anim_frame: u32,
    anim_timer: u32,
    step_timer: u32,
    thrust_timer: u32,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            body: Body::new(pos, Vec2::new(PLAYER_W, PLAYER_H)),
            facing: 1.0,
            is_astronaut: false,
            anim_frame: 0,
            anim_timer: 0,
            step_timer: 0,
            thrust_timer: 0,
        }
    }

    pub fn spawn() -> Self {
        Self::new(Vec2::new(PLAYER_START_X, PLAYER_START_Y))
    }

    pub fn is_astronaut(&self) -> bool {
        self.is_astronaut
    }

    /// Switch on zero-g locomotion. One-way for the rest of the session.
    pub fn become_astronaut(&mut self) {
        if self.is_astronaut {
            return;
        }
        self.is_astronaut = true;
        self.body.vel.y = ASTRONAUT_LAUNCH_VY;
        log::info!("Player is now an astronaut at x={:.0}", self.body.pos.x);
    }

    pub fn center(&self) -> Vec2 {
        self.body.center()
    }

    pub fn update(&mut self, input: &Input, world: &World, particles: &mut ParticleSystem) {
        if self.is_astronaut {
            self.update_astronaut(input, world, particles);
        } else {
            self.update_ground(input, world, particles);
        }

        self.anim_timer += 1;
        if self.anim_timer > ANIM_FRAME_TICKS {
            self.anim_timer = 0;
            self.anim_frame = (self.anim_frame + 1) % 4;
        }
    }

    fn update_ground(&mut self, input: &Input, world: &World, particles: &mut ParticleSystem) {
        let body = &mut self.body;

        // Instant response: snap to full speed, coast down on release
        if input.left() {
            body.vel.x = -PLAYER_SPEED;
            self.facing = -1.0;
        } else if input.right() {
            body.vel.x = PLAYER_SPEED;
            self.facing = 1.0;
        } else {
            body.vel.x *= PLAYER_RELEASE_DAMPING;
        }

        if input.jump() && body.on_ground {
            body.vel.y = PLAYER_JUMP_FORCE;
            body.on_ground = false;
            let feet = Vec2::new(body.center().x, body.bottom());
            for _ in 0..JUMP_DUST_COUNT {
                let vel = Vec2::new(particles.jitter(3.0), -particles.random() * 3.0);
                let size = particles.random() * 3.0 + 1.0;
                particles.spawn(feet, vel, colors::HEART_PINK, size, 20);
            }
        }

        body.fall_and_integrate();
        body.clamp_x(0.0, WORLD_W - body.size.x);

        body.on_ground = false;
        world.resolve_collisions(body);

        if body.on_ground && body.vel.x.abs() > STEP_SPEED_THRESHOLD {
            self.step_timer += 1;
            if self.step_timer > STEP_PARTICLE_TICKS {
                self.step_timer = 0;
                let feet = Vec2::new(body.center().x, body.bottom());
                let vel = Vec2::new(particles.jitter(1.5), -particles.random());
                let size = particles.random() * 2.0 + 1.0;
                particles.spawn(feet, vel, colors::STEP, size, 15);
            }
        }
    }

    fn update_astronaut(&mut self, input: &Input, world: &World, particles: &mut ParticleSystem) {
        let body = &mut self.body;

        if input.left() {
            body.vel.x -= SPACE_ACCEL;
            self.facing = -1.0;
        } else if input.right() {
            body.vel.x += SPACE_ACCEL;
            self.facing = 1.0;
        } else {
            body.vel.x *= SPACE_DAMPING;
        }

        if input.jump() {
            body.vel.y -= SPACE_THRUST;
        } else {
            body.vel.y += SPACE_GRAVITY;
        }

        body.vel.x = body.vel.x.clamp(-SPACE_FLOAT_SPEED, SPACE_FLOAT_SPEED);
        body.vel.y = body.vel.y.clamp(SPACE_MAX_RISE, SPACE_MAX_FALL);

        body.pos += body.vel;
        body.clamp_x(0.0, WORLD_W - body.size.x);

        // Hard floor, no platform landings while suited up
        let ground = world.ground_y();
        body.on_ground = false;
        if body.bottom() > ground {
            body.pos.y = ground - body.size.y;
            body.vel.y = 0.0;
            body.on_ground = true;
        }

        self.thrust_timer += 1;
        if self.thrust_timer > THRUST_PARTICLE_TICKS {
            self.thrust_timer = 0;
            let nozzle = Vec2::new(body.center().x, body.bottom());
            let vel = Vec2::new(particles.jitter(2.0), particles.random() * 2.0 + 1.0);
            let color = particles.either(colors::THRUST_BLUE, colors::THRUST_PALE);
            let size = particles.random() * 3.0 + 1.0;
            particles.spawn(nozzle, vel, color, size, 25);
        }
    }
}
