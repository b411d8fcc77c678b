//! The runaway heart and its behavior state machine
//!
//! Phases only ever move forward:
//!
//! ```text
//! Flee ──(near end, player within liftoff radius)──▶ Floating
//! Floating ──(within orbit capture distance of the Moon)──▶ Orbiting
//! Orbiting ──(caught by the astronaut)──▶ Caught
//! ```
//!
//! "Waiting" is not a separate phase: it is how a fleeing heart behaves
//! once it reaches the last stretch of the world.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::particles::ParticleSystem;
use super::world::World;
use crate::colors;
use crate::consts::*;

/// Heart behavior phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HeartPhase {
    /// Running from the player (waits once near the end)
    Flee,
    /// Rising toward the Moon
    Floating,
    /// Circling the Moon
    Orbiting,
    /// Caught by the player; frozen and hidden
    Caught,
}

/// Frames between ascent particles while floating
const FLOAT_PARTICLE_EVERY: u32 = 3;
/// Frames between ambient particles while orbiting
const ORBIT_PARTICLE_EVERY: u64 = 4;
const TRAIL_INTERVAL_SCARED: u32 = 2;
const TRAIL_INTERVAL_CALM: u32 = 6;
const WIGGLE_RATE: f32 = 0.15;
const WIGGLE_AMPLITUDE: f32 = 8.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Heart {
    pub body: Body,
    phase: HeartPhase,
    pub scared: bool,
    /// Fear intensity in [0, 1]
    pub scared_level: f32,
    /// Cosmetic horizontal sway while waiting
    pub wiggle: f32,
    orbit_angle: f32,
    trail_timer: u32,
    jump_cooldown: u32,
    float_timer: u32,
}

impl Heart {
    pub fn new(pos: Vec2) -> Self {
        Self {
            body: Body::new(pos, Vec2::new(HEART_W, HEART_H))
                .with_velocity(Vec2::new(HEART_START_VX, 0.0)),
            phase: HeartPhase::Flee,
            scared: false,
            scared_level: 0.0,
            wiggle: 0.0,
            orbit_angle: 0.0,
            trail_timer: 0,
            jump_cooldown: 0,
            float_timer: 0,
        }
    }

    pub fn spawn() -> Self {
        Self::new(Vec2::new(HEART_START_X, HEART_START_Y))
    }

    pub fn phase(&self) -> HeartPhase {
        self.phase
    }

    pub fn center(&self) -> Vec2 {
        self.body.center()
    }

    pub fn orbit_angle(&self) -> f32 {
        self.orbit_angle
    }

    /// Move forward to `next`. Backward or repeated transitions are ignored.
    fn advance(&mut self, next: HeartPhase) {
        if next > self.phase {
            log::info!(
                "Heart phase {:?} -> {:?} at ({:.0}, {:.0})",
                self.phase,
                next,
                self.body.pos.x,
                self.body.pos.y
            );
            self.phase = next;
        }
    }

    /// Mark the heart as caught (win)
    pub fn catch(&mut self) {
        self.advance(HeartPhase::Caught);
    }

    /// In the waiting stretch at the end of the world
    pub fn is_near_end(&self) -> bool {
        self.body.pos.x > WORLD_W - HEART_NEAR_END_ZONE
    }

    /// In the wider "almost there" stretch (HUD only)
    pub fn is_near_float_trigger(&self) -> bool {
        self.body.pos.x > WORLD_W - HEART_FLOAT_TRIGGER
    }

    pub fn is_floating_or_orbiting(&self) -> bool {
        matches!(self.phase, HeartPhase::Floating | HeartPhase::Orbiting)
    }

    pub fn is_visible(&self) -> bool {
        self.phase != HeartPhase::Caught
    }

    /// Advance one frame. `t` is the session frame counter.
    pub fn update(&mut self, player_pos: Vec2, world: &World, particles: &mut ParticleSystem, t: u64) {
        match self.phase {
            HeartPhase::Caught => {}
            HeartPhase::Orbiting => self.orbit(particles, t),
            HeartPhase::Floating => self.float(particles),
            HeartPhase::Flee => self.flee(player_pos, world, particles, t),
        }
    }

    fn update_fear(&mut self, dist: f32) {
        self.scared = dist < HEART_FLEE_RADIUS;
        self.scared_level = ((HEART_FLEE_RADIUS - dist) / HEART_FLEE_RADIUS).clamp(0.0, 1.0);
    }

    fn flee(&mut self, player_pos: Vec2, world: &World, particles: &mut ParticleSystem, t: u64) {
        let dist = player_pos.distance(self.body.pos);
        self.update_fear(dist);

        if self.is_near_end() {
            self.wait(t);

            if dist < HEART_LIFTOFF_RADIUS {
                self.advance(HeartPhase::Floating);
                self.body.vel = Vec2::new(0.0, HEART_LIFTOFF_VY);
                return;
            }

            self.integrate();
            self.body.on_ground = false;
            world.resolve_collisions(&mut self.body);
            self.emit_trail(particles);
            return;
        }

        self.run_away(player_pos, dist);
        self.jump_cooldown = self.jump_cooldown.saturating_sub(1);

        self.integrate();
        self.body.on_ground = false;
        world.resolve_collisions_with(&mut self.body, |body| {
            // Don't let the player catch up by waiting under a platform
            if dist < HEART_LANDING_KICK_RADIUS {
                body.vel.x += HEART_LANDING_KICK;
                log::debug!("Heart landing kick (player at {:.0})", dist);
            }
        });

        self.emit_trail(particles);
    }

    fn run_away(&mut self, player_pos: Vec2, dist: f32) {
        let body = &mut self.body;
        if self.scared {
            let direction = if body.pos.x > player_pos.x { 1.0 } else { -1.0 };
            body.vel.x += HEART_ACCEL * direction;

            let player_close = dist < HEART_JUMP_RADIUS;
            let player_behind = player_pos.x < body.pos.x;
            if player_close && player_behind && body.on_ground && self.jump_cooldown == 0 {
                body.vel.y = PLAYER_JUMP_FORCE * HEART_JUMP_SCALE;
                body.on_ground = false;
                self.jump_cooldown = HEART_JUMP_COOLDOWN;
            }
        } else {
            body.vel.x += HEART_DRIFT;
        }
        body.vel.x = body.vel.x.clamp(HEART_MIN_SPEED, HEART_MAX_SPEED);
    }

    fn wait(&mut self, t: u64) {
        self.body.vel.x *= HEART_WAIT_DAMPING;
        if self.body.vel.x.abs() < 0.1 {
            self.body.vel.x = 0.0;
        }
        self.wiggle = (t as f32 * WIGGLE_RATE).sin() * WIGGLE_AMPLITUDE;
    }

    fn integrate(&mut self) {
        self.body.fall_and_integrate();
        self.body.clamp_x(HEART_MIN_X, HEART_MAX_X);
    }

    fn float(&mut self, particles: &mut ParticleSystem) {
        self.float_timer += 1;
        let body = &mut self.body;
        body.vel.x += (MOON_X - body.pos.x) * HEART_FLOAT_STEER;
        body.vel.x *= HEART_FLOAT_DAMPING;
        body.vel.y = (body.vel.y - HEART_FLOAT_RISE).max(HEART_FLOAT_MAX_RISE);
        body.pos += body.vel;

        if self.float_timer % FLOAT_PARTICLE_EVERY == 0 {
            let at = Vec2::new(body.center().x, body.bottom());
            let vel = Vec2::new(particles.jitter(2.0), particles.random() * 1.5);
            let color = particles.either(colors::HEART_RED, colors::HEART_PINK);
            let size = particles.random() * 3.0 + 1.0;
            particles.spawn(at, vel, color, size, 40);
        }

        let offset = body.pos - moon_center();
        if offset.length() < HEART_ORBIT_RADIUS + HEART_ORBIT_CAPTURE_MARGIN {
            self.orbit_angle = offset.y.atan2(offset.x);
            self.advance(HeartPhase::Orbiting);
        }
    }

    fn orbit(&mut self, particles: &mut ParticleSystem, t: u64) {
        self.orbit_angle += HEART_ORBIT_SPEED;
        self.body.pos = moon_center() + Vec2::from_angle(self.orbit_angle) * HEART_ORBIT_RADIUS;

        if t % ORBIT_PARTICLE_EVERY == 0 {
            let vel = Vec2::new(particles.jitter(1.0), particles.jitter(1.0));
            let size = particles.random() * 2.0 + 1.0;
            particles.spawn(self.center(), vel, colors::HEART_PINK, size, 30);
        }
    }

    fn emit_trail(&mut self, particles: &mut ParticleSystem) {
        self.trail_timer += 1;
        let interval = if self.scared {
            TRAIL_INTERVAL_SCARED
        } else {
            TRAIL_INTERVAL_CALM
        };
        if self.trail_timer > interval {
            self.trail_timer = 0;
            let vel = Vec2::new(particles.jitter(1.5), -particles.random() * 2.0 - 1.0);
            let size = particles.random() * 3.0 + 2.0;
            let (color, life) = if self.scared {
                (colors::HEART_RED, 20)
            } else {
                (colors::TRAIL_CALM, 35)
            };
            particles.spawn(self.center(), vel, color, size, life);
        }
    }

    /// Place the heart directly in a later phase (scenario tests)
    #[cfg(test)]
    pub(crate) fn force_phase(&mut self, phase: HeartPhase) {
        self.advance(phase);
    }
}

/// Center of the Moon landmark
pub fn moon_center() -> Vec2 {
    Vec2::new(MOON_X, MOON_Y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collision::Rect;
    use proptest::prelude::*;

    fn setup() -> (World, ParticleSystem) {
        (World::from_platforms(Vec::new()), ParticleSystem::new(5, 500))
    }

    fn grounded_heart(x: f32) -> Heart {
        let mut heart = Heart::new(Vec2::new(x, GROUND_Y - HEART_H));
        heart.body.on_ground = true;
        heart
    }

    #[test]
    fn test_calm_when_far() {
        let (world, mut particles) = setup();
        let mut heart = grounded_heart(1000.0);
        heart.update(Vec2::new(500.0, GROUND_Y - PLAYER_H), &world, &mut particles, 0);
        assert!(!heart.scared);
        assert_eq!(heart.scared_level, 0.0);
        // Weak drift only
        assert!((heart.body.vel.x - (HEART_START_VX + HEART_DRIFT)).abs() < 1e-5);
    }

    #[test]
    fn test_scared_accelerates_away() {
        let (world, mut particles) = setup();
        let mut heart = grounded_heart(1000.0);
        heart.jump_cooldown = 10;
        heart.update(Vec2::new(850.0, GROUND_Y - HEART_H), &world, &mut particles, 0);
        assert!(heart.scared);
        assert!((heart.scared_level - 0.5).abs() < 1e-5);
        assert!((heart.body.vel.x - (HEART_START_VX + HEART_ACCEL)).abs() < 1e-5);
    }

    #[test]
    fn test_flee_speed_clamped() {
        let (world, mut particles) = setup();
        let mut heart = grounded_heart(1000.0);
        heart.body.vel.x = HEART_MAX_SPEED;
        heart.jump_cooldown = 100;
        heart.update(Vec2::new(900.0, GROUND_Y - HEART_H), &world, &mut particles, 0);
        assert_eq!(heart.body.vel.x, HEART_MAX_SPEED);
    }

    #[test]
    fn test_evasive_jump_and_cooldown() {
        let (world, mut particles) = setup();
        let mut heart = grounded_heart(1000.0);
        let player = Vec2::new(900.0, GROUND_Y - HEART_H);

        heart.update(player, &world, &mut particles, 0);
        assert!(!heart.body.on_ground);
        let expected = PLAYER_JUMP_FORCE * HEART_JUMP_SCALE + GRAVITY;
        assert!((heart.body.vel.y - expected).abs() < 1e-5);
        assert_eq!(heart.jump_cooldown, HEART_JUMP_COOLDOWN - 1);
    }

    #[test]
    fn test_no_jump_when_player_ahead() {
        let (world, mut particles) = setup();
        let mut heart = grounded_heart(1000.0);
        heart.update(Vec2::new(1100.0, GROUND_Y - HEART_H), &world, &mut particles, 0);
        assert!(heart.body.on_ground);
        // Pushed away from the player, toward the start
        assert!(heart.body.vel.x < HEART_START_VX);
    }

    #[test]
    fn test_platform_landing_kick() {
        let platform = Rect::new(1000.0, 200.0, 120.0, 12.0);
        let world = World::from_platforms(vec![platform]);
        let mut particles = ParticleSystem::new(5, 500);

        // Falling onto the platform top this frame
        let falling = || {
            let mut heart = Heart::new(Vec2::new(1010.0, platform.y - 2.0 - HEART_H));
            heart.body.vel = Vec2::new(1.0, 2.0);
            heart.jump_cooldown = 100;
            heart
        };

        // Player 200 behind: within kick range
        let mut heart = falling();
        heart.update(Vec2::new(810.0, heart.body.pos.y), &world, &mut particles, 0);
        assert!(heart.body.on_ground);
        assert_eq!(heart.body.bottom(), platform.y);
        let expected = 1.0 + HEART_ACCEL + HEART_LANDING_KICK;
        assert!((heart.body.vel.x - expected).abs() < 1e-5);

        // Player 280 behind: still scared but out of kick range
        let mut heart = falling();
        heart.update(Vec2::new(730.0, heart.body.pos.y), &world, &mut particles, 0);
        assert!(heart.scared);
        assert!(heart.body.on_ground);
        assert!((heart.body.vel.x - (1.0 + HEART_ACCEL)).abs() < 1e-5);
    }

    #[test]
    fn test_no_kick_on_ground_landing() {
        let (world, mut particles) = setup();
        let mut heart = Heart::new(Vec2::new(1000.0, GROUND_Y - HEART_H - 1.0));
        heart.body.vel = Vec2::new(1.0, 2.0);
        heart.jump_cooldown = 100;
        heart.update(Vec2::new(850.0, GROUND_Y - HEART_H), &world, &mut particles, 0);
        assert!(heart.body.on_ground);
        assert!((heart.body.vel.x - (1.0 + HEART_ACCEL)).abs() < 1e-5);
    }

    #[test]
    fn test_trail_faster_when_scared() {
        let (world, mut calm_particles) = setup();
        let mut calm = grounded_heart(1000.0);
        for t in 0..14 {
            calm.update(Vec2::new(200.0, GROUND_Y - HEART_H), &world, &mut calm_particles, t);
        }
        assert!(!calm.scared);
        assert_eq!(calm_particles.count(), 2);

        let mut scared_particles = ParticleSystem::new(5, 500);
        let mut scared = grounded_heart(1000.0);
        scared.jump_cooldown = 1000;
        for t in 0..14 {
            scared.update(Vec2::new(850.0, GROUND_Y - HEART_H), &world, &mut scared_particles, t);
        }
        assert!(scared.scared);
        assert_eq!(scared_particles.count(), 4);
    }

    #[test]
    fn test_waiting_damps_velocity() {
        let (world, mut particles) = setup();
        let mut heart = grounded_heart(WORLD_W - 200.0);
        heart.body.vel.x = 1.0;
        heart.update(Vec2::new(1000.0, GROUND_Y - HEART_H), &world, &mut particles, 0);
        assert_eq!(heart.phase(), HeartPhase::Flee);
        assert!((heart.body.vel.x - HEART_WAIT_DAMPING).abs() < 1e-6);

        heart.body.vel.x = 0.09;
        heart.update(Vec2::new(1000.0, GROUND_Y - HEART_H), &world, &mut particles, 1);
        assert_eq!(heart.body.vel.x, 0.0);
    }

    #[test]
    fn test_liftoff_same_frame() {
        let (world, mut particles) = setup();
        let mut heart = grounded_heart(WORLD_W - 200.0);
        let start = heart.body.pos;
        let player = Vec2::new(WORLD_W - 350.0, GROUND_Y - HEART_H);

        heart.update(player, &world, &mut particles, 0);
        assert_eq!(heart.phase(), HeartPhase::Floating);
        assert_eq!(heart.body.vel, Vec2::new(0.0, HEART_LIFTOFF_VY));
        // No physics on the liftoff frame
        assert_eq!(heart.body.pos, start);
        assert_eq!(particles.count(), 0);
    }

    #[test]
    fn test_liftoff_requires_near_end() {
        let (world, mut particles) = setup();
        let mut heart = grounded_heart(WORLD_W - 400.0);
        heart.update(Vec2::new(WORLD_W - 450.0, GROUND_Y - HEART_H), &world, &mut particles, 0);
        assert_eq!(heart.phase(), HeartPhase::Flee);
    }

    #[test]
    fn test_float_to_orbit() {
        let (world, mut particles) = setup();
        let mut heart = grounded_heart(WORLD_W - 200.0);
        heart.update(Vec2::new(WORLD_W - 250.0, GROUND_Y - HEART_H), &world, &mut particles, 0);
        assert_eq!(heart.phase(), HeartPhase::Floating);

        let mut frames = 0;
        while heart.phase() == HeartPhase::Floating && frames < 2000 {
            heart.update(Vec2::ZERO, &world, &mut particles, frames);
            assert!(heart.body.vel.y >= HEART_FLOAT_MAX_RISE);
            frames += 1;
        }
        assert_eq!(heart.phase(), HeartPhase::Orbiting);

        for t in 0..600 {
            heart.update(Vec2::ZERO, &world, &mut particles, frames + t);
            let r = (heart.body.pos - moon_center()).length();
            assert!((r - HEART_ORBIT_RADIUS).abs() < 0.01, "radius drifted to {r}");
        }
    }

    #[test]
    fn test_orbit_angle_continues_from_capture() {
        let (world, mut particles) = setup();
        let mut heart = grounded_heart(MOON_X + 200.0);
        heart.force_phase(HeartPhase::Floating);
        heart.body.pos = Vec2::new(MOON_X + 200.0, MOON_Y);
        heart.body.vel = Vec2::ZERO;

        heart.update(Vec2::ZERO, &world, &mut particles, 0);
        assert_eq!(heart.phase(), HeartPhase::Orbiting);
        let captured = heart.orbit_angle();

        heart.update(Vec2::ZERO, &world, &mut particles, 1);
        assert!((heart.orbit_angle() - captured - HEART_ORBIT_SPEED).abs() < 1e-6);
    }

    #[test]
    fn test_caught_is_frozen() {
        let (world, mut particles) = setup();
        let mut heart = grounded_heart(1000.0);
        heart.catch();
        let before = heart.body;
        heart.update(Vec2::new(990.0, 0.0), &world, &mut particles, 0);
        assert_eq!(heart.body, before);
        assert!(!heart.is_visible());
    }

    #[test]
    fn test_phase_never_regresses() {
        let mut heart = grounded_heart(1000.0);
        heart.force_phase(HeartPhase::Orbiting);
        heart.force_phase(HeartPhase::Floating);
        heart.force_phase(HeartPhase::Flee);
        assert_eq!(heart.phase(), HeartPhase::Orbiting);
    }

    #[test]
    fn test_near_end_thresholds() {
        let heart = grounded_heart(WORLD_W - 400.0);
        assert!(!heart.is_near_end());
        assert!(heart.is_near_float_trigger());
    }

    proptest! {
        #[test]
        fn prop_heart_stays_in_bounds(
            start_x in HEART_MIN_X..HEART_MAX_X,
            player_x in -500.0f32..7000.0,
            vx in -10.0f32..10.0,
        ) {
            let (world, mut particles) = setup();
            let mut heart = grounded_heart(start_x);
            heart.body.vel.x = vx;
            let player = Vec2::new(player_x, GROUND_Y - PLAYER_H);
            for t in 0..120 {
                heart.update(player, &world, &mut particles, t);
                if heart.phase() != HeartPhase::Flee {
                    break;
                }
                prop_assert!(heart.body.pos.x >= HEART_MIN_X);
                prop_assert!(heart.body.pos.x <= HEART_MAX_X);
                if heart.body.on_ground {
                    prop_assert_eq!(heart.body.vel.y, 0.0);
                }
            }
        }

        #[test]
        fn prop_far_player_never_scares(dist in 300.0f32..5000.0) {
            let (world, mut particles) = setup();
            let mut heart = grounded_heart(1000.0);
            let player = heart.body.pos - Vec2::new(dist, 0.0);
            heart.update(player, &world, &mut particles, 0);
            prop_assert!(!heart.scared);
            prop_assert_eq!(heart.scared_level, 0.0);
        }
    }
}
