//! Fire-and-forget visual particles
//!
//! Particles never feed back into gameplay. The system owns the seeded
//! RNG used for cosmetic jitter so that entity updates stay reproducible
//! for a given session seed.

use std::collections::VecDeque;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Particle drift applied each frame
const PARTICLE_GRAVITY: f32 = 0.04;
const PARTICLE_DRAG: f32 = 0.98;

/// Burst shape
const BURST_SPREAD_X: f32 = 8.0;
const BURST_LIFT: f32 = 10.0;
const BURST_MIN_LIFT: f32 = 3.0;
const BURST_LIFE: u32 = 80;

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: u32,
    pub size: f32,
    /// Remaining frames
    pub life: u32,
    pub max_life: u32,
}

impl Particle {
    /// Fade factor, 1 at spawn down to 0 at expiry
    pub fn alpha(&self) -> f32 {
        if self.max_life == 0 {
            0.0
        } else {
            self.life as f32 / self.max_life as f32
        }
    }
}

#[derive(Debug, Clone)]
pub struct ParticleSystem {
    /// Oldest first
    particles: VecDeque<Particle>,
    max_particles: usize,
    rng: Pcg32,
}

impl ParticleSystem {
    pub fn new(seed: u64, max_particles: usize) -> Self {
        Self {
            particles: VecDeque::new(),
            max_particles,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Uniform sample in [0, 1)
    pub fn random(&mut self) -> f32 {
        self.rng.random::<f32>()
    }

    /// Uniform sample in [-amount/2, amount/2)
    pub fn jitter(&mut self, amount: f32) -> f32 {
        (self.random() - 0.5) * amount
    }

    /// Pick one of two colors with equal odds
    pub fn either(&mut self, a: u32, b: u32) -> u32 {
        if self.random() < 0.5 { a } else { b }
    }

    pub fn spawn(&mut self, pos: Vec2, vel: Vec2, color: u32, size: f32, life: u32) {
        if self.max_particles == 0 {
            return;
        }
        if self.particles.len() >= self.max_particles {
            // Drop the oldest to make room
            self.particles.pop_front();
        }
        self.particles.push_back(Particle {
            pos,
            vel,
            color,
            size,
            life,
            max_life: life,
        });
    }

    /// Spray `count` randomized particles upward from `pos`
    pub fn burst(&mut self, pos: Vec2, count: u32, palette: &[u32]) {
        if palette.is_empty() {
            return;
        }
        for _ in 0..count {
            let vel = Vec2::new(
                self.jitter(BURST_SPREAD_X),
                -self.random() * BURST_LIFT - BURST_MIN_LIFT,
            );
            let color = palette[self.rng.random_range(0..palette.len())];
            let size = self.random() * 6.0 + 3.0;
            self.spawn(pos, vel, color, size, BURST_LIFE);
        }
    }

    /// Advance all particles one frame and cull the expired
    pub fn update(&mut self) {
        for p in self.particles.iter_mut() {
            p.pos += p.vel;
            p.vel.y += PARTICLE_GRAVITY;
            p.vel.x *= PARTICLE_DRAG;
            p.life = p.life.saturating_sub(1);
        }
        self.particles.retain(|p| p.life > 0);
    }

    pub fn particles(&self) -> &VecDeque<Particle> {
        &self.particles
    }

    pub fn count(&self) -> usize {
        self.particles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_and_expire() {
        let mut ps = ParticleSystem::new(1, 100);
        ps.spawn(Vec2::ZERO, Vec2::new(1.0, 0.0), 0, 2.0, 3);
        assert_eq!(ps.count(), 1);

        ps.update();
        assert_eq!(ps.count(), 1);
        assert!((ps.particles()[0].pos.x - 1.0).abs() < 1e-6);
        assert!((ps.particles()[0].alpha() - 2.0 / 3.0).abs() < 1e-6);

        ps.update();
        ps.update();
        assert_eq!(ps.count(), 0);
    }

    #[test]
    fn test_cap_drops_oldest() {
        let mut ps = ParticleSystem::new(1, 2);
        ps.spawn(Vec2::ZERO, Vec2::ZERO, 1, 1.0, 10);
        ps.spawn(Vec2::ZERO, Vec2::ZERO, 2, 1.0, 10);
        ps.spawn(Vec2::ZERO, Vec2::ZERO, 3, 1.0, 10);
        let colors: Vec<u32> = ps.particles().iter().map(|p| p.color).collect();
        assert_eq!(colors, vec![2, 3]);
    }

    #[test]
    fn test_disabled_when_cap_zero() {
        let mut ps = ParticleSystem::new(1, 0);
        ps.burst(Vec2::ZERO, 10, &[1]);
        assert_eq!(ps.count(), 0);
    }

    #[test]
    fn test_burst_shape() {
        let mut ps = ParticleSystem::new(9, 100);
        ps.burst(Vec2::new(5.0, 5.0), 20, &[7, 8]);
        assert_eq!(ps.count(), 20);
        for p in ps.particles() {
            assert!(p.vel.y <= -BURST_MIN_LIFT);
            assert!(p.vel.x.abs() <= BURST_SPREAD_X / 2.0);
            assert!(p.color == 7 || p.color == 8);
            assert_eq!(p.life, BURST_LIFE);
        }
    }
}
