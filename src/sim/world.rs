//! Level geometry: a flat ground line plus a fixed run of floating platforms

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::collision::{Rect, land_on_ground, lands_on_platform, settle_on_platform};
use crate::consts::*;

/// Immutable level geometry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    platforms: Vec<Rect>,
    ground_y: f32,
}

impl World {
    /// Build the level. Platform placement is a fixed function of the
    /// platform index; only the widths draw from `rng`.
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        let platforms: Vec<Rect> = (0..PLATFORM_COUNT)
            .map(|i| {
                let i = i as f32;
                Rect::new(
                    400.0 + i * 220.0 + (i * 1.7).sin() * 80.0,
                    CANVAS_H - 80.0 - 60.0 - (i * 0.8).sin().abs() * 100.0,
                    80.0 + rng.random::<f32>() * 40.0,
                    PLATFORM_HEIGHT,
                )
            })
            .collect();

        log::info!(
            "World generated: {} platforms, ground at y={}",
            platforms.len(),
            GROUND_Y
        );

        Self {
            platforms,
            ground_y: GROUND_Y,
        }
    }

    pub fn platforms(&self) -> &[Rect] {
        &self.platforms
    }

    pub fn ground_y(&self) -> f32 {
        self.ground_y
    }

    /// Where the goal arch stands (for rendering)
    pub fn end_portal(&self) -> Vec2 {
        Vec2::new(WORLD_W - END_PORTAL_OFFSET, self.ground_y)
    }

    /// Resolve ground and platform landings for `body`
    pub fn resolve_collisions(&self, body: &mut Body) {
        self.resolve_collisions_with(body, |_| {})
    }

    /// Resolve landings, calling `on_platform_land` after each platform
    /// landing (never for the ground)
    pub fn resolve_collisions_with<F>(&self, body: &mut Body, mut on_platform_land: F)
    where
        F: FnMut(&mut Body),
    {
        land_on_ground(body, self.ground_y);

        for platform in &self.platforms {
            if lands_on_platform(body, platform) {
                settle_on_platform(body, platform);
                on_platform_land(body);
            }
        }
    }

    /// Test-only level with explicit geometry
    #[cfg(test)]
    pub fn from_platforms(platforms: Vec<Rect>) -> Self {
        Self {
            platforms,
            ground_y: GROUND_Y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_generation_layout() {
        let mut rng = Pcg32::seed_from_u64(7);
        let world = World::generate(&mut rng);
        assert_eq!(world.platforms().len(), PLATFORM_COUNT);

        let first = world.platforms()[0];
        assert_eq!(first.x, 400.0);
        assert_eq!(first.y, CANVAS_H - 140.0);
        assert_eq!(first.h, PLATFORM_HEIGHT);

        for p in world.platforms() {
            assert!(p.w >= 80.0 && p.w <= 120.0);
            assert!(p.y < world.ground_y());
        }
    }

    #[test]
    fn test_generation_deterministic_per_seed() {
        let a = World::generate(&mut Pcg32::seed_from_u64(42));
        let b = World::generate(&mut Pcg32::seed_from_u64(42));
        assert_eq!(a.platforms(), b.platforms());
    }

    #[test]
    fn test_resolve_ground() {
        let world = World::from_platforms(Vec::new());
        let mut body = Body::new(Vec2::new(0.0, GROUND_Y - 10.0), Vec2::new(20.0, 20.0))
            .with_velocity(Vec2::new(0.0, 5.0));
        world.resolve_collisions(&mut body);
        assert!(body.on_ground);
        assert_eq!(body.bottom(), GROUND_Y);
        assert_eq!(body.vel.y, 0.0);
    }

    #[test]
    fn test_resolve_platform_calls_callback() {
        let world = World::from_platforms(vec![Rect::new(100.0, 200.0, 80.0, 12.0)]);
        let mut body = Body::new(Vec2::new(110.0, 183.0), Vec2::new(20.0, 20.0))
            .with_velocity(Vec2::new(1.0, 6.0));

        let mut calls = 0;
        world.resolve_collisions_with(&mut body, |b| {
            calls += 1;
            b.vel.x += 2.5;
        });

        assert!(body.on_ground);
        assert_eq!(calls, 1);
        assert_eq!(body.bottom(), 200.0);
        assert!((body.vel.x - 3.5).abs() < 1e-6);
    }

    #[test]
    fn test_ground_landing_skips_callback() {
        let world = World::from_platforms(vec![Rect::new(100.0, 200.0, 80.0, 12.0)]);
        let mut body = Body::new(Vec2::new(0.0, GROUND_Y - 15.0), Vec2::new(20.0, 20.0))
            .with_velocity(Vec2::new(0.0, 6.0));
        let mut calls = 0;
        world.resolve_collisions_with(&mut body, |_| calls += 1);
        assert_eq!(calls, 0);
        assert!(body.on_ground);
    }
}
