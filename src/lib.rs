//! Heart Chase - A side-scrolling chase across the world and up to the Moon
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, AI, collisions, game state)
//! - `hud`: Derived HUD values and screen commands for the frontend
//! - `settings`: Player-facing configuration

pub mod hud;
pub mod settings;
pub mod sim;

pub use settings::{QualityPreset, Settings};

/// Game configuration constants
///
/// All speeds are in world units per frame, all timers in frames.
pub mod consts {
    /// Simulation frame rate (one tick per animation frame)
    pub const FRAME_RATE: u32 = 60;

    /// Logical canvas resolution
    pub const CANVAS_W: f32 = 800.0;
    pub const CANVAS_H: f32 = 450.0;

    /// World dimensions
    pub const WORLD_W: f32 = 6000.0;
    pub const GROUND_Y: f32 = CANVAS_H - 80.0;
    pub const GRAVITY: f32 = 0.45;

    /// Platform generation
    pub const PLATFORM_COUNT: usize = 25;
    pub const PLATFORM_HEIGHT: f32 = 12.0;
    /// Extra depth below a platform top that still counts as landing
    pub const PLATFORM_LAND_SLOP: f32 = 10.0;
    /// Previous-frame bottom must be at most this far below the top
    pub const PLATFORM_PREV_TOLERANCE: f32 = 2.0;
    /// Decorative goal arch, measured from the world's right edge
    pub const END_PORTAL_OFFSET: f32 = 100.0;

    /// Player
    pub const PLAYER_W: f32 = 28.0;
    pub const PLAYER_H: f32 = 36.0;
    pub const PLAYER_SPEED: f32 = 4.0;
    pub const PLAYER_JUMP_FORCE: f32 = -11.0;
    pub const PLAYER_RELEASE_DAMPING: f32 = 0.75;
    pub const PLAYER_START_X: f32 = 100.0;
    pub const PLAYER_START_Y: f32 = GROUND_Y - 40.0;

    /// Astronaut (zero-g) locomotion
    pub const SPACE_GRAVITY: f32 = 0.04;
    pub const SPACE_FLOAT_SPEED: f32 = 2.5;
    pub const SPACE_ACCEL: f32 = 0.3;
    pub const SPACE_DAMPING: f32 = 0.94;
    pub const SPACE_THRUST: f32 = 0.5;
    pub const SPACE_MAX_RISE: f32 = -5.0;
    pub const SPACE_MAX_FALL: f32 = 2.0;
    /// Upward kick given when the suit switches on
    pub const ASTRONAUT_LAUNCH_VY: f32 = -3.0;

    /// Heart
    pub const HEART_W: f32 = 30.0;
    pub const HEART_H: f32 = 28.0;
    pub const HEART_START_X: f32 = 400.0;
    pub const HEART_START_Y: f32 = GROUND_Y - 60.0;
    pub const HEART_START_VX: f32 = 2.5;
    pub const HEART_MAX_SPEED: f32 = 5.2;
    pub const HEART_MIN_SPEED: f32 = -2.0;
    pub const HEART_ACCEL: f32 = 0.18;
    pub const HEART_DRIFT: f32 = 0.05;
    pub const HEART_FLEE_RADIUS: f32 = 300.0;
    pub const HEART_JUMP_RADIUS: f32 = 150.0;
    pub const HEART_JUMP_COOLDOWN: u32 = 60;
    pub const HEART_JUMP_SCALE: f32 = 0.85;
    pub const HEART_MIN_X: f32 = 50.0;
    pub const HEART_MAX_X: f32 = WORLD_W - 80.0;
    /// Landing while the player is within this distance earns a speed kick
    pub const HEART_LANDING_KICK_RADIUS: f32 = 250.0;
    pub const HEART_LANDING_KICK: f32 = 2.5;
    /// Width of the waiting zone at the far end of the world
    pub const HEART_NEAR_END_ZONE: f32 = 300.0;
    /// Player distance that makes a waiting heart lift off
    pub const HEART_LIFTOFF_RADIUS: f32 = 180.0;
    /// Width of the "almost there" zone used only by the HUD
    pub const HEART_FLOAT_TRIGGER: f32 = 500.0;
    pub const HEART_WAIT_DAMPING: f32 = 0.92;
    pub const HEART_LIFTOFF_VY: f32 = -0.5;
    pub const HEART_FLOAT_STEER: f32 = 0.0005;
    pub const HEART_FLOAT_DAMPING: f32 = 0.98;
    pub const HEART_FLOAT_RISE: f32 = 0.08;
    pub const HEART_FLOAT_MAX_RISE: f32 = -4.0;
    pub const HEART_ORBIT_RADIUS: f32 = 180.0;
    /// Extra distance beyond the orbit radius at which the heart is captured
    pub const HEART_ORBIT_CAPTURE_MARGIN: f32 = 60.0;
    pub const HEART_ORBIT_SPEED: f32 = 0.018;

    /// Moon landmark
    pub const MOON_X: f32 = WORLD_W - 300.0;
    pub const MOON_Y: f32 = -900.0;
    pub const MOON_RADIUS: f32 = 120.0;

    /// Dog
    pub const DOG_W: f32 = 36.0;
    pub const DOG_H: f32 = 26.0;
    pub const DOG_SPEED: f32 = 3.2;
    pub const DOG_START_OFFSET: f32 = -300.0;
    pub const DOG_START_Y: f32 = GROUND_Y - 26.0;
    /// Fraction of the speed gap closed each frame
    pub const DOG_EASE: f32 = 0.125;
    pub const DOG_SPRINT_RADIUS: f32 = 200.0;
    pub const DOG_SPRINT_ACCEL: f32 = 0.15;
    pub const DOG_SPRINT_MAX: f32 = DOG_SPEED * 1.3;
    pub const DOG_BARK_INTERVAL: u32 = 40;
    /// 600 ms at 60 fps
    pub const DOG_BARK_DURATION: u32 = 36;
    pub const DOG_BITE_RADIUS_X: f32 = 28.0;
    pub const DOG_BITE_RADIUS_Y: f32 = 28.0;
    /// Distance from the world end where the dog starts giving up
    pub const DOG_SLOW_ZONE: f32 = 800.0;

    /// Cross-entity triggers
    pub const ASTRONAUT_TRIGGER_RADIUS: f32 = 220.0;
    pub const SPACE_WIN_RADIUS: f32 = 70.0;
    /// Camera height (above ground) at which space is fully faded in
    pub const SPACE_FADE_HEIGHT: f32 = 600.0;

    /// Camera
    pub const CAMERA_LEAD: f32 = 0.38;
    pub const CAMERA_LERP: f32 = 0.1;
    pub const CAMERA_VERTICAL_ANCHOR: f32 = 0.45;

    /// Deferred presentation beats (frames)
    pub const WIN_BURST_COUNT: u32 = 50;
    pub const WIN_BURST_SPACING_MS: u32 = 25;
    pub const WIN_SCREEN_DELAY_MS: u32 = 1200;
    pub const GAME_OVER_SCREEN_DELAY_MS: u32 = 600;

    /// Two presses of the trigger key within this window form a double tap
    pub const DOUBLE_TAP_WINDOW_MS: f64 = 300.0;
}

/// Particle colors (0xRRGGBBAA)
pub mod colors {
    pub const HEART_RED: u32 = 0xff3060ff;
    pub const HEART_PINK: u32 = 0xffb3c1ff;
    pub const TRAIL_CALM: u32 = 0xff96aa99;
    pub const STEP: u32 = 0xff96aa80;
    pub const DOG_DUST: u32 = 0xe6965059;
    pub const THRUST_BLUE: u32 = 0x60c8ffff;
    pub const THRUST_PALE: u32 = 0xa0e0ffff;
    pub const WHITE: u32 = 0xffffffff;
}

/// Convert a wall-clock delay to whole frames (rounded, at least one)
#[inline]
pub fn ms_to_frames(ms: u32) -> u64 {
    let frames = (ms as u64 * consts::FRAME_RATE as u64 + 500) / 1000;
    frames.max(1)
}
