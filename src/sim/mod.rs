//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per animation frame, all timers counted in frames
//! - Seeded RNG only (world layout and particles)
//! - Fixed update order: player, heart, dog, then cross-entity triggers
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod body;
pub mod camera;
pub mod collision;
pub mod dog;
pub mod heart;
pub mod input;
pub mod particles;
pub mod player;
pub mod schedule;
pub mod state;
pub mod tick;
pub mod world;

pub use autopilot::Autopilot;
pub use body::Body;
pub use camera::Camera;
pub use collision::Rect;
pub use dog::Dog;
pub use heart::{Heart, HeartPhase, moon_center};
pub use input::{Action, Input};
pub use particles::{Particle, ParticleSystem};
pub use player::Player;
pub use schedule::{Deferred, Schedule};
pub use state::{GameEvent, GamePhase, GameState, Screen};
pub use tick::{start, tick};
pub use world::World;
