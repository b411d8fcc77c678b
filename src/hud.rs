//! HUD values and render frames derived from the game state
//!
//! The frontend turns these into DOM updates and canvas drawing; nothing here
//! touches the page.

use std::collections::VecDeque;

use glam::Vec2;
use serde::Serialize;

use crate::consts::WORLD_W;
use crate::sim::{Camera, Dog, GameState, Heart, HeartPhase, Particle, Player, World};

const ALMOST_THERE: &str = "ALMOST THERE!!! ♡";
const CLOSE_DISTANCE: f32 = 150.0;
const NEAR_DISTANCE: f32 = 300.0;

/// Everything the HUD shows for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HudSnapshot {
    /// Minimap marker positions, percent of the world width
    pub player_pct: f32,
    pub heart_pct: f32,
    pub flavor: &'static str,
}

impl HudSnapshot {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            player_pct: state.player.body.pos.x / WORLD_W * 100.0,
            heart_pct: state.heart.body.pos.x / WORLD_W * 100.0,
            flavor: flavor_text(state),
        }
    }
}

/// Everything the canvas renderer draws for one frame
#[derive(Debug, Serialize)]
pub struct RenderFrame<'a> {
    pub t: u64,
    pub camera: Camera,
    pub space_alpha: f32,
    pub world: &'a World,
    /// Goal arch position (bottom center on the ground line)
    pub end_portal: Vec2,
    pub player: &'a Player,
    pub heart: &'a Heart,
    pub dog: &'a Dog,
    pub particles: &'a VecDeque<Particle>,
}

impl<'a> RenderFrame<'a> {
    pub fn from_state(state: &'a GameState) -> Self {
        Self {
            t: state.t,
            camera: state.camera,
            space_alpha: state.space_alpha,
            world: &state.world,
            end_portal: state.world.end_portal(),
            player: &state.player,
            heart: &state.heart,
            dog: &state.dog,
            particles: state.particles.particles(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Pick the HUD line. Earlier rules win.
pub fn flavor_text(state: &GameState) -> &'static str {
    let heart = &state.heart;
    let astronaut = state.player.is_astronaut();

    match heart.phase() {
        HeartPhase::Orbiting if astronaut => return "fly to the Moon and catch it ♡",
        HeartPhase::Orbiting => return "it's orbiting the Moon... fly up! ♡",
        HeartPhase::Floating => return "it's flying to space! follow it ♡",
        _ => {}
    }
    if astronaut {
        return "W to fly up · A/D to steer ♡";
    }
    if heart.is_near_float_trigger() {
        return ALMOST_THERE;
    }

    let dist = state.player.body.pos.distance(heart.body.pos);
    if dist < CLOSE_DISTANCE {
        ALMOST_THERE
    } else if dist < NEAR_DISTANCE {
        "keep going... ♡"
    } else {
        "CHASE!!!!!!! ♡"
    }
}
