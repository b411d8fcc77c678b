//! Demo mode: a scripted player
//!
//! Reads the state and presses keys on an ordinary `Input`, so a demo run goes
//! through exactly the same simulation path as a human.

use glam::Vec2;

use super::heart::{HeartPhase, moon_center};
use super::input::{Action, Input};
use super::state::{GamePhase, GameState};
use crate::consts::*;

/// Dog this close behind (center to center) triggers a backward vault
const VAULT_RANGE: f32 = 80.0;
/// Once past the dog, stay at least this far behind it. A player behind the
/// dog only gets chased at half speed.
const FOLLOW_GAP: f32 = 100.0;
/// Horizontal gain from position error to desired drift speed
const STEER_GAIN: f32 = 0.05;
/// Drift speed slack before steering in zero-g
const STEER_SLACK: f32 = 0.1;
/// Vertical gain from position error to desired climb rate
const CLIMB_GAIN: f32 = 0.05;
/// Heart this close is chased directly instead of waiting on its path
const INTERCEPT_RANGE: f32 = 160.0;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Autopilot {
    /// Jumping back over the dog; holds left until landed with the dog ahead
    vaulting: bool,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_vaulting(&self) -> bool {
        self.vaulting
    }

    /// Press keys for this frame
    pub fn drive(&mut self, state: &GameState, input: &mut Input) {
        input.release_all();
        if state.phase != GamePhase::Playing {
            self.vaulting = false;
            return;
        }

        if state.player.is_astronaut() {
            self.fly(state, input);
        } else {
            self.run(state, input);
        }
    }

    fn run(&mut self, state: &GameState, input: &mut Input) {
        let player = &state.player;
        let grounded = player.body.on_ground;
        let dog = &state.dog;

        if !dog.is_alive() {
            self.vaulting = false;
            input.set_action(Action::Right, true);
            return;
        }

        // Positive when the dog is ahead of the player
        let dog_dx = dog.center().x - player.center().x;

        if self.vaulting {
            if grounded && dog_dx > 0.0 {
                self.vaulting = false;
            } else {
                input.set_action(Action::Left, true);
                return;
            }
        }

        if dog_dx <= 0.0 {
            // Let the dog come to us, then go over it
            if -dog_dx < VAULT_RANGE && grounded {
                self.vaulting = true;
                input.set_action(Action::Left, true);
                input.set_action(Action::Jump, true);
            }
            return;
        }

        if dog_dx > FOLLOW_GAP {
            input.set_action(Action::Right, true);
        }
    }

    fn fly(&mut self, state: &GameState, input: &mut Input) {
        let player = &state.player;
        let target = flight_target(state);
        let error = target - player.center();

        let desired_vx = (error.x * STEER_GAIN).clamp(-SPACE_FLOAT_SPEED, SPACE_FLOAT_SPEED);
        if player.body.vel.x < desired_vx - STEER_SLACK {
            input.set_action(Action::Right, true);
        } else if player.body.vel.x > desired_vx + STEER_SLACK {
            input.set_action(Action::Left, true);
        }

        let desired_vy = (error.y * CLIMB_GAIN).clamp(SPACE_MAX_RISE, SPACE_MAX_FALL);
        if player.body.vel.y > desired_vy {
            input.set_action(Action::Jump, true);
        }
    }
}

/// Where the suited-up player should head. An orbiting heart moves faster than
/// the player can fly, so wait at the top of its path unless it is close.
pub fn flight_target(state: &GameState) -> Vec2 {
    let heart = state.heart.center();
    if state.heart.phase() != HeartPhase::Orbiting {
        return heart;
    }
    if heart.distance(state.player.center()) < INTERCEPT_RANGE {
        return heart;
    }
    moon_center() + Vec2::new(HEART_W / 2.0, HEART_H / 2.0 - HEART_ORBIT_RADIUS)
}
