//! Per-frame simulation tick
//!
//! Update order is fixed: player, heart, dog, then the cross-entity
//! triggers and derived camera/transition state. The heart and the dog both
//! react to the player's position from this same frame and never see each
//! other.

use glam::Vec2;

use super::heart::HeartPhase;
use super::input::Input;
use super::schedule::Deferred;
use super::state::{GameEvent, GamePhase, GameState, Screen};
use crate::colors;
use crate::consts::*;
use crate::ms_to_frames;

const CELEBRATION_PALETTE: [u32; 3] = [colors::HEART_RED, colors::HEART_PINK, colors::WHITE];
const LAUNCH_SPARK_COUNT: u32 = 20;
const GAME_OVER_SPARK_COUNT: u32 = 20;

/// Advance the game by one frame
pub fn tick(state: &mut GameState, input: &mut Input) {
    // Double tap is the keyboard shortcut for the start/retry button.
    // Consumed every frame so a stale tap never fires later.
    if input.consume_double_tap() && state.phase != GamePhase::Playing {
        state.start_session();
    }

    state.t += 1;

    match state.phase {
        GamePhase::Playing => {
            state
                .player
                .update(input, &state.world, &mut state.particles);

            let player_pos = state.player.body.pos;
            state
                .heart
                .update(player_pos, &state.world, &mut state.particles, state.t);

            update_dog(state, player_pos);
            update_space_transition(state);
            check_astronaut_activation(state);
            follow_player(state);
            check_win(state);
            if !state.player.is_astronaut() {
                check_bite(state);
            }
        }
        GamePhase::Win | GamePhase::GameOver => follow_player(state),
        GamePhase::Start => {}
    }

    run_deferred(state);
    state.particles.update();
}

/// Begin a session from the start button (or a retry)
pub fn start(state: &mut GameState) {
    state.start_session();
}

fn update_dog(state: &mut GameState, player_pos: Vec2) {
    // The dog loses interest as the goal gets close
    let dist_from_end = WORLD_W - state.dog.body.pos.x;
    if dist_from_end < DOG_SLOW_ZONE {
        let slow_factor = dist_from_end / DOG_SLOW_ZONE;
        state.dog.slow_down(0.96 + slow_factor * 0.04);
    }
    state
        .dog
        .update(player_pos, &state.world, &mut state.particles);
}

fn update_space_transition(state: &mut GameState) {
    if state.heart.is_floating_or_orbiting() || state.player.is_astronaut() {
        let rise = (-state.camera.y).max(0.0) / SPACE_FADE_HEIGHT;
        state.space_alpha = rise.min(1.0);
    }
}

fn check_astronaut_activation(state: &mut GameState) {
    if state.player.is_astronaut() || !state.heart.is_floating_or_orbiting() {
        return;
    }
    if state.player.center().distance(state.heart.center()) > ASTRONAUT_TRIGGER_RADIUS {
        return;
    }

    state.player.become_astronaut();
    state.dog.retire();

    let at = state.player.center();
    let particles = &mut state.particles;
    for _ in 0..LAUNCH_SPARK_COUNT {
        let vel = Vec2::new(particles.jitter(8.0), -particles.random() * 6.0 - 2.0);
        let color = particles.either(colors::THRUST_BLUE, colors::WHITE);
        let size = particles.random() * 4.0 + 2.0;
        particles.spawn(at, vel, color, size, 40);
    }
}

fn follow_player(state: &mut GameState) {
    let player = &state.player;
    let target_y = if player.is_astronaut() && player.body.pos.y < 0.0 {
        Some(player.body.pos.y)
    } else {
        None
    };
    state.camera.follow(player.body.pos.x, target_y);
}

fn check_win(state: &mut GameState) {
    if state.heart.phase() != HeartPhase::Orbiting || !state.player.is_astronaut() {
        return;
    }
    if state.player.center().distance(state.heart.center()) < SPACE_WIN_RADIUS {
        trigger_win(state);
    }
}

fn check_bite(state: &mut GameState) {
    if state.dog.is_biting(state.player.center()) {
        log::debug!(
            "Bite: dog center {:?}, player center {:?}",
            state.dog.center(),
            state.player.center()
        );
        trigger_game_over(state);
    }
}

fn trigger_win(state: &mut GameState) {
    state.heart.catch();
    state.phase = GamePhase::Win;
    log::info!("Heart caught after {} frames", state.t);

    let now = state.t;
    if !state.settings.reduced_motion {
        for i in 0..WIN_BURST_COUNT {
            let delay = ms_to_frames(i * WIN_BURST_SPACING_MS);
            state.schedule.after(now, delay, Deferred::CelebrationBurst);
        }
    }
    state.schedule.after(
        now,
        ms_to_frames(WIN_SCREEN_DELAY_MS),
        Deferred::ShowScreen(Screen::Win),
    );
}

fn trigger_game_over(state: &mut GameState) {
    state.phase = GamePhase::GameOver;
    state.dog.retire();
    log::info!(
        "Game over: bitten at x={:.0} after {} frames",
        state.player.body.pos.x,
        state.t
    );

    let at = state.player.center();
    let particles = &mut state.particles;
    for _ in 0..GAME_OVER_SPARK_COUNT {
        let vel = Vec2::new(particles.jitter(6.0), -particles.random() * 5.0 - 2.0);
        let color = particles.either(colors::HEART_RED, colors::HEART_PINK);
        let size = particles.random() * 4.0 + 2.0;
        particles.spawn(at, vel, color, size, 40);
    }

    state.emit(GameEvent::HideHud);
    state.schedule.after(
        state.t,
        ms_to_frames(GAME_OVER_SCREEN_DELAY_MS),
        Deferred::ShowScreen(Screen::GameOver),
    );
}

fn run_deferred(state: &mut GameState) {
    for action in state.schedule.drain_due(state.t) {
        match action {
            Deferred::CelebrationBurst => {
                let at = state.heart.center();
                state.particles.burst(at, 1, &CELEBRATION_PALETTE);
            }
            Deferred::ShowScreen(screen) => state.emit(GameEvent::ShowScreen(screen)),
        }
    }
}
