//! Session state and the types shared between the simulation and frontend
//!
//! One `GameState` is one play session: exactly one player, heart and dog,
//! plus the derived camera and presentation state.

use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::dog::Dog;
use super::heart::Heart;
use super::particles::ParticleSystem;
use super::player::Player;
use super::schedule::Schedule;
use super::world::World;
use crate::settings::Settings;

use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for the start button
    Start,
    /// Active chase
    Playing,
    /// Heart caught
    Win,
    /// Bitten by the dog
    GameOver,
}

/// Full-screen overlays the frontend can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    Start,
    Win,
    GameOver,
}

/// Presentation commands emitted by the simulation, drained by the frontend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    ShowScreen(Screen),
    HideScreen(Screen),
    ShowHud,
    HideHud,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the world and all sessions derive from
    pub seed: u64,
    /// Number of sessions started so far
    pub session: u64,
    pub phase: GamePhase,
    /// Frame counter, reset each session
    pub t: u64,
    /// Fade between the ground scene and space (0-1)
    pub space_alpha: f32,
    pub world: World,
    pub player: Player,
    pub heart: Heart,
    pub dog: Dog,
    pub camera: Camera,
    pub particles: ParticleSystem,
    pub schedule: Schedule,
    pub settings: Settings,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a game sitting on the start screen
    pub fn new(seed: u64, settings: Settings) -> Self {
        let mut world_rng = Pcg32::seed_from_u64(seed);
        let world = World::generate(&mut world_rng);
        let particles = ParticleSystem::new(seed, settings.max_particles());

        let mut state = Self {
            seed,
            session: 0,
            phase: GamePhase::Start,
            t: 0,
            space_alpha: 0.0,
            world,
            player: Player::spawn(),
            heart: Heart::spawn(),
            dog: Dog::spawn(),
            camera: Camera::new(),
            particles,
            schedule: Schedule::new(),
            settings,
            events: Vec::new(),
        };
        state.emit(GameEvent::ShowScreen(Screen::Start));
        state.emit(GameEvent::HideHud);
        state
    }

    /// Begin a fresh session. Everything except the level geometry is
    /// rebuilt, and anything still scheduled from the last session is dropped.
    pub fn start_session(&mut self) {
        self.schedule.cancel_all();
        self.session += 1;

        self.player = Player::spawn();
        self.heart = Heart::spawn();
        self.dog = Dog::spawn();
        self.particles = ParticleSystem::new(
            self.seed.wrapping_add(self.session),
            self.settings.max_particles(),
        );
        self.camera = Camera::new();
        self.space_alpha = 0.0;
        self.t = 0;
        self.phase = GamePhase::Playing;

        self.emit(GameEvent::HideScreen(Screen::Start));
        self.emit(GameEvent::HideScreen(Screen::GameOver));
        self.emit(GameEvent::HideScreen(Screen::Win));
        self.emit(GameEvent::ShowHud);

        log::info!("Session {} started (seed {})", self.session, self.seed);
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all presentation commands emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
