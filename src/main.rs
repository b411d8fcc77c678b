//! Heart Chase entry point
//!
//! The browser build wires keyboard and DOM to the simulation and runs one
//! tick per animation frame. The native build plays a headless demo session.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, KeyboardEvent};

    use heart_chase::Settings;
    use heart_chase::hud::{HudSnapshot, RenderFrame};
    use heart_chase::sim::{Autopilot, GameEvent, GameState, Input, Screen, start, tick};

    // Canvas drawing lives in the page script; it receives one JSON frame per tick
    #[wasm_bindgen(inline_js = "
        export function render_frame(frame) {
            if (typeof window.renderHeartChase === 'function') {
                window.renderHeartChase(JSON.parse(frame));
            }
        }
    ")]
    extern "C" {
        fn render_frame(frame: &str);
    }

    /// Keys the page should not scroll on
    const CAPTURED_KEYS: [&str; 5] = [" ", "ArrowUp", "ArrowDown", "ArrowLeft", "ArrowRight"];

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: Input,
        autopilot: Option<Autopilot>,
        last_flavor: &'static str,
    }

    impl Game {
        fn new(seed: u64, settings: Settings) -> Self {
            Self {
                state: GameState::new(seed, settings),
                input: Input::new(),
                autopilot: None,
                last_flavor: "",
            }
        }

        fn toggle_autopilot(&mut self) {
            self.autopilot = match self.autopilot {
                Some(_) => None,
                None => Some(Autopilot::new()),
            };
            if self.autopilot.is_none() {
                self.input.release_all();
            }
            log::info!("Demo mode: {}", self.autopilot.is_some());
        }

        /// Run one simulation frame
        fn update(&mut self) {
            if let Some(pilot) = self.autopilot.as_mut() {
                pilot.drive(&self.state, &mut self.input);
            }
            tick(&mut self.state, &mut self.input);
        }

        /// Apply screen/HUD commands emitted since the last frame
        fn apply_events(&mut self, document: &Document) {
            for event in self.state.drain_events() {
                match event {
                    GameEvent::ShowScreen(screen) => set_visible(document, screen_id(screen), true),
                    GameEvent::HideScreen(screen) => {
                        set_visible(document, screen_id(screen), false)
                    }
                    GameEvent::ShowHud => {
                        set_visible(document, "hud", true);
                        set_visible(document, "minimap", true);
                    }
                    GameEvent::HideHud => {
                        set_visible(document, "hud", false);
                        set_visible(document, "minimap", false);
                    }
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self, document: &Document) {
            let hud = HudSnapshot::from_state(&self.state);

            if let Some(el) = document.get_element_by_id("minimap-player") {
                let _ = el.set_attribute("style", &format!("left: {:.2}%", hud.player_pct));
            }
            if let Some(el) = document.get_element_by_id("minimap-heart") {
                let _ = el.set_attribute("style", &format!("left: {:.2}%", hud.heart_pct));
            }

            if hud.flavor != self.last_flavor {
                if let Some(el) = document.get_element_by_id("hud") {
                    el.set_text_content(Some(hud.flavor));
                }
                self.last_flavor = hud.flavor;
            }
        }

        fn render(&self) {
            match RenderFrame::from_state(&self.state).to_json() {
                Ok(json) => render_frame(&json),
                Err(e) => log::warn!("Render frame error: {}", e),
            }
        }
    }

    fn screen_id(screen: Screen) -> &'static str {
        match screen {
            Screen::Start => "start-screen",
            Screen::Win => "win-screen",
            Screen::GameOver => "game-over-screen",
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = if visible {
                el.remove_attribute("hidden")
            } else {
                el.set_attribute("hidden", "")
            };
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            return;
        }

        log::info!("Heart Chase starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let settings = Settings::load();
        let seed = settings.seed.unwrap_or(js_sys::Date::now() as u64);
        let game = Rc::new(RefCell::new(Game::new(seed, settings)));
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&window, game.clone());
        setup_start_buttons(&document, game.clone());
        request_animation_frame(game);

        log::info!("Heart Chase running!");
    }

    fn setup_input_handlers(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                if CAPTURED_KEYS.contains(&key.as_str()) {
                    event.prevent_default();
                }
                let mut g = game.borrow_mut();
                if key == "i" || key == "I" {
                    g.toggle_autopilot();
                    return;
                }
                g.input.key_down(&key, event.time_stamp());
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().input.key_up(&event.key());
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur (keys released while unfocused never arrive)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().input.release_all();
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Start, retry and play-again buttons all begin a fresh session
    fn setup_start_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        for id in ["start-btn", "retry-btn", "again-btn"] {
            let Some(btn) = document.get_element_by_id(id) else {
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut g = game.borrow_mut();
                start(&mut g.state);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            g.update();
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.apply_events(&document);
                g.update_hud(&document);
            }
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

/// Longest headless demo before giving up (five minutes of frames)
#[cfg(not(target_arch = "wasm32"))]
const DEMO_FRAME_LIMIT: u64 = 5 * 60 * heart_chase::consts::FRAME_RATE as u64;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use heart_chase::Settings;
    use heart_chase::hud::flavor_text;
    use heart_chase::sim::{Autopilot, GamePhase, GameState, Input, start, tick};

    env_logger::init();
    log::info!("Heart Chase (native) starting...");
    log::info!("Native mode plays a headless demo - build for wasm32 to play in the browser");

    let settings = Settings::load();
    let seed = settings.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });

    let mut state = GameState::new(seed, settings);
    let mut input = Input::new();
    let mut pilot = Autopilot::new();
    start(&mut state);

    let mut last_flavor = "";
    while state.phase == GamePhase::Playing && state.t < DEMO_FRAME_LIMIT {
        pilot.drive(&state, &mut input);
        tick(&mut state, &mut input);

        for event in state.drain_events() {
            log::debug!("Event: {:?}", event);
        }
        let flavor = flavor_text(&state);
        if flavor != last_flavor {
            log::info!("[{:>5}] {}", state.t, flavor);
            last_flavor = flavor;
        }
    }

    let outcome = match state.phase {
        GamePhase::Win => "heart caught",
        GamePhase::GameOver => "bitten by the dog",
        _ => "time ran out",
    };
    println!(
        "Seed {}: {} after {} frames (player x={:.0}, heart {:?})",
        seed,
        outcome,
        state.t,
        state.player.body.pos.x,
        state.heart.phase()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
