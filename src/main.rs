//! Step Hop entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::collections::{HashMap, HashSet};
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, Event, KeyboardEvent, MouseEvent, TouchEvent};

    use step_hop::audio::{AudioManager, play_events};
    use step_hop::consts::*;
    use step_hop::sim::{Command, GameState, TickInput, reset_game, tick};
    use step_hop::{GameOverOverlay, Scene, Tuning};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        audio: AudioManager,
        accumulator: f64,
        last_time: f64,
        input: TickInput,
        /// Platform elements keyed by platform id
        platform_nodes: HashMap<u32, Element>,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            Self {
                state: GameState::new(seed, Tuning::default()),
                audio: AudioManager::new(),
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                platform_nodes: HashMap::new(),
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt_ms: f64) {
            self.accumulator += dt_ms.min(MAX_FRAME_MS);

            let step = f64::from(SIM_DT_MS);
            let mut substeps = 0;
            while self.accumulator >= step && substeps < MAX_SUBSTEPS {
                tick(&mut self.state, &self.input, SIM_DT_MS);
                self.accumulator -= step;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.commands.clear();
            }

            let events = self.state.drain_events();
            play_events(&mut self.audio, &events);
        }

        /// Apply the current scene to the DOM
        fn render(&mut self, document: &Document) {
            let scene = Scene::project(&self.state);

            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&scene.score_text));
            }

            if let Some(el) = document.get_element_by_id("player") {
                set_layout(&el, scene.player.left, scene.player.bottom, None);
            }

            if let Some(container) = document.get_element_by_id("platforms") {
                let live: HashSet<u32> = scene.platforms.iter().map(|m| m.key).collect();
                self.platform_nodes.retain(|key, el| {
                    let keep = live.contains(key);
                    if !keep {
                        el.remove();
                    }
                    keep
                });

                for marker in &scene.platforms {
                    let el = match self.platform_nodes.get(&marker.key) {
                        Some(el) => el.clone(),
                        None => {
                            let Ok(el) = document.create_element("div") else {
                                continue;
                            };
                            let _ = el.set_attribute("class", "platform");
                            let _ = container.append_child(&el);
                            self.platform_nodes.insert(marker.key, el.clone());
                            el
                        }
                    };
                    set_layout(&el, marker.left, marker.bottom, Some(marker.width));
                }
            }

            if let Some(el) = document.get_element_by_id("game-over") {
                match scene.overlay {
                    Some(overlay) => {
                        let _ = el.set_attribute("class", "");
                        show_overlay(document, &overlay);
                    }
                    None => {
                        let _ = el.set_attribute("class", "hidden");
                    }
                }
            }
        }

        /// Reset game state for restart
        fn restart(&mut self) {
            reset_game(&mut self.state);
            self.accumulator = 0.0;
            self.input.commands.clear();
        }
    }

    fn set_layout(el: &Element, left: f32, bottom: f32, width: Option<f32>) {
        let style = match width {
            Some(width) => format!("left: {left}px; bottom: {bottom}px; width: {width}px;"),
            None => format!("left: {left}px; bottom: {bottom}px;"),
        };
        let _ = el.set_attribute("style", &style);
    }

    fn show_overlay(document: &Document, overlay: &GameOverOverlay) {
        if let Some(el) = document.get_element_by_id("game-over-title") {
            el.set_text_content(Some(GameOverOverlay::TITLE));
        }
        if let Some(el) = document.get_element_by_id("final-score") {
            el.set_text_content(Some(&overlay.score_text()));
        }
        if let Some(el) = document.get_element_by_id("high-score") {
            el.set_text_content(Some(&overlay.high_score_text()));
        }
        if let Some(el) = document.get_element_by_id("restart-btn") {
            el.set_text_content(Some(GameOverOverlay::RESET_LABEL));
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
        log::info!("Step Hop starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&document, game.clone());
        setup_restart_button(&document, game.clone());

        // Start game loop
        request_animation_frame(game);
        log::info!("Step Hop running!");
    }

    /// Whether the event started on the game-over overlay
    fn targets_overlay(event: &Event) -> bool {
        event
            .target()
            .and_then(|target| target.dyn_into::<Element>().ok())
            .and_then(|el| el.closest("#game-over").ok().flatten())
            .is_some()
    }

    fn setup_input_handlers(document: &Document, game: Rc<RefCell<Game>>) {
        // Keyboard
        {
            let game = game.clone();
            let window = web_sys::window().expect("no window");
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "i" | "I" => {
                        g.input.idle_mode = !g.input.idle_mode;
                        log::info!("Idle mode: {}", g.input.idle_mode);
                    }
                    "m" | "M" => {
                        let muted = g.audio.toggle_muted();
                        log::info!("Muted: {}", muted);
                    }
                    key => {
                        let command =
                            Command::from_key(key).or_else(|| Command::from_key(&event.code()));
                        if let Some(command) = command {
                            // Keep Space and arrows from scrolling the page
                            event.prevent_default();
                            g.audio.resume();
                            g.input.commands.push(command);
                        }
                    }
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        let Some(area) = document.get_element_by_id("game") else {
            log::warn!("No #game element - touch and click input disabled");
            return;
        };

        // Touch start (jump)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                // Overlay taps must still become clicks on the restart button
                let Some(command) = Command::for_tap(targets_overlay(&event)) else {
                    return;
                };
                event.prevent_default();
                let mut g = game.borrow_mut();
                g.audio.resume();
                g.input.commands.push(command);
            });
            let _ = area
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse click (jump)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let Some(command) = Command::for_tap(targets_overlay(&event)) else {
                    return;
                };
                let mut g = game.borrow_mut();
                g.audio.resume();
                g.input.commands.push(command);
            });
            let _ = area
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_button(document: &Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: Event| {
                // The button sits inside the game area
                event.stop_propagation();
                if event.type_() == "touchend" {
                    // Handled here; skip the emulated click
                    event.prevent_default();
                }
                let mut g = game.borrow_mut();
                g.audio.resume();
                if let Some(overlay) = Scene::project(&g.state).overlay {
                    overlay.activate(|| g.restart());
                }
            });
            for kind in ["click", "touchend"] {
                let _ =
                    btn.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
            }
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt_ms = if g.last_time > 0.0 {
                time - g.last_time
            } else {
                f64::from(SIM_DT_MS)
            };
            g.last_time = time;

            g.update(dt_ms);
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.render(&document);
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{SystemTime, UNIX_EPOCH};

    use step_hop::audio::{Silent, play_events};
    use step_hop::consts::SIM_DT_MS;
    use step_hop::sim::{GameState, TickInput, tick};
    use step_hop::{Scene, Tuning};

    env_logger::init();
    log::info!("Step Hop (native) starting...");
    log::info!("Native mode runs the autopilot headless - run with `trunk serve` for web version");

    let tuning = match std::env::args().nth(1) {
        Some(path) => Tuning::load(&path).unwrap_or_else(|e| {
            log::warn!("Ignoring tuning file {}: {}", path, e);
            Tuning::default()
        }),
        None => Tuning::default(),
    };

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default();
    log::info!("Game initialized with seed: {}", seed);

    let mut state = GameState::new(seed, tuning);
    let mut audio = Silent;
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    // 60 seconds of game time
    let max_ticks = 60_000 / SIM_DT_MS;
    for _ in 0..max_ticks {
        tick(&mut state, &input, SIM_DT_MS);
        let events = state.drain_events();
        play_events(&mut audio, &events);
        if state.is_game_over() {
            break;
        }
    }

    log::info!(
        "Run finished after {} ms: score {}, best {}",
        state.time_ms,
        state.score,
        state.high_score.best()
    );

    match serde_json::to_string_pretty(&Scene::project(&state)) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize scene: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
