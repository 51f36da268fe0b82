//! Duel Pong entry point
//!
//! Handles platform-specific initialization and runs the game loop.
//!
//! The web page is expected to provide `#canvas`, a `#menu` holding buttons
//! with `data-level="1|2|3"`, and a `#game-over` overlay containing
//! `#winner-text` and `#restart-btn`.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlElement, KeyboardEvent};

    use duel_pong::audio::AudioManager;
    use duel_pong::consts::*;
    use duel_pong::renderer::{RenderState, scene};
    use duel_pong::sim::{Difficulty, GameState, MatchPhase};
    use duel_pong::{InputState, LoopDriver, Settings};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        driver: LoopDriver,
        render_state: Option<RenderState>,
        input: InputState,
        audio: AudioManager,
        settings: Settings,
    }

    impl Game {
        fn new(seed: u64, settings: Settings) -> Self {
            Self {
                state: GameState::new(seed),
                driver: LoopDriver::new(settings.time_step),
                render_state: None,
                input: InputState::default(),
                audio: AudioManager::new(&settings),
                settings,
            }
        }

        /// Leave the menu; returns false if no match was started
        fn start(&mut self, difficulty: Difficulty) -> bool {
            let result = self.state.start_match(difficulty);
            if result.success {
                self.driver.reset();
                self.input.clear();
                self.audio.apply_settings(&self.settings);
            }
            result.success
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&scene::build(&self.state)) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Toggle menu, canvas and game-over overlay to match the phase
        fn update_overlay(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let phase = self.state.phase;

            if let Some(el) = document.get_element_by_id("menu") {
                let class = if phase == MatchPhase::Menu { "" } else { "hidden" };
                let _ = el.set_attribute("class", class);
            }
            if let Some(el) = document.get_element_by_id("canvas") {
                let class = if phase == MatchPhase::Menu { "hidden" } else { "" };
                let _ = el.set_attribute("class", class);
            }
            if let Some(el) = document.get_element_by_id("game-over") {
                match self.state.winner {
                    Some(winner) if phase == MatchPhase::GameOver => {
                        let _ = el.set_attribute("class", "");
                        if let Some(text) = document.get_element_by_id("winner-text") {
                            text.set_text_content(Some(winner.banner()));
                        }
                    }
                    _ => {
                        let _ = el.set_attribute("class", "hidden");
                    }
                }
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Duel Pong starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Fixed-size table, scaled for the display
        let dpr = window.device_pixel_ratio();
        let width = (SURFACE_WIDTH as f64 * dpr) as u32;
        let height = (SURFACE_HEIGHT as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let settings = Settings::load();
        // Write back clamped values
        settings.save();
        log::info!(
            "Game initialized with seed: {} ({} time step)",
            seed,
            settings.time_step.as_str()
        );
        let game = Rc::new(RefCell::new(Game::new(seed, settings)));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(
            surface,
            &adapter,
            width,
            height,
            (SURFACE_WIDTH, SURFACE_HEIGHT),
        )
        .await;
        {
            let mut g = game.borrow_mut();
            g.render_state = Some(render_state);
            g.update_overlay();
        }

        setup_keyboard(game.clone());
        setup_difficulty_buttons(game.clone());
        setup_restart_button(game);

        log::info!("Duel Pong ready");
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().input.handle_key_down(&event.key()) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().input.handle_key_up(&event.key()) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_difficulty_buttons(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let Ok(buttons) = document.query_selector_all("[data-level]") else {
            log::warn!("No difficulty buttons found");
            return;
        };

        for i in 0..buttons.length() {
            let Some(button) = buttons
                .item(i)
                .and_then(|node| node.dyn_into::<HtmlElement>().ok())
            else {
                continue;
            };
            let level = button.dataset().get("level").unwrap_or_default();
            let Some(difficulty) = level.parse().ok().and_then(Difficulty::from_level) else {
                log::warn!("Ignoring difficulty button with level {:?}", level);
                continue;
            };

            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let started = {
                    let mut g = game.borrow_mut();
                    let started = g.start(difficulty);
                    g.update_overlay();
                    started
                };
                if started {
                    request_animation_frame(game.clone());
                }
            });
            let _ =
                button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                g.state.return_to_menu();
                g.input.clear();
                g.update_overlay();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let keep_running = {
            let mut g = game.borrow_mut();
            let input = g.input.tick_input();
            let report = {
                let Game { state, driver, .. } = &mut *g;
                driver.frame(state, input, time)
            };

            g.audio.dispatch(&report.events);
            g.render();
            if !report.keep_running {
                g.update_overlay();
            }
            report.keep_running
        };

        if keep_running {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use duel_pong::consts::REFERENCE_FRAME_MS;
    use duel_pong::sim::{Difficulty, GameState, MatchAction, MatchSummary, TickInput};
    use duel_pong::{LoopDriver, Settings};

    /// Give up on a match after this many frames
    const TICK_BUDGET: u64 = 200_000;
    /// Autopilot ignores offsets smaller than this
    const DEADZONE: f32 = 10.0;

    /// Difficulty from a command-line argument: a level or a name
    pub fn parse_difficulty(arg: &str) -> Option<Difficulty> {
        arg.trim()
            .parse::<u8>()
            .ok()
            .and_then(Difficulty::from_level)
            .or_else(|| Difficulty::from_str(arg))
    }

    /// Follow the ball with the player paddle
    pub fn autopilot(state: &GameState) -> TickInput {
        let offset = state.ball.pos.y - state.player.center_y();
        TickInput {
            up: offset < -DEADZONE,
            down: offset > DEADZONE,
        }
    }

    /// Play one match to completion without a window
    pub fn play(seed: u64, difficulty: Difficulty, settings: &Settings) -> Option<MatchSummary> {
        let mut state = GameState::new(seed);
        let mut driver = LoopDriver::new(settings.time_step);
        state.start_match(difficulty);

        let mut frame = 0u64;
        while state.is_playing() && frame < TICK_BUDGET {
            let now_ms = frame as f64 * REFERENCE_FRAME_MS;
            let input = autopilot(&state);
            driver.frame(&mut state, input, now_ms);
            frame += 1;
        }

        if state.is_playing() {
            log::warn!(
                "Tick budget exhausted at {}-{}, calling the match",
                state.score.player,
                state.score.opponent
            );
            state.apply(MatchAction::Finish);
        }
        state.summary()
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use duel_pong::Settings;
    use duel_pong::sim::Difficulty;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Duel Pong (native) starting...");
    log::info!("Native mode runs a headless autopilot match - run with `trunk serve` for the web version");

    let difficulty = match std::env::args().nth(1) {
        Some(arg) => match headless::parse_difficulty(&arg) {
            Some(d) => d,
            None => {
                log::error!("Unknown difficulty {:?} (expected easy|medium|hard or 1|2|3)", arg);
                std::process::exit(2);
            }
        },
        None => Difficulty::default(),
    };

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default();
    let settings = Settings::load();

    log::info!("Seed {} on {}", seed, difficulty.as_str());
    match headless::play(seed, difficulty, &settings) {
        Some(summary) => match serde_json::to_string_pretty(&summary) {
            Ok(json) => log::info!("Match summary:\n{}", json),
            Err(e) => log::error!("Failed to serialize summary: {}", e),
        },
        None => log::error!("Match ended without a winner"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
