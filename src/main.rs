//! Snake Arena entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use snake_arena::audio::{AudioManager, SoundEffect};
    use snake_arena::consts::*;
    use snake_arena::platform;
    use snake_arena::renderer::{BoardLayout, Palette, RenderState};
    use snake_arena::sim::{GameEvent, GameStatus};
    use snake_arena::{Command, ConfigError, GameConfig, Session, Settings};

    /// Game instance holding all state
    struct Game {
        session: Session,
        settings: Settings,
        audio: AudioManager,
        render_state: Option<RenderState>,
        last_time: f64,
    }

    impl Game {
        fn new(config: GameConfig) -> Result<Self, ConfigError> {
            let seed = platform::session_seed(config.seed);
            let session = Session::seeded(config, seed)?;
            let settings = Settings::default();
            let mut audio = AudioManager::new();
            audio.apply_settings(&settings);
            Ok(Self {
                session,
                settings,
                audio,
                render_state: None,
                last_time: 0.0,
            })
        }

        /// Run every tick that fell due since the last frame
        fn update(&mut self, elapsed_ms: f64) {
            for event in self.session.frame(elapsed_ms) {
                let cue = match event {
                    GameEvent::GameOver { .. } if self.session.new_best() => SoundEffect::HighScore,
                    _ => SoundEffect::for_event(event),
                };
                self.audio.play(cue);
            }
        }

        fn handle_key(&mut self, key: &str) -> bool {
            self.audio.resume();
            if key == "m" || key == "M" {
                self.settings.toggle_mute();
                self.audio.apply_settings(&self.settings);
                log::info!("Muted: {}", self.settings.muted);
                return true;
            }
            match self.session.handle_key(key) {
                Some(Command::TogglePause) => {
                    self.audio.play(SoundEffect::Pause);
                    true
                }
                Some(Command::Turn(_)) => true,
                None => false,
            }
        }

        fn restart(&mut self) {
            self.session.restart();
        }

        fn auto_pause(&mut self, reason: &str) {
            if self.settings.pause_on_blur && self.session.pause() {
                log::info!("Auto-paused ({})", reason);
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let palette = Palette::for_settings(self.settings.high_contrast);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(self.session.state(), &palette) {
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

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let state = self.session.state();
            let best = self.session.high_scores().best();

            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&state.score.to_string()));
            }
            if let Some(el) = document.query_selector("#hud-best .hud-value").ok().flatten() {
                el.set_text_content(Some(&best.to_string()));
            }
            if let Some(el) = document.query_selector("#hud-heading .hud-value").ok().flatten() {
                let heading = self.session.last_direction().map_or("-", |d| d.as_str());
                el.set_text_content(Some(heading));
            }

            if let Some(el) = document.get_element_by_id("pause-menu") {
                let class = if state.status == GameStatus::Paused {
                    "overlay"
                } else {
                    "overlay hidden"
                };
                let _ = el.set_attribute("class", class);
            }

            if let Some(el) = document.get_element_by_id("game-over") {
                if state.status == GameStatus::GameOver {
                    let _ = el.set_attribute("class", "overlay");
                    if let Some(score_el) = document.get_element_by_id("final-score") {
                        score_el.set_text_content(Some(&state.score.to_string()));
                    }
                    if let Some(best_el) = document.get_element_by_id("best-score") {
                        best_el.set_text_content(Some(&best.to_string()));
                    }
                    if let Some(badge) = document.get_element_by_id("new-best") {
                        let class = if self.session.new_best() { "" } else { "hidden" };
                        let _ = badge.set_attribute("class", class);
                    }
                } else {
                    let _ = el.set_attribute("class", "overlay hidden");
                }
            }
        }
    }

    /// Config from the page URL, falling back to defaults on a bad query
    fn load_config() -> GameConfig {
        let query = web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        match GameConfig::from_query(&query) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Ignoring URL config: {}", e);
                GameConfig::default()
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Snake Arena starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let config = load_config();
        let game = match Game::new(config) {
            Ok(game) => game,
            Err(e) => {
                log::error!("Invalid config ({}), using defaults", e);
                Game::new(GameConfig::default()).expect("default config is valid")
            }
        };
        let grid_size = game.session.engine().config().grid_size;
        let layout = BoardLayout::new(grid_size, CELL_PX, game.settings.cell_gap_px());
        let game = Rc::new(RefCell::new(game));

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Size the canvas to the board at device resolution
        let dpr = window.device_pixel_ratio();
        let board_css = layout.board_px() as f64;
        let _ = canvas.set_attribute(
            "style",
            &format!("width: {}px; height: {}px;", board_css, board_css),
        );
        let width = (board_css * dpr) as u32;
        let height = (board_css * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, layout).await;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(game.clone());
        setup_game_over_buttons(game.clone());
        setup_auto_pause(game.clone());

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        request_animation_frame(game);

        log::info!("Snake Arena running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            // A frame holding the game is still running; drop the key
            let Ok(mut g) = game.try_borrow_mut() else {
                return;
            };
            if g.handle_key(&event.key()) {
                // Keep arrows from scrolling the page
                event.prevent_default();
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        // Skip the frame rather than run two updates at once
        if let Ok(mut g) = game.try_borrow_mut() {
            let elapsed = if g.last_time > 0.0 { time - g.last_time } else { 0.0 };
            g.last_time = time;

            g.update(elapsed);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }

    fn setup_game_over_buttons(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                if let Ok(mut g) = game.try_borrow_mut() {
                    g.restart();
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Quit leaves the session by reloading the page
        if let Some(btn) = document.get_element_by_id("quit-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                if let Some(window) = web_sys::window() {
                    let _ = window.location().reload();
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    if let Ok(mut g) = game.try_borrow_mut() {
                        g.auto_pause("tab hidden");
                    }
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                if let Ok(mut g) = game.try_borrow_mut() {
                    g.auto_pause("window blur");
                }
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Snake Arena (native) starting...");
    log::info!("The playable version runs in the browser - use `trunk serve`");

    // Optional first argument: the same query string the web page accepts
    let query = std::env::args().nth(1).unwrap_or_default();
    let config = match snake_arena::GameConfig::from_query(&query) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid config: {e}");
            std::process::exit(2);
        }
    };

    match headless::run_demo(config) {
        Ok(summary) => println!("{summary}"),
        Err(e) => {
            eprintln!("Demo failed: {e}");
            std::process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use snake_arena::platform;
    use snake_arena::sim::{GameEvent, GameStatus};
    use snake_arena::{ConfigError, GameConfig, Session};

    /// Frames simulated per episode before giving up
    const MAX_FRAMES: u32 = 60 * 60;
    const FRAME_MS: f64 = 1000.0 / 60.0;
    const EPISODES: u32 = 3;

    /// Key presses replayed in a loop, one every `KEY_EVERY` frames
    const SCRIPT: [&str; 8] = [
        "ArrowDown", "ArrowLeft", "p", "p", "ArrowUp", "ArrowLeft", "ArrowDown", "ArrowRight",
    ];
    const KEY_EVERY: u32 = 27;

    /// Play a few scripted episodes through the same session the browser uses
    pub fn run_demo(config: GameConfig) -> Result<String, ConfigError> {
        let seed = platform::session_seed(config.seed);
        let mut session = Session::seeded(config, seed)?;
        let mut keys = SCRIPT.iter().cycle();

        for episode in 0..EPISODES {
            if episode > 0 {
                session.restart();
            }

            let mut frames = 0;
            while session.state().status != GameStatus::GameOver && frames < MAX_FRAMES {
                frames += 1;
                if frames % KEY_EVERY == 0 {
                    if let Some(key) = keys.next() {
                        session.handle_key(key);
                    }
                }
                for event in session.frame(FRAME_MS) {
                    match event {
                        GameEvent::Consumed { score } => log::info!("Ate food, score {}", score),
                        GameEvent::GameOver { score, cause } => {
                            log::info!("Episode {} over ({:?}), score {}", episode, cause, score)
                        }
                    }
                }
            }
        }

        Ok(format!(
            "Played {} episodes (seed {}), best score {}",
            EPISODES,
            seed,
            session.high_scores().best()
        ))
    }
}
