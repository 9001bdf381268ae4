//! Iso Runner entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use glam::Vec2;
    use iso_runner::consts::*;
    use iso_runner::hud::{self, Hud};
    use iso_runner::renderer::{RenderState, VertexSurface};
    use iso_runner::sim::{TickInput, World};
    use iso_runner::{Settings, Tuning};

    /// Game instance holding all state
    struct Game {
        world: World,
        settings: Settings,
        render_state: Option<RenderState>,
        surface: VertexSurface,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(seed: u64, settings: Settings, viewport: Vec2) -> Self {
            Self {
                world: World::new(seed, Tuning::default()),
                settings,
                render_state: None,
                surface: VertexSurface::new(viewport),
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                self.world.tick(&self.input);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.jump = false;
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            self.world.draw(&mut self.surface, &self.settings);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(self.surface.vertices()) {
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

        /// Push queued game events into the DOM
        fn update_hud(&mut self, document: &Document) {
            let events = self.world.drain_events();
            hud::dispatch(&events, &mut DomHud { document });

            if self.settings.show_fps {
                if let Some(el) = document.get_element_by_id("fps") {
                    el.set_text_content(Some(&format!("{} fps", self.fps)));
                }
            }
        }

        fn resize(&mut self, width: u32, height: u32) {
            self.surface.resize(Vec2::new(width as f32, height as f32));
            if let Some(ref mut render_state) = self.render_state {
                render_state.resize(width, height);
            }
        }

        /// Reset game state for restart
        fn restart(&mut self, seed: u64) {
            self.world.restart(seed);
            self.accumulator = 0.0;
            self.input = TickInput {
                idle_mode: self.input.idle_mode,
                ..Default::default()
            };
        }
    }

    /// Score and game-over overlay elements
    struct DomHud<'a> {
        document: &'a Document,
    }

    impl Hud for DomHud<'_> {
        fn show_score(&mut self, score: u32) {
            if let Some(el) = self.document.get_element_by_id("score") {
                el.set_text_content(Some(&format!("Score: {}", score)));
            }
        }

        fn show_game_over(&mut self, final_score: u32) {
            if let Some(el) = self.document.get_element_by_id("finalScore") {
                el.set_text_content(Some(&final_score.to_string()));
            }
            if let Some(el) = self.document.get_element_by_id("gameOver") {
                let _ = el.set_attribute("class", "");
            }
        }

        fn hide_game_over(&mut self) {
            if let Some(el) = self.document.get_element_by_id("gameOver") {
                let _ = el.set_attribute("class", "hidden");
            }
        }
    }

    /// Window inner size in CSS pixels
    fn window_size() -> (u32, u32) {
        let Some(window) = web_sys::window() else {
            return (1, 1);
        };
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(1.0);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(1.0);
        (w.max(1.0) as u32, h.max(1.0) as u32)
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("logger init failed: {}", e).into());
        }

        log::info!("Iso Runner starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document");
            return;
        };

        let Some(canvas) = document
            .get_element_by_id("gameCanvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #gameCanvas element");
            return;
        };

        // Canvas fills the window
        let (width, height) = window_size();
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let settings = Settings::load();
        let game = Rc::new(RefCell::new(Game::new(
            seed,
            settings,
            Vec2::new(width as f32, height as f32),
        )));
        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Failed to create surface: {}", e);
                return;
            }
        };

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => adapter,
            Err(e) => {
                log::error!("Failed to get adapter: {}", e);
                return;
            }
        };

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match RenderState::new(surface, &adapter, width, height).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => {
                log::error!("Failed to initialize renderer: {}", e);
                return;
            }
        }

        setup_input_handlers(&canvas, game.clone());
        setup_resize_handler(&canvas, game.clone());
        setup_restart_button(&document, game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Iso Runner running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Touch start (jump)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().input.jump = true;
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse down (jump)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.jump = true;
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        if let Some(window) = web_sys::window() {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    " " | "ArrowUp" => g.input.jump = true,
                    "i" | "I" => {
                        g.input.idle_mode = !g.input.idle_mode;
                        log::info!("Idle mode: {}", g.input.idle_mode);
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::UiEvent| {
            let (width, height) = window_size();
            canvas.set_width(width);
            canvas.set_height(height);
            game.borrow_mut().resize(width, height);
            log::debug!("Resized to {}x{}", width, height);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
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
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render();
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document);
            }
        }

        request_animation_frame(game);
    }

    fn setup_restart_button(document: &Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("restartBtn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let seed = js_sys::Date::now() as u64;
                game.borrow_mut().restart(seed);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
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
mod headless {
    use std::path::PathBuf;

    use clap::Parser;
    use glam::Vec2;
    use serde::Serialize;

    use iso_runner::hud::{self, LogHud};
    use iso_runner::renderer::VertexSurface;
    use iso_runner::sim::{TickInput, World};
    use iso_runner::{Settings, Tuning};

    /// One-line JSON report printed at the end of a run
    #[derive(Debug, Serialize)]
    pub struct RunSummary {
        pub seed: u64,
        pub ticks: u64,
        pub score: u32,
        pub game_over: bool,
        pub distance: f32,
        pub last_frame_vertices: usize,
    }

    /// Headless autopilot run of Iso Runner
    #[derive(Parser, Debug)]
    #[command(name = "iso-runner", version, about, long_about = None)]
    pub struct Cli {
        /// Run seed
        #[arg(long, default_value_t = 0x1505_2024)]
        pub seed: u64,
        /// Stop after this many simulation ticks
        #[arg(long, value_name = "TICKS", default_value_t = 60 * 60)]
        pub ticks: u64,
        /// Presentation settings JSON
        #[arg(long, value_name = "PATH")]
        pub settings: Option<PathBuf>,
        /// Gameplay tuning JSON (partial overrides allowed)
        #[arg(long, value_name = "PATH")]
        pub tuning: Option<PathBuf>,
    }

    pub struct Options {
        pub seed: u64,
        pub max_ticks: u64,
        pub settings: Settings,
        pub tuning: Tuning,
    }

    impl Options {
        /// Resolve config files; unreadable or invalid ones fall back to defaults
        pub fn from_cli(cli: Cli) -> Self {
            let settings = match &cli.settings {
                Some(path) => Settings::load_from(path).unwrap_or_else(|e| {
                    log::warn!("Ignoring settings {}: {}", path.display(), e);
                    Settings::default()
                }),
                None => Settings::default(),
            };
            let tuning = match &cli.tuning {
                Some(path) => Tuning::load_from(path).unwrap_or_else(|e| {
                    log::warn!("Ignoring tuning {}: {}", path.display(), e);
                    Tuning::default()
                }),
                None => Tuning::default(),
            };

            Self {
                seed: cli.seed,
                max_ticks: cli.ticks,
                settings,
                tuning,
            }
        }
    }

    /// Play with the autopilot until game over or the tick limit
    pub fn run(options: Options) -> RunSummary {
        let mut world = World::new(options.seed, options.tuning);
        let mut surface = VertexSurface::new(Vec2::new(800.0, 600.0));
        let mut hud = LogHud::default();
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };

        while !world.is_game_over() && world.time_ticks() < options.max_ticks {
            world.tick(&input);
            world.draw(&mut surface, &options.settings);
            hud::dispatch(&world.drain_events(), &mut hud);
        }

        RunSummary {
            seed: world.seed(),
            ticks: world.time_ticks(),
            score: world.score(),
            game_over: world.is_game_over(),
            distance: world.player().z,
            last_frame_vertices: surface.vertices().len(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    env_logger::init();

    log::info!("Iso Runner (native) starting...");
    log::info!("Native mode runs a headless autopilot - run with `trunk serve` for web version");

    let cli = headless::Cli::parse();
    let options = headless::Options::from_cli(cli);
    let summary = headless::run(options);
    match serde_json::to_string(&summary) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Cannot encode run summary: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::headless::*;
    use clap::Parser;

    fn cli(list: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("iso-runner").chain(list.iter().copied()))
    }

    #[test]
    fn test_args() {
        let parsed = cli(&["--seed", "42", "--ticks", "10"]).unwrap();
        assert_eq!(parsed.seed, 42);
        assert_eq!(parsed.ticks, 10);
        assert!(parsed.settings.is_none());

        let defaults = cli(&[]).unwrap();
        assert_eq!(defaults.seed, 0x1505_2024);
        assert_eq!(defaults.ticks, 3600);
    }

    #[test]
    fn test_bad_args_are_errors() {
        assert!(cli(&["--seed", "nope"]).is_err());
        assert!(cli(&["--seed"]).is_err());
        // An unknown flag must not swallow the one after it
        assert!(cli(&["--verbose", "--seed", "42"]).is_err());
    }

    #[test]
    fn test_unreadable_config_falls_back() {
        let parsed = cli(&[
            "--seed",
            "9",
            "--settings",
            "/nonexistent/settings.json",
            "--tuning",
            "/nonexistent/tuning.json",
        ])
        .unwrap();
        let options = Options::from_cli(parsed);
        assert_eq!(options.seed, 9);
        assert_eq!(options.settings, iso_runner::Settings::default());
        assert_eq!(options.tuning, iso_runner::Tuning::default());
    }

    #[test]
    fn test_headless_run_is_bounded() {
        let summary = run(Options::from_cli(cli(&["--ticks", "300"]).unwrap()));
        assert!(summary.ticks <= 300);
        assert!(summary.last_frame_vertices > 0);
        assert_eq!(summary.distance, summary.ticks as f32 * 3.0);
    }
}
