//! Slice Hop entry point
//!
//! Handles platform-specific initialization and runs the game loop.

use slice_hop::sim::{FrameEvent, WorldState};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent, WheelEvent, Window};

    use slice_hop::consts::*;
    use slice_hop::renderer::{RenderState, build_scene, shapes};
    use slice_hop::sim::{WorldState, tick};
    use slice_hop::{InputState, Settings};

    /// Game instance holding all state
    struct Game {
        state: WorldState,
        settings: Settings,
        render_state: Option<RenderState>,
        input: InputState,
        accumulator: f32,
        last_time: f64,
        /// Canvas size in CSS pixels
        viewport: Vec2,
    }

    impl Game {
        fn new(settings: Settings, viewport: Vec2, seed: u64) -> Self {
            Self {
                state: WorldState::new(settings.level, seed, viewport, settings.tuning),
                settings,
                render_state: None,
                input: InputState::new(),
                accumulator: 0.0,
                last_time: 0.0,
                viewport,
            }
        }

        /// Run simulation steps
        fn update(&mut self, dt: f32) {
            let dt = dt.min(MAX_FRAME_DT);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input.frame_input();
                let events = tick(&mut self.state, &input);
                super::log_events(&self.state, &events);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.clear_one_shots();
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let scene = build_scene(&self.state, self.viewport, &self.settings);
            let vertices = shapes::scene_vertices(&scene);

            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        render_state.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update the status line in the DOM
        fn update_hud(&self, document: &Document) {
            if let Some(el) = document.get_element_by_id("status") {
                if self.settings.show_status {
                    el.set_text_content(Some(&self.state.status_line()));
                    let _ = el.set_attribute("class", "");
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }

        /// Match the canvas to the window
        fn resize(&mut self, window: &Window, canvas: &HtmlCanvasElement) {
            let (viewport, width, height) = fit_canvas(window, canvas);
            self.viewport = viewport;
            if let Some(ref mut render_state) = self.render_state {
                render_state.resize(width, height, viewport);
            }
            log::info!(
                "Resized to {}x{} ({}x{} device px)",
                viewport.x,
                viewport.y,
                width,
                height
            );
        }
    }

    /// Size the canvas to the window; returns CSS size and device-pixel size
    fn fit_canvas(window: &Window, canvas: &HtmlCanvasElement) -> (Vec2, u32, u32) {
        let dpr = window.device_pixel_ratio();
        let css_w = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(canvas.client_width() as f64);
        let css_h = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(canvas.client_height() as f64);

        let width = (css_w * dpr).max(1.0) as u32;
        let height = (css_h * dpr).max(1.0) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        (Vec2::new(css_w as f32, css_h as f32), width, height)
    }

    fn js_err(context: &str, e: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&format!("{context}: {e}"))
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| js_err("Failed to init logger", e))?;

        log::info!("Slice Hop starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let (viewport, width, height) = fit_canvas(&window, &canvas);

        let settings = Settings::load();
        settings.save();
        let seed = settings.level_seed(js_sys::Date::now());
        let game = Rc::new(RefCell::new(Game::new(settings, viewport, seed)));

        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU, falling back to WebGL
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| js_err("Failed to create surface", e))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| js_err("Failed to get adapter", e))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, viewport)
            .await
            .map_err(|e| js_err("Failed to create device", e))?;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&window, game.clone());
        setup_reset_button(&document, game.clone());
        setup_resize(&window, &canvas, game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Slice Hop running!");
        Ok(())
    }

    fn setup_input_handlers(window: &Window, game: Rc<RefCell<Game>>) {
        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                if InputState::is_game_key(&key) {
                    // Space and arrows would scroll the page
                    event.prevent_default();
                }
                game.borrow_mut().input.key_down(&key);
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

        // Wheel shifts the target slice
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: WheelEvent| {
                game.borrow_mut().input.wheel(event.delta_y());
            });
            let _ =
                window.add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur: keyup events will not arrive while unfocused
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().input.release_all();
                log::info!("Released held keys (window blur)");
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_reset_button(document: &Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("reset-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.request_reset();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        } else {
            log::warn!("No #reset-btn element; reset is unavailable");
        }
    }

    fn setup_resize(window: &Window, canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if let Some(window) = web_sys::window() {
                game.borrow_mut().resize(&window, &canvas);
            }
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

            g.update(dt);
            g.render();
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document);
            }
        }

        request_animation_frame(game);
    }
}

/// Log the noteworthy events of one step
fn log_events(state: &WorldState, events: &[FrameEvent]) {
    for event in events {
        match event {
            FrameEvent::SliceTargeted(z) => log::debug!("Target slice {}", z),
            FrameEvent::Reset => log::info!("World reset"),
            FrameEvent::ItemCollected(index) => log::info!(
                "Collected item {} ({}/{})",
                index,
                state.collected_count(),
                state.items.len()
            ),
            FrameEvent::Respawned => log::info!("Fell out of the world, respawning"),
            FrameEvent::Jumped | FrameEvent::Landed => {}
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use glam::Vec2;
    use slice_hop::input::InputState;
    use slice_hop::settings::Settings;
    use slice_hop::sim::tick;

    env_logger::init();
    log::info!("Slice Hop (native) starting...");
    log::info!("Native mode runs headless - run with `trunk serve` for the web version");

    let settings = Settings::load();
    let viewport = Vec2::new(1280.0, 720.0);
    let seed = settings.level_seed(0.0);
    let mut state = WorldState::new(settings.level, seed, viewport, settings.tuning);
    let mut input = InputState::new();

    // Scripted run: walk right, hop every second, dive one slice every two seconds
    for frame in 0..1200u32 {
        if frame == 0 {
            input.key_down("ArrowRight");
        }
        if frame % 60 == 0 {
            input.key_down(" ");
        } else if frame % 60 == 10 {
            input.key_up(" ");
        }
        if frame % 120 == 119 {
            input.wheel(1.0);
        }

        let events = tick(&mut state, &input.frame_input());
        input.clear_one_shots();
        log_events(&state, &events);
    }

    log::info!("{}", state.status_line());
    println!("{}", state.status_line());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
