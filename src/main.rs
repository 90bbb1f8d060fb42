//! Pocket Universe entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent};

    use pocket_universe::audio::AudioManager;
    use pocket_universe::consts::*;
    use pocket_universe::renderer::{RenderState, Vertex, background_color, build_scene};
    use pocket_universe::sim::{TickInput, UniverseState, tick};
    use pocket_universe::{FactDeck, QualityPreset, Settings};

    /// App instance holding all state
    struct App {
        state: UniverseState,
        render_state: Option<RenderState>,
        settings: Settings,
        audio: AudioManager,
        facts: FactDeck,
        fact_rng: Pcg32,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        vertices: Vec<Vertex>,
    }

    impl App {
        fn new(seed: u64, width: f32, height: f32) -> Self {
            let mut settings = Settings::load();
            if let Some(quality) = query_quality() {
                settings.quality = quality;
            }
            log::info!("Quality preset: {}", settings.quality.as_str());
            let mut state = UniverseState::new(seed, width, height);
            settings.apply_to(&mut state);

            let mut audio = AudioManager::new();
            audio.set_volume(settings.volume());

            let facts = FactDeck::bundled().unwrap_or_else(|e| {
                log::warn!("Fact deck unreadable: {}", e);
                FactDeck::default()
            });

            Self {
                state,
                render_state: None,
                settings,
                audio,
                facts,
                fact_rng: Pcg32::seed_from_u64(seed ^ 0x5eed),
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                vertices: Vec::with_capacity(16 * 1024),
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                tick(&mut self.state, &self.input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // One-shot inputs apply to the first substep only
                self.input.clear();
            }

            let events = self.state.drain_events();
            if !events.is_empty() {
                self.audio.play_events(&events);
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };

            self.vertices.clear();
            build_scene(&self.state, &self.settings, &mut self.vertices);
            let view = (self.state.width, self.state.height);

            match render_state.render(&self.vertices, view, background_color(&self.state)) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    render_state.resize(render_state.size.0, render_state.size.1);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        fn toggle_mute(&mut self) {
            self.settings.muted = !self.settings.muted;
            self.audio.set_volume(self.settings.volume());
            self.settings.save();
            update_mute_label(self.settings.muted);
            log::info!("Muted: {}", self.settings.muted);
        }

        fn show_fact(&mut self) {
            let Some(fact) = self.facts.draw(&mut self.fact_rng) else {
                return;
            };
            if let Some(el) = document().and_then(|d| d.get_element_by_id("fact-text")) {
                el.set_text_content(Some(fact));
            }
        }
    }

    /// `?quality=` override from the page URL
    fn query_quality() -> Option<QualityPreset> {
        let search = web_sys::window()?.location().search().ok()?;
        QualityPreset::from_query(&search)
    }

    fn document() -> Option<web_sys::Document> {
        web_sys::window().and_then(|w| w.document())
    }

    /// Viewport size in CSS pixels
    fn viewport_size(window: &web_sys::Window) -> (f32, f32) {
        let w = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(800.0);
        let h = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(600.0);
        (w as f32, h as f32)
    }

    /// Size the canvas backing store for the device pixel ratio
    fn size_canvas(window: &web_sys::Window, canvas: &HtmlCanvasElement) -> (f32, f32, u32, u32) {
        let (css_w, css_h) = viewport_size(window);
        let dpr = window.device_pixel_ratio();
        let width = ((css_w as f64 * dpr) as u32).max(1);
        let height = ((css_h as f64 * dpr) as u32).max(1);
        canvas.set_width(width);
        canvas.set_height(height);
        (css_w, css_h, width, height)
    }

    fn update_mute_label(muted: bool) {
        if let Some(btn) = document().and_then(|d| d.get_element_by_id("mute-btn")) {
            btn.set_text_content(Some(if muted { "Unmute" } else { "Mute" }));
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Pocket Universe starting...");

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

        let Some(canvas) = document
            .get_element_by_id("universe")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #universe canvas");
            return;
        };

        let (css_w, css_h, width, height) = size_canvas(&window, &canvas);

        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App::new(seed, css_w, css_h)));
        log::info!("Universe initialized with seed: {}", seed);

        // WebGPU first, WebGL2 as fallback
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let render_state = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => RenderState::new(&instance, surface, width, height).await,
            Err(e) => Err(e.into()),
        };
        match render_state {
            Ok(rs) => app.borrow_mut().render_state = Some(rs),
            Err(e) => log::error!("Rendering disabled: {}", e),
        }

        update_mute_label(app.borrow().settings.muted);

        setup_canvas_handlers(&canvas, app.clone());
        setup_buttons(&document, app.clone());
        setup_keyboard(&window, app.clone());
        setup_resize(&window, &canvas, app.clone());

        request_animation_frame(app);

        log::info!("Pocket Universe running!");
    }

    fn setup_canvas_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let mut a = app.borrow_mut();
            // Browsers only let audio start after a gesture
            a.audio.resume();
            let pos = Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
            a.input.spawn.push(pos);
        });
        let _ = canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(document: &web_sys::Document, app: Rc<RefCell<App>>) {
        if let Some(btn) = document.get_element_by_id("reset-btn") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut a = app.borrow_mut();
                a.audio.resume();
                a.input.reset = true;
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("fact-btn") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().show_fact();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("mute-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut a = app.borrow_mut();
                a.audio.resume();
                a.toggle_mute();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_keyboard(window: &web_sys::Window, app: Rc<RefCell<App>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let mut a = app.borrow_mut();
            // Key presses count as a gesture for unlocking audio too
            a.audio.resume();
            match event.key().as_str() {
                "r" | "R" => a.input.reset = true,
                "m" | "M" => a.toggle_mute(),
                "f" | "F" => a.show_fact(),
                _ => {}
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize(window: &web_sys::Window, canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let (css_w, css_h, width, height) = size_canvas(&window, &canvas);
            let mut a = app.borrow_mut();
            a.input.resize = Some((css_w, css_h));
            if let Some(rs) = a.render_state.as_mut() {
                rs.resize(width, height);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            frame(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();

            let dt = if a.last_time > 0.0 {
                ((time - a.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            a.last_time = time;

            a.update(dt);
            a.render();
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_app::run().await;
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless run: seed a universe, let it merge, then reset it
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use glam::Vec2;
    use pocket_universe::sim::{ResetPhase, TickInput, UniverseState, tick};
    use pocket_universe::{FactDeck, Settings, consts::SIM_DT};
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(42u64);
    log::info!("Pocket Universe (headless) seed {}", seed);

    let mut state = UniverseState::new(seed, 1280.0, 720.0);
    Settings::default().apply_to(&mut state);

    // Scatter a ring of planets around the center star
    let mut rng = Pcg32::seed_from_u64(seed);
    let center = state.center();
    let mut input = TickInput::default();
    for _ in 0..24 {
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let dist = rng.random_range(120.0..320.0);
        input.spawn.push(center + Vec2::from_angle(angle) * dist);
    }

    for _ in 0..600 {
        tick(&mut state, &input, SIM_DT);
        input.clear();
    }
    let before = state.snapshot();

    input.reset = true;
    let mut ticks = 0;
    loop {
        tick(&mut state, &input, SIM_DT);
        input.clear();
        ticks += 1;
        if state.black_hole.phase == ResetPhase::Idle || ticks > 10_000 {
            break;
        }
    }
    log::info!("Reset finished after {} ticks", ticks);
    let after = state.snapshot();

    match (serde_json::to_string_pretty(&before), serde_json::to_string_pretty(&after)) {
        (Ok(b), Ok(a)) => println!("before reset:\n{}\nafter reset:\n{}", b, a),
        (Err(e), _) | (_, Err(e)) => log::error!("Snapshot serialization failed: {}", e),
    }

    let mut fact_rng = Pcg32::seed_from_u64(seed);
    match FactDeck::bundled() {
        Ok(mut deck) => {
            if let Some(fact) = deck.draw(&mut fact_rng) {
                println!("\nDid you know? {}", fact);
            }
        }
        Err(e) => log::warn!("Fact deck unreadable: {}", e),
    }
}
