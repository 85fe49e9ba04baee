//! Harrytur entry point
//!
//! Wires the pure simulation to the host: a canvas 2d drawing surface, DOM
//! key and button listeners, and a fixed-rate interval ticker on the web;
//! a headless smoke run on native.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::f32::consts::TAU;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, HtmlAudioElement, HtmlCanvasElement,
        HtmlImageElement, KeyboardEvent, MouseEvent,
    };

    use harrytur::config::GameConfig;
    use harrytur::input::{InputSnapshot, Key};
    use harrytur::render::{AssetSource, AudioHandle, Color, ImageAsset, Surface, scenes};
    use harrytur::sim::{Command, GameEvent, GameState, tick};

    /// A sprite backed by an `<img>` element. Loading is asynchronous; the
    /// simulation only ever polls readiness.
    pub struct SpriteImage {
        el: HtmlImageElement,
    }

    impl SpriteImage {
        fn load(src: &str) -> Result<Self, JsValue> {
            let el = HtmlImageElement::new()?;
            el.set_src(src);
            Ok(Self { el })
        }
    }

    impl ImageAsset for SpriteImage {
        fn is_ready(&self) -> bool {
            self.el.complete() && self.el.natural_width() > 0
        }
    }

    /// Collect chime backed by an `<audio>` element.
    struct Chime {
        el: HtmlAudioElement,
    }

    impl AudioHandle for Chime {
        fn play(&self) {
            self.el.set_current_time(0.0);
            let _ = self.el.play();
        }
    }

    /// Sprites and sounds for the session. Missing files simply never become
    /// ready and the painters keep drawing fallback shapes.
    struct GameAssets {
        products: Vec<SpriteImage>,
        cart: Option<SpriteImage>,
        chime: Option<Chime>,
    }

    impl GameAssets {
        fn load(config: &GameConfig, document: &Document) -> Self {
            let variant_count = config.score_table.variant_count() as usize;
            let products = (0..variant_count)
                .filter_map(|v| SpriteImage::load(&format!("assets/product{v}.png")).ok())
                .collect();
            let cart = SpriteImage::load("assets/cart.png").ok();
            let chime = document
                .get_element_by_id("collect-sound")
                .and_then(|el| el.dyn_into::<HtmlAudioElement>().ok())
                .map(|el| Chime { el });
            Self { products, cart, chime }
        }
    }

    impl AssetSource<SpriteImage> for GameAssets {
        fn product_sprite(&self, variant: u8) -> Option<&SpriteImage> {
            self.products.get(variant as usize)
        }

        fn cart_sprite(&self) -> Option<&SpriteImage> {
            self.cart.as_ref()
        }
    }

    /// Canvas 2d backend for the drawing surface.
    pub struct CanvasSurface {
        ctx: CanvasRenderingContext2d,
        width: f32,
        height: f32,
    }

    impl Surface for CanvasSurface {
        type Image = SpriteImage;

        fn width(&self) -> f32 {
            self.width
        }

        fn height(&self) -> f32 {
            self.height
        }

        fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
            self.ctx.set_fill_style_str(&color.css());
            self.ctx.fill_rect(x as f64, y as f64, w as f64, h as f64);
        }

        fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color) {
            self.ctx.set_fill_style_str(&color.css());
            self.ctx.begin_path();
            let _ = self
                .ctx
                .arc(cx as f64, cy as f64, radius as f64, 0.0, TAU as f64);
            self.ctx.fill();
        }

        fn fill_arc(&mut self, cx: f32, cy: f32, radius: f32, start: f32, end: f32, color: Color) {
            self.ctx.set_fill_style_str(&color.css());
            self.ctx.begin_path();
            self.ctx.move_to(cx as f64, cy as f64);
            let _ = self.ctx.arc(
                cx as f64,
                cy as f64,
                radius as f64,
                start as f64,
                end as f64,
            );
            self.ctx.close_path();
            self.ctx.fill();
        }

        fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Color) {
            self.ctx.set_stroke_style_str(&color.css());
            self.ctx.begin_path();
            self.ctx.move_to(from.x as f64, from.y as f64);
            self.ctx.line_to(to.x as f64, to.y as f64);
            self.ctx.stroke();
        }

        fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
            let Some(first) = points.first() else {
                return;
            };
            self.ctx.set_fill_style_str(&color.css());
            self.ctx.begin_path();
            self.ctx.move_to(first.x as f64, first.y as f64);
            for p in &points[1..] {
                self.ctx.line_to(p.x as f64, p.y as f64);
            }
            self.ctx.close_path();
            self.ctx.fill();
        }

        fn text(&mut self, s: &str, x: f32, y: f32, size_px: f32, color: Color) {
            self.ctx.set_fill_style_str(&color.css());
            self.ctx.set_font(&format!("{size_px}px sans-serif"));
            let _ = self.ctx.fill_text(s, x as f64, y as f64);
        }

        fn draw_image(&mut self, image: &SpriteImage, x: f32, y: f32, w: f32, h: f32, mirrored: bool) {
            if !image.is_ready() {
                return;
            }
            if mirrored {
                self.ctx.save();
                let _ = self.ctx.translate((x + w) as f64, y as f64);
                let _ = self.ctx.scale(-1.0, 1.0);
                let _ = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                    &image.el, 0.0, 0.0, w as f64, h as f64,
                );
                self.ctx.restore();
            } else {
                let _ = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                    &image.el,
                    x as f64,
                    y as f64,
                    w as f64,
                    h as f64,
                );
            }
        }
    }

    /// Everything the tick closure needs behind one RefCell.
    struct Game {
        config: GameConfig,
        state: GameState,
        snapshot: InputSnapshot,
        /// Command queued by a button click, consumed by the next tick
        pending: Option<Command>,
        /// Logical tick counter; also the re-entrancy guard seq
        seq: u64,
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        // Missing canvas is fatal; nothing can run without a surface.
        let canvas = document
            .get_element_by_id("game")
            .ok_or_else(|| JsValue::from_str("missing #game canvas"))?
            .dyn_into::<HtmlCanvasElement>()?;

        let config = GameConfig::load();
        canvas.set_width(config.surface_width as u32);
        canvas.set_height(config.surface_height as u32);

        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let mut surface = CanvasSurface {
            ctx,
            width: config.surface_width,
            height: config.surface_height,
        };

        let assets = GameAssets::load(&config, &document);
        let seed = js_sys::Date::now() as u64;
        log::info!("Session seed: {seed}");

        let game = Rc::new(RefCell::new(Game {
            state: GameState::new(seed, &config),
            config,
            snapshot: InputSnapshot::new(),
            pending: None,
            seq: 0,
        }));

        setup_key_listeners(&window, game.clone());
        for (id, command) in [
            ("start-btn", Command::Start),
            ("toll-btn", Command::PayToll),
            ("evade-btn", Command::AttemptEvasion),
            ("restart-btn", Command::Restart),
        ] {
            hook_button(&document, id, game.clone(), command);
        }

        // Fixed-rate ticker; seq makes a double-fired callback harmless.
        let interval_ms;
        {
            let g = game.borrow();
            interval_ms = (1000.0 / g.config.tick_rate).round() as i32;
        }
        let tick_document = document.clone();
        let tick_closure = Closure::<dyn FnMut()>::new(move || {
            let mut g = game.borrow_mut();
            let command = g.pending.take();
            let input = g.snapshot.tick_input(g.seq, command);
            g.seq += 1;

            let dt = g.config.dt();
            let Game { config, state, .. } = &mut *g;
            tick(state, config, &input, dt);

            for event in &state.events {
                if let GameEvent::ProductCollected { .. } = event {
                    if let Some(chime) = &assets.chime {
                        chime.play();
                    }
                }
            }

            scenes::draw(&mut surface, state, &assets);
            update_hud(&tick_document, state);
        });
        window.set_interval_with_callback_and_timeout_and_arguments_0(
            tick_closure.as_ref().unchecked_ref(),
            interval_ms,
        )?;
        tick_closure.forget();

        Ok(())
    }

    fn setup_key_listeners(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                // Unrecognized keys fall through untouched.
                if let Some(key) = Key::from_code(&event.code()) {
                    game.borrow_mut().snapshot.press(key);
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_code(&event.code()) {
                    game.borrow_mut().snapshot.release(key);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            // Drop held keys on focus loss so nothing sticks.
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().snapshot.clear();
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn hook_button(document: &Document, id: &str, game: Rc<RefCell<Game>>, command: Command) {
        let Some(btn) = document.get_element_by_id(id) else {
            log::warn!("Button #{id} not found; {command:?} unavailable");
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            game.borrow_mut().pending = Some(command);
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Report score and outcome category back to the host controls.
    fn update_hud(document: &Document, state: &GameState) {
        use harrytur::sim::{OutcomeState, Scene};

        if let Some(el) = document.get_element_by_id("hud-score") {
            el.set_text_content(Some(&state.score.to_string()));
        }
        if let Some(el) = document.get_element_by_id("hud-outcome") {
            let label = state.outcome().map(|o| o.label()).unwrap_or("");
            el.set_text_content(Some(label));
        }

        // Show exactly the controls the scene accepts.
        set_visible(document, "start-btn", state.scene == Scene::Start);
        let choosing = state.scene == Scene::Outcome(OutcomeState::Choosing);
        set_visible(document, "toll-btn", choosing);
        set_visible(document, "evade-btn", choosing);
        set_visible(
            document,
            "restart-btn",
            matches!(state.scene, Scene::Finish { .. }),
        );
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use harrytur::config::GameConfig;
    use harrytur::sim::{Command, Scene, TickInput, tick};

    env_logger::init();
    log::info!("Harrytur (native) starting...");
    log::info!("Native mode is a headless smoke run - serve the web build for the real game");

    let config = GameConfig::default();
    let mut state = harrytur::sim::GameState::new(0xBADC0FFE, &config);
    let mut seq = 0u64;
    let mut step = |state: &mut harrytur::sim::GameState, command: Option<Command>| {
        let input = TickInput {
            seq,
            move_left: seq % 120 < 60, // sweep the cart back and forth
            move_right: seq % 120 >= 60,
            command,
        };
        tick(state, &config, &input, config.dt());
        seq += 1;
    };

    step(&mut state, Some(Command::Start));
    while state.scene == Scene::Playing {
        step(&mut state, None);
    }
    println!("Round over with {} points", state.score);

    step(&mut state, Some(Command::PayToll));
    while !matches!(state.scene, Scene::Finish { .. }) {
        step(&mut state, None);
    }
    println!(
        "Crossed the border: {} ({} points kept)",
        state.outcome().map(|o| o.label()).unwrap_or("?"),
        state.score
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
