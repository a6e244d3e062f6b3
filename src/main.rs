//! Barrel Bash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        AddEventListenerOptions, CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent,
        TouchEvent,
    };

    use barrel_bash::audio::AudioManager;
    use barrel_bash::consts::*;
    use barrel_bash::platform::{Controls, LocalStorage, TouchButton};
    use barrel_bash::renderer::{CanvasPainter, build_scene};
    use barrel_bash::sim::{GameEvent, GamePhase, GameState, tick};
    use barrel_bash::{BestScore, Settings};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        controls: Controls,
        audio: AudioManager,
        painter: CanvasPainter,
        storage: LocalStorage,
        settings: Settings,
        best: BestScore,
        /// Simulation clock, advanced in fixed steps
        sim_time_ms: f64,
        accumulator: f64,
        last_frame: Option<f64>,
        audio_unlocked: bool,
    }

    impl Game {
        /// Run simulation ticks
        fn update(&mut self, time: f64) {
            let frame_ms = match self.last_frame {
                Some(last) => (time - last).clamp(0.0, MAX_FRAME_MS),
                None => SIM_DT_MS,
            };
            self.last_frame = Some(time);
            self.accumulator += frame_ms;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT_MS && substeps < MAX_SUBSTEPS {
                self.sim_time_ms += SIM_DT_MS;
                tick(&mut self.state, self.controls.input_mut(), self.sim_time_ms);
                self.accumulator -= SIM_DT_MS;
                substeps += 1;
            }
            if substeps == MAX_SUBSTEPS {
                // Too far behind; drop the backlog instead of spiralling
                self.accumulator = self.accumulator.min(SIM_DT_MS);
            }

            for event in self.state.take_events() {
                self.on_event(&event);
            }
            self.audio.update(time);
        }

        fn on_event(&mut self, event: &GameEvent) {
            log::debug!("{:?}", event);
            self.audio.handle(event);
            if let GameEvent::GameReset { best_score } = *event
                && self.best.record(best_score)
            {
                self.best.save(&mut self.storage);
                log::info!("New best score: {}", best_score);
            }
        }

        fn render(&self) {
            let scene = build_scene(&self.state.snapshot(), &self.settings);
            self.painter.paint(&scene);
        }

        /// First key press or touch: browsers only allow audio after a gesture
        fn unlock_audio(&mut self) {
            if !self.audio_unlocked {
                self.audio.unlock();
                self.audio_unlocked = true;
            }
        }

        fn toggle_mute(&mut self) {
            self.settings.toggle_mute();
            self.settings.save(&mut self.storage);
            self.audio.apply_settings(&self.settings);
            log::info!("Muted: {}", self.settings.muted);
        }

        /// Focus lost: held keys will never see their key-up
        fn suspend(&mut self, reason: &str) {
            self.controls.release_all();
            if self.state.phase == GamePhase::Playing {
                self.controls.request_pause();
                log::info!("Auto-paused ({})", reason);
            }
        }
    }

    fn fit_canvas(canvas: &HtmlCanvasElement, painter: Option<&CanvasPainter>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        match painter {
            Some(p) => p.resize(width.max(1), height.max(1)),
            None => {
                canvas.set_width(width.max(1));
                canvas.set_height(height.max(1));
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Barrel Bash starting...");

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
        fit_canvas(&canvas, None);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let storage = LocalStorage::open();
        let best = BestScore::load(&storage);
        let settings = Settings::load(&storage);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game {
            state: GameState::new(seed, best.0),
            controls: Controls::new(),
            audio: AudioManager::new(&settings),
            painter: CanvasPainter::new(canvas.clone(), ctx),
            storage,
            settings,
            best,
            sim_time_ms: 0.0,
            accumulator: 0.0,
            last_frame: None,
            audio_unlocked: false,
        }));

        log::info!("Game initialized with seed: {} (best {})", seed, best.0);

        setup_input_handlers(game.clone());
        setup_auto_pause(game.clone());
        setup_resize(&canvas, game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Barrel Bash running!");
        Ok(())
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Keydown
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                g.unlock_audio();
                let now = g.sim_time_ms;
                if g.controls.key_down(&event.code(), event.repeat(), now) {
                    event.prevent_default();
                }
                if g.controls.take_mute() {
                    g.toggle_mute();
                }
            });
            let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyup
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().controls.key_up(&event.code()) {
                    event.prevent_default();
                }
            });
            let _ = window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        let Some(document) = window.document() else {
            return;
        };

        // On-screen buttons; non-passive so the page does not scroll or zoom
        let opts = AddEventListenerOptions::new();
        opts.set_passive(false);
        for button in TouchButton::ALL {
            let Some(el) = document.get_element_by_id(button.element_id()) else {
                continue;
            };
            for (kind, down) in [("touchstart", true), ("touchend", false), ("touchcancel", false)] {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                    event.prevent_default();
                    let mut g = game.borrow_mut();
                    if down {
                        g.unlock_audio();
                    }
                    let now = g.sim_time_ms;
                    g.controls.touch(button, down, now);
                });
                let _ = el.add_event_listener_with_callback_and_add_event_listener_options(
                    kind,
                    closure.as_ref().unchecked_ref(),
                    &opts,
                );
                closure.forget();
            }
        }

        // A touch anywhere also unlocks audio
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                game.borrow_mut().unlock_audio();
            });
            let _ = document.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
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
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();
        }

        request_animation_frame(game);
    }

    fn setup_resize(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            fit_canvas(&canvas, Some(&game.borrow().painter));
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    game.borrow_mut().suspend("tab hidden");
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
                game.borrow_mut().suspend("window blur");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

/// Headless run: a scripted player drives the simulation at the fixed rate
///
/// Usage: `barrel-bash [ticks] [seed] [tuning.json]`
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use barrel_bash::consts::SIM_DT_MS;
    use barrel_bash::platform::{Controls, KeyValueStore, MemoryStore};
    use barrel_bash::sim::{GameEvent, GameState, tick};
    use barrel_bash::{BestScore, Tuning};

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let ticks: u64 = args.next().and_then(|a| a.parse().ok()).unwrap_or(600);
    let seed: u64 = args.next().and_then(|a| a.parse().ok()).unwrap_or(1);
    // Optional tuning document; unreadable or invalid files fall back to defaults
    let tuning = match args.next() {
        Some(path) => match std::fs::read_to_string(&path).map(|json| Tuning::from_json(&json)) {
            Ok(Ok(tuning)) => {
                log::info!("Tuning loaded from {}", path);
                tuning
            }
            Ok(Err(e)) => {
                log::warn!("Invalid tuning in {}: {}", path, e);
                Tuning::default()
            }
            Err(e) => {
                log::warn!("Failed to read {}: {}", path, e);
                Tuning::default()
            }
        },
        None => Tuning::default(),
    };

    log::info!("Barrel Bash (native) starting: {} ticks, seed {}", ticks, seed);

    let mut storage = MemoryStore::new();
    let mut best = BestScore::load(&storage);
    let mut state = GameState::with_tuning(seed, best.0, tuning);
    let mut controls = Controls::new();
    controls.key_down("ArrowRight", false, 0.0);

    let mut now = 0.0;
    for i in 0..ticks {
        now += SIM_DT_MS;
        // Hop every 40 ticks to clear what rolls by
        if i % 40 == 0 {
            controls.key_down("Space", false, now);
        }
        tick(&mut state, controls.input_mut(), now);
        for event in state.take_events() {
            log::info!("t={:>6.0}ms {:?}", now, event);
            if let GameEvent::GameReset { best_score } = event
                && best.record(best_score)
            {
                best.save(&mut storage);
            }
        }
    }

    log::info!(
        "Finished: level {} score {} lives {} best {}",
        state.level,
        state.score,
        state.lives,
        storage.get(BestScore::STORAGE_KEY).unwrap_or_default()
    );

    match state.snapshot().to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Snapshot serialization failed: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
