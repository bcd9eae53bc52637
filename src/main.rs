//! Can Dash entry point
//!
//! Browser: wires the DOM to the controller and drives its clock from
//! `requestAnimationFrame`. Native: runs a headless demo round with the bot.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlSelectElement};

    use can_dash::cell_index;
    use can_dash::platform::DomRenderer;
    use can_dash::sim::{GameController, SeededRandom};
    use can_dash::Tuning;

    /// Game instance holding all state
    struct Game {
        controller: GameController<DomRenderer, SeededRandom>,
    }

    impl Game {
        /// Bring the controller clock up to date before handling input
        fn sync_clock(&mut self) {
            self.controller.advance_to(performance_now());
        }
    }

    fn performance_now() -> u64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0) as u64
    }

    /// Optional `<script id="tuning" type="application/json">` override
    fn load_tuning(document: &Document) -> Tuning {
        match document
            .get_element_by_id("tuning")
            .and_then(|el| el.text_content())
        {
            Some(json) if !json.trim().is_empty() => Tuning::from_json_or_default(&json),
            _ => Tuning::default(),
        }
    }

    fn selected_difficulty(document: &Document) -> Option<String> {
        document
            .get_element_by_id("difficulty")?
            .dyn_into::<HtmlSelectElement>()
            .ok()
            .map(|select| select.value())
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Can Dash starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let Some(renderer) = DomRenderer::new(&document) else {
            log::error!("No #grid element, nothing to play on");
            return;
        };

        let rng = SeededRandom::new(js_sys::Date::now() as u64);
        log::info!("Game initialized with seed: {}", rng.seed());
        let tuning = load_tuning(&document);
        let mut controller = GameController::new(tuning, renderer, rng);
        controller.advance_to(performance_now());
        let game = Rc::new(RefCell::new(Game { controller }));

        setup_cell_handlers(game.clone());
        setup_buttons(&document, game.clone());
        setup_keyboard(game.clone());

        request_animation_frame(game);
    }

    fn setup_cell_handlers(game: Rc<RefCell<Game>>) {
        let cells = game.borrow().controller.renderer().cells().to_vec();
        for (index, cell) in cells.iter().enumerate() {
            let game = game.clone();
            // Listener on the whole cell: clicks anywhere inside count
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                g.sync_clock();
                g.controller.on_cell_clicked(index);
            });
            let _ = cell.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("start-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                    return;
                };
                let selection = selected_difficulty(&document);
                let mut g = game.borrow_mut();
                g.sync_clock();
                g.controller.on_start_requested(selection.as_deref());
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        } else {
            log::warn!("Missing #start-btn");
        }

        if let Some(btn) = document.get_element_by_id("reset-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                g.sync_clock();
                g.controller.on_reset_requested();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        } else {
            log::warn!("Missing #reset-btn");
        }
    }

    /// Number keys hit cells in numpad layout (7-8-9 is the top row),
    /// Enter starts, Escape resets, M toggles sound
    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let key = event.key();
            let mut g = game.borrow_mut();
            g.sync_clock();
            match key.as_str() {
                "Enter" => {
                    // A focused button would otherwise also see this as a click
                    event.prevent_default();
                    let selection = web_sys::window()
                        .and_then(|w| w.document())
                        .and_then(|d| selected_difficulty(&d));
                    g.controller.on_start_requested(selection.as_deref());
                }
                "Escape" => g.controller.on_reset_requested(),
                "m" | "M" => {
                    let muted = g.controller.renderer_mut().audio_mut().toggle_muted();
                    log::info!("Sound {}", if muted { "off" } else { "on" });
                }
                digit => {
                    if let Some(n) = digit.parse::<usize>().ok().filter(|n| (1..=9).contains(n)) {
                        let row = 2 - (n - 1) / 3;
                        let col = (n - 1) % 3;
                        if let Some(index) = cell_index(row, col) {
                            g.controller.on_cell_clicked(index);
                        }
                    }
                }
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
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
        game.borrow_mut().controller.advance_to(time as u64);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless demo: `can-dash [easy|normal|hard] [seed] [reaction_ms]`
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use can_dash::platform::LogRenderer;
    use can_dash::sim::{AutoPlayer, GameController, SeededRandom, play_round};
    use can_dash::{Difficulty, Tuning};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let difficulty = Difficulty::from_selection(args.first().map(String::as_str));
    let rng = SeededRandom::new(args.get(1).and_then(|s| s.parse().ok()).unwrap_or(2024));
    let reaction_ms = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(350);

    log::info!(
        "Can Dash (native) demo on {} with seed {} and {}ms reactions",
        difficulty.as_str(),
        rng.seed(),
        reaction_ms
    );

    let mut game = GameController::new(Tuning::default(), LogRenderer::new(), rng);
    let mut bot = AutoPlayer::new(reaction_ms);
    match play_round(&mut game, difficulty, &mut bot, 50) {
        Some(summary) => match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Failed to encode summary: {}", e),
        },
        None => log::error!("Round did not start"),
    }
}
