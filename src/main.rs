//! Canvas Arcade entry point
//!
//! In the browser, mounts one game on the `#game` canvas and drives it from
//! `requestAnimationFrame`. Natively, runs a headless attract mode.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{Event, KeyboardEvent};

    use canvas_arcade::app::{Arcade, PongGame, ShooterGame, SnakeGame};
    use canvas_arcade::consts::*;
    use canvas_arcade::persistence::{KeyValueStore, MemoryStore};
    use canvas_arcade::platform::ResizeDebounce;
    use canvas_arcade::platform::input::normalize_key;
    use canvas_arcade::platform::web::{self, CanvasPainter, ListenerHandle, LocalStore};
    use canvas_arcade::sim::{PongEvent, ShooterEvent, SnakeEvent};
    use canvas_arcade::{ArcadeError, GameKind, Tuning};

    struct Runner {
        kind: GameKind,
        game: Box<dyn Arcade>,
        painter: CanvasPainter,
        debounce: ResizeDebounce,
    }

    /// A mounted game: its frame loop and its DOM listeners
    struct Session {
        runner: Rc<RefCell<Runner>>,
        frame_id: Rc<Cell<Option<i32>>>,
        stopped: Rc<Cell<bool>>,
        _listeners: Vec<ListenerHandle>,
    }

    impl Session {
        /// Cancel the pending frame and halt the game; listeners are removed
        /// when the session drops
        fn stop(self) {
            self.stopped.set(true);
            if let (Some(id), Ok(window)) = (self.frame_id.take(), web::window()) {
                let _ = window.cancel_animation_frame(id);
            }
            self.runner.borrow_mut().game.stop();
            log::info!("Game stopped");
        }
    }

    thread_local! {
        static SESSION: RefCell<Option<Session>> = const { RefCell::new(None) };
    }

    /// Stop the running game (used when the page swaps games or reloads modules)
    #[wasm_bindgen]
    pub fn stop_game() {
        SESSION.with(|s| {
            if let Some(session) = s.borrow_mut().take() {
                session.stop();
            }
        });
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = web::document().ok().and_then(|d| d.get_element_by_id(id)) {
            el.set_text_content(Some(text));
        }
    }

    /// Add or remove the `hidden` class
    fn set_hidden(id: &str, hidden: bool) {
        let Some(el) = web::document().ok().and_then(|d| d.get_element_by_id(id)) else {
            return;
        };
        let class = el.get_attribute("class").unwrap_or_default();
        let mut classes: Vec<&str> = class.split_whitespace().filter(|c| *c != "hidden").collect();
        if hidden {
            classes.push("hidden");
        }
        let _ = el.set_attribute("class", &classes.join(" "));
    }

    /// Game named by the URL hash, else the canvas's `data-game`, else pong
    fn pick_kind(painter: &CanvasPainter) -> GameKind {
        let hash = web::window()
            .ok()
            .and_then(|w| w.location().hash().ok())
            .filter(|h| h.len() > 1);
        let name = hash.or_else(|| painter.canvas().get_attribute("data-game"));
        match name.map(|n| GameKind::parse(&n)) {
            Some(Ok(kind)) => kind,
            Some(Err(e)) => {
                log::warn!("{}, falling back to pong", e);
                GameKind::Pong
            }
            None => GameKind::Pong,
        }
    }

    /// Logical surface size for the current layout
    fn surface_size(kind: GameKind, painter: &CanvasPainter) -> (f32, f32) {
        match kind {
            GameKind::Pong => PONG_SURFACE,
            GameKind::Snake => {
                let rect = painter
                    .canvas()
                    .parent_element()
                    .map(|p| p.get_bounding_client_rect());
                let side = rect
                    .map(|r| r.width().min(r.height()).min(640.0) as f32)
                    .filter(|s| *s > 0.0)
                    .unwrap_or(SNAKE_SURFACE.0);
                (side, side)
            }
            GameKind::Shooter => {
                let width = painter.css_size().x.round();
                let width = (if width > 0.0 { width } else { SHOOTER_SURFACE.0 }).max(240.0);
                let height = (width * SHOOTER_SURFACE.1 / SHOOTER_SURFACE.0).round().max(320.0);
                (width, height)
            }
        }
    }

    /// Build the game and hook its notifications to the DOM HUD
    fn build(kind: GameKind, tuning: &Tuning, width: f32, height: f32, seed: u64) -> Box<dyn Arcade> {
        match kind {
            GameKind::Pong => {
                let mut game = PongGame::new(tuning.pong.clone(), width, height, seed);
                game.on_event(|e| {
                    let PongEvent::ScoreChanged { left, right, paused } = *e;
                    set_text("score-left", &left.to_string());
                    set_text("score-right", &right.to_string());
                    set_text("paused", if paused { "Paused" } else { "" });
                });
                Box::new(game)
            }
            GameKind::Snake => {
                let mut game = SnakeGame::new(tuning.snake.clone(), width, height, seed);
                game.on_event(|e| match *e {
                    SnakeEvent::ScoreChanged(score) => set_text("score", &score.to_string()),
                    SnakeEvent::SpeedChanged(speed) => set_text("speed", &speed.to_string()),
                    SnakeEvent::GameOver { .. } => {}
                });
                Box::new(game)
            }
            GameKind::Shooter => {
                let store: Box<dyn KeyValueStore> = match LocalStore::open() {
                    Ok(store) => Box::new(store),
                    Err(e) => {
                        log::warn!("{}; high score will not persist", e);
                        Box::new(MemoryStore::new())
                    }
                };
                let mut game = ShooterGame::new(tuning.shooter.clone(), width, height, store);
                set_text("highscore", &game.high_score().best.to_string());
                game.on_event(|e| match *e {
                    ShooterEvent::ScoreChanged(score) => set_text("score", &score.to_string()),
                    ShooterEvent::HealthChanged(health) => set_text("health", &health.to_string()),
                    ShooterEvent::WaveChanged(wave) => {
                        set_text("wave", &wave.to_string());
                        set_hidden("gameOverOverlay", true);
                    }
                    ShooterEvent::HighScore(best) => set_text("highscore", &best.to_string()),
                    ShooterEvent::GameOver { score, high_score } => {
                        set_text("finalScore", &score.to_string());
                        set_text("finalHigh", &high_score.to_string());
                        set_hidden("gameOverOverlay", false);
                    }
                });
                Box::new(game)
            }
        }
    }

    fn request_frame(runner: Rc<RefCell<Runner>>, frame_id: Rc<Cell<Option<i32>>>, stopped: Rc<Cell<bool>>) {
        let Ok(window) = web::window() else {
            return;
        };
        let id = frame_id.clone();
        let closure = Closure::once(move |time: f64| {
            id.set(None);
            if stopped.get() {
                return;
            }
            game_loop(&runner, time);
            request_frame(runner, id, stopped);
        });
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(handle) => frame_id.set(Some(handle)),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
        closure.forget();
    }

    fn game_loop(runner: &Rc<RefCell<Runner>>, time: f64) {
        let mut guard = runner.borrow_mut();
        let r = &mut *guard;

        if let Some((width, height)) = r.debounce.poll(time) {
            if let Err(e) = r.painter.fit(width, height) {
                log::warn!("Resize failed: {}", e);
            }
            r.game.resize(width, height);
            log::debug!("{} resized to {}x{}", r.kind.as_str(), width, height);
        }

        r.game.update(time);
        r.game.render(&mut r.painter);
    }

    fn now_ms() -> f64 {
        web::window()
            .ok()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    fn setup_listeners(runner: &Rc<RefCell<Runner>>) -> Result<Vec<ListenerHandle>, ArcadeError> {
        let window = web::window()?;
        let mut handles = Vec::new();

        {
            let runner = runner.clone();
            handles.push(ListenerHandle::new(&window, "keydown", move |event: Event| {
                let Ok(event) = event.dyn_into::<KeyboardEvent>() else {
                    return;
                };
                let key = event.key();
                let key = normalize_key(&key, &event.code());
                if runner.borrow_mut().game.key_down(key) {
                    event.prevent_default();
                }
            })?);
        }

        {
            let runner = runner.clone();
            handles.push(ListenerHandle::new(&window, "keyup", move |event: Event| {
                let Ok(event) = event.dyn_into::<KeyboardEvent>() else {
                    return;
                };
                let key = event.key();
                runner.borrow_mut().game.key_up(normalize_key(&key, &event.code()));
            })?);
        }

        {
            let runner = runner.clone();
            handles.push(ListenerHandle::new(&window, "resize", move |_event: Event| {
                let mut guard = runner.borrow_mut();
                let r = &mut *guard;
                let (width, height) = surface_size(r.kind, &r.painter);
                r.debounce.request(width, height, now_ms());
            })?);
        }

        {
            let runner = runner.clone();
            handles.push(ListenerHandle::new(&window, "blur", move |_event: Event| {
                runner.borrow_mut().game.pause();
            })?);
        }

        // Optional page buttons
        let document = web::document()?;
        let buttons: [(&str, fn(&mut dyn Arcade)); 4] = [
            ("startBtn", |g| g.start()),
            ("pauseBtn", |g| g.toggle_pause()),
            ("restartBtn", |g| g.restart()),
            ("overlayRestart", |g| g.restart()),
        ];
        for (id, action) in buttons {
            let Some(button) = document.get_element_by_id(id) else {
                continue;
            };
            let runner = runner.clone();
            handles.push(ListenerHandle::new(&button, "click", move |_event: Event| {
                action(runner.borrow_mut().game.as_mut());
            })?);
        }

        Ok(handles)
    }

    pub fn run() -> Result<(), ArcadeError> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Canvas Arcade starting...");

        let tuning = Tuning::load();
        let painter = CanvasPainter::new(web::canvas_by_id("game")?)?;
        let kind = pick_kind(&painter);
        let (width, height) = surface_size(kind, &painter);
        painter.fit(width, height)?;

        let seed = js_sys::Date::now() as u64;
        let mut game = build(kind, &tuning, width, height, seed);
        if kind == GameKind::Pong {
            game.start();
        }
        log::info!("{} mounted at {}x{} with seed {}", kind.as_str(), width, height, seed);

        let runner = Rc::new(RefCell::new(Runner {
            kind,
            game,
            painter,
            debounce: ResizeDebounce::new(RESIZE_DEBOUNCE_MS),
        }));
        let listeners = setup_listeners(&runner)?;

        let frame_id = Rc::new(Cell::new(None));
        let stopped = Rc::new(Cell::new(false));
        request_frame(runner.clone(), frame_id.clone(), stopped.clone());

        SESSION.with(|s| {
            *s.borrow_mut() = Some(Session {
                runner,
                frame_id,
                stopped,
                _listeners: listeners,
            });
        });
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_app::run() {
        log::error!("Failed to start: {}", e);
        web_sys::console::error_1(&e.to_string().into());
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod attract {
    //! Headless attract mode: each game plays itself for a while on a
    //! recording painter

    use std::cell::RefCell;
    use std::rc::Rc;

    use canvas_arcade::app::{Arcade, PongGame, ShooterGame, SnakeGame};
    use canvas_arcade::consts::*;
    use canvas_arcade::persistence::MemoryStore;
    use canvas_arcade::render::DisplayList;
    use canvas_arcade::sim::{ShooterEvent, SnakeEvent};
    use canvas_arcade::{GameKind, Tuning};

    const FRAMES: u32 = 60 * 60;
    const FRAME_MS: f64 = 1000.0 / 60.0;
    const SEED: u64 = 0x5eed;

    /// Drive `game` for `FRAMES` frames, pressing keys from `autopilot`
    fn play(game: &mut dyn Arcade, mut autopilot: impl FnMut(&mut dyn Arcade, u32)) -> DisplayList {
        let mut list = DisplayList::new();
        for frame in 0..FRAMES {
            autopilot(game, frame);
            game.update(frame as f64 * FRAME_MS);
        }
        game.render(&mut list);
        list
    }

    fn tap(game: &mut dyn Arcade, key: &str) {
        game.key_down(key);
        game.key_up(key);
    }

    pub fn run(kind: GameKind, tuning: &Tuning) {
        log::info!("Attract mode: {}", kind.as_str());
        match kind {
            GameKind::Pong => {
                let (w, h) = PONG_SURFACE;
                let mut game = PongGame::new(tuning.pong.clone(), w, h, SEED);
                game.start();
                // Nobody steers the left paddle; the opponent runs up the score
                let list = play(&mut game, |_, _| {});
                let state = game.state();
                log::info!(
                    "pong: left {} right {} after {} frames ({} draw calls)",
                    state.score_left,
                    state.score_right,
                    FRAMES,
                    list.len()
                );
            }
            GameKind::Snake => {
                let (w, h) = SNAKE_SURFACE;
                let deaths = Rc::new(RefCell::new(0u32));
                let mut game = SnakeGame::new(tuning.snake.clone(), w, h, SEED);
                let counter = deaths.clone();
                game.on_event(move |e| {
                    if let SnakeEvent::GameOver { score } = e {
                        log::info!("snake: died with score {}", score);
                        *counter.borrow_mut() += 1;
                    }
                });
                game.start();
                let turns = ["ArrowUp", "ArrowLeft", "ArrowDown", "ArrowRight"];
                let list = play(&mut game, |g, frame| {
                    if frame % 45 == 0 {
                        tap(g, turns[(frame / 45) as usize % turns.len()]);
                    }
                    if frame % 600 == 599 {
                        tap(g, "Enter");
                    }
                });
                log::info!(
                    "snake: score {} length {} deaths {} ({} draw calls)",
                    game.state().score,
                    game.state().segments.len(),
                    deaths.borrow(),
                    list.len()
                );
            }
            GameKind::Shooter => {
                let (w, h) = SHOOTER_SURFACE;
                let mut game = ShooterGame::new(tuning.shooter.clone(), w, h, Box::new(MemoryStore::new()));
                game.on_event(|e| {
                    if let ShooterEvent::GameOver { score, high_score } = e {
                        log::info!("shooter: game over at {} (best {})", score, high_score);
                    }
                });
                game.start();
                let list = play(&mut game, |g, frame| {
                    if frame == 0 {
                        g.key_down(" ");
                    }
                    match (frame / 90) % 2 {
                        0 => {
                            g.key_up("ArrowRight");
                            g.key_down("ArrowLeft");
                        }
                        _ => {
                            g.key_up("ArrowLeft");
                            g.key_down("ArrowRight");
                        }
                    }
                });
                let state = game.state();
                log::info!(
                    "shooter: score {} health {} wave {} best {} ({} draw calls)",
                    state.score,
                    state.health,
                    state.wave,
                    game.high_score().best,
                    list.len()
                );
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use canvas_arcade::{GameKind, Tuning};

    env_logger::init();
    log::info!("Canvas Arcade (native) starting...");
    log::info!("The playable build targets wasm32 - serve it with `trunk serve`");

    let kinds = match std::env::args().nth(1) {
        Some(name) => match GameKind::parse(&name) {
            Ok(kind) => vec![kind],
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(2);
            }
        },
        None => GameKind::ALL.to_vec(),
    };

    let tuning = Tuning::load();
    for kind in kinds {
        attract::run(kind, &tuning);
    }
}
