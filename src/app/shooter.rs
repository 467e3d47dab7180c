//! Shooter host
//!
//! Owns the high-score store: a `HighScore` event from the simulation is
//! written through before listeners see it.

use glam::Vec2;

use super::{Arcade, Listeners};
use crate::GameKind;
use crate::consts::SHOOTER_MAX_DT;
use crate::highscores::HighScore;
use crate::persistence::KeyValueStore;
use crate::platform::input::{Action, SHOOTER_BINDINGS};
use crate::platform::{FrameClock, KeyState};
use crate::render::{self, Painter};
use crate::sim::shooter::{self, ShooterEvent, ShooterInput, ShooterState};
use crate::tuning::ShooterTuning;

pub struct ShooterGame {
    state: ShooterState,
    clock: FrameClock,
    keys: KeyState,
    listeners: Listeners<ShooterEvent>,
    high_score: HighScore,
    store: Box<dyn KeyValueStore>,
    /// Last frame timestamp, for the oscillation clock
    now_ms: f64,
    active: bool,
}

impl ShooterGame {
    pub fn new(tuning: ShooterTuning, width: f32, height: f32, store: Box<dyn KeyValueStore>) -> Self {
        let high_score = HighScore::load(store.as_ref());
        Self {
            state: ShooterState::new(tuning, width, height, high_score.best),
            clock: FrameClock::new(SHOOTER_MAX_DT),
            keys: KeyState::new(),
            listeners: Listeners::default(),
            high_score,
            store,
            now_ms: 0.0,
            active: true,
        }
    }

    /// Score, health, wave, high-score and game-over notifications
    pub fn on_event(&mut self, listener: impl FnMut(&ShooterEvent) + 'static) {
        self.listeners.add(listener);
    }

    pub fn state(&self) -> &ShooterState {
        &self.state
    }

    pub fn high_score(&self) -> HighScore {
        self.high_score
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    fn input(&self) -> ShooterInput {
        ShooterInput {
            left: SHOOTER_BINDINGS.held(&self.keys, Action::MoveLeft),
            right: SHOOTER_BINDINGS.held(&self.keys, Action::MoveRight),
            fire: SHOOTER_BINDINGS.held(&self.keys, Action::Fire),
            time_secs: self.now_ms / 1000.0,
        }
    }

    fn flush(&mut self) {
        let events = self.state.drain_events();
        for event in &events {
            log::debug!("Shooter event: {:?}", event);
            if let ShooterEvent::HighScore(score) = *event {
                if let Err(e) = self.high_score.submit(score, self.store.as_mut()) {
                    log::warn!("Failed to save high score: {}", e);
                }
            }
        }
        self.listeners.dispatch(&events);
    }
}

impl Arcade for ShooterGame {
    fn kind(&self) -> GameKind {
        GameKind::Shooter
    }

    fn size(&self) -> Vec2 {
        self.state.size
    }

    fn start(&mut self) {
        self.active = true;
        self.state.start();
        log::info!("Shooter started");
        self.flush();
    }

    fn stop(&mut self) {
        self.active = false;
        self.keys.clear();
        self.clock.reset();
        log::info!("Shooter stopped");
    }

    fn pause(&mut self) {
        self.state.pause();
    }

    fn resume(&mut self) {
        self.state.resume();
    }

    fn toggle_pause(&mut self) {
        self.state.toggle_pause();
    }

    fn restart(&mut self) {
        self.state.restart();
        self.flush();
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.state.resize(width, height);
    }

    fn update(&mut self, timestamp_ms: f64) {
        if !self.active {
            return;
        }
        let dt = self.clock.advance(timestamp_ms);
        self.now_ms = timestamp_ms;
        let input = self.input();
        shooter::tick(&mut self.state, &input, dt);
        self.flush();
    }

    fn render(&self, painter: &mut dyn Painter) {
        render::shooter::draw(&self.state, painter);
    }

    fn key_down(&mut self, key: &str) -> bool {
        let Some(action) = SHOOTER_BINDINGS.action(key) else {
            return false;
        };
        if self.keys.press(key) {
            match action {
                Action::Fire => {
                    self.state.shoot();
                }
                Action::Pause => self.toggle_pause(),
                Action::Start => self.start(),
                _ => {}
            }
        }
        true
    }

    fn key_up(&mut self, key: &str) {
        self.keys.release(key);
    }
}
